//! CLI command definitions, routing, and tracing setup.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use glossary_core::io::{FileSource, MemorySink};
use glossary_core::pipeline::{self, BuildConfig, BuildResult, ProgressReporter};
use glossary_shared::{
    AppConfig, GlossaryError, LinkOptions, LinkStrategy, init_config, load_config,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Build cross-linked HTML pages from a plain-text glossary.
#[derive(Parser)]
#[command(
    name = "glossary",
    version,
    about = "Build an HTML index page plus one linked page per term from a glossary text file.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Link substitution strategy as accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum StrategyArg {
    /// Replace term by term over the rewritten text.
    Sequential,
    /// Fix all matches first, then rewrite once.
    SinglePass,
}

impl From<StrategyArg> for LinkStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => LinkStrategy::Sequential,
            StrategyArg::SinglePass => LinkStrategy::SinglePass,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the index page and one page per term.
    Build {
        /// Glossary text file (prompted for when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Index page path, ending in .html (prompted for when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Link substitution strategy (defaults to the config file value).
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Leave a term unlinked inside its own definition.
        #[arg(long)]
        no_self_link: bool,

        /// Render everything in memory and list the pages without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse a glossary file and list its terms.
    Terms {
        /// Glossary text file.
        #[arg(short, long)]
        input: PathBuf,

        /// Print terms and definitions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "glossary=warn",
        1 => "glossary=info",
        2 => "glossary=debug",
        _ => "glossary=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            input,
            output,
            strategy,
            no_self_link,
            dry_run,
        } => cmd_build(input, output, strategy, no_self_link, dry_run),
        Command::Terms { input, json } => cmd_terms(&input, json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

fn cmd_build(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    strategy: Option<StrategyArg>,
    no_self_link: bool,
    dry_run: bool,
) -> Result<()> {
    let config = load_config()?;

    let input = match input {
        Some(p) => p,
        None => PathBuf::from(prompt("Enter a file name to create glossary from: ")?),
    };
    if input.as_os_str().is_empty() {
        return Err(eyre!("no input file given"));
    }

    let output = match output {
        Some(p) => p,
        None => {
            let answer = prompt("Select an output destination (include .html extension): ")?;
            if answer.is_empty() {
                config.defaults.default_output_path()
            } else {
                PathBuf::from(answer)
            }
        }
    };
    ensure_html(&output)?;

    let link = link_options(&config, strategy, no_self_link);

    info!(
        input = %input.display(),
        output = %output.display(),
        strategy = ?link.strategy,
        link_self = link.link_self,
        dry_run,
        "building glossary"
    );

    let reporter = CliProgress::new();

    let result = if dry_run {
        let index_name = output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| eyre!("output '{}' has no file name", output.display()))?;
        let mut sink = MemorySink::new();
        let result = pipeline::run(
            &mut FileSource::new(&input),
            &index_name,
            &mut sink,
            &link,
            &reporter,
        )?;

        println!();
        println!("  Dry run, nothing written. Pages:");
        for (name, contents) in sink.pages() {
            println!("    {name} ({} bytes)", contents.len());
        }
        result
    } else {
        pipeline::build(
            &BuildConfig {
                input,
                output: output.clone(),
                link,
            },
            &reporter,
        )?
    };

    println!();
    println!("  {}", if dry_run { "Dry run complete." } else { "Glossary built!" });
    println!("  Terms:  {}", result.term_count);
    println!("  Index:  {}", output.display());
    println!("  Time:   {:.1}ms", result.elapsed.as_secs_f64() * 1000.0);
    println!();

    Ok(())
}

/// Merge CLI flags over config file values.
fn link_options(
    config: &AppConfig,
    strategy: Option<StrategyArg>,
    no_self_link: bool,
) -> LinkOptions {
    let mut link = LinkOptions::from(config);
    if let Some(strategy) = strategy {
        link.strategy = strategy.into();
    }
    if no_self_link {
        link.link_self = false;
    }
    link
}

/// The index page must be an `.html` file.
fn ensure_html(output: &Path) -> Result<()> {
    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("html") => Ok(()),
        _ => Err(GlossaryError::validation(format!(
            "output '{}' must end in .html",
            output.display()
        ))
        .into()),
    }
}

/// Print `question` and read one trimmed line from stdin.
fn prompt(question: &str) -> Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{question}")?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_written(&self, term: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Writing [{current}/{total}] {term}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}

/// Clears the spinner when a build bails out before `done`.
impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

// ---------------------------------------------------------------------------
// terms / config
// ---------------------------------------------------------------------------

fn cmd_terms(input: &Path, json: bool) -> Result<()> {
    let glossary = pipeline::load_glossary(&mut FileSource::new(input))?;
    info!(input = %input.display(), terms = glossary.len(), "listing terms");

    if json {
        println!("{}", serde_json::to_string_pretty(&glossary)?);
    } else {
        for term in glossary.terms() {
            println!("{term}");
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
