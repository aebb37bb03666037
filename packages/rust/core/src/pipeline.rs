//! End-to-end build pipeline: lines → glossary → linked term pages → index page.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument};

use glossary_shared::{Glossary, GlossaryError, LinkOptions, Result};

use crate::io::{DirSink, FileSource, LineSource, PageSink};
use crate::linker::Linker;
use crate::parser;
use crate::render::{page_file_name, render_index_page, render_term_page};

/// Configuration for the file-backed [`build`] pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Glossary source text file.
    pub input: PathBuf,
    /// Path of the index page. Term pages are written next to it.
    pub output: PathBuf,
    /// Hyperlink insertion options.
    pub link: LinkOptions,
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct BuildResult {
    /// Name the index page was written under.
    pub index_name: String,
    /// Number of glossary terms (one page each).
    pub term_count: usize,
    /// Term page names, in write order.
    pub pages: Vec<String>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each term page is written.
    fn page_written(&self, term: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_written(&self, _term: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Read and parse a glossary from any line source.
#[instrument(skip_all, fields(origin = %source.origin().display()))]
pub fn load_glossary(source: &mut dyn LineSource) -> Result<Glossary> {
    let lines = source.read_lines()?;
    Ok(parser::parse(&lines))
}

/// Run the pipeline against injected capabilities.
///
/// 1. Parse the source into a glossary
/// 2. Link, render, and write one page per term, in glossary order
/// 3. Render and write the index page as `index_name`
///
/// Pages written before a failure are left in the sink.
#[instrument(skip_all, fields(origin = %source.origin().display(), index = index_name))]
pub fn run(
    source: &mut dyn LineSource,
    index_name: &str,
    sink: &mut dyn PageSink,
    link: &LinkOptions,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    // --- Phase 1: Parse ---
    progress.phase("Parsing glossary");
    let glossary = load_glossary(source)?;
    info!(terms = glossary.len(), "glossary loaded");

    // --- Phase 2: Term pages ---
    progress.phase("Writing term pages");
    let linker = Linker::new(&glossary, *link)?;
    let total = glossary.len();
    let mut pages = Vec::with_capacity(total);

    for (i, entry) in glossary.iter().enumerate() {
        let linked = linker.link(entry);
        let html = render_term_page(entry, &linked, index_name);
        let name = page_file_name(&entry.term);

        sink.write_page(&name, &html)?;
        progress.page_written(&entry.term, i + 1, total);
        debug!(term = %entry.term, page = %name, "term page written");

        pages.push(name);
    }

    // --- Phase 3: Index ---
    progress.phase("Writing index page");
    sink.write_page(index_name, &render_index_page(&glossary))?;

    let result = BuildResult {
        index_name: index_name.to_string(),
        term_count: total,
        pages,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        term_count = result.term_count,
        index = %result.index_name,
        elapsed_ms = result.elapsed.as_millis(),
        "build complete"
    );

    Ok(result)
}

/// Run the pipeline from a file on disk to HTML files on disk.
///
/// Term pages go in the index page's directory, and their back-links use the
/// index's bare file name.
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn build(config: &BuildConfig, progress: &dyn ProgressReporter) -> Result<BuildResult> {
    let (root, index_name) = split_output(&config.output)?;

    let mut source = FileSource::new(&config.input);
    let mut sink = DirSink::new(root);

    run(&mut source, &index_name, &mut sink, &config.link, progress)
}

/// Split an index path into the directory pages go in and the index file name.
fn split_output(output: &Path) -> Result<(PathBuf, String)> {
    let name = output
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            GlossaryError::validation(format!(
                "output path '{}' has no file name",
                output.display()
            ))
        })?
        .to_string();

    let root = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((root, name))
}
