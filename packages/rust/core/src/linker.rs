//! Hyperlink insertion for glossary terms found inside definitions.
//!
//! Every whole-word, case-sensitive occurrence of a known term becomes
//! `<a href="TERM.html">TERM</a>`. Terms are tried in glossary order.

use regex::{Captures, NoExpand, Regex};
use tracing::{debug, instrument};

use glossary_shared::{Glossary, GlossaryEntry, GlossaryError, LinkOptions, LinkStrategy, Result};

use crate::render::page_file_name;

/// A term that definitions may link to.
#[derive(Debug)]
struct Target {
    term: String,
    anchor: String,
    pattern: Regex,
}

/// Pre-compiled matchers for one glossary, reusable across all its entries.
#[derive(Debug)]
pub struct Linker {
    targets: Vec<Target>,
    /// Alternation of every target, used by [`LinkStrategy::SinglePass`].
    combined: Option<Regex>,
    options: LinkOptions,
}

impl Linker {
    /// Compile one whole-word matcher per term that has a definition.
    #[instrument(skip_all, fields(terms = glossary.len(), strategy = ?options.strategy))]
    pub fn new(glossary: &Glossary, options: LinkOptions) -> Result<Self> {
        let mut targets = Vec::with_capacity(glossary.len());

        for entry in glossary.iter().filter(|e| e.has_definition()) {
            let pattern = Regex::new(&whole_word(&entry.term))
                .map_err(|e| GlossaryError::pattern(&entry.term, e))?;
            targets.push(Target {
                term: entry.term.clone(),
                anchor: anchor(&entry.term),
                pattern,
            });
        }

        let combined = match options.strategy {
            LinkStrategy::SinglePass if !targets.is_empty() => {
                let alternation = targets
                    .iter()
                    .map(|t| whole_word(&t.term))
                    .collect::<Vec<_>>()
                    .join("|");
                let regex = Regex::new(&alternation)
                    .map_err(|e| GlossaryError::pattern("(all terms)", e))?;
                Some(regex)
            }
            _ => None,
        };

        debug!(targets = targets.len(), "linker ready");

        Ok(Self {
            targets,
            combined,
            options,
        })
    }

    /// Return `entry`'s definition with term occurrences hyperlinked.
    ///
    /// An empty definition comes back as an empty string.
    pub fn link(&self, entry: &GlossaryEntry) -> String {
        if !entry.has_definition() {
            return String::new();
        }

        match self.options.strategy {
            LinkStrategy::Sequential => self.link_sequential(entry),
            LinkStrategy::SinglePass => self.link_single_pass(entry),
        }
    }

    /// Replace-all per term over the rewritten text. Markup inserted for one
    /// term is visible to the patterns of the terms after it.
    fn link_sequential(&self, entry: &GlossaryEntry) -> String {
        let mut text = entry.definition.clone();

        for target in &self.targets {
            if !self.options.link_self && target.term == entry.term {
                continue;
            }
            text = target
                .pattern
                .replace_all(&text, NoExpand(&target.anchor))
                .into_owned();
        }

        text
    }

    /// One scan over the original text; inserted markup is never re-read.
    fn link_single_pass(&self, entry: &GlossaryEntry) -> String {
        let Some(combined) = &self.combined else {
            return entry.definition.clone();
        };

        combined
            .replace_all(&entry.definition, |caps: &Captures| {
                let found = &caps[0];
                if !self.options.link_self && found == entry.term {
                    found.to_string()
                } else {
                    anchor(found)
                }
            })
            .into_owned()
    }
}

/// Link one entry against a glossary, checking that both were supplied.
///
/// Fails with [`GlossaryError::NullArgument`] when either is `None`.
pub fn link(
    glossary: Option<&Glossary>,
    entry: Option<&GlossaryEntry>,
    options: &LinkOptions,
) -> Result<String> {
    let glossary = glossary.ok_or_else(|| GlossaryError::null_argument("glossary"))?;
    let entry = entry.ok_or_else(|| GlossaryError::null_argument("entry"))?;

    Ok(Linker::new(glossary, *options)?.link(entry))
}

/// `<a href="TERM.html">TERM</a>`
pub fn anchor(term: &str) -> String {
    format!("<a href=\"{}\">{term}</a>", page_file_name(term))
}

fn whole_word(term: &str) -> String {
    format!(r"\b{}\b", regex::escape(term))
}
