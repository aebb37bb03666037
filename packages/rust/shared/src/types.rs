//! Core domain types: glossary entries and the ordered glossary mapping.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// GlossaryEntry
// ---------------------------------------------------------------------------

/// One term and its raw definition text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    /// Trimmed, non-empty term text. Also the page file stem.
    pub term: String,
    /// Newline-terminated definition lines. Empty means the definition is absent.
    pub definition: String,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// Whether this entry carries any definition text.
    pub fn has_definition(&self) -> bool {
        !self.definition.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Glossary
// ---------------------------------------------------------------------------

/// Term → definition mapping that iterates in first-insertion order.
///
/// Re-inserting an existing term replaces its definition in place, so the
/// term keeps the position of its first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    positions: HashMap<String, usize>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a term. Returns the replaced definition, if any.
    pub fn insert(
        &mut self,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Option<String> {
        let term = term.into();
        let definition = definition.into();

        if let Some(&pos) = self.positions.get(&term) {
            let previous = std::mem::replace(&mut self.entries[pos].definition, definition);
            return Some(previous);
        }

        self.positions.insert(term.clone(), self.entries.len());
        self.entries.push(GlossaryEntry { term, definition });
        None
    }

    pub fn get(&self, term: &str) -> Option<&GlossaryEntry> {
        self.positions.get(term).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, GlossaryEntry> {
        self.entries.iter()
    }

    /// Term names in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }
}

impl<'a> IntoIterator for &'a Glossary {
    type Item = &'a GlossaryEntry;
    type IntoIter = std::slice::Iter<'a, GlossaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T, D> FromIterator<(T, D)> for Glossary
where
    T: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, D)>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        for (term, definition) in iter {
            glossary.insert(term, definition);
        }
        glossary
    }
}

/// Serialized as an ordered list of entries.
impl Serialize for Glossary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
