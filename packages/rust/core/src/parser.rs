//! Term/definition block parser.
//!
//! Input is a sequence of blocks separated by blank lines. The first
//! non-blank line of a block is the term; every following non-blank line up
//! to the next blank line (or end of input) belongs to its definition.

use tracing::{debug, warn};

use glossary_shared::Glossary;

/// Scanner state between lines.
#[derive(Debug)]
enum State {
    AwaitingTerm,
    AwaitingDefinition { term: String, definition: String },
}

/// Incremental block scanner. Feed lines, then [`BlockScanner::finish`].
#[derive(Debug)]
struct BlockScanner {
    state: State,
    glossary: Glossary,
}

impl BlockScanner {
    fn new() -> Self {
        Self {
            state: State::AwaitingTerm,
            glossary: Glossary::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        if line.is_empty() {
            self.close_block();
            return;
        }

        match &mut self.state {
            State::AwaitingTerm => {
                self.state = State::AwaitingDefinition {
                    term: line.to_string(),
                    definition: String::new(),
                };
            }
            State::AwaitingDefinition { definition, .. } => {
                definition.push_str(line);
                definition.push('\n');
            }
        }
    }

    /// Commit the pending block, if it collected any definition text.
    fn close_block(&mut self) {
        let State::AwaitingDefinition { term, definition } =
            std::mem::replace(&mut self.state, State::AwaitingTerm)
        else {
            return;
        };

        if definition.is_empty() {
            debug!(%term, "term has no definition, dropping");
            return;
        }

        if self.glossary.insert(term.as_str(), definition).is_some() {
            warn!(%term, "duplicate term, later definition replaces earlier one");
        }
    }

    fn finish(mut self) -> Glossary {
        self.close_block();
        self.glossary
    }
}

/// Parse glossary blocks from an in-memory sequence of lines.
pub fn parse<I, S>(lines: I) -> Glossary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = BlockScanner::new();
    for line in lines {
        scanner.feed(line.as_ref());
    }
    let glossary = scanner.finish();
    debug!(terms = glossary.len(), "glossary parsed");
    glossary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn single_term() {
        let glossary = parse(lines("Test Term\nThis is a test definition for the term.\n"));
        assert_eq!(glossary.len(), 1);
        assert_eq!(
            glossary.get("Test Term").unwrap().definition,
            "This is a test definition for the term.\n"
        );
    }

    #[test]
    fn multiple_terms_in_order() {
        let input = "Term 1\nDefinition 1.\n\nTerm 2\nDefinition 2.\n\nTerm 3\nDefinition 3.\n\nTerm 4\nDefinition 4.";
        let glossary = parse(lines(input));

        assert_eq!(
            glossary.terms().collect::<Vec<_>>(),
            vec!["Term 1", "Term 2", "Term 3", "Term 4"]
        );
        assert_eq!(glossary.get("Term 3").unwrap().definition, "Definition 3.\n");
    }

    #[test]
    fn multi_line_definitions_are_trimmed_and_joined() {
        let glossary = parse(lines("  Rust  \n  A systems language.\n\tMemory safe.  \n"));
        assert_eq!(
            glossary.get("Rust").unwrap().definition,
            "A systems language.\nMemory safe.\n"
        );
    }

    #[test]
    fn empty_input_yields_empty_glossary() {
        assert!(parse(Vec::<String>::new()).is_empty());
        assert!(parse(lines("\n   \n\t\n")).is_empty());
    }

    #[test]
    fn extra_blank_lines_between_blocks_are_ignored() {
        let glossary = parse(lines(
            "\n\nTerm 1\nDefinition 1.\n\n\n   \nTerm 2\nDefinition 2.\n\n",
        ));
        assert_eq!(glossary.len(), 2);
        assert_eq!(glossary.get("Term 2").unwrap().definition, "Definition 2.\n");
    }

    #[test]
    fn term_without_definition_is_dropped() {
        let glossary = parse(lines("Orphan\n\nTerm\nDefined.\n\nTrailing"));
        assert_eq!(glossary.terms().collect::<Vec<_>>(), vec!["Term"]);
    }

    #[test]
    fn blank_line_after_term_closes_the_block() {
        // Every block here is a lone line, so nothing gets a definition.
        let input = "Term 1\n\nDefinition 1.\n\nTerm 2\n\nTerm 1 is related to Term 2.\n";
        assert!(parse(lines(input)).is_empty());
    }

    #[test]
    fn duplicate_term_overwrites_in_place() {
        let glossary = parse(lines("A\nfirst\n\nB\nbee\n\nA\nsecond\n"));
        assert_eq!(glossary.terms().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(glossary.get("A").unwrap().definition, "second\n");
    }
}
