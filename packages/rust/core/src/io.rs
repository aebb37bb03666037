//! Line-source and page-sink capabilities the pipeline reads from and writes to.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use glossary_shared::{GlossaryError, Result};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Somewhere glossary input lines come from.
pub trait LineSource {
    /// Name used in error reports and logs.
    fn origin(&self) -> &Path;
    /// Read every line, without line terminators.
    ///
    /// Bytes that are not valid UTF-8 decode to U+FFFD instead of failing.
    fn read_lines(&mut self) -> Result<Vec<String>>;
}

/// Reads lines from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSource for FileSource {
    fn origin(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_lines(&mut self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|e| GlossaryError::io(&self.path, e))?;

        let mut lines = Vec::new();
        let mut lossy = 0usize;
        for raw in BufReader::new(file).split(b'\n') {
            let mut raw = raw.map_err(|e| GlossaryError::io(&self.path, e))?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    lossy += 1;
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            lines.push(line);
        }

        if lossy > 0 {
            warn!(lossy, "input is not valid UTF-8, invalid bytes replaced");
        }
        debug!(lines = lines.len(), "input read");
        Ok(lines)
    }
}

/// Lines already in memory (tests, piped input).
#[derive(Debug, Clone)]
pub struct MemorySource {
    origin: PathBuf,
    lines: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origin: PathBuf::from("<memory>"),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a block of text on line breaks.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl LineSource for MemorySource {
    fn origin(&self) -> &Path {
        &self.origin
    }

    fn read_lines(&mut self) -> Result<Vec<String>> {
        Ok(self.lines.clone())
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Somewhere rendered pages are written, keyed by file name.
pub trait PageSink {
    fn write_page(&mut self, name: &str, contents: &str) -> Result<()>;
}

/// Writes each page as a file under a root directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path a page name resolves to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl PageSink for DirSink {
    fn write_page(&mut self, name: &str, contents: &str) -> Result<()> {
        let path = self.path_for(name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GlossaryError::io(parent, e))?;
        }

        std::fs::write(&path, contents).map_err(|e| GlossaryError::io(&path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "page written");
        Ok(())
    }
}

/// Keeps pages in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pages: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(name, contents)` pairs in the order they were written.
    pub fn pages(&self) -> &[(String, String)] {
        &self.pages
    }

    /// Contents of the most recent write under `name`.
    pub fn page(&self, name: &str) -> Option<&str> {
        self.pages
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, contents)| contents.as_str())
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, name: &str, contents: &str) -> Result<()> {
        self.pages.push((name.to_string(), contents.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_source_reads_lines_without_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.txt");
        std::fs::write(&path, "Term\r\nDefinition.\n\nOther\n").unwrap();

        let lines = FileSource::new(&path).read_lines().unwrap();
        assert_eq!(lines, vec!["Term", "Definition.", "", "Other"]);
    }

    #[test]
    fn file_source_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"Caf\xe9\r\nA place.\n").unwrap();

        let lines = FileSource::new(&path).read_lines().unwrap();
        assert_eq!(lines, vec!["Caf\u{FFFD}", "A place."]);
    }

    #[test]
    fn missing_input_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = FileSource::new(&path).read_lines().unwrap_err();
        match err {
            GlossaryError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn memory_source_splits_text() {
        let mut source = MemorySource::from_text("a\n\nb");
        assert_eq!(source.read_lines().unwrap(), vec!["a", "", "b"]);
        assert_eq!(source.origin(), Path::new("<memory>"));
    }

    #[test]
    fn dir_sink_creates_root_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirSink::new(dir.path().join("site"));

        sink.write_page("Term 1.html", "<html></html>\n").unwrap();

        let written = std::fs::read_to_string(dir.path().join("site").join("Term 1.html")).unwrap();
        assert_eq!(written, "<html></html>\n");
    }

    #[test]
    fn dir_sink_reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the root directory should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();

        let mut sink = DirSink::new(&blocker);
        let err = sink.write_page("x.html", "x").unwrap_err();
        assert!(matches!(err, GlossaryError::Io { .. }));
    }

    #[test]
    fn memory_sink_keeps_write_order_and_latest_contents() {
        let mut sink = MemorySink::new();
        sink.write_page("b.html", "one").unwrap();
        sink.write_page("a.html", "two").unwrap();
        sink.write_page("b.html", "three").unwrap();

        let names: Vec<_> = sink.pages().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b.html", "a.html", "b.html"]);
        assert_eq!(sink.page("b.html"), Some("three"));
        assert_eq!(sink.page("c.html"), None);
    }
}
