//! HTML page rendering.
//!
//! Pages are emitted line by line with a fixed skeleton. Text is inserted
//! verbatim, with no escaping.

use glossary_shared::{Glossary, GlossaryEntry};

/// Title and heading of the index page.
const INDEX_TITLE: &str = "Glossary";

/// File name of a term's page: the term itself plus `.html`.
pub fn page_file_name(term: &str) -> String {
    format!("{term}.html")
}

/// Line-oriented page builder; every pushed line ends with `\n`.
#[derive(Debug, Default)]
struct Page {
    out: String,
}

impl Page {
    fn open(title: &str) -> Self {
        let mut page = Self::default();
        page.line("<!DOCTYPE html>");
        page.line("<html>");
        page.line("<head>");
        page.line(&format!("<title>{title}</title>"));
        page.line("</head>");
        page.line("<body>");
        page
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn close(mut self) -> String {
        self.line("</body>");
        self.line("</html>");
        self.out
    }
}

/// Render the page for one term.
///
/// `linked_definition` goes inside the `<blockquote>` as-is; `index_page_name`
/// is the target of the back-link.
pub fn render_term_page(
    entry: &GlossaryEntry,
    linked_definition: &str,
    index_page_name: &str,
) -> String {
    let term = &entry.term;
    let mut page = Page::open(term);

    page.line("<h2 style=\"color:red;\">");
    page.line(&format!("<i><b>{term}</b></i></h2>"));
    page.line(&format!("<blockquote>{linked_definition}</blockquote>"));

    page.line("<hr>");
    page.line(&format!("<p> Return to <a href=\"{index_page_name}\">index</a>.</p>"));

    page.close()
}

/// Render the index page listing every term in glossary order.
pub fn render_index_page(glossary: &Glossary) -> String {
    let mut page = Page::open(INDEX_TITLE);

    page.line(&format!("<h2>{INDEX_TITLE}</h2>"));
    page.line("<hr>");
    page.line("<h3>Index Of Terms - Click on each term to view definition:</h3>");

    page.line("<ul>");
    for term in glossary.terms() {
        page.line(&format!(
            "<li> <a href =\"{}\">{term}</a></li>",
            page_file_name(term)
        ));
    }
    page.line("</ul>");

    page.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_page_layout() {
        let entry = GlossaryEntry::new("Term 1", "Definition 1.\n");
        let html = render_term_page(&entry, "Definition 1.\n", "index.html");

        let expected = "\
<!DOCTYPE html>
<html>
<head>
<title>Term 1</title>
</head>
<body>
<h2 style=\"color:red;\">
<i><b>Term 1</b></i></h2>
<blockquote>Definition 1.
</blockquote>
<hr>
<p> Return to <a href=\"index.html\">index</a>.</p>
</body>
</html>
";
        assert_eq!(html, expected);
    }

    #[test]
    fn term_page_embeds_linked_definition_verbatim() {
        let entry = GlossaryEntry::new("B", "See A.\n");
        let linked = "See <a href=\"A.html\">A</a>.\n";
        let html = render_term_page(&entry, linked, "out/glossary.html");

        assert!(html.contains("<blockquote>See <a href=\"A.html\">A</a>.\n</blockquote>"));
        assert!(html.contains("<a href=\"out/glossary.html\">index</a>"));
    }

    #[test]
    fn index_page_layout() {
        let glossary: Glossary = [("Term 2", "second\n"), ("Term 1", "first\n")]
            .into_iter()
            .collect();
        let html = render_index_page(&glossary);

        let expected = "\
<!DOCTYPE html>
<html>
<head>
<title>Glossary</title>
</head>
<body>
<h2>Glossary</h2>
<hr>
<h3>Index Of Terms - Click on each term to view definition:</h3>
<ul>
<li> <a href =\"Term 2.html\">Term 2</a></li>
<li> <a href =\"Term 1.html\">Term 1</a></li>
</ul>
</body>
</html>
";
        assert_eq!(html, expected);
    }

    #[test]
    fn empty_index_keeps_skeleton() {
        let html = render_index_page(&Glossary::new());
        assert!(html.contains("<ul>\n</ul>\n"));
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.ends_with("</body>\n</html>\n"));
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn page_file_name_is_verbatim() {
        assert_eq!(page_file_name("Term 1"), "Term 1.html");
        assert_eq!(page_file_name("a/b"), "a/b.html");
    }
}
