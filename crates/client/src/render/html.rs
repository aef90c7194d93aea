//! HTML to plain text.
//!
//! A small DOM walk over the scraper tree: text is whitespace-collapsed,
//! block elements break lines, links keep their target inline as
//! `text (href)`, and non-content elements (images, scripts, styles, the
//! document head) are dropped.

use scraper::{ElementRef, Html, Node};

const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "template", "img", "picture", "svg", "iframe", "object", "video",
    "audio", "canvas",
];

/// Elements surrounded by a blank line.
const PARAGRAPHS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "table", "ul", "ol"];

/// Elements that start on their own line.
const BLOCKS: &[&str] = &[
    "div", "section", "article", "header", "footer", "nav", "main", "aside", "form", "fieldset", "figure",
    "figcaption", "address", "dl", "dt", "dd", "tr", "hr", "details", "summary",
];

/// Render an HTML document as readable text.
pub fn render_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut writer = TextWriter::default();
    walk(document.root_element(), &mut writer);
    writer.finish()
}

fn walk(element: ElementRef<'_>, out: &mut TextWriter) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.text(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    element_to_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn element_to_text(element: ElementRef<'_>, out: &mut TextWriter) {
    let name = element.value().name();

    if SKIPPED.contains(&name) {
        return;
    }

    match name {
        "br" => out.line_break(),
        "li" => {
            out.line_break();
            out.text("- ");
            walk(element, out);
            out.line_break();
        }
        "td" | "th" => {
            walk(element, out);
            out.text(" ");
        }
        "a" => {
            let href = element.value().attr("href").map(str::trim).unwrap_or_default();
            let before = out.len();
            walk(element, out);
            if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
                return;
            }
            if out.len() > before {
                out.text(" ");
                out.text(&format!("({href})"));
            } else {
                out.text(href);
            }
        }
        _ if PARAGRAPHS.contains(&name) => {
            out.blank_line();
            walk(element, out);
            out.blank_line();
        }
        _ if BLOCKS.contains(&name) => {
            out.line_break();
            walk(element, out);
            out.line_break();
        }
        _ => walk(element, out),
    }
}

/// Accumulates collapsed text with at most one blank line between blocks.
#[derive(Default)]
struct TextWriter {
    out: String,
    pending_space: bool,
}

impl TextWriter {
    fn len(&self) -> usize {
        self.out.len()
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let mut wrote = false;
        for word in text.split_whitespace() {
            if (wrote || self.pending_space) && !self.at_line_start() {
                self.out.push(' ');
            }
            self.out.push_str(word);
            wrote = true;
        }
        if wrote {
            self.pending_space = text.ends_with(char::is_whitespace);
        }
    }

    fn line_break(&mut self) {
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
        if !self.at_line_start() {
            self.out.push('\n');
        }
        self.pending_space = false;
    }

    fn blank_line(&mut self) {
        self.line_break();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}
