//! Message text formatting.
//!
//! Newlines become line breaks and bare `http(s)://` URLs become link
//! segments. Nothing else is interpreted or escaped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bare URL: scheme followed by everything up to the next whitespace.
pub(crate) static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Invalid URL regex pattern"));

/// A run of text within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(String),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::Link(s) => s,
        }
    }
}

/// Message content split into lines of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedText {
    pub lines: Vec<Vec<Segment>>,
}

impl FormattedText {
    pub fn format(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let lines = text.split('\n').map(split_links).collect();
        Self { lines }
    }

    /// True when there is no visible content at all.
    pub fn is_empty(&self) -> bool {
        self.lines
            .iter()
            .all(|line| line.iter().all(|seg| seg.as_str().is_empty()))
    }

    /// Content with segments joined and lines separated by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(Segment::as_str).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every link target in order of appearance.
    pub fn links(&self) -> Vec<&str> {
        self.lines
            .iter()
            .flatten()
            .filter_map(|seg| match seg {
                Segment::Link(url) => Some(url.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }
}

fn split_links(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for m in URL_REGEX.find_iter(line) {
        if m.start() > last_end {
            segments.push(Segment::Text(line[last_end..m.start()].to_string()));
        }
        segments.push(Segment::Link(m.as_str().to_string()));
        last_end = m.end();
    }

    if last_end < line.len() {
        segments.push(Segment::Text(line[last_end..].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_become_lines() {
        let text = FormattedText::format("one\ntwo\n\nfour");
        assert_eq!(text.lines.len(), 4);
        assert!(text.lines[2].is_empty());
        assert_eq!(text.plain_text(), "one\ntwo\n\nfour");
    }

    #[test]
    fn test_links_are_marked() {
        let text = FormattedText::format("see https://example.com/a?b=1 and http://x.io");
        assert_eq!(
            text.lines[0],
            vec![
                Segment::Text("see ".to_string()),
                Segment::Link("https://example.com/a?b=1".to_string()),
                Segment::Text(" and ".to_string()),
                Segment::Link("http://x.io".to_string()),
            ]
        );
        assert_eq!(text.links(), vec!["https://example.com/a?b=1", "http://x.io"]);
    }

    #[test]
    fn test_markup_is_left_alone() {
        let text = FormattedText::format("<b>bold</b> ftp://nope");
        assert_eq!(text.links(), Vec::<&str>::new());
        assert_eq!(text.plain_text(), "<b>bold</b> ftp://nope");
    }

    #[test]
    fn test_empty() {
        assert!(FormattedText::format("").is_empty());
        assert!(!FormattedText::format(" ").is_empty());
    }
}
