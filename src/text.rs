//! Plain-text rendering of HTML fragments.

use std::io::Cursor;

use tracing::warn;

/// Render an HTML fragment as wrapped plain text.
///
/// Best-effort: a converter failure is logged and yields an empty string
/// instead of an error.
pub fn html_to_text(html: &str, width: usize) -> String {
    match html2text::from_read(Cursor::new(html.as_bytes()), width.max(1)) {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            warn!(error = %err, len = html.len(), "text conversion failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let text = html_to_text("<p>First paragraph.</p><p>Second paragraph.</p>", 80);
        let lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, ["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(html_to_text("<span>Fish &amp; chips</span>", 80), "Fish & chips");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text("", 80), "");
    }

    #[test]
    fn test_wraps_at_width() {
        let text = html_to_text("<p>one two three four five six seven eight nine ten</p>", 20);
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|l| l.chars().count() <= 20));
    }
}
