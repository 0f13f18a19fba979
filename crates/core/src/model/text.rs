use serde::{Deserialize, Serialize};

/// Display text for a question, option or explanation.
///
/// The backend mixes plain strings with HTML authored in a rich-text editor.
/// Rendering code decides how to present each variant; `Html` content must be
/// sanitized before it reaches a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RichText {
    Plain(String),
    Html(String),
}

impl RichText {
    /// Classify raw backend text by looking for a markup tag.
    #[must_use]
    pub fn detect(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if looks_like_html(&raw) {
            Self::Html(raw)
        } else {
            Self::Plain(raw)
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::Plain(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Html(text) => text,
        }
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl Default for RichText {
    fn default() -> Self {
        Self::empty()
    }
}

fn looks_like_html(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.windows(2).any(|pair| {
        pair[0] == b'<' && (pair[1].is_ascii_alphabetic() || pair[1] == b'/' || pair[1] == b'!')
    }) && input.contains('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_markup() {
        assert!(RichText::detect("<p>Which <b>two</b>?</p>").is_html());
        assert!(RichText::detect("line<br/>break").is_html());
    }

    #[test]
    fn comparison_operators_stay_plain() {
        let text = RichText::detect("Is 3 < 4 and 5 > 2?");
        assert!(!text.is_html());
        assert_eq!(text.as_str(), "Is 3 < 4 and 5 > 2?");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(RichText::detect("   ").is_empty());
        assert!(RichText::default().is_empty());
    }
}
