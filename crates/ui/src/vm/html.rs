use std::collections::{HashMap, HashSet};

use exam_core::model::RichText;

/// Strip question markup down to what the screens render.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "sub", "sup", "code", "pre",
        "blockquote", "ul", "ol", "li", "table", "thead", "tbody", "tr", "th", "td", "img", "a",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    attributes.insert("img", ["src", "alt", "width", "height"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// `<img>` markup for an option picture, or `None` when the source is not allowed.
#[must_use]
pub fn image_html(src: &str) -> Option<String> {
    let markup = format!(r#"<img src="{}" alt="">"#, ammonia::clean_text(src.trim()));
    let cleaned = sanitize_html(&markup);
    cleaned.contains("src=").then_some(cleaned)
}

/// Markup safe for `dangerous_inner_html`; plain text is escaped.
#[must_use]
pub fn rich_text_html(text: &RichText) -> String {
    match text {
        RichText::Html(html) => sanitize_html(html),
        RichText::Plain(plain) => ammonia::clean_text(plain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_scripts_and_handlers() {
        let cleaned = sanitize_html(r#"<p onclick="x()">Hi<script>alert(1)</script></p>"#);
        assert_eq!(cleaned, "<p>Hi</p>");
    }

    #[test]
    fn plain_text_is_escaped() {
        let html = rich_text_html(&RichText::Plain("a<b".into()));
        assert!(html.contains("&lt;"));
        assert!(!html.contains('<'));
    }

    #[test]
    fn option_image_keeps_http_source_and_rejects_scripts() {
        let html = image_html("https://x.test/a.png").unwrap();
        assert!(html.contains(r#"src="https://x.test/a.png""#), "{html}");

        assert_eq!(image_html("javascript:alert(1)"), None);
        assert!(!image_html(r#"a.png" onerror="x()"#).unwrap_or_default().contains(r#"onerror=""#));
    }

    #[test]
    fn images_keep_their_source() {
        let html = rich_text_html(&RichText::Html(r#"<img src="https://x.test/a.png" alt="a">"#.into()));
        assert!(html.contains(r#"src="https://x.test/a.png""#));
    }
}
