//! Visible-text extraction from page HTML.

use scraper::{Html, Selector};

/// Subtrees that never contribute visible text.
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Extract the readable text of a page, the way `document.body.innerText`
/// would see it: tags stripped, script/style subtrees skipped, whitespace
/// collapsed.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let body_selector = Selector::parse("body").unwrap();
    let parts = match document.select(&body_selector).next() {
        Some(body) => collect_text(body),
        None => collect_text(document.root_element()),
    };

    collapse_whitespace(&parts.join(" "))
}

fn collect_text(element: scraper::ElementRef<'_>) -> Vec<String> {
    if SKIP_TAGS.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_text(child_el));
                }
            }
            _ => {}
        }
    }
    parts
}

fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
            }
            prev_was_space = true;
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result.trim().to_string()
}
