//! Result and error rendering for the panel.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sidelens_domain::Reply;
use std::time::Duration;

/// Escape text for embedding in an HTML surface.
///
/// Results are always escaped before display; the panel never interprets
/// model output as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The result text of a successful reply, if any.
pub fn result_text(reply: &Reply) -> Option<&str> {
    match reply {
        Reply::Result { result, .. } => Some(result),
        _ => None,
    }
}

/// Render a reply for the terminal panel: plain result text, or the error
/// message in the visually distinct error style.
pub fn render_reply(title: &str, reply: &Reply) -> String {
    match reply {
        Reply::Result { result, .. } => {
            format!("{}\n{}", format!("── {} ──", title).cyan().bold(), result)
        }
        Reply::Failed { error, .. } => {
            format!(
                "{}\n{}",
                format!("── {} ──", title).red().bold(),
                error.red()
            )
        }
        Reply::Connected { connected } => connection_indicator(*connected),
        Reply::Text { text } => text.clone(),
        Reply::Content { content } => content.clone(),
        Reply::Done { .. } => "ok".to_string(),
    }
}

/// The startup connection indicator line.
pub fn connection_indicator(connected: bool) -> String {
    if connected {
        format!("{} API connection OK", "●".green())
    } else {
        format!("{} API not reachable (check your key)", "●".red())
    }
}

/// Spinner shown while a request is in flight. Quiet mode gets a hidden
/// bar so callers need no branching.
pub fn busy_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_the_usual_suspects() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn multibyte_text_passes_through_unchanged() {
        assert_eq!(escape_html("你好，世界"), "你好，世界");
    }

    #[test]
    fn result_text_only_matches_success_results() {
        assert_eq!(result_text(&Reply::result("x")), Some("x"));
        assert_eq!(result_text(&Reply::failed("x")), None);
        assert_eq!(result_text(&Reply::done()), None);
    }

    #[test]
    fn quiet_mode_hides_the_spinner() {
        let pb = busy_spinner("working", true);
        assert!(pb.is_hidden());
        // a hidden bar carries no message to redraw
        assert_eq!(pb.message(), "");
        pb.finish_and_clear();

        let pb = busy_spinner("working", false);
        assert_eq!(pb.message(), "working");
        pb.finish_and_clear();
    }

    #[test]
    fn error_reply_renders_the_message() {
        colored::control::set_override(false);
        let rendered = render_reply("Translation", &Reply::failed("API request failed"));
        assert!(rendered.contains("API request failed"));
        colored::control::unset_override();
    }
}
