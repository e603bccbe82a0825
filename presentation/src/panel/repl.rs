//! Interactive panel session.
//!
//! A terminal stand-in for the side panel: the same startup sequence
//! (selection fetch, language load, one connection probe), the same two
//! actions behind busy guards, and a live view of selection updates pushed
//! by the coordinator.

use crate::panel::controller::PanelController;
use crate::panel::render;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sidelens_domain::PanelEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// Interactive panel REPL.
pub struct PanelRepl {
    controller: PanelController,
    events: broadcast::Receiver<PanelEvent>,
    quiet: bool,
}

impl PanelRepl {
    pub fn new(controller: PanelController, events: broadcast::Receiver<PanelEvent>) -> Self {
        Self {
            controller,
            events,
            quiet: false,
        }
    }

    /// Suppress the welcome banner and the busy spinners.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run until EOF or `/quit`.
    pub async fn run(mut self) -> rustyline::Result<()> {
        self.controller.startup().await;
        if !self.quiet {
            self.print_welcome();
        }

        let mut rl = DefaultEditor::new()?;
        loop {
            // Drain pushed events before showing the prompt
            while let Ok(event) = self.events.try_recv() {
                if let PanelEvent::SelectionChanged(ref text) = event {
                    println!("selection updated: {}", preview(text));
                }
                self.controller.apply_event(&event);
            }

            match rl.readline("panel> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if self.handle_line(line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Returns true when the session should end.
    async fn handle_line(&self, line: &str) -> bool {
        if !line.starts_with('/') {
            // Bare text acts as a manual selection
            let reply = self
                .controller
                .set_selection_via(line)
                .await;
            if reply.is_error() {
                println!("{}", render::render_reply("Selection", &reply));
            } else {
                println!("selection set: {}", preview(line));
            }
            return false;
        }

        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().unwrap_or("").trim();

        match command {
            "/translate" => self.run_translate().await,
            "/summarize" => self.run_summarize().await,
            "/lang" => {
                if arg.is_empty() {
                    println!("current language: {}", self.controller.language());
                } else {
                    let language = self.controller.set_language(arg).await;
                    println!("target language set to {}", language);
                }
            }
            "/key" => {
                if arg.is_empty() {
                    println!("usage: /key <api-key>");
                } else {
                    let reply = self.controller.set_api_key(arg).await;
                    println!("{}", render::render_reply("API key", &reply));
                }
            }
            "/status" => {
                println!("{}", render::connection_indicator(self.controller.is_connected()));
                println!(
                    "selection: {}",
                    if self.controller.can_translate() {
                        preview(&self.controller.selection())
                    } else {
                        "(none)".to_string()
                    }
                );
                println!("language:  {}", self.controller.language());
            }
            "/help" => self.print_help(),
            "/quit" | "/exit" => return true,
            other => println!("unknown command: {} (try /help)", other),
        }
        false
    }

    async fn run_translate(&self) {
        let Some(task) = self.controller.begin_translate() else {
            if !self.controller.can_translate() {
                println!("select some text first");
            } else {
                println!("a translation is already running");
            }
            return;
        };
        let spinner = render::busy_spinner("translating…", self.quiet);
        let reply = task.await.unwrap_or_else(|e| {
            debug!(error = %e, "translate task failed");
            sidelens_domain::Reply::failed("translation task failed")
        });
        spinner.finish_and_clear();
        println!("{}", render::render_reply("Translation", &reply));
    }

    async fn run_summarize(&self) {
        let Some(task) = self.controller.begin_summarize() else {
            println!("a summary is already running");
            return;
        };
        let spinner = render::busy_spinner("summarizing…", self.quiet);
        let reply = task.await.unwrap_or_else(|e| {
            debug!(error = %e, "summarize task failed");
            sidelens_domain::Reply::failed("summary task failed")
        });
        spinner.finish_and_clear();
        println!("{}", render::render_reply("Summary", &reply));
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              sidelens — panel               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", render::connection_indicator(self.controller.is_connected()));
        if self.controller.can_translate() {
            println!("selection: {}", preview(&self.controller.selection()));
        }
        println!("Type /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!("/translate        translate the current selection");
        println!("/summarize        summarize the loaded page");
        println!("/lang [code]      show or set the target language (zh en ja ko fr de es)");
        println!("/key <api-key>    store the API key");
        println!("/status           connection, selection, and language");
        println!("/quit             leave the panel");
        println!("bare text         use it as the selection");
    }
}

/// Shorten a selection for display, like the panel's 200-char preview.
fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 200;
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_clips_long_selections() {
        let long = "s".repeat(250);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 203);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
