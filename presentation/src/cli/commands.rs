//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for sidelens
#[derive(Parser, Debug)]
#[command(name = "sidelens")]
#[command(author, version, about = "Translate and summarize web page text from a side panel")]
#[command(long_about = r#"
sidelens sends selected text or page content to a chat-completion endpoint
and shows the result: translate a selection into one of seven languages, or
summarize a whole page.

Settings live in a flat TOML file (default: <config dir>/sidelens/settings.toml);
keys missing from the file fall back to their defaults.

Example:
  sidelens set-key sk-...
  sidelens translate "Hello world" -l zh
  sidelens summarize --file article.html
  sidelens panel --page article.html
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress spinners and banners
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the settings file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a piece of text
    Translate {
        /// The text to translate
        text: String,

        /// Target language code (zh en ja ko fr de es); defaults to the
        /// configured language, unknown codes fall back to zh
        #[arg(short = 'l', long, value_name = "CODE")]
        lang: Option<String>,
    },

    /// Summarize a page
    Summarize {
        /// HTML file to load as the page
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Raw text to summarize instead of a page
        #[arg(long, value_name = "TEXT")]
        text: Option<String>,
    },

    /// Probe the completion endpoint once
    TestConnection,

    /// Store the API key
    SetKey {
        /// The key; an empty string unsets it
        key: String,
    },

    /// Open the interactive panel
    Panel {
        /// HTML file to load as the current page
        #[arg(long, value_name = "PATH")]
        page: Option<PathBuf>,
    },
}
