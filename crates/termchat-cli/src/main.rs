//! termchat CLI: terminal chat widget and helpers

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use termchat_engine::{ChatConfig, HtmlRenderer, MarkdownRenderer};
use tracing_subscriber::EnvFilter;

/// Terminal-styled chat widget
#[derive(Parser)]
#[command(name = "termchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Write a default config file
    Init {
        /// Where to write the config
        #[arg(default_value = DEFAULT_CONFIG)]
        path: PathBuf,
    },

    /// Print the effective config as JSON
    Config,

    /// Render a markdown file to HTML (`-` reads stdin)
    Render {
        /// Markdown file to render
        file: PathBuf,
    },
}

const DEFAULT_CONFIG: &str = "termchat.json";

/// Env var holding the tracing filter.
const LOG_ENV: &str = "TERMCHAT_LOG";

fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(interactive);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        None | Some(Commands::Tui) => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => fail(&format!("Failed to create tokio runtime: {e}")),
            };
            if let Err(e) = rt.block_on(termchat_tui::run_tui(config)) {
                fail(&format!("Error: {e}"));
            }
        }
        Some(Commands::Init { path }) => cmd_init(&path),
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Render { file }) => cmd_render(&file),
    }
}

/// Install the tracing subscriber. While the TUI owns the terminal, logs go
/// to `termchat.log` in the temp dir; otherwise to stderr.
fn init_logging(to_file: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let path = std::env::temp_dir().join("termchat.log");
        match std::fs::File::create(&path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init(),
            // Without a log file, stay silent rather than draw over the TUI.
            Err(e) => eprintln!("Logging disabled: {}: {e}", path.display()),
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> ChatConfig {
    let Some(path) = path else {
        return ChatConfig::default();
    };
    match ChatConfig::load(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        Err(e) => fail(&format!("Failed to load {}: {e}", path.display())),
    }
}

fn cmd_init(path: &Path) {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return;
    }
    if let Err(e) = ChatConfig::default().save(path) {
        fail(&format!("Failed to write {}: {e}", path.display()));
    }
    println!("Wrote default config to {}", path.display());
}

fn cmd_config(config: &ChatConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("Failed to serialize config: {e}")),
    }
}

fn cmd_render(file: &Path) {
    let source = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
    } else {
        std::fs::read_to_string(file)
    };
    let source = match source {
        Ok(source) => source,
        Err(e) => fail(&format!("Failed to read {}: {e}", file.display())),
    };

    match HtmlRenderer.render(&source) {
        Ok(html) => print!("{html}"),
        Err(e) => fail(&format!("Error: {e}")),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::try_parse_from(["termchat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["termchat", "config", "--config", "my.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert_eq!(cli.config, Some(PathBuf::from("my.json")));
    }

    #[test]
    fn test_init_default_path() {
        let cli = Cli::try_parse_from(["termchat", "init"]).unwrap();
        let Some(Commands::Init { path }) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(path, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_render_takes_stdin_marker() {
        let cli = Cli::try_parse_from(["termchat", "render", "-"]).unwrap();
        let Some(Commands::Render { file }) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(file, PathBuf::from("-"));
    }
}
