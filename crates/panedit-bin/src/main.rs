//! panedit entrypoint.
//!
//! Startup: logging, panic hook, configuration, terminal capabilities, then
//! raw mode on the alternate screen. The event loop runs until input is
//! cancelled on an empty line. The terminal is restored exactly once on every
//! exit path before anything is printed to the normal screen.
use anyhow::Result;
use clap::Parser;
use core_config::{ColorName, Config, load_from};
use core_input::CrosstermInput;
use core_line::{BasicEditor, History, InputBridge};
use core_render::{CellStyle, Controller, Screen, Session};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalCapabilities};
use crossterm::style::Color;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "panedit.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "panedit", version, about = "Single-line editor over a scrollback pane")]
struct Args {
    /// Optional configuration file path (overrides discovery of `panedit.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Prompt text; overrides the configured prompt.
    #[arg(long = "prompt")]
    pub prompt: Option<String>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run(&mut self, args: &Args) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let mut config = load_from(args.config.clone())?;
        config.override_prompt(args.prompt.clone());
        let caps = TerminalCapabilities::detect();
        let style = separator_style(&config, caps);

        self.backend.set_title("panedit")?;
        let guard = self.backend.enter_guard()?;
        let (rows, cols) = guard.backend().size()?;
        info!(
            target: "runtime.startup",
            rows,
            cols,
            colors = caps.has_colors(),
            config_override = args.config.is_some(),
            history_limit = config.file.history.max_entries,
            "bootstrap_complete"
        );

        let screen = Screen::new(BufWriter::new(io::stdout()), rows, cols);
        let session = Session::new(screen, style)?;
        let editor = BasicEditor::new(config.file.prompt.text.into_bytes());
        let bridge = InputBridge::new(editor, History::new(config.file.history.max_entries));
        let mut controller = Controller::new(session, bridge);

        controller.start()?;
        controller.run(&mut CrosstermInput::new())?;
        info!(target: "runtime", "shutdown");
        drop(guard);
        Ok(())
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                // Leave the alternate screen first so the message stays visible.
                let _ = core_terminal::restore();
                default_panic(info);
            }));
        });
    }
}

fn to_color(name: ColorName) -> Color {
    match name {
        ColorName::Black => Color::Black,
        ColorName::DarkGrey => Color::DarkGrey,
        ColorName::Red => Color::Red,
        ColorName::DarkRed => Color::DarkRed,
        ColorName::Green => Color::Green,
        ColorName::DarkGreen => Color::DarkGreen,
        ColorName::Yellow => Color::Yellow,
        ColorName::DarkYellow => Color::DarkYellow,
        ColorName::Blue => Color::Blue,
        ColorName::DarkBlue => Color::DarkBlue,
        ColorName::Magenta => Color::Magenta,
        ColorName::DarkMagenta => Color::DarkMagenta,
        ColorName::Cyan => Color::Cyan,
        ColorName::DarkCyan => Color::DarkCyan,
        ColorName::White => Color::White,
        ColorName::Grey => Color::Grey,
    }
}

/// Configured colours when the terminal has them, reverse video otherwise.
fn separator_style(config: &Config, caps: TerminalCapabilities) -> CellStyle {
    if caps.has_colors() {
        let sep = config.file.separator;
        CellStyle::colors(to_color(sep.fg), to_color(sep.bg))
    } else {
        CellStyle::reverse()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    match startup.run(&args) {
        Ok(()) => {
            println!("Shut down cleanly");
            ExitCode::SUCCESS
        }
        Err(err) => {
            // The terminal guard has already been dropped on the way out.
            tracing::error!(target: "runtime", error = %err, "fatal");
            eprintln!("panedit: {err:#}");
            ExitCode::FAILURE
        }
    }
}
