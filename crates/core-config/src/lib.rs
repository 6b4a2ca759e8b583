//! Configuration loading and parsing.
//!
//! Reads `panedit.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [prompt]
//! text = "> "
//!
//! [separator]
//! fg = "white"
//! bg = "blue"
//!
//! [history]
//! max_entries = 1000
//! ```
//!
//! Every key is optional. A missing file or one that fails to parse yields
//! the defaults; the parse failure is logged under the `config` target.
//! Unknown keys are ignored.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "panedit.toml";

/// Terminal colour names accepted in the `[separator]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(default = "PromptConfig::default_text")]
    pub text: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: Self::default_text(),
        }
    }
}

impl PromptConfig {
    fn default_text() -> String {
        "> ".to_string()
    }
}

/// Separator colours, used only when the terminal supports colour.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorConfig {
    #[serde(default = "SeparatorConfig::default_fg")]
    pub fg: ColorName,
    #[serde(default = "SeparatorConfig::default_bg")]
    pub bg: ColorName,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            fg: Self::default_fg(),
            bg: Self::default_bg(),
        }
    }
}

impl SeparatorConfig {
    const fn default_fg() -> ColorName {
        ColorName::White
    }
    const fn default_bg() -> ColorName {
        ColorName::Blue
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Oldest entries are dropped past this count; 0 keeps everything.
    #[serde(default = "HistoryConfig::default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::default_max_entries(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_entries() -> usize {
        1000
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub separator: SeparatorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("panedit").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Replace the configured prompt, e.g. from the command line.
    pub fn override_prompt(&mut self, prompt: Option<String>) {
        if let Some(text) = prompt {
            self.file.prompt.text = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), contents).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert_eq!(cfg.file.prompt.text, "> ");
        assert_eq!(cfg.file.separator.fg, ColorName::White);
        assert_eq!(cfg.file.separator.bg, ColorName::Blue);
        assert_eq!(cfg.file.history.max_entries, 1000);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_every_section() {
        let tmp = write_config(
            "[prompt]\ntext = \"$ \"\n[separator]\nfg = \"black\"\nbg = \"dark_cyan\"\n[history]\nmax_entries = 0\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.prompt.text, "$ ");
        assert_eq!(cfg.file.separator.fg, ColorName::Black);
        assert_eq!(cfg.file.separator.bg, ColorName::DarkCyan);
        assert_eq!(cfg.file.history.max_entries, 0);
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let tmp = write_config("[separator]\nbg = \"red\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.separator.fg, ColorName::White);
        assert_eq!(cfg.file.separator.bg, ColorName::Red);
        assert_eq!(cfg.file.prompt.text, "> ");
    }

    #[test]
    fn malformed_file_falls_back_and_logs_under_config_target() {
        let tmp = write_config("[separator]\nfg = \"chartreuse\"\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
        assert_eq!(cfg.file, ConfigFile::default());
    }

    #[test]
    fn prompt_override_wins() {
        let tmp = write_config("[prompt]\ntext = \"cfg> \"\n");
        let mut cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        cfg.override_prompt(None);
        assert_eq!(cfg.file.prompt.text, "cfg> ");
        cfg.override_prompt(Some("cli> ".to_string()));
        assert_eq!(cfg.file.prompt.text, "cli> ");
    }
}
