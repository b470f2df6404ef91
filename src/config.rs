// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::client::default_fallback_list;
use crate::logging::LogTarget;
use crate::model::{TodoList, DEFAULT_LIST_TITLE};
use crate::tools::ToolResponse;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Todo widget server with an MCP surface and a terminal front-end.
///
/// By default this runs the terminal widget and serves the widget session API plus MCP over
/// streamable HTTP at `http://<bind>:<port>/mcp`.
#[derive(Debug, Clone, Parser)]
#[command(name = "tidelist", version)]
pub struct Cli {
    /// Serve MCP over stdio instead of HTTP.
    #[arg(long, conflicts_with_all = ["headless", "port", "bind"])]
    pub mcp: bool,

    /// Serve HTTP without the terminal widget.
    #[arg(long)]
    pub headless: bool,

    /// HTTP port (0 picks an ephemeral port).
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// HTTP bind address.
    #[arg(long, default_value_t = DEFAULT_BIND)]
    pub bind: IpAddr,

    /// Title of a todo list to serve; repeat for several lists. The first one is the default.
    #[arg(long = "list", value_name = "TITLE")]
    pub lists: Vec<String>,

    /// JSON file `{ "list": ... }` shown by the widget until the server answers.
    #[arg(long, value_name = "PATH")]
    pub preview: Option<PathBuf>,

    /// Append logs to this file (the terminal widget logs nowhere otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// MCP over stdio.
    Stdio,
    /// HTTP only.
    Headless,
    /// HTTP plus the terminal widget.
    Interactive,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read preview {}: {source}", path.display())]
    ReadPreview { path: PathBuf, source: std::io::Error },
    #[error("preview {} is not valid JSON: {source}", path.display())]
    ParsePreview { path: PathBuf, source: serde_json::Error },
    #[error("preview {} has no valid `list` field", path.display())]
    MissingList { path: PathBuf },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.mcp {
            Mode::Stdio
        } else if self.headless {
            Mode::Headless
        } else {
            Mode::Interactive
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn list_titles(&self) -> Vec<String> {
        if self.lists.is_empty() {
            vec![DEFAULT_LIST_TITLE.to_owned()]
        } else {
            self.lists.clone()
        }
    }

    /// Stderr in server modes. The terminal widget owns the screen, so it only logs to a file.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.mode()) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Mode::Interactive) => LogTarget::Disabled,
            (None, Mode::Stdio | Mode::Headless) => LogTarget::Stderr,
        }
    }

    pub fn fallback_list(&self) -> Result<TodoList, ConfigError> {
        match &self.preview {
            Some(path) => load_preview(path),
            None => Ok(default_fallback_list()),
        }
    }
}

/// Reads the list out of an envelope-shaped preview file; other fields are ignored.
pub fn load_preview(path: &Path) -> Result<TodoList, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadPreview { path: path.to_owned(), source })?;
    let payload: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|source| ConfigError::ParsePreview { path: path.to_owned(), source })?;
    ToolResponse::list_from_payload(&payload)
        .ok_or_else(|| ConfigError::MissingList { path: path.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempFile {
        path: PathBuf,
    }

    impl TempFile {
        fn with_contents(contents: &str) -> Self {
            let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = std::env::temp_dir();
            path.push(format!("tidelist-preview-{}-{counter}.json", std::process::id()));
            std::fs::write(&path, contents).expect("write temp file");
            Self { path }
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tidelist").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_interactive_with_one_list() {
        let cli = parse(&[]).expect("parse");
        assert_eq!(cli.mode(), Mode::Interactive);
        assert_eq!(cli.bind, DEFAULT_BIND);
        assert_eq!(cli.list_titles(), vec!["My List".to_owned()]);
        assert_eq!(cli.log_target(), LogTarget::Disabled);
        assert_eq!(cli.fallback_list().expect("fallback"), default_fallback_list());
    }

    #[test]
    fn parses_headless_port_and_bind() {
        let cli = parse(&["--headless", "--port", "0", "--bind", "0.0.0.0"]).expect("parse");
        assert_eq!(cli.mode(), Mode::Headless);
        assert_eq!(cli.socket_addr(), "0.0.0.0:0".parse().expect("addr"));
        assert_eq!(cli.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn parses_repeated_lists_in_order() {
        let cli = parse(&["--list", "Groceries", "--list", "Work"]).expect("parse");
        assert_eq!(cli.list_titles(), vec!["Groceries".to_owned(), "Work".to_owned()]);
    }

    #[test]
    fn parses_stdio_mode() {
        let cli = parse(&["--mcp"]).expect("parse");
        assert_eq!(cli.mode(), Mode::Stdio);
        assert_eq!(cli.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn log_file_wins_in_every_mode() {
        let cli = parse(&["--log-file", "/tmp/tidelist.log"]).expect("parse");
        assert_eq!(cli.log_target(), LogTarget::File(PathBuf::from("/tmp/tidelist.log")));
    }

    #[test]
    fn rejects_http_options_with_stdio_mode() {
        parse(&["--mcp", "--headless"]).unwrap_err();
        parse(&["--mcp", "--port", "9000"]).unwrap_err();
        parse(&["--mcp", "--bind", "127.0.0.1"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse(&["--nope"]).unwrap_err();
    }

    #[test]
    fn preview_seeds_fallback_list() {
        let file = TempFile::with_contents(
            r#"{
                "message": "ignored",
                "list": {
                    "id": "list-preview",
                    "title": "Preview",
                    "items": [{ "id": "todo-1", "title": "Sample", "completed": true }]
                }
            }"#,
        );
        let cli = parse(&["--preview", file.path.to_str().expect("utf-8 path")]).expect("parse");

        let list = cli.fallback_list().expect("preview");
        assert_eq!(list.id().as_str(), "list-preview");
        assert_eq!(list.items()[0].title(), "Sample");
        assert!(list.items()[0].completed());
    }

    #[test]
    fn preview_errors_are_reported() {
        let missing = std::env::temp_dir().join("tidelist-preview-does-not-exist.json");
        assert!(matches!(load_preview(&missing), Err(ConfigError::ReadPreview { .. })));

        let garbage = TempFile::with_contents("not json");
        assert!(matches!(load_preview(&garbage.path), Err(ConfigError::ParsePreview { .. })));

        let no_list = TempFile::with_contents(r#"{ "message": "hi" }"#);
        assert!(matches!(load_preview(&no_list.path), Err(ConfigError::MissingList { .. })));
    }
}
