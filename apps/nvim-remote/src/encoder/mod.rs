//! Command encoding for the Neovim remote-control protocol
//!
//! Turns an editor action into exactly one [`EditorCommand`]. Two delivery
//! modes exist because no single quoting strategy survives every platform's
//! argument parser:
//!
//! - **DirectArgument**: the payload is a file list handed to `--remote`,
//!   with `+line[:column]` in front when a position was requested.
//! - **KeystrokeInjection**: the payload is typed into the running editor via
//!   `--remote-send`, always starting with `<C-\><C-n>` to force normal mode.
//!
//! Everything here is pure. Which mode is used is decided once, by the
//! platform profile, and baked into a [`CommandEncoder`].

pub mod escape;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NvimRemoteError, Result};
use escape::{escape_for_command_line, normalize_separators, quote};

/// Keystrokes that leave insert, visual or terminal mode
pub const NORMAL_MODE_PREFIX: &str = r"<C-\><C-n>";

/// Which remote flag carries the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteMode {
    /// `--remote`: payload is a list of files to open
    Remote,
    /// `--remote-send`: payload is a key sequence
    RemoteSend,
}

impl RemoteMode {
    /// The flag name without leading dashes
    pub fn as_flag(self) -> &'static str {
        match self {
            RemoteMode::Remote => "remote",
            RemoteMode::RemoteSend => "remote-send",
        }
    }
}

impl fmt::Display for RemoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// How a file request is expressed to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    DirectArgument,
    KeystrokeInjection,
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "direct-argument" => Ok(DeliveryMode::DirectArgument),
            "keystroke" | "keystroke-injection" => Ok(DeliveryMode::KeystrokeInjection),
            other => Err(format!(
                "unknown delivery mode '{}', expected direct-argument or keystroke-injection",
                other
            )),
        }
    }
}

/// Where keystroke-injected files are opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpenIn {
    /// `:tabedit`, leaves the current window's buffer untouched
    #[default]
    Tab,
    /// `:edit`, replaces the buffer in the current window
    Window,
}

impl OpenIn {
    fn ex_command(self) -> &'static str {
        match self {
            OpenIn::Tab => "tabedit",
            OpenIn::Window => "edit",
        }
    }
}

/// One ready-to-send remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub remote_mode: RemoteMode,
    pub payload: String,
}

impl EditorCommand {
    pub fn remote(payload: impl Into<String>) -> Self {
        Self {
            remote_mode: RemoteMode::Remote,
            payload: payload.into(),
        }
    }

    pub fn remote_send(payload: impl Into<String>) -> Self {
        Self {
            remote_mode: RemoteMode::RemoteSend,
            payload: payload.into(),
        }
    }
}

/// Encoder bound to one delivery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEncoder {
    delivery: DeliveryMode,
    open_in: OpenIn,
}

impl CommandEncoder {
    pub fn new(delivery: DeliveryMode, open_in: OpenIn) -> Self {
        Self { delivery, open_in }
    }

    /// `:Ex <path>`; the path is passed through untouched
    pub fn open_directory(&self, path: &str) -> EditorCommand {
        EditorCommand::remote_send(quote(&format!("{}:Ex {}<CR>", NORMAL_MODE_PREFIX, path)))
    }

    /// Open `path` and position the cursor
    ///
    /// `line <= 0` means no positioning at all; `column <= 0` means the start
    /// of `line`. Column movement always comes after the line jump.
    pub fn open_file_at_line(&self, path: &str, line: i32, column: i32) -> Result<EditorCommand> {
        check_path(path)?;

        let command = match self.delivery {
            DeliveryMode::DirectArgument => {
                let target = quote(&normalize_separators(path));
                let payload = match (line > 0, column > 0) {
                    (false, _) => target,
                    (true, false) => format!("+{} {}", line, target),
                    (true, true) => format!("+{}:{} {}", line, column, target),
                };
                EditorCommand::remote(payload)
            }
            DeliveryMode::KeystrokeInjection => {
                let keys = self.keystroke_open(path, line, column);
                EditorCommand::remote_send(quote(&keys))
            }
        };

        Ok(command)
    }

    /// Open every path in `paths`, in order, with one dispatch
    pub fn open_files<S: AsRef<str>>(&self, paths: &[S]) -> Result<EditorCommand> {
        if paths.is_empty() {
            return Err(NvimRemoteError::validation("no files to open"));
        }
        for path in paths {
            check_path(path.as_ref())?;
        }

        let command = match self.delivery {
            DeliveryMode::DirectArgument => {
                let payload = paths
                    .iter()
                    .map(|p| quote(&normalize_separators(p.as_ref())))
                    .collect::<Vec<_>>()
                    .join(" ");
                EditorCommand::remote(payload)
            }
            DeliveryMode::KeystrokeInjection => {
                let keys: String = paths
                    .iter()
                    .map(|p| self.keystroke_open(p.as_ref(), 0, 0))
                    .collect();
                EditorCommand::remote_send(quote(&keys))
            }
        };

        Ok(command)
    }

    /// `:wa`, independent of delivery mode
    pub fn save_all(&self) -> EditorCommand {
        EditorCommand::remote_send(quote(&format!("{}:wa<CR>", NORMAL_MODE_PREFIX)))
    }

    fn keystroke_open(&self, path: &str, line: i32, column: i32) -> String {
        let escaped = escape_for_command_line(path);
        let ex = self.open_in.ex_command();

        match (line > 0, column > 0) {
            (false, _) => format!("{}:{} {}<CR>", NORMAL_MODE_PREFIX, ex, escaped),
            (true, false) => format!("{}:{} +{} {}<CR>", NORMAL_MODE_PREFIX, ex, line, escaped),
            (true, true) => format!(
                "{}:{} +{} {}<CR>:normal! {}|<CR>",
                NORMAL_MODE_PREFIX, ex, line, escaped, column
            ),
        }
    }
}

/// A path must be non-empty and free of `"`, which would end the quoted
/// argument group early and open the wrong file
fn check_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NvimRemoteError::validation("cannot open an empty path"));
    }
    if path.contains('"') {
        return Err(NvimRemoteError::validation(format!(
            "cannot open '{}': paths containing '\"' are not supported",
            path
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct() -> CommandEncoder {
        CommandEncoder::new(DeliveryMode::DirectArgument, OpenIn::Tab)
    }

    fn keystroke() -> CommandEncoder {
        CommandEncoder::new(DeliveryMode::KeystrokeInjection, OpenIn::Tab)
    }

    #[test]
    fn test_direct_line_and_column() {
        let cmd = direct().open_file_at_line("/a/b c.txt", 10, 5).unwrap();
        assert_eq!(cmd.remote_mode, RemoteMode::Remote);
        assert_eq!(cmd.payload, "+10:5 \"/a/b c.txt\"");
    }

    #[test]
    fn test_direct_line_only() {
        let cmd = direct().open_file_at_line("/a/b.txt", 7, 0).unwrap();
        assert_eq!(cmd.payload, "+7 \"/a/b.txt\"");
    }

    #[test]
    fn test_direct_without_line_ignores_column() {
        for column in [-3, 0, 12] {
            let cmd = direct().open_file_at_line("/a/b.txt", 0, column).unwrap();
            assert_eq!(cmd.payload, "\"/a/b.txt\"");
            assert!(!cmd.payload.contains('+'));
        }
    }

    #[test]
    fn test_direct_rewrites_windows_separators() {
        let cmd = direct()
            .open_file_at_line(r"C:\Game\Source\Main.cpp", 3, 0)
            .unwrap();
        assert_eq!(cmd.payload, "+3 \"C:/Game/Source/Main.cpp\"");
    }

    #[test]
    fn test_keystroke_without_line() {
        for line in [-1, 0] {
            let cmd = keystroke().open_file_at_line("/a/b c.txt", line, 9).unwrap();
            assert_eq!(cmd.remote_mode, RemoteMode::RemoteSend);
            assert_eq!(cmd.payload, r#""<C-\><C-n>:tabedit /a/b\ c.txt<CR>""#);
            assert!(!cmd.payload.contains("normal!"));
        }
    }

    #[test]
    fn test_keystroke_line_only() {
        let cmd = keystroke().open_file_at_line("/a/b.txt", 42, 0).unwrap();
        assert_eq!(cmd.payload, r#""<C-\><C-n>:tabedit +42 /a/b.txt<CR>""#);
        assert!(!cmd.payload.contains("normal!"));
    }

    #[test]
    fn test_keystroke_column_follows_line_open() {
        let cmd = keystroke()
            .open_file_at_line(r"C:\My Game\a.cpp", 10, 5)
            .unwrap();
        assert_eq!(
            cmd.payload,
            r#""<C-\><C-n>:tabedit +10 C:/My\ Game/a.cpp<CR>:normal! 5|<CR>""#
        );

        let line_at = cmd.payload.find("+10").unwrap();
        let load_done = cmd.payload.find("<CR>").unwrap();
        let column_at = cmd.payload.find("5|").unwrap();
        assert!(line_at < load_done && load_done < column_at);
    }

    #[test]
    fn test_keystroke_window_mode_uses_edit() {
        let encoder = CommandEncoder::new(DeliveryMode::KeystrokeInjection, OpenIn::Window);
        let cmd = encoder.open_file_at_line("/x.h", 1, 0).unwrap();
        assert_eq!(cmd.payload, r#""<C-\><C-n>:edit +1 /x.h<CR>""#);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(direct().open_file_at_line("", 1, 1).is_err());
        assert!(keystroke().open_file_at_line("", 0, 0).is_err());
    }

    #[test]
    fn test_double_quote_in_path_is_rejected() {
        let err = direct().open_file_at_line("/tmp/a\" \"b.txt", 1, 0).unwrap_err();
        assert!(matches!(err, NvimRemoteError::Validation(_)));
        assert!(keystroke().open_file_at_line("/tmp/\"x\".h", 0, 0).is_err());
        assert!(direct().open_files(&["a.h", "say \"hi\".txt"]).is_err());
        assert!(keystroke().open_files(&["q\".h"]).is_err());
    }

    #[test]
    fn test_keystroke_escapes_vim_specials() {
        let cmd = keystroke().open_file_at_line("/src/50% off/#a<b>.c", 4, 0).unwrap();
        assert_eq!(
            cmd.payload,
            r#""<C-\><C-n>:tabedit +4 /src/50\%\ off/\#a<LT>b>.c<CR>""#
        );
    }

    #[test]
    fn test_direct_passes_vim_specials_through() {
        let cmd = direct().open_file_at_line("/src/50% off/#a<b>.c", 4, 0).unwrap();
        assert_eq!(cmd.payload, "+4 \"/src/50% off/#a<b>.c\"");
    }

    #[test]
    fn test_direct_open_files() {
        let cmd = direct().open_files(&["x.cpp", "y.h"]).unwrap();
        assert_eq!(cmd.remote_mode, RemoteMode::Remote);
        assert_eq!(cmd.payload, "\"x.cpp\" \"y.h\"");
    }

    #[test]
    fn test_keystroke_open_files_keeps_order() {
        let cmd = keystroke()
            .open_files(&[r"C:\a b\x.cpp".to_string(), "y.h".to_string()])
            .unwrap();
        assert_eq!(cmd.remote_mode, RemoteMode::RemoteSend);
        assert_eq!(
            cmd.payload,
            r#""<C-\><C-n>:tabedit C:/a\ b/x.cpp<CR><C-\><C-n>:tabedit y.h<CR>""#
        );
    }

    #[test]
    fn test_open_files_rejects_empty_input() {
        let none: [&str; 0] = [];
        assert!(direct().open_files(&none).is_err());
        assert!(keystroke().open_files(&none).is_err());
        assert!(direct().open_files(&["a.h", ""]).is_err());
    }

    #[test]
    fn test_save_all_is_fixed() {
        let expected = EditorCommand::remote_send(r#""<C-\><C-n>:wa<CR>""#);
        assert_eq!(direct().save_all(), expected);
        assert_eq!(keystroke().save_all(), expected);
    }

    #[test]
    fn test_open_directory_uses_path_verbatim() {
        let cmd = direct().open_directory("/proj/My Game");
        assert_eq!(cmd.remote_mode, RemoteMode::RemoteSend);
        assert_eq!(cmd.payload, r#""<C-\><C-n>:Ex /proj/My Game<CR>""#);
    }

    #[test]
    fn test_delivery_mode_from_str() {
        assert_eq!(
            "direct".parse::<DeliveryMode>().unwrap(),
            DeliveryMode::DirectArgument
        );
        assert_eq!(
            "Keystroke-Injection".parse::<DeliveryMode>().unwrap(),
            DeliveryMode::KeystrokeInjection
        );
        assert!("telepathy".parse::<DeliveryMode>().is_err());
    }

    #[test]
    fn test_remote_mode_flags() {
        assert_eq!(RemoteMode::Remote.to_string(), "remote");
        assert_eq!(RemoteMode::RemoteSend.to_string(), "remote-send");
    }
}
