//! Path rewriting for Vim command lines
//!
//! Vim splits `:edit` arguments on unescaped whitespace, expands `%` and `#`
//! to buffer names, and expects forward slashes on every platform. Keys sent
//! through `--remote-send` additionally read `<` as the start of key notation.
//! Paths are rewritten for all of that before they are typed into the remote
//! editor.

/// Characters Vim treats specially in a file argument
const CMDLINE_SPECIAL: &[char] = &[' ', '%', '#'];

/// Key notation for a literal `<`
const KEY_LT: &str = "<LT>";

/// Rewrite backslash separators to forward slashes
///
/// A backslash directly in front of a space is an escape, not a separator,
/// and is left alone so already-escaped input survives.
pub fn normalize_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&' ') => out.push('\\'),
            '\\' => out.push('/'),
            _ => out.push(c),
        }
    }

    out
}

/// Normalize a path for a Vim command line typed through `--remote-send`
///
/// Separators become forward slashes, bare spaces, `%` and `#` get a
/// preceding backslash, and `<` becomes `<LT>`. Running this on its own
/// output returns the same string.
pub fn escape_for_command_line(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    let mut chars = path.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&(_, next)) if CMDLINE_SPECIAL.contains(&next) => {
                    chars.next();
                    out.push('\\');
                    out.push(next);
                }
                _ => out.push('/'),
            },
            '<' => {
                // Already `<LT>`: consume the rest of the notation
                if path[i..].starts_with(KEY_LT) {
                    for _ in 1..KEY_LT.len() {
                        chars.next();
                    }
                }
                out.push_str(KEY_LT);
            }
            c if CMDLINE_SPECIAL.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Wrap a value in double quotes for the argument string
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_forward_slashes() {
        assert_eq!(
            escape_for_command_line(r"C:\Projects\Game\Source\Main.cpp"),
            "C:/Projects/Game/Source/Main.cpp"
        );
    }

    #[test]
    fn test_spaces_are_escaped() {
        assert_eq!(escape_for_command_line("/a/b c.txt"), r"/a/b\ c.txt");
        assert_eq!(
            escape_for_command_line(r"C:\Program Files\Epic Games\a.h"),
            r"C:/Program\ Files/Epic\ Games/a.h"
        );
    }

    #[test]
    fn test_escape_is_idempotent() {
        for path in [
            "/a/b c.txt",
            r"C:\Program Files\Epic Games\a.h",
            "plain/path.rs",
            "/src/100% done/#1.h",
            r"C:\x\<C-w>.cpp",
            "a<LT>b",
            "  leading",
            "",
        ] {
            let once = escape_for_command_line(path);
            assert_eq!(escape_for_command_line(&once), once, "input: {:?}", path);
        }
    }

    #[test]
    fn test_filename_expansion_characters_are_escaped() {
        assert_eq!(escape_for_command_line("/src/100%.h"), r"/src/100\%.h");
        assert_eq!(escape_for_command_line("/src/#tmp#.c"), r"/src/\#tmp\#.c");
        assert_eq!(escape_for_command_line(r"C:\a %b\c#1.h"), r"C:/a\ \%b/c\#1.h");
    }

    #[test]
    fn test_key_notation_is_escaped() {
        assert_eq!(escape_for_command_line("/src/<CR>.h"), "/src/<LT>CR>.h");
        assert_eq!(escape_for_command_line("a<b"), "a<LT>b");
    }

    #[test]
    fn test_normalize_separators_keeps_spaces() {
        assert_eq!(normalize_separators(r"C:\a b\c.h"), "C:/a b/c.h");
        assert_eq!(normalize_separators("/a/b c.txt"), "/a/b c.txt");
    }

    #[test]
    fn test_normalize_separators_is_idempotent() {
        let once = normalize_separators(r"C:\dir\x.h");
        assert_eq!(normalize_separators(&once), once);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("x.cpp"), "\"x.cpp\"");
    }
}
