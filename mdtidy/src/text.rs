//! Text normalization and escaping helpers used by the renderer.

use unicode_width::UnicodeWidthStr;

pub(crate) const BOLD_ON: &str = "\x1b[1m";
pub(crate) const RESET: &str = "\x1b[0m";

/// Collapses whitespace runs to a single space without trimming the ends.
///
/// Newlines, carriage returns and tabs are mapped to a space first, so a run
/// mixing them collapses too.
pub fn clean_without_trim(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = None;
    for c in s.chars() {
        let c = match c {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        };
        if c != ' ' || prev != Some(' ') {
            out.push(c);
            prev = Some(c);
        }
    }
    out
}

/// Escapes backslashes in a link or image destination.
pub fn escape_url(url: &str) -> String {
    url.replace('\\', "\\\\")
}

/// Writes a link destination so that it parses back to `url`.
///
/// A bare destination can't start with `<` or hold spaces, control characters
/// or unbalanced parentheses. Those are wrapped in `<…>` instead.
pub fn link_destination(url: &str) -> String {
    let escaped = escape_url(url);
    if needs_angle_brackets(url) {
        format!("<{}>", escaped.replace('<', "\\<").replace('>', "\\>"))
    } else {
        escaped
    }
}

fn needs_angle_brackets(url: &str) -> bool {
    if url.starts_with('<') {
        return true;
    }
    let mut depth = 0usize;
    for c in url.chars() {
        match c {
            ' ' => return true,
            c if c.is_ascii_control() => return true,
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth != 0
}

/// Escapes a link title for use between double quotes.
pub fn escape_link_title(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

/// True when every byte is an ASCII digit. The empty string counts as numeric.
pub fn is_number(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Decides whether a text fragment needs a leading backslash.
///
/// The fragment is judged as a whole: only a fragment that *is* a structural
/// character gets escaped. A lone `.` is escaped only after a numeric fragment,
/// where `5.` would otherwise reparse as an ordered list marker.
pub fn needs_escaping(text: &str, last_normal_text: &str) -> bool {
    match text {
        "\\" | "`" | "*" | "_" | "{" | "}" | "[" | "]" | "(" | ")" | "#" | "+" | "-" => true,
        "!" => false,
        "." => is_number(last_normal_text),
        "<" | ">" => true,
        _ => false,
    }
}

/// Visual width of `s` in terminal columns.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Like [`string_width`], but ANSI bold and reset sequences don't count.
pub fn terminal_string_width(s: &str) -> usize {
    if !s.contains('\x1b') {
        return string_width(s);
    }
    string_width(&s.replace(BOLD_ON, "").replace(RESET, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_runs_but_keeps_edges() {
        assert_eq!(clean_without_trim("  a \t\n b  "), " a b ");
        assert_eq!(clean_without_trim("a\r\nb"), "a b");
        assert_eq!(clean_without_trim("plain"), "plain");
        assert_eq!(clean_without_trim("\n"), " ");
        assert_eq!(clean_without_trim(""), "");
    }

    #[test]
    fn structural_fragments_are_escaped() {
        for fragment in [
            "\\", "`", "*", "_", "{", "}", "[", "]", "(", ")", "#", "+", "-", "<", ">",
        ] {
            assert!(needs_escaping(fragment, ""), "{fragment} should be escaped");
        }
    }

    #[test]
    fn multi_character_fragments_are_left_alone() {
        assert!(!needs_escaping("**", ""));
        assert!(!needs_escaping("a*b", ""));
        assert!(!needs_escaping("# title", ""));
    }

    #[test]
    fn bang_is_never_escaped() {
        assert!(!needs_escaping("!", "1"));
    }

    #[test]
    fn period_escaped_only_after_number() {
        assert!(needs_escaping(".", "5"));
        assert!(needs_escaping(".", "2024"));
        assert!(!needs_escaping(".", "a"));
        assert!(!needs_escaping(".", "5a"));
    }

    #[test]
    fn url_escaping_doubles_backslashes_only() {
        assert_eq!(escape_url(r"C:\path\file"), r"C:\\path\\file");
        assert_eq!(escape_url("http://x/*_"), "http://x/*_");
    }

    #[test]
    fn destinations_are_bare_when_possible() {
        assert_eq!(link_destination("http://x/a_(b)"), "http://x/a_(b)");
        assert_eq!(link_destination(""), "");
    }

    #[test]
    fn destinations_that_cannot_be_bare_get_brackets() {
        assert_eq!(link_destination("a b"), "<a b>");
        assert_eq!(link_destination("x)y"), "<x)y>");
        assert_eq!(link_destination("(x"), "<(x>");
        assert_eq!(link_destination("<x"), r"<\<x>");
        assert_eq!(link_destination("a b>"), r"<a b\>>");
        assert_eq!(link_destination("a\tb"), "<a\tb>");
    }

    #[test]
    fn titles_escape_backslashes_before_quotes() {
        assert_eq!(escape_link_title(r"t\"), r"t\\");
        assert_eq!(escape_link_title(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn width_counts_wide_characters() {
        assert_eq!(string_width("abc"), 3);
        assert_eq!(string_width("日本"), 4);
    }

    #[test]
    fn terminal_width_discounts_bold_sequences() {
        let styled = "\x1b[1m**hi**\x1b[0m";
        assert_eq!(terminal_string_width(styled), 6);
        assert_eq!(terminal_string_width("plain"), 5);
    }
}
