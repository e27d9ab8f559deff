/*!
format.rs

Human-output helpers for `tap-remote`.

  - StyleOptions::detect() -> colour / emoji / width decisions
      NO_COLOR  disables ANSI colour
      NO_EMOJI  disables emoji
      COLUMNS   terminal width hint (clamped 40..=220, default 100)
  - color(role, text, &StyleOptions)
  - emoji(tag, &StyleOptions)
  - box_header(title, subtitle, &StyleOptions)
  - format_supply("1000000") -> "1,000,000"

Helpers return strings; printing is left to the command modules. JSON
output paths must not use them.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }

    /// No colour, no emoji. Used where output is compared verbatim.
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
    Bold,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Accent => "38;5;213",    // magenta/pink
        Role::Success => "38;5;82",    // green
        Role::Warning => "38;5;214",   // orange
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        "list" => "📜",
        "search" => "🔎",
        "coin" => "🪙",
        "send" => "🚀",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Box Header                                                                 */
/* -------------------------------------------------------------------------- */

/// Single-line title in a light box. Long titles are cut to the terminal
/// width rather than wrapped.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let mut inner = color(Role::Primary, title.as_ref().trim(), style);
    if let Some(sub) = subtitle {
        inner.push_str("  ");
        inner.push_str(&color(Role::Secondary, sub.as_ref(), style));
    }

    let max_inner = style.term_width.saturating_sub(4).max(10);
    let mut width = display_width(&inner);
    if width > max_inner {
        inner = truncate_plain(&strip_ansi(&inner), max_inner);
        width = display_width(&inner);
    }

    let bar = "─".repeat(width + 2);
    format!("┌{bar}┐\n│ {inner} │\n└{bar}┘")
}

/* -------------------------------------------------------------------------- */
/* Numbers                                                                    */
/* -------------------------------------------------------------------------- */

/// Group an unsigned decimal string by thousands. Anything that is not a
/// plain unsigned integer is returned unchanged.
pub fn format_supply(raw: &str) -> String {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                      */
/* -------------------------------------------------------------------------- */

pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for t in chars.by_ref() {
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn truncate_plain(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_grouping() {
        assert_eq!(format_supply("0"), "0");
        assert_eq!(format_supply("999"), "999");
        assert_eq!(format_supply("1000"), "1,000");
        assert_eq!(format_supply("1000000"), "1,000,000");
        assert_eq!(format_supply("0012345"), "12,345");
        assert_eq!(
            format_supply("340282366920938463463374607431768211456"),
            "340,282,366,920,938,463,463,374,607,431,768,211,456"
        );
    }

    #[test]
    fn supply_non_numeric_passthrough() {
        assert_eq!(format_supply(""), "");
        assert_eq!(format_supply("-5"), "-5");
        assert_eq!(format_supply("12a"), "12a");
    }

    #[test]
    fn plain_style_has_no_escapes() {
        let style = StyleOptions::plain();
        assert_eq!(color(Role::Error, "boom", &style), "boom");
        assert_eq!(emoji("send", &style), "");
    }

    #[test]
    fn box_header_contains_title_and_subtitle() {
        let style = StyleOptions::plain();
        let b = box_header("Assets (2)", Some("node=h:22"), &style);
        let lines: Vec<_> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "│ Assets (2)  node=h:22 │");
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn box_header_truncates_long_titles() {
        let style = StyleOptions {
            term_width: 40,
            ..StyleOptions::plain()
        };
        let b = box_header("x".repeat(200), None::<&str>, &style);
        let middle = b.lines().nth(1).unwrap();
        assert!(middle.chars().count() <= 40);
        assert!(middle.contains('…'));
    }

    #[test]
    fn strip_ansi_removes_sgr() {
        let colored = "\x1b[38;5;196mRED\x1b[0m";
        assert_eq!(strip_ansi(colored), "RED");
    }
}
