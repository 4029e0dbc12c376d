//! SQL syntax highlighting for the SQL box.

use crate::state::{StyledLine, StyledSegment, TextKind, TextStyle};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, Theme, ThemeSet},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

pub struct SqlHighlighter {
    syntaxes: SyntaxSet,
    theme: Option<Theme>,
}

impl SqlHighlighter {
    pub fn new() -> Self {
        let themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: pick_theme(&themes).cloned(),
        }
    }

    /// Split `sql` into styled lines. Falls back to plain text when no SQL
    /// syntax or theme is available.
    pub fn highlight(&self, sql: &str) -> Vec<StyledLine> {
        if sql.trim().is_empty() {
            return vec![meta_line("(no SQL returned)")];
        }

        let syntax = self.syntaxes.find_syntax_by_extension("sql");
        let mut highlighter = match (syntax, self.theme.as_ref()) {
            (Some(syntax), Some(theme)) => Some(HighlightLines::new(syntax, theme)),
            _ => None,
        };

        let mut lines = Vec::new();
        for raw_line in LinesWithEndings::from(sql) {
            let sanitized = sanitize_line(raw_line);
            let Some(highlighter) = highlighter.as_mut() else {
                lines.push(plain_line(strip_line_endings(&sanitized)));
                continue;
            };

            match highlighter.highlight_line(&sanitized, &self.syntaxes) {
                Ok(ranges) => {
                    let out: StyledLine = ranges
                        .into_iter()
                        .map(|(style, fragment)| (style, strip_line_endings(fragment)))
                        .filter(|(_, fragment)| !fragment.is_empty())
                        .map(|(style, fragment)| StyledSegment {
                            text: fragment.to_string(),
                            style: syntect_style_to_text_style(style),
                        })
                        .collect();
                    if out.is_empty() {
                        lines.push(plain_line(""));
                    } else {
                        lines.push(out);
                    }
                }
                Err(_) => lines.push(plain_line(strip_line_endings(&sanitized))),
            }
        }

        lines
    }
}

impl Default for SqlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn pick_theme(themes: &ThemeSet) -> Option<&Theme> {
    themes
        .themes
        .get("base16-ocean.dark")
        .or_else(|| themes.themes.get("Solarized (dark)"))
        .or_else(|| themes.themes.values().next())
}

fn meta_line(text: impl Into<String>) -> StyledLine {
    vec![StyledSegment {
        text: text.into(),
        style: TextStyle {
            kind: TextKind::Meta,
            italic: true,
            ..Default::default()
        },
    }]
}

fn plain_line(text: impl Into<String>) -> StyledLine {
    vec![StyledSegment {
        text: text.into(),
        style: TextStyle::default(),
    }]
}

fn strip_line_endings(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

fn sanitize_line(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("    "),
            '\r' => {}
            // Raw control chars would corrupt terminal state.
            c if c.is_control() && c != '\n' => out.push('\u{fffd}'),
            _ => out.push(ch),
        }
    }
    out
}

fn syntect_style_to_text_style(style: syntect::highlighting::Style) -> TextStyle {
    TextStyle {
        kind: TextKind::Normal,
        fg: Some((style.foreground.r, style.foreground.g, style.foreground.b)),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &StyledLine) -> String {
        line.iter().map(|seg| seg.text.as_str()).collect()
    }

    #[test]
    fn highlight_preserves_text_per_line() {
        let sql = "SELECT ProductName, Price\nFROM Products\nORDER BY Price DESC";
        let lines = SqlHighlighter::new().highlight(sql);

        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(
            texts,
            vec![
                "SELECT ProductName, Price",
                "FROM Products",
                "ORDER BY Price DESC"
            ]
        );
    }

    #[test]
    fn control_chars_are_replaced() {
        let lines = SqlHighlighter::new().highlight("SELECT '\u{1b}[2J'\tFROM t");
        let text = text_of(&lines[0]);
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("    FROM t"));
    }

    #[test]
    fn blank_sql_gets_placeholder() {
        let lines = SqlHighlighter::new().highlight("  ");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0].style.kind, TextKind::Meta);
    }
}
