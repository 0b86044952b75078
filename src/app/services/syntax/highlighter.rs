use syntect::highlighting::{FontStyle, HighlightIterator, HighlightState, Highlighter, Style, Theme};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use crate::app::domain::theme::Rgba;

pub const TAB_WIDTH: usize = 4;

/// A run of text drawn in one style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan {
    pub text: String,
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

/// Highlight every line of `text`. One entry per line; line endings are dropped
/// and tabs are expanded to [`TAB_WIDTH`] columns.
pub fn highlight_lines(
    text: &str,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    theme: &Theme,
    fallback: Rgba,
) -> Vec<Vec<StyledSpan>> {
    let highlighter = Highlighter::new(theme);
    let mut parse_state = ParseState::new(syntax);
    let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
    let mut lines = Vec::new();

    for line in LinesWithEndings::new(text) {
        let ops = parse_state.parse_line(line, syntax_set).unwrap_or_default();
        let iter = HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter);
        let mut spans: Vec<StyledSpan> = Vec::new();
        let mut column = 0;
        for (style, piece) in iter {
            let piece = piece.trim_end_matches(['\n', '\r']);
            if piece.is_empty() {
                continue;
            }
            let text = expand_tabs(piece, &mut column);
            push_span(&mut spans, text, style, fallback);
        }
        lines.push(spans);
    }

    // A trailing newline still opens a visible (empty) last line
    if text.ends_with('\n') {
        lines.push(Vec::new());
    }
    lines
}

fn push_span(spans: &mut Vec<StyledSpan>, text: String, style: Style, fallback: Rgba) {
    let fg = style.foreground;
    let color = if fg.a == 0 {
        fallback
    } else {
        Rgba::rgba(fg.r, fg.g, fg.b, fg.a)
    };
    let bold = style.font_style.contains(FontStyle::BOLD);
    let italic = style.font_style.contains(FontStyle::ITALIC);

    // Merge with the previous span when the style is unchanged
    if let Some(last) = spans.last_mut()
        && last.color == color
        && last.bold == bold
        && last.italic == italic
    {
        last.text.push_str(&text);
        return;
    }
    spans.push(StyledSpan { text, color, bold, italic });
}

/// Replace tabs with spaces up to the next tab stop, tracking the running column.
pub fn expand_tabs(piece: &str, column: &mut usize) -> String {
    let mut out = String::with_capacity(piece.len());
    for ch in piece.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - (*column % TAB_WIDTH);
            out.extend(std::iter::repeat_n(' ', pad));
            *column += pad;
        } else {
            out.push(ch);
            *column += 1;
        }
    }
    out
}

/// Iterator that yields lines including their line endings.
pub(super) struct LinesWithEndings<'a> {
    text: &'a str,
}

impl<'a> LinesWithEndings<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Iterator for LinesWithEndings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.text.is_empty() {
            return None;
        }
        let end = self.text.find('\n').map(|i| i + 1).unwrap_or(self.text.len());
        let line = &self.text[..end];
        self.text = &self.text[end..];
        Some(line)
    }
}
