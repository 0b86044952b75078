mod highlighter;

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};

pub use highlighter::{StyledSpan, TAB_WIDTH, expand_tabs};

use crate::app::domain::language::CodeLanguage;
use crate::app::domain::theme::Rgba;

/// Grammars and color schemes are immutable once loaded, so every
/// highlighter shares one copy.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(|| {
    let set = SyntaxSet::load_defaults_newlines();
    log::debug!("Loaded {} syntax definitions", set.syntaxes().len());
    set
});

static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Used when a theme key is not among the bundled schemes.
const FALLBACK_THEME_KEY: &str = "base16-ocean.dark";

/// Tokenized, colored lines for one snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedCode {
    /// Name of the grammar that tokenized the text ("Plain Text" when none matched)
    pub grammar: String,
    pub lines: Vec<Vec<StyledSpan>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Find the grammar for a language by trying its extensions in order.
    pub fn grammar_for(&self, language: CodeLanguage) -> &'static SyntaxReference {
        let set: &'static SyntaxSet = &SYNTAX_SET;
        language
            .grammar_extensions()
            .iter()
            .find_map(|ext| set.find_syntax_by_extension(ext))
            .unwrap_or_else(|| set.find_syntax_plain_text())
    }

    /// Whether `key` names one of the bundled color schemes.
    pub fn has_theme(&self, key: &str) -> bool {
        THEME_SET.themes.contains_key(key)
    }

    /// Tokenize `text` as `language` and color it with the scheme `theme_key`.
    ///
    /// Tokens the scheme leaves uncolored are drawn in `fallback`.
    pub fn highlight(
        &self,
        text: &str,
        language: CodeLanguage,
        theme_key: &str,
        fallback: Rgba,
    ) -> HighlightedCode {
        let syntax = self.grammar_for(language);
        let theme = THEME_SET
            .themes
            .get(theme_key)
            .or_else(|| THEME_SET.themes.get(FALLBACK_THEME_KEY));

        let lines = match theme {
            Some(theme) => highlighter::highlight_lines(text, syntax, &SYNTAX_SET, theme, fallback),
            None => plain_lines(text, fallback),
        };

        HighlightedCode {
            grammar: syntax.name.clone(),
            lines,
        }
    }
}

fn plain_lines(text: &str, color: Rgba) -> Vec<Vec<StyledSpan>> {
    text.split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                return Vec::new();
            }
            let mut column = 0;
            vec![StyledSpan {
                text: expand_tabs(line, &mut column),
                color,
                bold: false,
                italic: false,
            }]
        })
        .collect()
}
