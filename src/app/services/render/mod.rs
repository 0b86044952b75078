//! Settings + theme + code → visual tree of the snapshot card.
//!
//! The tree describes only the card itself (background, window panel, title
//! bar, code). Nothing from the surrounding application UI ends up in it, so
//! the tree can be handed to the rasterizer as-is.

pub mod layout;

use crate::app::domain::language::CodeLanguage;
use crate::app::domain::settings::EditorSettings;
use crate::app::domain::snippet::display_code;
use crate::app::domain::theme::{Background, CodeTheme, Rgba};
use crate::app::services::syntax::{StyledSpan, SyntaxHighlighter};

use layout::{CODE_PADDING, CardGeometry, WRAP_COLUMNS, measure, title_bar_width, title_capacity};

/// Color of the line-number gutter text
pub const GUTTER_COLOR: Rgba = Rgba::rgba(255, 255, 255, 77);

/// Traffic-light dots shown when window controls are enabled
pub const WINDOW_DOTS: [Rgba; 3] = [
    Rgba::rgb(0xef, 0x44, 0x44),
    Rgba::rgb(0xea, 0xb3, 0x08),
    Rgba::rgb(0x22, 0xc5, 0x5e),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBar {
    /// Draw the three window dots
    pub controls: bool,
    /// Centered title text, omitted when the title is empty. Cut with an
    /// ellipsis when it does not fit between the dots and the bar edge.
    pub title: Option<String>,
    pub title_color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeLine {
    /// 1-based source line number
    pub number: usize,
    /// Row carries on a wrapped source line; no line number is drawn
    pub continuation: bool,
    pub spans: Vec<StyledSpan>,
}

impl CodeLine {
    pub fn columns(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: CodeLanguage,
    /// Grammar that tokenized the code
    pub grammar: String,
    pub inner_padding: f32,
    pub line_numbers: bool,
    pub gutter_color: Rgba,
    /// Drawn rows, long source lines already wrapped
    pub lines: Vec<CodeLine>,
}

/// Root node of the card. This exact node is what gets rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub background: Background,
    /// Outer padding in pixels, from the settings
    pub padding: u32,
    pub title_bar: Option<TitleBar>,
    pub code: CodeBlock,
    pub geometry: CardGeometry,
}

impl VisualTree {
    pub fn width(&self) -> f32 {
        self.geometry.width
    }

    pub fn height(&self) -> f32 {
        self.geometry.height
    }
}

/// Whether the title bar is drawn for these settings.
pub fn shows_title_bar(settings: &EditorSettings) -> bool {
    settings.window_controls || !settings.title.trim().is_empty()
}

/// Split one line's spans into rows of at most `columns` characters.
/// Always yields at least one row.
pub fn wrap_spans(spans: Vec<StyledSpan>, columns: usize) -> Vec<Vec<StyledSpan>> {
    let columns = columns.max(1);
    let mut rows = vec![Vec::new()];
    let mut used = 0usize;

    for span in spans {
        let mut rest = span.text.as_str();
        while !rest.is_empty() {
            if used == columns {
                rows.push(Vec::new());
                used = 0;
            }
            let take = rest
                .char_indices()
                .nth(columns - used)
                .map_or(rest.len(), |(idx, _)| idx);
            let (head, tail) = rest.split_at(take);
            used += head.chars().count();
            if let Some(row) = rows.last_mut() {
                row.push(StyledSpan {
                    text: head.to_string(),
                    ..span.clone()
                });
            }
            rest = tail;
        }
    }
    rows
}

/// Cut `title` to `capacity` characters, ending in an ellipsis when shortened.
fn fit_title(title: &str, capacity: usize) -> Option<String> {
    if title.chars().count() <= capacity {
        return Some(title.to_string());
    }
    if capacity == 0 {
        return None;
    }
    let mut cut: String = title.chars().take(capacity - 1).collect();
    cut.push('\u{2026}');
    Some(cut)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    highlighter: SyntaxHighlighter,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Build the card for `code`. Same inputs always give the same tree.
    pub fn render(&self, code: &str, settings: &EditorSettings, theme: &CodeTheme) -> VisualTree {
        let text = display_code(code);
        let highlighted =
            self.highlighter
                .highlight(text, settings.language, theme.editor_theme, theme.text_color);

        let line_count = highlighted.lines.len();
        let lines: Vec<CodeLine> = highlighted
            .lines
            .into_iter()
            .enumerate()
            .flat_map(|(i, spans)| {
                wrap_spans(spans, WRAP_COLUMNS)
                    .into_iter()
                    .enumerate()
                    .map(move |(row, spans)| CodeLine {
                        number: i + 1,
                        continuation: row > 0,
                        spans,
                    })
            })
            .collect();

        let controls = settings.window_controls;
        let title = (!settings.title.is_empty()).then_some(settings.title.as_str());
        let bar_width = shows_title_bar(settings).then(|| {
            title_bar_width(title.map_or(0, |t| t.chars().count()), controls)
        });

        let max_columns = lines.iter().map(CodeLine::columns).max().unwrap_or(0);
        let geometry = measure(
            settings.padding as f32,
            max_columns,
            lines.len(),
            line_count,
            bar_width,
            settings.show_line_numbers,
        );

        let title_bar = geometry.title_bar.map(|rect| TitleBar {
            controls,
            title: title.and_then(|t| fit_title(t, title_capacity(rect.w, controls))),
            title_color: theme.text_color.with_opacity(0.6),
        });

        VisualTree {
            background: theme.background,
            padding: settings.padding,
            title_bar,
            code: CodeBlock {
                language: settings.language,
                grammar: highlighted.grammar,
                inner_padding: CODE_PADDING,
                line_numbers: settings.show_line_numbers,
                gutter_color: GUTTER_COLOR,
                lines,
            },
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::settings::SettingsUpdate;
    use crate::app::domain::snippet::{DEFAULT_CODE, EMPTY_PLACEHOLDER};
    use crate::app::domain::theme::{THEMES, resolve_theme};

    fn render_with(code: &str, settings: &EditorSettings) -> VisualTree {
        Renderer::new().render(code, settings, settings.resolve_theme())
    }

    fn line_text(line: &CodeLine) -> String {
        line.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_default_scenario() {
        let tree = render_with(DEFAULT_CODE, &EditorSettings::default());

        let bar = tree.title_bar.as_ref().expect("title bar");
        assert!(bar.controls);
        assert_eq!(bar.title.as_deref(), Some("script.js"));
        assert!(!tree.code.line_numbers);
        assert_eq!(tree.code.language, CodeLanguage::JavaScript);
        assert_eq!(tree.code.grammar, "JavaScript");
        assert_eq!(tree.code.lines.len(), 8);
        assert_eq!(tree.background, THEMES[0].background);
    }

    #[test]
    fn test_padding_and_line_numbers_scenario() {
        let mut settings = EditorSettings::default();
        settings.update(SettingsUpdate {
            padding: Some(64),
            show_line_numbers: Some(true),
            ..Default::default()
        });
        let tree = render_with(DEFAULT_CODE, &settings);

        assert_eq!(tree.padding, 64);
        assert_eq!(tree.geometry.panel.x, 64.0);
        assert!(tree.code.line_numbers);
        assert!(tree.geometry.gutter_width > 0.0);
    }

    #[test]
    fn test_render_is_deterministic() {
        let settings = EditorSettings::default();
        for theme in THEMES {
            let renderer = Renderer::new();
            let a = renderer.render("let a = [1, 2];\nfoo(a);", &settings, theme);
            let b = renderer.render("let a = [1, 2];\nfoo(a);", &settings, theme);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_title_bar_rules() {
        let cases = [
            // (controls, title, bar, dots, title text)
            (true, "main.rs", true, true, Some("main.rs")),
            (true, "", true, true, None),
            (false, "main.rs", true, false, Some("main.rs")),
            (false, "", false, false, None),
            (false, "   ", false, false, None),
        ];
        for (controls, title, bar, dots, text) in cases {
            let settings = EditorSettings {
                window_controls: controls,
                title: title.to_string(),
                ..Default::default()
            };
            let tree = render_with("x", &settings);
            assert_eq!(tree.title_bar.is_some(), bar, "{controls} {title:?}");
            if let Some(b) = &tree.title_bar {
                assert_eq!(b.controls, dots);
                assert_eq!(b.title.as_deref(), text);
            }
        }
    }

    #[test]
    fn test_whitespace_title_without_controls_hides_bar() {
        let settings = EditorSettings {
            window_controls: false,
            title: "  ".to_string(),
            ..Default::default()
        };
        assert!(!shows_title_bar(&settings));
    }

    #[test]
    fn test_empty_code_renders_placeholder() {
        let tree = render_with("", &EditorSettings::default());
        assert_eq!(tree.code.lines.len(), 1);
        assert_eq!(line_text(&tree.code.lines[0]), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_inner_padding_is_fixed() {
        for padding in [16, 40, 64] {
            let settings = EditorSettings {
                padding,
                ..Default::default()
            };
            let tree = render_with("x", &settings);
            assert_eq!(tree.code.inner_padding, CODE_PADDING);
            assert_eq!(tree.padding, padding);
        }
    }

    #[test]
    fn test_theme_background_is_root_background() {
        let settings = EditorSettings {
            theme_id: "plain".to_string(),
            ..Default::default()
        };
        let tree = render_with("x", &settings);
        assert_eq!(tree.background, resolve_theme("plain").background);
    }

    #[test]
    fn test_line_numbers_are_sequential() {
        let tree = render_with("a\nb\nc", &EditorSettings::default());
        let numbers: Vec<usize> = tree.code.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_long_line_wraps_under_one_number() {
        let code = "x".repeat(970);
        let tree = render_with(&code, &EditorSettings::default());

        assert_eq!(tree.code.lines.len(), 10);
        assert!(tree.code.lines.iter().all(|l| l.number == 1));
        assert!(!tree.code.lines[0].continuation);
        assert!(tree.code.lines[1..].iter().all(|l| l.continuation));
        assert!(tree.code.lines.iter().all(|l| l.columns() <= WRAP_COLUMNS));
        let joined: String = tree.code.lines.iter().map(line_text).collect();
        assert_eq!(joined, code);
    }

    #[test]
    fn test_wrap_splits_inside_spans_and_keeps_style() {
        let span = |text: &str, bold: bool| StyledSpan {
            text: text.to_string(),
            color: Rgba::rgb(1, 2, 3),
            bold,
            italic: false,
        };
        let rows = wrap_spans(vec![span("abc", true), span("defg", false)], 3);
        let texts: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["abc"], vec!["def"], vec!["g"]]);
        assert!(rows[0][0].bold);
        assert!(!rows[1][0].bold);

        assert_eq!(wrap_spans(Vec::new(), 3), vec![Vec::<StyledSpan>::new()]);
    }

    fn title_fits(tree: &VisualTree) -> bool {
        let bar = tree.title_bar.as_ref().unwrap();
        let rect = tree.geometry.title_bar.unwrap();
        let chars = bar.title.as_deref().unwrap_or("").chars().count();
        layout::title_bar_width(chars, bar.controls) <= rect.w + 1e-3
    }

    #[test]
    fn test_long_title_widens_card() {
        let title = "t".repeat(60);
        let settings = EditorSettings {
            title: title.clone(),
            ..Default::default()
        };
        let tree = render_with("x", &settings);

        assert_eq!(tree.title_bar.as_ref().unwrap().title.as_deref(), Some(title.as_str()));
        assert!(title_fits(&tree));
        assert!(tree.width() > layout::MIN_CARD_WIDTH);
    }

    #[test]
    fn test_oversized_title_is_cut_with_ellipsis() {
        let settings = EditorSettings {
            title: "very_long_file_name_".repeat(10),
            ..Default::default()
        };
        let tree = render_with("x", &settings);
        let shown = tree.title_bar.as_ref().unwrap().title.clone().unwrap();

        assert!(shown.ends_with('\u{2026}'));
        assert!(shown.chars().count() < 200);
        assert!(title_fits(&tree));
        assert_eq!(tree.geometry.panel.w, layout::MAX_TITLE_BAR_WIDTH);
    }
}
