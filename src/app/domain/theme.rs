//! Static catalog of card themes.
//!
//! A theme pairs the card background with a syntax color scheme. The scheme is
//! referenced by its syntect theme key and handed to the highlighter untouched.

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    /// Same color with the alpha channel scaled to `opacity` (0.0..=1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha is emitted separately where needed.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgba,
    /// Position along the gradient line, 0.0..=1.0
    pub offset: f32,
}

/// Card background descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Transparent,
    Solid(Rgba),
    /// CSS-style linear gradient. `angle_deg` follows CSS: 0 points up, 90 points right.
    LinearGradient {
        angle_deg: f32,
        stops: &'static [ColorStop],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub background: Background,
    /// syntect theme key for token colors
    pub editor_theme: &'static str,
    pub text_color: Rgba,
}

const fn stop(color: Rgba, offset: f32) -> ColorStop {
    ColorStop { color, offset }
}

pub static THEMES: &[CodeTheme] = &[
    CodeTheme {
        id: "midnight",
        name: "Midnight",
        background: Background::LinearGradient {
            angle_deg: 135.0,
            stops: &[
                stop(Rgba::rgb(0x1e, 0x29, 0x3b), 0.0),
                stop(Rgba::rgb(0x0f, 0x17, 0x2a), 1.0),
            ],
        },
        editor_theme: "base16-eighties.dark",
        text_color: Rgba::rgb(0xe2, 0xe8, 0xf0),
    },
    CodeTheme {
        id: "dracula",
        name: "Vampire",
        background: Background::LinearGradient {
            angle_deg: 135.0,
            stops: &[
                stop(Rgba::rgb(0x41, 0x58, 0xd0), 0.0),
                stop(Rgba::rgb(0xc8, 0x50, 0xc0), 0.46),
                stop(Rgba::rgb(0xff, 0xcc, 0x70), 1.0),
            ],
        },
        editor_theme: "base16-mocha.dark",
        text_color: Rgba::rgb(0xf8, 0xf8, 0xf2),
    },
    CodeTheme {
        id: "clean-light",
        name: "Paper",
        background: Background::LinearGradient {
            angle_deg: 90.0,
            stops: &[
                stop(Rgba::rgb(0xe0, 0xea, 0xfc), 0.0),
                stop(Rgba::rgb(0xcf, 0xde, 0xf3), 1.0),
            ],
        },
        editor_theme: "base16-ocean.light",
        text_color: Rgba::rgb(0x33, 0x33, 0x33),
    },
    CodeTheme {
        id: "oceanic",
        name: "Oceanic",
        background: Background::LinearGradient {
            angle_deg: 0.0,
            stops: &[
                stop(Rgba::rgb(0x09, 0x20, 0x3f), 0.0),
                stop(Rgba::rgb(0x53, 0x78, 0x95), 1.0),
            ],
        },
        editor_theme: "base16-ocean.dark",
        text_color: Rgba::rgb(0xab, 0xb2, 0xbf),
    },
    CodeTheme {
        id: "forest",
        name: "Forest",
        background: Background::LinearGradient {
            angle_deg: 135.0,
            stops: &[
                stop(Rgba::rgb(0x13, 0x4e, 0x5e), 0.0),
                stop(Rgba::rgb(0x71, 0xb2, 0x80), 1.0),
            ],
        },
        editor_theme: "base16-eighties.dark",
        text_color: Rgba::rgb(0xe2, 0xe8, 0xf0),
    },
    CodeTheme {
        id: "plain",
        name: "Transparent",
        background: Background::Transparent,
        editor_theme: "InspiredGitHub",
        text_color: Rgba::rgb(0x24, 0x29, 0x2e),
    },
];

/// Look up a theme by id, falling back to the first registry entry.
pub fn resolve_theme(id: &str) -> &'static CodeTheme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

/// Position of a theme id in [`THEMES`], if registered.
pub fn theme_index(id: &str) -> Option<usize> {
    THEMES.iter().position(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_ids_unique() {
        for (i, a) in THEMES.iter().enumerate() {
            for b in &THEMES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_resolve_known_theme() {
        assert_eq!(resolve_theme("oceanic").name, "Oceanic");
        assert_eq!(resolve_theme("plain").background, Background::Transparent);
    }

    #[test]
    fn test_resolve_unknown_theme_falls_back_to_first() {
        for id in ["", "solarized", "MIDNIGHT", " midnight"] {
            assert_eq!(resolve_theme(id).id, THEMES[0].id);
        }
    }

    #[test]
    fn test_gradient_stops_are_ordered() {
        for theme in THEMES {
            if let Background::LinearGradient { stops, .. } = theme.background {
                assert!(stops.len() >= 2, "{} needs two stops", theme.id);
                assert!(stops.windows(2).all(|w| w[0].offset <= w[1].offset));
            }
        }
    }

    #[test]
    fn test_color_helpers() {
        let c = Rgba::rgb(0x1e, 0x29, 0x3b);
        assert_eq!(c.hex(), "#1e293b");
        assert_eq!(Rgba::WHITE.with_opacity(0.2).a, 51);
        assert!((Rgba::BLACK.with_opacity(0.5).opacity() - 0.5).abs() < 0.01);
    }
}
