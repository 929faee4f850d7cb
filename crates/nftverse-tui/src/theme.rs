use ratatui::style::{Color, Modifier, Style};

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    /// Muted copy (descriptions, hints)
    pub grey0: Color,
    pub grey1: Color,

    /// Brand color: headings, borders, call-to-action
    pub accent: Color,
    /// Secondary brand color used in gradients
    pub highlight: Color,

    // Semantic colors
    pub selection: Color,
    pub price: Color,
    pub creator: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::default_theme()
    }
}

impl Theme {
    /// Foreground faded toward the background by `opacity` (0.0 to 1.0)
    ///
    /// Terminals have no alpha channel, so fades blend the two RGB values.
    /// Non-RGB colors snap: hidden below one half, shown above.
    pub fn fade(&self, fg: Color, opacity: f64) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        match (fg, self.bg0) {
            (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg, bb)) => {
                let mix = |f: u8, b: u8| -> u8 {
                    (f64::from(b) + (f64::from(f) - f64::from(b)) * opacity).round() as u8
                };
                Color::Rgb(mix(fr, br), mix(fg_, bg), mix(fb, bb))
            }
            _ if opacity >= 0.5 => fg,
            _ => self.bg0,
        }
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.grey0)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.grey1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_blends_toward_background() {
        let theme = Theme {
            bg0: Color::Rgb(0, 0, 0),
            ..Theme::default()
        };
        assert_eq!(theme.fade(Color::Rgb(200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(theme.fade(Color::Rgb(200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(theme.fade(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_fade_snaps_named_colors() {
        let theme = Theme::default();
        assert_eq!(theme.fade(Color::Red, 0.8), Color::Red);
        assert_eq!(theme.fade(Color::Red, 0.2), theme.bg0);
    }
}
