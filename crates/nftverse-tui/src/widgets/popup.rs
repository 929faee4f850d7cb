use nftverse_core::config::KeymapConfig;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let area = frame.area();

        let entries: [(&str, &str); 13] = [
            (keymap.move_down.as_str(), "Scroll down / next row"),
            (keymap.move_up.as_str(), "Scroll up / previous row"),
            (keymap.scroll_half_down.as_str(), "Half page down"),
            (keymap.scroll_half_up.as_str(), "Half page up"),
            (keymap.jump_to_top.as_str(), "Jump to top"),
            (keymap.jump_to_bottom.as_str(), "Jump to bottom"),
            (keymap.carousel_next.as_str(), "Next featured item / card"),
            (keymap.carousel_prev.as_str(), "Previous featured item / card"),
            (keymap.select.as_str(), "Explore the marketplace"),
            (keymap.back.as_str(), "Back to the landing page"),
            (keymap.search.as_str(), "Search by name or creator"),
            (keymap.cycle_sort.as_str(), "Change sort order"),
            (keymap.open_image.as_str(), "Open image in browser"),
        ];

        let key_width = entries
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(1)
            .max(keymap.quit.chars().count());

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, desc)| Self::help_line(key, desc, key_width, theme))
            .collect();
        lines.push(Self::help_line(keymap.quit.as_str(), "Quit", key_width, theme));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme.grey1),
        )));

        let popup_width = 48u16.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    fn help_line<'a>(key: &'a str, desc: &'a str, key_width: usize, theme: &Theme) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                format!(" {:>width$} ", key, width = key_width),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(theme.fg0)),
        ])
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
        assert_eq!(centered_rect(200, 10, area).x, 0);
    }
}
