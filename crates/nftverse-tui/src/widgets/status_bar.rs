use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, Route};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match &app.mode {
            Mode::Normal => match app.route {
                Route::Landing => "HOME",
                Route::Marketplace => "MARKET",
            },
            Mode::Search { .. } => "SEARCH",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            match app.route {
                Route::Landing => format!(" {}", app.route.title()),
                Route::Marketplace => {
                    let loaded = app
                        .market
                        .as_ref()
                        .map(|m| m.flow.records().len())
                        .unwrap_or(0);
                    format!(" {} | Loaded: {}", app.route.title(), loaded)
                }
            }
        };

        let help_hint = match (&app.mode, app.route) {
            (Mode::Search { .. }, _) => " Enter:apply Esc:cancel ",
            (_, Route::Landing) => " q:quit j/k:scroll h/l:carousel Enter:explore ?:help ",
            (_, Route::Marketplace) => " q:quit /:search s:sort o:open BS:back ?:help ",
        };

        let mode_label = format!(" {} ", mode_str);
        let used = mode_label.width() + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                mode_label,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
