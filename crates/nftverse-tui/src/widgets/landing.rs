use std::time::Instant;

use nftverse_core::landing::{content, Pose, SectionId};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use super::{blit, fade_area, offset_rows, truncate_str};
use crate::app::App;
use crate::layout::LandingLayout;
use crate::theme::Theme;

/// Width of one featured carousel card
const FEATURED_CARD_WIDTH: u16 = 30;

pub struct LandingWidget;

impl LandingWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let Some(landing) = app.landing.as_ref() else {
            return;
        };
        let layout = LandingLayout::new(area.width, area.height).with_scroll(landing.scroll);
        let pose = |section| landing.choreography.pose(section, now);

        let sections: [(SectionId, fn(&mut Buffer, &Theme, &App)); 4] = [
            (SectionId::Hero, Self::draw_hero),
            (SectionId::Stats, Self::draw_stats),
            (SectionId::Featured, Self::draw_featured),
            (SectionId::BenefitsHeading, Self::draw_benefits_heading),
        ];
        for (section, draw) in sections {
            let width = area.width;
            let height = layout.section_height(section);
            let offset = layout.section_offset(section).unwrap_or(0);
            Self::place(frame, area, &layout, theme, pose(section), (0, width), offset, height, |buf| {
                draw(buf, theme, app)
            });
        }

        let columns = layout.benefit_columns();
        let card_width = area.width / columns;
        for (idx, benefit) in content::BENEFITS.iter().enumerate() {
            let section = SectionId::BenefitCard(idx);
            let Some(offset) = layout.section_offset(section) else {
                continue;
            };
            let x = (idx as u16 % columns) * card_width;
            Self::place(
                frame,
                area,
                &layout,
                theme,
                pose(section),
                (x, card_width),
                offset,
                layout.section_height(section),
                |buf| Self::draw_benefit(buf, theme, benefit),
            );
        }
    }

    /// Draw a section offscreen, apply its pose, and copy the visible rows
    #[allow(clippy::too_many_arguments)]
    fn place(
        frame: &mut Frame,
        area: Rect,
        layout: &LandingLayout,
        theme: &Theme,
        pose: Pose,
        (x, width): (u16, u16),
        offset: u16,
        height: u16,
        draw: impl FnOnce(&mut Buffer),
    ) {
        let top = i32::from(offset) - i32::from(layout.scroll) + offset_rows(pose.offset_y);
        if top >= i32::from(area.height) || top + i32::from(height) <= 0 || pose.opacity <= 0.0 {
            return;
        }

        // Scale shrinks the section horizontally around its center
        let scaled = ((f64::from(width) * pose.scale.clamp(0.0, 1.0)).round() as u16).max(1);
        let inset = (width - scaled.min(width)) / 2;

        let mut buf = Buffer::empty(Rect::new(0, 0, scaled, height));
        buf.set_style(buf.area, Style::default().bg(theme.bg0).fg(theme.fg0));
        draw(&mut buf);
        fade_area(&mut buf, Rect::new(0, 0, scaled, height), theme, pose.opacity);

        blit(&buf, frame.buffer_mut(), area, area.x + x + inset, top);
    }

    fn draw_hero(buf: &mut Buffer, theme: &Theme, _app: &App) {
        let area = buf.area;
        let text_height = 9u16;
        let top_pad = area.height.saturating_sub(text_height) / 2;

        let lines = vec![
            Line::from(Span::styled(
                format!(" {} ", content::HERO_BADGE),
                Style::default().fg(theme.highlight).bg(theme.bg1),
            )),
            Line::from(""),
            Line::from(Span::styled(content::HERO_TITLE, theme.heading())),
            Line::from(""),
            Line::from(Span::styled(content::HERO_SUBTITLE, Style::default().fg(theme.fg1))),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", content::HERO_CTA),
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    format!(" {} ", content::HERO_SECONDARY),
                    Style::default().fg(theme.accent).bg(theme.bg2),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled("Enter: explore the marketplace", theme.muted())),
        ];

        let text_area = Rect::new(area.x, area.y + top_pad, area.width, area.height - top_pad);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }

    fn draw_stats(buf: &mut Buffer, theme: &Theme, _app: &App) {
        let area = buf.area;
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(theme.bg2));
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(inner);

        for (stat, column) in content::STATS.iter().zip(columns.iter()) {
            let top_pad = column.height.saturating_sub(3) / 2;
            let lines = vec![
                Line::from(Span::styled(
                    stat.value,
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(stat.label, theme.muted())),
            ];
            let text_area = Rect::new(column.x, column.y + top_pad, column.width, column.height - top_pad);
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(text_area, buf);
        }
    }

    fn draw_featured(buf: &mut Buffer, theme: &Theme, app: &App) {
        let area = buf.area;
        let carousel = app.landing.as_ref().map(|l| l.carousel).unwrap_or(0);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Heading
                Constraint::Min(0),    // Cards
                Constraint::Length(1), // Navigation hint
            ])
            .split(area);

        Paragraph::new(Line::from(Span::styled(content::FEATURED_HEADING, theme.heading())))
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let count = (area.width / FEATURED_CARD_WIDTH).clamp(1, 3) as usize;
        let card_width = FEATURED_CARD_WIDTH.min(area.width);
        let total_width = card_width * count as u16;
        let left = area.x + area.width.saturating_sub(total_width) / 2;

        for slot in 0..count {
            let item = &content::FEATURED[(carousel + slot) % content::FEATURED.len()];
            let card = Rect::new(left + slot as u16 * card_width, rows[1].y, card_width, rows[1].height);
            let focused = slot == 0;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border(focused))
                .style(Style::default().bg(theme.bg1));
            let inner = block.inner(card);
            block.render(card, buf);

            let inner_width = inner.width as usize;
            let lines = vec![
                Line::from(Span::styled(
                    truncate_str(item.name, inner_width),
                    Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_str(&format!("by {}", item.creator), inner_width),
                    Style::default().fg(theme.creator),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Price ", theme.muted()),
                    Span::styled(format!("{} ETH", item.price), Style::default().fg(theme.price)),
                ]),
                Line::from(""),
                Line::from(Span::styled(truncate_str(item.image, inner_width), theme.muted())),
            ];
            Paragraph::new(lines).render(inner, buf);
        }

        let hint = format!(
            "< h   {}/{}   l >",
            carousel % content::FEATURED.len() + 1,
            content::FEATURED.len()
        );
        Paragraph::new(Line::from(Span::styled(hint, theme.muted())))
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }

    fn draw_benefits_heading(buf: &mut Buffer, theme: &Theme, _app: &App) {
        let area = buf.area;
        let text_area = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
        Paragraph::new(Line::from(Span::styled(content::BENEFITS_HEADING, theme.heading())))
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }

    fn draw_benefit(buf: &mut Buffer, theme: &Theme, benefit: &content::Benefit) {
        let area = buf.area;
        let card = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height.saturating_sub(1));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.bg2))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(card);
        block.render(card, buf);

        let lines = vec![
            Line::from(Span::styled(
                benefit.title,
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(benefit.description, Style::default().fg(theme.fg1))),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftverse_core::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_hero_settles_into_view() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.resize(100, 30);
        let now = Instant::now();
        app.enter_landing(now);

        let mut terminal = Terminal::new(TestBackend::new(100, 29)).unwrap();
        let later = now + Duration::from_secs(2);
        terminal
            .draw(|frame| {
                let area = frame.area();
                LandingWidget::render(frame, area, &app, later)
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(content::HERO_CTA));
        assert!(text.contains("Discover, collect"));
    }

    #[test]
    fn test_hidden_section_is_not_drawn() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.resize(100, 30);
        let now = Instant::now();
        app.enter_landing(now);
        if let Some(landing) = app.landing.as_mut() {
            landing.scroll = 30;
        }

        // Stats sits at the top of the screen but its trigger has not fired
        let mut terminal = Terminal::new(TestBackend::new(100, 29)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                LandingWidget::render(frame, area, &app, now)
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(!text.contains("Active Users"));

        app.update_landing(now);
        let later = now + Duration::from_secs(2);
        terminal
            .draw(|frame| {
                let area = frame.area();
                LandingWidget::render(frame, area, &app, later)
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Active Users"));
    }
}
