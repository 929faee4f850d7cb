use std::time::Instant;

use nftverse_core::market::{FlowPhase, ListingRecord};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{fade_area, truncate_str};
use crate::app::{App, Mode};
use crate::layout::{CARD_HEIGHT, MARKET_FOOTER_HEIGHT, MARKET_HEADER_HEIGHT};
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct MarketplaceWidget;

impl MarketplaceWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg0)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MARKET_HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(MARKET_FOOTER_HEIGHT),
            ])
            .split(area);

        let records = app.visible_records();
        Self::render_header(frame, chunks[0], app, records.len());

        let Some(market) = app.market.as_ref() else {
            return;
        };
        let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
        let theme = &app.theme;

        match market.flow.phase() {
            FlowPhase::Loading => {
                Self::render_message(
                    frame,
                    chunks[1],
                    theme,
                    Line::from(Span::styled(
                        format!("{} Loading NFTs...", spinner),
                        Style::default().fg(theme.info),
                    )),
                    None,
                );
            }
            FlowPhase::Failed(_) => {
                Self::render_message(
                    frame,
                    chunks[1],
                    theme,
                    Line::from(Span::styled(
                        "Error loading NFTs. Please try again later.",
                        Style::default().fg(theme.error),
                    )),
                    None,
                );
            }
            FlowPhase::Ready if records.is_empty() => {
                Self::render_message(
                    frame,
                    chunks[1],
                    theme,
                    Line::from(Span::styled("No NFTs found", theme.heading())),
                    Some(Line::from(Span::styled(
                        "Try adjusting your search criteria",
                        theme.muted(),
                    ))),
                );
            }
            FlowPhase::Ready => {
                Self::render_grid(frame, chunks[1], app, &records, now);
            }
        }

        let footer = if market.flow.is_fetching_next() {
            Some(Span::styled(
                format!("{} Loading more...", spinner),
                Style::default().fg(theme.info),
            ))
        } else if market.flow.is_refreshing() {
            Some(Span::styled(
                format!("{} Refreshing...", spinner),
                theme.muted(),
            ))
        } else {
            None
        };
        if let Some(span) = footer {
            frame.render_widget(
                Paragraph::new(Line::from(span)).alignment(Alignment::Center),
                chunks[2],
            );
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, app: &App, shown: usize) {
        let theme = &app.theme;
        let block = Block::default()
            .title(Span::styled(" NFT Marketplace ", theme.heading()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border(app.is_input_mode()))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(market) = app.market.as_ref() else {
            return;
        };

        let query = market.flow.query();
        let search = match &app.mode {
            Mode::Search { .. } => Line::from(vec![
                Span::styled(" Search: ", Style::default().fg(theme.accent)),
                Span::styled(query.to_string(), Style::default().fg(theme.fg0)),
                Span::styled("_", Style::default().fg(theme.accent)),
            ]),
            _ if query.is_empty() => Line::from(vec![
                Span::styled(" Search: ", theme.muted()),
                Span::styled("Search by name or creator (/)", theme.muted()),
            ]),
            _ => Line::from(vec![
                Span::styled(" Search: ", theme.muted()),
                Span::styled(query.to_string(), Style::default().fg(theme.fg0)),
            ]),
        };

        let total = market
            .flow
            .total()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let summary = Line::from(vec![
            Span::styled(" Sort: ", theme.muted()),
            Span::styled(
                market.flow.sort_mode().label(),
                Style::default().fg(theme.highlight),
            ),
            Span::styled("   Total NFTs: ", theme.muted()),
            Span::styled(total, Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)),
            Span::styled("   Loaded: ", theme.muted()),
            Span::styled(
                market.flow.records().len().to_string(),
                Style::default().fg(theme.fg0),
            ),
            Span::styled("   Showing: ", theme.muted()),
            Span::styled(shown.to_string(), Style::default().fg(theme.fg0)),
        ]);

        frame.render_widget(Paragraph::new(vec![search, Line::from(""), summary]), inner);
    }

    fn render_message(
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        headline: Line<'_>,
        detail: Option<Line<'_>>,
    ) {
        let mut lines = vec![headline];
        if let Some(detail) = detail {
            lines.push(Line::from(""));
            lines.push(detail);
        }
        let height = lines.len() as u16;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let text_area = Rect::new(area.x, top, area.width, height.min(area.height));
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().bg(theme.bg0)),
            text_area,
        );
    }

    fn render_grid(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        records: &[ListingRecord],
        now: Instant,
    ) {
        let Some(market) = app.market.as_ref() else {
            return;
        };
        let grid = app.grid_metrics();
        let card_width = area.width / grid.columns as u16;

        let first = market.first_row * grid.columns;
        let last = (first + grid.visible_rows * grid.columns).min(records.len());
        for (idx, record) in records.iter().enumerate().take(last).skip(first) {
            let slot = idx - first;
            let row = (slot / grid.columns) as u16;
            let col = (slot % grid.columns) as u16;
            let y = area.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > area.bottom() {
                break;
            }
            let card = Rect::new(area.x + col * card_width, y, card_width, CARD_HEIGHT);
            Self::render_card(frame, card, &app.theme, record, idx == market.selected);
            fade_area(
                frame.buffer_mut(),
                card,
                &app.theme,
                market.card_opacity(&record.id, now),
            );
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, theme: &Theme, record: &ListingRecord, selected: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border(selected))
            .style(Style::default().bg(if selected { theme.selection } else { theme.bg1 }));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width as usize;
        let lines = vec![
            Line::from(Span::styled(
                truncate_str(&record.name, width),
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_str(&format!("by {}", record.creator), width),
                Style::default().fg(theme.creator),
            )),
            Line::from(vec![
                Span::styled("Price ", theme.muted()),
                Span::styled(
                    truncate_str(&format!("{} ETH", record.price), width.saturating_sub(6)),
                    Style::default().fg(theme.price).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(truncate_str(&record.image, width), theme.muted())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftverse_core::market::PageResult;
    use nftverse_core::{AppConfig, Error};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
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

    fn draw(app: &mut App, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 39)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                MarketplaceWidget::render(frame, area, app, now)
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn record(id: &str, name: &str) -> ListingRecord {
        ListingRecord {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("https://cdn.example.com/{}.png", id),
            price: "0.5".to_string(),
            creator: "atelier".to_string(),
            created_at: "2024-02-01T00:00:00Z".to_string(),
        }
    }

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.resize(120, 40);
        app
    }

    #[test]
    fn test_loading_state() {
        let mut app = app();
        let now = Instant::now();
        app.enter_marketplace(now);
        assert!(draw(&mut app, now).contains("Loading NFTs..."));
    }

    #[test]
    fn test_error_state() {
        let mut app = app();
        let now = Instant::now();
        let request = app.enter_marketplace(now).unwrap();
        app.handle_page_response(request.respond(Err(Error::Store("boom".into()))), now);
        assert!(draw(&mut app, now).contains("Error loading NFTs. Please try again later."));
    }

    #[test]
    fn test_grid_and_empty_filter() {
        let mut app = app();
        let now = Instant::now();
        let request = app.enter_marketplace(now).unwrap();
        let page = PageResult {
            page_index: 0,
            records: vec![record("1", "Lunar Tide"), record("2", "Solar Flare")],
            total: 2,
            next_page: None,
        };
        app.handle_page_response(request.respond(Ok(page)), now);

        let text = draw(&mut app, now + Duration::from_secs(2));
        assert!(text.contains("Lunar Tide"));
        assert!(text.contains("Solar Flare"));
        assert!(text.contains("Total NFTs: 2"));

        app.start_search();
        for c in "zzz".chars() {
            app.search_input(c);
        }
        let text = draw(&mut app, now + Duration::from_secs(2));
        assert!(text.contains("No NFTs found"));
        assert!(text.contains("Try adjusting your search criteria"));
    }
}
