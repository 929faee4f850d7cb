use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use nftverse_core::{
    market::{fetch_page, store::open_store, ListingStore, PageRequest, PageResponse},
    AppConfig,
};
use nftverse_tui::{
    app::{App, Mode, Route},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    layout::STATUS_BAR_HEIGHT,
    load_theme,
    widgets::{LandingWidget, MarketplaceWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Open the store before taking over the terminal so errors print normally
    let store = open_store(&config).await?;
    tracing::info!(backend = store.name(), "Listing store ready");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(Route::Landing.title()))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create app state
    let mut app = App::new(config.clone(), theme);
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.enter_landing(Instant::now());

    let result = event_loop(&mut terminal, &mut app, &keymap, store).await;

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    store: Arc<dyn ListingStore>,
) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);

    // Create channel for async page fetch results
    let (page_tx, mut page_rx) = mpsc::unbounded_channel::<PageResponse>();

    let mut title = app.route.title();

    // High frame rate while something animates; checked at the end of each iteration
    let mut needs_fast_update = true;

    // Main loop
    loop {
        let now = Instant::now();

        // Process any completed page fetches (non-blocking)
        while let Ok(response) = page_rx.try_recv() {
            app.handle_page_response(response, now);
        }

        // Infinite scroll continuation
        if let Some(request) = app.poll_continuation() {
            spawn_page_fetch(store.clone(), request, page_tx.clone());
        }

        // Drive landing reveal triggers against the current scroll position
        app.update_landing(now);

        if app.route.title() != title {
            title = app.route.title();
            execute!(terminal.backend_mut(), SetTitle(title))?;
        }

        // Draw UI
        terminal.draw(|frame| draw(frame, app, now))?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    if let Some(request) = handle_action(app, action) {
                        spawn_page_fetch(store.clone(), request, page_tx.clone());
                    }
                }
                AppEvent::Resize(width, height) => {
                    app.resize(width, height);
                }
                AppEvent::Tick => {
                    // Spinner and cache housekeeping
                    app.tick(Instant::now());
                }
            }
        }

        needs_fast_update = app.needs_animation_frame(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let size = frame.area();

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(size);

    match app.route {
        Route::Landing => LandingWidget::render(frame, main_layout[0], app, now),
        Route::Marketplace => MarketplaceWidget::render(frame, main_layout[0], app, now),
    }
    StatusBarWidget::render(frame, main_layout[1], app);

    // Render popup on top
    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
    }
}

/// Spawn a page fetch; the result comes back through the channel
fn spawn_page_fetch(
    store: Arc<dyn ListingStore>,
    request: PageRequest,
    tx: mpsc::UnboundedSender<PageResponse>,
) {
    tokio::spawn(async move {
        let result = fetch_page(store.as_ref(), request.page_index, request.page_size).await;
        if let Err(e) = &result {
            tracing::warn!(page = request.page_index, error = %e, "Page fetch failed");
        }
        let _ = tx.send(request.respond(result));
    });
}

/// Apply an action. Returns a page request when navigation starts a fetch.
fn handle_action(app: &mut App, action: Action) -> Option<PageRequest> {
    // Clear pending key on any action except PendingG
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    let now = Instant::now();
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => {
            app.pending_key = Some('g');
        }
        Action::NextItem => app.next_item(),
        Action::PrevItem => app.prev_item(),
        Action::Select => {
            if app.route == Route::Landing {
                app.clear_status();
                return app.enter_marketplace(now);
            }
        }
        Action::Back => {
            if app.route == Route::Marketplace {
                app.clear_status();
                app.enter_landing(now);
            }
        }
        Action::ExitMode => match app.mode {
            Mode::Normal if app.route == Route::Marketplace => {
                app.clear_status();
                app.enter_landing(now);
            }
            Mode::Search { .. } => app.cancel_search(),
            _ => app.mode = Mode::Normal,
        },
        Action::StartSearch => {
            if app.route == Route::Marketplace {
                app.start_search();
            }
        }
        Action::CycleSort => app.cycle_sort(),
        Action::OpenImage => {
            if let Some(uri) = app.image_to_open() {
                if let Err(e) = open::that(&uri) {
                    app.set_status(format!("Failed to open image: {}", e));
                } else {
                    app.set_status(format!("Opening: {}", uri));
                }
            }
        }
        Action::Help => {
            app.mode = Mode::Help;
        }
        Action::Confirm => app.confirm_search(),
        Action::Cancel => app.cancel_search(),
        Action::InputChar(c) => app.search_input(c),
        Action::Backspace => app.search_backspace(),
        Action::None => {}
    }
    None
}
