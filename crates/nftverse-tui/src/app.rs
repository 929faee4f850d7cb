use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use nftverse_core::landing::{content, timing, Choreography, Easing};
use nftverse_core::market::{
    CacheLookup, FlowPhase, ListingFlow, ListingRecord, ListingSnapshot, PageRequest,
    PageResponse, QueryCache, LISTING_QUERY_KEY,
};
use nftverse_core::AppConfig;

use crate::layout::{GridMetrics, LandingLayout, STATUS_BAR_HEIGHT};
use crate::theme::Theme;

/// Fade-in length of a marketplace card
const CARD_FADE: Duration = Duration::from_millis(500);

/// Navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Marketplace,
}

impl Route {
    /// Terminal window title for the view
    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "PureNFT",
            Route::Marketplace => "PureNFT - Marketplace",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Editing the search query; Esc restores `previous`
    Search { previous: String },
    /// Help overlay
    Help,
}

/// Landing view state, alive while the landing route is shown
pub struct LandingState {
    pub choreography: Choreography,
    pub scroll: u16,
    /// First featured item shown in the carousel
    pub carousel: usize,
}

/// Marketplace view state, alive while the marketplace route is shown
pub struct MarketState {
    pub flow: ListingFlow,
    /// Index into the visible (filtered and sorted) records
    pub selected: usize,
    /// First grid row on screen
    pub first_row: usize,
    /// When the shown data was last fetched
    pub fetched_at: Option<Instant>,
    /// Per-record fade-in start
    reveal_at: HashMap<String, Instant>,
}

impl MarketState {
    fn new(flow: ListingFlow, fetched_at: Option<Instant>) -> Self {
        Self {
            flow,
            selected: 0,
            first_row: 0,
            fetched_at,
            reveal_at: HashMap::new(),
        }
    }

    /// Opacity of a card as of `now`
    pub fn card_opacity(&self, id: &str, now: Instant) -> f64 {
        match self.reveal_at.get(id) {
            Some(start) => Easing::Quad.apply(timing::progress(*start, now, CARD_FADE)),
            None => 1.0,
        }
    }

    fn is_fading(&self, now: Instant) -> bool {
        self.reveal_at
            .values()
            .any(|start| now < *start + CARD_FADE)
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub route: Route,
    pub mode: Mode,
    pub landing: Option<LandingState>,
    pub market: Option<MarketState>,
    /// Listing snapshots kept across marketplace visits
    pub cache: QueryCache<&'static str, ListingSnapshot>,
    /// Terminal size
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Spinner frame for loading indicators
    pub spinner_frame: usize,
    next_generation: u64,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let cache = QueryCache::from_config(&config.cache);
        Self {
            config,
            theme,
            route: Route::Landing,
            mode: Mode::Normal,
            landing: None,
            market: None,
            cache,
            width: 80,
            height: 24,
            should_quit: false,
            status_message: None,
            pending_key: None,
            spinner_frame: 0,
            next_generation: 0,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if let Some(landing) = self.landing.as_mut() {
            let layout = LandingLayout::new(width, height.saturating_sub(STATUS_BAR_HEIGHT));
            landing.scroll = landing.scroll.min(layout.max_scroll());
        }
        self.clamp_market_scroll();
    }

    /// Landing geometry for the current terminal and scroll
    pub fn landing_layout(&self) -> LandingLayout {
        let scroll = self.landing.as_ref().map(|l| l.scroll).unwrap_or(0);
        LandingLayout::new(self.width, self.height.saturating_sub(STATUS_BAR_HEIGHT))
            .with_scroll(scroll)
    }

    pub fn grid_metrics(&self) -> GridMetrics {
        GridMetrics::for_terminal(self.width, self.height)
    }

    // ------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------

    /// Show the landing view and start its choreography
    pub fn enter_landing(&mut self, now: Instant) {
        if let Some(market) = self.market.take() {
            self.unmount_market(market);
        }
        let mut choreography = Choreography::new(&self.config.landing);
        choreography.mount(now);
        self.landing = Some(LandingState {
            choreography,
            scroll: 0,
            carousel: 0,
        });
        self.route = Route::Landing;
        self.mode = Mode::Normal;
        tracing::info!("Entered landing view");
    }

    /// Show the marketplace, seeded from the query cache when possible.
    /// Returns the first page request, if one is needed.
    pub fn enter_marketplace(&mut self, now: Instant) -> Option<PageRequest> {
        if let Some(mut landing) = self.landing.take() {
            landing.choreography.teardown();
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let page_size = self.config.listing.page_size();

        let (mut flow, fetched_at) = match self.cache.lookup(&LISTING_QUERY_KEY, now) {
            CacheLookup::Fresh(snapshot) => {
                tracing::debug!(generation, "Listing cache fresh");
                (
                    ListingFlow::from_snapshot(generation, snapshot.clone(), false),
                    self.cache.fetched_at(&LISTING_QUERY_KEY),
                )
            }
            CacheLookup::Stale(snapshot) => {
                tracing::debug!(generation, "Listing cache stale, refetching");
                (
                    ListingFlow::from_snapshot(generation, snapshot.clone(), true),
                    self.cache.fetched_at(&LISTING_QUERY_KEY),
                )
            }
            CacheLookup::Miss => (ListingFlow::new(generation, page_size), None),
        };

        let request = flow.start();
        self.market = Some(MarketState::new(flow, fetched_at));
        self.route = Route::Marketplace;
        self.mode = Mode::Normal;
        tracing::info!(generation, "Entered marketplace view");
        request
    }

    fn unmount_market(&mut self, mut market: MarketState) {
        if let Some(snapshot) = market.flow.teardown() {
            let fetched_at = market.fetched_at.unwrap_or_else(Instant::now);
            self.cache.insert(LISTING_QUERY_KEY, snapshot, fetched_at);
        }
    }

    /// Tear everything down before exit
    pub fn shutdown(&mut self) {
        if let Some(market) = self.market.take() {
            self.unmount_market(market);
        }
        if let Some(mut landing) = self.landing.take() {
            landing.choreography.teardown();
        }
    }

    // ------------------------------------------------------------------
    // Per-frame updates
    // ------------------------------------------------------------------

    /// Drive reveal triggers against the current layout
    pub fn update_landing(&mut self, now: Instant) {
        let layout = self.landing_layout();
        if let Some(landing) = self.landing.as_mut() {
            landing.choreography.update(&layout, now);
        }
    }

    /// Continuation check for the marketplace sentinel
    pub fn poll_continuation(&mut self) -> Option<PageRequest> {
        let grid = self.grid_metrics();
        let prefetch_rows = self.config.listing.prefetch_rows;
        let market = self.market.as_mut()?;
        let items = market.flow.visible().len();
        let visible = grid.sentinel_visible(items, market.first_row, prefetch_rows);
        market.flow.poll_continuation(visible)
    }

    /// Apply a finished page fetch
    pub fn handle_page_response(&mut self, response: PageResponse, now: Instant) {
        let stagger = Duration::from_millis(self.config.listing.card_stagger_ms);
        let animate = self.config.landing.animations;
        let Some(market) = self.market.as_mut() else {
            tracing::debug!(generation = response.generation, "Page response with no marketplace");
            return;
        };

        let was_refreshing = market.flow.is_refreshing();
        let before = market.flow.records().len();
        if !market.flow.complete(response) {
            return;
        }

        let phase = market.flow.phase().clone();
        match phase {
            FlowPhase::Ready => {
                market.fetched_at = Some(now);
                let start = if was_refreshing {
                    market.reveal_at.clear();
                    0
                } else {
                    before
                };
                if animate {
                    for (k, record) in market.flow.records()[start..].iter().enumerate() {
                        market.reveal_at.insert(record.id.clone(), now + stagger * k as u32);
                    }
                }
                self.clamp_market_scroll();
            }
            FlowPhase::Failed(msg) => {
                self.status_message = Some(format!("Fetch failed: {}", msg));
            }
            FlowPhase::Loading => {}
        }
    }

    /// Whether anything on screen is mid-animation
    pub fn needs_animation_frame(&self, now: Instant) -> bool {
        let landing = self
            .landing
            .as_ref()
            .is_some_and(|l| l.choreography.is_animating(now));
        let market = self.market.as_ref().is_some_and(|m| m.is_fading(now));
        landing || market
    }

    /// Periodic housekeeping on idle ticks
    pub fn tick(&mut self, now: Instant) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.cache.purge_expired(now);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Records currently visible in the marketplace
    pub fn visible_records(&mut self) -> Vec<ListingRecord> {
        self.market
            .as_mut()
            .map(|m| m.flow.visible().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn selected_record(&mut self) -> Option<ListingRecord> {
        let market = self.market.as_mut()?;
        let selected = market.selected;
        market.flow.visible().get(selected).map(|r| (*r).clone())
    }

    fn visible_len(&mut self) -> usize {
        self.market.as_mut().map(|m| m.flow.visible().len()).unwrap_or(0)
    }

    /// Keep the selection in range and on screen
    pub fn clamp_market_scroll(&mut self) {
        let grid = self.grid_metrics();
        let len = self.visible_len();
        let Some(market) = self.market.as_mut() else {
            return;
        };
        market.selected = market.selected.min(len.saturating_sub(1));
        let row = market.selected / grid.columns;
        if row < market.first_row {
            market.first_row = row;
        } else if row >= market.first_row + grid.visible_rows {
            market.first_row = row + 1 - grid.visible_rows;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len();
        if let Some(market) = self.market.as_mut() {
            if len == 0 {
                return;
            }
            let target = market.selected as isize + delta;
            market.selected = target.clamp(0, len as isize - 1) as usize;
        }
        self.clamp_market_scroll();
    }

    fn scroll_landing(&mut self, delta: i32) {
        let max = self.landing_layout().max_scroll();
        if let Some(landing) = self.landing.as_mut() {
            let next = (i32::from(landing.scroll) + delta).clamp(0, i32::from(max));
            landing.scroll = next as u16;
        }
    }

    /// Move down one line (landing) or one grid row (marketplace)
    pub fn move_down(&mut self) {
        match self.route {
            Route::Landing => self.scroll_landing(1),
            Route::Marketplace => {
                let columns = self.grid_metrics().columns as isize;
                self.move_selection(columns);
            }
        }
    }

    pub fn move_up(&mut self) {
        match self.route {
            Route::Landing => self.scroll_landing(-1),
            Route::Marketplace => {
                let columns = self.grid_metrics().columns as isize;
                self.move_selection(-columns);
            }
        }
    }

    pub fn scroll_half_page_down(&mut self) {
        match self.route {
            Route::Landing => {
                let half = i32::from(self.landing_layout().height / 2).max(1);
                self.scroll_landing(half);
            }
            Route::Marketplace => {
                let grid = self.grid_metrics();
                let rows = (grid.visible_rows / 2).max(1);
                self.move_selection((rows * grid.columns) as isize);
            }
        }
    }

    pub fn scroll_half_page_up(&mut self) {
        match self.route {
            Route::Landing => {
                let half = i32::from(self.landing_layout().height / 2).max(1);
                self.scroll_landing(-half);
            }
            Route::Marketplace => {
                let grid = self.grid_metrics();
                let rows = (grid.visible_rows / 2).max(1);
                self.move_selection(-((rows * grid.columns) as isize));
            }
        }
    }

    pub fn jump_to_top(&mut self) {
        match self.route {
            Route::Landing => {
                if let Some(landing) = self.landing.as_mut() {
                    landing.scroll = 0;
                }
            }
            Route::Marketplace => self.move_selection(isize::MIN / 2),
        }
    }

    pub fn jump_to_bottom(&mut self) {
        match self.route {
            Route::Landing => self.scroll_landing(i32::MAX / 2),
            Route::Marketplace => self.move_selection(isize::MAX / 2),
        }
    }

    /// Next carousel item (landing) or next card (marketplace)
    pub fn next_item(&mut self) {
        match self.route {
            Route::Landing => {
                if let Some(landing) = self.landing.as_mut() {
                    landing.carousel = (landing.carousel + 1) % content::FEATURED.len();
                }
            }
            Route::Marketplace => self.move_selection(1),
        }
    }

    pub fn prev_item(&mut self) {
        match self.route {
            Route::Landing => {
                if let Some(landing) = self.landing.as_mut() {
                    let len = content::FEATURED.len();
                    landing.carousel = (landing.carousel + len - 1) % len;
                }
            }
            Route::Marketplace => self.move_selection(-1),
        }
    }

    // ------------------------------------------------------------------
    // Search and sort
    // ------------------------------------------------------------------

    pub fn start_search(&mut self) {
        if let Some(market) = self.market.as_ref() {
            self.mode = Mode::Search {
                previous: market.flow.query().to_string(),
            };
        }
    }

    fn set_query(&mut self, query: String) {
        if let Some(market) = self.market.as_mut() {
            market.flow.set_query(query);
            market.selected = 0;
            market.first_row = 0;
        }
    }

    pub fn search_input(&mut self, c: char) {
        let query = self.query() + &c.to_string();
        self.set_query(query);
    }

    pub fn search_backspace(&mut self) {
        let mut query = self.query();
        query.pop();
        self.set_query(query);
    }

    /// Keep the edited query
    pub fn confirm_search(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Restore the query from before editing
    pub fn cancel_search(&mut self) {
        if let Mode::Search { previous } = std::mem::replace(&mut self.mode, Mode::Normal) {
            self.set_query(previous);
        }
    }

    pub fn query(&self) -> String {
        self.market
            .as_ref()
            .map(|m| m.flow.query().to_string())
            .unwrap_or_default()
    }

    pub fn cycle_sort(&mut self) {
        if let Some(market) = self.market.as_mut() {
            let next = market.flow.sort_mode().cycle();
            market.flow.set_sort(next);
            market.selected = 0;
            market.first_row = 0;
            self.status_message = Some(format!("Sort: {}", next.label()));
        }
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    /// Image URI to open for the current selection
    pub fn image_to_open(&mut self) -> Option<String> {
        match self.route {
            Route::Landing => self
                .landing
                .as_ref()
                .map(|l| content::FEATURED[l.carousel % content::FEATURED.len()].image.to_string()),
            Route::Marketplace => self.selected_record().map(|r| r.image),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Search { .. })
    }
}
