use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub landing: LandingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (local store and log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Which collaborator serves listing records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgREST-compatible HTTP endpoint (e.g. Supabase)
    Rest,
    /// Local SQLite file under the data directory
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: "rest" or "sqlite"
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    /// Base URL of the REST endpoint (without /rest/v1)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Anonymous API key, sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Table holding listing records
    #[serde(default = "default_table")]
    pub table: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: default_base_url(),
            api_key: None,
            table: default_table(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// The continuation sentinel counts as visible when the selection is
    /// within this many rows of the last rendered record
    #[serde(default = "default_prefetch_rows")]
    pub prefetch_rows: usize,
    /// Fade-in delay between consecutive cards in milliseconds
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            prefetch_rows: default_prefetch_rows(),
            card_stagger_ms: default_card_stagger(),
        }
    }
}

impl ListingConfig {
    /// Page size, never zero
    pub fn page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds after which a cached listing is stale for a fresh mount
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    /// Seconds after which a cached listing is evicted
    #[serde(default = "default_evict_secs")]
    pub evict_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            evict_secs: default_evict_secs(),
        }
    }
}

impl CacheConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    pub fn evict_after(&self) -> Duration {
        Duration::from_secs(self.evict_secs.max(self.stale_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Enable entrance and reveal animations
    #[serde(default = "default_true")]
    pub animations: bool,
    /// Fraction of the viewport height a section's top edge must cross
    #[serde(default = "default_trigger_ratio")]
    pub trigger_ratio: f64,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            animations: default_true(),
            trigger_ratio: default_trigger_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a tween is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "purenft", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with overrides
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "purenft".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    /// Price column
    pub price: Option<String>,
    /// Creator column
    pub creator: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "G" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Move cursor / scroll down
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    /// Move cursor / scroll up
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    /// Jump to top
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to bottom
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Follow the call-to-action (landing) or select (marketplace)
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Navigate back to the landing view
    #[serde(default = "default_key_back")]
    pub back: String,
    /// Edit the search query
    #[serde(default = "default_key_search")]
    pub search: String,
    /// Cycle the sort mode
    #[serde(default = "default_key_cycle_sort")]
    pub cycle_sort: String,
    /// Open the selected record's image in the system viewer
    #[serde(default = "default_key_open_image")]
    pub open_image: String,
    /// Scroll the featured carousel forward
    #[serde(default = "default_key_carousel_next")]
    pub carousel_next: String,
    /// Scroll the featured carousel backward
    #[serde(default = "default_key_carousel_prev")]
    pub carousel_prev: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            select: default_key_select(),
            back: default_key_back(),
            search: default_key_search(),
            cycle_sort: default_key_cycle_sort(),
            open_image: default_key_open_image(),
            carousel_next: default_key_carousel_next(),
            carousel_prev: default_key_carousel_prev(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_back() -> String { "<BS>".to_string() }
fn default_key_search() -> String { "/".to_string() }
fn default_key_cycle_sort() -> String { "s".to_string() }
fn default_key_open_image() -> String { "o".to_string() }
fn default_key_carousel_next() -> String { "l".to_string() }
fn default_key_carousel_prev() -> String { "h".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nftverse")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_base_url() -> String {
    "http://127.0.0.1:54321".to_string()
}

fn default_table() -> String {
    "nfts".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    8
}

fn default_prefetch_rows() -> usize {
    2
}

fn default_card_stagger() -> u64 {
    100
}

fn default_stale_secs() -> u64 {
    300 // 5 minutes
}

fn default_evict_secs() -> u64 {
    3600 // 1 hour
}

fn default_trigger_ratio() -> f64 {
    0.8
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/nftverse/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("nftverse")
            .join("config.toml")
    }

    /// Get the local store file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("nftverse.db")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("nftverse.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
