//! Portfolio page controller
//!
//! A headless, deterministic rendition of a single-page portfolio site's
//! behaviour: navigation highlighting, scroll effects, a validated contact
//! form with a simulated submission, fade-in reveals, a typing headline,
//! project modals, a persisted theme toggle, and generated placeholder cards.
//!
//! # Features
//!
//! - **Typed DOM contract**: [`PageBinding`] parses the page once and fails
//!   fast when a required element is missing
//! - **Event dispatch**: DOM events are [`PageEvent`] values fed to one
//!   [`PageController`]; timers run on an explicit millisecond clock
//! - **Placeholder cards** (`render`, default): gradient title cards and
//!   solid fallback cards rasterized to JPEG/PNG
//!
//! # Example
//!
//! ```no_run
//! use portfolio::{PageBinding, PageConfig, PageController, PageEvent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let html = std::fs::read_to_string("index.html")?;
//! let binding = PageBinding::from_html(&html)?;
//! let mut page = PageController::headless(binding, PageConfig::default())?;
//! page.init();
//! page.dispatch(PageEvent::Scroll { y: 640.0 });
//! page.advance_by(10);
//! println!("active link: {:?}", page.view().active_link);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod binding;
pub mod controller;
pub mod form;
pub mod nav;
pub mod submit;
pub mod timers;
pub mod view;

// Platform API surface (local storage, background worker registration)
pub mod platform;

// Placeholder card rendering
#[cfg(feature = "render")]
pub mod rendering;

// Async-friendly runtime (worker thread owning a controller)
pub mod async_api;

pub use async_api::{PageRuntime, PageSnapshot};
pub use binding::PageBinding;
pub use controller::{PageController, PageEvent, PageLayout};
pub use form::{ContactForm, Field, FieldStatus};
pub use submit::{SimulatedTransport, SubmissionState, Transport};
pub use view::ViewState;

/// Configuration for the page controller
///
/// Defaults reproduce the live site: a 100px probe below the scroll offset,
/// home forced within the first 50px, a 70px fixed navbar, a 10ms scroll
/// debounce, and a simulated submission that takes 2s and succeeds 90% of
/// the time.
///
/// # Examples
///
/// ```
/// let cfg = portfolio::PageConfig::default();
/// assert_eq!(cfg.theme_storage_key, "dark-theme");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Added to the scroll offset before testing section ranges (px)
    pub scroll_probe_offset: f64,
    /// Scroll offsets below this force the home link active (px)
    pub home_threshold: f64,
    /// Height of the fixed navbar subtracted from nav scroll targets (px)
    pub nav_scroll_offset: f64,
    /// Navbar gains `scrolled` past this offset (px)
    pub navbar_scrolled_after: f64,
    /// Back-to-top control shows past this offset (px)
    pub back_to_top_after: f64,
    /// Trailing debounce for active-link evaluation (ms)
    pub scroll_debounce_ms: u64,
    /// Delay before the first active-link evaluation after init (ms)
    pub initial_nav_update_ms: u64,
    /// Simulated submission latency (ms)
    pub submit_delay_ms: u64,
    /// Probability a simulated submission succeeds
    pub submit_success_rate: f64,
    /// How long a notification stays visible (ms)
    pub notification_lifetime_ms: u64,
    /// Hide transition before an element is removed (ms)
    pub transition_ms: u64,
    /// Delay before a new notification or modal gains `show` (ms)
    pub reveal_delay_ms: u64,
    /// Text typed into the home headline
    pub typing_text: String,
    /// Delay before typing starts (ms)
    pub typing_start_ms: u64,
    /// Delay between typed characters (ms)
    pub typing_interval_ms: u64,
    /// Visible share of an element needed to fade it in
    pub fade_threshold: f64,
    /// Bottom margin removed from the viewport for fade-in tests (px)
    pub fade_bottom_margin: f64,
    /// Local storage key of the theme flag
    pub theme_storage_key: String,
    /// Background worker script path
    pub service_worker_script: String,
    /// Background worker scope
    pub service_worker_scope: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_probe_offset: 100.0,
            home_threshold: 50.0,
            nav_scroll_offset: 70.0,
            navbar_scrolled_after: 100.0,
            back_to_top_after: 500.0,
            scroll_debounce_ms: 10,
            initial_nav_update_ms: 100,
            submit_delay_ms: 2000,
            submit_success_rate: 0.9,
            notification_lifetime_ms: 5000,
            transition_ms: 300,
            reveal_delay_ms: 100,
            typing_text: "Computer Applications Student".to_string(),
            typing_start_ms: 1000,
            typing_interval_ms: 100,
            fade_threshold: 0.1,
            fade_bottom_margin: 50.0,
            theme_storage_key: "dark-theme".to_string(),
            service_worker_script: "/sw.js".to_string(),
            service_worker_scope: "/".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: PageConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.submit_success_rate) {
            return Err(Error::ConfigError(format!(
                "submit_success_rate must be within 0..=1, got {}",
                self.submit_success_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.fade_threshold) {
            return Err(Error::ConfigError(format!(
                "fade_threshold must be within 0..=1, got {}",
                self.fade_threshold
            )));
        }
        if self.scroll_debounce_ms == 0 {
            return Err(Error::ConfigError("scroll_debounce_ms must be positive".into()));
        }
        if self.theme_storage_key.is_empty() {
            return Err(Error::ConfigError("theme_storage_key must not be empty".into()));
        }
        let offsets = [
            ("scroll_probe_offset", self.scroll_probe_offset),
            ("home_threshold", self.home_threshold),
            ("nav_scroll_offset", self.nav_scroll_offset),
            ("navbar_scrolled_after", self.navbar_scrolled_after),
            ("back_to_top_after", self.back_to_top_after),
            ("fade_bottom_margin", self.fade_bottom_margin),
        ];
        for (name, v) in offsets {
            if !v.is_finite() {
                return Err(Error::ConfigError(format!("{} must be finite", name)));
            }
        }
        Ok(())
    }

    pub(crate) fn tracker(&self) -> nav::TrackerConfig {
        nav::TrackerConfig {
            probe_offset: self.scroll_probe_offset,
            home_threshold: self.home_threshold,
        }
    }
}
