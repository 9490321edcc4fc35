//! Navigation: active-section tracking, scroll targets, and the scroll
//! debouncer.

use serde::{Deserialize, Serialize};

/// Vertical extent of an element in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open containment: `[top, top + height)`
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// A `section[id]` and where it currently sits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    #[serde(flatten)]
    pub extent: Extent,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            extent: Extent::new(top, height),
        }
    }
}

/// Thresholds the tracker works with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Added to the scroll offset before probing section ranges
    pub probe_offset: f64,
    /// Below this scroll offset the home link is forced active
    pub home_threshold: f64,
}

/// What the tracker decided for one scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLink<'a> {
    /// Near the top of the page: the first nav link
    Home,
    /// The section with this id contains the probe point
    Section(&'a str),
    /// No section contains the probe point; keep the current link
    Unchanged,
}

/// Decide which nav link should be active.
///
/// Sections are visited in document order and the last one containing
/// `scroll_y + probe_offset` wins.
pub fn active_link<'a>(scroll_y: f64, sections: &'a [SectionLayout], cfg: TrackerConfig) -> ActiveLink<'a> {
    if scroll_y < cfg.home_threshold {
        return ActiveLink::Home;
    }
    let probe = scroll_y + cfg.probe_offset;
    sections
        .iter()
        .rev()
        .find(|s| s.extent.contains(probe))
        .map(|s| ActiveLink::Section(&s.id))
        .unwrap_or(ActiveLink::Unchanged)
}

/// Where a nav click should scroll to, clear of the fixed navbar.
pub fn scroll_target(section_top: f64, nav_offset: f64) -> f64 {
    section_top - nav_offset
}

/// Trailing-edge debouncer on a millisecond clock.
///
/// Every `trigger` pushes the deadline out by `wait_ms`; `fire` succeeds only
/// for the generation scheduled last.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait_ms: u64,
    generation: u64,
    pending: bool,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            generation: 0,
            pending: false,
        }
    }

    /// Register an event at `now`. Returns the deadline and generation to
    /// schedule.
    pub fn trigger(&mut self, now: u64) -> (u64, u64) {
        self.generation += 1;
        self.pending = true;
        (now + self.wait_ms, self.generation)
    }

    /// A scheduled deadline elapsed. True when it is the most recent one.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending && generation == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Intersection test used for fade-in reveals.
///
/// The viewport is `[scroll_y, scroll_y + viewport_height - bottom_margin)`;
/// the element is revealed when the visible share of its height reaches
/// `threshold`.
pub fn is_revealed(el: Extent, scroll_y: f64, viewport_height: f64, bottom_margin: f64, threshold: f64) -> bool {
    if el.height <= 0.0 {
        return false;
    }
    let view_top = scroll_y;
    let view_bottom = scroll_y + (viewport_height - bottom_margin).max(0.0);
    let visible = (el.top + el.height).min(view_bottom) - el.top.max(view_top);
    visible > 0.0 && visible / el.height >= threshold
}
