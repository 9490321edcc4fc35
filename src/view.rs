//! Presentational state of the page: everything the controller would have
//! written into the DOM, as plain data a host renders and tests inspect.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// CSS class carried by the notification element
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
        }
    }
}

/// The transient message box in the top-right corner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Has the `show` class (slid in)
    pub shown: bool,
}

/// Project details overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub shown: bool,
    /// Hide transition running; removal is scheduled
    pub closing: bool,
}

/// A scroll the controller asks the host to perform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Icon shown on the toggle: the theme you would switch to
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "fa-moon",
            Theme::Dark => "fa-sun",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubmitButton {
    pub disabled: bool,
    pub loading: bool,
}

/// An image that received a generated card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilledImage {
    pub selector: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewState {
    /// `#navbar.scrolled`
    pub navbar_scrolled: bool,
    /// `#backToTop.show`
    pub back_to_top_visible: bool,
    /// `#nav-menu.active` and `#hamburger.active`
    pub menu_open: bool,
    /// Index of the nav link carrying `active`
    pub active_link: Option<usize>,
    pub notification: Option<Notification>,
    pub modal: Option<Modal>,
    pub submit_button: SubmitButton,
    pub theme: Theme,
    /// Text of the typing-effect headline, when the page has one
    pub headline: Option<String>,
    /// `fade-in-up` per animated block, in binding order
    pub revealed: Vec<bool>,
    pub images: Vec<FilledImage>,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
}

impl ViewState {
    /// Scroll requests not yet handed to the host
    pub fn pending_scrolls(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }
}
