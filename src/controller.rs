//! The page controller: one object owning the page's state, fed DOM events
//! and driven by a millisecond clock.
//!
//! Events are handled at the controller's current time. Anything the page
//! would defer with a timer is queued and fires when the host calls
//! [`PageController::advance_to`] or [`PageController::advance_by`].

use crate::binding::PageBinding;
use crate::form::{ContactForm, Field};
use crate::nav::{self, ActiveLink, Debouncer, Extent, SectionLayout};
use crate::platform::{HeadlessPlatform, PlatformApi};
use crate::submit::{DeliveryError, FlowEvent, SimulatedTransport, SubmissionFlow, SubmissionState, Transport};
use crate::timers::TimerQueue;
use crate::view::{Modal, Notification, NotificationKind, ScrollRequest, Theme, ViewState};
use crate::{PageConfig, Result};
use serde::Deserialize;

pub const MSG_INVALID_FORM: &str = "Please fill in all required fields correctly.";
pub const MSG_SENT: &str = "Message sent successfully! I'll get back to you soon.";
pub const MSG_SEND_FAILED: &str = "Failed to send message. Please try again later.";

/// Where things sit on the page; supplied by the host after layout
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PageLayout {
    pub viewport_height: f64,
    pub sections: Vec<SectionLayout>,
    /// Extents of the animated blocks, in binding order
    #[serde(default)]
    pub animated: Vec<Extent>,
}

/// DOM events the page reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// `window` finished loading
    Load,
    /// Layout changed (initial layout, resize)
    Layout(PageLayout),
    Scroll { y: f64 },
    HamburgerClick,
    /// Click on the nav link at this index
    NavLinkClick(usize),
    BackToTopClick,
    Input { field: Field, value: String },
    Blur(Field),
    Submit,
    NotificationClose,
    /// Click on a project card; `on_links` when inside its `.project-links`
    ProjectCardClick { index: usize, on_links: bool },
    ModalClose,
    /// Click on the modal's backdrop (outside its content)
    ModalBackdropClick,
    KeyDown(String),
    ThemeToggle,
}

#[derive(Debug)]
enum Timer {
    ResetScroll,
    InitialActiveLink,
    ActiveLink { generation: u64 },
    RevealNotification(u64),
    HideNotification(u64),
    RemoveNotification(u64),
    RevealModal(u64),
    RemoveModal(u64),
    TypeNext,
    Delivered(std::result::Result<(), DeliveryError>),
}

pub struct PageController {
    config: PageConfig,
    binding: PageBinding,
    platform: Box<dyn PlatformApi>,
    transport: Box<dyn Transport>,
    view: ViewState,
    form: ContactForm,
    flow: SubmissionFlow,
    timers: TimerQueue<Timer>,
    debounce: Debouncer,
    layout: PageLayout,
    scroll_y: f64,
    now: u64,
    next_id: u64,
    typed: usize,
    initialized: bool,
}

impl PageController {
    pub fn new(
        binding: PageBinding,
        config: PageConfig,
        platform: Box<dyn PlatformApi>,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let form = ContactForm::with_error_slots(binding.error_slots());
        let view = ViewState {
            revealed: vec![false; binding.animated.len()],
            ..ViewState::default()
        };
        Ok(Self {
            debounce: Debouncer::new(config.scroll_debounce_ms),
            config,
            binding,
            platform,
            transport,
            view,
            form,
            flow: SubmissionFlow::new(),
            timers: TimerQueue::new(),
            layout: PageLayout::default(),
            scroll_y: 0.0,
            now: 0,
            next_id: 0,
            typed: 0,
            initialized: false,
        })
    }

    /// Controller with in-memory platform and the simulated transport
    pub fn headless(binding: PageBinding, config: PageConfig) -> Result<Self> {
        let transport = SimulatedTransport::new(config.submit_delay_ms, config.submit_success_rate);
        Self::new(binding, config, Box::new(HeadlessPlatform::new()), Box::new(transport))
    }

    /// Wire the page up (the `DOMContentLoaded` work). Calling it twice has
    /// no further effect.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("page controller already initialized");
            return;
        }
        self.initialized = true;
        log::info!(
            "page init: {} sections, {} nav links, {} projects",
            self.binding.sections.len(),
            self.binding.nav_links.len(),
            self.binding.projects.len()
        );

        self.request_scroll(0.0, false);
        self.load_theme();
        self.start_typing();
        self.create_placeholder_images();
        self.schedule_in(self.config.initial_nav_update_ms, Timer::InitialActiveLink);
    }

    /// Drop pending timers and transient elements and leave a single
    /// instant scroll to the top. A submission in flight is abandoned with
    /// the page.
    pub fn teardown(&mut self) {
        if !self.initialized {
            return;
        }
        if self.flow.state() == SubmissionState::Submitting {
            log::warn!("teardown with a submission in flight");
        }
        self.timers.clear();
        self.flow = SubmissionFlow::new();
        self.view.submit_button = Default::default();
        self.view.notification = None;
        self.view.modal = None;
        self.view.images.clear();
        self.view.scroll_requests.clear();
        // unload resets the scroll position
        self.request_scroll(0.0, false);
        self.initialized = false;
        log::info!("page teardown at {}ms", self.now);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        if !self.initialized {
            log::debug!("ignoring {:?} before init", event);
            return;
        }
        log::debug!("t={}ms dispatch {:?}", self.now, event);
        match event {
            PageEvent::Load => self.on_load(),
            PageEvent::Layout(layout) => {
                self.layout = layout;
                self.update_reveals();
            }
            PageEvent::Scroll { y } => self.on_scroll(y),
            PageEvent::HamburgerClick => self.view.menu_open = !self.view.menu_open,
            PageEvent::NavLinkClick(index) => self.on_nav_link(index),
            PageEvent::BackToTopClick => self.request_scroll(0.0, true),
            PageEvent::Input { field, value } => self.form.set_value(field, value),
            PageEvent::Blur(field) => {
                self.form.validate_field(field);
            }
            PageEvent::Submit => self.on_submit(),
            PageEvent::NotificationClose => self.hide_notification(),
            PageEvent::ProjectCardClick { index, on_links } => {
                if !on_links {
                    self.open_modal(index);
                }
            }
            PageEvent::ModalClose | PageEvent::ModalBackdropClick => self.close_modal(),
            PageEvent::KeyDown(key) => {
                if key == "Escape" {
                    self.close_modal();
                }
            }
            PageEvent::ThemeToggle => self.toggle_theme(),
        }
    }

    /// Move the clock to `now`, firing every timer due on the way.
    pub fn advance_to(&mut self, now: u64) {
        while let Some((due, timer)) = self.timers.pop_due(now) {
            self.now = self.now.max(due);
            self.fire(timer);
        }
        self.now = self.now.max(now);
    }

    pub fn advance_by(&mut self, ms: u64) {
        self.advance_to(self.now + ms);
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Deadline of the next pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn binding(&self) -> &PageBinding {
        &self.binding
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn platform(&self) -> &dyn PlatformApi {
        self.platform.as_ref()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.flow.state()
    }

    /// Hand pending scroll requests to the host.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.view.scroll_requests)
    }

    /// Validate one field as a blur would. Returns whether it passed.
    pub fn validate_field(&mut self, field: Field) -> bool {
        self.form.validate_field(field)
    }

    /// Validate the whole form. Returns whether every field passed.
    pub fn validate_form(&mut self) -> bool {
        self.form.validate_form()
    }

    fn schedule_in(&mut self, delay_ms: u64, timer: Timer) {
        self.timers.schedule(self.now + delay_ms, timer);
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::ResetScroll => self.request_scroll(0.0, false),
            Timer::InitialActiveLink => self.update_active_link(),
            Timer::ActiveLink { generation } => {
                if self.debounce.fire(generation) {
                    self.update_active_link();
                }
            }
            Timer::RevealNotification(id) => {
                if let Some(n) = self.view.notification.as_mut().filter(|n| n.id == id) {
                    n.shown = true;
                }
            }
            Timer::HideNotification(id) => {
                if self.view.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.hide_notification();
                }
            }
            Timer::RemoveNotification(id) => {
                if self.view.notification.as_ref().is_some_and(|n| n.id == id) {
                    self.view.notification = None;
                }
            }
            Timer::RevealModal(id) => {
                if let Some(m) = self.view.modal.as_mut().filter(|m| m.id == id && !m.closing) {
                    m.shown = true;
                }
            }
            Timer::RemoveModal(id) => {
                if self.view.modal.as_ref().is_some_and(|m| m.id == id) {
                    self.view.modal = None;
                }
            }
            Timer::TypeNext => self.type_next(),
            Timer::Delivered(outcome) => self.on_delivered(outcome),
        }
    }

    fn request_scroll(&mut self, top: f64, smooth: bool) {
        self.view.scroll_requests.push(ScrollRequest { top, smooth });
    }

    fn on_load(&mut self) {
        self.schedule_in(50, Timer::ResetScroll);
        let scope = self.config.service_worker_scope.clone();
        let script = self.config.service_worker_script.clone();
        match self.platform.service_worker_manager().register(&scope, &script) {
            Ok(reg) => log::info!("SW registered: {} (scope {})", reg.script_url, reg.scope),
            Err(e) => log::warn!("SW registration failed: {}", e),
        }
    }

    // Navigation

    fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        self.view.navbar_scrolled = y > self.config.navbar_scrolled_after;
        self.view.back_to_top_visible = y > self.config.back_to_top_after;
        self.update_reveals();
        let (due, generation) = self.debounce.trigger(self.now);
        self.timers.schedule(due, Timer::ActiveLink { generation });
    }

    fn update_active_link(&mut self) {
        match nav::active_link(self.scroll_y, &self.layout.sections, self.config.tracker()) {
            ActiveLink::Home => self.view.active_link = Some(self.binding.home_link),
            ActiveLink::Section(id) => self.view.active_link = self.binding.link_for_section(id),
            ActiveLink::Unchanged => {}
        }
    }

    fn on_nav_link(&mut self, index: usize) {
        self.view.menu_open = false;
        let Some(link) = self.binding.nav_links.get(index) else {
            log::warn!("nav link {} does not exist", index);
            return;
        };
        let top = self
            .layout
            .sections
            .iter()
            .find(|s| s.id == link.target)
            .map(|s| s.extent.top);
        if let Some(top) = top {
            self.request_scroll(nav::scroll_target(top, self.config.nav_scroll_offset), true);
        }
    }

    fn update_reveals(&mut self) {
        let cfg = &self.config;
        for (revealed, extent) in self.view.revealed.iter_mut().zip(&self.layout.animated) {
            if !*revealed
                && nav::is_revealed(
                    *extent,
                    self.scroll_y,
                    self.layout.viewport_height,
                    cfg.fade_bottom_margin,
                    cfg.fade_threshold,
                )
            {
                *revealed = true;
            }
        }
    }

    // Contact form

    fn on_submit(&mut self) {
        if self.view.submit_button.disabled {
            log::debug!("submit ignored: control disabled");
            return;
        }
        if self.flow.apply(FlowEvent::Submit).is_none() {
            return;
        }
        let valid = self.form.validate_form();
        self.flow.apply(FlowEvent::Validated(valid));
        if !valid {
            self.show_notification(MSG_INVALID_FORM, NotificationKind::Error);
            self.flow.apply(FlowEvent::Settle);
            return;
        }

        self.view.submit_button.disabled = true;
        self.view.submit_button.loading = true;
        let delivery = self.transport.send(&self.form.message());
        log::info!("contact form submitted; delivery due in {}ms", delivery.after_ms);
        self.schedule_in(delivery.after_ms, Timer::Delivered(delivery.outcome));
    }

    fn on_delivered(&mut self, outcome: std::result::Result<(), DeliveryError>) {
        let ok = outcome.is_ok();
        if self.flow.apply(FlowEvent::Delivered(ok)).is_none() {
            return;
        }
        match outcome {
            Ok(()) => {
                self.show_notification(MSG_SENT, NotificationKind::Success);
                self.form.reset();
            }
            Err(e) => {
                log::warn!("contact form {}", e);
                self.show_notification(MSG_SEND_FAILED, NotificationKind::Error);
            }
        }
        self.view.submit_button.disabled = false;
        self.view.submit_button.loading = false;
        self.flow.apply(FlowEvent::Settle);
    }

    // Notifications and modals

    /// Replace any current notification with a new one.
    pub fn show_notification(&mut self, message: &str, kind: NotificationKind) {
        let id = self.next_id();
        self.view.notification = Some(Notification {
            id,
            message: message.to_string(),
            kind,
            shown: false,
        });
        self.schedule_in(self.config.reveal_delay_ms, Timer::RevealNotification(id));
        self.schedule_in(self.config.notification_lifetime_ms, Timer::HideNotification(id));
    }

    fn hide_notification(&mut self) {
        let Some(n) = self.view.notification.as_mut() else {
            return;
        };
        n.shown = false;
        let id = n.id;
        self.schedule_in(self.config.transition_ms, Timer::RemoveNotification(id));
    }

    fn open_modal(&mut self, index: usize) {
        let Some(card) = self.binding.projects.get(index).cloned() else {
            log::warn!("project card {} does not exist", index);
            return;
        };
        let id = self.next_id();
        self.view.modal = Some(Modal {
            id,
            title: card.title,
            description: card.description,
            tech: card.tech,
            shown: false,
            closing: false,
        });
        self.schedule_in(self.config.reveal_delay_ms, Timer::RevealModal(id));
    }

    fn close_modal(&mut self) {
        let Some(m) = self.view.modal.as_mut().filter(|m| !m.closing) else {
            return;
        };
        m.shown = false;
        m.closing = true;
        let id = m.id;
        self.schedule_in(self.config.transition_ms, Timer::RemoveModal(id));
    }

    // Theme

    fn load_theme(&mut self) {
        let stored = self.platform.storage().get(&self.config.theme_storage_key);
        self.view.theme = if stored.as_deref() == Some("true") {
            Theme::Dark
        } else {
            Theme::Light
        };
    }

    fn toggle_theme(&mut self) {
        self.view.theme = self.view.theme.toggled();
        let value = if self.view.theme.is_dark() { "true" } else { "false" };
        self.platform.storage().set(&self.config.theme_storage_key, value);
    }

    // Typing effect

    fn start_typing(&mut self) {
        if !self.binding.has_typing_target {
            return;
        }
        self.view.headline = Some(String::new());
        self.typed = 0;
        self.schedule_in(self.config.typing_start_ms, Timer::TypeNext);
    }

    fn type_next(&mut self) {
        let Some(next) = self.config.typing_text.chars().nth(self.typed) else {
            return;
        };
        if let Some(headline) = self.view.headline.as_mut() {
            headline.push(next);
        }
        self.typed += 1;
        if self.typed < self.config.typing_text.chars().count() {
            self.schedule_in(self.config.typing_interval_ms, Timer::TypeNext);
        }
    }

    // Placeholder images

    #[cfg(feature = "render")]
    fn create_placeholder_images(&mut self) {
        for slot in self.binding.images.iter().filter(|s| !s.has_source) {
            match crate::rendering::card::fallback_data_url(slot.label, slot.color) {
                Ok(src) => self.view.images.push(crate::view::FilledImage {
                    selector: slot.selector.to_string(),
                    src,
                }),
                Err(e) => log::warn!("placeholder for {} failed: {}", slot.selector, e),
            }
        }
    }

    #[cfg(not(feature = "render"))]
    fn create_placeholder_images(&mut self) {}
}
