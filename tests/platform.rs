use portfolio::controller::PageEvent;
use portfolio::platform::{
    HeadlessPlatform, InMemoryServiceWorkerManager, MemoryStorage, NoopServiceWorkerManager, PlatformApi,
    ServiceWorkerManager, Storage,
};
use portfolio::view::Theme;
use portfolio::{PageBinding, PageConfig, PageController, SimulatedTransport};

const PAGE: &str = include_str!("fixtures/index.html");

fn page_on(platform: HeadlessPlatform) -> PageController {
    let mut page = PageController::new(
        PageBinding::from_html(PAGE).unwrap(),
        PageConfig::default(),
        Box::new(platform),
        Box::new(SimulatedTransport::seeded(2000, 0.9, 1)),
    )
    .unwrap();
    page.init();
    page
}

#[test]
fn noop_worker_manager_refuses() {
    let m = NoopServiceWorkerManager::new();
    assert!(m.register("/", "/sw.js").is_err());
    assert!(m.unregister("/").is_ok());
    assert!(m.list_registrations().is_empty());
}

#[test]
fn memory_storage_roundtrip() {
    let s = MemoryStorage::new();
    assert_eq!(s.get("dark-theme"), None);
    s.set("dark-theme", "true");
    assert_eq!(s.get("dark-theme").as_deref(), Some("true"));
    s.remove("dark-theme");
    assert_eq!(s.get("dark-theme"), None);
}

#[test]
fn load_registers_the_offline_worker() {
    let mut page = page_on(HeadlessPlatform::new().with_service_workers(InMemoryServiceWorkerManager::new()));
    assert!(page.platform().service_worker_manager().list_registrations().is_empty());
    page.dispatch(PageEvent::Load);
    let regs = page.platform().service_worker_manager().list_registrations();
    assert_eq!(regs.len(), 1);
    assert_eq!(regs[0].scope, "/");
    assert_eq!(regs[0].script_url, "/sw.js");
}

#[test]
fn failed_registration_does_not_affect_the_page() {
    let mut page = page_on(HeadlessPlatform::new());
    page.dispatch(PageEvent::Load);
    page.dispatch(PageEvent::HamburgerClick);
    assert!(page.view().menu_open);
    assert!(page.view().notification.is_none());
}

#[test]
fn stored_theme_survives_a_reload() {
    let platform = HeadlessPlatform::new();
    let mut page = page_on(platform);
    assert_eq!(page.view().theme, Theme::Light);
    page.dispatch(PageEvent::ThemeToggle);
    let stored = page.platform().storage().get("dark-theme");
    assert_eq!(stored.as_deref(), Some("true"));

    // a fresh page over the same stored value starts dark
    let reloaded = page_on(
        HeadlessPlatform::new().with_storage(MemoryStorage::with_entries([("dark-theme", stored.unwrap())])),
    );
    assert_eq!(reloaded.view().theme, Theme::Dark);
    assert_eq!(reloaded.view().theme.toggle_icon(), "fa-sun");
}

#[test]
fn unexpected_stored_value_means_light() {
    let page = page_on(HeadlessPlatform::new().with_storage(MemoryStorage::with_entries([("dark-theme", "yes")])));
    assert_eq!(page.view().theme, Theme::Light);
}
