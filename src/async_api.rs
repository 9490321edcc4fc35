//! Async facade: a worker thread owning one page controller.

use crate::controller::{PageController, PageEvent};
use crate::form::ContactForm;
use crate::submit::SubmissionState;
use crate::view::{ScrollRequest, ViewState};
use crate::{Error, Result};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

enum Command {
    Dispatch(PageEvent, oneshot::Sender<()>),
    Snapshot(oneshot::Sender<PageSnapshot>),
    TakeScrolls(oneshot::Sender<Vec<ScrollRequest>>),
    Close(oneshot::Sender<()>),
}

/// Copy of the page state at one instant
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// Controller clock when the snapshot was taken (ms)
    pub now: u64,
    pub view: ViewState,
    pub form: ContactForm,
    pub submission: SubmissionState,
}

/// An async-friendly page backed by a dedicated worker thread.
///
/// The worker owns the [`PageController`] and advances its clock from wall
/// time, so debounces, notification lifetimes and simulated delivery latency
/// elapse in real time while callers only exchange messages with it.
#[derive(Clone)]
pub struct PageRuntime {
    cmd_tx: Sender<Command>,
}

impl PageRuntime {
    /// Start the worker. The controller is initialized there if it has not
    /// been already.
    pub async fn start(page: PageController) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<()>();

        thread::Builder::new()
            .name("page-runtime".into())
            .spawn(move || worker_loop(page, cmd_rx, init_tx))
            .map_err(Error::Io)?;

        init_rx.await.map_err(|_| Error::RuntimeClosed)?;
        Ok(Self { cmd_tx })
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx.send(make(tx)).map_err(|_| Error::RuntimeClosed)?;
        rx.await.map_err(|_| Error::RuntimeClosed)
    }

    /// Deliver one DOM event to the page
    pub async fn dispatch(&self, event: PageEvent) -> Result<()> {
        self.request(|tx| Command::Dispatch(event, tx)).await
    }

    pub async fn snapshot(&self) -> Result<PageSnapshot> {
        self.request(Command::Snapshot).await
    }

    /// Scroll requests raised since the last call
    pub async fn take_scroll_requests(&self) -> Result<Vec<ScrollRequest>> {
        self.request(Command::TakeScrolls).await
    }

    /// Tear the page down and stop the worker. Other clones see
    /// [`Error::RuntimeClosed`] afterwards.
    pub async fn close(self) -> Result<()> {
        self.request(Command::Close).await
    }
}

fn worker_loop(mut page: PageController, cmd_rx: mpsc::Receiver<Command>, init_tx: oneshot::Sender<()>) {
    if !page.is_initialized() {
        page.init();
    }
    let base = page.now();
    let started = Instant::now();
    let clock = move || base + started.elapsed().as_millis() as u64;
    let _ = init_tx.send(());

    loop {
        page.advance_to(clock());
        let cmd = match page.next_deadline() {
            Some(due) => {
                let wait = Duration::from_millis(due.saturating_sub(clock()));
                match cmd_rx.recv_timeout(wait) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match cmd_rx.recv() {
                Ok(cmd) => cmd,
                Err(_) => break,
            },
        };
        page.advance_to(clock());

        match cmd {
            Command::Dispatch(event, resp) => {
                page.dispatch(event);
                let _ = resp.send(());
            }
            Command::Snapshot(resp) => {
                let _ = resp.send(PageSnapshot {
                    now: page.now(),
                    view: page.view().clone(),
                    form: page.form().clone(),
                    submission: page.submission_state(),
                });
            }
            Command::TakeScrolls(resp) => {
                let _ = resp.send(page.take_scroll_requests());
            }
            Command::Close(resp) => {
                page.teardown();
                let _ = resp.send(());
                return;
            }
        }
    }
    log::debug!("page runtime handles dropped; stopping worker");
    page.teardown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{FormGroupBinding, NavLink};
    use crate::form::{ContactMessage, Field};
    use crate::platform::HeadlessPlatform;
    use crate::submit::{Delivery, Transport};
    use crate::view::NotificationKind;
    use crate::{PageBinding, PageConfig};

    struct InstantOk;

    impl Transport for InstantOk {
        fn send(&mut self, _message: &ContactMessage) -> Delivery {
            Delivery {
                after_ms: 20,
                outcome: Ok(()),
            }
        }
    }

    fn page() -> PageController {
        let binding = PageBinding {
            nav_links: vec![NavLink { target: "home".into() }],
            home_link: 0,
            sections: vec!["home".into()],
            form_groups: Field::ALL.map(|field| FormGroupBinding {
                field,
                has_error_slot: true,
            }),
            projects: Vec::new(),
            animated: Vec::new(),
            has_typing_target: false,
            images: Vec::new(),
        };
        PageController::new(
            binding,
            PageConfig::default(),
            Box::new(HeadlessPlatform::new()),
            Box::new(InstantOk),
        )
        .unwrap()
    }

    async fn wait_for(rt: &PageRuntime, pred: impl Fn(&PageSnapshot) -> bool) -> PageSnapshot {
        for _ in 0..200 {
            let snap = rt.snapshot().await.unwrap();
            if pred(&snap) {
                return snap;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn submission_completes_in_wall_time() {
        let rt = PageRuntime::start(page()).await.unwrap();
        for (field, value) in Field::ALL.into_iter().zip(["Ada", "ada@example.com", "Hello", "Nice to meet you"]) {
            rt.dispatch(PageEvent::Input {
                field,
                value: value.into(),
            })
            .await
            .unwrap();
        }
        rt.dispatch(PageEvent::Submit).await.unwrap();

        let snap = wait_for(&rt, |s| s.submission == SubmissionState::Idle && s.view.notification.is_some()).await;
        assert_eq!(snap.view.notification.unwrap().kind, NotificationKind::Success);
        assert_eq!(snap.form.value(Field::Name), "");
        assert!(!snap.view.submit_button.disabled);
        rt.close().await.unwrap();
    }

    #[tokio::test]
    async fn init_timers_fire_in_wall_time() {
        let rt = PageRuntime::start(page()).await.unwrap();
        let snap = wait_for(&rt, |s| s.view.active_link.is_some()).await;
        assert_eq!(snap.view.active_link, Some(0));
        assert_eq!(
            rt.take_scroll_requests().await.unwrap(),
            vec![ScrollRequest { top: 0.0, smooth: false }]
        );
        rt.close().await.unwrap();
    }

    #[tokio::test]
    async fn closed_runtime_reports_closed() {
        let rt = PageRuntime::start(page()).await.unwrap();
        let other = rt.clone();
        rt.close().await.unwrap();
        assert!(matches!(other.snapshot().await, Err(Error::RuntimeClosed)));
    }
}
