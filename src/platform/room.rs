//! Secondary room window
//!
//! Opening the room hands back a `RoomWatch`: the receiving end of a channel
//! fed by a background task that polls the window. The watch is cancelled
//! when dropped, which stops the task at its next poll.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Message from a room watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSignal {
    /// The secondary window is gone
    Closed,
}

/// Failure to open the secondary window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The browser refused to open a window (popup blocker)
    Blocked,
    /// No browsing context to open from
    NoWindow,
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "secondary window was blocked"),
            Self::NoWindow => write!(f, "no browser window available"),
        }
    }
}

impl std::error::Error for RoomError {}

/// Receiving side, held by the session while the room is open
#[derive(Debug)]
pub struct RoomWatch {
    rx: Receiver<RoomSignal>,
    cancelled: Arc<AtomicBool>,
}

impl RoomWatch {
    /// Non-blocking check for a signal.
    ///
    /// A watcher that went away without reporting counts as closed, since
    /// the window can no longer be observed.
    pub fn poll(&self) -> Option<RoomSignal> {
        match self.rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(RoomSignal::Closed),
        }
    }

    /// Ask the watcher task to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for RoomWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Sending side, owned by the background task polling the window
#[derive(Debug)]
pub struct RoomWatcher {
    tx: Sender<RoomSignal>,
    cancelled: Arc<AtomicBool>,
}

impl RoomWatcher {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Report closure. Consumes the watcher, so at most one signal is sent.
    pub fn notify_closed(self) {
        let _ = self.tx.send(RoomSignal::Closed);
    }
}

/// Create a connected watcher/watch pair
pub fn watch_channel() -> (RoomWatcher, RoomWatch) {
    let (tx, rx) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    (
        RoomWatcher {
            tx,
            cancelled: cancelled.clone(),
        },
        RoomWatch { rx, cancelled },
    )
}

/// Opens the secondary room and exposes the main window's query string
pub trait RoomPortal {
    /// Open `url` in a new window and start watching it
    fn open(&mut self, url: &str) -> Result<RoomWatch, RoomError>;

    /// Current query string of the main window (e.g. `"?currency=40"`)
    fn query(&self) -> String;
}

/// Portal driven by hand: used natively and in tests
#[derive(Debug, Default)]
pub struct ManualPortal {
    /// Every URL opened, in order
    pub opened: Vec<String>,
    query: String,
    blocked: bool,
    watcher: Option<RoomWatcher>,
}

impl ManualPortal {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Make subsequent opens fail as if a popup blocker intervened
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn is_room_live(&self) -> bool {
        self.watcher.as_ref().is_some_and(|w| !w.is_cancelled())
    }

    /// Close the room window. Returns false if none is open.
    pub fn close_room(&mut self) -> bool {
        match self.watcher.take() {
            Some(watcher) => {
                watcher.notify_closed();
                true
            }
            None => false,
        }
    }
}

impl RoomPortal for ManualPortal {
    fn open(&mut self, url: &str) -> Result<RoomWatch, RoomError> {
        if self.blocked {
            return Err(RoomError::Blocked);
        }
        let (watcher, watch) = watch_channel();
        self.watcher = Some(watcher);
        self.opened.push(url.to_string());
        Ok(watch)
    }

    fn query(&self) -> String {
        self.query.clone()
    }
}

/// Portal backed by `window.open` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserPortal;

#[cfg(target_arch = "wasm32")]
impl RoomPortal for BrowserPortal {
    fn open(&mut self, url: &str) -> Result<RoomWatch, RoomError> {
        let window = web_sys::window().ok_or(RoomError::NoWindow)?;
        let room = window
            .open_with_url_and_target(url, "_blank")
            .ok()
            .flatten()
            .ok_or(RoomError::Blocked)?;

        let (watcher, watch) = watch_channel();
        wasm_bindgen_futures::spawn_local(watch_window(room, watcher));
        Ok(watch)
    }

    fn query(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }
}

/// Whether a poll means the room is gone: no timer could be set, or the
/// window is closed or can no longer be queried
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn room_gone(scheduled: bool, closed: Option<bool>) -> bool {
    !scheduled || closed.unwrap_or(true)
}

/// Poll the room window until it closes or the watch is cancelled
#[cfg(target_arch = "wasm32")]
async fn watch_window(room: web_sys::Window, watcher: RoomWatcher) {
    loop {
        let scheduled = sleep_ms(crate::consts::ROOM_POLL_MS).await;
        if watcher.is_cancelled() {
            return;
        }
        if room_gone(scheduled, room.closed().ok()) {
            log::info!("Room window closed");
            watcher.notify_closed();
            return;
        }
    }
}

/// Wait `ms` on the browser clock. Returns false at once if no timer can be set.
#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: i32) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let mut scheduled = true;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .is_err()
        {
            scheduled = false;
            let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    scheduled
}
