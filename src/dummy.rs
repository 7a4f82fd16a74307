//! In-process display environment without a real display.
//!
//! Used by the tests and by `--environment dummy` to run the whole bootstrap
//! and lifecycle without a windowing session. Every call made against the
//! environment and its windows is appended to a shared journal.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::environment::{DisplayEnvironment, ScreenConfiguration, ScreenDevice};
use crate::error::{FrameError, Result};
use crate::lifecycle::HostSignal;
use crate::types::{Point, Rect, Size};
use crate::window::HostWindow;

/// Signals replayed by `--environment dummy`: open, focus, minimize and
/// restore, lose focus, then close.
pub const DEMO_SCRIPT: [HostSignal; 6] = [
    HostSignal::Shown,
    HostSignal::Focused(true),
    HostSignal::Minimized(true),
    HostSignal::Minimized(false),
    HostSignal::Focused(false),
    HostSignal::CloseRequested,
];

/// One recorded call. Window calls carry the window id.
#[derive(Debug, Clone, PartialEq)]
pub enum DummyCall {
    IsHeadless,
    IsHeadlessInstance,
    ScreenDevices,
    DefaultScreenDevice,
    CenterPoint,
    CreateWindow(u64),
    SetSize(u64, Size),
    SetLocation(u64, Point),
    SetVisible(u64, bool),
    Released(u64),
}

type Journal = Arc<Mutex<Vec<DummyCall>>>;

/// Display environment backed by plain data.
pub struct DummyEnvironment {
    headless: bool,
    headless_instance: bool,
    screens: Vec<ScreenDevice>,
    center_point: Option<Point>,
    window_failure: Option<String>,
    next_window_id: AtomicU64,
    journal: Journal,
}

impl Default for DummyEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyEnvironment {
    /// One 1920x1080 screen, not headless.
    pub fn new() -> Self {
        Self {
            headless: false,
            headless_instance: false,
            screens: vec![Self::default_screen()],
            center_point: None,
            window_failure: None,
            next_window_id: AtomicU64::new(1),
            journal: Journal::default(),
        }
    }

    /// No screens, both headless flags set.
    pub fn headless() -> Self {
        Self {
            headless: true,
            headless_instance: true,
            screens: Vec::new(),
            ..Self::new()
        }
    }

    /// The screen used by [`new`](Self::new).
    pub fn default_screen() -> ScreenDevice {
        ScreenDevice {
            name: "DUMMY-0".to_string(),
            bounds: Rect::new(Point::new(0, 0), Size::new(1920, 1080)),
            default_configuration: ScreenConfiguration {
                resolution: Size::new(1920, 1080),
                scale_factor: 1.0,
                bit_depth: Some(32),
                refresh_rate_millihertz: Some(60_000),
            },
        }
    }

    /// Replace the screens; the first one becomes the default device.
    pub fn with_screens(mut self, screens: Vec<ScreenDevice>) -> Self {
        self.screens = screens;
        self
    }

    pub fn with_headless_flags(mut self, headless: bool, headless_instance: bool) -> Self {
        self.headless = headless;
        self.headless_instance = headless_instance;
        self
    }

    /// Report `point` as the center point instead of the default screen center.
    pub fn with_center_point(mut self, point: Point) -> Self {
        self.center_point = Some(point);
        self
    }

    /// Make window creation fail with `message`.
    pub fn with_window_failure(mut self, message: impl Into<String>) -> Self {
        self.window_failure = Some(message.into());
        self
    }

    /// Snapshot of the journal.
    pub fn calls(&self) -> Vec<DummyCall> {
        self.journal.lock().clone()
    }

    /// Number of journal entries matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DummyCall) -> bool) -> usize {
        self.journal.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn created_windows(&self) -> usize {
        self.count(|call| matches!(call, DummyCall::CreateWindow(_)))
    }

    pub fn released_windows(&self) -> usize {
        self.count(|call| matches!(call, DummyCall::Released(_)))
    }

    fn record(&self, call: DummyCall) {
        self.journal.lock().push(call);
    }
}

impl DisplayEnvironment for DummyEnvironment {
    type Window = DummyWindow;

    fn is_headless(&self) -> bool {
        self.record(DummyCall::IsHeadless);
        self.headless
    }

    fn is_headless_instance(&self) -> bool {
        self.record(DummyCall::IsHeadlessInstance);
        self.headless_instance
    }

    fn screen_devices(&self) -> Vec<ScreenDevice> {
        self.record(DummyCall::ScreenDevices);
        self.screens.clone()
    }

    fn default_screen_device(&self) -> Option<ScreenDevice> {
        self.record(DummyCall::DefaultScreenDevice);
        self.screens.first().cloned()
    }

    fn center_point(&self) -> Option<Point> {
        self.record(DummyCall::CenterPoint);
        self.center_point
            .or_else(|| self.screens.first().map(|screen| screen.bounds.center()))
    }

    fn create_window(&self, _configuration: &ScreenConfiguration, _title: &str) -> Result<DummyWindow> {
        if let Some(message) = &self.window_failure {
            return Err(FrameError::WindowCreation(message.clone()));
        }

        let id = self.next_window_id.fetch_add(1, Ordering::Relaxed);
        self.record(DummyCall::CreateWindow(id));
        Ok(DummyWindow {
            id,
            journal: Arc::clone(&self.journal),
        })
    }
}

/// Window created by [`DummyEnvironment`]. Dropping it records its release.
pub struct DummyWindow {
    id: u64,
    journal: Journal,
}

impl DummyWindow {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl HostWindow for DummyWindow {
    fn set_size(&mut self, size: Size) {
        self.journal.lock().push(DummyCall::SetSize(self.id, size));
    }

    fn set_location(&mut self, location: Point) {
        self.journal.lock().push(DummyCall::SetLocation(self.id, location));
    }

    fn set_visible(&mut self, visible: bool) {
        self.journal.lock().push(DummyCall::SetVisible(self.id, visible));
    }
}

impl Drop for DummyWindow {
    fn drop(&mut self) {
        self.journal.lock().push(DummyCall::Released(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_ids_increase() {
        let env = DummyEnvironment::new();
        let config = DummyEnvironment::default_screen().default_configuration;
        let first = env.create_window(&config, "a").unwrap();
        let second = env.create_window(&config, "b").unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(env.created_windows(), 2);
    }

    #[test]
    fn test_drop_records_release() {
        let env = DummyEnvironment::new();
        let config = DummyEnvironment::default_screen().default_configuration;
        let window = env.create_window(&config, "a").unwrap();
        drop(window);
        assert_eq!(env.calls(), vec![DummyCall::CreateWindow(1), DummyCall::Released(1)]);
    }

    #[test]
    fn test_headless_has_no_center() {
        let env = DummyEnvironment::headless();
        assert!(env.default_screen_device().is_none());
        assert!(env.center_point().is_none());
        assert!(env.is_headless());
        assert!(env.is_headless_instance());
    }

    #[test]
    fn test_window_failure() {
        let env = DummyEnvironment::new().with_window_failure("refused");
        let config = DummyEnvironment::default_screen().default_configuration;
        assert!(matches!(
            env.create_window(&config, "a"),
            Err(FrameError::WindowCreation(msg)) if msg == "refused"
        ));
        assert_eq!(env.created_windows(), 0);
    }
}
