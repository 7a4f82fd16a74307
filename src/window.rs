//! The top-level window and its host primitive.

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{Window as WinitWindow, WindowId};

use crate::environment::ScreenConfiguration;
use crate::error::{FrameError, Result};
use crate::lifecycle::LifecycleEvent;
use crate::listener::WindowListener;
use crate::types::{Point, Size};

/// Window primitive supplied by the host windowing system.
///
/// Dropping the value releases the host resources.
pub trait HostWindow {
    fn set_size(&mut self, size: Size);
    fn set_location(&mut self, location: Point);
    fn set_visible(&mut self, visible: bool);

    /// Whether the window is minimized, if the platform can tell.
    fn is_minimized(&self) -> Option<bool> {
        None
    }
}

impl HostWindow for WinitWindow {
    fn set_size(&mut self, size: Size) {
        // The platform may apply the size asynchronously and report it via Resized
        let _ = self.request_inner_size(LogicalSize::new(size.width, size.height));
    }

    fn set_location(&mut self, location: Point) {
        self.set_outer_position(LogicalPosition::new(location.x, location.y));
    }

    fn set_visible(&mut self, visible: bool) {
        WinitWindow::set_visible(self, visible);
    }

    fn is_minimized(&self) -> Option<bool> {
        WinitWindow::is_minimized(self)
    }
}

/// Where a [`Frame`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Created, geometry incomplete.
    Hidden,
    /// Size and location set, not visible.
    Configured,
    /// Visible on screen.
    Shown,
    /// Resources released; every further call fails.
    Disposed,
}

/// A top-level window.
///
/// Wraps the host window together with the geometry requested for it and the
/// listeners registered on it. The frame must be sized and positioned before
/// it can be shown, and once disposed it rejects all further configuration.
pub struct Frame<W: HostWindow> {
    host: Option<W>,
    configuration: ScreenConfiguration,
    size: Option<Size>,
    location: Option<Point>,
    visible: bool,
    listeners: Vec<Box<dyn WindowListener<W>>>,
}

impl<W: HostWindow> Frame<W> {
    /// Wrap a freshly created, hidden host window.
    pub fn new(host: W, configuration: ScreenConfiguration) -> Self {
        Self {
            host: Some(host),
            configuration,
            size: None,
            location: None,
            visible: false,
            listeners: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FrameState {
        if self.host.is_none() {
            FrameState::Disposed
        } else if self.visible {
            FrameState::Shown
        } else if self.size.is_some() && self.location.is_some() {
            FrameState::Configured
        } else {
            FrameState::Hidden
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.host.is_none()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn location(&self) -> Option<Point> {
        self.location
    }

    /// Configuration of the screen device this frame was created for.
    pub fn configuration(&self) -> &ScreenConfiguration {
        &self.configuration
    }

    /// The host window, until the frame is disposed.
    pub fn host(&self) -> Option<&W> {
        self.host.as_ref()
    }

    /// Set the size in logical units. Not checked against the screen bounds.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        let host = self.host.as_mut().ok_or(FrameError::Disposed)?;
        let size = Size::new(width, height);
        host.set_size(size);
        self.size = Some(size);
        Ok(())
    }

    /// Move the frame's origin to `location`.
    pub fn set_location(&mut self, location: Point) -> Result<()> {
        let host = self.host.as_mut().ok_or(FrameError::Disposed)?;
        host.set_location(location);
        self.location = Some(location);
        Ok(())
    }

    /// Show or hide the frame.
    ///
    /// Showing requires both size and location to have been set.
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        if self.host.is_none() {
            return Err(FrameError::Disposed);
        }
        if visible && (self.size.is_none() || self.location.is_none()) {
            return Err(FrameError::NotConfigured);
        }
        if let Some(host) = self.host.as_mut() {
            host.set_visible(visible);
        }
        self.visible = visible;
        Ok(())
    }

    /// Release the host window.
    ///
    /// Fails with [`FrameError::Disposed`] when called a second time.
    pub fn dispose(&mut self) -> Result<()> {
        let host = self.host.take().ok_or(FrameError::Disposed)?;
        drop(host);
        self.visible = false;
        log::debug!("Frame disposed");
        Ok(())
    }

    /// Register a lifecycle listener.
    pub fn add_window_listener(&mut self, listener: impl WindowListener<W> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every registered listener in registration order.
    ///
    /// Listeners get mutable access to this frame, so the listener list is
    /// detached while they run. Listeners registered during dispatch are kept
    /// but only see later events.
    pub fn dispatch(&mut self, event: LifecycleEvent) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            event.deliver(listener.as_mut(), self);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

impl Frame<WinitWindow> {
    /// Id of the host window, until the frame is disposed.
    pub fn window_id(&self) -> Option<WindowId> {
        self.host.as_ref().map(WinitWindow::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyCall, DummyEnvironment, DummyWindow};
    use crate::environment::DisplayEnvironment;

    fn new_frame(env: &DummyEnvironment) -> Frame<DummyWindow> {
        let device = env.default_screen_device().unwrap();
        let host = env.create_window(&device.default_configuration, "test").unwrap();
        Frame::new(host, device.default_configuration)
    }

    #[test]
    fn test_state_progression() {
        let env = DummyEnvironment::new();
        let mut frame = new_frame(&env);
        assert_eq!(frame.state(), FrameState::Hidden);
        assert_eq!(
            frame.configuration(),
            &DummyEnvironment::default_screen().default_configuration
        );

        frame.set_size(100, 100).unwrap();
        assert_eq!(frame.state(), FrameState::Hidden);

        frame.set_location(Point::new(960, 540)).unwrap();
        assert_eq!(frame.state(), FrameState::Configured);

        frame.set_visible(true).unwrap();
        assert_eq!(frame.state(), FrameState::Shown);
        assert!(frame.is_visible());

        frame.dispose().unwrap();
        assert_eq!(frame.state(), FrameState::Disposed);
        assert!(!frame.is_visible());
    }

    #[test]
    fn test_show_requires_geometry() {
        let env = DummyEnvironment::new();
        let mut frame = new_frame(&env);

        assert!(matches!(frame.set_visible(true), Err(FrameError::NotConfigured)));
        frame.set_size(100, 100).unwrap();
        assert!(matches!(frame.set_visible(true), Err(FrameError::NotConfigured)));

        // Hiding an unconfigured frame is harmless
        frame.set_visible(false).unwrap();
        assert!(!env.calls().contains(&DummyCall::SetVisible(1, true)));
    }

    #[test]
    fn test_size_larger_than_screen_is_accepted() {
        let env = DummyEnvironment::new();
        let mut frame = new_frame(&env);

        frame.set_size(100_000, 100_000).unwrap();
        assert_eq!(frame.size(), Some(Size::new(100_000, 100_000)));
    }

    /// Records every event it sees under its own name.
    struct Recorder {
        name: &'static str,
        seen: std::sync::Arc<parking_lot::Mutex<Vec<(&'static str, LifecycleEvent)>>>,
        dispose_on_closing: bool,
        register_on_opened: bool,
    }

    impl Recorder {
        fn record(&self, event: LifecycleEvent) {
            self.seen.lock().push((self.name, event));
        }
    }

    impl WindowListener<DummyWindow> for Recorder {
        fn window_opened(&mut self, frame: &mut Frame<DummyWindow>) {
            self.record(LifecycleEvent::Opened);
            if self.register_on_opened {
                frame.add_window_listener(Recorder {
                    name: "late",
                    seen: self.seen.clone(),
                    dispose_on_closing: false,
                    register_on_opened: false,
                });
            }
        }

        fn window_closing(&mut self, frame: &mut Frame<DummyWindow>) {
            self.record(LifecycleEvent::Closing);
            if self.dispose_on_closing {
                frame.dispose().unwrap();
            }
        }
    }

    #[test]
    fn test_dispatch_with_listeners_changing_frame() {
        let env = DummyEnvironment::new();
        let mut frame = new_frame(&env);
        let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        frame.add_window_listener(Recorder {
            name: "first",
            seen: seen.clone(),
            dispose_on_closing: true,
            register_on_opened: true,
        });
        frame.add_window_listener(Recorder {
            name: "second",
            seen: seen.clone(),
            dispose_on_closing: false,
            register_on_opened: false,
        });

        // A listener added during dispatch does not see the current event
        frame.dispatch(LifecycleEvent::Opened);
        assert_eq!(frame.listener_count(), 3);

        // The second listener still gets Closing after the first disposed
        frame.dispatch(LifecycleEvent::Closing);
        assert!(frame.is_disposed());

        assert_eq!(
            *seen.lock(),
            vec![
                ("first", LifecycleEvent::Opened),
                ("second", LifecycleEvent::Opened),
                ("first", LifecycleEvent::Closing),
                ("second", LifecycleEvent::Closing),
                ("late", LifecycleEvent::Closing),
            ]
        );
        assert_eq!(env.released_windows(), 1);
    }

    #[test]
    fn test_disposed_frame_rejects_calls() {
        let env = DummyEnvironment::new();
        let mut frame = new_frame(&env);
        frame.set_size(100, 100).unwrap();
        frame.set_location(Point::new(0, 0)).unwrap();
        frame.set_visible(true).unwrap();
        frame.dispose().unwrap();

        assert!(matches!(frame.set_visible(true), Err(FrameError::Disposed)));
        assert!(matches!(frame.set_size(10, 10), Err(FrameError::Disposed)));
        assert!(matches!(frame.set_location(Point::new(1, 1)), Err(FrameError::Disposed)));
        assert!(matches!(frame.dispose(), Err(FrameError::Disposed)));

        assert_eq!(frame.size(), Some(Size::new(100, 100)));
        assert!(frame.host().is_none());
        assert_eq!(env.count(|call| matches!(call, DummyCall::Released(_))), 1);
    }
}
