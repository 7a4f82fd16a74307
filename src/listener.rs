//! Window listener trait and the logging listener.

use std::sync::Arc;

use crate::console::{self, Console};
use crate::lifecycle::LifecycleEvent;
use crate::window::{Frame, HostWindow};

/// Callbacks for window lifecycle notifications.
///
/// Every method has an empty default, so implementors only override the
/// events they care about. Each callback receives the frame the listener is
/// registered on; that reference is the only way a listener reaches its frame.
///
/// # Close contract
///
/// A close request ([`window_closing`](Self::window_closing)) that leaves the
/// frame undisposed is cancelled by the host.
///
/// # Example
///
/// ```ignore
/// use appframe::{Frame, HostWindow, WindowListener};
///
/// struct CloseOnRequest;
///
/// impl<W: HostWindow> WindowListener<W> for CloseOnRequest {
///     fn window_closing(&mut self, frame: &mut Frame<W>) {
///         let _ = frame.dispose();
///     }
/// }
/// ```
pub trait WindowListener<W: HostWindow> {
    /// The window was shown for the first time.
    fn window_opened(&mut self, _frame: &mut Frame<W>) {}

    /// The user asked to close the window.
    fn window_closing(&mut self, _frame: &mut Frame<W>) {}

    /// The window was closed after being disposed.
    fn window_closed(&mut self, _frame: &mut Frame<W>) {}

    /// The window was minimized.
    fn window_iconified(&mut self, _frame: &mut Frame<W>) {}

    /// The window was restored from minimized.
    fn window_deiconified(&mut self, _frame: &mut Frame<W>) {}

    /// The window gained focus.
    fn window_activated(&mut self, _frame: &mut Frame<W>) {}

    /// The window lost focus.
    fn window_deactivated(&mut self, _frame: &mut Frame<W>) {}
}

/// Prints one `Called: <event>` line per callback and disposes the frame on
/// a close request.
pub struct LoggingListener {
    console: Arc<dyn Console>,
}

impl LoggingListener {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }

    fn report(&self, event: LifecycleEvent) {
        log::debug!("Lifecycle event: {}", event);
        self.console.print_line(&console::called(event.name()));
    }
}

impl<W: HostWindow> WindowListener<W> for LoggingListener {
    fn window_opened(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Opened);
    }

    fn window_closing(&mut self, frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Closing);
        if let Err(e) = frame.dispose() {
            log::warn!("Failed to dispose window on close request: {}", e);
        }
    }

    fn window_closed(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Closed);
    }

    fn window_iconified(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Iconified);
    }

    fn window_deiconified(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Deiconified);
    }

    fn window_activated(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Activated);
    }

    fn window_deactivated(&mut self, _frame: &mut Frame<W>) {
        self.report(LifecycleEvent::Deactivated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CapturedConsole;
    use crate::dummy::{DummyEnvironment, DummyWindow};
    use crate::environment::DisplayEnvironment;

    fn frame_with_listener(env: &DummyEnvironment, console: &CapturedConsole) -> Frame<DummyWindow> {
        let device = env.default_screen_device().unwrap();
        let host = env.create_window(&device.default_configuration, "test").unwrap();
        let mut frame = Frame::new(host, device.default_configuration);
        frame.add_window_listener(LoggingListener::new(Arc::new(console.clone())));
        frame
    }

    #[test]
    fn test_default_methods_do_nothing() {
        struct Silent;
        impl<W: HostWindow> WindowListener<W> for Silent {}

        let env = DummyEnvironment::new();
        let device = env.default_screen_device().unwrap();
        let host = env.create_window(&device.default_configuration, "test").unwrap();
        let mut frame = Frame::new(host, device.default_configuration);
        frame.add_window_listener(Silent);

        for event in LifecycleEvent::ALL {
            frame.dispatch(event);
        }
        assert!(!frame.is_disposed());
    }

    #[test]
    fn test_second_closing_does_not_dispose_again() {
        let env = DummyEnvironment::new();
        let console = CapturedConsole::new();
        let mut frame = frame_with_listener(&env, &console);

        frame.dispatch(LifecycleEvent::Closing);
        frame.dispatch(LifecycleEvent::Closing);

        assert!(frame.is_disposed());
        assert_eq!(console.count("Called: windowClosing"), 2);
        assert_eq!(env.released_windows(), 1);
    }
}
