//! Window lifecycle events.
//!
//! The host windowing system reports raw [`HostSignal`]s. [`LifecycleTracker`]
//! turns them into the seven [`LifecycleEvent`]s a [`WindowListener`] sees, and
//! [`FrameDriver`] delivers those to a frame and applies the close contract:
//! a close request only succeeds if a listener disposes the frame while
//! handling [`LifecycleEvent::Closing`].

use std::fmt;

use crate::listener::WindowListener;
use crate::window::{Frame, HostWindow};

/// A lifecycle notification delivered to window listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Opened,
    Closing,
    Closed,
    Iconified,
    Deiconified,
    Activated,
    Deactivated,
}

impl LifecycleEvent {
    /// Every event, in declaration order.
    pub const ALL: [LifecycleEvent; 7] = [
        LifecycleEvent::Opened,
        LifecycleEvent::Closing,
        LifecycleEvent::Closed,
        LifecycleEvent::Iconified,
        LifecycleEvent::Deiconified,
        LifecycleEvent::Activated,
        LifecycleEvent::Deactivated,
    ];

    /// Callback name printed by the logging listener.
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::Opened => "windowOpened",
            LifecycleEvent::Closing => "windowClosing",
            LifecycleEvent::Closed => "windowClosed",
            LifecycleEvent::Iconified => "windowIconified",
            LifecycleEvent::Deiconified => "windowDeiconified",
            LifecycleEvent::Activated => "windowActivated",
            LifecycleEvent::Deactivated => "windowDeactivated",
        }
    }

    /// Call the listener method matching this event.
    pub fn deliver<W: HostWindow>(
        self,
        listener: &mut dyn WindowListener<W>,
        frame: &mut Frame<W>,
    ) {
        match self {
            LifecycleEvent::Opened => listener.window_opened(frame),
            LifecycleEvent::Closing => listener.window_closing(frame),
            LifecycleEvent::Closed => listener.window_closed(frame),
            LifecycleEvent::Iconified => listener.window_iconified(frame),
            LifecycleEvent::Deiconified => listener.window_deiconified(frame),
            LifecycleEvent::Activated => listener.window_activated(frame),
            LifecycleEvent::Deactivated => listener.window_deactivated(frame),
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw window notification from the host windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The window became visible for the first time.
    Shown,
    /// The user asked to close the window.
    CloseRequested,
    /// The host window is gone.
    Destroyed,
    /// Keyboard focus gained or lost.
    Focused(bool),
    /// Window minimized or restored.
    Minimized(bool),
}

/// Translates host signals into lifecycle events.
///
/// Focus and minimize signals only produce an event when the state actually
/// changes. `Opened` and `Closed` fire at most once, and nothing fires after
/// `Closed`.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    opened: bool,
    closed: bool,
    active: bool,
    iconified: bool,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn translate(&mut self, signal: HostSignal) -> Option<LifecycleEvent> {
        if self.closed {
            return None;
        }

        match signal {
            HostSignal::Shown => {
                if self.opened {
                    return None;
                }
                self.opened = true;
                Some(LifecycleEvent::Opened)
            }
            HostSignal::CloseRequested => Some(LifecycleEvent::Closing),
            HostSignal::Destroyed => {
                self.closed = true;
                Some(LifecycleEvent::Closed)
            }
            HostSignal::Focused(focused) => {
                if self.active == focused {
                    return None;
                }
                self.active = focused;
                Some(if focused {
                    LifecycleEvent::Activated
                } else {
                    LifecycleEvent::Deactivated
                })
            }
            HostSignal::Minimized(minimized) => {
                if self.iconified == minimized {
                    return None;
                }
                self.iconified = minimized;
                Some(if minimized {
                    LifecycleEvent::Iconified
                } else {
                    LifecycleEvent::Deiconified
                })
            }
        }
    }
}

/// Owns a frame and feeds it host signals.
pub struct FrameDriver<W: HostWindow> {
    frame: Frame<W>,
    tracker: LifecycleTracker,
}

impl<W: HostWindow> FrameDriver<W> {
    pub fn new(frame: Frame<W>) -> Self {
        Self {
            frame,
            tracker: LifecycleTracker::new(),
        }
    }

    pub fn frame(&self) -> &Frame<W> {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame<W> {
        &mut self.frame
    }

    pub fn into_frame(self) -> Frame<W> {
        self.frame
    }

    /// Whether `Closed` has been delivered.
    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Handle one host signal. Returns `true` once the window is closed.
    pub fn handle(&mut self, signal: HostSignal) -> bool {
        let Some(event) = self.tracker.translate(signal) else {
            return self.is_closed();
        };

        log::trace!("{:?} -> {}", signal, event);
        self.frame.dispatch(event);

        if event == LifecycleEvent::Closing {
            if self.frame.is_disposed() {
                if let Some(closed) = self.tracker.translate(HostSignal::Destroyed) {
                    self.frame.dispatch(closed);
                }
            } else {
                log::info!("Close request cancelled: window was not disposed");
            }
        }

        self.is_closed()
    }
}
