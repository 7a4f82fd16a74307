//! Error types.

use thiserror::Error;
use winit::error::EventLoopError;

/// Errors raised while discovering the display environment or driving the window.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The platform graphics subsystem could not be reached.
    #[error("graphics subsystem unavailable: {0}")]
    EnvironmentUnavailable(String),
    /// The environment reported no default screen device.
    #[error("no default screen device available")]
    NoScreenDevice,
    /// The environment could not report a center point.
    #[error("display environment reported no center point")]
    NoCenterPoint,
    /// The host windowing system refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),
    /// The window was shown before its size and location were set.
    #[error("window must be sized and positioned before it is shown")]
    NotConfigured,
    /// The window has already been disposed.
    #[error("window has been disposed")]
    Disposed,
    /// The event loop failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrameError>;
