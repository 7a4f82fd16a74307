//! # AppFrame
//!
//! Opens one basic top-level window on the default screen and reports its
//! lifecycle on the console.
//!
//! ## Overview
//!
//! - [`DisplayEnvironment`] - Screen discovery, headless queries, window creation
//! - [`Frame`] - The window: sized, positioned, shown, disposed
//! - [`WindowListener`] - Callbacks for the seven lifecycle events
//! - [`bootstrap`] - The whole opening sequence
//! - [`App`] - Runs the bootstrap on a winit event loop
//! - [`DummyEnvironment`] - Display-less environment for tests
//!
//! ## Example
//!
//! ```ignore
//! use appframe::{App, AppArgs, DefaultAppArgs};
//!
//! fn main() -> appframe::Result<()> {
//!     let args = <DefaultAppArgs as AppArgs>::parse();
//!     App::run(args)
//! }
//! ```

pub mod app;
pub mod args;
pub mod bootstrap;
pub mod console;
pub mod dummy;
pub mod environment;
pub mod error;
pub mod lifecycle;
pub mod listener;
pub mod types;
pub mod window;

pub use app::{run_scripted, App};
pub use args::{AppArgs, DefaultAppArgs, EnvironmentKind};
pub use bootstrap::{bootstrap, BootstrapSettings};
pub use console::{CapturedConsole, Console, StdoutConsole};
pub use dummy::{DummyCall, DummyEnvironment, DummyWindow, DEMO_SCRIPT};
pub use environment::{
    is_headless, DisplayEnvironment, ScreenConfiguration, ScreenDevice, WinitEnvironment,
};
pub use error::{FrameError, Result};
pub use lifecycle::{FrameDriver, HostSignal, LifecycleEvent, LifecycleTracker};
pub use listener::{LoggingListener, WindowListener};
pub use types::{Point, Rect, Size};
pub use window::{Frame, FrameState, HostWindow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version.
pub fn init() {
    log::info!("AppFrame v{} initialized", VERSION);
}
