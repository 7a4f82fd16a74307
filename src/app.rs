//! Application runner and event loop.
//!
//! # Threading
//!
//! winit runs its event loop on the main thread, and that thread doubles as
//! the event-dispatch thread. The bootstrap runs inside
//! [`ApplicationHandler::resumed`] because winit only creates windows there.
//! The resulting [`Frame`](crate::Frame) is moved into the [`App`] and from
//! then on is only touched from event loop callbacks, so listener callbacks,
//! including the dispose on a close request, always run on the thread that
//! owns the window. No locking is involved.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::args::{AppArgs, EnvironmentKind};
use crate::bootstrap::{bootstrap, report_headless_flags, BootstrapSettings};
use crate::console::{Console, StdoutConsole};
use crate::dummy::{DummyEnvironment, DEMO_SCRIPT};
use crate::environment::{is_headless, DisplayEnvironment, WinitEnvironment};
use crate::error::{FrameError, Result};
use crate::lifecycle::{FrameDriver, HostSignal};
use crate::window::HostWindow;

/// Runs the bootstrap on a winit event loop and forwards window events to the
/// lifecycle driver.
pub struct App<A: AppArgs> {
    args: A,
    console: Arc<dyn Console>,
    driver: Option<FrameDriver<Window>>,
    error: Option<FrameError>,
    bootstrapped: bool,
}

impl<A: AppArgs> App<A> {
    /// Create a new application.
    pub fn new(args: A, console: Arc<dyn Console>) -> Self {
        Self {
            args,
            console,
            driver: None,
            error: None,
            bootstrapped: false,
        }
    }

    /// Run the application with the given arguments.
    ///
    /// Initializes logging, then either opens the native window and blocks
    /// until it is closed, or replays [`DEMO_SCRIPT`] against the dummy
    /// environment.
    pub fn run(args: A) -> Result<()> {
        // RUST_LOG overrides the default filter
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();

        crate::init();

        let console: Arc<dyn Console> = Arc::new(StdoutConsole);
        match args.environment() {
            EnvironmentKind::Native => Self::run_native(args, console),
            EnvironmentKind::Dummy => {
                let env = DummyEnvironment::new();
                run_scripted(&env, &args.bootstrap_settings(), console, &DEMO_SCRIPT).map(|_| ())
            }
        }
    }

    /// Create the event loop and run until the window is closed.
    ///
    /// Failing to create the event loop means the graphics subsystem is
    /// unavailable, which is fatal. The headless flags are still printed
    /// first; without an event loop no monitor can be enumerated, so the
    /// instance flag is reported as `true`.
    pub fn run_native(args: A, console: Arc<dyn Console>) -> Result<()> {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => return Err(environment_unavailable(console.as_ref(), e.to_string())),
        };

        let mut app = Self::new(args, console);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Report the headless flags for an environment that could not be reached
/// and build the matching error.
fn environment_unavailable(console: &dyn Console, reason: String) -> FrameError {
    report_headless_flags(console, is_headless(), true);
    FrameError::EnvironmentUnavailable(reason)
}

/// Map a winit window event to a host signal.
///
/// `minimized` is the platform's answer to "is the window minimized", if it
/// has one. Occlusion alone also fires for covered windows, so it is only
/// used when the platform cannot tell.
fn host_signal(event: &WindowEvent, minimized: Option<bool>) -> Option<HostSignal> {
    match event {
        WindowEvent::CloseRequested => Some(HostSignal::CloseRequested),
        WindowEvent::Destroyed => Some(HostSignal::Destroyed),
        WindowEvent::Focused(focused) => Some(HostSignal::Focused(*focused)),
        WindowEvent::Occluded(occluded) => {
            Some(HostSignal::Minimized(minimized.unwrap_or(*occluded)))
        }
        WindowEvent::Resized(_) => minimized.map(HostSignal::Minimized),
        _ => None,
    }
}

impl<A: AppArgs> ApplicationHandler for App<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.bootstrapped {
            return;
        }
        self.bootstrapped = true;

        let env = WinitEnvironment::new(event_loop);
        match bootstrap(&env, &self.args.bootstrap_settings(), Arc::clone(&self.console)) {
            Ok(frame) => {
                let mut driver = FrameDriver::new(frame);
                driver.handle(HostSignal::Shown);
                self.driver = Some(driver);
            }
            Err(e) => {
                log::error!("Failed to open window: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        // A disposed frame has no id; late events for it are dropped
        if driver.frame().window_id() != Some(window_id) {
            return;
        }

        let minimized = match event {
            WindowEvent::Occluded(_) | WindowEvent::Resized(_) => {
                driver.frame().host().and_then(HostWindow::is_minimized)
            }
            _ => None,
        };

        if let Some(signal) = host_signal(&event, minimized) {
            if driver.handle(signal) {
                log::info!("Window closed");
                event_loop.exit();
            }
        }
    }
}

/// Bootstrap against `env` and replay `script` through a [`FrameDriver`].
///
/// Stops early once the window is closed. Returns the driver so callers can
/// inspect the final frame state.
pub fn run_scripted<E: DisplayEnvironment>(
    env: &E,
    settings: &BootstrapSettings,
    console: Arc<dyn Console>,
    script: &[HostSignal],
) -> Result<FrameDriver<E::Window>> {
    let frame = bootstrap(env, settings, console)?;
    let mut driver = FrameDriver::new(frame);

    for &signal in script {
        if driver.handle(signal) {
            log::info!("Window closed");
            break;
        }
    }

    Ok(driver)
}
