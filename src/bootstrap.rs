//! The window bootstrap sequence.
//!
//! 1. Query and print both headless flags (never branched on)
//! 2. Optionally print every screen device
//! 3. Select the default screen device
//! 4. Create a hidden window for its default configuration
//! 5. Size it, move it to the environment center point, show it
//! 6. Register the logging listener

use std::sync::Arc;

use crate::console::{labelled, Console};
use crate::environment::DisplayEnvironment;
use crate::error::{FrameError, Result};
use crate::listener::LoggingListener;
use crate::types::Size;
use crate::window::Frame;

/// Parameters of the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSettings {
    pub title: String,
    pub size: Size,
    /// Print every screen device before picking the default one.
    pub list_screens: bool,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            title: "AppFrame".to_string(),
            size: Size::new(100, 100),
            list_screens: false,
        }
    }
}

/// Print both headless flags, raw and in a fixed order.
pub fn report_headless_flags(console: &dyn Console, headless: bool, headless_instance: bool) {
    console.print_line(&labelled("graphicsEnvIsHeadless", headless));
    console.print_line(&labelled("localEnvIsHeadlessInstance", headless_instance));
}

/// Run the bootstrap sequence against `env`.
///
/// Returns the shown frame with a [`LoggingListener`] attached. Fails before
/// any window is created when the environment has no default screen device
/// or no center point.
pub fn bootstrap<E: DisplayEnvironment>(
    env: &E,
    settings: &BootstrapSettings,
    console: Arc<dyn Console>,
) -> Result<Frame<E::Window>> {
    let headless = env.is_headless();
    let headless_instance = env.is_headless_instance();
    report_headless_flags(console.as_ref(), headless, headless_instance);

    if settings.list_screens {
        for (index, device) in env.screen_devices().iter().enumerate() {
            console.print_line(&labelled(&format!("screenDevice[{index}]"), device));
        }
    }

    let device = env.default_screen_device().ok_or(FrameError::NoScreenDevice)?;
    let center = env.center_point().ok_or(FrameError::NoCenterPoint)?;
    log::info!("Default screen device: {}", device);

    let host = env.create_window(&device.default_configuration, &settings.title)?;
    let mut frame = Frame::new(host, device.default_configuration);

    frame.set_size(settings.size.width, settings.size.height)?;
    frame.set_location(center)?;
    frame.set_visible(true)?;
    log::info!("Window shown: {} at {}", settings.size, center);

    frame.add_window_listener(LoggingListener::new(console));
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CapturedConsole;
    use crate::dummy::{DummyCall, DummyEnvironment};
    use crate::types::Point;
    use crate::window::FrameState;

    #[test]
    fn test_bootstrap_shows_centered_window() {
        let env = DummyEnvironment::new();
        let console = CapturedConsole::new();

        let frame = bootstrap(&env, &BootstrapSettings::default(), Arc::new(console.clone())).unwrap();

        assert_eq!(frame.state(), FrameState::Shown);
        assert_eq!(frame.size(), Some(Size::new(100, 100)));
        assert_eq!(frame.location(), Some(Point::new(960, 540)));
        assert_eq!(frame.listener_count(), 1);
        assert_eq!(env.created_windows(), 1);
        assert_eq!(
            console.lines(),
            vec!["graphicsEnvIsHeadless: false", "localEnvIsHeadlessInstance: false"]
        );
    }

    #[test]
    fn test_configuration_calls_in_order() {
        let env = DummyEnvironment::new().with_center_point(Point::new(7, 9));
        let frame = bootstrap(
            &env,
            &BootstrapSettings::default(),
            Arc::new(CapturedConsole::new()),
        )
        .unwrap();

        let window_calls: Vec<_> = env
            .calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    DummyCall::SetSize(..) | DummyCall::SetLocation(..) | DummyCall::SetVisible(..)
                )
            })
            .collect();
        assert_eq!(
            window_calls,
            vec![
                DummyCall::SetSize(1, Size::new(100, 100)),
                DummyCall::SetLocation(1, Point::new(7, 9)),
                DummyCall::SetVisible(1, true),
            ]
        );
        drop(frame);
    }

    #[test]
    fn test_list_screens() {
        let mut second = DummyEnvironment::default_screen();
        second.name = "DUMMY-1".to_string();
        second.bounds.origin = Point::new(1920, 0);
        let env = DummyEnvironment::new()
            .with_screens(vec![DummyEnvironment::default_screen(), second]);
        let console = CapturedConsole::new();
        let settings = BootstrapSettings {
            list_screens: true,
            ..Default::default()
        };

        bootstrap(&env, &settings, Arc::new(console.clone())).unwrap();

        let lines = console.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("screenDevice[0]: DUMMY-0 1920x1080 at (0, 0)"));
        assert!(lines[3].starts_with("screenDevice[1]: DUMMY-1 1920x1080 at (1920, 0)"));
    }

    #[test]
    fn test_report_headless_flags() {
        let console = CapturedConsole::new();
        report_headless_flags(&console, true, false);
        assert_eq!(
            console.lines(),
            vec!["graphicsEnvIsHeadless: true", "localEnvIsHeadlessInstance: false"]
        );
    }

    #[test]
    fn test_window_creation_failure_propagates() {
        let env = DummyEnvironment::new().with_window_failure("no visual");
        let result = bootstrap(
            &env,
            &BootstrapSettings::default(),
            Arc::new(CapturedConsole::new()),
        );
        assert!(matches!(result, Err(FrameError::WindowCreation(_))));
    }
}
