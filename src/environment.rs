//! Display environment discovery.
//!
//! A [`DisplayEnvironment`] enumerates the screen devices available to the
//! process and creates host windows bound to one of them. [`WinitEnvironment`]
//! is the native implementation; the dummy environment in [`crate::dummy`]
//! stands in for it where no display exists.

use std::fmt;

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;
use winit::window::Window;

use crate::error::{FrameError, Result};
use crate::types::{Point, Rect, Size};
use crate::window::HostWindow;

/// Environment variable that forces the process-wide headless flag.
///
/// Accepts `true`/`1` and `false`/`0`; any other value is ignored.
pub const HEADLESS_VAR: &str = "APPFRAME_HEADLESS";

/// Capability descriptor of a screen device.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfiguration {
    /// Resolution in physical pixels.
    pub resolution: Size,
    /// Ratio between physical and logical pixels.
    pub scale_factor: f64,
    /// Deepest color depth among the device's video modes.
    pub bit_depth: Option<u16>,
    pub refresh_rate_millihertz: Option<u32>,
}

impl fmt::Display for ScreenConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} scale {}", self.resolution, self.scale_factor)?;
        if let Some(depth) = self.bit_depth {
            write!(f, " {depth}bpp")?;
        }
        if let Some(rate) = self.refresh_rate_millihertz {
            write!(f, " {}.{:03}Hz", rate / 1000, rate % 1000)?;
        }
        Ok(())
    }
}

/// One physical or virtual display.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenDevice {
    pub name: String,
    /// Bounds in logical units.
    pub bounds: Rect,
    pub default_configuration: ScreenConfiguration,
}

impl fmt::Display for ScreenDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {} ({})",
            self.name, self.bounds.size, self.bounds.origin, self.default_configuration
        )
    }
}

/// The host abstraction enumerating screens and creating windows.
pub trait DisplayEnvironment {
    /// Window primitive produced by this environment.
    type Window: HostWindow;

    /// Process-wide headless flag.
    ///
    /// `true` means no interactive display, keyboard or pointer is available.
    fn is_headless(&self) -> bool;

    /// Headless flag of this environment instance.
    ///
    /// Reported as-is; callers must not assume it agrees with
    /// [`is_headless`](Self::is_headless).
    fn is_headless_instance(&self) -> bool;

    /// All screen devices, primary first when the platform knows one.
    fn screen_devices(&self) -> Vec<ScreenDevice>;

    /// The primary screen device.
    fn default_screen_device(&self) -> Option<ScreenDevice>;

    /// Point at which new windows are placed.
    ///
    /// Defaults to the center of the default screen device's bounds.
    fn center_point(&self) -> Option<Point> {
        self.default_screen_device().map(|device| device.bounds.center())
    }

    /// Create a hidden window bound to `configuration`.
    fn create_window(
        &self,
        configuration: &ScreenConfiguration,
        title: &str,
    ) -> Result<Self::Window>;
}

/// Process-wide headless query.
///
/// Honors [`HEADLESS_VAR`] first. Otherwise, on Unix desktops without a
/// windowing session (neither `DISPLAY` nor `WAYLAND_DISPLAY` set) the process
/// is headless. Other platforms always have a display session.
pub fn is_headless() -> bool {
    let forced = std::env::var(HEADLESS_VAR).ok();
    resolve_headless(forced.as_deref(), has_display_session())
}

fn resolve_headless(forced: Option<&str>, has_display_session: bool) -> bool {
    match forced.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => !has_display_session,
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn has_display_session() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
)))]
fn has_display_session() -> bool {
    true
}

/// Environment backed by a running winit event loop.
///
/// Only valid inside event loop callbacks, which is where winit allows
/// monitors to be queried and windows to be created.
pub struct WinitEnvironment<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl<'a> WinitEnvironment<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop) -> Self {
        Self { event_loop }
    }

    fn primary_monitor(&self) -> Option<MonitorHandle> {
        // Wayland has no primary monitor; fall back to the first one listed
        self.event_loop
            .primary_monitor()
            .or_else(|| self.event_loop.available_monitors().next())
    }
}

impl DisplayEnvironment for WinitEnvironment<'_> {
    type Window = Window;

    fn is_headless(&self) -> bool {
        is_headless()
    }

    fn is_headless_instance(&self) -> bool {
        self.event_loop.available_monitors().next().is_none()
    }

    fn screen_devices(&self) -> Vec<ScreenDevice> {
        let primary = self.event_loop.primary_monitor();
        let mut devices: Vec<(bool, ScreenDevice)> = self
            .event_loop
            .available_monitors()
            .map(|monitor| (primary.as_ref() == Some(&monitor), describe_monitor(&monitor)))
            .collect();
        // Stable sort keeps enumeration order apart from the primary device
        devices.sort_by_key(|(is_primary, _)| !is_primary);
        devices.into_iter().map(|(_, device)| device).collect()
    }

    fn default_screen_device(&self) -> Option<ScreenDevice> {
        self.primary_monitor().map(|monitor| describe_monitor(&monitor))
    }

    fn create_window(&self, configuration: &ScreenConfiguration, title: &str) -> Result<Window> {
        log::debug!("Creating window for configuration {}", configuration);

        let attributes = Window::default_attributes()
            .with_title(title)
            .with_visible(false);

        self.event_loop
            .create_window(attributes)
            .map_err(|e| FrameError::WindowCreation(e.to_string()))
    }
}

fn describe_monitor(monitor: &MonitorHandle) -> ScreenDevice {
    let scale_factor = monitor.scale_factor();
    let physical_size = monitor.size();
    let logical_size: LogicalSize<u32> = physical_size.to_logical(scale_factor);
    let logical_position: LogicalPosition<i32> = monitor.position().to_logical(scale_factor);

    ScreenDevice {
        name: monitor.name().unwrap_or_else(|| "unnamed".to_string()),
        bounds: Rect::new(
            Point::new(logical_position.x, logical_position.y),
            Size::new(logical_size.width, logical_size.height),
        ),
        default_configuration: ScreenConfiguration {
            resolution: Size::new(physical_size.width, physical_size.height),
            scale_factor,
            bit_depth: monitor.video_modes().map(|mode| mode.bit_depth()).max(),
            refresh_rate_millihertz: monitor.refresh_rate_millihertz(),
        },
    }
}
