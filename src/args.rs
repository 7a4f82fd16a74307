//! Command line arguments trait and default implementation.
//!
//! Uses clap for parsing, with help text (`--help`) and validation.

use clap::{Parser, ValueEnum};

use crate::bootstrap::BootstrapSettings;
use crate::types::Size;

/// Which display environment to bootstrap against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EnvironmentKind {
    /// The platform windowing system via winit.
    #[default]
    Native,
    /// In-process environment without a display; replays a scripted lifecycle.
    Dummy,
}

/// Trait for parsing command line arguments.
///
/// Every option has a default, so custom implementations only override what
/// they need.
pub trait AppArgs: Sized {
    /// Parse command line arguments.
    fn parse() -> Self;

    /// Default: `EnvironmentKind::Native`
    fn environment(&self) -> EnvironmentKind {
        EnvironmentKind::Native
    }

    /// Default: 100
    fn window_width(&self) -> u32 {
        100
    }

    /// Default: 100
    fn window_height(&self) -> u32 {
        100
    }

    /// Default: "AppFrame"
    fn window_title(&self) -> &str {
        "AppFrame"
    }

    /// Whether to print every screen device during bootstrap.
    ///
    /// Default: false
    fn list_screens(&self) -> bool {
        false
    }

    /// Bootstrap settings derived from the arguments.
    fn bootstrap_settings(&self) -> BootstrapSettings {
        BootstrapSettings {
            title: self.window_title().to_string(),
            size: Size::new(self.window_width(), self.window_height()),
            list_screens: self.list_screens(),
        }
    }
}

/// AppFrame command line arguments.
///
/// # Examples
///
/// ```bash
/// # Open the default 100x100 window
/// ./appframe
///
/// # Bigger window, print every screen first
/// ./appframe --width 640 --height 480 --list-screens
///
/// # Run the whole lifecycle without a display
/// ./appframe --environment dummy
/// ```
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "appframe",
    about = "Open a basic window on the default screen and log its lifecycle",
    version
)]
pub struct DefaultAppArgs {
    /// Display environment to use.
    #[arg(long, default_value = "native", value_enum)]
    pub environment: EnvironmentKind,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 100)]
    pub width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 100)]
    pub height: u32,

    /// Window title.
    #[arg(long, default_value = "AppFrame")]
    pub title: String,

    /// Print every screen device before opening the window.
    #[arg(long)]
    pub list_screens: bool,
}

impl Default for DefaultAppArgs {
    fn default() -> Self {
        Self {
            environment: EnvironmentKind::Native,
            width: 100,
            height: 100,
            title: "AppFrame".to_string(),
            list_screens: false,
        }
    }
}

impl DefaultAppArgs {
    /// Set the display environment.
    pub fn with_environment(mut self, environment: EnvironmentKind) -> Self {
        self.environment = environment;
        self
    }

    /// Set the window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl AppArgs for DefaultAppArgs {
    fn parse() -> Self {
        <Self as Parser>::parse()
    }

    fn environment(&self) -> EnvironmentKind {
        self.environment
    }

    fn window_width(&self) -> u32 {
        self.width
    }

    fn window_height(&self) -> u32 {
        self.height
    }

    fn window_title(&self) -> &str {
        &self.title
    }

    fn list_screens(&self) -> bool {
        self.list_screens
    }
}
