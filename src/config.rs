// src/config.rs
//! Session configuration with explicit defaults

/// Options recognized by a collection session.
///
/// Defaults: fixture source, `COM5` (Windows) or `/dev/ttyUSB0` (elsewhere)
/// at 9600 baud, at most 300 points, no saved artifact.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Read from the serial device instead of the built-in test sentences.
    pub use_live_source: bool,
    /// Serial device the live source opens.
    pub device_address: String,
    /// Serial bit rate.
    pub bit_rate: u32,
    /// Hard cap on the number of fixes a session will store.
    pub max_points: usize,
    /// Write the rendered trajectory to a file.
    pub save_output_image: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl SessionConfig {
    /// Platform-specific default configuration; only the device path differs.
    pub fn platform_default() -> Self {
        Self {
            use_live_source: false,
            device_address: default_device(),
            bit_rate: 9600,
            max_points: 300,
            save_output_image: false,
        }
    }
}

#[cfg(windows)]
fn default_device() -> String {
    "COM5".to_string()
}

#[cfg(not(windows))]
fn default_device() -> String {
    "/dev/ttyUSB0".to_string()
}
