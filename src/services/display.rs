//! Primary display resolution.

use std::fmt;

use super::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Builds a resolution, rejecting zero or negative dimensions.
    pub fn new(width: i64, height: i64) -> Result<Self, SetupError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(SetupError::Display(format!(
                "invalid resolution {}x{}",
                width, height
            ))),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Source of the current screen resolution.
pub trait DisplaySource {
    fn resolution(&self) -> Result<Resolution, SetupError>;
}

/// Queries the primary monitor through the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDisplay;

#[cfg(windows)]
impl DisplaySource for SystemDisplay {
    fn resolution(&self) -> Result<Resolution, SetupError> {
        use windows_sys::Win32::UI::WindowsAndMessaging::{
            GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN,
        };

        // SAFETY: GetSystemMetrics has no preconditions and only reads system state.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        Resolution::new(width.into(), height.into())
    }
}

#[cfg(not(windows))]
impl DisplaySource for SystemDisplay {
    fn resolution(&self) -> Result<Resolution, SetupError> {
        Err(SetupError::Unsupported("Display resolution detection"))
    }
}
