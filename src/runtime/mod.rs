//! Win32 plumbing: window subclassing, message translation, and the DWM
//! frame-extension helper.

mod registry;
pub mod subclass;

pub use subclass::{attach, extend_frame_into_client_area, make_resizable, set_theme_observer};

use thiserror::Error;
use windows_core::Error as WinError;

#[derive(Debug, Error)]
pub enum ChromeError {
    /// The OS refused to replace the window procedure, e.g. for an invalid
    /// handle or a window owned by another process.
    #[error("failed to subclass window procedure: {0}")]
    SubclassFailed(WinError),

    #[error("Windows API error: {0}")]
    WindowsApi(#[from] WinError),
}

pub type Result<T> = std::result::Result<T, ChromeError>;
