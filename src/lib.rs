//! Custom window chrome for borderless Win32 windows.
//!
//! Subclasses a window procedure so that client-area drawing extends into the
//! title-bar region (`WM_NCCALCSIZE`), the borderless window keeps native
//! resize and drag affordances (`WM_NCHITTEST`), and system theme changes
//! (`WM_SYSCOLORCHANGE`) reach application code. The crate is consumed by a
//! host GUI toolkit as a capability provider; it has no surface of its own.
//!
//! All decision logic lives in [`chrome`] and operates on plain geometry, so
//! it is testable without a window. [`runtime`] is the Win32 plumbing that
//! installs the hook and translates raw messages into [`chrome`] payloads.

pub mod chrome;
#[cfg(windows)]
pub mod runtime;

pub use chrome::{
    ChromeController, Dispatch, HitRegion, Point, Rect, ResizeMargins, ThemeObserver,
    WindowMessage,
};
#[cfg(windows)]
pub use runtime::{
    ChromeError, Result, attach, extend_frame_into_client_area, make_resizable,
    set_theme_observer,
};
