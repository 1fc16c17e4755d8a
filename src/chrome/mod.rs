//! Chrome policy, independent of any Win32 types.
//!
//! One [`ChromeController`] exists per managed window and owns the state the
//! original implementation kept in process-wide globals: resize margins, the
//! hit-test flag, and the theme observer slot.

mod dispatch;

pub use dispatch::{Dispatch, WindowMessage};
pub use hit_test::{HitRegion, hit_test};

/// Screen-space point in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Screen-space rectangle in physical pixels, exclusive on the right and
/// bottom edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Pixel widths near each window edge that act as resize grips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeMargins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl ResizeMargins {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same grip width on every edge.
    pub fn uniform(width: i32) -> Self {
        Self::new(width, width, width, width)
    }

    /// Negative margin widths saturate to zero; the hit-test arithmetic is
    /// only defined for non-negative grips.
    fn clamped(self) -> Self {
        Self {
            left: self.left.max(0),
            right: self.right.max(0),
            top: self.top.max(0),
            bottom: self.bottom.max(0),
        }
    }
}

/// Observer for the system color/theme change notification.
///
/// Single slot: registering a new observer discards the previous one. The
/// observer is invoked on the UI thread, once per notification, and its
/// outcome is ignored.
pub trait ThemeObserver: Send {
    fn theme_changed(&mut self);
}

impl<F: FnMut() + Send> ThemeObserver for F {
    fn theme_changed(&mut self) {
        self()
    }
}

/// Per-window chrome state. The host toolkit owns one of these for each
/// window whose chrome it customizes; dispatch is serialized by the OS
/// message loop, so no interior locking is needed here.
#[derive(Default)]
pub struct ChromeController {
    margins: ResizeMargins,
    hit_test_enabled: bool,
    theme_observer: Option<Box<dyn ThemeObserver>>,
}

impl ChromeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the resize grip widths and enable hit testing. Always succeeds;
    /// negative widths saturate to zero.
    pub fn make_resizable(&mut self, margins: ResizeMargins) {
        self.margins = margins.clamped();
        self.hit_test_enabled = true;
    }

    /// Replace the theme observer. The previous observer, if any, is dropped.
    pub fn set_theme_observer(&mut self, observer: impl ThemeObserver + 'static) {
        self.theme_observer = Some(Box::new(observer));
    }

    /// Check the observer out of its slot. The runtime uses this to invoke
    /// the observer without holding its registry lock, so the observer can
    /// reconfigure the chrome from inside the notification.
    pub(crate) fn take_theme_observer(&mut self) -> Option<Box<dyn ThemeObserver>> {
        self.theme_observer.take()
    }

    /// Return a checked-out observer unless a new one was registered in the
    /// meantime; the newer registration wins.
    pub(crate) fn restore_theme_observer(&mut self, observer: Box<dyn ThemeObserver>) {
        self.theme_observer.get_or_insert(observer);
    }

    pub fn margins(&self) -> ResizeMargins {
        self.margins
    }

    pub fn hit_test_enabled(&self) -> bool {
        self.hit_test_enabled
    }
}
