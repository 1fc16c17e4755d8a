use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use log::warn;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::WNDPROC;

use crate::chrome::ChromeController;

/// Per-window subclass state: the chrome controller plus the window
/// procedure captured when the hook was installed.
pub(crate) struct Subclassed {
    pub(crate) controller: ChromeController,
    pub(crate) original: WNDPROC,
}

static SUBCLASSED: OnceLock<Mutex<HashMap<usize, Subclassed>>> = OnceLock::new();

fn map() -> &'static Mutex<HashMap<usize, Subclassed>> {
    SUBCLASSED.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Registering the same window again replaces its entry; the new entry's
/// captured procedure is whatever was installed at that point, which after a
/// double attach is the hook itself.
pub(crate) fn insert(hwnd: HWND, entry: Subclassed) {
    let mut guard = map().lock().unwrap();
    guard.insert(hwnd.0 as usize, entry);
}

/// Run `f` on the window's subclass entry. Returns `None` when the window was
/// never attached or the registry is locked; the hook then falls back to
/// default handling rather than blocking the UI thread.
pub(crate) fn with_entry<R>(hwnd: HWND, f: impl FnOnce(&mut Subclassed) -> R) -> Option<R> {
    let Ok(mut guard) = map().try_lock() else {
        warn!("chrome registry is locked, skipping message");
        return None;
    };
    guard.get_mut(&(hwnd.0 as usize)).map(f)
}
