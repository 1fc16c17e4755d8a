//! Window-procedure subclassing and translation of raw messages into
//! [`chrome`](crate::chrome) payloads.

use std::mem;

use log::{error, info, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CallWindowProcW, DefWindowProcW, GWLP_WNDPROC, GetWindowRect, HTBOTTOM,
    HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTLEFT, HTNOWHERE, HTRIGHT, HTTOP, HTTOPLEFT,
    HTTOPRIGHT, NCCALCSIZE_PARAMS, SetWindowLongPtrW, WINDOW_EX_STYLE, WM_NCCALCSIZE,
    WM_NCHITTEST, WM_SYSCOLORCHANGE, WNDPROC, WS_CAPTION, WS_OVERLAPPEDWINDOW,
};
use windows_core::Error as WinError;

use super::registry::{self, Subclassed};
use super::{ChromeError, Result};
use crate::chrome::{
    ChromeController, Dispatch, HitRegion, Point, Rect, ResizeMargins, ThemeObserver,
    WindowMessage,
};

/// Install the chrome hook on `hwnd`, capturing the previous window procedure
/// for delegation and registering a fresh [`ChromeController`] for the window.
///
/// There is no detach: the hook lives for the rest of the process, matching
/// the window's own lifetime in the host toolkit. Attaching the same window a
/// second time captures the hook itself as the "original" procedure, after
/// which forwarded messages recurse; callers must attach once per window.
pub fn attach(hwnd: HWND) -> Result<()> {
    #[allow(clippy::fn_to_numeric_cast)]
    let previous = unsafe { SetWindowLongPtrW(hwnd, GWLP_WNDPROC, chrome_wndproc as isize) };
    if previous == 0 {
        let err = WinError::from_win32();
        error!("failed to install chrome hook: {err}");
        return Err(ChromeError::SubclassFailed(err));
    }

    registry::insert(
        hwnd,
        Subclassed {
            controller: ChromeController::new(),
            original: unsafe { mem::transmute::<isize, WNDPROC>(previous) },
        },
    );
    info!("chrome hook installed");
    Ok(())
}

/// Enable resize hit testing for an attached window. Infallible; without a
/// prior [`attach`] the call is logged and ignored.
pub fn make_resizable(hwnd: HWND, margins: ResizeMargins) {
    let applied = registry::with_entry(hwnd, |entry| entry.controller.make_resizable(margins));
    if applied.is_none() {
        warn!("make_resizable: no chrome hook attached to window");
    }
}

/// Register the observer notified on `WM_SYSCOLORCHANGE`. Last registration
/// wins. Infallible; without a prior [`attach`] the call is logged and
/// ignored.
pub fn set_theme_observer(hwnd: HWND, observer: impl ThemeObserver + 'static) {
    let applied = registry::with_entry(hwnd, |entry| {
        entry.controller.set_theme_observer(observer)
    });
    if applied.is_none() {
        warn!("set_theme_observer: no chrome hook attached to window");
    }
}

/// Extend the DWM frame over the whole client area so client drawing shows
/// through where the title bar used to be. Companion to the `WM_NCCALCSIZE`
/// handling; typically called right after [`attach`].
pub fn extend_frame_into_client_area(hwnd: HWND) -> Result<()> {
    let margins = MARGINS {
        cxLeftWidth: -1,
        cxRightWidth: -1,
        cyTopHeight: -1,
        cyBottomHeight: -1,
    };
    unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins)? };
    Ok(())
}

unsafe extern "system" fn chrome_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCCALCSIZE if wparam.0 == 1 => {
            let params = lparam.0 as *mut NCCALCSIZE_PARAMS;
            let proposed = rect_from(unsafe { (*params).rgrc[0] });
            let verdict = registry::with_entry(hwnd, |entry| {
                entry.controller.dispatch(&WindowMessage::FrameCalc {
                    validate: true,
                    client: proposed,
                })
            });
            if let Some(Dispatch::ClientRect(client)) = verdict {
                unsafe { (*params).rgrc[0] = rect_to(client) };
                return LRESULT(0);
            }
            forward(hwnd, msg, wparam, lparam)
        }
        WM_SYSCOLORCHANGE => {
            // The observer is checked out and invoked with the registry
            // unlocked, so it may call make_resizable, set_theme_observer, or
            // attach on its own window. A registration made while the slot is
            // checked out wins over the restored observer. The message always
            // continues on to the original procedure.
            let observer =
                registry::with_entry(hwnd, |entry| entry.controller.take_theme_observer())
                    .flatten();
            if let Some(mut observer) = observer {
                observer.theme_changed();
                registry::with_entry(hwnd, |entry| {
                    entry.controller.restore_theme_observer(observer)
                });
            }
            forward(hwnd, msg, wparam, lparam)
        }
        WM_NCHITTEST => {
            let point = Point {
                x: (lparam.0 & 0xFFFF) as i16 as i32,
                y: ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
            };
            let (Ok(window), Ok(frame)) = (window_rect(hwnd), frame_rect()) else {
                return forward(hwnd, msg, wparam, lparam);
            };
            let verdict = registry::with_entry(hwnd, |entry| {
                entry.controller.dispatch(&WindowMessage::HitTest {
                    window,
                    frame,
                    point,
                })
            });
            match verdict {
                Some(Dispatch::Hit(region)) => LRESULT(hit_region_code(region) as isize),
                _ => forward(hwnd, msg, wparam, lparam),
            }
        }
        _ => forward(hwnd, msg, wparam, lparam),
    }
}

/// Delegate to the window procedure captured at attach time, or to the
/// default procedure if the window has no entry.
fn forward(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match registry::with_entry(hwnd, |entry| entry.original) {
        Some(original) => unsafe { CallWindowProcW(original, hwnd, msg, wparam, lparam) },
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn window_rect(hwnd: HWND) -> Result<Rect> {
    let mut rc = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rc)? };
    Ok(rect_from(rc))
}

/// Frame metrics for the overlapped style without a caption; the distance
/// from the window top to this rectangle's (negative) top is the height of
/// the resize border above the caption area.
fn frame_rect() -> Result<Rect> {
    let mut rc = RECT::default();
    unsafe {
        AdjustWindowRectEx(
            &mut rc,
            WS_OVERLAPPEDWINDOW & !WS_CAPTION,
            false,
            WINDOW_EX_STYLE(0),
        )?
    };
    Ok(rect_from(rc))
}

fn rect_from(rc: RECT) -> Rect {
    Rect {
        left: rc.left,
        top: rc.top,
        right: rc.right,
        bottom: rc.bottom,
    }
}

fn rect_to(rc: Rect) -> RECT {
    RECT {
        left: rc.left,
        top: rc.top,
        right: rc.right,
        bottom: rc.bottom,
    }
}

fn hit_region_code(region: HitRegion) -> u32 {
    match region {
        HitRegion::Nowhere => HTNOWHERE,
        HitRegion::Caption => HTCAPTION,
        HitRegion::Left => HTLEFT,
        HitRegion::Right => HTRIGHT,
        HitRegion::Top => HTTOP,
        HitRegion::Bottom => HTBOTTOM,
        HitRegion::TopLeft => HTTOPLEFT,
        HitRegion::TopRight => HTTOPRIGHT,
        HitRegion::BottomLeft => HTBOTTOMLEFT,
        HitRegion::BottomRight => HTBOTTOMRIGHT,
    }
}
