//! Semi-integration tests: a real window class, a real subclass, and real
//! messages pushed through the hook with `SendMessageW`.
#![cfg(windows)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetWindowRect, HTCAPTION, HTCLIENT, HTLEFT,
    HTTOP, HTTOPLEFT, NCCALCSIZE_PARAMS, RegisterClassW, SendMessageW, WINDOW_EX_STYLE,
    WM_NCCALCSIZE, WM_NCHITTEST, WM_SYSCOLORCHANGE, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};
use windows::core::{PCWSTR, w};

use winchrome::{ChromeError, ResizeMargins, attach, make_resizable, set_theme_observer};

unsafe extern "system" fn test_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

fn create_test_window() -> HWND {
    unsafe {
        let hinstance = GetModuleHandleW(None).unwrap();
        let class_name = PCWSTR(w!("WinchromeTestWindow").as_ptr());
        let wc = WNDCLASSW {
            lpfnWndProc: Some(test_wndproc),
            hInstance: hinstance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };
        // Re-registering across tests fails harmlessly.
        let _ = RegisterClassW(&wc);

        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            class_name,
            WS_OVERLAPPEDWINDOW,
            100,
            100,
            400,
            300,
            None,
            None,
            Some(hinstance.into()),
            None,
        )
        .unwrap()
    }
}

fn send_nc_hittest(hwnd: HWND, x: i32, y: i32) -> isize {
    let lparam = LPARAM(((y as isize & 0xFFFF) << 16) | (x as isize & 0xFFFF));
    unsafe { SendMessageW(hwnd, WM_NCHITTEST, Some(WPARAM(0)), Some(lparam)).0 }
}

#[test]
fn attach_to_invalid_handle_fails_without_crashing() {
    let result = attach(HWND::default());
    assert!(matches!(result, Err(ChromeError::SubclassFailed(_))));
}

#[test]
fn frame_calc_reports_handled_and_keeps_the_proposed_rect() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();

    let proposed = RECT {
        left: 100,
        top: 100,
        right: 500,
        bottom: 400,
    };
    let mut params = NCCALCSIZE_PARAMS {
        rgrc: [proposed; 3],
        lppos: std::ptr::null_mut(),
    };
    let result = unsafe {
        SendMessageW(
            hwnd,
            WM_NCCALCSIZE,
            Some(WPARAM(1)),
            Some(LPARAM(&mut params as *mut _ as isize)),
        )
    };

    assert_eq!(result.0, 0);
    assert_eq!(params.rgrc[0], proposed);

    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn hit_testing_classifies_edges_after_make_resizable() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();

    let mut rc = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rc).unwrap() };
    let mid_y = (rc.top + rc.bottom) / 2;
    let mid_x = (rc.left + rc.right) / 2;

    // Before make_resizable the hook forwards; the middle of the window is
    // ordinary client area.
    assert_eq!(send_nc_hittest(hwnd, mid_x, mid_y), HTCLIENT as isize);

    make_resizable(hwnd, ResizeMargins::new(8, 8, 31, 8));

    assert_eq!(send_nc_hittest(hwnd, rc.left + 2, mid_y), HTLEFT as isize);
    assert_eq!(
        send_nc_hittest(hwnd, rc.left + 2, rc.top),
        HTTOPLEFT as isize
    );
    // The very top row sits above the extended frame line: resize, not drag.
    assert_eq!(send_nc_hittest(hwnd, mid_x, rc.top), HTTOP as isize);
    // Below the frame line but within the top margin: draggable caption.
    assert_eq!(send_nc_hittest(hwnd, mid_x, rc.top + 30), HTCAPTION as isize);
    // The center band still falls through to the original procedure.
    assert_eq!(send_nc_hittest(hwnd, mid_x, mid_y), HTCLIENT as isize);

    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn theme_observer_fires_per_notification_and_last_registration_wins() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();

    let first = Arc::new(AtomicUsize::new(0));
    {
        let first = first.clone();
        set_theme_observer(hwnd, move || {
            first.fetch_add(1, Ordering::SeqCst);
        });
    }
    unsafe { SendMessageW(hwnd, WM_SYSCOLORCHANGE, Some(WPARAM(0)), Some(LPARAM(0))) };
    assert_eq!(first.load(Ordering::SeqCst), 1);

    let second = Arc::new(AtomicUsize::new(0));
    {
        let second = second.clone();
        set_theme_observer(hwnd, move || {
            second.fetch_add(1, Ordering::SeqCst);
        });
    }
    unsafe { SendMessageW(hwnd, WM_SYSCOLORCHANGE, Some(WPARAM(0)), Some(LPARAM(0))) };
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);

    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn observer_may_reconfigure_the_chrome_from_inside_the_notification() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();

    // HWND is not Send, so the observer closure carries the raw value.
    let hwnd_val = hwnd.0 as usize;
    set_theme_observer(hwnd, move || {
        make_resizable(HWND(hwnd_val as *mut _), ResizeMargins::uniform(8));
    });
    unsafe { SendMessageW(hwnd, WM_SYSCOLORCHANGE, Some(WPARAM(0)), Some(LPARAM(0))) };

    // The reentrant make_resizable must have taken effect.
    let mut rc = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rc).unwrap() };
    let mid_y = (rc.top + rc.bottom) / 2;
    assert_eq!(send_nc_hittest(hwnd, rc.left + 2, mid_y), HTLEFT as isize);

    unsafe { DestroyWindow(hwnd).unwrap() };
}

#[test]
fn observer_replacing_itself_inside_the_notification_wins() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();

    let second = Arc::new(AtomicUsize::new(0));
    let hwnd_val = hwnd.0 as usize;
    {
        let second = second.clone();
        set_theme_observer(hwnd, move || {
            let second = second.clone();
            set_theme_observer(HWND(hwnd_val as *mut _), move || {
                second.fetch_add(1, Ordering::SeqCst);
            });
        });
    }

    // First notification runs the original observer, which registers the
    // replacement; the replacement must not fire yet nor be clobbered.
    unsafe { SendMessageW(hwnd, WM_SYSCOLORCHANGE, Some(WPARAM(0)), Some(LPARAM(0))) };
    assert_eq!(second.load(Ordering::SeqCst), 0);

    unsafe { SendMessageW(hwnd, WM_SYSCOLORCHANGE, Some(WPARAM(0)), Some(LPARAM(0))) };
    assert_eq!(second.load(Ordering::SeqCst), 1);

    unsafe { DestroyWindow(hwnd).unwrap() };
}

/// Pins the known-fragile double-attach behavior: the second attach succeeds
/// and captures the hook itself as the "original" procedure. Exclusively
/// handled messages still work; forwarded ones would recurse, so this test
/// neither sends any nor destroys the window (WM_DESTROY would forward).
#[test]
fn double_attach_keeps_the_hook_installed() {
    let hwnd = create_test_window();
    attach(hwnd).unwrap();
    attach(hwnd).unwrap();

    let proposed = RECT {
        left: 0,
        top: 0,
        right: 400,
        bottom: 300,
    };
    let mut params = NCCALCSIZE_PARAMS {
        rgrc: [proposed; 3],
        lppos: std::ptr::null_mut(),
    };
    let result = unsafe {
        SendMessageW(
            hwnd,
            WM_NCCALCSIZE,
            Some(WPARAM(1)),
            Some(LPARAM(&mut params as *mut _ as isize)),
        )
    };
    assert_eq!(result.0, 0);
    assert_eq!(params.rgrc[0], proposed);
}
