//! The dispatch table: a function from (message kind, payload) to a verdict,
//! decoupled from the Win32 wire form so it runs against synthetic payloads.

use super::hit_test::hit_test;
use super::{ChromeController, HitRegion, Point, Rect};

/// Inset applied to each side of the proposed client rectangle during frame
/// recalculation. Zero keeps the entire window as client area, which is what
/// lets the host draw into the title-bar region.
const CLIENT_INSET: i32 = 0;

/// A window message the chrome layer may have an opinion on, with its payload
/// already extracted by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMessage {
    /// `WM_NCCALCSIZE`. `validate` mirrors the wparam flag; `client` is the
    /// first proposed client rectangle.
    FrameCalc { validate: bool, client: Rect },
    /// `WM_SYSCOLORCHANGE`.
    SysColorChange,
    /// `WM_NCHITTEST`, with the window rectangle, the captionless
    /// frame-adjustment rectangle, and the cursor position in screen pixels.
    HitTest {
        window: Rect,
        frame: Rect,
        point: Point,
    },
    /// Anything else.
    Other,
}

/// Verdict of the dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Frame recalculation handled exclusively: write the rectangle back,
    /// answer zero, and do not run the original procedure.
    ClientRect(Rect),
    /// Hit test answered directly.
    Hit(HitRegion),
    /// Delegate to the original window procedure unchanged.
    Forward,
}

impl ChromeController {
    /// Route one message through the chrome policy.
    ///
    /// Semantics, pinned here rather than left to the caller:
    /// - `FrameCalc` with the validation flag set is handled exclusively and
    ///   never reaches the original procedure; without the flag it forwards.
    /// - `SysColorChange` invokes the theme observer (if any) exactly once,
    ///   ignores its outcome, and then always forwards.
    /// - `HitTest` is consulted only after [`make_resizable`] has run; a
    ///   [`HitRegion::Nowhere`] classification forwards.
    ///
    /// [`make_resizable`]: ChromeController::make_resizable
    pub fn dispatch(&mut self, msg: &WindowMessage) -> Dispatch {
        match *msg {
            WindowMessage::FrameCalc {
                validate: true,
                client,
            } => Dispatch::ClientRect(Rect {
                left: client.left + CLIENT_INSET,
                top: client.top + CLIENT_INSET,
                right: client.right - CLIENT_INSET,
                bottom: client.bottom - CLIENT_INSET,
            }),
            WindowMessage::SysColorChange => {
                if let Some(observer) = self.theme_observer.as_mut() {
                    observer.theme_changed();
                }
                Dispatch::Forward
            }
            WindowMessage::HitTest {
                window,
                frame,
                point,
            } if self.hit_test_enabled => match hit_test(window, frame, self.margins, point) {
                HitRegion::Nowhere => Dispatch::Forward,
                region => Dispatch::Hit(region),
            },
            _ => Dispatch::Forward,
        }
    }
}
