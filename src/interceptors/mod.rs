/*
 * Message interceptors: comctl32 subclass procedures attached to windows the
 * library does not own. Shared contract: handle a fixed subset of messages,
 * delegate everything else unmodified to `DefSubclassProc`, and detach on
 * WM_DESTROY. No interceptor allocates per message beyond transient text
 * buffers; the brush and colors come from the process context.
 */
pub(crate) mod dialog;
pub(crate) mod listview;
pub(crate) mod static_label;
pub(crate) mod tab;

use std::ffi::c_void;

use windows::Win32::Foundation::{HWND, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{FillRect, HBRUSH, HDC};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

/// WM_ERASEBKGND body shared by the interceptors: fill the full client area
/// with the shared brush and report the erase handled.
unsafe fn fill_background(hwnd: HWND, wparam: WPARAM, brush: HBRUSH) -> LRESULT {
    unsafe {
        let hdc = HDC(wparam.0 as *mut c_void);
        let mut client = RECT::default();
        if GetClientRect(hwnd, &mut client).is_ok() && !brush.is_invalid() {
            let _ = FillRect(hdc, &client, brush);
        }
    }
    LRESULT(1)
}
