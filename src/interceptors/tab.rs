/*
 * Tab strip interceptor. The "Explorer" theme renders the tabs themselves
 * acceptably, but the strip's own background stays light; this subclass only
 * takes over the erase so the area behind and beside the tabs matches the
 * dialog.
 */
use crate::context;

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{WM_DESTROY, WM_ERASEBKGND},
};

const TAB_SUBCLASS_ID: usize = 0x6474_6162; // "dtab"

pub(crate) fn attach(hwnd: HWND) {
    let ok = unsafe { SetWindowSubclass(hwnd, Some(tab_subclass_proc), TAB_SUBCLASS_ID, 0) };
    if !ok.as_bool() {
        log::warn!("[Tab] SetWindowSubclass failed for {hwnd:?}");
    }
}

unsafe extern "system" fn tab_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    uidsubclass: usize,
    _refdata: usize,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => {
            if let Some(ctx) = context::get() {
                return unsafe { super::fill_background(hwnd, wparam, ctx.brush()) };
            }
        }
        WM_DESTROY => {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(tab_subclass_proc), uidsubclass);
            }
            if let Some(ctx) = context::get() {
                ctx.with_tables(|tables| tables.windows.forget_window(hwnd.0 as isize));
            }
        }
        _ => {}
    }
    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}
