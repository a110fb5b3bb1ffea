/*
 * List view interceptor. The control re-derives its colors from the visual
 * theme on every paint cycle and the theming engine re-applies itself to the
 * non-client area asynchronously, so both are countered on every relevant
 * message rather than once at attach time.
 */
use crate::context;
use crate::palette::{self, DARK_BACKGROUND, LIGHT_TEXT};

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::Controls::{
        LVM_SETBKCOLOR, LVM_SETTEXTBKCOLOR, LVM_SETTEXTCOLOR, SetWindowTheme,
    },
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{SendMessageW, WM_DESTROY, WM_ERASEBKGND, WM_NCPAINT, WM_PAINT},
};
use windows::core::HSTRING;

const LISTVIEW_SUBCLASS_ID: usize = 0x646C_7376; // "dlsv"

pub(crate) fn attach(hwnd: HWND) {
    let ok =
        unsafe { SetWindowSubclass(hwnd, Some(listview_subclass_proc), LISTVIEW_SUBCLASS_ID, 0) };
    if !ok.as_bool() {
        log::warn!("[ListView] SetWindowSubclass failed for {hwnd:?}");
    }
}

unsafe extern "system" fn listview_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    uidsubclass: usize,
    _refdata: usize,
) -> LRESULT {
    match msg {
        // Push the palette right before default painting uses it.
        WM_PAINT => {
            let background = LPARAM(palette::color_to_bgr(DARK_BACKGROUND) as isize);
            let text = LPARAM(palette::color_to_bgr(LIGHT_TEXT) as isize);
            unsafe {
                let _ = SendMessageW(hwnd, LVM_SETBKCOLOR, Some(WPARAM(0)), Some(background));
                let _ = SendMessageW(hwnd, LVM_SETTEXTBKCOLOR, Some(WPARAM(0)), Some(background));
                let _ = SendMessageW(hwnd, LVM_SETTEXTCOLOR, Some(WPARAM(0)), Some(text));
            }
        }
        // Re-strip before the frame paints so scrollbars and borders stay dark.
        WM_NCPAINT => {
            let empty = HSTRING::new();
            unsafe {
                let _ = SetWindowTheme(hwnd, &empty, &empty);
            }
        }
        WM_ERASEBKGND => {
            if let Some(ctx) = context::get() {
                return unsafe { super::fill_background(hwnd, wparam, ctx.brush()) };
            }
        }
        WM_DESTROY => {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(listview_subclass_proc), uidsubclass);
            }
            if let Some(ctx) = context::get() {
                ctx.with_tables(|tables| tables.windows.forget_window(hwnd.0 as isize));
            }
        }
        _ => {}
    }
    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}
