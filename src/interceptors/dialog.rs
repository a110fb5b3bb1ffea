/*
 * Background/color interceptor for dialog roots and nested dialog pages.
 * Owns the dark background fill, the WM_CTLCOLOR* palette for classic GDI
 * children, and the deferred re-classification passes that catch controls
 * created after the dialog first activated (tab switches, list refreshes,
 * late child creation).
 */
use crate::palette::{self, DARK_BACKGROUND, LIGHT_TEXT};
use crate::{apply, context};

use std::ffi::c_void;

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::{
        HDC, OPAQUE, RDW_ALLCHILDREN, RDW_INVALIDATE, RedrawWindow, SetBkColor, SetBkMode,
        SetTextColor, TRANSPARENT,
    },
    UI::Controls::{LVN_ITEMCHANGED, NMHDR, TCN_SELCHANGE},
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{
        IsWindow, KillTimer, SetTimer, WM_CREATE, WM_CTLCOLORBTN, WM_CTLCOLORDLG, WM_CTLCOLOREDIT,
        WM_CTLCOLORLISTBOX, WM_CTLCOLORSTATIC, WM_DESTROY, WM_ERASEBKGND, WM_INITDIALOG,
        WM_NOTIFY, WM_PARENTNOTIFY, WM_SHOWWINDOW, WM_TIMER,
    },
};

const DIALOG_SUBCLASS_ID: usize = 0x6464_6C67; // "ddlg"

// UI transitions recreate children asynchronously; two delayed passes catch
// both the immediately rebuilt controls and the lazily constructed ones.
const REFRESH_TIMER_FAST: usize = 0x0DD1;
const REFRESH_TIMER_SLOW: usize = 0x0DD2;
const REFRESH_DELAY_FAST_MS: u32 = 50;
const REFRESH_DELAY_SLOW_MS: u32 = 200;

pub(crate) fn attach(hwnd: HWND) {
    let ok = unsafe { SetWindowSubclass(hwnd, Some(dialog_subclass_proc), DIALOG_SUBCLASS_ID, 0) };
    if !ok.as_bool() {
        log::warn!("[Dialog] SetWindowSubclass failed for {hwnd:?}");
    }
}

unsafe extern "system" fn dialog_subclass_proc(
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
        // Theme-stripped statics, group boxes and buttons take their text
        // color from here; transparent so the filled background shows
        // through icons and checkbox labels.
        WM_CTLCOLORSTATIC | WM_CTLCOLORDLG | WM_CTLCOLORBTN => {
            if let Some(ctx) = context::get() {
                let hdc = HDC(wparam.0 as *mut c_void);
                unsafe {
                    SetTextColor(hdc, palette::color_to_colorref(LIGHT_TEXT));
                    SetBkMode(hdc, TRANSPARENT);
                }
                return LRESULT(ctx.brush().0 as isize);
            }
        }
        WM_CTLCOLOREDIT | WM_CTLCOLORLISTBOX => {
            if let Some(ctx) = context::get() {
                let hdc = HDC(wparam.0 as *mut c_void);
                unsafe {
                    SetTextColor(hdc, palette::color_to_colorref(LIGHT_TEXT));
                    SetBkColor(hdc, palette::color_to_colorref(DARK_BACKGROUND));
                    SetBkMode(hdc, OPAQUE);
                }
                return LRESULT(ctx.brush().0 as isize);
            }
        }
        WM_INITDIALOG | WM_SHOWWINDOW => reclassify(hwnd),
        WM_PARENTNOTIFY => {
            if (wparam.0 & 0xFFFF) as u32 == WM_CREATE {
                reclassify(hwnd);
            }
        }
        WM_NOTIFY => {
            if lparam.0 != 0 {
                let header = unsafe { &*(lparam.0 as *const NMHDR) };
                if header.code == TCN_SELCHANGE || header.code == LVN_ITEMCHANGED {
                    unsafe {
                        SetTimer(Some(hwnd), REFRESH_TIMER_FAST, REFRESH_DELAY_FAST_MS, None);
                        SetTimer(Some(hwnd), REFRESH_TIMER_SLOW, REFRESH_DELAY_SLOW_MS, None);
                    }
                }
            }
        }
        WM_TIMER if wparam.0 == REFRESH_TIMER_FAST || wparam.0 == REFRESH_TIMER_SLOW => {
            unsafe {
                let _ = KillTimer(Some(hwnd), wparam.0);
            }
            reclassify(hwnd);
            unsafe {
                let _ = RedrawWindow(Some(hwnd), None, None, RDW_INVALIDATE | RDW_ALLCHILDREN);
            }
        }
        WM_DESTROY => {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(dialog_subclass_proc), uidsubclass);
            }
            if let Some(ctx) = context::get() {
                ctx.with_tables(|tables| tables.windows.forget_window(hwnd.0 as isize));
            }
        }
        _ => {}
    }
    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}

fn reclassify(hwnd: HWND) {
    if let Some(ctx) = context::get()
        && unsafe { IsWindow(Some(hwnd)) }.as_bool()
    {
        apply::classify_descendants(ctx, hwnd);
    }
}
