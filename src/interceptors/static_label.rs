/*
 * Manual-paint interceptor for static controls. Once a static is theme
 * stripped some hosts still paint its text in the old foreground, so this
 * subclass takes over WM_PAINT entirely: fill, then either draw the icon
 * (preserving centering) or draw the current text transparently in the light
 * color. Owner-drawn, bitmap, metafile and etched statics are passed through
 * untouched; repainting those blind is not safe.
 */
use crate::classify::{self, StaticPaintPlan};
use crate::context::{self, EnforcerContext};
use crate::palette::{self, LIGHT_TEXT};

use std::ffi::c_void;

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM},
    Graphics::Gdi::{
        BeginPaint, DRAW_TEXT_FORMAT, DrawTextW, EndPaint, FillRect, HFONT, InvalidateRect,
        PAINTSTRUCT, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
    },
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{
        DI_NORMAL, DrawIconEx, GWL_STYLE, GetClientRect, GetSystemMetrics, GetWindowLongPtrW,
        GetWindowTextLengthW, GetWindowTextW, HICON, IsWindow, SM_CXICON, SM_CYICON, SendMessageW,
        STM_GETICON, WM_DESTROY, WM_ENABLE, WM_ERASEBKGND, WM_GETFONT, WM_PAINT,
    },
};

const STATIC_SUBCLASS_ID: usize = 0x6473_7461; // "dsta"

pub(crate) fn attach(hwnd: HWND) {
    let ok = unsafe { SetWindowSubclass(hwnd, Some(static_subclass_proc), STATIC_SUBCLASS_ID, 0) };
    if !ok.as_bool() {
        log::warn!("[Static] SetWindowSubclass failed for {hwnd:?}");
    }
}

unsafe extern "system" fn static_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    uidsubclass: usize,
    _refdata: usize,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            if let Some(ctx) = context::get() {
                if !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
                    return LRESULT(0);
                }
                let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
                match classify::static_paint_plan(style) {
                    StaticPaintPlan::PassThrough => {}
                    StaticPaintPlan::Icon { centered } => {
                        unsafe { paint_icon(ctx, hwnd, centered) };
                        return LRESULT(0);
                    }
                    StaticPaintPlan::Text => {
                        unsafe { paint_text(ctx, hwnd, style) };
                        return LRESULT(0);
                    }
                }
            }
        }
        WM_ERASEBKGND => return LRESULT(1),
        // Enabled state affects rendering; repaint the whole control.
        WM_ENABLE => unsafe {
            let _ = InvalidateRect(Some(hwnd), None, true);
        },
        WM_DESTROY => {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(static_subclass_proc), uidsubclass);
            }
            if let Some(ctx) = context::get() {
                ctx.with_tables(|tables| tables.windows.forget_window(hwnd.0 as isize));
            }
        }
        _ => {}
    }
    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}

/// Fills the background, then draws the icon at its classic position (top
/// left, or centered for SS_CENTERIMAGE). No theme-driven icon backgrounds.
unsafe fn paint_icon(ctx: &'static EnforcerContext, hwnd: HWND, centered: bool) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            return;
        }
        let mut client = RECT::default();
        let _ = GetClientRect(hwnd, &mut client);
        let _ = FillRect(hdc, &client, ctx.brush());

        let icon = HICON(SendMessageW(hwnd, STM_GETICON, None, None).0 as *mut c_void);
        if !icon.is_invalid() {
            let icon_w = GetSystemMetrics(SM_CXICON);
            let icon_h = GetSystemMetrics(SM_CYICON);
            let (x, y) = classify::icon_origin(
                (client.right, client.bottom),
                (icon_w, icon_h),
                centered,
            );
            let _ = DrawIconEx(hdc, x, y, icon, 0, 0, 0, None, DI_NORMAL);
        }
        let _ = EndPaint(hwnd, &ps);
    }
}

/// Fills the background and draws the control's current text with its own
/// font, transparent background mode, and the DT flags derived from the
/// style word.
unsafe fn paint_text(ctx: &'static EnforcerContext, hwnd: HWND, style: u32) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            return;
        }
        let mut client = RECT::default();
        let _ = GetClientRect(hwnd, &mut client);
        let _ = FillRect(hdc, &client, ctx.brush());

        let len = GetWindowTextLengthW(hwnd);
        if len > 0 {
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buf);
            if copied > 0 {
                buf.truncate(copied as usize);

                let font = HFONT(SendMessageW(hwnd, WM_GETFONT, None, None).0 as *mut c_void);
                let old_font = (!font.is_invalid()).then(|| SelectObject(hdc, font.into()));

                SetBkMode(hdc, TRANSPARENT);
                SetTextColor(hdc, palette::color_to_colorref(LIGHT_TEXT));
                let format = DRAW_TEXT_FORMAT(classify::text_format_flags(style));
                let _ = DrawTextW(hdc, &mut buf, &mut client, format);

                if let Some(old_font) = old_font {
                    SelectObject(hdc, old_font);
                }
            }
        }
        let _ = EndPaint(hwnd, &ps);
    }
}
