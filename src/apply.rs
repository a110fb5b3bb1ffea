/*
 * Top-level apply routine and the classifier driver. The activation watcher
 * and the rescan loop both land here: `apply_top_level` styles a dialog once
 * (idempotent through the processed set), and `classify_descendants` walks
 * the full child tree executing the strategies decided by `classify`.
 *
 * Every routine tolerates stale handles: windows owned by another process
 * have unknown lifetimes, so validity is checked at entry and all Win32
 * results are best-effort.
 */
use crate::classify::{
    self, ControlClass, InterceptorKind, MarkerKind, Strategy, ThemeChoice,
};
use crate::context::{self, EnforcerContext};
use crate::interceptors;
use crate::palette::{self, DARK_BACKGROUND, LIGHT_TEXT};

use std::panic::{AssertUnwindSafe, catch_unwind};

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute},
    Graphics::Gdi::{
        InvalidateRect, RDW_ALLCHILDREN, RDW_ERASE, RDW_FRAME, RDW_INVALIDATE, RedrawWindow,
    },
    UI::Controls::{SetWindowTheme, TVM_SETBKCOLOR, TVM_SETTEXTCOLOR},
    UI::WindowsAndMessaging::{
        EnumChildWindows, GetClassNameW, GetParent, GetWindowTextW, IsWindow, SWP_FRAMECHANGED,
        SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SendMessageW, SetWindowPos,
    },
};
use windows::core::{BOOL, HSTRING, w};

pub(crate) fn window_class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    if len <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..(len as usize).min(buf.len())])
}

fn window_text(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetWindowTextW(hwnd, &mut buf) };
    if len <= 0 {
        return String::new();
    }
    String::from_utf16_lossy(&buf[..(len as usize).min(buf.len())])
}

/*
 * Styles a top-level dialog. Runs at most once per live window handle; the
 * full sequence is dark title bar, per-window dark allowance, dark theme
 * string, the background/color interceptor, a classification pass over the
 * descendants, and a non-destructive redraw so it all takes effect now.
 */
pub(crate) fn apply_top_level(ctx: &'static EnforcerContext, hwnd: HWND) {
    if !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
        return;
    }
    let first = ctx.with_tables(|tables| {
        if tables.windows.insert_processed(hwnd.0 as isize) {
            tables.windows.mark(hwnd.0 as isize, MarkerKind::TopLevel)
        } else {
            false
        }
    });
    if !first {
        return;
    }

    log::debug!("[Apply] Styling dialog {hwnd:?}");
    enable_dark_frame(hwnd);
    ctx.capabilities().allow_dark_for(hwnd);
    unsafe {
        let _ = SetWindowTheme(hwnd, w!("DarkMode_Explorer"), None);
    }
    interceptors::dialog::attach(hwnd);
    classify_descendants(ctx, hwnd);

    // Frame-changed redraw, no move/resize: the new attributes become
    // visible without disturbing the host's layout.
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            None,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
        );
        let _ = RedrawWindow(
            Some(hwnd),
            None,
            None,
            RDW_INVALIDATE | RDW_ERASE | RDW_FRAME | RDW_ALLCHILDREN,
        );
    }
}

/// Dark title bar via DWM. Attribute 20 on current builds; pre-20H1 used 19
/// for the same toggle, so both are attempted.
fn enable_dark_frame(hwnd: HWND) {
    const DWMWA_USE_IMMERSIVE_DARK_MODE: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(20);
    let enable_dark: i32 = 1;
    unsafe {
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWA_USE_IMMERSIVE_DARK_MODE,
            &enable_dark as *const _ as *const _,
            std::mem::size_of_val(&enable_dark) as u32,
        );
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            &enable_dark as *const _ as *const _,
            std::mem::size_of_val(&enable_dark) as u32,
        );
    }
}

/*
 * Visits every direct and indirect descendant of `root` and executes the
 * strategy for each. `EnumChildWindows` already walks the whole subtree;
 * nested dialog pages additionally trigger their own pass when first marked,
 * which the marker registry keeps harmless.
 */
pub(crate) fn classify_descendants(_ctx: &'static EnforcerContext, root: HWND) {
    unsafe extern "system" fn visit_child(hwnd: HWND, _lparam: LPARAM) -> BOOL {
        if let Some(ctx) = context::get() {
            // A fault while styling one child must not abort the walk or
            // unwind into the host's message dispatch.
            let _ = catch_unwind(AssertUnwindSafe(|| style_descendant(ctx, hwnd)));
        }
        BOOL(1)
    }
    unsafe {
        let _ = EnumChildWindows(Some(root), Some(visit_child), LPARAM(0));
    }
}

fn style_descendant(ctx: &'static EnforcerContext, hwnd: HWND) {
    let class_name = window_class_name(hwnd);
    let class = ControlClass::from_class_name(&class_name);
    let quick_command =
        class == ControlClass::StaticLabel && parent_caption_is_quick_command(hwnd);
    let strategy = classify::strategy_for(class, quick_command);
    execute_strategy(ctx, hwnd, strategy);
}

fn execute_strategy(ctx: &'static EnforcerContext, hwnd: HWND, strategy: Strategy) {
    if strategy.is_noop() {
        return;
    }

    if let Some(theme) = strategy.theme {
        apply_theme(hwnd, theme);
    }
    if strategy.allow_dark {
        ctx.capabilities().allow_dark_for(hwnd);
    }
    if strategy.push_native_colors {
        push_tree_colors(hwnd);
    }

    if let Some(kind) = strategy.interceptor {
        let attach_now = match strategy.marker {
            Some(marker) => ctx.with_tables(|tables| tables.windows.mark(hwnd.0 as isize, marker)),
            None => true,
        };
        if attach_now {
            match kind {
                InterceptorKind::DialogColors => {
                    interceptors::dialog::attach(hwnd);
                    classify_descendants(ctx, hwnd);
                }
                InterceptorKind::TabFill => interceptors::tab::attach(hwnd),
                InterceptorKind::ListView => interceptors::listview::attach(hwnd),
                InterceptorKind::ManualPaint => interceptors::static_label::attach(hwnd),
            }
        }
    }

    if strategy.request_repaint {
        unsafe {
            let _ = InvalidateRect(Some(hwnd), None, true);
        }
    }
}

fn apply_theme(hwnd: HWND, choice: ThemeChoice) {
    unsafe {
        match choice {
            ThemeChoice::Explorer => {
                let _ = SetWindowTheme(hwnd, w!("Explorer"), None);
            }
            ThemeChoice::DarkExplorer => {
                let _ = SetWindowTheme(hwnd, w!("DarkMode_Explorer"), None);
            }
            ThemeChoice::Strip => {
                let empty = HSTRING::new();
                let _ = SetWindowTheme(hwnd, &empty, &empty);
            }
        }
    }
}

/// Tree views honor their own color properties, so no interceptor is needed.
fn push_tree_colors(hwnd: HWND) {
    let background = palette::color_to_bgr(DARK_BACKGROUND) as isize;
    let text = palette::color_to_bgr(LIGHT_TEXT) as isize;
    unsafe {
        let _ = SendMessageW(
            hwnd,
            TVM_SETTEXTCOLOR,
            Some(WPARAM(0)),
            Some(LPARAM(text)),
        );
        let _ = SendMessageW(
            hwnd,
            TVM_SETBKCOLOR,
            Some(WPARAM(0)),
            Some(LPARAM(background)),
        );
        let _ = InvalidateRect(Some(hwnd), None, true);
    }
}

fn parent_caption_is_quick_command(hwnd: HWND) -> bool {
    let parent = match unsafe { GetParent(hwnd) } {
        Ok(parent) if !parent.is_invalid() => parent,
        _ => return false,
    };
    classify::is_quick_command_caption(&window_text(parent))
}
