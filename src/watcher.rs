/*
 * The window activation watcher: a per-thread WH_CBT hook whose HCBT_ACTIVATE
 * notifications arrive synchronously, before the OS completes activation.
 * The callback filters by class name and process, hands matching dialogs to
 * the apply routine, and always forwards the notification; a swallowed
 * activation would stall the host's UI.
 */
use crate::{apply, context};

use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetWindowThreadProcessId, HCBT_ACTIVATE,
};

/// Top-level classes the watcher reacts to: classic dialogs and the modern
/// file-operation status window.
const DIALOG_CLASS: &str = "#32770";
const OPERATION_STATUS_CLASS: &str = "OperationStatusWindow";
/// The host's console (when it has one) activates constantly; never touched.
const CONSOLE_CLASS: &str = "ConsoleWindowClass";

pub(crate) fn is_dialog_class(class_name: &str) -> bool {
    class_name == DIALOG_CLASS || class_name == OPERATION_STATUS_CLASS
}

pub(crate) unsafe extern "system" fn cbt_hook_proc(
    code: i32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if code == HCBT_ACTIVATE as i32 {
        // The OS disables a hook whose callback faults; keep the styling
        // work behind a panic guard so the chain survives anything.
        let hwnd = HWND(wparam.0 as *mut c_void);
        let _ = catch_unwind(AssertUnwindSafe(|| on_activate(hwnd)));
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

fn on_activate(hwnd: HWND) {
    let Some(ctx) = context::get() else {
        return;
    };
    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    if pid != ctx.process_id() {
        return;
    }
    let class_name = apply::window_class_name(hwnd);
    if class_name == CONSOLE_CLASS || !is_dialog_class(&class_name) {
        return;
    }
    apply::apply_top_level(ctx, hwnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_covers_dialogs_and_operation_status_only() {
        assert!(is_dialog_class("#32770"));
        assert!(is_dialog_class("OperationStatusWindow"));
        assert!(!is_dialog_class("ConsoleWindowClass"));
        assert!(!is_dialog_class("Shell_TrayWnd"));
        assert!(!is_dialog_class(""));
    }
}
