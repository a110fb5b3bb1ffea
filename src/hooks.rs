/*
 * Hook lifecycle manager: one CBT activation watcher per host thread,
 * recorded in the context's hook table. Install and remove are idempotent;
 * teardown empties the table at process detach. Installs are fed from two
 * paths (DLL thread-attach notifications and the periodic rescan snapshot),
 * so the table is the single arbiter of "this thread is covered".
 */
use crate::context::EnforcerContext;
use crate::watcher;

use std::ffi::c_void;

use windows::Win32::UI::WindowsAndMessaging::{
    HHOOK, SetWindowsHookExW, UnhookWindowsHookEx, WH_CBT,
};

pub(crate) fn install_on_thread(ctx: &'static EnforcerContext, thread_id: u32) {
    if ctx.with_tables(|tables| tables.hooks.contains(thread_id)) {
        return;
    }
    let hook = match unsafe {
        SetWindowsHookExW(
            WH_CBT,
            Some(watcher::cbt_hook_proc),
            Some(ctx.module()),
            thread_id,
        )
    } {
        Ok(hook) => hook,
        Err(err) => {
            log::debug!("[Hooks] SetWindowsHookExW failed for thread {thread_id}: {err:?}");
            return;
        }
    };

    let recorded = ctx.with_tables(|tables| tables.hooks.insert(thread_id, hook.0 as isize));
    if recorded {
        log::debug!("[Hooks] activation watcher installed for thread {thread_id}");
    } else {
        // Another installer won the race; this hook is redundant.
        unsafe {
            let _ = UnhookWindowsHookEx(hook);
        }
    }
}

pub(crate) fn remove_from_thread(ctx: &'static EnforcerContext, thread_id: u32) {
    if let Some(raw) = ctx.with_tables(|tables| tables.hooks.remove(thread_id)) {
        unsafe {
            let _ = UnhookWindowsHookEx(HHOOK(raw as *mut c_void));
        }
        log::debug!("[Hooks] activation watcher removed for thread {thread_id}");
    }
}

pub(crate) fn teardown_all(ctx: &'static EnforcerContext) {
    let hooks = ctx.with_tables(|tables| tables.hooks.drain_all());
    let count = hooks.len();
    for (_, raw) in hooks {
        unsafe {
            let _ = UnhookWindowsHookEx(HHOOK(raw as *mut c_void));
        }
    }
    if count > 0 {
        log::debug!("[Hooks] removed {count} activation watchers at teardown");
    }
}
