/*
 * Background rescan loop. One named thread, started at process attach:
 * first a full top-level enumeration to style dialogs that existed before
 * the watcher was installed, then a periodic Toolhelp thread snapshot that
 * installs the activation watcher on any thread the thread-attach
 * notification path raced past.
 *
 * The short-delay re-classification after tab/list notifications is timer
 * based and lives in `interceptors::dialog`, on the UI thread that owns the
 * dialog; this loop never touches child windows directly.
 */
use crate::context::{self, EnforcerContext};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::{apply, hooks, watcher};

use std::time::Duration;

use windows::Win32::Foundation::{CloseHandle, HWND, LPARAM};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, TH32CS_SNAPTHREAD, THREADENTRY32, Thread32First, Thread32Next,
};
use windows::Win32::UI::WindowsAndMessaging::{EnumWindows, GetWindowThreadProcessId};
use windows::core::BOOL;

const THREAD_SCAN_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) fn spawn(ctx: &'static EnforcerContext) {
    let spawned = std::thread::Builder::new()
        .name("darkdialogs-rescan".into())
        .spawn(move || run(ctx));
    if let Err(err) = spawned {
        log::warn!("[Rescan] failed to start background scanner: {err}");
    }
}

fn run(ctx: &'static EnforcerContext) {
    style_existing_windows(ctx);
    loop {
        if let Err(err) = install_hooks_for_all_threads(ctx) {
            log::debug!("[Rescan] skipping pass: {err}");
        }
        std::thread::sleep(THREAD_SCAN_INTERVAL);
    }
}

/// Styles allow-listed top-level windows that predate the hooks. The apply
/// routine only performs enumeration, attribute and theme calls here, which
/// tolerate invocation from a non-owning thread.
fn style_existing_windows(_ctx: &'static EnforcerContext) {
    unsafe extern "system" fn visit_top_level(hwnd: HWND, _lparam: LPARAM) -> BOOL {
        if let Some(ctx) = context::get() {
            let mut pid = 0u32;
            unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
            if pid == ctx.process_id() && watcher::is_dialog_class(&apply::window_class_name(hwnd))
            {
                apply::apply_top_level(ctx, hwnd);
            }
        }
        BOOL(1)
    }
    unsafe {
        let _ = EnumWindows(Some(visit_top_level), LPARAM(0));
    }
}

fn install_hooks_for_all_threads(ctx: &'static EnforcerContext) -> PlatformResult<()> {
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPTHREAD, 0) }
        .map_err(|err| PlatformError::SnapshotFailed(err.to_string()))?;

    let mut entry = THREADENTRY32 {
        dwSize: std::mem::size_of::<THREADENTRY32>() as u32,
        ..Default::default()
    };
    if unsafe { Thread32First(snapshot, &mut entry) }.is_ok() {
        loop {
            if entry.th32OwnerProcessID == ctx.process_id() {
                hooks::install_on_thread(ctx, entry.th32ThreadID);
            }
            if unsafe { Thread32Next(snapshot, &mut entry) }.is_err() {
                break;
            }
        }
    }
    unsafe {
        let _ = CloseHandle(snapshot);
    }
    Ok(())
}
