/*
 * darkdialogs retroactively forces a dark visual theme onto the legacy
 * dialogs of its host process. Loaded as a DLL, it installs a per-thread
 * CBT activation hook; every dialog-like window that activates gets a dark
 * title bar, a dark theme string, and a tree-wide classification pass that
 * attaches painting interceptors to the controls whose native theme cannot
 * be coerced into dark rendering. A background task rescans for windows and
 * threads that appeared before or between hook notifications.
 *
 * The crate exposes only the DLL lifecycle; the platform-independent pieces
 * (classification table, bookkeeping tables, palette) compile on every
 * target so their logic can be tested without a Win32 environment.
 */
#[cfg(target_os = "windows")]
mod apply;
pub mod capabilities;
pub mod classify;
#[cfg(target_os = "windows")]
mod context;
#[cfg(target_os = "windows")]
mod diag;
pub mod error;
#[cfg(target_os = "windows")]
mod hooks;
#[cfg(target_os = "windows")]
mod interceptors;
pub mod palette;
#[cfg(target_os = "windows")]
mod rescan;
pub mod tables;
#[cfg(target_os = "windows")]
mod watcher;

pub use classify::{ControlClass, InterceptorKind, MarkerKind, Strategy, ThemeChoice};
pub use error::{PlatformError, Result as PlatformResult};
pub use palette::Color;

#[cfg(target_os = "windows")]
mod entry {
    use crate::{context, diag, hooks, rescan};

    use std::ffi::c_void;

    use windows::Win32::Foundation::HINSTANCE;
    use windows::Win32::System::SystemServices::{
        DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH, DLL_THREAD_ATTACH, DLL_THREAD_DETACH,
    };
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::core::BOOL;

    #[unsafe(no_mangle)]
    #[allow(non_snake_case)]
    extern "system" fn DllMain(
        module: HINSTANCE,
        call_reason: u32,
        _reserved: *mut c_void,
    ) -> BOOL {
        match call_reason {
            DLL_PROCESS_ATTACH => process_attach(module),
            DLL_THREAD_ATTACH => {
                if let Some(ctx) = context::get() {
                    hooks::install_on_thread(ctx, unsafe { GetCurrentThreadId() });
                }
            }
            DLL_THREAD_DETACH => {
                if let Some(ctx) = context::get() {
                    hooks::remove_from_thread(ctx, unsafe { GetCurrentThreadId() });
                }
            }
            DLL_PROCESS_DETACH => process_detach(),
            _ => {}
        }
        true.into()
    }

    fn process_attach(module: HINSTANCE) {
        diag::init();
        let ctx = context::init(module);
        log::debug!(
            "[Lifecycle] darkdialogs {} attached to pid {}",
            env!("CARGO_PKG_VERSION"),
            ctx.process_id()
        );
        // Process-wide preference first, so windows created from here on
        // inherit dark menus and scrollbars without per-window fixes.
        ctx.capabilities().force_dark_app_mode();
        rescan::spawn(ctx);
    }

    fn process_detach() {
        if let Some(ctx) = context::get() {
            hooks::teardown_all(ctx);
            ctx.release_brush();
            log::debug!("[Lifecycle] darkdialogs detached");
        }
    }
}
