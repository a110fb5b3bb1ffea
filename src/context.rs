/*
 * The process-scoped context: one instance per host process, owning the
 * shared drawing brush, the resolved dark-mode capabilities, and the two
 * bookkeeping tables behind a single lock.
 *
 * The context lives in a `OnceLock` only because Win32 hook and subclass
 * callbacks cannot carry user data; everything that can take `&EnforcerContext`
 * as a parameter does, and the callbacks fetch it once at their entry point.
 */
use crate::capabilities::DarkModeCapabilities;
use crate::palette::{self, DARK_BACKGROUND};
use crate::tables::{ThreadHookTable, WindowRegistry};

use std::ffi::c_void;
use std::sync::{Mutex, OnceLock};

use windows::Win32::Foundation::HINSTANCE;
use windows::Win32::Graphics::Gdi::{CreateSolidBrush, DeleteObject, HBRUSH};
use windows::Win32::System::Threading::GetCurrentProcessId;

#[derive(Default)]
pub(crate) struct EnforcerTables {
    pub(crate) windows: WindowRegistry,
    pub(crate) hooks: ThreadHookTable,
}

pub(crate) struct EnforcerContext {
    process_id: u32,
    // Raw handle values so the struct is shareable; wrapped on use.
    module_raw: isize,
    brush_raw: isize,
    capabilities: DarkModeCapabilities,
    tables: Mutex<EnforcerTables>,
}

static CONTEXT: OnceLock<EnforcerContext> = OnceLock::new();

/// Builds the context on first call (process attach) and returns it.
pub(crate) fn init(module: HINSTANCE) -> &'static EnforcerContext {
    CONTEXT.get_or_init(|| {
        let brush = unsafe { CreateSolidBrush(palette::color_to_colorref(DARK_BACKGROUND)) };
        if brush.is_invalid() {
            log::warn!("[Context] CreateSolidBrush failed; backgrounds will not be filled");
        }
        EnforcerContext {
            process_id: unsafe { GetCurrentProcessId() },
            module_raw: module.0 as isize,
            brush_raw: brush.0 as isize,
            capabilities: DarkModeCapabilities::resolve(),
            tables: Mutex::new(EnforcerTables::default()),
        }
    })
}

pub(crate) fn get() -> Option<&'static EnforcerContext> {
    CONTEXT.get()
}

impl EnforcerContext {
    pub(crate) fn process_id(&self) -> u32 {
        self.process_id
    }

    pub(crate) fn module(&self) -> HINSTANCE {
        HINSTANCE(self.module_raw as *mut c_void)
    }

    /// The shared background brush. Read-only after creation; callers never
    /// delete it.
    pub(crate) fn brush(&self) -> HBRUSH {
        HBRUSH(self.brush_raw as *mut c_void)
    }

    pub(crate) fn capabilities(&self) -> &DarkModeCapabilities {
        &self.capabilities
    }

    /// Runs `f` with the tables under the process-wide lock. Callers keep
    /// the closure small and make no blocking calls inside it.
    pub(crate) fn with_tables<R>(&self, f: impl FnOnce(&mut EnforcerTables) -> R) -> R {
        match self.tables.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Deletes the shared brush at process detach. The context itself stays
    /// in place (static), but no painting happens after teardown.
    pub(crate) fn release_brush(&self) {
        let brush = self.brush();
        if !brush.is_invalid() {
            unsafe {
                let _ = DeleteObject(brush.into());
            }
        }
    }
}
