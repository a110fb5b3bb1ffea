/*
 * Optional dark-mode capabilities resolved from undocumented uxtheme.dll
 * entry points. Both are exported by ordinal only and are absent on older
 * OS builds; absence is a missed enhancement, never an error. Resolution
 * happens once at process attach and the result is injected through the
 * process context, so no component performs symbol lookups inline.
 */

/// uxtheme ordinal for `AllowDarkModeForWindow(HWND, BOOL)`.
pub const UXTHEME_ORD_ALLOW_DARK_MODE_FOR_WINDOW: usize = 133;
/// uxtheme ordinal for `SetPreferredAppMode(i32)`.
pub const UXTHEME_ORD_SET_PREFERRED_APP_MODE: usize = 135;

/// Which of the undocumented entry points the running OS exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UxThemeOrdinals {
    pub allow_dark_mode_for_window: bool,
    pub set_preferred_app_mode: bool,
}

impl UxThemeOrdinals {
    pub fn has_any(self) -> bool {
        self.allow_dark_mode_for_window || self.set_preferred_app_mode
    }
}

/// Presence check behind an injected lookup so the logic is testable without
/// loading uxtheme.dll.
pub fn resolve_ordinals(has_ordinal: impl Fn(usize) -> bool) -> UxThemeOrdinals {
    UxThemeOrdinals {
        allow_dark_mode_for_window: has_ordinal(UXTHEME_ORD_ALLOW_DARK_MODE_FOR_WINDOW),
        set_preferred_app_mode: has_ordinal(UXTHEME_ORD_SET_PREFERRED_APP_MODE),
    }
}

#[cfg(target_os = "windows")]
mod win {
    use super::*;
    use std::ffi::c_void;
    use windows::Win32::Foundation::{HMODULE, HWND};
    use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
    use windows::core::{BOOL, PCSTR, w};

    #[repr(i32)]
    #[derive(Clone, Copy)]
    pub(crate) enum PreferredAppMode {
        /// The host has no opt-in UI of its own, so dark is forced rather
        /// than merely allowed.
        ForceDark = 2,
    }

    type SetPreferredAppModeFn = unsafe extern "system" fn(PreferredAppMode) -> u32;
    type AllowDarkModeForWindowFn = unsafe extern "system" fn(HWND, BOOL) -> BOOL;

    /// The resolved entry points. Plain fn pointers, so the struct is freely
    /// shared once built.
    pub(crate) struct DarkModeCapabilities {
        set_preferred_app_mode: Option<SetPreferredAppModeFn>,
        allow_dark_mode_for_window: Option<AllowDarkModeForWindowFn>,
    }

    impl DarkModeCapabilities {
        pub(crate) fn resolve() -> Self {
            let absent = Self {
                set_preferred_app_mode: None,
                allow_dark_mode_for_window: None,
            };
            unsafe {
                let module = match LoadLibraryW(w!("uxtheme.dll")) {
                    Ok(module) => module,
                    Err(err) => {
                        log::debug!("[DarkMode] uxtheme.dll unavailable: {err:?}");
                        return absent;
                    }
                };

                let ordinals = resolve_ordinals(|ordinal| {
                    get_uxtheme_proc_address(module, ordinal).is_some()
                });
                if !ordinals.has_any() {
                    log::debug!(
                        "[DarkMode] undocumented uxtheme ordinals missing on this OS build"
                    );
                    return absent;
                }

                Self {
                    set_preferred_app_mode: get_uxtheme_proc_address(
                        module,
                        UXTHEME_ORD_SET_PREFERRED_APP_MODE,
                    )
                    .map(|ptr| {
                        std::mem::transmute::<*const c_void, SetPreferredAppModeFn>(ptr)
                    }),
                    allow_dark_mode_for_window: get_uxtheme_proc_address(
                        module,
                        UXTHEME_ORD_ALLOW_DARK_MODE_FOR_WINDOW,
                    )
                    .map(|ptr| {
                        std::mem::transmute::<*const c_void, AllowDarkModeForWindowFn>(ptr)
                    }),
                }
            }
        }

        /// Process-wide dark preference. Applied once at attach, before any
        /// dialog activates.
        pub(crate) fn force_dark_app_mode(&self) {
            if let Some(set_preferred) = self.set_preferred_app_mode {
                let _ = unsafe { set_preferred(PreferredAppMode::ForceDark) };
                log::debug!("[DarkMode] SetPreferredAppMode(ForceDark) applied");
            }
        }

        /// Per-window dark allowance, used on top-level dialogs and
        /// composited containers.
        pub(crate) fn allow_dark_for(&self, hwnd: HWND) {
            if let Some(allow_dark) = self.allow_dark_mode_for_window {
                let _ = unsafe { allow_dark(hwnd, true.into()) };
            }
        }
    }

    fn get_uxtheme_proc_address(module: HMODULE, ordinal: usize) -> Option<*const c_void> {
        unsafe { GetProcAddress(module, PCSTR(ordinal as *const u8)) }
            .map(|func| func as *const c_void)
    }
}

#[cfg(target_os = "windows")]
pub(crate) use win::DarkModeCapabilities;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_ordinals_reports_per_entry_presence() {
        let ordinals =
            resolve_ordinals(|ordinal| ordinal == UXTHEME_ORD_ALLOW_DARK_MODE_FOR_WINDOW);
        assert!(ordinals.allow_dark_mode_for_window);
        assert!(!ordinals.set_preferred_app_mode);
        assert!(ordinals.has_any());
    }

    #[test]
    fn resolve_ordinals_handles_a_build_without_the_exports() {
        let ordinals = resolve_ordinals(|_| false);
        assert!(!ordinals.allow_dark_mode_for_window);
        assert!(!ordinals.set_preferred_app_mode);
        assert!(!ordinals.has_any());
    }
}
