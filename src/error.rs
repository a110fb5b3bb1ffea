/*
 * Error surface for the dark theming layer. Nothing here is ever shown to an
 * end user: the library is a best-effort cosmetic layer, so failures are
 * logged at the boundary and the host keeps running unstyled.
 *
 * The module is portable so platform-independent logic can be compiled and
 * tested on every target.
 */
use std::fmt;

#[derive(Debug)]
pub enum PlatformError {
    /// A Win32 call failed or produced an unusable result.
    OperationFailed(String),
    /// A window, hook, or GDI handle was invalid at the point of use.
    InvalidHandle(String),
    /// A process/thread snapshot could not be taken; callers skip the pass
    /// and retry on their next cycle.
    SnapshotFailed(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::SnapshotFailed(msg) => write!(f, "snapshot failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::OperationFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_variant_context() {
        let err = PlatformError::SnapshotFailed("no toolhelp".into());
        assert!(err.to_string().contains("snapshot failed"));
        assert!(err.to_string().contains("no toolhelp"));
    }
}
