//! focus-probe: ask the window system which window holds input focus.
//!
//! The crate exposes one capability, [`FocusProbe::focused_label`], which
//! returns the title of the focused window or the empty string. Adapters:
//! - [`X11Probe`] on Linux, reading `_NET_ACTIVE_WINDOW` from the root window.
//! - [`Win32Probe`] on Windows, via `GetForegroundWindow`.
//! - [`NullProbe`] everywhere, used when no display is reachable.
//! - [`ScriptedProbe`] for tests, replaying a fixed list of titles.
//!
//! Failures from the window system are never fatal to callers: the fallible
//! [`FocusProbe::query`] is mapped to an empty label by the provided
//! [`FocusProbe::focused_label`].

use std::{result::Result as StdResult, sync::Arc};

use thiserror::Error;
use tracing::debug;
#[cfg(not(target_os = "windows"))]
use tracing::warn;

mod scripted;
#[cfg(target_os = "windows")]
mod win32;
#[cfg(target_os = "linux")]
mod x11;

pub use scripted::ScriptedProbe;
#[cfg(target_os = "windows")]
pub use win32::Win32Probe;
#[cfg(target_os = "linux")]
pub use x11::X11Probe;

/// Convenient result type for probe operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while querying the window system.
///
/// All of these are recoverable; the sampling loop treats them as "nothing
/// focused" for the tick in which they occur.
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open a connection to the display server.
    #[error("display connection failed: {0}")]
    Connect(String),
    /// A request to the window system failed or returned a malformed reply.
    #[error("window system request failed: {0}")]
    Request(String),
    /// The window title could not be decoded as text.
    #[error("window title is not valid text")]
    Encoding,
}

/// Source of the currently focused window's title.
pub trait FocusProbe: Send + Sync {
    /// Query the title of the focused window.
    ///
    /// Returns `Ok(None)` when no window is focused or the focused window has
    /// no title.
    fn query(&self) -> Result<Option<String>>;

    /// Title of the focused window, or the empty string if there is none or
    /// the query failed.
    fn focused_label(&self) -> String {
        match self.query() {
            Ok(title) => title.unwrap_or_default(),
            Err(err) => {
                debug!(error = %err, "focus query failed");
                String::new()
            }
        }
    }
}

/// Probe that never reports a focused window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl FocusProbe for NullProbe {
    fn query(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Construct the best probe available on this platform.
///
/// If the native adapter cannot be initialised (for instance when no X
/// display is reachable) a warning is logged and a [`NullProbe`] is returned.
pub fn native() -> Arc<dyn FocusProbe> {
    #[cfg(target_os = "linux")]
    {
        match X11Probe::connect() {
            Ok(probe) => Arc::new(probe),
            Err(err) => {
                warn!(error = %err, "X11 focus probe unavailable; no windows will be sampled");
                Arc::new(NullProbe)
            }
        }
    }
    #[cfg(target_os = "windows")]
    {
        Arc::new(Win32Probe)
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        warn!("no focus probe for this platform; no windows will be sampled");
        Arc::new(NullProbe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe whose every query fails.
    struct FailingProbe;

    impl FocusProbe for FailingProbe {
        fn query(&self) -> Result<Option<String>> {
            Err(Error::Request("bad reply".into()))
        }
    }

    #[test]
    fn test_failed_query_is_empty_label() {
        assert_eq!(FailingProbe.focused_label(), "");
    }

    #[test]
    fn test_null_probe_is_empty() {
        assert_eq!(NullProbe.focused_label(), "");
    }

    #[test]
    fn test_shared_probe_replays() {
        let probe: Arc<dyn FocusProbe> = Arc::new(ScriptedProbe::new(["Editor"]));
        assert_eq!(probe.focused_label(), "Editor");
        assert_eq!(probe.focused_label(), "");
    }
}
