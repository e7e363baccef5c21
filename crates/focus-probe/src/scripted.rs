//! Deterministic probe for tests.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{FocusProbe, Result};

/// Probe that replays a fixed sequence of titles, then reports nothing.
///
/// An empty string in the script stands for "no window focused". Every call
/// to [`FocusProbe::query`] is counted, including those after the script is
/// exhausted.
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    /// Remaining titles, front first.
    script: Mutex<VecDeque<String>>,
    /// Number of queries answered so far.
    queries: AtomicUsize,
}

impl ScriptedProbe {
    /// Create a probe that answers with `titles` in order.
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(titles.into_iter().map(Into::into).collect()),
            queries: AtomicUsize::new(0),
        }
    }

    /// Append a title to the end of the script.
    pub fn push(&self, title: impl Into<String>) {
        self.script.lock().push_back(title.into());
    }

    /// Number of queries answered so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of scripted titles not yet served.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl FocusProbe for ScriptedProbe {
    fn query(&self) -> Result<Option<String>> {
        let next = self.script.lock().pop_front();
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(next.filter(|title| !title.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_then_goes_quiet() {
        let probe = ScriptedProbe::new(["a", "", "b"]);
        assert_eq!(probe.query().unwrap().as_deref(), Some("a"));
        assert_eq!(probe.query().unwrap(), None);
        probe.push("c");
        assert_eq!(probe.remaining(), 2);
        assert_eq!(probe.query().unwrap().as_deref(), Some("b"));
        assert_eq!(probe.query().unwrap().as_deref(), Some("c"));
        assert_eq!(probe.query().unwrap(), None);
        assert_eq!(probe.queries(), 5);
    }
}
