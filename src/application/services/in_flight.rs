use std::sync::atomic::{AtomicUsize, Ordering};

/// Kinds of outbound agent call tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Classification,
    Report,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classification => write!(f, "classification"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// In-flight counters, one per action kind.
///
/// With `single_flight`, a second call of a kind already running is refused.
#[derive(Debug, Default)]
pub struct InFlight {
    classification: AtomicUsize,
    report: AtomicUsize,
    single_flight: bool,
}

impl InFlight {
    #[must_use]
    pub const fn new(single_flight: bool) -> Self {
        Self {
            classification: AtomicUsize::new(0),
            report: AtomicUsize::new(0),
            single_flight,
        }
    }

    const fn counter(&self, kind: ActionKind) -> &AtomicUsize {
        match kind {
            ActionKind::Classification => &self.classification,
            ActionKind::Report => &self.report,
        }
    }

    /// Marks `kind` as running until the returned guard is dropped.
    /// `None` when single-flight is on and a call of that kind is already running.
    #[must_use]
    pub fn begin(&self, kind: ActionKind) -> Option<InFlightGuard<'_>> {
        let counter = self.counter(kind);
        if self.single_flight {
            counter
                .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                .ok()?;
        } else {
            counter.fetch_add(1, Ordering::AcqRel);
        }
        Some(InFlightGuard { counter })
    }

    #[must_use]
    pub fn is_running(&self, kind: ActionKind) -> bool {
        self.counter(kind).load(Ordering::Acquire) > 0
    }
}

/// Clears its in-flight mark on drop, whichever way the call ended.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}
