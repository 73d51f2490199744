//! Sequential chain execution.
//!
//! Both chains of a dispatch call — decorators, then handlers — run through
//! the same driver: steps execute one at a time, each may suspend for an
//! unbounded duration, and the chain never advances until the current step
//! signals. There is deliberately no per-step timeout; a step that never
//! signals stalls its own call and nothing else.
//!
//! Termination is tracked by a three-state [`Latch`]. The latch is monotonic:
//! once it leaves `Pending` it never changes again, and no further step is
//! invoked. This replaces the classic mutable "done" flag closed over by
//! nested callbacks with state the executor owns outright.

use nsbus_core::{BoxError, Signal};
use std::ops::AsyncFnMut;

/// Per-call termination state of one chain.
#[derive(Debug)]
pub(crate) enum Latch<V> {
    /// No step has terminated the chain yet.
    Pending,
    /// A step resolved; `V` is the final value.
    Resolved(V),
    /// A step rejected; the error is final.
    Rejected(BoxError),
}

impl<V> Latch<V> {
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self, Latch::Pending)
    }

    /// Fold one step's signal into the latch.
    ///
    /// Transitions only out of `Pending`; anything arriving after settlement
    /// is a no-op and cannot alter the outcome.
    pub(crate) fn settle(&mut self, signal: Signal<V>) {
        if !self.is_pending() {
            return;
        }
        match signal {
            Signal::Next => {}
            Signal::Resolve(value) => *self = Latch::Resolved(value),
            Signal::Reject(error) => *self = Latch::Rejected(error),
        }
    }
}

/// Drive `steps` sequentially until the latch settles or the list runs out.
///
/// `run` invokes a single step and maps its own contract onto a [`Signal`];
/// the decorator and handler chains differ only in that mapping and in how
/// the caller interprets a still-`Pending` latch after exhaustion.
pub(crate) async fn drive<T, V>(
    steps: Vec<T>,
    mut run: impl AsyncFnMut(T) -> Signal<V>,
) -> Latch<V> {
    let mut latch = Latch::Pending;
    for step in steps {
        if !latch.is_pending() {
            break;
        }
        let signal = run(step).await;
        latch.settle(signal);
    }
    latch
}

#[cfg(test)]
mod tests {
    use super::{Latch, drive};
    use nsbus_core::Signal;

    #[test]
    fn latch_settles_once() {
        let mut latch: Latch<u32> = Latch::Pending;
        latch.settle(Signal::Resolve(1));
        assert!(matches!(latch, Latch::Resolved(1)));

        // A stray late signal must not alter the settled outcome.
        latch.settle(Signal::Resolve(2));
        assert!(matches!(latch, Latch::Resolved(1)));
        latch.settle(Signal::reject("late"));
        assert!(matches!(latch, Latch::Resolved(1)));
    }

    #[test]
    fn next_keeps_the_latch_pending() {
        let mut latch: Latch<u32> = Latch::Pending;
        latch.settle(Signal::Next);
        assert!(latch.is_pending());
    }

    #[tokio::test]
    async fn steps_after_settlement_are_not_invoked() {
        let mut ran = Vec::new();
        let latch = drive(vec![1, 2, 3], async |step| {
            ran.push(step);
            if step == 2 {
                Signal::Resolve(step)
            } else {
                Signal::Next
            }
        })
        .await;

        assert!(matches!(latch, Latch::Resolved(2)));
        assert_eq!(ran, vec![1, 2]);
    }

    #[tokio::test]
    async fn exhaustion_leaves_the_latch_pending() {
        let latch: Latch<u32> = drive(vec![(), ()], async |_| Signal::Next).await;
        assert!(latch.is_pending());
    }
}
