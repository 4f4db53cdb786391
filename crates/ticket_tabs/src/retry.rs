//! Bounded retry loop for tab activation, plus the per-opener generation
//! counter that supersedes in-flight cycles.
//!
//! Tabs of the notebook can mount after the resolution pass that wants to
//! activate one of them, so activation is re-attempted on a fixed interval
//! until it succeeds or the attempt budget runs out. The wait is a caller
//! supplied future so production code uses a real timer while tests run on a
//! simulated clock.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

pub const MAX_ATTEMPTS: u32 = 10;
pub const RETRY_INTERVAL_MS: u32 = 80;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            interval_ms: RETRY_INTERVAL_MS,
        }
    }
}

/// Monotonic counter shared by all cycles of one opener.
///
/// Beginning a cycle bumps the counter, which invalidates the tokens of every
/// cycle started earlier. At most one cycle per opener is therefore ever
/// actively polling.
#[derive(Clone, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

impl Generation {
    pub fn begin_cycle(&self) -> CycleToken {
        let id = self.current.get() + 1;
        self.current.set(id);
        CycleToken {
            current: self.current.clone(),
            id,
        }
    }

    /// Invalidate every outstanding token without starting a new cycle.
    /// Used on teardown.
    pub fn invalidate_all(&self) {
        self.current.set(self.current.get() + 1);
    }
}

/// Shared liveness flag for one opener's delayed tasks.
///
/// Tasks spawned with a settle delay capture a clone and must bail out once
/// the flag has been lowered by teardown, so nothing re-arms an observer or
/// starts a cycle after detach.
#[derive(Clone)]
pub struct TeardownFlag {
    up: Rc<Cell<bool>>,
}

impl TeardownFlag {
    pub fn new() -> Self {
        Self {
            up: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_up(&self) -> bool {
        self.up.get()
    }

    /// Lower the flag permanently. All clones observe the change.
    pub fn lower(&self) {
        self.up.set(false);
    }
}

impl Default for TeardownFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the generation counter taken when a cycle starts.
#[derive(Clone)]
pub struct CycleToken {
    current: Rc<Cell<u64>>,
    id: u64,
}

impl CycleToken {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    Activated,
    Exhausted,
    Superseded,
}

/// Drive `attempt` until it succeeds, the budget is spent, or the token is
/// superseded by a newer cycle. Each attempt is preceded by one interval wait,
/// matching the cadence of an interval timer.
///
/// Exhaustion is an expected outcome, not an error: the target tab may simply
/// not exist on the current form.
pub async fn retry_activation<A, W, F>(
    policy: RetryPolicy,
    token: &CycleToken,
    mut attempt: A,
    mut wait: W,
) -> RetryOutcome
where
    A: FnMut() -> bool,
    W: FnMut(u32) -> F,
    F: Future<Output = ()>,
{
    for _ in 0..policy.max_attempts {
        wait(policy.interval_ms).await;
        if !token.is_current() {
            return RetryOutcome::Superseded;
        }
        if attempt() {
            return RetryOutcome::Activated;
        }
    }
    RetryOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::future::ready;

    fn simulated_clock(elapsed: Rc<Cell<u32>>) -> impl FnMut(u32) -> std::future::Ready<()> {
        move |ms| {
            elapsed.set(elapsed.get() + ms);
            ready(())
        }
    }

    #[test]
    fn test_exhausts_after_ten_attempts() {
        let gen = Generation::default();
        let token = gen.begin_cycle();
        let attempts = Rc::new(Cell::new(0u32));
        let elapsed = Rc::new(Cell::new(0u32));

        let a = attempts.clone();
        let outcome = block_on(retry_activation(
            RetryPolicy::default(),
            &token,
            move || {
                a.set(a.get() + 1);
                false
            },
            simulated_clock(elapsed.clone()),
        ));

        assert_eq!(outcome, RetryOutcome::Exhausted);
        assert_eq!(attempts.get(), 10);
        assert_eq!(elapsed.get(), 800);
    }

    #[test]
    fn test_stops_on_first_success() {
        let gen = Generation::default();
        let token = gen.begin_cycle();
        let attempts = Rc::new(Cell::new(0u32));
        let elapsed = Rc::new(Cell::new(0u32));

        let a = attempts.clone();
        let outcome = block_on(retry_activation(
            RetryPolicy::default(),
            &token,
            move || {
                a.set(a.get() + 1);
                a.get() == 3
            },
            simulated_clock(elapsed.clone()),
        ));

        assert_eq!(outcome, RetryOutcome::Activated);
        assert_eq!(attempts.get(), 3);
        assert_eq!(elapsed.get(), 240);
    }

    #[test]
    fn test_retry_supersession() {
        let gen = Generation::default();
        let token = gen.begin_cycle();
        let attempts = Rc::new(Cell::new(0u32));

        // A newer cycle starts while this one is waiting on its 4th tick
        let g = gen.clone();
        let counter = Rc::new(Cell::new(0u32));
        let wait = move |_ms: u32| {
            counter.set(counter.get() + 1);
            if counter.get() == 4 {
                g.begin_cycle();
            }
            ready(())
        };

        let a = attempts.clone();
        let outcome = block_on(retry_activation(
            RetryPolicy::default(),
            &token,
            move || {
                a.set(a.get() + 1);
                false
            },
            wait,
        ));

        assert_eq!(outcome, RetryOutcome::Superseded);
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn test_lowered_flag_reaches_pending_tasks() {
        // A delayed task holds its own clone of the flag; teardown through
        // the opener's handle must still stop it.
        let alive = TeardownFlag::new();
        let held_by_task = alive.clone();
        assert!(held_by_task.is_up());
        alive.lower();
        assert!(!held_by_task.is_up());
    }

    #[test]
    fn test_invalidate_all() {
        let gen = Generation::default();
        let token = gen.begin_cycle();
        assert!(token.is_current());
        gen.invalidate_all();
        assert!(!token.is_current());
    }
}
