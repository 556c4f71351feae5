use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::model::{Contest, JoinOutcome};

/// Persistence seam for contest slots.
///
/// `try_join` must take a slot atomically: check-then-increment as two
/// separate steps lets two users both take the last slot. A SQL backend would
/// implement it as a single conditional `UPDATE ... WHERE participants < capacity`.
pub trait ContestStore: Send + Sync {
    fn try_join(&self, contest_id: &str) -> JoinOutcome;

    /// Give a slot back, e.g. when a join is rolled back.
    fn leave(&self, contest_id: &str) -> bool;

    fn participants(&self, contest_id: &str) -> Option<u32>;
}

#[derive(Debug)]
struct Slots {
    capacity: u32,
    taken: AtomicU32,
}

/// Lock-free in-process contest store.
#[derive(Debug, Default)]
pub struct InMemoryContestStore {
    contests: HashMap<String, Slots>,
}

impl InMemoryContestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, contest: &Contest) {
        self.contests.insert(
            contest.id.clone(),
            Slots {
                capacity: contest.capacity,
                taken: AtomicU32::new(0),
            },
        );
    }
}

impl ContestStore for InMemoryContestStore {
    fn try_join(&self, contest_id: &str) -> JoinOutcome {
        let Some(slots) = self.contests.get(contest_id) else {
            return JoinOutcome::UnknownContest;
        };
        match slots
            .taken
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < slots.capacity).then_some(taken + 1)
            }) {
            Ok(previous) => JoinOutcome::Joined {
                participants: previous + 1,
            },
            Err(_) => {
                debug!(contest_id, capacity = slots.capacity, "contest full");
                JoinOutcome::Full
            }
        }
    }

    fn leave(&self, contest_id: &str) -> bool {
        self.contests.get(contest_id).is_some_and(|slots| {
            slots
                .taken
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                    taken.checked_sub(1)
                })
                .is_ok()
        })
    }

    fn participants(&self, contest_id: &str) -> Option<u32> {
        self.contests
            .get(contest_id)
            .map(|slots| slots.taken.load(Ordering::Acquire))
    }
}
