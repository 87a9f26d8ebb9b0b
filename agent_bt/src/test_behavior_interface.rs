use std::{cell::RefCell, collections::HashSet};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{ActionType, Status};

pub fn init_tracing() {
    let _ignore = tracing_subscriber::Registry::default()
        .with(tracing_forest::ForestLayer::default())
        .try_init();
}

/// Shared state for tests.
///
/// Records the id of every leaf in the order it was ticked and holds a set
/// of flags that `TestAction::Flag` conditions read.
#[derive(Debug, Default)]
pub struct TestShared {
    calls: RefCell<Vec<&'static str>>,
    flags: HashSet<&'static str>,
}

impl TestShared {
    pub fn record(&self, id: &'static str) {
        self.calls.borrow_mut().push(id);
    }

    pub fn take_calls(&self) -> Vec<&'static str> {
        self.calls.take()
    }

    pub fn count(&self, id: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == id).count()
    }

    pub fn set_flag(&mut self, id: &'static str, value: bool) {
        if value {
            self.flags.insert(id);
        } else {
            self.flags.remove(id);
        }
    }

    pub fn flag(&self, id: &str) -> bool {
        self.flags.contains(id)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TestAction {
    Success(&'static str),
    Failure(&'static str),
    /// Returns `Running` for `times` ticks, then `output`, then starts over
    Run {
        id: &'static str,
        times: usize,
        output: Status,
    },
    /// Condition that succeeds while the flag of the same id is set
    Flag(&'static str),
}

impl From<TestAction> for ActionType<TestShared> {
    fn from(action: TestAction) -> Self {
        match action {
            TestAction::Success(id) => ActionType::action(id, move |shared: &mut TestShared| {
                shared.record(id);
                Status::Success
            }),
            TestAction::Failure(id) => ActionType::action(id, move |shared: &mut TestShared| {
                shared.record(id);
                Status::Failure
            }),
            TestAction::Run { id, times, output } => {
                let mut ticks = 0;
                ActionType::action(id, move |shared: &mut TestShared| {
                    shared.record(id);
                    if ticks < times {
                        ticks += 1;
                        Status::Running
                    } else {
                        ticks = 0;
                        output
                    }
                })
            }
            TestAction::Flag(id) => ActionType::predicate(id, move |shared: &TestShared| {
                shared.record(id);
                shared.flag(id)
            }),
        }
    }
}
