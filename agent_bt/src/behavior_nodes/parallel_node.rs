use agent_bt_common::{ParallelPolicy, Status};

use crate::child::Child;

/// Ticks every unfinished child on each tick.
///
/// `completed` records the children that already resolved during the current
/// activation. They are not ticked again until the parallel itself resolves,
/// at which point the record is cleared and the unfinished children are reset.
pub struct ParallelState<S> {
    label: String,
    policy: ParallelPolicy,
    children: Vec<Child<S>>,
    completed: Vec<Option<Status>>,
}

impl<S> ParallelState<S> {
    pub fn new(label: String, policy: ParallelPolicy, children: Vec<Child<S>>) -> Self {
        debug_assert!(!children.is_empty());
        let completed = vec![None; children.len()];
        Self {
            label,
            policy,
            children,
            completed,
        }
    }

    #[tracing::instrument(level = "trace", name = "Parallel", skip_all, fields(label = %self.label, policy = ?self.policy), ret)]
    pub fn tick(&mut self, shared: &mut S) -> Status {
        // Outcome that resolves the parallel as soon as one child reports it
        let decisive = match self.policy {
            ParallelPolicy::RequireAll => Status::Failure,
            ParallelPolicy::RequireOne => Status::Success,
        };

        let mut resolved = None;
        for (child, completed) in self.children.iter_mut().zip(self.completed.iter_mut()) {
            if completed.is_some() {
                continue;
            }
            let status = child.tick(shared);
            if status.is_completed() {
                *completed = Some(status);
            }
            if status == decisive {
                resolved = Some(decisive);
                break;
            }
        }

        let resolved = resolved.or_else(|| {
            self.completed
                .iter()
                .all(Option::is_some)
                .then(|| decisive.invert())
        });
        match resolved {
            Some(status) => {
                // Abandoned children start over on the next activation
                for (child, completed) in self.children.iter_mut().zip(self.completed.iter_mut()) {
                    if completed.take().is_none() {
                        child.reset();
                    }
                }
                status
            }
            None => Status::Running,
        }
    }

    pub fn reset(&mut self) {
        self.children.iter_mut().for_each(Child::reset);
        self.completed.fill(None);
    }

    #[cfg(test)]
    pub fn children(&self) -> &[Child<S>] {
        &self.children
    }
}
