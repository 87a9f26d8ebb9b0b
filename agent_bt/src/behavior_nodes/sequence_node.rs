use agent_bt_common::Status;

use crate::child::Child;

/// Short-circuited AND over the children.
///
/// `index` is the child in progress. It is only ever 0 or a valid index into
/// `children`, and is set back to 0 whenever the sequence resolves, so a
/// finished sequence never leaks its position into the next activation.
pub struct SequenceState<S> {
    label: String,
    children: Vec<Child<S>>,
    index: usize,
}

impl<S> SequenceState<S> {
    /// `children` is checked for emptiness by the caller.
    pub fn new(label: String, children: Vec<Child<S>>) -> Self {
        debug_assert!(!children.is_empty());
        Self {
            label,
            children,
            index: 0,
        }
    }

    /// Resumes at the child in progress.
    ///
    /// Succeeding children do not end the tick, the next one is ticked right
    /// away. Only a running child makes the sequence wait for the next frame.
    #[tracing::instrument(level = "trace", name = "Sequence", skip_all, fields(label = %self.label, index = self.index), ret)]
    pub fn tick(&mut self, shared: &mut S) -> Status {
        loop {
            let child = &mut self.children[self.index];
            match child.tick(shared) {
                Status::Running => return Status::Running,
                Status::Failure => {
                    self.index = 0;
                    return Status::Failure;
                }
                Status::Success => {
                    self.index += 1;
                    if self.index == self.children.len() {
                        self.index = 0;
                        return Status::Success;
                    }
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.children.iter_mut().for_each(Child::reset);
        self.index = 0;
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub fn children(&self) -> &[Child<S>] {
        &self.children
    }
}
