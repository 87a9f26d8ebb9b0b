use agent_bt_common::Status;

use crate::child::Child;

/// Short-circuited OR over the children, in priority order.
///
/// Same `index` rules as the sequence: reset to 0 whenever the select
/// resolves, left in place while a child is running.
pub struct SelectState<S> {
    label: String,
    children: Vec<Child<S>>,
    index: usize,
}

impl<S> SelectState<S> {
    pub fn new(label: String, children: Vec<Child<S>>) -> Self {
        debug_assert!(!children.is_empty());
        Self {
            label,
            children,
            index: 0,
        }
    }

    #[tracing::instrument(level = "trace", name = "Select", skip_all, fields(label = %self.label, index = self.index), ret)]
    pub fn tick(&mut self, shared: &mut S) -> Status {
        loop {
            let child = &mut self.children[self.index];
            match child.tick(shared) {
                Status::Running => return Status::Running,
                Status::Success => {
                    self.index = 0;
                    return Status::Success;
                }
                Status::Failure => {
                    self.index += 1;
                    if self.index == self.children.len() {
                        self.index = 0;
                        return Status::Failure;
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
