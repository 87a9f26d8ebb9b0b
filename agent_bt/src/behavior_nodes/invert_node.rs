use agent_bt_common::Status;

use crate::child::Child;

pub struct InvertState<S> {
    child: Box<Child<S>>,
}

impl<S> InvertState<S> {
    pub fn new(child: Child<S>) -> Self {
        Self {
            child: Box::new(child),
        }
    }

    #[tracing::instrument(level = "trace", name = "Invert", skip_all, ret)]
    pub fn tick(&mut self, shared: &mut S) -> Status {
        self.child.tick(shared).invert()
    }

    pub fn reset(&mut self) {
        self.child.reset();
    }

    #[cfg(test)]
    pub fn child(&self) -> &Child<S> {
        &self.child
    }
}
