use crate::Status;

/// A leaf that resolves within a single tick.
///
/// Conditions only get a read-only view of the shared state and are fully
/// re-evaluated on every tick.
pub trait Condition<S> {
    /// Must return `Status::Success` or `Status::Failure`.
    ///
    /// `Status::Running` is a contract violation. The engine coerces it to
    /// `Status::Failure` and logs an error.
    fn check(&self, shared: &S) -> Status;

    /// Identify your condition
    fn name(&self) -> &str;
}

pub trait Action<S> {
    /// Performs one frame worth of work.
    ///
    /// Return `Status::Running` to be ticked again on the next frame. The
    /// action decides for itself when it is done (`Status::Success`) or
    /// impossible (`Status::Failure`).
    fn tick(&mut self, shared: &mut S) -> Status;

    /// Identify your action
    fn name(&self) -> &str;
}

/// Condition built from a label and a closure.
pub struct ConditionFn<F> {
    label: String,
    check: F,
}

impl<F> ConditionFn<F> {
    pub fn new(label: impl Into<String>, check: F) -> Self {
        Self {
            label: label.into(),
            check,
        }
    }
}

impl<S, F> Condition<S> for ConditionFn<F>
where
    F: Fn(&S) -> Status,
{
    fn check(&self, shared: &S) -> Status {
        (self.check)(shared)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Condition from a boolean predicate, `true` maps to `Status::Success`.
pub struct PredicateFn<P> {
    label: String,
    predicate: P,
}

impl<P> PredicateFn<P> {
    pub fn new(label: impl Into<String>, predicate: P) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }
}

impl<S, P> Condition<S> for PredicateFn<P>
where
    P: Fn(&S) -> bool,
{
    fn check(&self, shared: &S) -> Status {
        Status::from((self.predicate)(shared))
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Action built from a label and a closure.
pub struct ActionFn<F> {
    label: String,
    tick: F,
}

impl<F> ActionFn<F> {
    pub fn new(label: impl Into<String>, tick: F) -> Self {
        Self {
            label: label.into(),
            tick,
        }
    }
}

impl<S, F> Action<S> for ActionFn<F>
where
    F: FnMut(&mut S) -> Status,
{
    fn tick(&mut self, shared: &mut S) -> Status {
        (self.tick)(shared)
    }

    fn name(&self) -> &str {
        &self.label
    }
}
