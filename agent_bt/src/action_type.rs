use agent_bt_common::{Action, ActionFn, Condition, ConditionFn, PredicateFn, Status};

/// A leaf of the tree.
///
/// Conditions resolve in the tick they are called, actions may keep running
/// across ticks. Neither holds state of its own: whatever must persist lives
/// in the callback or in the shared agent state.
pub enum ActionType<S> {
    Condition(Box<dyn Condition<S>>),
    Action(Box<dyn Action<S>>),
}

impl<S> ActionType<S> {
    pub fn condition<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&S) -> Status + 'static,
    {
        ActionType::Condition(Box::new(ConditionFn::new(label, check)))
    }

    pub fn predicate<P>(label: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&S) -> bool + 'static,
    {
        ActionType::Condition(Box::new(PredicateFn::new(label, predicate)))
    }

    pub fn action<F>(label: impl Into<String>, tick: F) -> Self
    where
        F: FnMut(&mut S) -> Status + 'static,
    {
        ActionType::Action(Box::new(ActionFn::new(label, tick)))
    }

    /// Ticks the leaf once.
    ///
    /// A condition reporting `Status::Running` breaks its contract, it is
    /// treated as `Status::Failure` and logged.
    #[tracing::instrument(level = "trace", name = "Leaf", skip_all, fields(leaf = self.name()), ret)]
    pub fn tick(&mut self, shared: &mut S) -> Status {
        match self {
            ActionType::Condition(condition) => match condition.check(shared) {
                Status::Running => {
                    tracing::error!(
                        condition = condition.name(),
                        "condition reported Running, treating it as Failure"
                    );
                    Status::Failure
                }
                status => status,
            },
            ActionType::Action(action) => action.tick(shared),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ActionType::Condition(condition) => condition.name(),
            ActionType::Action(action) => action.name(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ActionType::Condition(_) => "Condition",
            ActionType::Action(_) => "Action",
        }
    }
}

impl<S, F> From<ConditionFn<F>> for ActionType<S>
where
    F: Fn(&S) -> Status + 'static,
{
    fn from(condition: ConditionFn<F>) -> Self {
        ActionType::Condition(Box::new(condition))
    }
}

impl<S, P> From<PredicateFn<P>> for ActionType<S>
where
    P: Fn(&S) -> bool + 'static,
{
    fn from(condition: PredicateFn<P>) -> Self {
        ActionType::Condition(Box::new(condition))
    }
}

impl<S, F> From<ActionFn<F>> for ActionType<S>
where
    F: FnMut(&mut S) -> Status + 'static,
{
    fn from(action: ActionFn<F>) -> Self {
        ActionType::Action(Box::new(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_condition_passes_through() {
        let mut leaf = ActionType::predicate("even", |counter: &Counter| counter.value % 2 == 0);
        let mut counter = Counter::default();
        assert_eq!(leaf.kind(), "Condition");
        assert_eq!(leaf.name(), "even");

        assert_eq!(leaf.tick(&mut counter), Status::Success);
        counter.value = 3;
        assert_eq!(leaf.tick(&mut counter), Status::Failure);
    }

    #[test]
    fn test_running_condition_is_coerced_to_failure() {
        let mut leaf = ActionType::condition("broken", |_: &Counter| Status::Running);
        let mut counter = Counter::default();

        assert_eq!(leaf.tick(&mut counter), Status::Failure);
        assert_eq!(leaf.tick(&mut counter), Status::Failure);
    }

    #[test]
    fn test_action_returns_status_unchanged() {
        let mut leaf = ActionType::action("count_to_three", |counter: &mut Counter| {
            counter.value += 1;
            if counter.value < 3 {
                Status::Running
            } else {
                Status::Success
            }
        });
        let mut counter = Counter::default();
        assert_eq!(leaf.kind(), "Action");

        assert_eq!(leaf.tick(&mut counter), Status::Running);
        assert_eq!(leaf.tick(&mut counter), Status::Running);
        assert_eq!(leaf.tick(&mut counter), Status::Success);
        assert_eq!(counter.value, 3);
    }

    #[test]
    fn test_from_closure_adapters() {
        let condition: ActionType<Counter> =
            ConditionFn::new("never", |_: &Counter| Status::Failure).into();
        let action: ActionType<Counter> =
            ActionFn::new("noop", |_: &mut Counter| Status::Success).into();
        assert_eq!(condition.kind(), "Condition");
        assert_eq!(action.name(), "noop");
    }
}
