use std::rc::Rc;

use agent_bt_common::{Behavior, Status};

use crate::{ActionType, BuildError, NodeName, State, behavior_nodes::*};

/// Every kind of node the engine knows about.
pub enum NodeType<S> {
    Leaf(ActionType<S>),
    Invert(InvertState<S>),
    Sequence(SequenceState<S>),
    Select(SelectState<S>),
    Parallel(ParallelState<S>),
}

/// A node in a built tree.
///
/// Publishes the status of its last tick on a watch channel so that
/// [`State`] observers can follow the tree without borrowing it.
pub struct Child<S> {
    node: NodeType<S>,
    status: tokio::sync::watch::Sender<Option<Status>>,
}

impl<S> Child<S> {
    pub fn new(node: NodeType<S>, status: tokio::sync::watch::Sender<Option<Status>>) -> Self {
        Self { node, status }
    }

    #[cfg(test)]
    pub fn from_behavior<A>(behavior: Behavior<A>) -> Self
    where
        A: Into<ActionType<S>>,
    {
        let (child, _state) = Self::from_behavior_with_state(behavior).unwrap();
        child
    }

    /// Builds the node and its observer view, bottom-up.
    pub fn from_behavior_with_state<A>(behavior: Behavior<A>) -> Result<(Self, State), BuildError>
    where
        A: Into<ActionType<S>>,
    {
        let (tx, rx) = tokio::sync::watch::channel(None);
        match behavior {
            Behavior::Action(action) => {
                let action = action.into();
                let state = State::NoChild(NodeName::new(action.kind(), action.name()), rx);
                Ok((Self::new(NodeType::Leaf(action), tx), state))
            }
            Behavior::Invert(child) => {
                let (child, child_state) = Self::from_behavior_with_state(*child)?;
                let state =
                    State::SingleChild(NodeName::new("Invert", "Invert"), rx, Rc::new(child_state));
                let node = NodeType::Invert(InvertState::new(child));
                Ok((Self::new(node, tx), state))
            }
            Behavior::Sequence(label, children) => {
                let (children, children_state) = Self::from_children("Sequence", &label, children)?;
                let state =
                    State::MultipleChildren(NodeName::new("Sequence", &label), rx, children_state);
                let node = NodeType::Sequence(SequenceState::new(label, children));
                Ok((Self::new(node, tx), state))
            }
            Behavior::Select(label, children) => {
                let (children, children_state) = Self::from_children("Select", &label, children)?;
                let state =
                    State::MultipleChildren(NodeName::new("Select", &label), rx, children_state);
                let node = NodeType::Select(SelectState::new(label, children));
                Ok((Self::new(node, tx), state))
            }
            Behavior::Parallel(label, policy, children) => {
                let (children, children_state) = Self::from_children("Parallel", &label, children)?;
                let state =
                    State::MultipleChildren(NodeName::new("Parallel", &label), rx, children_state);
                let node = NodeType::Parallel(ParallelState::new(label, policy, children));
                Ok((Self::new(node, tx), state))
            }
        }
    }

    fn from_children<A>(
        kind: &'static str,
        label: &str,
        children: Vec<Behavior<A>>,
    ) -> Result<(Vec<Self>, Rc<[State]>), BuildError>
    where
        A: Into<ActionType<S>>,
    {
        if children.is_empty() {
            return Err(BuildError::EmptyComposite {
                kind,
                label: label.to_owned(),
            });
        }
        let (children, children_state): (Vec<_>, Vec<_>) = children
            .into_iter()
            .map(Self::from_behavior_with_state)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();
        Ok((children, children_state.into()))
    }

    pub fn tick(&mut self, shared: &mut S) -> Status {
        let status = match &mut self.node {
            NodeType::Leaf(action) => action.tick(shared),
            NodeType::Invert(invert) => invert.tick(shared),
            NodeType::Sequence(sequence) => sequence.tick(shared),
            NodeType::Select(select) => select.tick(shared),
            NodeType::Parallel(parallel) => parallel.tick(shared),
        };
        self.status.send_replace(Some(status));
        status
    }

    /// Sends every composite below back to its first child and clears the
    /// observed statuses. Leaves have nothing to reset.
    pub fn reset(&mut self) {
        match &mut self.node {
            NodeType::Leaf(_) => {}
            NodeType::Invert(invert) => invert.reset(),
            NodeType::Sequence(sequence) => sequence.reset(),
            NodeType::Select(select) => select.reset(),
            NodeType::Parallel(parallel) => parallel.reset(),
        }
        self.status.send_replace(None);
    }

    pub fn status(&self) -> Option<Status> {
        *self.status.borrow()
    }

    /// In-progress index of a sequence or select
    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        match &self.node {
            NodeType::Sequence(sequence) => Some(sequence.index()),
            NodeType::Select(select) => Some(select.index()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn children(&self) -> &[Child<S>] {
        match &self.node {
            NodeType::Leaf(_) => &[],
            NodeType::Invert(invert) => std::slice::from_ref(invert.child()),
            NodeType::Sequence(sequence) => sequence.children(),
            NodeType::Select(select) => select.children(),
            NodeType::Parallel(parallel) => parallel.children(),
        }
    }
}

#[cfg(test)]
mod tests {
    use agent_bt_common::ParallelPolicy;

    use super::*;
    use crate::test_behavior_interface::{TestAction, TestShared, init_tracing};

    #[test]
    fn test_basic_behavior() {
        init_tracing();

        let behavior = Behavior::sequence(
            "Patrol",
            vec![
                Behavior::Action(TestAction::Success("a")),
                Behavior::Action(TestAction::Run {
                    id: "walk",
                    times: 2,
                    output: Status::Success,
                }),
                Behavior::invert(Behavior::Action(TestAction::Failure("b"))),
                Behavior::Action(TestAction::Success("c")),
            ],
        );

        let (mut child, state) = Child::from_behavior_with_state(behavior).unwrap();
        let mut shared = TestShared::default();

        let mut ticks = 0;
        loop {
            ticks += 1;
            let status = child.tick(&mut shared);
            tracing::info!("State:\n{:#?}", state.snapshot());
            if status != Status::Running {
                assert_eq!(status, Status::Success);
                break;
            }
        }
        assert_eq!(ticks, 3);
        assert_eq!(shared.take_calls(), vec!["a", "walk", "walk", "walk", "b", "c"]);
    }

    #[test]
    fn test_state_follows_ticks_and_reset() {
        let behavior = Behavior::select(
            "Root",
            vec![
                Behavior::Action(TestAction::Failure("a")),
                Behavior::Action(TestAction::Run {
                    id: "b",
                    times: 1,
                    output: Status::Success,
                }),
            ],
        );
        let (mut child, state) = Child::from_behavior_with_state(behavior).unwrap();
        let mut shared = TestShared::default();
        assert_eq!(state.status(), None);
        assert_eq!(state.children().len(), 2);

        child.tick(&mut shared);
        assert_eq!(state.status(), Some(Status::Running));
        assert_eq!(state.children()[0].status(), Some(Status::Failure));
        assert_eq!(state.children()[1].status(), Some(Status::Running));
        assert_eq!(state.children()[1].name(), &NodeName::new("Action", "b"));

        child.reset();
        assert_eq!(state.status(), None);
        assert!(state.children().iter().all(|child| child.status().is_none()));
        assert_eq!(child.cursor(), Some(0));
    }

    #[test]
    fn test_empty_composites_are_rejected() {
        let behavior: Behavior<TestAction> = Behavior::select(
            "Root",
            vec![
                Behavior::Action(TestAction::Success("a")),
                Behavior::invert(Behavior::sequence("Empty", vec![])),
            ],
        );
        let error = Child::<TestShared>::from_behavior_with_state(behavior)
            .err()
            .unwrap();
        assert_eq!(
            error,
            BuildError::EmptyComposite {
                kind: "Sequence",
                label: "Empty".into()
            }
        );
        assert_eq!(error.to_string(), "Sequence `Empty` has no children");

        let behavior: Behavior<TestAction> =
            Behavior::parallel("Both", ParallelPolicy::RequireOne, vec![]);
        assert!(matches!(
            Child::<TestShared>::from_behavior_with_state(behavior),
            Err(BuildError::EmptyComposite { kind: "Parallel", .. })
        ));
    }
}
