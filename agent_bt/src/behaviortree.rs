use agent_bt_common::{Behavior, Status};

use crate::{ActionType, BuildError, State, child::Child};

/// What ticking does once the root has resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TickPolicy {
    /// The root is ticked on every frame, re-deciding from the top after it
    /// resolves
    #[default]
    Reevaluate,
    /// On completion, ticking returns the retained status until [`BehaviorTree::reset`]
    RetainOnCompletion,
}

/// Drives one agent's tree, one tick per frame.
///
/// Owns the root node and the shared agent state `S` every leaf callback
/// reads or mutates. The game loop updates `S` through [`Self::shared_mut`]
/// (frame time, world queries) and then calls [`Self::run`].
pub struct BehaviorTree<S> {
    child: Child<S>,
    policy: TickPolicy,
    state: State,
    shared: S,
}

impl<S> BehaviorTree<S> {
    pub fn new<A>(behavior: Behavior<A>, shared: S) -> Result<Self, BuildError>
    where
        A: Into<ActionType<S>>,
    {
        Self::with_policy(behavior, TickPolicy::default(), shared)
    }

    pub fn with_policy<A>(
        behavior: Behavior<A>,
        policy: TickPolicy,
        shared: S,
    ) -> Result<Self, BuildError>
    where
        A: Into<ActionType<S>>,
    {
        let (child, state) = Child::from_behavior_with_state(behavior)?;
        tracing::debug!(
            root = %state.name().label,
            nodes = count_nodes(&state),
            ?policy,
            "behavior tree built"
        );
        Ok(Self {
            child,
            policy,
            state,
            shared,
        })
    }

    pub fn builder<A>(shared: S) -> BehaviorTreeBuilder<A, S> {
        BehaviorTreeBuilder::new(shared)
    }

    /// Ticks the root once and discards its status.
    ///
    /// Call once per frame. Leaf side effects on the shared state are the
    /// only output.
    pub fn run(&mut self) {
        let _ = self.tick();
    }

    /// Ticks the root once.
    ///
    /// A panicking leaf callback unwinds through here untouched.
    #[tracing::instrument(level = "trace", name = "BehaviorTree::tick", skip(self), ret)]
    pub fn tick(&mut self) -> Status {
        if self.policy == TickPolicy::RetainOnCompletion {
            if let Some(status) = self.child.status() {
                if status.is_completed() {
                    return status;
                }
            }
        }

        self.child.tick(&mut self.shared)
    }

    /// Sends every composite back to its first child.
    ///
    /// A running action is simply not ticked again. It gets no notification.
    #[tracing::instrument(level = "trace", name = "BehaviorTree::reset", skip(self))]
    pub fn reset(&mut self) {
        self.child.reset();
    }

    /// Status returned by the root on the last tick
    pub fn status(&self) -> Option<Status> {
        self.child.status()
    }

    pub fn state(&self) -> State {
        self.state.clone()
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    pub fn shared(&self) -> &S {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut S {
        &mut self.shared
    }

    pub fn into_shared(self) -> S {
        self.shared
    }
}

fn count_nodes(state: &State) -> usize {
    1 + state.children().iter().map(count_nodes).sum::<usize>()
}

/// Assembles a [`BehaviorTree`], rejecting a missing root.
pub struct BehaviorTreeBuilder<A, S> {
    root: Option<Behavior<A>>,
    policy: TickPolicy,
    shared: S,
}

impl<A, S> BehaviorTreeBuilder<A, S> {
    pub fn new(shared: S) -> Self {
        Self {
            root: None,
            policy: TickPolicy::default(),
            shared,
        }
    }

    pub fn root(mut self, behavior: Behavior<A>) -> Self {
        self.root = Some(behavior);
        self
    }

    pub fn policy(mut self, policy: TickPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<BehaviorTree<S>, BuildError>
    where
        A: Into<ActionType<S>>,
    {
        let root = self.root.ok_or(BuildError::MissingRoot)?;
        BehaviorTree::with_policy(root, self.policy, self.shared)
    }
}
