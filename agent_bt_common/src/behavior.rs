/// Describes a behavior tree.
///
/// Composites carry a human readable label. Labels are diagnostic only and
/// show up in traces and state snapshots.
///
/// `A` is the leaf type. Engines convert every `Behavior::Action(A)` into a
/// concrete leaf node, so `A` is usually either a serializable enum naming
/// the agent's conditions and actions, or the engine's own leaf type built
/// from closures.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Behavior<A> {
    /// A leaf: either a condition or an action.
    Action(A),

    /// Converts `Success` into `Failure` and vice versa.
    Invert(Box<Behavior<A>>),

    /// Runs behaviors one by one until all succeeded.
    ///
    /// The sequence fails if a behavior fails.
    /// The sequence succeeds if all the behavior succeeds.
    /// Can be thought of as a short-circuited logical AND gate.
    Sequence(String, Vec<Behavior<A>>),
    /// Runs behaviors one by one until a behavior succeeds.
    ///
    /// If a behavior fails it will try the next one.
    /// Fails if the last behavior fails.
    /// Can be thought of as a short-circuited logical OR gate.
    /// Earlier children are higher priority.
    Select(String, Vec<Behavior<A>>),
    /// Ticks every unfinished behavior on each tick.
    ///
    /// Resolution is decided by [`ParallelPolicy`].
    Parallel(String, ParallelPolicy, Vec<Behavior<A>>),
}

impl<A> Behavior<A> {
    pub fn action(leaf: impl Into<A>) -> Self {
        Behavior::Action(leaf.into())
    }

    pub fn invert(child: Behavior<A>) -> Self {
        Behavior::Invert(Box::new(child))
    }

    pub fn sequence(label: impl Into<String>, children: Vec<Behavior<A>>) -> Self {
        Behavior::Sequence(label.into(), children)
    }

    pub fn select(label: impl Into<String>, children: Vec<Behavior<A>>) -> Self {
        Behavior::Select(label.into(), children)
    }

    pub fn parallel(
        label: impl Into<String>,
        policy: ParallelPolicy,
        children: Vec<Behavior<A>>,
    ) -> Self {
        Behavior::Parallel(label.into(), policy, children)
    }

    /// Label of a composite, `None` for leaves and decorators.
    pub fn label(&self) -> Option<&str> {
        match self {
            Behavior::Sequence(label, _)
            | Behavior::Select(label, _)
            | Behavior::Parallel(label, _, _) => Some(label),
            Behavior::Action(_) | Behavior::Invert(_) => None,
        }
    }

    /// Number of nodes in the described tree
    pub fn node_count(&self) -> usize {
        match self {
            Behavior::Action(_) => 1,
            Behavior::Invert(child) => 1 + child.node_count(),
            Behavior::Sequence(_, children)
            | Behavior::Select(_, children)
            | Behavior::Parallel(_, _, children) => {
                1 + children.iter().map(Behavior::node_count).sum::<usize>()
            }
        }
    }
}

/// Decides when a parallel node resolves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParallelPolicy {
    /// Succeeds once every child succeeded, fails as soon as one fails.
    #[default]
    RequireAll,
    /// Succeeds as soon as one child succeeds, fails once every child failed.
    RequireOne,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    enum Leaf {
        InRange,
        Chase,
        Wander,
    }

    #[test]
    fn test_behavior_description_round_trip() {
        let behavior = Behavior::select(
            "Root",
            vec![
                Behavior::sequence(
                    "Chase",
                    vec![Behavior::Action(Leaf::InRange), Behavior::Action(Leaf::Chase)],
                ),
                Behavior::Action(Leaf::Wander),
            ],
        );
        assert_eq!(behavior.node_count(), 5);
        assert_eq!(behavior.label(), Some("Root"));

        let data = serde_json::to_string(&behavior).unwrap();
        let decoded: Behavior<Leaf> = serde_json::from_str(&data).unwrap();
        assert_eq!(decoded, behavior);
    }

    #[test]
    fn test_parallel_policy_default() {
        assert_eq!(ParallelPolicy::default(), ParallelPolicy::RequireAll);
        let behavior: Behavior<Leaf> = Behavior::invert(Behavior::Action(Leaf::Chase));
        assert_eq!(behavior.label(), None);
        assert_eq!(behavior.node_count(), 2);
    }
}
