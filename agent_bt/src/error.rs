/// Errors raised while turning a [`Behavior`](crate::Behavior) description into a tree.
///
/// Malformed trees are rejected at construction time, never while ticking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A sequence, select or parallel node was given no children.
    #[error("{kind} `{label}` has no children")]
    EmptyComposite { kind: &'static str, label: String },

    /// The builder was finished without a root behavior.
    #[error("behavior tree has no root")]
    MissingRoot,
}
