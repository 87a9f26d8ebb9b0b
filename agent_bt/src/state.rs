use std::rc::Rc;

use crate::Status;

pub type StatusReceiver = tokio::sync::watch::Receiver<Option<Status>>;

/// Observer view of a built tree.
///
/// Mirrors the tree shape. Every node publishes the status it returned on its
/// last tick (`None` before the first tick and after a reset), so the view
/// stays current without borrowing the tree.
#[derive(Debug, Clone)]
pub enum State {
    /// Leaf nodes
    NoChild(NodeName, StatusReceiver),
    /// Decorator nodes
    SingleChild(NodeName, StatusReceiver, Rc<State>),
    /// Control nodes
    MultipleChildren(NodeName, StatusReceiver, Rc<[State]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeName {
    pub kind: &'static str,
    pub label: String,
}

impl NodeName {
    pub fn new(kind: &'static str, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

impl State {
    pub fn name(&self) -> &NodeName {
        match self {
            State::NoChild(name, _)
            | State::SingleChild(name, _, _)
            | State::MultipleChildren(name, _, _) => name,
        }
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            State::NoChild(_, rx) | State::SingleChild(_, rx, _) | State::MultipleChildren(_, rx, _) => {
                *rx.borrow()
            }
        }
    }

    pub fn children(&self) -> &[State] {
        match self {
            State::NoChild(..) => &[],
            State::SingleChild(_, _, child) => std::slice::from_ref(child.as_ref()),
            State::MultipleChildren(_, _, children) => children,
        }
    }

    /// Copies the current statuses into a serializable tree.
    pub fn snapshot(&self) -> StateSnapshot {
        let name = self.name();
        StateSnapshot {
            kind: name.kind.to_owned(),
            label: name.label.clone(),
            status: self.status(),
            children: self.children().iter().map(State::snapshot).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateSnapshot {
    pub kind: String,
    pub label: String,
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StateSnapshot>,
}

impl StateSnapshot {
    /// Depth-first search for the first node with `label`
    pub fn find(&self, label: &str) -> Option<&StateSnapshot> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }
}
