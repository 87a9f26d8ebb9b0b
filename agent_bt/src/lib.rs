pub use agent_bt_common::*;

mod error;
pub use error::*;

mod action_type;
pub use action_type::*;

mod state;
pub use state::*;

mod behaviortree;
pub use behaviortree::*;

mod child;

// Not meant to be used externally
mod behavior_nodes;

#[cfg(test)]
mod test_behavior_interface;
