//! Vocabulary shared by the behavior tree engine and the agents that embed it.
//!
//! - [`Status`]: the three-valued result of ticking a node
//! - [`Behavior`]: a declarative description of a tree, built bottom-up once per agent
//! - [`Condition`] / [`Action`]: the leaf capabilities agents implement, directly
//!   or through the [`ConditionFn`], [`PredicateFn`] and [`ActionFn`] closure adapters

mod status;
pub use status::*;

mod behavior;
pub use behavior::*;

mod behavior_interface;
pub use behavior_interface::*;
