mod invert_node;
pub use invert_node::*;

mod sequence_node;
pub use sequence_node::*;

mod select_node;
pub use select_node::*;

mod parallel_node;
pub use parallel_node::*;
