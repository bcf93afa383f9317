pub mod error;
pub mod graph;
pub mod plan;
pub mod reconstruct;
pub mod siblings;

pub use error::LayoutError;
pub use graph::{Direction, InsertDirection, Orientation};
pub use plan::{
    ResizeEdge, WmOp, plan_fold, plan_resize, plan_switch_split, plan_toggle, plan_unroll,
};
pub use reconstruct::reconstruct_tree;
pub use siblings::consecutive_split_siblings;
