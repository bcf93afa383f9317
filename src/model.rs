pub mod geometry;
pub mod tree;

pub use geometry::Frame;
pub use tree::{Node, Split, Stack, Window, WindowLocation};
