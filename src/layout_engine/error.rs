use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no windows to reconstruct a tree from")]
    EmptyInput,
    #[error("window {0} has no parent split; the root cannot be restructured")]
    NoParentSplit(u32),
    #[error("window {0} could not be attributed to any sibling group")]
    InvariantViolation(u32),
}
