use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Route geometry needs at least 2 points, got {0}")]
    InsufficientGeometry(usize),
    #[error("Node budget must be at least 2, got {0}")]
    InvalidNodeBudget(usize),
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Graph invariant violated: {0}")]
    GraphInvariant(String),
}
