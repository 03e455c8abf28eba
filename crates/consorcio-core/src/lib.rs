pub mod adapter;
pub mod error;
pub mod render;
pub mod simulation;
pub mod types;

pub use error::SimulatorError;
pub use types::*;

/// Standard result type for fallible simulator operations
pub type SimulatorResult<T> = Result<T, SimulatorError>;
