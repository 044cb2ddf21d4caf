pub mod operation;
pub mod types;

pub use operation::{Operation, OperationStatus};
pub use types::*;
