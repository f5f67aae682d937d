//! Deleting installed applications

pub mod batch_deletion;

pub use batch_deletion::{delete_batch, BatchDeleteResult};
