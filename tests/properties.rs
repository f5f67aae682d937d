//! Property tests for appsweep.
//!
//! Randomized input generation over the list core: selection bookkeeping,
//! viewport scrolling, sort order and batch delete accounting.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/selection.rs"]
mod selection;

#[path = "properties/viewport.rs"]
mod viewport;

#[path = "properties/sorting.rs"]
mod sorting;

#[path = "properties/batch_delete.rs"]
mod batch_delete;
