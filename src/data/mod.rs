//! Shared, read-only index state for export and serving.

mod store;

pub use store::{IndexStore, to_json};
