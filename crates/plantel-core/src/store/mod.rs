// ── Query cache ──
//
// Generation-tracked slots keyed by query family and parameters.

mod data_store;
mod query_key;
pub(crate) mod slot;

pub use data_store::DataStore;
pub use query_key::{Invalidation, QueryFamily};
