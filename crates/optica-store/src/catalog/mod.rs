//! The product listing: paginated catalog query, accumulated results,
//! infinite-scroll continuation.
//!
//! The listing is split into a pure state machine ([`CatalogState`]), a
//! visibility trigger ([`SentinelTrigger`]), and an async driver
//! ([`CatalogController`]) that connects them to the API. The state
//! machine owns the page accounting, result accumulation, and
//! stale-response discard, so those invariants are testable without a
//! transport.

mod controller;
mod sentinel;
mod state;

pub use controller::CatalogController;
pub use sentinel::SentinelTrigger;
pub use state::{CatalogState, Completion, FetchKind, FetchPlan, FetchToken};
