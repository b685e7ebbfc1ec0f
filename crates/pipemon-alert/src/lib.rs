//! Threshold evaluation and alert ledger for pipeline metrics.
//!
//! Readings arrive as timestamped (asset, metric, value) tuples. The
//! [`classifier`] maps each value through its [`ThresholdPolicy`] to a
//! [`StatusLevel`](pipemon_common::types::StatusLevel); the [`AlertLedger`]
//! consumes the classified reading and opens, updates, or closes the key's
//! alert record accordingly. [`window`] and [`filter`] serve the read side.

pub mod classifier;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod overview;
pub mod policy;
pub mod registry;
pub mod window;


pub use classifier::{classify, is_approaching};
pub use error::{AlertError, Result};
pub use ledger::AlertLedger;
pub use policy::{PolicyKind, ThresholdPolicy};
pub use registry::PolicyRegistry;
