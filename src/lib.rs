//! # fault-group
//!
//! Aggregate-error container: bundle several independently-raised faults,
//! each tagged with a provenance label, into a single raisable value, then
//! query, filter, and selectively re-raise whatever remains unhandled.
//!
//! The central type is [`FaultGroup`]. Its children are [`Fault`] handles:
//! reference-counted wrappers around any `std::error::Error` payload, so
//! membership and removal key on handle identity rather than lookalike
//! equality. Every transform (`add`, `remove`, `clone`) produces a new group
//! and carries the causal-chain slots ([`ChainCell`]) across, and
//! [`FaultGroup::maybe_reraise`] discharges the group while preserving the
//! cause link to whatever fault the enclosing [`HandlerScope`] was handling.
//!
//! ```
//! use fault_group::{Fault, FaultGroup, HandlerScope, Matcher};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("stage {0} failed")]
//! struct StageFailed(u32);
//!
//! let a = Fault::new(StageFailed(1));
//! let b = Fault::new(StageFailed(2));
//! let group = FaultGroup::new(
//!     "pipeline errors",
//!     vec![a.clone(), b],
//!     vec!["stage-1".into(), "stage-2".into()],
//! )?;
//!
//! // Handle the faults we recognise, then re-raise the remainder.
//! let group = group.remove(&a)?;
//! let scope = HandlerScope::new();
//! let raised = group.maybe_reraise(&scope).unwrap_err();
//! assert!(raised.as_single().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod chain;
mod error;
mod fault;
mod group;
mod matcher;
mod scope;
mod snapshot;

pub use chain::ChainCell;
pub use error::{GroupError, GroupResult};
pub use fault::Fault;
pub use group::{FaultGroup, Iter};
pub use matcher::Matcher;
pub use scope::{Entered, FromError, HandlerScope, Raised};
pub use snapshot::{FaultSnapshot, GroupSnapshot};
