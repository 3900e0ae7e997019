//! # Verdict
//!
//! Success and failure as plain, serializable values.
//!
//! `verdict` models the outcome of a fallible operation as an
//! [`Outcome<T, E>`] value: either `Success(T)` or `Failure(E)`. Outcomes are
//! immutable data. They can be transformed with a small set of combinators,
//! matched exhaustively, annotated with context as they cross boundaries, and
//! serialized to `{"ok":true,"value":..}` / `{"ok":false,"error":..}` and back.
//!
//! ## Quick Example
//!
//! ```rust
//! use verdict::{Fault, Outcome};
//!
//! fn find_user(id: i64) -> Outcome<String, Fault> {
//!     if id > 0 {
//!         Outcome::success(format!("user-{}", id))
//!     } else {
//!         Outcome::failure(Fault::new("InvalidId").with("id", id))
//!     }
//! }
//!
//! let greeting = find_user(-1)
//!     .map(|name| name.to_uppercase())
//!     .flat_map(|name| Outcome::success(format!("Hi {}!", name)))
//!     .or("Hi stranger!".to_string());
//! assert_eq!(greeting, "Hi stranger!");
//!
//! // Add context while keeping the original failure as the cause
//! let annotated = find_user(-1).annotate_with("LoadProfile", [("page", "home")]);
//! let json = serde_json::to_string(&annotated).unwrap();
//! let restored: Outcome<String, Fault> = verdict::adapter::from_json(&json).unwrap();
//! assert_eq!(restored, annotated);
//! ```
//!
//! ## Modules
//!
//! - [`outcome`]: the [`Outcome`] type and its combinators
//! - [`fault`]: typed error payloads with cause chains
//! - [`matcher`]: matching on the variant and on the error discriminant
//! - [`adapter`]: closures, futures, and plain records into outcomes
//! - [`record`]: the plain record shape and wire format
//! - [`ops`]: free-function forms of the combinators
//! - [`testing`]: assertion macros and `proptest` strategies
//!
//! ## Cargo features
//!
//! - `tracing`: log captured failures at the adapter boundary
//! - `try_trait`: `?` support for `Outcome` (nightly)
//! - `proptest`: `Arbitrary` impls for `Outcome` and `Fault`

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(feature = "try_trait", feature(try_trait_v2, try_trait_v2_residual))]

pub mod adapter;
pub mod fault;
pub mod matcher;
pub mod ops;
pub mod outcome;
pub mod record;
pub mod testing;

// Re-exports
pub use adapter::{attempt, capture, from_future, from_json, Panic, Pending};
pub use fault::Fault;
pub use matcher::{Cases, Discriminant, UnmatchedCase};
pub use outcome::Outcome;
pub use record::{RawRecord, RecordError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{attempt, capture, from_future, from_json, Panic, Pending};
    pub use crate::fault::Fault;
    pub use crate::matcher::{
        match_discriminant, match_failure, match_outcome, Cases, Discriminant, UnmatchedCase,
    };
    pub use crate::outcome::Outcome;
    pub use crate::record::{RawRecord, RecordError};
}
