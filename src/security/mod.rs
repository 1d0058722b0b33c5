//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (security headers, CORS)
//!
//! Incoming site request:
//!     → routing::resolver rejects `/.ht*` and `..` before any disk access
//! ```
//!
//! # Design Decisions
//! - Fail closed: a path that could leave the content root is a 403
//! - No trust in client input: hostnames are checked before use as a path

pub mod headers;
