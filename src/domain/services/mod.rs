//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **AccessPolicy**: Row-level visibility of every resource by caller role

pub mod access_policy;

pub use access_policy::*;
