//! ARN and wildcard pattern matching core for IAM policy auditing.
//!
//! Policy statements reference resources by pattern, and the resource-type
//! templates they are audited against carry wildcards of their own, so the
//! central question is whether two wildcard languages intersect. This
//! crate provides that intersection test, the ARN-aware wrappers around
//! it, the structural validators for region and account-id fields, and the
//! [`Finding`] record consumed by the reporting layer.
//!
//! Every operation is a pure, synchronous function over the strings it is
//! given: malformed ARNs and field-count mismatches degrade to a boolean
//! "no match" rather than an error, and nothing is cached across calls.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod arn;
pub mod finding;
pub mod glob;

pub use arn::{
    is_arn_match, is_arn_strictly_valid, is_valid_account_id, is_valid_region, Arn, ArnError,
};
pub use finding::Finding;
pub use glob::is_glob_match;
