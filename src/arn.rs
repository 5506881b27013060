//! ARN-aware pattern matching and field validators.
//!
//! ARNs are colon-delimited: marker, partition, service, region, account
//! id, resource. Matching splits both sides into those fields and applies
//! the wildcard intersection test per field, so a populated region on one
//! side can never match an empty region on the other through a wildcard in
//! some unrelated field.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::glob::is_glob_match;

/// Number of colon-delimited fields in an ARN.
const FIELD_COUNT: usize = 6;

/// Region names: 2-3 letter geography code, area word with an optional
/// `-gov` insertion, numeric suffix. Availability-zone letters and
/// wildcards do not fit the shape.
static REGION_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-gov)?-[a-z]+-[0-9]+$").expect("valid region regex pattern")
});

/// Error returned when a string cannot be split into the six ARN fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArnError {
    /// The input has fewer colon-delimited fields than an ARN requires.
    #[error("expected {FIELD_COUNT} colon-delimited fields, found {found}: {value:?}")]
    FieldCount {
        /// The offending input.
        value: String,
        /// How many fields the split produced.
        found: usize,
    },
}

/// An ARN (or ARN pattern) split into its six fields.
///
/// The resource field keeps any embedded colons and slashes verbatim; it
/// is never split further. An empty region means "any region" and an empty
/// account id means "any account".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arn<'a> {
    /// Leading literal marker, normally `arn`.
    pub marker: &'a str,
    /// Partition, e.g. `aws` or `aws-cn`.
    pub partition: &'a str,
    /// Service name, e.g. `s3`.
    pub service: &'a str,
    /// Region; empty means any region.
    pub region: &'a str,
    /// Account id; empty means any account.
    pub account: &'a str,
    /// Resource part; may contain `/` and `:`.
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Split on the first five colons only, so the resource field keeps
    /// embedded delimiters.
    pub fn split(value: &'a str) -> Result<Self, ArnError> {
        let parts: Vec<&str> = value.splitn(FIELD_COUNT, ':').collect();
        if parts.len() < FIELD_COUNT {
            return Err(ArnError::FieldCount {
                value: value.to_string(),
                found: parts.len(),
            });
        }
        Ok(Self {
            marker: parts[0],
            partition: parts[1],
            service: parts[2],
            region: parts[3],
            account: parts[4],
            resource: parts[5],
        })
    }

    /// The five compared fields, in order. The leading marker is assumed
    /// present and is not compared.
    fn compared_fields(&self) -> [&'a str; 5] {
        [
            self.partition,
            self.service,
            self.region,
            self.account,
            self.resource,
        ]
    }
}

impl<'a> TryFrom<&'a str> for Arn<'a> {
    type Error = ArnError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::split(value)
    }
}

/// Returns true iff the two ARN patterns can denote a common ARN.
///
/// Partition, service, region, account id, and resource must all
/// glob-intersect. Either side failing to split into six fields is a
/// non-match, never an error.
///
/// `resource_type` is provenance metadata from the caller's knowledge
/// base; it labels the comparison and never alters it. Type-sensitive
/// behavior, such as a bare bucket name not matching a `name/*` object
/// form, falls out of the field comparison: once the shorter resource
/// field is exhausted, the longer one still holds a literal `/` that no
/// all-wildcard suffix can satisfy.
///
/// # Examples
///
/// ```
/// use iam_policy_auditor_matching::is_arn_match;
///
/// assert!(is_arn_match(
///     "object",
///     "arn:*:s3:::*/*",
///     "arn:aws:s3:::my_corporate_bucket/*",
/// ));
/// assert!(!is_arn_match(
///     "bucket",
///     "arn:*:s3:::mybucket",
///     "arn:*:s3:::mybucket/*",
/// ));
/// ```
pub fn is_arn_match(resource_type: &str, arn_format: &str, resource: &str) -> bool {
    log::debug!("Matching {resource_type} patterns {arn_format:?} and {resource:?}");
    let (Ok(format), Ok(resource)) = (Arn::split(arn_format), Arn::split(resource)) else {
        return false;
    };
    format
        .compared_fields()
        .into_iter()
        .zip(resource.compared_fields())
        .all(|(format_field, resource_field)| is_glob_match(format_field, resource_field))
}

/// Stricter variant of [`is_arn_match`] that also rejects wildcards placed
/// inside the fixed text of the reference format.
///
/// Every field must glob-intersect, and every wildcard in `resource` must
/// align with `arn_format`: cover the whole field, sit where the format
/// itself is wildcarded, or both begin and end on a `/` or `:` segment
/// boundary of the format. A wildcard opening mid-token (`u*`,
/// `resource-data-*`) or resuming mid-token (`*uff`) fails the field and
/// with it the whole check, even though the looser [`is_arn_match`] would
/// accept it.
pub fn is_arn_strictly_valid(resource_type: &str, arn_format: &str, resource: &str) -> bool {
    log::debug!("Strictly matching {resource_type} pattern {resource:?} against {arn_format:?}");
    let (Ok(format), Ok(resource)) = (Arn::split(arn_format), Arn::split(resource)) else {
        return false;
    };
    format
        .compared_fields()
        .into_iter()
        .zip(resource.compared_fields())
        .all(|(format_field, resource_field)| {
            is_glob_match(format_field, resource_field)
                && wildcards_align(format_field, resource_field)
        })
}

/// Two-cursor walk like the glob intersection, except the resource-side
/// wildcard may absorb fixed format text only when anchored at a segment
/// boundary.
fn wildcards_align(format: &str, resource: &str) -> bool {
    // A full-field wildcard spans the entire variable segment.
    if resource == "*" {
        return true;
    }
    let mut memo = HashMap::new();
    aligns_from(format.as_bytes(), resource.as_bytes(), 0, 0, &mut memo)
}

/// True when the wildcard at `resource[j]` begins at a segment boundary.
fn anchored(resource: &[u8], j: usize) -> bool {
    j > 0 && matches!(resource[j - 1], b'/' | b':')
}

/// Position where an absorbed run of fixed format text must stop: the next
/// delimiter, format wildcard, or field end.
fn next_boundary(format: &[u8], i: usize) -> usize {
    format[i + 1..]
        .iter()
        .position(|&b| matches!(b, b'/' | b':' | b'*'))
        .map_or(format.len(), |offset| i + 1 + offset)
}

fn aligns_from(
    format: &[u8],
    resource: &[u8],
    i: usize,
    j: usize,
    memo: &mut HashMap<(usize, usize), bool>,
) -> bool {
    if let Some(&known) = memo.get(&(i, j)) {
        return known;
    }
    let matched = match (format.get(i).copied(), resource.get(j).copied()) {
        (None, None) => true,
        (None, Some(_)) => resource[j..].iter().all(|&b| b == b'*'),
        (Some(_), None) => format[i..].iter().all(|&b| b == b'*'),
        (Some(b'*'), Some(b'*')) => {
            aligns_from(format, resource, i + 1, j, memo)
                || aligns_from(format, resource, i, j + 1, memo)
        }
        // The format-side wildcard is a variable segment; it absorbs
        // resource text freely.
        (Some(b'*'), Some(_)) => {
            aligns_from(format, resource, i + 1, j, memo)
                || aligns_from(format, resource, i, j + 1, memo)
        }
        // The resource-side wildcard may always match nothing; it may eat
        // fixed format text only from one boundary to the next, so it both
        // begins and ends on a boundary rather than resuming mid-token.
        (Some(_), Some(b'*')) => {
            aligns_from(format, resource, i, j + 1, memo)
                || (anchored(resource, j)
                    && aligns_from(format, resource, next_boundary(format, i), j, memo))
        }
        (Some(a), Some(b)) => a == b && aligns_from(format, resource, i + 1, j + 1, memo),
    };
    memo.insert((i, j), matched);
    matched
}

/// Returns true when `region` is empty (meaning any region) or shaped like
/// a real region name. Availability-zone forms (`us-east-1f`) and wildcard
/// characters are rejected.
pub fn is_valid_region(region: &str) -> bool {
    region.is_empty() || REGION_SHAPE.is_match(region)
}

/// Returns true when `account_id` is empty (meaning any account) or
/// exactly twelve decimal digits.
pub fn is_valid_account_id(account_id: &str) -> bool {
    account_id.is_empty()
        || (account_id.len() == 12 && account_id.chars().all(|c| c.is_ascii_digit()))
}
