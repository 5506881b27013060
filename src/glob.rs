//! Wildcard pattern intersection.
//!
//! Unlike ordinary glob matching, both sides compared here may contain
//! wildcards. The question answered is whether the two pattern *languages*
//! intersect: does any concrete string satisfy both patterns at once? That
//! needs a search over cursor pairs rather than a single scan.

use std::collections::HashMap;

/// One position of a parsed pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Matches exactly this byte.
    Literal(u8),
    /// `*`, matches any substring, including the empty one.
    Any,
}

/// Parse a pattern once so the search never re-scans the input string.
fn tokenize(pattern: &str) -> Vec<Token> {
    pattern
        .bytes()
        .map(|b| match b {
            b'*' => Token::Any,
            other => Token::Literal(other),
        })
        .collect()
}

/// Returns true iff some concrete string satisfies both patterns, under the
/// rule that `*` matches zero or more arbitrary characters and every other
/// position matches exactly.
///
/// The comparison is symmetric and reduces to ordinary wildcard matching
/// when one side is wildcard-free. Matching is case-sensitive and has no
/// escaping or other metacharacters.
///
/// # Examples
///
/// ```
/// use iam_policy_auditor_matching::is_glob_match;
///
/// assert!(is_glob_match("a*a", "aba"));
/// assert!(is_glob_match("*a*", "*b*")); // both match "ab"
/// assert!(!is_glob_match("a*a", "a*b"));
/// ```
pub fn is_glob_match(p1: &str, p2: &str) -> bool {
    let p1 = tokenize(p1);
    let p2 = tokenize(p2);
    // The memo table lives and dies with this call; matching stays pure.
    let mut memo = HashMap::new();
    intersects_from(&p1, &p2, 0, 0, &mut memo)
}

/// An all-wildcard suffix can still match the empty remainder.
fn all_wildcards(tokens: &[Token]) -> bool {
    tokens.iter().all(|t| *t == Token::Any)
}

fn intersects_from(
    p1: &[Token],
    p2: &[Token],
    i: usize,
    j: usize,
    memo: &mut HashMap<(usize, usize), bool>,
) -> bool {
    if let Some(&known) = memo.get(&(i, j)) {
        return known;
    }
    let matched = match (p1.get(i).copied(), p2.get(j).copied()) {
        (None, None) => true,
        (None, Some(_)) => all_wildcards(&p2[j..]),
        (Some(_), None) => all_wildcards(&p1[i..]),
        (Some(Token::Literal(a)), Some(Token::Literal(b))) => {
            a == b && intersects_from(p1, p2, i + 1, j + 1, memo)
        }
        // Both on wildcards: advance either side past its wildcard; the
        // diagonal step is subsumed by composing the two.
        (Some(Token::Any), Some(Token::Any)) => {
            intersects_from(p1, p2, i + 1, j, memo) || intersects_from(p1, p2, i, j + 1, memo)
        }
        // Wildcard against literal: the wildcard either contributes nothing
        // here, or absorbs the literal and remains available.
        (Some(Token::Any), Some(Token::Literal(_))) => {
            intersects_from(p1, p2, i + 1, j, memo) || intersects_from(p1, p2, i, j + 1, memo)
        }
        (Some(Token::Literal(_)), Some(Token::Any)) => {
            intersects_from(p1, p2, i, j + 1, memo) || intersects_from(p1, p2, i + 1, j, memo)
        }
    };
    memo.insert((i, j), matched);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_table() {
        let cases = [
            ("a", "b", false),
            ("a", "a", true),
            ("a", "*", true),
            ("*", "a", true),
            ("a*a", "*", true),
            ("a*a", "a*b", false),
            ("a*a", "aa", true),
            ("a*a", "aba", true),
            ("*a*", "*b*", true),   // "ab"
            ("a*a*", "a*b*", true), // "aba"
            ("aaaaaa:/b", "aa*a:/b", true),
            ("*/*", "*personalize*", true), // "personalize/"
            ("", "*", true),
            ("", "**", true),
            ("", "a", false),
            ("**", "a", true),
        ];
        for (p1, p2, expected) in cases {
            assert_eq!(
                is_glob_match(p1, p2),
                expected,
                "matching {p1:?} with {p2:?} should return {expected}"
            );
        }
    }

    #[test]
    fn test_glob_match_is_symmetric() {
        let patterns = [
            "", "a", "b", "*", "**", "a*a", "a*b", "*a*", "*b*", "aba", "aa*a:/b", "*/*",
        ];
        for p1 in patterns {
            for p2 in patterns {
                assert_eq!(
                    is_glob_match(p1, p2),
                    is_glob_match(p2, p1),
                    "symmetry broken for {p1:?} / {p2:?}"
                );
            }
        }
    }

    #[test]
    fn test_glob_match_is_reflexive_for_literals() {
        for s in ["", "a", "mybucket", "us-east-1", "trail/my-trail", "a:/b"] {
            assert!(is_glob_match(s, s), "literal {s:?} should match itself");
        }
    }

    #[test]
    fn test_glob_match_reduces_to_plain_wildcard_matching() {
        assert!(is_glob_match("my*bucket", "mylogbucket"));
        assert!(is_glob_match("my*bucket*", "mylogbucket2"));
        assert!(!is_glob_match("my*bucket", "mylogbucket2"));
        assert!(!is_glob_match("mybucket", "mybucket2"));
    }

    #[test]
    fn test_glob_match_is_case_sensitive() {
        assert!(!is_glob_match("MyBucket", "mybucket"));
        assert!(is_glob_match("My*", "MyBucket"));
    }
}
