//! Pure field-level validation predicates.
//!
//! Every predicate is total and side-effect-free: it takes a raw string value
//! and reports pass/fail. The blacklist checks (`contains_sql_keyword`,
//! `contains_xss_markup`) are defense-in-depth heuristics layered on top of
//! parameter-bound persistence, never a substitute for it.

use once_cell::sync::Lazy;
use regex::Regex;

/// What category of check a violation came from. Blacklist violations are
/// treated as potential-abuse signals by the form validator, everything else
/// is an ordinary user-correctable mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    Length,
    Format,
    Blacklist,
}

/// A single failed check on a single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub kind: ViolationKind,
    pub message: String,
}

impl RuleViolation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// SQL tokens rejected when they appear as a whole word or exact sequence.
///
/// Matching is case-insensitive and word-bounded on both sides, so "Andrew"
/// passes while "foo AND bar" fails. Tokens with no adjacent word character
/// (a lone leading `--`, for instance) do not produce a boundary and are not
/// matched; this mirrors the product's established behavior.
const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "EXEC", "UNION", "SCRIPT",
    "--", ";", "/*", "*/", "xp_", "sp_", "OR", "AND", "1=1", "1 = 1",
];

static SQL_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = SQL_KEYWORDS
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("SQL keyword pattern is valid")
});

/// Markup fragments rejected wherever they appear in the value,
/// case-insensitively.
const XSS_MARKUP: &[&str] = &[
    "<script>",
    "</script>",
    "<iframe>",
    "javascript:",
    "onerror=",
    "onload=",
    "<img",
    "<object>",
];

/// `^\+?[\d\s\-()]{10,20}$` - an optional leading plus, then 10-20 digits,
/// spaces, hyphens, or parentheses. The whole value must match.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{10,20}$").expect("phone pattern is valid"));

/// RFC 5321 compatible email address (simplified but safe).
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("email pattern is valid")
});

/// A value is blank when it is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Inclusive character-count bounds check.
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    min <= len && len <= max
}

pub fn matches_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn matches_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// True when the value contains a blacklisted SQL token as a whole word or
/// exact sequence, case-insensitively.
pub fn contains_sql_keyword(value: &str) -> bool {
    SQL_KEYWORD_RE.is_match(value)
}

/// True when the value contains any blacklisted markup fragment,
/// case-insensitively.
pub fn contains_xss_markup(value: &str) -> bool {
    let lowered = value.to_lowercase();
    XSS_MARKUP.iter().any(|fragment| lowered.contains(fragment))
}
