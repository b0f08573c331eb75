//! String format checks
//!
//! Every check here first requires a string: any other value fails with the
//! `is_string` code before the format itself is looked at.

use std::fmt;
use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::foundation::{ChainError, ChainOperation, Step};

static ALPHA_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

static ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

static NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*\.)?[0-9]+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});

static UUID_V3_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-3[0-9A-F]{3}-[0-9A-F]{4}-[0-9A-F]{12}$").unwrap()
});

static UUID_V4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-4[0-9A-F]{3}-[89AB][0-9A-F]{3}-[0-9A-F]{12}$")
        .unwrap()
});

static UUID_V5_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-5[0-9A-F]{3}-[89AB][0-9A-F]{3}-[0-9A-F]{12}$")
        .unwrap()
});

static UUID_ANY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}$").unwrap()
});

// ============================================================================
// STRING FORMATS
// ============================================================================

/// A named string format check.
#[derive(Clone, Copy)]
pub struct StringFormat {
    code: &'static str,
    requirement: &'static str,
    test: fn(&str) -> bool,
}

impl StringFormat {
    fn new(code: &'static str, requirement: &'static str, test: fn(&str) -> bool) -> Self {
        Self {
            code,
            requirement,
            test,
        }
    }

    /// ASCII letters only.
    #[must_use]
    pub fn alpha() -> Self {
        Self::new("is_alpha", "must only contain letters", |s| {
            ALPHA_REGEX.is_match(s)
        })
    }

    /// ASCII letters and digits only.
    #[must_use]
    pub fn alphanumeric() -> Self {
        Self::new(
            "is_alphanumeric",
            "must only contain letters and numbers",
            |s| ALPHANUMERIC_REGEX.is_match(s),
        )
    }

    /// An optionally signed decimal number, e.g. `-12` or `3.5`.
    #[must_use]
    pub fn numeric() -> Self {
        Self::new("is_numeric", "must be numeric", |s| NUMERIC_REGEX.is_match(s))
    }

    /// Non-empty and ASCII only.
    #[must_use]
    pub fn ascii() -> Self {
        Self::new("is_ascii", "must only contain ASCII characters", |s| {
            !s.is_empty() && s.is_ascii()
        })
    }

    /// Non-empty, standard alphabet, padded base64.
    #[must_use]
    pub fn base64() -> Self {
        Self::new("is_base64", "must be base64 encoded", |s| {
            !s.is_empty() && s.len() % 4 == 0 && STANDARD.decode(s).is_ok()
        })
    }

    /// An email address with a dotted domain.
    #[must_use]
    pub fn email() -> Self {
        Self::new("is_email", "must be a valid email address", |s| {
            EMAIL_REGEX.is_match(s)
        })
    }

    /// A 3, 4, 6 or 8 digit hex color with an optional leading `#`.
    #[must_use]
    pub fn hex_color() -> Self {
        Self::new("is_hex_color", "must be a hex color", |s| {
            HEX_COLOR_REGEX.is_match(s)
        })
    }

    /// Error code of this format.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Returns true if `s` is in this format.
    #[must_use]
    pub fn test(&self, s: &str) -> bool {
        (self.test)(s)
    }
}

impl fmt::Debug for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringFormat").field(&self.code).finish()
    }
}

impl<C> ChainOperation<C> for StringFormat {
    fn name(&self) -> &str {
        self.code
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let s = step.require_string()?;
        if self.test(s) {
            Ok(())
        } else {
            Err(step.fail(self.code, format!("{} {}", step.name(), self.requirement)))
        }
    }
}

// ============================================================================
// UUID
// ============================================================================

/// UUID version accepted by [`IsUuid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UuidVersion {
    V3,
    V4,
    V5,
    /// Any version, including the nil UUID.
    #[default]
    All,
}

impl UuidVersion {
    /// Parses one of the tags `v3`, `v4`, `v5`, `all`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "v3" => Some(Self::V3),
            "v4" => Some(Self::V4),
            "v5" => Some(Self::V5),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// The tag this version parses from.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "v3",
            Self::V4 => "v4",
            Self::V5 => "v5",
            Self::All => "all",
        }
    }

    /// Returns true if `s` is a UUID of this version.
    #[must_use]
    pub fn matches(self, s: &str) -> bool {
        let pattern: &Regex = match self {
            Self::V3 => &*UUID_V3_REGEX,
            Self::V4 => &*UUID_V4_REGEX,
            Self::V5 => &*UUID_V5_REGEX,
            Self::All => &*UUID_ANY_REGEX,
        };
        pattern.is_match(s)
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fails unless the value is a UUID string of the given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsUuid {
    pub version: UuidVersion,
}

impl IsUuid {
    #[must_use]
    pub const fn new(version: UuidVersion) -> Self {
        Self { version }
    }
}

impl<C> ChainOperation<C> for IsUuid {
    fn name(&self) -> &str {
        "is_uuid"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let s = step.require_string()?;
        if self.version.matches(s) {
            return Ok(());
        }
        let message = match self.version {
            UuidVersion::All => format!("{} must be a UUID", step.name()),
            version => format!("{} must be a {version} UUID", step.name()),
        };
        Err(step.fail("is_uuid", message))
    }
}

// ============================================================================
// PATTERNS
// ============================================================================

/// Fails unless the string matches (or, negated, does not match) a regex.
#[derive(Debug, Clone)]
pub struct Matches {
    pub pattern: Regex,
    pub negate: bool,
}

impl Matches {
    #[must_use]
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            negate: false,
        }
    }

    #[must_use]
    pub fn not(pattern: Regex) -> Self {
        Self {
            pattern,
            negate: true,
        }
    }

    const fn code(&self) -> &'static str {
        if self.negate { "not_matches" } else { "matches" }
    }
}

impl<C> ChainOperation<C> for Matches {
    fn name(&self) -> &str {
        self.code()
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let s = step.require_string()?;
        if self.pattern.is_match(s) != self.negate {
            return Ok(());
        }
        let verb = if self.negate { "must not match" } else { "must match" };
        let message = format!("{} {verb} {}", step.name(), self.pattern.as_str());
        Err(step.fail(self.code(), message))
    }
}
