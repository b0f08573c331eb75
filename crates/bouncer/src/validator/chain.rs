//! The chainable method catalog
//!
//! Each method returns `Err` to abort the chain and `Ok(&mut Self)` to
//! continue, so a whole chain reads as a sequence of `?`:
//!
//! ```
//! # use bouncer::{Bouncer, RawRequest, ChainError};
//! # use serde_json::json;
//! # fn main() -> Result<(), ChainError> {
//! let engine = Bouncer::<RawRequest>::new();
//! let request = RawRequest::new().with_body(json!({"age": "42"}));
//! let mut session = engine.session(&request);
//!
//! session
//!     .validate_body("age")
//!     .required(None)?
//!     .to_int(None)?
//!     .gte(18, Some("Must be an adult"))?;
//!
//! assert_eq!(session.vals().get("age"), Some(&json!(42)));
//! # Ok(())
//! # }
//! ```

use regex::Regex;
use serde_json::Value;

use crate::foundation::{ChainError, ChainResult};
use crate::operations::{
    Check, CheckNot, CheckPred, Clamp, Compare, DecodeBase64, DefaultTo, DefaultWith,
    EncodeBase64, Equals, FromJson, IsArray, IsFiniteNumber, IsIn, IsInt, IsJson, IsLength,
    IsNotEmpty, IsNotIn, IsString, IsUuid, Matches, Ordering, Required, StringFormat, Tap,
    ToArray, ToBoolean, ToFloat, ToInt, ToInts, ToStr, Trim, Uniq, UuidVersion,
};
use crate::session::Session;
use crate::validator::Validator;

// ============================================================================
// UUID ARGUMENTS
// ============================================================================

/// Arguments of [`Validator::is_uuid`]: a version and an optional tip.
///
/// A single string is read as a version tag when it is one of `v3`, `v4`,
/// `v5` or `all`, and as the tip otherwise. For a `(first, second)` pair the
/// same test is applied to `first`; when it is not a tag it becomes the tip
/// and `second` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UuidArgs<'a> {
    pub version: UuidVersion,
    pub tip: Option<&'a str>,
}

impl From<()> for UuidArgs<'_> {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl<'a> From<&'a str> for UuidArgs<'a> {
    fn from(arg: &'a str) -> Self {
        match UuidVersion::from_tag(arg) {
            Some(version) => Self { version, tip: None },
            None => Self {
                version: UuidVersion::All,
                tip: Some(arg),
            },
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for UuidArgs<'a> {
    fn from((first, second): (&'a str, &'a str)) -> Self {
        match UuidVersion::from_tag(first) {
            Some(version) => Self {
                version,
                tip: Some(second),
            },
            None => Self::from(first),
        }
    }
}

impl From<UuidVersion> for UuidArgs<'_> {
    fn from(version: UuidVersion) -> Self {
        Self { version, tip: None }
    }
}

impl<'a> From<(UuidVersion, &'a str)> for UuidArgs<'a> {
    fn from((version, tip): (UuidVersion, &'a str)) -> Self {
        Self {
            version,
            tip: Some(tip),
        }
    }
}

// ============================================================================
// CHAIN METHODS
// ============================================================================

impl<C> Validator<'_, '_, C> {
    // ------------------------------------------------------------------------
    // Presence
    // ------------------------------------------------------------------------

    /// Fails unless the value is present.
    pub fn required(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Required, tip)
    }

    /// Fails unless the value is a non-empty string or array.
    pub fn is_not_empty(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsNotEmpty, tip)
    }

    /// Sets `value` if nothing is present yet.
    pub fn default_to(&mut self, value: impl Into<Value>) -> ChainResult<'_, Self> {
        self.run(&DefaultTo::new(value.into()), None)
    }

    /// Sets the result of `produce` if nothing is present yet.
    pub fn default_with<F>(&mut self, produce: F) -> ChainResult<'_, Self>
    where
        F: Fn(&Session<'_, C>) -> Value,
    {
        self.run(&DefaultWith::new(produce), None)
    }

    // ------------------------------------------------------------------------
    // Membership and comparison
    // ------------------------------------------------------------------------

    /// Fails unless the value equals one member of `set`.
    pub fn is_in<I>(&mut self, set: I, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = set.into_iter().map(Into::into).collect();
        self.run(&IsIn::new(set), tip)
    }

    /// Fails if the value equals any member of `set`.
    pub fn is_not_in<I>(&mut self, set: I, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = set.into_iter().map(Into::into).collect();
        self.run(&IsNotIn::new(set), tip)
    }

    /// Fails unless the value is strictly equal to `expected`; `17` and
    /// `17.0` are the same number.
    pub fn eq(&mut self, expected: impl Into<Value>, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Equals::new(expected.into()), tip)
    }

    /// Fails unless the value is a number greater than `operand`.
    pub fn gt(&mut self, operand: impl Into<Value>, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Compare::new(Ordering::Greater, operand.into()), tip)
    }

    /// Fails unless the value is a number greater than or equal to `operand`.
    pub fn gte(&mut self, operand: impl Into<Value>, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Compare::new(Ordering::GreaterOrEqual, operand.into()), tip)
    }

    /// Fails unless the value is a number less than `operand`.
    pub fn lt(&mut self, operand: impl Into<Value>, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Compare::new(Ordering::Less, operand.into()), tip)
    }

    /// Fails unless the value is a number less than or equal to `operand`.
    pub fn lte(&mut self, operand: impl Into<Value>, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Compare::new(Ordering::LessOrEqual, operand.into()), tip)
    }

    /// Fails unless the string or array length lies in `min..=max`.
    pub fn is_length(&mut self, min: usize, max: usize, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsLength::new(min, max), tip)
    }

    /// Pulls a number into `[min, max]`.
    pub fn clamp(&mut self, min: impl Into<Value>, max: impl Into<Value>) -> ChainResult<'_, Self> {
        self.run(&Clamp::new(min.into(), max.into()), None)
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    /// Fails unless the value is a string.
    pub fn is_string(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsString, tip)
    }

    /// Fails unless the value is an array.
    pub fn is_array(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsArray, tip)
    }

    /// Fails unless the value is a safe integer.
    pub fn is_int(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsInt, tip)
    }

    /// Fails unless the value is a finite number.
    pub fn is_finite_number(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsFiniteNumber, tip)
    }

    // ------------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------------

    /// Converts the value to an integer.
    pub fn to_int(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&ToInt, tip)
    }

    /// Converts the value to a finite number.
    pub fn to_float(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&ToFloat, tip)
    }

    /// Converts every array element to an integer, all or nothing.
    pub fn to_ints(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&ToInts, tip)
    }

    /// Wraps the value into an array unless it already is one.
    pub fn to_array(&mut self) -> ChainResult<'_, Self> {
        self.run(&ToArray, None)
    }

    /// Removes repeated array elements.
    pub fn uniq(&mut self) -> ChainResult<'_, Self> {
        self.run(&Uniq, None)
    }

    /// Replaces the value with its truthiness.
    pub fn to_boolean(&mut self) -> ChainResult<'_, Self> {
        self.run(&ToBoolean, None)
    }

    /// Coerces the value to a string.
    pub fn to_string(&mut self) -> ChainResult<'_, Self> {
        self.run(&ToStr, None)
    }

    /// Trims surrounding whitespace from a string.
    pub fn trim(&mut self) -> ChainResult<'_, Self> {
        self.run(&Trim, None)
    }

    /// Parses the string as JSON and replaces the value with the result.
    pub fn from_json(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&FromJson, tip)
    }

    /// Fails unless the string holds valid JSON.
    pub fn is_json(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&IsJson, tip)
    }

    /// Replaces a string with its base64 encoding.
    pub fn encode_base64(&mut self) -> ChainResult<'_, Self> {
        self.run(&EncodeBase64, None)
    }

    /// Decodes a base64 string holding UTF-8 text.
    pub fn decode_base64(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&DecodeBase64, tip)
    }

    // ------------------------------------------------------------------------
    // Patterns and formats
    // ------------------------------------------------------------------------

    /// Fails unless the string matches `pattern`.
    pub fn matches(&mut self, pattern: &Regex, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Matches::new(pattern.clone()), tip)
    }

    /// Fails if the string matches `pattern`.
    pub fn not_matches(&mut self, pattern: &Regex, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Matches::not(pattern.clone()), tip)
    }

    /// Fails unless the string contains only ASCII letters.
    pub fn is_alpha(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::alpha(), tip)
    }

    /// Fails unless the string contains only ASCII letters and digits.
    pub fn is_alphanumeric(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::alphanumeric(), tip)
    }

    /// Fails unless the string is a decimal number.
    pub fn is_numeric(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::numeric(), tip)
    }

    /// Fails unless the string is non-empty ASCII.
    pub fn is_ascii(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::ascii(), tip)
    }

    /// Fails unless the string is padded base64.
    pub fn is_base64(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::base64(), tip)
    }

    /// Fails unless the string is an email address.
    pub fn is_email(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::email(), tip)
    }

    /// Fails unless the string is a hex color.
    pub fn is_hex_color(&mut self, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&StringFormat::hex_color(), tip)
    }

    /// Fails unless the string is a UUID.
    ///
    /// ```
    /// # use bouncer::{Bouncer, RawRequest};
    /// # use bouncer::operations::UuidVersion;
    /// # use serde_json::json;
    /// # let engine = Bouncer::<RawRequest>::new();
    /// # let request = RawRequest::new().with_query("id", json!("9b2e6f4e-8c1a-4c5e-9f3d-2a7b1c0d4e5f"));
    /// let mut session = engine.session(&request);
    /// let mut id = session.validate_query("id");
    /// assert!(id.is_uuid(()).is_ok());
    /// assert!(id.is_uuid("v4").is_ok());
    /// assert!(id.is_uuid(("v4", "Bad id")).is_ok());
    /// assert!(id.is_uuid((UuidVersion::V3, "Need a v3 id")).is_err());
    /// ```
    pub fn is_uuid<'a>(&mut self, args: impl Into<UuidArgs<'a>>) -> ChainResult<'_, Self> {
        let UuidArgs { version, tip } = args.into();
        self.run(&IsUuid::new(version), tip)
    }

    // ------------------------------------------------------------------------
    // Callbacks
    // ------------------------------------------------------------------------

    /// Fails unless `passed` is true.
    #[doc(alias = "assert")]
    pub fn check(&mut self, passed: bool, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&Check::new(passed), tip)
    }

    /// Fails if `failed` is true.
    #[doc(alias = "assert_not")]
    pub fn check_not(&mut self, failed: bool, tip: Option<&str>) -> ChainResult<'_, Self> {
        self.run(&CheckNot::new(failed), tip)
    }

    /// Fails unless `predicate` holds for the current value.
    pub fn check_pred<F>(&mut self, predicate: F, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        F: Fn(&Session<'_, C>, Option<&Value>) -> bool,
    {
        self.run(&CheckPred::new(predicate), tip)
    }

    /// Fails if `predicate` holds for the current value.
    pub fn check_not_pred<F>(&mut self, predicate: F, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        F: Fn(&Session<'_, C>, Option<&Value>) -> bool,
    {
        self.run(&CheckPred::not(predicate), tip)
    }

    /// Replaces the value with the result of `transform`.
    ///
    /// `transform` gets the current value by clone, `None` when absent. If it
    /// returns a validation failure, this step fails with code `tap` and the
    /// tip, or `"Invalid {name}"`: the inner message is not kept.
    pub fn tap<F>(&mut self, transform: F, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        F: Fn(&Session<'_, C>, Option<Value>) -> Result<Value, ChainError>,
    {
        self.run(&Tap::new(transform), tip)
    }
}
