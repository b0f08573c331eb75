//! Built-in chain operations
//!
//! Every method on [`Validator`](crate::Validator) is a thin wrapper that
//! builds one of these and hands it to [`Validator::run`](crate::Validator::run).
//! They are public so custom registries can reuse them under other names.
//!
//! # Categories
//!
//! - **Presence**: `Required`, `IsNotEmpty`, `DefaultTo`, `DefaultWith`
//! - **Types**: `IsString`, `IsArray`, `IsInt`, `IsFiniteNumber`
//! - **Comparison**: `IsIn`, `IsNotIn`, `Equals`, `Compare`, `IsLength`, `Clamp`
//! - **Conversion**: `ToInt`, `ToFloat`, `ToInts`, `ToArray`, `Uniq`,
//!   `ToBoolean`, `ToStr`, `Trim`, `FromJson`, `IsJson`, `EncodeBase64`,
//!   `DecodeBase64`
//! - **Format**: `StringFormat`, `IsUuid`, `Matches`
//! - **Callback**: `Check`, `CheckNot`, `CheckPred`, `Tap`

pub mod callback;
pub mod comparison;
pub mod conversion;
pub mod format;
pub mod presence;
pub mod types;

pub use callback::{Check, CheckNot, CheckPred, Tap};
pub use comparison::{Clamp, Compare, Equals, IsIn, IsLength, IsNotIn, Ordering};
pub use conversion::{
    DecodeBase64, EncodeBase64, FromJson, IsJson, ToArray, ToBoolean, ToFloat, ToInt, ToInts,
    ToStr, Trim, Uniq,
};
pub use format::{IsUuid, Matches, StringFormat, UuidVersion};
pub use presence::{DefaultTo, DefaultWith, IsNotEmpty, Required};
pub use types::{IsArray, IsFiniteNumber, IsInt, IsString};
