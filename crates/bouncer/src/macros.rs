//! Macros for defining chain operations with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`operation!`]: predicate operation (struct + `ChainOperation` impl)
//!
//! # Examples
//!
//! ```rust,ignore
//! use bouncer::operation;
//!
//! // Unit operation (no fields)
//! operation! {
//!     pub IsPresent as "is_present";
//!     rule(value) { value.is_some() }
//!     message(name) { format!("{name} is required") }
//! }
//!
//! // Struct with fields
//! operation! {
//!     pub Equals { expected: serde_json::Value } as "eq";
//!     rule(self, value) { value == Some(&self.expected) }
//!     message(self, name) { format!("{name} must equal {}", self.expected) }
//! }
//! ```

// ============================================================================
// OPERATION MACRO
// ============================================================================

/// Creates a predicate chain operation: struct definition, constructor and a
/// `ChainOperation` implementation that fails with the given code when the
/// rule does not hold.
///
/// `rule` sees the current value as `Option<&serde_json::Value>` (`None` when
/// absent). `message` builds the default failure text from the value's name;
/// a caller's tip replaces it.
///
/// # Variants
///
/// **Unit operation** (zero-sized, no fields):
/// ```rust,ignore
/// operation! {
///     pub IsArray as "is_array";
///     rule(value) { matches!(value, Some(Value::Array(_))) }
///     message(name) { format!("{name} must be an array") }
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// operation! {
///     pub IsIn { set: Vec<Value> } as "is_in";
///     rule(self, value) { value.is_some_and(|v| self.set.contains(v)) }
///     message(self, name) { format!("Invalid {name}") }
/// }
/// ```
#[macro_export]
macro_rules! operation {
    // ── Variant 1: Unit operation (no fields) ────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident as $code:literal;
        rule($inp:ident) $rule:block
        message($key:ident) $msg:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl<C> $crate::foundation::ChainOperation<C> for $name {
            fn name(&self) -> &str {
                $code
            }

            #[allow(unused_variables)]
            fn apply(
                &self,
                step: &mut $crate::foundation::Step<'_, '_, C>,
            ) -> ::std::result::Result<(), $crate::foundation::ChainError> {
                let $inp: ::std::option::Option<&$crate::Value> = step.value();
                if $rule {
                    Ok(())
                } else {
                    let $key = step.name();
                    Err(step.fail($code, $msg))
                }
            }
        }
    };

    // ── Variant 2: Struct with fields + auto new ─────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } as $code:literal;
        rule($self_:ident, $inp:ident) $rule:block
        message($self2:ident, $key:ident) $msg:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<C> $crate::foundation::ChainOperation<C> for $name {
            fn name(&self) -> &str {
                $code
            }

            #[allow(unused_variables)]
            fn apply(
                &$self_,
                step: &mut $crate::foundation::Step<'_, '_, C>,
            ) -> ::std::result::Result<(), $crate::foundation::ChainError> {
                let $inp: ::std::option::Option<&$crate::Value> = step.value();
                if $rule {
                    Ok(())
                } else {
                    let $key = step.name();
                    Err(step.fail($code, $msg))
                }
            }
        }
    };
}
