//! Host-redacted values
//!
//! The host withholds some numbers during restricted interaction states. A
//! withheld value can still be handed back to host primitives, but it can never
//! be read, compared or used in arithmetic here. `Secret` makes that a type
//! error instead of a convention: the only way to reach the payload is through
//! the `Plain` variant.

/// Zero-information marker for a value the host has redacted.
///
/// Has no accessors and no equality: two redacted values are never comparable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redacted;

/// A host value that is either plainly readable or redacted.
#[derive(Debug, Clone, Copy)]
pub enum Secret<T> {
    Plain(T),
    Redacted(Redacted),
}

impl<T> Secret<T> {
    /// Shorthand for `Secret::Redacted(Redacted)`
    pub const fn redacted() -> Self {
        Secret::Redacted(Redacted)
    }

    /// The opacity test. This is the only branch allowed on a withheld value.
    pub fn is_redacted(&self) -> bool {
        matches!(self, Secret::Redacted(_))
    }

    pub fn plain(&self) -> Option<&T> {
        match self {
            Secret::Plain(value) => Some(value),
            Secret::Redacted(_) => None,
        }
    }

    pub fn into_plain(self) -> Option<T> {
        match self {
            Secret::Plain(value) => Some(value),
            Secret::Redacted(_) => None,
        }
    }

    /// Transform a plain payload; a redacted value stays redacted.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Secret<U> {
        match self {
            Secret::Plain(value) => Secret::Plain(f(value)),
            Secret::Redacted(marker) => Secret::Redacted(marker),
        }
    }
}

impl<T: Copy> Secret<T> {
    /// Copy the payload out if it is plainly readable.
    pub fn get(&self) -> Option<T> {
        self.plain().copied()
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Secret::Plain(value)
    }
}

/// Plain payload of an optional secret: `None` for both absent and redacted.
pub fn readable<T: Copy>(value: Option<Secret<T>>) -> Option<T> {
    value.and_then(|secret| secret.get())
}
