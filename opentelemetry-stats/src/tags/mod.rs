//! Tags attached to recorded measurements.
//!
//! A [`TagContext`] is the set of key/value pairs a recording is made with.
//! Views pick the tag keys they care about (their *columns*) and aggregate
//! measurements separately for each combination of values of those keys.
use std::borrow::{Borrow, Cow};
use std::fmt;

mod context;

pub use context::{TagContext, TagContextBuilder, TagContextGuard};

/// The name half of a tag.
///
/// Names are validated when they are used: views reject invalid column keys,
/// and [`TagContext`]s drop entries with invalid keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKey(Cow<'static, str>);

impl TagKey {
    /// Create a new tag key.
    ///
    /// # Examples
    ///
    /// ```
    /// use opentelemetry_stats::tags::TagKey;
    ///
    /// let key1 = TagKey::new("my_static_str");
    /// let key2 = TagKey::new(String::from("my_owned_string"));
    /// ```
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        TagKey(name.into())
    }

    /// Create a new const tag key.
    pub const fn from_static_str(name: &'static str) -> Self {
        TagKey(Cow::Borrowed(name))
    }

    /// Returns a reference to the underlying key name.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&'static str> for TagKey {
    fn from(name: &'static str) -> Self {
        TagKey::from_static_str(name)
    }
}

impl From<String> for TagKey {
    fn from(name: String) -> Self {
        TagKey(Cow::Owned(name))
    }
}

impl AsRef<str> for TagKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for TagKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value half of a tag.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagValue(Cow<'static, str>);

impl TagValue {
    /// Create a new tag value.
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        TagValue(value.into())
    }

    /// Returns a reference to the underlying string.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&'static str> for TagValue {
    fn from(value: &'static str) -> Self {
        TagValue(Cow::Borrowed(value))
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue(Cow::Owned(value))
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
