use std::cell::RefCell;
use std::collections::{hash_map, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::otel_debug;
use crate::validation::{tag_value_error, validate_name};

use super::{TagKey, TagValue};

thread_local! {
    static CURRENT_TAGS: RefCell<TagContext> = RefCell::new(TagContext::default());
}

/// The set of tags a measurement is recorded with.
///
/// Each key maps to exactly one value. When a context is built from pairs
/// that repeat a key, the last value wins. Entries whose key or value fail
/// validation are dropped.
///
/// `TagContext`s are immutable and cheap to clone. Deriving a context with
/// [`with_tag`] creates a new context and leaves the original untouched.
///
/// ## Managing the current tag context
///
/// A context can be made the thread's *current* one via [`attach`]; the
/// previous current context is restored when the returned
/// [`TagContextGuard`] is dropped. Recordings made with
/// [`MeasureMap::record_current`] use the current context.
///
/// # Examples
///
/// ```
/// use opentelemetry_stats::tags::{TagContext, TagKey};
///
/// let method = TagKey::new("method");
/// let tags = TagContext::builder()
///     .with_tag(method.clone(), "GET")
///     .with_tag(method.clone(), "POST")
///     .build();
///
/// assert_eq!(tags.get(&method).map(|v| v.as_str()), Some("POST"));
///
/// let _guard = tags.attach();
/// assert_eq!(TagContext::current().len(), 1);
/// ```
///
/// [`with_tag`]: TagContext::with_tag()
/// [`attach`]: TagContext::attach()
/// [`MeasureMap::record_current`]: crate::stats::MeasureMap::record_current
#[derive(Clone, Default, PartialEq)]
pub struct TagContext {
    entries: Arc<HashMap<TagKey, TagValue>>,
}

impl TagContext {
    /// Creates an empty `TagContext`.
    pub fn new() -> Self {
        TagContext::default()
    }

    /// Returns a builder for a new `TagContext`.
    pub fn builder() -> TagContextBuilder {
        TagContextBuilder::default()
    }

    /// Returns an immutable snapshot of the current thread's tag context.
    pub fn current() -> Self {
        Self::map_current(|cx| cx.clone())
    }

    /// Applies a function to the current tag context returning its value.
    ///
    /// This can be used to inspect the current tags without cloning them.
    pub fn map_current<T>(f: impl FnOnce(&TagContext) -> T) -> T {
        CURRENT_TAGS.with(|cx| f(&cx.borrow()))
    }

    /// Returns a copy of this context with the given tag inserted or replaced.
    pub fn with_tag(&self, key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        let mut entries = (*self.entries).clone();
        insert_validated(&mut entries, key.into(), value.into());
        TagContext {
            entries: Arc::new(entries),
        }
    }

    /// Returns the value of the given key, if present.
    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&TagValue> {
        self.entries.get(key.as_ref())
    }

    /// Returns the number of tags in this context.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the context holds no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the tags in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, TagKey, TagValue> {
        self.entries.iter()
    }

    /// Replaces the current thread's tag context with this one.
    ///
    /// Dropping the returned [`TagContextGuard`] restores the previous
    /// context.
    pub fn attach(self) -> TagContextGuard {
        let previous = CURRENT_TAGS
            .try_with(|current| current.replace(self))
            .ok();

        TagContextGuard {
            previous,
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for TagContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort();
        f.debug_map().entries(entries).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for TagContext
where
    K: Into<TagKey>,
    V: Into<TagValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (key, value) in iter {
            insert_validated(&mut entries, key.into(), value.into());
        }
        TagContext {
            entries: Arc::new(entries),
        }
    }
}

fn insert_validated(entries: &mut HashMap<TagKey, TagValue>, key: TagKey, value: TagValue) {
    if let Err(err) = validate_name(key.as_str()) {
        otel_debug!(
            name: "TagContext.InvalidKeyDropped",
            key = key.as_str(),
            reason = format!("{}", err)
        );
        return;
    }
    if let Some(reason) = tag_value_error(value.as_str()) {
        otel_debug!(
            name: "TagContext.InvalidValueDropped",
            key = key.as_str(),
            reason = reason
        );
        return;
    }
    entries.insert(key, value);
}

/// Builder for [`TagContext`].
#[derive(Debug, Default)]
pub struct TagContextBuilder {
    entries: HashMap<TagKey, TagValue>,
}

impl TagContextBuilder {
    /// Adds a tag, replacing any earlier value of the same key.
    pub fn with_tag(mut self, key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        insert_validated(&mut self.entries, key.into(), value.into());
        self
    }

    /// Builds the [`TagContext`].
    pub fn build(self) -> TagContext {
        TagContext {
            entries: Arc::new(self.entries),
        }
    }
}

/// A guard that resets the current tag context to the prior one when dropped.
#[derive(Debug)]
pub struct TagContextGuard {
    previous: Option<TagContext>,
    // ensure this type is !Send as it relies on thread locals
    _marker: PhantomData<*const ()>,
}

impl Drop for TagContextGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let _ = CURRENT_TAGS.try_with(|current| current.replace(previous));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_last_write_wins() {
        let tags: TagContext = vec![("k1", "v1"), ("k2", "v2"), ("k1", "v3")]
            .into_iter()
            .collect();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("k1"), Some(&TagValue::from("v3")));
        assert_eq!(tags.get("k2"), Some(&TagValue::from("v2")));
    }

    #[test]
    fn invalid_entries_are_dropped() {
        let tags = TagContext::builder()
            .with_tag("", "empty key")
            .with_tag("bad\u{7f}key", "v")
            .with_tag("ok", "bad\nvalue")
            .with_tag("valid", "")
            .build();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("valid"), Some(&TagValue::from("")));
    }

    #[test]
    fn with_tag_leaves_original_untouched() {
        let original = TagContext::builder().with_tag("k", "v1").build();
        let derived = original.with_tag("k", "v2");

        assert_eq!(original.get("k"), Some(&TagValue::from("v1")));
        assert_eq!(derived.get("k"), Some(&TagValue::from("v2")));
    }

    #[test]
    fn nested_attach_restores_previous() {
        assert!(TagContext::current().is_empty());
        {
            let _outer = TagContext::builder().with_tag("a", "1").build().attach();
            assert_eq!(TagContext::current().get("a"), Some(&TagValue::from("1")));
            {
                let _inner = TagContext::current().with_tag("b", "2").attach();
                assert_eq!(TagContext::current().len(), 2);
            }
            assert_eq!(TagContext::current().len(), 1);
        }
        assert!(TagContext::current().is_empty());
    }

    #[test]
    fn current_is_thread_local() {
        let _guard = TagContext::builder().with_tag("a", "1").build().attach();
        let other_thread_len = std::thread::spawn(|| TagContext::current().len())
            .join()
            .unwrap();

        assert_eq!(other_thread_len, 0);
        assert_eq!(TagContext::current().len(), 1);
    }
}
