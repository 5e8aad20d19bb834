use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::tags::{TagContext, TagKey, TagValue};

/// The values of a view's columns for one recording, in column order.
///
/// A `None` entry is the *unknown* tag value: the recording's tag context did
/// not carry that column's key. All recordings missing the same columns
/// share one entry.
///
/// This must implement [Hash], [PartialEq], and [Eq] so it may be used as
/// HashMap keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagValues(Vec<Option<TagValue>>, u64);

impl TagValues {
    /// Creates tag values from values in column order.
    pub fn new(values: Vec<Option<TagValue>>) -> Self {
        let hash = calculate_hash(&values);
        TagValues(values, hash)
    }

    /// Projects `tags` onto `columns`.
    pub(crate) fn from_tags(tags: &TagContext, columns: &[TagKey]) -> Self {
        TagValues::new(
            columns
                .iter()
                .map(|column| tags.get(column).cloned())
                .collect(),
        )
    }

    /// The values, in column order.
    pub fn values(&self) -> &[Option<TagValue>] {
        &self.0
    }
}

impl<V: Into<TagValue>> FromIterator<Option<V>> for TagValues {
    fn from_iter<I: IntoIterator<Item = Option<V>>>(iter: I) -> Self {
        TagValues::new(iter.into_iter().map(|v| v.map(Into::into)).collect())
    }
}

fn calculate_hash(values: &[Option<TagValue>]) -> u64 {
    let mut hasher = FxHasher::default();
    values.iter().fold(&mut hasher, |hasher, item| {
        item.hash(hasher);
        hasher
    });
    hasher.finish()
}

impl Hash for TagValues {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;

    use super::*;

    fn hash_of(values: &TagValues) -> u64 {
        let mut hasher = DefaultHasher::new();
        values.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_values_share_map_entry() {
        let a: TagValues = vec![Some("v1"), None, Some("v3")].into_iter().collect();
        let b = TagValues::new(vec![
            Some(TagValue::from("v1")),
            None,
            Some(TagValue::new(String::from("v3"))),
        ]);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut map = HashMap::new();
        map.insert(a, 1);
        *map.entry(b).or_insert(0) += 1;
        assert_eq!(map.len(), 1);
        assert_eq!(map.values().next(), Some(&2));
    }

    #[test]
    fn position_matters() {
        let a: TagValues = vec![Some("x"), None].into_iter().collect();
        let b: TagValues = vec![None, Some("x")].into_iter().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_differs_from_empty_value() {
        let unknown: TagValues = vec![None::<&'static str>].into_iter().collect();
        let empty: TagValues = vec![Some("")].into_iter().collect();
        assert_ne!(unknown, empty);
    }

    #[test]
    fn projects_columns_in_order() {
        let tags = TagContext::builder()
            .with_tag("b", "vb")
            .with_tag("a", "va")
            .with_tag("ignored", "x")
            .build();
        let columns = vec![TagKey::new("a"), TagKey::new("missing"), TagKey::new("b")];

        let values = TagValues::from_tags(&tags, &columns);
        assert_eq!(
            values.values(),
            &[Some(TagValue::from("va")), None, Some(TagValue::from("vb"))]
        );
    }
}
