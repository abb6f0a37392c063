//! Case-insensitive substring search over records.

use crate::record::Record;

/// Which attribute a search looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchField {
    /// Every declared searchable attribute.
    #[default]
    All,

    /// A single named attribute.
    Named(String),
}

impl SearchField {
    /// Parses a field selector; `"all"` (any case) and blank select every field.
    pub fn parse(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() || field.eq_ignore_ascii_case("all") {
            SearchField::All
        } else {
            SearchField::Named(field.to_string())
        }
    }
}

impl From<&str> for SearchField {
    fn from(field: &str) -> Self {
        Self::parse(field)
    }
}

/// Returns the records matching `query` in `field`.
///
/// A blank query returns the whole collection unchanged. Otherwise the
/// trimmed query is matched case-insensitively as a substring of the
/// attribute text; with [`SearchField::All`] a match on any declared
/// attribute includes the record. Order is preserved.
pub fn filter<T: Record>(collection: &[T], query: &str, field: &SearchField) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return collection.to_vec();
    }

    collection
        .iter()
        .filter(|record| matches(*record, &needle, field))
        .cloned()
        .collect()
}

fn matches<T: Record>(record: &T, needle: &str, field: &SearchField) -> bool {
    let contains = |name: &str| {
        record
            .field_text(name)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    };

    match field {
        SearchField::All => T::search_fields().iter().any(|name| contains(name)),
        SearchField::Named(name) => contains(name),
    }
}
