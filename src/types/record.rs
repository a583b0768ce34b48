//! The contract a domain record must meet to be listed.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Stable identifier of a record, rendered as it appears in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<uuid::Uuid> for RecordId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

/// A record that can be listed, searched, sorted and filtered.
///
/// Usually derived:
///
/// ```rust
/// use shopdesk::{Record, RecordStatus};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Record)]
/// #[record(resource = "bandeiras-cartao")]
/// struct CardBrand {
///     #[record(id, sort)]
///     id: u64,
///     #[record(search, sort)]
///     descricao: String,
///     #[record(status, sort)]
///     status: RecordStatus,
/// }
///
/// let visa = CardBrand { id: 1, descricao: "Visa".into(), status: RecordStatus::Active };
/// assert!(visa.matches_search("vis"));
/// assert_eq!(CardBrand::RESOURCE, "bandeiras-cartao");
/// ```
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Path segment of the REST resource (`/{RESOURCE}`).
    const RESOURCE: &'static str;

    /// Fields accepted by [`sort_key`](Record::sort_key).
    const SORTABLE_FIELDS: &'static [&'static str];

    /// Returns the stable identifier.
    fn id(&self) -> RecordId;

    /// Returns `true` if any searchable field contains `needle`,
    /// ignoring case.
    fn matches_search(&self, needle: &str) -> bool;

    /// Returns the value of a sortable field, or `None` for unknown fields.
    fn sort_key(&self, field: &str) -> Option<SortKey>;

    /// Returns the record status, if the record has one.
    fn status(&self) -> Option<RecordStatus> {
        None
    }

    /// Replaces the record status. Records without status ignore this.
    fn set_status(&mut self, _status: RecordStatus) {}

    /// Returns `true` if `field` can be sorted on.
    fn is_sortable(field: &str) -> bool {
        Self::SORTABLE_FIELDS.contains(&field)
    }
}

/// A comparable value extracted from a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Missing value; sorts before everything else.
    Null,
    /// Boolean value (`false` first).
    Bool(bool),
    /// Integral value.
    Integer(i64),
    /// Floating point value (prices, quantities).
    Decimal(f64),
    /// Text, compared case-insensitively.
    Text(String),
    /// Calendar date.
    Date(chrono::NaiveDate),
    /// Point in time.
    Timestamp(chrono::DateTime<chrono::Utc>),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Integer(_) | SortKey::Decimal(_) => 2,
            SortKey::Date(_) => 3,
            SortKey::Timestamp(_) => 4,
            SortKey::Text(_) => 5,
        }
    }

    /// Total order used by list sorting.
    ///
    /// Numbers compare numerically across integer and decimal keys; text
    /// compares by its lowercase form, so `"visa"` and `"Visa"` tie and
    /// keep their original order under a stable sort.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Decimal(a), SortKey::Decimal(b)) => a.total_cmp(b),
            (SortKey::Integer(a), SortKey::Decimal(b)) => (*a as f64).total_cmp(b),
            (SortKey::Decimal(a), SortKey::Integer(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Text(a), SortKey::Text(b)) => compare_text(a, b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Conversion of a field value into a [`SortKey`].
pub trait IntoSortKey {
    /// Returns the sort key for this value.
    fn sort_key(&self) -> SortKey;
}

impl IntoSortKey for String {
    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.clone())
    }
}

impl IntoSortKey for &str {
    fn sort_key(&self) -> SortKey {
        SortKey::Text((*self).to_string())
    }
}

impl IntoSortKey for Cow<'_, str> {
    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.to_string())
    }
}

impl IntoSortKey for bool {
    fn sort_key(&self) -> SortKey {
        SortKey::Bool(*self)
    }
}

macro_rules! integer_sort_key {
    ($($ty:ty),*) => {
        $(
            impl IntoSortKey for $ty {
                fn sort_key(&self) -> SortKey {
                    SortKey::Integer(i64::try_from(*self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

integer_sort_key!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl IntoSortKey for f32 {
    fn sort_key(&self) -> SortKey {
        SortKey::Decimal(f64::from(*self))
    }
}

impl IntoSortKey for f64 {
    fn sort_key(&self) -> SortKey {
        SortKey::Decimal(*self)
    }
}

impl IntoSortKey for chrono::NaiveDate {
    fn sort_key(&self) -> SortKey {
        SortKey::Date(*self)
    }
}

impl IntoSortKey for chrono::DateTime<chrono::Utc> {
    fn sort_key(&self) -> SortKey {
        SortKey::Timestamp(*self)
    }
}

impl IntoSortKey for RecordStatus {
    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.label().to_string())
    }
}

impl IntoSortKey for uuid::Uuid {
    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.to_string())
    }
}

impl<T: IntoSortKey> IntoSortKey for Option<T> {
    fn sort_key(&self) -> SortKey {
        self.as_ref().map_or(SortKey::Null, IntoSortKey::sort_key)
    }
}

/// Case-insensitive substring matching over a field value.
pub trait SearchField {
    /// Returns `true` if the value contains `needle_lowercase`.
    ///
    /// `needle_lowercase` must already be lowercase.
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool;
}

impl SearchField for str {
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
        self.to_lowercase().contains(needle_lowercase)
    }
}

impl SearchField for String {
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
        self.as_str().contains_lowercase(needle_lowercase)
    }
}

impl SearchField for RecordId {
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
        self.as_str().contains_lowercase(needle_lowercase)
    }
}

macro_rules! display_search_field {
    ($($ty:ty),*) => {
        $(
            impl SearchField for $ty {
                fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
                    self.to_string().to_lowercase().contains(needle_lowercase)
                }
            }
        )*
    };
}

display_search_field!(i32, i64, u32, u64, usize, uuid::Uuid);

impl<T: SearchField> SearchField for Option<T> {
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
        self.as_ref()
            .is_some_and(|value| value.contains_lowercase(needle_lowercase))
    }
}

/// A field that stores a record status.
pub trait StatusField {
    /// Reads the status.
    fn get_status(&self) -> RecordStatus;

    /// Writes the status.
    fn put_status(&mut self, status: RecordStatus);
}

impl StatusField for RecordStatus {
    fn get_status(&self) -> RecordStatus {
        *self
    }

    fn put_status(&mut self, status: RecordStatus) {
        *self = status;
    }
}

impl StatusField for bool {
    fn get_status(&self) -> RecordStatus {
        RecordStatus::from_active(*self)
    }

    fn put_status(&mut self, status: RecordStatus) {
        *self = status.is_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_compares_case_insensitively() {
        let a = SortKey::Text("alpha".into());
        let b = SortKey::Text("Beta".into());
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(
            SortKey::Text("Visa".into()).compare(&SortKey::Text("visa".into())),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(
            SortKey::Integer(9).compare(&SortKey::Integer(10)),
            Ordering::Less
        );
        assert_eq!(
            SortKey::Integer(2).compare(&SortKey::Decimal(1.5)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(
            SortKey::Null.compare(&SortKey::Text(String::new())),
            Ordering::Less
        );
        assert_eq!(None::<String>.sort_key(), SortKey::Null);
    }

    #[test]
    fn test_search_field_option() {
        let name = Some("Mecânica Geral".to_string());
        assert!(name.contains_lowercase("mecânica"));
        assert!(!None::<String>.contains_lowercase("x"));
        assert!(42u64.contains_lowercase("4"));
    }

    #[test]
    fn test_bool_status_field() {
        let mut active = true;
        assert_eq!(active.get_status(), RecordStatus::Active);
        active.put_status(RecordStatus::Inactive);
        assert!(!active);
    }

    #[test]
    fn test_record_id_from() {
        assert_eq!(RecordId::from(7u64).as_str(), "7");
        assert_eq!(RecordId::from("abc").to_string(), "abc");
    }
}
