//! Column descriptors.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::{ActionKind, Align, Cell, RowActions};
use crate::types::{QueryParams, Record, RecordStatus, SortDirection};

/// What a column header shows about sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// The column cannot be sorted.
    NotSortable,
    /// Sortable, but the list is sorted by another column or not at all.
    Unsorted,
    /// The list is sorted by this column, ascending.
    Ascending,
    /// The list is sorted by this column, descending.
    Descending,
}

impl SortIndicator {
    /// Indicator for column `key` under `query`.
    pub fn for_column(key: &str, sortable: bool, query: &QueryParams) -> Self {
        if !sortable {
            return SortIndicator::NotSortable;
        }
        match query.sort_field.as_deref() {
            Some(field) if field == key => match query.sort_direction {
                SortDirection::Asc => SortIndicator::Ascending,
                SortDirection::Desc => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }

    /// Suffix appended to the header label.
    pub fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::NotSortable => "",
            SortIndicator::Unsorted => " ⇅",
            SortIndicator::Ascending => " ▲",
            SortIndicator::Descending => " ▼",
        }
    }
}

type RenderFn<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;

/// How one column of a table renders a record.
///
/// A column is sortable when its key names a sortable field of `T`.
///
/// ```rust
/// use shopdesk::{QueryParams, RecordStatus, SortDirection};
/// use shopdesk::projection::{Cell, Column, SortIndicator};
/// use shopdesk::testing::fixtures::Brand;
///
/// let column = Column::text("descricao", "Descrição", |b: &Brand| b.descricao.clone());
/// let visa = Brand::new(1, "Visa", RecordStatus::Active);
///
/// assert_eq!(column.render(&visa), Cell::Text("Visa".into()));
/// let query = QueryParams::new().with_sort("descricao", SortDirection::Desc);
/// assert_eq!(column.sort_indicator(&query), SortIndicator::Descending);
/// ```
pub struct Column<T> {
    key: &'static str,
    header: Cow<'static, str>,
    align: Align,
    sortable: bool,
    render: RenderFn<T>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header.clone(),
            align: self.align,
            sortable: self.sortable,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T: Record> Column<T> {
    /// Creates a column from a render function.
    pub fn new<F>(key: &'static str, header: impl Into<Cow<'static, str>>, render: F) -> Self
    where
        F: Fn(&T) -> Cell + Send + Sync + 'static,
    {
        Self {
            key,
            header: header.into(),
            align: Align::Left,
            sortable: T::is_sortable(key),
            render: Arc::new(render),
        }
    }

    /// A left-aligned text column.
    pub fn text<F>(key: &'static str, header: impl Into<Cow<'static, str>>, text: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(key, header, move |record| Cell::Text(text(record)))
    }

    /// A right-aligned number column.
    pub fn integer<F>(key: &'static str, header: impl Into<Cow<'static, str>>, value: F) -> Self
    where
        F: Fn(&T) -> i64 + Send + Sync + 'static,
    {
        Self::new(key, header, move |record| Cell::Integer(value(record)))
            .with_align(Align::Right)
    }

    /// A right-aligned amount column.
    pub fn money<F>(key: &'static str, header: impl Into<Cow<'static, str>>, value: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        Self::new(key, header, move |record| Cell::Money(value(record))).with_align(Align::Right)
    }

    /// The status badge, read through [`Record::status`].
    pub fn status(key: &'static str, header: impl Into<Cow<'static, str>>) -> Self {
        Self::new(key, header, |record: &T| record.status().into()).with_align(Align::Center)
    }

    /// A status badge from a raw encoded value.
    ///
    /// Every known spelling renders as one of the two canonical labels;
    /// unknown spellings are shown as they are.
    pub fn status_text<F>(key: &'static str, header: impl Into<Cow<'static, str>>, raw: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(key, header, move |record| {
            let raw = raw(record);
            match RecordStatus::parse(&raw) {
                Some(status) => Cell::Status(status),
                None if raw.trim().is_empty() => Cell::Empty,
                None => Cell::Text(raw),
            }
        })
        .with_align(Align::Center)
    }

    /// The action buttons column.
    pub fn actions(actions: RowActions<T>) -> Self {
        Self::new("acoes", "Ações", move |record| {
            let available: Vec<ActionKind> = actions.available(record);
            if available.is_empty() {
                Cell::Empty
            } else {
                Cell::Actions(available)
            }
        })
        .with_align(Align::Center)
        .not_sortable()
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Disables sorting even if the key names a sortable field.
    #[must_use]
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Column key, also the sort field name.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Returns `true` if clicking the header sorts the list.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Renders the cell for `record`.
    pub fn render(&self, record: &T) -> Cell {
        (self.render)(record)
    }

    /// Sort indicator for this column under `query`.
    pub fn sort_indicator(&self, query: &QueryParams) -> SortIndicator {
        SortIndicator::for_column(self.key, self.sortable, query)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}
