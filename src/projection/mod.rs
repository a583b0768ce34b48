//! Mapping records onto table rows.
//!
//! A list screen is described by a [`TableProjection`]: an ordered set of
//! [`Column`]s, each a pure function from a record to a [`Cell`]. Row
//! actions are plain callbacks collected in [`RowActions`]; projecting never
//! triggers them.
//!
//! ```rust
//! use shopdesk::{QueryParams, RecordStatus};
//! use shopdesk::projection::{Column, RowActions, TableProjection};
//! use shopdesk::testing::fixtures::Brand;
//!
//! let table = TableProjection::new(vec![
//!     Column::integer("id", "Código", |b: &Brand| b.id as i64),
//!     Column::text("descricao", "Descrição", |b: &Brand| b.descricao.clone()),
//!     Column::status("status", "Situação"),
//!     Column::actions(RowActions::new().on_edit(|_: &Brand| {})),
//! ]);
//!
//! let row = table.project_row(&Brand::new(3, "Elo", RecordStatus::Inactive));
//! let texts: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
//! assert_eq!(texts, ["3", "Elo", "Inativo", "Editar"]);
//!
//! let headers = table.headers(&QueryParams::new());
//! assert_eq!(headers[1].to_string(), "Descrição ⇅");
//! ```

mod actions;
mod cell;
mod column;

use std::fmt;

use serde::Serialize;

pub use actions::{ActionKind, RowActions};
pub use cell::{Align, Cell, format_money, format_number};
pub use column::{Column, SortIndicator};

use crate::types::{Page, QueryParams, Record, RecordId};

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Column key.
    pub key: &'static str,
    /// Label without indicator.
    pub label: String,
    /// Alignment.
    pub align: Align,
    /// Sort state of the column.
    pub indicator: SortIndicator,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.indicator.symbol())
    }
}

/// A projected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Identifier of the record behind the row.
    pub id: RecordId,
    /// One cell per column.
    pub cells: Vec<Cell>,
}

/// The columns of one list screen.
pub struct TableProjection<T> {
    columns: Vec<Column<T>>,
}

impl<T> Clone for TableProjection<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<T: Record> TableProjection<T> {
    /// Creates a projection from columns in display order.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self { columns }
    }

    /// Returns the columns.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Returns the column with `key`.
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Header cells under `query`.
    pub fn headers(&self, query: &QueryParams) -> Vec<Header> {
        self.columns
            .iter()
            .map(|column| Header {
                key: column.key(),
                label: column.header().to_string(),
                align: column.align(),
                indicator: column.sort_indicator(query),
            })
            .collect()
    }

    /// The sort field a click on header `key` requests, if the column sorts.
    pub fn sort_field_for(&self, key: &str) -> Option<&'static str> {
        self.column(key)
            .filter(|column| column.is_sortable())
            .map(Column::key)
    }

    /// Renders one record.
    pub fn project_row(&self, record: &T) -> Row {
        Row {
            id: record.id(),
            cells: self.columns.iter().map(|column| column.render(record)).collect(),
        }
    }

    /// Renders every record of `page`.
    pub fn project_page(&self, page: &Page<T>) -> Vec<Row> {
        page.items.iter().map(|record| self.project_row(record)).collect()
    }
}

impl<T> fmt::Debug for TableProjection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProjection")
            .field("columns", &self.columns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{Brand, brands};
    use crate::types::SortDirection;

    fn table() -> TableProjection<Brand> {
        TableProjection::new(vec![
            Column::integer("id", "Código", |b: &Brand| b.id as i64),
            Column::text("descricao", "Descrição", |b: &Brand| b.descricao.clone()),
            Column::status("status", "Situação"),
        ])
    }

    #[test]
    fn test_headers_follow_query() {
        let query = QueryParams::new().with_sort("descricao", SortDirection::Asc);
        let headers: Vec<String> = table()
            .headers(&query)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(headers, ["Código ⇅", "Descrição ▲", "Situação ⇅"]);
    }

    #[test]
    fn test_project_page() {
        let records = brands(3);
        let page = crate::paginate::paginate(&records, &QueryParams::new());
        let rows = table().project_page(&page);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].id, RecordId::from(3u64));
        assert_eq!(rows[2].cells[1], Cell::Text("Bandeira 3".into()));
    }

    #[test]
    fn test_sort_field_for() {
        let table = table();
        assert_eq!(table.sort_field_for("descricao"), Some("descricao"));
        assert_eq!(table.sort_field_for("acoes"), None);
    }
}
