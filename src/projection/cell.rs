//! Renderable cell values.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::ActionKind;
use crate::types::RecordStatus;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Text columns.
    #[default]
    Left,
    /// Status badges and action buttons.
    Center,
    /// Numbers.
    Right,
}

/// One cell of a projected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    /// Nothing to show.
    Empty,
    /// Plain text.
    Text(String),
    /// Whole number, grouped by thousands.
    Integer(i64),
    /// Decimal number with two places.
    Decimal(f64),
    /// Amount in reais.
    Money(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Active/inactive badge.
    Status(RecordStatus),
    /// Row action buttons.
    Actions(Vec<ActionKind>),
}

impl Cell {
    /// Alignment a column of this kind of cell usually gets.
    pub fn default_align(&self) -> Align {
        match self {
            Cell::Integer(_) | Cell::Decimal(_) | Cell::Money(_) => Align::Right,
            Cell::Status(_) | Cell::Actions(_) => Align::Center,
            Cell::Empty | Cell::Text(_) | Cell::Date(_) => Align::Left,
        }
    }

    /// Returns `true` for [`Cell::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Integer(value) => f.write_str(&format_number(*value as f64, 0)),
            Cell::Decimal(value) => f.write_str(&format_number(*value, 2)),
            Cell::Money(value) => f.write_str(&format_money(*value)),
            Cell::Date(date) => write!(f, "{}", date.format("%d/%m/%Y")),
            Cell::Status(status) => f.write_str(status.label()),
            Cell::Actions(actions) => {
                let labels: Vec<&str> = actions.iter().map(ActionKind::label).collect();
                f.write_str(&labels.join(" | "))
            },
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<NaiveDate> for Cell {
    fn from(date: NaiveDate) -> Self {
        Cell::Date(date)
    }
}

impl From<RecordStatus> for Cell {
    fn from(status: RecordStatus) -> Self {
        Cell::Status(status)
    }
}

impl<V: Into<Cell>> From<Option<V>> for Cell {
    fn from(value: Option<V>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// Formats `value` the Brazilian way: `.` between thousands, `,` before
/// the decimals.
///
/// ```rust
/// use shopdesk::projection::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
/// assert_eq!(format_number(-1234.0, 0), "-1.234");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped},{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats an amount in reais.
///
/// ```rust
/// use shopdesk::projection::format_money;
///
/// assert_eq!(format_money(1234.5), "R$ 1.234,50");
/// ```
pub fn format_money(value: f64) -> String {
    format!("R$ {}", format_number(value, 2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 2, "0,00")]
    #[test_case(999.0, 0, "999")]
    #[test_case(1000.0, 0, "1.000")]
    #[test_case(1234.567, 2, "1.234,57")]
    #[test_case(-1234.56, 2, "-1.234,56")]
    #[test_case(-0.001, 2, "0,00")]
    #[test_case(1234567.0, 0, "1.234.567")]
    fn test_format_number(value: f64, decimals: usize, expected: &str) {
        assert_eq!(format_number(value, decimals), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Integer(12500).to_string(), "12.500");
        assert_eq!(Cell::Money(19.9).to_string(), "R$ 19,90");
        assert_eq!(Cell::Status(RecordStatus::Inactive).to_string(), "Inativo");
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()).to_string(),
            "07/03/2024"
        );
        assert_eq!(
            Cell::Actions(vec![ActionKind::Edit, ActionKind::Delete]).to_string(),
            "Editar | Excluir"
        );
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Cell::from(None::<String>), Cell::Empty);
        assert_eq!(Cell::from(Some("x")), Cell::Text("x".to_string()));
        assert_eq!(Cell::from(7u64), Cell::Integer(7));
        assert_eq!(Cell::from(7u64).default_align(), Align::Right);
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(Cell::Status(RecordStatus::Active)).unwrap();
        assert_eq!(json["type"], "status");
    }
}
