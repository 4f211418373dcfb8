//! Display tree produced by `AnimalTable::view`

use super::record::Field;
use super::sort::SortDirection;

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Field(Field),
    Actions,
}

impl Column {
    pub fn all() -> Vec<Column> {
        Field::ALL
            .iter()
            .map(|field| Column::Field(*field))
            .chain(std::iter::once(Column::Actions))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Field(field) => field.label(),
            Column::Actions => "Actions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column: Column,
    /// Clicking the header sorts by this column
    pub sortable: bool,
    /// Set on the column the table is currently sorted by
    pub indicator: Option<SortDirection>,
}

impl HeaderCell {
    pub fn text(&self) -> String {
        match self.indicator {
            Some(direction) => format!("{} {}", self.column.label(), direction.indicator()),
            None => self.column.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    /// One cell per `Field::ALL` entry
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
}
