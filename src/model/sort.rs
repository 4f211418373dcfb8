//! Sort engine
//!
//! Single-field sorts toggle direction on repeat; multi-field sorts are only
//! used for initial ordering. All sorts are stable.

use super::record::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active single-field sort of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortState {
    /// State after the user asks to sort by `field`
    pub fn next(current: Option<SortState>, field: Field) -> SortState {
        match current {
            Some(state) if state.field == field => SortState {
                field,
                direction: state.direction.toggle(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Ordering applied when a table is constructed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialSort {
    /// Name when sortable, otherwise the first sortable field
    #[default]
    Auto,
    Field(Field),
    Multiple(Vec<Field>),
    /// Keep the stored order
    #[serde(rename = "none", alias = "unsorted")]
    Unsorted,
}

/// Case-insensitive text comparison. Exact ties are broken so that lowercase
/// sorts before uppercase.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Compare two records on one field, ascending
pub fn compare_by(field: Field, a: &Record, b: &Record) -> Ordering {
    match (field.value(a), field.value(b)) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.cmp(&y),
        (FieldValue::Text(x), FieldValue::Text(y)) => compare_text(x, y),
        // a field always yields the same variant
        _ => Ordering::Equal,
    }
}

pub fn sort_records(records: &mut [Record], state: SortState) {
    records.sort_by(|a, b| state.direction.apply(compare_by(state.field, a, b)));
}

/// Ascending by each field in turn; the first non-equal comparison wins
pub fn sort_records_multiple(records: &mut [Record], fields: &[Field]) {
    records.sort_by(|a, b| {
        fields
            .iter()
            .map(|field| compare_by(*field, a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn animals() -> Vec<Record> {
        vec![
            Record::new(1, "tiger", 220, "Asia", ""),
            Record::new(2, "Lion", 190, "Africa", ""),
            Record::new(3, "Leopard", 150, "Asia", ""),
            Record::new(4, "Cheetah", 150, "Africa", ""),
        ]
    }

    #[test]
    fn test_initial_sort_config_names() {
        let none: InitialSort = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(none, InitialSort::Unsorted);
        let legacy: InitialSort = serde_json::from_str(r#""unsorted""#).unwrap();
        assert_eq!(legacy, InitialSort::Unsorted);
        assert_eq!(serde_json::to_string(&InitialSort::Unsorted).unwrap(), r#""none""#);

        let multiple: InitialSort =
            serde_json::from_str(r#"{"multiple": ["location", "name"]}"#).unwrap();
        assert_eq!(multiple, InitialSort::Multiple(vec![Field::Location, Field::Name]));
    }

    #[test]
    fn test_next_state_toggles_and_resets() {
        let first = SortState::next(None, Field::Size);
        assert_eq!(first.direction, SortDirection::Ascending);

        let second = SortState::next(Some(first), Field::Size);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortState::next(Some(second), Field::Size);
        assert_eq!(third.direction, SortDirection::Ascending);

        let other = SortState::next(Some(second), Field::Name);
        assert_eq!(other.field, Field::Name);
        assert_eq!(other.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut records = animals();
        sort_records(
            &mut records,
            SortState {
                field: Field::Name,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(names(&records), vec!["Cheetah", "Leopard", "Lion", "tiger"]);
    }

    #[test]
    fn test_compare_text_tie_break() {
        assert_eq!(compare_text("lion", "Lion"), Ordering::Less);
        assert_eq!(compare_text("Lion", "Lion"), Ordering::Equal);
        assert_eq!(compare_text("Lion", "lynx"), Ordering::Less);
    }

    #[test]
    fn test_numeric_sort_is_stable_both_ways() {
        let mut records = animals();
        sort_records(
            &mut records,
            SortState {
                field: Field::Size,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(names(&records), vec!["Leopard", "Cheetah", "Lion", "tiger"]);

        let mut records = animals();
        sort_records(
            &mut records,
            SortState {
                field: Field::Size,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(names(&records), vec!["tiger", "Lion", "Leopard", "Cheetah"]);
    }

    #[test]
    fn test_multiple_sort_respects_precedence() {
        let mut records = animals();
        sort_records_multiple(&mut records, &[Field::Location, Field::Size, Field::Name]);
        assert_eq!(names(&records), vec!["Cheetah", "Lion", "Leopard", "tiger"]);

        // records differing on the first field never swap because of later ones
        let mut records = animals();
        sort_records_multiple(&mut records, &[Field::Size, Field::Name]);
        assert_eq!(names(&records), vec!["Cheetah", "Leopard", "Lion", "tiger"]);
    }

    #[test]
    fn test_initial_sort_serde() {
        let auto: InitialSort = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(auto, InitialSort::Auto);

        let field: InitialSort = serde_json::from_str(r#"{"field":"size"}"#).unwrap();
        assert_eq!(field, InitialSort::Field(Field::Size));

        let multiple: InitialSort =
            serde_json::from_str(r#"{"multiple":["location","name"]}"#).unwrap();
        assert_eq!(multiple, InitialSort::Multiple(vec![Field::Location, Field::Name]));
    }
}
