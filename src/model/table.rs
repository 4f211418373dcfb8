//! The animal table: one collection plus its sort state and storage

use super::record::{Field, Record, RecordDraft};
use super::sort::{self, InitialSort, SortState};
use super::storage::{self, Storage};
use super::view::{Column, HeaderCell, RowView, TableView};
use crate::error::TableError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, info, warn};

fn default_true() -> bool {
    true
}

/// Per-table configuration supplied at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table identifier, also used to derive the storage key
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Fields the user may sort by
    #[serde(default)]
    pub sortable: Vec<Field>,
    #[serde(default)]
    pub initial_sort: InitialSort,
    /// Ask before deleting a record
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Reject edits that rename a record to another record's name
    #[serde(default)]
    pub unique_names_on_edit: bool,
}

impl TableConfig {
    pub fn new(id: &str, title: &str, sortable: &[Field]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            sortable: sortable.to_vec(),
            initial_sort: InitialSort::Auto,
            confirm_delete: true,
            unique_names_on_edit: false,
        }
    }

    pub fn is_sortable(&self, field: Field) -> bool {
        self.sortable.contains(&field)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

pub struct AnimalTable {
    config: TableConfig,
    records: Vec<Record>,
    sort: Option<SortState>,
    storage: Rc<dyn Storage>,
}

impl AnimalTable {
    /// Restore the persisted collection, falling back to `seed`, then apply
    /// the configured initial sort
    pub fn new(config: TableConfig, seed: Vec<Record>, storage: Rc<dyn Storage>) -> Self {
        let key = storage::storage_key(&config.id);
        let records = match storage.load(&key) {
            Some(records) => {
                info!("Restored {} records for table '{}'", records.len(), config.id);
                records
            }
            None => {
                info!("Seeding table '{}' with {} records", config.id, seed.len());
                seed
            }
        };

        let mut table = Self {
            config,
            records,
            sort: None,
            storage,
        };
        table.initial_sort();
        table
    }

    fn initial_sort(&mut self) {
        match self.config.initial_sort.clone() {
            InitialSort::Auto => {
                if self.config.is_sortable(Field::Name) {
                    self.sort(Field::Name);
                } else if let Some(first) = self.config.sortable.first().copied() {
                    self.sort(first);
                }
            }
            InitialSort::Field(field) => {
                self.sort(field);
            }
            InitialSort::Multiple(fields) => self.sort_multiple(&fields),
            InitialSort::Unsorted => {}
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn storage_key(&self) -> String {
        storage::storage_key(&self.config.id)
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort by a single field. Returns `false` (and does nothing) when the
    /// field is not sortable for this table.
    pub fn sort(&mut self, field: Field) -> bool {
        if !self.config.is_sortable(field) {
            debug!("Table '{}': {} is not sortable", self.config.id, field);
            return false;
        }

        let state = SortState::next(self.sort, field);
        sort::sort_records(&mut self.records, state);
        self.sort = Some(state);
        debug!(
            "Table '{}' sorted by {} {:?}",
            self.config.id, state.field, state.direction
        );
        true
    }

    /// Order by several fields, ascending. Clears the single-field sort.
    pub fn sort_multiple(&mut self, fields: &[Field]) {
        sort::sort_records_multiple(&mut self.records, fields);
        self.sort = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a new record. A `StorageWrite` error means the record was added
    /// in memory but not persisted.
    pub fn add(&mut self, draft: &RecordDraft) -> Result<i64, TableError> {
        let valid = draft.validate()?;

        if self.records.iter().any(|r| r.name == valid.name) {
            return Err(TableError::Duplicate(valid.name));
        }

        let id = self.next_id();
        self.records.push(Record {
            id,
            name: valid.name,
            size: valid.size,
            location: valid.location,
            image: valid.image,
        });
        info!("Table '{}': added record {}", self.config.id, id);

        self.persist()?;
        Ok(id)
    }

    /// Replace the values of an existing record in place
    pub fn edit(&mut self, id: i64, draft: &RecordDraft) -> Result<(), TableError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(TableError::NotFound(id))?;

        let valid = draft.validate()?;

        if self.config.unique_names_on_edit
            && self
                .records
                .iter()
                .any(|r| r.id != id && r.name == valid.name)
        {
            return Err(TableError::Duplicate(valid.name));
        }

        let record = &mut self.records[index];
        record.name = valid.name;
        record.size = valid.size;
        record.location = valid.location;
        record.image = valid.image;
        info!("Table '{}': edited record {}", self.config.id, id);

        self.persist()
    }

    /// Remove a record by id, returning it
    pub fn delete(&mut self, id: i64) -> Result<Record, TableError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(TableError::NotFound(id))?;

        let removed = self.records.remove(index);
        info!("Table '{}': deleted record {}", self.config.id, id);

        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), TableError> {
        let key = self.storage_key();
        self.storage.save(&key, &self.records).map_err(|source| {
            let err = TableError::StorageWrite { key, source };
            warn!("{}", err);
            err
        })
    }

    /// Millisecond timestamp, bumped past the largest id in use
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max_id = self.records.iter().map(|r| r.id).max().unwrap_or(i64::MIN);
        now.max(max_id.saturating_add(1))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────────

    /// Project the current state into a display tree
    pub fn view(&self) -> TableView {
        let headers = Column::all()
            .into_iter()
            .map(|column| match column {
                Column::Field(field) => HeaderCell {
                    column,
                    sortable: self.config.is_sortable(field),
                    indicator: self
                        .sort
                        .filter(|state| state.field == field)
                        .map(|state| state.direction),
                },
                Column::Actions => HeaderCell {
                    column,
                    sortable: false,
                    indicator: None,
                },
            })
            .collect();

        let rows = self
            .records
            .iter()
            .map(|record| RowView {
                id: record.id,
                cells: Field::ALL.iter().map(|f| f.display(record)).collect(),
            })
            .collect();

        TableView {
            title: self.config.display_title().to_string(),
            headers,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, ValidationError};
    use crate::model::sort::SortDirection;
    use crate::model::storage::MemoryStorage;

    fn big_cats() -> Vec<Record> {
        vec![
            Record::new(101, "Lion", 190, "Africa", "img/lion.jpg"),
            Record::new(102, "Tiger", 220, "Asia", "img/tiger.jpg"),
        ]
    }

    fn cats_config() -> TableConfig {
        TableConfig::new(
            "table-1",
            "Big Cats",
            &[Field::Name, Field::Size, Field::Location],
        )
    }

    fn names(table: &AnimalTable) -> Vec<&str> {
        table.records().iter().map(|r| r.name.as_str()).collect()
    }

    fn new_table(config: TableConfig) -> (AnimalTable, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let table = AnimalTable::new(config, big_cats(), storage.clone());
        (table, storage)
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _contents: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_seed_used_without_persisted_data() {
        let (table, storage) = new_table(cats_config());
        assert_eq!(names(&table), vec!["Lion", "Tiger"]);
        // construction alone does not persist
        assert_eq!(storage.load("animalTable_table-1"), None);
    }

    #[test]
    fn test_persisted_data_wins_over_seed() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .save(
                "animalTable_table-1",
                &[Record::new(9, "Jaguar", 170, "Americas", "img/jaguar.jpg")],
            )
            .unwrap();

        let table = AnimalTable::new(cats_config(), big_cats(), storage);
        assert_eq!(names(&table), vec!["Jaguar"]);
    }

    #[test]
    fn test_malformed_persisted_data_falls_back_to_seed() {
        let storage = Rc::new(MemoryStorage::new());
        storage.insert_raw("animalTable_table-1", "[oops");

        let table = AnimalTable::new(cats_config(), big_cats(), storage);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_initial_sort_auto_prefers_name() {
        let (table, _) = new_table(cats_config());
        assert_eq!(
            table.sort_state(),
            Some(SortState {
                field: Field::Name,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn test_initial_sort_auto_uses_first_sortable() {
        let config = TableConfig::new("table-3", "Big Fish", &[Field::Size]);
        let (table, _) = new_table(config);
        assert_eq!(table.sort_state().map(|s| s.field), Some(Field::Size));
    }

    #[test]
    fn test_initial_sort_multiple() {
        let mut config = cats_config();
        config.initial_sort = InitialSort::Multiple(vec![Field::Location, Field::Name]);
        let storage = Rc::new(MemoryStorage::new());
        let seed = vec![
            Record::new(1, "Tiger", 220, "Asia", ""),
            Record::new(2, "Leopard", 150, "Asia", ""),
            Record::new(3, "Lion", 190, "Africa", ""),
        ];
        let table = AnimalTable::new(config, seed, storage);
        assert_eq!(names(&table), vec!["Lion", "Leopard", "Tiger"]);
        assert_eq!(table.sort_state(), None);
    }

    #[test]
    fn test_initial_sort_single_field() {
        let mut config = cats_config();
        config.initial_sort = InitialSort::Field(Field::Size);
        let storage = Rc::new(MemoryStorage::new());
        let seed = vec![
            Record::new(1, "Tiger", 220, "Asia", ""),
            Record::new(2, "Leopard", 150, "Asia", ""),
            Record::new(3, "Lion", 190, "Africa", ""),
        ];
        let table = AnimalTable::new(config, seed, storage);
        assert_eq!(names(&table), vec!["Leopard", "Lion", "Tiger"]);
        assert_eq!(
            table.sort_state(),
            Some(SortState {
                field: Field::Size,
                direction: SortDirection::Ascending,
            })
        );
    }

    #[test]
    fn test_sort_by_size_toggles() {
        let mut config = cats_config();
        config.initial_sort = InitialSort::Unsorted;
        let (mut table, _) = new_table(config);

        assert!(table.sort(Field::Size));
        assert_eq!(names(&table), vec!["Lion", "Tiger"]);

        assert!(table.sort(Field::Size));
        assert_eq!(names(&table), vec!["Tiger", "Lion"]);
        assert_eq!(
            table.sort_state().map(|s| s.direction),
            Some(SortDirection::Descending)
        );

        assert!(table.sort(Field::Location));
        assert_eq!(
            table.sort_state().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn test_sort_on_unsortable_field_is_noop() {
        let config = TableConfig::new("table-2", "Dogs", &[Field::Name, Field::Location]);
        let (mut table, _) = new_table(config);
        let before = table.sort_state();

        assert!(!table.sort(Field::Size));
        assert_eq!(table.sort_state(), before);
        assert_eq!(names(&table), vec!["Lion", "Tiger"]);
    }

    #[test]
    fn test_add_persists_record() {
        let (mut table, storage) = new_table(cats_config());

        let id = table
            .add(&RecordDraft::new("Leopard", "150", "Asia", ""))
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records().last().map(|r| r.id), Some(id));

        let persisted = storage.load("animalTable_table-1").unwrap();
        assert_eq!(persisted.len(), 3);
        assert!(persisted.iter().any(|r| r.name == "Leopard" && r.size == 150));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (mut table, storage) = new_table(cats_config());

        let result = table.add(&RecordDraft::new("Lion", "200", "Africa", ""));
        assert!(matches!(result, Err(TableError::Duplicate(name)) if name == "Lion"));
        assert_eq!(table.len(), 2);
        assert_eq!(storage.load("animalTable_table-1"), None);
    }

    #[test]
    fn test_add_duplicate_is_case_sensitive() {
        let (mut table, _) = new_table(cats_config());
        assert!(table.add(&RecordDraft::new("lion", "200", "Africa", "")).is_ok());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_add_invalid_draft_leaves_state() {
        let (mut table, _) = new_table(cats_config());

        let result = table.add(&RecordDraft::new("Puma", "big", "Americas", ""));
        assert!(matches!(
            result,
            Err(TableError::Validation(ValidationError::NotANumber { .. }))
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_consecutive_adds_get_distinct_ids() {
        let (mut table, _) = new_table(cats_config());
        let first = table.add(&RecordDraft::new("Puma", "60", "Americas", "")).unwrap();
        let second = table.add(&RecordDraft::new("Lynx", "30", "Europe", "")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_edit_updates_in_place() {
        let (mut table, storage) = new_table(cats_config());

        table
            .edit(102, &RecordDraft::new("Tiger", "250", "Siberia", "img/amur.jpg"))
            .unwrap();

        let tiger = table.find(102).unwrap();
        assert_eq!(tiger.size, 250);
        assert_eq!(tiger.location, "Siberia");
        assert_eq!(table.records()[1].id, 102);

        let persisted = storage.load("animalTable_table-1").unwrap();
        assert_eq!(persisted[1].location, "Siberia");
    }

    #[test]
    fn test_edit_may_duplicate_name_by_default() {
        let (mut table, _) = new_table(cats_config());
        table
            .edit(102, &RecordDraft::new("Lion", "220", "Asia", ""))
            .unwrap();
        assert_eq!(names(&table), vec!["Lion", "Lion"]);
    }

    #[test]
    fn test_edit_uniqueness_when_configured() {
        let mut config = cats_config();
        config.unique_names_on_edit = true;
        let (mut table, _) = new_table(config);

        let result = table.edit(102, &RecordDraft::new("Lion", "220", "Asia", ""));
        assert!(matches!(result, Err(TableError::Duplicate(_))));
        assert_eq!(table.find(102).unwrap().name, "Tiger");

        // keeping its own name is fine
        assert!(table
            .edit(102, &RecordDraft::new("Tiger", "230", "Asia", ""))
            .is_ok());
    }

    #[test]
    fn test_edit_missing_id() {
        let (mut table, storage) = new_table(cats_config());
        let result = table.edit(999, &RecordDraft::new("Puma", "60", "Americas", ""));
        assert!(matches!(result, Err(TableError::NotFound(999))));
        assert_eq!(storage.load("animalTable_table-1"), None);
    }

    #[test]
    fn test_edit_invalid_draft_leaves_record() {
        let (mut table, _) = new_table(cats_config());
        let result = table.edit(101, &RecordDraft::new("Lion", "190", "", ""));
        assert!(matches!(result, Err(TableError::Validation(_))));
        assert_eq!(table.find(101).unwrap().location, "Africa");
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let (mut table, storage) = new_table(cats_config());

        let removed = table.delete(101).unwrap();
        assert_eq!(removed.name, "Lion");
        assert_eq!(names(&table), vec!["Tiger"]);
        assert_eq!(storage.load("animalTable_table-1").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (mut table, storage) = new_table(cats_config());

        assert!(matches!(table.delete(12345), Err(TableError::NotFound(12345))));
        assert_eq!(table.len(), 2);
        assert_eq!(storage.load("animalTable_table-1"), None);
    }

    #[test]
    fn test_save_failure_keeps_memory_change() {
        let mut table = AnimalTable::new(cats_config(), big_cats(), Rc::new(FailingStorage));

        let result = table.add(&RecordDraft::new("Leopard", "150", "Asia", ""));
        assert!(matches!(result, Err(TableError::StorageWrite { .. })));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_reload_restores_data_but_not_sort_direction() {
        let storage = Rc::new(MemoryStorage::new());
        let mut table = AnimalTable::new(cats_config(), big_cats(), storage.clone());
        table.sort(Field::Name);
        table.add(&RecordDraft::new("Cheetah", "120", "Africa", "")).unwrap();

        let reloaded = AnimalTable::new(cats_config(), Vec::new(), storage);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(
            reloaded.sort_state(),
            Some(SortState {
                field: Field::Name,
                direction: SortDirection::Ascending
            })
        );
        assert_eq!(names(&reloaded), vec!["Cheetah", "Lion", "Tiger"]);
    }

    #[test]
    fn test_view_marks_sortable_and_active_columns() {
        let config = TableConfig::new("table-2", "Dogs", &[Field::Name, Field::Location]);
        let (mut table, _) = new_table(config);
        table.sort(Field::Location);
        table.sort(Field::Location);

        let view = table.view();
        assert_eq!(view.title, "Dogs");
        assert_eq!(view.headers.len(), 5);

        let sortable: Vec<bool> = view.headers.iter().map(|h| h.sortable).collect();
        assert_eq!(sortable, vec![true, false, true, false, false]);

        assert_eq!(view.headers[0].indicator, None);
        assert_eq!(view.headers[2].indicator, Some(SortDirection::Descending));
        assert_eq!(view.headers[2].text(), "Location ▼");
        assert_eq!(view.headers[4].column, Column::Actions);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, 102);
        assert_eq!(
            view.rows[0].cells,
            vec!["Tiger", "220", "Asia", "img/tiger.jpg"]
        );
    }
}
