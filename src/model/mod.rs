//! Model layer
//!
//! - `AnimalTable` - a record collection with sort state and persistence
//! - `Storage` - key/value persistence for collections
//! - `ModalStack` - modal overlay management for the shell

pub mod modal;
pub mod record;
pub mod seed;
pub mod sort;
pub mod storage;
pub mod table;
pub mod view;

pub use record::{Field, Record, RecordDraft};
pub use storage::{JsonFileStorage, Storage};
pub use table::{AnimalTable, TableConfig};
pub use view::{Column, TableView};
