//! Built-in datasets used when a table has nothing persisted

use super::record::{Field, Record};
use super::table::TableConfig;

const IMAGE_BASE: &str = "https://raw.githubusercontent.com/adityarai11/iit_bomaby/main/img";

fn animal(id: i64, name: &str, size: i64, location: &str, image: &str) -> Record {
    Record::new(id, name, size, location, &format!("{}/{}", IMAGE_BASE, image))
}

pub fn big_cats() -> Vec<Record> {
    vec![
        animal(101, "Lion", 190, "Africa", "lion.jpg"),
        animal(102, "Tiger", 220, "Asia", "tiger.jpg"),
        animal(103, "Leopard", 150, "Asia", "leopard.jpg"),
    ]
}

pub fn dogs() -> Vec<Record> {
    vec![
        animal(201, "Bulldog", 25, "Europe", "bulldog.jpg"),
        animal(202, "Beagle", 20, "North America", "beagle.jpg"),
    ]
}

pub fn big_fish() -> Vec<Record> {
    vec![
        animal(301, "Shark", 300, "Ocean", "shark.jpg"),
        animal(302, "Whale", 200, "Ocean", "whale.jpg"),
    ]
}

/// The three stock tables with their seeds
pub fn default_tables() -> Vec<(TableConfig, Vec<Record>)> {
    vec![
        (
            TableConfig::new(
                "table-1",
                "Big Cats",
                &[Field::Name, Field::Size, Field::Location],
            ),
            big_cats(),
        ),
        (
            TableConfig::new("table-2", "Dogs", &[Field::Name, Field::Location]),
            dogs(),
        ),
        (
            TableConfig::new("table-3", "Big Fish", &[Field::Size]),
            big_fish(),
        ),
    ]
}
