//! Record and field definitions

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image reference used when none is given
pub const DEFAULT_IMAGE: &str = "img/default.jpg";

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

/// One animal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub location: String,
    #[serde(default = "default_image")]
    pub image: String,
}

impl Record {
    pub fn new(id: i64, name: &str, size: i64, location: &str, image: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            size,
            location: location.to_string(),
            image: image.to_string(),
        }
    }
}

/// A borrowed field value taken from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
}

/// Displayable record fields, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Size,
    Location,
    Image,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Size, Field::Location, Field::Image];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Size => "Size",
            Field::Location => "Location",
            Field::Image => "Image",
        }
    }

    pub fn value<'a>(&self, record: &'a Record) -> FieldValue<'a> {
        match self {
            Field::Name => FieldValue::Text(&record.name),
            Field::Size => FieldValue::Number(record.size),
            Field::Location => FieldValue::Text(&record.location),
            Field::Image => FieldValue::Text(&record.image),
        }
    }

    /// Cell text for a record
    pub fn display(&self, record: &Record) -> String {
        match self.value(record) {
            FieldValue::Text(text) => text.to_string(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "size" => Ok(Field::Size),
            "location" => Ok(Field::Location),
            "image" => Ok(Field::Image),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Raw form input for a record, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub size: String,
    pub location: String,
    pub image: String,
}

/// Field values that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub name: String,
    pub size: i64,
    pub location: String,
    pub image: String,
}

impl RecordDraft {
    pub fn new(name: &str, size: &str, location: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            size: size.to_string(),
            location: location.to_string(),
            image: image.to_string(),
        }
    }

    /// Pre-filled draft for editing an existing record
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            size: record.size.to_string(),
            location: record.location.clone(),
            image: record.image.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Size => &self.size,
            Field::Location => &self.location,
            Field::Image => &self.image,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Size => &mut self.size,
            Field::Location => &mut self.location,
            Field::Image => &mut self.image,
        }
    }

    /// Presence and type checks. Surrounding whitespace is dropped; a blank
    /// image falls back to [`DEFAULT_IMAGE`].
    pub fn validate(&self) -> Result<ValidRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Missing(Field::Name));
        }

        let size_text = self.size.trim();
        if size_text.is_empty() {
            return Err(ValidationError::Missing(Field::Size));
        }
        let size = size_text
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber {
                field: Field::Size,
                value: size_text.to_string(),
            })?;

        let location = self.location.trim();
        if location.is_empty() {
            return Err(ValidationError::Missing(Field::Location));
        }

        let image = match self.image.trim() {
            "" => DEFAULT_IMAGE.to_string(),
            image => image.to_string(),
        };

        Ok(ValidRecord {
            name: name.to_string(),
            size,
            location: location.to_string(),
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_defaults_on_load() {
        let json = r#"{"id":1,"name":"Lion","size":190,"location":"Africa"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("size".parse::<Field>(), Ok(Field::Size));
        assert_eq!(" Location ".parse::<Field>(), Ok(Field::Location));
        assert!("weight".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_serde_names() {
        let fields: Vec<Field> = serde_json::from_str(r#"["name","size","location"]"#).unwrap();
        assert_eq!(fields, vec![Field::Name, Field::Size, Field::Location]);
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        let draft = RecordDraft::new(" Leopard ", "150", "Asia", "");
        let valid = draft.validate().unwrap();
        assert_eq!(valid.name, "Leopard");
        assert_eq!(valid.size, 150);
        assert_eq!(valid.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert_eq!(
            RecordDraft::new("", "150", "Asia", "").validate(),
            Err(ValidationError::Missing(Field::Name))
        );
        assert_eq!(
            RecordDraft::new("Puma", "big", "Americas", "").validate(),
            Err(ValidationError::NotANumber {
                field: Field::Size,
                value: "big".to_string()
            })
        );
        assert_eq!(
            RecordDraft::new("Puma", "60", "  ", "").validate(),
            Err(ValidationError::Missing(Field::Location))
        );
    }

    #[test]
    fn test_draft_from_record_round_trips_values() {
        let record = Record::new(5, "Beagle", 20, "North America", "img/beagle.jpg");
        let draft = RecordDraft::from_record(&record);
        assert_eq!(draft.get(Field::Size), "20");
        assert_eq!(draft.validate().unwrap().location, "North America");
    }
}
