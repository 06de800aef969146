//! Column sets for a collection.
//!
//! A declared field list from the runtime configuration wins. Without one,
//! the fields are inferred from the first record of the fetched list.

use crate::types::Record;

/// Where a collection's field list came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaSource {
    Declared,
    Inferred,
}

/// Ordered, identifier-free field list of a collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionSchema {
    pub fields: Vec<String>,
    pub source: SchemaSource,
}

impl CollectionSchema {
    /// Resolve the field list for a collection.
    ///
    /// Returns `None` when nothing is declared and there is no record to
    /// sample from.
    pub fn resolve(declared: Option<&[String]>, records: &[Record], id_field: &str) -> Option<Self> {
        if let Some(fields) = declared.filter(|f| !f.is_empty()) {
            return Some(Self {
                fields: fields.iter().filter(|f| *f != id_field).cloned().collect(),
                source: SchemaSource::Declared,
            });
        }

        records.first().map(|first| Self::infer(first, id_field))
    }

    /// Key set of `sample` minus the identifier, in source order
    pub fn infer(sample: &Record, id_field: &str) -> Self {
        Self {
            fields: sample.keys().filter(|k| *k != id_field).cloned().collect(),
            source: SchemaSource::Inferred,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
