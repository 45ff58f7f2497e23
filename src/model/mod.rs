//! Output model: the nested mapping/sequence tree handed to the serializer.
//!
//! Shape by dialect:
//! - config:      { section: { key: value, subsection: [[token, ...], ...] } }
//! - diagnostics: { section: [ {Name, Spec, ExtNr, Cat, Hier, Dim, OutUnit, LongName}, ... ] }
//! - species:     { section: { symbol: {MW, K0, CR, pKA} } }
//! - grid:        { key: value }
//!
//! Mappings are `BTreeMap`s, so the serialized keys come out sorted.

use crate::dialect::{DiagnRecord, SpeciesRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row of raw tokens belonging to a subsection.
pub type Row = Vec<String>;

/// Root of a parsed file: section names (or flat keys) to their content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    pub entries: BTreeMap<String, Node>,
}

/// A top-level value: a whole section, or a scalar for flat dialects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Value(String),
    Section(SectionBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionBody {
    /// Settings, subsections and species records, possibly mixed.
    Map(BTreeMap<String, Entry>),
    /// Diagnostics rows, in file order.
    Records(Vec<DiagnRecord>),
}

/// One value inside a mapped section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Value(String),
    Rows(Vec<Row>),
    Species(SpeciesRecord),
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a tree back from a rendered YAML artifact.
    ///
    /// Species records come back with an empty `id`, since that column is
    /// never written out.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn section(&self, name: &str) -> Option<&SectionBody> {
        match self.entries.get(name)? {
            Node::Section(body) => Some(body),
            Node::Value(_) => None,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Node::Value(value) => Some(value),
            Node::Section(_) => None,
        }
    }

    /// Start (or restart) a section; an earlier section of the same name is replaced.
    pub(crate) fn open_section(&mut self, name: &str, body: SectionBody) -> bool {
        self.entries
            .insert(name.to_string(), Node::Section(body))
            .is_some()
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut SectionBody> {
        match self.entries.get_mut(name)? {
            Node::Section(body) => Some(body),
            Node::Value(_) => None,
        }
    }

    pub(crate) fn set_value(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), Node::Value(value.to_string()));
    }
}

impl SectionBody {
    pub fn empty_map() -> Self {
        SectionBody::Map(BTreeMap::new())
    }

    pub fn empty_records() -> Self {
        SectionBody::Records(Vec::new())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        match self {
            SectionBody::Map(map) => map.get(key),
            SectionBody::Records(_) => None,
        }
    }

    /// Diagnostics rows; empty for mapped bodies.
    pub fn records(&self) -> &[DiagnRecord] {
        match self {
            SectionBody::Records(records) => records,
            SectionBody::Map(_) => &[],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SectionBody::Map(map) => map.len(),
            SectionBody::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Entry {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Entry::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_rows(&self) -> Option<&[Row]> {
        match self {
            Entry::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_species(&self) -> Option<&SpeciesRecord> {
        match self {
            Entry::Species(record) => Some(record),
            _ => None,
        }
    }
}
