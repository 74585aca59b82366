use crate::vector_level::VectorLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ConstructId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            1 => Some(Self::Forward),
            -1 => Some(Self::Reverse),
            _ => None,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub key: String,
    pub value: String,
}

impl Qualifier {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A positional annotation, zero-based and half-open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub qualifiers: Vec<Qualifier>,
    pub start_pos: i64,
    pub end_pos: i64,
    pub strand: Option<Strand>,
}

impl Feature {
    pub fn new(kind: impl Into<String>, start_pos: i64, end_pos: i64) -> Self {
        Self {
            kind: kind.into(),
            qualifiers: vec![],
            start_pos,
            end_pos,
            strand: None,
        }
    }

    pub fn with_strand(mut self, strand: Option<Strand>) -> Self {
        self.strand = strand;
        self
    }

    pub fn with_qualifier(mut self, key: &str, value: &str) -> Self {
        self.qualifiers.push(Qualifier::new(key, value));
        self
    }

    pub fn len(&self) -> i64 {
        self.end_pos - self.start_pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn span(&self) -> (i64, i64) {
        (self.start_pos, self.end_pos)
    }

    /// Copy moved to new coordinates; everything else is kept.
    pub fn relocated(&self, start_pos: i64, end_pos: i64) -> Self {
        Self {
            start_pos,
            end_pos,
            ..self.clone()
        }
    }

    pub fn shifted(&self, offset: i64) -> Self {
        self.relocated(self.start_pos + offset, self.end_pos + offset)
    }

    pub fn qualifier_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.qualifiers
            .iter()
            .filter(move |q| q.key == key)
            .map(|q| q.value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub authors: String,
    pub title: String,
}

pub const NOT_PROVIDED: &str = "Not provided";

/// Lab bookkeeping that a GenBank file does not carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorMetadata {
    /// Storage location, e.g. a freezer box number.
    pub location: Option<i64>,
    pub bacterial_strain: String,
    pub responsible: String,
    pub group: String,
    pub bsa1_overhang: String,
    pub bsmb1_overhang: String,
    pub selection: String,
    pub cloning_technique: String,
    #[serde(rename = "is_BsmB1_free")]
    pub is_bsmb1_free: String,
    pub notes: String,
    #[serde(rename = "REase_digest")]
    pub rease_digest: String,
    pub gateway_site: String,
    pub vector_type: String,
    pub date: Option<NaiveDate>,
}

impl Default for VectorMetadata {
    fn default() -> Self {
        Self {
            location: None,
            bacterial_strain: NOT_PROVIDED.to_string(),
            responsible: NOT_PROVIDED.to_string(),
            group: NOT_PROVIDED.to_string(),
            bsa1_overhang: NOT_PROVIDED.to_string(),
            bsmb1_overhang: NOT_PROVIDED.to_string(),
            selection: NOT_PROVIDED.to_string(),
            cloning_technique: NOT_PROVIDED.to_string(),
            is_bsmb1_free: NOT_PROVIDED.to_string(),
            notes: NOT_PROVIDED.to_string(),
            rease_digest: NOT_PROVIDED.to_string(),
            gateway_site: NOT_PROVIDED.to_string(),
            vector_type: NOT_PROVIDED.to_string(),
            date: None,
        }
    }
}

impl VectorMetadata {
    pub fn at_location(mut self, location: i64) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructRecord {
    pub name: String,
    #[serde(default)]
    pub mpg_number: Option<String>,
    pub level: VectorLevel,
    pub sequence: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Ids in concatenation order; empty unless composed.
    #[serde(default)]
    pub children: Vec<ConstructId>,
    #[serde(default)]
    pub metadata: VectorMetadata,
}

impl ConstructRecord {
    pub fn new(name: impl Into<String>, level: VectorLevel, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mpg_number: None,
            level,
            sequence: sequence.into(),
            annotations: vec![],
            features: vec![],
            references: vec![],
            children: vec![],
            metadata: VectorMetadata::default(),
        }
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Length in chars, the unit all coordinates are expressed in.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn annotation_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.annotations
            .iter()
            .filter(move |a| a.key == key)
            .map(|a| a.value.as_str())
    }
}
