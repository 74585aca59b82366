//! Identifier-based storage of construct records and their parent/child
//! edges. Records never embed each other; composed constructs list their
//! children by id.

use crate::{
    construct::{Annotation, ConstructId, ConstructRecord, Feature, Reference, VectorMetadata},
    error::{GgwError, Result},
    vector_level::VectorLevel,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub trait ConstructStore {
    fn store(&mut self, record: ConstructRecord) -> Result<ConstructId>;
    fn fetch(&self, id: ConstructId) -> Result<ConstructRecord>;
    fn record_hierarchy_edge(&mut self, child: ConstructId, parent: ConstructId) -> Result<()>;

    /// Records in the order of `ids`; fails on the first unknown id.
    fn fetch_children(&self, ids: &[ConstructId]) -> Result<Vec<ConstructRecord>> {
        ids.iter().map(|id| self.fetch(*id)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEdge {
    pub child: ConstructId,
    pub parent: ConstructId,
}

/// A record as shown to clients: the sequence is replaced by its length and
/// children are expanded, inserts first and the backbone last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructSummary {
    pub id: ConstructId,
    pub name: String,
    pub mpg_number: Option<String>,
    pub level: VectorLevel,
    pub sequence_length: usize,
    pub annotations: Vec<Annotation>,
    pub features: Vec<Feature>,
    pub references: Vec<Reference>,
    pub metadata: VectorMetadata,
    pub children: Vec<ConstructSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructArena {
    records: BTreeMap<ConstructId, ConstructRecord>,
    hierarchy: Vec<HierarchyEdge>,
    next_id: ConstructId,
}

impl ConstructArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_path(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_to_path(&self, path: &str) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: ConstructId) -> Option<&ConstructRecord> {
        self.records.get(&id)
    }

    pub fn hierarchy(&self) -> &[HierarchyEdge] {
        &self.hierarchy
    }

    pub fn parents_of(&self, child: ConstructId) -> Vec<ConstructId> {
        self.hierarchy
            .iter()
            .filter(|edge| edge.child == child)
            .map(|edge| edge.parent)
            .collect()
    }

    pub fn children_of(&self, parent: ConstructId) -> Vec<ConstructId> {
        self.hierarchy
            .iter()
            .filter(|edge| edge.parent == parent)
            .map(|edge| edge.child)
            .collect()
    }

    pub fn records_at_level(&self, level: VectorLevel) -> Vec<(ConstructId, &ConstructRecord)> {
        self.records
            .iter()
            .filter(|(_, record)| record.level == level)
            .map(|(id, record)| (*id, record))
            .collect()
    }

    /// The record stored under `name` at `level` in storage `location`.
    pub fn find_by_name_level_location(
        &self,
        name: &str,
        level: VectorLevel,
        location: i64,
    ) -> Option<(ConstructId, &ConstructRecord)> {
        self.records
            .iter()
            .find(|(_, record)| {
                record.name == name && record.level == level && record.metadata.location == Some(location)
            })
            .map(|(id, record)| (*id, record))
    }

    pub fn summarize(&self, id: ConstructId) -> Result<ConstructSummary> {
        self.summarize_from(id, &mut BTreeSet::new())
    }

    fn summarize_from(&self, id: ConstructId, path: &mut BTreeSet<ConstructId>) -> Result<ConstructSummary> {
        let record = self.get(id).ok_or(GgwError::NotFound(id))?;
        if !path.insert(id) {
            return Err(GgwError::InvalidInput(format!(
                "construct {id} is its own descendant"
            )));
        }
        let mut inserts = vec![];
        let mut backbone = None;
        for child_id in &record.children {
            let child = self.summarize_from(*child_id, path)?;
            match child.level {
                VectorLevel::Backbone => backbone = Some(child),
                _ => inserts.push(child),
            }
        }
        path.remove(&id);
        inserts.extend(backbone);
        Ok(ConstructSummary {
            id,
            name: record.name.clone(),
            mpg_number: record.mpg_number.clone(),
            level: record.level,
            sequence_length: record.len(),
            annotations: record.annotations.clone(),
            features: record.features.clone(),
            references: record.references.clone(),
            metadata: record.metadata.clone(),
            children: inserts,
        })
    }
}

impl ConstructStore for ConstructArena {
    fn store(&mut self, record: ConstructRecord) -> Result<ConstructId> {
        let id = self.next_id + 1;
        // Children must already be stored, so the hierarchy stays acyclic
        if let Some(child) = record
            .children
            .iter()
            .find(|child| **child >= id || !self.records.contains_key(*child))
        {
            return Err(GgwError::InvalidInput(format!(
                "'{}' lists construct {child} as a child, which is not stored",
                record.name
            )));
        }
        self.next_id = id;
        info!(
            "stored {} '{}' as construct {id} ({} units, {} features)",
            record.level,
            record.name,
            record.len(),
            record.features.len()
        );
        self.records.insert(id, record);
        Ok(id)
    }

    fn fetch(&self, id: ConstructId) -> Result<ConstructRecord> {
        self.get(id).cloned().ok_or(GgwError::NotFound(id))
    }

    fn record_hierarchy_edge(&mut self, child: ConstructId, parent: ConstructId) -> Result<()> {
        for id in [child, parent] {
            if !self.records.contains_key(&id) {
                return Err(GgwError::NotFound(id));
            }
        }
        self.hierarchy.push(HierarchyEdge { child, parent });
        Ok(())
    }
}
