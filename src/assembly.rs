//! Composing Level1 constructs from one backbone and Level0 inserts.
//!
//! The order of children is taken from the caller as-is. Nothing here checks
//! it against any cloning rule.

use crate::{
    construct::{Annotation, ConstructId, ConstructRecord, Feature, Reference, VectorMetadata},
    construct_store::ConstructStore,
    error::Result,
    vector_level::VectorLevel,
};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblyOrder {
    /// Inserts in the given order, then the backbone.
    #[default]
    InsertsThenBackbone,
    BackboneThenInserts,
}

impl AssemblyOrder {
    pub fn arrange<'a, T>(self, backbone: &'a T, inserts: &'a [T]) -> Vec<&'a T> {
        let mut ret = Vec::with_capacity(inserts.len() + 1);
        if self == Self::BackboneThenInserts {
            ret.push(backbone);
        }
        ret.extend(inserts.iter());
        if self == Self::InsertsThenBackbone {
            ret.push(backbone);
        }
        ret
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub sequence: String,
    pub features: Vec<Feature>,
}

/// Concatenates the children in order, shifting each child's features by the
/// combined length of the children before it.
pub fn compose_children(children: &[&ConstructRecord]) -> Assembly {
    let mut ret = Assembly::default();
    let mut offset: i64 = 0;
    for child in children {
        ret.sequence.push_str(&child.sequence);
        ret.features
            .extend(child.features.iter().map(|feature| feature.shifted(offset)));
        offset += child.len() as i64;
    }
    ret
}

pub fn compose(
    backbone: &ConstructRecord,
    inserts: &[ConstructRecord],
    order: AssemblyOrder,
) -> Assembly {
    compose_children(&order.arrange(backbone, inserts))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyRequest {
    pub name: String,
    pub backbone: ConstructId,
    pub inserts: Vec<ConstructId>,
    #[serde(default)]
    pub order: AssemblyOrder,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub metadata: VectorMetadata,
}

impl AssemblyRequest {
    /// Child ids in concatenation order.
    pub fn child_ids(&self) -> Vec<ConstructId> {
        self.order
            .arrange(&self.backbone, self.inserts.as_slice())
            .into_iter()
            .copied()
            .collect()
    }
}

/// Fetches the children, stores the composed Level1 record and links every
/// child to it.
pub fn assemble<S: ConstructStore>(store: &mut S, request: AssemblyRequest) -> Result<ConstructId> {
    let child_ids = request.child_ids();
    let children = store.fetch_children(&child_ids)?;
    let assembly = compose_children(&children.iter().collect::<Vec<_>>());

    let record = ConstructRecord {
        name: request.name,
        mpg_number: None,
        level: VectorLevel::Level1,
        sequence: assembly.sequence,
        annotations: request.annotations,
        features: assembly.features,
        references: request.references,
        children: child_ids.clone(),
        metadata: request.metadata,
    };
    let parent = store.store(record)?;
    for child in &child_ids {
        store.record_hierarchy_edge(*child, parent)?;
    }
    info!(
        "assembled construct {parent} from {} children",
        child_ids.len()
    );
    Ok(parent)
}
