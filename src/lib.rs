//! Golden Gate vector records: digestion of Backbone and Level0 plasmids with
//! a Type-IIS enzyme, re-anchoring of their features, composition of Level1
//! constructs and GenBank import/export.

pub mod assembly;
pub mod construct;
pub mod construct_store;
pub mod digest;
pub mod error;
pub mod feature_location;
pub mod feature_mapper;
pub mod genbank;
pub mod genbank_export;
pub mod restriction_enzyme;
pub mod settings;
pub mod vector_level;

pub use assembly::{Assembly, AssemblyOrder, AssemblyRequest, assemble, compose, compose_children};
pub use construct::{
    Annotation, ConstructId, ConstructRecord, Feature, Qualifier, Reference, Strand, VectorMetadata,
};
pub use construct_store::{ConstructArena, ConstructStore};
pub use digest::{Digester, Digestion, digest_sequence};
pub use error::{GgwError, Result};
pub use genbank::{extract, import_genbank_text};
pub use genbank_export::serialize;
pub use restriction_enzyme::{CutSites, TypeIisEnzyme};
pub use settings::Settings;
pub use vector_level::VectorLevel;
