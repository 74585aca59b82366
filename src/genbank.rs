//! Turning parsed GenBank records into digested [`ConstructRecord`]s.

use crate::{
    construct::{Annotation, ConstructRecord, Feature, Qualifier, Reference, VectorMetadata},
    digest::Digester,
    error::{GgwError, Result},
    feature_location::FeatureSpan,
    feature_mapper::FeatureMapper,
    vector_level::VectorLevel,
};
use gb_io::{
    reader::SeqReader,
    seq::{Seq, Topology},
};
use log::{debug, warn};
use rayon::prelude::*;

pub fn parse_genbank_text(text: &str) -> Result<Vec<Seq>> {
    SeqReader::new(text.as_bytes())
        .map(|record| record.map_err(|e| GgwError::GenBank(e.to_string())))
        .collect()
}

pub fn parse_genbank_file(path: &str) -> Result<Vec<Seq>> {
    let text = std::fs::read_to_string(path)?;
    parse_genbank_text(&text)
}

/// The text must hold exactly one record.
pub fn read_single_record(text: &str) -> Result<Seq> {
    let mut records = parse_genbank_text(text)?;
    if records.len() != 1 {
        return Err(GgwError::InvalidInput(format!(
            "expected exactly one GenBank record, found {}",
            records.len()
        )));
    }
    Ok(records.remove(0))
}

pub fn import_genbank_text(text: &str, level: VectorLevel) -> Result<ConstructRecord> {
    extract(&read_single_record(text)?, level)
}

/// Splits a LOCUS name of the form `MPG0042_pL0-GFP` into the mpg number and
/// the vector name. Remaining `_`-separated parts are joined without
/// separator.
pub fn split_record_name(locus: &str) -> (Option<String>, String) {
    let mut parts = locus.split('_');
    let first = parts.next().unwrap_or_default();
    let rest: String = parts.collect();
    if rest.is_empty() {
        (None, locus.to_string())
    } else {
        (Some(first.to_string()), rest)
    }
}

/// Header fields of the record as a flat annotation bag.
pub fn record_annotations(seq: &Seq) -> Vec<Annotation> {
    let mut ret = vec![];
    if let Some(molecule_type) = &seq.molecule_type {
        ret.push(Annotation::new("molecule_type", molecule_type));
    }
    let topology = match seq.topology {
        Topology::Circular => "circular",
        Topology::Linear => "linear",
    };
    ret.push(Annotation::new("topology", topology));
    if !seq.division.is_empty() {
        ret.push(Annotation::new("data_file_division", &seq.division));
    }
    if let Some(date) = &seq.date {
        ret.push(Annotation::new("date", date.to_string()));
    }
    if let Some(definition) = &seq.definition {
        ret.push(Annotation::new("definition", definition));
    }
    if let Some(accession) = &seq.accession {
        ret.push(Annotation::new("accessions", accession));
    }
    if let Some(version) = &seq.version {
        ret.push(Annotation::new("sequence_version", version));
    }
    if let Some(dblink) = &seq.dblink {
        ret.push(Annotation::new("dblink", dblink));
    }
    if let Some(keywords) = &seq.keywords {
        ret.push(Annotation::new("keywords", keywords));
    }
    if let Some(source) = &seq.source {
        ret.push(Annotation::new("source", &source.source));
        if let Some(organism) = &source.organism {
            ret.push(Annotation::new("organism", organism));
        }
    }
    if !seq.comments.is_empty() {
        ret.push(Annotation::new("comment", seq.comments.join("\n")));
    }
    ret
}

/// Authors and title only; every other reference field is dropped.
pub fn record_references(seq: &Seq) -> Vec<Reference> {
    seq.references
        .iter()
        .map(|reference| Reference {
            authors: reference.authors.clone().unwrap_or_default(),
            title: reference.title.clone(),
        })
        .collect()
}

/// Features in the coordinates of the undigested record. Features without
/// usable bounds are skipped.
pub fn record_features(seq: &Seq) -> Vec<Feature> {
    seq.features
        .iter()
        .filter_map(|feature| {
            let Some(span) = FeatureSpan::from_feature(feature) else {
                warn!("skipping {} feature without usable bounds", feature.kind);
                return None;
            };
            let qualifiers = feature
                .qualifiers
                .iter()
                .map(|(key, value)| Qualifier::new(key.to_string(), value.clone().unwrap_or_default()))
                .collect();
            Some(Feature {
                kind: feature.kind.to_string(),
                qualifiers,
                start_pos: span.start,
                end_pos: span.end,
                strand: span.strand,
            })
        })
        .collect()
}

pub fn extract(seq: &Seq, level: VectorLevel) -> Result<ConstructRecord> {
    extract_with(&Digester::default(), seq, level)
}

pub fn extract_with(digester: &Digester, seq: &Seq, level: VectorLevel) -> Result<ConstructRecord> {
    let raw_sequence = String::from_utf8_lossy(&seq.seq);
    let digestion = digester.digest(level, &raw_sequence)?;
    let mapper = FeatureMapper::for_digestion(&digestion, level);
    let raw_features = record_features(seq);
    let features = mapper.map(&raw_features)?;

    let locus = seq.name.clone().unwrap_or_default();
    let (mpg_number, name) = split_record_name(&locus);
    debug!(
        "extracted {level} '{locus}': {} of {} features kept, {} of {} units retained",
        features.len(),
        raw_features.len(),
        digestion.sequence.chars().count(),
        digestion.source_len
    );

    Ok(ConstructRecord {
        name,
        mpg_number,
        level,
        sequence: digestion.sequence,
        annotations: record_annotations(seq),
        features,
        references: record_references(seq),
        children: vec![],
        metadata: VectorMetadata::default(),
    })
}

/// Extracts many records at once; results stay in input order.
pub fn extract_all(seqs: &[Seq], level: VectorLevel) -> Vec<Result<ConstructRecord>> {
    let digester = Digester::default();
    seqs.par_iter()
        .map(|seq| extract_with(&digester, seq, level))
        .collect()
}
