//! Rendering construct records back to GenBank flat-file text.

use crate::{
    construct::ConstructRecord,
    error::{GgwError, Result},
    feature_location::FeatureSpan,
    settings::ExportSettings,
};
use chrono::{Datelike, Local, NaiveDate};
use gb_io::seq::{Date, Feature, Reference, Seq, Source, Topology};

/// Annotation keys replaced by fixed values on export.
const SUPERSEDED_ANNOTATIONS: &[&str] = &[
    "topology",
    "molecule_type",
    "data_file_division",
    "date",
    "definition",
    "source",
    "organism",
];

fn locus_name(record: &ConstructRecord) -> String {
    let name = match &record.mpg_number {
        Some(mpg_number) => format!("{mpg_number}_{}", record.name),
        None => record.name.clone(),
    };
    name.replace(' ', "_")
}

pub fn journal_stamp(settings: &ExportSettings, date: NaiveDate) -> String {
    format!(
        "{} {}",
        settings.journal_prefix,
        date.format("%d-%b-%Y").to_string().to_uppercase()
    )
}

pub fn to_genbank_seq(record: &ConstructRecord, settings: &ExportSettings, date: NaiveDate) -> Result<Seq> {
    let mut seq = Seq::empty();
    seq.name = Some(locus_name(record));
    seq.topology = Topology::Circular;
    seq.molecule_type = Some(settings.molecule_type.clone());
    seq.division = settings.division.clone();
    seq.definition = Some(settings.definition.clone());
    seq.source = Some(Source {
        source: settings.organism.clone(),
        organism: Some(settings.organism.clone()),
    });
    seq.date = Some(
        Date::from_ymd(date.year(), date.month(), date.day())
            .map_err(|e| GgwError::GenBank(format!("invalid record date {date}: {e:?}")))?,
    );
    seq.seq = record.sequence.as_bytes().to_vec();
    seq.len = Some(record.len());

    for annotation in &record.annotations {
        let key = annotation.key.as_str();
        if SUPERSEDED_ANNOTATIONS.contains(&key) {
            continue;
        }
        let value = annotation.value.clone();
        let slot = match key {
            "accessions" => &mut seq.accession,
            "sequence_version" => &mut seq.version,
            "keywords" => &mut seq.keywords,
            "dblink" => &mut seq.dblink,
            "comment" => {
                seq.comments.push(value);
                continue;
            }
            _ => {
                seq.comments.push(format!("{key}: {value}"));
                continue;
            }
        };
        if slot.is_none() {
            *slot = Some(value);
        } else {
            seq.comments.push(format!("{key}: {value}"));
        }
    }

    let journal = journal_stamp(settings, date);
    seq.references = record
        .references
        .iter()
        .enumerate()
        .map(|(idx, reference)| Reference {
            description: format!("{}  (bases 1 to {})", idx + 1, record.len()),
            authors: Some(reference.authors.clone()).filter(|authors| !authors.is_empty()),
            consortium: None,
            title: reference.title.clone(),
            journal: Some(journal.clone()),
            pubmed: None,
            remark: None,
        })
        .collect();

    seq.features = record
        .features
        .iter()
        .map(|feature| {
            let span = FeatureSpan {
                start: feature.start_pos,
                end: feature.end_pos,
                strand: feature.strand,
            };
            Feature {
                kind: feature.kind.clone().into(),
                location: span.to_location(),
                qualifiers: feature
                    .qualifiers
                    .iter()
                    .map(|q| (q.key.clone().into(), Some(q.value.clone())))
                    .collect(),
            }
        })
        .collect();

    Ok(seq)
}

pub fn serialize_dated(record: &ConstructRecord, settings: &ExportSettings, date: NaiveDate) -> Result<String> {
    let seq = to_genbank_seq(record, settings, date)?;
    let mut buffer = Vec::new();
    gb_io::writer::write(&mut buffer, &seq)
        .map_err(|e| GgwError::GenBank(format!("could not write '{}': {e}", record.name)))?;
    String::from_utf8(buffer).map_err(|e| GgwError::GenBank(e.to_string()))
}

/// Serializes with today's date in the header and reference journals.
pub fn serialize(record: &ConstructRecord, settings: &ExportSettings) -> Result<String> {
    serialize_dated(record, settings, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct::{Annotation, Feature as ConstructFeature, Reference as ConstructReference, Strand},
        genbank::{parse_genbank_text, read_single_record, record_features},
        vector_level::VectorLevel,
    };
    use gb_io::seq::Location;

    fn level1() -> ConstructRecord {
        let mut record = ConstructRecord::new("pL1-GFP", VectorLevel::Level1, "ATGAAACCCGGGTTTTAGCGTACGAGACC");
        record.mpg_number = Some("MPG0100".to_string());
        record.annotations = vec![
            Annotation::new("topology", "linear"),
            Annotation::new("keywords", "golden gate"),
            Annotation::new("note", "demo"),
        ];
        record.references = vec![ConstructReference {
            authors: "Doe,J.".to_string(),
            title: "Modular cloning toolkit".to_string(),
        }];
        record.features = vec![
            ConstructFeature::new("CDS", 0, 18).with_qualifier("gene", "gfp"),
            ConstructFeature::new("primer_bind", 18, 29).with_strand(Some(Strand::Reverse)),
        ];
        record
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_seq_fields() {
        let seq = to_genbank_seq(&level1(), &ExportSettings::default(), date()).unwrap();
        assert_eq!(seq.name.as_deref(), Some("MPG0100_pL1-GFP"));
        assert_eq!(seq.topology, Topology::Circular);
        assert_eq!(seq.molecule_type.as_deref(), Some("DNA"));
        assert_eq!(seq.keywords.as_deref(), Some("golden gate"));
        assert_eq!(seq.comments, vec!["note: demo".to_string()]);
        assert_eq!(
            seq.references[0].journal.as_deref(),
            Some("Exported from the Golden Gate vector database on 05-MAR-2024")
        );
        assert_eq!(seq.references[0].description, "1  (bases 1 to 29)");
        assert!(matches!(seq.features[1].location, Location::Complement(_)));
    }

    #[test]
    fn test_serialized_text_reads_back() {
        let text = serialize_dated(&level1(), &ExportSettings::default(), date()).unwrap();
        assert!(text.starts_with("LOCUS"));
        assert!(text.contains("circular"));
        assert_eq!(parse_genbank_text(&text).unwrap().len(), 1);

        let seq = read_single_record(&text).unwrap();
        assert_eq!(seq.seq.to_ascii_uppercase(), b"ATGAAACCCGGGTTTTAGCGTACGAGACC".to_vec());
        let features = record_features(&seq);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].span(), (0, 18));
        assert_eq!(features[0].qualifier_values("gene").collect::<Vec<_>>(), vec!["gfp"]);
        assert_eq!(features[1].span(), (18, 29));
        assert_eq!(features[1].strand, Some(Strand::Reverse));
        assert_eq!(seq.references[0].title, "Modular cloning toolkit");
    }

    #[test]
    fn test_locus_length_counts_chars() {
        let record = ConstructRecord::new("x", VectorLevel::Level0, "AC🐺GT");
        let seq = to_genbank_seq(&record, &ExportSettings::default(), date()).unwrap();
        assert_eq!(seq.len, Some(5));
    }

    #[test]
    fn test_journal_stamp() {
        let settings = ExportSettings {
            journal_prefix: "Exported".to_string(),
            ..ExportSettings::default()
        };
        assert_eq!(journal_stamp(&settings, date()), "Exported 05-MAR-2024");
    }
}
