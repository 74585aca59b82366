//! Deciding which features survive a digestion and moving the survivors into
//! the coordinate frame of the digested sequence.
//!
//! Digestion rotates and truncates the circular input, so every kept feature
//! is translated by the same rotation and keeps pointing at the same bases.

use crate::{
    construct::Feature,
    digest::Digestion,
    error::Result,
    restriction_enzyme::CutSites,
    vector_level::VectorLevel,
};
use log::debug;

/// Backbones keep features fully outside `[lo, hi]`; Level0 parts keep
/// features fully inside `[left, right]` taken as given, so a wrapped Level0
/// digestion keeps nothing. Features straddling a cut are never kept.
pub fn keeps_span(cut_sites: &CutSites, level: VectorLevel, start: i64, end: i64) -> Result<bool> {
    let left = cut_sites.left as i64;
    let right = cut_sites.right as i64;
    match level {
        VectorLevel::Backbone => {
            Ok(end <= cut_sites.lo() as i64 || start >= cut_sites.hi() as i64)
        }
        VectorLevel::Level0 => Ok(left <= start && end <= right),
        VectorLevel::Level1 => Err(level.invalid_for("feature filtering")),
    }
}

pub fn keeps_feature(cut_sites: &CutSites, level: VectorLevel, feature: &Feature) -> Result<bool> {
    keeps_span(cut_sites, level, feature.start_pos, feature.end_pos)
}

/// `source_len` is the length of the sequence before digestion.
pub fn reposition_span(
    cut_sites: &CutSites,
    source_len: usize,
    level: VectorLevel,
    start: i64,
    end: i64,
) -> Result<(i64, i64)> {
    let lo = cut_sites.lo() as i64;
    let hi = cut_sites.hi() as i64;
    match level {
        VectorLevel::Level0 => Ok((start - lo, end - lo)),
        VectorLevel::Backbone if start >= hi => Ok((start - hi, end - hi)),
        VectorLevel::Backbone => {
            let shift = source_len as i64 - hi;
            Ok((start + shift, end + shift))
        }
        VectorLevel::Level1 => Err(level.invalid_for("feature repositioning")),
    }
}

pub fn reposition(
    cut_sites: &CutSites,
    source_len: usize,
    level: VectorLevel,
    feature: &Feature,
) -> Result<Feature> {
    let (start, end) = reposition_span(
        cut_sites,
        source_len,
        level,
        feature.start_pos,
        feature.end_pos,
    )?;
    Ok(feature.relocated(start, end))
}

/// Filter and reposition bound to a single digestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureMapper {
    pub cut_sites: CutSites,
    pub source_len: usize,
    pub level: VectorLevel,
}

impl FeatureMapper {
    pub fn new(cut_sites: CutSites, source_len: usize, level: VectorLevel) -> Self {
        Self {
            cut_sites,
            source_len,
            level,
        }
    }

    pub fn for_digestion(digestion: &Digestion, level: VectorLevel) -> Self {
        Self::new(digestion.cut_sites, digestion.source_len, level)
    }

    /// Repositioned copy of `feature`, or `None` if the digestion drops it.
    pub fn map_feature(&self, feature: &Feature) -> Result<Option<Feature>> {
        if !keeps_feature(&self.cut_sites, self.level, feature)? {
            debug!(
                "dropping {} feature at {}..{} (cuts at {}/{})",
                feature.kind,
                feature.start_pos,
                feature.end_pos,
                self.cut_sites.left,
                self.cut_sites.right
            );
            return Ok(None);
        }
        reposition(&self.cut_sites, self.source_len, self.level, feature).map(Some)
    }

    pub fn map(&self, features: &[Feature]) -> Result<Vec<Feature>> {
        let mut ret = Vec::with_capacity(features.len());
        for feature in features {
            if let Some(mapped) = self.map_feature(feature)? {
                ret.push(mapped);
            }
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct::{Qualifier, Strand},
        digest::digest_sequence,
        error::GgwError,
    };

    #[test]
    fn test_level0_reposition_ignores_site_order() {
        let forward = CutSites::new(1520, 3760);
        let swapped = CutSites::new(3760, 1520);
        for cut_sites in [forward, swapped] {
            assert_eq!(
                reposition_span(&cut_sites, 6250, VectorLevel::Level0, 3125, 3425).unwrap(),
                (1605, 1905)
            );
        }
    }

    #[test]
    fn test_backbone_reposition_both_sides() {
        let cut_sites = CutSites::new(22, 36);
        // After the excised region
        assert_eq!(
            reposition_span(&cut_sites, 63, VectorLevel::Backbone, 40, 45).unwrap(),
            (4, 9)
        );
        // Before it, becomes the tail
        assert_eq!(
            reposition_span(&cut_sites, 63, VectorLevel::Backbone, 0, 15).unwrap(),
            (27, 42)
        );
    }

    #[test]
    fn test_reposition_keeps_payload() {
        let feature = Feature {
            kind: "CDS".to_string(),
            qualifiers: vec![Qualifier::new("gene", "lacZ")],
            start_pos: 10,
            end_pos: 20,
            strand: Some(Strand::Reverse),
        };
        let moved = reposition(&CutSites::new(7, 30), 40, VectorLevel::Level0, &feature).unwrap();
        assert_eq!(moved.span(), (3, 13));
        assert_eq!(moved.kind, feature.kind);
        assert_eq!(moved.qualifiers, feature.qualifiers);
        assert_eq!(moved.strand, feature.strand);
    }

    #[test]
    fn test_level1_is_rejected() {
        let cut_sites = CutSites::new(1, 5);
        assert!(matches!(
            reposition_span(&cut_sites, 10, VectorLevel::Level1, 1, 2),
            Err(GgwError::InvalidLevel { .. })
        ));
        assert!(matches!(
            keeps_span(&cut_sites, VectorLevel::Level1, 1, 2),
            Err(GgwError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_filter_drops_straddling_feature_for_both_levels() {
        let cut_sites = CutSites::new(22, 36);
        for level in [VectorLevel::Backbone, VectorLevel::Level0] {
            assert!(!keeps_span(&cut_sites, level, 15, 30).unwrap());
            assert!(!keeps_span(&cut_sites, level, 30, 45).unwrap());
        }
        assert!(keeps_span(&cut_sites, VectorLevel::Level0, 22, 36).unwrap());
        assert!(keeps_span(&cut_sites, VectorLevel::Backbone, 0, 22).unwrap());
        assert!(keeps_span(&cut_sites, VectorLevel::Backbone, 36, 63).unwrap());
        assert!(!keeps_span(&cut_sites, VectorLevel::Backbone, 25, 30).unwrap());
    }

    #[test]
    fn test_wrapped_level0_keeps_nothing() {
        let cut_sites = CutSites::new(44, 11);
        assert!(!keeps_span(&cut_sites, VectorLevel::Level0, 45, 48).unwrap());
        assert!(!keeps_span(&cut_sites, VectorLevel::Level0, 0, 5).unwrap());
    }

    #[test]
    fn test_wrapped_backbone_features_point_at_the_same_bases() {
        let seq = "REGION2_REMAINSXXXXXGAGACCREGION_CUT_OUTGGTCTCXREGION1_REMAINS";
        let digestion = digest_sequence(VectorLevel::Backbone, seq).unwrap();
        assert!(digestion.cut_sites.is_wrapped());
        let features = vec![
            Feature::new("region1", 47, 62),
            Feature::new("cut_out", 26, 40),
            Feature::new("region2", 0, 15).with_strand(Some(Strand::Reverse)),
        ];
        let mapped = FeatureMapper::for_digestion(&digestion, VectorLevel::Backbone)
            .map(&features)
            .unwrap();

        let placed: Vec<(&str, i64, i64)> = mapped
            .iter()
            .map(|f| (f.kind.as_str(), f.start_pos, f.end_pos))
            .collect();
        assert_eq!(placed, vec![("region1", 0, 15), ("region2", 15, 30)]);
        assert_eq!(mapped[1].strand, Some(Strand::Reverse));

        let digested: Vec<char> = digestion.sequence.chars().collect();
        let text = |f: &Feature| -> String {
            digested[f.start_pos as usize..f.end_pos as usize].iter().collect()
        };
        assert_eq!(text(&mapped[0]), "REGION1_REMAINS");
        assert_eq!(text(&mapped[1]), "REGION2_REMAINS");
    }

    #[test]
    fn test_mapped_features_point_at_the_same_bases() {
        let seq = "REGION1_REMAINSGGTCTCXREGION_CUT_OUTXXXXXGAGACCREGION2_REMAINS_";
        let digestion = digest_sequence(VectorLevel::Backbone, seq).unwrap();
        let features = vec![
            Feature::new("region1", 0, 15),
            Feature::new("cut_out", 22, 36),
            Feature::new("region2", 47, 62),
            Feature::new("straddle", 30, 50),
        ];
        let mapper = FeatureMapper::for_digestion(&digestion, VectorLevel::Backbone);
        let mapped = mapper.map(&features).unwrap();

        let kinds: Vec<&str> = mapped.iter().map(|f| f.kind.as_str()).collect();
        assert_eq!(kinds, vec!["region1", "region2"]);
        let digested: Vec<char> = digestion.sequence.chars().collect();
        for feature in &mapped {
            assert!(feature.start_pos >= 0);
            assert!(feature.end_pos as usize <= digested.len());
            let text: String = digested[feature.start_pos as usize..feature.end_pos as usize]
                .iter()
                .collect();
            assert!(text.starts_with("REGION"), "{} -> {text}", feature.kind);
        }
    }

    #[test]
    fn test_level0_mapped_features_inside_digest() {
        let seq = "GGTCTCXGENE_OF_INTERESTXXXXXGAGACC";
        let digestion = digest_sequence(VectorLevel::Level0, seq).unwrap();
        let mapper = FeatureMapper::for_digestion(&digestion, VectorLevel::Level0);
        let mapped = mapper
            .map(&[Feature::new("gene", 7, 11), Feature::new("motif", 0, 6)])
            .unwrap();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].span(), (0, 4));
        assert_eq!(&digestion.sequence[0..4], "GENE");
    }
}
