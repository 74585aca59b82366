//! Adapter between `gb_io` feature locations and the flat
//! `(start, end, strand)` spans used everywhere else in the crate.

use crate::construct::Strand;
use gb_io::seq::{Feature, Location};

/// Outer bounds and overall strand of a parsed location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSpan {
    pub start: i64,
    pub end: i64,
    pub strand: Option<Strand>,
}

impl FeatureSpan {
    pub fn from_location(location: &Location) -> Option<Self> {
        let (from, to) = location.find_bounds().ok()?;
        if from < 0 || to < 0 {
            return None;
        }
        Some(Self {
            start: from.min(to),
            end: from.max(to),
            strand: location_strand(location),
        })
    }

    pub fn from_feature(feature: &Feature) -> Option<Self> {
        Self::from_location(&feature.location)
    }

    pub fn to_location(&self) -> Location {
        let range = Location::simple_range(self.start, self.end);
        match self.strand {
            Some(Strand::Reverse) => Location::Complement(Box::new(range)),
            _ => range,
        }
    }
}

pub fn collect_location_strands(location: &Location, reverse: bool, strands: &mut Vec<bool>) {
    match location {
        Location::Range(_, _) | Location::Between(_, _) => strands.push(reverse),
        Location::Complement(inner) => collect_location_strands(inner, !reverse, strands),
        Location::Join(parts)
        | Location::Order(parts)
        | Location::Bond(parts)
        | Location::OneOf(parts) => {
            for part in parts {
                collect_location_strands(part, reverse, strands);
            }
        }
        Location::External(_, maybe_loc) => {
            if let Some(loc) = maybe_loc {
                collect_location_strands(loc, reverse, strands);
            }
        }
        Location::Gap(_) => {}
    }
}

/// Common strand of all parts, `None` when there are no parts or they disagree.
pub fn location_strand(location: &Location) -> Option<Strand> {
    let mut strands = Vec::new();
    collect_location_strands(location, false, &mut strands);
    let first = *strands.first()?;
    if strands.iter().all(|is_reverse| *is_reverse == first) {
        Some(if first { Strand::Reverse } else { Strand::Forward })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_feature(location: Location) -> Feature {
        Feature {
            kind: "mRNA".into(),
            location,
            qualifiers: vec![],
        }
    }

    #[test]
    fn spans_join_and_reverse_strand() {
        let feature = make_feature(Location::Complement(Box::new(Location::Join(vec![
            Location::simple_range(10, 20),
            Location::simple_range(40, 50),
        ]))));
        let span = FeatureSpan::from_feature(&feature).unwrap();
        assert_eq!((span.start, span.end), (10, 50));
        assert_eq!(span.strand, Some(Strand::Reverse));
    }

    #[test]
    fn mixed_strands_have_no_strand() {
        let location = Location::Join(vec![
            Location::simple_range(10, 20),
            Location::Complement(Box::new(Location::simple_range(40, 50))),
        ]);
        assert_eq!(location_strand(&location), None);
        assert_eq!(
            location_strand(&Location::simple_range(1, 4)),
            Some(Strand::Forward)
        );
    }

    #[test]
    fn span_converts_back_to_location() {
        let span = FeatureSpan {
            start: 5,
            end: 12,
            strand: Some(Strand::Reverse),
        };
        let location = span.to_location();
        assert!(matches!(location, Location::Complement(_)));
        assert_eq!(FeatureSpan::from_location(&location), Some(span));
    }
}
