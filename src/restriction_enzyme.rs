use crate::error::{GgwError, Result};
use serde::{Deserialize, Serialize};

/// A Type-IIS enzyme whose recognition site is split into a forward half and
/// a reverse half, each cutting a fixed distance away from the motif.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeIisEnzyme {
    pub name: String,
    pub forward_motif: String,
    pub reverse_motif: String,
    /// Distance from the start of the forward motif to its cut.
    pub forward_cut: usize,
    /// Distance from the cut back to the start of the reverse motif.
    pub reverse_cut: usize,
}

/// Cut offsets into the pre-digestion sequence. `left` belongs to the forward
/// motif and `right` to the reverse motif; `left > right` when the retained
/// region wraps around the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CutSites {
    pub left: usize,
    pub right: usize,
}

impl CutSites {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub fn lo(&self) -> usize {
        self.left.min(self.right)
    }

    pub fn hi(&self) -> usize {
        self.left.max(self.right)
    }

    pub fn is_wrapped(&self) -> bool {
        self.left > self.right
    }
}

impl Default for TypeIisEnzyme {
    fn default() -> Self {
        Self::bsa_i()
    }
}

impl TypeIisEnzyme {
    pub fn bsa_i() -> Self {
        Self {
            name: "BsaI".to_string(),
            forward_motif: "GGTCTC".to_string(),
            reverse_motif: "GAGACC".to_string(),
            forward_cut: 7,
            reverse_cut: 5,
        }
    }

    pub fn bsm_bi() -> Self {
        Self {
            name: "BsmBI".to_string(),
            forward_motif: "CGTCTC".to_string(),
            reverse_motif: "GAGACG".to_string(),
            forward_cut: 7,
            reverse_cut: 5,
        }
    }

    /// First index of `motif` in `units`, compared ASCII case-insensitively.
    pub fn find_motif(units: &[char], motif: &str) -> Option<usize> {
        let motif: Vec<char> = motif.chars().collect();
        if motif.is_empty() || motif.len() > units.len() {
            return None;
        }
        units.windows(motif.len()).position(|window| {
            window
                .iter()
                .zip(motif.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
    }

    /// Locates both motif halves and converts them into cut offsets.
    pub fn find_cut_sites(&self, units: &[char]) -> Result<CutSites> {
        let forward = Self::find_motif(units, &self.forward_motif)
            .ok_or_else(|| self.motif_not_found(&self.forward_motif))?;
        let reverse = Self::find_motif(units, &self.reverse_motif)
            .ok_or_else(|| self.motif_not_found(&self.reverse_motif))?;

        let left = forward + self.forward_cut;
        let right = reverse.checked_sub(self.reverse_cut).ok_or_else(|| {
            GgwError::InvalidInput(format!(
                "{} site at {reverse} cuts before the start of the sequence",
                self.name
            ))
        })?;
        if left > units.len() {
            return Err(GgwError::InvalidInput(format!(
                "{} site at {forward} cuts past the end of the sequence ({} > {})",
                self.name,
                left,
                units.len()
            )));
        }
        Ok(CutSites { left, right })
    }

    fn motif_not_found(&self, motif: &str) -> GgwError {
        GgwError::MotifNotFound {
            enzyme: self.name.clone(),
            motif: motif.to_string(),
        }
    }
}
