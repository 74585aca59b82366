//! Runtime configuration, stored as pretty-printed JSON.

use crate::{error::Result, restriction_enzyme::TypeIisEnzyme};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SEQUENCE_LENGTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub organism: String,
    pub definition: String,
    pub molecule_type: String,
    pub division: String,
    pub journal_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            organism: "synthetic DNA construct".to_string(),
            definition: "Golden Gate vector".to_string(),
            molecule_type: "DNA".to_string(),
            division: "SYN".to_string(),
            journal_prefix: "Exported from the Golden Gate vector database on".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enzyme: TypeIisEnzyme,
    pub min_sequence_length: usize,
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enzyme: TypeIisEnzyme::bsa_i(),
            min_sequence_length: DEFAULT_MIN_SEQUENCE_LENGTH,
            export: ExportSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from_path(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save_to_path(&self, path: &str) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
