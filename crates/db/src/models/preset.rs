//! Particle preset model and DTOs.

use pfx_core::error::CoreError;
use pfx_core::preset::{self, PresetConfig};
use pfx_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `particle_presets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Preset {
    pub id: DbId,
    pub name: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub config: PresetConfig,
    pub likes: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new preset, as posted by the editor.
///
/// Every field is optional at the wire level so that a missing `name` or
/// `config` surfaces as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePreset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub config: Option<PresetConfig>,
}

impl CreatePreset {
    /// Check required fields and limits, producing an insertable preset.
    pub fn validate(self) -> Result<NewPreset, CoreError> {
        Ok(NewPreset {
            name: preset::validate_preset_name(self.name)?,
            description: preset::validate_description(self.description)?,
            config: preset::validate_config(self.config)?,
        })
    }
}

/// A validated preset ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPreset {
    pub name: String,
    pub description: String,
    pub config: PresetConfig,
}

/// Response body of the like endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetLikes {
    pub likes: i64,
}
