//! Preset validation and the opaque configuration document.
//!
//! A preset's `config` is whatever JSON the editor sends. The store never
//! looks inside it: it is kept as raw JSON text so that what comes back out
//! of `GET /api/presets` is exactly what went in.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for a preset name, in characters.
pub const MAX_PRESET_NAME_LEN: usize = 100;

/// Maximum length for a preset description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/* --------------------------------------------------------------------------
   Opaque configuration document
   -------------------------------------------------------------------------- */

/// Raw JSON configuration blob attached to a preset.
///
/// Serializes as the original JSON text (no re-ordering of keys, no
/// re-formatting of numbers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetConfig(Box<RawValue>);

impl PresetConfig {
    /// Wrap a JSON document held as text. Fails if `text` is not valid JSON.
    pub fn from_json(text: String) -> Result<Self, serde_json::Error> {
        RawValue::from_string(text).map(Self)
    }

    /// The JSON text exactly as received.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Whether the document is the JSON literal `null`.
    pub fn is_null(&self) -> bool {
        self.as_str().trim() == "null"
    }
}

impl TryFrom<String> for PresetConfig {
    type Error = serde_json::Error;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::from_json(text)
    }
}

impl PartialEq for PresetConfig {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a preset name: present, non-blank and within the length limit.
///
/// Returns the name on success so callers can move it into an insert.
pub fn validate_preset_name(name: Option<String>) -> Result<String, CoreError> {
    let name = name.ok_or_else(|| CoreError::Validation("name is required".to_string()))?;
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Preset name must not be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_PRESET_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Preset name too long: {len} chars (max {MAX_PRESET_NAME_LEN})"
        )));
    }
    Ok(name)
}

/// Validate an optional description, defaulting to the empty string.
pub fn validate_description(description: Option<String>) -> Result<String, CoreError> {
    let description = description.unwrap_or_default();
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description too long: {len} chars (max {MAX_DESCRIPTION_LEN})"
        )));
    }
    Ok(description)
}

/// Validate that a configuration document was supplied and is not `null`.
pub fn validate_config(config: Option<PresetConfig>) -> Result<PresetConfig, CoreError> {
    match config {
        Some(config) if !config.is_null() => Ok(config),
        _ => Err(CoreError::Validation("config is required".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
