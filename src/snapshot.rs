//! Snapshot data model and its wire codec.
//!
//! A restore profile is the UTF-8 JSON encoding of [`SingleDisplayConfigState`],
//! with no extra header, versioning or checksum. Callers that need format
//! versioning must add it around the buffer themselves.

use crate::types::{DeviceId, HdrStateMap, ModeMap, Topology};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Read-only point-in-time description of the live configuration.
///
/// Produced by [`SettingsManager::export_current_settings`] and never
/// persisted by this crate.
///
/// [`SettingsManager::export_current_settings`]: crate::settings::SettingsManager::export_current_settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettingsSnapshot {
    pub topology: Topology,
    pub modes: ModeMap,
    pub hdr_states: HdrStateMap,
    /// Active primary device, empty when unspecified.
    pub primary_device: DeviceId,
}

/// Lighter-weight fallback descriptor captured alongside the full state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub topology: Topology,
    /// Devices that reported themselves primary-capable at capture time.
    pub primary_devices: BTreeSet<DeviceId>,
}

/// The fully captured state a restore drives the system back into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifiedState {
    pub topology: Topology,
    pub modes: ModeMap,
    pub hdr_states: HdrStateMap,
    pub primary_device: DeviceId,
}

/// The restorable unit produced by profile export and consumed by restore.
///
/// Export populates both topology fields from the same read. Profiles built
/// elsewhere may carry a genuinely different `initial` topology (what to
/// return to after a session) next to the `modified` one (what was applied
/// during it); the restore sequence handles both shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleDisplayConfigState {
    pub initial: InitialState,
    pub modified: ModifiedState,
}

/// Failure decoding a restore profile buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("profile is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("profile is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a restorable state into its profile buffer.
pub fn encode(state: &SingleDisplayConfigState) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(state)
}

/// Decode a profile buffer back into a restorable state.
pub fn decode(data: &[u8]) -> Result<SingleDisplayConfigState, DecodeError> {
    let text = std::str::from_utf8(data)?;
    Ok(serde_json::from_str(text)?)
}
