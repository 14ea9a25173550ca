//! Settings orchestration: snapshot export and ordered restore.
//!
//! [`SettingsManager`] composes the device, persistence and audio
//! collaborators into three operations: exporting the live configuration,
//! replaying a previously exported profile, and resetting persisted state.
//! It holds no device state of its own; every read and write of topology,
//! modes, HDR or primary goes through the injected [`DeviceControl`].

mod state;

pub use state::RevertResult;

use crate::audio::{AudioContext, NoopAudioContext};
use crate::device::DeviceControl;
use crate::persistence::PersistenceStore;
use crate::snapshot::{
    self, DisplaySettingsSnapshot, InitialState, ModifiedState, SingleDisplayConfigState,
};
use crate::types::{EnumeratedDevice, Topology};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Tunables for quirky display controllers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workarounds {
    /// Delay before HDR blanking after a touched restore; `None` lets the
    /// device collaborator skip the blanking entirely.
    pub hdr_blank_delay: Option<Duration>,
}

/// Orchestrates reversible changes to the active display configuration.
///
/// Calls are synchronous and must not be interleaved against the same live
/// display state; the manager performs no locking of its own.
pub struct SettingsManager {
    device: Box<dyn DeviceControl>,
    persistence: Box<dyn PersistenceStore>,
    audio: Box<dyn AudioContext>,
    workarounds: Workarounds,
}

impl SettingsManager {
    /// Create a manager from its collaborators.
    ///
    /// A missing audio context is replaced with [`NoopAudioContext`] so the
    /// release path is unconditionally safe to call.
    pub fn new(
        device: Box<dyn DeviceControl>,
        persistence: Box<dyn PersistenceStore>,
        audio: Option<Box<dyn AudioContext>>,
        workarounds: Workarounds,
    ) -> Self {
        if let Ok(json) = serde_json::to_string(&workarounds) {
            info!("Provided workaround settings for SettingsManager: {json}");
        }

        SettingsManager {
            device,
            persistence,
            audio: audio.unwrap_or_else(|| Box::new(NoopAudioContext)),
            workarounds,
        }
    }

    /// List the currently enumerable display devices.
    pub fn enum_available_devices(&self) -> Vec<EnumeratedDevice> {
        self.device.enum_available_devices()
    }

    /// Human-readable name for a device id.
    pub fn display_name(&self, device_id: &str) -> String {
        self.device.display_name(device_id)
    }

    /// Clear any persisted settings record and release the audio handle.
    ///
    /// Audio is only released after the record is durably gone, so a release
    /// never happens while persisted state still claims an active override.
    pub fn reset_persistence(&mut self) -> bool {
        info!("Trying to reset persistent display device settings.");
        if self.persistence.current().is_none() {
            return true;
        }

        if !self.persistence.persist(None) {
            error!("Failed to clear persistence!");
            return false;
        }

        if self.audio.is_captured() {
            self.audio.release();
        }
        true
    }

    /// Capture the live configuration into a read-only snapshot.
    ///
    /// All-or-nothing: `None` when the display API is unreachable, the
    /// topology is invalid or the mode read comes back empty. An empty HDR
    /// read is tolerated here since HDR support may genuinely be absent.
    pub fn export_current_settings(&self) -> Option<DisplaySettingsSnapshot> {
        if !self.device.is_api_accessible() {
            error!("Export settings: display API is temporarily unavailable.");
            return None;
        }

        let topology = self.device.current_topology();
        if !self.device.is_topology_valid(&topology) {
            error!("Export settings: current topology is invalid: {topology:?}");
            return None;
        }

        let device_ids = self.device.flatten_topology(&topology);
        let modes = self.device.current_modes(&device_ids);
        if modes.is_empty() {
            // A live topology always has at least one device, so this is a
            // query error rather than "no devices".
            error!("Export settings: failed to get current display modes!");
            return None;
        }

        let hdr_states = self.device.current_hdr_states(&device_ids);
        let primary_device = self.device.primary_device(&topology);

        Some(DisplaySettingsSnapshot { topology, modes, hdr_states, primary_device })
    }

    /// Capture the live configuration into a serialized restore profile.
    ///
    /// Unlike [`export_current_settings`](Self::export_current_settings) an
    /// empty HDR read fails the export, since a profile must be able to
    /// faithfully reproduce HDR on restore.
    pub fn export_restore_profile(&self) -> Option<Vec<u8>> {
        if !self.device.is_api_accessible() {
            error!("Export profile: display API is temporarily unavailable.");
            return None;
        }

        let topology = self.device.current_topology();
        if !self.device.is_topology_valid(&topology) {
            error!("Export profile: current topology is invalid: {topology:?}");
            return None;
        }

        let device_ids = self.device.flatten_topology(&topology);
        let modes = self.device.current_modes(&device_ids);
        if modes.is_empty() {
            error!("Export profile: failed to get current display modes!");
            return None;
        }

        let hdr_states = self.device.current_hdr_states(&device_ids);
        if hdr_states.is_empty() {
            error!("Export profile: failed to get current HDR states!");
            return None;
        }

        let primary_devices: BTreeSet<_> = device_ids
            .iter()
            .filter(|id| self.device.is_primary(id))
            .cloned()
            .collect();
        let primary_device = self.device.primary_device(&topology);

        let state = SingleDisplayConfigState {
            initial: InitialState { topology: topology.clone(), primary_devices },
            modified: ModifiedState { topology, modes, hdr_states, primary_device },
        };

        match snapshot::encode(&state) {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                error!("Export profile: failed to encode profile: {err}");
                None
            }
        }
    }

    /// Replay a profile produced by [`export_restore_profile`](Self::export_restore_profile).
    ///
    /// Steps run in a fixed order and each only writes when the live value
    /// differs from the target, so restoring an already-matching profile
    /// performs zero device writes. Whenever any step has touched the
    /// system, HDR blanking runs on the way out regardless of the outcome.
    pub fn restore_from_profile(&mut self, data: &[u8]) -> RevertResult {
        if !self.device.is_api_accessible() {
            error!("Restore profile: display API is temporarily unavailable.");
            return RevertResult::ApiTemporarilyUnavailable;
        }

        let current_topology = self.device.current_topology();
        if !self.device.is_topology_valid(&current_topology) {
            error!("Restore profile: current topology is invalid: {current_topology:?}");
            return RevertResult::TopologyIsInvalid;
        }

        let state = match snapshot::decode(data) {
            Ok(state) => state,
            Err(err) => {
                // No better category exists for malformed input.
                error!("Restore profile: failed to decode profile: {err}");
                return RevertResult::PersistenceSaveFailed;
            }
        };

        let mut touched = false;
        let result = self.run_revert_steps(&state, &current_topology, &mut touched);

        // Works around controllers that fail to renegotiate HDR after a
        // topology or mode change; must fire on every exit once a step has
        // written to the system.
        if touched {
            self.device.blank_hdr_states(self.workarounds.hdr_blank_delay);
        }

        result
    }

    fn run_revert_steps(
        &mut self,
        state: &SingleDisplayConfigState,
        current_topology: &Topology,
        touched: &mut bool,
    ) -> RevertResult {
        let modified = &state.modified;

        // 1) Switch to the modified topology, the one the per-device modes
        //    and HDR states are keyed against.
        if !self.device.is_topology_valid(&modified.topology) {
            error!("Restore profile: modified topology is invalid: {:?}", modified.topology);
            return RevertResult::TopologyIsInvalid;
        }

        if !self.device.is_topology_same(current_topology, &modified.topology) {
            *touched = true;
            if !self.device.set_topology(&modified.topology) {
                error!("Restore profile: failed to set modified topology!");
                return RevertResult::SwitchingTopologyFailed;
            }
        }

        // 2) Restore HDR states if the profile carries them.
        if !modified.hdr_states.is_empty() {
            let device_ids = self.device.flatten_topology(&modified.topology);
            if self.device.current_hdr_states(&device_ids) != modified.hdr_states {
                *touched = true;
                info!("Restore profile: applying HDR states: {:?}", modified.hdr_states);
                if !self.device.set_hdr_states(&modified.hdr_states) {
                    return RevertResult::RevertingHdrStatesFailed;
                }
            }
        }

        // 3) Restore display modes if the profile carries them. Strict
        //    application is scoped to this single call.
        if !modified.modes.is_empty() {
            let device_ids = self.device.flatten_topology(&modified.topology);
            if self.device.current_modes(&device_ids) != modified.modes {
                *touched = true;
                info!("Restore profile: applying display modes (strict): {:?}", modified.modes);
                if !self.device.set_modes(&modified.modes, true) {
                    return RevertResult::RevertingDisplayModesFailed;
                }
            }
        }

        // 4) Restore the primary device if the profile names one.
        if !modified.primary_device.is_empty() {
            let current_primary = self.device.primary_device(&modified.topology);
            if current_primary != modified.primary_device {
                *touched = true;
                info!("Restore profile: setting primary device to: {}", modified.primary_device);
                if !self.device.set_primary(&modified.primary_device) {
                    return RevertResult::RevertingPrimaryDeviceFailed;
                }
            }
        }

        // 5) Switch to the initial topology. The baseline is the topology
        //    established in step 1, not whatever is live by now.
        let initial = &state.initial;
        if !self.device.is_topology_valid(&initial.topology) {
            error!("Restore profile: initial topology is invalid: {:?}", initial.topology);
            return RevertResult::TopologyIsInvalid;
        }

        if !self.device.is_topology_same(&modified.topology, &initial.topology) {
            *touched = true;
            if !self.device.set_topology(&initial.topology) {
                error!("Restore profile: failed to set initial topology!");
                return RevertResult::SwitchingTopologyFailed;
            }
        }

        RevertResult::Ok
    }
}
