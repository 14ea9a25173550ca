//! Trait for the device control collaborator.

use crate::types::{DeviceId, EnumeratedDevice, HdrStateMap, ModeMap, Topology};
use std::time::Duration;

/// OS-level display control surface consumed by the settings engine.
///
/// All reads and writes of the live configuration go through here; the
/// engine itself holds no device state. Writes report success as `bool`
/// so failures stay plain values the engine can branch on.
pub trait DeviceControl {
    /// Whether the display subsystem can be queried right now.
    ///
    /// Returns false mid-transition, e.g. while the OS is still applying a
    /// previous configuration change.
    fn is_api_accessible(&self) -> bool;

    fn current_topology(&self) -> Topology;

    fn is_topology_valid(&self, topology: &Topology) -> bool;

    fn is_topology_same(&self, lhs: &Topology, rhs: &Topology) -> bool;

    /// Reduce a topology to its flat list of constituent devices.
    fn flatten_topology(&self, topology: &Topology) -> Vec<DeviceId>;

    fn current_modes(&self, device_ids: &[DeviceId]) -> ModeMap;

    fn current_hdr_states(&self, device_ids: &[DeviceId]) -> HdrStateMap;

    fn is_primary(&self, device_id: &str) -> bool;

    /// The primary device within a topology, empty when none reports primary.
    fn primary_device(&self, topology: &Topology) -> DeviceId {
        self.flatten_topology(topology)
            .into_iter()
            .find(|id| self.is_primary(id))
            .unwrap_or_default()
    }

    fn set_topology(&mut self, topology: &Topology) -> bool;

    fn set_hdr_states(&mut self, states: &HdrStateMap) -> bool;

    /// Apply display modes. With `strict` set the exact mode is required;
    /// otherwise the OS may fall back to the nearest compatible one.
    fn set_modes(&mut self, modes: &ModeMap, strict: bool) -> bool;

    fn set_primary(&mut self, device_id: &str) -> bool;

    /// Transiently disable and re-enable HDR after `delay` to force display
    /// controllers to renegotiate HDR capability. A `None` delay lets the
    /// implementation skip the workaround.
    fn blank_hdr_states(&mut self, delay: Option<Duration>);

    fn enum_available_devices(&self) -> Vec<EnumeratedDevice>;

    fn display_name(&self, device_id: &str) -> String;
}
