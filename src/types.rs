//! Core value types for the display configuration model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque identifier of a display output, stable within a session.
pub type DeviceId = String;

/// Modes keyed by the devices flattened out of a topology.
pub type ModeMap = BTreeMap<DeviceId, DisplayMode>;

/// HDR states keyed by the devices flattened out of a topology.
pub type HdrStateMap = BTreeMap<DeviceId, HdrState>;

/// Arrangement of the active display outputs.
///
/// Each inner group holds the devices duplicating the same image; the outer
/// list holds the groups extended next to each other. The engine treats the
/// contents as opaque and asks the device collaborator for validity,
/// equality and flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology(pub Vec<Vec<DeviceId>>);

impl Topology {
    pub fn new(groups: Vec<Vec<DeviceId>>) -> Self {
        Topology(groups)
    }

    pub fn groups(&self) -> &[Vec<DeviceId>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Display resolution in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Refresh rate as the rational value reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    /// Approximate rate in Hz, 0.0 when the denominator is zero.
    pub fn as_hz(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// Resolution and refresh rate of a single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    pub resolution: Resolution,
    pub refresh_rate: RefreshRate,
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}@{:.3}",
            self.resolution.width,
            self.resolution.height,
            self.refresh_rate.as_hz()
        )
    }
}

/// Tri-state HDR status of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HdrState {
    /// HDR is active on the output.
    Enabled,
    /// The output supports HDR but it is switched off.
    Disabled,
    /// The output does not support HDR or its state could not be read.
    Unknown,
}

/// Enumeration record returned by the device collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratedDevice {
    pub device_id: DeviceId,
    pub display_name: String,
    pub friendly_name: String,
}
