//! Revertify — reversible display configuration management.
//!
//! Captures the active display configuration (output topology, per-device
//! modes, HDR states, primary device) into a portable snapshot and replays
//! a previously captured snapshot back onto the live system through an
//! ordered, failure-checked revert sequence with guaranteed best-effort
//! cleanup.
//!
//! All OS interaction is delegated to collaborator traits so a session host
//! can plug in its platform layer and persistence, and so the engine stays
//! fully testable off-device:
//!
//! ```no_run
//! use revertify::{FilePersistence, SettingsManager, Workarounds};
//! # use revertify::DeviceControl;
//! # fn platform_device() -> Box<dyn DeviceControl> { unimplemented!() }
//!
//! let mut manager = SettingsManager::new(
//!     platform_device(),
//!     Box::new(FilePersistence::new("display_settings.json")),
//!     None,
//!     Workarounds::default(),
//! );
//!
//! if let Some(profile) = manager.export_restore_profile() {
//!     // ... change the display configuration for a session ...
//!     let result = manager.restore_from_profile(&profile);
//!     assert!(result.is_ok());
//! }
//! ```

pub mod audio;
pub mod device;
pub mod persistence;
pub mod settings;
pub mod snapshot;
pub mod types;

pub use audio::{AudioContext, NoopAudioContext};
pub use device::DeviceControl;
pub use persistence::{FilePersistence, MemoryPersistence, PersistenceStore};
pub use settings::{RevertResult, SettingsManager, Workarounds};
pub use snapshot::{
    DecodeError, DisplaySettingsSnapshot, InitialState, ModifiedState, SingleDisplayConfigState,
};
pub use types::{
    DeviceId, DisplayMode, EnumeratedDevice, HdrState, HdrStateMap, ModeMap, RefreshRate,
    Resolution, Topology,
};
