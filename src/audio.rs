//! Audio capture context collaborator.

/// Tracks the OS audio-capture handle tied to a display change.
///
/// Switching topology can tear down the default audio endpoint; the session
/// host keeps a capture handle alive across the change and the settings
/// engine releases it once no persisted override remains.
pub trait AudioContext {
    fn is_captured(&self) -> bool;

    fn release(&mut self);
}

/// Substitute used when the caller provides no audio context, so every
/// call site stays unconditionally safe.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAudioContext;

impl AudioContext for NoopAudioContext {
    fn is_captured(&self) -> bool {
        false
    }

    fn release(&mut self) {}
}
