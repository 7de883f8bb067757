//! Sound cues for the front end.
//!
//! The core only emits [`SoundEvent`]s. [`AudioTrigger`] turns them into sounds: through
//! rodio when the `sound` feature is enabled and an output device is available,
//! otherwise silently. The same output carries a looping background tune, started with
//! [`AudioTrigger::restart_music`].

pub mod manager;
#[cfg(feature = "sound")]
pub mod rodio_backend;

pub use falling_blocks_types::SoundEvent;
pub use manager::{Backend, SilentBackend, SoundManager, Voice};

enum Output {
    Silent(SoundManager<SilentBackend>),
    #[cfg(feature = "sound")]
    Rodio(SoundManager<rodio_backend::RodioBackend>),
}

/// Process-wide sound output.
pub struct AudioTrigger {
    output: Output,
}

impl AudioTrigger {
    /// Open the audio device unless `muted`. Falls back to silence when no device opens.
    pub fn open(muted: bool) -> Self {
        if muted {
            log::info!("audio: muted");
            return Self::silent();
        }
        Self::open_device()
    }

    pub fn silent() -> Self {
        Self {
            output: Output::Silent(SoundManager::new(SilentBackend)),
        }
    }

    #[cfg(feature = "sound")]
    fn open_device() -> Self {
        match rodio_backend::RodioBackend::open() {
            Ok(backend) => {
                log::info!("audio: output device opened");
                Self {
                    output: Output::Rodio(SoundManager::new(backend)),
                }
            }
            Err(err) => {
                log::warn!("audio: no output device ({err}); continuing without sound");
                Self::silent()
            }
        }
    }

    #[cfg(not(feature = "sound"))]
    fn open_device() -> Self {
        log::debug!("audio: built without the `sound` feature");
        Self::silent()
    }

    pub fn is_silent(&self) -> bool {
        matches!(self.output, Output::Silent(_))
    }

    pub fn trigger(&mut self, kind: SoundEvent) {
        match &mut self.output {
            Output::Silent(sm) => sm.trigger(kind),
            #[cfg(feature = "sound")]
            Output::Rodio(sm) => sm.trigger(kind),
        }
    }

    /// Play the background music from the start. Silent output ignores it.
    pub fn restart_music(&mut self) {
        match &mut self.output {
            Output::Silent(sm) => sm.restart_music(),
            #[cfg(feature = "sound")]
            Output::Rodio(sm) => sm.restart_music(),
        }
    }

    /// Play every event from one frame, in order.
    pub fn trigger_all(&mut self, events: impl IntoIterator<Item = SoundEvent>) {
        for kind in events {
            self.trigger(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_trigger_is_silent() {
        let mut audio = AudioTrigger::open(true);
        assert!(audio.is_silent());
        audio.restart_music();
        audio.trigger_all([SoundEvent::Move, SoundEvent::LineClear]);
    }
}
