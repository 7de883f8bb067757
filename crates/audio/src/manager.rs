//! Interrupt policy for sound cues, plus the background music loop.

use falling_blocks_types::SoundEvent;

/// A sound that is currently playing.
pub trait Voice {
    /// Cut the sound off immediately.
    fn stop(self);
    /// Let the sound play to its end without tracking it any further.
    fn release(self);
}

/// Something that can start sounds.
pub trait Backend {
    type Voice: Voice;

    /// Start playing the cue for `kind`. `None` when nothing could be started.
    fn play(&mut self, kind: SoundEvent) -> Option<Self::Voice>;

    /// Play the looping background music from its beginning, replacing any music
    /// already playing.
    fn restart_music(&mut self) {}
}

/// Tracks the most recently started sound.
///
/// Retriggering the same kind restarts it; a different kind is layered on top and the
/// earlier sound keeps playing until it ends.
pub struct SoundManager<B: Backend> {
    backend: B,
    playing: Option<(SoundEvent, B::Voice)>,
}

impl<B: Backend> SoundManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            playing: None,
        }
    }

    pub fn trigger(&mut self, kind: SoundEvent) {
        if let Some((last, voice)) = self.playing.take() {
            if last == kind {
                voice.stop();
            } else {
                voice.release();
            }
        }
        self.playing = self.backend.play(kind).map(|voice| (kind, voice));
    }

    /// Background music is independent of the cues: it is never interrupted by them.
    pub fn restart_music(&mut self) {
        self.backend.restart_music();
    }

    /// Kind of the most recently started sound, if one is tracked.
    pub fn playing(&self) -> Option<SoundEvent> {
        self.playing.as_ref().map(|(kind, _)| *kind)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

/// Voice type of [`SilentBackend`].
#[derive(Debug)]
pub enum NoVoice {}

impl Voice for NoVoice {
    fn stop(self) {
        match self {}
    }

    fn release(self) {
        match self {}
    }
}

impl Backend for SilentBackend {
    type Voice = NoVoice;

    fn play(&mut self, _kind: SoundEvent) -> Option<NoVoice> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        log: Log,
    }

    struct RecordingVoice {
        kind: SoundEvent,
        log: Log,
    }

    impl Voice for RecordingVoice {
        fn stop(self) {
            self.log.borrow_mut().push(format!("stop {}", self.kind.as_str()));
        }

        fn release(self) {
            self.log
                .borrow_mut()
                .push(format!("release {}", self.kind.as_str()));
        }
    }

    impl Backend for Recording {
        type Voice = RecordingVoice;

        fn play(&mut self, kind: SoundEvent) -> Option<RecordingVoice> {
            self.log.borrow_mut().push(format!("play {}", kind.as_str()));
            Some(RecordingVoice {
                kind,
                log: self.log.clone(),
            })
        }

        fn restart_music(&mut self) {
            self.log.borrow_mut().push("music".to_string());
        }
    }

    fn manager() -> (SoundManager<Recording>, Log) {
        let log = Log::default();
        (SoundManager::new(Recording { log: log.clone() }), log)
    }

    #[test]
    fn same_kind_restarts_the_sound() {
        let (mut sm, log) = manager();
        sm.trigger(SoundEvent::Move);
        sm.trigger(SoundEvent::Move);
        assert_eq!(*log.borrow(), ["play move", "stop move", "play move"]);
        assert_eq!(sm.playing(), Some(SoundEvent::Move));
    }

    #[test]
    fn different_kind_lets_the_previous_finish() {
        let (mut sm, log) = manager();
        sm.trigger(SoundEvent::Land);
        sm.trigger(SoundEvent::LineClear);
        assert_eq!(
            *log.borrow(),
            ["play land", "release land", "play lineClear"]
        );
        assert_eq!(sm.playing(), Some(SoundEvent::LineClear));
    }

    #[test]
    fn only_the_latest_sound_is_interruptible() {
        let (mut sm, log) = manager();
        sm.trigger(SoundEvent::Move);
        sm.trigger(SoundEvent::Rotate);
        sm.trigger(SoundEvent::Move);
        // The first move was released, so the third trigger cannot stop it.
        assert_eq!(
            *log.borrow(),
            [
                "play move",
                "release move",
                "play rotate",
                "release rotate",
                "play move"
            ]
        );
    }

    #[test]
    fn music_does_not_disturb_cues() {
        let (mut sm, log) = manager();
        sm.restart_music();
        sm.trigger(SoundEvent::Land);
        sm.restart_music();
        sm.trigger(SoundEvent::Land);
        assert_eq!(
            *log.borrow(),
            ["music", "play land", "music", "stop land", "play land"]
        );
    }

    #[test]
    fn silent_backend_tracks_nothing() {
        let mut sm = SoundManager::new(SilentBackend);
        sm.trigger(SoundEvent::Rotate);
        assert_eq!(sm.playing(), None);
    }
}
