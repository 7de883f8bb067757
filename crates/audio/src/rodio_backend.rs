//! rodio output with synthesized cues and a looping background tune.

use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, Source};

use falling_blocks_types::SoundEvent;

use crate::manager::{Backend, Voice};

const SAMPLE_RATE: u32 = 44_100;
const VOLUME: f32 = 0.2;
const MUSIC_VOLUME: f32 = 0.3;

/// Background tune: (frequency in Hz, length in beats). 0 Hz is a rest.
const TUNE: [(f32, f32); 22] = [
    (659.3, 1.0),
    (493.9, 0.5),
    (523.3, 0.5),
    (587.3, 1.0),
    (523.3, 0.5),
    (493.9, 0.5),
    (440.0, 1.0),
    (440.0, 0.5),
    (523.3, 0.5),
    (659.3, 1.0),
    (587.3, 0.5),
    (523.3, 0.5),
    (493.9, 1.5),
    (523.3, 0.5),
    (587.3, 1.0),
    (659.3, 1.0),
    (523.3, 1.0),
    (440.0, 1.0),
    (440.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
];
const BEAT_SECS: f32 = 0.3;

pub struct RodioBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    cues: [Vec<f32>; 4],
    tune: Vec<f32>,
    music: Option<Sink>,
}

impl RodioBackend {
    pub fn open() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            cues: [
                tone(&[660.0], 0.04),
                tone(&[880.0], 0.06),
                tone(&[220.0], 0.10),
                tone(&[523.0, 659.0, 784.0, 1047.0], 0.32),
            ],
            tune: melody(&TUNE),
            music: None,
        })
    }
}

impl Backend for RodioBackend {
    type Voice = Sink;

    fn play(&mut self, kind: SoundEvent) -> Option<Sink> {
        let idx = match kind {
            SoundEvent::Move => 0,
            SoundEvent::Rotate => 1,
            SoundEvent::Land => 2,
            SoundEvent::LineClear => 3,
        };
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("audio: cannot start {}: {err}", kind.as_str());
                return None;
            }
        };
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.cues[idx].clone()));
        Some(sink)
    }

    fn restart_music(&mut self) {
        if let Some(old) = self.music.take() {
            old.stop();
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                let tune = SamplesBuffer::new(1, SAMPLE_RATE, self.tune.clone());
                sink.set_volume(MUSIC_VOLUME);
                sink.append(tune.repeat_infinite());
                self.music = Some(sink);
            }
            Err(err) => log::warn!("audio: cannot start music: {err}"),
        }
    }
}

impl Voice for Sink {
    fn stop(self) {
        Sink::stop(&self);
    }

    fn release(self) {
        self.detach();
    }
}

/// Square-ish tone stepping through `notes` over `duration` seconds with a linear fade.
fn tone(notes: &[f32], duration: f32) -> Vec<f32> {
    let total = (SAMPLE_RATE as f32 * duration) as usize;
    let per_note = (total / notes.len().max(1)).max(1);
    (0..total)
        .map(|i| {
            let freq = notes[(i / per_note).min(notes.len() - 1)];
            let t = i as f32 / SAMPLE_RATE as f32;
            let phase = (t * freq).fract();
            let wave = if phase < 0.5 { 1.0 } else { -1.0 };
            let fade = 1.0 - i as f32 / total as f32;
            wave * fade * VOLUME
        })
        .collect()
}

/// Notes played back to back, each decaying so consecutive notes stay distinct.
fn melody(notes: &[(f32, f32)]) -> Vec<f32> {
    let mut samples = Vec::new();
    for &(freq, beats) in notes {
        let len = (SAMPLE_RATE as f32 * BEAT_SECS * beats) as usize;
        samples.extend((0..len).map(|i| {
            if freq <= 0.0 {
                return 0.0;
            }
            let t = i as f32 / SAMPLE_RATE as f32;
            let wave = if (t * freq).fract() < 0.5 { 1.0 } else { -1.0 };
            let decay = 1.0 - 0.7 * i as f32 / len as f32;
            wave * decay * VOLUME
        }));
    }
    samples
}
