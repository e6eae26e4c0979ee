//! Player - builds a duo synth, opens the output device and plays a phrase

use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration as StdDuration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};

use duo_synth::{
    sequencing::{Duration, TimeValue},
    synth::{dispatch, SynthMessage},
    Clock, DuoSynth, DuoSynthOptions, Instrument, Note, MAX_BLOCK_SIZE,
};

/// Seconds between "now" on the control thread and the audio actually rendered.
const LOOKAHEAD: f64 = 0.05;

pub struct Player {
    bpm: f64,
    options: DuoSynthOptions,
    phrase: Vec<(Note, Duration)>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            options: DuoSynthOptions::default(),
            phrase: Vec::new(),
        }
    }

    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn options(mut self, options: DuoSynthOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a note held for `step`.
    pub fn note(mut self, note: Note, step: Duration) -> Self {
        self.phrase.push((note, step));
        self
    }

    /// Open the default output device and play the phrase once.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let clock = Arc::new(
            Clock::new(sample_rate)
                .with_bpm(self.bpm)
                .with_lookahead(LOOKAHEAD),
        );
        let synth = DuoSynth::new(clock.clone(), &self.options)
            .wrap_err("failed to build duo synth")?;

        tracing::info!(sample_rate, channels, bpm = self.bpm, "playing");

        let (mut tx, rx) = RingBuffer::<SynthMessage>::new(64);
        let state = Arc::new(Mutex::new(AudioState { synth, rx }));

        let audio_state = state.clone();
        let audio_clock = clock.clone();
        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut state) = audio_state.lock() else {
                    data.fill(0.0);
                    return;
                };
                let AudioState { synth, rx } = &mut *state;

                if let Err(err) = dispatch(synth, rx) {
                    tracing::error!(%err, "dropped control message");
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let out = &mut block[..frames];

                    if synth.render_block(out).is_err() {
                        out.fill(0.0);
                    }
                    audio_clock.advance(frames);

                    // mono to all channels
                    let offset = frames_written * channels;
                    for (i, &sample) in out.iter().enumerate() {
                        let frame = offset + i * channels;
                        data[frame..frame + channels].fill(sample);
                    }

                    frames_written += frames;
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;

        clock.start();
        stream.play()?;

        for (note, step) in &self.phrase {
            let seconds = clock.seconds(TimeValue::Note(*step));
            tx.push(SynthMessage::AttackRelease {
                note: *note,
                duration: TimeValue::Seconds(seconds * 0.9),
                time: None,
                velocity: Some(0.8),
            })
            .map_err(|_| eyre!("control queue full"))?;

            thread::sleep(StdDuration::from_secs_f64(seconds));
        }

        // let the last release ring out
        thread::sleep(StdDuration::from_secs_f64(1.0));
        clock.stop();

        let mut state = state
            .lock()
            .map_err(|_| eyre!("audio thread panicked"))?;
        state.synth.dispose();
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared audio state
struct AudioState {
    synth: DuoSynth,
    rx: Consumer<SynthMessage>,
}
