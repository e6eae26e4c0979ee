use std::sync::Arc;

use crate::{
    dsp::amplify::sum_into,
    engine::Clock,
    error::SynthError,
    graph::{
        lfo::Lfo,
        node::{Inlet, NodeId},
        param::{Param, ParamView, Units},
        signal_graph::SignalGraph,
    },
    sequencing::{Note, Time},
    synth::{
        instrument::{Instrument, Output},
        mono_synth::MonoSynth,
        monophonic::{self, Monophonic},
        options::{DuoSynthOptions, DUO_VOICE_VOLUME_DB},
        voice::{Voice, VoiceInputs, VoiceView},
    },
    MAX_BLOCK_SIZE,
};

/*
DuoSynth
========

Two voices played as one monophonic instrument. voice0 sounds the note,
voice1 sounds the note times `harmonicity`, and one shared vibrato LFO
detunes both identically.

Signal Graph
------------

    frequency ─────────────────────────────→ voice0.frequency
        │
        └──→ [multiply] ─────────────────→ voice1.frequency
                 ↑
            harmonicity (1.5: a fifth up)

    vibrato lfo ──→ [gain] ──┬─────────────→ voice0.detune
     [-50, 50]        ↑      └─────────────→ voice1.detune
     rate 5 Hz    vibrato amount (0.5: ±25 cents)

    voice0 ──┐
             ├──→ [output: volume] ──→ out
    voice1 ──┘

The graph renders first each block; its port outputs are then fed into the
voices as driven inputs. Since both voices read the same detune buffer,
vibrato is always in phase across them.

The vibrato LFO starts at construction and runs for the synth's lifetime.
`vibrato_rate()` is not a copy: it is a view of the LFO's own rate.

Triggers
--------

    envelope attack   both voices' amplitude envelopes with velocity,
                      then both filter envelopes without velocity;
                      each envelope is started exactly once
    envelope release  both voices
    set_note          only the shared frequency; the graph carries it on

Dispose
-------

Tears down in a fixed order: voices, frequency, vibrato LFO, vibrato gain
(disconnected), harmonicity, vibrato amount, output. Whatever routing stages
remain are then dropped and the parts cleared.
*/

struct Nodes {
    frequency: NodeId,
    harmonicity: NodeId,
    multiply: NodeId,
    vibrato: NodeId,
    vibrato_amount: NodeId,
    vibrato_gain: NodeId,
    voice0_frequency: NodeId,
    voice1_frequency: NodeId,
    voice0_detune: NodeId,
    voice1_detune: NodeId,
}

struct Parts<V> {
    voice0: V,
    voice1: V,
    graph: SignalGraph,
    nodes: Nodes,
    output: Output,
    scratch: Vec<f32>,
}

pub struct DuoSynth<V: Voice = MonoSynth> {
    clock: Arc<Clock>,
    portamento: f64,
    vibrato_delay: f64,
    parts: Option<Parts<V>>,
}

impl DuoSynth<MonoSynth> {
    /// Build a duo synth with two `MonoSynth` voices.
    pub fn new(clock: Arc<Clock>, options: &DuoSynthOptions) -> Result<Self, SynthError> {
        let mut voice0 = options.voice0;
        voice0.volume.get_or_insert(DUO_VOICE_VOLUME_DB);
        let mut voice1 = options.voice1;
        voice1.volume.get_or_insert(DUO_VOICE_VOLUME_DB);

        let voice0 = MonoSynth::new(clock.clone(), &voice0);
        let voice1 = MonoSynth::new(clock.clone(), &voice1);
        Self::with_voices(clock, options, voice0, voice1)
    }
}

impl<V: Voice> DuoSynth<V> {
    /// Build a duo synth around two existing voices.
    ///
    /// The voices' own frequency and detune are zeroed: from here on the
    /// duo synth's graph drives them.
    pub fn with_voices(
        clock: Arc<Clock>,
        options: &DuoSynthOptions,
        mut voice0: V,
        mut voice1: V,
    ) -> Result<Self, SynthError> {
        for voice in [&mut voice0, &mut voice1] {
            voice.frequency()?.set_value(0.0);
            voice.detune()?.set_value(0.0);
        }

        let vibrato_rate = options
            .vibrato_rate
            .to_hertz(clock.bpm(), clock.time_signature());

        let mut graph = SignalGraph::new();
        let nodes = Nodes {
            frequency: graph.add_param("frequency", Param::new("frequency", Units::Hertz, 440.0)),
            harmonicity: graph.add_param(
                "harmonicity",
                Param::new("harmonicity", Units::Ratio, options.harmonicity),
            ),
            multiply: graph.add_multiply("harmonicity multiply"),
            vibrato: graph.add_lfo("vibrato", Lfo::sine(vibrato_rate, -50.0, 50.0, clock.now())),
            vibrato_amount: graph.add_param(
                "vibrato amount",
                Param::new("vibrato amount", Units::Gain, options.vibrato_amount),
            ),
            vibrato_gain: graph.add_gain("vibrato gain"),
            voice0_frequency: graph.add_port("voice0.frequency"),
            voice1_frequency: graph.add_port("voice1.frequency"),
            voice0_detune: graph.add_port("voice0.detune"),
            voice1_detune: graph.add_port("voice1.detune"),
        };

        graph.connect(nodes.frequency, nodes.voice0_frequency, Inlet::Signal)?;
        graph.connect(nodes.frequency, nodes.multiply, Inlet::Signal)?;
        graph.connect(nodes.harmonicity, nodes.multiply, Inlet::Control)?;
        graph.connect(nodes.multiply, nodes.voice1_frequency, Inlet::Signal)?;

        graph.connect(nodes.vibrato, nodes.vibrato_gain, Inlet::Signal)?;
        graph.connect(nodes.vibrato_amount, nodes.vibrato_gain, Inlet::Control)?;
        graph.connect(nodes.vibrato_gain, nodes.voice0_detune, Inlet::Signal)?;
        graph.connect(nodes.vibrato_gain, nodes.voice1_detune, Inlet::Signal)?;

        tracing::debug!(
            harmonicity = options.harmonicity,
            vibrato_rate,
            vibrato_amount = options.vibrato_amount,
            "built duo synth"
        );

        Ok(Self {
            portamento: clock.seconds(options.portamento),
            vibrato_delay: clock.seconds(options.vibrato_delay),
            parts: Some(Parts {
                voice0,
                voice1,
                graph,
                nodes,
                output: Output::new(options.volume),
                scratch: vec![0.0; MAX_BLOCK_SIZE],
            }),
            clock,
        })
    }

    pub fn voice0(&mut self) -> Result<VoiceView<'_, V>, SynthError> {
        Ok(VoiceView::new(&mut self.parts_mut()?.voice0))
    }

    pub fn voice1(&mut self) -> Result<VoiceView<'_, V>, SynthError> {
        Ok(VoiceView::new(&mut self.parts_mut()?.voice1))
    }

    /// voice1 / voice0 frequency ratio.
    pub fn harmonicity(&mut self) -> Result<ParamView<'_>, SynthError> {
        let parts = self.parts_mut()?;
        Ok(parts.graph.param_mut(parts.nodes.harmonicity)?.view())
    }

    /// Vibrato depth; 1.0 means the LFO's full ±50 cents.
    pub fn vibrato_amount(&mut self) -> Result<ParamView<'_>, SynthError> {
        let parts = self.parts_mut()?;
        Ok(parts.graph.param_mut(parts.nodes.vibrato_amount)?.view())
    }

    /// The vibrato LFO's own rate, in Hz.
    pub fn vibrato_rate(&mut self) -> Result<ParamView<'_>, SynthError> {
        let parts = self.parts_mut()?;
        Ok(parts.graph.lfo_mut(parts.nodes.vibrato)?.rate_mut().view())
    }

    /// Configured vibrato delay in seconds. Held but not scheduled.
    pub fn vibrato_delay(&self) -> f64 {
        self.vibrato_delay
    }

    /// Read-only view of the routing graph.
    pub fn graph(&self) -> Result<&SignalGraph, SynthError> {
        Ok(&self.parts()?.graph)
    }

    fn parts(&self) -> Result<&Parts<V>, SynthError> {
        self.parts.as_ref().ok_or(SynthError::Disposed)
    }

    fn parts_mut(&mut self) -> Result<&mut Parts<V>, SynthError> {
        self.parts.as_mut().ok_or(SynthError::Disposed)
    }

    fn render_chunk(
        parts: &mut Parts<V>,
        out: &mut [f32],
        start: f64,
        sample_rate: f32,
    ) -> Result<(), SynthError> {
        let len = out.len();
        let Parts {
            voice0,
            voice1,
            graph,
            nodes,
            output,
            scratch,
        } = parts;

        graph.render_block(start, sample_rate, len);

        let detune0 = graph.output(nodes.voice0_detune)?;
        let detune1 = graph.output(nodes.voice1_detune)?;
        let inputs0 = VoiceInputs {
            frequency: Some(graph.output(nodes.voice0_frequency)?),
            detune: Some(detune0),
        };
        let inputs1 = VoiceInputs {
            frequency: Some(graph.output(nodes.voice1_frequency)?),
            detune: Some(detune1),
        };

        voice0.render_driven(out, &inputs0, start)?;
        let mix = &mut scratch[..len];
        voice1.render_driven(mix, &inputs1, start)?;
        sum_into(out, mix);

        output.process(out, start, sample_rate);
        Ok(())
    }
}

/// Dispose voices and graph nodes in teardown order.
fn release_parts<V: Voice>(parts: &mut Parts<V>) -> Result<(), SynthError> {
    let Parts {
        voice0,
        voice1,
        graph,
        nodes,
        ..
    } = parts;

    voice0.dispose();
    voice1.dispose();

    graph.remove(nodes.frequency)?;
    graph.remove(nodes.vibrato)?;
    graph.disconnect(nodes.vibrato_gain);
    graph.remove(nodes.harmonicity)?;
    graph.remove(nodes.vibrato_amount)?;

    let remaining = graph.teardown();
    tracing::debug!(remaining, "released duo synth graph");
    Ok(())
}

impl<V: Voice> Instrument for DuoSynth<V> {
    fn clock(&self) -> &Arc<Clock> {
        &self.clock
    }

    fn volume(&mut self) -> Result<ParamView<'_>, SynthError> {
        Ok(self.parts_mut()?.output.volume_mut().view())
    }

    fn trigger_attack(
        &mut self,
        note: Note,
        time: Option<Time>,
        velocity: Option<f32>,
    ) -> Result<&mut Self, SynthError> {
        monophonic::trigger_attack(self, note, time, velocity)?;
        Ok(self)
    }

    fn trigger_release(&mut self, time: Option<Time>) -> Result<&mut Self, SynthError> {
        monophonic::trigger_release(self, time)?;
        Ok(self)
    }

    fn render_block(&mut self, out: &mut [f32]) -> Result<(), SynthError> {
        let sample_rate = self.clock.sample_rate();
        let start = self.clock.current_time();
        let dt = 1.0 / sample_rate as f64;
        let parts = self.parts.as_mut().ok_or(SynthError::Disposed)?;

        for (i, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let offset = (i * MAX_BLOCK_SIZE) as f64 * dt;
            Self::render_chunk(parts, chunk, start + offset, sample_rate)?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        let Some(mut parts) = self.parts.take() else {
            tracing::warn!("duo synth already disposed");
            return;
        };

        if let Err(err) = release_parts(&mut parts) {
            tracing::warn!(%err, "duo synth graph was not intact at dispose");
        }
        tracing::debug!("disposed duo synth");
    }

    fn is_disposed(&self) -> bool {
        self.parts.is_none()
    }
}

impl<V: Voice> Monophonic for DuoSynth<V> {
    fn frequency(&mut self) -> Result<ParamView<'_>, SynthError> {
        let parts = self.parts_mut()?;
        Ok(parts.graph.param_mut(parts.nodes.frequency)?.view())
    }

    fn portamento(&self) -> f64 {
        self.portamento
    }

    fn set_portamento(&mut self, seconds: f64) {
        self.portamento = seconds.max(0.0);
    }

    fn trigger_envelope_attack(&mut self, time: f64, velocity: f32) -> Result<(), SynthError> {
        let parts = self.parts_mut()?;
        parts.voice0.trigger_amplitude_envelope_attack(time, velocity)?;
        parts.voice1.trigger_amplitude_envelope_attack(time, velocity)?;
        parts.voice0.trigger_filter_envelope_attack(time)?;
        parts.voice1.trigger_filter_envelope_attack(time)?;
        Ok(())
    }

    fn trigger_envelope_release(&mut self, time: f64) -> Result<(), SynthError> {
        let parts = self.parts_mut()?;
        parts.voice0.trigger_envelope_release(time)?;
        parts.voice1.trigger_envelope_release(time)?;
        Ok(())
    }
}

impl<V: Voice> std::fmt::Debug for DuoSynth<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuoSynth")
            .field("portamento", &self.portamento)
            .field("vibrato_delay", &self.vibrato_delay)
            .field("graph", &self.parts.as_ref().map(|p| &p.graph))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::{Duration, TimeValue};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn clock() -> Arc<Clock> {
        let clock = Arc::new(Clock::new(SAMPLE_RATE));
        clock.start();
        clock
    }

    fn render(synth: &mut DuoSynth, clock: &Clock, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        synth.render_block(&mut out).unwrap();
        clock.advance(frames);
        out
    }

    #[test]
    fn test_attack_sets_both_voice_pitches() {
        let clock = clock();
        let mut synth = DuoSynth::new(clock.clone(), &DuoSynthOptions::default()).unwrap();
        synth.vibrato_amount().unwrap().set_value(0.0);
        synth
            .trigger_attack(Note::parse("A4").unwrap(), Some(Time::at(0.0)), None)
            .unwrap();

        render(&mut synth, &clock, 256);

        let v0 = synth.voice0().unwrap().rendered_frequency().to_vec();
        let v1 = synth.voice1().unwrap().rendered_frequency().to_vec();
        assert_eq!(v0.len(), 256);
        assert!(v0.iter().all(|&f| (f - 440.0).abs() < 1e-3));
        assert!(v1.iter().all(|&f| (f - 660.0).abs() < 1e-3));
    }

    #[test]
    fn test_harmonicity_holds_every_sample() {
        let clock = clock();
        let options = DuoSynthOptions {
            portamento: TimeValue::Seconds(0.05),
            ..Default::default()
        };
        let mut synth = DuoSynth::new(clock.clone(), &options).unwrap();
        synth.harmonicity().unwrap().set_value(0.75);

        synth
            .trigger_attack(Note::Midi(57), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_attack(Note::Midi(69), Some(Time::at(0.01)), None)
            .unwrap();

        for _ in 0..4 {
            render(&mut synth, &clock, 512);
            let v0 = synth.voice0().unwrap().rendered_frequency().to_vec();
            let v1 = synth.voice1().unwrap().rendered_frequency().to_vec();
            for (a, b) in v0.iter().zip(&v1) {
                assert!((b / a - 0.75).abs() < 1e-4, "{b} / {a}");
            }
        }
    }

    #[test]
    fn test_vibrato_detunes_both_voices_identically() {
        let clock = clock();
        let mut synth = DuoSynth::new(clock.clone(), &DuoSynthOptions::default()).unwrap();
        synth
            .trigger_attack(Note::Midi(69), Some(Time::at(0.0)), None)
            .unwrap();

        // 5 Hz over 0.25 s reaches both extremes
        let mut low = f32::MAX;
        let mut high = f32::MIN;
        for _ in 0..6 {
            render(&mut synth, &clock, 2_000);
            let v0 = synth.voice0().unwrap().rendered_frequency().to_vec();
            let v1 = synth.voice1().unwrap().rendered_frequency().to_vec();
            for (a, b) in v0.iter().zip(&v1) {
                let cents = 1200.0 * (a / 440.0).log2();
                let cents1 = 1200.0 * (b / 660.0).log2();
                assert!((cents - cents1).abs() < 1e-2);
                low = low.min(cents);
                high = high.max(cents);
            }
        }

        assert!(high <= 25.01 && high > 24.9, "high {high}");
        assert!(low >= -25.01 && low < -24.9, "low {low}");
    }

    #[test]
    fn test_vibrato_rate_is_the_lfo_rate() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        assert_eq!(synth.vibrato_rate().unwrap().value_at(0.0), 5.0);

        synth.vibrato_rate().unwrap().set_value(7.5);
        assert_eq!(synth.vibrato_rate().unwrap().value_at(0.0), 7.5);

        let parts = synth.parts().unwrap();
        let lfo = parts.graph.lfo(parts.nodes.vibrato).unwrap();
        assert_eq!(lfo.rate().value_at(0.0), 7.5);
    }

    #[test]
    fn test_portamento_glides_exponentially() {
        let clock = clock();
        let options = DuoSynthOptions {
            portamento: TimeValue::Seconds(0.2),
            ..Default::default()
        };
        let mut synth = DuoSynth::new(clock, &options).unwrap();
        synth
            .trigger_attack(Note::Midi(57), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_attack(Note::Midi(69), Some(Time::at(1.0)), None)
            .unwrap();

        let frequency = synth.frequency().unwrap();
        assert!((frequency.value_at(1.0) - 220.0).abs() < 1e-3);
        assert!((frequency.value_at(1.1) - 220.0 * 2.0_f32.sqrt()).abs() < 0.05);
        assert!((frequency.value_at(1.2) - 440.0).abs() < 1e-3);

        let mut previous = frequency.value_at(1.0);
        for step in 1..=20 {
            let value = frequency.value_at(1.0 + step as f64 * 0.01);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_zero_portamento_is_discrete() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        synth
            .trigger_attack(Note::Midi(57), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_attack(Note::Midi(69), Some(Time::at(1.0)), None)
            .unwrap();

        let frequency = synth.frequency().unwrap();
        assert_eq!(frequency.value_at(0.9999), 220.0);
        assert_eq!(frequency.value_at(1.0), 440.0);
    }

    #[test]
    fn test_attack_release_matches_separate_calls() {
        let options = DuoSynthOptions::default();
        let mut combined = DuoSynth::new(clock(), &options).unwrap();
        let mut separate = DuoSynth::new(clock(), &options).unwrap();

        combined
            .trigger_attack_release(
                Note::Midi(64),
                TimeValue::Note(Duration::QUARTER),
                Some(Time::at(0.5)),
                Some(0.7),
            )
            .unwrap();
        separate
            .trigger_attack(Note::Midi(64), Some(Time::at(0.5)), Some(0.7))
            .unwrap()
            .trigger_release(Some(Time::at(1.0)))
            .unwrap();

        for step in 0..40 {
            let t = step as f64 * 0.05;
            assert_eq!(
                combined.frequency().unwrap().value_at(t),
                separate.frequency().unwrap().value_at(t)
            );
            assert_eq!(
                combined.voice0().unwrap().envelope_level(t).unwrap(),
                separate.voice0().unwrap().envelope_level(t).unwrap()
            );
            assert_eq!(
                combined.voice1().unwrap().filter_envelope_level(t).unwrap(),
                separate.voice1().unwrap().filter_envelope_level(t).unwrap()
            );
        }
    }

    #[test]
    fn test_retrigger_during_release_holds_both_envelopes() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        synth
            .trigger_attack(Note::Midi(60), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_release(Some(Time::at(1.0)))
            .unwrap()
            .trigger_attack(Note::Midi(64), Some(Time::at(1.25)), None)
            .unwrap();

        for index in 0..2 {
            let voice = if index == 0 {
                synth.voice0().unwrap()
            } else {
                synth.voice1().unwrap()
            };
            // the release keeps its slope right up to the new attack
            for (t, level) in [(1.125, 0.75), (1.25, 0.5)] {
                assert!((voice.envelope_level(t).unwrap() - level).abs() < 1e-4);
                assert!((voice.filter_envelope_level(t).unwrap() - level).abs() < 1e-4);
            }
            // and the new attack climbs from there
            assert!((voice.envelope_level(1.3).unwrap() - 1.0).abs() < 1e-4);
            assert!((voice.filter_envelope_level(1.3).unwrap() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_repeated_attack_at_same_time_keeps_glide() {
        let options = DuoSynthOptions {
            portamento: TimeValue::Seconds(1.0),
            ..Default::default()
        };
        let mut synth = DuoSynth::new(clock(), &options).unwrap();
        synth
            .trigger_attack(Note::Midi(57), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_release(Some(Time::at(0.3)))
            .unwrap();

        let glide_before = synth.frequency().unwrap().value_at(0.25);
        let envelope_before = synth.voice0().unwrap().envelope_level(0.4).unwrap();

        for _ in 0..2 {
            synth
                .trigger_attack(Note::Midi(81), Some(Time::at(0.5)), None)
                .unwrap();
        }

        let frequency = synth.frequency().unwrap();
        assert!((frequency.value_at(0.25) - glide_before).abs() < 1e-3);
        assert!((frequency.value_at(0.5) - 440.0 * 0.5_f32.sqrt()).abs() < 0.05);
        assert!((frequency.value_at(1.5) - 880.0).abs() < 1e-2);

        let voice = synth.voice0().unwrap();
        assert!((voice.envelope_level(0.4).unwrap() - envelope_before).abs() < 1e-4);
        assert!((voice.filter_envelope_level(0.4).unwrap() - envelope_before).abs() < 1e-4);
    }

    #[test]
    fn test_filter_envelope_ignores_velocity() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        synth
            .trigger_attack(Note::Midi(60), Some(Time::at(0.0)), Some(0.25))
            .unwrap();

        let voice = synth.voice0().unwrap();
        assert!((voice.envelope_level(0.5).unwrap() - 0.25).abs() < 1e-4);
        assert!((voice.filter_envelope_level(0.5).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_voice_volume_defaults_to_minus_ten() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        assert_eq!(synth.voice0().unwrap().volume().unwrap().value_at(0.0), -10.0);
        assert_eq!(synth.volume().unwrap().value_at(0.0), 0.0);
        assert_eq!(synth.vibrato_delay(), 1.0);
    }

    #[test]
    fn test_graph_wiring() {
        let synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        let graph = synth.graph().unwrap();
        let nodes = &synth.parts().unwrap().nodes;

        assert_eq!(graph.len(), 10);
        assert_eq!(graph.edges().len(), 8);
        assert_eq!(graph.outputs(nodes.frequency).count(), 2);
        assert_eq!(graph.outputs(nodes.vibrato_gain).count(), 2);
        assert_eq!(graph.inputs(nodes.multiply).count(), 2);
    }

    #[test]
    fn test_release_parts_empties_graph() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        let mut parts = synth.parts.take().unwrap();

        release_parts(&mut parts).unwrap();

        assert!(parts.graph.is_empty());
        assert!(parts.graph.edges().is_empty());
        assert!(parts.voice0.is_disposed());
        assert!(parts.voice1.is_disposed());
    }

    #[test]
    fn test_use_after_dispose_fails() {
        let mut synth = DuoSynth::new(clock(), &DuoSynthOptions::default()).unwrap();
        synth.dispose();

        assert!(synth.is_disposed());
        assert_eq!(
            synth.trigger_attack(Note::Midi(60), None, None).unwrap_err(),
            SynthError::Disposed
        );
        assert_eq!(synth.trigger_release(None).unwrap_err(), SynthError::Disposed);
        assert!(synth.frequency().is_err());
        assert!(synth.harmonicity().is_err());
        assert!(synth.vibrato_amount().is_err());
        assert!(synth.vibrato_rate().is_err());
        assert!(synth.voice0().is_err());
        assert!(synth.graph().is_err());
        assert_eq!(
            synth.render_block(&mut [0.0; 16]).unwrap_err(),
            SynthError::Disposed
        );

        synth.dispose();
        assert!(synth.is_disposed());
    }
}
