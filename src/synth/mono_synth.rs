use std::sync::Arc;

use crate::{
    dsp::{
        automation::AutomationCurve,
        envelope::Envelope,
        filter::SVFilter,
        oscillator::{cents_to_ratio, Oscillator, OscillatorWaveform},
    },
    engine::Clock,
    error::SynthError,
    graph::param::{Param, ParamView, Units},
    sequencing::{Note, Time},
    synth::{
        instrument::{Instrument, Output},
        monophonic::{self, Monophonic},
        options::MonoSynthOptions,
        voice::{Voice, VoiceInputs},
    },
    MAX_BLOCK_SIZE,
};

/*
MonoSynth
=========

The default voice: one oscillator through a lowpass filter whose cutoff is
swept by its own envelope.

    frequency ─┐
    detune ────┴→ [oscillator] → [filter] → [× envelope] → [volume] → out
                                    ↑
                  filter envelope ──┘  cutoff = base × 2^(octaves × level)

Both envelopes are automation curves. Attack starts both (the filter
envelope always at full level); release releases both.

The filter cutoff is evaluated once per block from the filter envelope's
average level over that block.
*/

/// Filter envelope: an envelope plus its cutoff mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterEnvelope {
    pub envelope: Envelope,
    pub base_frequency: f32,
    pub octaves: f32,
}

impl FilterEnvelope {
    /// Cutoff in Hz for an envelope level.
    #[inline]
    pub fn cutoff(&self, level: f32) -> f32 {
        self.base_frequency * 2.0_f32.powf(self.octaves * level)
    }
}

struct Parts {
    frequency: Param,
    detune: Param,
    amplitude: AutomationCurve,
    filter_level: AutomationCurve,
    oscillator: Oscillator,
    filter: SVFilter,
    output: Output,
    pitch: Vec<f32>,
    rendered: usize,
}

pub struct MonoSynth {
    clock: Arc<Clock>,
    portamento: f64,
    envelope: Envelope,
    filter_envelope: FilterEnvelope,
    parts: Option<Parts>,
}

impl MonoSynth {
    pub fn new(clock: Arc<Clock>, options: &MonoSynthOptions) -> Self {
        let envelope = options.envelope.resolve(&clock);
        let filter_envelope = FilterEnvelope {
            envelope: options.filter_envelope.shape().resolve(&clock),
            base_frequency: options
                .filter_envelope
                .base_frequency
                .to_hertz(clock.bpm(), clock.time_signature()),
            octaves: options.filter_envelope.octaves,
        };

        let parts = Parts {
            frequency: Param::new("frequency", Units::Hertz, 440.0),
            detune: Param::new("detune", Units::Cents, options.detune),
            amplitude: AutomationCurve::new(0.0),
            filter_level: AutomationCurve::new(0.0),
            oscillator: Oscillator::new(options.oscillator.waveform),
            filter: SVFilter::new(options.filter.filter_type, options.filter.q),
            output: Output::new(options.volume.unwrap_or(0.0)),
            pitch: vec![0.0; MAX_BLOCK_SIZE],
            rendered: 0,
        };

        Self {
            portamento: clock.seconds(options.portamento),
            clock,
            envelope,
            filter_envelope,
            parts: Some(parts),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn filter_envelope(&self) -> &FilterEnvelope {
        &self.filter_envelope
    }

    pub fn waveform(&self) -> Option<OscillatorWaveform> {
        self.parts.as_ref().map(|p| p.oscillator.waveform())
    }

    /// Amplitude envelope level at `time`.
    pub fn envelope_level(&self, time: f64) -> Result<f32, SynthError> {
        Ok(self.parts()?.amplitude.value_at(time))
    }

    /// Filter envelope level at `time`.
    pub fn filter_envelope_level(&self, time: f64) -> Result<f32, SynthError> {
        Ok(self.parts()?.filter_level.value_at(time))
    }

    fn parts(&self) -> Result<&Parts, SynthError> {
        self.parts.as_ref().ok_or(SynthError::Disposed)
    }

    fn parts_mut(&mut self) -> Result<&mut Parts, SynthError> {
        self.parts.as_mut().ok_or(SynthError::Disposed)
    }
}

impl Instrument for MonoSynth {
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
        let start = self.clock.current_time();
        let dt = 1.0 / self.clock.sample_rate() as f64;
        let inputs = VoiceInputs::default();

        for (i, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let offset = (i * MAX_BLOCK_SIZE) as f64 * dt;
            self.render_driven(chunk, &inputs, start + offset)?;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        if self.parts.take().is_none() {
            tracing::warn!("mono synth already disposed");
            return;
        }
        tracing::debug!("disposed mono synth");
    }

    fn is_disposed(&self) -> bool {
        self.parts.is_none()
    }
}

impl Monophonic for MonoSynth {
    fn frequency(&mut self) -> Result<ParamView<'_>, SynthError> {
        Ok(self.parts_mut()?.frequency.view())
    }

    fn portamento(&self) -> f64 {
        self.portamento
    }

    fn set_portamento(&mut self, seconds: f64) {
        self.portamento = seconds.max(0.0);
    }

    fn trigger_envelope_attack(&mut self, time: f64, velocity: f32) -> Result<(), SynthError> {
        self.trigger_amplitude_envelope_attack(time, velocity)?;
        self.trigger_filter_envelope_attack(time)
    }

    fn trigger_envelope_release(&mut self, time: f64) -> Result<(), SynthError> {
        let envelope = self.envelope;
        let filter_envelope = self.filter_envelope.envelope;
        let parts = self.parts_mut()?;

        envelope.trigger_release(&mut parts.amplitude, time)?;
        filter_envelope.trigger_release(&mut parts.filter_level, time)?;
        Ok(())
    }
}

impl Voice for MonoSynth {
    fn detune(&mut self) -> Result<ParamView<'_>, SynthError> {
        Ok(self.parts_mut()?.detune.view())
    }

    fn trigger_amplitude_envelope_attack(
        &mut self,
        time: f64,
        velocity: f32,
    ) -> Result<(), SynthError> {
        let envelope = self.envelope;
        envelope.trigger_attack(&mut self.parts_mut()?.amplitude, time, velocity)?;
        Ok(())
    }

    fn trigger_filter_envelope_attack(&mut self, time: f64) -> Result<(), SynthError> {
        let filter_envelope = self.filter_envelope.envelope;
        filter_envelope.trigger_attack(&mut self.parts_mut()?.filter_level, time, 1.0)?;
        Ok(())
    }

    fn render_driven(
        &mut self,
        out: &mut [f32],
        inputs: &VoiceInputs<'_>,
        start: f64,
    ) -> Result<(), SynthError> {
        let sample_rate = self.clock.sample_rate();
        let dt = 1.0 / sample_rate as f64;
        let filter_envelope = self.filter_envelope;
        let parts = self.parts.as_mut().ok_or(SynthError::Disposed)?;

        let len = out.len().min(MAX_BLOCK_SIZE);
        let out = &mut out[..len];

        for (i, hz) in parts.pitch[..len].iter_mut().enumerate() {
            let t = start + i as f64 * dt;
            let frequency = parts.frequency.value_at(t) + inputs.frequency_at(i);
            let detune = parts.detune.value_at(t) + inputs.detune_at(i);
            *hz = frequency * cents_to_ratio(detune);
        }
        parts.rendered = len;

        parts
            .oscillator
            .render(out, &parts.pitch[..len], sample_rate);

        if len > 0 {
            let level = (0..len)
                .map(|i| parts.filter_level.value_at(start + i as f64 * dt))
                .sum::<f32>()
                / len as f32;
            parts
                .filter
                .render(out, filter_envelope.cutoff(level), sample_rate);
        }

        for (i, sample) in out.iter_mut().enumerate() {
            *sample *= parts.amplitude.value_at(start + i as f64 * dt);
        }

        parts.output.process(out, start, sample_rate);

        parts.frequency.curve_mut().prune_before(start);
        parts.detune.curve_mut().prune_before(start);
        parts.amplitude.prune_before(start);
        parts.filter_level.prune_before(start);
        Ok(())
    }

    fn rendered_frequency(&self) -> &[f32] {
        match &self.parts {
            Some(parts) => &parts.pitch[..parts.rendered],
            None => &[],
        }
    }
}

impl std::fmt::Debug for MonoSynth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonoSynth")
            .field("portamento", &self.portamento)
            .field("envelope", &self.envelope)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::options::EnvelopeOptions;
    use crate::sequencing::TimeValue;

    fn running_clock() -> Arc<Clock> {
        let clock = Arc::new(Clock::new(48_000.0));
        clock.start();
        clock
    }

    #[test]
    fn test_attack_sets_pitch_and_opens_envelope() {
        let mut synth = MonoSynth::new(running_clock(), &MonoSynthOptions::default());
        synth
            .trigger_attack(Note::Midi(69), Some(Time::at(0.0)), Some(0.8))
            .unwrap();

        assert_eq!(synth.frequency().unwrap().value_at(0.0), 440.0);
        assert!((synth.envelope_level(0.01).unwrap() - 0.8).abs() < 1e-4);
        assert!((synth.filter_envelope_level(0.01).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_envelope_attacks_start_independently() {
        let mut synth = MonoSynth::new(running_clock(), &MonoSynthOptions::default());

        synth.trigger_amplitude_envelope_attack(0.0, 0.5).unwrap();
        assert!((synth.envelope_level(0.5).unwrap() - 0.5).abs() < 1e-4);
        assert_eq!(synth.filter_envelope_level(0.5).unwrap(), 0.0);

        synth.trigger_filter_envelope_attack(1.0).unwrap();
        assert!((synth.filter_envelope_level(1.5).unwrap() - 1.0).abs() < 1e-4);
        assert!((synth.envelope_level(1.5).unwrap() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_release_closes_both_envelopes() {
        let mut synth = MonoSynth::new(running_clock(), &MonoSynthOptions::default());
        synth
            .trigger_attack(Note::Midi(60), Some(Time::at(0.0)), None)
            .unwrap()
            .trigger_release(Some(Time::at(1.0)))
            .unwrap();

        // release keeps the pitch
        assert!((synth.frequency().unwrap().value_at(2.0) - 261.63).abs() < 0.01);
        assert_eq!(synth.envelope_level(1.5).unwrap(), 0.0);
        assert_eq!(synth.filter_envelope_level(1.5).unwrap(), 0.0);
    }

    #[test]
    fn test_renders_sound_while_gated() {
        let clock = running_clock();
        let mut synth = MonoSynth::new(clock.clone(), &MonoSynthOptions::default());
        synth
            .trigger_attack(Note::Midi(69), Some(Time::at(0.0)), None)
            .unwrap();

        let mut block = vec![0.0; 1_024];
        synth.render_block(&mut block).unwrap();
        clock.advance(block.len());
        synth.render_block(&mut block).unwrap();

        let peak = block.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.1, "expected audible output, peak {peak}");
        assert!(synth.rendered_frequency().iter().all(|&f| (f - 440.0).abs() < 1e-3));
    }

    #[test]
    fn test_driven_inputs_add_to_own_params() {
        let clock = running_clock();
        let mut synth = MonoSynth::new(clock, &MonoSynthOptions::default());
        synth.frequency().unwrap().set_value(0.0);

        let frequency = [220.0; 8];
        let detune = [1200.0; 8];
        let inputs = VoiceInputs {
            frequency: Some(&frequency),
            detune: Some(&detune),
        };

        let mut block = [0.0; 8];
        synth.render_driven(&mut block, &inputs, 0.0).unwrap();
        assert!(synth.rendered_frequency().iter().all(|&f| (f - 440.0).abs() < 1e-3));
    }

    #[test]
    fn test_options_resolve_against_clock() {
        let clock = Arc::new(Clock::new(48_000.0).with_bpm(60.0));
        let options = MonoSynthOptions {
            portamento: "8n".parse().unwrap(),
            envelope: EnvelopeOptions {
                release: TimeValue::Measures(1.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let synth = MonoSynth::new(clock, &options);
        assert!((synth.portamento() - 0.5).abs() < 1e-9);
        assert!((synth.envelope().release - 4.0).abs() < 1e-9);
        assert!((synth.filter_envelope().cutoff(1.0) - 25_600.0).abs() < 0.5);
    }

    #[test]
    fn test_dispose_is_terminal() {
        let mut synth = MonoSynth::new(running_clock(), &MonoSynthOptions::default());
        synth.dispose();

        assert!(synth.is_disposed());
        assert_eq!(
            synth.trigger_attack(Note::Midi(60), None, None).unwrap_err(),
            SynthError::Disposed
        );
        assert!(synth.frequency().is_err());
        assert!(synth.rendered_frequency().is_empty());

        // second dispose only warns
        synth.dispose();
        assert!(synth.is_disposed());
    }
}
