#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    error::SynthError,
    sequencing::{Note, Time, TimeValue},
    synth::instrument::Instrument,
};

/// Trigger requests sent from a control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    Attack {
        note: Note,
        time: Option<Time>,
        velocity: Option<f32>,
    },
    Release {
        time: Option<Time>,
    },
    AttackRelease {
        note: Note,
        duration: TimeValue,
        time: Option<Time>,
        velocity: Option<f32>,
    },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Drain every pending message into `instrument`. Returns how many were applied.
///
/// Stops at the first rejected message. That message has already been popped,
/// so it is logged and dropped; messages behind it stay queued.
pub fn dispatch<I, R>(instrument: &mut I, rx: &mut R) -> Result<usize, SynthError>
where
    I: Instrument,
    R: MessageReceiver + ?Sized,
{
    let mut applied = 0;
    while let Some(message) = rx.pop() {
        if let Err(err) = apply(instrument, message) {
            tracing::warn!(?message, %err, "dropped control message");
            return Err(err);
        }
        applied += 1;
    }
    Ok(applied)
}

fn apply<I: Instrument>(instrument: &mut I, message: SynthMessage) -> Result<(), SynthError> {
    match message {
        SynthMessage::Attack {
            note,
            time,
            velocity,
        } => {
            instrument.trigger_attack(note, time, velocity)?;
        }
        SynthMessage::Release { time } => {
            instrument.trigger_release(time)?;
        }
        SynthMessage::AttackRelease {
            note,
            duration,
            time,
            velocity,
        } => {
            instrument.trigger_attack_release(note, duration, time, velocity)?;
        }
    }
    Ok(())
}
