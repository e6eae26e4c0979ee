//! duo - plays a short phrase on the duo synth
//!
//! Run with: cargo run --bin duo

mod app;

use app::Player;
use duo_synth::{sequencing::Duration, DuoSynthOptions, Note};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let phrase = ["C4", "Eb4", "G4", "F4", "Eb4", "C4", "G3", "C4"];
    let mut player = Player::new()
        .bpm(96.0)
        .options(DuoSynthOptions::gliding_fifth());

    for (i, name) in phrase.iter().enumerate() {
        let step = if i % 4 == 3 {
            Duration::QUARTER
        } else {
            Duration::EIGHTH
        };
        player = player.note(Note::parse(name)?, step);
    }

    player.run()
}
