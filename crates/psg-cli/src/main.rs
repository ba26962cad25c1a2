//! Command-line AY/YM chiptune player.
//!
//! Word-based interface: `psg-player [help|play|dump] [chip] [channels]
//! [rate] files...`. Playback uses the default audio device; dump mode
//! writes raw interleaved f32 frames to stdout for piping into other
//! tools.

mod args;

use std::process::ExitCode;

use args::{CliArgs, Command};
use psg_playback::{Player, PlaylistCursor};

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    match args.command {
        Command::Help => {
            CliArgs::print_help();
            Ok(())
        }
        Command::Play => {
            log::debug!("playing {} file(s)", args.files.len());
            build_player(&args).play()?;
            Ok(())
        }
        Command::Dump => {
            build_player(&args).dump()?;
            Ok(())
        }
    }
}

fn build_player(args: &CliArgs) -> Player {
    let mut playlist = PlaylistCursor::new();
    for file in &args.files {
        playlist.add(file);
    }
    Player::new(args.config, playlist)
}
