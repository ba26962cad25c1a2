//! Command-line argument parsing.
//!
//! The grammar is word-based: one command, then any mix of option words
//! (chip, channels, sample rate) and file paths, in any order. Giving the
//! same kind of word twice is an error, and so is any word that is neither
//! an option nor the name of a readable file.

use std::path::Path;

use psg_core::ChipVariant;
use psg_playback::PlayerConfig;

/// Selected subcommand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit.
    Help,
    /// Play the files on the default audio device.
    #[default]
    Play,
    /// Render the files as raw f32 frames on stdout.
    Dump,
}

/// Argument grammar violation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    /// The same kind of word appeared twice.
    #[error("the {0} has already been given")]
    Duplicate(&'static str),

    /// A word that is neither an option nor a readable file.
    #[error("invalid argument <{0}>")]
    InvalidArgument(String),
}

/// Parsed command line.
#[derive(Debug)]
pub struct CliArgs {
    /// Subcommand to run.
    pub command: Command,
    /// Resolved playback configuration.
    pub config: PlayerConfig,
    /// Files to queue, in order of appearance.
    pub files: Vec<String>,
}

impl CliArgs {
    /// Parse the words following the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut command: Option<Command> = None;
        let mut chip: Option<ChipVariant> = None;
        let mut channels: Option<u16> = None;
        let mut sample_rate: Option<u32> = None;
        let mut files = Vec::new();

        for arg in args {
            match arg.as_str() {
                "help" => set_option(&mut command, Command::Help, "command")?,
                "play" => set_option(&mut command, Command::Play, "command")?,
                "dump" => set_option(&mut command, Command::Dump, "command")?,
                "ay8910" => set_option(&mut chip, ChipVariant::Ay8910, "chip type")?,
                "ay8912" => set_option(&mut chip, ChipVariant::Ay8912, "chip type")?,
                "ay8913" => set_option(&mut chip, ChipVariant::Ay8913, "chip type")?,
                "ym2149" => set_option(&mut chip, ChipVariant::Ym2149, "chip type")?,
                "mono" => set_option(&mut channels, 1, "number of channels")?,
                "stereo" => set_option(&mut channels, 2, "number of channels")?,
                "8000" => set_option(&mut sample_rate, 8_000, "sample rate")?,
                "11025" => set_option(&mut sample_rate, 11_025, "sample rate")?,
                "16000" => set_option(&mut sample_rate, 16_000, "sample rate")?,
                "22050" => set_option(&mut sample_rate, 22_050, "sample rate")?,
                "32000" => set_option(&mut sample_rate, 32_000, "sample rate")?,
                "44100" => set_option(&mut sample_rate, 44_100, "sample rate")?,
                "48000" => set_option(&mut sample_rate, 48_000, "sample rate")?,
                "96000" => set_option(&mut sample_rate, 96_000, "sample rate")?,
                _ if Path::new(&arg).is_file() => files.push(arg),
                _ => return Err(ArgsError::InvalidArgument(arg)),
            }
        }

        let mut config = PlayerConfig::default();
        if let Some(chip) = chip {
            config.chip = chip;
        }
        if let Some(channels) = channels {
            config.channels = channels;
        }
        if let Some(sample_rate) = sample_rate {
            config.sample_rate = sample_rate;
        }

        Ok(Self {
            command: command.unwrap_or_default(),
            config,
            files,
        })
    }

    /// Print the usage text.
    pub fn print_help() {
        eprintln!(
            "Usage: psg-player [command] [options] [files...]\n\n\
             Commands:\n\
             \x20 help                 Print this help\n\
             \x20 play                 Play files on the audio device (default)\n\
             \x20 dump                 Write raw f32 frames to stdout\n\n\
             Options (words, any order):\n\
             \x20 ay8910|ay8912|ay8913|ym2149   Chip variant (default ay8910)\n\
             \x20 mono|stereo                   Output channels (default stereo)\n\
             \x20 8000|11025|16000|22050|32000|44100|48000|96000\n\
             \x20                               Sample rate in Hz (default 44100)\n\n\
             Files: plain .ym dumps or their LHA-compressed containers.\n"
        );
    }
}

fn set_option<T>(slot: &mut Option<T>, value: T, what: &'static str) -> Result<(), ArgsError> {
    if slot.replace(value).is_some() {
        Err(ArgsError::Duplicate(what))
    } else {
        Ok(())
    }
}
