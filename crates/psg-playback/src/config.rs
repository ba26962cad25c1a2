//! Playback configuration.

use psg_core::ChipVariant;

/// Settings the player resolves before building its processor and device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Chip variant to emulate.
    pub chip: ChipVariant,
    /// Output channel count, 1 (mono) or 2 (stereo).
    pub channels: u16,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            chip: ChipVariant::Ay8910,
            channels: 2,
            sample_rate: 44_100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_stereo_cd_quality() {
        let config = PlayerConfig::default();
        assert_eq!(config.channels, 2);
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.chip, ChipVariant::Ay8910);
    }
}
