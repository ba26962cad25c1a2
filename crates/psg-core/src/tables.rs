//! DAC lookup tables measured from real hardware.
//!
//! Both tables map a 5-bit level to a normalised output voltage. The AY
//! family only resolves 16 volume steps, so its table duplicates each step
//! across two adjacent entries; the YM2149 resolves the full 32 steps.

/// AY-3-8910/8912/8913 output ladder (16 steps, pair-duplicated).
pub const AY_DAC: [f32; 32] = [
    0.000_000_0, 0.000_000_0, 0.009_994_7, 0.009_994_7,
    0.014_450_3, 0.014_450_3, 0.021_057_5, 0.021_057_5,
    0.030_701_2, 0.030_701_2, 0.045_548_2, 0.045_548_2,
    0.064_499_9, 0.064_499_9, 0.107_362_5, 0.107_362_5,
    0.126_588_8, 0.126_588_8, 0.204_989_7, 0.204_989_7,
    0.292_210_3, 0.292_210_3, 0.372_838_9, 0.372_838_9,
    0.492_530_7, 0.492_530_7, 0.635_324_6, 0.635_324_6,
    0.805_584_8, 0.805_584_8, 1.000_000_0, 1.000_000_0,
];

/// YM2149 output ladder (native 32 steps).
pub const YM_DAC: [f32; 32] = [
    0.000_000_0, 0.000_000_0, 0.004_654_0, 0.007_721_1,
    0.010_956_0, 0.013_962_0, 0.016_998_6, 0.020_019_8,
    0.024_368_7, 0.029_694_1, 0.035_065_2, 0.040_390_6,
    0.048_538_9, 0.058_335_2, 0.068_055_2, 0.077_775_2,
    0.092_515_4, 0.111_085_7, 0.129_747_5, 0.148_485_5,
    0.176_669_0, 0.211_551_1, 0.246_387_4, 0.281_101_7,
    0.333_730_1, 0.400_427_3, 0.467_383_8, 0.534_432_0,
    0.635_172_0, 0.758_007_2, 0.879_926_8, 1.000_000_0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dac_endpoints() {
        for dac in [&AY_DAC, &YM_DAC] {
            assert_eq!(dac[0], 0.0);
            assert_eq!(dac[31], 1.0);
        }
    }

    #[test]
    fn dac_tables_are_monotonic() {
        for dac in [&AY_DAC, &YM_DAC] {
            for pair in dac.windows(2) {
                assert!(pair[0] <= pair[1]);
            }
        }
    }

    #[test]
    fn ay_dac_duplicates_pairs() {
        for step in 0..16 {
            assert_eq!(AY_DAC[step * 2], AY_DAC[step * 2 + 1]);
        }
    }
}
