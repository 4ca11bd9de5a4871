//! Quantization between human units and the 0-127 value space of the console.

use crate::command::{UfxKey, UfxUnitScale};

pub const PREAMP_GAIN_MIN_DB: f64 = 5.0;
pub const PREAMP_GAIN_MAX_DB: f64 = 60.0;
pub const EQ_GAIN_MIN_DB: f64 = -15.0;
pub const EQ_GAIN_MAX_DB: f64 = 15.0;

pub const FREQUENCY_BASE_HZ: f64 = 20.0;
/// 20 Hz to 20 kHz
pub const EQ_FREQUENCY_SPAN: f64 = 1000.0;
/// 20 Hz to 2 kHz
pub const HPF_FREQUENCY_SPAN: f64 = 100.0;

pub const EQ_WIDTH_MIN: f64 = 0.1;
pub const EQ_WIDTH_MAX: f64 = 1.5;

const MAX_VALUE: f64 = 127.0;

/// Filter widths in octaves, indexed by their wire value.
const EQ_WIDTHS: [f64; 25] = [
    1.5,
    1.4,
    1.3,
    1.2,
    1.1,
    1.0,
    0.95,
    0.9,
    0.85,
    0.8,
    0.75,
    0.7,
    2.0 / 3.0,
    0.6,
    0.55,
    0.5,
    0.45,
    0.4,
    1.0 / 3.0,
    0.3,
    0.25,
    0.2,
    1.0 / 6.0,
    0.13,
    1.0 / 9.0,
];

const UFX_UNIT_KEY_VALUES: [u8; 12] = [5, 16, 26, 37, 47, 58, 69, 79, 90, 100, 111, 122];

fn to_seven_bits(value: f64) -> u8 {
    return value.round().clamp(0.0, MAX_VALUE) as u8;
}

/// Linear dB gain to a wire value.
///
/// # Arguments
/// * `gain` - gain in dB
/// * `min` - gain mapped to 0
/// * `max` - gain mapped to 127
pub fn db_gain_to_midi(gain: f64, min: f64, max: f64) -> u8 {
    to_seven_bits((gain - min) / (max - min) * MAX_VALUE)
}

pub fn preamp_gain_to_midi(gain: f64) -> u8 {
    db_gain_to_midi(gain, PREAMP_GAIN_MIN_DB, PREAMP_GAIN_MAX_DB)
}

pub fn eq_gain_to_midi(gain: f64) -> u8 {
    db_gain_to_midi(gain, EQ_GAIN_MIN_DB, EQ_GAIN_MAX_DB)
}

/// Wire value to frequency on a logarithmic scale starting at 20 Hz.
///
/// # Arguments
/// * `value` - wire value 0-127
/// * `span` - ratio between the highest and the lowest frequency
pub fn midi_to_frequency(value: u8, span: f64) -> u32 {
    let exponent = value.min(127) as f64 / MAX_VALUE;
    return (FREQUENCY_BASE_HZ * span.powf(exponent)).round() as u32;
}

/// Inverse of [`midi_to_frequency`]; frequencies outside the span clamp to its ends.
pub fn frequency_to_midi(frequency: f64, span: f64) -> u8 {
    if frequency <= FREQUENCY_BASE_HZ {
        return 0;
    }
    to_seven_bits(MAX_VALUE * (frequency / FREQUENCY_BASE_HZ).ln() / span.ln())
}

pub fn eq_frequency_to_midi(frequency: f64) -> u8 {
    frequency_to_midi(frequency, EQ_FREQUENCY_SPAN)
}

pub fn hpf_frequency_to_midi(frequency: f64) -> u8 {
    frequency_to_midi(frequency, HPF_FREQUENCY_SPAN)
}

/// Nearest entry of the width table. Ties keep the wider entry.
pub fn eq_width_to_midi(width: f64) -> u8 {
    let mut best = 0;
    let mut best_distance = f64::MAX;
    for (i, candidate) in EQ_WIDTHS.iter().enumerate() {
        let distance = (width - candidate).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    return best as u8;
}

pub fn ufx_unit_key_value(key: UfxKey) -> u8 {
    UFX_UNIT_KEY_VALUES[u8::from(key) as usize]
}

pub fn ufx_unit_scale_value(scale: UfxUnitScale) -> u8 {
    match scale {
        UfxUnitScale::Major => 21,
        UfxUnitScale::Minor => 63,
        UfxUnitScale::Chromatic => 106,
    }
}

/// Fader position as shown on the surface: 107 is 0 dB, every step is 0.5 dB.
pub fn fader_level_label(level: u8) -> String {
    if level == 0 {
        return "-INF dB".to_string();
    }
    let db = (level as f64 - 107.0) / 2.0;
    if level > 107 {
        format!("+{:.1} dB", db)
    } else {
        format!("{:.1} dB", db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_gain_bounds() {
        assert_eq!(preamp_gain_to_midi(5.0), 0);
        assert_eq!(preamp_gain_to_midi(60.0), 127);
        assert_eq!(eq_gain_to_midi(-15.0), 0);
        assert_eq!(eq_gain_to_midi(0.0), 64);
        assert_eq!(eq_gain_to_midi(15.0), 127);
    }

    #[test]
    fn test_db_gain_is_monotonic() {
        let mut previous = 0;
        let mut gain = EQ_GAIN_MIN_DB;
        while gain <= EQ_GAIN_MAX_DB {
            let value = eq_gain_to_midi(gain);
            assert!(value >= previous, "{} dB", gain);
            previous = value;
            gain += 0.5;
        }
    }

    #[test]
    fn test_db_gain_clamps() {
        assert_eq!(preamp_gain_to_midi(0.0), 0);
        assert_eq!(preamp_gain_to_midi(80.0), 127);
    }

    #[test]
    fn test_eq_width() {
        assert_eq!(eq_width_to_midi(1.51), 0);
        assert_eq!(eq_width_to_midi(1.5), 0);
        assert_eq!(eq_width_to_midi(1.11), 4);
        assert_eq!(eq_width_to_midi(0.51), 15);
        assert_eq!(eq_width_to_midi(0.1), 24);
        assert_eq!(eq_width_to_midi(0.0), 24);
        assert_eq!(eq_width_to_midi(2.0 / 3.0), 12);
    }

    #[test]
    fn test_eq_width_tie_keeps_lower_index() {
        // exactly between 1.3 and 1.2
        assert_eq!(eq_width_to_midi(1.25), 2);
    }

    #[test]
    fn test_eq_width_is_inversely_monotonic() {
        let mut previous = 0;
        for i in 0..=150 {
            let value = eq_width_to_midi(1.5 - i as f64 * 0.01);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_midi_to_frequency() {
        assert_eq!(midi_to_frequency(0, EQ_FREQUENCY_SPAN), 20);
        assert_eq!(midi_to_frequency(0, HPF_FREQUENCY_SPAN), 20);
        assert_eq!(midi_to_frequency(127, EQ_FREQUENCY_SPAN), 20000);
        assert_eq!(midi_to_frequency(127, HPF_FREQUENCY_SPAN), 2000);
        let mid = midi_to_frequency(72, EQ_FREQUENCY_SPAN);
        assert!((1003..=1005).contains(&mid), "{}", mid);
    }

    #[test]
    fn test_frequency_to_midi() {
        assert_eq!(eq_frequency_to_midi(20.0), 0);
        assert_eq!(eq_frequency_to_midi(10.0), 0);
        assert_eq!(eq_frequency_to_midi(20000.0), 127);
        assert_eq!(eq_frequency_to_midi(1004.0), 72);
        assert_eq!(hpf_frequency_to_midi(2000.0), 127);
        assert_eq!(hpf_frequency_to_midi(5000.0), 127);
    }

    #[test]
    fn test_frequency_round_trip_is_stable() {
        for value in 0..=127u8 {
            let frequency = midi_to_frequency(value, EQ_FREQUENCY_SPAN);
            assert_eq!(eq_frequency_to_midi(frequency as f64), value);
        }
    }

    #[test]
    fn test_ufx_unit_lookups() {
        assert_eq!(ufx_unit_key_value(UfxKey::C), 5);
        assert_eq!(ufx_unit_key_value(UfxKey::FSharp), 69);
        assert_eq!(ufx_unit_key_value(UfxKey::B), 122);
        assert_eq!(ufx_unit_scale_value(UfxUnitScale::Major), 21);
        assert_eq!(ufx_unit_scale_value(UfxUnitScale::Minor), 63);
        assert_eq!(ufx_unit_scale_value(UfxUnitScale::Chromatic), 106);
    }

    #[test]
    fn test_fader_level_label() {
        assert_eq!(fader_level_label(0), "-INF dB");
        assert_eq!(fader_level_label(1), "-53.0 dB");
        assert_eq!(fader_level_label(106), "-0.5 dB");
        assert_eq!(fader_level_label(107), "0.0 dB");
        assert_eq!(fader_level_label(127), "+10.0 dB");
    }
}
