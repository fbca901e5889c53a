// src/settings.rs

pub const MIN_RATE: u32 = 50;
pub const MAX_RATE: u32 = 400;
pub const DEFAULT_RATE: u32 = 160;
pub const DEFAULT_VOLUME: f32 = 0.8;
pub const AUTO_VOICE: &str = "auto";

/// Speech parameters owned by the engine. Setters return a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rate: u32,
    pub volume: f32,
    pub voice: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            volume: DEFAULT_VOLUME,
            voice: AUTO_VOICE.to_string(),
        }
    }
}

impl Settings {
    pub fn with_rate(&self, rate: i64) -> Self {
        Self {
            rate: clamp_rate(rate),
            ..self.clone()
        }
    }

    pub fn with_volume(&self, volume: f32) -> Self {
        Self {
            volume: clamp_volume(volume),
            ..self.clone()
        }
    }

    pub fn with_voice(&self, name: &str) -> Self {
        Self {
            voice: name.to_string(),
            ..self.clone()
        }
    }

    pub fn volume_percent(&self) -> u32 {
        (self.volume * 100.0).round() as u32
    }
}

pub fn clamp_rate(rate: i64) -> u32 {
    rate.clamp(MIN_RATE as i64, MAX_RATE as i64) as u32
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_clamped_into_range() {
        let settings = Settings::default();
        assert_eq!(settings.with_rate(10).rate, 50);
        assert_eq!(settings.with_rate(1000).rate, 400);
        assert_eq!(settings.with_rate(200).rate, 200);
        assert_eq!(settings.with_rate(-3).rate, 50);
    }

    #[test]
    fn volume_is_clamped_into_range() {
        let settings = Settings::default();
        assert_eq!(settings.with_volume(-0.5).volume, 0.0);
        assert_eq!(settings.with_volume(2.0).volume, 1.0);
        assert_eq!(settings.with_volume(0.25).volume, 0.25);
        assert_eq!(settings.with_volume(f32::NAN).volume, 0.0);
    }

    #[test]
    fn setters_leave_other_fields_alone() {
        let settings = Settings::default().with_voice("Anna");
        let updated = settings.with_rate(300);
        assert_eq!(updated.voice, "Anna");
        assert_eq!(updated.volume, DEFAULT_VOLUME);
        assert_eq!(settings.rate, DEFAULT_RATE);
    }

    #[test]
    fn volume_percent_rounds() {
        assert_eq!(Settings::default().volume_percent(), 80);
        assert_eq!(Settings::default().with_volume(0.333).volume_percent(), 33);
        // percent input must read back unchanged
        for percent in [0, 7, 29, 57, 99, 100] {
            let volume = percent as f32 / 100.0;
            assert_eq!(Settings::default().with_volume(volume).volume_percent(), percent);
        }
    }
}
