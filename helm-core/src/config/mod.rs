//! Configuration types
//!
//! Board-agnostic robot configuration with range checks. Loading from a
//! file is left to the binary that owns the filesystem.

pub mod types;

pub use types::*;

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Wheel diameter or gear teeth not positive
    InvalidGeometry,
    /// Track width not positive
    InvalidTrackWidth,
    /// Speed outside 0..=100 percent
    InvalidSpeed,
    /// Watcher poll interval of zero
    ZeroPollInterval,
    /// Autonomous period of zero
    ZeroPeriod,
    /// Telemetry interval of zero
    ZeroTelemetryInterval,
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn percent(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

impl DriveConfig {
    /// Check geometry and speed ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        if !positive(g.wheel_diameter_in) || !positive(g.driving_gear) || !positive(g.driven_gear)
        {
            return Err(ConfigError::InvalidGeometry);
        }
        if !positive(self.track_width_in) {
            return Err(ConfigError::InvalidTrackWidth);
        }
        if !percent(self.drive_speed_pct)
            || !percent(self.turn_speed_pct)
            || !percent(self.arc_turn_speed_pct)
        {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }
}

impl RobotConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drive.validate()?;
        if self.watch.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.auton.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.auton.telemetry_interval_ms == 0 {
            return Err(ConfigError::ZeroTelemetryInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(RobotConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_drive_matches_competition_setup() {
        let drive = DriveConfig::default();
        assert_eq!(drive.geometry.wheel_diameter_in, 3.25);
        assert_eq!(drive.arc_turn_speed_pct, 40.0);
        assert_eq!(drive.drive_pid.settle_time_ms, 125);
        assert_eq!(RobotConfig::default().watch.poll_interval_ms, 20);
    }

    #[test]
    fn test_rejects_zero_wheel() {
        let mut config = RobotConfig::default();
        config.drive.geometry.wheel_diameter_in = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGeometry));

        config.drive.geometry.wheel_diameter_in = f64::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidGeometry));
    }

    #[test]
    fn test_rejects_speed_over_100() {
        let mut config = RobotConfig::default();
        config.drive.turn_speed_pct = 120.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed));
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let mut config = RobotConfig::default();
        config.watch.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        let mut config = RobotConfig::default();
        config.auton.telemetry_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTelemetryInterval));
    }
}
