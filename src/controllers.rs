//! Controller state held in the lookup tables.
//!
//! These are the values a capability handler reads and writes when the
//! engine asks to turn something on, change a mode, or set a range value.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("mode {0} is not supported")]
    UnknownMode(String),
    #[error("mode controller has no modes")]
    NoModes,
    #[error("invalid range: minimum {minimum} is above maximum {maximum}")]
    InvalidRange { minimum: f64, maximum: f64 },
}

/// On/off state for a power or toggle controller; starts off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolController {
    value: bool,
}

impl BoolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }
}

/// Ordered set of mode values plus the currently selected one.
///
/// The current mode is the first declared value until changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeController {
    modes: Vec<String>,
    current: usize,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mode; returns false when the value is already declared.
    pub fn add_mode(&mut self, mode: impl Into<String>) -> bool {
        let mode = mode.into();
        if self.modes.contains(&mode) {
            return false;
        }
        self.modes.push(mode);
        true
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn mode(&self) -> Option<&str> {
        self.modes.get(self.current).map(String::as_str)
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), ControllerError> {
        let idx = self
            .modes
            .iter()
            .position(|candidate| candidate == mode)
            .ok_or_else(|| ControllerError::UnknownMode(mode.to_string()))?;
        self.current = idx;
        Ok(())
    }

    /// Move through the declared order by `delta`, stopping at either end.
    pub fn adjust_mode(&mut self, delta: i32) -> Result<&str, ControllerError> {
        if self.modes.is_empty() {
            return Err(ControllerError::NoModes);
        }
        let last = self.modes.len() - 1;
        let target = (self.current as i64 + i64::from(delta)).clamp(0, last as i64);
        self.current = target as usize;
        Ok(&self.modes[self.current])
    }
}

/// Numeric `[minimum, maximum]` interval with a current value.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeController {
    minimum: f64,
    maximum: f64,
    value: f64,
}

impl RangeController {
    /// Create a controller whose value starts at `minimum`.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self, ControllerError> {
        // NaN bounds fail this comparison too.
        if !(minimum <= maximum) {
            return Err(ControllerError::InvalidRange { minimum, maximum });
        }
        Ok(Self {
            minimum,
            maximum,
            value: minimum,
        })
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value, clamped into range; returns the stored value.
    pub fn set_value(&mut self, value: f64) -> f64 {
        if !value.is_nan() {
            self.value = value.clamp(self.minimum, self.maximum);
        }
        self.value
    }

    pub fn adjust_value(&mut self, delta: f64) -> f64 {
        self.set_value(self.value + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_controller_starts_off() {
        let mut controller = BoolController::new();
        assert!(!controller.value());
        controller.set_value(true);
        assert!(controller.value());
    }

    #[test]
    fn mode_controller_tracks_declared_order() {
        let mut controller = ModeController::new();
        assert_eq!(controller.mode(), None);
        assert!(controller.add_mode("LOW"));
        assert!(controller.add_mode("MEDIUM"));
        assert!(controller.add_mode("HIGH"));
        assert!(!controller.add_mode("LOW"));
        assert_eq!(controller.modes(), ["LOW", "MEDIUM", "HIGH"]);
        assert_eq!(controller.mode(), Some("LOW"));

        controller.set_mode("HIGH").unwrap();
        assert_eq!(controller.adjust_mode(-1).unwrap(), "MEDIUM");
        assert_eq!(controller.adjust_mode(5).unwrap(), "HIGH");
        assert_eq!(controller.adjust_mode(-9).unwrap(), "LOW");
    }

    #[test]
    fn mode_controller_rejects_unknown_values() {
        let mut controller = ModeController::new();
        assert_eq!(controller.adjust_mode(1), Err(ControllerError::NoModes));
        controller.add_mode("AUTO");
        assert_eq!(
            controller.set_mode("TURBO"),
            Err(ControllerError::UnknownMode("TURBO".to_string()))
        );
        assert_eq!(controller.mode(), Some("AUTO"));
    }

    #[test]
    fn range_controller_clamps() {
        let mut controller = RangeController::new(60.0, 90.0).unwrap();
        assert_eq!(controller.value(), 60.0);
        assert_eq!(controller.set_value(72.0), 72.0);
        assert_eq!(controller.adjust_value(40.0), 90.0);
        assert_eq!(controller.adjust_value(-100.0), 60.0);
        assert_eq!(controller.set_value(f64::NAN), 60.0);
    }

    #[test]
    fn range_controller_rejects_inverted_bounds() {
        assert_eq!(
            RangeController::new(3.0, 1.0),
            Err(ControllerError::InvalidRange {
                minimum: 3.0,
                maximum: 1.0
            })
        );
        assert!(RangeController::new(f64::NAN, 1.0).is_err());
    }
}
