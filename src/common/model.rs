// src/common/model.rs

use core::fmt;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// The model selected when configuration does not name one (a 10-meter sensor).
pub const DEFAULT_MODEL: &str = "MB7363";

/// Unit of the value a sensor puts on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LengthUnit {
    Millimeter,
    Inch,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Millimeter => write!(f, "mm"),
            LengthUnit::Inch => write!(f, "inch"),
        }
    }
}

/// Physical and protocol parameters of one sensor model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SensorModel {
    pub id: &'static str,
    pub native_unit: LengthUnit,
    /// Value reported when nothing is in range.
    pub no_target_value: u32,
    /// Digits between the `R` marker and the terminator.
    pub frame_digits: usize,
}

impl SensorModel {
    const fn new(
        id: &'static str,
        native_unit: LengthUnit,
        no_target_value: u32,
        frame_digits: usize,
    ) -> Self {
        SensorModel {
            id,
            native_unit,
            no_target_value,
            frame_digits,
        }
    }

    /// Bytes in one complete frame: marker, digits and terminator.
    #[inline]
    pub const fn frame_len(&self) -> usize {
        self.frame_digits + 2
    }

    /// Converts a value in this model's native unit to millimeters.
    pub fn to_millimeters(&self, native: u32) -> f64 {
        match self.native_unit {
            LengthUnit::Millimeter => f64::from(native),
            LengthUnit::Inch => f64::from(native) * MM_PER_INCH,
        }
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} digits, no target = {})",
            self.id, self.native_unit, self.frame_digits, self.no_target_value
        )
    }
}

// MB1040: 6in min, 254in max, 1in resolution.
// MB736x/MB738x: 5-meter models report 5000 for no target, 10-meter models 9999.
static MODELS: [SensorModel; 9] = [
    SensorModel::new("MB1040", LengthUnit::Inch, 254, 3),
    // 5-meter sensors
    SensorModel::new("MB7360", LengthUnit::Millimeter, 5000, 4),
    SensorModel::new("MB7369", LengthUnit::Millimeter, 5000, 4),
    SensorModel::new("MB7380", LengthUnit::Millimeter, 5000, 4),
    SensorModel::new("MB7389", LengthUnit::Millimeter, 5000, 4),
    // 10-meter sensors
    SensorModel::new("MB7363", LengthUnit::Millimeter, 9999, 4),
    SensorModel::new("MB7366", LengthUnit::Millimeter, 9999, 4),
    SensorModel::new("MB7383", LengthUnit::Millimeter, 9999, 4),
    SensorModel::new("MB7386", LengthUnit::Millimeter, 9999, 4),
];

/// Model identifier missing from the model table.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown sensor model '{model}'")]
pub struct UnknownModel {
    pub model: String,
}

impl UnknownModel {
    pub fn new(model: impl Into<String>) -> Self {
        UnknownModel { model: model.into() }
    }
}

/// Looks up a model by its exact identifier, e.g. `"MB7363"`.
pub fn lookup(id: &str) -> Result<&'static SensorModel, UnknownModel> {
    MODELS
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| UnknownModel::new(id))
}

/// All known models, in table order.
pub fn models() -> impl Iterator<Item = &'static SensorModel> {
    MODELS.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit_width(mut v: u32) -> usize {
        let mut width = 1;
        while v >= 10 {
            v /= 10;
            width += 1;
        }
        width
    }

    #[test]
    fn test_lookup_known_models() {
        let m = lookup("MB1040").unwrap();
        assert_eq!(m.native_unit, LengthUnit::Inch);
        assert_eq!(m.no_target_value, 254);
        assert_eq!(m.frame_digits, 3);

        for id in ["MB7360", "MB7369", "MB7380", "MB7389"] {
            let m = lookup(id).unwrap();
            assert_eq!(m.native_unit, LengthUnit::Millimeter);
            assert_eq!(m.no_target_value, 5000);
            assert_eq!(m.frame_digits, 4);
        }
        for id in ["MB7363", "MB7366", "MB7383", "MB7386"] {
            let m = lookup(id).unwrap();
            assert_eq!(m.native_unit, LengthUnit::Millimeter);
            assert_eq!(m.no_target_value, 9999);
            assert_eq!(m.frame_digits, 4);
        }
    }

    #[test]
    fn test_lookup_unknown_model() {
        assert_eq!(lookup("MB9999"), Err(UnknownModel::new("MB9999")));
        // Identifiers are matched exactly
        assert!(lookup("mb7363").is_err());
        assert!(lookup("").is_err());
        assert_eq!(
            UnknownModel::new("XYZ").to_string(),
            "unknown sensor model 'XYZ'"
        );
    }

    #[test]
    fn test_default_model_is_known() {
        let m = lookup(DEFAULT_MODEL).unwrap();
        assert_eq!(m.no_target_value, 9999);
    }

    #[test]
    fn test_frame_digits_match_sentinel_width() {
        assert_eq!(models().count(), 9);
        for m in models() {
            assert_eq!(m.frame_digits, digit_width(m.no_target_value), "{}", m.id);
            assert_eq!(m.frame_len(), m.frame_digits + 2);
        }
    }

    #[test]
    fn test_to_millimeters() {
        assert_eq!(lookup("MB7363").unwrap().to_millimeters(2257), 2257.0);
        assert_eq!(lookup("MB1040").unwrap().to_millimeters(10), 254.0);
        assert_eq!(lookup("MB1040").unwrap().to_millimeters(0), 0.0);
    }
}
