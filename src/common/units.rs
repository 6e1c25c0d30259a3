// src/common/units.rs

use super::model::MM_PER_INCH;

/// Unit system tag of a host record. Discriminants match the host's codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum UnitSystem {
    /// Range in inches.
    Us = 0x01,
    /// Range in centimeters.
    Metric = 0x10,
    /// Range in centimeters.
    MetricWx = 0x11,
}

impl UnitSystem {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(UnitSystem::Us),
            0x10 => Some(UnitSystem::Metric),
            0x11 => Some(UnitSystem::MetricWx),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Unit label of the `range` field in this system.
    pub fn range_unit(self) -> &'static str {
        match self {
            UnitSystem::Us => "inch",
            UnitSystem::Metric | UnitSystem::MetricWx => "cm",
        }
    }

    pub fn range_from_mm(self, mm: f64) -> f64 {
        match self {
            UnitSystem::Us => mm / MM_PER_INCH,
            UnitSystem::Metric | UnitSystem::MetricWx => mm / 10.0,
        }
    }
}

/// A normalized sensor reading. The range is always millimeters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reading {
    /// Unix time in whole seconds.
    pub timestamp: u64,
    /// `None` when the sensor saw no target or the attempt failed in push mode.
    pub range_mm: Option<f64>,
}

/// One record as handed to the host pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Record {
    pub date_time: u64,
    pub unit_system: UnitSystem,
    /// Range in `unit_system`'s unit.
    pub range: Option<f64>,
}

impl Record {
    pub fn new(date_time: u64, unit_system: UnitSystem) -> Self {
        Record {
            date_time,
            unit_system,
            range: None,
        }
    }

    pub fn from_reading(reading: Reading, unit_system: UnitSystem) -> Self {
        Record {
            date_time: reading.timestamp,
            unit_system,
            range: reading.range_mm.map(|mm| unit_system.range_from_mm(mm)),
        }
    }

    /// Replaces the range with `range_mm`, converted to this record's unit system.
    pub fn set_range_mm(&mut self, range_mm: Option<f64>) {
        self.range = range_mm.map(|mm| self.unit_system.range_from_mm(mm));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_codes() {
        for us in [UnitSystem::Us, UnitSystem::Metric, UnitSystem::MetricWx] {
            assert_eq!(UnitSystem::from_code(us.code()), Some(us));
        }
        assert_eq!(UnitSystem::Metric.code(), 16);
        assert_eq!(UnitSystem::from_code(2), None);
    }

    #[test]
    fn test_range_conversion() {
        assert_eq!(UnitSystem::Metric.range_from_mm(2257.0), 225.7);
        assert_eq!(UnitSystem::MetricWx.range_from_mm(2257.0), 225.7);
        assert_eq!(UnitSystem::Us.range_from_mm(254.0), 10.0);
        assert_eq!(UnitSystem::Us.range_unit(), "inch");
        assert_eq!(UnitSystem::Metric.range_unit(), "cm");
    }

    #[test]
    fn test_record_from_reading() {
        let reading = Reading { timestamp: 1_700_000_000, range_mm: Some(2257.0) };
        let record = Record::from_reading(reading, UnitSystem::Metric);
        assert_eq!(record.date_time, 1_700_000_000);
        assert_eq!(record.range, Some(225.7));

        let empty = Reading { timestamp: 5, range_mm: None };
        assert_eq!(Record::from_reading(empty, UnitSystem::Us).range, None);
    }

    #[test]
    fn test_set_range_overwrites() {
        let mut record = Record::new(10, UnitSystem::Us);
        record.set_range_mm(Some(254.0));
        assert_eq!(record.range, Some(10.0));
        record.set_range_mm(None);
        assert_eq!(record.range, None);
    }
}
