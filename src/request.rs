//! The payload shape handed to weather-source collaborators.
//!
//! Data-source clients take a bare list of coordinates plus a date period;
//! result rows come back keyed by position. [`FetchPlan`] keeps the
//! parallel name list so callers can annotate results afterwards without
//! the fetch layer knowing anything about display names.

use crate::error::AfrigridError;
use crate::types::location::{LatLon, NamedLocation};
use chrono::NaiveDate;
use serde::Serialize;

/// An inclusive date period for a time-series fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Creates a period, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AfrigridError> {
        if end < start {
            return Err(AfrigridError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days covered, endpoints inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The flat fetch payload: coordinates in call order, with the index as
/// the implicit location id, and the display names held alongside for
/// re-labelling results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchPlan {
    pub points: Vec<LatLon>,
    pub names: Vec<String>,
    pub period: Period,
}

impl FetchPlan {
    pub fn new(locations: &[NamedLocation], period: Period) -> Self {
        Self {
            points: locations.iter().map(NamedLocation::coordinate).collect(),
            names: locations.iter().map(|l| l.name.clone()).collect(),
            period,
        }
    }

    /// The display name for a positional location id reported back by a
    /// data source.
    pub fn display_name(&self, location_id: usize) -> Option<&str> {
        self.names.get(location_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plan_preserves_order_and_names() {
        let locations = vec![
            NamedLocation::new(LatLon(6.5244, 3.3792), "Lagos, Nigeria"),
            NamedLocation::new(LatLon(12.0022, 8.5919), "Kano, Nigeria"),
        ];
        let period = Period::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let plan = FetchPlan::new(&locations, period);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.points[0], LatLon(6.5244, 3.3792));
        assert_eq!(plan.display_name(1), Some("Kano, Nigeria"));
        assert_eq!(plan.display_name(2), None);
        assert_eq!(plan.period.days(), 31);
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = Period::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, AfrigridError::InvalidPeriod { .. }));
    }
}
