//! Slot grid for the working day.
//!
//! Divides the workshop day into fixed-duration slots and converts between
//! wall-clock times, labor hours, and integer slot indices. Pure and
//! stateless; constructed once per process.
//!
//! # Time Model
//! A slot is the atomic scheduling unit. Segment intervals are half-open
//! `[start_slot, start_slot + span)` ranges of slot indices.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// The fixed-resolution timeline of one working day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotGrid {
    day_start: NaiveTime,
    day_end: NaiveTime,
    slot_minutes: u32,
    slot_count: usize,
}

impl SlotGrid {
    /// Creates a grid covering `[day_start, day_end)` in `slot_minutes` steps.
    ///
    /// Fails if the end is not after the start, the slot duration is zero,
    /// or the slot duration does not evenly divide the day span.
    pub fn new(
        day_start: NaiveTime,
        day_end: NaiveTime,
        slot_minutes: u32,
    ) -> Result<Self, ScheduleError> {
        if day_end <= day_start {
            return Err(ScheduleError::Configuration(format!(
                "day end {day_end} must be after day start {day_start}"
            )));
        }
        if slot_minutes == 0 {
            return Err(ScheduleError::Configuration(
                "slot duration must be positive".into(),
            ));
        }
        let span_minutes = (day_end - day_start).num_minutes() as u32;
        if span_minutes % slot_minutes != 0 {
            return Err(ScheduleError::Configuration(format!(
                "slot duration {slot_minutes}min does not divide the {span_minutes}min day span"
            )));
        }
        Ok(Self {
            day_start,
            day_end,
            slot_minutes,
            slot_count: (span_minutes / slot_minutes) as usize,
        })
    }

    /// Number of slots in the working day.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Slot duration in minutes.
    #[inline]
    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Labor hours represented by a single slot.
    #[inline]
    pub fn hours_per_slot(&self) -> f64 {
        f64::from(self.slot_minutes) / 60.0
    }

    /// Wall-clock start time of a slot, if the index is on the grid.
    pub fn slot_to_time(&self, index: usize) -> Option<NaiveTime> {
        if index >= self.slot_count {
            return None;
        }
        Some(self.day_start + chrono::Duration::minutes(i64::from(self.slot_minutes) * index as i64))
    }

    /// Display label for a slot, e.g. `"8:30 AM"`.
    pub fn slot_to_label(&self, index: usize) -> Option<String> {
        self.slot_to_time(index)
            .map(|t| t.format("%-I:%M %p").to_string())
    }

    /// Slot index containing a wall-clock time, if within the day.
    pub fn time_to_slot(&self, time: NaiveTime) -> Option<usize> {
        if time < self.day_start || time >= self.day_end {
            return None;
        }
        let offset = (time - self.day_start).num_minutes() as u32;
        Some((offset / self.slot_minutes) as usize)
    }

    /// Number of slots needed to cover a labor duration, rounded up.
    pub fn duration_to_slot_span(&self, hours: f64) -> usize {
        if hours <= 0.0 {
            return 0;
        }
        ((hours * 60.0) / f64::from(self.slot_minutes)).ceil() as usize
    }

    /// All slot labels in day order.
    pub fn labels(&self) -> Vec<String> {
        (0..self.slot_count)
            .filter_map(|i| self.slot_to_label(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop_grid() -> SlotGrid {
        SlotGrid::new(
            NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    #[test]
    fn test_workshop_day_slot_count() {
        // 08:30-17:30 in 30min slots → 18 slots
        let grid = workshop_grid();
        assert_eq!(grid.slot_count(), 18);
    }

    #[test]
    fn test_slot_labels() {
        let grid = workshop_grid();
        assert_eq!(grid.slot_to_label(0).unwrap(), "8:30 AM");
        assert_eq!(grid.slot_to_label(7).unwrap(), "12:00 PM");
        assert_eq!(grid.slot_to_label(17).unwrap(), "5:00 PM");
        assert!(grid.slot_to_label(18).is_none());
    }

    #[test]
    fn test_time_to_slot() {
        let grid = workshop_grid();
        assert_eq!(
            grid.time_to_slot(NaiveTime::from_hms_opt(8, 30, 0).unwrap()),
            Some(0)
        );
        // Mid-slot times map to the slot they fall in
        assert_eq!(
            grid.time_to_slot(NaiveTime::from_hms_opt(8, 45, 0).unwrap()),
            Some(0)
        );
        assert_eq!(
            grid.time_to_slot(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            Some(1)
        );
        // Day end is exclusive
        assert_eq!(
            grid.time_to_slot(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
            None
        );
        assert_eq!(
            grid.time_to_slot(NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
            None
        );
    }

    #[test]
    fn test_duration_to_slot_span() {
        let grid = workshop_grid();
        assert_eq!(grid.duration_to_slot_span(2.0), 4);
        assert_eq!(grid.duration_to_slot_span(0.5), 1);
        // Partial slots round up
        assert_eq!(grid.duration_to_slot_span(0.75), 2);
        assert_eq!(grid.duration_to_slot_span(0.0), 0);
        assert_eq!(grid.duration_to_slot_span(-1.0), 0);
    }

    #[test]
    fn test_hours_per_slot() {
        let grid = workshop_grid();
        assert!((grid.hours_per_slot() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_end_before_start() {
        let err = SlotGrid::new(
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            30,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::Configuration(_)));
    }

    #[test]
    fn test_rejects_non_dividing_slot() {
        // 9h span is not a whole number of 50min slots
        let err = SlotGrid::new(
            NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            50,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::Configuration(_)));
    }

    #[test]
    fn test_rejects_zero_slot() {
        let err = SlotGrid::new(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::Configuration(_)));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = workshop_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: SlotGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
