//! Allocation engine: slot-level and date-level placement search.
//!
//! Placement is caller-directed: a human picks the lift, the engine
//! arbitrates time. Collision detection compares the requested half-open
//! slot interval against every other active segment on the same lift and
//! date, plus the assigned engineer's other bookings that day. When a
//! requested slot collides — or the whole day is full — the engine can
//! search forward for the next free slot or the next date with capacity.
//!
//! Tie-break policy: the earliest free slot always wins; no load balancing
//! across lifts.

use chrono::NaiveDate;

use crate::calendar::WorkingCalendar;
use crate::capacity::{committed_hours_on, daily_load};
use crate::error::ScheduleError;
use crate::grid::SlotGrid;
use crate::models::{AbsenceRequest, EntityConfig, JobSegment};

/// Hard ceiling on the date search, to bound pathological inputs.
const MAX_DATE_SEARCH_DAYS: usize = 730;

/// Slot-level placement checks over one lift/date.
#[derive(Debug, Clone, Copy)]
pub struct AllocationEngine<'a> {
    grid: &'a SlotGrid,
}

impl<'a> AllocationEngine<'a> {
    /// Creates an engine over the given grid.
    pub fn new(grid: &'a SlotGrid) -> Self {
        Self { grid }
    }

    /// The grid this engine validates against.
    #[inline]
    pub fn grid(&self) -> &SlotGrid {
        self.grid
    }

    /// Checks that `[start_slot, start_slot + span)` fits the grid and does
    /// not intersect any of `others` (the other active segments already
    /// placed on the target lift and date).
    pub fn verify_placement(
        &self,
        others: &[&JobSegment],
        lift_id: &str,
        date: NaiveDate,
        start_slot: usize,
        span: usize,
    ) -> Result<(), ScheduleError> {
        let end_slot = start_slot + span;
        if span == 0 || end_slot > self.grid.slot_count() {
            return Err(ScheduleError::SlotOutOfRange {
                start_slot,
                end_slot,
                slot_count: self.grid.slot_count(),
            });
        }

        for other in others {
            if let Some((other_start, other_end)) = other.slot_interval(self.grid) {
                if start_slot < other_end && other_start < end_slot {
                    return Err(ScheduleError::Collision {
                        lift_id: lift_id.to_string(),
                        date,
                        start_slot,
                        end_slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that the engineer has no overlapping booking that day.
    ///
    /// `booked` is the engineer's other active placed segments on the date,
    /// across all lifts.
    pub fn verify_engineer_free(
        &self,
        booked: &[&JobSegment],
        engineer_id: &str,
        date: NaiveDate,
        start_slot: usize,
        span: usize,
    ) -> Result<(), ScheduleError> {
        let end_slot = start_slot + span;
        for other in booked {
            if let Some((other_start, other_end)) = other.slot_interval(self.grid) {
                if start_slot < other_end && other_start < end_slot {
                    return Err(ScheduleError::EngineerBooked {
                        engineer_id: engineer_id.to_string(),
                        date,
                        start_slot,
                        end_slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Earliest slot index where a gap of `span` free slots starts, given
    /// the active segments already on the lift/date. `None` if no gap fits.
    pub fn find_next_free_slot(&self, others: &[&JobSegment], span: usize) -> Option<usize> {
        if span == 0 || span > self.grid.slot_count() {
            return None;
        }

        let mut occupied = vec![false; self.grid.slot_count()];
        for other in others {
            if let Some((start, end)) = other.slot_interval(self.grid) {
                for slot in start..end.min(occupied.len()) {
                    occupied[slot] = true;
                }
            }
        }

        let mut run = 0usize;
        for (slot, &busy) in occupied.iter().enumerate() {
            if busy {
                run = 0;
            } else {
                run += 1;
                if run == span {
                    return Some(slot + 1 - span);
                }
            }
        }
        None
    }
}

/// Walks forward from `from` (skipping non-working days) to the first date
/// whose committed hours plus `duration_hours` fit inside the effective
/// capacity. Returns the earliest such date.
///
/// This is the capacity-level counterpart of the slot-level search, used
/// when a day is full rather than a specific lift being busy.
pub fn find_next_available_date(
    from: NaiveDate,
    duration_hours: f64,
    entity_segments: &[&JobSegment],
    config: &EntityConfig,
    absences: &[AbsenceRequest],
    calendar: &WorkingCalendar,
) -> Option<NaiveDate> {
    let mut date = calendar.working_day_on_or_after(from);
    for _ in 0..MAX_DATE_SEARCH_DAYS {
        let committed = committed_hours_on(entity_segments.iter().copied(), date);
        let load = daily_load(date, committed, config, absences);
        if load.fits(duration_hours) {
            return Some(date);
        }
        date = calendar.working_day_after(date);
    }
    None
}
