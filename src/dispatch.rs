//! Dispatch board: the public operation set over one entity's schedule.
//!
//! Composes the splitter, allocation engine, capacity tracker, and segment
//! state machine around the in-memory store. A board is the single writer
//! for its entity's segments; every mutation recomputes the owning job's
//! derived status before returning.
//!
//! Operations either complete or are rejected atomically. `move_segment`
//! is unschedule-then-place with the original placement restored when the
//! new placement fails.

use chrono::NaiveDate;
use tracing::info;

use crate::allocation::{self, AllocationEngine};
use crate::calendar::WorkingCalendar;
use crate::capacity::{self, committed_hours_on, DailyLoad};
use crate::context::SchedulingContext;
use crate::error::ScheduleError;
use crate::grid::SlotGrid;
use crate::lifecycle::{self, SegmentAction};
use crate::models::{
    AbsenceRequest, Engineer, EntityConfig, Job, JobSegment, JobStatus, Lift, SegmentStatus,
};
use crate::splitter;
use crate::store::ScheduleStore;
use crate::validation::{self, ValidationError};

/// Scheduling operations for one business entity.
#[derive(Debug, Clone)]
pub struct DispatchBoard {
    grid: SlotGrid,
    calendar: WorkingCalendar,
    config: EntityConfig,
    store: ScheduleStore,
    lifts: Vec<Lift>,
    engineers: Vec<Engineer>,
    absences: Vec<AbsenceRequest>,
}

impl DispatchBoard {
    /// Creates an empty board for the configured entity.
    pub fn new(grid: SlotGrid, config: EntityConfig) -> Self {
        Self {
            grid,
            calendar: WorkingCalendar::default(),
            config,
            store: ScheduleStore::new(),
            lifts: Vec::new(),
            engineers: Vec::new(),
            absences: Vec::new(),
        }
    }

    /// Sets the working-day calendar.
    pub fn with_calendar(mut self, calendar: WorkingCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Registers a lift.
    pub fn with_lift(mut self, lift: Lift) -> Self {
        self.lifts.push(lift);
        self
    }

    /// Registers an engineer.
    pub fn with_engineer(mut self, engineer: Engineer) -> Self {
        self.engineers.push(engineer);
        self
    }

    /// Records an absence request.
    pub fn add_absence(&mut self, absence: AbsenceRequest) {
        self.absences.push(absence);
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// The board's slot grid.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// The entity's capacity configuration.
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Registers a job and splits its estimated hours into planned,
    /// unallocated segments starting from `start_date`.
    ///
    /// Returns the new segment ids in date order. Never fails.
    pub fn split_job(&mut self, job: Job, start_date: NaiveDate) -> Vec<String> {
        let segments = {
            let existing = self.store.all_segment_refs();
            splitter::split_job(
                &job.id,
                job.estimated_hours,
                start_date,
                &self.config,
                &existing,
                &self.calendar,
            )
        };

        let job_id = job.id.clone();
        self.store.insert_job(job);
        let ids: Vec<String> = segments.iter().map(|s| s.id.clone()).collect();
        for segment in segments {
            self.store.insert_segment(segment);
        }
        self.store.refresh_job_status(&job_id);
        info!(job = %job_id, segments = ids.len(), "job split into segments");
        ids
    }

    /// Places an unallocated segment on a lift/date/slot with an engineer.
    ///
    /// Checks day capacity, grid bounds, lift collisions, and the
    /// engineer's other bookings; on success the segment becomes
    /// `Allocated`.
    pub fn place(
        &mut self,
        segment_id: &str,
        lift_id: &str,
        date: NaiveDate,
        start_slot: usize,
        engineer_id: &str,
        ctx: &SchedulingContext,
    ) -> Result<&JobSegment, ScheduleError> {
        self.place_inner(segment_id, lift_id, date, start_slot, engineer_id, ctx)?;
        self.segment_ref(segment_id)
    }

    fn place_inner(
        &mut self,
        segment_id: &str,
        lift_id: &str,
        date: NaiveDate,
        start_slot: usize,
        engineer_id: &str,
        ctx: &SchedulingContext,
    ) -> Result<(), ScheduleError> {
        let (job_id, duration_hours, status) = {
            let seg = self
                .store
                .segment(segment_id)
                .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
            (seg.job_id.clone(), seg.duration_hours, seg.status)
        };
        if status != SegmentStatus::Unallocated {
            return Err(ScheduleError::InvalidTransition {
                from: status,
                action: "place".into(),
            });
        }
        self.require_lift(lift_id)?;
        self.require_engineer(engineer_id)?;

        // Day-level capacity first: a full day is not a slot problem
        let committed =
            committed_hours_on(self.store.segments().filter(|s| s.id != segment_id), date);
        let load = capacity::daily_load(date, committed, &self.config, &self.absences);
        if !load.fits(duration_hours) {
            return Err(ScheduleError::CapacityExceeded {
                date,
                committed,
                requested: duration_hours,
                effective: load.effective_capacity_hours,
            });
        }

        let span = self.grid.duration_to_slot_span(duration_hours);
        self.verify_slots(segment_id, lift_id, engineer_id, date, start_slot, span)?;

        let seg = self
            .store
            .segment_mut(segment_id)
            .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
        seg.date = Some(date);
        seg.lift_id = Some(lift_id.to_string());
        seg.engineer_id = Some(engineer_id.to_string());
        seg.start_slot = Some(start_slot);
        seg.status = SegmentStatus::Allocated;
        self.store.refresh_job_status(&job_id);
        info!(
            segment = %segment_id,
            lift = %lift_id,
            %date,
            slot = start_slot,
            actor = %ctx.actor_id,
            "segment placed"
        );
        Ok(())
    }

    /// Earliest free slot of sufficient width on a lift/date, or `None`.
    pub fn find_next_free_slot(
        &self,
        lift_id: &str,
        date: NaiveDate,
        duration_hours: f64,
    ) -> Option<usize> {
        let engine = AllocationEngine::new(&self.grid);
        let span = self.grid.duration_to_slot_span(duration_hours);
        let others = self.store.active_segments_on(lift_id, date);
        engine.find_next_free_slot(&others, span)
    }

    /// Earliest working day from `from` where `duration_hours` still fits
    /// inside the effective capacity.
    pub fn find_next_available_date(
        &self,
        from: NaiveDate,
        duration_hours: f64,
    ) -> Option<NaiveDate> {
        let segments = self.store.all_segment_refs();
        allocation::find_next_available_date(
            from,
            duration_hours,
            &segments,
            &self.config,
            &self.absences,
            &self.calendar,
        )
    }

    /// Applies a lifecycle action to a segment and refreshes the job status.
    pub fn transition(
        &mut self,
        segment_id: &str,
        action: &SegmentAction,
        ctx: &SchedulingContext,
    ) -> Result<&JobSegment, ScheduleError> {
        let job_id = {
            let seg = self
                .store
                .segment_mut(segment_id)
                .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
            lifecycle::apply(seg, action, ctx)?;
            seg.job_id.clone()
        };
        self.store.refresh_job_status(&job_id);
        self.segment_ref(segment_id)
    }

    /// Returns a segment to the unallocated pool, clearing its placement.
    pub fn unschedule(
        &mut self,
        segment_id: &str,
        ctx: &SchedulingContext,
    ) -> Result<&JobSegment, ScheduleError> {
        self.transition(segment_id, &SegmentAction::Unschedule, ctx)
    }

    /// Moves a placed segment to a new lift/slot/engineer on its current
    /// date, leaving its status unchanged.
    ///
    /// The collision check excludes the segment's own placement, so a
    /// small shift within its own interval is legal.
    pub fn reassign(
        &mut self,
        segment_id: &str,
        new_lift_id: &str,
        new_start_slot: usize,
        new_engineer_id: &str,
        ctx: &SchedulingContext,
    ) -> Result<&JobSegment, ScheduleError> {
        let (job_id, date, duration_hours, status) = {
            let seg = self
                .store
                .segment(segment_id)
                .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
            let Some(date) = seg.date else {
                return Err(ScheduleError::InvalidTransition {
                    from: seg.status,
                    action: "reassign".into(),
                });
            };
            (seg.job_id.clone(), date, seg.duration_hours, seg.status)
        };
        if status.is_terminal() {
            return Err(ScheduleError::InvalidTransition {
                from: status,
                action: "reassign".into(),
            });
        }
        self.require_lift(new_lift_id)?;
        self.require_engineer(new_engineer_id)?;

        let span = self.grid.duration_to_slot_span(duration_hours);
        self.verify_slots(
            segment_id,
            new_lift_id,
            new_engineer_id,
            date,
            new_start_slot,
            span,
        )?;

        let seg = self
            .store
            .segment_mut(segment_id)
            .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
        seg.lift_id = Some(new_lift_id.to_string());
        seg.engineer_id = Some(new_engineer_id.to_string());
        seg.start_slot = Some(new_start_slot);
        self.store.refresh_job_status(&job_id);
        info!(
            segment = %segment_id,
            lift = %new_lift_id,
            slot = new_start_slot,
            actor = %ctx.actor_id,
            "segment reassigned"
        );
        self.segment_ref(segment_id)
    }

    /// Relocates a segment to a new lift/date/slot as a single atomic
    /// operation: unschedule then place. If the new placement fails, the
    /// original placement (including status) is fully restored.
    pub fn move_segment(
        &mut self,
        segment_id: &str,
        lift_id: &str,
        date: NaiveDate,
        start_slot: usize,
        engineer_id: &str,
        ctx: &SchedulingContext,
    ) -> Result<&JobSegment, ScheduleError> {
        let (snapshot, job_id, from) = {
            let seg = self
                .store
                .segment(segment_id)
                .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))?;
            (seg.snapshot(), seg.job_id.clone(), seg.status)
        };
        if from.is_terminal() {
            return Err(ScheduleError::InvalidTransition {
                from,
                action: "move".into(),
            });
        }

        if let Some(seg) = self.store.segment_mut(segment_id) {
            seg.status = SegmentStatus::Unallocated;
            seg.clear_placement();
        }

        match self.place_inner(segment_id, lift_id, date, start_slot, engineer_id, ctx) {
            Ok(()) => self.segment_ref(segment_id),
            Err(err) => {
                if let Some(seg) = self.store.segment_mut(segment_id) {
                    seg.restore(snapshot);
                }
                self.store.refresh_job_status(&job_id);
                Err(err)
            }
        }
    }

    /// The day's load report for this entity.
    pub fn daily_load(&self, date: NaiveDate) -> DailyLoad {
        let committed = committed_hours_on(self.store.segments(), date);
        capacity::daily_load(date, committed, &self.config, &self.absences)
    }

    /// A job's current derived status.
    pub fn job_status(&self, job_id: &str) -> Option<JobStatus> {
        self.store.job(job_id).map(|j| j.status)
    }

    /// Structural integrity check over the whole board.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validation::validate_board(&self.store, &self.lifts, &self.engineers, &self.grid)
    }

    fn require_lift(&self, lift_id: &str) -> Result<(), ScheduleError> {
        if self.lifts.iter().any(|l| l.id == lift_id) {
            Ok(())
        } else {
            Err(ScheduleError::UnknownLift(lift_id.to_string()))
        }
    }

    fn require_engineer(&self, engineer_id: &str) -> Result<(), ScheduleError> {
        if self.engineers.iter().any(|e| e.id == engineer_id) {
            Ok(())
        } else {
            Err(ScheduleError::UnknownEngineer(engineer_id.to_string()))
        }
    }

    /// Collision checks against the lift's and the engineer's other active
    /// segments, excluding the segment being (re)placed.
    fn verify_slots(
        &self,
        segment_id: &str,
        lift_id: &str,
        engineer_id: &str,
        date: NaiveDate,
        start_slot: usize,
        span: usize,
    ) -> Result<(), ScheduleError> {
        let engine = AllocationEngine::new(&self.grid);

        let others: Vec<&JobSegment> = self
            .store
            .active_segments_on(lift_id, date)
            .into_iter()
            .filter(|s| s.id != segment_id)
            .collect();
        engine.verify_placement(&others, lift_id, date, start_slot, span)?;

        let booked: Vec<&JobSegment> = self
            .store
            .engineer_segments_on(engineer_id, date)
            .into_iter()
            .filter(|s| s.id != segment_id)
            .collect();
        engine.verify_engineer_free(&booked, engineer_id, date, start_slot, span)
    }

    fn segment_ref(&self, segment_id: &str) -> Result<&JobSegment, ScheduleError> {
        self.store
            .segment(segment_id)
            .ok_or_else(|| ScheduleError::UnknownSegment(segment_id.to_string()))
    }
}
