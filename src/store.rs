//! In-memory arena of jobs and segments.
//!
//! Segments are keyed by id; jobs hold ordered segment-id lists. All
//! mutation flows through the dispatch board, which recomputes the owning
//! job's status after every segment change. UI and persistence layers read
//! from here, they never mutate segments directly.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Job, JobSegment, JobStatus};
use crate::status::derive_job_status;

/// Arena of jobs and segments for one business entity.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    jobs: HashMap<String, Job>,
    segments: HashMap<String, JobSegment>,
}

impl ScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a job, replacing any previous job with the same id.
    pub fn insert_job(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    /// Inserts a segment and appends it to the owning job's list if not
    /// already present.
    pub fn insert_segment(&mut self, segment: JobSegment) {
        if let Some(job) = self.jobs.get_mut(&segment.job_id) {
            if !job.segment_ids.contains(&segment.id) {
                job.segment_ids.push(segment.id.clone());
            }
        }
        self.segments.insert(segment.id.clone(), segment);
    }

    /// Looks up a job.
    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.get(job_id)
    }

    /// Looks up a segment.
    pub fn segment(&self, segment_id: &str) -> Option<&JobSegment> {
        self.segments.get(segment_id)
    }

    pub(crate) fn segment_mut(&mut self, segment_id: &str) -> Option<&mut JobSegment> {
        self.segments.get_mut(segment_id)
    }

    /// All jobs, in no particular order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// All segments, in no particular order.
    pub fn segments(&self) -> impl Iterator<Item = &JobSegment> {
        self.segments.values()
    }

    /// A job's segments in its declared order.
    pub fn segments_for_job(&self, job_id: &str) -> Vec<&JobSegment> {
        let Some(job) = self.jobs.get(job_id) else {
            return Vec::new();
        };
        job.segment_ids
            .iter()
            .filter_map(|id| self.segments.get(id))
            .collect()
    }

    /// Active segments scheduled on a lift for a date.
    pub fn active_segments_on(&self, lift_id: &str, date: NaiveDate) -> Vec<&JobSegment> {
        self.segments
            .values()
            .filter(|s| {
                s.is_active()
                    && s.lift_id.as_deref() == Some(lift_id)
                    && s.date == Some(date)
            })
            .collect()
    }

    /// An engineer's active placed segments on a date, across all lifts.
    pub fn engineer_segments_on(&self, engineer_id: &str, date: NaiveDate) -> Vec<&JobSegment> {
        self.segments
            .values()
            .filter(|s| {
                s.is_active()
                    && s.engineer_id.as_deref() == Some(engineer_id)
                    && s.date == Some(date)
            })
            .collect()
    }

    /// All segments, as a slice-of-refs for the capacity and search helpers.
    pub fn all_segment_refs(&self) -> Vec<&JobSegment> {
        self.segments.values().collect()
    }

    /// Recomputes and stores the derived status of a job.
    ///
    /// Returns the new status, or `None` if the job is unknown.
    pub fn refresh_job_status(&mut self, job_id: &str) -> Option<JobStatus> {
        let job = self.jobs.get(job_id)?;
        let status = derive_job_status(
            job.segment_ids
                .iter()
                .filter_map(|id| self.segments.get(id)),
        );
        let job = self.jobs.get_mut(job_id)?;
        job.status = status;
        Some(status)
    }
}
