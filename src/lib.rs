//! Job-segment scheduling engine for workshop dispatch.
//!
//! Splits a job's estimated labor into date-bounded work segments, places
//! segments onto service bays (lifts) within a fixed daily slot grid without
//! double-booking, tracks each segment's execution lifecycle, derives the
//! owning job's status from its segments, and evaluates day-level capacity
//! adjusted for staff absence.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `JobSegment`, `Lift`, `Engineer`,
//!   `AbsenceRequest`, `EntityConfig`
//! - **`grid`**: The fixed-resolution working-day timeline (`SlotGrid`)
//! - **`calendar`**: Working-day walking (skips the weekly closure day)
//! - **`splitter`**: Estimated hours → per-day `Unallocated` segments
//! - **`capacity`**: Committed vs. effective daily hours, load classification
//! - **`allocation`**: Slot-level collision detection and free-slot search
//! - **`lifecycle`**: The segment status state machine
//! - **`status`**: Job status derivation from segment statuses
//! - **`dispatch`**: The `DispatchBoard` — the public operation set
//! - **`store`**: In-memory arena of jobs and segments
//! - **`validation`**: Structural integrity checks over a loaded board
//!
//! # Architecture
//!
//! Everything is synchronous and in-memory: the surrounding application loads
//! jobs, lifts, engineers and absences, constructs a [`dispatch::DispatchBoard`]
//! per business entity, and routes every mutation through it. A board is the
//! single writer for its entity's segments; reads borrow immutably.

pub mod allocation;
pub mod calendar;
pub mod capacity;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod lifecycle;
pub mod models;
pub mod splitter;
pub mod status;
pub mod store;
pub mod validation;

pub use context::{ActorRole, SchedulingContext};
pub use dispatch::DispatchBoard;
pub use error::ScheduleError;
pub use grid::SlotGrid;
