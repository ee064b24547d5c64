//! Domain models for workshop scheduling.
//!
//! - **`job`**: `Job` and the derived `JobStatus`
//! - **`segment`**: `JobSegment`, `SegmentStatus`, placement snapshots
//! - **`resource`**: `Lift` (service bay) and `Engineer`
//! - **`absence`**: `AbsenceRequest` and its approval status
//! - **`entity`**: Per-entity capacity configuration

pub mod absence;
pub mod entity;
pub mod job;
pub mod resource;
pub mod segment;

pub use absence::{AbsenceRequest, AbsenceStatus};
pub use entity::EntityConfig;
pub use job::{Job, JobStatus};
pub use resource::{Engineer, Lift};
pub use segment::{JobSegment, PlacementSnapshot, SegmentStatus};
