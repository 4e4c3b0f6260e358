//! CPU scheduling domain models.
//!
//! Provides the data types shared by the simulation engine and the
//! metrics reducer.
//!
//! # Types
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessSpec` | Input descriptor (id, arrival, burst, priority) |
//! | `ProcessRecord` | Descriptor plus mutable simulation state |
//! | `TimelineSegment` | One uninterrupted CPU interval of a process |
//! | `Timeline` | Ordered, non-overlapping segments (the Gantt data) |
//! | `Discipline` | Scheduling discipline selector |

mod discipline;
mod process;
mod timeline;

pub use discipline::{Discipline, UnknownDiscipline};
pub use process::{records_from_specs, ProcessRecord, ProcessSpec, ProcessStatus, Ticks};
pub use timeline::{Timeline, TimelineSegment};
