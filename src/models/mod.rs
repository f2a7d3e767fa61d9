//! Data models for labelstore

pub mod assignment;
pub mod project;
pub mod task;
pub mod taxonomy;

pub use assignment::{Assignment, DashboardContents, Event, Label, Track};
pub use project::{Project, ProjectOptions};
pub use task::{Item, Task};
pub use taxonomy::{Attribute, Category};
