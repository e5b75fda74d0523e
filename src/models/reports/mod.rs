pub mod responses;

pub use responses::{CourseReport, StudentReport};
