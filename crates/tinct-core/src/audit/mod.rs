//! Contrast audit: declarative cases, token resolution, the batch runner, and reports.

pub mod case;
pub mod report;
pub mod resolver;
pub mod runner;
