//! Client side of the report API.
//!
//! [`HttpReportsClient`] talks to the REST surface; [`ViewProjector`] keeps a
//! cached copy of the collection and derives filtered views and counts from it.

mod api;
mod projector;

pub use api::{ClientError, HttpReportsClient, NewReport, ReportsApi};
pub use projector::{ReportFilter, ViewProjector, ViewScope};
