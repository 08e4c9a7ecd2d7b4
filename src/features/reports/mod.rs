//! Citizen reports: creation, listing and status updates.
//!
//! Records live in process memory inside [`ReportService`]; only photos are
//! written to disk.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reports` | Submit a report (multipart, optional photo) |
//! | GET | `/api/reports` | List all reports in creation order |
//! | GET | `/api/reports/summary` | Report counts |
//! | GET | `/api/reports/{id}` | Get one report |
//! | PUT | `/api/reports/{id}` | Update status and/or text fields |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{ReportService, ReportStore};
