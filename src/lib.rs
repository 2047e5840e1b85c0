//! # hrdesk
//!
//! In-memory HR data layer: employees, departments, leave requests and an
//! onboarding checklist, seeded from JSON fixtures, plus the page
//! controllers that load, filter and mutate them.

pub mod config;
pub mod controllers;
pub mod error;
pub mod latency;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
