//! # Repository Layer
//!
//! This module contains one repository per entity. Each owns a shared handle
//! to its in-memory collection and applies the injected latency strategy
//! around every operation.

pub mod department;
pub mod employee;
pub mod leave_request;
pub mod onboarding;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use leave_request::LeaveRequestRepository;
pub use onboarding::{
    CategoryBreakdown, CategoryProgress, OnboardingProgress, OnboardingRepository,
};
