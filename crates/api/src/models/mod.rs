//! Storage rows and wire DTOs.
//!
//! Row types mirror the `MySQL` columns (snake_case) and are produced by the
//! repositories in [`crate::db`]. DTOs are what the API serializes
//! (camelCase) and are produced by the services in [`crate::services`].

pub mod employee;
pub mod equipment;
pub mod specialization;
pub mod ticket;

pub use employee::{DepartmentEmployee, Employee, EmployeeDto, NewEmployee};
pub use equipment::{EquipmentTypeCount, EquipmentTypeReport, SplitLogOutcome};
pub use specialization::NewSpecialization;
pub use ticket::{NewTicketAssignment, PriorityStats, PriorityStatsRow, TicketAssignment};
