//! Services between the HTTP handlers and the repositories.
//!
//! Each service borrows the pool for one request, converts storage rows into
//! API DTOs and reshapes report rows.
//!
//! # Services
//!
//! - `employees` - Employee CRUD and the department report
//! - `equipment` - Equipment report and equipment-type procedures
//! - `specializations` - IT specialization inserts
//! - `tickets` - Ticket assignments and priority statistics

pub mod employees;
pub mod equipment;
pub mod specializations;
pub mod tickets;

pub use employees::EmployeeService;
pub use equipment::{BatchInsertOutcome, EquipmentService};
pub use specializations::SpecializationService;
pub use tickets::TicketService;
