//! IT specialization input.

use helpdesk_core::DepartmentId;

/// Values inserted into `IT_Specialization`.
///
/// `department_id` may be absent; the insert trigger decides whether that is
/// acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecialization {
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub required_certifications: Option<String>,
}
