//! Employee rows and DTOs.

use helpdesk_core::{DepartmentId, EmployeeId};
use serde::Serialize;

/// A row of the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<DepartmentId>,
    pub is_it_staff: Option<bool>,
}

/// Values written by employee inserts and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: DepartmentId,
    pub is_it_staff: bool,
}

/// Employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: Option<DepartmentId>,
    pub is_it_staff: bool,
}

impl From<Employee> for EmployeeDto {
    fn from(row: Employee) -> Self {
        Self {
            id: row.employee_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            department_id: row.department_id,
            is_it_staff: row.is_it_staff.unwrap_or(false),
        }
    }
}

/// Row of the employees-by-department report (serialized as stored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DepartmentEmployee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row() -> Employee {
        Employee {
            employee_id: EmployeeId::new(12),
            first_name: "Olena".to_string(),
            last_name: "Kovalenko".to_string(),
            email: "olena@helpdesk.test".to_string(),
            department_id: Some(DepartmentId::new(3)),
            is_it_staff: Some(true),
        }
    }

    #[test]
    fn test_dto_uses_camel_case() {
        let json = serde_json::to_value(EmployeeDto::from(row())).unwrap();

        assert_eq!(json["id"], 12);
        assert_eq!(json["firstName"], "Olena");
        assert_eq!(json["lastName"], "Kovalenko");
        assert_eq!(json["email"], "olena@helpdesk.test");
        assert_eq!(json["departmentId"], 3);
        assert_eq!(json["isItStaff"], true);
    }

    #[test]
    fn test_null_it_staff_flag_is_false() {
        let dto = EmployeeDto::from(Employee {
            is_it_staff: None,
            ..row()
        });
        assert!(!dto.is_it_staff);
    }

    #[test]
    fn test_department_report_keeps_column_names() {
        let json = serde_json::to_value(DepartmentEmployee {
            employee_id: EmployeeId::new(1),
            first_name: "Ivan".to_string(),
            last_name: "Shevchuk".to_string(),
            email: "ivan@helpdesk.test".to_string(),
            department_name: "IT".to_string(),
        })
        .unwrap();

        assert_eq!(json["employee_id"], 1);
        assert_eq!(json["department_name"], "IT");
    }
}
