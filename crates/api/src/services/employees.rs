//! Employee service.

use helpdesk_core::{DepartmentId, EmployeeId};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::db::{EmployeeRepository, RepositoryError};
use crate::models::{DepartmentEmployee, EmployeeDto, NewEmployee};

/// Employee CRUD on top of [`EmployeeRepository`].
pub struct EmployeeService<'a> {
    employees: EmployeeRepository<'a>,
}

impl<'a> EmployeeService<'a> {
    /// Create a new employee service.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self {
            employees: EmployeeRepository::new(pool),
        }
    }

    /// List every employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<EmployeeDto>, RepositoryError> {
        let rows = self.employees.list_all().await?;
        Ok(rows.into_iter().map(EmployeeDto::from).collect())
    }

    /// Get an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: EmployeeId) -> Result<Option<EmployeeDto>, RepositoryError> {
        Ok(self.employees.get_by_id(id).await?.map(EmployeeDto::from))
    }

    /// Create an employee and return it as stored.
    ///
    /// Returns `None` if the new row cannot be read back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert or the read fails.
    #[instrument(skip(self, employee))]
    pub async fn create(
        &self,
        employee: &NewEmployee,
    ) -> Result<Option<EmployeeDto>, RepositoryError> {
        let id = self.employees.create(employee).await?;
        tracing::info!(employee_id = %id, "Employee created");
        self.get(id).await
    }

    /// Overwrite an employee and return it as stored.
    ///
    /// Returns `None` when no row changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the update or the read fails.
    #[instrument(skip(self, employee))]
    pub async fn update(
        &self,
        id: EmployeeId,
        employee: &NewEmployee,
    ) -> Result<Option<EmployeeDto>, RepositoryError> {
        if !self.employees.update(id, employee).await? {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete an employee. Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the deletion trigger
    /// blocks the delete, and other `RepositoryError`s for failures.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        self.employees.delete(id).await
    }

    /// Employees of a department, ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn in_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentEmployee>, RepositoryError> {
        self.employees.list_by_department(department_id).await
    }
}
