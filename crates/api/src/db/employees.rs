//! Employee repository.
//!
//! Deletions from `employees` are normally rejected by a `BEFORE DELETE`
//! trigger; that rejection surfaces as [`RepositoryError::TriggerRejected`].

use helpdesk_core::{DepartmentId, EmployeeId};
use sqlx::MySqlPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::{DepartmentEmployee, Employee, NewEmployee};

/// Repository for `employees` and the department report.
pub struct EmployeeRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert an employee and return the generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IntegrityViolation` if the department does not exist
    /// or the email is taken, `RepositoryError::TriggerRejected` if a trigger aborts
    /// the insert, and `RepositoryError::Database` for other failures.
    #[instrument(skip(self, employee), fields(email = %employee.email))]
    pub async fn create(&self, employee: &NewEmployee) -> Result<EmployeeId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO employees
                (first_name, last_name, email, department_id, is_it_staff)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.department_id)
        .bind(employee.is_it_staff)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = i32::try_from(result.last_insert_id()).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "employee id {} out of range",
                result.last_insert_id()
            ))
        })?;
        Ok(EmployeeId::new(id))
    }

    /// Get an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, Employee>(
            r"
            SELECT employee_id, first_name, last_name, email, department_id, is_it_staff
            FROM employees
            WHERE employee_id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List every employee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, Employee>(
            r"
            SELECT employee_id, first_name, last_name, email, department_id, is_it_staff
            FROM employees
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Overwrite every writable column of an employee.
    ///
    /// Returns `true` if a row changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IntegrityViolation` for constraint failures and
    /// `RepositoryError::Database` for other failures.
    #[instrument(skip(self, employee))]
    pub async fn update(
        &self,
        id: EmployeeId,
        employee: &NewEmployee,
    ) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?,
                department_id = ?, is_it_staff = ?
            WHERE employee_id = ?
            ",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.department_id)
        .bind(employee.is_it_staff)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an employee.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the deletion trigger fires,
    /// `RepositoryError::IntegrityViolation` when other rows still reference the
    /// employee, and `RepositoryError::Database` for other failures.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the employees of a department, ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentEmployee>, RepositoryError> {
        let rows = sqlx::query_as::<_, DepartmentEmployee>(
            r"
            SELECT e.employee_id, e.first_name, e.last_name, e.email,
                   d.name AS department_name
            FROM employees e
            JOIN departments d ON e.department_id = d.department_id
            WHERE d.department_id = ?
            ORDER BY e.last_name
            ",
        )
        .bind(department_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
