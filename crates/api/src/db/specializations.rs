//! IT specialization repository.
//!
//! Inserts are checked by a trigger that rejects unknown departments.

use helpdesk_core::SpecializationId;
use sqlx::MySqlPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::NewSpecialization;

/// Repository for `IT_Specialization`.
pub struct SpecializationRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> SpecializationRepository<'a> {
    /// Create a new specialization repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a specialization and return the generated id.
    ///
    /// Returns `None` if the table reports no generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the department trigger
    /// refuses the row, `RepositoryError::IntegrityViolation` for constraint
    /// failures, and `RepositoryError::Database` for other failures.
    #[instrument(skip(self, specialization), fields(name = %specialization.name))]
    pub async fn create(
        &self,
        specialization: &NewSpecialization,
    ) -> Result<Option<SpecializationId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO IT_Specialization
                (department_id, name, required_certifications)
            VALUES (?, ?, ?)
            ",
        )
        .bind(specialization.department_id)
        .bind(&specialization.name)
        .bind(specialization.required_certifications.as_deref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        match result.last_insert_id() {
            0 => Ok(None),
            id => i32::try_from(id)
                .map(|id| Some(SpecializationId::new(id)))
                .map_err(|_| {
                    RepositoryError::DataCorruption(format!("specialization id {id} out of range"))
                }),
        }
    }
}
