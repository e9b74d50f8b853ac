//! IT specialization service.

use helpdesk_core::SpecializationId;
use sqlx::MySqlPool;
use tracing::instrument;

use crate::db::{RepositoryError, SpecializationRepository};
use crate::models::NewSpecialization;

/// Specialization inserts on top of [`SpecializationRepository`].
pub struct SpecializationService<'a> {
    specializations: SpecializationRepository<'a>,
}

impl<'a> SpecializationService<'a> {
    /// Create a new specialization service.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self {
            specializations: SpecializationRepository::new(pool),
        }
    }

    /// Create a specialization.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the department does not
    /// exist, and other `RepositoryError`s for failures.
    #[instrument(skip(self, specialization))]
    pub async fn create(
        &self,
        specialization: &NewSpecialization,
    ) -> Result<Option<SpecializationId>, RepositoryError> {
        self.specializations.create(specialization).await
    }
}
