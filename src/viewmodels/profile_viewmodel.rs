// ============================================================================
// PROFILE VIEWMODEL
// ============================================================================

use thiserror::Error;

use crate::models::profile::{ProfileUpdate, ProfileUpdateError};
use crate::models::EmployeeProfile;
use crate::services::{ApiError, ProfileService};
use crate::state::SessionHandle;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Please log in to view your profile.")]
    AccessDenied,
    #[error(transparent)]
    InvalidInput(#[from] ProfileUpdateError),
    #[error("There is nothing to update.")]
    NothingToUpdate,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to update profile. Please try again.")]
    Merge,
}

#[derive(Clone)]
pub struct ProfileViewModel {
    service: ProfileService,
    session: SessionHandle,
}

impl ProfileViewModel {
    pub fn new(service: ProfileService, session: SessionHandle) -> Self {
        Self { service, session }
    }

    /// The employee record, or one derived from the session user when the
    /// backend has none.
    pub async fn load(&self) -> Result<EmployeeProfile, ProfileError> {
        let user = self.session.user().ok_or(ProfileError::AccessDenied)?;

        match self.service.fetch(&user.id).await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                log::warn!("⚠️ [PROFILE] Using session fallback for {}: {}", user.email, e);
                Ok(EmployeeProfile::from_user(&user))
            }
        }
    }

    /// Sends the non-empty form fields and returns the merged profile
    pub async fn save<'a, I>(&self, current: &EmployeeProfile, form: I) -> Result<EmployeeProfile, ProfileError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let user = self.session.user().ok_or(ProfileError::AccessDenied)?;
        let update = ProfileUpdate::from_form(form)?;
        if update.is_empty() {
            return Err(ProfileError::NothingToUpdate);
        }

        self.service.update(&user.id, &update).await?;
        log::info!("✅ [PROFILE] Updated {} field(s)", update.fields().len());

        current.merged(&update).map_err(|e| {
            log::error!("❌ [PROFILE] Merge failed: {}", e);
            ProfileError::Merge
        })
    }
}
