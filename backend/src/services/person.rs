//! Staff record management
//!
//! Reads, partial updates and deletion of staff records. An update that
//! carries a password is hashed here before the store is called; an update
//! without one never touches the stored hash.

use super::{check, validate_request};
use crate::auth::{AuthUser, PasswordService};
use crate::error::ApiError;
use crate::repositories::{PersonChanges, PersonStore};
use hotel_shared::models::{Person, WorkType};
use hotel_shared::types::UpdatePersonRequest;
use hotel_shared::validation;
use tracing::info;
use uuid::Uuid;

/// Staff service
pub struct PersonService;

impl PersonService {
    /// Record of the authenticated staff member
    pub async fn profile(people: &dyn PersonStore, user: &AuthUser) -> Result<Person, ApiError> {
        people
            .find_by_id(user.id)
            .await?
            .map(|record| record.to_person())
            .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))
    }

    /// All staff, or those of one work type
    ///
    /// An unrecognised work type is reported as not found.
    pub async fn list(
        people: &dyn PersonStore,
        work: Option<&str>,
    ) -> Result<Vec<Person>, ApiError> {
        let work = work
            .map(|w| w.parse::<WorkType>())
            .transpose()
            .map_err(|_| ApiError::NotFound("Invalid work type".to_string()))?;

        let records = people.find_all(work).await?;
        Ok(records.iter().map(|r| r.to_person()).collect())
    }

    pub async fn get(people: &dyn PersonStore, id: Uuid) -> Result<Person, ApiError> {
        people
            .find_by_id(id)
            .await?
            .map(|record| record.to_person())
            .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))
    }

    /// Apply a partial update
    pub async fn update(
        people: &dyn PersonStore,
        passwords: &PasswordService,
        id: Uuid,
        req: UpdatePersonRequest,
    ) -> Result<Person, ApiError> {
        validate_request(&req)?;
        if let Some(username) = &req.username {
            check(validation::validate_username(username))?;
        }
        if let Some(mobile) = &req.mobile {
            check(validation::validate_mobile(mobile))?;
        }
        if let Some(salary) = &req.salary {
            check(validation::validate_salary(salary))?;
        }

        let password_changed = req.password.is_some();
        let password_hash = match req.password {
            Some(password) => Some(
                passwords
                    .hash_async(password)
                    .await
                    .map_err(ApiError::Internal)?,
            ),
            None => None,
        };

        let changes = PersonChanges {
            username: req.username,
            password_hash,
            name: req.name,
            age: req.age,
            work: req.work,
            mobile: req.mobile,
            email: req.email,
            address: req.address,
            salary: req.salary,
        };

        let record = people
            .update(id, changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))?;

        info!(person_id = %record.id, password_changed, "Staff record updated");
        Ok(record.to_person())
    }

    pub async fn delete(people: &dyn PersonStore, id: Uuid) -> Result<(), ApiError> {
        if !people.delete(id).await? {
            return Err(ApiError::NotFound("Person not found".to_string()));
        }
        info!(person_id = %id, "Staff record deleted");
        Ok(())
    }
}
