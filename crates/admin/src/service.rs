//! Validated writes.
//!
//! [`ItemService`] is the only path from a submitted form to the store. Every
//! add, update and delete passes the [`Validator`] first; a rejected verdict
//! is returned to the caller and nothing is written.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};
use zia_mia_core::form::{FormFields, Submission, edit_fields, parse_submission};
use zia_mia_core::{
    DataAccess, DataAccessError, DraftError, ItemType, Operation, Record, Validator, Verdict,
};

/// Infrastructure failures while serving a write.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Data(#[from] DataAccessError),

    /// A draft passed validation but could not be turned into a payload.
    #[error("accepted draft could not be written: {0}")]
    Draft(#[from] DraftError),
}

/// Result of a gated write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The write reached the store.
    Done(T),
    /// The write was inadmissible; the store was not touched.
    Rejected(Verdict),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Validate-then-write operations over one data access handle.
#[derive(Clone)]
pub struct ItemService {
    data: Arc<dyn DataAccess>,
    validator: Validator,
}

impl ItemService {
    pub fn new(data: Arc<dyn DataAccess>) -> Self {
        Self {
            validator: Validator::new(Arc::clone(&data)),
            data,
        }
    }

    /// The data access handle writes go to.
    #[must_use]
    pub fn data(&self) -> &Arc<dyn DataAccess> {
        &self.data
    }

    /// Add or update a record from raw form fields.
    ///
    /// A form with an `id` field updates that record, otherwise a new record
    /// is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; rule violations come back as
    /// [`Outcome::Rejected`].
    #[instrument(skip(self, fields))]
    pub async fn submit(
        &self,
        item_type: &str,
        fields: &FormFields,
    ) -> Result<Outcome<Record>, ServiceError> {
        let Submission { operation, draft } = match parse_submission(item_type, fields) {
            Ok(submission) => submission,
            Err(err) => return Ok(Outcome::Rejected(err.into())),
        };

        if let (Operation::Update, Some(id)) = (operation, draft.id()) {
            let item_type = draft.item_type();
            if self.data.record(item_type, id).await?.is_none() {
                return Ok(Outcome::Rejected(Verdict::not_found(item_type, id)));
            }
        }

        let verdict = self.validator.validate_add_update(operation, &draft).await?;
        if verdict.has_errors() {
            warn!(%operation, violations = verdict.violations().len(), "write rejected");
            return Ok(Outcome::Rejected(verdict));
        }

        let payload = draft.to_payload()?;
        let written = match (operation, draft.id()) {
            (Operation::Update, Some(id)) => self.data.update(id, &payload).await,
            _ => self.data.create(&payload).await,
        };

        match written {
            Ok(record) => {
                info!(%operation, id = record.id(), "record written");
                Ok(Outcome::Done(record))
            }
            Err(DataAccessError::NotFound { item_type, id }) => {
                Ok(Outcome::Rejected(Verdict::not_found(item_type, id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Change fields of an existing record.
    ///
    /// The record is loaded, `changes` are laid over its current values, and
    /// the result goes through [`ItemService::submit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        item_type: &str,
        id: i32,
        changes: &FormFields,
    ) -> Result<Outcome<Record>, ServiceError> {
        let Ok(parsed) = item_type.parse::<ItemType>() else {
            return Ok(Outcome::Rejected(Verdict::incorrect_item_type()));
        };
        let Some(record) = self.data.record(parsed, id).await? else {
            return Ok(Outcome::Rejected(Verdict::not_found(parsed, id)));
        };

        match edit_fields(&record, changes) {
            Ok(fields) => self.submit(item_type, &fields).await,
            Err(err) => Ok(Outcome::Rejected(err.into())),
        }
    }

    /// Delete a record if referential integrity allows it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, item_type: &str, id: i32) -> Result<Outcome<()>, ServiceError> {
        let verdict = self.validator.validate_delete_tagged(item_type, id).await?;
        if verdict.has_errors() {
            warn!(violations = verdict.violations().len(), "delete rejected");
            return Ok(Outcome::Rejected(verdict));
        }
        let Ok(item_type) = item_type.parse::<ItemType>() else {
            return Ok(Outcome::Rejected(Verdict::incorrect_item_type()));
        };

        match self.data.delete(item_type, id).await {
            Ok(()) => {
                info!("record deleted");
                Ok(Outcome::Done(()))
            }
            Err(DataAccessError::NotFound { item_type, id }) => {
                Ok(Outcome::Rejected(Verdict::not_found(item_type, id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService").finish_non_exhaustive()
    }
}
