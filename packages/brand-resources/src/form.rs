//! Form state for the admin screens, independent of any UI toolkit.
//!
//! ```text
//! Idle ──open_new/open_edit──► Editing ──submit──► Submitting ──ok──► Idle
//!   ▲                            ▲                     │
//!   │                            └──────err (alert)────┘
//!   └──cancel/confirm── ConfirmingDelete ◄──request_delete── Idle
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ResourceError, Result, ValidationError};
use crate::item::ResourceItem;
use crate::store::ResourceStore;

/// An editable copy of an entity.
pub trait Draft: Clone + Serialize + Send + Sync {
    /// Check required fields before any request is made.
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Ok(())
    }

    /// Pure, synchronous clean-up applied right before submit
    /// (e.g. turning a pasted video link into its embed URL).
    fn normalize(self) -> std::result::Result<Self, ValidationError> {
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState<D> {
    Idle,
    Editing { draft: D, target: Option<String> },
    Submitting { draft: D, target: Option<String> },
    ConfirmingDelete { id: String },
}

#[derive(Debug, Clone)]
pub struct FormController<D: Draft> {
    state: FormState<D>,
    alert: Option<String>,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
            alert: None,
        }
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState<D> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FormState::Idle)
    }

    /// The blocking alert to show, if the last action failed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Open the modal for a new entity.
    pub fn open_new(&mut self, defaults: D) {
        self.alert = None;
        self.state = FormState::Editing {
            draft: defaults,
            target: None,
        };
    }

    /// Open the modal pre-filled from an existing item.
    pub fn open_edit<T>(&mut self, item: &T)
    where
        T: ResourceItem,
        D: for<'a> From<&'a T>,
    {
        self.alert = None;
        self.state = FormState::Editing {
            draft: D::from(item),
            target: Some(item.id().to_string()),
        };
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            FormState::Editing { draft, .. } | FormState::Submitting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            FormState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }

    /// Validate, normalize and send the draft through the store.
    ///
    /// Success closes the form. Any failure records an alert and reopens the
    /// form with the draft the user typed, so they can retry.
    pub async fn submit<T: ResourceItem>(&mut self, store: &ResourceStore<T>) -> Result<T> {
        let (draft, target) = match std::mem::replace(&mut self.state, FormState::Idle) {
            FormState::Editing { draft, target } => (draft, target),
            other => {
                self.state = other;
                return Err(ValidationError::NothingToSubmit.into());
            }
        };

        self.state = FormState::Submitting {
            draft: draft.clone(),
            target: target.clone(),
        };

        let result = match draft.clone().normalize().and_then(|d| d.validate().map(|_| d)) {
            Ok(payload) => match &target {
                Some(id) => store.update(id, &payload).await,
                None => store.create(&payload).await,
            },
            Err(e) => Err(ResourceError::from(e)),
        };

        match result {
            Ok(item) => {
                debug!(id = item.id(), "Form submitted");
                self.alert = None;
                self.state = FormState::Idle;
                Ok(item)
            }
            Err(e) => {
                warn!(error = %e, "Form submit failed");
                self.alert = Some(e.user_message());
                self.state = FormState::Editing { draft, target };
                Err(e)
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.alert = None;
        self.state = FormState::ConfirmingDelete { id: id.into() };
    }

    /// The user confirmed; delete with the resource's policy.
    pub async fn confirm_delete<T: ResourceItem>(&mut self, store: &ResourceStore<T>) -> Result<()> {
        let id = match &self.state {
            FormState::ConfirmingDelete { id } => id.clone(),
            _ => return Err(ValidationError::NothingToSubmit.into()),
        };

        self.state = FormState::Idle;
        if let Err(e) = store.remove(&id).await {
            warn!(id = %id, error = %e, "Delete failed");
            self.alert = Some(e.user_message());
            return Err(e);
        }
        Ok(())
    }
}
