use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::attendance::store::RecordStore;
use crate::model::attendance::AttendanceRecord;

/// How long the confirmation screen stays up before the form resets.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("previous check-in is still being confirmed")]
    ConfirmationPending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInDraft {
    #[schema(example = "Juan Dela Cruz")]
    pub name: String,
    #[schema(example = "2024-001")]
    pub employee_number: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2024-05-01")]
    pub date: String,
    #[schema(example = "08:00")]
    pub arrival_time: String,
}

impl CheckInDraft {
    /// Blank draft with the date and time pre-filled from `now`.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            arrival_time: now.format("%H:%M").to_string(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), CaptureError> {
        if self.name.trim().is_empty() {
            return Err(CaptureError::MissingField("name"));
        }
        if self.department.trim().is_empty() {
            return Err(CaptureError::MissingField("department"));
        }
        if self.employee_number.trim().is_empty() {
            return Err(CaptureError::MissingField("employeeNumber"));
        }
        Ok(())
    }

    fn into_record(self, submitted_at: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            employee_number: self.employee_number,
            department: self.department,
            date: self.date,
            arrival_time: self.arrival_time,
            timestamp: submitted_at.timestamp_millis(),
        }
    }

    /// Fills an omitted date or arrival time from the submit instant.
    fn or_defaults(mut self, submitted_at: DateTime<Local>) -> Self {
        if self.date.trim().is_empty() {
            self.date = submitted_at.format("%Y-%m-%d").to_string();
        }
        if self.arrival_time.trim().is_empty() {
            self.arrival_time = submitted_at.format("%H:%M").to_string();
        }
        self
    }

    /// Keeps date and time, clears who checked in.
    fn cleared(&self) -> Self {
        Self {
            date: self.date.clone(),
            arrival_time: self.arrival_time.clone(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FormState {
    Editing {
        draft: CheckInDraft,
    },
    #[serde(rename_all = "camelCase")]
    Confirmed {
        name: String,
        #[serde(skip)]
        until: DateTime<Utc>,
        #[serde(skip)]
        draft: CheckInDraft,
    },
}

/// The kiosk check-in form: editing a draft, or showing the confirmation
/// for the person who just checked in.
#[derive(Debug, Clone)]
pub struct CheckInForm {
    state: FormState,
}

impl CheckInForm {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            state: FormState::Editing {
                draft: CheckInDraft::new(now),
            },
        }
    }

    /// Opens the form afresh, as when the check-in screen is shown again.
    /// Any pending confirmation is dropped.
    pub fn reopen(&mut self, now: DateTime<Local>) {
        *self = Self::new(now);
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.state, FormState::Confirmed { .. })
    }

    /// Validates `draft`, appends exactly one record and switches to the
    /// confirmation state. Nothing is appended on error.
    pub fn submit(
        &mut self,
        draft: CheckInDraft,
        store: &mut RecordStore,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, CaptureError> {
        self.tick(now);
        if self.is_confirming() {
            return Err(CaptureError::ConfirmationPending);
        }
        let draft = draft.or_defaults(now.with_timezone(&Local));
        draft.validate()?;

        let next_draft = draft.cleared();
        let record = draft.into_record(now);
        store.append(record.clone());

        let delay = chrono::Duration::milliseconds(CONFIRMATION_DELAY.as_millis() as i64);
        self.state = FormState::Confirmed {
            name: record.name.clone(),
            until: now + delay,
            draft: next_draft,
        };

        Ok(record)
    }

    /// "New Check-in": leave the confirmation state immediately.
    pub fn acknowledge(&mut self) {
        let draft = match &self.state {
            FormState::Confirmed { draft, .. } => draft.clone(),
            FormState::Editing { .. } => return,
        };
        self.state = FormState::Editing { draft };
    }

    /// Leaves the confirmation state once its delay has elapsed.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let expired = matches!(&self.state, FormState::Confirmed { until, .. } if now >= *until);
        if expired {
            self.acknowledge();
        }
    }
}
