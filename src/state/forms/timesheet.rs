//! Timesheet entry form

use super::field::FormField;
use crate::backend::TimesheetEntry;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_HOURS_PER_ENTRY: f32 = 24.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimesheetError {
    #[error("date '{0}' is not in YYYY-MM-DD format")]
    InvalidDate(String),
    #[error("hours must be a number")]
    MissingHours,
    #[error("hours must be above 0 and at most 24, got {0}")]
    HoursOutOfRange(f32),
}

#[derive(Debug, Clone)]
pub struct TimesheetForm {
    pub date: FormField,
    pub hours: FormField,
    pub description: FormField,
    pub active_field_index: usize,
    /// Id of the entry being edited; kept across failed saves so a retry
    /// cannot store it twice
    entry_id: String,
}

impl TimesheetForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: FormField::text_with_value(
                "date",
                "Date (YYYY-MM-DD)",
                today.format("%Y-%m-%d").to_string(),
                false,
            ),
            hours: FormField::decimal("hours", "Hours"),
            description: FormField::text("description", "Work description", true),
            active_field_index: 0,
            entry_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn field_count(&self) -> usize {
        3
    }

    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.field_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.field_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    pub fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.date,
            1 => &mut self.hours,
            _ => &mut self.description,
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.date),
            1 => Some(&self.hours),
            2 => Some(&self.description),
            _ => None,
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    /// Keep the date for the next entry of the same day, clear the rest
    pub fn reset_for_next_entry(&mut self) {
        self.hours.clear();
        self.description.clear();
        self.active_field_index = 1;
        self.entry_id = Uuid::new_v4().to_string();
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// Validate the fields and build an entry ready to send
    pub fn to_entry(
        &self,
        operator: &str,
        now: DateTime<Utc>,
    ) -> Result<TimesheetEntry, TimesheetError> {
        let raw_date = self.date.as_text().trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| TimesheetError::InvalidDate(raw_date.to_string()))?;

        let hours = self.hours.as_decimal().ok_or(TimesheetError::MissingHours)?;
        if hours <= 0.0 || hours > MAX_HOURS_PER_ENTRY {
            return Err(TimesheetError::HoursOutOfRange(hours));
        }

        Ok(TimesheetEntry {
            id: self.entry_id.clone(),
            operator: operator.to_string(),
            date,
            hours,
            description: self.description.as_text().to_string(),
            created_at: now,
        })
    }
}
