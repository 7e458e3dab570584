//! Personalization table data model

use outreach_common::types::ContactId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cell kind for a personalization column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Number,
    Select,
}

/// A user-defined column in the personalization table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationColumn {
    pub key: String,
    pub label: String,
    pub column_type: ColumnType,
    /// Choices for `Select` columns, empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
}

/// One row of cell values for a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationRow {
    pub contact_id: ContactId,
    pub values: HashMap<String, String>,
}

/// Sender-side inputs for pitch generation. Saved under the
/// `companyPersonalizationData` draft key between wizard visits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,
    pub services: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub special_offers: String,
    #[serde(default)]
    pub sample_pitch: String,
}

impl CompanyProfile {
    /// Company name and services are the minimum the generation
    /// service needs to produce anything useful.
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("Company name is required".to_string());
        }
        if self.services.trim().is_empty() {
            return Err("Services description is required".to_string());
        }
        Ok(())
    }

    /// Free-text company description assembled from the optional
    /// profile fields, sent as context to the generation service.
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if !self.industry.trim().is_empty() {
            parts.push(format!("Industry: {}", self.industry.trim()));
        }
        if !self.target_audience.trim().is_empty() {
            parts.push(format!("Target audience: {}", self.target_audience.trim()));
        }
        if !self.special_offers.trim().is_empty() {
            parts.push(format!("Special offers: {}", self.special_offers.trim()));
        }
        parts.join(". ")
    }
}

/// Per-contact table edited on the personalization page.
///
/// Column keys are unique; every row always carries a value for every
/// column so rendering never has to special-case missing cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalizationTable {
    pub columns: Vec<PersonalizationColumn>,
    pub rows: Vec<PersonalizationRow>,
}

impl PersonalizationTable {
    /// Build a table with one empty row per selected contact.
    pub fn for_contacts(contact_ids: impl IntoIterator<Item = ContactId>) -> Self {
        Self {
            columns: Vec::new(),
            rows: contact_ids
                .into_iter()
                .map(|contact_id| PersonalizationRow {
                    contact_id,
                    values: HashMap::new(),
                })
                .collect(),
        }
    }

    /// Add a column and backfill every row: select columns default to
    /// the first option, everything else to an empty string. Rejects
    /// duplicate keys.
    pub fn add_column(&mut self, column: PersonalizationColumn) -> bool {
        if self.columns.iter().any(|c| c.key == column.key) {
            return false;
        }
        let default = match column.column_type {
            ColumnType::Select => column.options.first().cloned().unwrap_or_default(),
            _ => String::new(),
        };
        for row in &mut self.rows {
            row.values.insert(column.key.clone(), default.clone());
        }
        self.columns.push(column);
        true
    }

    /// Remove a column and strip its values from every row.
    pub fn remove_column(&mut self, key: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.key != key);
        if self.columns.len() == before {
            return false;
        }
        for row in &mut self.rows {
            row.values.remove(key);
        }
        true
    }

    /// Set one cell. The column must exist; the row is matched by
    /// contact.
    pub fn set_value(&mut self, contact_id: ContactId, key: &str, value: impl Into<String>) -> bool {
        if !self.columns.iter().any(|c| c.key == key) {
            return false;
        }
        let Some(row) = self.rows.iter_mut().find(|r| r.contact_id == contact_id) else {
            return false;
        };
        row.values.insert(key.to_string(), value.into());
        true
    }

    pub fn value(&self, contact_id: ContactId, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.contact_id == contact_id)
            .and_then(|r| r.values.get(key))
            .map(String::as_str)
    }
}
