//! Subject catalogue entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Theory or practical subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    #[serde(rename = "T")]
    Theory,
    #[serde(rename = "P")]
    Practical,
}

impl SubjectType {
    pub fn code(&self) -> &'static str {
        match self {
            SubjectType::Theory => "T",
            SubjectType::Practical => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "T" | "t" => Some(SubjectType::Theory),
            "P" | "p" => Some(SubjectType::Practical),
            _ => None,
        }
    }
}

/// Subject with its marking scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub title: String,

    /// Unique, stored upper case
    pub code: String,

    pub subject_type: SubjectType,
    pub credits: f64,
    pub max_internal_marks: u32,
    pub max_external_marks: u32,
    pub max_total_marks: u32,
    pub min_internal_pass_marks: u32,
    pub min_external_pass_marks: u32,
    pub min_total_pass_marks: u32,
}

impl Subject {
    /// Normalize title and code in place
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.code = self.code.trim().to_uppercase();
    }

    /// Check the marking scheme is internally consistent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "title".to_string(),
            });
        }
        if self.code.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            });
        }
        if self.credits < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "credits".to_string(),
                min: "0".to_string(),
                max: "-".to_string(),
            });
        }
        let components = self.max_internal_marks.checked_add(self.max_external_marks);
        if components.map_or(true, |sum| self.max_total_marks < sum) {
            return Err(ValidationError::BusinessRuleViolation {
                rule: "maxTotalMarks must be greater than or equal to (maxInternalMarks + maxExternalMarks)"
                    .to_string(),
            });
        }
        if self.min_total_pass_marks > self.max_total_marks {
            return Err(ValidationError::BusinessRuleViolation {
                rule: "minTotalPassMarks cannot exceed maxTotalMarks".to_string(),
            });
        }
        Ok(())
    }
}
