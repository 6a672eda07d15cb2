use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::HistoryError;

pub const SAVED_MESSAGE: &str = "Calculation saved";

/// One stored row of the `calculations` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Calculation {
    pub id: i32,
    pub expression: String,
    pub result: String,
    pub created_at: NaiveDateTime,
}

/// POST body. Absent or `null` fields come through as empty strings and
/// are rejected by [`NewCalculation::validate`].
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NewCalculation {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expression: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewCalculation {
    pub fn from_body(body: &[u8]) -> Result<Self, HistoryError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body).map_err(HistoryError::InvalidBody)
    }

    pub fn validate(self) -> Result<Self, HistoryError> {
        if self.expression.is_empty() || self.result.is_empty() {
            return Err(HistoryError::MissingFields);
        }
        Ok(self)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CalculationList {
    pub calculations: Vec<Calculation>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Saved {
    pub id: i32,
    pub message: &'static str,
}

impl Saved {
    pub fn new(id: i32) -> Self {
        Self { id, message: SAVED_MESSAGE }
    }
}
