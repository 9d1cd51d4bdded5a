/// Survey response records
///
/// A response is created the moment the respondent picks a product.
/// It is serialized to JSON for submission and logging.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A recorded answer to the product question
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyResponse {
    /// Id of the product the respondent picked
    pub product_id: String,
    /// Unix timestamp (seconds) of the pick
    pub responded_at: i64,
}

impl SurveyResponse {
    /// Record a pick, stamped with the current time
    pub fn new(product_id: String) -> Self {
        Self {
            product_id,
            responded_at: Utc::now().timestamp(),
        }
    }

    /// Convert to JSON string for submission
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
