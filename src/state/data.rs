/// Shared data structures for the survey form
///
/// These structs represent the data model that flows between
/// the survey definition file and the UI layer.

use serde::{Deserialize, Serialize};

/// A purchasable item the survey asks the respondent to identify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, recorded in survey responses
    pub id: String,
    /// Display name shown in the picker
    pub name: String,
    /// Full-size product photo
    pub image_path: String,
    /// Pre-rendered thumbnail (may be missing or stale)
    pub thumbnail_path: String,
}

/// Survey display variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurveyStyle {
    /// Header and product picker only
    #[default]
    Simple,
    /// Additionally shows the promotional giveaway banner
    WithInfo,
}

/// A survey definition: display style plus the products to choose from
///
/// Products keep the order they have in the definition file; that order
/// is the display order of the picker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Survey {
    #[serde(default)]
    pub style: SurveyStyle,
    pub products: Vec<Product>,
}

impl Survey {
    /// Look up a product by its id
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
