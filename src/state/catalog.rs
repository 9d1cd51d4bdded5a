use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;

use super::data::Survey;

/// Errors raised while loading a survey definition file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read survey definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid survey definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a survey definition from a JSON file
///
/// The definition supplies the display style and the product list;
/// product order in the file is the display order.
pub fn load_survey(path: &Path) -> Result<Survey, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let survey = parse_survey(&contents)?;

    println!(
        "🛍️  Loaded survey definition: {} ({} products)",
        path.display(),
        survey.products.len()
    );

    Ok(survey)
}

/// Parse a survey definition from JSON text
pub fn parse_survey(json: &str) -> Result<Survey, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a survey definition in the background
///
/// Runs the file read on a blocking task so the UI thread never waits on
/// disk. Errors are flattened to strings for message passing.
pub async fn load_survey_async(path: PathBuf) -> Result<Survey, String> {
    task::spawn_blocking(move || load_survey(&path).map_err(|e| e.to_string()))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::SurveyStyle;

    const SAMPLE: &str = r#"{
        "style": "WithInfo",
        "products": [
            {
                "id": "p1",
                "name": "Widget",
                "image_path": "assets/images/widget.png",
                "thumbnail_path": "assets/images/widget_thumb.png"
            },
            {
                "id": "p2",
                "name": "Gadget",
                "image_path": "assets/images/gadget.png",
                "thumbnail_path": "assets/images/gadget_thumb.png"
            }
        ]
    }"#;

    #[test]
    fn test_parse_preserves_product_order() {
        let survey = parse_survey(SAMPLE).unwrap();

        assert_eq!(survey.style, SurveyStyle::WithInfo);
        assert_eq!(survey.products.len(), 2);
        assert_eq!(survey.products[0].id, "p1");
        assert_eq!(survey.products[1].id, "p2");
        assert_eq!(survey.product("p2").unwrap().name, "Gadget");
    }

    #[test]
    fn test_style_defaults_to_simple() {
        let survey = parse_survey(r#"{ "products": [] }"#).unwrap();

        assert_eq!(survey.style, SurveyStyle::Simple);
        assert!(survey.products.is_empty());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let result = parse_survey(r#"{ "style": "Fancy", "products": [] }"#);

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_survey_async(PathBuf::from("/nonexistent/survey.json")).await;

        assert!(result.is_err());
    }
}
