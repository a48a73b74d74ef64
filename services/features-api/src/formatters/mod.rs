//! Output formatters, one per profile and media type family.
//!
//! Every formatter borrows its model and returns a complete body, so a model
//! can be rendered more than once.

pub mod alt;
pub mod geojson;
pub mod html;
pub mod ogc_json;
pub mod rdf;

use serde_json::Value;

use crate::error::ApiError;

/// The OpenAPI 3.0 definition of this API.
const OPENAPI_SPEC: &str = include_str!("../../openapi.yaml");

/// The OpenAPI definition as JSON, with the server URL filled in.
pub fn openapi(base_url: &str) -> Result<String, ApiError> {
    let mut document: Value = serde_yaml::from_str(OPENAPI_SPEC)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    document["servers"] = serde_json::json!([{ "url": base_url }]);
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let json: Value = serde_json::from_str(&openapi("https://example.com/api").unwrap()).unwrap();
        assert_eq!(json["openapi"], "3.0.3");
        assert_eq!(json["servers"][0]["url"], "https://example.com/api");
        assert!(json["paths"]["/collections/{collectionId}/items"].is_object());
    }
}
