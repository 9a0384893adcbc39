use serde::{Deserialize, Serialize};

/// A shop brand as listed in catalog exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "brand_id")]
    pub id: String,

    #[serde(rename = "brand_name", default)]
    pub name: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Brand {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_deserialize_defaults() {
        let brand: Brand = serde_json::from_str(r#"{"brand_id": "coco"}"#).unwrap();
        assert_eq!(brand.id, "coco");
        assert!(brand.name.is_empty());
        assert!(brand.is_active);
    }
}
