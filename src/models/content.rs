use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewService {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub duration: Option<String>,
}

/// Partial update; only provided fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewGalleryItem {
    pub url: String,
    pub caption: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryUpdate {
    pub url: Option<String>,
    pub caption: Option<String>,
    pub category: Option<String>,
}
