use serde::Serialize;
use serde_json::{Value, json};

use crate::client::{Client, Params};
use crate::error::ApiError;
use crate::method::Method;

/// Body of `POST /images/:id/actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageAction {
    /// Copies the image to another region.
    Transfer { region: String },
}

impl Client {
    /// Lists images, optionally narrowed by the `filter` query parameter
    /// (`global`, `my_images`, ...).
    pub fn images(&self, filter: Option<&str>) -> Result<Value, ApiError> {
        let mut params = Params::new();
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.insert("filter".to_string(), Value::from(filter));
        }
        self.dispatch(Method::Get, "/images", Some(&params))
    }

    pub fn get_image(&self, image_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/images/{image_id}"))
    }

    pub fn delete_image(&self, image_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/images/{image_id}"))
    }

    /// Renames an image.
    pub fn update_image(&self, image_id: &str, name: &str) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Put,
            &format!("/images/{image_id}"),
            &json!({ "name": name }),
        )
    }

    pub fn image_action(&self, image_id: &str, action: &ImageAction) -> Result<Value, ApiError> {
        self.dispatch_with(Method::Post, &format!("/images/{image_id}/actions"), action)
    }

    pub fn transfer_image(&self, image_id: &str, region: &str) -> Result<Value, ApiError> {
        self.image_action(
            image_id,
            &ImageAction::Transfer {
                region: region.to_string(),
            },
        )
    }
}
