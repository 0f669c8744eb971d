use serde_json::{Value, json};

use crate::client::Client;
use crate::error::ApiError;
use crate::method::Method;

impl Client {
    pub fn list_keys(&self) -> Result<Value, ApiError> {
        self.get("/account/keys")
    }

    pub fn create_key(&self, name: &str, public_key: &str) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Post,
            "/account/keys",
            &json!({ "name": name, "public_key": public_key }),
        )
    }

    /// `key_id` may be the numeric id or the key fingerprint.
    pub fn get_key(&self, key_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/account/keys/{key_id}"))
    }

    pub fn update_key(&self, key_id: &str, name: &str) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Put,
            &format!("/account/keys/{key_id}"),
            &json!({ "name": name }),
        )
    }

    pub fn destroy_key(&self, key_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/account/keys/{key_id}"))
    }
}
