use serde_json::Value;

use crate::client::Client;
use crate::error::ApiError;

impl Client {
    pub fn account_info(&self) -> Result<Value, ApiError> {
        self.get("/account")
    }

    pub fn event(&self, event_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/events/{event_id}"))
    }

    /// All regions; the listing scanned by [`Client::validate_region`].
    pub fn regions(&self) -> Result<Value, ApiError> {
        self.get("/regions")
    }

    /// All droplet sizes; the listing scanned by [`Client::validate_size`].
    pub fn sizes(&self) -> Result<Value, ApiError> {
        self.get("/sizes")
    }
}
