use serde::Serialize;
use serde_json::{Value, json};

use crate::client::Client;
use crate::error::ApiError;
use crate::method::Method;

/// A DNS record as sent on create and update.
///
/// `priority`, `port` and `weight` only matter for MX and SRV records and are
/// sent as `null` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub data: String,
    pub priority: Option<u32>,
    pub port: Option<u32>,
    pub weight: Option<u32>,
}

impl DomainRecord {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            data: data.into(),
            priority: None,
            port: None,
            weight: None,
        }
    }
}

impl Client {
    pub fn list_domains(&self) -> Result<Value, ApiError> {
        self.get("/domains")
    }

    /// Creates the domain and an A record for its apex pointing at `ip_address`.
    pub fn create_domain(&self, name: &str, ip_address: &str) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Post,
            "/domains",
            &json!({ "name": name, "ip_address": ip_address }),
        )
    }

    pub fn get_domain(&self, name: &str) -> Result<Value, ApiError> {
        self.get(&format!("/domains/{name}"))
    }

    pub fn delete_domain(&self, name: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/domains/{name}"))
    }

    pub fn list_domain_records(&self, domain: &str) -> Result<Value, ApiError> {
        self.get(&format!("/domains/{domain}/records"))
    }

    pub fn create_domain_record(
        &self,
        domain: &str,
        record: &DomainRecord,
    ) -> Result<Value, ApiError> {
        self.dispatch_with(Method::Post, &format!("/domains/{domain}/records"), record)
    }

    pub fn get_domain_record(&self, domain: &str, record_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/domains/{domain}/records/{record_id}"))
    }

    pub fn update_domain_record(
        &self,
        domain: &str,
        record_id: &str,
        record: &DomainRecord,
    ) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Put,
            &format!("/domains/{domain}/records/{record_id}"),
            record,
        )
    }

    pub fn delete_domain_record(&self, domain: &str, record_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/domains/{domain}/records/{record_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_type_and_nulls() {
        let mut record = DomainRecord::new("MX", "@", "mail.example.com.");
        record.priority = Some(10);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "type": "MX",
                "name": "@",
                "data": "mail.example.com.",
                "priority": 10,
                "port": null,
                "weight": null
            })
        );
    }
}
