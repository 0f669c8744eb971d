//! Pre-flight checks that an identifier exists before a mutating call uses it.
//!
//! Listing validators fetch a whole collection (`/regions`, `/sizes`,
//! `/images`) and scan it once, in order, for the identifier. Existence
//! checks fetch a single resource and look for `status == "OK"` in the body,
//! which the API does not guarantee; treat them as a heuristic.

use serde_json::Value;
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ApiError;
use crate::util::key_matches;

/// A listing endpoint that validators can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Regions,
    Sizes,
    Images,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Regions => "/regions",
            Collection::Sizes => "/sizes",
            Collection::Images => "/images",
        }
    }

    /// Top-level field of the listing body holding the entries.
    pub fn envelope(self) -> &'static str {
        match self {
            Collection::Regions => "regions",
            Collection::Sizes => "sizes",
            Collection::Images => "images",
        }
    }

    /// Entry field compared against the identifier.
    pub fn key_field(self) -> &'static str {
        match self {
            Collection::Regions | Collection::Images => "id",
            Collection::Sizes => "slug",
        }
    }

    /// Singular name used in error messages.
    pub fn kind(self) -> &'static str {
        match self {
            Collection::Regions => "region",
            Collection::Sizes => "size",
            Collection::Images => "image",
        }
    }
}

/// Outcome of a validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Found,
    /// The lookup succeeded and the identifier is not there.
    Absent,
    /// The lookup itself failed; existence is unknown.
    Inconclusive(ApiError),
}

impl Validation {
    /// Fail-closed reading: only `Found` is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Found)
    }

    /// Turns anything but `Found` into `ApiError::ValidationFailed`.
    pub fn require(self, kind: &'static str, identifier: &str) -> Result<(), ApiError> {
        let cause = match self {
            Validation::Found => return Ok(()),
            Validation::Absent => None,
            Validation::Inconclusive(err) => Some(Box::new(err)),
        };
        Err(ApiError::ValidationFailed {
            kind,
            identifier: identifier.to_string(),
            cause,
        })
    }
}

impl Client {
    /// Fetches the listing for `collection` and scans it for `identifier`.
    ///
    /// Every call issues a fresh request.
    pub fn validate(&self, collection: Collection, identifier: &str) -> Validation {
        let outcome = match self.get(collection.path()) {
            Ok(listing) => scan_listing(collection, &listing, identifier),
            Err(err) => Validation::Inconclusive(err),
        };
        tracing::debug!(
            "validate {} {:?}: {:?}",
            collection.kind(),
            identifier,
            outcome
        );
        outcome
    }

    pub fn validate_region(&self, region: &str) -> Validation {
        self.validate(Collection::Regions, region)
    }

    pub fn validate_size(&self, size: &str) -> Validation {
        self.validate(Collection::Sizes, size)
    }

    pub fn validate_image(&self, image: &str) -> Validation {
        self.validate(Collection::Images, image)
    }

    /// Best-effort: fetches the droplet and checks for `status == "OK"`.
    pub fn droplet_exists(&self, droplet_id: &str) -> Validation {
        status_ok(self.get(&format!("/droplets/{droplet_id}")))
    }

    /// Best-effort: fetches the image and checks for `status == "OK"`.
    pub fn image_exists(&self, image_id: &str) -> Validation {
        status_ok(self.get(&format!("/images/{image_id}")))
    }
}

/// Validation that fetches each listing at most once for its own lifetime.
///
/// Meant for one logical operation that checks several identifiers against
/// the same collections. Listings are never refreshed; build a new scope to
/// see changes.
pub struct ValidationScope<'a> {
    client: &'a Client,
    listings: HashMap<Collection, Result<Value, ApiError>>,
}

impl<'a> ValidationScope<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            listings: HashMap::new(),
        }
    }

    pub fn validate(&mut self, collection: Collection, identifier: &str) -> Validation {
        let client = self.client;
        let listing = self
            .listings
            .entry(collection)
            .or_insert_with(|| client.get(collection.path()));
        match listing {
            Ok(listing) => scan_listing(collection, listing, identifier),
            Err(err) => Validation::Inconclusive(err.clone()),
        }
    }
}

fn scan_listing(collection: Collection, listing: &Value, identifier: &str) -> Validation {
    let Some(entries) = listing.get(collection.envelope()).and_then(Value::as_array) else {
        return Validation::Inconclusive(ApiError::InvalidResponse(listing.to_string()));
    };

    let key = collection.key_field();
    if entries
        .iter()
        .filter_map(|entry| entry.get(key))
        .any(|field| key_matches(field, identifier))
    {
        Validation::Found
    } else {
        Validation::Absent
    }
}

fn status_ok(resp: Result<Value, ApiError>) -> Validation {
    match resp {
        Ok(body) if body.get("status").and_then(Value::as_str) == Some("OK") => Validation::Found,
        Ok(_) => Validation::Absent,
        Err(err) => Validation::Inconclusive(err),
    }
}
