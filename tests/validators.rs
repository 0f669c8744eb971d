//! Listing validators, existence checks and validated mutations.

mod common;

use common::{Harness, unreachable_client};
use doapi::{ApiError, Collection, NewDroplet, Validation, ValidationScope};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn mount_catalog(h: &Harness) {
    h.mount(
        Mock::given(method("GET"))
            .and(path("/sizes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sizes": [{"slug": "s-1vcpu-512mb"}, {"slug": "s-1vcpu-1gb"}]
            }))),
    );
    h.mount(
        Mock::given(method("GET"))
            .and(path("/images"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": [{"id": 7555620, "slug": "ubuntu-24-04-x64"}]
            }))),
    );
    h.mount(
        Mock::given(method("GET"))
            .and(path("/regions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "regions": [{"id": "nyc3"}, {"id": "ams3"}]
            }))),
    );
}

#[test]
fn size_validator_matches_on_slug() {
    let h = Harness::start();
    mount_catalog(&h);
    let client = h.client();

    assert_eq!(client.validate_size("s-1vcpu-1gb"), Validation::Found);
    assert_eq!(client.validate_size("does-not-exist"), Validation::Absent);
}

#[test]
fn region_and_image_validators_match_on_id() {
    let h = Harness::start();
    mount_catalog(&h);
    let client = h.client();

    assert!(client.validate_region("ams3").is_valid());
    assert!(!client.validate_region("sfo9").is_valid());
    assert!(client.validate_image("7555620").is_valid());
    assert!(!client.validate_image("ubuntu-24-04-x64").is_valid());
}

#[test]
fn repeated_validation_refetches_and_agrees() {
    let h = Harness::start();
    mount_catalog(&h);
    let client = h.client();

    let first = client.validate(Collection::Sizes, "s-1vcpu-1gb");
    let second = client.validate(Collection::Sizes, "s-1vcpu-1gb");
    assert_eq!(first, second);
    assert_eq!(h.request_lines(), vec!["GET /sizes", "GET /sizes"]);
}

#[test]
fn failed_listing_is_inconclusive_and_fails_closed() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/sizes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream timeout")),
    );

    let outcome = h.client().validate_size("s-1vcpu-1gb");
    assert!(!outcome.is_valid());
    assert_eq!(
        outcome,
        Validation::Inconclusive(ApiError::InvalidResponse("upstream timeout".to_string()))
    );

    let outcome = unreachable_client().validate_size("s-1vcpu-1gb");
    assert!(!outcome.is_valid());
    assert!(matches!(
        outcome,
        Validation::Inconclusive(ApiError::Transport(_))
    ));
}

#[test]
fn scope_fetches_each_listing_once() {
    let h = Harness::start();
    mount_catalog(&h);
    let client = h.client();

    let mut scope = ValidationScope::new(&client);
    assert!(scope.validate(Collection::Sizes, "s-1vcpu-1gb").is_valid());
    assert!(scope.validate(Collection::Sizes, "s-1vcpu-512mb").is_valid());
    assert!(!scope.validate(Collection::Sizes, "s-8vcpu-16gb").is_valid());
    assert!(scope.validate(Collection::Regions, "nyc3").is_valid());

    assert_eq!(h.request_lines(), vec!["GET /sizes", "GET /regions"]);
}

#[test]
fn create_droplet_with_unknown_size_sends_no_create_request() {
    let h = Harness::start();
    mount_catalog(&h);
    h.mount(
        Mock::given(method("POST"))
            .and(path("/droplets"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"droplet": {"id": 1}}))),
    );

    let droplet = NewDroplet::new("web-1", "nyc3", "s-64vcpu-huge", "7555620");
    let err = h.client().create_droplet(&droplet).unwrap_err();

    assert_eq!(
        err,
        ApiError::ValidationFailed {
            kind: "size",
            identifier: "s-64vcpu-huge".to_string(),
            cause: None,
        }
    );
    assert_eq!(h.request_lines(), vec!["GET /sizes"]);
}

#[test]
fn create_droplet_validates_size_image_region_then_posts() {
    let h = Harness::start();
    mount_catalog(&h);
    let droplet = NewDroplet::new("web-1", "nyc3", "s-1vcpu-1gb", "7555620");
    h.mount(
        Mock::given(method("POST"))
            .and(path("/droplets"))
            .and(body_json(json!({
                "name": "web-1",
                "region": "nyc3",
                "size": "s-1vcpu-1gb",
                "image": "7555620",
                "backups": false,
                "ipv6": false,
                "user_data": null
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "droplet": {"id": 3164444, "name": "web-1"}
            }))),
    );

    let created = h.client().create_droplet(&droplet).unwrap();
    assert_eq!(created["droplet"]["id"], 3164444);
    assert_eq!(
        h.request_lines(),
        vec!["GET /sizes", "GET /images", "GET /regions", "POST /droplets"]
    );
}

#[test]
fn create_droplet_with_unknown_region_stops_after_third_check() {
    let h = Harness::start();
    mount_catalog(&h);

    let droplet = NewDroplet::new("web-1", "mars1", "s-1vcpu-1gb", "7555620");
    let err = h.client().create_droplet(&droplet).unwrap_err();

    assert!(matches!(err, ApiError::ValidationFailed { kind: "region", .. }));
    assert_eq!(
        h.request_lines(),
        vec!["GET /sizes", "GET /images", "GET /regions"]
    );
}

#[test]
fn inconclusive_check_surfaces_its_cause() {
    let droplet = NewDroplet::new("web-1", "nyc3", "s-1vcpu-1gb", "7555620");
    let err = unreachable_client().create_droplet(&droplet).unwrap_err();

    assert!(err.is_inconclusive());
    assert!(err.to_string().starts_with("could not validate size s-1vcpu-1gb: transport error"));
}

#[test]
fn resize_and_rebuild_are_gated_by_listings() {
    let h = Harness::start();
    mount_catalog(&h);
    h.mount(
        Mock::given(method("POST"))
            .and(path("/droplets/42/actions"))
            .and(body_json(json!({"type": "resize", "size": "s-1vcpu-1gb"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 1, "type": "resize", "status": "in-progress"}
            }))),
    );
    let client = h.client();

    let action = client.resize_droplet("42", "s-1vcpu-1gb").unwrap();
    assert_eq!(action["action"]["type"], "resize");

    let err = client.rebuild_droplet("42", "999").unwrap_err();
    assert!(matches!(err, ApiError::ValidationFailed { kind: "image", .. }));

    assert_eq!(
        h.request_lines(),
        vec!["GET /sizes", "POST /droplets/42/actions", "GET /images"]
    );
}

#[test]
fn existence_checks_use_status_field() {
    let h = Harness::start();
    h.mount(
        Mock::given(method("GET"))
            .and(path("/droplets/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "droplet": {"id": 1}}))),
    );
    h.mount(
        Mock::given(method("GET"))
            .and(path("/droplets/2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"id": "not_found"}))),
    );
    h.mount(
        Mock::given(method("GET"))
            .and(path("/images/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("")),
    );
    let client = h.client();

    assert_eq!(client.droplet_exists("1"), Validation::Found);
    assert_eq!(client.droplet_exists("2"), Validation::Absent);
    assert_eq!(
        client.image_exists("3"),
        Validation::Inconclusive(ApiError::InvalidResponse(String::new()))
    );
}
