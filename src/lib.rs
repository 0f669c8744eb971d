//! A small blocking Rust client for the DigitalOcean v2 API.
//!
//! Every resource method goes through one dispatcher: it authenticates with a
//! bearer token, sends parameters as a query string (GET) or a JSON body
//! (everything else) and returns the decoded JSON body or an [`ApiError`].
//! Mutations that reference a region, size or image first check the
//! identifier against the matching listing endpoint.
//!
//! ## Quick start
//! - Configure the token via `DIGITALOCEAN_TOKEN` or a `.doapirc` file
//!   (current directory or home directory), or pass it explicitly.
//! - Call resource methods on [`Client`].
//!
//! ```no_run
//! use anyhow::Result;
//! use doapi::{Client, NewDroplet};
//!
//! fn main() -> Result<()> {
//!     let client = Client::from_env()?;
//!     let droplet = NewDroplet::new("web-1", "nyc3", "s-1vcpu-1gb", "ubuntu-24-04-x64");
//!     let created = client.create_droplet(&droplet)?;
//!     println!("{}", created["droplet"]["id"]);
//!     Ok(())
//! }
//! ```
//!
//! Responses are returned as [`serde_json::Value`]; the HTTP status is not
//! interpreted, so provider error bodies such as
//! `{"id": "not_found", "message": "..."}` come back as values too.

#![forbid(unsafe_code)]

mod account;
mod client;
mod config;
mod domains;
mod droplets;
mod error;
mod images;
mod keys;
mod method;
mod util;
mod validate;

pub use client::{Client, Params};
pub use config::{ClientConfig, DEFAULT_BASE_URL, Token};
pub use domains::DomainRecord;
pub use droplets::{DropletAction, NewDroplet, SshKeyRef};
pub use error::ApiError;
pub use images::ImageAction;
pub use method::Method;
pub use validate::{Collection, Validation, ValidationScope};
