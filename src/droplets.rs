use serde::Serialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::ApiError;
use crate::method::Method;
use crate::validate::Collection;

/// An SSH key to embed in a new droplet, by id or by fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SshKeyRef {
    Id(u64),
    Fingerprint(String),
}

/// Body of `POST /droplets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDroplet {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_keys: Option<Vec<SshKeyRef>>,
    pub backups: bool,
    pub ipv6: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_networking: Option<bool>,
    pub user_data: Option<String>,
}

impl NewDroplet {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        size: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            size: size.into(),
            image: image.into(),
            ssh_keys: None,
            backups: false,
            ipv6: false,
            private_networking: None,
            user_data: None,
        }
    }
}

/// Body of `POST /droplets/:id/actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropletAction {
    Reboot,
    PowerCycle,
    Shutdown,
    PowerOff,
    PowerOn,
    PasswordReset,
    EnableBackups,
    DisableBackups,
    Restore { image: String },
    Resize { size: String },
    Rebuild { image: String },
    Rename { name: String },
    Snapshot { name: String },
}

impl Client {
    pub fn list_droplets(&self) -> Result<Value, ApiError> {
        self.get("/droplets")
    }

    /// Creates a droplet after checking its size, image and region, in that order.
    ///
    /// Each check fetches its listing afresh. The first one that does not
    /// confirm its identifier stops the call with
    /// [`ApiError::ValidationFailed`] and no create request is sent.
    pub fn create_droplet(&self, droplet: &NewDroplet) -> Result<Value, ApiError> {
        self.validate(Collection::Sizes, &droplet.size)
            .require(Collection::Sizes.kind(), &droplet.size)?;
        self.validate(Collection::Images, &droplet.image)
            .require(Collection::Images.kind(), &droplet.image)?;
        self.validate(Collection::Regions, &droplet.region)
            .require(Collection::Regions.kind(), &droplet.region)?;

        self.dispatch_with(Method::Post, "/droplets", droplet)
    }

    pub fn get_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/droplets/{droplet_id}"))
    }

    pub fn delete_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/droplets/{droplet_id}"))
    }

    /// Submits `action` without any pre-flight check.
    pub fn droplet_action(
        &self,
        droplet_id: &str,
        action: &DropletAction,
    ) -> Result<Value, ApiError> {
        self.dispatch_with(
            Method::Post,
            &format!("/droplets/{droplet_id}/actions"),
            action,
        )
    }

    pub fn reboot_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::Reboot)
    }

    pub fn power_cycle_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::PowerCycle)
    }

    pub fn shutdown_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::Shutdown)
    }

    pub fn power_off_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::PowerOff)
    }

    pub fn power_on_droplet(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::PowerOn)
    }

    pub fn reset_droplet_password(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::PasswordReset)
    }

    pub fn enable_droplet_backups(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::EnableBackups)
    }

    pub fn disable_droplet_backups(&self, droplet_id: &str) -> Result<Value, ApiError> {
        self.droplet_action(droplet_id, &DropletAction::DisableBackups)
    }

    pub fn rename_droplet(&self, droplet_id: &str, name: &str) -> Result<Value, ApiError> {
        self.droplet_action(
            droplet_id,
            &DropletAction::Rename {
                name: name.to_string(),
            },
        )
    }

    pub fn snapshot_droplet(&self, droplet_id: &str, name: &str) -> Result<Value, ApiError> {
        self.droplet_action(
            droplet_id,
            &DropletAction::Snapshot {
                name: name.to_string(),
            },
        )
    }

    /// Restores from `image` once the image listing confirms it.
    pub fn restore_droplet(&self, droplet_id: &str, image: &str) -> Result<Value, ApiError> {
        self.validate(Collection::Images, image)
            .require(Collection::Images.kind(), image)?;
        self.droplet_action(
            droplet_id,
            &DropletAction::Restore {
                image: image.to_string(),
            },
        )
    }

    /// Resizes to `size` once the size listing confirms it.
    pub fn resize_droplet(&self, droplet_id: &str, size: &str) -> Result<Value, ApiError> {
        self.validate(Collection::Sizes, size)
            .require(Collection::Sizes.kind(), size)?;
        self.droplet_action(
            droplet_id,
            &DropletAction::Resize {
                size: size.to_string(),
            },
        )
    }

    /// Rebuilds from `image` once the image listing confirms it.
    pub fn rebuild_droplet(&self, droplet_id: &str, image: &str) -> Result<Value, ApiError> {
        self.validate(Collection::Images, image)
            .require(Collection::Images.kind(), image)?;
        self.droplet_action(
            droplet_id,
            &DropletAction::Rebuild {
                image: image.to_string(),
            },
        )
    }
}
