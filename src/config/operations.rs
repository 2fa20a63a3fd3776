//! Config loading, validation, and field-level checks.
//!
//! The field-level check functions are shared between `validate()` and the
//! handle's setters so a value is rejected identically on both paths.

use super::model::HandleConfig;
use crate::error::{RelockError, Result};
use crate::resource::ResourceAddress;
use std::path::Path;

impl HandleConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RelockError::InvalidOption(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: HandleConfig = serde_yaml::from_str(yaml)
            .map_err(|e| RelockError::InvalidOption(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RelockError::InvalidOption(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        check_discovery_attempts(self.discovery_attempts)?;
        if !self.network_interface.is_empty() {
            check_network_interface(&self.network_interface)?;
        }
        if !self.unicast_address.is_empty() {
            check_port(self.unicast_port, "unicast port")?;
        }
        if !self.multicast_address.is_empty() {
            check_port(self.multicast_port, "multicast port")?;
        }
        check_resource_quantity(self.resource_quantity)?;
        ResourceAddress::parse(&self.resource_name)?;
        self.tls_config()?;
        Ok(())
    }
}

/// Discovery must try at least once.
pub(crate) fn check_discovery_attempts(value: u32) -> Result<()> {
    if value == 0 {
        return Err(RelockError::OutOfRange(
            "discovery attempts must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// A port of 0 is the unspecified port and can not address a daemon.
pub(crate) fn check_port(value: u16, what: &str) -> Result<()> {
    if value == 0 {
        return Err(RelockError::OutOfRange(format!("{} must not be 0", what)));
    }
    Ok(())
}

/// At least one unit must be requested from a resource pool.
pub(crate) fn check_resource_quantity(value: u32) -> Result<()> {
    if value == 0 {
        return Err(RelockError::OutOfRange(
            "resource quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// An interface name is a single token like `eth0`, a VLAN subinterface like
/// `eth0.100` or an alias like `eth0:1`; whitespace can not name a link-local
/// scope.
pub(crate) fn check_network_interface(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RelockError::NullObject("network interface".to_string()));
    }
    let token = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-' | '_');
    if !value.chars().all(token) {
        return Err(RelockError::InvalidOption(format!(
            "'{}' is not a valid network interface name",
            value
        )));
    }
    Ok(())
}

/// A required string property may not be set to an absent value.
pub(crate) fn check_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RelockError::NullObject(what.to_string()));
    }
    Ok(())
}
