//! Attribute declarations for the LW_ACCOUNT resource group.
//!
//! The configuration engine reads these to build its own schema and calls
//! [`validate`] before planning. The reconciler itself does not validate;
//! whatever reaches it is sent and the backend has the final word.

use thiserror::Error;

use crate::model::{DEFAULT_ENABLED, ResourceGroupConfig};

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    StringList,
}

/// Who sets an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// Only set from backend responses.
    Computed,
}

/// Default applied when an optional attribute is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
}

/// One attribute of the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: ValueKind,
    pub mode: Mode,
    pub default: Option<DefaultValue>,
    /// Account entries are stored trimmed.
    pub trimmed: bool,
    pub description: &'static str,
}

impl Attribute {
    const fn new(
        name: &'static str,
        kind: ValueKind,
        mode: Mode,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            mode,
            default: None,
            trimmed: false,
            description,
        }
    }

    pub fn is_computed(&self) -> bool {
        self.mode == Mode::Computed
    }
}

pub const RESOURCE_GROUP_ATTRIBUTES: &[Attribute] = &[
    Attribute::new(
        "name",
        ValueKind::String,
        Mode::Required,
        "The resource group name",
    ),
    Attribute {
        default: Some(DefaultValue::Bool(DEFAULT_ENABLED)),
        ..Attribute::new(
            "enabled",
            ValueKind::Bool,
            Mode::Optional,
            "The state of the resource group",
        )
    },
    Attribute::new(
        "description",
        ValueKind::String,
        Mode::Optional,
        "The description of the resource group",
    ),
    Attribute {
        trimmed: true,
        ..Attribute::new(
            "accounts",
            ValueKind::StringList,
            Mode::Required,
            "The list of Lacework accounts to include in the resource group",
        )
    },
    Attribute::new(
        "resource_guid",
        ValueKind::String,
        Mode::Computed,
        "The resource group unique identifier",
    ),
    Attribute::new(
        "guid",
        ValueKind::String,
        Mode::Computed,
        "The lacework account id",
    ),
    Attribute::new(
        "last_updated",
        ValueKind::String,
        Mode::Computed,
        "The time in millis when the resource was last updated",
    ),
    Attribute::new(
        "updated_by",
        ValueKind::String,
        Mode::Computed,
        "The username of the lacework user who performed the last update",
    ),
    Attribute::new(
        "type",
        ValueKind::String,
        Mode::Computed,
        "The type of the resource group",
    ),
    Attribute::new(
        "is_default",
        ValueKind::Bool,
        Mode::Computed,
        "Whether the resource group is a default resource group.",
    ),
];

/// Look up an attribute by name.
pub fn attribute(name: &str) -> Option<&'static Attribute> {
    RESOURCE_GROUP_ATTRIBUTES.iter().find(|a| a.name == name)
}

/// Schema violations in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("name is required")]
    EmptyName,

    #[error("accounts must list at least one account")]
    NoAccounts,

    #[error("accounts[{0}] is blank")]
    BlankAccount(usize),
}

/// Check a configuration against the declared schema.
pub fn validate(config: &ResourceGroupConfig) -> Result<(), SchemaError> {
    if config.name.trim().is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if config.accounts.is_empty() {
        return Err(SchemaError::NoAccounts);
    }
    if let Some(index) = config.accounts.iter().position(|a| a.trim().is_empty()) {
        return Err(SchemaError::BlankAccount(index));
    }
    Ok(())
}
