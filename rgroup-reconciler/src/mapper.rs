//! Field mapper between local records and the wire record.
//!
//! Pure functions only. The remote side stores `enabled` as an integer flag,
//! which is handled by [`enabled_to_flag`] and [`flag_to_enabled`] and nowhere
//! else.

use crate::model::{ResourceGroupConfig, ResourceGroupState};
use crate::wire::{LW_ACCOUNT_GROUP_TYPE, ResourceGroupProps, ResourceGroupRecord};

/// Wire flag for an enabled group.
pub const ENABLED_FLAG: i32 = 1;
/// Wire flag for a disabled group.
pub const DISABLED_FLAG: i32 = 0;

/// Local state fields that can be refreshed from a backend response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Name,
    Enabled,
    Description,
    Accounts,
    Guid,
    GroupType,
    IsDefault,
    LastUpdated,
    UpdatedBy,
}

/// Fields taken from an update response.
///
/// `Description` and `Accounts` are deliberately absent: the update echo is
/// not trusted for them and the values that were sent are kept instead.
/// Revisit once the backend contract for partial update responses is pinned
/// down.
pub const UPDATE_REFRESHED_FIELDS: &[StateField] = &[
    StateField::Name,
    StateField::Enabled,
    StateField::GroupType,
    StateField::UpdatedBy,
    StateField::LastUpdated,
];

pub fn enabled_to_flag(enabled: bool) -> i32 {
    if enabled { ENABLED_FLAG } else { DISABLED_FLAG }
}

/// Any value other than [`ENABLED_FLAG`] reads as disabled.
pub fn flag_to_enabled(flag: i32) -> bool {
    flag == ENABLED_FLAG
}

pub fn trim_accounts(accounts: &[String]) -> Vec<String> {
    accounts.iter().map(|a| a.trim().to_string()).collect()
}

/// Translate a configuration into the record sent to the backend.
///
/// The record carries no identity; update attaches it separately.
pub fn encode(config: &ResourceGroupConfig) -> ResourceGroupRecord {
    ResourceGroupRecord {
        resource_guid: None,
        guid: None,
        name: config.name.clone(),
        group_type: LW_ACCOUNT_GROUP_TYPE.to_string(),
        enabled: enabled_to_flag(config.enabled),
        is_default: false,
        props: ResourceGroupProps {
            description: config.description.clone(),
            accounts: trim_accounts(&config.accounts),
            last_updated: None,
            updated_by: None,
        },
    }
}

/// Translate a backend record into a full state record.
///
/// A record without `resource_guid` decodes to an empty identity; the
/// reconciler refuses to persist such a state.
pub fn decode(record: &ResourceGroupRecord) -> ResourceGroupState {
    ResourceGroupState {
        resource_guid: record.resource_guid.clone().unwrap_or_default(),
        name: record.name.clone(),
        enabled: flag_to_enabled(record.enabled),
        description: record.props.description.clone(),
        accounts: record.props.accounts.clone(),
        guid: record.guid.clone(),
        group_type: record.group_type.clone(),
        is_default: record.is_default,
        last_updated: record.props.last_updated.clone(),
        updated_by: record.props.updated_by.clone(),
    }
}

/// Overwrite exactly `fields` of `state` with the values in `record`.
pub fn apply_refresh(
    state: &mut ResourceGroupState,
    record: &ResourceGroupRecord,
    fields: &[StateField],
) {
    for field in fields {
        match field {
            StateField::Name => state.name = record.name.clone(),
            StateField::Enabled => state.enabled = flag_to_enabled(record.enabled),
            StateField::Description => state.description = record.props.description.clone(),
            StateField::Accounts => state.accounts = record.props.accounts.clone(),
            StateField::Guid => state.guid = record.guid.clone(),
            StateField::GroupType => state.group_type = record.group_type.clone(),
            StateField::IsDefault => state.is_default = record.is_default,
            StateField::LastUpdated => state.last_updated = record.props.last_updated.clone(),
            StateField::UpdatedBy => state.updated_by = record.props.updated_by.clone(),
        }
    }
}

pub fn apply_update_refresh(state: &mut ResourceGroupState, record: &ResourceGroupRecord) {
    apply_refresh(state, record, UPDATE_REFRESHED_FIELDS);
}
