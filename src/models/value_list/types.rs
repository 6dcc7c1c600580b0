use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    pub key_pattern: Option<String>,
    pub label_min_length: Option<usize>,
    pub label_max_length: Option<usize>,
    #[serde(default)]
    pub unique_key: bool,
    #[serde(default)]
    pub unique_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueListItem {
    pub id: String,
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub order: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// An admin-managed reference list (services, committees, risk categories, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub system_key: String,
    pub allow_add: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,
    #[serde(default)]
    pub validation_rules: ValidationRules,
    #[serde(default)]
    pub items: Vec<ValueListItem>,
    /// Number of records referencing values of this list.
    #[serde(default)]
    pub usage_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueListAuditEntry {
    pub id: String,
    pub list_id: String,
    pub item_id: Option<String>,
    pub action: ChangeAction,
    pub old_value: Option<ValueListItem>,
    pub new_value: Option<ValueListItem>,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub acting_user: String,
    pub reason: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub direction: MoveDirection,
    pub acting_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub acting_user: String,
    pub reason: Option<String>,
}

/// Outcome of a mutation: the list as it now stands plus any non-blocking warnings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOutcome {
    pub list: ValueList,
    pub warnings: Vec<String>,
}
