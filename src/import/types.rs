use serde::{Deserialize, Serialize};
use serde_json::Value;

// Wire shapes for the partial-import transaction. String fields the platform
// marks optional are plain `String`s skipped when empty, mirroring the
// payloads the platform UI itself sends. Models and list items are opaque:
// the client forwards them, it never inspects them.

/// Result of uploading an archive to the prepare endpoint: the candidate
/// sub-resources plus the server-issued import ID that keys the rest of the
/// transaction. Transient — scoped to one import.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportBundle {
    pub import_id: String,
    pub list_items: Vec<Value>,
    pub lists: Vec<ListSpec>,
    pub models: Vec<Value>,
    pub plans: Vec<Plan>,
    pub rules_projects: Vec<RulesProject>,
}

/// Managed list descriptor inside a bundle, forwarded unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListSpec {
    pub desc: String,
    pub existing_list: bool,
    pub id: String,
    pub matching_type: String,
    pub tenancy_scope: String,
    pub tokenized: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesProject {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_desc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<Snapshot>,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    // singular on the wire
    #[serde(rename = "workflowMapping", skip_serializing_if = "Vec::is_empty")]
    pub workflow_mappings: Vec<WorkflowMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowMapping {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workflow_element_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workflow_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub executions: Vec<Execution>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Execution {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    pub id: String,
}

/// Remap payload POSTed to both check-schemas and commit.
///
/// The entity set and order must mirror the bundle exactly; the commit fails
/// schema validation otherwise.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRemapRequest {
    pub lists: Vec<ListSpec>,
    pub models: Vec<Value>,
    pub plans: Vec<Plan>,
    pub rules_projects: Vec<RulesProject>,
}
