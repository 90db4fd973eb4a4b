use serde::{Deserialize, Serialize};

// Only the fields the client actually reads are modeled here. The full
// workflow document is round-tripped as an opaque `serde_json::Value` so a
// platform-side schema change cannot silently drop fields on the way back.

/// One page of workflow items from the paged discovery endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowPage {
    pub collection_size: i64,
    pub items: Vec<WorkflowItem>,
    pub last_page: bool,
    pub offset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowItem {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub config: WorkflowConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowConfig {
    pub elements: Vec<WorkflowElement>,
    pub recovery_expression: String,
}

/// A named node inside a workflow's configuration, resolved by description
/// match — the platform exposes no stable lookup key for these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowElement {
    pub id: String,
    pub desc: String,
}

/// Restore-state negotiation payload: just the recovery expression.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRestoreState<'a> {
    pub recovery_expression: &'a str,
}
