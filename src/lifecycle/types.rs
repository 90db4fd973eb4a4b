use serde::{Deserialize, Serialize};

/// Deployment policy flags sent with every start/update. Fixed policy:
/// always asynchronous, always full-reload, always rolling, never skipping
/// recovery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(rename = "async")]
    pub asynchronous: bool,
    pub full_reload: bool,
    pub rolling: bool,
    pub skip_recovery: bool,
}

impl PublishRequest {
    pub(crate) fn rolling_full_reload() -> Self {
        Self {
            asynchronous: true,
            full_reload: true,
            rolling: true,
            skip_recovery: false,
        }
    }
}

/// Snapshot of a server-tracked lifecycle operation as returned by the
/// progress endpoint. The client only samples this state, it never owns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressResponse {
    pub has_finished: bool,
    pub operation_id: String,
    pub operation_start_timestamp: i64,
    pub operation_type: String,
    pub rolling: bool,
    pub status: String,
    pub user: String,
    pub members: Vec<Member>,
}

/// Per-cluster-member progress inside a lifecycle operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    pub member_desc: String,
    pub member_id: String,
    pub status: String,
    pub messages: Vec<MemberMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberMessage {
    pub status: String,
    pub task: String,
}
