use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::NodeId;

/// Envelope for `GET /api/front/nodes`.
#[derive(Debug, Clone, Deserialize)]
pub struct NodesPage {
    pub data: NodesData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodesData {
    #[serde(default)]
    pub items: Vec<NodeRecord>,
}

/// One registered node as the server reports it. Only `id` is read; the
/// remaining fields ride along for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(flatten, default)]
    pub extra: HashMap<String, Value>,
}

impl NodesPage {
    /// Node identifiers in server-provided order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.data
            .items
            .iter()
            .map(|item| NodeId::new(item.id.clone()))
            .collect()
    }
}

/// Envelope for `GET /api/front/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub data: UserInfo,
}

/// Account-level display status: name, status, id, level, points.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub levels: Option<Value>,
    #[serde(rename = "currentPoint", default)]
    pub current_point: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_page_yields_ids_in_server_order() {
        let page: NodesPage = serde_json::from_str(
            r#"{
                "data": {
                    "items": [
                        {"id": "9bd4c392-0b4c-4d9a-9c2a-111111111111", "status": "Good"},
                        {"id": "07b0e3a1-55cc-4f31-8d2e-222222222222", "status": "Idle"}
                    ]
                }
            }"#,
        )
        .unwrap();
        let ids = page.node_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), "9bd4c392-0b4c-4d9a-9c2a-111111111111");
        assert_eq!(ids[1].as_str(), "07b0e3a1-55cc-4f31-8d2e-222222222222");
        assert_eq!(
            page.data.items[0].extra.get("status").and_then(|v| v.as_str()),
            Some("Good")
        );
    }

    #[test]
    fn empty_items_deserializes_to_empty_page() {
        let page: NodesPage = serde_json::from_str(r#"{"data": {"items": []}}"#).unwrap();
        assert!(page.node_ids().is_empty());
    }

    #[test]
    fn user_envelope_reads_wire_cased_fields() {
        let envelope: UserEnvelope = serde_json::from_str(
            r#"{
                "data": {
                    "name": "alice",
                    "status": "Active",
                    "_id": "64b1f",
                    "levels": 2,
                    "currentPoint": 1337.5
                }
            }"#,
        )
        .unwrap();
        let user = envelope.data;
        assert_eq!(user.name, "alice");
        assert_eq!(user.id, "64b1f");
        assert_eq!(user.current_point, Some(serde_json::json!(1337.5)));
    }

    #[test]
    fn user_envelope_tolerates_missing_fields() {
        let envelope: UserEnvelope =
            serde_json::from_str(r#"{"data": {"name": "bob"}}"#).unwrap();
        assert_eq!(envelope.data.name, "bob");
        assert!(envelope.data.current_point.is_none());
    }
}
