//! Record types decoded from Redash API responses.
//!
//! Layout, widget, schedule and option payloads are not modeled; they are
//! carried as raw JSON and passed back unchanged. Fields assigned by the
//! service are left out of outgoing payloads while unset, so a record built
//! locally can be sent as a create or update body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_helpers::null_as_default;

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// One page of a collection listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub page_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            page: 0,
            page_size: 0,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_draft: bool,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub layout: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub widgets: Value,
    /// Optimistic-concurrency counter; must match the stored version on update.
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub version: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub dashboard_filters_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    /// Raw query text as submitted to the data source.
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub query_hash: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_source_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_query_data_id: Option<u64>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub schedule: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_draft: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_safe: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub version: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub visualizations: Vec<Visualization>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Map<String, Value>,
}

impl Query {
    /// First embedded visualization with the given id.
    pub fn visualization(&self, id: u64) -> Option<&Visualization> {
        self.visualizations.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Visualization {
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub query_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Chart kind tag, e.g. `TABLE` or `CHART`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reencode<T: Serialize + serde::de::DeserializeOwned>(v: &Value) -> Value {
        let decoded: T = serde_json::from_value(v.clone()).unwrap();
        serde_json::to_value(&decoded).unwrap()
    }

    #[test]
    fn dashboard_keeps_known_fields_and_opaque_payloads() {
        let body = json!({
            "id": 3,
            "name": "Ops",
            "slug": "ops",
            "user_id": 9,
            "created_at": "2020-04-01T10:00:00Z",
            "updated_at": "2020-04-02T11:30:00Z",
            "is_archived": false,
            "is_favorite": true,
            "is_draft": false,
            "layout": [{"col": 0, "row": 1}],
            "widgets": [{"id": 11, "visualization": {"id": 5}}],
            "version": 4,
            "tags": ["prod", 1],
            "dashboard_filters_enabled": true
        });
        assert_eq!(reencode::<Dashboard>(&body), body);
    }

    #[test]
    fn query_keeps_embedded_visualizations_in_order() {
        let body = json!({
            "id": 12,
            "name": "Signups",
            "description": null,
            "query": "select 1",
            "query_hash": "abc",
            "api_key": "qk",
            "data_source_id": 2,
            "latest_query_data_id": 100,
            "schedule": {"interval": 3600},
            "is_archived": false,
            "is_favorite": false,
            "is_draft": true,
            "is_safe": true,
            "can_edit": true,
            "created_at": "2020-04-01T10:00:00Z",
            "updated_at": "2020-04-01T10:00:00Z",
            "tags": ["growth"],
            "version": 2,
            "visualizations": [
                {"id": 5, "query_id": 12, "name": "Table", "type": "TABLE",
                 "options": {}, "description": ""},
                {"id": 6, "query_id": 12, "name": "Chart", "type": "CHART",
                 "options": {"globalSeriesType": "line"}, "description": "daily"}
            ],
            "options": {"parameters": []}
        });
        let q: Query = serde_json::from_value(body.clone()).unwrap();
        let ids: Vec<u64> = q.visualizations.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert_eq!(q.visualizations[1].kind, "CHART");
        assert_eq!(serde_json::to_value(&q).unwrap(), body);
    }

    #[test]
    fn query_null_columns_decode_to_defaults() {
        let q: Query = serde_json::from_value(json!({
            "id": 12,
            "name": "Signups",
            "tags": null,
            "data_source_id": null,
            "options": null,
            "visualizations": [
                {"id": 5, "query_id": 12, "type": "TABLE", "name": null,
                 "description": null, "options": {}}
            ]
        }))
        .unwrap();
        assert!(q.tags.is_empty());
        assert_eq!(q.data_source_id, 0);
        assert!(q.options.is_empty());
        assert_eq!(q.visualizations[0].description, "");
        assert_eq!(q.visualizations[0].name, "");
        assert_eq!(q.visualizations[0].kind, "TABLE");
    }

    #[test]
    fn dashboard_null_columns_decode_to_defaults() {
        let d: Dashboard = serde_json::from_value(json!({
            "id": 3, "name": "Ops", "slug": null, "tags": null,
            "user_id": null, "is_draft": null, "layout": null
        }))
        .unwrap();
        assert_eq!(d.slug, "");
        assert!(d.tags.is_empty());
        assert_eq!(d.user_id, 0);
        assert!(!d.is_draft);
        assert!(d.layout.is_null());
    }

    #[test]
    fn dashboard_layout_passes_through_any_json() {
        let body = json!({"id": 3, "name": "Ops", "layout": "[]", "tags": []});
        let d: Dashboard = serde_json::from_value(body).unwrap();
        assert_eq!(d.layout, json!("[]"));
        assert_eq!(serde_json::to_value(&d).unwrap()["layout"], "[]");
    }

    #[test]
    fn page_null_results_is_empty() {
        let page: Page<Query> = serde_json::from_value(json!({
            "count": 0, "page": 1, "page_size": null, "results": null
        }))
        .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.page_size, 0);
    }

    #[test]
    fn unknown_fields_ignored_and_missing_fields_default() {
        let v: Visualization =
            serde_json::from_value(json!({"id": 1, "unexpected": true})).unwrap();
        assert_eq!(v.id, 1);
        assert_eq!(v.kind, "");
        assert!(v.options.is_empty());
    }

    #[test]
    fn unset_server_fields_left_out_of_payload() {
        let q = Query {
            name: "new".to_string(),
            query: "select 2".to_string(),
            data_source_id: 1,
            ..Default::default()
        };
        let out = serde_json::to_value(&q).unwrap();
        for key in ["id", "version", "query_hash", "schedule", "created_at", "visualizations"] {
            assert!(out.get(key).is_none(), "{} should be omitted", key);
        }
        assert_eq!(out["data_source_id"], 1);
    }

    #[test]
    fn page_decodes_metadata() {
        let page: Page<Dashboard> = serde_json::from_value(json!({
            "count": 1, "page": 2, "page_size": 10, "results": [{"id": 4}]
        }))
        .unwrap();
        assert_eq!((page.count, page.page, page.page_size), (1, 2, 10));
        assert!(!page.is_empty());
    }
}
