//! Shared fixtures: a scripted transport and a small Kanban database.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_kanban::{
    ApiReply, ApiRequest, AppError, DatabaseId, FieldRegistry, NotionManager, NotionTransport,
    Result,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const DATABASE_ID: &str = "122acdc2cc5880fa8643c616c6778bbb";
pub const PAGE_ID: &str = "59833787-2cf9-4fdf-8782-e53db20768a5";

/// Replays canned replies in order and records every request it is sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ApiReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<ApiReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, reply: ApiReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl NotionTransport for ScriptedTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiReply> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::MalformedResponse("no scripted reply left".into()))
    }
}

pub fn ok(body: Value) -> ApiReply {
    ApiReply::new(200, body)
}

pub fn list_page(results: Vec<Value>, next_cursor: Option<&str>) -> ApiReply {
    ok(json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some(),
    }))
}

pub fn kanban_database() -> Value {
    json!({
        "object": "database",
        "id": "122acdc2-cc58-80fa-8643-c616c6778bbb",
        "title": [{"plain_text": "Kanban"}],
        "properties": {
            "Date d’échéance": {"id": "C%5C%3C%3A", "name": "Date d’échéance", "type": "date", "date": {}},
            "Statut": {
                "id": "k%3FMm",
                "name": "Statut",
                "type": "status",
                "status": {
                    "options": [
                        {"id": "8e60037a-bd86-4bec-ae03-6dcd5c392137", "name": "À faire", "color": "default"},
                        {"id": "4d2a5c39-1f0b-4a1e-9c1a-6d64f1d8d4a1", "name": "En développement", "color": "blue"},
                        {"id": "a087807d-e7e9-4e12-8560-44a3d64d6110", "name": "Fait", "color": "green"}
                    ],
                    "groups": []
                }
            },
            "Équipe": {
                "id": "rIvf",
                "name": "Équipe",
                "type": "select",
                "select": {"options": [
                    {"id": "2da75352-d78c-4b75-bd04-3e653eeb71e0", "name": "Design", "color": "default"},
                    {"id": "b6b3a8a0-8f4e-4d1c-9a1d-33e0a3a4f3c2", "name": "Ingénierie", "color": "red"}
                ]}
            },
            "Responsable": {"id": "xE%3EJ", "name": "Responsable", "type": "people", "people": {}},
            "Nom": {"id": "title", "name": "Nom", "type": "title", "title": {}}
        }
    })
}

pub fn card_page(id: &str, title: &str, status: &str, people: &[(&str, &str)], due: Option<&str>) -> Value {
    let people: Vec<Value> = people
        .iter()
        .map(|(id, name)| json!({"object": "user", "id": id, "name": name}))
        .collect();
    let status_id = match status {
        "Fait" => "a087807d-e7e9-4e12-8560-44a3d64d6110",
        "À faire" => "8e60037a-bd86-4bec-ae03-6dcd5c392137",
        _ => "4d2a5c39-1f0b-4a1e-9c1a-6d64f1d8d4a1",
    };
    json!({
        "object": "page",
        "id": id,
        "created_time": "2024-05-01T08:00:00.000Z",
        "last_edited_time": "2024-05-02T08:00:00.000Z",
        "archived": false,
        "parent": {"type": "database_id", "database_id": "122acdc2-cc58-80fa-8643-c616c6778bbb"},
        "cover": null,
        "icon": null,
        "properties": {
            "Date d’échéance": {"id": "C%5C%3C%3A", "type": "date", "date": due.map(|d| json!({"start": d, "end": null}))},
            "Statut": {"id": "k%3FMm", "type": "status", "status": {"id": status_id, "name": status, "color": "default"}},
            "Équipe": {"id": "rIvf", "type": "select", "select": null},
            "Responsable": {"id": "xE%3EJ", "type": "people", "people": people},
            "Nom": {"id": "title", "type": "title", "title": [{"type": "text", "text": {"content": title}, "plain_text": title}]}
        }
    })
}

/// A manager connected over a transport whose first reply is the schema.
pub async fn connected(
    transport: &Arc<ScriptedTransport>,
) -> NotionManager {
    transport
        .replies
        .lock()
        .unwrap()
        .push_front(ok(kanban_database()));
    NotionManager::connect(
        transport.clone(),
        DatabaseId::parse(DATABASE_ID).unwrap(),
        FieldRegistry::default(),
    )
    .await
    .unwrap()
}
