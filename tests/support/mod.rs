//! Mock registry server and helpers shared by the integration tests

#![allow(dead_code)]

use axum::{
    Router,
    extract::{Multipart, Path, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use swan_registry::config::HttpConfig;
use swan_registry::controller::{ClientOptions, DeviceRegistryClient};
use swan_registry::page::{MemoryPage, Page};
use swan_registry::registry::HttpRegistry;

pub const FORM_ACTION: &str = "/add_device";

/// One canned HTTP answer
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// A request the mock saw
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Default)]
struct Inner {
    add: Option<Reply>,
    delete: Option<Reply>,
    list: Option<Reply>,
    details: HashMap<String, Reply>,
    hits: Vec<Hit>,
}

/// Scriptable stand-in for the registry server
#[derive(Clone, Default)]
pub struct MockRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl MockRegistry {
    pub fn on_add(&self, reply: Reply) -> &Self {
        self.inner.lock().unwrap().add = Some(reply);
        self
    }

    pub fn on_delete(&self, reply: Reply) -> &Self {
        self.inner.lock().unwrap().delete = Some(reply);
        self
    }

    pub fn on_list(&self, reply: Reply) -> &Self {
        self.inner.lock().unwrap().list = Some(reply);
        self
    }

    pub fn on_details(&self, imei: &str, reply: Reply) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .details
            .insert(imei.to_string(), reply);
        self
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.inner.lock().unwrap().hits.clone()
    }

    fn record(&self, method: Method, path: String, fields: Vec<(String, String)>) {
        self.inner.lock().unwrap().hits.push(Hit {
            method,
            path,
            fields,
        });
    }

    fn reply(&self, pick: impl FnOnce(&Inner) -> Option<Reply>) -> Response {
        let inner = self.inner.lock().unwrap();
        pick(&inner)
            .unwrap_or_else(|| Reply::json(404, json!({"error": "not scripted"})))
            .into_response()
    }

    /// Serve on an ephemeral port; returns the base URL
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route(FORM_ACTION, post(add_device))
            .route("/delete/swan/{imei}", delete(delete_device))
            .route("/get_device_details/{imei}", get(device_details))
            .route("/get_swan_devices", get(list_devices))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn add_device(State(mock): State<MockRegistry>, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap();
        fields.push((name, value));
    }

    mock.record(Method::POST, FORM_ACTION.to_string(), fields);
    mock.reply(|inner| inner.add.clone())
}

async fn delete_device(State(mock): State<MockRegistry>, Path(imei): Path<String>) -> Response {
    mock.record(Method::DELETE, format!("/delete/swan/{}", imei), Vec::new());
    mock.reply(|inner| inner.delete.clone())
}

async fn device_details(State(mock): State<MockRegistry>, Path(imei): Path<String>) -> Response {
    mock.record(Method::GET, format!("/get_device_details/{}", imei), Vec::new());
    mock.reply(|inner| inner.details.get(&imei).cloned())
}

async fn list_devices(State(mock): State<MockRegistry>) -> Response {
    mock.record(Method::GET, "/get_swan_devices".to_string(), Vec::new());
    mock.reply(|inner| inner.list.clone())
}

/// HTTP-backed client wired to an in-memory page
pub fn client_for(base_url: &str, page: MemoryPage) -> (DeviceRegistryClient, Arc<MemoryPage>) {
    let registry = HttpRegistry::new(base_url, &HttpConfig::default()).unwrap();
    let page = Arc::new(page);
    let client = DeviceRegistryClient::new(
        Arc::new(registry),
        Page::from_single(page.clone()),
        ClientOptions::default(),
    );
    (client, page)
}

/// Base URL nothing listens on
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
