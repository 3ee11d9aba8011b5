#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]
use inbox_server::AppBuilder;
use inbox_server::adapters::memory::InMemoryMessageStore;
use inbox_server::api::MgmtState;
use inbox_server::config::{Config, ServerConfig};
use serde_json::Value;
use std::sync::{Arc, Once};
use tokio::net::TcpListener;
use tokio::sync::watch;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("inbox_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 0, mgmt_port: 0, ..ServerConfig::default() },
        ..Config::default()
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
    pub store: Arc<InMemoryMessageStore>,
    pub shutdown_tx: watch::Sender<bool>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(get_test_config()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        setup_tracing();

        let store = Arc::new(InMemoryMessageStore::new());
        let app = AppBuilder::new(config.clone()).with_store(Arc::clone(&store) as _).build();

        let app_router = inbox_server::api::app_router(&config, app.services);
        let mgmt_router = inbox_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_listener = TcpListener::bind(format!("{}:0", config.server.host)).await.unwrap();
        let mgmt_listener = TcpListener::bind(format!("{}:0", config.server.host)).await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut api_rx = shutdown_rx.clone();
        tokio::spawn(async move {
            axum::serve(api_listener, app_router)
                .with_graceful_shutdown(async move {
                    let _ = api_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        let mut mgmt_rx = shutdown_rx;
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router)
                .with_graceful_shutdown(async move {
                    let _ = mgmt_rx.wait_for(|&s| s).await;
                })
                .await
                .unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), config, store, shutdown_tx }
    }

    pub async fn send_message(&self, body: &Value) -> reqwest::Response {
        self.client.post(format!("{}/v1/messages", self.server_url)).json(body).send().await.unwrap()
    }

    pub async fn mark_read(&self, body: &Value) -> reqwest::Response {
        self.client.post(format!("{}/v1/messages/read", self.server_url)).json(body).send().await.unwrap()
    }

    pub async fn get_message(&self, id: &str) -> reqwest::Response {
        self.client.get(format!("{}/v1/messages/{}", self.server_url, id)).send().await.unwrap()
    }

    pub async fn list_messages(&self, user_id: &str) -> Vec<Value> {
        let resp =
            self.client.get(format!("{}/v1/users/{}/messages", self.server_url, user_id)).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    pub async fn delete_conversation(&self, conversation_id: &str, body: &Value) -> reqwest::Response {
        self.client
            .delete(format!("{}/v1/conversations/{}", self.server_url, conversation_id))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Stores a message from `sender` to `receiver` and returns its id.
    pub async fn seed_message(&self, id: &str, sender: &str, receiver: &str) -> String {
        let resp = self
            .send_message(&serde_json::json!({
                "id": id,
                "senderId": sender,
                "receiverId": receiver,
                "message": format!("hello from {sender}"),
            }))
            .await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["message"]["id"].as_str().unwrap().to_string()
    }
}
