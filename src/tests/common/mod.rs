// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use reqwest::Client;

use crate::config::settings::{
    AuthConfig, CrmConfig, LoggingConfig, MetricsConfig, RelayConfig, ServerConfig,
    TokenCacheConfig,
};
use crate::observability::metrics::get_metrics;
use crate::server::server::{router, AppState};

pub const TOKEN_PATH: &str = "/oauth/token";
pub const LEAD_PATH: &str = "/prospects/api/shark-tanks";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Relay config with complete credentials pointing at the given mock servers.
pub fn relay_config(oauth_url: String, crm_base_url: String) -> RelayConfig {
    RelayConfig {
        auth: AuthConfig {
            client_id: Some("web-client".into()),
            client_secret: Some("s3cret".into()),
            oauth_url: Some(oauth_url),
            username: Some("relay@example.com".into()),
            password: Some("hunter2".into()),
        },
        crm: CrmConfig {
            base_url: crm_base_url,
            lead_path: LEAD_PATH.into(),
        },
        server: ServerConfig::default(),
        logging: LoggingConfig::default(),
        metrics: MetricsConfig {
            is_enabled: true,
            ..MetricsConfig::default()
        },
        token_cache: TokenCacheConfig::default(),
    }
}

/// Serve the relay router for `relay_config` on an ephemeral port.
pub async fn spawn_relay(relay_config: RelayConfig) -> (JoinHandle<()>, SocketAddr) {
    let metrics = get_metrics().await;
    let state = AppState::new(relay_config, build_reqwest_client(), metrics);
    spawn_axum(router(state)).await
}

pub fn jane_doe() -> serde_json::Value {
    json!({
        "Nama Lengkap": "Jane Doe",
        "Nama Perusahaan / Organisasi": "Acme",
        "Nomor Telepon": "6281234567890",
        "Rencana Berlangganan Google Workspace Untuk Berapa User ?": "10"
    })
}

/// Full lead record the CRM should receive; everything not passed is constant.
pub fn expected_lead(
    name: Option<&str>,
    company: Option<&str>,
    phones: &[&str],
    number_of_employees: Option<&str>,
) -> serde_json::Value {
    json!({
        "account_industry_list_id": null,
        "city": null,
        "company": company,
        "country": null,
        "custom_attributes": [
            {"list_id": 37, "value": "Google Form"},
            {"list_id": 31, "value": null}
        ],
        "description": null,
        "district": null,
        "email": null,
        "group_id": [],
        "latitude": null,
        "lead_source_id": 6,
        "longitude": null,
        "name": name,
        "number_of_employees": number_of_employees,
        "phones": phones,
        "product_services": [],
        "province": null,
        "reseller_id": null,
        "salutation_id": 36,
        "street": null,
        "street_detail": null,
        "sub_district": null,
        "title": null,
        "website": null,
        "zip_code": null
    })
}
