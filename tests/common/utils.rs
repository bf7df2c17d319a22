#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use matchday_predictor::run;
use matchday_predictor::config::settings::{get_config, StorageBackend};
use matchday_predictor::db::Stores;
use matchday_predictor::fixtures::FixtureCatalog;
use matchday_predictor::services::AppServices;
use matchday_predictor::telemetry::{get_subscriber, init_subscriber};

pub const SAO_PAULO: &str = "2025-03-02-sao-paulo-bragantino";
pub const ESTEGHLAL: &str = "2025-03-03-esteghlal-fc-al-nassr";
pub const FOREST: &str = "2025-03-03-nottingham-forest-ipswich-town";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name, 
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name, 
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub admin_email: String,
    pub client: Client,
}

pub struct TestUser {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    let admin_email = format!("admin-{}@example.com", Uuid::new_v4());
    configuration.database.backend = StorageBackend::Memory;
    configuration.application.admin_emails = vec![admin_email.clone()];
    configuration.application.require_email_confirmation = false;

    let services = AppServices::new(
        Stores::in_memory(),
        FixtureCatalog::builtin(),
        configuration.jwt_settings(),
        configuration.sign_up_policy(),
        configuration.scoring,
    );
    let server = run(listener, services, vec![])
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        admin_email,
        client: Client::new(),
    }
}

impl TestApp {
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}/register_user", self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute registration request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(&format!("{}/login", self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    pub async fn create_user_and_login(&self, email: &str) -> TestUser {
        let password = "password123";
        let register_response = self.register(email, password).await;
        assert_eq!(200, register_response.status().as_u16(), "Registration should succeed");

        let login_response = self.login(email, password).await;
        assert_eq!(200, login_response.status().as_u16(), "Login should succeed");
        let body: Value = login_response.json().await.expect("Failed to parse login response");

        TestUser {
            user_id: body["user"]["id"].as_str().expect("No user id in response").to_string(),
            email: email.to_string(),
            token: body["token"].as_str().expect("No token in response").to_string(),
        }
    }

    pub async fn create_test_user(&self) -> TestUser {
        let email = format!("fan-{}@example.com", Uuid::new_v4());
        self.create_user_and_login(&email).await
    }

    pub async fn create_admin(&self) -> TestUser {
        let email = self.admin_email.clone();
        self.create_user_and_login(&email).await
    }

    pub async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn submit_predictions(&self, token: &str, form: Value) -> reqwest::Response {
        self.post("/predictions", token, &json!({ "predictions": form })).await
    }

    pub async fn post_result(&self, token: &str, fixture_id: &str, home: i32, away: i32) -> reqwest::Response {
        self.client
            .put(&format!("{}/admin/results/{}", self.address, fixture_id))
            .bearer_auth(token)
            .json(&json!({ "home_goals": home, "away_goals": away }))
            .send()
            .await
            .expect("Failed to execute result request.")
    }
}
