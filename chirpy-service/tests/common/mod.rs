#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::ApiKey;
use auth::Authenticator;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::Chirp;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::ports::ChirpRepository;
use chirpy_service::domain::chirp::service::ChirpService;
use chirpy_service::domain::session::errors::SessionError;
use chirpy_service::domain::session::models::RefreshTokenRecord;
use chirpy_service::domain::session::models::TokenLifetimes;
use chirpy_service::domain::session::ports::RefreshTokenRepository;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::middleware::Metrics;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// In-memory stand-in for the users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        match self.users.lock().unwrap().get_mut(id) {
            Some(user) => {
                user.is_chirpy_red = true;
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut users = self.users.lock().unwrap();
        let deleted = users.len() as u64;
        users.clear();
        Ok(deleted)
    }
}

/// In-memory stand-in for the chirps table.
#[derive(Default)]
pub struct InMemoryChirpRepository {
    chirps: Mutex<Vec<Chirp>>,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| author.map_or(true, |a| c.user_id == a))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != *id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory stand-in for the refresh_tokens table, keyed by digest.
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn stored_digests(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, record: RefreshTokenRecord) -> Result<(), SessionError> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.token_hash) {
            return Err(SessionError::Storage("duplicate token".to_string()));
        }
        records.insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn find_user_id_by_valid_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserId>, SessionError> {
        let now = Utc::now();
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(token_hash)
            .filter(|record| record.is_usable(now))
            .map(|record| record.user_id))
    }

    async fn revoke(&self, token_hash: &str) -> Result<u64, SessionError> {
        match self.records.lock().unwrap().get_mut(token_hash) {
            Some(record) => {
                record.revoked_at = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

pub type TestSessionService =
    SessionService<InMemoryUserRepository, InMemoryRefreshTokenRepository>;

/// Session service over fresh in-memory stores.
pub fn session_service(
    users: Arc<InMemoryUserRepository>,
    refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
) -> TestSessionService {
    SessionService::new(
        users,
        refresh_tokens,
        Arc::new(Authenticator::new(JWT_SECRET)),
        TokenLifetimes::default(),
    )
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

impl TestApp {
    /// Spawn the application on the dev platform.
    pub async fn spawn() -> Self {
        Self::spawn_on("dev").await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: &str) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let chirps = Arc::new(InMemoryChirpRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&users))),
            chirp_service: Arc::new(ChirpService::new(chirps)),
            session_service: Arc::new(SessionService::new(
                users,
                Arc::clone(&refresh_tokens),
                Arc::clone(&authenticator),
                TokenLifetimes::default(),
            )),
            authenticator,
            api_key: ApiKey::new(POLKA_KEY),
            metrics: Arc::new(Metrics::new()),
            platform: platform.to_string(),
        };

        let router = create_router(state, env!("CARGO_MANIFEST_DIR"));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(JWT_SECRET),
            refresh_tokens,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response body.
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body with both tokens.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Register and log in; returns (user id, access token, refresh token).
    pub async fn signed_in_user(&self, email: &str, password: &str) -> (String, String, String) {
        self.create_user(email, password).await;
        let body = self.login(email, password).await;
        (
            body["id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}
