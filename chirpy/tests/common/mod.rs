use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpBody;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::models::SortOrder;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::chirp::service::ChirpService;
use chirpy::config::Platform;
use chirpy::inbound::http::metrics::ServerMetrics;
use chirpy::inbound::http::router::create_router;
use chirpy::inbound::http::router::AppState;
use chirpy::session::errors::SessionError;
use chirpy::session::models::RefreshToken;
use chirpy::session::ports::RefreshTokenRepository;
use chirpy::session::service::SessionService;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::models::UserId;
use chirpy::user::ports::UserRepository;
use chirpy::user::service::UserService;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application on the dev platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let password_hasher = PasswordHasher::with_cost(4);
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, Duration::hours(1))
                .with_password_hasher(password_hasher),
        );

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&store), password_hasher)),
            chirp_service: Arc::new(ChirpService::new(Arc::clone(&store))),
            session_service: Arc::new(SessionService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&authenticator),
                Duration::days(60),
            )),
            authenticator,
            metrics: Arc::new(ServerMetrics::new()),
            polka_api_key: Arc::from(POLKA_API_KEY),
            platform,
        };

        let router = create_router(state, concat!(env!("CARGO_MANIFEST_DIR"), "/app"));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body (user fields plus tokens)
    pub async fn login(&self, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Register and log in; returns (user id, access token, refresh token)
    pub async fn signed_in_user(&self, email: &str) -> (String, String, String) {
        self.create_user(email, "pass_word!").await;
        let session = self.login(email, "pass_word!").await;
        (
            session["id"].as_str().unwrap().to_string(),
            session["token"].as_str().unwrap().to_string(),
            session["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Post a chirp and return the response body
    pub async fn create_chirp(&self, token: &str, body: &str) -> serde_json::Value {
        let response = self
            .post_authenticated("/api/chirps", token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

/// Single in-memory store standing in for the three Postgres tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    chirps: Vec<Chirp>,
    refresh_tokens: Vec<RefreshToken>,
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Force a stored refresh token past its expiry
    pub fn expire_refresh_token(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut tables = self.tables();
        if let Some(stored) = tables.refresh_tokens.iter_mut().find(|t| t.token == token) {
            stored.expires_at = expires_at;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, UserError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| &u.email == email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.clone(),
            password_hash: password_hash.to_string(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables().users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.tables().users.iter().find(|u| &u.email == email).cloned())
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| &u.email == email && &u.id != id) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.email = email.clone();
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        let mut tables = self.tables();
        let user = tables
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut tables = self.tables();
        let deleted = tables.users.len() as u64;
        tables.users.clear();
        tables.chirps.clear();
        tables.refresh_tokens.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl ChirpRepository for InMemoryStore {
    async fn create(&self, author: &UserId, body: &ChirpBody) -> Result<Chirp, ChirpError> {
        let mut tables = self.tables();
        if !tables.users.iter().any(|u| &u.id == author) {
            return Err(ChirpError::AuthorNotFound(author.to_string()));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body: body.clone(),
            user_id: *author,
            created_at: now,
            updated_at: now,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self.tables().chirps.iter().find(|c| &c.id == id).cloned())
    }

    async fn list(
        &self,
        author: Option<UserId>,
        order: SortOrder,
    ) -> Result<Vec<Chirp>, ChirpError> {
        // Insertion order is creation order.
        let mut chirps: Vec<Chirp> = self
            .tables()
            .chirps
            .iter()
            .filter(|c| author.map_or(true, |a| c.user_id == a))
            .cloned()
            .collect();
        if order == SortOrder::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut tables = self.tables();
        let before = tables.chirps.len();
        tables.chirps.retain(|c| &c.id != id);
        if tables.chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, ChirpError> {
        let mut tables = self.tables();
        let deleted = tables.chirps.len() as u64;
        tables.chirps.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn create(&self, token: &RefreshToken) -> Result<(), SessionError> {
        self.tables().refresh_tokens.push(token.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self
            .tables()
            .refresh_tokens
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), SessionError> {
        let mut tables = self.tables();
        let stored = tables
            .refresh_tokens
            .iter_mut()
            .find(|t| t.token == token)
            .ok_or(SessionError::RefreshTokenNotFound)?;
        stored.revoked_at.get_or_insert(revoked_at);
        stored.updated_at = revoked_at;
        Ok(())
    }
}
