use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::HasherSettings;
use auth::PasswordHasher;
use auth::Principal;
use auth::PrincipalId;
use auth::Role;
use auth::TokenIssuer;
use auth::TokenSettings;
use identity_service::domain::session::service::SessionService;
use identity_service::inbound::http::router::create_router;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "http://localhost:8080";

/// Credential store backed by a map, standing in for Postgres.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    principals: RwLock<HashMap<String, Principal>>,
    unavailable: RwLock<bool>,
}

impl InMemoryCredentialStore {
    pub fn insert(&self, principal: Principal) {
        self.principals
            .write()
            .unwrap()
            .insert(principal.identifier.clone(), principal);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap() = unavailable;
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, CredentialStoreError> {
        if *self.unavailable.read().unwrap() {
            return Err(CredentialStoreError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(self.principals.read().unwrap().get(identifier).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryCredentialStore>,
    pub token_issuer: Arc<TokenIssuer>,
    pub hasher: PasswordHasher,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = PasswordHasher::with_settings(HasherSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");

        let token_issuer = Arc::new(
            TokenIssuer::new(TokenSettings {
                secret: JWT_SECRET.to_string(),
                issuer: JWT_ISSUER.to_string(),
                access_ttl_seconds: 900,
                refresh_ttl_seconds: 1_209_600,
            })
            .expect("Failed to build token issuer"),
        );

        let store = Arc::new(InMemoryCredentialStore::default());
        let authenticator = Arc::new(
            Authenticator::new(Arc::clone(&store), hasher.clone())
                .expect("Failed to build authenticator"),
        );
        let session_service = Arc::new(SessionService::new(
            authenticator,
            Arc::clone(&token_issuer),
        ));

        let router = create_router(session_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            token_issuer,
            hasher,
            api_client: reqwest::Client::new(),
        }
    }

    /// Register a principal directly in the store
    pub fn register(&self, id: i64, email: &str, secret: &str, role: &str) {
        let digest = self.hasher.hash(secret).expect("Failed to hash password");
        self.store
            .insert(Principal::new(PrincipalId(id), email, digest, Role::new(role)));
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
