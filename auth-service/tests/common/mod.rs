#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth_service::domain::auth::errors::DirectoryError;
use auth_service::domain::auth::models::NewUser;
use auth_service::domain::auth::models::User;
use auth_service::domain::auth::models::UserId;
use auth_service::domain::auth::models::Username;
use auth_service::domain::auth::ports::UserProvider;
use auth_service::domain::auth::ports::UserSaver;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::security::Argon2PasswordHasher;
use auth_service::outbound::security::JwtTokenIssuer;
use auth_service::proto::auth_client::AuthClient;
use auth_service::proto::auth_server::AuthServer;
use auth_service::proto::LoginRequest;
use auth_service::proto::RegisterRequest;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User directory held in memory; enforces username uniqueness like the database does.
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<String, User>>,
    next_id: AtomicI64,
    lookup_delay: Option<Duration>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            lookup_delay: None,
        }
    }

    /// Directory whose lookups take `delay`, to exercise request deadlines.
    pub fn with_lookup_delay(delay: Duration) -> Self {
        Self {
            lookup_delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn stored(&self, username: &str) -> Option<User> {
        self.users.lock().unwrap().get(username).cloned()
    }
}

#[async_trait]
impl UserProvider for InMemoryUserDirectory {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DirectoryError> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }
}

#[async_trait]
impl UserSaver for InMemoryUserDirectory {
    async fn save_user(&self, user: NewUser) -> Result<UserId, DirectoryError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.username.as_str()) {
            return Err(DirectoryError::UsernameTaken(
                user.username.as_str().to_string(),
            ));
        }

        let id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst));
        users.insert(
            user.username.as_str().to_string(),
            User {
                id,
                name: user.name,
                username: user.username,
                password_hash: user.password_hash,
            },
        );

        Ok(id)
    }
}

/// Real gRPC server on an ephemeral port, backed by an in-memory directory.
pub struct TestApp {
    pub address: SocketAddr,
    pub client: AuthClient<Channel>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub token_ttl: chrono::Duration,
    pub jwt_handler: auth::JwtHandler,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_directory(InMemoryUserDirectory::new()).await
    }

    pub async fn spawn_with_directory(directory: InMemoryUserDirectory) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().unwrap();

        let directory = Arc::new(directory);
        let token_ttl = chrono::Duration::hours(1);

        let service = Arc::new(AuthService::new(
            Arc::clone(&directory),
            Arc::clone(&directory),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenIssuer::new(JWT_SECRET)),
            token_ttl,
            tracing::Span::none(),
        ));

        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServer::new(AuthGrpcService::new(service)))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = AuthClient::connect(format!("http://{}", address))
            .await
            .expect("Failed to connect gRPC client");

        Self {
            address,
            client,
            directory,
            token_ttl,
            jwt_handler: auth::JwtHandler::new(JWT_SECRET),
        }
    }

    pub async fn register(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<i64, tonic::Status> {
        self.client
            .clone()
            .register_new_user(RegisterRequest {
                name: name.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|response| response.into_inner().user_id)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, tonic::Status> {
        self.client
            .clone()
            .login(LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|response| response.into_inner().token)
    }
}
