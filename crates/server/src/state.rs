use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::home::repo::seaorm::SeaOrmHomeRepository;
use service::home::HomeService;

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub homes: Arc<HomeService<SeaOrmHomeRepository>>,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: &configs::AuthConfig) -> Self {
        let homes = HomeService::new(Arc::new(SeaOrmHomeRepository { db: db.clone() }));
        let auth = AuthService::new(
            Arc::new(SeaOrmAuthRepository { db }),
            AuthConfig {
                jwt_secret: auth.jwt_secret.clone(),
                product_key_secret: auth.product_key_secret.clone(),
                token_ttl_hours: auth.token_ttl_hours,
            },
        );
        Self { homes: Arc::new(homes), auth: Arc::new(auth) }
    }
}
