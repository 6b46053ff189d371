use crate::config::AppConfig;
use crate::db::DocumentStore;
use crate::services::auth::CredentialVerifier;
use crate::services::session::SessionStore;

pub struct AppState {
    pub store: Box<dyn DocumentStore>,
    pub config: AppConfig,
    pub credentials: Box<dyn CredentialVerifier>,
    pub sessions: SessionStore,
}
