use crate::config::AppConfig;

/// Decides whether a username/password pair grants admin access.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured admin account. No hashing, no lockout.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() {
            return false;
        }
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials() {
        let creds = StaticCredentials::new("admin", "admin123");
        assert!(creds.verify("admin", "admin123"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("Admin", "admin123"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn test_empty_configured_password_never_matches() {
        let creds = StaticCredentials::new("admin", "");
        assert!(!creds.verify("admin", ""));
    }
}
