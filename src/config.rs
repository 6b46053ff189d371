use std::env;

pub const DEFAULT_SECRET_KEY: &str = "consultancy-dev-secret-change-me";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub admin_username: String,
    pub admin_password: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "consultancy.db".to_string()),
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
            admin_username: env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }

    /// Names of settings still carrying their development defaults.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut found = vec![];
        if self.secret_key == DEFAULT_SECRET_KEY {
            found.push("SECRET_KEY");
        }
        if self.admin_password == DEFAULT_ADMIN_PASSWORD {
            found.push("ADMIN_PASSWORD");
        }
        found
    }
}
