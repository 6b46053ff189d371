use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

/// How long an admin login stays valid, server side and in the cookie.
pub const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

type HmacSha1 = Hmac<Sha1>;

/// Server-side record of which sessions belong to a logged-in admin.
///
/// The cookie carries `<session id>.<signature>`; a session counts only when
/// the signature checks out against the secret and the id was issued less
/// than `ttl` ago. Expired ids are evicted on lookup and on every new login.
/// Nothing survives a restart.
pub struct SessionStore {
    secret: Vec<u8>,
    ttl: Duration,
    admins: Mutex<HashMap<String, Instant>>,
}

impl SessionStore {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, SESSION_TTL)
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
            admins: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn mac(&self) -> anyhow::Result<HmacSha1> {
        HmacSha1::new_from_slice(&self.secret)
            .map_err(|e| anyhow::anyhow!("invalid session secret: {e}"))
    }

    /// Start an admin session and return the signed cookie value for it.
    pub fn start_admin(&self) -> anyhow::Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut mac = self.mac()?;
        mac.update(id.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        let mut admins = self
            .admins
            .lock()
            .map_err(|_| anyhow::anyhow!("session mutex poisoned"))?;
        admins.retain(|_, issued| issued.elapsed() < self.ttl);
        admins.insert(id.clone(), Instant::now());

        Ok(format!("{id}.{signature}"))
    }

    pub fn is_admin(&self, token: &str) -> bool {
        let Some(id) = self.verified_id(token) else {
            return false;
        };
        let Ok(mut admins) = self.admins.lock() else {
            return false;
        };
        match admins.get(id) {
            Some(issued) if issued.elapsed() < self.ttl => true,
            Some(_) => {
                admins.remove(id);
                tracing::info!("admin session expired");
                false
            }
            None => false,
        }
    }

    /// Forget the session. Unknown or forged tokens are ignored.
    pub fn end(&self, token: &str) {
        if let Some(id) = self.verified_id(token) {
            if let Ok(mut admins) = self.admins.lock() {
                admins.remove(id);
            }
        }
    }

    #[cfg(test)]
    fn held(&self) -> usize {
        self.admins.lock().map(|admins| admins.len()).unwrap_or(0)
    }

    fn verified_id<'a>(&self, token: &'a str) -> Option<&'a str> {
        let (id, signature) = token.rsplit_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;
        let mut mac = self.mac().ok()?;
        mac.update(id.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(id)
    }
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// True when the request reached us over https, directly or via a proxy.
pub fn is_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

pub fn session_cookie(token: String, ttl: Duration, secure: bool) -> Cookie<'static> {
    let max_age = time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .secure(secure)
        .build()
}

pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .secure(secure)
        .build()
}
