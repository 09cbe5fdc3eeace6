use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::claims::SessionClaims;
use crate::config::SessionConfig;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "cutiscura_session";

/// Signs and verifies the token stored in the session cookie.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign(&self, session_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + self.ttl;
        let claims = SessionClaims {
            sid: session_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(session_id = %session_id, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::new(&state.config.session)
    }
}

/// Session id named by the request's cookie, if the token is valid.
pub fn session_id_from_cookies(cookies: &Cookies, keys: &SessionKeys) -> Option<Uuid> {
    let cookie = cookies.get(SESSION_COOKIE)?;
    match keys.verify(cookie.value()) {
        Ok(claims) => Some(claims.sid),
        Err(e) => {
            warn!(error = %e, "invalid or expired session token");
            None
        }
    }
}

pub fn set_session_cookie(cookies: &Cookies, token: String, ttl: Duration) {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(ttl)
        .build();
    cookies.add(cookie);
}

pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .build();
    cookies.add(cookie);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, issuer: &str) -> SessionConfig {
        SessionConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            ttl_minutes: 480,
        }
    }

    #[test]
    fn sign_and_verify_session_token() {
        let keys = SessionKeys::new(&config("test-secret", "cutiscura"));
        let sid = Uuid::new_v4();
        let token = keys.sign(sid).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sid, sid);
        assert_eq!(claims.iss, "cutiscura");
        assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
    }

    #[test]
    fn verify_rejects_foreign_secret() {
        let ours = SessionKeys::new(&config("test-secret", "cutiscura"));
        let theirs = SessionKeys::new(&config("other-secret", "cutiscura"));
        let token = theirs.sign(Uuid::new_v4()).expect("sign");
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer() {
        let ours = SessionKeys::new(&config("test-secret", "cutiscura"));
        let theirs = SessionKeys::new(&config("test-secret", "elsewhere"));
        let token = theirs.sign(Uuid::new_v4()).expect("sign");
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = SessionKeys::new(&config("test-secret", "cutiscura"));
        assert!(keys.verify("not.a.token").is_err());
    }
}
