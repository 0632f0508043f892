use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

use crate::models::Claims;

fn now() -> usize {
    chrono::Utc::now().timestamp().max(0) as usize
}

/// Signs a session token for `user_id`. The returned claims carry the `jti`
/// that must be recorded in the sessions table.
pub fn generate_session_token(
    user_id: i64,
    username: String,
    secret: &str,
    ttl: usize,
) -> Result<(String, Claims), Error> {
    let claims = Claims {
        user_id,
        sub: username,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, claims))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let (token, claims) = generate_session_token(7, "alice".into(), "secret", 60).unwrap();
        let decoded = verify_token(&token, "secret").unwrap();

        assert_eq!(decoded.user_id, 7);
        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.jti, claims.jti);
    }

    #[test]
    fn wrong_secret_and_tampering_fail() {
        let (token, _) = generate_session_token(7, "alice".into(), "secret", 60).unwrap();

        assert!(verify_token(&token, "other").is_err());
        assert!(verify_token(&format!("{token}x"), "secret").is_err());
    }

    #[test]
    fn expired_token_fails() {
        let claims = Claims {
            user_id: 7,
            sub: "alice".into(),
            exp: now() - 3600,
            jti: "old".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let (_, a) = generate_session_token(1, "a".into(), "secret", 60).unwrap();
        let (_, b) = generate_session_token(1, "a".into(), "secret", 60).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
