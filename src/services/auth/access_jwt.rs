use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
    InvalidSubUid,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUid => write!(f, "invalid 'sub' (expected positive uid)"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Access token (JWT) claims.
///
/// `aud` may be a string or an array; `Validation::set_audience` checks it.
/// `nbf` is checked by `Validation` on the raw token and is not kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// Verified token, converted to what the rest of the app uses.
///
/// `sub` carries the forum uid, so it is promoted to `i64` here.
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub uid: i64,

    pub jti: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// Access-token verifier (EdDSA public key, or HS256 shared secret for development).
///
/// Key material is not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn from_ed_pem(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        Ok(Self::with_key(
            decoding_key,
            Algorithm::EdDSA,
            issuer,
            audience,
            leeway_seconds,
        ))
    }

    pub fn from_secret(secret: &[u8], issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        Self::with_key(
            DecodingKey::from_secret(secret),
            Algorithm::HS256,
            issuer,
            audience,
            leeway_seconds,
        )
    }

    fn with_key(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// On top of what `jsonwebtoken::Validation` checks (signature, `exp`, `iss`, `aud`),
    /// required claims must be non-empty and `sub` must be a positive uid.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }
        Self::parse_sub_uid(&claims.sub)?;

        Ok(claims)
    }

    /// Entry point for the access middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify_strict(token)?;
        let uid = Self::parse_sub_uid(&claims.sub)?;

        Ok(VerifiedAccessToken {
            uid,
            jti: claims.jti,
            roles: claims.roles,
        })
    }

    pub fn parse_sub_uid(sub: &str) -> Result<i64, AccessJwtError> {
        match sub.trim().parse::<i64>() {
            Ok(uid) if uid > 0 => Ok(uid),
            _ => Err(AccessJwtError::InvalidSubUid),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    pub(crate) const SECRET: &[u8] = b"test-access-secret";
    pub(crate) const ISSUER: &str = "https://auth.forum.test";
    pub(crate) const AUDIENCE: &str = "forum-write-api";

    pub(crate) fn service() -> AuthService {
        AuthService::from_secret(SECRET, ISSUER, AUDIENCE, 0)
    }

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    pub(crate) fn sign(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    pub(crate) fn token_for(sub: &str) -> String {
        sign(json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "sub": sub,
            "exp": now() + 300,
            "jti": "token-1",
        }))
    }

    #[test]
    fn valid_token_yields_uid() {
        let verified = service().verify_verified(&token_for("42")).unwrap();
        assert_eq!(verified.uid, 42);
        assert_eq!(verified.jti.as_deref(), Some("token-1"));
    }

    #[test]
    fn non_numeric_or_guest_sub_is_rejected() {
        for sub in ["alice", "0", "-3"] {
            let err = service().verify_verified(&token_for(sub)).unwrap_err();
            assert!(matches!(err, AccessJwtError::InvalidSubUid), "sub {sub}");
        }
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER,
            "aud": "someone-else",
            "sub": "42",
            "exp": now() + 300,
        }));
        assert!(matches!(
            service().verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "sub": "42",
            "exp": now() - 600,
        }));
        assert!(service().verify_verified(&token).is_err());
    }

    #[test]
    fn token_not_yet_valid_is_rejected() {
        let token = sign(json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "sub": "42",
            "exp": now() + 900,
            "nbf": now() + 600,
        }));
        assert!(matches!(
            service().verify_verified(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn roles_are_carried_over() {
        let token = sign(json!({
            "iss": ISSUER,
            "aud": AUDIENCE,
            "sub": "42",
            "exp": now() + 300,
            "roles": ["moderator"],
        }));
        let verified = service().verify_verified(&token).unwrap();
        assert_eq!(verified.roles, Some(vec!["moderator".to_string()]));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = AuthService::from_secret(b"another-secret", ISSUER, AUDIENCE, 0);
        assert!(other.verify_verified(&token_for("42")).is_err());
    }
}
