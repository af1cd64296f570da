use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::services::security::{
    Claim, ClaimsIdentity, Principal, claim_types, format_ticket_expiry,
};

/// Authentication scheme name stamped on identities produced from bearer tokens.
pub const BEARER_AUTHENTICATION_TYPE: &str = "Bearer";

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or invalid 'aud' claim")]
    MissingOrInvalidAud,
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("'exp' is out of range")]
    InvalidExpiry,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid ed25519 public key pem")]
    KeyMaterial(#[source] jsonwebtoken::errors::Error),
    #[error("access token rejected")]
    Rejected(#[from] AccessJwtError),
}

/// Turns a bearer credential into the principal for the request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
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

/// Access token (JWT) claims issued for back office users.
///
/// Profile fields are optional here. A token that lacks them still authenticates, it
/// just won't yield a back office identity downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub security_stamp: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,

    #[serde(default)]
    pub start_content_nodes: Vec<i64>,
    #[serde(default)]
    pub start_media_nodes: Vec<i64>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub allowed_apps: Vec<String>,
}

impl AccessTokenClaims {
    /// Map token fields onto claim types. Absent optional fields produce no claim.
    pub fn into_identity(self) -> Result<ClaimsIdentity, AccessJwtError> {
        let expires = i64::try_from(self.exp)
            .ok()
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
            .ok_or(AccessJwtError::InvalidExpiry)?;

        let issuer = self.iss;
        let mut identity = ClaimsIdentity::new(BEARER_AUTHENTICATION_TYPE);
        let mut push = |claim_type: &str, value: String| {
            identity.add_claim(Claim::new(claim_type, value).with_issuer(&issuer));
        };

        push(claim_types::NAME_IDENTIFIER, self.sub);
        let optional = [
            (claim_types::NAME, self.name),
            (claim_types::GIVEN_NAME, self.given_name),
            (claim_types::LOCALITY, self.locale),
            (claim_types::SECURITY_STAMP, self.security_stamp),
            (claim_types::SESSION_ID, self.sid),
        ];
        for (claim_type, value) in optional {
            if let Some(value) = value {
                push(claim_type, value);
            }
        }
        for node in self.start_content_nodes {
            push(claim_types::START_CONTENT_NODE_ID, node.to_string());
        }
        for node in self.start_media_nodes {
            push(claim_types::START_MEDIA_NODE_ID, node.to_string());
        }
        for role in self.roles {
            push(claim_types::ROLE, role);
        }
        for app in self.allowed_apps {
            push(claim_types::ALLOWED_APPLICATIONS, app);
        }
        push(claim_types::TICKET_EXPIRES, format_ticket_expiry(expires));

        Ok(identity)
    }
}

/// EdDSA (Ed25519) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
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
    pub fn new(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AuthError> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())
            .map_err(AuthError::KeyMaterial)?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify signature, `exp`, `iss` and `aud`, then require non-empty `iss`/`sub`/`aud`.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

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

        Ok(claims)
    }
}

#[async_trait]
impl Authenticator for AuthService {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let identity = self.verify_strict(token)?.into_identity()?;
        Ok(Principal::from(identity))
    }
}
