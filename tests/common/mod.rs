#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use content_gateway::config::Config;
use content_gateway::services::auth::{AccessJwtError, AuthError, Authenticator};
use content_gateway::services::routing::{InMemoryContentCache, PublishedContent};
use content_gateway::services::security::{
    ClaimsIdentity, GenericIdentity, Principal, claim_types, format_ticket_expiry,
};
use uuid::Uuid;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/ed25519_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/ed25519_public.pem");

/// Authenticated identity carrying every required back office claim.
pub fn back_office_claims() -> ClaimsIdentity {
    ClaimsIdentity::new("Cookies")
        .with_claim(claim_types::NAME_IDENTIFIER, "-1")
        .with_claim(claim_types::NAME, "admin")
        .with_claim(claim_types::GIVEN_NAME, "Administrator")
        .with_claim(claim_types::START_CONTENT_NODE_ID, "-1")
        .with_claim(claim_types::START_MEDIA_NODE_ID, "-1")
        .with_claim(claim_types::LOCALITY, "en-US")
        .with_claim(claim_types::SECURITY_STAMP, "stamp-1")
        .with_claim(claim_types::ROLE, "admin")
        .with_claim(claim_types::ALLOWED_APPLICATIONS, "content")
        .with_claim(claim_types::SESSION_ID, "session-1")
}

/// Same claims, except `skip` is left out.
pub fn back_office_claims_without(skip: &str) -> ClaimsIdentity {
    let full = back_office_claims();
    let mut identity = ClaimsIdentity::new("Cookies");
    for claim in full.claims().iter().filter(|c| c.claim_type != skip) {
        identity.add_claim(claim.clone());
    }
    identity
}

pub fn expiring_at(identity: ClaimsIdentity, expires: DateTime<Utc>) -> ClaimsIdentity {
    identity.with_claim(claim_types::TICKET_EXPIRES, format_ticket_expiry(expires))
}

pub fn content(id: i64, route: &str, alias: &str, template: Option<&str>) -> PublishedContent {
    PublishedContent {
        id,
        key: Uuid::new_v4(),
        name: format!("node {id}"),
        route: route.to_string(),
        content_type_alias: alias.to_string(),
        template_alias: template.map(str::to_string),
        culture: None,
    }
}

pub fn content_cache() -> Arc<InMemoryContentCache> {
    Arc::new(
        InMemoryContentCache::new([
            content(1050, "/", "home", None),
            PublishedContent {
                culture: Some("en-US".into()),
                ..content(1061, "/blog/hello-world", "blogPost", Some("Amp"))
            },
        ])
        .unwrap(),
    )
}

pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

pub fn config(extra: &[(&str, &str)]) -> Config {
    let mut pairs: Vec<(String, String)> = vec![
        ("PUBLIC_BASE_URL".into(), "http://example.com".into()),
        ("AUTH_ISSUER".into(), "https://id.example.com".into()),
        ("AUTH_AUDIENCE".into(), "backoffice".into()),
        ("ACCESS_JWT_PUBLIC_KEY_PEM".into(), PUBLIC_PEM.into()),
        ("RESERVED_PATHS".into(), "/api".into()),
        ("CONTENT_CONTROLLERS".into(), "blogPost=BlogPost:Amp".into()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

/// Token → principal table standing in for a real identity provider.
pub struct StubAuthenticator;

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let in_ten_minutes = Utc::now() + chrono::Duration::minutes(10);
        match token {
            "editor" => Ok(expiring_at(back_office_claims(), in_ten_minutes).into()),
            "no-stamp" => Ok(back_office_claims_without(claim_types::SECURITY_STAMP).into()),
            "bad-expiry" => Ok(back_office_claims()
                .with_claim(claim_types::TICKET_EXPIRES, "2024-05-01 10:00")
                .into()),
            "windows" => Ok(Principal::Generic(GenericIdentity {
                name: "DOMAIN\\editor".into(),
                authentication_type: Some("Negotiate".into()),
            })),
            _ => Err(AuthError::Rejected(AccessJwtError::EmptyClaim("sub"))),
        }
    }
}
