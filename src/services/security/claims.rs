/*
 * Responsibility
 * - Claims model handed to us by the authentication layer (Claim / ClaimsIdentity / Principal)
 * - Claim type identifiers used by the back office
 * - Principal carries a closed set of identity variants; typed back office identities
 *   are attached next to raw claims identities once validated
 */
use std::sync::Arc;

use super::BackOfficeIdentity;

/// Claim type identifiers.
///
/// Standard types reuse the well-known XML schema URIs so tokens minted by other
/// identity providers map 1:1.
pub mod claim_types {
    pub const NAME_IDENTIFIER: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
    pub const NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
    pub const GIVEN_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/givenname";
    pub const LOCALITY: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/locality";
    pub const ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

    pub const START_CONTENT_NODE_ID: &str =
        "http://content-gateway/identity/claims/backoffice/startcontentnode";
    pub const START_MEDIA_NODE_ID: &str =
        "http://content-gateway/identity/claims/backoffice/startmedianode";
    pub const ALLOWED_APPLICATIONS: &str =
        "http://content-gateway/identity/claims/backoffice/allowedapp";
    pub const SESSION_ID: &str = "http://content-gateway/identity/claims/sessionid";
    pub const TICKET_EXPIRES: &str = "http://content-gateway/identity/claims/ticketexpires";
    pub const SECURITY_STAMP: &str = "AspNet.Identity.SecurityStamp";
}

/// Claim types that must be present with a non-blank value on a back office identity.
///
/// Roles and allowed applications are collections that may legitimately be empty,
/// so they are not part of this set.
pub const REQUIRED_BACK_OFFICE_CLAIM_TYPES: [&str; 7] = [
    claim_types::NAME_IDENTIFIER,
    claim_types::NAME,
    claim_types::GIVEN_NAME,
    claim_types::START_CONTENT_NODE_ID,
    claim_types::START_MEDIA_NODE_ID,
    claim_types::LOCALITY,
    claim_types::SECURITY_STAMP,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
    pub issuer: Option<String>,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A bag of claims plus the scheme that authenticated it.
///
/// An identity without an authentication type is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsIdentity {
    authentication_type: Option<String>,
    claims: Vec<Claim>,
}

impl ClaimsIdentity {
    pub fn new(authentication_type: impl Into<String>) -> Self {
        Self {
            authentication_type: Some(authentication_type.into()),
            claims: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_claim(Claim::new(claim_type, value));
        self
    }

    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication_type
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    pub fn find_all<'a>(&'a self, claim_type: &str) -> impl Iterator<Item = &'a Claim> {
        self.claims.iter().filter(move |c| c.claim_type == claim_type)
    }

    pub fn has_claim(&self, claim_type: &str) -> bool {
        self.find_first(claim_type).is_some()
    }
}

/// One identity attached to a claims principal.
///
/// Closed set: either the raw claims produced by authentication, or a back office
/// identity that has already been validated earlier in the request.
#[derive(Debug, Clone)]
pub enum PrincipalIdentity {
    Claims(ClaimsIdentity),
    BackOffice(Arc<BackOfficeIdentity>),
}

impl PrincipalIdentity {
    pub fn claims(&self) -> &ClaimsIdentity {
        match self {
            Self::Claims(identity) => identity,
            Self::BackOffice(identity) => identity.claims(),
        }
    }

    pub fn as_back_office(&self) -> Option<&Arc<BackOfficeIdentity>> {
        match self {
            Self::BackOffice(identity) => Some(identity),
            Self::Claims(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimsPrincipal {
    identities: Vec<PrincipalIdentity>,
}

impl ClaimsPrincipal {
    pub fn new(identity: ClaimsIdentity) -> Self {
        Self {
            identities: vec![PrincipalIdentity::Claims(identity)],
        }
    }

    pub fn add_identity(&mut self, identity: PrincipalIdentity) {
        self.identities.push(identity);
    }

    /// The primary identity is the first one attached.
    pub fn identity(&self) -> Option<&PrincipalIdentity> {
        self.identities.first()
    }

    pub fn identities(&self) -> &[PrincipalIdentity] {
        &self.identities
    }

    /// First claim of the given type across all attached identities.
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.identities
            .iter()
            .find_map(|identity| identity.claims().find_first(claim_type))
    }
}

/// Identity produced by a scheme that does not speak claims (e.g. a plain name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericIdentity {
    pub name: String,
    pub authentication_type: Option<String>,
}

/// The credential attached to a request by the authentication layer.
#[derive(Debug, Clone)]
pub enum Principal {
    Claims(ClaimsPrincipal),
    Generic(GenericIdentity),
}

impl Principal {
    pub fn as_claims(&self) -> Option<&ClaimsPrincipal> {
        match self {
            Self::Claims(principal) => Some(principal),
            Self::Generic(_) => None,
        }
    }

    pub fn as_claims_mut(&mut self) -> Option<&mut ClaimsPrincipal> {
        match self {
            Self::Claims(principal) => Some(principal),
            Self::Generic(_) => None,
        }
    }
}

impl From<ClaimsIdentity> for Principal {
    fn from(identity: ClaimsIdentity) -> Self {
        Self::Claims(ClaimsPrincipal::new(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_without_authentication_type_is_anonymous() {
        assert!(!ClaimsIdentity::anonymous().is_authenticated());
        assert!(!ClaimsIdentity::new("  ").is_authenticated());
        assert!(ClaimsIdentity::new("Bearer").is_authenticated());
    }

    #[test]
    fn find_first_searches_every_attached_identity() {
        let mut principal = ClaimsPrincipal::new(
            ClaimsIdentity::new("Cookies").with_claim(claim_types::NAME, "editor"),
        );
        principal.add_identity(PrincipalIdentity::Claims(
            ClaimsIdentity::new("Bearer").with_claim(claim_types::SESSION_ID, "s-1"),
        ));

        assert_eq!(
            principal
                .find_first(claim_types::SESSION_ID)
                .map(|c| c.value.as_str()),
            Some("s-1")
        );
        assert!(principal.find_first(claim_types::ROLE).is_none());
    }

    #[test]
    fn find_all_results_outlive_the_claim_type_argument() {
        let identity = ClaimsIdentity::new("Bearer")
            .with_claim(claim_types::ROLE, "editor")
            .with_claim(claim_types::NAME, "editor@example.com")
            .with_claim(claim_types::ROLE, "writer");

        let roles: Vec<&Claim> = {
            let claim_type = claim_types::ROLE.to_string();
            identity.find_all(&claim_type).collect()
        };

        let values: Vec<&str> = roles.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["editor", "writer"]);
    }

    #[test]
    fn required_set_excludes_collection_claims() {
        assert!(!REQUIRED_BACK_OFFICE_CLAIM_TYPES.contains(&claim_types::ROLE));
        assert!(!REQUIRED_BACK_OFFICE_CLAIM_TYPES.contains(&claim_types::ALLOWED_APPLICATIONS));
    }
}
