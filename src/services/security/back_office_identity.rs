use super::claims::{REQUIRED_BACK_OFFICE_CLAIM_TYPES, ClaimsIdentity, claim_types};

/// A claims identity that passed back office validation.
///
/// The only constructor is [`BackOfficeIdentity::from_claims_identity`], so holding one
/// means every required claim was present and non-blank at construction time.
/// Accessors read the claims directly and never re-validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackOfficeIdentity {
    identity: ClaimsIdentity,
}

impl BackOfficeIdentity {
    /// Validate a claims identity and wrap it.
    ///
    /// Returns `None` when the identity is not authenticated, or when any required
    /// claim type is missing or carries a blank value.
    pub fn from_claims_identity(identity: &ClaimsIdentity) -> Option<Self> {
        if !identity.is_authenticated() {
            return None;
        }

        let complete = REQUIRED_BACK_OFFICE_CLAIM_TYPES.iter().all(|claim_type| {
            identity.has_claim(claim_type)
                && !identity.find_all(claim_type).any(|claim| claim.is_blank())
        });
        if !complete {
            return None;
        }

        Some(Self {
            identity: identity.clone(),
        })
    }

    pub fn claims(&self) -> &ClaimsIdentity {
        &self.identity
    }

    pub fn authentication_type(&self) -> &str {
        self.identity.authentication_type().unwrap_or_default()
    }

    pub fn id(&self) -> &str {
        self.required(claim_types::NAME_IDENTIFIER)
    }

    pub fn username(&self) -> &str {
        self.required(claim_types::NAME)
    }

    pub fn real_name(&self) -> &str {
        self.required(claim_types::GIVEN_NAME)
    }

    pub fn culture(&self) -> &str {
        self.required(claim_types::LOCALITY)
    }

    pub fn security_stamp(&self) -> &str {
        self.required(claim_types::SECURITY_STAMP)
    }

    pub fn start_content_nodes(&self) -> Vec<i64> {
        self.node_ids(claim_types::START_CONTENT_NODE_ID)
    }

    pub fn start_media_nodes(&self) -> Vec<i64> {
        self.node_ids(claim_types::START_MEDIA_NODE_ID)
    }

    pub fn roles(&self) -> Vec<&str> {
        self.values(claim_types::ROLE)
    }

    pub fn allowed_applications(&self) -> Vec<&str> {
        self.values(claim_types::ALLOWED_APPLICATIONS)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.identity
            .find_first(claim_types::SESSION_ID)
            .map(|c| c.value.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    fn required(&self, claim_type: &str) -> &str {
        self.identity
            .find_first(claim_type)
            .map(|c| c.value.as_str())
            .unwrap_or_default()
    }

    fn values(&self, claim_type: &str) -> Vec<&str> {
        self.identity
            .find_all(claim_type)
            .map(|c| c.value.as_str())
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    // Non-numeric ids are skipped; the claim itself already passed the blank check.
    fn node_ids(&self, claim_type: &str) -> Vec<i64> {
        self.identity
            .find_all(claim_type)
            .filter_map(|c| c.value.trim().parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ClaimsIdentity {
        ClaimsIdentity::new("Bearer")
            .with_claim(claim_types::NAME_IDENTIFIER, "1234")
            .with_claim(claim_types::NAME, "editor@example.com")
            .with_claim(claim_types::GIVEN_NAME, "Edith Editor")
            .with_claim(claim_types::START_CONTENT_NODE_ID, "-1")
            .with_claim(claim_types::START_CONTENT_NODE_ID, "1050")
            .with_claim(claim_types::START_MEDIA_NODE_ID, "-1")
            .with_claim(claim_types::LOCALITY, "en-US")
            .with_claim(claim_types::SECURITY_STAMP, "stamp-1")
            .with_claim(claim_types::ROLE, "editor")
            .with_claim(claim_types::ROLE, "writer")
            .with_claim(claim_types::ALLOWED_APPLICATIONS, "content")
    }

    #[test]
    fn exposes_typed_view_of_claims() {
        let identity = BackOfficeIdentity::from_claims_identity(&editor()).unwrap();

        assert_eq!(identity.id(), "1234");
        assert_eq!(identity.username(), "editor@example.com");
        assert_eq!(identity.real_name(), "Edith Editor");
        assert_eq!(identity.culture(), "en-US");
        assert_eq!(identity.security_stamp(), "stamp-1");
        assert_eq!(identity.start_content_nodes(), vec![-1, 1050]);
        assert_eq!(identity.start_media_nodes(), vec![-1]);
        assert_eq!(identity.roles(), vec!["editor", "writer"]);
        assert_eq!(identity.allowed_applications(), vec!["content"]);
        assert_eq!(identity.authentication_type(), "Bearer");
        assert!(identity.session_id().is_none());
    }

    #[test]
    fn collections_borrow_from_the_identity_only() {
        let identity = BackOfficeIdentity::from_claims_identity(&editor()).unwrap();

        let (roles, apps) = {
            let role_type = claim_types::ROLE.to_string();
            let found = identity.identity.find_all(&role_type).count();
            assert_eq!(found, 2);
            (identity.roles(), identity.allowed_applications())
        };

        assert_eq!(roles, vec!["editor", "writer"]);
        assert_eq!(apps, vec!["content"]);
    }

    #[test]
    fn rejects_when_any_claim_of_a_required_type_is_blank() {
        let identity = editor().with_claim(claim_types::START_CONTENT_NODE_ID, " ");
        assert!(BackOfficeIdentity::from_claims_identity(&identity).is_none());
    }

    #[test]
    fn empty_roles_are_allowed() {
        let identity = ClaimsIdentity::new("Bearer")
            .with_claim(claim_types::NAME_IDENTIFIER, "1")
            .with_claim(claim_types::NAME, "admin")
            .with_claim(claim_types::GIVEN_NAME, "Admin")
            .with_claim(claim_types::START_CONTENT_NODE_ID, "-1")
            .with_claim(claim_types::START_MEDIA_NODE_ID, "-1")
            .with_claim(claim_types::LOCALITY, "en-GB")
            .with_claim(claim_types::SECURITY_STAMP, "s");

        let identity = BackOfficeIdentity::from_claims_identity(&identity).unwrap();
        assert!(identity.roles().is_empty());
        assert!(identity.allowed_applications().is_empty());
    }
}
