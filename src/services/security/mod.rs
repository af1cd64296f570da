pub mod back_office_identity;
pub mod claims;
pub mod principal;

pub use back_office_identity::BackOfficeIdentity;
pub use claims::{
    Claim, ClaimsIdentity, ClaimsPrincipal, GenericIdentity, Principal, PrincipalIdentity,
    REQUIRED_BACK_OFFICE_CLAIM_TYPES, claim_types,
};
pub use principal::{
    TimestampError, format_ticket_expiry, parse_ticket_expiry, remaining_auth_seconds,
    resolve_back_office_identity, verify_back_office_identity,
};
