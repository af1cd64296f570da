//! Principal-level checks used by back office authorization.
//!
//! Missing or invalid identities are reported as `None`: the caller treats that as
//! "re-authenticate", never as a server error.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use thiserror::Error;

use super::BackOfficeIdentity;
use super::claims::{ClaimsIdentity, Principal, claim_types};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid timestamp format: {value:?} (expected ISO-8601 round-trip with offset)")]
    InvalidTimestampFormat { value: String },
}

/// Return the primary identity when it is an authenticated claims identity carrying
/// every required back office claim.
pub fn verify_back_office_identity(principal: &Principal) -> Option<BackOfficeIdentity> {
    let identity = primary_claims_identity(principal)?;
    BackOfficeIdentity::from_claims_identity(identity)
}

/// Find the back office identity for a principal.
///
/// Identities that were already validated (primary first, then any other attached
/// identity) are returned as-is. Only when none is attached are the primary identity's
/// claims validated.
pub fn resolve_back_office_identity(principal: &Principal) -> Option<Arc<BackOfficeIdentity>> {
    let claims_principal = principal.as_claims()?;

    if let Some(identity) = claims_principal
        .identity()
        .and_then(|identity| identity.as_back_office())
    {
        return Some(Arc::clone(identity));
    }

    if let Some(identity) = claims_principal
        .identities()
        .iter()
        .find_map(|identity| identity.as_back_office())
    {
        return Some(Arc::clone(identity));
    }

    verify_back_office_identity(principal).map(Arc::new)
}

/// Seconds left on the authentication ticket, negative once it has expired.
///
/// Returns `0.0` for a non-claims principal or when the ticket-expiry claim is absent
/// or blank. A present but malformed timestamp is an error.
pub fn remaining_auth_seconds(
    principal: &Principal,
    now: DateTime<Utc>,
) -> Result<f64, TimestampError> {
    let Some(claims_principal) = principal.as_claims() else {
        return Ok(0.0);
    };

    let Some(claim) = claims_principal
        .find_first(claim_types::TICKET_EXPIRES)
        .filter(|c| !c.is_blank())
    else {
        return Ok(0.0);
    };

    let expires = parse_ticket_expiry(&claim.value)?;
    let remaining = expires.with_timezone(&Utc) - now;

    Ok(remaining.num_milliseconds() as f64 / 1000.0)
}

/// Parse an ISO-8601 round-trip timestamp (`2024-05-01T10:00:00.0000000Z`,
/// `2024-05-01T12:00:00+02:00`). Timestamps without an offset are rejected.
pub fn parse_ticket_expiry(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| {
        TimestampError::InvalidTimestampFormat {
            value: value.to_string(),
        }
    })
}

pub fn format_ticket_expiry(expires: DateTime<Utc>) -> String {
    expires.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn primary_claims_identity(principal: &Principal) -> Option<&ClaimsIdentity> {
    principal
        .as_claims()?
        .identity()
        .map(|identity| identity.claims())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::services::security::PrincipalIdentity;

    #[test]
    fn parses_round_trip_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        for value in [
            "2024-05-01T10:00:00Z",
            "2024-05-01T10:00:00.0000000Z",
            "2024-05-01T12:00:00.000+02:00",
        ] {
            let parsed = parse_ticket_expiry(value).unwrap();
            assert_eq!(parsed.with_timezone(&Utc), expected, "{value}");
        }
    }

    #[test]
    fn rejects_non_round_trip_formats() {
        for value in ["05/01/2024 10:00:00", "2024-05-01T10:00:00", "tomorrow"] {
            assert_eq!(
                parse_ticket_expiry(value),
                Err(TimestampError::InvalidTimestampFormat {
                    value: value.to_string()
                })
            );
        }
    }

    #[test]
    fn formatted_expiry_parses_back() {
        let now = Utc::now();
        let parsed = parse_ticket_expiry(&format_ticket_expiry(now)).unwrap();
        let drift = (parsed.with_timezone(&Utc) - now).num_microseconds().unwrap();
        assert_eq!(drift, 0);
    }

    #[test]
    fn malformed_expiry_claim_is_an_error() {
        let principal = Principal::from(
            ClaimsIdentity::new("Bearer").with_claim(claim_types::TICKET_EXPIRES, "not-a-date"),
        );

        assert!(remaining_auth_seconds(&principal, Utc::now()).is_err());
    }

    #[test]
    fn expiry_claim_found_on_secondary_identity() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let mut principal = Principal::from(ClaimsIdentity::new("Cookies"));
        if let Some(claims) = principal.as_claims_mut() {
            claims.add_identity(PrincipalIdentity::Claims(
                ClaimsIdentity::new("Bearer").with_claim(
                    claim_types::TICKET_EXPIRES,
                    format_ticket_expiry(now + Duration::seconds(90)),
                ),
            ));
        }

        assert_eq!(remaining_auth_seconds(&principal, now), Ok(90.0));
    }
}
