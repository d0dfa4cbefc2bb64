use chrono::{DateTime, Duration, Utc};

use super::AuthError;

/// Extract the token from an `Authorization` header value.
///
/// The header must start with `Bearer`; the token is the second
/// space-separated segment.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;
    if !header.starts_with("Bearer") {
        return Err(AuthError::MissingCredential);
    }
    match header.split(' ').nth(1) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingToken),
    }
}

/// Calculate token expiry (unix seconds) from issue time and TTL.
pub fn calculate_expiry(issued_at: DateTime<Utc>, ttl: Duration) -> i64 {
    issued_at
        .checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
        .timestamp()
}

/// Check if a unix-seconds expiry has passed.
pub fn is_expired(exp: i64, now: DateTime<Utc>) -> bool {
    exp < now.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bearer_extracts_token() {
        assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn parse_bearer_missing_header() {
        assert_eq!(parse_bearer(None), Err(AuthError::MissingCredential));
    }

    #[test]
    fn parse_bearer_wrong_scheme() {
        assert_eq!(
            parse_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::MissingCredential)
        );
        assert_eq!(parse_bearer(Some("")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn parse_bearer_without_token_segment() {
        assert_eq!(parse_bearer(Some("Bearer")), Err(AuthError::MissingToken));
        assert_eq!(parse_bearer(Some("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(parse_bearer(Some("Bearertoken")), Err(AuthError::MissingToken));
    }

    #[test]
    fn expiry_is_issue_time_plus_ttl() {
        let now = Utc::now();
        let exp = calculate_expiry(now, Duration::seconds(60));
        assert_eq!(exp, now.timestamp() + 60);
        assert!(!is_expired(exp, now));
        assert!(is_expired(exp, now + Duration::seconds(61)));
    }

    #[test]
    fn expiry_saturates_on_overflow() {
        let now = Utc::now();
        let exp = calculate_expiry(now, Duration::MAX);
        assert_eq!(exp, DateTime::<Utc>::MAX_UTC.timestamp());
    }
}
