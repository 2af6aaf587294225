use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Access token claims.
///
/// Standard RFC 7519 time claims plus the subject's role. Every field is
/// required: a token missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role of the subject at issuance time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims valid from `now` for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `role` - Role granted by the token
    /// * `now` - Issuance instant
    /// * `ttl` - Validity window
    pub fn issue(subject: impl ToString, role: Role, now: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = now.timestamp();
        Self {
            sub: subject.to_string(),
            role,
            iat: issued_at,
            nbf: issued_at,
            exp: (now + ttl).timestamp(),
        }
    }

    /// A token is expired at and after its `exp` instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// A token is premature strictly before its `nbf` instant.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.nbf
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issue_sets_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = Claims::issue("user123", Role::Admin, now, Duration::minutes(15));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.nbf, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.expires_at(), Some(now + Duration::minutes(15)));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "user123".to_string(),
            role: Role::User,
            iat: 900,
            nbf: 900,
            exp: 1000,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_is_premature() {
        let claims = Claims {
            sub: "user123".to_string(),
            role: Role::User,
            iat: 900,
            nbf: 950,
            exp: 1000,
        };

        assert!(claims.is_premature(949));
        assert!(!claims.is_premature(950));
    }

    #[test]
    fn test_role_serialized_uppercase() {
        let claims = Claims {
            sub: "u".to_string(),
            role: Role::Admin,
            iat: 1,
            nbf: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "ADMIN");
    }
}
