use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::role::Role;

/// Signed, time-bounded bearer token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub subject: String,
    pub role: Role,
}

/// Issues and verifies access tokens.
///
/// Stateless: validity depends only on the signature and the time claims,
/// so a token stays usable for its whole window. The secret is fixed at
/// construction and shared read-only across requests.
pub struct TokenService {
    handler: JwtHandler,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service backed by the system clock.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret (at least 32 bytes)
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
            ttl,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for issuing and verifying.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `subject` carrying `role`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, role: Role) -> Result<AccessToken, JwtError> {
        let now = self.clock.now();
        let claims = Claims::issue(subject, role, now, self.ttl);
        let token = self.handler.encode(&claims)?;

        Ok(AccessToken {
            token,
            expires_at: now + self.ttl,
        })
    }

    /// Verify signature and time claims of `token`.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was signed with another secret
    /// * `Malformed` - Token structure or claims are unreadable
    /// * `Expired` - Current time is at or after `exp`
    /// * `NotYetValid` - Current time is before `nbf`
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;
        let now = self.clock.now().timestamp();

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }
        if claims.is_premature(now) {
            return Err(JwtError::NotYetValid);
        }

        Ok(VerifiedClaims {
            subject: claims.sub,
            role: claims.role,
        })
    }
}
