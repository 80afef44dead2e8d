//! Session lifecycle.
//!
//! A bearer token moves through four states:
//!
//! - **Unissued**: nothing valid is held (never issued, logged out, or not
//!   a token this service signed).
//! - **Active**: signature valid, absolute expiry not reached, and the last
//!   protected access is within the inactivity timeout.
//! - **Expired**: the absolute lifetime (`exp`) has passed. Terminal.
//! - **Invalidated**: the token is within its lifetime but the activity
//!   marker is missing or older than the inactivity timeout. Terminal.
//!
//! The server never stores tokens. It keeps one activity marker per token id
//! (`jti`) so that the inactivity rule survives restarts when the activity
//! store is persistent.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::activity::ActivityStore;
use crate::clock::Clock;
use crate::error::AuthError;
use crate::jwt::{Claims, TokenSigner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Unissued,
    Active,
    Expired,
    Invalidated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Absolute token lifetime from issuance.
    pub token_lifetime: SignedDuration,
    /// Maximum gap between protected accesses.
    pub inactivity_timeout: SignedDuration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            token_lifetime: SignedDuration::from_hours(7 * 24),
            inactivity_timeout: SignedDuration::from_hours(24),
        }
    }
}

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub struct SessionManager {
    signer: TokenSigner,
    policy: SessionPolicy,
    clock: Arc<dyn Clock>,
    activity: Arc<dyn ActivityStore>,
}

impl SessionManager {
    pub fn new(
        signer: TokenSigner,
        policy: SessionPolicy,
        clock: Arc<dyn Clock>,
        activity: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            signer,
            policy,
            clock,
            activity,
        }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Unissued → Active. Called after a successful login or signup.
    pub async fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add(self.policy.token_lifetime)
            .map_err(|e| AuthError::Config(format!("token lifetime overflows: {e}")))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = self.signer.sign(&claims)?;
        self.activity.record_activity(&claims.jti, now).await?;

        info!(token_id = %claims.jti, exp = claims.exp, "session issued");
        Ok(IssuedToken { token, claims })
    }

    /// Validate a token for a protected access and refresh its activity
    /// marker. Returns the claims of an Active session.
    pub async fn authorize(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.signer.verify(token)?;
        let now = self.clock.now();

        match self.classify(&claims, now).await? {
            SessionState::Active => {
                // A logout that lands between the check and this write
                // removes the marker, and the refresh then refuses.
                if self.activity.refresh_activity(&claims.jti, now).await? {
                    Ok(claims)
                } else {
                    debug!(token_id = %claims.jti, "session ended during authorization");
                    Err(AuthError::SessionInactive)
                }
            }
            SessionState::Expired => {
                debug!(token_id = %claims.jti, "rejecting expired token");
                self.activity.forget(&claims.jti).await?;
                Err(AuthError::TokenExpired)
            }
            SessionState::Invalidated | SessionState::Unissued => {
                debug!(token_id = %claims.jti, "rejecting inactive session");
                self.activity.forget(&claims.jti).await?;
                Err(AuthError::SessionInactive)
            }
        }
    }

    /// Report the state of a token without touching its activity marker.
    pub async fn state_of(&self, token: &str) -> Result<SessionState, AuthError> {
        match self.signer.verify(token) {
            Ok(claims) => self.classify(&claims, self.clock.now()).await,
            Err(_) => Ok(SessionState::Unissued),
        }
    }

    /// Any → Unissued. Forgets the activity marker, so every authorization
    /// that starts after this returns fails even before `exp`. A request
    /// already past its activity refresh still completes.
    pub async fn end(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.signer.verify(token)?;
        self.activity.forget(&claims.jti).await?;
        info!(token_id = %claims.jti, "session ended");
        Ok(())
    }

    /// Drop activity markers that have been idle past the inactivity
    /// timeout. Such markers can never authorize again, so this reclaims
    /// tokens that were abandoned rather than logged out.
    pub async fn prune_idle(&self) -> Result<usize, AuthError> {
        let cutoff = self
            .clock
            .now()
            .checked_sub(self.policy.inactivity_timeout)
            .map_err(|e| AuthError::Config(format!("inactivity timeout underflows: {e}")))?;

        let removed = self.activity.prune_before(cutoff).await?;
        if removed > 0 {
            info!(removed, "pruned idle session markers");
        }
        Ok(removed)
    }

    async fn classify(&self, claims: &Claims, now: Timestamp) -> Result<SessionState, AuthError> {
        if now.as_second() >= claims.exp {
            return Ok(SessionState::Expired);
        }

        let state = match self.activity.last_active(&claims.jti).await? {
            Some(last_active)
                if now.duration_since(last_active) <= self.policy.inactivity_timeout =>
            {
                SessionState::Active
            }
            _ => SessionState::Invalidated,
        };
        Ok(state)
    }
}

/// Resource-scoped authorization: the token's subject must be the identity
/// named by the request.
pub fn ensure_owner(claims: &Claims, identity: &str) -> Result<(), AuthError> {
    if claims.sub == identity {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            requested: identity.to_string(),
        })
    }
}
