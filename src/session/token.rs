use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::errors::AuthorizationError;
use crate::gameplay::PlayerId;

/// §4.9 action token: every `your-turn` notification embeds a freshly
/// minted opaque nonce with an issued-at timestamp (default TTL 35s). A
/// submitted action must carry the matching token; any mismatch or expired
/// token is rejected without touching room state. Tokens are single-use:
/// consumed on successful processing, cleared on timeout.
#[derive(Debug, Clone, Copy)]
struct Issued {
    token: Uuid,
    issued_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Mismatch,
    Expired,
}

impl From<TokenError> for AuthorizationError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Mismatch => AuthorizationError::TokenMismatch,
            TokenError::Expired => AuthorizationError::TokenExpired,
        }
    }
}

/// Per-room registry of outstanding action tokens, one per seated player.
#[derive(Debug)]
pub struct TokenRegistry {
    ttl: Duration,
    issued: HashMap<PlayerId, Issued>,
}

impl TokenRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: HashMap::new(),
        }
    }

    /// Mints a fresh token for `player_id`, replacing any still-outstanding
    /// one (a seat only ever has one live token — the most recent `your-turn`
    /// supersedes whatever came before it).
    pub fn issue(&mut self, player_id: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.issued.insert(
            player_id.to_string(),
            Issued {
                token,
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// Validates and consumes a token in one step. Does not mutate the
    /// registry on failure, matching §7's "rejections don't mutate room
    /// state" policy at the token layer too.
    pub fn consume(&mut self, player_id: &str, presented: Uuid) -> Result<(), TokenError> {
        let issued = *self.issued.get(player_id).ok_or(TokenError::Mismatch)?;
        if issued.token != presented {
            return Err(TokenError::Mismatch);
        }
        if issued.issued_at.elapsed() > self.ttl {
            self.issued.remove(player_id);
            return Err(TokenError::Expired);
        }
        self.issued.remove(player_id);
        Ok(())
    }

    /// Drops a player's outstanding token without validating it — used when
    /// a timer fires (§4.9 "cleared on timeout") or a seat leaves.
    pub fn clear(&mut self, player_id: &str) {
        self.issued.remove(player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_consumed_successfully() {
        let mut reg = TokenRegistry::new(Duration::from_secs(35));
        let token = reg.issue("p1");
        assert!(reg.consume("p1", token).is_ok());
    }

    #[test]
    fn token_is_single_use() {
        let mut reg = TokenRegistry::new(Duration::from_secs(35));
        let token = reg.issue("p1");
        reg.consume("p1", token).unwrap();
        assert_eq!(reg.consume("p1", token), Err(TokenError::Mismatch));
    }

    #[test]
    fn mismatched_token_is_rejected() {
        let mut reg = TokenRegistry::new(Duration::from_secs(35));
        reg.issue("p1");
        assert_eq!(reg.consume("p1", Uuid::new_v4()), Err(TokenError::Mismatch));
    }

    #[test]
    fn expired_token_is_rejected_and_cleared() {
        let mut reg = TokenRegistry::new(Duration::from_millis(0));
        let token = reg.issue("p1");
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(reg.consume("p1", token), Err(TokenError::Expired));
        assert_eq!(reg.consume("p1", token), Err(TokenError::Mismatch));
    }

    #[test]
    fn reissuing_supersedes_the_previous_token() {
        let mut reg = TokenRegistry::new(Duration::from_secs(35));
        let first = reg.issue("p1");
        let second = reg.issue("p1");
        assert_eq!(reg.consume("p1", first), Err(TokenError::Mismatch));
        assert!(reg.consume("p1", second).is_ok());
    }
}
