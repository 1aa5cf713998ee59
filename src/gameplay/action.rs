use super::seat::Chips;
use serde::{Deserialize, Serialize};

/// A betting action a seat may submit. `amount` on `Bet`/`Raise` is the
/// additional chips placed this action, not the seat's new total-to-bet
/// (spec §4.5: "parse `amount` as additional chips"). `AllIn` carries no
/// amount — the engine decides whether it resolves as a call, bet, raise,
/// or short-raise based on the seat's remaining stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "camelCase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    AllIn,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ActionKind::Fold => write!(f, "Fold"),
            ActionKind::Check => write!(f, "Check"),
            ActionKind::Call => write!(f, "Call"),
            ActionKind::Bet(amt) => write!(f, "Bet {amt}"),
            ActionKind::Raise(amt) => write!(f, "Raise {amt}"),
            ActionKind::AllIn => write!(f, "All-In"),
        }
    }
}
