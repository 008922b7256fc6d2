#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Position in the round state machine. Holds the phase about to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    RoundStart,
    TeamUpkeep,
    /// Turn of the member in this position of the round's turn order.
    MemberTurn(usize),
    EnemyPhase,
    Rotate,
    Ended(BattleOutcome),
}

impl Phase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    pub const fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            Self::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
