//! Status effect registry for combatants.
//!
//! Each kind is present at most once. Installing an already-present kind
//! keeps the stronger magnitude and the longer duration. Timed effects tick
//! down once at the start of their owner's turn and are removed on reaching
//! zero; instant effects stay until consumed.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Skips the owner's next action. Consumed when checked.
    Stun,
    /// Clamps every incoming hit to `magnitude`.
    DamageCap,
    /// Blocks stun installation.
    Immunity,
    /// Adds `magnitude` percent to evasion.
    EvasionBoost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Lasts until consumed.
    Instant,
    /// Remaining owner turns.
    Turns(u8),
}

impl EffectDuration {
    fn longer(self, other: Self) -> Self {
        match (self, other) {
            (Self::Turns(a), Self::Turns(b)) => Self::Turns(a.max(b)),
            (_, other) => other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub magnitude: u64,
    pub duration: EffectDuration,
}

impl StatusEffect {
    pub const fn stun() -> Self {
        Self {
            kind: StatusKind::Stun,
            magnitude: 0,
            duration: EffectDuration::Instant,
        }
    }

    pub const fn timed(kind: StatusKind, magnitude: u64, turns: u8) -> Self {
        Self {
            kind,
            magnitude,
            duration: EffectDuration::Turns(turns),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn magnitude(&self, kind: StatusKind) -> Option<u64> {
        self.get(kind).map(|e| e.magnitude)
    }

    /// Installs `effect`, merging with an existing effect of the same kind.
    ///
    /// Returns false when the registry is full and the kind is new.
    pub fn install(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            existing.duration = existing.duration.longer(effect.duration);
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    /// Removes `kind`, reporting whether it was present.
    pub fn consume(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Decrements timed effects and drops those that reach zero.
    pub fn tick(&mut self) -> ArrayVec<StatusKind, { BattleConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        for effect in self.effects.iter_mut() {
            if let EffectDuration::Turns(turns) = &mut effect.duration {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(effect.kind);
                }
            }
        }
        self.effects
            .retain(|e| !matches!(e.duration, EffectDuration::Turns(0)));
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinstall_keeps_max_magnitude_and_duration() {
        let mut status = StatusEffects::empty();
        status.install(StatusEffect::timed(StatusKind::DamageCap, 5_000, 3));
        status.install(StatusEffect::timed(StatusKind::DamageCap, 2_000, 5));

        let cap = status.get(StatusKind::DamageCap).unwrap();
        assert_eq!(cap.magnitude, 5_000);
        assert_eq!(cap.duration, EffectDuration::Turns(5));
        assert_eq!(status.iter().count(), 1);
    }

    #[test]
    fn tick_expires_at_zero_and_leaves_instants() {
        let mut status = StatusEffects::empty();
        status.install(StatusEffect::stun());
        status.install(StatusEffect::timed(StatusKind::EvasionBoost, 20, 1));
        status.install(StatusEffect::timed(StatusKind::Immunity, 0, 2));

        let expired = status.tick();
        assert_eq!(expired.as_slice(), &[StatusKind::EvasionBoost]);
        assert!(status.has(StatusKind::Stun));
        assert!(status.has(StatusKind::Immunity));

        let expired = status.tick();
        assert_eq!(expired.as_slice(), &[StatusKind::Immunity]);
        assert!(status.has(StatusKind::Stun));
    }

    #[test]
    fn consume_removes_once() {
        let mut status = StatusEffects::empty();
        status.install(StatusEffect::stun());
        assert!(status.consume(StatusKind::Stun));
        assert!(!status.consume(StatusKind::Stun));
        assert!(status.is_empty());
    }
}
