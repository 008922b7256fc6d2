use arrayvec::ArrayVec;

use super::roster::Team;
use crate::config::BattleConfig;
use crate::error::{ErrorContext, InvariantError};

/// Active/reserve partition of a team, as member indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rotation {
    active: ArrayVec<usize, { BattleConfig::ROTATION_SIZE }>,
    reserve: ArrayVec<usize, { BattleConfig::MAX_MEMBERS }>,
}

impl Rotation {
    fn setup(members: usize) -> Self {
        let mut rotation = Self::default();
        for index in 0..members {
            if rotation.active.is_full() {
                rotation.reserve.push(index);
            } else {
                rotation.active.push(index);
            }
        }
        rotation
    }

    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn reserve(&self) -> &[usize] {
        &self.reserve
    }

    /// Front of active to the back of reserve, front of reserve to the back
    /// of active. No-op without a reserve.
    fn rotate(&mut self) -> bool {
        if self.reserve.is_empty() || self.active.is_empty() {
            return false;
        }
        let leaving = self.active.remove(0);
        self.reserve.push(leaving);
        let entering = self.reserve.remove(0);
        self.active.push(entering);
        true
    }

    fn check(&self, members: usize) -> Result<(), InvariantError> {
        let mut seen = [false; BattleConfig::MAX_MEMBERS];
        let covers = self.active.len() + self.reserve.len() == members
            && self.active.iter().chain(&self.reserve).all(|&i| {
                i < members && !core::mem::replace(&mut seen[i], true)
            });
        if covers {
            Ok(())
        } else {
            Err(InvariantError::RotationMismatch {
                active: self.active.len(),
                reserve: self.reserve.len(),
                members,
                context: ErrorContext::default(),
            })
        }
    }
}

impl Team {
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// First three members active, the rest in reserve.
    pub fn setup_rotation(&mut self) {
        self.rotation = Rotation::setup(self.members.len());
        self.assign_slots();
    }

    /// Rotates once. Returns whether the active line-up changed.
    ///
    /// A desynced rotation is reported before anything moves.
    pub fn rotate(&mut self) -> Result<bool, InvariantError> {
        self.validate_rotation()?;
        let rotated = self.rotation.rotate();
        self.assign_slots();
        Ok(rotated)
    }

    pub fn validate_rotation(&self) -> Result<(), InvariantError> {
        self.rotation.check(self.members.len())
    }

    fn assign_slots(&mut self) {
        for member in self.members.iter_mut() {
            member.rotation_slot = None;
        }
        let order: ArrayVec<usize, { BattleConfig::MAX_MEMBERS }> = self
            .rotation
            .active
            .iter()
            .chain(&self.rotation.reserve)
            .copied()
            .collect();
        for (slot, index) in order.into_iter().enumerate() {
            if let Some(member) = self.members.get_mut(index) {
                member.rotation_slot = Some(slot as u8 + 1);
            }
        }
    }
}
