use crate::state::Combatant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveRequirement {
    /// At least this many charged attacks performed.
    SuperAttacks(u32),
    /// The side's HP ratio is at most this percent.
    SideHpAtMost(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveEffect {
    /// Raise ATK for the strike, hit with `multiplier`, always stun.
    Strike { atk_pct: u32, multiplier: u32 },
    /// Install the team-wide domain for `rounds` rounds.
    Domain { rounds: u8 },
}

/// Once-per-battle active skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveSkill {
    pub name: &'static str,
    /// First member turn (1-based) on which the skill may be used.
    pub min_turn: u32,
    pub requirement: ActiveRequirement,
    pub effect: ActiveEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillUnavailable {
    #[error("no active skill")]
    Missing,
    #[error("active skill already used this battle")]
    AlreadyUsed,
    #[error("available from turn {min}, currently turn {turn}")]
    TooEarly { turn: u32, min: u32 },
    #[error("requires {need} super attacks, performed {have}")]
    NotEnoughSupers { have: u32, need: u32 },
    #[error("requires side HP at most {max}%, currently {hp_pct}%")]
    HpTooHigh { hp_pct: u32, max: u32 },
}

/// Checks whether `combatant` may use its active skill right now.
pub fn check_active(
    combatant: &Combatant,
    side_hp_pct: u32,
) -> Result<&ActiveSkill, SkillUnavailable> {
    let skill = combatant
        .kit
        .active
        .as_ref()
        .ok_or(SkillUnavailable::Missing)?;
    if combatant.active_skill_used {
        return Err(SkillUnavailable::AlreadyUsed);
    }
    let turn = combatant.counters.turns_elapsed;
    if turn < skill.min_turn {
        return Err(SkillUnavailable::TooEarly {
            turn,
            min: skill.min_turn,
        });
    }
    match skill.requirement {
        ActiveRequirement::SuperAttacks(need) => {
            let have = combatant.counters.super_attacks_performed;
            if have < need {
                return Err(SkillUnavailable::NotEnoughSupers { have, need });
            }
        }
        ActiveRequirement::SideHpAtMost(max) => {
            if side_hp_pct > max {
                return Err(SkillUnavailable::HpTooHigh { hp_pct: side_hp_pct, max });
            }
        }
    }
    Ok(skill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::Kit;
    use crate::state::Attribute;

    fn striker() -> Combatant {
        let kit = Kit {
            active: Some(ActiveSkill {
                name: "test strike",
                min_turn: 4,
                requirement: ActiveRequirement::SuperAttacks(5),
                effect: ActiveEffect::Strike {
                    atk_pct: 300,
                    multiplier: 6,
                },
            }),
            ..Kit::plain()
        };
        Combatant::new("striker", Attribute::Int, 1_000, 1_000, 1_000).with_kit(kit)
    }

    #[test]
    fn gated_by_turn_then_requirement_then_single_use() {
        let mut c = striker();
        c.counters.turns_elapsed = 3;
        c.counters.super_attacks_performed = 9;
        assert_eq!(
            check_active(&c, 100),
            Err(SkillUnavailable::TooEarly { turn: 3, min: 4 })
        );

        c.counters.turns_elapsed = 4;
        c.counters.super_attacks_performed = 4;
        assert_eq!(
            check_active(&c, 100),
            Err(SkillUnavailable::NotEnoughSupers { have: 4, need: 5 })
        );

        c.counters.super_attacks_performed = 5;
        assert!(check_active(&c, 100).is_ok());

        c.active_skill_used = true;
        assert_eq!(check_active(&c, 100), Err(SkillUnavailable::AlreadyUsed));
    }

    #[test]
    fn hp_requirement_uses_side_ratio() {
        let mut c = striker();
        if let Some(skill) = c.kit.active.as_mut() {
            skill.requirement = ActiveRequirement::SideHpAtMost(30);
        }
        c.counters.turns_elapsed = 4;
        assert!(matches!(
            check_active(&c, 31),
            Err(SkillUnavailable::HpTooHigh { .. })
        ));
        assert!(check_active(&c, 30).is_ok());
    }

    #[test]
    fn plain_kit_has_no_skill() {
        let c = Combatant::new("plain", Attribute::Str, 1, 1, 1);
        assert_eq!(check_active(&c, 0), Err(SkillUnavailable::Missing));
    }
}
