use crate::kit::Kit;
use crate::state::{Attribute, Categories, LinkSkills, StatusEffects, StatusKind};
use crate::stats::{Buffs, Meter, derive_stats, scale_pct};

/// Battle-long counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub super_attacks_performed: u32,
    pub attacks_received: u32,
    pub turns_elapsed: u32,
    /// Strikes made in the current turn; reset at turn start.
    pub attacks_this_turn: u8,
}

/// A single fighter on either side.
///
/// `attack` and `defense` are derived from base stats and [`Buffs`] and
/// only change through [`Combatant::recompute_derived`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub name: String,
    pub attribute: Attribute,
    pub max_hp: u64,
    pub hp: u64,
    pub base_attack: u64,
    pub base_defense: u64,
    attack: u64,
    defense: u64,
    pub energy: Meter,
    pub categories: Categories,
    pub links: LinkSkills,
    pub status: StatusEffects,
    pub buffs: Buffs,
    pub kit: Kit,
    pub base_evasion_pct: u32,
    pub base_reduction_pct: u32,
    pub max_attacks_per_turn: u8,
    /// 1-based rotation position; active members come first.
    pub rotation_slot: Option<u8>,
    pub is_leader: bool,
    /// Boosted variants unlock ultra super attacks at 18 energy.
    pub is_boosted_variant: bool,
    pub counters: Counters,
    pub active_skill_used: bool,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        attribute: Attribute,
        hp: u64,
        attack: u64,
        defense: u64,
    ) -> Self {
        Self {
            name: name.into(),
            attribute,
            max_hp: hp,
            hp,
            base_attack: attack,
            base_defense: defense,
            attack,
            defense,
            energy: Meter::empty(),
            categories: Categories::empty(),
            links: LinkSkills::empty(),
            status: StatusEffects::empty(),
            buffs: Buffs::default(),
            kit: Kit::plain(),
            base_evasion_pct: 0,
            base_reduction_pct: 0,
            max_attacks_per_turn: 1,
            rotation_slot: None,
            is_leader: false,
            is_boosted_variant: false,
            counters: Counters::default(),
            active_skill_used: false,
        }
    }

    pub fn with_categories(mut self, categories: Categories) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_links(mut self, links: LinkSkills) -> Self {
        self.links = links;
        self
    }

    pub fn with_kit(mut self, kit: Kit) -> Self {
        self.kit = kit;
        self
    }

    pub fn with_damage_reduction(mut self, pct: u32) -> Self {
        self.base_reduction_pct = pct.min(100);
        self
    }

    pub fn with_evasion(mut self, pct: u32) -> Self {
        self.base_evasion_pct = pct.min(100);
        self
    }

    pub fn with_max_attacks(mut self, attacks: u8) -> Self {
        self.max_attacks_per_turn = attacks.max(1);
        self
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy.set(energy);
        self
    }

    pub fn leader(mut self) -> Self {
        self.is_leader = true;
        self
    }

    pub fn boosted(mut self) -> Self {
        self.is_boosted_variant = true;
        self
    }

    pub fn attack(&self) -> u64 {
        self.attack
    }

    pub fn defense(&self) -> u64 {
        self.defense
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_pct(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (u128::from(self.hp) * 100 / u128::from(self.max_hp)) as u32
    }

    pub fn recompute_derived(&mut self) {
        let derived = derive_stats(self.base_attack, self.base_defense, &self.buffs);
        self.attack = derived.attack;
        self.defense = derived.defense;
    }

    /// Turn-start bookkeeping: clears turn-scoped buffs and advances counters.
    pub fn reset_turn(&mut self) {
        self.buffs.reset_turn();
        self.counters.turns_elapsed += 1;
        self.counters.attacks_this_turn = 0;
        self.recompute_derived();
    }

    /// Personal damage reduction, clamped to 100.
    pub fn reduction_pct(&self) -> u32 {
        (self.base_reduction_pct + self.buffs.reduction_pct).min(100)
    }

    /// Evasion chance: base + link + passive dodge + evasion status.
    pub fn evasion_pct(&self) -> u32 {
        let status = self
            .status
            .magnitude(StatusKind::EvasionBoost)
            .map_or(0, |m| m.min(100) as u32);
        (self.base_evasion_pct + self.buffs.link_evasion_pct + self.buffs.dodge_pct + status)
            .min(100)
    }

    /// Personal mitigation: damage reduction, then the damage-cap clamp.
    pub fn mitigate(&self, raw: u64) -> u64 {
        let reduced = u128::from(raw) * u128::from(100 - self.reduction_pct()) / 100;
        let damage = u64::try_from(reduced).unwrap_or(u64::MAX);
        match self.status.magnitude(StatusKind::DamageCap) {
            Some(cap) => damage.min(cap),
            None => damage,
        }
    }

    /// Individual HP path: mitigate, then subtract floored at zero.
    ///
    /// Registers the hit and returns the HP actually lost.
    pub fn take_damage(&mut self, raw: u64) -> u64 {
        let lost = self.mitigate(raw).min(self.hp);
        self.hp -= lost;
        self.register_hit();
        lost
    }

    /// Counts a received hit and applies the kit's reactive ATK raise.
    pub fn register_hit(&mut self) {
        self.counters.attacks_received += 1;
        let reactive = self.kit.reactive;
        if reactive.atk_raise_pct_per_hit > 0 && self.counters.attacks_received <= reactive.hit_cap
        {
            self.buffs.flat_atk += scale_pct(
                self.base_attack,
                u64::from(reactive.atk_raise_pct_per_hit),
            );
        }
        self.recompute_derived();
    }

    /// Counts a charged attack and applies the kit's per-super ATK raise.
    pub fn register_super(&mut self) {
        self.counters.super_attacks_performed += 1;
        let raise = self.kit.reactive.atk_raise_pct_per_super;
        if raise > 0 {
            self.buffs.flat_atk += scale_pct(self.base_attack, u64::from(raise));
        }
        self.recompute_derived();
    }

    /// Scales HP and base stats by `pct` percent. Resets current HP to max.
    pub fn scale_base(&mut self, pct: u64) {
        self.max_hp = scale_pct(self.max_hp, pct);
        self.base_attack = scale_pct(self.base_attack, pct);
        self.base_defense = scale_pct(self.base_defense, pct);
        self.hp = self.max_hp;
        self.recompute_derived();
    }
}
