//! Roster loader.
//!
//! Loads both sides of a battle from a RON file. Attributes, categories, link
//! skills and kits are written as names and resolved here.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use battle_core::state::{parse_categories, parse_links};
use battle_core::{Attribute, Combatant, DamageModel, Team};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::presets::KitId;

fn one() -> u8 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    /// `STR`, `AGL`, `TEQ`, `INT`, `PHY` or `RAINBOW`.
    pub attribute: String,
    pub hp: u64,
    pub attack: u64,
    pub defense: u64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    /// Preset kit name, see [`KitId`].
    #[serde(default)]
    pub kit: Option<String>,
    #[serde(default)]
    pub leader: bool,
    #[serde(default)]
    pub damage_reduction: u32,
    #[serde(default)]
    pub evasion: u32,
    #[serde(default = "one")]
    pub max_attacks: u8,
}

impl MemberSpec {
    pub fn build(&self) -> LoadResult<Combatant> {
        let attribute = Attribute::from_str(&self.attribute)?;
        let categories = parse_categories(self.categories.iter().map(String::as_str))?;
        let links = parse_links(self.links.iter().map(String::as_str))?;
        let kit = match &self.kit {
            Some(name) => KitId::from_str(name)
                .map_err(|_| anyhow::anyhow!("unknown kit `{}`", name))?,
            None => KitId::Plain,
        };

        let mut member = Combatant::new(
            self.name.clone(),
            attribute,
            self.hp,
            self.attack,
            self.defense,
        )
        .with_categories(categories)
        .with_links(links)
        .with_kit(kit.kit())
        .with_damage_reduction(self.damage_reduction)
        .with_evasion(self.evasion)
        .with_max_attacks(self.max_attacks);
        if kit.boosted() {
            member = member.boosted();
        }
        if self.leader {
            member = member.leader();
        }
        Ok(member)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub model: DamageModel,
    pub members: Vec<MemberSpec>,
}

impl TeamSpec {
    pub fn build(&self) -> LoadResult<Team> {
        let mut team = Team::new(self.model);
        for spec in &self.members {
            let member = spec
                .build()
                .with_context(|| format!("Failed to build member '{}'", spec.name))?;
            team.add_member(member)?;
        }
        Ok(team)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub player: TeamSpec,
    pub enemy: TeamSpec,
}

/// Both sides, ready to be moved into an engine.
#[derive(Clone, Debug)]
pub struct Roster {
    pub player: Team,
    pub enemy: Team,
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: [`RosterSpec`]
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        let player = spec.player.build().context("player team")?;
        let enemy = spec.enemy.build().context("enemy team")?;
        tracing::debug!(player = player.len(), enemy = enemy.len(), "roster loaded");
        Ok(Roster { player, enemy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Categories, LinkSkills};

    const ROSTER: &str = r#"
RosterSpec(
    player: TeamSpec(
        model: Pooled,
        members: [
            MemberSpec(
                name: "Dawn",
                attribute: "int",
                hp: 23000,
                attack: 25000,
                defense: 15000,
                categories: ["Worldwide Chaos", "POTARA"],
                links: ["Big Bad Bosses", "fused-fighter"],
                kit: Some("dawn_of_an_ideal_world"),
                leader: true,
            ),
        ],
    ),
    enemy: TeamSpec(
        model: PerMember,
        members: [
            MemberSpec(
                name: "Boss",
                attribute: "STR",
                hp: 1000000,
                attack: 1000,
                defense: 1000,
                damage_reduction: 66,
                max_attacks: 3,
            ),
        ],
    ),
)
"#;

    #[test]
    fn parses_names_into_typed_members() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        let dawn = roster.player.member(0).unwrap();
        assert_eq!(dawn.attribute, Attribute::Int);
        assert_eq!(dawn.categories, Categories::WORLDWIDE_CHAOS | Categories::POTARA);
        assert_eq!(dawn.links, LinkSkills::BIG_BAD_BOSSES | LinkSkills::FUSED_FIGHTER);
        assert!(dawn.is_leader);
        assert!(dawn.is_boosted_variant);
        assert!(dawn.kit.leader.is_some());

        let boss = roster.enemy.member(0).unwrap();
        assert_eq!(roster.enemy.model(), DamageModel::PerMember);
        assert_eq!(boss.max_attacks_per_turn, 3);
        assert_eq!(boss.base_reduction_pct, 66);
    }

    #[test]
    fn unknown_attribute_fails_loudly() {
        let err = RosterLoader::parse(&ROSTER.replace("\"int\"", "\"purple\"")).unwrap_err();
        assert!(format!("{err:#}").contains("purple"));
    }

    #[test]
    fn unknown_category_fails_loudly() {
        let err = RosterLoader::parse(&ROSTER.replace("POTARA", "BOGUS")).unwrap_err();
        assert!(format!("{err:#}").contains("BOGUS"));
    }

    #[test]
    fn unknown_kit_fails_loudly() {
        let err =
            RosterLoader::parse(&ROSTER.replace("dawn_of_an_ideal_world", "dusk")).unwrap_err();
        assert!(format!("{err:#}").contains("dusk"));
    }
}
