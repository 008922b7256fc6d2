//! Category and link-skill tag sets.

use crate::error::ParseCategoryError;

bitflags::bitflags! {
    /// Category tags used for leader-skill matching and passive conditions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct Categories: u16 {
        const WORLDWIDE_CHAOS = 1 << 0;
        const POTARA = 1 << 1;
        const REALM_OF_GODS = 1 << 2;
        const FUSED_FIGHTERS = 1 << 3;
        const TIME_TRAVELERS = 1 << 4;
        const FINAL_TRUMP_CARD = 1 << 5;
        const FUTURE_SAGA = 1 << 6;
    }
}

bitflags::bitflags! {
    /// Link-skill tags. Two teammates sharing a tag activate its effect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct LinkSkills: u16 {
        const FIERCE_BATTLE = 1 << 0;
        const PREPARED_FOR_BATTLE = 1 << 1;
        const GODLY_POWER = 1 << 2;
        const BIG_BAD_BOSSES = 1 << 3;
        const FUSED_FIGHTER = 1 << 4;
        const NIGHTMARE = 1 << 5;
        const DISMAL_FUTURE = 1 << 6;
        const SHOCKING_SPEED = 1 << 7;
    }
}

/// Effect granted by one active link skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEffect {
    Energy(u32),
    AtkPercent(u32),
    EvasionPercent(u32),
}

const LINK_TABLE: [(LinkSkills, LinkEffect); 8] = [
    (LinkSkills::FIERCE_BATTLE, LinkEffect::AtkPercent(20)),
    (LinkSkills::PREPARED_FOR_BATTLE, LinkEffect::Energy(2)),
    (LinkSkills::GODLY_POWER, LinkEffect::AtkPercent(15)),
    (LinkSkills::BIG_BAD_BOSSES, LinkEffect::AtkPercent(25)),
    (LinkSkills::FUSED_FIGHTER, LinkEffect::Energy(2)),
    (LinkSkills::NIGHTMARE, LinkEffect::AtkPercent(10)),
    (LinkSkills::DISMAL_FUTURE, LinkEffect::Energy(1)),
    (LinkSkills::SHOCKING_SPEED, LinkEffect::EvasionPercent(10)),
];

impl LinkSkills {
    /// Effects of every link contained in this set, in table order.
    pub fn effects(self) -> impl Iterator<Item = LinkEffect> {
        LINK_TABLE
            .iter()
            .filter(move |(link, _)| self.contains(*link))
            .map(|(_, effect)| *effect)
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Parses category names such as `"Worldwide Chaos"` or `"REALM_OF_GODS"`.
pub fn parse_categories<'a, I>(names: I) -> Result<Categories, ParseCategoryError>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().try_fold(Categories::empty(), |acc, name| {
        Categories::from_name(&normalize(name))
            .map(|flag| acc | flag)
            .ok_or_else(|| ParseCategoryError::Category(name.to_string()))
    })
}

/// Parses link-skill names such as `"Fierce Battle"`.
pub fn parse_links<'a, I>(names: I) -> Result<LinkSkills, ParseCategoryError>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().try_fold(LinkSkills::empty(), |acc, name| {
        LinkSkills::from_name(&normalize(name))
            .map(|flag| acc | flag)
            .ok_or_else(|| ParseCategoryError::LinkSkill(name.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_link_has_exactly_one_effect() {
        for link in LinkSkills::all().iter() {
            assert_eq!(link.effects().count(), 1, "{link:?}");
        }
    }

    #[test]
    fn combined_links_yield_all_effects() {
        let links = LinkSkills::FIERCE_BATTLE | LinkSkills::DISMAL_FUTURE;
        let effects: Vec<_> = links.effects().collect();
        assert_eq!(
            effects,
            vec![LinkEffect::AtkPercent(20), LinkEffect::Energy(1)]
        );
    }

    #[test]
    fn parses_display_style_names() {
        let cats = parse_categories(["Worldwide Chaos", "realm-of-gods"]).unwrap();
        assert_eq!(cats, Categories::WORLDWIDE_CHAOS | Categories::REALM_OF_GODS);

        let links = parse_links(["Big Bad Bosses", "SHOCKING_SPEED"]).unwrap();
        assert_eq!(links, LinkSkills::BIG_BAD_BOSSES | LinkSkills::SHOCKING_SPEED);
    }

    #[test]
    fn unknown_names_fail_loudly() {
        assert_eq!(
            parse_categories(["Potara", "Saiyans"]),
            Err(ParseCategoryError::Category("Saiyans".into()))
        );
        assert!(matches!(
            parse_links(["Kamehameha"]),
            Err(ParseCategoryError::LinkSkill(_))
        ));
    }
}
