//! Testing utilities for statblock rules.
//!
//! This module provides fixtures for tests and examples:
//! - Sample creatures with known derived numbers
//! - `EncounterHarness` for scripted balance scenarios

use crate::abilities::{Ability, AbilityScores, ProficiencyLevel, Skill};
use crate::challenge::ChallengeRating;
use crate::creature::Creature;
use crate::encounter::{DifficultyTier, EncounterAssessment, EncounterRoster, PlayerCharacter};

/// CR 1/4 goblin: Stealth expertise, no saves.
pub fn create_sample_goblin(name: &str) -> Creature {
    Creature::new(name, ChallengeRating::Quarter)
        .with_scores(AbilityScores::new(8, 14, 10, 10, 8, 8))
        .with_skill(Skill::Stealth, ProficiencyLevel::Expertise)
}

/// CR 2 ogre: no proficiencies at all.
pub fn create_sample_ogre(name: &str) -> Creature {
    Creature::new(name, ChallengeRating::Cr2).with_scores(AbilityScores::new(19, 8, 16, 5, 7, 7))
}

/// CR 6 mage casting with Intelligence.
pub fn create_sample_mage(name: &str) -> Creature {
    Creature::new(name, ChallengeRating::Cr6)
        .with_scores(AbilityScores::new(9, 14, 11, 17, 12, 11))
        .with_save(Ability::Intelligence, ProficiencyLevel::Proficient)
        .with_save(Ability::Wisdom, ProficiencyLevel::Proficient)
        .with_skill(Skill::Arcana, ProficiencyLevel::Proficient)
        .with_skill(Skill::History, ProficiencyLevel::Proficient)
        .with_spellcasting(Ability::Intelligence)
}

/// CR 17 adult red dragon.
pub fn create_sample_dragon(name: &str) -> Creature {
    Creature::new(name, ChallengeRating::Cr17)
        .with_scores(AbilityScores::new(27, 10, 25, 16, 13, 21))
        .with_save(Ability::Dexterity, ProficiencyLevel::Proficient)
        .with_save(Ability::Constitution, ProficiencyLevel::Proficient)
        .with_save(Ability::Wisdom, ProficiencyLevel::Proficient)
        .with_save(Ability::Charisma, ProficiencyLevel::Proficient)
        .with_skill(Skill::Perception, ProficiencyLevel::Expertise)
        .with_skill(Skill::Stealth, ProficiencyLevel::Proficient)
        .with_initiative(ProficiencyLevel::Expertise)
}

/// One player per level, named "Player 1", "Player 2", ...
pub fn create_party(levels: &[u8]) -> Vec<PlayerCharacter> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| PlayerCharacter::new(format!("Player {}", i + 1), level))
        .collect()
}

/// Harness for encounter balance scenarios.
#[derive(Debug, Default)]
pub struct EncounterHarness {
    pub roster: EncounterRoster<Creature>,
}

impl EncounterHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creature(&mut self, creature: Creature) -> &mut Self {
        self.roster.creatures.push(creature);
        self
    }

    /// Add `count` copies of a creature.
    pub fn creatures(&mut self, creature: Creature, count: usize) -> &mut Self {
        self.roster
            .creatures
            .extend(std::iter::repeat(creature).take(count));
        self
    }

    pub fn player(&mut self, level: u8) -> &mut Self {
        let name = format!("Player {}", self.roster.players.len() + 1);
        self.roster.players.push(PlayerCharacter::new(name, level));
        self
    }

    pub fn party(&mut self, levels: &[u8]) -> &mut Self {
        for &level in levels {
            self.player(level);
        }
        self
    }

    pub fn assess(&self) -> EncounterAssessment {
        self.roster.assess()
    }

    pub fn total_xp(&self) -> u32 {
        self.assess().total_xp
    }

    pub fn difficulty(&self) -> DifficultyTier {
        self.assess().difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_creatures() {
        let goblin = create_sample_goblin("Snik");
        assert_eq!(goblin.skill_bonus(Skill::Stealth), 6);

        let mage = create_sample_mage("Evoker");
        assert_eq!(mage.spell_save_dc(), Some(14));

        let dragon = create_sample_dragon("Ashardalon");
        assert_eq!(dragon.proficiency_bonus(), 6);
        assert_eq!(dragon.passive_perception(), 23);
    }

    #[test]
    fn test_harness_assessment() {
        let mut harness = EncounterHarness::new();
        harness
            .party(&[1, 1, 1, 1])
            .creatures(create_sample_goblin("Goblin"), 3);
        assert_eq!(harness.total_xp(), 150);
        assert_eq!(harness.difficulty(), DifficultyTier::Low);
    }

    #[test]
    fn test_create_party() {
        let party = create_party(&[2, 5]);
        assert_eq!(party.len(), 2);
        assert_eq!(party[1].name, "Player 2");
        assert_eq!(party[1].level, 5);
    }
}
