//! Statblock records as exchanged with the authoring UI.
//!
//! A [`StatblockRecord`] mirrors the JSON the statblock form edits. It is
//! deliberately loose: the CR is raw text that may be blank mid-edit, and
//! proficiencies are lists that can briefly hold the same key twice.
//! [`StatblockRecord::to_creature`] normalizes it into a [`Creature`].

use crate::abilities::{Ability, AbilityScores, ProficiencyLevel, Skill};
use crate::challenge::{ChallengeRating, ChallengeRatingError};
use crate::creature::Creature;
use crate::encounter::Rated;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading statblock records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A saving throw entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProficiency {
    pub score: Ability,
    pub level: ProficiencyLevel,
}

/// A skill entry. The field is named `ability` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProficiency {
    #[serde(rename = "ability")]
    pub skill: Skill,
    pub level: ProficiencyLevel,
}

/// Spellcasting block. Only the ability feeds the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellsRecord {
    pub ability: Ability,
}

/// Rules-relevant fields of a statblock as the form stores them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatblockRecord {
    pub name: String,
    pub stats: AbilityScores,
    pub saves: Vec<SaveProficiency>,
    pub skill_saves: Vec<SkillProficiency>,
    pub cr: String,
    pub initiative: ProficiencyLevel,
    pub spells: Option<SpellsRecord>,
}

impl StatblockRecord {
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build a creature snapshot.
    ///
    /// An unknown or blank CR becomes "0". For repeated saves or skills the
    /// last entry wins.
    pub fn to_creature(&self) -> Creature {
        let challenge_rating = match ChallengeRating::parse(&self.cr) {
            Ok(cr) => cr,
            Err(e) => {
                tracing::debug!("Statblock {:?}: {}, using CR 0", self.name, e);
                ChallengeRating::Zero
            }
        };

        let mut creature = Creature::new(self.name.clone(), challenge_rating)
            .with_scores(self.stats)
            .with_initiative(self.initiative);
        for save in &self.saves {
            creature = creature.with_save(save.score, save.level);
        }
        for skill in &self.skill_saves {
            creature = creature.with_skill(skill.skill, skill.level);
        }
        if let Some(spells) = self.spells {
            creature = creature.with_spellcasting(spells.ability);
        }
        creature
    }
}

impl From<&Creature> for StatblockRecord {
    fn from(creature: &Creature) -> Self {
        let saves = Ability::all()
            .into_iter()
            .filter_map(|score| {
                creature
                    .saving_throws
                    .get(&score)
                    .map(|&level| SaveProficiency { score, level })
            })
            .collect();
        let skill_saves = Skill::all()
            .into_iter()
            .filter_map(|skill| {
                creature
                    .skills
                    .get(&skill)
                    .map(|&level| SkillProficiency { skill, level })
            })
            .collect();

        Self {
            name: creature.name.clone(),
            stats: creature.ability_scores,
            saves,
            skill_saves,
            cr: creature.challenge_rating.token().to_string(),
            initiative: creature.initiative,
            spells: creature.spellcasting.map(|ability| SpellsRecord { ability }),
        }
    }
}

impl Rated for StatblockRecord {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        ChallengeRating::parse(&self.cr)
    }

    fn cr_label(&self) -> String {
        self.cr.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::total_encounter_xp;

    const GOBLIN_BOSS: &str = r#"{
        "name": "Goblin Boss",
        "size": "Small",
        "stats": {
            "strength": 10, "dexterity": 14, "constitution": 10,
            "intelligence": 10, "wisdom": 8, "charisma": 10
        },
        "saves": [{ "score": "Dexterity", "level": "proficient" }],
        "skill_saves": [
            { "ability": "Stealth", "level": "proficient" },
            { "ability": "Stealth", "level": "expertise" }
        ],
        "cr": "1",
        "initiative": "proficient",
        "traits": []
    }"#;

    #[test]
    fn test_parse_record_ignores_unrelated_fields() {
        let record = StatblockRecord::from_json(GOBLIN_BOSS).unwrap();
        assert_eq!(record.name, "Goblin Boss");
        assert_eq!(record.stats.dexterity, 14);
        assert_eq!(record.skill_saves.len(), 2);
        assert_eq!(record.spells, None);
    }

    #[test]
    fn test_to_creature_last_duplicate_wins() {
        let creature = StatblockRecord::from_json(GOBLIN_BOSS).unwrap().to_creature();
        assert_eq!(creature.challenge_rating, ChallengeRating::Cr1);
        assert_eq!(creature.skills.len(), 1);
        assert_eq!(
            creature.skill_proficiency(Skill::Stealth),
            ProficiencyLevel::Expertise
        );
        assert_eq!(creature.skill_bonus(Skill::Stealth), 6);
        assert_eq!(creature.saving_throw_bonus(Ability::Dexterity), 4);
        assert_eq!(creature.initiative_bonus(), 4);
    }

    #[test]
    fn test_blank_cr_normalizes_to_zero() {
        let record = StatblockRecord {
            name: "Draft".to_string(),
            cr: String::new(),
            ..StatblockRecord::default()
        };
        let creature = record.to_creature();
        assert_eq!(creature.challenge_rating, ChallengeRating::Zero);
        assert_eq!(creature.ability_scores, AbilityScores::default());
    }

    #[test]
    fn test_records_with_unknown_cr_are_skipped_in_xp() {
        let mut draft = StatblockRecord::from_json(GOBLIN_BOSS).unwrap();
        let boss = draft.clone();
        draft.cr = "1/3".to_string();
        assert_eq!(total_encounter_xp(&[boss, draft]), 200);
    }

    #[test]
    fn test_creature_round_trip_through_record() {
        let creature = StatblockRecord::from_json(GOBLIN_BOSS).unwrap().to_creature();
        let record = StatblockRecord::from(&creature);
        assert_eq!(record.cr, "1");
        assert_eq!(record.to_creature(), creature);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = StatblockRecord::from_json("{\"stats\": 7}").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }
}
