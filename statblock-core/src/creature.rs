//! Creature snapshots and every bonus derived from them.
//!
//! A [`Creature`] is a read-only snapshot of the fields that matter to the
//! rules. Nothing in this module mutates one; the UI builds a fresh snapshot
//! per render and asks for whatever numbers it needs.

use crate::abilities::{modifier, Ability, AbilityScores, ProficiencyLevel, Skill};
use crate::challenge::{proficiency_bonus, ChallengeRating};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base for passive checks and the initiative score.
pub const PASSIVE_BASE: i32 = 10;

/// Base for the spell save DC.
pub const SPELL_SAVE_DC_BASE: i32 = 8;

// ============================================================================
// Creature
// ============================================================================

/// The parts of a statblock the rules engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub ability_scores: AbilityScores,
    /// At most one level per ability.
    pub saving_throws: HashMap<Ability, ProficiencyLevel>,
    /// At most one level per skill.
    pub skills: HashMap<Skill, ProficiencyLevel>,
    pub challenge_rating: ChallengeRating,
    /// Initiative proficiency, tracked separately from Dexterity saves.
    pub initiative: ProficiencyLevel,
    /// Spellcasting ability, if the creature casts spells.
    pub spellcasting: Option<Ability>,
}

impl Creature {
    pub fn new(name: impl Into<String>, challenge_rating: ChallengeRating) -> Self {
        Self {
            name: name.into(),
            challenge_rating,
            ..Self::default()
        }
    }

    pub fn with_scores(mut self, ability_scores: AbilityScores) -> Self {
        self.ability_scores = ability_scores;
        self
    }

    /// Set a saving throw proficiency, replacing any previous level.
    pub fn with_save(mut self, ability: Ability, level: ProficiencyLevel) -> Self {
        self.saving_throws.insert(ability, level);
        self
    }

    /// Set a skill proficiency, replacing any previous level.
    pub fn with_skill(mut self, skill: Skill, level: ProficiencyLevel) -> Self {
        self.skills.insert(skill, level);
        self
    }

    pub fn with_initiative(mut self, level: ProficiencyLevel) -> Self {
        self.initiative = level;
        self
    }

    pub fn with_spellcasting(mut self, ability: Ability) -> Self {
        self.spellcasting = Some(ability);
        self
    }

    pub fn save_proficiency(&self, ability: Ability) -> ProficiencyLevel {
        self.saving_throws.get(&ability).copied().unwrap_or_default()
    }

    pub fn skill_proficiency(&self, skill: Skill) -> ProficiencyLevel {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.challenge_rating)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.ability_scores.modifier(ability)
    }

    /// Saving throw bonus using the creature's own save proficiency.
    pub fn saving_throw_bonus(&self, ability: Ability) -> i32 {
        save_bonus(
            self.ability_scores.get(ability),
            self.save_proficiency(ability),
            self.challenge_rating,
        )
    }

    /// Skill bonus using the creature's own skill proficiency.
    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        skill_bonus(skill, self.skill_proficiency(skill), self)
    }

    pub fn passive_perception(&self) -> i32 {
        passive_perception(self)
    }

    pub fn initiative_bonus(&self) -> i32 {
        initiative_bonus(self)
    }

    pub fn spell_save_dc(&self) -> Option<i32> {
        spell_save_dc(self)
    }

    pub fn spell_attack_bonus(&self) -> Option<i32> {
        spell_attack_bonus(self)
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// `modifier(score) + multiplier(level) * proficiency_bonus(cr)`.
///
/// Proficiency is added after the modifier is taken, so Expertise adds
/// exactly twice the bonus.
pub fn save_bonus(score: i32, level: ProficiencyLevel, cr: ChallengeRating) -> i32 {
    modifier(score) + level.bonus(proficiency_bonus(cr))
}

/// Bonus for `skill` at `level`, read against the creature's governing score.
pub fn skill_bonus(skill: Skill, level: ProficiencyLevel, creature: &Creature) -> i32 {
    save_bonus(
        creature.ability_scores.get(skill.ability()),
        level,
        creature.challenge_rating,
    )
}

pub fn passive_perception(creature: &Creature) -> i32 {
    PASSIVE_BASE
        + skill_bonus(
            Skill::Perception,
            creature.skill_proficiency(Skill::Perception),
            creature,
        )
}

/// Dexterity-based, using the creature's initiative proficiency rather than
/// its Dexterity save.
pub fn initiative_bonus(creature: &Creature) -> i32 {
    save_bonus(
        creature.ability_scores.dexterity,
        creature.initiative,
        creature.challenge_rating,
    )
}

/// The number shown in parentheses after initiative, e.g. the 12 in "+2 (12)".
pub fn initiative_score(creature: &Creature) -> i32 {
    PASSIVE_BASE + initiative_bonus(creature)
}

/// `8 + modifier + proficiency bonus`, or `None` for non-casters.
pub fn spell_save_dc(creature: &Creature) -> Option<i32> {
    spell_attack_bonus(creature).map(|attack| SPELL_SAVE_DC_BASE + attack)
}

/// `modifier + proficiency bonus`, or `None` for non-casters.
pub fn spell_attack_bonus(creature: &Creature) -> Option<i32> {
    let ability = creature.spellcasting?;
    Some(creature.modifier(ability) + creature.proficiency_bonus())
}

// ============================================================================
// Summary
// ============================================================================

/// One ability row of a statblock: score, modifier and save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityLine {
    pub ability: Ability,
    pub score: i32,
    pub modifier: i32,
    pub save: i32,
}

/// A skill the creature is proficient or expert in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLine {
    pub skill: Skill,
    pub level: ProficiencyLevel,
    pub bonus: i32,
}

/// Spellcasting numbers for casters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcastingLine {
    pub ability: Ability,
    pub save_dc: i32,
    pub attack_bonus: i32,
}

/// Every derived number a statblock preview displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatblockSummary {
    pub challenge_rating: ChallengeRating,
    pub proficiency_bonus: i32,
    /// In [`Ability::all`] order.
    pub abilities: Vec<AbilityLine>,
    /// Skills with a level other than None, sorted by display name.
    pub skills: Vec<SkillLine>,
    pub passive_perception: i32,
    pub initiative_bonus: i32,
    pub initiative_score: i32,
    pub spellcasting: Option<SpellcastingLine>,
}

impl StatblockSummary {
    pub fn derive(creature: &Creature) -> Self {
        let abilities = Ability::all()
            .into_iter()
            .map(|ability| AbilityLine {
                ability,
                score: creature.ability_scores.get(ability),
                modifier: creature.modifier(ability),
                save: creature.saving_throw_bonus(ability),
            })
            .collect();

        let mut skills: Vec<SkillLine> = creature
            .skills
            .iter()
            .filter(|(_, level)| **level != ProficiencyLevel::None)
            .map(|(&skill, &level)| SkillLine {
                skill,
                level,
                bonus: skill_bonus(skill, level, creature),
            })
            .collect();
        skills.sort_by_key(|line| line.skill.name());

        let spellcasting = creature.spellcasting.map(|ability| {
            let attack_bonus = creature.modifier(ability) + creature.proficiency_bonus();
            SpellcastingLine {
                ability,
                save_dc: SPELL_SAVE_DC_BASE + attack_bonus,
                attack_bonus,
            }
        });

        Self {
            challenge_rating: creature.challenge_rating,
            proficiency_bonus: creature.proficiency_bonus(),
            abilities,
            skills,
            passive_perception: passive_perception(creature),
            initiative_bonus: initiative_bonus(creature),
            initiative_score: initiative_score(creature),
            spellcasting,
        }
    }

    pub fn ability(&self, ability: Ability) -> Option<&AbilityLine> {
        self.abilities.iter().find(|line| line.ability == ability)
    }
}
