//! D&D 5e statblock rules: derived creature statistics and encounter balance.
//!
//! This crate provides:
//! - Ability modifiers, proficiency bonus, saves, skills, passive perception,
//!   initiative and spellcasting numbers for a creature snapshot
//! - Encounter XP totals and Low / Moderate / High / Deadly classification
//! - Normalization of loosely-typed statblock records from the authoring form
//!
//! Every calculation is a pure function of its input. Nothing is cached and
//! nothing is mutated, so the same functions can be called on every render
//! for any number of creatures.
//!
//! # Quick Start
//!
//! ```
//! use statblock_core::{
//!     Ability, AbilityScores, ChallengeRating, Creature, DifficultyTier, EncounterRoster,
//!     PlayerCharacter, ProficiencyLevel, Skill,
//! };
//!
//! let ogre = Creature::new("Ogre", ChallengeRating::Cr2)
//!     .with_scores(AbilityScores::new(19, 8, 16, 5, 7, 7))
//!     .with_skill(Skill::Athletics, ProficiencyLevel::Proficient);
//! assert_eq!(ogre.skill_bonus(Skill::Athletics), 6);
//! assert_eq!(ogre.saving_throw_bonus(Ability::Dexterity), -1);
//!
//! let assessment = EncounterRoster::new()
//!     .with_creature(ogre)
//!     .with_player(PlayerCharacter::new("Ada", 3))
//!     .assess();
//! assert_eq!(assessment.total_xp, 450);
//! assert_eq!(assessment.difficulty, DifficultyTier::Deadly);
//! ```

pub mod abilities;
pub mod challenge;
pub mod creature;
pub mod encounter;
pub mod record;
pub mod testing;

// Primary public API
pub use abilities::{format_modifier, modifier, Ability, AbilityScores, ProficiencyLevel, Skill};
pub use challenge::{
    proficiency_bonus, proficiency_bonus_for_token, ChallengeRating, ChallengeRatingError,
};
pub use creature::{
    initiative_bonus, initiative_score, passive_perception, save_bonus, skill_bonus,
    spell_attack_bonus, spell_save_dc, Creature, StatblockSummary,
};
pub use encounter::{
    classify_difficulty, encounter_difficulty, party_xp_budget, tally_encounter_xp,
    total_encounter_xp, xp_budget_for_level, xp_for_creature, xp_for_token, DifficultyTier,
    EncounterAssessment, EncounterRoster, PlayerCharacter, Rated, XpBudget, XpTally,
};
pub use record::{RecordError, StatblockRecord};
