//! Encounter XP and difficulty.
//!
//! The total XP of the creatures in an encounter is compared against the
//! party's summed per-level XP budget to give a [`DifficultyTier`]. Only
//! challenge ratings and player levels matter here; ability scores never
//! enter the calculation.

use crate::challenge::{ChallengeRating, ChallengeRatingError};
use crate::creature::Creature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest player level with a budget entry.
pub const MAX_PLAYER_LEVEL: u8 = 20;

// ============================================================================
// Creature XP
// ============================================================================

/// XP awarded for a creature of the given challenge rating.
pub fn xp_for_creature(cr: ChallengeRating) -> u32 {
    match cr {
        ChallengeRating::Zero => 10,
        ChallengeRating::Eighth => 25,
        ChallengeRating::Quarter => 50,
        ChallengeRating::Half => 100,
        ChallengeRating::Cr1 => 200,
        ChallengeRating::Cr2 => 450,
        ChallengeRating::Cr3 => 700,
        ChallengeRating::Cr4 => 1100,
        ChallengeRating::Cr5 => 1800,
        ChallengeRating::Cr6 => 2300,
        ChallengeRating::Cr7 => 2900,
        ChallengeRating::Cr8 => 3900,
        ChallengeRating::Cr9 => 5000,
        ChallengeRating::Cr10 => 5900,
        ChallengeRating::Cr11 => 7200,
        ChallengeRating::Cr12 => 8400,
        ChallengeRating::Cr13 => 10000,
        ChallengeRating::Cr14 => 11500,
        ChallengeRating::Cr15 => 13000,
        ChallengeRating::Cr16 => 15000,
        ChallengeRating::Cr17 => 18000,
        ChallengeRating::Cr18 => 20000,
        ChallengeRating::Cr19 => 22000,
        ChallengeRating::Cr20 => 25000,
        ChallengeRating::Cr21 => 33000,
        ChallengeRating::Cr22 => 41000,
        ChallengeRating::Cr23 => 50000,
        ChallengeRating::Cr24 => 62000,
        ChallengeRating::Cr25 => 75000,
        ChallengeRating::Cr26 => 90000,
        ChallengeRating::Cr27 => 105000,
        ChallengeRating::Cr28 => 120000,
        ChallengeRating::Cr29 => 135000,
        ChallengeRating::Cr30 => 155000,
    }
}

/// XP for a literal CR token. `None` means the token is not in the table.
///
/// The token must match exactly; `" 1 "` is a miss.
pub fn xp_for_token(token: &str) -> Option<u32> {
    ChallengeRating::from_token(token).map(xp_for_creature)
}

/// Anything that can be placed in an encounter and report its challenge
/// rating.
///
/// Typed creatures always resolve. Raw records and bare tokens may carry a
/// CR that is mid-edit; those resolve to an error and are skipped.
pub trait Rated {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError>;

    /// Label used when reporting a skipped entry.
    fn cr_label(&self) -> String;
}

impl Rated for ChallengeRating {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        Ok(*self)
    }

    fn cr_label(&self) -> String {
        self.token().to_string()
    }
}

impl Rated for Creature {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        Ok(self.challenge_rating)
    }

    fn cr_label(&self) -> String {
        self.challenge_rating.token().to_string()
    }
}

impl Rated for str {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        ChallengeRating::parse(self)
    }

    fn cr_label(&self) -> String {
        self.to_string()
    }
}

impl Rated for String {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        self.as_str().challenge_rating()
    }

    fn cr_label(&self) -> String {
        self.clone()
    }
}

impl<T: Rated + ?Sized> Rated for &T {
    fn challenge_rating(&self) -> Result<ChallengeRating, ChallengeRatingError> {
        (**self).challenge_rating()
    }

    fn cr_label(&self) -> String {
        (**self).cr_label()
    }
}

/// Summed XP plus the CR labels that could not be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XpTally {
    pub total: u32,
    pub skipped: Vec<String>,
}

impl XpTally {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Sum creature XP, skipping (and logging) entries whose CR is unknown.
pub fn tally_encounter_xp<C: Rated>(creatures: &[C]) -> XpTally {
    let mut tally = XpTally::default();
    for creature in creatures {
        match creature.challenge_rating() {
            Ok(cr) => tally.total = tally.total.saturating_add(xp_for_creature(cr)),
            Err(e) => {
                tracing::warn!("Skipping creature in XP total: {}", e);
                tally.skipped.push(creature.cr_label());
            }
        }
    }
    tally
}

/// Total XP of the creatures in an encounter. Empty rosters give 0.
pub fn total_encounter_xp<C: Rated>(creatures: &[C]) -> u32 {
    tally_encounter_xp(creatures).total
}

// ============================================================================
// Party Budget
// ============================================================================

/// XP thresholds separating the difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct XpBudget {
    pub low: u32,
    pub moderate: u32,
    pub high: u32,
}

impl XpBudget {
    pub const fn new(low: u32, moderate: u32, high: u32) -> Self {
        Self {
            low,
            moderate,
            high,
        }
    }
}

impl std::ops::Add for XpBudget {
    type Output = XpBudget;

    fn add(self, other: XpBudget) -> XpBudget {
        XpBudget {
            low: self.low.saturating_add(other.low),
            moderate: self.moderate.saturating_add(other.moderate),
            high: self.high.saturating_add(other.high),
        }
    }
}

/// Per-level thresholds, index 0 is level 1.
const BUDGET_BY_LEVEL: [XpBudget; MAX_PLAYER_LEVEL as usize] = [
    XpBudget::new(50, 75, 100),
    XpBudget::new(100, 150, 200),
    XpBudget::new(150, 225, 400),
    XpBudget::new(250, 375, 500),
    XpBudget::new(500, 750, 1100),
    XpBudget::new(600, 1000, 1400),
    XpBudget::new(750, 1300, 1700),
    XpBudget::new(1000, 1700, 2100),
    XpBudget::new(1300, 2000, 2600),
    XpBudget::new(1600, 2300, 3100),
    XpBudget::new(1900, 2900, 4100),
    XpBudget::new(2200, 3700, 4700),
    XpBudget::new(2600, 4200, 5400),
    XpBudget::new(2900, 4900, 6200),
    XpBudget::new(3300, 5400, 7800),
    XpBudget::new(3800, 6100, 9800),
    XpBudget::new(4500, 7200, 11700),
    XpBudget::new(5000, 8700, 14200),
    XpBudget::new(5500, 10700, 17200),
    XpBudget::new(6400, 13200, 22000),
];

/// Budget contributed by one player of `level`, for levels 1 to 20.
pub fn xp_budget_for_level(level: u8) -> Option<XpBudget> {
    let index = usize::from(level).checked_sub(1)?;
    BUDGET_BY_LEVEL.get(index).copied()
}

/// A player character; only the level affects balancing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub name: String,
    pub level: u8,
}

impl PlayerCharacter {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// Column-wise sum of every player's budget. Empty parties give all zeros.
pub fn party_xp_budget(players: &[PlayerCharacter]) -> XpBudget {
    players
        .iter()
        .filter_map(|player| {
            let budget = xp_budget_for_level(player.level);
            if budget.is_none() {
                tracing::warn!(
                    "Skipping player {:?} in XP budget: level {} is outside 1-{}",
                    player.name,
                    player.level,
                    MAX_PLAYER_LEVEL
                );
            }
            budget
        })
        .fold(XpBudget::default(), |acc, budget| acc + budget)
}

// ============================================================================
// Difficulty
// ============================================================================

/// Encounter difficulty, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyTier {
    Low,
    Moderate,
    High,
    Deadly,
}

impl DifficultyTier {
    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Low => "Low",
            DifficultyTier::Moderate => "Moderate",
            DifficultyTier::High => "High",
            DifficultyTier::Deadly => "Deadly",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify an XP total. A total equal to a threshold falls in the tier
/// above it.
pub fn classify_difficulty(total_xp: u32, budget: XpBudget) -> DifficultyTier {
    if total_xp < budget.low {
        DifficultyTier::Low
    } else if total_xp < budget.moderate {
        DifficultyTier::Moderate
    } else if total_xp < budget.high {
        DifficultyTier::High
    } else {
        DifficultyTier::Deadly
    }
}

/// Difficulty of `creatures` against `players` in one call.
pub fn encounter_difficulty<C: Rated>(
    creatures: &[C],
    players: &[PlayerCharacter],
) -> DifficultyTier {
    classify_difficulty(total_encounter_xp(creatures), party_xp_budget(players))
}

// ============================================================================
// Roster
// ============================================================================

/// Creatures and players in an encounter. Order does not affect results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterRoster<C = Creature> {
    pub creatures: Vec<C>,
    pub players: Vec<PlayerCharacter>,
}

impl<C> Default for EncounterRoster<C> {
    fn default() -> Self {
        Self {
            creatures: Vec::new(),
            players: Vec::new(),
        }
    }
}

impl<C: Rated> EncounterRoster<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_creature(mut self, creature: C) -> Self {
        self.creatures.push(creature);
        self
    }

    pub fn with_player(mut self, player: PlayerCharacter) -> Self {
        self.players.push(player);
        self
    }

    pub fn assess(&self) -> EncounterAssessment {
        let tally = tally_encounter_xp(&self.creatures);
        let budget = party_xp_budget(&self.players);
        EncounterAssessment {
            total_xp: tally.total,
            budget,
            difficulty: classify_difficulty(tally.total, budget),
            skipped: tally.skipped,
        }
    }
}

/// Everything the encounter builder displays about balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterAssessment {
    pub total_xp: u32,
    pub budget: XpBudget,
    pub difficulty: DifficultyTier,
    /// CR labels of creatures left out of `total_xp`.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_table_endpoints() {
        assert_eq!(xp_for_creature(ChallengeRating::Zero), 10);
        assert_eq!(xp_for_creature(ChallengeRating::Quarter), 50);
        assert_eq!(xp_for_creature(ChallengeRating::Cr1), 200);
        assert_eq!(xp_for_creature(ChallengeRating::Cr20), 25000);
        assert_eq!(xp_for_creature(ChallengeRating::Cr30), 155000);
    }

    #[test]
    fn test_xp_table_strictly_increasing() {
        let xp: Vec<u32> = ChallengeRating::ALL.iter().map(|&cr| xp_for_creature(cr)).collect();
        assert!(xp.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_xp_for_token() {
        assert_eq!(xp_for_token("1/8"), Some(25));
        assert_eq!(xp_for_token("24"), Some(62000));
        assert_eq!(xp_for_token(""), None);
        assert_eq!(xp_for_token("0.25"), None);
        assert_eq!(xp_for_token(" 1 "), None);
        assert_eq!(xp_for_token("1"), Some(200));
    }

    #[test]
    fn test_total_encounter_xp() {
        let empty: [Creature; 0] = [];
        assert_eq!(total_encounter_xp(&empty), 0);
        assert_eq!(
            total_encounter_xp(&[ChallengeRating::Cr1, ChallengeRating::Cr1]),
            400
        );
    }

    #[test]
    fn test_tally_skips_unknown_tokens() {
        let tally = tally_encounter_xp(&["2", "", "1/4", "abc"]);
        assert_eq!(tally.total, 500);
        assert_eq!(tally.skipped, vec!["".to_string(), "abc".to_string()]);
        assert!(!tally.is_complete());
    }

    #[test]
    fn test_budget_table() {
        assert_eq!(xp_budget_for_level(0), None);
        assert_eq!(xp_budget_for_level(1), Some(XpBudget::new(50, 75, 100)));
        assert_eq!(xp_budget_for_level(3), Some(XpBudget::new(150, 225, 400)));
        assert_eq!(xp_budget_for_level(20), Some(XpBudget::new(6400, 13200, 22000)));
        assert_eq!(xp_budget_for_level(21), None);

        for pair in BUDGET_BY_LEVEL.windows(2) {
            assert!(pair[0].low < pair[1].low);
            assert!(pair[0].moderate < pair[1].moderate);
            assert!(pair[0].high < pair[1].high);
        }
    }

    #[test]
    fn test_party_budget_sums_columns() {
        assert_eq!(party_xp_budget(&[]), XpBudget::new(0, 0, 0));

        let party = [
            PlayerCharacter::new("Ada", 1),
            PlayerCharacter::new("Bex", 2),
            PlayerCharacter::new("Cy", 2),
        ];
        assert_eq!(party_xp_budget(&party), XpBudget::new(250, 375, 500));
    }

    #[test]
    fn test_party_budget_skips_invalid_levels() {
        let party = [PlayerCharacter::new("Ada", 4), PlayerCharacter::new("Ghost", 0)];
        assert_eq!(party_xp_budget(&party), XpBudget::new(250, 375, 500));
    }

    #[test]
    fn test_classify_boundaries() {
        let budget = XpBudget::new(100, 150, 200);
        assert_eq!(classify_difficulty(0, budget), DifficultyTier::Low);
        assert_eq!(classify_difficulty(99, budget), DifficultyTier::Low);
        assert_eq!(classify_difficulty(100, budget), DifficultyTier::Moderate);
        assert_eq!(classify_difficulty(149, budget), DifficultyTier::Moderate);
        assert_eq!(classify_difficulty(150, budget), DifficultyTier::High);
        assert_eq!(classify_difficulty(199, budget), DifficultyTier::High);
        assert_eq!(classify_difficulty(200, budget), DifficultyTier::Deadly);
    }

    #[test]
    fn test_empty_party_is_always_deadly() {
        assert_eq!(classify_difficulty(0, XpBudget::default()), DifficultyTier::Deadly);
    }

    #[test]
    fn test_tier_order_and_names() {
        assert!(DifficultyTier::Low < DifficultyTier::Moderate);
        assert!(DifficultyTier::High < DifficultyTier::Deadly);
        assert_eq!(DifficultyTier::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_roster_assessment() {
        let roster = EncounterRoster::new()
            .with_creature(ChallengeRating::Cr2)
            .with_creature(ChallengeRating::Quarter)
            .with_player(PlayerCharacter::new("Ada", 3));
        let assessment = roster.assess();
        assert_eq!(assessment.total_xp, 500);
        assert_eq!(assessment.budget, XpBudget::new(150, 225, 400));
        assert_eq!(assessment.difficulty, DifficultyTier::Deadly);
        assert!(assessment.skipped.is_empty());
    }
}
