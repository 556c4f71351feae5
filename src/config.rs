use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FantasyError, Result};
use crate::model::FantasyRole;

pub const DEFAULT_BASE_URL: &str = "https://api.cricapi.com/v1";

/// Inclusive bounds on how many players of one role a team may field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBounds {
    pub min: usize,
    pub max: usize,
}

impl RoleBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Team-composition rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRules {
    pub team_size: usize,
    /// Most players a single real-world team may contribute.
    pub max_per_team: usize,
    pub wicketkeepers: RoleBounds,
    pub batsmen: RoleBounds,
    pub allrounders: RoleBounds,
    pub bowlers: RoleBounds,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            team_size: 11,
            max_per_team: 7,
            wicketkeepers: RoleBounds::new(1, 4),
            batsmen: RoleBounds::new(3, 6),
            allrounders: RoleBounds::new(1, 4),
            bowlers: RoleBounds::new(3, 6),
        }
    }
}

impl TeamRules {
    pub fn bounds(&self, role: FantasyRole) -> RoleBounds {
        match role {
            FantasyRole::Wicketkeeper => self.wicketkeepers,
            FantasyRole::Batsman => self.batsmen,
            FantasyRole::Allrounder => self.allrounders,
            FantasyRole::Bowler => self.bowlers,
        }
    }

    /// Reject rule sets no team could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        for role in FantasyRole::ALL {
            let bounds = self.bounds(role);
            if bounds.min > bounds.max {
                return Err(FantasyError::InvalidConfig(format!(
                    "{role} bounds {}..={} are inverted",
                    bounds.min, bounds.max
                )));
            }
        }
        let min_total: usize = FantasyRole::ALL.iter().map(|r| self.bounds(*r).min).sum();
        let max_total: usize = FantasyRole::ALL.iter().map(|r| self.bounds(*r).max).sum();
        if !(min_total..=max_total).contains(&self.team_size) {
            return Err(FantasyError::InvalidConfig(format!(
                "team size {} not reachable with role bounds {min_total}..={max_total}",
                self.team_size
            )));
        }
        if self.max_per_team == 0 {
            return Err(FantasyError::InvalidConfig(
                "max_per_team must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Point multipliers for the captain and vice-captain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
    pub captain: Decimal,
    pub vice_captain: Decimal,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            captain: Decimal::TWO,
            vice_captain: Decimal::new(15, 1),
        }
    }
}

/// Where the match-data provider lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

/// Top-level engine configuration. Every field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FantasyConfig {
    pub rules: TeamRules,
    pub multipliers: Multipliers,
    pub provider: ProviderConfig,
}

impl FantasyConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FantasyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if self.multipliers.captain < Decimal::ZERO || self.multipliers.vice_captain < Decimal::ZERO
        {
            return Err(FantasyError::InvalidConfig(
                "multipliers must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
