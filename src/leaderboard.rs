use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{Dataset, PlayerRecord};

pub const DEFAULT_LEADERBOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoleChoice {
    Batsman,
    Bowler,
    AllRounder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    Runs,
    Wickets,
    ComboScore,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected Batsman, Bowler or All-Rounder)")]
pub struct UnknownRole(pub String);

impl RoleChoice {
    pub const ALL: [RoleChoice; 3] = [RoleChoice::Batsman, RoleChoice::Bowler, RoleChoice::AllRounder];

    pub fn label(self) -> &'static str {
        match self {
            RoleChoice::Batsman => "Batsman",
            RoleChoice::Bowler => "Bowler",
            RoleChoice::AllRounder => "All-Rounder",
        }
    }

    /// Role value as stored in the data file.
    pub fn stored_role(self) -> &'static str {
        match self {
            RoleChoice::Batsman => "batter",
            RoleChoice::Bowler => "bowler",
            RoleChoice::AllRounder => "allrounder",
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            RoleChoice::Batsman => Metric::Runs,
            RoleChoice::Bowler => Metric::Wickets,
            RoleChoice::AllRounder => Metric::ComboScore,
        }
    }

    pub fn next(self) -> Self {
        match self {
            RoleChoice::Batsman => RoleChoice::Bowler,
            RoleChoice::Bowler => RoleChoice::AllRounder,
            RoleChoice::AllRounder => RoleChoice::Batsman,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RoleChoice::Batsman => RoleChoice::AllRounder,
            RoleChoice::Bowler => RoleChoice::Batsman,
            RoleChoice::AllRounder => RoleChoice::Bowler,
        }
    }

    pub fn matches(self, row: &PlayerRecord) -> bool {
        row.role_lower() == self.stored_role()
    }
}

impl FromStr for RoleChoice {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoleChoice::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for RoleChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Runs => "Total Runs",
            Metric::Wickets => "Total Wickets Taken",
            Metric::ComboScore => "Combo Score",
        }
    }

    pub fn value(self, row: &PlayerRecord) -> u64 {
        match self {
            Metric::Runs => u64::from(row.total_runs),
            Metric::Wickets => u64::from(row.total_wickets_taken),
            Metric::ComboScore => row.combo_score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry<'a> {
    pub player: &'a PlayerRecord,
    pub value: u64,
}

pub fn players_for_role(dataset: &Dataset, role: RoleChoice) -> Vec<&PlayerRecord> {
    dataset.rows().iter().filter(|row| role.matches(row)).collect()
}

/// Names for the player picker, first-seen order, duplicates dropped.
pub fn unique_names_for_role(dataset: &Dataset, role: RoleChoice) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in players_for_role(dataset, role) {
        if !names.contains(&row.player_name.as_str()) {
            names.push(&row.player_name);
        }
    }
    names
}

pub fn top_players(dataset: &Dataset, role: RoleChoice, n: usize) -> Vec<LeaderboardEntry<'_>> {
    let metric = role.metric();
    let mut entries: Vec<LeaderboardEntry<'_>> = players_for_role(dataset, role)
        .into_iter()
        .map(|player| LeaderboardEntry {
            player,
            value: metric.value(player),
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries.truncate(n);
    entries
}

pub fn format_entry(metric: Metric, entry: &LeaderboardEntry<'_>) -> String {
    format!(
        "- {} → {}: {}",
        entry.player.player_name,
        metric.label(),
        entry.value
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_parse_case_insensitively() {
        assert_eq!("batsman".parse::<RoleChoice>(), Ok(RoleChoice::Batsman));
        assert_eq!(" BOWLER ".parse::<RoleChoice>(), Ok(RoleChoice::Bowler));
        assert_eq!("all-rounder".parse::<RoleChoice>(), Ok(RoleChoice::AllRounder));
        assert!("allrounder".parse::<RoleChoice>().is_err());
        assert!("keeper".parse::<RoleChoice>().is_err());
    }

    #[test]
    fn role_cycle_wraps_both_ways() {
        for role in RoleChoice::ALL {
            assert_eq!(role.next().prev(), role);
        }
        assert_eq!(RoleChoice::AllRounder.next(), RoleChoice::Batsman);
    }
}
