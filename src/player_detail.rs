use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::dataset::{Dataset, PlayerRecord};

pub const QUOTES: [&str; 4] = [
    "'You don't win or lose the games because of the 11 you select. You win or lose with what those 11 do on the field.' - Rahul Dravid",
    "'No dream is ever chased alone.' - Sachin Tendulkar",
    "'First of all, convince yourself that you are the best because the rest of the world is going to go proving this to others.' - Wasim Akram",
    "'Compromise for your dream. But never compromise on your dream.' - MS Dhoni",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No data found for '{name}'. Please check the spelling.")]
pub struct PlayerNotFound {
    pub name: String,
}

/// Two values charted side by side (or as shares of a whole).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPair {
    pub title: &'static str,
    pub labels: [&'static str; 2],
    pub values: [u32; 2],
}

impl ChartPair {
    /// Percentage split of the pair, `None` when both sides are zero.
    pub fn shares(&self) -> Option<[f64; 2]> {
        let total = f64::from(self.values[0]) + f64::from(self.values[1]);
        if total <= 0.0 {
            return None;
        }
        Some([
            f64::from(self.values[0]) * 100.0 / total,
            f64::from(self.values[1]) * 100.0 / total,
        ])
    }

    pub fn max(&self) -> u32 {
        self.values[0].max(self.values[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetail {
    pub player: PlayerRecord,
    pub batting: ChartPair,
    pub bowling: ChartPair,
    pub results: ChartPair,
    pub quote: &'static str,
}

impl PlayerDetail {
    pub fn heading(&self) -> String {
        format!(
            "Stats for {} ({} - {})",
            self.player.player_name, self.player.role, self.player.team
        )
    }

    pub fn stat_lines(&self) -> Vec<(&'static str, String)> {
        let p = &self.player;
        vec![
            ("Total Matches", p.total_matches_played.to_string()),
            ("Total Runs", p.total_runs.to_string()),
            ("Strike Rate", p.strike_rate.to_string()),
            ("Batting Average", p.average.to_string()),
            ("Balls Faced", p.total_balls_faced.to_string()),
            ("Wickets Taken", p.total_wickets_taken.to_string()),
            ("Runs Conceded", p.total_runs_conceded.to_string()),
            ("Overs Bowled", p.total_overs_bowled.to_string()),
            ("Player of the Match Awards", p.player_of_match_awards.to_string()),
            ("Matches Won", p.matches_won.to_string()),
            ("Matches Lost", p.matches_lost.to_string()),
            ("Win Percentage", format!("{}%", p.percentage)),
        ]
    }
}

/// Case-insensitive exact name match. Duplicate names resolve to the first row.
pub fn find_player<'a>(dataset: &'a Dataset, name: &str) -> Option<&'a PlayerRecord> {
    let wanted = name.to_lowercase();
    dataset
        .rows()
        .iter()
        .find(|row| row.player_name.to_lowercase() == wanted)
}

pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

pub fn get_player_detail<R: Rng + ?Sized>(
    dataset: &Dataset,
    name: &str,
    rng: &mut R,
) -> Result<PlayerDetail, PlayerNotFound> {
    let player = find_player(dataset, name).ok_or_else(|| PlayerNotFound {
        name: name.to_string(),
    })?;
    Ok(PlayerDetail {
        batting: ChartPair {
            title: "Batting Performance",
            labels: ["Runs", "Balls Faced"],
            values: [player.total_runs, player.total_balls_faced],
        },
        bowling: ChartPair {
            title: "Bowling Performance",
            labels: ["Wickets", "Runs Conceded"],
            values: [player.total_wickets_taken, player.total_runs_conceded],
        },
        results: ChartPair {
            title: "Match Results",
            labels: ["Won", "Lost"],
            values: [player.matches_won, player.matches_lost],
        },
        quote: pick_quote(rng),
        player: player.clone(),
    })
}
