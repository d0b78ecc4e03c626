use std::fmt;

use serde::Serialize;

use crate::dataset::{Dataset, PlayerRecord};

const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intent {
    MostRuns,
    MostWickets,
    BestAverage,
    TopBowlers,
    StrikeRate,
    MostMatches,
    AllRounders,
    PlayerOfMatch,
}

/// Evaluated top to bottom; the first row whose phrase appears in the
/// lowercased query wins.
static INTENT_TABLE: [(&[&str], Intent); 8] = [
    (&["most runs"], Intent::MostRuns),
    (&["most wickets"], Intent::MostWickets),
    (&["best average"], Intent::BestAverage),
    (&["top bowlers"], Intent::TopBowlers),
    (&["strike rate"], Intent::StrikeRate),
    (&["most matches"], Intent::MostMatches),
    (&["all-rounder", "allrounder"], Intent::AllRounders),
    (&["player of the match"], Intent::PlayerOfMatch),
];

impl Intent {
    pub fn all() -> impl Iterator<Item = Intent> {
        INTENT_TABLE.iter().map(|(_, intent)| *intent)
    }

    pub fn phrases(self) -> &'static [&'static str] {
        INTENT_TABLE
            .iter()
            .find(|(_, intent)| *intent == self)
            .map(|(phrases, _)| *phrases)
            .unwrap_or(&[])
    }
}

pub fn match_intent(text: &str) -> Option<Intent> {
    let lowered = text.to_lowercase();
    INTENT_TABLE
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| lowered.contains(p)))
        .map(|(_, intent)| *intent)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u32),
    Ratio(f64),
}

impl StatValue {
    fn as_f64(self) -> f64 {
        match self {
            StatValue::Count(v) => f64::from(v),
            StatValue::Ratio(v) => v,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(v) => write!(f, "{v}"),
            StatValue::Ratio(v) => write!(f, "{v:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<'a> {
    Leader {
        intent: Intent,
        player: &'a PlayerRecord,
        value: StatValue,
    },
    Ranking {
        intent: Intent,
        rows: Vec<&'a PlayerRecord>,
    },
    /// A single-row intent asked of an empty table.
    NoData { intent: Intent },
    Unhandled,
}

impl QueryResult<'_> {
    pub fn intent(&self) -> Option<Intent> {
        match self {
            QueryResult::Leader { intent, .. }
            | QueryResult::Ranking { intent, .. }
            | QueryResult::NoData { intent } => Some(*intent),
            QueryResult::Unhandled => None,
        }
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, QueryResult::Unhandled)
    }
}

pub fn handle_query<'a>(dataset: &'a Dataset, text: &str) -> QueryResult<'a> {
    let Some(intent) = match_intent(text) else {
        return QueryResult::Unhandled;
    };
    let rows = dataset.rows();
    match intent {
        Intent::MostRuns => leader(rows, intent, |r| StatValue::Count(r.total_runs)),
        Intent::MostWickets => leader(rows, intent, |r| StatValue::Count(r.total_wickets_taken)),
        Intent::BestAverage => leader(rows, intent, |r| StatValue::Ratio(r.average)),
        Intent::StrikeRate => leader(rows, intent, |r| StatValue::Ratio(r.strike_rate)),
        Intent::MostMatches => leader(rows, intent, |r| StatValue::Count(r.total_matches_played)),
        Intent::PlayerOfMatch => {
            leader(rows, intent, |r| StatValue::Count(r.player_of_match_awards))
        }
        Intent::TopBowlers => {
            let mut top: Vec<&PlayerRecord> = rows.iter().collect();
            top.sort_by(|a, b| b.total_wickets_taken.cmp(&a.total_wickets_taken));
            top.truncate(TOP_N);
            QueryResult::Ranking { intent, rows: top }
        }
        Intent::AllRounders => {
            let mut top: Vec<&PlayerRecord> = rows
                .iter()
                .filter(|r| r.role_lower().contains("allrounder"))
                .collect();
            top.sort_by(|a, b| {
                (b.total_runs, b.total_wickets_taken).cmp(&(a.total_runs, a.total_wickets_taken))
            });
            top.truncate(TOP_N);
            QueryResult::Ranking { intent, rows: top }
        }
    }
}

fn leader<'a>(
    rows: &'a [PlayerRecord],
    intent: Intent,
    key: impl Fn(&PlayerRecord) -> StatValue,
) -> QueryResult<'a> {
    match argmax(rows, &key) {
        Some(idx) => QueryResult::Leader {
            intent,
            player: &rows[idx],
            value: key(&rows[idx]),
        },
        None => QueryResult::NoData { intent },
    }
}

/// Index of the first row holding the maximum. NaN never wins; an empty
/// slice or an all-NaN column has no maximum.
pub fn argmax(rows: &[PlayerRecord], key: impl Fn(&PlayerRecord) -> StatValue) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, row) in rows.iter().enumerate() {
        let value = key(row).as_f64();
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub title: String,
    pub lines: Vec<String>,
}

impl Banner {
    pub fn not_understood() -> Self {
        Self {
            level: BannerLevel::Warning,
            title: "Couldn't understand the query. Try again!".to_string(),
            lines: Vec::new(),
        }
    }
}

pub fn describe(result: &QueryResult<'_>) -> Banner {
    match result {
        QueryResult::Leader {
            intent,
            player,
            value,
        } => {
            let name = &player.player_name;
            let title = match intent {
                Intent::MostRuns => format!("Most Runs: {name} - {value} runs"),
                Intent::MostWickets => format!("Most Wickets: {name} - {value} wickets"),
                Intent::BestAverage => format!("Best Batting Average: {name} - {value}"),
                Intent::StrikeRate => format!("Highest Strike Rate: {name} - {value}"),
                Intent::MostMatches => format!("Most Matches Played: {name} - {value} matches"),
                Intent::PlayerOfMatch => {
                    format!("Most Player of the Match Awards: {name} - {value} awards")
                }
                Intent::TopBowlers | Intent::AllRounders => format!("{name} - {value}"),
            };
            Banner {
                level: BannerLevel::Info,
                title,
                lines: Vec::new(),
            }
        }
        QueryResult::Ranking { intent, rows } => {
            let (title, lines) = match intent {
                Intent::AllRounders => (
                    "Top All-Rounders".to_string(),
                    rows.iter()
                        .map(|r| {
                            format!(
                                "{} - Runs: {}, Wickets: {}",
                                r.player_name, r.total_runs, r.total_wickets_taken
                            )
                        })
                        .collect(),
                ),
                _ => (
                    "Top 5 Bowlers".to_string(),
                    rows.iter()
                        .map(|r| format!("{} - {} wickets", r.player_name, r.total_wickets_taken))
                        .collect(),
                ),
            };
            Banner {
                level: BannerLevel::Info,
                title,
                lines,
            }
        }
        QueryResult::NoData { .. } => Banner {
            level: BannerLevel::Warning,
            title: "No player data loaded".to_string(),
            lines: Vec::new(),
        },
        QueryResult::Unhandled => Banner::not_understood(),
    }
}
