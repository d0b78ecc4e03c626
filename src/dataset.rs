use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Columns every input file must carry, in schema order.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "player_name",
    "role",
    "team",
    "total_matches_played",
    "total_runs",
    "strike_rate",
    "average",
    "total_balls_faced",
    "total_wickets_taken",
    "total_runs_conceded",
    "total_overs_bowled",
    "player_of_match_awards",
    "matches_won",
    "matches_lost",
    "percentage",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub role: String,
    pub team: String,
    pub total_matches_played: u32,
    pub total_runs: u32,
    pub strike_rate: f64,
    pub average: f64,
    pub total_balls_faced: u32,
    pub total_wickets_taken: u32,
    pub total_runs_conceded: u32,
    pub total_overs_bowled: f64,
    pub player_of_match_awards: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub percentage: f64,
}

impl PlayerRecord {
    pub fn role_lower(&self) -> String {
        self.role.to_lowercase()
    }

    /// Runs plus wickets, the all-rounder ranking key.
    pub fn combo_score(&self) -> u64 {
        u64::from(self.total_runs) + u64::from(self.total_wickets_taken)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("bad row at line {line}: {source}")]
    Row { line: u64, source: csv::Error },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Player table loaded once at startup. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<PlayerRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PlayerRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Parses a header-first CSV. The first malformed cell aborts the load;
/// nothing is coerced to a default.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns { columns: missing });
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize::<PlayerRecord>() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    return Err(DataLoadError::Csv(err));
                }
                return Err(DataLoadError::Row { line, source: err });
            }
        }
    }

    Ok(Dataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "player_name,role,team,total_matches_played,total_runs,strike_rate,average,total_balls_faced,total_wickets_taken,total_runs_conceded,total_overs_bowled,player_of_match_awards,matches_won,matches_lost,percentage";

    #[test]
    fn header_only_is_empty_dataset() {
        let ds = from_reader(HEADER.as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn columns_may_be_reordered_and_padded() {
        let raw = "role , player_name,team,total_matches_played,total_runs,strike_rate,average,total_balls_faced,total_wickets_taken,total_runs_conceded,total_overs_bowled,player_of_match_awards,matches_won,matches_lost,percentage,extra\n\
                   batter , A Player ,IND,10,400,88.5,44.4,452,0,0,0.0,2,7,3,70.0,ignored\n";
        let ds = from_reader(raw.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        let row = &ds.rows()[0];
        assert_eq!(row.player_name, "A Player");
        assert_eq!(row.role, "batter");
        assert_eq!(row.total_runs, 400);
    }

    #[test]
    fn combo_score_does_not_overflow() {
        let raw = format!("{HEADER}\nX,allrounder,T,1,{max},1.0,1.0,1,{max},0,0.0,0,0,0,0.0\n", max = u32::MAX);
        let ds = from_reader(raw.as_bytes()).unwrap();
        assert_eq!(ds.rows()[0].combo_score(), 2 * u64::from(u32::MAX));
    }
}
