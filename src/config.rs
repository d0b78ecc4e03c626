use std::env;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::leaderboard::DEFAULT_LEADERBOARD_SIZE;

pub const DEFAULT_DATA_PATH: &str = "data/odi_cricket_data.csv";
const MAX_LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub leaderboard_size: usize,
    pub quote_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            quote_seed: None,
        }
    }
}

impl AppConfig {
    /// Reads `.env.local` then `.env` (both optional), then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("ODI_DATA_PATH")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let leaderboard_size = lookup("ODI_LEADERBOARD_SIZE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(|n| n.clamp(1, MAX_LEADERBOARD_SIZE))
            .unwrap_or(DEFAULT_LEADERBOARD_SIZE);
        let quote_seed = lookup("ODI_QUOTE_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());
        Self {
            data_path,
            leaderboard_size,
            quote_seed,
        }
    }

    pub fn quote_rng(&self) -> StdRng {
        match self.quote_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
