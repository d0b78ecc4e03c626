pub mod config;
pub mod dataset;
pub mod leaderboard;
pub mod player_detail;
pub mod query;
pub mod state;
