use std::collections::VecDeque;

use rand::Rng;

use crate::dataset::Dataset;
use crate::leaderboard::{self, DEFAULT_LEADERBOARD_SIZE, LeaderboardEntry, RoleChoice};
use crate::player_detail::{self, PlayerDetail};
use crate::query::{self, Banner};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Query,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub role: RoleChoice,
    pub player_selected: usize,
    pub input_mode: InputMode,
    pub query_input: String,
    pub banner: Option<Banner>,
    pub detail: Option<PlayerDetail>,
    pub detail_error: Option<String>,
    pub leaderboard_size: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            role: RoleChoice::Batsman,
            player_selected: 0,
            input_mode: InputMode::Browse,
            query_input: String::new(),
            banner: None,
            detail: None,
            detail_error: None,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn with_leaderboard_size(mut self, n: usize) -> Self {
        self.leaderboard_size = n;
        self
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn set_role(&mut self, role: RoleChoice) {
        if self.role == role {
            return;
        }
        self.role = role;
        self.player_selected = 0;
        self.push_log(format!("[INFO] Role: {}", role.label()));
    }

    pub fn cycle_role_next(&mut self) {
        self.set_role(self.role.next());
    }

    pub fn cycle_role_prev(&mut self) {
        self.set_role(self.role.prev());
    }

    pub fn player_names<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        leaderboard::unique_names_for_role(dataset, self.role)
    }

    pub fn leaderboard<'a>(&self, dataset: &'a Dataset) -> Vec<LeaderboardEntry<'a>> {
        leaderboard::top_players(dataset, self.role, self.leaderboard_size)
    }

    pub fn selected_player_name<'a>(&self, dataset: &'a Dataset) -> Option<&'a str> {
        self.player_names(dataset).get(self.player_selected).copied()
    }

    pub fn select_player_next(&mut self, dataset: &Dataset) {
        let total = self.player_names(dataset).len();
        if total == 0 {
            self.player_selected = 0;
            return;
        }
        self.player_selected = (self.player_selected + 1) % total;
    }

    pub fn select_player_prev(&mut self, dataset: &Dataset) {
        let total = self.player_names(dataset).len();
        if total == 0 {
            self.player_selected = 0;
            return;
        }
        if self.player_selected == 0 {
            self.player_selected = total - 1;
        } else {
            self.player_selected -= 1;
        }
    }

    /// Rebuilds the player card for the current selection. Every call draws a
    /// fresh quote.
    pub fn refresh_detail<R: Rng + ?Sized>(&mut self, dataset: &Dataset, rng: &mut R) {
        let Some(name) = self.selected_player_name(dataset) else {
            self.detail = None;
            self.detail_error = None;
            return;
        };
        match player_detail::get_player_detail(dataset, name, rng) {
            Ok(detail) => {
                self.detail = Some(detail);
                self.detail_error = None;
            }
            Err(err) => {
                self.detail = None;
                self.detail_error = Some(err.to_string());
                self.push_log(format!("[WARN] {err}"));
            }
        }
    }

    pub fn reroll_quote<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(detail) = self.detail.as_mut() {
            detail.quote = player_detail::pick_quote(rng);
        }
    }

    pub fn begin_query(&mut self) {
        self.input_mode = InputMode::Query;
        self.query_input.clear();
    }

    pub fn push_query_char(&mut self, c: char) {
        if self.input_mode == InputMode::Query {
            self.query_input.push(c);
        }
    }

    pub fn pop_query_char(&mut self) {
        if self.input_mode == InputMode::Query {
            self.query_input.pop();
        }
    }

    pub fn cancel_query(&mut self) {
        self.input_mode = InputMode::Browse;
        self.query_input.clear();
    }

    pub fn submit_query(&mut self, dataset: &Dataset) {
        self.input_mode = InputMode::Browse;
        let text = std::mem::take(&mut self.query_input);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let result = query::handle_query(dataset, text);
        let banner = query::describe(&result);
        if result.is_handled() {
            self.push_log(format!("[INFO] Query '{text}': {}", banner.title));
        } else {
            self.push_log(format!("[WARN] Query not understood: '{text}'"));
        }
        self.banner = Some(banner);
    }
}
