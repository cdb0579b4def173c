//! Runtime configuration for the `tile-swap` binary.
//!
//! Values come from the environment first (`PUZZLE_*`), then command-line flags
//! override them.

use anyhow::{anyhow, Result};

use crate::core::GameConfig;
use crate::types::{Difficulty, SolvabilityPolicy, MIN_GRID_SIZE};

pub const DEFAULT_SAVE_PATH: &str = ".tile-swap/run.json";
pub const DEFAULT_LEADERBOARD_PATH: &str = ".tile-swap/leaderboard.json";
pub const DEFAULT_PLAYER: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub grid_size: u8,
    pub seed: u32,
    pub policy: SolvabilityPolicy,
    pub player: String,
    /// `None` keeps the run in memory only.
    pub save_path: Option<String>,
    pub leaderboard_path: Option<String>,
    /// JSON-lines event log; off unless set.
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_size: MIN_GRID_SIZE,
            seed: 1,
            policy: SolvabilityPolicy::default(),
            player: DEFAULT_PLAYER.to_string(),
            save_path: Some(DEFAULT_SAVE_PATH.to_string()),
            leaderboard_path: Some(DEFAULT_LEADERBOARD_PATH.to_string()),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Read `PUZZLE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary lookup.
    ///
    /// Unparseable numbers fall back to the default. An empty path disables that
    /// file.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let grid_size = lookup("PUZZLE_GRID")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.grid_size);
        let seed = lookup("PUZZLE_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let policy = lookup("PUZZLE_POLICY")
            .and_then(|s| SolvabilityPolicy::from_str(s.trim()))
            .unwrap_or(defaults.policy);
        let player = lookup("PUZZLE_PLAYER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.player);

        let path = |key: &str, fallback: Option<String>| match lookup(key) {
            Some(s) => non_empty(s),
            None => fallback,
        };

        Self {
            grid_size,
            seed,
            policy,
            player,
            save_path: path("PUZZLE_SAVE_PATH", defaults.save_path),
            leaderboard_path: path("PUZZLE_LEADERBOARD_PATH", defaults.leaderboard_path),
            log_path: path("PUZZLE_LOG_PATH", defaults.log_path),
        }
    }

    /// Apply command-line flags (without the program name) on top of `self`.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--grid" => {
                    let v = flag_value(args, &mut i, "--grid")?;
                    self.grid_size = v
                        .parse::<u8>()
                        .map_err(|_| anyhow!("invalid --grid value: {}", v))?;
                }
                "--difficulty" => {
                    let v = flag_value(args, &mut i, "--difficulty")?;
                    let difficulty = Difficulty::from_str(v)
                        .ok_or_else(|| anyhow!("unknown difficulty: {}", v))?;
                    self.grid_size = difficulty.grid_size();
                }
                "--seed" => {
                    let v = flag_value(args, &mut i, "--seed")?;
                    self.seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                }
                "--policy" => {
                    let v = flag_value(args, &mut i, "--policy")?;
                    self.policy = SolvabilityPolicy::from_str(v)
                        .ok_or_else(|| anyhow!("unknown policy: {}", v))?;
                }
                "--player" => {
                    let v = flag_value(args, &mut i, "--player")?;
                    if v.trim().is_empty() {
                        return Err(anyhow!("--player must not be empty"));
                    }
                    self.player = v.trim().to_string();
                }
                "--save" => {
                    let v = flag_value(args, &mut i, "--save")?;
                    self.save_path = non_empty(v.to_string());
                }
                "--no-save" => {
                    self.save_path = None;
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }

    /// Core configuration; validated when the game is built.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_grid_size(self.grid_size)
            .with_seed(self.seed)
            .with_policy(self.policy)
    }
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn environment_values_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PUZZLE_GRID", "6"),
            ("PUZZLE_SEED", " 99 "),
            ("PUZZLE_POLICY", "slide"),
            ("PUZZLE_PLAYER", "ann"),
            ("PUZZLE_SAVE_PATH", ""),
            ("PUZZLE_LOG_PATH", "/tmp/events.jsonl"),
        ]));
        assert_eq!(cfg.grid_size, 6);
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.policy, SolvabilityPolicy::SlideConstrained);
        assert_eq!(cfg.player, "ann");
        assert_eq!(cfg.save_path, None);
        assert_eq!(cfg.leaderboard_path.as_deref(), Some(DEFAULT_LEADERBOARD_PATH));
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/events.jsonl"));
    }

    #[test]
    fn bad_environment_numbers_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[("PUZZLE_GRID", "big"), ("PUZZLE_SEED", "-1")]));
        assert_eq!(cfg.grid_size, MIN_GRID_SIZE);
        assert_eq!(cfg.seed, 1);
    }

    #[test]
    fn flags_override_environment() {
        let base = AppConfig::from_lookup(lookup(&[("PUZZLE_GRID", "3")]));
        let cfg = base
            .apply_args(&args(&[
                "--difficulty",
                "hard",
                "--seed",
                "7",
                "--player",
                "bo",
                "--save",
                "/tmp/run.json",
            ]))
            .unwrap();
        assert_eq!(cfg.grid_size, 6);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.player, "bo");
        assert_eq!(cfg.save_path.as_deref(), Some("/tmp/run.json"));

        let cfg = cfg.apply_args(&args(&["--grid", "12", "--no-save"])).unwrap();
        assert_eq!(cfg.grid_size, 12);
        assert_eq!(cfg.save_path, None);
    }

    #[test]
    fn bad_flags_are_errors() {
        let cfg = AppConfig::default();
        assert!(cfg.clone().apply_args(&args(&["--grid"])).is_err());
        assert!(cfg.clone().apply_args(&args(&["--grid", "x"])).is_err());
        assert!(cfg.clone().apply_args(&args(&["--difficulty", "insane"])).is_err());
        assert!(cfg.clone().apply_args(&args(&["--policy", "whatever"])).is_err());
        assert!(cfg.clone().apply_args(&args(&["--player", " "])).is_err());
        assert!(cfg.apply_args(&args(&["--fast"])).is_err());
    }

    #[test]
    fn game_config_carries_choices() {
        let cfg = AppConfig {
            grid_size: 4,
            seed: 42,
            policy: SolvabilityPolicy::SlideConstrained,
            ..AppConfig::default()
        };
        let game = cfg.game_config();
        assert_eq!(game.grid_size, 4);
        assert_eq!(game.seed, 42);
        assert_eq!(game.policy, SolvabilityPolicy::SlideConstrained);
        assert!(game.validate().is_ok());

        let too_big = AppConfig {
            grid_size: 13,
            ..AppConfig::default()
        };
        assert!(too_big.game_config().validate().is_err());
    }
}
