//! Game configuration and string option parsing.
//!
//! Options are set by name/value pairs in the same spirit as UCI `setoption`:
//! names match case-insensitively and values are trimmed before parsing.

use std::collections::BTreeSet;

use crate::errors::ConfigurationError;
use crate::game_state::chess_rules::{STANDARD_HEIGHT, STANDARD_WIDTH};
use crate::game_state::chess_types::{PlayDirection, Team};

/// Whether an accepted move may keep the turn with the same player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuationRule {
    /// Standard chess: every accepted move passes the turn.
    #[default]
    None,
    /// A capturing piece that can capture again keeps the turn, locked to that piece.
    CaptureChain,
}

/// A player's seat in the rotation. Order of seats is turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub team: Team,
    pub direction: PlayDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub seats: Vec<Seat>,
    pub continuation: ContinuationRule,
    /// Drop destinations that would leave the mover's own king attacked.
    pub filter_self_check: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
            seats: vec![
                Seat {
                    team: Team::Light,
                    direction: PlayDirection::Forward,
                },
                Seat {
                    team: Team::Dark,
                    direction: PlayDirection::Backward,
                },
            ],
            continuation: ContinuationRule::None,
            filter_self_check: true,
        }
    }
}

impl GameConfig {
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigurationError> {
        let v = value.trim().to_ascii_lowercase();
        let invalid = || ConfigurationError::InvalidOptionValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        if name.eq_ignore_ascii_case("Width") {
            self.width = v.parse::<usize>().map_err(|_| invalid())?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Height") {
            self.height = v.parse::<usize>().map_err(|_| invalid())?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Continuation") {
            self.continuation = match v.as_str() {
                "none" | "standard" => ContinuationRule::None,
                "capturechain" | "capture_chain" | "chain" => ContinuationRule::CaptureChain,
                _ => return Err(invalid()),
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("FilterSelfCheck") {
            self.filter_self_check = match v.as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => return Err(invalid()),
            };
            return Ok(());
        }

        Err(ConfigurationError::UnknownOption(name.to_owned()))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.seats.is_empty() {
            return Err(ConfigurationError::NoSeats);
        }
        let mut seen = BTreeSet::new();
        for seat in &self.seats {
            if !seen.insert(seat.team) {
                return Err(ConfigurationError::DuplicateSeat(seat.team));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_chess() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (8, 8));
        assert_eq!(config.seats.len(), 2);
        assert_eq!(config.seats[0].team, Team::Light);
        assert_eq!(config.continuation, ContinuationRule::None);
        assert!(config.filter_self_check);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn options_parse_case_insensitively() {
        let mut config = GameConfig::default();
        config.set_option("width", " 10 ").expect("width parses");
        config.set_option("CONTINUATION", "CaptureChain").expect("rule parses");
        config.set_option("FilterSelfCheck", "off").expect("flag parses");
        assert_eq!(config.width, 10);
        assert_eq!(config.continuation, ContinuationRule::CaptureChain);
        assert!(!config.filter_self_check);
    }

    #[test]
    fn bad_options_are_configuration_errors() {
        let mut config = GameConfig::default();
        assert_eq!(
            config.set_option("Hash", "64"),
            Err(ConfigurationError::UnknownOption("Hash".to_owned()))
        );
        assert!(matches!(
            config.set_option("Height", "tall"),
            Err(ConfigurationError::InvalidOptionValue { .. })
        ));
        assert_eq!(config.height, 8);
    }

    #[test]
    fn duplicate_seats_fail_validation() {
        let mut config = GameConfig::default();
        config.seats[1].team = Team::Light;
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::DuplicateSeat(Team::Light))
        );
    }
}
