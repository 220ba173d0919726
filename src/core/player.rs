use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }

    /// Exact match only; stored cell text is never padded or lowercased.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "X" => Some(Symbol::X),
            "O" => Some(Symbol::O),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub symbol: Symbol,
    pub wins: u32,
}

impl Player {
    pub fn with_wins(symbol: Symbol, wins: u32) -> Self {
        Self { symbol, wins }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}: {}", self.symbol, self.wins)
    }
}

/// Win tallies for both symbols; outlives individual games.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    x: Player,
    o: Player,
}

impl Scoreboard {
    pub fn new(x_wins: u32, o_wins: u32) -> Self {
        Self {
            x: Player::with_wins(Symbol::X, x_wins),
            o: Player::with_wins(Symbol::O, o_wins),
        }
    }

    pub fn player(&self, symbol: Symbol) -> &Player {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    pub fn wins(&self, symbol: Symbol) -> u32 {
        self.player(symbol).wins
    }

    pub fn record_win(&mut self, symbol: Symbol) -> u32 {
        let player = match symbol {
            Symbol::X => &mut self.x,
            Symbol::O => &mut self.o,
        };
        player.wins = player.wins.saturating_add(1);
        player.wins
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_round_trips_through_text() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::parse(symbol.as_str()), Some(symbol));
        }
        assert_eq!(Symbol::parse("x"), None);
        assert_eq!(Symbol::parse(""), None);
    }

    #[test]
    fn other_toggles_between_symbols() {
        assert_eq!(Symbol::X.other(), Symbol::O);
        assert_eq!(Symbol::O.other().other(), Symbol::O);
    }

    #[test]
    fn scoreboard_display_matches_score_banner() {
        let mut scoreboard = Scoreboard::default();
        scoreboard.record_win(Symbol::O);
        scoreboard.record_win(Symbol::O);
        scoreboard.record_win(Symbol::X);

        assert_eq!(scoreboard.to_string(), "Player X: 1, Player O: 2");
        assert_eq!(scoreboard.wins(Symbol::O), 2);
    }

    #[test]
    fn serde_uses_bare_symbol_names() {
        assert_eq!(serde_json::to_string(&Symbol::X).unwrap(), "\"X\"");
        assert_eq!(serde_json::from_str::<Symbol>("\"O\"").unwrap(), Symbol::O);
    }
}
