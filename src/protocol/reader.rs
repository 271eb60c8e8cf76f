//! Engine input parsing.

use std::io::{BufRead, Lines};
use std::str::FromStr;

use crate::game::{GameSettings, Owner, Planet, PlanetId, PlayerId, Pos, Ship, Turn};
use crate::protocol::{GAME_END, NEUTRAL, ProtocolError, TURN_INIT, TURN_START};

/// Record counts are untrusted; at most this many slots are reserved up front.
const MAX_PREALLOCATED: usize = 1024;

/// Pulls settings and turns off an engine input stream.
#[derive(Debug)]
pub struct Reader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Reader<R> {
    /// Wrap an input stream.
    #[must_use]
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_no
    }

    /// Read the `seed`, `num-players` and `player-id` header.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three records is missing or malformed,
    /// including when the engine sends `game-end` instead.
    pub fn read_settings(&mut self) -> Result<GameSettings, ProtocolError> {
        match self.read_header()? {
            Some(settings) => Ok(settings),
            None => Err(self.unexpected("seed", GAME_END.to_string())),
        }
    }

    /// Read the settings header, or `None` if the engine ends the match
    /// with `game-end` before sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three records is missing or malformed.
    pub fn read_header(&mut self) -> Result<Option<GameSettings>, ProtocolError> {
        let line = self.next_line("seed")?;
        if line.trim() == GAME_END {
            return Ok(None);
        }
        let seed = self.value_of(&line, "seed")?;
        let num_players = self.read_value("num-players")?;
        let player_id = self.read_value("player-id")?;
        Ok(Some(GameSettings::new(seed, num_players, player_id)))
    }

    /// Read the next turn block.
    ///
    /// Returns `None` once the engine sends `game-end`.
    ///
    /// # Errors
    ///
    /// Returns an error on any deviation from the turn grammar, and when the
    /// planets of the turn do not form a valid graph.
    pub fn next_turn(&mut self, settings: &GameSettings) -> Result<Option<Turn>, ProtocolError> {
        const EXPECTED: &str = "'turn-init' or 'game-end'";

        let line = self.next_line(EXPECTED)?;
        let keyword = line.trim();
        if keyword == GAME_END {
            return Ok(None);
        }
        if keyword != TURN_INIT {
            return Err(self.unexpected(EXPECTED, line.clone()));
        }

        let planet_count: usize = self.read_value("num-planets")?;
        let mut planets = Vec::with_capacity(planet_count.min(MAX_PREALLOCATED));
        for _ in 0..planet_count {
            planets.push(self.read_planet(settings.player_id)?);
        }

        let ship_count: usize = self.read_value("num-ships")?;
        let mut ships = Vec::with_capacity(ship_count.min(MAX_PREALLOCATED));
        for _ in 0..ship_count {
            ships.push(self.read_ship(settings.player_id)?);
        }

        let line = self.next_line("'turn-start'")?;
        if line.trim() != TURN_START {
            return Err(self.unexpected("'turn-start'", line));
        }

        let turn = Turn::new(planets, ships);
        if let Err(error) = turn.index() {
            return Err(ProtocolError::Graph {
                line: self.line_no,
                error,
            });
        }
        Ok(Some(turn))
    }

    /// `planet <id> <x> <y> <radius> <owner> <health>` then `neighbors <id>*`.
    fn read_planet(&mut self, me: PlayerId) -> Result<Planet, ProtocolError> {
        const SHAPE: &str = "'planet <id> <x> <y> <radius> <owner> <health>'";

        let line = self.next_line(SHAPE)?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 7 || parts[0] != "planet" {
            return Err(self.unexpected(SHAPE, line.clone()));
        }

        let id = self.parse(parts[1], "planet id")?;
        let x = self.parse(parts[2], "planet x")?;
        let y = self.parse(parts[3], "planet y")?;
        let radius = self.parse(parts[4], "planet radius")?;
        let owner = self.parse_owner(parts[5], me)?;
        let health = self.parse(parts[6], "planet health")?;
        let neighbors = self.read_neighbors()?;

        Ok(Planet::new(id, Pos::new(x, y), radius, owner, health, neighbors))
    }

    fn read_neighbors(&mut self) -> Result<Vec<PlanetId>, ProtocolError> {
        const SHAPE: &str = "'neighbors <id>*'";

        let line = self.next_line(SHAPE)?;
        let mut parts = line.split_whitespace();
        if parts.next() != Some("neighbors") {
            return Err(self.unexpected(SHAPE, line.clone()));
        }
        parts.map(|token| self.parse(token, "neighbor id")).collect()
    }

    /// `ship <x> <y> <target_id> <owner> <power>`.
    fn read_ship(&mut self, me: PlayerId) -> Result<Ship, ProtocolError> {
        const SHAPE: &str = "'ship <x> <y> <target_id> <owner> <power>'";

        let line = self.next_line(SHAPE)?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 6 || parts[0] != "ship" {
            return Err(self.unexpected(SHAPE, line.clone()));
        }

        let x = self.parse(parts[1], "ship x")?;
        let y = self.parse(parts[2], "ship y")?;
        let target = self.parse(parts[3], "ship target")?;
        let owner = self.parse_owner(parts[4], me)?;
        let power = self.parse(parts[5], "ship power")?;

        Ok(Ship::new(Pos::new(x, y), target, owner, power))
    }

    /// `<key> <value>`.
    fn read_value<T: FromStr>(&mut self, key: &'static str) -> Result<T, ProtocolError> {
        let line = self.next_line(key)?;
        self.value_of(&line, key)
    }

    fn value_of<T: FromStr>(&self, line: &str, key: &'static str) -> Result<T, ProtocolError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 || parts[0] != key {
            return Err(self.unexpected(key, line.to_string()));
        }
        self.parse(parts[1], key)
    }

    fn parse_owner(&self, token: &str, me: PlayerId) -> Result<Owner, ProtocolError> {
        if token == NEUTRAL {
            return Ok(Owner::Neutral);
        }
        let id = self.parse(token, "owner")?;
        Ok(Owner::from_player(Some(id), me))
    }

    fn parse<T: FromStr>(&self, token: &str, field: &'static str) -> Result<T, ProtocolError> {
        token.parse().map_err(|_| ProtocolError::InvalidValue {
            line: self.line_no,
            field,
            token: token.to_string(),
        })
    }

    fn next_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(line?)
            }
            None => Err(ProtocolError::UnexpectedEof { expected }),
        }
    }

    fn unexpected(&self, expected: &'static str, found: String) -> ProtocolError {
        ProtocolError::UnexpectedLine {
            line: self.line_no,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GraphError;

    const SETTINGS: &str = "seed 42\nnum-players 2\nplayer-id 1\n";

    fn reader(input: &str) -> Reader<&[u8]> {
        Reader::new(input.as_bytes())
    }

    #[test]
    fn test_read_settings() {
        let mut r = reader("seed -7\nnum-players 2\nplayer-id 1\n");
        let settings = r.read_settings().unwrap();
        assert_eq!(settings, GameSettings::new(-7, 2, 1));
        assert_eq!(r.line_number(), 3);
    }

    #[test]
    fn test_settings_out_of_order() {
        let mut r = reader("num-players 2\nseed 1\nplayer-id 1\n");
        let err = r.read_settings().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedLine {
                line: 1,
                expected: "seed",
                ..
            }
        ));
    }

    #[test]
    fn test_settings_invalid_value() {
        let mut r = reader("seed 1\nnum-players two\nplayer-id 1\n");
        let err = r.read_settings().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidValue {
                line: 2,
                field: "num-players",
                ..
            }
        ));
    }

    #[test]
    fn test_read_turn() {
        let input = "turn-init\n\
                     num-planets 2\n\
                     planet 0 10 20 5 1 12.5\n\
                     neighbors 1\n\
                     planet 1 30.5 20 4 neutral 3\n\
                     neighbors 0\n\
                     num-ships 1\n\
                     ship 15 20 1 0 2.25\n\
                     turn-start\n";
        let settings = GameSettings::new(42, 2, 1);
        let mut r = reader(input);
        let turn = r.next_turn(&settings).unwrap().unwrap();

        assert_eq!(turn.planets.len(), 2);
        let home = &turn.planets[0];
        assert_eq!(home.id, 0);
        assert_eq!(home.owner, Owner::Mine);
        assert!((home.health - 12.5).abs() < f64::EPSILON);
        assert_eq!(home.neighbors, vec![1]);

        let other = &turn.planets[1];
        assert_eq!(other.owner, Owner::Neutral);
        assert!((other.pos.x - 30.5).abs() < f64::EPSILON);

        assert_eq!(turn.ships.len(), 1);
        assert_eq!(turn.ships[0].owner, Owner::Enemy(0));
        assert_eq!(turn.ships[0].target, 1);
    }

    #[test]
    fn test_planet_without_neighbors() {
        let input = "turn-init\nnum-planets 1\nplanet 3 0 0 1 neutral 1\nneighbors\nnum-ships 0\nturn-start\n";
        let settings = GameSettings::new(0, 2, 0);
        let turn = reader(input).next_turn(&settings).unwrap().unwrap();
        assert!(turn.planets[0].neighbors.is_empty());
    }

    #[test]
    fn test_game_end() {
        let settings = GameSettings::new(0, 2, 0);
        assert!(reader("game-end\n").next_turn(&settings).unwrap().is_none());
    }

    #[test]
    fn test_header_game_end_first() {
        let mut r = reader("game-end\n");
        assert!(r.read_header().unwrap().is_none());
        assert_eq!(r.line_number(), 1);
    }

    #[test]
    fn test_read_settings_rejects_game_end() {
        let err = reader("game-end\n").read_settings().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedLine {
                line: 1,
                expected: "seed",
                ..
            }
        ));
    }

    #[test]
    fn test_header_still_checks_records() {
        let err = reader("seed x\nnum-players 2\nplayer-id 1\n").read_header().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidValue {
                line: 1,
                field: "seed",
                ..
            }
        ));
    }

    #[test]
    fn test_huge_planet_count_is_eof() {
        let input = "turn-init\nnum-planets 18446744073709551615\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_huge_ship_count_is_eof() {
        let input = "turn-init\nnum-planets 0\nnum-ships 1000000000000\nship 0 0 0 0 1\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_settings_then_game_end() {
        let input = format!("{SETTINGS}game-end\n");
        let mut r = reader(&input);
        let settings = r.read_settings().unwrap();
        assert!(r.next_turn(&settings).unwrap().is_none());
    }

    #[test]
    fn test_unexpected_keyword_instead_of_turn_init() {
        let settings = GameSettings::new(0, 2, 0);
        let err = reader("turn-start\n").next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedLine { line: 1, .. }));
    }

    #[test]
    fn test_wrong_planet_token_count() {
        let input = "turn-init\nnum-planets 1\nplanet 0 0 0 1 neutral\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedLine { line: 3, .. }));
    }

    #[test]
    fn test_missing_neighbors_record() {
        let input = "turn-init\nnum-planets 1\nplanet 0 0 0 1 neutral 1\nnum-ships 0\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedLine { line: 4, .. }));
    }

    #[test]
    fn test_invalid_owner() {
        let input = "turn-init\nnum-planets 1\nplanet 0 0 0 1 nobody 1\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidValue { field: "owner", .. }));
    }

    #[test]
    fn test_missing_turn_start() {
        let input = "turn-init\nnum-planets 0\nnum-ships 0\nend-turn\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedLine {
                expected: "'turn-start'",
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_turn() {
        let input = "turn-init\nnum-planets 2\nplanet 0 0 0 1 neutral 1\nneighbors\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_dangling_neighbor() {
        let input = "turn-init\nnum-planets 1\nplanet 0 0 0 1 neutral 1\nneighbors 9\nnum-ships 0\nturn-start\n";
        let settings = GameSettings::new(0, 2, 0);
        let err = reader(input).next_turn(&settings).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Graph {
                line: 6,
                error: GraphError::UnknownNeighbor {
                    planet: 0,
                    neighbor: 9
                }
            }
        ));
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "turn-init\r\nnum-planets 0\r\nnum-ships 0\r\nturn-start\r\n";
        let settings = GameSettings::new(0, 2, 0);
        let turn = reader(input).next_turn(&settings).unwrap().unwrap();
        assert!(turn.planets.is_empty());
    }
}
