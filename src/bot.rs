//! The turn loop.
//!
//! Reads settings once, then for every turn: read the block, index it, let
//! the policy decide, write the orders and `end-turn`. Single threaded and
//! blocking; nothing survives from one turn to the next.

use std::io::{BufRead, Write};

use crate::engine::{Policy, TurnView};
use crate::error::{BotError, ConfigError};
use crate::game::{GameSettings, Turn};
use crate::protocol::{self, ProtocolError, Reader};

/// What happened during a finished match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Settings the match was played with, `None` if it ended before they
    /// were sent.
    pub settings: Option<GameSettings>,
    /// Turns answered.
    pub turns: u32,
    /// Orders sent over all turns.
    pub orders: u64,
}

/// A bot playing one match with a fixed policy.
#[derive(Debug)]
pub struct Bot {
    policy: Box<dyn Policy>,
    annotate: bool,
}

impl Bot {
    /// Create a bot around a policy.
    #[must_use]
    pub fn new(policy: Box<dyn Policy>) -> Self {
        Self {
            policy,
            annotate: false,
        }
    }

    /// Write a `#` comment line summarizing each turn.
    #[must_use]
    pub fn with_annotations(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// The policy in use.
    #[must_use]
    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    /// Play a whole match.
    ///
    /// Returns when the engine sends `game-end`, which may also come in
    /// place of the settings header.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings header is missing or
    /// invalid, a protocol error on malformed input, and an output error if
    /// orders cannot be written. All of them end the match.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<MatchSummary, BotError> {
        let mut reader = Reader::new(input);
        let Some(settings) = reader.read_header().map_err(ConfigError::Settings)? else {
            tracing::info!("match ended before settings were sent");
            return Ok(MatchSummary::default());
        };
        settings.validate().map_err(ConfigError::InvalidSettings)?;

        tracing::info!(
            seed = settings.seed,
            players = settings.num_players,
            player_id = settings.player_id,
            policy = %self.policy.kind(),
            "match started"
        );

        let mut summary = MatchSummary {
            settings: Some(settings),
            turns: 0,
            orders: 0,
        };

        while let Some(turn) = reader.next_turn(&settings)? {
            summary.turns += 1;
            let span = tracing::debug_span!("turn", number = summary.turns);
            let _enter = span.enter();

            let sent = self.play_turn(&settings, &turn, output).map_err(|e| match e {
                TurnError::Graph(error) => BotError::Protocol(ProtocolError::Graph {
                    line: reader.line_number(),
                    error,
                }),
                TurnError::Output(e) => BotError::Output(e),
            })?;
            summary.orders += sent as u64;
        }

        tracing::info!(turns = summary.turns, orders = summary.orders, "match finished");
        Ok(summary)
    }

    /// Answer a single turn and return the number of orders sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn is not a valid graph or writing fails.
    pub fn play_turn<W: Write>(
        &self,
        settings: &GameSettings,
        turn: &Turn,
        output: &mut W,
    ) -> Result<usize, TurnError> {
        let view = TurnView::new(settings, turn).map_err(TurnError::Graph)?;
        let orders = self.policy.decide(&view);

        let sent = protocol::write_orders(output, &orders).map_err(TurnError::Output)?;
        if self.annotate {
            let note = format!("{}: {sent} orders", self.policy.kind());
            protocol::write_comment(output, &note).map_err(TurnError::Output)?;
        }
        protocol::write_end_turn(output).map_err(TurnError::Output)?;

        tracing::debug!(
            planets = turn.planets.len(),
            ships = turn.ships.len(),
            mine = turn.my_planets().count(),
            orders = sent,
            "turn answered"
        );
        Ok(sent)
    }
}

/// Why a single turn could not be answered.
#[derive(Debug)]
pub enum TurnError {
    /// The turn's planets do not form a valid graph.
    Graph(crate::game::GraphError),
    /// Writing to the engine failed.
    Output(std::io::Error),
}

impl std::fmt::Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "invalid turn: {e}"),
            Self::Output(e) => write!(f, "failed to write orders: {e}"),
        }
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NearestFrontier;

    fn bot() -> Bot {
        Bot::new(Box::new(NearestFrontier::default()))
    }

    fn play(bot: &Bot, input: &str) -> (Result<MatchSummary, BotError>, String) {
        let mut output = Vec::new();
        let result = bot.run(input.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    const ONE_TURN: &str = "seed 1\nnum-players 2\nplayer-id 0\n\
                            turn-init\nnum-planets 2\n\
                            planet 0 0 0 1 0 5\nneighbors 1\n\
                            planet 1 1 0 1 1 3\nneighbors 0\n\
                            num-ships 0\nturn-start\n\
                            game-end\n";

    #[test]
    fn test_single_turn() {
        let (result, output) = play(&bot(), ONE_TURN);
        let summary = result.unwrap();

        assert_eq!(output, "send-ship 3.999997 0 1\nend-turn\n");
        assert_eq!(summary.turns, 1);
        assert_eq!(summary.orders, 1);
        assert_eq!(summary.settings, Some(GameSettings::new(1, 2, 0)));
    }

    #[test]
    fn test_annotations() {
        let (result, output) = play(&bot().with_annotations(true), ONE_TURN);
        assert!(result.is_ok());
        assert_eq!(output, "send-ship 3.999997 0 1\n# nearest: 1 orders\nend-turn\n");
    }

    #[test]
    fn test_game_end_before_settings() {
        let (result, output) = play(&bot(), "game-end\n");
        assert_eq!(result.unwrap(), MatchSummary::default());
        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_settings_is_config_error() {
        let (result, output) = play(&bot(), "turn-init\n");
        assert!(matches!(
            result,
            Err(BotError::Config(ConfigError::Settings(_)))
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_zero_players_is_config_error() {
        let (result, _) = play(&bot(), "seed 1\nnum-players 0\nplayer-id 0\ngame-end\n");
        assert!(matches!(
            result,
            Err(BotError::Config(ConfigError::InvalidSettings(_)))
        ));
    }

    #[test]
    fn test_eof_mid_match_is_protocol_error() {
        let (result, _) = play(&bot(), "seed 1\nnum-players 2\nplayer-id 0\n");
        assert!(matches!(
            result,
            Err(BotError::Protocol(ProtocolError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_play_turn_directly() {
        let settings = GameSettings::new(0, 2, 0);
        let turn = Turn::default();
        let mut output = Vec::new();
        let sent = bot().play_turn(&settings, &turn, &mut output).unwrap();
        assert_eq!(sent, 0);
        assert_eq!(output, b"end-turn\n");
    }
}
