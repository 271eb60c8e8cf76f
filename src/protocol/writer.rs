//! Protocol output, both directions.
//!
//! The bot only needs the order side. The engine side (settings and turn
//! blocks) lets transcripts be produced from snapshots, which `inspect`
//! and the tests rely on.

use std::io::{self, Write};

use crate::game::{GameSettings, Order, Owner, PlayerId, Turn};
use crate::protocol::{END_TURN, NEUTRAL, SEND_SHIP, TURN_INIT, TURN_START};

/// Write one `send-ship` line.
///
/// Orders that are not [sendable](Order::is_sendable) are skipped and
/// `false` is returned.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_order<W: Write>(out: &mut W, order: &Order) -> io::Result<bool> {
    if !order.is_sendable() {
        return Ok(false);
    }
    writeln!(
        out,
        "{SEND_SHIP} {} {} {}",
        order.power, order.source, order.destination
    )?;
    Ok(true)
}

/// Write all sendable orders and return how many were written.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_orders<W: Write>(out: &mut W, orders: &[Order]) -> io::Result<usize> {
    let mut written = 0;
    for order in orders {
        if write_order(out, order)? {
            written += 1;
        }
    }
    Ok(written)
}

/// Write a `#` comment line, which the engine logs and otherwise ignores.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_comment<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    for line in text.lines() {
        writeln!(out, "# {line}")?;
    }
    Ok(())
}

/// Finish the bot's turn and flush.
///
/// # Errors
///
/// Returns an error if writing or flushing fails.
pub fn write_end_turn<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{END_TURN}")?;
    out.flush()
}

/// Write the settings header the engine sends before the first turn.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_settings<W: Write>(out: &mut W, settings: &GameSettings) -> io::Result<()> {
    writeln!(out, "seed {}", settings.seed)?;
    writeln!(out, "num-players {}", settings.num_players)?;
    writeln!(out, "player-id {}", settings.player_id)
}

/// Write a full turn block, from `turn-init` to `turn-start`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_turn<W: Write>(out: &mut W, turn: &Turn, settings: &GameSettings) -> io::Result<()> {
    let me = settings.player_id;

    writeln!(out, "{TURN_INIT}")?;
    writeln!(out, "num-planets {}", turn.planets.len())?;
    for planet in &turn.planets {
        writeln!(
            out,
            "planet {} {} {} {} {} {}",
            planet.id,
            planet.pos.x,
            planet.pos.y,
            planet.radius,
            owner_token(planet.owner, me),
            planet.health
        )?;
        write!(out, "neighbors")?;
        for neighbor in &planet.neighbors {
            write!(out, " {neighbor}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "num-ships {}", turn.ships.len())?;
    for ship in &turn.ships {
        writeln!(
            out,
            "ship {} {} {} {} {}",
            ship.pos.x,
            ship.pos.y,
            ship.target,
            owner_token(ship.owner, me),
            ship.power
        )?;
    }

    writeln!(out, "{TURN_START}")
}

fn owner_token(owner: Owner, me: PlayerId) -> String {
    owner
        .player(me)
        .map_or_else(|| NEUTRAL.to_string(), |id| id.to_string())
}
