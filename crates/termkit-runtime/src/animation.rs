//! Terminal "fire" animation.
//!
//! Each burst places a colored `*` at a random cursor position plus its two
//! diagonal neighbours, using raw ANSI escapes. The loop runs until its
//! cancellation token fires; with a fixed seed the spark sequence is
//! reproducible.

use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// ANSI foreground colors used for sparks (red through cyan).
pub const PALETTE: [u8; 6] = [31, 32, 33, 34, 35, 36];

pub const MAX_ROW: u16 = 40;
pub const MAX_COL: u16 = 80;

/// Delay between bursts.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(50);

/// One glyph at a 1-based cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spark {
    pub row: u16,
    pub col: u16,
    pub color: u8,
}

impl Spark {
    /// Move the cursor, set the color, print `*`, reset attributes.
    pub fn escape_sequence(&self) -> String {
        format!(
            "\x1b[{};{}H\x1b[{}m*\x1b[0m",
            self.row, self.col, self.color
        )
    }
}

/// Spark generator backed by a seedable RNG.
#[derive(Debug)]
pub struct FireAnimation {
    rng: StdRng,
}

impl FireAnimation {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng }
    }

    /// Next centre spark and its two diagonal neighbours.
    ///
    /// Neighbour coordinates never drop below 1, so every escape stays valid.
    pub fn next_burst(&mut self) -> [Spark; 3] {
        let row = self.rng.gen_range(1..=MAX_ROW);
        let col = self.rng.gen_range(1..=MAX_COL);
        let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];

        [
            Spark { row, col, color },
            Spark {
                row: row + 1,
                col: col + 1,
                color,
            },
            Spark {
                row: row.saturating_sub(1).max(1),
                col: col.saturating_sub(1).max(1),
                color,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationOptions {
    pub cadence: Duration,
    /// Stop after this many bursts; `None` runs until cancelled.
    pub max_bursts: Option<u64>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            cadence: DEFAULT_CADENCE,
            max_bursts: None,
        }
    }
}

/// Write bursts to `writer` until cancelled (or `max_bursts` is reached).
///
/// Returns the number of bursts written.
pub async fn run_fire<W>(
    writer: &mut W,
    animation: &mut FireAnimation,
    options: AnimationOptions,
    cancel: &CancellationToken,
) -> io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut bursts = 0u64;

    while !cancel.is_cancelled() && options.max_bursts.is_none_or(|max| bursts < max) {
        let mut frame = String::new();
        for spark in animation.next_burst() {
            frame.push_str(&spark.escape_sequence());
            frame.push('\n');
        }
        writer.write_all(frame.as_bytes()).await?;
        writer.flush().await?;
        bursts += 1;

        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(options.cadence) => {}
        }
    }

    debug!(bursts, "fire animation stopped");
    Ok(bursts)
}
