#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Raider management system: reactive spawns and random-walk hops.
//!
//! Raiders exist only because crops ripen. Every [`Event::CropRipened`]
//! produces exactly one spawn proposal at a uniformly random tile other than
//! the ripened one; every raider whose hop timer elapsed gets a hop proposal
//! in a uniformly random cardinal direction. The walk is deliberately
//! memoryless; raiders do not pursue crops, they stumble into them.
//!
//! All randomness flows through a single seeded stream injected via
//! [`Config`], so identical seeds replay identical raids.

use std::time::Duration;

use harvest_defence_core::{Command, Direction, Event, FieldView, RaiderView, TileCoord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the raider system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    hop_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided hop cadence and seed.
    ///
    /// The hop interval is only used to draw each raider's first-hop head
    /// start; the world enforces the actual hop gate.
    #[must_use]
    pub const fn new(hop_interval: Duration, rng_seed: u64) -> Self {
        Self {
            hop_interval,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits raider spawn and hop commands.
#[derive(Debug)]
pub struct Raiders {
    hop_interval: Duration,
    rng: ChaCha8Rng,
}

impl Raiders {
    /// Creates a new raider system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            hop_interval: config.hop_interval,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and immutable views to emit raider commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        field: &FieldView,
        raiders: &RaiderView,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::CropRipened { cell, .. } = event {
                if let Some(spawn) = self.select_spawn_cell(field, *cell) {
                    let head_start = self.first_hop_head_start();
                    out.push(Command::SpawnRaider {
                        cell: spawn,
                        head_start,
                    });
                }
            }
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for snapshot in raiders.iter() {
            if !snapshot.ready_to_hop {
                continue;
            }
            let direction = self.random_direction();
            out.push(Command::HopRaider {
                raider: snapshot.id,
                direction,
            });
        }
    }

    /// Draws a spawn tile uniformly from every tile except the ripened one.
    ///
    /// The draw is exact: the excluded tile is removed from the candidate
    /// set rather than rejected-and-retried. A field with a single tile has
    /// no candidates, so the spawn is skipped silently.
    fn select_spawn_cell(&mut self, field: &FieldView, exclude: TileCoord) -> Option<TileCoord> {
        let (columns, rows) = field.dimensions();
        let total_u64 = u64::from(columns) * u64::from(rows);
        let total = usize::try_from(total_u64).unwrap_or(0);
        if total <= 1 {
            return None;
        }

        let excluded = usize::try_from(
            u64::from(exclude.row()) * u64::from(columns) + u64::from(exclude.column()),
        )
        .unwrap_or(0)
        .min(total - 1);

        let draw = self.rng.gen_range(0..total - 1);
        let index = if draw >= excluded { draw + 1 } else { draw };

        let column = (index % columns as usize) as u32;
        let row = (index / columns as usize) as u32;
        Some(TileCoord::new(column, row))
    }

    fn first_hop_head_start(&mut self) -> Duration {
        let interval_nanos = u64::try_from(self.hop_interval.as_nanos()).unwrap_or(u64::MAX);
        if interval_nanos == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.rng.gen_range(0..interval_nanos))
    }

    fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }
}
