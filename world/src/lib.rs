#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Harvest Defence.
//!
//! The world owns the field grid, the player, the wallet, and the raider
//! roster. All mutation flows through [`apply`], which executes one
//! [`Command`] deterministically and appends the resulting [`Event`]s to the
//! caller's buffer. Read access goes through the [`query`] module.

mod field;
mod wallet;

pub use field::FieldGrid;
pub use wallet::{InsufficientFunds, Wallet};

use std::time::Duration;

use harvest_defence_core::{
    Coins, Command, CropKind, CropStage, Direction, Event, FertilizeError, HarvestTally,
    PlantError, PlantedCrop, RaiderId, TileCoord, TileState, WELCOME_BANNER,
};

const DEFAULT_FIELD_COLUMNS: u32 = 8;
const DEFAULT_FIELD_ROWS: u32 = 6;
const STARTING_BALANCE: Coins = Coins::new(25);
const FERTILIZER_COST: Coins = Coins::new(5);

/// Minimum simulated time a raider must accrue between successive hops.
pub const HOP_INTERVAL: Duration = Duration::from_millis(600);

/// Represents the authoritative Harvest Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    field: FieldGrid,
    player: Player,
    wallet: Wallet,
    raiders: Vec<Raider>,
    next_raider_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a new world with the standard 8x6 field and starting wallet.
    #[must_use]
    pub fn new() -> Self {
        Self::with_field(DEFAULT_FIELD_COLUMNS, DEFAULT_FIELD_ROWS)
    }

    /// Creates a world over a custom field size. Gameplay uses the standard
    /// dimensions; this constructor exists for exercising edge cases such as
    /// single-tile fields.
    #[must_use]
    pub fn with_field(columns: u32, rows: u32) -> Self {
        Self {
            banner: WELCOME_BANNER,
            field: FieldGrid::new(columns, rows),
            player: Player::new(),
            wallet: Wallet::with_balance(STARTING_BALANCE),
            raiders: Vec::new(),
            next_raider_id: 0,
            tick_index: 0,
        }
    }

    fn raider_index(&self, raider: RaiderId) -> Option<usize> {
        self.raiders.iter().position(|entry| entry.id == raider)
    }

    fn advance_time(&mut self, dt: Duration) {
        for tile in self.field.tiles_mut() {
            if let TileState::Planted(crop) = tile {
                if crop.stage.is_ripe() {
                    continue;
                }
                let boost = if crop.fertilized { 2 } else { 1 };
                crop.growth = crop.growth.saturating_add(dt * boost);
            }
        }

        for raider in &mut self.raiders {
            raider.accumulator = raider.accumulator.saturating_add(dt);
        }
    }

    fn activate_tile(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player.cell;
        match *self.field.tile(cell) {
            TileState::Empty => {
                let kind = self.player.selected;
                let definition = kind.definition();
                match self.wallet.charge(definition.seed_cost) {
                    Ok(()) => {
                        self.field.set(
                            cell,
                            TileState::Planted(PlantedCrop {
                                kind,
                                stage: CropStage::Sown,
                                growth: Duration::ZERO,
                                fertilized: false,
                            }),
                        );
                        out_events.push(Event::CropPlanted { cell, kind });
                    }
                    Err(InsufficientFunds) => {
                        out_events.push(Event::PlantRejected {
                            cell,
                            kind,
                            reason: PlantError::InsufficientFunds,
                        });
                    }
                }
            }
            TileState::Planted(crop) if crop.stage.is_ripe() => {
                let payout = crop.kind.definition().payout;
                self.wallet.credit(payout);
                self.player.harvested.record(crop.kind);
                self.field.set(cell, TileState::Empty);
                out_events.push(Event::CropHarvested {
                    cell,
                    kind: crop.kind,
                    payout,
                });
            }
            TileState::Planted(_) => {
                // Still growing: nothing changes, but the shell gets told why.
                out_events.push(Event::PlantRejected {
                    cell,
                    kind: self.player.selected,
                    reason: PlantError::Occupied,
                });
            }
        }
    }

    fn fertilize_tile(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.player.cell;
        let fertilizable = match self.field.tile(cell) {
            TileState::Planted(crop) => !crop.stage.is_ripe() && !crop.fertilized,
            TileState::Empty => false,
        };
        if !fertilizable {
            out_events.push(Event::FertilizeRejected {
                cell,
                reason: FertilizeError::NotFertilizable,
            });
            return;
        }

        if self.wallet.charge(FERTILIZER_COST).is_err() {
            out_events.push(Event::FertilizeRejected {
                cell,
                reason: FertilizeError::InsufficientFunds,
            });
            return;
        }

        if let TileState::Planted(crop) = self.field.tile_mut(cell) {
            crop.fertilized = true;
            let kind = crop.kind;
            out_events.push(Event::CropFertilized { cell, kind });
        }
    }

    fn advance_crop(&mut self, cell: TileCoord, stage: CropStage, out_events: &mut Vec<Event>) {
        let cell = self.field.wrapped(i64::from(cell.column()), i64::from(cell.row()));
        if let TileState::Planted(crop) = self.field.tile_mut(cell) {
            // Stale or out-of-order proposals are dropped without effect so
            // the stage sequence stays strictly increasing.
            if crop.stage.successor() != Some(stage) {
                return;
            }
            if crop.growth < crop.kind.definition().stage_threshold(stage) {
                return;
            }

            crop.stage = stage;
            let kind = crop.kind;
            out_events.push(Event::CropStageAdvanced { cell, kind, stage });
            if stage.is_ripe() {
                out_events.push(Event::CropRipened { cell, kind });
            }
        }
    }

    fn spawn_raider(&mut self, cell: TileCoord, head_start: Duration, out_events: &mut Vec<Event>) {
        let cell = self.field.wrapped(i64::from(cell.column()), i64::from(cell.row()));
        let id = RaiderId::new(self.next_raider_id);
        self.next_raider_id = self.next_raider_id.saturating_add(1);
        self.raiders.push(Raider {
            id,
            cell,
            accumulator: head_start.min(HOP_INTERVAL),
        });
        out_events.push(Event::RaiderSpawned { raider: id, cell });
    }

    fn hop_raider(&mut self, raider: RaiderId, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(index) = self.raider_index(raider) else {
            return;
        };

        let from = self.raiders[index].cell;
        if self.raiders[index].accumulator < HOP_INTERVAL {
            return;
        }

        let to = self.field.neighbor(from, direction);
        self.raiders[index].cell = to;
        self.raiders[index].accumulator =
            self.raiders[index].accumulator.saturating_sub(HOP_INTERVAL);
        out_events.push(Event::RaiderHopped { raider, from, to });

        if let TileState::Planted(crop) = *self.field.tile(to) {
            if crop.stage.is_ripe() {
                self.field.set(to, TileState::Empty);
                let _ = self.raiders.remove(index);
                out_events.push(Event::CropEaten {
                    cell: to,
                    kind: crop.kind,
                    raider,
                });
                out_events.push(Event::RaiderDespawned { raider });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.advance_time(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { direction } => {
            let from = world.player.cell;
            let to = world.field.neighbor(from, direction);
            world.player.cell = to;
            out_events.push(Event::PlayerMoved { from, to });
        }
        Command::SelectSeed { slot } => match CropKind::from_slot(slot) {
            Ok(kind) => {
                world.player.selected = kind;
                out_events.push(Event::SeedSelected { kind });
            }
            Err(reason) => {
                out_events.push(Event::SeedSelectionRejected { slot, reason });
            }
        },
        Command::ActivateTile => world.activate_tile(out_events),
        Command::Fertilize => world.fertilize_tile(out_events),
        Command::AdvanceCrop { cell, stage } => world.advance_crop(cell, stage, out_events),
        Command::SpawnRaider { cell, head_start } => {
            world.spawn_raider(cell, head_start, out_events);
        }
        Command::HopRaider { raider, direction } => {
            world.hop_raider(raider, direction, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use harvest_defence_core::{FieldView, PlayerSnapshot, RaiderSnapshot, RaiderView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures a read-only view of every field tile.
    #[must_use]
    pub fn field_view(world: &World) -> FieldView {
        FieldView::from_tiles(
            world.field.columns(),
            world.field.rows(),
            world.field.tiles().to_vec(),
        )
    }

    /// Captures a read-only view of the raiders on the field.
    #[must_use]
    pub fn raider_view(world: &World) -> RaiderView {
        RaiderView::from_snapshots(
            world
                .raiders
                .iter()
                .map(|raider| RaiderSnapshot {
                    id: raider.id,
                    cell: raider.cell,
                    ready_to_hop: raider.accumulator >= super::HOP_INTERVAL,
                    accumulated: raider.accumulator,
                })
                .collect(),
        )
    }

    /// Number of ticks the world has processed since construction.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only snapshot of the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            selected: world.player.selected,
            wallet: world.wallet.balance(),
            harvested: world.player.harvested,
        }
    }
}

#[derive(Debug)]
struct Player {
    cell: TileCoord,
    selected: CropKind,
    harvested: HarvestTally,
}

impl Player {
    fn new() -> Self {
        Self {
            cell: TileCoord::new(0, 0),
            selected: CropKind::Corn,
            harvested: HarvestTally::new(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Raider {
    id: RaiderId,
    cell: TileCoord,
    accumulator: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_defence_core::{Direction, SeedSlot, UnknownCropKind};

    fn planted(world: &World, cell: TileCoord) -> PlantedCrop {
        match query::field_view(world).tile(cell) {
            Some(TileState::Planted(crop)) => *crop,
            other => panic!("expected planted tile at {cell:?}, found {other:?}"),
        }
    }

    fn plant_selected(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::ActivateTile, &mut events);
        events
    }

    fn ripen_tile(world: &mut World, cell: TileCoord) {
        let kind = planted(world, cell).kind;
        let grow_time = kind.definition().grow_time;
        let mut events = Vec::new();
        apply(world, Command::Tick { dt: grow_time }, &mut events);
        for stage in [CropStage::Sprouting, CropStage::Growing, CropStage::Ripe] {
            apply(world, Command::AdvanceCrop { cell, stage }, &mut events);
        }
        assert!(query::field_view(world)
            .tile(cell)
            .expect("tile inside grid")
            .is_ripe());
    }

    #[test]
    fn planting_charges_the_seed_cost() {
        let mut world = World::new();
        let events = plant_selected(&mut world);

        assert_eq!(query::player(&world).wallet, Coins::new(20));
        let crop = planted(&world, TileCoord::new(0, 0));
        assert_eq!(crop.kind, CropKind::Corn);
        assert_eq!(crop.stage, CropStage::Sown);
        assert!(!crop.fertilized);
        assert_eq!(
            events,
            vec![Event::CropPlanted {
                cell: TileCoord::new(0, 0),
                kind: CropKind::Corn,
            }]
        );
    }

    #[test]
    fn planting_without_funds_is_rejected_without_mutation() {
        let mut world = World::new();
        // Burn the wallet down with five corn plantings across the top row.
        for _ in 0..5 {
            let _ = plant_selected(&mut world);
            let mut events = Vec::new();
            apply(
                &mut world,
                Command::MovePlayer {
                    direction: Direction::East,
                },
                &mut events,
            );
        }
        assert_eq!(query::player(&world).wallet, Coins::new(0));

        let events = plant_selected(&mut world);
        assert_eq!(
            events,
            vec![Event::PlantRejected {
                cell: TileCoord::new(5, 0),
                kind: CropKind::Corn,
                reason: PlantError::InsufficientFunds,
            }]
        );
        assert!(query::field_view(&world)
            .tile(TileCoord::new(5, 0))
            .expect("tile inside grid")
            .is_empty());
        assert_eq!(query::player(&world).wallet, Coins::new(0));
    }

    #[test]
    fn activating_a_growing_tile_changes_nothing() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        let before = planted(&world, TileCoord::new(0, 0));
        let wallet_before = query::player(&world).wallet;

        let events = plant_selected(&mut world);

        assert_eq!(
            events,
            vec![Event::PlantRejected {
                cell: TileCoord::new(0, 0),
                kind: CropKind::Corn,
                reason: PlantError::Occupied,
            }]
        );
        assert_eq!(planted(&world, TileCoord::new(0, 0)), before);
        assert_eq!(query::player(&world).wallet, wallet_before);
    }

    #[test]
    fn harvesting_credits_the_payout_and_clears_the_tile() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        ripen_tile(&mut world, TileCoord::new(0, 0));

        let events = plant_selected(&mut world);

        assert_eq!(
            events,
            vec![Event::CropHarvested {
                cell: TileCoord::new(0, 0),
                kind: CropKind::Corn,
                payout: Coins::new(12),
            }]
        );
        assert!(query::field_view(&world)
            .tile(TileCoord::new(0, 0))
            .expect("tile inside grid")
            .is_empty());
        let player = query::player(&world);
        assert_eq!(player.wallet, Coins::new(32));
        assert_eq!(player.harvested.count(CropKind::Corn), 1);
    }

    #[test]
    fn seed_selection_guards_unknown_slots() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SelectSeed {
                slot: SeedSlot::new(4),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).selected, CropKind::Bean);

        events.clear();
        apply(
            &mut world,
            Command::SelectSeed {
                slot: SeedSlot::new(9),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::SeedSelectionRejected {
                slot: SeedSlot::new(9),
                reason: UnknownCropKind { slot: 9 },
            }]
        );
        assert_eq!(query::player(&world).selected, CropKind::Bean);
    }

    #[test]
    fn player_movement_wraps_at_every_edge() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::North,
            },
            &mut events,
        );
        assert_eq!(query::player(&world).cell, TileCoord::new(0, 5));
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::West,
            },
            &mut events,
        );
        assert_eq!(query::player(&world).cell, TileCoord::new(7, 5));
        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: TileCoord::new(0, 0),
                    to: TileCoord::new(0, 5),
                },
                Event::PlayerMoved {
                    from: TileCoord::new(0, 5),
                    to: TileCoord::new(7, 5),
                },
            ]
        );
    }

    #[test]
    fn growth_accrues_each_tick_and_doubles_when_fertilized() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(10),
            },
            &mut events,
        );
        assert_eq!(
            planted(&world, TileCoord::new(0, 0)).growth,
            Duration::from_secs(10)
        );

        apply(&mut world, Command::Fertilize, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(10),
            },
            &mut events,
        );
        assert_eq!(
            planted(&world, TileCoord::new(0, 0)).growth,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn advance_crop_validates_stage_order_and_threshold() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        let cell = TileCoord::new(0, 0);
        let mut events = Vec::new();

        // No growth accrued yet: the proposal is premature and dropped.
        apply(
            &mut world,
            Command::AdvanceCrop {
                cell,
                stage: CropStage::Sprouting,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(planted(&world, cell).stage, CropStage::Sown);

        // Skipping a stage is dropped even with plenty of growth.
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(120),
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::AdvanceCrop {
                cell,
                stage: CropStage::Growing,
            },
            &mut events,
        );
        assert!(events.is_empty());

        apply(
            &mut world,
            Command::AdvanceCrop {
                cell,
                stage: CropStage::Sprouting,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CropStageAdvanced {
                cell,
                kind: CropKind::Corn,
                stage: CropStage::Sprouting,
            }]
        );
    }

    #[test]
    fn reaching_ripe_emits_the_ripened_event() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        let cell = TileCoord::new(0, 0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(240),
            },
            &mut events,
        );
        events.clear();
        for stage in [CropStage::Sprouting, CropStage::Growing, CropStage::Ripe] {
            apply(&mut world, Command::AdvanceCrop { cell, stage }, &mut events);
        }

        assert!(events.contains(&Event::CropRipened {
            cell,
            kind: CropKind::Corn,
        }));
        // Ripe is terminal: further proposals are dropped.
        events.clear();
        apply(
            &mut world,
            Command::AdvanceCrop {
                cell,
                stage: CropStage::Ripe,
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn fertilize_rejects_empty_ripe_and_boosted_tiles() {
        let mut world = World::new();
        let cell = TileCoord::new(0, 0);
        let mut events = Vec::new();

        apply(&mut world, Command::Fertilize, &mut events);
        assert_eq!(
            events,
            vec![Event::FertilizeRejected {
                cell,
                reason: FertilizeError::NotFertilizable,
            }]
        );

        let _ = plant_selected(&mut world);
        events.clear();
        apply(&mut world, Command::Fertilize, &mut events);
        assert_eq!(
            events,
            vec![Event::CropFertilized {
                cell,
                kind: CropKind::Corn,
            }]
        );
        assert_eq!(query::player(&world).wallet, Coins::new(15));

        // Re-fertilizing an already boosted crop is rejected without charge.
        events.clear();
        apply(&mut world, Command::Fertilize, &mut events);
        assert_eq!(
            events,
            vec![Event::FertilizeRejected {
                cell,
                reason: FertilizeError::NotFertilizable,
            }]
        );
        assert_eq!(query::player(&world).wallet, Coins::new(15));

        ripen_tile(&mut world, cell);
        events.clear();
        apply(&mut world, Command::Fertilize, &mut events);
        assert_eq!(
            events,
            vec![Event::FertilizeRejected {
                cell,
                reason: FertilizeError::NotFertilizable,
            }]
        );
    }

    #[test]
    fn fertilize_requires_funds_after_validation() {
        let mut world = World::new();
        // Wallet 25: corn (5) + cabbage (6) + broccoli (7) + bean (3) = 21,
        // leaving 4: enough to plant, too little to fertilize.
        for slot in [1u8, 5, 6, 4] {
            let mut events = Vec::new();
            apply(
                &mut world,
                Command::SelectSeed {
                    slot: SeedSlot::new(slot),
                },
                &mut events,
            );
            apply(&mut world, Command::ActivateTile, &mut events);
            apply(
                &mut world,
                Command::MovePlayer {
                    direction: Direction::East,
                },
                &mut events,
            );
        }
        assert_eq!(query::player(&world).wallet, Coins::new(4));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::West,
            },
            &mut events,
        );
        events.clear();
        apply(&mut world, Command::Fertilize, &mut events);
        assert_eq!(
            events,
            vec![Event::FertilizeRejected {
                cell: TileCoord::new(3, 0),
                reason: FertilizeError::InsufficientFunds,
            }]
        );
        assert_eq!(query::player(&world).wallet, Coins::new(4));
        assert!(!planted(&world, TileCoord::new(3, 0)).fertilized);
    }

    #[test]
    fn spawned_raiders_receive_ids_in_order() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnRaider {
                cell: TileCoord::new(3, 2),
                head_start: Duration::ZERO,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnRaider {
                cell: TileCoord::new(1, 4),
                head_start: Duration::from_millis(300),
            },
            &mut events,
        );

        let raiders = query::raider_view(&world).into_vec();
        assert_eq!(raiders.len(), 2);
        assert_eq!(raiders[0].id, RaiderId::new(0));
        assert_eq!(raiders[1].id, RaiderId::new(1));
        assert_eq!(raiders[1].accumulated, Duration::from_millis(300));
        assert!(!raiders[0].ready_to_hop);
    }

    #[test]
    fn hops_wait_for_the_hop_interval() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnRaider {
                cell: TileCoord::new(3, 2),
                head_start: Duration::ZERO,
            },
            &mut events,
        );

        events.clear();
        apply(
            &mut world,
            Command::HopRaider {
                raider: RaiderId::new(0),
                direction: Direction::East,
            },
            &mut events,
        );
        assert!(events.is_empty(), "hop before the interval must be dropped");

        apply(&mut world, Command::Tick { dt: HOP_INTERVAL }, &mut events);
        events.clear();
        apply(
            &mut world,
            Command::HopRaider {
                raider: RaiderId::new(0),
                direction: Direction::East,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::RaiderHopped {
                raider: RaiderId::new(0),
                from: TileCoord::new(3, 2),
                to: TileCoord::new(4, 2),
            }]
        );
        let raiders = query::raider_view(&world).into_vec();
        assert_eq!(raiders[0].accumulated, Duration::ZERO);
    }

    #[test]
    fn a_raider_landing_on_a_ripe_crop_consumes_it_and_despawns() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        ripen_tile(&mut world, TileCoord::new(0, 0));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnRaider {
                cell: TileCoord::new(1, 0),
                head_start: HOP_INTERVAL,
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::HopRaider {
                raider: RaiderId::new(0),
                direction: Direction::West,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::RaiderHopped {
                    raider: RaiderId::new(0),
                    from: TileCoord::new(1, 0),
                    to: TileCoord::new(0, 0),
                },
                Event::CropEaten {
                    cell: TileCoord::new(0, 0),
                    kind: CropKind::Corn,
                    raider: RaiderId::new(0),
                },
                Event::RaiderDespawned {
                    raider: RaiderId::new(0),
                },
            ]
        );
        assert!(query::field_view(&world)
            .tile(TileCoord::new(0, 0))
            .expect("tile inside grid")
            .is_empty());
        assert!(query::raider_view(&world).is_empty());
    }

    #[test]
    fn a_raider_landing_on_a_growing_crop_leaves_it_alone() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnRaider {
                cell: TileCoord::new(1, 0),
                head_start: HOP_INTERVAL,
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::HopRaider {
                raider: RaiderId::new(0),
                direction: Direction::West,
            },
            &mut events,
        );

        assert_eq!(events.len(), 1, "hop only, no consumption");
        assert!(!query::field_view(&world)
            .tile(TileCoord::new(0, 0))
            .expect("tile inside grid")
            .is_empty());
        assert_eq!(query::raider_view(&world).len(), 1);
    }

    #[test]
    fn ripe_crops_stop_accruing_growth() {
        let mut world = World::new();
        let _ = plant_selected(&mut world);
        let cell = TileCoord::new(0, 0);
        ripen_tile(&mut world, cell);
        let ripe_growth = planted(&world, cell).growth;

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(60),
            },
            &mut events,
        );
        assert_eq!(planted(&world, cell).growth, ripe_growth);
        assert_eq!(planted(&world, cell).stage, CropStage::Ripe);
    }
}
