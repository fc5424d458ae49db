#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Harvest Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Harvest Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player one tile in the given direction, wrapping at edges.
    MovePlayer {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
    /// Selects the seed kind associated with the provided sidebar slot.
    SelectSeed {
        /// One-based slot index as shown in the seed sidebar.
        slot: SeedSlot,
    },
    /// Context-sensitive action on the player's tile: plant on empty ground,
    /// harvest a ripe crop, otherwise do nothing.
    ActivateTile,
    /// Applies fertilizer to the growing crop on the player's tile.
    Fertilize,
    /// Requests that a planted crop advance to the provided growth stage.
    AdvanceCrop {
        /// Tile holding the crop that should advance.
        cell: TileCoord,
        /// Stage the crop should transition into.
        stage: CropStage,
    },
    /// Requests that a new raider appear at the provided tile.
    SpawnRaider {
        /// Tile the raider should occupy after spawning.
        cell: TileCoord,
        /// Hop time already accrued at spawn, so first hops desynchronize.
        head_start: Duration,
    },
    /// Requests that a raider hop a single tile in the specified direction.
    HopRaider {
        /// Identifier of the raider attempting to hop.
        raider: RaiderId,
        /// Direction of travel for the attempted hop.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two tiles.
    PlayerMoved {
        /// Tile the player occupied before moving.
        from: TileCoord,
        /// Tile the player occupies after the move, wrap applied.
        to: TileCoord,
    },
    /// Confirms that a seed kind was selected.
    SeedSelected {
        /// Crop kind now armed for planting.
        kind: CropKind,
    },
    /// Reports that a seed selection request named an unknown slot.
    SeedSelectionRejected {
        /// Slot provided in the selection request.
        slot: SeedSlot,
        /// Specific reason the selection failed.
        reason: UnknownCropKind,
    },
    /// Confirms that a seed was planted on the player's tile.
    CropPlanted {
        /// Tile that now holds the freshly sown crop.
        cell: TileCoord,
        /// Kind of crop that was planted.
        kind: CropKind,
    },
    /// Reports that a plant attempt was rejected.
    PlantRejected {
        /// Tile targeted by the plant attempt.
        cell: TileCoord,
        /// Kind of crop requested for planting.
        kind: CropKind,
        /// Specific reason the plant attempt failed.
        reason: PlantError,
    },
    /// Confirms that a planted crop advanced one growth stage.
    CropStageAdvanced {
        /// Tile holding the crop that advanced.
        cell: TileCoord,
        /// Kind of crop that advanced.
        kind: CropKind,
        /// Stage the crop transitioned into.
        stage: CropStage,
    },
    /// Announces that a crop reached its ripe stage and can be harvested.
    CropRipened {
        /// Tile holding the ripe crop.
        cell: TileCoord,
        /// Kind of crop that ripened.
        kind: CropKind,
    },
    /// Confirms that the player harvested a ripe crop.
    CropHarvested {
        /// Tile that held the harvested crop.
        cell: TileCoord,
        /// Kind of crop that was harvested.
        kind: CropKind,
        /// Coins credited to the wallet for the harvest.
        payout: Coins,
    },
    /// Confirms that fertilizer was applied to a growing crop.
    CropFertilized {
        /// Tile holding the boosted crop.
        cell: TileCoord,
        /// Kind of crop that was fertilized.
        kind: CropKind,
    },
    /// Reports that a fertilize attempt was rejected.
    FertilizeRejected {
        /// Tile targeted by the fertilize attempt.
        cell: TileCoord,
        /// Specific reason the fertilize attempt failed.
        reason: FertilizeError,
    },
    /// Confirms that a raider was created in reaction to a ripened crop.
    RaiderSpawned {
        /// Identifier assigned to the newly spawned raider.
        raider: RaiderId,
        /// Tile the raider occupies after spawning.
        cell: TileCoord,
    },
    /// Confirms that a raider hopped between two tiles.
    RaiderHopped {
        /// Identifier of the raider that hopped.
        raider: RaiderId,
        /// Tile the raider occupied before hopping.
        from: TileCoord,
        /// Tile the raider occupies after the hop, wrap applied.
        to: TileCoord,
    },
    /// Announces that a raider consumed a ripe crop.
    CropEaten {
        /// Tile that held the consumed crop.
        cell: TileCoord,
        /// Kind of crop that was lost.
        kind: CropKind,
        /// Identifier of the raider that consumed the crop.
        raider: RaiderId,
    },
    /// Confirms that a raider left the field after eating its fill.
    RaiderDespawned {
        /// Identifier of the raider that despawned.
        raider: RaiderId,
    },
}

/// Cardinal movement directions shared by the player and raiders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four cardinal directions in a fixed, documented order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single field tile expressed as column and row coordinates.
///
/// Coordinates are normalized by the world's field grid before use, so a
/// value handed out by the world always lies inside the configured
/// dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Unique identifier assigned to a raider in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RaiderId(u32);

impl RaiderId {
    /// Creates a new raider identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based seed sidebar slot as typed by the player (keys 1 through 6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeedSlot(u8);

impl SeedSlot {
    /// Creates a new seed slot wrapper.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the underlying slot number.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Whole-coin currency amount used by the wallet and the crop table.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coins(u32);

impl Coins {
    /// Creates a new coin amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying coin count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two amounts, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Coins) -> Coins {
        Coins(self.0.saturating_add(other.0))
    }

    /// Subtracts an amount, returning `None` when the balance would go
    /// negative.
    #[must_use]
    pub const fn checked_sub(self, other: Coins) -> Option<Coins> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Coins(value)),
            None => None,
        }
    }
}

/// Growth phase of a planted crop, from freshly sown to harvest-ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropStage {
    /// Seed in the ground, nothing visible yet.
    Sown,
    /// First shoots above the soil.
    Sprouting,
    /// Juvenile plant, not yet worth anything.
    Growing,
    /// Harvest-ready. Terminal until harvested or eaten.
    Ripe,
}

impl CropStage {
    /// Zero-based index of the stage, matching the glyph table layout.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Sown => 0,
            Self::Sprouting => 1,
            Self::Growing => 2,
            Self::Ripe => 3,
        }
    }

    /// The next stage in the progression, or `None` for [`CropStage::Ripe`].
    #[must_use]
    pub const fn successor(self) -> Option<CropStage> {
        match self {
            Self::Sown => Some(Self::Sprouting),
            Self::Sprouting => Some(Self::Growing),
            Self::Growing => Some(Self::Ripe),
            Self::Ripe => None,
        }
    }

    /// Returns `true` when the stage is the terminal harvest-ready stage.
    #[must_use]
    pub const fn is_ripe(self) -> bool {
        matches!(self, Self::Ripe)
    }
}

/// Crop kinds available from the seed sidebar, in slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropKind {
    /// Slot 1. Slow, mid-priced, solid payout.
    Corn,
    /// Slot 2. Cheap and dependable.
    Potato,
    /// Slot 3. Quickest of the mid-tier crops.
    Tomato,
    /// Slot 4. Cheapest seed, fastest turnaround.
    Bean,
    /// Slot 5. Expensive and slow, pays accordingly.
    Cabbage,
    /// Slot 6. The long game: priciest seed, longest wait, best payout.
    Broccoli,
}

impl CropKind {
    /// Every crop kind in seed-slot order.
    pub const ALL: [CropKind; 6] = [
        CropKind::Corn,
        CropKind::Potato,
        CropKind::Tomato,
        CropKind::Bean,
        CropKind::Cabbage,
        CropKind::Broccoli,
    ];

    /// Resolves a sidebar slot to its crop kind.
    ///
    /// The input shell is expected to pre-filter key presses, but the engine
    /// still guards: an out-of-range slot is a caller contract violation
    /// surfaced as [`UnknownCropKind`], never a panic.
    pub const fn from_slot(slot: SeedSlot) -> Result<CropKind, UnknownCropKind> {
        match slot.get() {
            1 => Ok(CropKind::Corn),
            2 => Ok(CropKind::Potato),
            3 => Ok(CropKind::Tomato),
            4 => Ok(CropKind::Bean),
            5 => Ok(CropKind::Cabbage),
            6 => Ok(CropKind::Broccoli),
            other => Err(UnknownCropKind { slot: other }),
        }
    }

    /// Sidebar slot associated with the crop kind.
    #[must_use]
    pub const fn slot(self) -> SeedSlot {
        match self {
            Self::Corn => SeedSlot::new(1),
            Self::Potato => SeedSlot::new(2),
            Self::Tomato => SeedSlot::new(3),
            Self::Bean => SeedSlot::new(4),
            Self::Cabbage => SeedSlot::new(5),
            Self::Broccoli => SeedSlot::new(6),
        }
    }

    /// Static definition describing the crop's economy and presentation.
    #[must_use]
    pub const fn definition(self) -> &'static CropDefinition {
        match self {
            Self::Corn => &CORN,
            Self::Potato => &POTATO,
            Self::Tomato => &TOMATO,
            Self::Bean => &BEAN,
            Self::Cabbage => &CABBAGE,
            Self::Broccoli => &BROCCOLI,
        }
    }
}

/// Immutable description of a crop kind: economy constants and stage glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropDefinition {
    /// Display name shown in the seed sidebar.
    pub name: &'static str,
    /// One glyph per growth stage, indexed by [`CropStage::index`].
    pub glyphs: [char; 4],
    /// Coins charged when planting a seed of this kind.
    pub seed_cost: Coins,
    /// Simulated time from sowing until the crop would complete all stages.
    pub grow_time: Duration,
    /// Coins credited when a ripe crop of this kind is harvested.
    pub payout: Coins,
}

impl CropDefinition {
    /// Glyph used to draw the crop at the provided stage.
    #[must_use]
    pub const fn glyph(&self, stage: CropStage) -> char {
        self.glyphs[stage.index() as usize]
    }

    /// Accrued growth required before the crop may enter the provided stage.
    ///
    /// Stage N is reached once `grow_time * N / 4` of (boosted) growth has
    /// accrued, so crops turn ripe at three quarters of the nominal grow
    /// time and spend the final quarter waiting to be harvested.
    #[must_use]
    pub fn stage_threshold(&self, stage: CropStage) -> Duration {
        self.grow_time * u32::from(stage.index()) / 4
    }
}

const CORN: CropDefinition = CropDefinition {
    name: "Corn",
    glyphs: ['.', ',', 'c', 'C'],
    seed_cost: Coins::new(5),
    grow_time: Duration::from_secs(240),
    payout: Coins::new(12),
};

const POTATO: CropDefinition = CropDefinition {
    name: "Potato",
    glyphs: ['.', ',', 'p', 'P'],
    seed_cost: Coins::new(4),
    grow_time: Duration::from_secs(210),
    payout: Coins::new(10),
};

const TOMATO: CropDefinition = CropDefinition {
    name: "Tomato",
    glyphs: ['.', ',', 't', 'T'],
    seed_cost: Coins::new(4),
    grow_time: Duration::from_secs(180),
    payout: Coins::new(10),
};

const BEAN: CropDefinition = CropDefinition {
    name: "Bean",
    glyphs: ['.', ',', 'n', 'N'],
    seed_cost: Coins::new(3),
    grow_time: Duration::from_secs(150),
    payout: Coins::new(8),
};

const CABBAGE: CropDefinition = CropDefinition {
    name: "Cabbage",
    glyphs: ['.', ',', 'k', 'K'],
    seed_cost: Coins::new(6),
    grow_time: Duration::from_secs(270),
    payout: Coins::new(15),
};

const BROCCOLI: CropDefinition = CropDefinition {
    name: "Broccoli",
    glyphs: ['.', ',', 'b', 'B'],
    seed_cost: Coins::new(7),
    grow_time: Duration::from_secs(300),
    payout: Coins::new(18),
};

/// Reasons a plant attempt may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlantError {
    /// The wallet cannot cover the selected seed's cost.
    #[error("not enough coins for the selected seed")]
    InsufficientFunds,
    /// The player's tile already holds a crop.
    #[error("tile is already occupied")]
    Occupied,
}

/// Reasons a fertilize attempt may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum FertilizeError {
    /// The wallet cannot cover the fertilizer cost.
    #[error("not enough coins for fertilizer")]
    InsufficientFunds,
    /// The tile is empty, already ripe, or already fertilized.
    #[error("tile cannot be fertilized")]
    NotFertilizable,
}

/// Error raised when a seed slot maps to no configured crop kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("seed slot {slot} is outside the configured crop set")]
pub struct UnknownCropKind {
    /// Slot number that failed to resolve.
    pub slot: u8,
}

/// Contents of a single field tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileState {
    /// Bare soil, ready for planting.
    #[default]
    Empty,
    /// A crop occupies the tile.
    Planted(PlantedCrop),
}

impl TileState {
    /// Returns the planted crop, if any.
    #[must_use]
    pub const fn planted(&self) -> Option<&PlantedCrop> {
        match self {
            Self::Empty => None,
            Self::Planted(crop) => Some(crop),
        }
    }

    /// Returns `true` when the tile holds no crop.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` when the tile holds a harvest-ready crop.
    #[must_use]
    pub fn is_ripe(&self) -> bool {
        self.planted().is_some_and(|crop| crop.stage.is_ripe())
    }
}

/// A crop planted on a tile, together with its growth bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantedCrop {
    /// Kind of crop occupying the tile.
    pub kind: CropKind,
    /// Current growth stage.
    pub stage: CropStage,
    /// Simulated growth accrued since sowing. Fertilizer doubles the accrual
    /// rate from the moment it is applied, never retroactively.
    pub growth: Duration,
    /// Whether fertilizer has been applied to this crop.
    pub fertilized: bool,
}

/// Read-only view of the complete field, one entry per tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    columns: u32,
    rows: u32,
    tiles: Vec<TileState>,
}

impl FieldView {
    /// Creates a view backed by a dense row-major tile buffer.
    ///
    /// The buffer length must equal `columns * rows`; a mismatched buffer is
    /// truncated or padded with empty tiles so the view stays total.
    #[must_use]
    pub fn from_tiles(columns: u32, rows: u32, mut tiles: Vec<TileState>) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        tiles.resize(capacity, TileState::Empty);
        Self {
            columns,
            rows,
            tiles,
        }
    }

    /// Provides the dimensions of the underlying field grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Returns the state of the provided tile, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: TileCoord) -> Option<&TileState> {
        self.index(cell).and_then(|index| self.tiles.get(index))
    }

    /// Iterator over every tile in row-major order with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &TileState)> {
        let columns = u64::from(self.columns.max(1));
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u64;
            let column = (index % columns) as u32;
            let row = (index / columns) as u32;
            (TileCoord::new(column, row), tile)
        })
    }

    fn index(&self, cell: TileCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Immutable representation of a single raider's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaiderSnapshot {
    /// Unique identifier assigned to the raider.
    pub id: RaiderId,
    /// Field tile currently occupied by the raider.
    pub cell: TileCoord,
    /// Indicates whether the raider accrued enough time to hop.
    pub ready_to_hop: bool,
    /// Duration accumulated toward the next hop.
    pub accumulated: Duration,
}

/// Read-only snapshot describing all raiders on the field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaiderView {
    snapshots: Vec<RaiderSnapshot>,
}

impl RaiderView {
    /// Creates a new raider view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RaiderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured raider snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &RaiderSnapshot> {
        self.snapshots.iter()
    }

    /// Number of raiders captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` when no raiders are on the field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RaiderSnapshot> {
        self.snapshots
    }
}

/// Per-crop harvest counters kept for the sidebar tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestTally {
    counts: [u32; CropKind::ALL.len()],
}

impl HarvestTally {
    /// Creates an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; CropKind::ALL.len()],
        }
    }

    /// Number of crops of the provided kind harvested so far.
    #[must_use]
    pub const fn count(&self, kind: CropKind) -> u32 {
        self.counts[kind.slot().get() as usize - 1]
    }

    /// Records one harvested crop of the provided kind.
    pub fn record(&mut self, kind: CropKind) {
        let index = kind.slot().get() as usize - 1;
        self.counts[index] = self.counts[index].saturating_add(1);
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Tile currently occupied by the player's vehicle.
    pub cell: TileCoord,
    /// Crop kind armed for the next plant action.
    pub selected: CropKind,
    /// Current wallet balance.
    pub wallet: Coins,
    /// Harvest counters per crop kind.
    pub harvested: HarvestTally,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_coord_round_trips_through_bincode() {
        assert_round_trip(&TileCoord::new(7, 5));
    }

    #[test]
    fn raider_id_round_trips_through_bincode() {
        assert_round_trip(&RaiderId::new(42));
    }

    #[test]
    fn crop_kind_round_trips_through_bincode() {
        assert_round_trip(&CropKind::Cabbage);
    }

    #[test]
    fn rejection_reasons_round_trip_through_bincode() {
        assert_round_trip(&PlantError::Occupied);
        assert_round_trip(&FertilizeError::NotFertilizable);
        assert_round_trip(&UnknownCropKind { slot: 9 });
    }

    #[test]
    fn every_slot_resolves_to_its_kind() {
        for kind in CropKind::ALL {
            let resolved = CropKind::from_slot(kind.slot()).expect("slot resolves");
            assert_eq!(resolved, kind);
        }
    }

    #[test]
    fn out_of_range_slots_are_rejected() {
        assert_eq!(
            CropKind::from_slot(SeedSlot::new(0)),
            Err(UnknownCropKind { slot: 0 })
        );
        assert_eq!(
            CropKind::from_slot(SeedSlot::new(7)),
            Err(UnknownCropKind { slot: 7 })
        );
    }

    #[test]
    fn stage_progression_terminates_at_ripe() {
        let mut stage = CropStage::Sown;
        let mut transitions = 0;
        while let Some(next) = stage.successor() {
            assert_eq!(next.index(), stage.index() + 1);
            stage = next;
            transitions += 1;
        }
        assert_eq!(transitions, 3);
        assert!(stage.is_ripe());
    }

    #[test]
    fn stage_thresholds_quarter_the_grow_time() {
        let definition = CropKind::Tomato.definition();
        assert_eq!(definition.stage_threshold(CropStage::Sown), Duration::ZERO);
        assert_eq!(
            definition.stage_threshold(CropStage::Sprouting),
            Duration::from_secs(45)
        );
        assert_eq!(
            definition.stage_threshold(CropStage::Ripe),
            Duration::from_secs(135)
        );
    }

    #[test]
    fn crop_table_matches_the_seed_sidebar() {
        let costs: Vec<u32> = CropKind::ALL
            .iter()
            .map(|kind| kind.definition().seed_cost.get())
            .collect();
        assert_eq!(costs, vec![5, 4, 4, 3, 6, 7]);

        let payouts: Vec<u32> = CropKind::ALL
            .iter()
            .map(|kind| kind.definition().payout.get())
            .collect();
        assert_eq!(payouts, vec![12, 10, 10, 8, 15, 18]);

        for kind in CropKind::ALL {
            let definition = kind.definition();
            assert!(definition.grow_time >= Duration::from_secs(150));
            assert!(definition.payout > definition.seed_cost);
        }
    }

    #[test]
    fn coins_never_go_negative() {
        let balance = Coins::new(3);
        assert_eq!(balance.checked_sub(Coins::new(5)), None);
        assert_eq!(balance.checked_sub(Coins::new(3)), Some(Coins::new(0)));
    }

    #[test]
    fn field_view_pads_short_buffers() {
        let view = FieldView::from_tiles(4, 3, Vec::new());
        assert_eq!(view.dimensions(), (4, 3));
        assert_eq!(view.iter().count(), 12);
        assert!(view
            .tile(TileCoord::new(3, 2))
            .expect("tile inside grid")
            .is_empty());
        assert!(view.tile(TileCoord::new(4, 0)).is_none());
    }

    #[test]
    fn raider_view_orders_snapshots_by_id() {
        let view = RaiderView::from_snapshots(vec![
            RaiderSnapshot {
                id: RaiderId::new(2),
                cell: TileCoord::new(1, 1),
                ready_to_hop: false,
                accumulated: Duration::ZERO,
            },
            RaiderSnapshot {
                id: RaiderId::new(0),
                cell: TileCoord::new(0, 0),
                ready_to_hop: true,
                accumulated: Duration::from_millis(700),
            },
        ]);
        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn harvest_tally_counts_per_kind() {
        let mut tally = HarvestTally::new();
        tally.record(CropKind::Bean);
        tally.record(CropKind::Bean);
        tally.record(CropKind::Corn);
        assert_eq!(tally.count(CropKind::Bean), 2);
        assert_eq!(tally.count(CropKind::Corn), 1);
        assert_eq!(tally.count(CropKind::Broccoli), 0);
    }
}
