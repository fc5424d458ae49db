#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Harvest Defence adapters.
//!
//! Backends receive a declarative [`Scene`] and an `update_scene` closure
//! that runs the simulation; the contracts here keep backend crates free of
//! any engine knowledge beyond the core view types.

use anyhow::Result as AnyResult;
use glam::Vec2;
use harvest_defence_core::{
    Coins, CropKind, CropStage, Direction, FertilizeError, FieldView, PlantError, PlayerSnapshot,
    RaiderId, RaiderView, SeedSlot, TileCoord, TileState, UnknownCropKind,
};
use std::time::Duration;

/// Width reserved for the seed/harvest sidebar, in world units.
pub const SIDEBAR_WIDTH: f32 = 220.0;

/// Control legend printed at the bottom of the sidebar.
pub const HELP_LEGEND: [&str; 5] = [
    "WASD/arrows: move",
    "SPACE: plant/harvest",
    "1-6: pick seed",
    "F: fertilizer (5c)",
    "ESC/Q: quit",
];

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters once per frame.
///
/// Every field is edge-triggered: `true` (or `Some`) only on the frame the
/// key went down. The shell queues these into per-tick intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Movement key pressed on this frame, if any.
    pub movement: Option<Direction>,
    /// Seed slot key (1-6) pressed on this frame, if any.
    pub select_slot: Option<SeedSlot>,
    /// Whether the plant/harvest key was pressed on this frame.
    pub activate: bool,
    /// Whether the fertilize key was pressed on this frame.
    pub fertilize: bool,
    /// Whether a quit key was pressed on this frame.
    pub quit: bool,
}

/// Describes the square tile grid that composes the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32, line_color: Color) -> Self {
        Self {
            columns,
            rows,
            tile_length,
            line_color,
        }
    }

    /// Calculates the total size of the grid in world units.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_length,
            self.rows as f32 * self.tile_length,
        )
    }

    /// World-space center of the provided tile.
    #[must_use]
    pub fn tile_center(&self, cell: TileCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.tile_length,
            (cell.row() as f32 + 0.5) * self.tile_length,
        )
    }
}

/// A planted tile rendered as a stage glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePresentation {
    /// Tile that holds the crop.
    pub cell: TileCoord,
    /// Kind of crop occupying the tile.
    pub kind: CropKind,
    /// Growth stage used to pick the glyph and animation.
    pub stage: CropStage,
    /// Glyph drawn at the tile center.
    pub glyph: char,
    /// Whether the fertilizer sparkle should be drawn.
    pub fertilized: bool,
}

/// A raider rendered on top of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaiderPresentation {
    /// Identifier of the raider, for stable draw order.
    pub id: RaiderId,
    /// Tile currently occupied by the raider.
    pub cell: TileCoord,
}

/// The player's vehicle rendered on top of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPresentation {
    /// Tile currently occupied by the vehicle.
    pub cell: TileCoord,
}

/// One selectable seed row in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedRowPresentation {
    /// Sidebar slot bound to the number key.
    pub slot: SeedSlot,
    /// Crop kind offered by the row.
    pub kind: CropKind,
    /// Ripe-stage glyph shown next to the name.
    pub glyph: char,
    /// Display name of the crop.
    pub name: &'static str,
    /// Seed cost shown next to the name.
    pub cost: Coins,
    /// Whether this row is the current selection.
    pub selected: bool,
}

/// One harvest-tally row in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestRowPresentation {
    /// Crop kind the row counts.
    pub kind: CropKind,
    /// Ripe-stage glyph shown next to the count.
    pub glyph: char,
    /// Number of crops of this kind harvested so far.
    pub count: u32,
}

/// Sidebar content: seed list, wallet, and harvest tally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarPresentation {
    /// Current wallet balance.
    pub wallet: Coins,
    /// Seed rows in slot order.
    pub seed_rows: Vec<SeedRowPresentation>,
    /// Harvest tally rows in slot order.
    pub harvest_rows: Vec<HarvestRowPresentation>,
}

/// Transient yellow flash drawn over a freshly planted tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantFlash {
    /// Tile that was just planted.
    pub cell: TileCoord,
    /// Time elapsed since the planting.
    pub age: Duration,
}

impl PlantFlash {
    /// How long the flash stays visible.
    pub const DURATION: Duration = Duration::from_millis(300);

    /// Creates a new flash over the provided tile.
    #[must_use]
    pub const fn new(cell: TileCoord) -> Self {
        Self {
            cell,
            age: Duration::ZERO,
        }
    }

    /// Remaining intensity in 1.0..=0.0 as the flash fades out.
    #[must_use]
    pub fn strength(&self) -> f32 {
        if self.age >= Self::DURATION {
            return 0.0;
        }
        1.0 - self.age.as_secs_f32() / Self::DURATION.as_secs_f32()
    }

    /// Returns `true` once the flash has fully faded.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age >= Self::DURATION
    }
}

/// Feedback surfaced to adapters about the most recent rejected intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentFeedback {
    /// Reports that a plant attempt was rejected by the world.
    PlantRejected {
        /// Tile targeted by the plant attempt.
        cell: TileCoord,
        /// Kind of crop requested for planting.
        kind: CropKind,
        /// Reason the plant attempt failed.
        reason: PlantError,
    },
    /// Reports that a fertilize attempt was rejected by the world.
    FertilizeRejected {
        /// Tile targeted by the fertilize attempt.
        cell: TileCoord,
        /// Reason the fertilize attempt failed.
        reason: FertilizeError,
    },
    /// Reports that a seed selection named an unknown slot.
    SeedRejected {
        /// Slot provided in the selection request.
        slot: SeedSlot,
        /// Reason the selection failed.
        reason: UnknownCropKind,
    },
}

/// Scene description combining the field, its inhabitants, and the sidebar.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Planted tiles currently visible on the field.
    pub tiles: Vec<TilePresentation>,
    /// Raiders currently roaming the field.
    pub raiders: Vec<RaiderPresentation>,
    /// The player's vehicle.
    pub player: PlayerPresentation,
    /// Sidebar content.
    pub sidebar: SidebarPresentation,
    /// Transient planting flashes managed by the shell.
    pub plant_flashes: Vec<PlantFlash>,
    /// Feedback about the last rejected intent, if any.
    pub feedback: Option<IntentFeedback>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tile_grid: TileGridPresentation,
        tiles: Vec<TilePresentation>,
        raiders: Vec<RaiderPresentation>,
        player: PlayerPresentation,
        sidebar: SidebarPresentation,
    ) -> Self {
        Self {
            tile_grid,
            tiles,
            raiders,
            player,
            sidebar,
            plant_flashes: Vec::new(),
            feedback: None,
        }
    }

    /// Total size of the scene including the sidebar, in world units.
    #[must_use]
    pub fn total_size(&self) -> Vec2 {
        let field = self.tile_grid.size();
        Vec2::new(field.x + SIDEBAR_WIDTH, field.y)
    }
}

/// Rebuilds the scene's dynamic content from fresh world views.
///
/// The tile grid, plant flashes, and feedback channel are left untouched:
/// flashes and feedback are shell-managed animation state, not world state.
pub fn populate_scene(
    field: &FieldView,
    raiders: &RaiderView,
    player: &PlayerSnapshot,
    scene: &mut Scene,
) {
    scene.tiles.clear();
    for (cell, tile) in field.iter() {
        if let TileState::Planted(crop) = tile {
            scene.tiles.push(TilePresentation {
                cell,
                kind: crop.kind,
                stage: crop.stage,
                glyph: crop.kind.definition().glyph(crop.stage),
                fertilized: crop.fertilized,
            });
        }
    }

    scene.raiders.clear();
    for raider in raiders.iter() {
        scene.raiders.push(RaiderPresentation {
            id: raider.id,
            cell: raider.cell,
        });
    }

    scene.player = PlayerPresentation { cell: player.cell };

    scene.sidebar.wallet = player.wallet;
    scene.sidebar.seed_rows.clear();
    scene.sidebar.harvest_rows.clear();
    for kind in CropKind::ALL {
        let definition = kind.definition();
        scene.sidebar.seed_rows.push(SeedRowPresentation {
            slot: kind.slot(),
            kind,
            glyph: definition.glyph(CropStage::Ripe),
            name: definition.name,
            cost: definition.seed_cost,
            selected: kind == player.selected,
        });
        scene.sidebar.harvest_rows.push(HarvestRowPresentation {
            kind,
            glyph: definition.glyph(CropStage::Ripe),
            count: player.harvested.count(kind),
        });
    }
}

/// Timing breakdown reported by the `update_scene` closure each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Time spent advancing the simulation.
    pub simulation: Duration,
    /// Time spent repopulating the scene from world views.
    pub scene_population: Duration,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Harvest Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered, allowing adapters to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static;
}
