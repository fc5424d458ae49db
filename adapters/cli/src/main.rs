#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Harvest Defence experience.
//!
//! The shell owns the fixed-timestep loop: real frame time is chopped into
//! whole simulation ticks, each tick runs the engine in a fixed order
//! (clock, growth, raiders, one player intent), and the scene is then
//! repopulated from immutable world views for the rendering backend.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use harvest_defence_core::{Command, Event};
use harvest_defence_rendering::{
    populate_scene, FrameInput, FrameSimulationBreakdown, IntentFeedback, PlantFlash,
    PlayerPresentation, Presentation, RenderingBackend, Scene, SidebarPresentation,
    TileGridPresentation,
};
use harvest_defence_rendering_macroquad::{MacroquadBackend, Theme};
use harvest_defence_system_growth::Growth;
use harvest_defence_system_raiders::{Config as RaiderConfig, Raiders};
use harvest_defence_world::{self as world, query, World, HOP_INTERVAL};

const TILE_LENGTH: f32 = 64.0;
/// Sixty simulation ticks per second, independent of the render rate.
const TICK: Duration = Duration::from_micros(16_667);
/// Upper bound on catch-up ticks per frame; beyond it the backlog is dropped.
const MAX_TICKS_PER_FRAME: u32 = 8;

/// Command-line arguments accepted by the Harvest Defence binary.
#[derive(Debug, Parser)]
#[command(
    name = "harvest-defence",
    about = "Plant, fertilize, and harvest before the raiders reach your crops"
)]
struct Args {
    /// Seed for raider spawn and walk randomness; drawn from entropy when
    /// omitted (the chosen value is logged for replays).
    #[arg(long)]
    seed: Option<u64>,

    /// Print a once-per-second FPS and timing report to stdout.
    #[arg(long)]
    show_fps: bool,

    /// Swap interval requested from the windowing platform (0 disables vsync).
    #[arg(long)]
    swap_interval: Option<i32>,
}

/// Entry point for the Harvest Defence command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("raider seed {seed:#018x}");

    let world = World::new();
    let theme = Theme::load_or_default()?;

    println!("{}", query::welcome_banner(&world));

    let scene = initial_scene(&world, &theme);
    let presentation = Presentation::new("Harvest Defence", theme.background, scene);

    let mut backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_theme(theme);
    if let Some(swap_interval) = args.swap_interval {
        backend = backend.with_swap_interval(swap_interval);
    }

    let mut session = Session::new(
        world,
        Growth::new(),
        Raiders::new(RaiderConfig::new(HOP_INTERVAL, seed)),
    );
    backend.run(presentation, move |frame_dt, input, scene| {
        session.advance(frame_dt, input, scene)
    })
}

fn initial_scene(world: &World, theme: &Theme) -> Scene {
    let field = query::field_view(world);
    let raiders = query::raider_view(world);
    let player = query::player(world);
    let (columns, rows) = field.dimensions();

    let mut scene = Scene::new(
        TileGridPresentation::new(columns, rows, TILE_LENGTH, theme.grid_line),
        Vec::new(),
        Vec::new(),
        PlayerPresentation { cell: player.cell },
        SidebarPresentation {
            wallet: player.wallet,
            seed_rows: Vec::new(),
            harvest_rows: Vec::new(),
        },
    );
    populate_scene(&field, &raiders, &player, &mut scene);
    scene
}

/// Owns the engine state and drives it from per-frame input.
struct Session {
    world: World,
    growth: Growth,
    raiders: Raiders,
    intents: VecDeque<Command>,
    tick_accumulator: Duration,
}

impl Session {
    fn new(world: World, growth: Growth, raiders: Raiders) -> Self {
        Self {
            world,
            growth,
            raiders,
            intents: VecDeque::new(),
            tick_accumulator: Duration::ZERO,
        }
    }

    /// Advances the simulation by one rendered frame and refreshes the scene.
    fn advance(
        &mut self,
        frame_dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> FrameSimulationBreakdown {
        self.queue_intents(input);

        for flash in &mut scene.plant_flashes {
            flash.age = flash.age.saturating_add(frame_dt);
        }
        scene.plant_flashes.retain(|flash| !flash.is_expired());

        let simulation_start = Instant::now();
        self.tick_accumulator = self.tick_accumulator.saturating_add(frame_dt);
        let mut ticks = 0;
        while self.tick_accumulator >= TICK && ticks < MAX_TICKS_PER_FRAME {
            self.tick_accumulator -= TICK;
            ticks += 1;
            let events = self.run_tick(TICK);
            apply_shell_effects(&events, scene);
        }
        if self.tick_accumulator >= TICK {
            log::debug!(
                "dropping {:?} of simulation backlog",
                self.tick_accumulator
            );
            self.tick_accumulator = Duration::ZERO;
        }
        let simulation = simulation_start.elapsed();

        let population_start = Instant::now();
        let field = query::field_view(&self.world);
        let raider_view = query::raider_view(&self.world);
        let player = query::player(&self.world);
        populate_scene(&field, &raider_view, &player, scene);
        let scene_population = population_start.elapsed();

        FrameSimulationBreakdown {
            simulation,
            scene_population,
        }
    }

    fn queue_intents(&mut self, input: FrameInput) {
        if let Some(direction) = input.movement {
            self.intents.push_back(Command::MovePlayer { direction });
        }
        if let Some(slot) = input.select_slot {
            self.intents.push_back(Command::SelectSeed { slot });
        }
        if input.activate {
            self.intents.push_back(Command::ActivateTile);
        }
        if input.fertilize {
            self.intents.push_back(Command::Fertilize);
        }
    }

    /// One simulation tick in the fixed order: clock, growth, raiders, then
    /// at most one queued player intent.
    fn run_tick(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let field = query::field_view(&self.world);
        let mut commands = Vec::new();
        self.growth.handle(&events, &field, &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        let field = query::field_view(&self.world);
        let raider_view = query::raider_view(&self.world);
        let mut commands = Vec::new();
        self.raiders
            .handle(&events, &field, &raider_view, &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        if let Some(intent) = self.intents.pop_front() {
            world::apply(&mut self.world, intent, &mut events);
        }
        events
    }
}

/// Translates engine events into shell-side animation and feedback state.
fn apply_shell_effects(events: &[Event], scene: &mut Scene) {
    for event in events {
        match event {
            Event::CropPlanted { cell, .. } => {
                scene.plant_flashes.push(PlantFlash::new(*cell));
                scene.feedback = None;
            }
            Event::CropHarvested { .. }
            | Event::CropFertilized { .. }
            | Event::SeedSelected { .. } => {
                scene.feedback = None;
            }
            Event::PlantRejected { cell, kind, reason } => {
                scene.feedback = Some(IntentFeedback::PlantRejected {
                    cell: *cell,
                    kind: *kind,
                    reason: *reason,
                });
                log::debug!("plant rejected at {cell:?}: {reason}");
            }
            Event::FertilizeRejected { cell, reason } => {
                scene.feedback = Some(IntentFeedback::FertilizeRejected {
                    cell: *cell,
                    reason: *reason,
                });
                log::debug!("fertilize rejected at {cell:?}: {reason}");
            }
            Event::SeedSelectionRejected { slot, reason } => {
                scene.feedback = Some(IntentFeedback::SeedRejected {
                    slot: *slot,
                    reason: *reason,
                });
                log::debug!("seed selection rejected: {reason}");
            }
            _ => {}
        }
    }
}
