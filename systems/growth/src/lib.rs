#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic growth system that proposes crop stage advances.
//!
//! The world accrues growth time on every planted tile; this system decides
//! when that accrual crosses a stage threshold and emits
//! [`Command::AdvanceCrop`] proposals. The world re-validates each proposal,
//! so a stale command (the crop was harvested or eaten in the meantime) is
//! dropped without effect.

use harvest_defence_core::{Command, Event, FieldView};

/// Pure system that turns accrued growth into stage-advance commands.
#[derive(Debug, Default)]
pub struct Growth {
    scratch: Vec<Command>,
}

impl Growth {
    /// Creates a new growth system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes events and the field view to emit crop advance commands.
    ///
    /// A tile whose accrued growth crossed several thresholds at once (after
    /// a large `dt`) yields one chained command per transition, in order, so
    /// the world still observes every intermediate stage.
    pub fn handle(&mut self, events: &[Event], field: &FieldView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        self.scratch.clear();

        for (cell, tile) in field.iter() {
            let Some(crop) = tile.planted() else {
                continue;
            };

            let definition = crop.kind.definition();
            let mut stage = crop.stage;
            while let Some(next) = stage.successor() {
                if crop.growth < definition.stage_threshold(next) {
                    break;
                }
                self.scratch.push(Command::AdvanceCrop { cell, stage: next });
                stage = next;
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
