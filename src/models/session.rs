// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session state machine.
//!
//! A session owns the clean and annotated image buffers, the label registry
//! and the storage sink. The display layer feeds it events and reacts to the
//! returned outcomes; the session itself never touches a window.

use crate::errors::{PatchError, Result};
use crate::io::media;
use crate::io::storage::{timestamp, DatasetLayout, Snapshots, StorageSink};
use crate::models::label::{AdvanceResult, Label, LabelRegistry, MarkerColor, MAX_LABELS};
use crate::util::geometry::{self, CropRect, Resolution};
use chrono::Local;
use image::RgbImage;
use std::path::PathBuf;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the operator to name the next label.
    AwaitingLabel,
    /// Clicks produce patches for the active label.
    Annotating,
    /// Snapshots have been written; nothing else is processed.
    Terminated,
}

/// Input events, already mapped from raw mouse and key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Left click at pixel `(x, y)` of the displayed buffer.
    Click { x: u32, y: u32 },
    /// Switch to the next label (space).
    Advance,
    /// End the session (escape).
    Terminate,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    LabelBound { label: Label, color: MarkerColor },
    Saved { path: PathBuf, rect: CropRect },
    Rejected { x: u32, y: u32 },
    LabelRequested,
    Terminated(Snapshots),
    /// The event has no meaning in the current state.
    Ignored,
}

pub struct Session<S: StorageSink> {
    clean: RgbImage,
    annotated: RgbImage,
    half_size: u32,
    registry: LabelRegistry,
    layout: DatasetLayout,
    sink: S,
    state: SessionState,
    /// Bumped whenever `annotated` changes
    revision: u64,
}

impl<S: StorageSink> Session<S> {
    /// Start a session on an already loaded and scaled image.
    pub fn new(clean: RgbImage, half_size: u32, layout: DatasetLayout, mut sink: S) -> Result<Self> {
        if half_size == 0 {
            return Err(PatchError::ZeroHalfSize);
        }
        sink.ensure_dir(layout.root())?;

        let annotated = clean.clone();
        log::info!(
            "Session started on {}x{} image, patch size {}",
            clean.width(),
            clean.height(),
            2 * half_size
        );

        Ok(Self {
            clean,
            annotated,
            half_size,
            registry: LabelRegistry::new(),
            layout,
            sink,
            state: SessionState::AwaitingLabel,
            revision: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn clean(&self) -> &RgbImage {
        &self.clean
    }

    pub fn annotated(&self) -> &RgbImage {
        &self.annotated
    }

    pub fn half_size(&self) -> u32 {
        self.half_size
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Bind one line of operator input as the label for the current color.
    pub fn submit_label(&mut self, line: &str) -> Result<EventOutcome> {
        if self.state != SessionState::AwaitingLabel {
            return Ok(EventOutcome::Ignored);
        }

        let label = Label::parse(line).map_err(|err| {
            log::warn!("Rejected label name {:?}", line);
            err
        })?;
        self.sink.ensure_dir(&self.layout.label_dir(&label))?;

        let cursor = self.registry.cursor();
        let Some(slot) = self.registry.bind(label) else {
            return Ok(EventOutcome::Ignored);
        };
        let outcome = EventOutcome::LabelBound {
            label: slot.label.clone(),
            color: slot.color,
        };
        log::info!(
            "Label '{}' bound to {} ({}/{})",
            slot.label,
            slot.color.name,
            cursor + 1,
            MAX_LABELS
        );

        self.state = SessionState::Annotating;
        Ok(outcome)
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        match (self.state, event) {
            (SessionState::Terminated, _) => Ok(EventOutcome::Ignored),
            (_, SessionEvent::Terminate) => self.finish(),
            (SessionState::Annotating, SessionEvent::Click { x, y }) => self.click(x, y),
            (SessionState::Annotating, SessionEvent::Advance) => self.advance(),
            (SessionState::AwaitingLabel, _) => Ok(EventOutcome::Ignored),
        }
    }

    fn click(&mut self, x: u32, y: u32) -> Result<EventOutcome> {
        let (width, height) = self.clean.dimensions();
        let rect = match geometry::resolve(x, y, self.half_size, width, height) {
            Resolution::Accepted(rect) => rect,
            Resolution::Rejected { width, height } => {
                log::warn!(
                    "Rejected click at ({}, {}): too close to edge ({}x{} crop)",
                    x,
                    y,
                    width,
                    height
                );
                return Ok(EventOutcome::Rejected { x, y });
            }
        };

        let Some(slot) = self.registry.current() else {
            return Ok(EventOutcome::Ignored);
        };
        let color = slot.color;
        let path = self.layout.crop_path(&slot.label, &timestamp(Local::now()));

        let patch = media::crop(&self.clean, &rect);
        self.sink.write_image(&path, &patch)?;

        let (top_left, bottom_right) = geometry::marker_bounds(&rect);
        media::draw_marker(&mut self.annotated, top_left, bottom_right, color);
        self.revision += 1;
        self.registry.record_patch();

        log::info!("Saved patch {}", path.display());
        Ok(EventOutcome::Saved { path, rect })
    }

    fn advance(&mut self) -> Result<EventOutcome> {
        match self.registry.advance() {
            AdvanceResult::Continue { cursor, color } => {
                log::info!("Next label: slot {} ({})", cursor + 1, color.name);
                self.state = SessionState::AwaitingLabel;
                Ok(EventOutcome::LabelRequested)
            }
            AdvanceResult::Exhausted => {
                log::info!("Maximum {} labels per run", MAX_LABELS);
                self.finish()
            }
        }
    }

    fn finish(&mut self) -> Result<EventOutcome> {
        let snapshots = self.layout.snapshot_paths(&timestamp(Local::now()));
        self.sink.write_image(&snapshots.original, &self.clean)?;
        self.sink.write_image(&snapshots.result, &self.annotated)?;
        self.state = SessionState::Terminated;

        log::info!(
            "Session finished with {} patches, snapshots {} and {}",
            self.registry.total_patches(),
            snapshots.original.display(),
            snapshots.result.display()
        );
        Ok(EventOutcome::Terminated(snapshots))
    }
}
