// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Labels and the per-session label registry.
//!
//! Every label bound during a session occupies one slot of a fixed color
//! palette. The slot's color is used for the markers drawn on the display
//! buffer while that label is active.

use crate::errors::{PatchError, Result};
use std::fmt;

/// Maximum number of labels per session, one per palette color.
pub const MAX_LABELS: usize = 6;

/// Marker colors in the order they are handed out.
pub const PALETTE: [MarkerColor; MAX_LABELS] = [
    MarkerColor::new("green", 0, 255, 0),
    MarkerColor::new("blue", 0, 0, 255),
    MarkerColor::new("red", 255, 0, 0),
    MarkerColor::new("magenta", 255, 0, 255),
    MarkerColor::new("yellow", 255, 255, 0),
    MarkerColor::new("cyan", 0, 255, 255),
];

/// An RGB marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerColor {
    pub name: &'static str,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MarkerColor {
    pub const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { name, r, g, b }
    }

    pub fn rgb(&self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }
}

/// A label name usable as a single directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Parse a label from one line of operator input.
    pub fn parse(input: &str) -> Result<Self> {
        let name = input.trim();
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);

        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(PatchError::InvalidLabel(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bound label together with its marker color.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSlot {
    pub label: Label,
    pub color: MarkerColor,
    /// Number of patches saved while this slot was active
    pub patches: usize,
}

/// Result of moving to the next palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    /// The cursor moved; a label has to be bound for the new slot.
    Continue { cursor: usize, color: MarkerColor },
    /// Every palette color has been used.
    Exhausted,
}

/// Ordered label slots and the cursor of the active one.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    slots: Vec<LabelSlot>,
    cursor: usize,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slots(&self) -> &[LabelSlot] {
        &self.slots
    }

    pub fn current(&self) -> Option<&LabelSlot> {
        self.slots.get(self.cursor)
    }

    pub fn current_label(&self) -> Option<&Label> {
        self.current().map(|slot| &slot.label)
    }

    /// Color of the slot under the cursor, bound or not.
    pub fn current_color(&self) -> MarkerColor {
        PALETTE[self.cursor]
    }

    /// Bind `label` to the slot under the cursor.
    ///
    /// A slot is bound once; returns `None` if the cursor's slot already has a label.
    pub fn bind(&mut self, label: Label) -> Option<&LabelSlot> {
        if self.slots.len() != self.cursor {
            return None;
        }
        let color = self.current_color();
        self.slots.push(LabelSlot {
            label,
            color,
            patches: 0,
        });
        self.slots.last()
    }

    /// Move to the next palette color.
    pub fn advance(&mut self) -> AdvanceResult {
        let next = self.cursor + 1;
        if next >= MAX_LABELS {
            return AdvanceResult::Exhausted;
        }
        self.cursor = next;
        AdvanceResult::Continue {
            cursor: next,
            color: PALETTE[next],
        }
    }

    /// Count one saved patch for the active slot.
    pub fn record_patch(&mut self) {
        if let Some(slot) = self.slots.get_mut(self.cursor) {
            slot.patches += 1;
        }
    }

    pub fn total_patches(&self) -> usize {
        self.slots.iter().map(|slot| slot.patches).sum()
    }
}
