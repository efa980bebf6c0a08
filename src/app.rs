// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module adapts raw window input into session events and renders the
//! session's annotated buffer. All dataset logic lives in the session; the
//! app only maps clicks and keys, shows the label prompt and closes the
//! window once the session has terminated.

use crate::errors::PatchError;
use crate::io::media;
use crate::io::storage::FsSink;
use crate::models::session::{EventOutcome, Session, SessionEvent, SessionState};
use crate::ui::{canvas, label_prompt, properties, status};
use std::sync::mpsc::Sender;

/// Main application state.
pub struct PatchApp {
    session: Session<FsSink>,

    /// Texture of the annotated buffer
    texture: Option<egui::TextureHandle>,

    /// Session revision the texture was built from
    texture_revision: Option<u64>,

    /// Text typed into the label prompt
    label_input: String,

    /// Why the last submitted label was refused
    label_error: Option<String>,

    /// Outcome of the last event, shown in the status bar
    status_message: Option<String>,

    /// Fatal errors are handed back to `main` through this channel
    failures: Sender<PatchError>,

    /// Set once a close command has been sent
    closing: bool,
}

impl PatchApp {
    pub fn new(session: Session<FsSink>, failures: Sender<PatchError>) -> Self {
        Self {
            session,
            texture: None,
            texture_revision: None,
            label_input: String::new(),
            label_error: None,
            status_message: None,
            failures,
            closing: false,
        }
    }

    /// Re-upload the annotated buffer if markers were drawn since the last upload.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let revision = self.session.revision();
        if self.texture_revision == Some(revision) {
            return;
        }

        let image = media::to_color_image(self.session.annotated());
        match self.texture {
            Some(ref mut texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("annotated", image, egui::TextureOptions::NEAREST));
            }
        }
        self.texture_revision = Some(revision);
    }

    fn submit_label(&mut self, ctx: &egui::Context, line: String) {
        match self.session.submit_label(&line) {
            Ok(outcome) => {
                self.label_error = None;
                self.report(outcome);
            }
            Err(PatchError::InvalidLabel(_)) => {
                self.label_error = Some(format!("{:?} is not a usable directory name", line.trim()));
            }
            Err(err) => self.fail(ctx, err),
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: SessionEvent) {
        if self.closing {
            return;
        }
        match self.session.handle(event) {
            Ok(outcome) => self.report(outcome),
            Err(err) => self.fail(ctx, err),
        }
    }

    fn report(&mut self, outcome: EventOutcome) {
        let message = match outcome {
            EventOutcome::LabelBound { label, color } => format!("Labeling '{}' in {}", label, color.name),
            EventOutcome::Saved { path, .. } => format!("Saved {}", path.display()),
            EventOutcome::Rejected { x, y } => format!("Rejected ({}, {}): too close to edge", x, y),
            EventOutcome::LabelRequested => "Enter the next label".to_string(),
            EventOutcome::Terminated(snapshots) => {
                format!("Wrote {}", snapshots.result.display())
            }
            EventOutcome::Ignored => return,
        };
        self.status_message = Some(message);
    }

    /// Storage failures end the program; hand the error to `main` and close.
    fn fail(&mut self, ctx: &egui::Context, err: PatchError) {
        log::error!("{}", err);
        if err.is_storage_failure() {
            let _ = self.failures.send(err);
            self.close(ctx);
        } else {
            self.status_message = Some(err.to_string());
        }
    }

    fn close(&mut self, ctx: &egui::Context) {
        if !self.closing {
            self.closing = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for PatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closing {
            return;
        }

        self.refresh_texture(ctx);
        let state = self.session.state();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status::show(
                ui,
                state,
                self.session.registry(),
                self.status_message.as_deref(),
            );
        });

        egui::SidePanel::right("labels")
            .default_width(200.0)
            .show(ctx, |ui| {
                properties::show(
                    ui,
                    self.session.registry(),
                    self.session.half_size(),
                    self.session.layout().root(),
                );
            });

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    &self.texture,
                    self.session.annotated().dimensions(),
                    state == SessionState::Annotating,
                )
            })
            .inner;

        if state == SessionState::AwaitingLabel {
            let registry = self.session.registry();
            let submitted = label_prompt::show(
                ctx,
                &mut self.label_input,
                self.label_error.as_deref(),
                registry.cursor(),
                registry.current_color(),
            );
            if let Some(line) = submitted {
                self.submit_label(ctx, line);
            }
        }

        let click = match canvas_action {
            canvas::CanvasAction::Click { x, y } => Some((x, y)),
            canvas::CanvasAction::None => None,
        };
        for event in input_events(ctx, self.session.state(), click) {
            self.dispatch(ctx, event);
        }

        if self.session.is_terminated() {
            self.close(ctx);
        }
    }
}

/// Map one frame's raw input to session events, in click, space, escape order.
fn input_events(ctx: &egui::Context, state: SessionState, click: Option<(u32, u32)>) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    if let Some((x, y)) = click {
        events.push(SessionEvent::Click { x, y });
    }

    let (space, escape, close) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::Space),
            i.key_pressed(egui::Key::Escape),
            i.viewport().close_requested(),
        )
    });

    if space && state == SessionState::Annotating && !ctx.wants_keyboard_input() {
        events.push(SessionEvent::Advance);
    }
    // Closing the window counts as finishing so the snapshots get written
    if escape || close {
        events.push(SessionEvent::Terminate);
    }
    events
}
