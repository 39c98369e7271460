//! Screens shown before the conversation is available.

use egui::{self, RichText};
use crate::theme::*;

pub const IDENTITY_FAILED_TEXT: &str = "Failed to load user. Please reload the page.";

/// Shown while the identity request is in flight.
pub fn loading_panel(ui: &mut egui::Ui) {
    centered(ui, |ui| {
        ui.spinner();
        ui.add_space(8.0);
        ui.label(RichText::new("Loading...").color(TEXT_SECONDARY));
    });
}

/// Terminal screen for a failed identity fetch. Offers no retry; the page
/// has to be reloaded.
pub fn failed_panel(ui: &mut egui::Ui) {
    centered(ui, |ui| {
        ui.label(RichText::new(IDENTITY_FAILED_TEXT).color(ERROR).strong());
    });
}

fn centered(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.4);
                add_contents(ui);
            });
        });
}
