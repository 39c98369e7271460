//! Chat panel: the conversation, connection status and composer.

use egui::{self, Align, Color32, Layout, RichText, ScrollArea, Vec2};
use chat_types::message::{Role, StoreEntry};
use chat_types::state::ChannelState;
use crate::state::UiState;
use crate::theme::*;

/// What the user asked the composer to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Send,
    Cancel,
}

/// Render the chat panel.
///
/// The draft is edited in place; the caller hands it back to the session
/// before acting on the returned action.
pub fn chat_panel(
    ui: &mut egui::Ui,
    entries: &[StoreEntry],
    draft: &mut String,
    state: &UiState,
    can_send: bool,
) -> Option<ComposerAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_max_width(MAX_CONTENT_WIDTH);
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(state.channel_state.label())
                                .color(channel_color(&state.channel_state))
                                .small(),
                        );
                    });
                });

                if let Some(notice) = &state.snapshot_notice {
                    ui.label(RichText::new(notice).color(WARNING).small());
                }

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if entries.is_empty() {
                            ui.vertical_centered(|ui| {
                                ui.add_space(24.0);
                                ui.label(RichText::new("No messages yet.").color(TEXT_SECONDARY));
                            });
                        }
                        for entry in entries {
                            render_entry(ui, entry);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(draft)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 140.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = can_submit(draft, can_send);
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );
                    let cancel_btn = ui.add(
                        egui::Button::new(RichText::new("Cancel").color(TEXT_SECONDARY))
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        action = Some(ComposerAction::Send);
                        response.request_focus();
                    } else if cancel_btn.clicked() {
                        action = Some(ComposerAction::Cancel);
                    }
                });
            });
        });

    action
}

/// Whether the composer should accept a send right now.
pub fn can_submit(draft: &str, can_send: bool) -> bool {
    can_send && !draft.trim().is_empty()
}

/// Speaker label and its color
pub fn entry_label(entry: &StoreEntry) -> (&'static str, Color32) {
    match entry.message().role {
        Role::User => (Role::User.label(), ACCENT),
        Role::Bot => (Role::Bot.label(), BOT),
    }
}

pub fn channel_color(state: &ChannelState) -> Color32 {
    match state {
        ChannelState::Open => SUCCESS,
        ChannelState::Connecting => WARNING,
        ChannelState::Errored(_) => ERROR,
        ChannelState::Closed => TEXT_SECONDARY,
    }
}

fn render_entry(ui: &mut egui::Ui, entry: &StoreEntry) {
    let (label, label_color) = entry_label(entry);
    let message = entry.message();
    let bg = if entry.is_pending() { BG_SURFACE } else { BG_SECONDARY };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                if entry.is_pending() {
                    ui.label(RichText::new("sending").color(TEXT_SECONDARY).italics().small());
                } else if let Some(at) = message.created_at {
                    ui.label(
                        RichText::new(at.format("%H:%M").to_string())
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                }
            });
            ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
        });
}
