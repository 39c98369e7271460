//! Main egui application: owns the chat session and renders it each frame.

use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use chat_core::event_bus::EventBus;
use chat_core::session::ChatSession;
use chat_platform::{resolve_config, BrowserTimer, HttpChatApi, WsLiveChannel};
use chat_types::config::ClientConfig;
use chat_types::state::IdentityState;
use chat_ui::panels::{self, ComposerAction};
use chat_ui::state::UiState;
use chat_ui::theme;

/// Session events arrive from spawned tasks, so the bus is polled at this
/// interval even without user input.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChatApp {
    ui_state: UiState,
    session: Rc<ChatSession>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = match resolve_config() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid client configuration: {}. Using defaults.", e);
                ClientConfig::default()
            }
        };
        log::info!("API at {}, live channel at {}", config.api_base, config.live_url());

        let api = Rc::new(HttpChatApi::new(&config));
        let live = Rc::new(WsLiveChannel::new(&config));
        let session = Rc::new(ChatSession::new(
            config,
            api,
            live,
            Rc::new(BrowserTimer),
            EventBus::new(),
        ));

        Self::start_session(session.clone(), cc.egui_ctx.clone());

        Self {
            ui_state: UiState::new(),
            session,
            first_frame: true,
        }
    }

    fn start_session(session: Rc<ChatSession>, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = session.bootstrap().await {
                log::error!("Chat session stopped: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn render_chat(&mut self, ui: &mut egui::Ui) {
        let mut draft = self.session.composer().draft();
        let can_send = self.session.identity().is_some();

        let action = self.session.store().with_entries(|entries| {
            panels::chat_panel(ui, entries, &mut draft, &self.ui_state, can_send)
        });

        self.session.composer().set_draft(draft);
        match action {
            Some(ComposerAction::Send) => {
                if self.session.send_draft().is_some() {
                    ui.ctx().request_repaint();
                }
            }
            Some(ComposerAction::Cancel) => self.session.cancel_draft(),
            None => {}
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let events = self.session.event_bus().drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Chat").strong().color(theme::ACCENT).size(16.0));
                if let Some(identity) = self.session.identity() {
                    ui.separator();
                    ui.label(
                        RichText::new(&identity.name)
                            .color(theme::TEXT_SECONDARY)
                            .small(),
                    );
                }
            });
        });

        CentralPanel::default().show(ctx, |ui| match self.session.identity_state() {
            IdentityState::Loading => panels::loading_panel(ui),
            IdentityState::Failed(_) => panels::failed_panel(ui),
            IdentityState::Resolved(_) => self.render_chat(ui),
        });

        ctx.request_repaint_after(POLL_INTERVAL);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.teardown();
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        self.session.teardown();
    }
}
