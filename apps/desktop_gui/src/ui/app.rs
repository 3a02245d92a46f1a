use std::collections::VecDeque;

use client_core::{
    page::{ANALYZE_LABEL, LOADING_LABEL, OPEN_LABEL, UPLOAD_LABEL},
    ClientSettings, Notification, PageView, StorageLinks, ViewState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
};

const CARD_COLUMNS: usize = 2;
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);

pub struct DocumentListApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    links: StorageLinks,
    upload_url: String,
    state: ViewState,
    /// Analyze outcomes waiting to be acknowledged, oldest first.
    notifications: VecDeque<Notification>,
    backend_error: Option<UiError>,
    status: String,
}

impl DocumentListApp {
    /// Builds the window state and requests the initial document fetch.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &ClientSettings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            links: StorageLinks::new(&settings.bucket_host),
            upload_url: settings.upload_url.clone(),
            state: ViewState::default(),
            notifications: VecDeque::new(),
            backend_error: None,
            status: "Starting backend worker...".to_string(),
        };
        app.dispatch(BackendCommand::FetchDocuments);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.status = "Connected".to_string();
                }
                UiEvent::StateChanged(state) => {
                    self.state = state;
                }
                UiEvent::Notification(notification) => {
                    self.notifications.push_back(notification);
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.headline().to_string();
                    self.backend_error = Some(err);
                }
            }
        }
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.notifications.front() else {
            return;
        };

        let title = if notification.is_success() {
            "Analysis"
        } else {
            "Analysis error"
        };
        let text = notification.text();
        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(text);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notifications.pop_front();
        }
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        let page = PageView::build(&self.state, &self.links, &self.upload_url);
        let mut requested = Vec::new();

        ui.vertical_centered(|ui| {
            ui.heading(page.title);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.hyperlink_to(UPLOAD_LABEL, &page.upload_url);
                if ui.button("Reload").clicked() {
                    requested.push(BackendCommand::FetchDocuments);
                }
            });
            if page.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(LOADING_LABEL);
                });
            }
            if let Some(error) = &page.error_banner {
                ui.colored_label(ERROR_COLOR, error);
            }
            if let Some(err) = &self.backend_error {
                ui.colored_label(ERROR_COLOR, err.headline());
                ui.weak(err.message());
            }
        });
        ui.add_space(12.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("document_cards")
                .num_columns(CARD_COLUMNS)
                .spacing([24.0, 16.0])
                .show(ui, |ui| {
                    for (index, card) in page.cards.iter().enumerate() {
                        ui.group(|ui| {
                            ui.vertical(|ui| {
                                ui.strong(&card.file_name);
                                ui.add(
                                    egui::Hyperlink::from_label_and_url(OPEN_LABEL, &card.open_url)
                                        .open_in_new_tab(true),
                                );
                                if ui.button(ANALYZE_LABEL).clicked() {
                                    requested.push(BackendCommand::AnalyzeDocument { id: card.id });
                                }
                                ui.weak(&card.uploader_label);
                            });
                        });
                        if (index + 1) % CARD_COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        for cmd in requested {
            self.dispatch(cmd);
        }
    }
}

impl eframe::App for DocumentListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let blocked = !self.notifications.is_empty();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| self.show_page(ui));
        });
        self.show_notification(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

impl Drop for DocumentListApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Unmount);
    }
}
