//! Signed-in dashboard: header plus briefing, notes and assistant cards
//!
//! Every widget the tour can point at registers itself with the
//! [`TargetRegistry`] while it is drawn.

use anyhow::Result;
use eframe::egui;
use tracing::error;

use crate::config::ThemePreference;
use crate::gui::components::assistant::Assistant;
use crate::gui::components::notes::QuickNotes;
use crate::gui::components::theme_toggle;
use crate::gui::constants::*;
use crate::gui::targets::TargetRegistry;
use crate::mock::{self, BRIEFING, User};

/// Requests the dashboard hands back to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    RestartTour,
    SignOut,
    ThemeChanged,
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub struct Dashboard {
    user: User,
    show_briefing: bool,
    export_status: Option<StatusMessage>,
    notes: QuickNotes,
    assistant: Assistant,
}

impl Dashboard {
    pub fn new(user: User) -> Self {
        Self {
            user,
            show_briefing: false,
            export_status: None,
            notes: QuickNotes::new(),
            assistant: Assistant::new(),
        }
    }

    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        theme: &mut ThemePreference,
        targets: &mut TargetRegistry,
    ) -> Vec<DashboardAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("dashboard_header").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                ui.heading("Orbit");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign out").clicked() {
                        actions.push(DashboardAction::SignOut);
                    }
                    ui.label(&self.user.name).on_hover_text(&self.user.email);

                    if ui.button("?").on_hover_text("Restart the walkthrough").clicked() {
                        actions.push(DashboardAction::RestartTour);
                    }

                    let (toggle, changed) = theme_toggle::ui(ui, theme);
                    targets.mark("theme-toggle", &toggle);
                    if changed {
                        actions.push(DashboardAction::ThemeChanged);
                    }
                });
            });
            ui.add_space(ITEM_SPACING);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.add_space(SECTION_SPACING);
                ui.heading(format!("Good to see you, {}", self.user.name));
                ui.label(egui::RichText::new("Here's what's happening today").weak());
                ui.add_space(SECTION_SPACING);

                let briefing = self.briefing_card(ui);
                targets.mark("daily-briefing", &briefing);
                ui.add_space(SECTION_SPACING);

                let notes = self.notes.ui(ui);
                targets.mark("quick-notes", &notes);
                ui.add_space(SECTION_SPACING);

                let assistant = self.assistant.ui(ui);
                targets.mark("ai-assistant", &assistant);
                ui.add_space(SECTION_SPACING);
            });
        });

        self.briefing_window(ctx);

        actions
    }

    fn briefing_card(&mut self, ui: &mut egui::Ui) -> egui::Response {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("☀ Daily Briefing").strong());
                ui.label(format!(
                    "{} events, {} tasks and {} headlines today",
                    BRIEFING.events.len(),
                    BRIEFING.tasks.len(),
                    BRIEFING.news.len()
                ));
                ui.add_space(ITEM_SPACING);
                if ui.button("Open briefing").clicked() {
                    self.show_briefing = true;
                }
            })
            .response
    }

    fn export_briefing() -> Result<std::path::PathBuf> {
        let today = chrono::Local::now().date_naive();
        mock::export_briefing(&BRIEFING, &mock::export_dir()?, today)
    }

    fn briefing_window(&mut self, ctx: &egui::Context) {
        let export_status = &mut self.export_status;
        egui::Window::new("Daily Briefing")
            .open(&mut self.show_briefing)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let sections: [(&str, &[&str]); 4] = [
                    ("Today's events", BRIEFING.events),
                    ("Tasks", BRIEFING.tasks),
                    ("News", BRIEFING.news),
                    ("Suggestions", BRIEFING.suggestions),
                ];
                for (heading, items) in sections {
                    ui.label(egui::RichText::new(heading).strong());
                    for item in items {
                        ui.label(format!("• {item}"));
                    }
                    ui.add_space(ITEM_SPACING);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Export as Markdown").clicked() {
                        *export_status = Some(match Self::export_briefing() {
                            Ok(path) => StatusMessage {
                                text: format!("Saved to {}", path.display()),
                                color: STATUS_OK,
                            },
                            Err(err) => {
                                error!(error = ?err, "Failed to export daily briefing");
                                StatusMessage {
                                    text: format!("Export failed: {err}"),
                                    color: STATUS_ERROR,
                                }
                            }
                        });
                    }
                });
                if let Some(message) = export_status.as_ref() {
                    ui.colored_label(message.color, &message.text);
                }
            });
    }
}
