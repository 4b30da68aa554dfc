//! Quick note card: in-memory notes with a short "Saved" confirmation

use std::time::{Duration, Instant};

use eframe::egui;

use crate::constants::timing::NOTE_SAVED_FLASH_MS;
use crate::gui::constants::*;

#[derive(Debug, Default)]
pub struct QuickNotes {
    draft: String,
    notes: Vec<String>,
    saved_at: Option<Instant>,
}

impl QuickNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the trimmed draft; blank drafts are ignored
    pub fn save_draft(&mut self) -> bool {
        let note = self.draft.trim();
        if note.is_empty() {
            return false;
        }
        self.notes.insert(0, note.to_string());
        self.draft.clear();
        self.saved_at = Some(Instant::now());
        true
    }

    fn saved_flash_visible(&mut self, ctx: &egui::Context) -> bool {
        let Some(saved_at) = self.saved_at else {
            return false;
        };
        let flash = Duration::from_millis(NOTE_SAVED_FLASH_MS);
        let elapsed = saved_at.elapsed();
        if elapsed >= flash {
            self.saved_at = None;
            return false;
        }
        ctx.request_repaint_after(flash - elapsed);
        true
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("📝 Quick Note").strong());
                    if self.saved_flash_visible(ui.ctx()) {
                        ui.colored_label(STATUS_OK, "Saved");
                    }
                });
                ui.add_space(ITEM_SPACING);

                ui.add(
                    egui::TextEdit::multiline(&mut self.draft)
                        .hint_text("Jot something down...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                if ui
                    .add_enabled(!self.draft.trim().is_empty(), egui::Button::new("Save note"))
                    .clicked()
                {
                    self.save_draft();
                }

                if !self.notes.is_empty() {
                    ui.add_space(ITEM_SPACING);
                    ui.separator();
                    for note in &self.notes {
                        ui.label(format!("• {note}"));
                    }
                }
            })
            .response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_draft_not_saved() {
        let mut notes = QuickNotes::new();
        notes.draft = "   ".into();
        assert!(!notes.save_draft());
        assert!(notes.notes.is_empty());
        assert!(notes.saved_at.is_none());
    }

    #[test]
    fn test_newest_note_first() {
        let mut notes = QuickNotes::new();
        notes.draft = "first".into();
        assert!(notes.save_draft());
        notes.draft = "  second  ".into();
        assert!(notes.save_draft());

        assert_eq!(notes.notes, vec!["second".to_string(), "first".to_string()]);
        assert!(notes.draft.is_empty());
        assert!(notes.saved_at.is_some());
    }
}
