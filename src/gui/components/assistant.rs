//! AI assistant card with a mocked, delayed reply

use std::time::{Duration, Instant};

use eframe::egui;

use crate::constants::timing::CHAT_REPLY_DELAY_MS;
use crate::gui::constants::*;
use crate::mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Assistant {
    input: String,
    transcript: Vec<ChatMessage>,
    /// Query awaiting a reply and when it was sent
    pending: Option<(String, Instant)>,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Queue the current input; ignored while a reply is outstanding
    pub fn send(&mut self) -> bool {
        let query = self.input.trim().to_string();
        if query.is_empty() || self.pending.is_some() {
            return false;
        }
        self.transcript.push(ChatMessage {
            speaker: Speaker::User,
            text: query.clone(),
        });
        self.input.clear();
        self.pending = Some((query, Instant::now()));
        true
    }

    fn deliver_reply(&mut self) {
        if let Some((query, _)) = self.pending.take() {
            self.transcript.push(ChatMessage {
                speaker: Speaker::Assistant,
                text: mock::chat_reply(&query),
            });
        }
    }

    fn poll_reply(&mut self, ctx: &egui::Context) {
        let Some((_, sent_at)) = &self.pending else {
            return;
        };
        let delay = Duration::from_millis(CHAT_REPLY_DELAY_MS);
        let elapsed = sent_at.elapsed();
        if elapsed < delay {
            ctx.request_repaint_after(delay - elapsed);
        } else {
            self.deliver_reply();
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        self.poll_reply(ui.ctx());

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("🤖 AI Assistant").strong());
                ui.add_space(ITEM_SPACING);

                egui::ScrollArea::vertical()
                    .id_salt("assistant_transcript")
                    .max_height(CHAT_MAX_HEIGHT)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if self.transcript.is_empty() {
                            ui.label(egui::RichText::new("Ask me anything about your day.").weak());
                        }
                        for message in &self.transcript {
                            match message.speaker {
                                Speaker::User => {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                                        ui.colored_label(ACCENT, &message.text);
                                    });
                                }
                                Speaker::Assistant => {
                                    ui.label(&message.text);
                                }
                            }
                        }
                        if self.is_thinking() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(egui::RichText::new("Thinking...").weak());
                            });
                        }
                    });

                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .hint_text("Type a message")
                            .desired_width(ui.available_width() - 60.0),
                    );
                    let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Send").clicked() || submitted {
                        self.send();
                    }
                });
            })
            .response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_queues_query() {
        let mut assistant = Assistant::new();
        assistant.input = "  what's next?  ".into();
        assert!(assistant.send());

        assert!(assistant.is_thinking());
        assert!(assistant.input.is_empty());
        assert_eq!(
            assistant.transcript,
            [ChatMessage {
                speaker: Speaker::User,
                text: "what's next?".into()
            }]
        );
    }

    #[test]
    fn test_send_blocked_while_thinking() {
        let mut assistant = Assistant::new();
        assistant.input = "one".into();
        assert!(assistant.send());
        assistant.input = "two".into();
        assert!(!assistant.send());
        assert_eq!(assistant.transcript.len(), 1);
    }

    #[test]
    fn test_reply_appended() {
        let mut assistant = Assistant::new();
        assistant.input = "hello".into();
        assistant.send();
        assistant.deliver_reply();

        assert!(!assistant.is_thinking());
        let last = assistant.transcript.last().map(|m| (m.speaker, m.text.as_str()));
        assert_eq!(last, Some((Speaker::Assistant, "Say what you want.")));
    }
}
