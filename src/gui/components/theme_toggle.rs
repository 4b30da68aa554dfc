//! Light / Dark / System theme switcher

use eframe::egui;

use crate::config::ThemePreference;

fn icon(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Light => "☀",
        ThemePreference::Dark => "🌙",
        ThemePreference::System => "🖥",
    }
}

pub fn to_egui(theme: ThemePreference) -> egui::ThemePreference {
    match theme {
        ThemePreference::Light => egui::ThemePreference::Light,
        ThemePreference::Dark => egui::ThemePreference::Dark,
        ThemePreference::System => egui::ThemePreference::System,
    }
}

/// Renders the toggle and returns true if the theme changed
/// The returned response covers the whole button group
pub fn ui(ui: &mut egui::Ui, theme: &mut ThemePreference) -> (egui::Response, bool) {
    let mut changed = false;

    let inner = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(2))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for option in ThemePreference::ALL {
                    let selected = *theme == option;
                    if ui
                        .selectable_label(selected, icon(option))
                        .on_hover_text(option.label())
                        .clicked()
                        && !selected
                    {
                        *theme = option;
                        changed = true;
                    }
                }
            });
        });

    (inner.response, changed)
}
