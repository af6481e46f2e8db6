/// Selector panes
///
/// Each pane shows a model combo box and a backend combo box, plus the caption
/// block under them (mean time, thread count, sample count). Rendering never
/// mutates the controller; a change is reported back as a `PaneAction`.

use eframe::egui;

use super::DashboardController;
use crate::models::{ModelChoice, Pane};

/// Selector change requested by the user
#[derive(Debug, Clone, PartialEq)]
pub enum PaneAction {
    SelectModel(Pane, ModelChoice),
    SelectBackend(Pane, usize),
}

fn pane_heading(pane: Pane) -> &'static str {
    match pane {
        Pane::Primary => "Model",
        Pane::Secondary => "Compare with",
    }
}

/// Render one pane; returns the selector change made this frame, if any
pub fn render_pane(ui: &mut egui::Ui, pane: Pane, controller: &DashboardController) -> Option<PaneAction> {
    let mut action = None;
    let selection = controller.selection(pane);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading(pane_heading(pane));

        let models = controller.model_options(pane);
        ui.add_enabled_ui(!models.is_empty(), |ui| {
            egui::ComboBox::from_id_source(format!("{}_model", pane.as_str()))
                .width(ui.available_width() - 8.0)
                .selected_text(selection.model().label())
                .show_ui(ui, |ui| {
                    for option in models {
                        let selected = &option.value == selection.model();
                        if ui.selectable_label(selected, &option.label).clicked() && !selected {
                            action = Some(PaneAction::SelectModel(pane, option.value.clone()));
                        }
                    }
                });
        });

        ui.add_space(4.0);

        let backends = controller.backend_options(pane);
        ui.add_enabled_ui(!backends.is_empty(), |ui| {
            egui::ComboBox::from_id_source(format!("{}_backend", pane.as_str()))
                .width(ui.available_width() - 8.0)
                .selected_text(selection.backend_label().unwrap_or("-"))
                .show_ui(ui, |ui| {
                    for option in backends {
                        let selected = selection.backend() == Some(option.value);
                        if ui.selectable_label(selected, &option.label).clicked() && !selected {
                            action = Some(PaneAction::SelectBackend(pane, option.value));
                        }
                    }
                });
        });

        ui.add_space(6.0);

        let mean = controller.mean_time_text(pane);
        if !mean.is_empty() {
            ui.label(egui::RichText::new(mean).strong());
        }

        if let Some(record) = controller.resolved_record(pane) {
            if let Some(threads) = record.threads {
                ui.label(format!("Threads: {}", threads));
            }
            ui.label(
                egui::RichText::new(format!("{} layer samples", record.times.len()))
                    .small()
                    .weak(),
            );
        }
    });

    action
}
