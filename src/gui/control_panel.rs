//! Control Panel Widget
//! Left side panel with the data source, year dropdown and export controls.

use crate::data::{Selection, YearSelector};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;
use tracing::warn;

/// Left side control panel.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub selector: YearSelector,
    pub open_after_export: bool,
    pub export_enabled: bool,
    pub is_loading: bool,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            selector: YearSelector::new(),
            open_after_export: true,
            export_enabled: false,
            is_loading: false,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace dropdown options after a load.
    pub fn populate_years(&mut self, years: &[i32]) {
        self.selector.populate(years);
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🛂 Border Crossings")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 90, 139)),
            );
            ui.label(
                RichText::new("Yearly totals explorer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file loaded".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Year").size(14.0).strong());
        ui.add_space(8.0);

        let mut picked: Option<String> = None;
        ui.horizontal(|ui| {
            ui.add_sized([60.0, 20.0], egui::Label::new("Show:"));
            ui.add_enabled_ui(!self.is_loading, |ui| {
                let current = self.selector.current().to_string();
                ComboBox::from_id_salt("year_dropdown")
                    .width(150.0)
                    .selected_text(&current)
                    .show_ui(ui, |ui| {
                        for option in self.selector.options() {
                            if ui
                                .selectable_label(current == option.value, &option.text)
                                .clicked()
                            {
                                picked = Some(option.value.clone());
                            }
                        }
                    });
            });
        });

        if let Some(value) = picked {
            match self.selector.select(&value) {
                Ok(Some(selection)) => action = ControlPanelAction::SelectionChanged(selection),
                Ok(None) => {}
                Err(e) => warn!(value = %value, error = %e, "ignored dropdown value"),
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let png_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }

                ui.add_space(6.0);

                let json_button = egui::Button::new(RichText::new("🧾 Export Chart JSON").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(json_button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
            ui.add_space(6.0);
            ui.checkbox(&mut self.open_after_export, "Open file after export");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged(Selection),
    ExportPng,
    ExportJson,
}
