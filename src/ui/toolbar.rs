use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::map::{MapStyle, SetMapStyle};
use crate::planner::{PlannerState, PlannerStatus, SetTransportMode, TransportMode};

/// Main toolbar: transport mode and map style selectors plus the
/// distance/ETA readout
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    state: Res<PlannerState>,
    mut modes: MessageWriter<SetTransportMode>,
    mut styles: MessageWriter<SetMapStyle>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                ui.label(egui::RichText::new("Wayfarer").size(16.0).strong());

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label("Mode:");
                egui::ComboBox::from_id_salt("transport_mode_select")
                    .selected_text(state.mode.display_name())
                    .width(100.0)
                    .show_ui(ui, |ui| {
                        for mode in TransportMode::all() {
                            let is_selected = state.mode == *mode;
                            if ui
                                .selectable_label(is_selected, mode.display_name())
                                .clicked()
                                && !is_selected
                            {
                                modes.write(SetTransportMode { mode: *mode });
                            }
                        }
                    });

                ui.add_space(8.0);

                ui.label("Style:");
                egui::ComboBox::from_id_salt("map_style_select")
                    .selected_text(state.map_style.display_name())
                    .width(100.0)
                    .show_ui(ui, |ui| {
                        for style in MapStyle::all() {
                            let is_selected = state.map_style == *style;
                            if ui
                                .selectable_label(is_selected, style.display_name())
                                .clicked()
                                && !is_selected
                            {
                                styles.write(SetMapStyle { style: *style });
                            }
                        }
                    });

                // Right-aligned trip metrics
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !state.distance_text.is_empty() {
                        let eta = ui.strong(&state.duration_text);
                        if let Some(ref result) = state.last_result {
                            eta.on_hover_text(format!(
                                "{:.0} m, {:.0} s",
                                result.distance_meters, result.duration_seconds
                            ));
                        }
                        ui.label("ETA:");
                        ui.add_space(12.0);
                        ui.strong(&state.distance_text);
                        ui.label("Distance:");
                    } else if state.end_point.is_none() {
                        ui.label(
                            egui::RichText::new("Click the map to set a destination")
                                .color(egui::Color32::GRAY),
                        );
                    }
                });
            });
        });
    Ok(())
}

/// Status line: request progress and the most recent reported error
pub fn status_ui(
    mut contexts: EguiContexts,
    status: Res<PlannerStatus>,
    reset_notification: Res<ConfigResetNotification>,
) -> Result {
    let busy = status.locating || status.routing;
    let has_message = status.last_error.is_some() || reset_notification.show;
    if !busy && !has_message {
        return Ok(());
    }

    egui::TopBottomPanel::bottom("status_line").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            if status.locating {
                ui.spinner();
                ui.label("Locating device...");
            } else if status.routing {
                ui.spinner();
                ui.label("Calculating route...");
            }

            if let Some(ref error) = status.last_error {
                ui.colored_label(egui::Color32::from_rgb(255, 100, 100), error);
            }

            if reset_notification.show
                && let Some(ref reason) = reset_notification.reason
            {
                ui.colored_label(egui::Color32::from_rgb(255, 165, 0), reason);
            }
        });
    });
    Ok(())
}
