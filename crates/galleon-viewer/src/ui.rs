//! UI overlays using bevy_egui
//!
//! Toolbar (disassemble toggle, zoom slider, rotation nudges), collapsible
//! parts list, metadata panel for the selected part, and a tooltip that
//! follows the cursor over hovered parts.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use galleon_core::view::{zoom_distance, DEFAULT_ZOOM_BASE};

use crate::app::{
    CameraSettings, DisassemblyState, FocusRequest, FocusTarget, Interaction, ShipRegistry,
    UiState,
};
use crate::interaction::PendingRotations;
use crate::model::ModelSession;

/// Grouped system parameters for the main UI system to work around Bevy's 16-param limit
#[derive(SystemParam)]
pub struct UiParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub interaction: ResMut<'w, Interaction>,
    pub registry: Res<'w, ShipRegistry>,
    pub camera_settings: ResMut<'w, CameraSettings>,
    pub disassembly: ResMut<'w, DisassemblyState>,
    pub focus: ResMut<'w, FocusRequest>,
    pub rotations: ResMut<'w, PendingRotations>,
    pub ui_state: ResMut<'w, UiState>,
    pub session: Res<'w, ModelSession>,
    pub windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(mut params: UiParams) {
    // Get the egui context - early return if not available.
    // Context is a cheap Arc handle; clone it so params stays borrowable.
    let ctx = match params.contexts.ctx_mut() {
        Ok(ctx) => ctx.clone(),
        Err(_) => return,
    };
    let style = ctx.style();

    toolbar(&ctx, &mut params);

    if params.ui_state.show_parts_panel {
        parts_panel(&ctx, &mut params);
    }

    info_panel(&ctx, &mut params);
    hover_tooltip(&ctx, &style, &params);

    // Load status overlays
    if let Some(message) = params.session.error() {
        egui::TopBottomPanel::bottom("load_error").show(&ctx, |ui| {
            ui.colored_label(egui::Color32::RED, message);
        });
    } else if params.session.is_loading() {
        egui::Area::new(egui::Id::new("loading"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(&ctx, |ui| {
                egui::Frame::popup(&style).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading model…");
                    });
                });
            });
    }
}

fn toolbar(ctx: &egui::Context, params: &mut UiParams) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let parts_text = if params.ui_state.show_parts_panel {
                "☰ Parts ✕"
            } else {
                "☰ Parts"
            };
            if ui.button(parts_text).clicked() {
                params.ui_state.show_parts_panel = !params.ui_state.show_parts_panel;
            }

            ui.separator();

            let toggle_text = if params.disassembly.exploded {
                "Assemble"
            } else {
                "Disassemble"
            };
            if ui.button(toggle_text).clicked() {
                params.disassembly.exploded = !params.disassembly.exploded;
            }

            ui.separator();

            ui.label("Zoom");
            let mut zoom = params.camera_settings.zoom_factor;
            if ui
                .add(egui::Slider::new(&mut zoom, 0.5..=3.0).show_value(false))
                .changed()
            {
                params.camera_settings.zoom_factor = zoom;
                params.camera_settings.target_distance = zoom_distance(DEFAULT_ZOOM_BASE, zoom);
            }

            ui.separator();

            // Rotation nudges act on the selected part, or the hovered one
            ui.label("Rotate");
            for (label, axis, sign) in [
                ("X+", Vec3::X, 1.0),
                ("X-", Vec3::X, -1.0),
                ("Y+", Vec3::Y, 1.0),
                ("Y-", Vec3::Y, -1.0),
                ("Z+", Vec3::Z, 1.0),
                ("Z-", Vec3::Z, -1.0),
            ] {
                if ui.button(label).clicked() {
                    params.rotations.push_nudge(axis, sign);
                }
            }

            ui.separator();

            if ui.button("Fit View").clicked() {
                params.focus.0 = Some(FocusTarget::Model);
            }
        });
    });
}

fn parts_panel(ctx: &egui::Context, params: &mut UiParams) {
    egui::SidePanel::left("parts_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Parts");
            ui.separator();

            if params.registry.parts.is_empty() {
                ui.label(egui::RichText::new("No parts registered yet").weak());
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for part in params.registry.parts.iter() {
                    let is_selected = params.interaction.state.selected() == Some(&part.id);
                    if ui.selectable_label(is_selected, part.label()).clicked() {
                        // Clicking the selected entry deselects it
                        let target = if is_selected {
                            None
                        } else {
                            Some(part.id.clone())
                        };
                        let changes = params.interaction.state.select(target.clone());
                        params.interaction.pending.extend(changes);
                        if let Some(id) = target {
                            params.focus.0 = Some(FocusTarget::Part(id));
                        }
                    }
                }
            });
        });
}

fn info_panel(ctx: &egui::Context, params: &mut UiParams) {
    let selected = params
        .interaction
        .state
        .selected()
        .and_then(|id| params.registry.parts.get(id))
        .cloned();
    let Some(part) = selected else {
        return;
    };

    egui::SidePanel::right("info_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading(part.info_name());
            ui.separator();

            ui.label(egui::RichText::new("Function").strong());
            ui.label(part.function_text());
            ui.add_space(8.0);

            ui.label(egui::RichText::new("History").strong());
            ui.label(part.history_text());
            ui.add_space(8.0);

            ui.label(egui::RichText::new(format!("Node: {}", part.node_name)).weak());
            ui.add_space(8.0);

            if ui.button("Deselect").clicked() {
                let changes = params.interaction.state.select(None);
                params.interaction.pending.extend(changes);
            }
        });
}

/// Name tag following the cursor while a part is hovered
fn hover_tooltip(ctx: &egui::Context, style: &egui::Style, params: &UiParams) {
    let hovered = params
        .interaction
        .state
        .hovered()
        .and_then(|id| params.registry.parts.get(id));
    let Some(part) = hovered else {
        return;
    };
    let Ok(window) = params.windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    egui::Area::new(egui::Id::new("part_tooltip"))
        .fixed_pos(egui::pos2(cursor.x + 15.0, cursor.y + 15.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(style).show(ui, |ui| {
                ui.label(egui::RichText::new(part.label()).strong());
                ui.label(format!("Function: {}", part.function_text()));
                ui.label(format!("History: {}", part.history_text()));
            });
        });
}
