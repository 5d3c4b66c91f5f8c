//! Inspector panel rendered from the registry's UI descriptors.
//!
//! Widgets edit local copies of each value and write back through the typed
//! setters, so every edit goes through the same clamping and validation as
//! any other write. Settings hidden at runtime simply never appear in the
//! descriptor tree.

use glam::Vec3;
use glimmer_registry::{describe, Registry, UiControl, UiNode, UiSetting};

/// Settings window for the whole registry tree.
pub fn show_window(ctx: &egui::Context, registry: &mut Registry) {
    egui::Window::new("Settings")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(8.0, 8.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            show(ui, registry);
        });
}

/// Renders the registry into an existing panel.
pub fn show(ui: &mut egui::Ui, registry: &mut Registry) {
    let nodes = describe(registry);
    for node in &nodes {
        draw_node(ui, registry, node);
    }
}

fn draw_node(ui: &mut egui::Ui, registry: &mut Registry, node: &UiNode) {
    match node {
        UiNode::Group(group) => {
            egui::CollapsingHeader::new(&group.name)
                .default_open(group.expanded)
                .show(ui, |ui| {
                    for child in &group.children {
                        draw_node(ui, registry, child);
                    }
                });
        }
        UiNode::Setting(setting) => draw_setting(ui, registry, setting),
    }
}

fn draw_setting(ui: &mut egui::Ui, registry: &mut Registry, setting: &UiSetting) {
    let handle = setting.handle;
    match &setting.control {
        UiControl::Checkbox { value } => {
            let mut v = *value;
            let response = ui.checkbox(&mut v, &setting.label);
            if response.changed() {
                registry.set_bool(handle, v);
            }
            add_help(response, setting);
        }
        UiControl::Float {
            value,
            min,
            max,
            step,
        } => {
            let mut v = *value;
            // Sliders need a usable upper bound; open-ended settings get a
            // drag control clamped at the declared minimum.
            let response = if *max < f32::MAX {
                ui.add(
                    egui::Slider::new(&mut v, *min..=*max)
                        .step_by(*step as f64)
                        .text(&setting.label),
                )
            } else {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::DragValue::new(&mut v)
                            .speed(*step as f64)
                            .range(*min..=*max),
                    );
                    ui.label(&setting.label);
                    response
                })
                .inner
            };
            if response.changed() {
                registry.set_float(handle, v);
            }
            add_help(response, setting);
        }
        UiControl::Int { value, min, max } => {
            let mut v = *value;
            let response = ui.add(egui::Slider::new(&mut v, *min..=*max).text(&setting.label));
            if response.changed() {
                registry.set_int(handle, v);
            }
            add_help(response, setting);
        }
        UiControl::Color { value, .. } => {
            let mut rgb = *value;
            let response = ui
                .horizontal(|ui| {
                    let response = ui.color_edit_button_rgb(&mut rgb);
                    ui.label(&setting.label);
                    response
                })
                .inner;
            if response.changed() {
                registry.set_color(handle, Vec3::from_array(rgb));
            }
            add_help(response, setting);
        }
        UiControl::Direction { value } => {
            let mut dir = *value;
            let mut changed = false;
            let response = ui
                .horizontal(|ui| {
                    for component in &mut dir {
                        changed |= ui
                            .add(egui::DragValue::new(component).speed(0.01))
                            .changed();
                    }
                    ui.label(&setting.label)
                })
                .inner;
            if changed {
                registry.set_direction(handle, Vec3::from_array(dir));
            }
            add_help(response, setting);
        }
        UiControl::Choice { selected, options } => {
            let mut current = *selected;
            let selected_label = options
                .iter()
                .find(|o| o.ordinal == current)
                .map(|o| o.label)
                .unwrap_or("?");
            let response = ui
                .horizontal(|ui| {
                    let response = egui::ComboBox::from_id_salt(handle)
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for option in options {
                                ui.selectable_value(&mut current, option.ordinal, option.label);
                            }
                        })
                        .response;
                    ui.label(&setting.label);
                    response
                })
                .inner;
            if current != *selected {
                // Ordinals come from the descriptor, so this cannot fail.
                let _ = registry.set_enum_ordinal(handle, current);
            }
            add_help(response, setting);
        }
        UiControl::Button => {
            let response = ui.button(&setting.label);
            if response.clicked() {
                registry.trigger(handle);
            }
            add_help(response, setting);
        }
    }
}

fn add_help(response: egui::Response, setting: &UiSetting) {
    if !setting.help.is_empty() {
        response.on_hover_text(&setting.help);
    }
}
