//! UI descriptor projection.
//!
//! `describe` flattens the registry into a declaration-ordered tree of plain
//! descriptors. This sequence is the sole contract with any inspector
//! surface: a UI renders the descriptors and writes back through the typed
//! setters, never by reaching into the registry another way. Settings with
//! `visible == false` are omitted (they still export and persist).

use crate::registry::{Child, GroupHandle, Payload, Registry, SettingHandle};

#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    Group(UiGroup),
    Setting(UiSetting),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiGroup {
    pub name: String,
    /// Default expansion state of the group header.
    pub expanded: bool,
    pub children: Vec<UiNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiSetting {
    pub handle: SettingHandle,
    pub name: String,
    /// Display name when declared, otherwise the registered name.
    pub label: String,
    pub help: String,
    pub control: UiControl,
}

/// One dropdown option: ordinal plus display label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiChoice {
    pub ordinal: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiControl {
    Checkbox {
        value: bool,
    },
    /// Unbounded sides carry `f32::MIN` / `f32::MAX`; a UI should fall back
    /// to a drag control when `max` is unbounded.
    Float {
        value: f32,
        min: f32,
        max: f32,
        step: f32,
    },
    Int {
        value: i32,
        min: i32,
        max: i32,
    },
    Color {
        value: [f32; 3],
        hdr: bool,
    },
    Direction {
        value: [f32; 3],
    },
    Choice {
        selected: u32,
        options: Vec<UiChoice>,
    },
    Button,
}

/// Descriptors for the root group's children, in declaration order.
/// Idempotent: identical output for identical registry state.
pub fn describe(registry: &Registry) -> Vec<UiNode> {
    describe_group(registry, registry.root())
}

fn describe_group(registry: &Registry, group: GroupHandle) -> Vec<UiNode> {
    let mut nodes = Vec::new();
    for child in &registry.group(group).children {
        match *child {
            Child::Group(g) => {
                let inner = registry.group(g);
                nodes.push(UiNode::Group(UiGroup {
                    name: inner.name.clone(),
                    expanded: inner.expanded,
                    children: describe_group(registry, g),
                }));
            }
            Child::Setting(s) => {
                if let Some(setting) = describe_setting(registry, s) {
                    nodes.push(UiNode::Setting(setting));
                }
            }
        }
    }
    nodes
}

fn describe_setting(registry: &Registry, handle: SettingHandle) -> Option<UiSetting> {
    let slot = registry.slot(handle);
    if !slot.visible {
        return None;
    }
    let control = match slot.payload {
        Payload::Bool => UiControl::Checkbox {
            value: registry.bool(handle),
        },
        Payload::Float {
            min, max, step, ..
        } => UiControl::Float {
            value: registry.float(handle),
            min,
            max,
            step,
        },
        Payload::Int { min, max, .. } => UiControl::Int {
            value: registry.int(handle),
            min,
            max,
        },
        Payload::Color { hdr } => UiControl::Color {
            value: registry.color(handle).to_array(),
            hdr,
        },
        Payload::Direction => UiControl::Direction {
            value: registry.direction(handle).to_array(),
        },
        Payload::Enum { descriptor } => UiControl::Choice {
            selected: registry.enum_ordinal(handle),
            options: descriptor
                .variants
                .iter()
                .map(|v| UiChoice {
                    ordinal: v.ordinal,
                    label: v.label,
                })
                .collect(),
        },
        Payload::Trigger => UiControl::Button,
    };
    Some(UiSetting {
        handle,
        name: slot.name.clone(),
        label: slot
            .display_name
            .clone()
            .unwrap_or_else(|| slot.name.clone()),
        help: slot.help.clone(),
        control,
    })
}
