//! The settings registry: a tree of groups and typed, bounded settings.
//!
//! The tree is built once at startup from a static declaration and never
//! restructured afterwards; only values (and per-setting visibility) change.
//! Registration errors are authoring bugs and abort initialization. Access
//! through a stale or mismatched handle is a programmer error and panics
//! with the setting path.
//!
//! Write policy: numeric writes are clamped into their declared bounds,
//! non-finite float writes and zero-length direction writes are dropped, and
//! enum writes of undeclared ordinals are rejected. A stored value can never
//! violate its declaration.

use glam::Vec3;
use glimmer_core::enums::{EnumDescriptor, EnumSetting};
use glimmer_core::error::RegistryError;
use glimmer_core::value::{SettingKind, SettingValue};

use crate::decl::{
    BoolDecl, ColorDecl, DirectionDecl, EnumDecl, FloatDecl, IntDecl, Meta, TriggerDecl,
};

/// Handle to a registered group. Only obtainable from registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub(crate) u32);

/// Handle to a registered setting. Only obtainable from registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingHandle(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Child {
    Group(GroupHandle),
    Setting(SettingHandle),
}

pub(crate) struct Group {
    pub name: String,
    pub expanded: bool,
    pub parent: Option<GroupHandle>,
    pub children: Vec<Child>,
}

/// Kind-specific declaration data kept alongside each stored value.
pub(crate) enum Payload {
    Bool,
    Float {
        min: f32,
        max: f32,
        step: f32,
        export_scale: f32,
    },
    Int {
        min: i32,
        max: i32,
        export_scale: i32,
    },
    Color {
        hdr: bool,
    },
    Direction,
    Enum {
        descriptor: &'static EnumDescriptor,
    },
    Trigger,
}

pub(crate) struct Slot {
    pub name: String,
    pub display_name: Option<String>,
    pub help: String,
    pub visible: bool,
    pub shader_constant: bool,
    pub group: GroupHandle,
    pub payload: Payload,
    pub value: SettingValue,
    /// Trigger settings only: armed until the per-frame poll consumes it.
    pub armed: bool,
}

/// The canonical settings tree.
///
/// Single-threaded: one owner mutates values (UI/input step), one
/// consumer reads projections (render export step), with all writes for a
/// frame completing before that frame's export. The `&mut` receivers make
/// the ownership rule compiler-enforced; there is no internal
/// synchronization.
pub struct Registry {
    pub(crate) groups: Vec<Group>,
    pub(crate) settings: Vec<Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            groups: vec![Group {
                name: String::new(),
                expanded: true,
                parent: None,
                children: Vec::new(),
            }],
            settings: Vec::new(),
        }
    }

    /// The implicit root group: the full settings document.
    pub fn root(&self) -> GroupHandle {
        GroupHandle(0)
    }

    // ---- registration -------------------------------------------------

    pub fn add_group(
        &mut self,
        parent: GroupHandle,
        name: &str,
        expanded: bool,
    ) -> Result<GroupHandle, RegistryError> {
        validate_name(name)?;
        self.check_collision(parent, name)?;
        let handle = GroupHandle(self.groups.len() as u32);
        self.groups.push(Group {
            name: name.to_owned(),
            expanded,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.group_mut(parent).children.push(Child::Group(handle));
        Ok(handle)
    }

    pub fn add_bool(
        &mut self,
        group: GroupHandle,
        decl: BoolDecl,
    ) -> Result<SettingHandle, RegistryError> {
        self.insert(
            group,
            decl.meta,
            Payload::Bool,
            SettingValue::Bool(decl.default),
        )
    }

    pub fn add_float(
        &mut self,
        group: GroupHandle,
        decl: FloatDecl,
    ) -> Result<SettingHandle, RegistryError> {
        let path = self.child_path(group, &decl.meta.name);
        if !decl.default.is_finite() {
            return Err(RegistryError::DefaultNotFinite { path });
        }
        if decl.min > decl.max || decl.default < decl.min || decl.default > decl.max {
            return Err(RegistryError::DefaultOutOfBounds {
                path,
                value: decl.default as f64,
                min: decl.min as f64,
                max: decl.max as f64,
            });
        }
        self.insert(
            group,
            decl.meta,
            Payload::Float {
                min: decl.min,
                max: decl.max,
                step: decl.step,
                export_scale: decl.export_scale,
            },
            SettingValue::Float(decl.default),
        )
    }

    pub fn add_int(
        &mut self,
        group: GroupHandle,
        decl: IntDecl,
    ) -> Result<SettingHandle, RegistryError> {
        if decl.min > decl.max || decl.default < decl.min || decl.default > decl.max {
            return Err(RegistryError::DefaultOutOfBounds {
                path: self.child_path(group, &decl.meta.name),
                value: decl.default as f64,
                min: decl.min as f64,
                max: decl.max as f64,
            });
        }
        self.insert(
            group,
            decl.meta,
            Payload::Int {
                min: decl.min,
                max: decl.max,
                export_scale: decl.export_scale,
            },
            SettingValue::Int(decl.default),
        )
    }

    pub fn add_color(
        &mut self,
        group: GroupHandle,
        decl: ColorDecl,
    ) -> Result<SettingHandle, RegistryError> {
        let path = self.child_path(group, &decl.meta.name);
        if !decl.default.is_finite() {
            return Err(RegistryError::DefaultNotFinite { path });
        }
        let max = if decl.hdr { f32::MAX } else { 1.0 };
        for channel in decl.default.to_array() {
            if channel < 0.0 || channel > max {
                return Err(RegistryError::DefaultOutOfBounds {
                    path,
                    value: channel as f64,
                    min: 0.0,
                    max: max as f64,
                });
            }
        }
        self.insert(
            group,
            decl.meta,
            Payload::Color { hdr: decl.hdr },
            SettingValue::Color(decl.default),
        )
    }

    pub fn add_direction(
        &mut self,
        group: GroupHandle,
        decl: DirectionDecl,
    ) -> Result<SettingHandle, RegistryError> {
        let path = self.child_path(group, &decl.meta.name);
        if !decl.default.is_finite() {
            return Err(RegistryError::DefaultNotFinite { path });
        }
        if decl.default.length_squared() == 0.0 {
            return Err(RegistryError::ZeroLengthDirection { path });
        }
        self.insert(
            group,
            decl.meta,
            Payload::Direction,
            SettingValue::Direction(decl.default.normalize()),
        )
    }

    pub fn add_enum<T: EnumSetting>(
        &mut self,
        group: GroupHandle,
        decl: EnumDecl<T>,
    ) -> Result<SettingHandle, RegistryError> {
        self.insert(
            group,
            decl.meta,
            Payload::Enum {
                descriptor: T::DESCRIPTOR,
            },
            SettingValue::Enum(decl.default.ordinal()),
        )
    }

    pub fn add_trigger(
        &mut self,
        group: GroupHandle,
        decl: TriggerDecl,
    ) -> Result<SettingHandle, RegistryError> {
        self.insert(group, decl.meta, Payload::Trigger, SettingValue::Trigger)
    }

    fn insert(
        &mut self,
        group: GroupHandle,
        meta: Meta,
        payload: Payload,
        value: SettingValue,
    ) -> Result<SettingHandle, RegistryError> {
        validate_name(&meta.name)?;
        self.check_collision(group, &meta.name)?;
        let handle = SettingHandle(self.settings.len() as u32);
        self.settings.push(Slot {
            name: meta.name,
            display_name: meta.display_name,
            help: meta.help,
            visible: meta.visible,
            shader_constant: meta.shader_constant,
            group,
            payload,
            value,
            armed: false,
        });
        self.group_mut(group).children.push(Child::Setting(handle));
        Ok(handle)
    }

    fn check_collision(&self, parent: GroupHandle, name: &str) -> Result<(), RegistryError> {
        let taken = self.group(parent).children.iter().any(|child| match child {
            Child::Group(g) => self.group(*g).name == name,
            Child::Setting(s) => self.slot(*s).name == name,
        });
        if taken {
            return Err(RegistryError::DuplicateName {
                group: self.group_path(parent),
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    // ---- typed access -------------------------------------------------

    pub fn bool(&self, handle: SettingHandle) -> bool {
        match self.slot(handle).value {
            SettingValue::Bool(v) => v,
            _ => self.kind_panic(handle, SettingKind::Bool),
        }
    }

    pub fn set_bool(&mut self, handle: SettingHandle, value: bool) {
        match self.slot(handle).payload {
            Payload::Bool => self.slot_mut(handle).value = SettingValue::Bool(value),
            _ => self.kind_panic(handle, SettingKind::Bool),
        }
    }

    pub fn float(&self, handle: SettingHandle) -> f32 {
        match self.slot(handle).value {
            SettingValue::Float(v) => v,
            _ => self.kind_panic(handle, SettingKind::Float),
        }
    }

    /// Clamps into the declared bounds and returns the stored value.
    /// Non-finite writes are dropped and leave the prior value.
    pub fn set_float(&mut self, handle: SettingHandle, value: f32) -> f32 {
        let (min, max) = match self.slot(handle).payload {
            Payload::Float { min, max, .. } => (min, max),
            _ => self.kind_panic(handle, SettingKind::Float),
        };
        if !value.is_finite() {
            log::warn!("dropping non-finite write to '{}'", self.path(handle));
            return self.float(handle);
        }
        let stored = value.clamp(min, max);
        self.slot_mut(handle).value = SettingValue::Float(stored);
        stored
    }

    pub fn int(&self, handle: SettingHandle) -> i32 {
        match self.slot(handle).value {
            SettingValue::Int(v) => v,
            _ => self.kind_panic(handle, SettingKind::Int),
        }
    }

    /// Clamps into the declared bounds and returns the stored value.
    pub fn set_int(&mut self, handle: SettingHandle, value: i32) -> i32 {
        let (min, max) = match self.slot(handle).payload {
            Payload::Int { min, max, .. } => (min, max),
            _ => self.kind_panic(handle, SettingKind::Int),
        };
        let stored = value.clamp(min, max);
        self.slot_mut(handle).value = SettingValue::Int(stored);
        stored
    }

    pub fn color(&self, handle: SettingHandle) -> Vec3 {
        match self.slot(handle).value {
            SettingValue::Color(v) => v,
            _ => self.kind_panic(handle, SettingKind::Color),
        }
    }

    /// Clamps channels to [0, 1] for LDR colors, to >= 0 for HDR colors.
    /// Non-finite writes are dropped and leave the prior value.
    pub fn set_color(&mut self, handle: SettingHandle, value: Vec3) -> Vec3 {
        let hdr = match self.slot(handle).payload {
            Payload::Color { hdr } => hdr,
            _ => self.kind_panic(handle, SettingKind::Color),
        };
        if !value.is_finite() {
            log::warn!("dropping non-finite write to '{}'", self.path(handle));
            return self.color(handle);
        }
        let max = if hdr { Vec3::MAX } else { Vec3::ONE };
        let stored = value.clamp(Vec3::ZERO, max);
        self.slot_mut(handle).value = SettingValue::Color(stored);
        stored
    }

    pub fn direction(&self, handle: SettingHandle) -> Vec3 {
        match self.slot(handle).value {
            SettingValue::Direction(v) => v,
            _ => self.kind_panic(handle, SettingKind::Direction),
        }
    }

    /// Normalizes and returns the stored value. Zero-length and non-finite
    /// writes are dropped and leave the prior value.
    pub fn set_direction(&mut self, handle: SettingHandle, value: Vec3) -> Vec3 {
        match self.slot(handle).payload {
            Payload::Direction => {}
            _ => self.kind_panic(handle, SettingKind::Direction),
        }
        if !value.is_finite() || value.length_squared() == 0.0 {
            log::warn!("dropping degenerate direction write to '{}'", self.path(handle));
            return self.direction(handle);
        }
        // Already-unit vectors are stored bit-identically so that profile
        // round-trips are exact.
        let stored = if (value.length_squared() - 1.0).abs() < 1e-6 {
            value
        } else {
            value.normalize()
        };
        self.slot_mut(handle).value = SettingValue::Direction(stored);
        stored
    }

    pub fn enum_ordinal(&self, handle: SettingHandle) -> u32 {
        match self.slot(handle).value {
            SettingValue::Enum(v) => v,
            _ => self.kind_panic(handle, SettingKind::Enum),
        }
    }

    /// Rejects ordinals that are not declared variants, leaving the prior
    /// value in place.
    pub fn set_enum_ordinal(
        &mut self,
        handle: SettingHandle,
        ordinal: u32,
    ) -> Result<(), RegistryError> {
        let descriptor = self.enum_descriptor_of(handle);
        if !descriptor.contains(ordinal) {
            return Err(RegistryError::UnknownVariant {
                path: self.path(handle),
                enum_name: descriptor.name,
                ordinal,
            });
        }
        self.slot_mut(handle).value = SettingValue::Enum(ordinal);
        Ok(())
    }

    pub fn enum_value<T: EnumSetting>(&self, handle: SettingHandle) -> T {
        let descriptor = self.enum_descriptor_of(handle);
        if !std::ptr::eq(descriptor, T::DESCRIPTOR) {
            panic!(
                "setting '{}' holds enum '{}' but was accessed as '{}'",
                self.path(handle),
                descriptor.name,
                T::DESCRIPTOR.name
            );
        }
        T::from_ordinal(self.enum_ordinal(handle)).expect("ordinal validated at write time")
    }

    /// Typed enum write; always valid by construction.
    pub fn set_enum<T: EnumSetting>(&mut self, handle: SettingHandle, value: T) {
        let descriptor = self.enum_descriptor_of(handle);
        if !std::ptr::eq(descriptor, T::DESCRIPTOR) {
            panic!(
                "setting '{}' holds enum '{}' but was accessed as '{}'",
                self.path(handle),
                descriptor.name,
                T::DESCRIPTOR.name
            );
        }
        self.slot_mut(handle).value = SettingValue::Enum(value.ordinal());
    }

    fn enum_descriptor_of(&self, handle: SettingHandle) -> &'static EnumDescriptor {
        match self.slot(handle).payload {
            Payload::Enum { descriptor } => descriptor,
            _ => self.kind_panic(handle, SettingKind::Enum),
        }
    }

    /// Arms a trigger setting. The armed state is consumed by
    /// [`Registry::take_trigger`], never persisted or exported.
    pub fn trigger(&mut self, handle: SettingHandle) {
        match self.slot(handle).payload {
            Payload::Trigger => self.slot_mut(handle).armed = true,
            _ => self.kind_panic(handle, SettingKind::Trigger),
        }
    }

    /// Per-frame poll: returns whether the trigger fired since the last poll
    /// and resets it to idle.
    pub fn take_trigger(&mut self, handle: SettingHandle) -> bool {
        match self.slot(handle).payload {
            Payload::Trigger => std::mem::take(&mut self.slot_mut(handle).armed),
            _ => self.kind_panic(handle, SettingKind::Trigger),
        }
    }

    /// Generic read. Never fails for a valid handle; triggers always read as
    /// idle.
    pub fn value(&self, handle: SettingHandle) -> SettingValue {
        self.slot(handle).value
    }

    // ---- metadata -----------------------------------------------------

    pub fn kind(&self, handle: SettingHandle) -> SettingKind {
        self.slot(handle).value.kind()
    }

    pub fn visible(&self, handle: SettingHandle) -> bool {
        self.slot(handle).visible
    }

    /// Runtime visibility toggle, used by schemas that show or hide controls
    /// based on other settings' values.
    pub fn set_visible(&mut self, handle: SettingHandle, visible: bool) {
        self.slot_mut(handle).visible = visible;
    }

    pub fn enum_descriptor(&self, handle: SettingHandle) -> Option<&'static EnumDescriptor> {
        match self.slot(handle).payload {
            Payload::Enum { descriptor } => Some(descriptor),
            _ => None,
        }
    }

    /// Fully-qualified name: group path plus setting name, '.'-separated.
    pub fn path(&self, handle: SettingHandle) -> String {
        let slot = self.slot(handle);
        let group_path = self.group_path(slot.group);
        if group_path.is_empty() {
            slot.name.clone()
        } else {
            format!("{}.{}", group_path, slot.name)
        }
    }

    /// Resolves a fully-qualified name back to a handle.
    pub fn find(&self, path: &str) -> Option<SettingHandle> {
        let mut group = self.root();
        let mut segments = path.split('.').peekable();
        loop {
            let segment = segments.next()?;
            if segments.peek().is_none() {
                return self.group(group).children.iter().find_map(|child| {
                    match child {
                        Child::Setting(s) if self.slot(*s).name == segment => Some(*s),
                        _ => None,
                    }
                });
            }
            group = self.group(group).children.iter().find_map(|child| match child {
                Child::Group(g) if self.group(*g).name == segment => Some(*g),
                _ => None,
            })?;
        }
    }

    /// All setting handles in declaration order.
    pub fn handles(&self) -> impl Iterator<Item = SettingHandle> {
        (0..self.settings.len() as u32).map(SettingHandle)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    // ---- internals ----------------------------------------------------

    pub(crate) fn slot(&self, handle: SettingHandle) -> &Slot {
        match self.settings.get(handle.0 as usize) {
            Some(slot) => slot,
            None => panic!("invalid setting handle: index {} of {}", handle.0, self.settings.len()),
        }
    }

    fn slot_mut(&mut self, handle: SettingHandle) -> &mut Slot {
        let len = self.settings.len();
        match self.settings.get_mut(handle.0 as usize) {
            Some(slot) => slot,
            None => panic!("invalid setting handle: index {} of {}", handle.0, len),
        }
    }

    pub(crate) fn group(&self, handle: GroupHandle) -> &Group {
        match self.groups.get(handle.0 as usize) {
            Some(group) => group,
            None => panic!("invalid group handle: index {} of {}", handle.0, self.groups.len()),
        }
    }

    fn group_mut(&mut self, handle: GroupHandle) -> &mut Group {
        let len = self.groups.len();
        match self.groups.get_mut(handle.0 as usize) {
            Some(group) => group,
            None => panic!("invalid group handle: index {} of {}", handle.0, len),
        }
    }

    pub(crate) fn group_path(&self, handle: GroupHandle) -> String {
        let mut segments = Vec::new();
        let mut current = Some(handle);
        while let Some(h) = current {
            let group = self.group(h);
            if group.parent.is_some() {
                segments.push(group.name.as_str());
            }
            current = group.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    fn child_path(&self, group: GroupHandle, name: &str) -> String {
        let group_path = self.group_path(group);
        if group_path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{}", group_path, name)
        }
    }

    fn kind_panic(&self, handle: SettingHandle, expected: SettingKind) -> ! {
        panic!(
            "setting '{}' is a {} setting but was accessed as {}",
            self.path(handle),
            self.kind(handle),
            expected
        );
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.contains('.') {
        return Err(RegistryError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}
