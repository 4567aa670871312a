//! In-memory host: curves, objects and a scene implementing the host traits.
//!
//! Mirrors the host behaviours the codec has to cope with:
//! - inserting a key recomputes the slopes of neighbouring auto-tangent keys;
//! - writing a tangent weight (even the default one) marks that side as weighted;
//! - new keys start as cubic/auto with default weights.

use hashbrown::HashMap;

use crate::config::DEFAULT_TANGENT_WEIGHT;
use crate::data::{ChannelKind, ConstantMode, Interpolation, Keyframe, TangentMode, AXIS_COUNT};
use crate::host::{Animatable, Curve, Scene};

#[derive(Clone, Debug, PartialEq)]
struct MemoryKey {
    key: Keyframe,
    left_weighted: bool,
    right_weighted: bool,
}

impl MemoryKey {
    fn new(time: i64, value: f64) -> Self {
        Self {
            key: Keyframe {
                time,
                value,
                interpolation: Interpolation::Cubic,
                tangent_mode: TangentMode::Auto,
                constant_mode: ConstantMode::Standard,
                left_derivative: 0.0,
                right_derivative: 0.0,
                left_weight: DEFAULT_TANGENT_WEIGHT,
                right_weight: DEFAULT_TANGENT_WEIGHT,
            },
            left_weighted: false,
            right_weighted: false,
        }
    }
}

/// A curve stored as a time-sorted key list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCurve {
    keys: Vec<MemoryKey>,
}

impl MemoryCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a curve holding exactly `keys` (sorted by time), bypassing insertion side effects.
    pub fn from_keyframes(keys: &[Keyframe]) -> Self {
        let mut keys: Vec<MemoryKey> = keys
            .iter()
            .map(|k| MemoryKey {
                key: *k,
                left_weighted: false,
                right_weighted: false,
            })
            .collect();
        keys.sort_by_key(|k| k.key.time);
        Self { keys }
    }

    /// Whether the left tangent weight was explicitly written.
    pub fn is_left_weighted(&self, index: usize) -> bool {
        self.keys[index].left_weighted
    }

    /// Whether the right tangent weight was explicitly written.
    pub fn is_right_weighted(&self, index: usize) -> bool {
        self.keys[index].right_weighted
    }

    fn recompute_auto_slope(&mut self, index: usize) {
        if self.keys[index].key.tangent_mode != TangentMode::Auto {
            return;
        }
        let slope = match (index.checked_sub(1), self.keys.get(index + 1)) {
            (Some(prev), Some(next)) => {
                let prev = &self.keys[prev].key;
                let dt = (next.key.time - prev.time) as f64;
                if dt == 0.0 {
                    0.0
                } else {
                    (next.key.value - prev.value) / dt
                }
            }
            _ => 0.0,
        };
        let key = &mut self.keys[index].key;
        key.left_derivative = slope;
        key.right_derivative = slope;
    }
}

impl Curve for MemoryCurve {
    fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn clear(&mut self) {
        self.keys.clear();
    }

    fn add_key(&mut self, time: i64, value: f64) -> usize {
        let index = match self.keys.binary_search_by_key(&time, |k| k.key.time) {
            Ok(existing) => {
                self.keys[existing].key.value = value;
                existing
            }
            Err(slot) => {
                self.keys.insert(slot, MemoryKey::new(time, value));
                slot
            }
        };
        let lo = index.saturating_sub(1);
        let hi = (index + 1).min(self.keys.len() - 1);
        for i in lo..=hi {
            self.recompute_auto_slope(i);
        }
        index
    }

    fn key_time(&self, index: usize) -> i64 {
        self.keys[index].key.time
    }

    fn key_value(&self, index: usize) -> f64 {
        self.keys[index].key.value
    }

    fn interpolation(&self, index: usize) -> Interpolation {
        self.keys[index].key.interpolation
    }

    fn set_interpolation(&mut self, index: usize, interpolation: Interpolation) {
        self.keys[index].key.interpolation = interpolation;
    }

    fn tangent_mode(&self, index: usize) -> TangentMode {
        self.keys[index].key.tangent_mode
    }

    fn set_tangent_mode(&mut self, index: usize, mode: TangentMode) {
        self.keys[index].key.tangent_mode = mode;
    }

    fn constant_mode(&self, index: usize) -> ConstantMode {
        self.keys[index].key.constant_mode
    }

    fn set_constant_mode(&mut self, index: usize, mode: ConstantMode) {
        self.keys[index].key.constant_mode = mode;
    }

    fn left_derivative(&self, index: usize) -> f64 {
        self.keys[index].key.left_derivative
    }

    fn set_left_derivative(&mut self, index: usize, derivative: f64) {
        self.keys[index].key.left_derivative = derivative;
    }

    fn right_derivative(&self, index: usize) -> f64 {
        self.keys[index].key.right_derivative
    }

    fn set_right_derivative(&mut self, index: usize, derivative: f64) {
        self.keys[index].key.right_derivative = derivative;
    }

    fn left_weight(&self, index: usize) -> f64 {
        self.keys[index].key.left_weight
    }

    fn set_left_weight(&mut self, index: usize, weight: f64) {
        let k = &mut self.keys[index];
        k.key.left_weight = weight;
        k.left_weighted = true;
    }

    fn right_weight(&self, index: usize) -> f64 {
        self.keys[index].key.right_weight
    }

    fn set_right_weight(&mut self, index: usize, weight: f64) {
        let k = &mut self.keys[index];
        k.key.right_weight = weight;
        k.right_weighted = true;
    }
}

/// Animation node of one vector channel: a curve slot per axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationNode {
    pub curves: [Option<MemoryCurve>; AXIS_COUNT],
}

/// An animatable object with translation and rotation channels.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryObject {
    name: String,
    class_name: String,
    translation: [f64; 3],
    rotation: [f64; 3],
    translation_node: Option<AnimationNode>,
    rotation_node: Option<AnimationNode>,
}

impl MemoryObject {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
            translation_node: None,
            rotation_node: None,
        }
    }

    pub fn with_vector(mut self, channel: ChannelKind, value: [f64; 3]) -> Self {
        self.set_vector(channel, value);
        self
    }

    /// Attach an animation node with no curves.
    pub fn with_animation_node(mut self, channel: ChannelKind) -> Self {
        self.node_slot(channel).get_or_insert_with(AnimationNode::default);
        self
    }

    /// Attach a curve holding `keys` to one axis.
    pub fn with_keys(mut self, channel: ChannelKind, axis: usize, keys: &[Keyframe]) -> Self {
        let node = self
            .node_slot(channel)
            .get_or_insert_with(AnimationNode::default);
        node.curves[axis] = Some(MemoryCurve::from_keyframes(keys));
        self
    }

    pub fn node(&self, channel: ChannelKind) -> Option<&AnimationNode> {
        match channel {
            ChannelKind::Translation => self.translation_node.as_ref(),
            ChannelKind::Rotation => self.rotation_node.as_ref(),
        }
    }

    fn node_slot(&mut self, channel: ChannelKind) -> &mut Option<AnimationNode> {
        match channel {
            ChannelKind::Translation => &mut self.translation_node,
            ChannelKind::Rotation => &mut self.rotation_node,
        }
    }
}

impl Animatable for MemoryObject {
    type Curve = MemoryCurve;

    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn vector(&self, channel: ChannelKind) -> [f64; 3] {
        match channel {
            ChannelKind::Translation => self.translation,
            ChannelKind::Rotation => self.rotation,
        }
    }

    fn set_vector(&mut self, channel: ChannelKind, value: [f64; 3]) {
        match channel {
            ChannelKind::Translation => self.translation = value,
            ChannelKind::Rotation => self.rotation = value,
        }
    }

    fn has_animation_node(&self, channel: ChannelKind) -> bool {
        self.node(channel).is_some()
    }

    fn set_animated(&mut self, channel: ChannelKind, axis: usize, animated: bool) {
        let slot = self.node_slot(channel);
        if animated {
            let node = slot.get_or_insert_with(AnimationNode::default);
            node.curves[axis].get_or_insert_with(MemoryCurve::default);
        } else if let Some(node) = slot.as_mut() {
            node.curves[axis] = None;
            if node.curves.iter().all(Option::is_none) {
                *slot = None;
            }
        }
    }

    fn curve(&self, channel: ChannelKind, axis: usize) -> Option<&MemoryCurve> {
        self.node(channel)?.curves.get(axis)?.as_ref()
    }

    fn curve_mut(&mut self, channel: ChannelKind, axis: usize) -> Option<&mut MemoryCurve> {
        self.node_slot(channel)
            .as_mut()?
            .curves
            .get_mut(axis)?
            .as_mut()
    }
}

/// Dense object identifier inside a [`MemoryScene`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(pub u32);

/// A flat scene with a selection set.
#[derive(Debug, Default)]
pub struct MemoryScene {
    objects: HashMap<ObjectId, MemoryObject>,
    order: Vec<ObjectId>,
    selected: Vec<ObjectId>,
    next_id: u32,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: MemoryObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.objects.insert(id, object);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<MemoryObject> {
        self.order.retain(|o| *o != id);
        self.selected.retain(|o| *o != id);
        self.objects.remove(&id)
    }

    pub fn select(&mut self, id: ObjectId) {
        if self.objects.contains_key(&id) && !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn get(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut MemoryObject> {
        self.objects.get_mut(&id)
    }
}

impl Scene for MemoryScene {
    type Object = MemoryObject;
    type Handle = ObjectId;

    fn selection(&self) -> Vec<ObjectId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    fn object(&self, handle: &ObjectId) -> Option<&MemoryObject> {
        self.objects.get(handle)
    }

    fn object_mut(&mut self, handle: &ObjectId) -> Option<&mut MemoryObject> {
        self.objects.get_mut(handle)
    }
}
