//! Host capability traits.
//!
//! The codec and serializer never see a concrete host type. Adapters for a
//! particular application implement these traits; [`crate::memory`] provides an
//! in-memory implementation.

use crate::data::{ChannelKind, ConstantMode, Interpolation, Keyframe, TangentMode};

/// Per-key access to one animation curve.
///
/// Key indices are positions in time order. Callers only pass indices below
/// [`Curve::key_count`].
pub trait Curve {
    fn key_count(&self) -> usize;

    /// Remove every key.
    fn clear(&mut self);

    /// Insert a key and return its index. Hosts may recompute tangents of
    /// neighbouring keys here.
    fn add_key(&mut self, time: i64, value: f64) -> usize;

    fn key_time(&self, index: usize) -> i64;
    fn key_value(&self, index: usize) -> f64;

    fn interpolation(&self, index: usize) -> Interpolation;
    fn set_interpolation(&mut self, index: usize, interpolation: Interpolation);

    fn tangent_mode(&self, index: usize) -> TangentMode;
    fn set_tangent_mode(&mut self, index: usize, mode: TangentMode);

    fn constant_mode(&self, index: usize) -> ConstantMode;
    fn set_constant_mode(&mut self, index: usize, mode: ConstantMode);

    fn left_derivative(&self, index: usize) -> f64;
    fn set_left_derivative(&mut self, index: usize, derivative: f64);
    fn right_derivative(&self, index: usize) -> f64;
    fn set_right_derivative(&mut self, index: usize, derivative: f64);

    fn left_weight(&self, index: usize) -> f64;
    fn set_left_weight(&mut self, index: usize, weight: f64);
    fn right_weight(&self, index: usize) -> f64;
    fn set_right_weight(&mut self, index: usize, weight: f64);

    /// Snapshot of one key.
    fn read_key(&self, index: usize) -> Keyframe {
        Keyframe {
            time: self.key_time(index),
            value: self.key_value(index),
            interpolation: self.interpolation(index),
            tangent_mode: self.tangent_mode(index),
            constant_mode: self.constant_mode(index),
            left_derivative: self.left_derivative(index),
            right_derivative: self.right_derivative(index),
            left_weight: self.left_weight(index),
            right_weight: self.right_weight(index),
        }
    }
}

/// An object with translation and rotation vector properties.
pub trait Animatable {
    type Curve: Curve;

    /// Fully qualified object name, used in messages.
    fn name(&self) -> &str;

    /// Host type category, used by selection filters.
    fn class_name(&self) -> &str;

    /// Current static value of a vector channel.
    fn vector(&self, channel: ChannelKind) -> [f64; 3];
    fn set_vector(&mut self, channel: ChannelKind, value: [f64; 3]);

    /// Whether the channel is driven by an animation node at all.
    fn has_animation_node(&self, channel: ChannelKind) -> bool;

    /// Switch one axis into (or out of) animated mode, creating the
    /// animation node if needed.
    fn set_animated(&mut self, channel: ChannelKind, axis: usize, animated: bool);

    /// Curve behind an axis, if the node and curve exist.
    fn curve(&self, channel: ChannelKind, axis: usize) -> Option<&Self::Curve>;
    fn curve_mut(&mut self, channel: ChannelKind, axis: usize) -> Option<&mut Self::Curve>;
}

/// The host scene: selection and handle resolution.
pub trait Scene {
    type Object: Animatable;
    /// Opaque, cheap reference to an object that stays valid across calls.
    type Handle: Clone;

    /// Currently selected animatable objects, in scene order.
    fn selection(&self) -> Vec<Self::Handle>;

    fn object(&self, handle: &Self::Handle) -> Option<&Self::Object>;
    fn object_mut(&mut self, handle: &Self::Handle) -> Option<&mut Self::Object>;
}

/// Selected objects whose class name is not in `exclude_classes`.
pub fn selected_objects<S: Scene>(scene: &S, exclude_classes: &[&str]) -> Vec<S::Handle> {
    scene
        .selection()
        .into_iter()
        .filter(|h| {
            scene
                .object(h)
                .is_some_and(|obj| !exclude_classes.contains(&obj.class_name()))
        })
        .collect()
}
