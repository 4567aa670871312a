//! Curve codec: host curve <-> ordered keyframe records.

use log::debug;

use crate::config::CodecConfig;
use crate::data::Keyframe;
use crate::host::Curve;

/// Read every key of `curve`, in order. No filtering or resampling.
pub fn encode<C: Curve + ?Sized>(curve: &C) -> Vec<Keyframe> {
    (0..curve.key_count()).map(|i| curve.read_key(i)).collect()
}

/// Rebuild `curve` from `keys` with the default [`CodecConfig`].
pub fn decode<C: Curve + ?Sized>(curve: &mut C, keys: &[Keyframe], frame_offset: i64) {
    decode_with(curve, keys, frame_offset, &CodecConfig::default());
}

/// Rebuild `curve` from `keys`, shifting every time by `frame_offset`.
///
/// Runs in two passes: all keys are inserted first, then derivatives and
/// weights are written, because inserting a key may recompute the tangents of
/// its neighbours. Keys are inserted in the order given. Shifted times
/// saturate at the `i64` range; [`crate::channels::import_document`] rejects
/// documents where that would happen.
pub fn decode_with<C: Curve + ?Sized>(
    curve: &mut C,
    keys: &[Keyframe],
    frame_offset: i64,
    cfg: &CodecConfig,
) {
    curve.clear();

    for key in keys {
        let index = curve.add_key(key.time.saturating_add(frame_offset), key.value);
        curve.set_interpolation(index, key.interpolation);

        let mode = key.tangent_mode.for_decode();
        if mode != key.tangent_mode {
            debug!(
                "key at {} stored as {:?}; materialized as {:?}",
                key.time, key.tangent_mode, mode
            );
        }
        curve.set_tangent_mode(index, mode);
        curve.set_constant_mode(index, key.constant_mode);
    }

    for (index, key) in keys.iter().enumerate() {
        curve.set_left_derivative(index, key.left_derivative);
        curve.set_right_derivative(index, key.right_derivative);

        // Writing a default weight marks the tangent as weighted on some hosts.
        if !cfg.is_default_weight(key.left_weight) {
            curve.set_left_weight(index, key.left_weight);
        }
        if !cfg.is_default_weight(key.right_weight) {
            curve.set_right_weight(index, key.right_weight);
        }
    }
}
