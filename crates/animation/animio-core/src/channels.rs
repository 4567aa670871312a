//! Channel serializer: drives the curve codec over translation and rotation.

use log::{debug, info, warn};

use crate::codec;
use crate::config::CodecConfig;
use crate::data::{AnimationDocument, ChannelEntry, ChannelKind, AXIS_COUNT};
use crate::error::{AnimIoError, Result};
use crate::host::{Animatable, Curve};

/// Capture one channel as three entries (X, Y, Z).
///
/// Without an animation node every axis is static. With a node, each axis is
/// encoded when its curve has keys and static otherwise.
pub fn export_channel<O: Animatable + ?Sized>(
    object: &O,
    channel: ChannelKind,
) -> [ChannelEntry; 3] {
    let current = object.vector(channel);
    if !object.has_animation_node(channel) {
        return current.map(ChannelEntry::Static);
    }

    std::array::from_fn(|axis| match object.curve(channel, axis) {
        Some(curve) if curve.key_count() > 0 => ChannelEntry::Animated(codec::encode(curve)),
        _ => ChannelEntry::Static(current[axis]),
    })
}

/// Capture translation and rotation of `object`.
///
/// Fails with [`AnimIoError::NoAnimationFound`] when neither channel has an
/// animation node. A node with no keys still exports (as static entries).
pub fn export_document<O: Animatable + ?Sized>(object: &O) -> Result<AnimationDocument> {
    if !ChannelKind::ALL
        .iter()
        .any(|&channel| object.has_animation_node(channel))
    {
        return Err(AnimIoError::NoAnimationFound {
            object: object.name().to_string(),
        });
    }

    let doc = AnimationDocument::new(
        export_channel(object, ChannelKind::Translation),
        export_channel(object, ChannelKind::Rotation),
    );
    debug!(
        "exported {}: {} animated axes",
        object.name(),
        doc.translation
            .iter()
            .chain(doc.rotation.iter())
            .filter(|e| !e.is_static())
            .count()
    );
    Ok(doc)
}

/// Shift that moves the document's start frame onto `requested_start_frame`.
///
/// Fails with [`AnimIoError::InvalidDocument`] when the shift does not fit in
/// an `i64`.
pub fn compute_offset(
    doc: &AnimationDocument,
    requested_start_frame: Option<i64>,
) -> Result<i64> {
    match (requested_start_frame, doc.start_frame()) {
        (Some(requested), Some(start)) => requested.checked_sub(start).ok_or_else(|| {
            AnimIoError::invalid(format!(
                "start frame {requested} is out of range for keys starting at {start}"
            ))
        }),
        _ => Ok(0),
    }
}

/// Every key time of `doc` must stay representable once shifted by `offset`.
fn check_shifted_times(doc: &AnimationDocument, offset: i64) -> Result<()> {
    for channel in ChannelKind::ALL {
        for (axis, entry) in doc.channel(channel).iter().enumerate() {
            let overflow = entry
                .keys()
                .iter()
                .find(|k| k.time.checked_add(offset).is_none());
            if let Some(key) = overflow {
                return Err(AnimIoError::invalid(format!(
                    "{channel} axis {axis} key time {} overflows with offset {offset}",
                    key.time
                )));
            }
        }
    }
    Ok(())
}

/// Apply `doc` to `object` with the default [`CodecConfig`].
pub fn import_document<O: Animatable + ?Sized>(
    object: &mut O,
    doc: &AnimationDocument,
    requested_start_frame: Option<i64>,
) -> Result<()> {
    import_document_with(object, doc, requested_start_frame, &CodecConfig::default())
}

/// Apply `doc` to `object`.
///
/// The document is validated and every shifted key time is range-checked
/// before anything on `object` changes. Per channel, the static vector is
/// written for all three axes before any axis is switched to animated, since
/// enabling animation may reinterpret the static value.
pub fn import_document_with<O: Animatable + ?Sized>(
    object: &mut O,
    doc: &AnimationDocument,
    requested_start_frame: Option<i64>,
    cfg: &CodecConfig,
) -> Result<()> {
    doc.validate()?;

    let offset = compute_offset(doc, requested_start_frame)?;
    check_shifted_times(doc, offset)?;
    if requested_start_frame.is_some() && doc.start_frame().is_none() {
        warn!(
            "start frame requested for {} but document has no translation keys; offset 0",
            object.name()
        );
    }

    for channel in ChannelKind::ALL {
        import_channel(object, channel, doc.channel(channel), offset, cfg)?;
    }

    info!("Animation set on {}", object.name());
    Ok(())
}

fn import_channel<O: Animatable + ?Sized>(
    object: &mut O,
    channel: ChannelKind,
    entries: &[ChannelEntry],
    offset: i64,
    cfg: &CodecConfig,
) -> Result<()> {
    let baseline: [f64; AXIS_COUNT] = std::array::from_fn(|axis| entries[axis].first_value());
    object.set_vector(channel, baseline);

    for (axis, entry) in entries.iter().enumerate() {
        let ChannelEntry::Animated(keys) = entry else {
            continue;
        };
        object.set_animated(channel, axis, true);
        let curve = object.curve_mut(channel, axis).ok_or_else(|| {
            AnimIoError::host(format!("{channel} axis {axis} has no curve after animating"))
        })?;
        codec::decode_with(curve, keys, offset, cfg);
        debug!("{channel} axis {axis}: {} keys, offset {offset}", keys.len());
    }
    Ok(())
}
