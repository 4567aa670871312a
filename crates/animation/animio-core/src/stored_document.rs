use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use crate::config::CodecConfig;
use crate::data::{
    AnimationDocument, ChannelEntry, ChannelKind, ConstantMode, Interpolation, Keyframe,
    TangentMode,
};
use crate::error::{AnimIoError, Result};

/// Format version implied by files without a `version` key (all files written so far).
pub const FORMAT_VERSION: u32 = 0;

/// Public API: parse an animation document from JSON text.
///
/// Notes:
/// - An axis is static when its first record carries `"static": true`; a static
///   axis holds exactly one record.
/// - Every keyframe field is required; ordinals must name a known enumerator.
/// - The result is validated (both channels, three axes, ascending times) so a
///   successful parse is safe to import.
pub fn parse_document_json(s: &str) -> Result<AnimationDocument> {
    let raw: RawDocument = serde_json::from_str(s)?;
    if raw.version > FORMAT_VERSION {
        return Err(AnimIoError::invalid(format!(
            "unsupported format version {}",
            raw.version
        )));
    }

    let doc = AnimationDocument {
        translation: to_entries(ChannelKind::Translation, raw.translation)?,
        rotation: to_entries(ChannelKind::Rotation, raw.rotation)?,
    };
    doc.validate()?;
    Ok(doc)
}

/// Render `doc` in the persisted layout: sorted keys, `cfg.json_indent` spaces.
///
/// Non-finite numbers have no JSON form, so a record holding one fails with
/// [`AnimIoError::MalformedRecord`] instead of being written as `null`.
pub fn document_to_json(doc: &AnimationDocument, cfg: &CodecConfig) -> Result<String> {
    let mut root = Map::new();
    for kind in ChannelKind::ALL {
        let axes = doc
            .channel(kind)
            .iter()
            .enumerate()
            .map(|(axis, entry)| entry_to_json(kind, axis, entry))
            .collect::<Result<Vec<_>>>()?;
        root.insert(kind.key().to_string(), JsonValue::Array(axes));
    }

    let indent = " ".repeat(cfg.json_indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    JsonValue::Object(root).serialize(&mut ser)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn entry_to_json(channel: ChannelKind, axis: usize, entry: &ChannelEntry) -> Result<JsonValue> {
    let not_finite = |index: usize, name: &str, v: f64| AnimIoError::MalformedRecord {
        channel,
        axis,
        index,
        reason: format!("'{name}' is {v}, which JSON cannot represent"),
    };

    match entry {
        ChannelEntry::Static(value) => {
            finite(*value, "value").map_err(|(name, v)| not_finite(0, name, v))?;
            Ok(json!([{ "static": true, "value": value }]))
        }
        ChannelEntry::Animated(keys) => keys
            .iter()
            .enumerate()
            .map(|(index, k)| key_to_json(k).map_err(|(name, v)| not_finite(index, name, v)))
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
    }
}

fn finite(v: f64, name: &'static str) -> std::result::Result<f64, (&'static str, f64)> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err((name, v))
    }
}

fn key_to_json(k: &Keyframe) -> std::result::Result<JsonValue, (&'static str, f64)> {
    Ok(json!({
        "time": k.time,
        "value": finite(k.value, "value")?,
        "interpolation": k.interpolation.ordinal(),
        "tangent-mode": k.tangent_mode.ordinal(),
        "constant-mode": k.constant_mode.ordinal(),
        "left-derivative": finite(k.left_derivative, "left-derivative")?,
        "right-derivative": finite(k.right_derivative, "right-derivative")?,
        "left-weight": finite(k.left_weight, "left-weight")?,
        "right-weight": finite(k.right_weight, "right-weight")?,
    }))
}

fn to_entries(channel: ChannelKind, axes: Vec<Vec<RawRecord>>) -> Result<Vec<ChannelEntry>> {
    axes.into_iter()
        .enumerate()
        .map(|(axis, records)| to_entry(channel, axis, records))
        .collect()
}

fn to_entry(channel: ChannelKind, axis: usize, records: Vec<RawRecord>) -> Result<ChannelEntry> {
    let malformed = |index: usize, reason: String| AnimIoError::MalformedRecord {
        channel,
        axis,
        index,
        reason,
    };

    match records.first() {
        Some(first) if first.is_static => {
            if records.len() > 1 {
                return Err(malformed(1, "static axis holds more than one record".into()));
            }
            let value = first
                .value
                .ok_or_else(|| malformed(0, "missing field 'value'".into()))?;
            Ok(ChannelEntry::Static(value))
        }
        _ => {
            let keys = records
                .iter()
                .enumerate()
                .map(|(index, r)| r.to_keyframe().map_err(|reason| malformed(index, reason)))
                .collect::<Result<Vec<_>>>()?;
            Ok(ChannelEntry::Animated(keys))
        }
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: u32,
    #[serde(rename = "Translation", default)]
    translation: Vec<Vec<RawRecord>>,
    #[serde(rename = "Rotation", default)]
    rotation: Vec<Vec<RawRecord>>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "static", default)]
    is_static: bool,
    value: Option<f64>,
    time: Option<i64>,
    interpolation: Option<u8>,
    #[serde(rename = "tangent-mode")]
    tangent_mode: Option<u8>,
    #[serde(rename = "constant-mode")]
    constant_mode: Option<u8>,
    #[serde(rename = "left-derivative")]
    left_derivative: Option<f64>,
    #[serde(rename = "right-derivative")]
    right_derivative: Option<f64>,
    #[serde(rename = "left-weight")]
    left_weight: Option<f64>,
    #[serde(rename = "right-weight")]
    right_weight: Option<f64>,
}

fn field<T>(v: Option<T>, name: &str) -> std::result::Result<T, String> {
    v.ok_or_else(|| format!("missing field '{name}'"))
}

fn ordinal<T>(v: Option<u8>, name: &str) -> std::result::Result<T, String>
where
    T: TryFrom<u8, Error = u8>,
{
    T::try_from(field(v, name)?).map_err(|n| format!("unknown {name} ordinal {n}"))
}

impl RawRecord {
    fn to_keyframe(&self) -> std::result::Result<Keyframe, String> {
        if self.is_static {
            return Err("static record inside a keyed axis".into());
        }
        Ok(Keyframe {
            time: field(self.time, "time")?,
            value: field(self.value, "value")?,
            interpolation: ordinal::<Interpolation>(self.interpolation, "interpolation")?,
            tangent_mode: ordinal::<TangentMode>(self.tangent_mode, "tangent-mode")?,
            constant_mode: ordinal::<ConstantMode>(self.constant_mode, "constant-mode")?,
            left_derivative: field(self.left_derivative, "left-derivative")?,
            right_derivative: field(self.right_derivative, "right-derivative")?,
            left_weight: field(self.left_weight, "left-weight")?,
            right_weight: field(self.right_weight, "right-weight")?,
        })
    }
}
