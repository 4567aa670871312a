//! Canonical animation document model.
//! Wire layout (key names, ordinals) lives in stored_document.rs.

use std::fmt;

use crate::error::{AnimIoError, Result};

/// Number of axes in a vector channel.
pub const AXIS_COUNT: usize = 3;

/// Key interpolation, stored by ordinal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Interpolation {
    Constant = 0,
    Linear = 1,
    Cubic = 2,
}

/// Host tangent modes, stored by ordinal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TangentMode {
    Auto = 0,
    /// Tension/continuity/bias tangents, computed by the host.
    Tcb = 1,
    User = 2,
    Break = 3,
    ClampProgressive = 4,
}

/// Behavior of a constant-interpolated key, stored by ordinal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConstantMode {
    Standard = 0,
    Next = 1,
}

macro_rules! ordinal_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            #[inline]
            pub fn ordinal(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = u8;

            fn try_from(v: u8) -> std::result::Result<Self, u8> {
                $(
                    if v == $ty::$variant as u8 {
                        return Ok($ty::$variant);
                    }
                )+
                Err(v)
            }
        }
    };
}

ordinal_enum!(Interpolation { Constant, Linear, Cubic });
ordinal_enum!(TangentMode { Auto, Tcb, User, Break, ClampProgressive });
ordinal_enum!(ConstantMode { Standard, Next });

impl TangentMode {
    /// Mode to materialize on a curve. TCB tangents cannot carry authored
    /// derivatives, so they come back as Break.
    #[inline]
    pub fn for_decode(self) -> Self {
        match self {
            TangentMode::Tcb => TangentMode::Break,
            other => other,
        }
    }
}

/// One key on a curve. Time is in host ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub time: i64,
    pub value: f64,
    pub interpolation: Interpolation,
    pub tangent_mode: TangentMode,
    pub constant_mode: ConstantMode,
    pub left_derivative: f64,
    pub right_derivative: f64,
    pub left_weight: f64,
    pub right_weight: f64,
}

/// One axis of a channel: either keyed, or a single static value.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelEntry {
    Animated(Vec<Keyframe>),
    Static(f64),
}

impl ChannelEntry {
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self, ChannelEntry::Static(_))
    }

    /// Value of the first record; used as the static baseline on import.
    pub fn first_value(&self) -> f64 {
        match self {
            ChannelEntry::Static(v) => *v,
            ChannelEntry::Animated(keys) => keys.first().map(|k| k.value).unwrap_or(0.0),
        }
    }

    /// Time of the first key, if any.
    pub fn first_time(&self) -> Option<i64> {
        match self {
            ChannelEntry::Animated(keys) => keys.first().map(|k| k.time),
            ChannelEntry::Static(_) => None,
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        match self {
            ChannelEntry::Animated(keys) => keys.as_slice(),
            ChannelEntry::Static(_) => &[],
        }
    }
}

/// The two vector channels a document carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Translation,
    Rotation,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 2] = [ChannelKind::Translation, ChannelKind::Rotation];

    /// Top-level key in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            ChannelKind::Translation => "Translation",
            ChannelKind::Rotation => "Rotation",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Translation and rotation, three entries each (X, Y, Z).
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDocument {
    pub translation: Vec<ChannelEntry>,
    pub rotation: Vec<ChannelEntry>,
}

impl AnimationDocument {
    pub fn new(translation: [ChannelEntry; 3], rotation: [ChannelEntry; 3]) -> Self {
        Self {
            translation: translation.into(),
            rotation: rotation.into(),
        }
    }

    pub fn channel(&self, kind: ChannelKind) -> &[ChannelEntry] {
        match kind {
            ChannelKind::Translation => &self.translation,
            ChannelKind::Rotation => &self.rotation,
        }
    }

    /// Earliest first-key time across translation axes.
    pub fn start_frame(&self) -> Option<i64> {
        self.translation
            .iter()
            .filter_map(ChannelEntry::first_time)
            .min()
    }

    /// Check the invariants import relies on: both channels present with three
    /// axes, no empty keyed axis, strictly ascending key times.
    pub fn validate(&self) -> Result<()> {
        for kind in ChannelKind::ALL {
            let entries = self.channel(kind);
            if entries.is_empty() {
                return Err(AnimIoError::invalid(format!(
                    "no {} in animation data",
                    kind.key().to_lowercase()
                )));
            }
            if entries.len() != AXIS_COUNT {
                return Err(AnimIoError::invalid(format!(
                    "{kind} has {} axes, expected {AXIS_COUNT}",
                    entries.len()
                )));
            }
            for (axis, entry) in entries.iter().enumerate() {
                let ChannelEntry::Animated(keys) = entry else {
                    continue;
                };
                if keys.is_empty() {
                    return Err(AnimIoError::invalid(format!(
                        "{kind} axis {axis} has no records"
                    )));
                }
                if let Some(pair) = keys.windows(2).find(|w| w[1].time <= w[0].time) {
                    return Err(AnimIoError::invalid(format!(
                        "{kind} axis {axis} keys out of order: {} then {}",
                        pair[0].time, pair[1].time
                    )));
                }
            }
        }
        Ok(())
    }
}
