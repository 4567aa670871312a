use animio_core::{
    channels::{compute_offset, export_channel, export_document, import_document},
    config::DEFAULT_TANGENT_WEIGHT,
    data::{
        AnimationDocument, ChannelEntry, ChannelKind, ConstantMode, Interpolation, Keyframe,
        TangentMode,
    },
    error::AnimIoError,
    host::{Animatable, Curve},
    memory::{MemoryCurve, MemoryObject},
    parse_document_json,
};

fn mk_key(time: i64, value: f64) -> Keyframe {
    Keyframe {
        time,
        value,
        interpolation: Interpolation::Cubic,
        tangent_mode: TangentMode::User,
        constant_mode: ConstantMode::Standard,
        left_derivative: 0.1,
        right_derivative: 0.2,
        left_weight: DEFAULT_TANGENT_WEIGHT,
        right_weight: DEFAULT_TANGENT_WEIGHT,
    }
}

fn fixture(name: &str) -> AnimationDocument {
    let json = animio_test_fixtures::documents::json(name).expect("load fixture");
    parse_document_json(&json).expect("parse fixture")
}

#[test]
fn offset_scenario_keys_x_at_requested_frame() {
    let doc = fixture("offset-scenario");
    assert_eq!(compute_offset(&doc, Some(10)).unwrap(), 10);

    let mut target = MemoryObject::new("target", "FBModelNull")
        .with_vector(ChannelKind::Translation, [9.0, 9.0, 9.0])
        .with_vector(ChannelKind::Rotation, [45.0, 45.0, 45.0]);
    import_document(&mut target, &doc, Some(10)).expect("import");

    let x = target
        .curve(ChannelKind::Translation, 0)
        .expect("x translation animated");
    assert_eq!(x.key_count(), 1);
    assert_eq!(x.key_time(0), 10);
    assert_eq!(x.key_value(0), 1.0);
    assert_eq!(x.interpolation(0), Interpolation::Linear);
    assert!(!x.is_left_weighted(0));
    assert!(!x.is_right_weighted(0));
    assert_eq!(x.left_weight(0), DEFAULT_TANGENT_WEIGHT);

    assert!(target.curve(ChannelKind::Translation, 1).is_none());
    assert!(target.curve(ChannelKind::Translation, 2).is_none());
    assert_eq!(target.vector(ChannelKind::Translation), [1.0, 2.0, 3.0]);

    assert!(!target.has_animation_node(ChannelKind::Rotation));
    assert_eq!(target.vector(ChannelKind::Rotation), [0.0, 0.0, 0.0]);
}

#[test]
fn import_without_start_frame_keeps_recorded_times() {
    let doc = fixture("walk-cycle");
    let mut target = MemoryObject::new("target", "FBModelNull");
    import_document(&mut target, &doc, None).expect("import");
    let x = target.curve(ChannelKind::Translation, 0).unwrap();
    assert_eq!(x.key_time(0), 1_539_538_600);
}

#[test]
fn start_frame_uses_earliest_translation_key() {
    let doc = fixture("walk-cycle");
    let mut target = MemoryObject::new("target", "FBModelNull");
    import_document(&mut target, &doc, Some(0)).expect("import");

    // X starts at 1539538600 and Z at 3079077200; both shift by the same amount.
    let x = target.curve(ChannelKind::Translation, 0).unwrap();
    let z = target.curve(ChannelKind::Translation, 2).unwrap();
    assert_eq!(x.key_time(0), 0);
    assert_eq!(z.key_time(0), 1_539_538_600);
    // Rotation shifts too, even though it does not define the start frame.
    let ry = target.curve(ChannelKind::Rotation, 1).unwrap();
    assert_eq!(ry.key_time(0), -1_539_538_600);
}

#[test]
fn round_trip_through_fresh_object() {
    let doc = fixture("walk-cycle");
    let mut target = MemoryObject::new("target", "FBModelNull");
    import_document(&mut target, &doc, None).expect("import");
    let again = export_document(&target).expect("export");

    let mut expected = doc.clone();
    if let ChannelEntry::Animated(keys) = &mut expected.translation[0] {
        assert_eq!(keys[1].tangent_mode, TangentMode::Tcb);
        keys[1].tangent_mode = TangentMode::Break;
    } else {
        panic!("translation x should be animated in walk-cycle");
    }
    assert_eq!(again, expected);
}

#[test]
fn static_fallback_for_axis_without_keys() {
    let object = MemoryObject::new("cube", "FBModelCube")
        .with_vector(ChannelKind::Translation, [1.5, 2.5, 3.5])
        .with_keys(ChannelKind::Translation, 0, &[mk_key(0, 1.0), mk_key(10, 2.0)])
        .with_keys(ChannelKind::Translation, 1, &[]);

    let entries = export_channel(&object, ChannelKind::Translation);
    assert!(matches!(&entries[0], ChannelEntry::Animated(keys) if keys.len() == 2));
    assert_eq!(entries[1], ChannelEntry::Static(2.5));
    assert_eq!(entries[2], ChannelEntry::Static(3.5));
}

#[test]
fn channel_without_node_is_all_static() {
    let object = MemoryObject::new("cube", "FBModelCube")
        .with_vector(ChannelKind::Rotation, [10.0, 20.0, 30.0])
        .with_keys(ChannelKind::Translation, 0, &[mk_key(0, 1.0)]);
    let entries = export_channel(&object, ChannelKind::Rotation);
    assert_eq!(
        entries,
        [
            ChannelEntry::Static(10.0),
            ChannelEntry::Static(20.0),
            ChannelEntry::Static(30.0)
        ]
    );
}

#[test]
fn export_without_animation_nodes_fails() {
    let object = MemoryObject::new("Null", "FBModelNull")
        .with_vector(ChannelKind::Translation, [1.0, 2.0, 3.0]);
    match export_document(&object) {
        Err(AnimIoError::NoAnimationFound { object }) => assert_eq!(object, "Null"),
        other => panic!("expected NoAnimationFound, got {other:?}"),
    }
}

#[test]
fn export_with_empty_node_succeeds_as_all_static() {
    let object = MemoryObject::new("Null", "FBModelNull")
        .with_vector(ChannelKind::Rotation, [0.0, 90.0, 0.0])
        .with_animation_node(ChannelKind::Rotation);
    let doc = export_document(&object).expect("node present, export allowed");
    assert!(doc.translation.iter().all(ChannelEntry::is_static));
    assert!(doc.rotation.iter().all(ChannelEntry::is_static));
    assert_eq!(doc.rotation[1], ChannelEntry::Static(90.0));
    assert_eq!(doc.start_frame(), None);
}

#[test]
fn import_replaces_existing_curve_keys() {
    let mut target = MemoryObject::new("target", "FBModelNull").with_keys(
        ChannelKind::Translation,
        0,
        &[mk_key(-50, 7.0), mk_key(500, 8.0), mk_key(900, 9.0)],
    );
    import_document(&mut target, &fixture("offset-scenario"), None).expect("import");
    let x = target.curve(ChannelKind::Translation, 0).unwrap();
    assert_eq!(x.key_count(), 1);
    assert_eq!(x.key_time(0), 0);
}

/// Records the order of mutating calls made on the wrapped object.
struct Recording {
    inner: MemoryObject,
    calls: Vec<String>,
}

impl Animatable for Recording {
    type Curve = MemoryCurve;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn class_name(&self) -> &str {
        self.inner.class_name()
    }

    fn vector(&self, channel: ChannelKind) -> [f64; 3] {
        self.inner.vector(channel)
    }

    fn set_vector(&mut self, channel: ChannelKind, value: [f64; 3]) {
        self.calls.push(format!("set_vector {channel}"));
        self.inner.set_vector(channel, value);
    }

    fn has_animation_node(&self, channel: ChannelKind) -> bool {
        self.inner.has_animation_node(channel)
    }

    fn set_animated(&mut self, channel: ChannelKind, axis: usize, animated: bool) {
        self.calls.push(format!("set_animated {channel} {axis}"));
        self.inner.set_animated(channel, axis, animated);
    }

    fn curve(&self, channel: ChannelKind, axis: usize) -> Option<&MemoryCurve> {
        self.inner.curve(channel, axis)
    }

    fn curve_mut(&mut self, channel: ChannelKind, axis: usize) -> Option<&mut MemoryCurve> {
        self.inner.curve_mut(channel, axis)
    }
}

#[test]
fn baseline_is_written_before_any_axis_is_animated() {
    let mut target = Recording {
        inner: MemoryObject::new("target", "FBModelNull"),
        calls: Vec::new(),
    };
    import_document(&mut target, &fixture("walk-cycle"), None).expect("import");
    assert_eq!(
        target.calls,
        vec![
            "set_vector Translation",
            "set_animated Translation 0",
            "set_animated Translation 2",
            "set_vector Rotation",
            "set_animated Rotation 1",
        ]
    );
}

#[test]
fn rejected_document_does_not_touch_target() {
    let mut target = Recording {
        inner: MemoryObject::new("target", "FBModelNull"),
        calls: Vec::new(),
    };
    let doc = AnimationDocument {
        translation: vec![
            ChannelEntry::Animated(vec![mk_key(10, 0.0), mk_key(5, 1.0)]),
            ChannelEntry::Static(0.0),
            ChannelEntry::Static(0.0),
        ],
        rotation: vec![ChannelEntry::Static(0.0); 3],
    };
    let err = import_document(&mut target, &doc, Some(1)).unwrap_err();
    assert!(err.is_document_error());
    assert!(target.calls.is_empty());
}

fn recording(name: &str) -> Recording {
    Recording {
        inner: MemoryObject::new(name, "FBModelNull"),
        calls: Vec::new(),
    }
}

#[test]
fn start_frame_offset_overflow_is_rejected_before_any_write() {
    let mut target = recording("target");
    let doc = AnimationDocument::new(
        [
            ChannelEntry::Animated(vec![mk_key(-9_223_372_036_854_775_800, 1.0)]),
            ChannelEntry::Static(2.0),
            ChannelEntry::Static(3.0),
        ],
        [
            ChannelEntry::Static(0.0),
            ChannelEntry::Static(0.0),
            ChannelEntry::Static(0.0),
        ],
    );
    let err = import_document(&mut target, &doc, Some(100)).unwrap_err();
    assert!(matches!(err, AnimIoError::InvalidDocument { .. }), "{err:?}");
    assert!(target.calls.is_empty(), "{:?}", target.calls);
}

#[test]
fn shifted_rotation_key_overflow_leaves_translation_untouched() {
    let mut target = recording("target");
    let doc = AnimationDocument::new(
        [
            ChannelEntry::Animated(vec![mk_key(0, 1.0)]),
            ChannelEntry::Static(2.0),
            ChannelEntry::Static(3.0),
        ],
        [
            ChannelEntry::Animated(vec![mk_key(9_223_372_036_854_775_800, 0.0)]),
            ChannelEntry::Static(0.0),
            ChannelEntry::Static(0.0),
        ],
    );
    let err = import_document(&mut target, &doc, Some(100)).unwrap_err();
    assert!(matches!(err, AnimIoError::InvalidDocument { .. }), "{err:?}");
    assert!(target.calls.is_empty(), "{:?}", target.calls);
    assert!(!target.has_animation_node(ChannelKind::Translation));
    assert_eq!(target.vector(ChannelKind::Translation), [0.0, 0.0, 0.0]);
}
