use marionette_animation_core::interpolation::functions::{catmull_rom_vec3, mirror_vec3};
use marionette_animation_core::{
    Animation, Attachment, BezierAttachment, BoneTimeline, Config, Interpolation, KeyFrame,
    LoopMode, Playhead, Timeline, Vec3,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx_vec3(a: Vec3, b: Vec3, eps: f32) {
    for c in 0..3 {
        approx(a[c], b[c], eps);
    }
}

fn mk_timeline(initial: Vec3, default: Interpolation, keys: &[(u32, Vec3)]) -> Timeline {
    let mut tl = Timeline::new(initial, default);
    for (time, value) in keys {
        tl.insert(KeyFrame::new(*time, *value));
    }
    tl
}

/// it should reproduce keyframe values bit-exactly at their ticks and interpolate between
#[test]
fn playhead_keyframe_exactness() {
    let tl = mk_timeline(
        [0.0; 3],
        Interpolation::Linear,
        &[(0, [0.0; 3]), (10, [20.0; 3])],
    );
    let mut ph = Playhead::new(&tl);
    assert_eq!(ph.current(), [0.0; 3]);
    for _ in 0..4 {
        ph.advance(&tl);
    }
    assert_eq!(ph.advance(&tl), [10.0; 3]);
    for _ in 6..10 {
        ph.advance(&tl);
    }
    assert_eq!(ph.advance(&tl), [20.0; 3]);
}

/// it should hold the last keyframe's value unchanged, indefinitely
#[test]
fn playhead_terminal_hold_is_idempotent() {
    let tl = mk_timeline(
        [0.0; 3],
        Interpolation::Linear,
        &[(0, [1.0; 3]), (5, [9.0; 3])],
    );
    let mut ph = Playhead::new(&tl);
    for _ in 0..5 {
        ph.advance(&tl);
    }
    for _ in 0..30 {
        assert_eq!(ph.advance(&tl), [9.0; 3]);
    }
    assert_eq!(ph.tick(), 35);
}

/// it should interpolate from the initial value before the first keyframe
#[test]
fn playhead_starts_from_initial_value() {
    let tl = mk_timeline([4.0; 3], Interpolation::Linear, &[(8, [12.0; 3])]);
    let mut ph = Playhead::new(&tl);
    assert_eq!(ph.current(), [4.0; 3]);
    for _ in 0..3 {
        ph.advance(&tl);
    }
    approx_vec3(ph.advance(&tl), [8.0; 3], 1e-6);
}

/// it should treat an empty timeline as a constant initial value
#[test]
fn playhead_empty_timeline_constant() {
    let tl = Timeline::new([3.0; 3], Interpolation::Linear);
    let mut ph = Playhead::new(&tl);
    assert_eq!(ph.current(), [3.0; 3]);
    for _ in 0..10 {
        assert_eq!(ph.advance(&tl), [3.0; 3]);
    }
}

/// it should collapse duplicate-time inserts to the later keyframe
#[test]
fn duplicate_time_insert_collapses() {
    let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
    tl.insert(KeyFrame::new(0, [1.0; 3]));
    tl.insert(KeyFrame::new(0, [2.0; 3]));
    assert_eq!(tl.len(), 1);
    let ph = Playhead::new(&tl);
    assert_eq!(ph.current(), [2.0; 3]);
}

/// it should evaluate a linear→catmullrom segment as Catmull-Rom, not linear
#[test]
fn dominance_smooth_beats_linear() {
    // Two keyframes: the segment uses the spline with mirrored outer points.
    let v0 = [0.0, 0.0, 0.0];
    let v1 = [8.0, 8.0, 8.0];
    let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
    tl.insert(KeyFrame::new(0, v0).with_interpolation(Interpolation::Linear));
    tl.insert(KeyFrame::new(4, v1).with_interpolation(Interpolation::CatmullRom));
    let mut ph = Playhead::new(&tl);
    for tick in 1..4 {
        let t = tick as f32 / 4.0;
        let expected = catmull_rom_vec3(mirror_vec3(v0, v1), v0, v1, mirror_vec3(v1, v0), t);
        approx_vec3(ph.advance(&tl), expected, 1e-4);
    }

    // Three keyframes: the real following point bends the curve away from the
    // straight line through the first segment.
    let v2 = [0.0; 3];
    let mut tl3 = Timeline::new([0.0; 3], Interpolation::Linear);
    tl3.insert(KeyFrame::new(0, v0).with_interpolation(Interpolation::Linear));
    tl3.insert(KeyFrame::new(4, v1).with_interpolation(Interpolation::CatmullRom));
    tl3.insert(KeyFrame::new(8, v2));
    let mut ph3 = Playhead::new(&tl3);
    ph3.advance(&tl3);
    let mid = ph3.advance(&tl3);
    let expected = catmull_rom_vec3(mirror_vec3(v0, v1), v0, v1, v2, 0.5);
    approx_vec3(mid, expected, 1e-4);
    assert!((mid[0] - 4.0).abs() > 0.5, "mid={} should not be linear", mid[0]);
}

/// it should let step dominate any smooth strategy regardless of which endpoint declares it
#[test]
fn dominance_step_beats_smooth() {
    let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
    tl.insert(KeyFrame::new(0, [1.0; 3]).with_interpolation(Interpolation::CatmullRom));
    tl.insert(KeyFrame::new(5, [7.0; 3]).with_interpolation(Interpolation::Step));
    let mut ph = Playhead::new(&tl);
    for _ in 1..5 {
        assert_eq!(ph.advance(&tl), [1.0; 3]);
    }
    assert_eq!(ph.advance(&tl), [7.0; 3]);
}

/// it should keep the earlier keyframe's strategy on equal strength
#[test]
fn dominance_tie_keeps_earlier() {
    let mut tl = Timeline::new([0.0; 3], Interpolation::Linear);
    tl.insert(KeyFrame::new(0, [1.0; 3]).with_interpolation(Interpolation::Constant([5.0; 3])));
    tl.insert(KeyFrame::new(6, [2.0; 3]).with_interpolation(Interpolation::Constant([9.0; 3])));
    let mut ph = Playhead::new(&tl);
    for _ in 1..6 {
        assert_eq!(ph.advance(&tl), [5.0; 3]);
    }
    // Keyframe times still reproduce the keyframe value exactly.
    assert_eq!(ph.advance(&tl), [2.0; 3]);
}

/// it should fall back to the timeline default when keyframes declare nothing
#[test]
fn default_strategy_applies() {
    let tl = mk_timeline(
        [0.0; 3],
        Interpolation::Constant([7.0; 3]),
        &[(0, [1.0; 3]), (6, [2.0; 3])],
    );
    let mut ph = Playhead::new(&tl);
    for _ in 1..6 {
        assert_eq!(ph.advance(&tl), [7.0; 3]);
    }
}

/// it should produce a monotonic, bounded bezier curve when attachments are missing
#[test]
fn bezier_default_attachment_is_bounded_and_monotonic() {
    let tl = mk_timeline(
        [0.0; 3],
        Interpolation::Bezier,
        &[(0, [0.0; 3]), (20, [10.0; 3])],
    );
    let mut ph = Playhead::new(&tl);
    let mut prev = 0.0f32;
    for tick in 1..=20 {
        let v = ph.advance(&tl);
        for c in 0..3 {
            assert!(v[c].is_finite(), "tick {tick} component {c} is not finite");
            assert!((-1e-3..=10.0 + 1e-3).contains(&v[c]));
        }
        assert!(v[0] >= prev - 1e-4, "tick {tick}: {} < {}", v[0], prev);
        prev = v[0];
    }
    assert_eq!(ph.current(), [10.0; 3]);
}

/// it should shape the bezier curve with explicit handle attachments
#[test]
fn bezier_handles_shape_curve() {
    let outgoing = BezierAttachment {
        right_time: [5.0; 3],
        right_value: [8.0; 3],
        ..Default::default()
    };
    let incoming = BezierAttachment {
        left_time: [-5.0; 3],
        left_value: [0.0; 3],
        ..Default::default()
    };
    let mut tl = Timeline::new([0.0; 3], Interpolation::Bezier);
    tl.insert(KeyFrame::new(0, [0.0; 3]).with_attachment(Attachment::Bezier(outgoing)));
    tl.insert(KeyFrame::new(20, [10.0; 3]).with_attachment(Attachment::Bezier(incoming)));
    let mut ph = Playhead::new(&tl);
    for _ in 0..3 {
        ph.advance(&tl);
    }
    // The steep outgoing handle pulls the early curve above the straight line.
    let early = ph.advance(&tl);
    assert!(early[0] > 2.0, "early={} expected above linear", early[0]);
    for _ in 4..20 {
        ph.advance(&tl);
    }
    assert_eq!(ph.current(), [10.0; 3]);
}

/// it should consume a keyframe sitting at tick zero without dividing by zero
#[test]
fn keyframe_at_tick_zero_is_immediate() {
    let tl = mk_timeline(
        [5.0; 3],
        Interpolation::Linear,
        &[(0, [1.0; 3]), (2, [3.0; 3])],
    );
    let mut ph = Playhead::new(&tl);
    assert_eq!(ph.current(), [1.0; 3]);
    approx_vec3(ph.advance(&tl), [2.0; 3], 1e-6);
    assert_eq!(ph.advance(&tl), [3.0; 3]);
}

/// it should round-trip the data model through serde
#[test]
fn data_model_serde_roundtrip() {
    let kf = KeyFrame::new(4, [1.0, 2.0, 3.0])
        .with_interpolation(Interpolation::Bezier)
        .with_attachment(Attachment::Bezier(BezierAttachment::default()));
    let json = serde_json::to_string(&kf).unwrap();
    let back: KeyFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(kf, back);

    let mut tl = Timeline::new([0.0; 3], Interpolation::CatmullRom);
    tl.insert(kf);
    let json = serde_json::to_string(&tl).unwrap();
    let back: Timeline = serde_json::from_str(&json).unwrap();
    assert_eq!(tl, back);

    let anim = Animation::new("wave", LoopMode::Once, 10).with_bone(
        "arm",
        BoneTimeline::new().with_position(tl),
    );
    let json = serde_json::to_string(&anim).unwrap();
    let back: Animation = serde_json::from_str(&json).unwrap();
    assert_eq!(anim, back);

    let cfg = Config::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg.bezier_samples, back.bezier_samples);
}

/// it should report channel lengths through the bone timeline
#[test]
fn bone_timeline_length_spans_channels() {
    let mut bt = BoneTimeline::new();
    bt.position_mut().insert(KeyFrame::new(4, [1.0; 3]));
    bt.rotation_mut().insert(KeyFrame::new(9, [90.0, 0.0, 0.0]));
    bt.scale_mut().insert(KeyFrame::new(2, [2.0; 3]));
    assert_eq!(bt.length(), 9);
}

/// it should advance the three bone channels in lockstep
#[test]
fn bone_playhead_lockstep() {
    let mut bt = BoneTimeline::new();
    bt.position_mut().insert(KeyFrame::new(0, [0.0; 3]));
    bt.position_mut().insert(KeyFrame::new(10, [10.0; 3]));
    bt.rotation_mut().insert(KeyFrame::new(0, [0.0; 3]));
    bt.rotation_mut().insert(KeyFrame::new(10, [90.0, 0.0, 0.0]));
    let mut ph = bt.playhead();
    let frame = ph.current();
    assert_eq!(frame.scale, [1.0; 3]);
    for _ in 0..5 {
        ph.advance(&bt);
    }
    let frame = ph.current();
    approx_vec3(frame.position, [5.0; 3], 1e-6);
    approx_vec3(frame.rotation, [45.0, 0.0, 0.0], 1e-6);
    assert_eq!(frame.scale, [1.0; 3]);
}
