//! Property tests over arbitrary edit sequences.

use aas_animation_core::{clamp_interval, export, parse_animations_yaml, Axis, Joint, Timeline};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Append,
    Insert,
    Remove,
    Select(usize),
    Update(Joint, Axis, f64),
}

fn joint() -> impl Strategy<Value = Joint> {
    prop::sample::select(Joint::ALL.to_vec())
}

fn axis() -> impl Strategy<Value = Axis> {
    prop::sample::select(Axis::ALL.to_vec())
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        Just(Edit::Append),
        Just(Edit::Insert),
        Just(Edit::Remove),
        (0usize..12).prop_map(Edit::Select),
        (joint(), axis(), -180.0f64..=180.0).prop_map(|(j, a, v)| Edit::Update(j, a, v)),
    ]
}

fn apply(tl: &mut Timeline, edit: &Edit) {
    match *edit {
        Edit::Append => {
            tl.append();
        }
        Edit::Insert => {
            tl.insert_after_selection();
        }
        Edit::Remove => {
            tl.remove_selected();
        }
        Edit::Select(i) => {
            let i = tl.clamp_index(i);
            tl.set_selection(i);
        }
        Edit::Update(j, a, v) => tl.update_selected(j, a, v),
    }
}

proptest! {
    /// The timeline never loses its last keyframe and the selection stays in range.
    #[test]
    fn length_and_selection_invariants_hold(edits in prop::collection::vec(edit(), 0..64)) {
        let mut tl = Timeline::new();
        for e in &edits {
            apply(&mut tl, e);
            prop_assert!(tl.len() >= 1);
            prop_assert!(tl.selected_index() < tl.len());
        }
    }

    /// Exported steps decode back to the edited angles.
    #[test]
    fn export_round_trips_angles(edits in prop::collection::vec(edit(), 1..40)) {
        let mut tl = Timeline::new();
        for e in &edits {
            apply(&mut tl, e);
        }
        let artifact = export(&tl, "prop", 3.0).unwrap();
        let file = parse_animations_yaml(&artifact.contents).unwrap();
        let doc = file.get("prop").unwrap();

        prop_assert_eq!(doc.steps.len(), tl.len());
        for (decoded, source) in doc.steps.iter().zip(tl.poses()) {
            for joint in Joint::ALL {
                for axis in Axis::ALL {
                    let (a, b) = (decoded.angle(joint, axis), source.angle(joint, axis));
                    prop_assert!((a - b).abs() < 1e-9, "{joint}.{axis}: {a} != {b}");
                }
            }
        }
    }

    /// Any name, control characters and line separators included, survives export.
    #[test]
    fn export_round_trips_any_name(
        chars in prop::collection::vec(any::<char>(), 0..24),
        edits in prop::collection::vec(edit(), 0..8),
    ) {
        let name: String = chars.into_iter().collect();
        let mut tl = Timeline::new();
        for e in &edits {
            apply(&mut tl, e);
        }
        let artifact = export(&tl, &name, 2.0).unwrap();
        let file = parse_animations_yaml(&artifact.contents).unwrap();
        prop_assert_eq!(file.names().collect::<Vec<_>>(), vec![name.as_str()]);
        prop_assert_eq!(file.get(&name).unwrap().steps.len(), tl.len());
    }

    /// Angles written through the API stay within [-180, 180] whatever the input.
    #[test]
    fn updates_are_clamped(value in prop::num::f64::ANY) {
        let mut tl = Timeline::new();
        tl.update_selected(Joint::LeftArm, Axis::X, value);
        let x = tl.selected_pose().left_arm.x;
        prop_assert!((-180.0..=180.0).contains(&x));
    }

    #[test]
    fn interval_is_at_least_one(ticks in prop::num::f64::ANY) {
        prop_assert!(clamp_interval(ticks) >= 1);
    }
}
