use drive::{Decision, DecisionVector, Label};

#[test]
fn test_one_hot_vectors_map_to_labels() {
    assert_eq!(DecisionVector::new(vec![1.0, 0.0, 0.0]).label(), Label::Left);
    assert_eq!(DecisionVector::new(vec![0.0, 1.0, 0.0]).label(), Label::Right);
    assert_eq!(DecisionVector::new(vec![0.0, 0.0, 1.0]).label(), Label::Forward);
}

#[test]
fn test_malformed_vectors_are_unknown() {
    for values in [
        vec![0.0, 0.0, 0.0],
        vec![1.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0],
        vec![0.5, 0.0, 0.5],
        vec![0.0, 1.0],
        vec![0.0, 0.0, 1.0, 0.0],
        vec![],
        vec![f32::NAN, 0.0, 1.0],
    ] {
        assert_eq!(
            DecisionVector::new(values.clone()).label(),
            Label::Unknown,
            "{values:?}"
        );
    }
}

#[test]
fn test_blank_vector() {
    assert!(DecisionVector::new(vec![0.0; 3]).is_blank());
    assert!(!DecisionVector::new(vec![0.0, 0.0, 1.0]).is_blank());
    assert!(!DecisionVector::new(vec![0.0; 4]).is_blank());
}

#[test]
fn test_one_hot_round_trips_labels() {
    for label in Label::ORDER {
        assert_eq!(DecisionVector::one_hot(label).label(), label);
    }
    assert!(DecisionVector::one_hot(Label::Unknown).is_blank());
}

#[test]
fn test_from_scores_picks_arg_max() {
    let vector = DecisionVector::from_scores(&[0.1, 2.5, -3.0]);
    assert_eq!(vector.values(), &[0.0, 1.0, 0.0]);
    assert_eq!(vector.label(), Label::Right);
}

#[test]
fn test_from_scores_tie_goes_to_lowest_index() {
    let vector = DecisionVector::from_scores(&[0.0, 3.0, 3.0]);
    assert_eq!(vector.label(), Label::Right);
}

#[test]
fn test_from_scores_nan_is_blank() {
    let vector = DecisionVector::from_scores(&[0.2, f32::NAN, 0.1]);
    assert!(vector.is_blank());
}

#[test]
fn test_decision_labels() {
    assert_eq!(Decision::Stop.to_string(), "STOP");
    assert_eq!(Decision::Steer(Label::Left).label_text(), "LEFT");
    assert_eq!(Decision::Steer(Label::Unknown).label_text(), "UNKNOWN");
    assert!(Decision::Stop.is_stop());
    assert!(!Decision::Steer(Label::Forward).is_stop());
}
