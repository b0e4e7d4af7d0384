use drive::{Command, Decision, Label, Motion, MotionTiming};

#[test]
fn test_forward_is_a_single_command() {
    let sequence = MotionTiming::default().sequence(Decision::Steer(Label::Forward));
    assert_eq!(sequence.as_slice(), &[Motion::new(Command::Forward, 500)]);
}

#[test]
fn test_left_is_three_phase_maneuver() {
    let sequence = MotionTiming::default().sequence(Decision::Steer(Label::Left));
    assert_eq!(
        sequence.as_slice(),
        &[
            Motion::new(Command::Left, 300),
            Motion::new(Command::ForwardLeft, 200),
            Motion::new(Command::Left, 700),
            Motion::new(Command::Pause, 500),
        ]
    );
}

#[test]
fn test_right_mirrors_left() {
    let sequence = MotionTiming::default().sequence(Decision::Steer(Label::Right));
    let commands: Vec<Command> = sequence.iter().map(|m| m.command).collect();
    assert_eq!(
        commands,
        vec![
            Command::Right,
            Command::ForwardRight,
            Command::Right,
            Command::Pause
        ]
    );
    assert_eq!(
        sequence.total_duration(),
        MotionTiming::default()
            .sequence(Decision::Steer(Label::Left))
            .total_duration()
    );
}

#[test]
fn test_stop_holds_longer_than_any_steering_pause() {
    let timing = MotionTiming::default();
    let sequence = timing.sequence(Decision::Stop);
    assert_eq!(
        sequence.as_slice(),
        &[
            Motion::new(Command::Pause, 8000),
            Motion::new(Command::Forward, 100),
        ]
    );
    assert!(sequence.as_slice()[0].duration.as_millis() > timing.pause as u128);
}

#[test]
fn test_unknown_is_idle() {
    let sequence = MotionTiming::default().sequence(Decision::Steer(Label::Unknown));
    assert!(sequence.is_empty());
    assert_eq!(sequence.to_string(), "idle");
}

#[test]
fn test_display() {
    assert_eq!(Motion::new(Command::ForwardLeft, 200).to_string(), "forward_left(200)");
    let sequence = MotionTiming::default().sequence(Decision::Stop);
    assert_eq!(sequence.to_string(), "pause(8000), forward(100)");
}
