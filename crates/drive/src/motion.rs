use {
    crate::{Decision, Label},
    serde::Deserialize,
    std::{fmt, time::Duration},
};

/// Discrete commands understood by the motor controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Forward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    Pause,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Left => "left",
            Command::Right => "right",
            Command::ForwardLeft => "forward_left",
            Command::ForwardRight => "forward_right",
            Command::Pause => "pause",
        }
    }
}

/// A command and how long it is held before the next one is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Motion {
    pub command: Command,
    pub duration: Duration,
}

impl Motion {
    pub fn new(command: Command, millis: u64) -> Self {
        Self {
            command,
            duration: Duration::from_millis(millis),
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.command.as_str(), self.duration.as_millis())
    }
}

/// Ordered motions realizing one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MotionSequence(Vec<Motion>);

impl MotionSequence {
    pub fn new(motions: Vec<Motion>) -> Self {
        Self(motions)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Motion> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, motion: Motion) {
        self.0.push(motion);
    }

    pub fn as_slice(&self) -> &[Motion] {
        &self.0
    }

    pub fn total_duration(&self) -> Duration {
        self.0.iter().map(|m| m.duration).sum()
    }
}

impl fmt::Display for MotionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("idle");
        }
        for (i, motion) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{motion}")?;
        }
        Ok(())
    }
}

/// Hold times in milliseconds. Tuned per vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionTiming {
    /// Straight drive for a FORWARD decision.
    pub forward: u64,
    /// Initial turn of a LEFT/RIGHT maneuver.
    pub turn: u64,
    /// Driving forward while turning.
    pub arc: u64,
    /// Final turn that settles the heading.
    pub settle: u64,
    /// Pause closing a steering maneuver.
    pub pause: u64,
    /// Standstill of a STOP; must exceed `pause`.
    pub stop: u64,
    /// Forward nudge after a STOP.
    pub resume: u64,
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self {
            forward: 500,
            turn: 300,
            arc: 200,
            settle: 700,
            pause: 500,
            stop: 8000,
            resume: 100,
        }
    }
}

impl MotionTiming {
    pub fn sequence(&self, decision: Decision) -> MotionSequence {
        use Command::*;
        let motions = match decision {
            Decision::Steer(Label::Forward) => vec![Motion::new(Forward, self.forward)],
            Decision::Steer(Label::Left) => vec![
                Motion::new(Left, self.turn),
                Motion::new(ForwardLeft, self.arc),
                Motion::new(Left, self.settle),
                Motion::new(Pause, self.pause),
            ],
            Decision::Steer(Label::Right) => vec![
                Motion::new(Right, self.turn),
                Motion::new(ForwardRight, self.arc),
                Motion::new(Right, self.settle),
                Motion::new(Pause, self.pause),
            ],
            Decision::Steer(Label::Unknown) => Vec::new(),
            Decision::Stop => vec![Motion::new(Pause, self.stop), Motion::new(Forward, self.resume)],
        };
        MotionSequence(motions)
    }
}
