use std::fmt;

/// Steering labels. The classifier scores them in the order of [`Label::ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Left,
    Right,
    Forward,
    /// Classifier output that is not one-hot. Never actuated.
    Unknown,
}

impl Label {
    pub const ORDER: [Label; 3] = [Label::Left, Label::Right, Label::Forward];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Left => "LEFT",
            Label::Right => "RIGHT",
            Label::Forward => "FORWARD",
            Label::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output over [`Label::ORDER`]. Well-formed vectors are one-hot.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionVector(Vec<f32>);

impl DecisionVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Vector with a 1 at `label`; all zeros for `Label::Unknown`.
    pub fn one_hot(label: Label) -> Self {
        Self(
            Label::ORDER
                .iter()
                .map(|&l| if l == label { 1.0 } else { 0.0 })
                .collect(),
        )
    }

    /// One-hot vector at the arg-max of `scores`.
    ///
    /// The lowest index wins a tie. Any NaN score yields the all-zero vector.
    pub fn from_scores(scores: &[f32]) -> Self {
        let mut values = vec![0.0; scores.len()];
        if scores.iter().any(|s| s.is_nan()) {
            return Self(values);
        }
        let best = scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((i, s)),
            });
        if let Some((i, _)) = best {
            values[i] = 1.0;
        }
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// The label holding the single 1, or `Label::Unknown` when the vector is
    /// not one-hot over the label set (wrong length, all zeros, several ones,
    /// or any other value).
    pub fn label(&self) -> Label {
        if self.0.len() != Label::ORDER.len() {
            return Label::Unknown;
        }
        let mut hot = None;
        for (i, &v) in self.0.iter().enumerate() {
            if v == 1.0 {
                if hot.is_some() {
                    return Label::Unknown;
                }
                hot = Some(i);
            } else if v != 0.0 {
                return Label::Unknown;
            }
        }
        hot.map_or(Label::Unknown, |i| Label::ORDER[i])
    }

    /// All zeros over the label set: the classifier saw nothing to act on.
    pub fn is_blank(&self) -> bool {
        self.0.len() == Label::ORDER.len() && self.0.iter().all(|&v| v == 0.0)
    }
}

/// What to do with the vehicle for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Steer(Label),
    /// Obstacle override; supersedes any steering for the same frame.
    Stop,
}

impl Decision {
    pub fn is_stop(&self) -> bool {
        matches!(self, Decision::Stop)
    }

    /// Text written next to recorded frames.
    pub fn label_text(&self) -> &'static str {
        match self {
            Decision::Steer(label) => label.as_str(),
            Decision::Stop => "STOP",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_text())
    }
}
