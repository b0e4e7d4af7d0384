use {
    crate::{Decision, DecisionVector, Label},
    base::Rect,
    inference::{InferError, MlpClassifier},
    serde::Deserialize,
    std::sync::Arc,
    vision::{Frame, GrayImage},
};

/// Maps the normalized pre-processed view to a decision vector over
/// [`Label::ORDER`].
pub trait Classifier: Send + Sync {
    fn classify(&self, input: &[f32]) -> Result<DecisionVector, InferError>;
}

/// Finds obstacles in a grayscale view. Any region is a stop signal.
pub trait ObstacleDetector: Send + Sync {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Rect>, InferError>;
}

impl Classifier for MlpClassifier {
    fn classify(&self, input: &[f32]) -> Result<DecisionVector, InferError> {
        let scores = self.predict(input)?;
        Ok(DecisionVector::from_scores(&scores))
    }
}

/// Always answers the all-zero vector: the vehicle never steers on its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleClassifier;

impl Classifier for IdleClassifier {
    fn classify(&self, _input: &[f32]) -> Result<DecisionVector, InferError> {
        Ok(DecisionVector::new(vec![0.0; Label::ORDER.len()]))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ObstacleDetector for NoObstacles {
    fn detect(&self, _gray: &GrayImage) -> Result<Vec<Rect>, InferError> {
        Ok(Vec::new())
    }
}

/// Accepted obstacle sizes in pixels, both sides inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    pub min_region: u32,
    pub max_region: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_region: 25,
            max_region: 55,
        }
    }
}

/// Drops regions of a wrapped detector that fall outside the configured sizes.
pub struct SizeFilter<D> {
    inner: D,
    config: DetectorConfig,
}

impl<D: ObstacleDetector> SizeFilter<D> {
    pub fn new(inner: D, config: DetectorConfig) -> Self {
        Self { inner, config }
    }
}

impl<D: ObstacleDetector> ObstacleDetector for SizeFilter<D> {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Rect>, InferError> {
        let mut regions = self.inner.detect(gray)?;
        regions.retain(|r| r.fits(self.config.min_region, self.config.max_region));
        Ok(regions)
    }
}

/// A decision together with the obstacle regions that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    pub decision: Decision,
    pub regions: Vec<Rect>,
}

/// Combines the obstacle override with the steering classifier.
#[derive(Clone)]
pub struct DecisionEngine {
    classifier: Arc<dyn Classifier>,
    detector: Arc<dyn ObstacleDetector>,
}

impl DecisionEngine {
    pub fn new(classifier: Arc<dyn Classifier>, detector: Arc<dyn ObstacleDetector>) -> Self {
        Self {
            classifier,
            detector,
        }
    }

    pub fn decide(&self, gray: &GrayImage, preprocessed: &GrayImage) -> Decision {
        self.assess(gray, preprocessed).decision
    }

    /// Decide for one frame.
    ///
    /// Never fails: detector or classifier errors and malformed vectors all
    /// end up as `Steer(Unknown)`, which the actuator ignores.
    pub fn assess(&self, gray: &GrayImage, preprocessed: &GrayImage) -> Assessment {
        match self.detector.detect(gray) {
            Ok(regions) if !regions.is_empty() => {
                log::debug!("{} obstacle region(s), stopping", regions.len());
                return Assessment {
                    decision: Decision::Stop,
                    regions,
                };
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Obstacle detector failed: {}", e);
                return Assessment {
                    decision: Decision::Steer(Label::Unknown),
                    regions: Vec::new(),
                };
            }
        }

        let input = vision::normalize(preprocessed);
        let label = match self.classifier.classify(&input) {
            Ok(vector) => {
                let label = vector.label();
                if label == Label::Unknown {
                    if vector.is_blank() {
                        log::debug!("Classifier found nothing to steer by");
                    } else {
                        log::warn!("Malformed decision vector {:?}", vector.values());
                    }
                }
                label
            }
            Err(e) => {
                log::warn!("Classifier failed: {}", e);
                Label::Unknown
            }
        };
        Assessment {
            decision: Decision::Steer(label),
            regions: Vec::new(),
        }
    }

    pub fn assess_frame(&self, frame: &Frame) -> Assessment {
        self.assess(frame.gray(), frame.edges())
    }
}
