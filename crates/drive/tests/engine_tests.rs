use base::Rect;
use candle_core::{Device, Tensor};
use drive::{
    Classifier, Decision, DecisionEngine, DecisionVector, DetectorConfig, IdleClassifier, Label,
    NoObstacles, ObstacleDetector, SizeFilter,
};
use inference::{InferError, MlpClassifier};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use vision::GrayImage;

struct FixedClassifier {
    output: Result<Vec<f32>, String>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    fn answering(values: Vec<f32>) -> Arc<Self> {
        Arc::new(Self {
            output: Ok(values),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            output: Err("model exploded".to_string()),
            calls: AtomicUsize::new(0),
        })
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, _input: &[f32]) -> Result<DecisionVector, InferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Ok(values) => Ok(DecisionVector::new(values.clone())),
            Err(msg) => Err(InferError::Candle(msg.clone())),
        }
    }
}

struct FixedDetector(Result<Vec<Rect>, String>);

impl ObstacleDetector for FixedDetector {
    fn detect(&self, _gray: &GrayImage) -> Result<Vec<Rect>, InferError> {
        self.0.clone().map_err(InferError::Candle)
    }
}

fn views() -> (GrayImage, GrayImage) {
    (GrayImage::new(320, 240), GrayImage::new(320, 120))
}

fn engine(classifier: Arc<FixedClassifier>, detector: FixedDetector) -> DecisionEngine {
    DecisionEngine::new(classifier, Arc::new(detector))
}

#[test]
fn test_classifier_steers_without_obstacles() {
    let (gray, pre) = views();
    for (values, label) in [
        (vec![1.0, 0.0, 0.0], Label::Left),
        (vec![0.0, 1.0, 0.0], Label::Right),
        (vec![0.0, 0.0, 1.0], Label::Forward),
    ] {
        let engine = engine(FixedClassifier::answering(values), FixedDetector(Ok(vec![])));
        assert_eq!(engine.decide(&gray, &pre), Decision::Steer(label));
    }
}

#[test]
fn test_obstacle_overrides_every_classifier_output() {
    let (gray, pre) = views();
    let region = Rect::new(10, 20, 30, 30);
    for values in [
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 0.0, 0.0],
        vec![1.0, 1.0, 1.0],
    ] {
        let classifier = FixedClassifier::answering(values);
        let engine = engine(classifier.clone(), FixedDetector(Ok(vec![region])));

        let assessment = engine.assess(&gray, &pre);
        assert_eq!(assessment.decision, Decision::Stop);
        assert_eq!(assessment.regions, vec![region]);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }
}

#[test]
fn test_malformed_vector_is_unknown() {
    let (gray, pre) = views();
    for values in [vec![1.0, 1.0, 0.0], vec![0.0, 0.0, 0.0], vec![0.0, 1.0]] {
        let engine = engine(FixedClassifier::answering(values), FixedDetector(Ok(vec![])));
        assert_eq!(engine.decide(&gray, &pre), Decision::Steer(Label::Unknown));
    }
}

#[test]
fn test_errors_fall_back_to_idle() {
    let (gray, pre) = views();

    let engine1 = engine(FixedClassifier::failing(), FixedDetector(Ok(vec![])));
    assert_eq!(engine1.decide(&gray, &pre), Decision::Steer(Label::Unknown));

    let classifier = FixedClassifier::answering(vec![0.0, 0.0, 1.0]);
    let engine2 = engine(classifier.clone(), FixedDetector(Err("cascade".to_string())));
    let assessment = engine2.assess(&gray, &pre);
    assert_eq!(assessment.decision, Decision::Steer(Label::Unknown));
    assert!(assessment.regions.is_empty());
}

#[test]
fn test_size_filter_drops_out_of_range_regions() {
    let (gray, pre) = views();
    let small = Rect::new(0, 0, 10, 10);
    let large = Rect::new(0, 0, 120, 90);
    let fitting = Rect::new(40, 40, 30, 50);

    let only_bad = SizeFilter::new(FixedDetector(Ok(vec![small, large])), DetectorConfig::default());
    assert!(only_bad.detect(&gray).unwrap().is_empty());

    let detector = SizeFilter::new(
        FixedDetector(Ok(vec![small, fitting, large])),
        DetectorConfig::default(),
    );
    assert_eq!(detector.detect(&gray).unwrap(), vec![fitting]);

    let engine = DecisionEngine::new(
        FixedClassifier::answering(vec![0.0, 0.0, 1.0]),
        Arc::new(SizeFilter::new(
            FixedDetector(Ok(vec![small])),
            DetectorConfig::default(),
        )),
    );
    assert_eq!(engine.decide(&gray, &pre), Decision::Steer(Label::Forward));
}

#[test]
fn test_idle_defaults_never_move() {
    let (gray, pre) = views();
    let engine = DecisionEngine::new(Arc::new(IdleClassifier), Arc::new(NoObstacles));
    assert_eq!(engine.decide(&gray, &pre), Decision::Steer(Label::Unknown));
}

#[test]
fn test_mlp_classifier_scores_become_one_hot() {
    let device = Device::Cpu;
    let mut tensors = HashMap::new();
    tensors.insert(
        "layers.0.weight".to_string(),
        Tensor::new(&[[1f32, 1., 0., 0.], [0., 0., 1., 1.], [0., 0., 0., 0.]], &device).unwrap(),
    );
    tensors.insert(
        "layers.0.bias".to_string(),
        Tensor::new(&[0f32, 0., 0.5], &device).unwrap(),
    );
    let model = MlpClassifier::from_tensors(tensors, &device).unwrap();

    // left half of a 2x2 view lit: scores [2, 0, 0.5]
    let pre = GrayImage::from_raw(2, 2, vec![255, 255, 0, 0]).unwrap();
    let gray = GrayImage::new(320, 240);
    let engine = DecisionEngine::new(Arc::new(model), Arc::new(NoObstacles));
    assert_eq!(engine.decide(&gray, &pre), Decision::Steer(Label::Left));

    // wrong input size is a classifier failure, not a crash
    let (gray, pre) = views();
    assert_eq!(engine.decide(&gray, &pre), Decision::Steer(Label::Unknown));
}
