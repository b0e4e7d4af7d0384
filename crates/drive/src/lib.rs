//! Control core of the rover: turns extracted video frames into steering
//! decisions, motor commands and an on-disk archive, one connection at a time.

pub mod actuator;
pub mod config;
pub mod connection;
pub mod decision;
pub mod engine;
pub mod error;
pub mod motion;
pub mod motor;
pub mod recorder;

pub use actuator::{Actuator, Preempt};
pub use config::RoverConfig;
pub use connection::{CloseReason, ConnectionReport, ConnectionServer};
pub use decision::{Decision, DecisionVector, Label};
pub use engine::{
    Assessment, Classifier, DecisionEngine, DetectorConfig, IdleClassifier, NoObstacles,
    ObstacleDetector, SizeFilter,
};
pub use error::{ConfigError, MotorError, RecordError};
pub use motion::{Command, Motion, MotionSequence, MotionTiming};
pub use motor::{LineSink, LogSink, MotorSink};
pub use recorder::{Archive, Session, SessionRecorder};
