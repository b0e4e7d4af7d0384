use {
    crate::{Decision, Motion, MotionSequence, MotionTiming, MotorError, MotorSink},
    std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    tokio::sync::Mutex,
};

/// Shared request to bring the vehicle to a stop.
///
/// Every call to [`Preempt::request_stop`] advances a generation counter. Each
/// actuator remembers the last generation it honored, so one request makes
/// every live actuator run exactly one Stop sequence.
#[derive(Clone, Debug, Default)]
pub struct Preempt {
    generation: Arc<AtomicU64>,
}

impl Preempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a Stop as pending. Returns the new generation.
    pub fn request_stop(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Runs decisions as timed command sequences against a shared motor sink.
pub struct Actuator<S> {
    sink: Arc<Mutex<S>>,
    timing: MotionTiming,
    preempt: Preempt,
    seen: u64,
}

impl<S: MotorSink> Actuator<S> {
    pub fn new(sink: Arc<Mutex<S>>, timing: MotionTiming) -> Self {
        Self {
            sink,
            timing,
            preempt: Preempt::new(),
            seen: 0,
        }
    }

    /// Follow `preempt` for external stop requests. Requests made before this
    /// call are not replayed.
    pub fn with_preempt(mut self, preempt: Preempt) -> Self {
        self.seen = preempt.generation();
        self.preempt = preempt;
        self
    }

    pub fn timing(&self) -> &MotionTiming {
        &self.timing
    }

    pub fn stop_pending(&self) -> bool {
        self.preempt.generation() != self.seen
    }

    /// Issue the commands for `decision`, each held for its duration.
    ///
    /// The sink stays locked for the whole sequence, so commands of two
    /// decisions never interleave even across connections. A pending stop
    /// replaces a Steer that has not started, and cuts one that has after its
    /// current command. Returns the commands actually issued.
    pub async fn execute(&mut self, decision: Decision) -> Result<MotionSequence, MotorError> {
        let sink = Arc::clone(&self.sink);
        let mut sink = sink.lock().await;
        let mut issued = MotionSequence::default();

        if decision.is_stop() || self.stop_pending() {
            if !decision.is_stop() {
                log::warn!("Stop pending, dropping {}", decision);
            }
            self.run_stop(&mut *sink, &mut issued).await?;
            return Ok(issued);
        }

        let planned = self.timing.sequence(decision);
        for (i, motion) in planned.iter().enumerate() {
            if i > 0 && self.stop_pending() {
                log::warn!(
                    "Stop requested, abandoning {} after {} of {} commands",
                    decision,
                    i,
                    planned.len()
                );
                self.run_stop(&mut *sink, &mut issued).await?;
                return Ok(issued);
            }
            issue(&mut *sink, *motion).await?;
            issued.push(*motion);
        }
        Ok(issued)
    }

    async fn run_stop(&mut self, sink: &mut S, issued: &mut MotionSequence) -> Result<(), MotorError> {
        // requests arriving while stopped get a Stop of their own
        self.seen = self.preempt.generation();
        for motion in self.timing.sequence(Decision::Stop).iter() {
            issue(sink, *motion).await?;
            issued.push(*motion);
        }
        Ok(())
    }
}

async fn issue<S: MotorSink>(sink: &mut S, motion: Motion) -> Result<(), MotorError> {
    sink.send(motion).await?;
    tokio::time::sleep(motion.duration).await;
    Ok(())
}
