use crate::app::pattern::{Motion, PatternClassifier};
use crate::app::pulse::PulseTrain;
use crate::app::signal::EdgeTracker;
use crate::app::stability::StabilityMonitor;
use crate::config::Config;
use crate::hal::Platform;
use crate::svc::Instant;

pub mod pattern;
pub mod pulse;
pub mod signal;
pub mod stability;

/// The engine's belief about gate position. `Unknown` is held only until
/// the first classification or stability detection after startup.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum DoorState {
    #[default]
    Unknown,
    Open,
    Closed,
    Opening,
    Closing,
    /// Reserved; never assigned by the current logic.
    Stopped,
}

/// Position requested by the remote controller, as distinct from the
/// engine's belief about where the gate actually is.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum TargetState {
    Open,
    #[default]
    Closed,
}

impl TargetState {
    fn as_door_state(self) -> DoorState {
        match self {
            TargetState::Open => DoorState::Open,
            TargetState::Closed => DoorState::Closed,
        }
    }
}

/// What the accessory binding sees. Pushed outward only when it changes.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct SystemState {
    pub door_state: DoorState,
    pub target_state: TargetState,
    /// Placeholder: no obstruction sensing is wired up.
    pub obstruction: bool,
}

struct Services<'a> {
    platform: &'a dyn Platform,
}

pub struct Engine<'a> {
    services: Services<'a>,
    edges: EdgeTracker,
    classifier: PatternClassifier,
    stability: StabilityMonitor,
    pulses: PulseTrain,
    /// Motion belief driving command decisions. May briefly disagree with
    /// the optimistic `state.door_state` pushed after a command, until the
    /// status line corroborates.
    motion: DoorState,
    state: SystemState,
    pushed: Option<SystemState>,
}

impl<'a> Engine<'a> {
    pub fn new(platform: &'a dyn Platform, config: &Config, now: Instant) -> anyhow::Result<Self> {
        config.validate()?;

        Ok(Self {
            services: Services { platform },
            edges: EdgeTracker::new(now),
            classifier: PatternClassifier::new(config),
            stability: StabilityMonitor::new(config.stable_threshold),
            pulses: PulseTrain::new(config),
            motion: DoorState::Unknown,
            state: SystemState::default(),
            pushed: None,
        })
    }

    pub fn door_state(&self) -> DoorState {
        self.motion
    }

    /// Poll entry point. Samples the status line, advances inference and
    /// any in-flight relay sequence, then pushes state changes outward.
    pub fn update(&mut self, now: Instant) {
        let level = self.services.platform.status_line().level();

        if let Some(cycle) = self.edges.observe(level, now) {
            match self.classifier.classify(&cycle) {
                Some(Motion::Closing) => self.transition(DoorState::Closing, TargetState::Closed),
                Some(Motion::Opening) => self.transition(DoorState::Opening, TargetState::Open),
                None => log::debug!(
                    "unclassified cycle: high {}ms / low {}ms",
                    cycle.high.as_millis(),
                    cycle.low.as_millis()
                ),
            }
        }

        // Must run after the edge update so a transition observed this
        // very tick restarts the quiet timer.
        let resting = self.edges.resting_level();
        let quiet = self.edges.quiet_time(now);
        if let Some(terminal) = self.stability.check(resting, quiet) {
            let target = match terminal {
                DoorState::Open => TargetState::Open,
                _ => TargetState::Closed,
            };
            self.transition(terminal, target);
        }

        if let Some(level) = self.pulses.advance(now) {
            self.services.platform.relay().set_level(level);
        }

        self.push_if_changed();
    }

    /// Command entry point for a newly requested target state. Always
    /// succeeds; the physical gate is authoritative and the poll path
    /// corrects any divergence within a few cycles.
    pub fn request(&mut self, target: TargetState, now: Instant) {
        let same_direction = matches!(
            (self.motion, target),
            (DoorState::Opening, TargetState::Open) | (DoorState::Closing, TargetState::Closed)
        );
        if same_direction {
            log::info!("gate is already moving, target {target:?}");
            return;
        }

        let reversing = matches!(
            (self.motion, target),
            (DoorState::Closing, TargetState::Open) | (DoorState::Opening, TargetState::Closed)
        );
        if reversing {
            // One tap stops the gate, the second starts it the other way.
            log::info!("gate was {:?}; reversing, target {target:?}", self.motion);
            self.pulses.start(2, now);
            self.motion = match target {
                TargetState::Open => DoorState::Opening,
                TargetState::Closed => DoorState::Closing,
            };
        } else {
            log::info!("actuating gate, target {target:?}");
            self.pulses.start(1, now);
        }

        self.state.door_state = target.as_door_state();
        self.state.target_state = target;
        self.push_if_changed();
    }

    fn transition(&mut self, door_state: DoorState, target: TargetState) {
        if self.motion == door_state {
            return;
        }

        log::info!("gate is {door_state:?}");
        self.motion = door_state;
        self.state.door_state = door_state;
        self.state.target_state = target;
    }

    fn push_if_changed(&mut self) {
        if self.pushed != Some(self.state) {
            self.services.platform.reporter().set_system_state(&self.state);
            self.pushed = Some(self.state);
        }
    }
}
