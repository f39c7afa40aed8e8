//! Mission engine — maps `(mission, now, button, pot)` to an LED output.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────┐
//! │ Mission                  │ LED output                               │
//! ├──────────────────────────┼──────────────────────────────────────────┤
//! │ IDLE                     │ low                                      │
//! │ MISSION_1_ON             │ high                                     │
//! │ MISSION_1_BLINK          │ toggles every 1000 ms                    │
//! │ MISSION_2_DOORBELL       │ follows the button                       │
//! │ MISSION_2_TOGGLE         │ debounced rising edge inverts the LED    │
//! │ MISSION_3_READ           │ low (telemetry only)                     │
//! │ MISSION_3_PWM            │ duty = pot scaled 0–4095 → 0–255         │
//! │ MISSION_4_STATE_MACHINE  │ edge cycles off → on → blink 200 ms      │
//! │ MISSION_5_FINAL          │ edge cycles off → on → blink 100 ms      │
//! └──────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The engine holds no hardware handles.  The dispatcher samples inputs,
//! calls [`MissionEngine::tick`] and writes the returned [`LedOutput`].

use core::fmt;
use core::str::FromStr;

use log::info;

use crate::config::{
    ADC_MAX, BLINK_FAST_MS, BLINK_FASTER_MS, BLINK_SLOW_MS, DEBOUNCE_MS, PWM_DUTY_MAX,
};
use crate::error::CommandError;

// ---------------------------------------------------------------------------
// Mission identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mission {
    #[default]
    Idle,
    Mission1On,
    Mission1Blink,
    Mission2Doorbell,
    Mission2Toggle,
    Mission3Read,
    Mission3Pwm,
    Mission4StateMachine,
    Mission5Final,
}

impl Mission {
    pub const ALL: [Mission; 9] = [
        Self::Idle,
        Self::Mission1On,
        Self::Mission1Blink,
        Self::Mission2Doorbell,
        Self::Mission2Toggle,
        Self::Mission3Read,
        Self::Mission3Pwm,
        Self::Mission4StateMachine,
        Self::Mission5Final,
    ];

    /// Wire identifier, as carried in `missionId`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Mission1On => "MISSION_1_ON",
            Self::Mission1Blink => "MISSION_1_BLINK",
            Self::Mission2Doorbell => "MISSION_2_DOORBELL",
            Self::Mission2Toggle => "MISSION_2_TOGGLE",
            Self::Mission3Read => "MISSION_3_READ",
            Self::Mission3Pwm => "MISSION_3_PWM",
            Self::Mission4StateMachine => "MISSION_4_STATE_MACHINE",
            Self::Mission5Final => "MISSION_5_FINAL",
        }
    }

    /// Missions that act on debounced button edges.
    pub fn consumes_edges(self) -> bool {
        matches!(
            self,
            Self::Mission2Toggle | Self::Mission4StateMachine | Self::Mission5Final
        )
    }
}

impl FromStr for Mission {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CommandError::UnknownMission(s.into()))
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LED output
// ---------------------------------------------------------------------------

/// What the LED channel should be driven with on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOutput {
    /// Plain digital level.
    Level(bool),
    /// 8-bit PWM duty.
    Duty(u8),
}

impl LedOutput {
    pub const LOW: Self = Self::Level(false);
    pub const HIGH: Self = Self::Level(true);

    /// Telemetry value: 0/1 for levels, the raw duty for PWM.
    pub fn reading(self) -> u8 {
        match self {
            Self::Level(on) => on as u8,
            Self::Duty(duty) => duty,
        }
    }
}

/// Scale a 12-bit pot reading to an 8-bit duty.  Out-of-range input is
/// clamped to full scale.
pub fn pwm_duty(pot: u16) -> u8 {
    let clamped = u32::from(pot.min(ADC_MAX));
    (clamped * u32::from(PWM_DUTY_MAX) / u32::from(ADC_MAX)) as u8
}

// ---------------------------------------------------------------------------
// Three-mode cycle (MISSION_4 / MISSION_5)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Off,
    On,
    Blink,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Blink,
            Self::Blink => Self::Off,
        }
    }
}

// ---------------------------------------------------------------------------
// Edge detection
// ---------------------------------------------------------------------------

/// Rising-edge detector with a minimum spacing between accepted edges.
///
/// The sampled level is recorded on every call, so a press that happens
/// while the detector is disarmed is not reported later.  An unknown
/// previous level (right after a reset) never counts as low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    last_level: Option<bool>,
    last_accepted_ms: Option<u32>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample.  Returns `true` when an edge is accepted.
    pub fn poll(&mut self, level: bool, now_ms: u32, armed: bool) -> bool {
        let rising = level && self.last_level == Some(false);
        self.last_level = Some(level);

        if !armed || !rising {
            return false;
        }

        let settled = self
            .last_accepted_ms
            .is_none_or(|t| now_ms.wrapping_sub(t) >= DEBOUNCE_MS);
        if settled {
            self.last_accepted_ms = Some(now_ms);
        }
        settled
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Blink timer
// ---------------------------------------------------------------------------

/// Free-running square wave driven by the polling clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blinker {
    last_toggle_ms: u32,
    on: bool,
}

impl Blinker {
    /// Advance the wave.  Returns the current level.
    pub fn poll(&mut self, now_ms: u32, period_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_toggle_ms) >= period_ms {
            self.last_toggle_ms = now_ms;
            self.on = !self.on;
        }
        self.on
    }

    /// Go low and restart the period at `now_ms`.
    pub fn restart(&mut self, now_ms: u32) {
        self.last_toggle_ms = now_ms;
        self.on = false;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Per-process mission state.  Created once at boot in [`Mission::Idle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionEngine {
    mission: Mission,
    toggle_state: bool,
    mode: Mode,
    blinker: Blinker,
    edges: EdgeDetector,
}

impl MissionEngine {
    pub fn new(now_ms: u32) -> Self {
        let mut engine = Self {
            mission: Mission::Idle,
            toggle_state: false,
            mode: Mode::Off,
            blinker: Blinker::default(),
            edges: EdgeDetector::new(),
        };
        engine.blinker.restart(now_ms);
        engine
    }

    /// Switch to `mission` and reset every piece of per-mission state.
    ///
    /// Selecting the current mission again is a full reset too.
    pub fn select(&mut self, mission: Mission, now_ms: u32) {
        if mission != self.mission {
            info!("mission: {} -> {}", self.mission, mission);
        }
        self.mission = mission;
        self.toggle_state = false;
        self.mode = Mode::Off;
        self.blinker.restart(now_ms);
        self.edges.reset();
    }

    /// Advance one polling iteration.
    pub fn tick(&mut self, now_ms: u32, button: bool, pot: u16) -> LedOutput {
        let edge = self
            .edges
            .poll(button, now_ms, self.mission.consumes_edges());

        match self.mission {
            Mission::Idle | Mission::Mission3Read => LedOutput::LOW,
            Mission::Mission1On => LedOutput::HIGH,
            Mission::Mission1Blink => LedOutput::Level(self.blinker.poll(now_ms, BLINK_SLOW_MS)),
            Mission::Mission2Doorbell => LedOutput::Level(button),
            Mission::Mission2Toggle => {
                if edge {
                    self.toggle_state = !self.toggle_state;
                }
                LedOutput::Level(self.toggle_state)
            }
            Mission::Mission3Pwm => LedOutput::Duty(pwm_duty(pot)),
            Mission::Mission4StateMachine => self.cycle(edge, now_ms, BLINK_FAST_MS),
            Mission::Mission5Final => self.cycle(edge, now_ms, BLINK_FASTER_MS),
        }
    }

    fn cycle(&mut self, edge: bool, now_ms: u32, blink_ms: u32) -> LedOutput {
        if edge {
            self.mode = self.mode.next();
        }
        match self.mode {
            Mode::Off => LedOutput::LOW,
            Mode::On => LedOutput::HIGH,
            Mode::Blink => LedOutput::Level(self.blinker.poll(now_ms, blink_ms)),
        }
    }

    pub fn mission(&self) -> Mission {
        self.mission
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn toggle_state(&self) -> bool {
        self.toggle_state
    }

    pub fn led_state(&self) -> bool {
        self.blinker.is_on()
    }
}
