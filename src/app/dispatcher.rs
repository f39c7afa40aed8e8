//! Dispatcher — the polling-loop core.
//!
//! [`Dispatcher`] owns the mission engine and the identity store.  Each
//! iteration of the main loop calls [`Dispatcher::poll`] once:
//!
//! ```text
//!   line? ──▶ parse ──▶ execute ──▶ ACK / TELEMETRY / VERSION / ERROR
//!                          │
//!   IoPort ──▶ sample ──▶ MissionEngine::tick ──▶ IoPort::write_led
//!                          │
//!   every 500 ms ─────────▶ TELEMETRY
//! ```
//!
//! All I/O flows through port traits injected at call sites, so the whole
//! loop runs on the host against mock adapters.

use log::{debug, info, warn};

use crate::adapters::utils::is_valid_user_id;
use crate::config::{ErrorPolicy, TELEMETRY_INTERVAL_MS};
use crate::error::{CommandError, Error, Result};
use crate::protocol::{Command, CommandKind, Outbound, Readings, parse};
use crate::version::{FIRMWARE_BUILD, FIRMWARE_DATE, FIRMWARE_VERSION};

use super::mission::{Mission, MissionEngine};
use super::ports::{IdentityPort, IoPort, LineSink};

pub struct Dispatcher<I: IdentityPort> {
    engine: MissionEngine,
    identity: I,
    policy: ErrorPolicy,
    last_telemetry_ms: u32,
}

impl<I: IdentityPort> Dispatcher<I> {
    /// Boot state: `IDLE`, telemetry timer at 0.
    pub fn new(identity: I, policy: ErrorPolicy) -> Self {
        Self {
            engine: MissionEngine::new(0),
            identity,
            policy,
            last_telemetry_ms: 0,
        }
    }

    /// Run one loop iteration.
    ///
    /// `line` is the inbound line completed since the last call, if any.
    pub fn poll<IO, S>(&mut self, now_ms: u32, line: Option<&str>, io: &mut IO, out: &mut S)
    where
        IO: IoPort,
        S: LineSink,
    {
        if let Some(line) = line.filter(|l| !l.trim().is_empty()) {
            self.handle_line(line, now_ms, io, out);
        }

        let (button, pot) = sample(io);
        let led = self.engine.tick(now_ms, button, pot);
        if let Err(e) = io.write_led(led) {
            warn!("led: {}", e);
        }

        // Periodic telemetry reports the same samples the tick just used.
        if now_ms.wrapping_sub(self.last_telemetry_ms) >= TELEMETRY_INTERVAL_MS {
            self.last_telemetry_ms = now_ms;
            self.send_telemetry(button, pot, io.led_reading(), out);
        }
    }

    /// Parse and execute one line, applying the error policy on failure.
    pub fn handle_line<IO, S>(&mut self, line: &str, now_ms: u32, io: &mut IO, out: &mut S)
    where
        IO: IoPort,
        S: LineSink,
    {
        let cmd = parse(line);
        if let Err(e) = self.execute(cmd, now_ms, io, out) {
            self.report(&e, out);
        }
    }

    fn execute<IO, S>(&mut self, cmd: Command, now_ms: u32, io: &mut IO, out: &mut S) -> Result<()>
    where
        IO: IoPort,
        S: LineSink,
    {
        match cmd.kind {
            CommandKind::SetId => {
                let id = cmd.user_id.ok_or(CommandError::MissingField("userId"))?;
                if !is_valid_user_id(&id) {
                    return Err(CommandError::InvalidUserId.into());
                }
                self.identity.set_user_id(&id)?;
                info!("identity: user id set ({} bytes)", id.len());
                emit(out, &Outbound::Ack { command: "SET_ID" });
            }
            CommandKind::SetMission => {
                let id = cmd.mission_id.ok_or(CommandError::MissingField("missionId"))?;
                let mission: Mission = id.parse()?;
                self.engine.select(mission, now_ms);
                emit(out, &Outbound::Ack { command: "SET_MISSION" });
            }
            CommandKind::GetStatus => {
                let (button, pot) = sample(io);
                self.send_telemetry(button, pot, io.led_reading(), out);
            }
            CommandKind::GetVersion => emit(
                out,
                &Outbound::Version {
                    version: FIRMWARE_VERSION,
                    build: FIRMWARE_BUILD,
                    date: FIRMWARE_DATE,
                },
            ),
            CommandKind::Unrecognized(kind) => {
                return Err(CommandError::UnknownCommand(kind).into());
            }
            CommandKind::Invalid => return Err(CommandError::Malformed.into()),
        }
        Ok(())
    }

    fn report<S: LineSink>(&self, err: &Error, out: &mut S) {
        if err.is_client_fault() {
            if self.policy == ErrorPolicy::Silent {
                debug!("dropped command: {}", err);
                return;
            }
            debug!("rejected command: {}", err);
        } else {
            warn!("command failed: {}", err);
        }
        let message = err.to_string();
        emit(out, &Outbound::Error { message: &message });
    }

    fn send_telemetry<S: LineSink>(&self, button: bool, pot: u16, led: u8, out: &mut S) {
        emit(
            out,
            &Outbound::Telemetry {
                user_id: self.identity.user_id(),
                mission_id: self.engine.mission().as_str(),
                readings: Readings {
                    led,
                    btn: button as u8,
                    pot,
                },
            },
        );
    }

    pub fn engine(&self) -> &MissionEngine {
        &self.engine
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn into_identity(self) -> I {
        self.identity
    }
}

/// Read both inputs, falling back to released / 0 on failure.
fn sample<IO: IoPort>(io: &mut IO) -> (bool, u16) {
    let button = io.read_button().unwrap_or_else(|e| {
        warn!("button: {}", e);
        false
    });
    let pot = io.read_pot().unwrap_or_else(|e| {
        warn!("pot: {}", e);
        0
    });
    (button, pot)
}

fn emit<S: LineSink>(out: &mut S, msg: &Outbound<'_>) {
    match msg.to_line() {
        Ok(line) => out.send_line(&line),
        Err(e) => warn!("encode failed: {}", e),
    }
}
