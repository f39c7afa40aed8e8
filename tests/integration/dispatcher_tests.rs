//! Integration tests for the line → Dispatcher → LED / telemetry pipeline.
//!
//! These run on the host and drive the dispatcher exactly like the main
//! loop does: one `poll` per iteration, with an optional inbound line.

use crate::mock_hw::{CaptureSink, MockBoard, MockNvs};

use ninho::adapters::user_id_store::UserIdStore;
use ninho::app::dispatcher::Dispatcher;
use ninho::app::mission::{LedOutput, Mission};
use ninho::app::ports::IdentityPort;
use ninho::config::ErrorPolicy;

type TestDispatcher = Dispatcher<UserIdStore<MockNvs>>;

fn make(policy: ErrorPolicy) -> (TestDispatcher, MockBoard, CaptureSink) {
    let identity = UserIdStore::load(MockNvs::new());
    (
        Dispatcher::new(identity, policy),
        MockBoard::new(),
        CaptureSink::new(),
    )
}

// ── Mission selection ────────────────────────────────────────

#[test]
fn blink_mission_ack_then_square_wave() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    let t0 = 100;

    d.poll(
        t0,
        Some(r#"{"type":"SET_MISSION","missionId":"MISSION_1_BLINK"}"#),
        &mut io,
        &mut out,
    );
    assert_eq!(out.drain(), [r#"{"type":"ACK","command":"SET_MISSION"}"#]);
    assert_eq!(io.led(), LedOutput::LOW);

    d.poll(t0 + 1_000, None, &mut io, &mut out);
    assert_eq!(io.led(), LedOutput::HIGH);

    d.poll(t0 + 2_000, None, &mut io, &mut out);
    assert_eq!(io.led(), LedOutput::LOW);
}

#[test]
fn repeated_set_mission_resets_identically() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    let cmd = r#"{"type":"SET_MISSION","missionId":"MISSION_2_TOGGLE"}"#;

    d.poll(10, Some(cmd), &mut io, &mut out);
    io.button = true;
    d.poll(20, None, &mut io, &mut out);
    assert!(d.engine().toggle_state());
    io.button = false;

    d.poll(300, Some(cmd), &mut io, &mut out);
    let first = d.engine().clone();
    d.poll(300, Some(cmd), &mut io, &mut out);
    assert_eq!(d.engine(), &first);
    assert!(!d.engine().toggle_state());
}

#[test]
fn unknown_mission_is_rejected_without_state_change() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    d.poll(
        10,
        Some(r#"{"type":"SET_MISSION","missionId":"MISSION_1_ON"}"#),
        &mut io,
        &mut out,
    );
    out.drain();

    d.poll(
        20,
        Some(r#"{"type":"SET_MISSION","missionId":"MISSION_42"}"#),
        &mut io,
        &mut out,
    );
    d.poll(30, Some(r#"{"type":"SET_MISSION"}"#), &mut io, &mut out);

    assert!(out.lines.is_empty());
    assert_eq!(d.engine().mission(), Mission::Mission1On);
    assert_eq!(io.led(), LedOutput::HIGH);
}

#[test]
fn pwm_mission_reports_duty_in_telemetry() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    io.pot = 4095;
    d.poll(
        0,
        Some(r#"{"type":"SET_MISSION","missionId":"MISSION_3_PWM"}"#),
        &mut io,
        &mut out,
    );
    d.poll(10, Some(r#"{"type":"GET_STATUS"}"#), &mut io, &mut out);

    let telemetry = out.records("TELEMETRY");
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0]["missionId"], "MISSION_3_PWM");
    assert_eq!(telemetry[0]["readings"]["led"], 255);
    assert_eq!(telemetry[0]["readings"]["pot"], 4095);
}

// ── Identity ─────────────────────────────────────────────────

#[test]
fn set_id_shows_up_in_telemetry() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    d.poll(
        10,
        Some(r#"{"type":"SET_ID","userId":"abc123"}"#),
        &mut io,
        &mut out,
    );
    assert_eq!(out.drain(), [r#"{"type":"ACK","command":"SET_ID"}"#]);
    assert_eq!(d.identity().user_id(), "abc123");

    d.poll(500, None, &mut io, &mut out);
    let telemetry = out.records("TELEMETRY");
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0]["userId"], "abc123");
}

#[test]
fn non_ascii_user_id_is_accepted() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    d.poll(
        10,
        Some(r#"{"type":"SET_ID","userId":"joão"}"#),
        &mut io,
        &mut out,
    );
    assert_eq!(out.drain(), [r#"{"type":"ACK","command":"SET_ID"}"#]);
    assert_eq!(d.identity().user_id(), "joão");

    d.poll(500, None, &mut io, &mut out);
    let telemetry = out.records("TELEMETRY");
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0]["userId"], "joão");
}

#[test]
fn control_characters_in_user_id_are_rejected() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Report);
    d.poll(
        10,
        Some(r#"{"type":"SET_ID","userId":"ab"}"#),
        &mut io,
        &mut out,
    );
    assert_eq!(
        out.drain(),
        [r#"{"type":"ERROR","message":"invalid userId"}"#]
    );
    assert!(!d.identity().has_user_id());
}

#[test]
fn storage_failure_is_reported_even_when_silent() {
    let mut nvs = MockNvs::new();
    nvs.fail_writes = true;
    let mut d = Dispatcher::new(UserIdStore::load(nvs), ErrorPolicy::Silent);
    let mut io = MockBoard::new();
    let mut out = CaptureSink::new();

    d.poll(
        0,
        Some(r#"{"type":"SET_ID","userId":"abc123"}"#),
        &mut io,
        &mut out,
    );
    assert_eq!(
        out.lines,
        [r#"{"type":"ERROR","message":"storage: storage full"}"#]
    );
    assert!(!d.identity().has_user_id());
}

// ── Error policy ─────────────────────────────────────────────

#[test]
fn garbage_is_dropped_silently() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    let before = d.engine().clone();
    for line in ["not-json", "[1,2]", r#"{"type":"REBOOT"}"#, "{}"] {
        d.poll(10, Some(line), &mut io, &mut out);
    }
    assert!(out.lines.is_empty());
    assert_eq!(d.engine().mission(), before.mission());
}

#[test]
fn garbage_is_reported_when_configured() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Report);
    d.poll(10, Some("not-json"), &mut io, &mut out);
    assert_eq!(out.records("ERROR").len(), 1);
}

#[test]
fn blank_lines_are_ignored_even_when_reporting() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Report);
    d.poll(10, Some(""), &mut io, &mut out);
    d.poll(20, Some("   "), &mut io, &mut out);
    assert!(out.lines.is_empty());
}

// ── Telemetry timing ─────────────────────────────────────────

#[test]
fn get_status_emits_exactly_one_record_and_keeps_the_timer() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    d.poll(100, Some(r#"{"type":"GET_STATUS"}"#), &mut io, &mut out);
    assert_eq!(out.drain().len(), 1);

    // Periodic telemetry is still due at 500 ms after boot.
    d.poll(499, None, &mut io, &mut out);
    assert!(out.lines.is_empty());
    d.poll(500, None, &mut io, &mut out);
    assert_eq!(out.records("TELEMETRY").len(), 1);
}

#[test]
fn telemetry_survives_clock_wrap() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    let mut t: u32 = u32::MAX - 1_250;
    d.poll(t, None, &mut io, &mut out);
    out.drain();

    for _ in 0..20 {
        t = t.wrapping_add(100);
        d.poll(t, None, &mut io, &mut out);
    }
    // 2000 ms of polling across the wrap: four records.
    assert_eq!(out.records("TELEMETRY").len(), 4);
}

#[test]
fn read_failures_fall_back_to_released_and_zero() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    io.button = true;
    io.pot = 3000;
    io.fail_reads = true;
    d.poll(
        0,
        Some(r#"{"type":"SET_MISSION","missionId":"MISSION_2_DOORBELL"}"#),
        &mut io,
        &mut out,
    );
    d.poll(500, None, &mut io, &mut out);

    assert_eq!(io.led(), LedOutput::LOW);
    let telemetry = out.records("TELEMETRY");
    assert_eq!(telemetry[0]["readings"]["btn"], 0);
    assert_eq!(telemetry[0]["readings"]["pot"], 0);
}

#[test]
fn version_request() {
    let (mut d, mut io, mut out) = make(ErrorPolicy::Silent);
    d.poll(0, Some(r#"{"type":"GET_VERSION"}"#), &mut io, &mut out);
    let version = out.records("VERSION");
    assert_eq!(version.len(), 1);
    assert_eq!(version[0]["version"], "1.0.0");
    assert_eq!(version[0]["build"], 1);
}
