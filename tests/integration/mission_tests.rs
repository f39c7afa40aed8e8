//! Mission engine scenarios driven through the dispatcher with a
//! simulated button.

use crate::mock_hw::{CaptureSink, MockBoard, MockNvs};

use ninho::adapters::user_id_store::UserIdStore;
use ninho::app::dispatcher::Dispatcher;
use ninho::app::mission::{LedOutput, Mode};
use ninho::config::ErrorPolicy;

struct Bench {
    d: Dispatcher<UserIdStore<MockNvs>>,
    io: MockBoard,
    out: CaptureSink,
    now: u32,
}

impl Bench {
    fn new(mission: &str) -> Self {
        let mut bench = Self {
            d: Dispatcher::new(UserIdStore::load(MockNvs::new()), ErrorPolicy::Report),
            io: MockBoard::new(),
            out: CaptureSink::new(),
            now: 0,
        };
        let cmd = format!(r#"{{"type":"SET_MISSION","missionId":"{}"}}"#, mission);
        bench.d.poll(0, Some(&cmd), &mut bench.io, &mut bench.out);
        bench
    }

    /// Hold `level` for `ms`, polling every 5 ms like the firmware loop.
    fn hold(&mut self, level: bool, ms: u32) -> LedOutput {
        self.io.button = level;
        for _ in 0..ms / 5 {
            self.now += 5;
            self.d.poll(self.now, None, &mut self.io, &mut self.out);
        }
        self.io.led()
    }

    fn press(&mut self) -> LedOutput {
        self.hold(true, 100);
        self.hold(false, 100)
    }
}

#[test]
fn toggle_mission_flips_per_press() {
    let mut b = Bench::new("MISSION_2_TOGGLE");
    assert_eq!(b.hold(false, 50), LedOutput::LOW);
    assert_eq!(b.press(), LedOutput::HIGH);
    assert_eq!(b.press(), LedOutput::LOW);
}

#[test]
fn contact_bounce_counts_as_one_press() {
    let mut b = Bench::new("MISSION_2_TOGGLE");
    b.hold(false, 20);
    // Bouncing contact: high/low every 5 ms for 30 ms.
    for _ in 0..3 {
        b.hold(true, 5);
        b.hold(false, 5);
    }
    assert_eq!(b.hold(true, 100), LedOutput::HIGH);
    assert!(b.d.engine().toggle_state());
}

#[test]
fn doorbell_follows_the_button() {
    let mut b = Bench::new("MISSION_2_DOORBELL");
    assert_eq!(b.hold(true, 10), LedOutput::HIGH);
    assert_eq!(b.hold(false, 10), LedOutput::LOW);
}

#[test]
fn state_machine_three_presses_return_to_off() {
    let mut b = Bench::new("MISSION_4_STATE_MACHINE");
    b.hold(false, 20);
    assert_eq!(b.press(), LedOutput::HIGH);
    assert_eq!(b.d.engine().mode(), Mode::On);

    b.press();
    assert_eq!(b.d.engine().mode(), Mode::Blink);
    let mut levels: Vec<LedOutput> = Vec::new();
    for _ in 0..4 {
        levels.push(b.hold(false, 200));
    }
    assert!(levels.contains(&LedOutput::HIGH) && levels.contains(&LedOutput::LOW));

    assert_eq!(b.press(), LedOutput::LOW);
    assert_eq!(b.d.engine().mode(), Mode::Off);
}

#[test]
fn final_mission_blinks_at_100ms() {
    let mut b = Bench::new("MISSION_5_FINAL");
    b.hold(false, 20);
    b.press();
    b.press();
    assert_eq!(b.d.engine().mode(), Mode::Blink);

    let first = b.hold(false, 100);
    let second = b.hold(false, 100);
    assert_ne!(first, second);
}

#[test]
fn read_mission_keeps_led_off_and_reports_pot() {
    let mut b = Bench::new("MISSION_3_READ");
    b.io.pot = 1234;
    assert_eq!(b.hold(true, 500), LedOutput::LOW);
    let telemetry = b.out.records("TELEMETRY");
    let last = telemetry.last().unwrap();
    assert_eq!(last["readings"]["pot"], 1234);
    assert_eq!(last["readings"]["btn"], 1);
    assert_eq!(last["readings"]["led"], 0);
}
