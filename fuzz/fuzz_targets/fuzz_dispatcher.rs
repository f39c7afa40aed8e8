//! Fuzz target: `Dispatcher::poll`
//!
//! Splits the input into lines and feeds one per loop iteration, with the
//! button and pot driven from the same bytes.  Checks that:
//! - No panics under any input
//! - Every outbound record is a single line of valid JSON with a `type`
//! - The engine always ends on a known mission
//!
//! cargo fuzz run fuzz_dispatcher

#![no_main]

use libfuzzer_sys::fuzz_target;
use ninho::app::dispatcher::Dispatcher;
use ninho::app::mission::{LedOutput, Mission};
use ninho::app::ports::{IdentityPort, IoPort, LineSink, StorageError};
use ninho::config::ErrorPolicy;
use ninho::error::IoError;

struct Board {
    button: bool,
    pot: u16,
    led: LedOutput,
}

impl IoPort for Board {
    fn read_button(&mut self) -> Result<bool, IoError> {
        Ok(self.button)
    }
    fn read_pot(&mut self) -> Result<u16, IoError> {
        Ok(self.pot)
    }
    fn write_led(&mut self, output: LedOutput) -> Result<(), IoError> {
        self.led = output;
        Ok(())
    }
    fn led_reading(&self) -> u8 {
        self.led.reading()
    }
}

#[derive(Default)]
struct Ident(String);

impl IdentityPort for Ident {
    fn set_user_id(&mut self, id: &str) -> Result<(), StorageError> {
        self.0 = id.to_owned();
        Ok(())
    }
    fn user_id(&self) -> &str {
        &self.0
    }
    fn has_user_id(&self) -> bool {
        !self.0.is_empty()
    }
}

struct Checked;

impl LineSink for Checked {
    fn send_line(&mut self, line: &str) {
        assert!(!line.contains('\n'));
        let v: serde_json::Value = serde_json::from_str(line).expect("outbound must be JSON");
        assert!(v["type"].is_string());
    }
}

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut d = Dispatcher::new(Ident::default(), ErrorPolicy::Report);
    let mut io = Board {
        button: false,
        pot: 0,
        led: LedOutput::LOW,
    };
    let mut now: u32 = 0;

    for (i, line) in text.split('\n').enumerate() {
        io.button = line.len() % 2 == 1;
        io.pot = (line.len() as u16).wrapping_mul(97);
        now = now.wrapping_add(7 * (i as u32 + 1));
        d.poll(now, Some(line), &mut io, &mut Checked);
    }

    assert!(Mission::ALL.contains(&d.engine().mission()));
});
