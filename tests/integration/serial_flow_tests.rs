//! End-to-end flow: raw serial bytes in, newline-terminated records out.
//!
//! Uses the real `SerialLink` framing and the host NVS backend, with an
//! in-memory transport standing in for the UART.

use std::collections::VecDeque;

use crate::mock_hw::MockBoard;

use ninho::adapters::nvs::NvsAdapter;
use ninho::adapters::user_id_store::UserIdStore;
use ninho::app::dispatcher::Dispatcher;
use ninho::app::ports::IdentityPort;
use ninho::config::ErrorPolicy;
use ninho::protocol::transport::{SerialLink, Transport};

#[derive(Default)]
struct MemoryUart {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl MemoryUart {
    fn take_lines(&mut self) -> Vec<String> {
        let text = String::from_utf8(std::mem::take(&mut self.tx)).unwrap();
        text.lines().map(str::to_owned).collect()
    }
}

impl Transport for MemoryUart {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

fn run_loop(
    d: &mut Dispatcher<UserIdStore<NvsAdapter>>,
    link: &mut SerialLink<MemoryUart>,
    io: &mut MockBoard,
    from: u32,
    iterations: u32,
) {
    for i in 0..iterations {
        let line = link.poll_line();
        d.poll(from + i * 5, line.as_deref(), io, link);
    }
}

#[test]
fn crlf_commands_arrive_one_per_iteration() {
    let identity = UserIdStore::load(NvsAdapter::new().unwrap());
    let mut d = Dispatcher::new(identity, ErrorPolicy::Silent);
    let mut link = SerialLink::new(MemoryUart::default());
    let mut io = MockBoard::new();

    link.transport_mut().rx.extend(
        b"{\"type\":\"SET_ID\",\"userId\":\"aluno-7\"}\r\n\
          {\"type\":\"SET_MISSION\",\"missionId\":\"MISSION_1_ON\"}\r\n\
          not-json\r\n\
          {\"type\":\"GET_STATUS\"}\r\n",
    );

    run_loop(&mut d, &mut link, &mut io, 10, 4);

    let lines = link.transport_mut().take_lines();
    assert_eq!(
        lines,
        [
            r#"{"type":"ACK","command":"SET_ID"}"#,
            r#"{"type":"ACK","command":"SET_MISSION"}"#,
            r#"{"type":"TELEMETRY","userId":"aluno-7","missionId":"MISSION_1_ON","readings":{"led":1,"btn":0,"pot":0}}"#,
        ]
    );
    assert!(d.identity().has_user_id());
}

#[test]
fn identity_persists_across_reboot() {
    let identity = UserIdStore::load(NvsAdapter::new().unwrap());
    let mut d = Dispatcher::new(identity, ErrorPolicy::Silent);
    let mut link = SerialLink::new(MemoryUart::default());
    let mut io = MockBoard::new();

    link.transport_mut()
        .rx
        .extend(b"{\"type\":\"SET_ID\",\"userId\":\"abc123\"}\n");
    run_loop(&mut d, &mut link, &mut io, 0, 1);

    // Reboot: reload from the same storage.
    let nvs = d.into_identity().into_storage();
    let mut d = Dispatcher::new(UserIdStore::load(nvs), ErrorPolicy::Silent);
    assert_eq!(d.identity().user_id(), "abc123");

    link.transport_mut().take_lines();
    link.transport_mut().rx.extend(b"{\"type\":\"GET_STATUS\"}\n");
    run_loop(&mut d, &mut link, &mut io, 0, 1);
    let lines = link.transport_mut().take_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(r#""userId":"abc123""#));
}

#[test]
fn oversized_line_is_skipped_and_stream_recovers() {
    let identity = UserIdStore::load(NvsAdapter::new().unwrap());
    let mut d = Dispatcher::new(identity, ErrorPolicy::Report);
    let mut link = SerialLink::new(MemoryUart::default());
    let mut io = MockBoard::new();

    let mut data = vec![b'{'; 600];
    data.push(b'\n');
    data.extend_from_slice(b"{\"type\":\"GET_VERSION\"}\n");
    link.transport_mut().rx.extend(data);

    run_loop(&mut d, &mut link, &mut io, 0, 2);

    let lines = link.transport_mut().take_lines();
    assert_eq!(
        lines,
        [r#"{"type":"VERSION","version":"1.0.0","build":1,"date":"2025-11-24"}"#]
    );
}
