//! In-process tour of the bridge loops: a scripted parent on one side of two
//! socketpairs, the simulated device on the other. Run with
//! `cargo run --example loopback`.

use std::os::unix::net::UnixStream;
use std::sync::Arc;

use serde_json::json;
use simbridge_device::{DeviceSettings, InMemoryEeprom, SimDevice};
use simbridge_frame::{FrameReader, FrameWriter};
use simbridge_supervisor::{spawn_reader, spawn_writer};

fn main() {
    let (command_parent, command_bridge) = UnixStream::pair().expect("socketpair");
    let (output_bridge, output_parent) = UnixStream::pair().expect("socketpair");

    let mut settings = DeviceSettings::defaults();
    settings.set(&["simulation", "echo_commands"], json!(true));
    let device = Arc::new(SimDevice::new(&settings, Arc::new(InMemoryEeprom::new())));

    spawn_writer(Arc::clone(&device), command_bridge);
    spawn_reader(device, output_bridge);

    let mut commands = FrameWriter::new(command_parent);
    let mut outputs = FrameReader::new(output_parent);

    for command in [b"G28".as_slice(), b"M105"] {
        commands.send(command).expect("command should send");
    }

    // Two commands, echo on: four lines back (echo + ok, twice).
    for _ in 0..4 {
        let line = outputs
            .read_message()
            .expect("output channel should read")
            .expect("device should answer");
        println!("device: {}", String::from_utf8_lossy(&line));
    }
}
