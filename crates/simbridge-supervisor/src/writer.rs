use std::io::Read;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use simbridge_device::Device;
use simbridge_frame::FrameReader;
use tracing::debug;

/// Spawn the parent→device loop.
///
/// The only activity with a clean exit: the parent closing its command
/// channel (or a channel fault, treated the same) drains this loop. The
/// process keeps running — the reader direction may still have output to
/// flush, and only the watchdog ends the process.
pub fn spawn_writer<D, R>(device: Arc<D>, inbound: R) -> JoinHandle<()>
where
    D: Device + ?Sized + 'static,
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = FrameReader::new(inbound);
        loop {
            match reader.read_message() {
                Ok(Some(command)) => device.write(&command),
                Ok(None) => {
                    debug!("command channel closed; command delivery drained");
                    break;
                }
                Err(err) => {
                    debug!(%err, "command channel failed; command delivery drained");
                    break;
                }
            }
        }
    })
}
