use std::io::Write;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use simbridge_device::Device;
use simbridge_frame::FrameWriter;
use tracing::debug;

/// Spawn the device→parent loop.
///
/// Runs for the life of the process. A delivery failure drops that message
/// and keeps reading: the device's output must keep draining even while the
/// outbound channel is broken, or device state desynchronizes behind a
/// stalled read loop. Empty output units and the keep-alive sentinel
/// (filtered inside [`FrameWriter::send`]) are never forwarded.
pub fn spawn_reader<D, W>(device: Arc<D>, outbound: W) -> JoinHandle<()>
where
    D: Device + ?Sized + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut writer = FrameWriter::new(outbound);
        loop {
            let line = device.read_line();
            if line.is_empty() {
                continue;
            }
            if let Err(err) = writer.send(&line) {
                debug!(%err, dropped = line.len(), "output delivery failed");
            }
        }
    })
}
