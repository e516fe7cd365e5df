//! Bridge lifecycle.
//!
//! Three independently scheduled activities share the process: the reader
//! loop (device → parent), the writer loop (parent → device), and the parent
//! watchdog. They run as OS threads, not tasks — the device's `read_line`
//! blocks, and it must never stall the other two. The watchdog is the sole
//! authority for ending the process; the loops themselves never do.

pub mod reader;
pub mod watchdog;
pub mod writer;

pub use reader::spawn_reader;
pub use watchdog::ParentWatchdog;
pub use writer::spawn_writer;

use std::io::{Read, Write};
use std::sync::Arc;

use simbridge_device::Device;

/// Wire the device to its channels and supervise until the parent dies.
///
/// Spawns the writer and reader loops, then runs the watchdog on the calling
/// thread. Never returns: the process ends only by the watchdog's kill.
pub fn run<D, R, W>(device: Arc<D>, inbound: R, outbound: W, watchdog: ParentWatchdog) -> !
where
    D: Device + ?Sized + 'static,
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    writer::spawn_writer(Arc::clone(&device), inbound);
    reader::spawn_reader(device, outbound);
    watchdog.watch()
}
