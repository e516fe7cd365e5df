use std::sync::Arc;

use serde_json::json;
use simbridge_device::{DeviceSettings, InMemoryEeprom, SimDevice};
use simbridge_supervisor::ParentWatchdog;
use simbridge_transport::{InboundChannel, OutboundChannel};
use tracing::info;

use crate::cmd::RunArgs;
use crate::exit::{transport_error, CliResult};

/// Bootstrap and hand the process to the supervisor.
///
/// Everything the bridge will ever own is constructed here: the two
/// channels, the configured device with its in-memory persistence, and the
/// watchdog with the parent identity captured before anything else can
/// change it. Never returns — the watchdog is the only way out.
pub fn run(args: RunArgs) -> CliResult<i32> {
    let inbound = InboundChannel::from_inherited_fd(args.command_fd)
        .map_err(|err| transport_error("command channel", err))?;
    let outbound = OutboundChannel::from_inherited_fd(args.output_fd)
        .map_err(|err| transport_error("output channel", err))?;

    let watchdog = ParentWatchdog::capture();

    let mut settings = DeviceSettings::defaults();
    if args.echo {
        settings.set(&["simulation", "echo_commands"], json!(true));
    }
    if let Some(ms) = args.keepalive_ms {
        settings.set(&["simulation", "keepalive_interval_ms"], json!(ms));
    }

    let device = Arc::new(SimDevice::new(&settings, Arc::new(InMemoryEeprom::new())));

    info!(
        command_fd = args.command_fd,
        output_fd = args.output_fd,
        parent = watchdog.parent_pid(),
        "bridge running"
    );

    simbridge_supervisor::run(device, inbound, outbound, watchdog)
}
