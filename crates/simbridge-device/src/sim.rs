use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::eeprom::EepromStore;
use crate::settings::DeviceSettings;
use crate::Device;

/// Marker the device emits when it has nothing to say. The transport layer
/// filters it; the device itself neither knows nor cares.
const KEEPALIVE: &[u8] = b"wait";

const DEFAULT_KEEPALIVE_MS: u64 = 1000;

/// A minimal simulated line device.
///
/// Every accepted command is acknowledged with `ok` (preceded by an echo of
/// the command when `simulation.echo_commands` is set). An idle `read_line`
/// emits the keep-alive marker after `simulation.keepalive_interval_ms`.
/// The single recognized command, `save`, persists the device's counters to
/// its [`EepromStore`]; everything else, including binary garbage, is
/// acknowledged blindly.
///
/// `read_line` and `write` serialize on one internal lock, upholding the
/// [`Device`] contract for callers that share an instance across threads.
pub struct SimDevice {
    outbox: Mutex<Outbox>,
    output_ready: Condvar,
    keepalive: Duration,
    echo_commands: bool,
    eeprom: Arc<dyn EepromStore>,
}

struct Outbox {
    lines: VecDeque<Vec<u8>>,
    commands_accepted: u64,
}

impl SimDevice {
    pub fn new(settings: &DeviceSettings, eeprom: Arc<dyn EepromStore>) -> Self {
        let keepalive = settings
            .get_u64(&["simulation", "keepalive_interval_ms"])
            .unwrap_or(DEFAULT_KEEPALIVE_MS);
        let echo_commands = settings
            .get_bool(&["simulation", "echo_commands"])
            .unwrap_or(false);

        let mut persisted = eeprom.load();
        let boots = persisted.get("boot_count").and_then(|v| v.as_u64()).unwrap_or(0) + 1;
        persisted["boot_count"] = json!(boots);
        eeprom.save(&persisted);

        debug!(boots, keepalive_ms = keepalive, "simulated device up");

        Self {
            outbox: Mutex::new(Outbox {
                lines: VecDeque::new(),
                commands_accepted: 0,
            }),
            output_ready: Condvar::new(),
            keepalive: Duration::from_millis(keepalive),
            echo_commands,
            eeprom,
        }
    }

    fn lock_outbox(&self) -> MutexGuard<'_, Outbox> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Device for SimDevice {
    fn read_line(&self) -> Vec<u8> {
        let mut outbox = self.lock_outbox();
        loop {
            if let Some(line) = outbox.lines.pop_front() {
                return line;
            }

            let (guard, timeout) = self
                .output_ready
                .wait_timeout(outbox, self.keepalive)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            outbox = guard;

            if timeout.timed_out() && outbox.lines.is_empty() {
                return KEEPALIVE.to_vec();
            }
        }
    }

    fn write(&self, command: &[u8]) {
        let mut outbox = self.lock_outbox();
        outbox.commands_accepted += 1;

        if self.echo_commands {
            outbox.lines.push_back(command.to_vec());
        }

        if command.trim_ascii() == b"save" {
            let mut contents = self.eeprom.load();
            contents["commands_accepted"] = json!(outbox.commands_accepted);
            self.eeprom.save(&contents);
        }

        outbox.lines.push_back(b"ok".to_vec());
        self.output_ready.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::eeprom::InMemoryEeprom;

    use super::*;

    fn device_with(settings: DeviceSettings) -> SimDevice {
        SimDevice::new(&settings, Arc::new(InMemoryEeprom::new()))
    }

    fn quick_settings(echo: bool) -> DeviceSettings {
        let mut settings = DeviceSettings::defaults();
        settings.set(&["simulation", "keepalive_interval_ms"], json!(40));
        settings.set(&["simulation", "echo_commands"], json!(echo));
        settings
    }

    #[test]
    fn command_is_acknowledged() {
        let device = device_with(quick_settings(false));
        device.write(b"G28\n");
        assert_eq!(device.read_line(), b"ok");
    }

    #[test]
    fn echo_mode_repeats_the_command() {
        let device = device_with(quick_settings(true));
        device.write(b"M105");
        assert_eq!(device.read_line(), b"M105");
        assert_eq!(device.read_line(), b"ok");
    }

    #[test]
    fn idle_read_emits_keepalive() {
        let device = device_with(quick_settings(false));
        assert_eq!(device.read_line(), b"wait");
    }

    #[test]
    fn binary_garbage_is_tolerated() {
        let device = device_with(quick_settings(false));
        device.write(&[0xFF, 0x00, 0x7F]);
        device.write(b"");
        assert_eq!(device.read_line(), b"ok");
        assert_eq!(device.read_line(), b"ok");
    }

    #[test]
    fn boot_counter_survives_reconstruction() {
        let eeprom = Arc::new(InMemoryEeprom::new());
        let settings = DeviceSettings::defaults();

        let _first = SimDevice::new(&settings, Arc::clone(&eeprom) as Arc<dyn EepromStore>);
        let _second = SimDevice::new(&settings, Arc::clone(&eeprom) as Arc<dyn EepromStore>);

        assert_eq!(eeprom.load()["boot_count"], json!(2));
    }

    #[test]
    fn save_command_persists_counters() {
        let eeprom = Arc::new(InMemoryEeprom::new());
        let device = SimDevice::new(
            &quick_settings(false),
            Arc::clone(&eeprom) as Arc<dyn EepromStore>,
        );

        device.write(b"G1 X10");
        device.write(b"save\n");

        assert_eq!(eeprom.load()["commands_accepted"], json!(2));
    }

    #[test]
    fn read_blocks_until_output_arrives() {
        let mut settings = DeviceSettings::defaults();
        settings.set(&["simulation", "keepalive_interval_ms"], json!(5000));
        let device = Arc::new(device_with(settings));

        let reader = {
            let device = Arc::clone(&device);
            thread::spawn(move || device.read_line())
        };

        thread::sleep(Duration::from_millis(10));
        device.write(b"M114");

        assert_eq!(reader.join().unwrap(), b"ok");
    }
}
