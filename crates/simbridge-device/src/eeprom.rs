use std::sync::Mutex;

use serde_json::Value;

/// Persistence collaborator for device-internal state.
///
/// Supplied to the device at construction time, so "don't persist to disk"
/// is a wiring decision rather than something patched into the device after
/// the fact. Stores are infallible by contract; a device has nowhere to
/// surface a persistence error mid-command.
pub trait EepromStore: Send + Sync {
    /// Current persisted contents. An empty object when nothing was saved.
    fn load(&self) -> Value;

    /// Replace the persisted contents.
    fn save(&self, contents: &Value);
}

/// EEPROM emulation that lives and dies with the process.
///
/// The bridge persists nothing across restarts; device state that would go
/// to a settings file on real hardware lands here instead.
#[derive(Debug)]
pub struct InMemoryEeprom {
    contents: Mutex<Value>,
}

impl Default for InMemoryEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEeprom {
    pub fn new() -> Self {
        Self {
            contents: Mutex::new(Value::Object(Default::default())),
        }
    }

    /// Seed the store with existing contents.
    pub fn with_contents(contents: Value) -> Self {
        Self {
            contents: Mutex::new(contents),
        }
    }
}

impl EepromStore for InMemoryEeprom {
    fn load(&self) -> Value {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, contents: &Value) {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = contents.clone();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn starts_empty() {
        let eeprom = InMemoryEeprom::new();
        assert_eq!(eeprom.load(), json!({}));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let eeprom = InMemoryEeprom::new();
        eeprom.save(&json!({ "boot_count": 3, "steps_per_mm": 80.0 }));

        assert_eq!(eeprom.load(), json!({ "boot_count": 3, "steps_per_mm": 80.0 }));
    }

    #[test]
    fn seeded_contents_visible() {
        let eeprom = InMemoryEeprom::with_contents(json!({ "boot_count": 7 }));
        assert_eq!(eeprom.load()["boot_count"], json!(7));
    }

    #[test]
    fn save_replaces_wholesale() {
        let eeprom = InMemoryEeprom::new();
        eeprom.save(&json!({ "a": 1 }));
        eeprom.save(&json!({ "b": 2 }));

        let contents = eeprom.load();
        assert!(contents.get("a").is_none());
        assert_eq!(contents["b"], json!(2));
    }
}
