use serde_json::{json, Map, Value};

/// In-memory device configuration, resolved by key path.
///
/// A device implementation expects a settings object; this one is backed by
/// a JSON tree instead of anything that does file I/O. Lookups walk the tree
/// key by key and return `None` for an absent path or a value of the wrong
/// type — a missing setting is the implementation's cue to fall back to its
/// own default.
#[derive(Debug, Clone)]
pub struct DeviceSettings {
    root: Value,
}

impl DeviceSettings {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Built-in defaults for the simulated device.
    pub fn defaults() -> Self {
        Self::new(json!({
            "simulation": {
                "keepalive_interval_ms": 1000,
                "echo_commands": false,
            }
        }))
    }

    pub fn get_bool(&self, path: &[&str]) -> Option<bool> {
        self.lookup(path)?.as_bool()
    }

    pub fn get_u64(&self, path: &[&str]) -> Option<u64> {
        self.lookup(path)?.as_u64()
    }

    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path)?.as_str()
    }

    /// Replace the value at `path`, creating intermediate objects as needed.
    pub fn set(&mut self, path: &[&str], value: Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for key in parents {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return;
            };
            current = map
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        if let Value::Object(map) = current {
            map.insert((*last).to_string(), value);
        }
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.root;
        for key in path {
            current = current.get(key)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_lookup_by_path() {
        let settings = DeviceSettings::new(json!({
            "simulation": { "keepalive_interval_ms": 250, "echo_commands": true },
            "identity": { "name": "virtual" },
        }));

        assert_eq!(
            settings.get_u64(&["simulation", "keepalive_interval_ms"]),
            Some(250)
        );
        assert_eq!(settings.get_bool(&["simulation", "echo_commands"]), Some(true));
        assert_eq!(settings.get_str(&["identity", "name"]), Some("virtual"));
    }

    #[test]
    fn absent_path_is_none() {
        let settings = DeviceSettings::defaults();
        assert_eq!(settings.get_u64(&["simulation", "missing"]), None);
        assert_eq!(settings.get_bool(&["nowhere", "at", "all"]), None);
    }

    #[test]
    fn wrong_type_is_none() {
        let settings = DeviceSettings::defaults();
        assert_eq!(settings.get_str(&["simulation", "keepalive_interval_ms"]), None);
        assert_eq!(settings.get_bool(&["simulation"]), None);
    }

    #[test]
    fn defaults_carry_simulation_section() {
        let settings = DeviceSettings::defaults();
        assert_eq!(
            settings.get_u64(&["simulation", "keepalive_interval_ms"]),
            Some(1000)
        );
        assert_eq!(
            settings.get_bool(&["simulation", "echo_commands"]),
            Some(false)
        );
    }

    #[test]
    fn set_overrides_and_creates_paths() {
        let mut settings = DeviceSettings::defaults();
        settings.set(&["simulation", "echo_commands"], Value::Bool(true));
        settings.set(&["extras", "deep", "flag"], Value::Bool(true));

        assert_eq!(settings.get_bool(&["simulation", "echo_commands"]), Some(true));
        assert_eq!(settings.get_bool(&["extras", "deep", "flag"]), Some(true));
    }
}
