//! Options — the loosely-typed option maps handed to commands.
//!
//! Keys keep insertion order so rendered argument lists are stable.

use serde_json::{Map, Value};

pub type Options = Map<String, Value>;

/// Merge two option maps. Keys in `explicit` override `defaults`; default
/// keys keep their position and new keys are appended in their own order.
pub fn merge(defaults: &Options, explicit: &Options) -> Options {
    let mut merged = defaults.clone();
    for (key, value) in explicit {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Return the map stored under `key`, inserting an empty one when the key
/// is absent. `None` if the key holds something other than a map.
pub fn ensure_map<'a>(options: &'a mut Options, key: &str) -> Option<&'a mut Options> {
    options
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}
