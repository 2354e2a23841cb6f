use serde::{Deserialize, Serialize};

use crate::geometry::limits::MAX_RECORDS;

/// Tunables shared by graph and path models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Offset of a freshly activated path's `end` along +x from `start`.
    pub default_path_length: f32,
    /// Pick radius (px) for nodes, connections and curve handles.
    pub pick_tolerance: f32,
    /// Max deviation (px) of flattened curve polylines.
    pub flatten_tolerance: f32,
    /// Cap on any `<category>_count` write and on graph `add_node` growth.
    pub max_records: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            default_path_length: 64.0,
            pick_tolerance: 8.0,
            flatten_tolerance: 0.25,
            max_records: MAX_RECORDS,
        }
    }
}

impl LayoutConfig {
    /// Parse from JSON; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: LayoutConfig = serde_json::from_str(s)?;
        cfg.max_records = cfg.max_records.min(MAX_RECORDS);
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = LayoutConfig::from_json_str(r#"{"pick_tolerance": 4.0}"#).unwrap();
        assert_eq!(cfg.pick_tolerance, 4.0);
        assert_eq!(cfg.default_path_length, 64.0);
        let capped = LayoutConfig::from_json_str(r#"{"max_records": 999999999}"#).unwrap();
        assert_eq!(capped.max_records, MAX_RECORDS);
        assert!(LayoutConfig::from_json_str("[").is_err());
    }
}
