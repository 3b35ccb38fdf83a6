use serde::{Deserialize, Serialize};

/// Target Lua version. Informational for the core generator; recorded in the
/// cache key because it is an output-affecting option by contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LuaTarget {
    #[serde(rename = "lua5.1")]
    Lua51,
    #[serde(rename = "lua5.2")]
    Lua52,
    #[serde(rename = "lua5.3")]
    Lua53,
    #[serde(rename = "lua5.4")]
    #[default]
    Lua54,
}

/// Options for one transpilation. Every field affects (or may affect) the
/// generated output and therefore participates in the cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileOptions {
    /// Run the textual whitespace normalization pass (default: true)
    #[serde(default = "default_true")]
    pub optimize: bool,

    /// Emit a simplified source map object (default: true)
    #[serde(default = "default_true")]
    pub source_map: bool,

    /// Reserved for future strict-mode semantics (default: true)
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Target Lua version (default: lua5.4)
    #[serde(default)]
    pub target: LuaTarget,
}

fn default_true() -> bool {
    true
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            source_map: true,
            strict: true,
            target: LuaTarget::Lua54,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TranspileOptions::default();
        assert!(options.optimize);
        assert!(options.source_map);
        assert!(options.strict);
        assert_eq!(options.target, LuaTarget::Lua54);
    }

    #[test]
    fn test_serialize_options() {
        let options = TranspileOptions::default();
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("sourceMap"));
        assert!(json.contains("lua5.4"));
    }

    #[test]
    fn test_deserialize_partial_options() {
        let json = r#"{ "optimize": false, "target": "lua5.1" }"#;
        let options: TranspileOptions = serde_json::from_str(json).unwrap();
        assert!(!options.optimize);
        assert!(options.source_map);
        assert_eq!(options.target, LuaTarget::Lua51);
    }
}
