use std::fmt;

use crate::config::TranspileOptions;

use super::Result;

/// Blake3 hash over the source text and the canonical encoding of every
/// output-affecting option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the cache key for one (source, options) pair.
///
/// Hashing the source alone would serve stale results when options change
/// between calls with identical source, so the options are hashed in by
/// construction. Serde serializes struct fields in declaration order, which
/// makes the JSON encoding canonical.
pub fn cache_key(source: &str, options: &TranspileOptions) -> Result<CacheKey> {
    let canonical_options = serde_json::to_string(options)?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(source.as_bytes());
    hasher.update(&[0]);
    hasher.update(canonical_options.as_bytes());

    Ok(CacheKey(hasher.finalize().to_hex().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LuaTarget;

    #[test]
    fn test_key_is_stable() {
        let options = TranspileOptions::default();
        let a = cache_key("let x = 1;", &options).unwrap();
        let b = cache_key("let x = 1;", &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_differs_on_source() {
        let options = TranspileOptions::default();
        let a = cache_key("let x = 1;", &options).unwrap();
        let b = cache_key("let x = 2;", &options).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_differs_on_each_option() {
        let source = "let x = 1;";
        let base = TranspileOptions::default();
        let base_key = cache_key(source, &base).unwrap();

        let variants = [
            TranspileOptions {
                optimize: false,
                ..base.clone()
            },
            TranspileOptions {
                source_map: false,
                ..base.clone()
            },
            TranspileOptions {
                strict: false,
                ..base.clone()
            },
            TranspileOptions {
                target: LuaTarget::Lua51,
                ..base.clone()
            },
        ];
        for variant in variants {
            assert_ne!(base_key, cache_key(source, &variant).unwrap());
        }
    }
}
