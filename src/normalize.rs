//! Key flattening and sanitization passes over the raw table.

use std::collections::BTreeMap;

use crate::facts::FactTable;

/// Default exclusion patterns. The public-keys subtree duplicates the
/// dedicated openssh-key endpoint under extra aliases.
pub const DEFAULT_FILTER_PATTERNS: [&str; 1] = ["public-keys-0"];

/// Flatten the raw URI-keyed table into prefixed fact names.
///
/// Each key has `base_uri` stripped and its remaining path segments joined
/// with hyphens (a single segment passes through unchanged), then `prefix`
/// prepended. Keys containing any of `filter_patterns` are dropped. Raw
/// keys are visited in sorted order, so a sanitized-name collision resolves
/// to the lexicographically last raw key, deterministically.
pub fn flatten(
    raw: &BTreeMap<String, String>,
    base_uri: &str,
    prefix: &str,
    filter_patterns: &[String],
) -> FactTable {
    let mut facts = FactTable::new();
    for (uri, value) in raw {
        let Some(rest) = uri.strip_prefix(base_uri) else {
            continue;
        };
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }
        let key = format!("{prefix}{}", segments.join("-"));
        if filter_patterns.iter().any(|p| key.contains(p.as_str())) {
            continue;
        }
        facts.insert(key, value.clone());
    }
    facts
}

/// Rewrite every `:` and `-` in fact names to `_`.
///
/// The sanitized name replaces the original, so emitted names contain only
/// characters valid in downstream template variables. Idempotent.
pub fn sanitize_varnames(facts: &mut FactTable) {
    let dirty: Vec<String> = facts
        .keys()
        .filter(|k| k.contains(':') || k.contains('-'))
        .map(str::to_string)
        .collect();
    for key in dirty {
        if let Some(value) = facts.remove(&key) {
            facts.insert(key.replace(':', "_").replace('-', "_"), value);
        }
    }
}

/// Replace characters in a configured fact prefix that the sanitization
/// pass would rewrite anyway, so prefix-derived lookups stay consistent.
pub fn sanitize_prefix(prefix: &str) -> String {
    prefix.replace(':', "_").replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://host/meta-data/";

    fn raw(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (format!("{BASE}{k}"), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flatten_single_segment() {
        let raw = raw(&[("instance-id", "i-1234")]);
        let facts = flatten(&raw, BASE, "ec2_", &[]);
        assert_eq!(facts.get("ec2_instance-id"), Some("i-1234"));
    }

    #[test]
    fn test_flatten_joins_nested_segments() {
        let raw = raw(&[("placement/availability-zone", "eu-west-1a")]);
        let facts = flatten(&raw, BASE, "ec2_", &[]);
        assert_eq!(
            facts.get("ec2_placement-availability-zone"),
            Some("eu-west-1a")
        );
    }

    #[test]
    fn test_flatten_filters_patterns_at_any_depth() {
        let raw = raw(&[
            ("public-keys/0/openssh-key", "ssh-rsa AAAA"),
            ("instance-id", "i-1234"),
        ]);
        let patterns = vec!["public-keys-0".to_string()];
        let facts = flatten(&raw, BASE, "ec2_", &patterns);
        assert_eq!(facts.len(), 1);
        assert!(facts.get("ec2_public-keys-0-openssh-key").is_none());
    }

    #[test]
    fn test_flatten_skips_foreign_uris() {
        let mut raw = raw(&[("instance-id", "i-1234")]);
        raw.insert("http://elsewhere/thing".to_string(), "x".to_string());
        let facts = flatten(&raw, BASE, "ec2_", &[]);
        assert_eq!(facts.len(), 1);
    }

    #[test]
    fn test_sanitize_varnames_replaces_key() {
        let mut facts: FactTable = [(
            "ec2_placement-availability-zone".to_string(),
            "eu-west-1a".to_string(),
        )]
        .into_iter()
        .collect();
        sanitize_varnames(&mut facts);

        assert_eq!(facts.len(), 1);
        assert_eq!(
            facts.get("ec2_placement_availability_zone"),
            Some("eu-west-1a")
        );
    }

    #[test]
    fn test_sanitize_varnames_handles_colons() {
        let mut facts: FactTable =
            [("ec2_mac:eth0".to_string(), "0e:a1".to_string())]
                .into_iter()
                .collect();
        sanitize_varnames(&mut facts);
        assert_eq!(facts.get("ec2_mac_eth0"), Some("0e:a1"));
    }

    #[test]
    fn test_sanitize_varnames_idempotent() {
        let mut facts: FactTable = [
            ("ec2_instance-id".to_string(), "i-1234".to_string()),
            ("ec2_kernel-id".to_string(), "aki-5c21674b".to_string()),
        ]
        .into_iter()
        .collect();
        sanitize_varnames(&mut facts);
        let once = facts.clone();
        sanitize_varnames(&mut facts);
        assert_eq!(facts, once);
    }

    #[test]
    fn test_sanitized_keys_are_identifier_safe() {
        let raw = raw(&[
            ("instance-id", "i-1234"),
            ("placement/availability-zone", "eu-west-1a"),
            ("block-device-mapping/ephemeral0", "sdb"),
        ]);
        let mut facts = flatten(&raw, BASE, "ec2_", &[]);
        sanitize_varnames(&mut facts);
        for key in facts.keys() {
            assert!(!key.contains(':'), "colon in {key}");
            assert!(!key.contains('-'), "hyphen in {key}");
        }
    }

    #[test]
    fn test_sanitize_prefix() {
        assert_eq!(sanitize_prefix("my-facts:"), "my_facts_");
        assert_eq!(sanitize_prefix("ec2_"), "ec2_");
    }
}
