// src/core/normalize.rs
use crate::core::types::NormalizedKey;

/// Synonym groups folded during canonicalization, applied in declaration
/// order. Within a group, each variant that occurs in the cleaned name has
/// its first occurrence replaced by the standard form.
const SYNONYM_GROUPS: [(&str, &[&str]); 6] = [
    ("rate", &["ratio", "percentage", "%"]),
    ("engagement", &["interaction", "involvement"]),
    ("conversion", &["transform", "convert"]),
    ("retention", &["keep", "maintain"]),
    ("adoption", &["usage", "utilization"]),
    ("satisfaction", &["happiness", "sentiment"]),
];

/// Canonicalizes a metric name for glossary clustering: lowercase, strip
/// everything but letters, digits, underscores and whitespace, then fold
/// synonyms. Whitespace survives untouched, so "Engagement Rate" and
/// "engagement rate" share a key while "EngagementRate" does not.
///
/// Matching is substring-based on purpose. It catches "Ratio" inside
/// "Click-Through Ratio", and it also rewrites mid-word occurrences such as
/// the "usage" in a longer token. Callers treat the output as an opaque key,
/// never as display text.
pub fn normalize_metric_name(name: &str) -> NormalizedKey {
    let mut clean: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    for (standard, variants) in SYNONYM_GROUPS {
        for &variant in variants {
            if clean.contains(variant) {
                clean = clean.replacen(variant, standard, 1);
            }
        }
    }

    clean
}

/// The lighter key used for conflict detection and priority scoring:
/// lowercase plus trim, no synonym folding. Spelling variants that the
/// canonical normalizer would merge stay distinct here.
pub fn strict_key(text: &str) -> NormalizedKey {
    text.to_lowercase().trim().to_string()
}
