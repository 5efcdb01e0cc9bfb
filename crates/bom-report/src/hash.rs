//! Content-based hashing for report IDs.

use bom_core::ComponentRow;
use bom_explode::ExplodeSettings;
use sha2::{Digest, Sha256};

/// Same rows + same settings + same engine version => same id.
pub fn compute_report_id(
    rows: &[ComponentRow],
    settings: &ExplodeSettings,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let rows_json = serde_json::to_string(rows).unwrap_or_default();
    hasher.update(rows_json.as_bytes());

    let settings_json = serde_json::to_string(settings).unwrap_or_default();
    hasher.update(settings_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::ItemId;

    fn rows(qty: f64) -> Vec<ComponentRow> {
        vec![
            ComponentRow::root(ItemId::new("R").unwrap()),
            ComponentRow::new(ItemId::new("A").unwrap(), ItemId::parse_optional("R"), qty),
        ]
    }

    #[test]
    fn hash_stability() {
        let settings = ExplodeSettings::default();
        let hash1 = compute_report_id(&rows(2.0), &settings, "v1");
        let hash2 = compute_report_id(&rows(2.0), &settings, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let settings = ExplodeSettings::default();
        let base = compute_report_id(&rows(2.0), &settings, "v1");

        assert_ne!(base, compute_report_id(&rows(3.0), &settings, "v1"));
        assert_ne!(base, compute_report_id(&rows(2.0), &settings, "v2"));

        let deeper = ExplodeSettings {
            max_depth: 5,
            ..ExplodeSettings::default()
        };
        assert_ne!(base, compute_report_id(&rows(2.0), &deeper, "v1"));
    }
}
