//! Validation report model and aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw report returned by the validation service: category key mapped to
/// the error messages found in that category. An absent key or an empty
/// list both mean the category is clean.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport(pub BTreeMap<String, Vec<String>>);

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.0.values().all(|messages| messages.is_empty())
    }
}

/// One category of validation findings, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFindings {
    pub key: String,
    pub label: String,
    pub messages: Vec<String>,
}

/// Display label for a known category key. The service reports in Spanish;
/// labels match it.
fn category_label(key: &str) -> Option<&'static str> {
    match key {
        "valores_nulos" => Some("Errores Valores Nulos"),
        "origen_geometrias" => Some("Errores Origen Geometrías"),
        "sistema_referencia" => Some("Errores Sistema de Referencia"),
        "atributos" => Some("Errores Atributos"),
        "topologia" => Some("Errores Topología"),
        "bandas" => Some("Errores Bandas"),
        _ => None,
    }
}

/// Filter and label a raw report for presentation.
///
/// Categories with no messages are dropped. An unrecognized key is passed
/// through using the raw key as its own label, so new server-side
/// categories surface instead of disappearing.
pub fn aggregate(report: &ValidationReport) -> Vec<CategoryFindings> {
    report
        .0
        .iter()
        .filter(|(_, messages)| !messages.is_empty())
        .map(|(key, messages)| CategoryFindings {
            key: key.clone(),
            label: category_label(key).unwrap_or(key).to_string(),
            messages: messages.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(pairs: &[(&str, &[&str])]) -> ValidationReport {
        ValidationReport(
            pairs
                .iter()
                .map(|(k, msgs)| {
                    (
                        k.to_string(),
                        msgs.iter().map(|m| m.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_aggregate_drops_empty_categories() {
        let findings = aggregate(&report(&[("valores_nulos", &["x"]), ("bandas", &[])]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].label, "Errores Valores Nulos");
        assert_eq!(findings[0].messages, vec!["x"]);
    }

    #[test]
    fn test_aggregate_unknown_key_passes_through() {
        let findings = aggregate(&report(&[("calidad_radiometrica", &["saturated band"])]));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].label, "calidad_radiometrica");
        assert_eq!(findings[0].messages, vec!["saturated band"]);
    }

    #[test]
    fn test_aggregate_empty_report() {
        assert!(aggregate(&report(&[])).is_empty());
    }

    #[test]
    fn test_report_is_clean() {
        assert!(report(&[("bandas", &[])]).is_clean());
        assert!(!report(&[("bandas", &["missing band"])]).is_clean());
    }

    #[test]
    fn test_report_deserializes_from_wire_shape() {
        let raw = r#"{"valores_nulos": ["campo X nulo"], "topologia": []}"#;
        let parsed: ValidationReport = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.0["valores_nulos"], vec!["campo X nulo"]);
        assert!(parsed.0["topologia"].is_empty());
    }
}
