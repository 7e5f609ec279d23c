//! JSON serialization for A/B test reports.

use crate::result::AbTestReport;

/// Serialize an AbTestReport to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for AbTestReport).
pub fn to_json(report: &AbTestReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize an AbTestReport to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for AbTestReport).
pub fn to_json_pretty(report: &AbTestReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a report previously written with [`to_json`] or [`to_json_pretty`].
///
/// # Errors
///
/// Returns an error for malformed JSON or an out-of-range significance level.
pub fn from_json(json: &str) -> Result<AbTestReport, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::fixtures;

    #[test]
    fn test_to_json() {
        let report = fixtures::report(0.3493);
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"metric\":\"Purchase\""));
        assert!(json.contains("\"test_name\":\"Parametric\""));
        assert!(json.contains("\"reject_null\":false"));
        assert!(json.contains("\"significance_level\":0.05"));
    }

    #[test]
    fn test_to_json_pretty() {
        let report = fixtures::report(0.01);
        let json = to_json_pretty(&report).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"reject_null\": true"));
    }

    #[test]
    fn test_report_survives_json() {
        let report = fixtures::report(0.3493);
        let parsed = from_json(&to_json(&report).unwrap()).unwrap();
        assert_eq!(parsed.metric, report.metric);
        assert_eq!(parsed.significance_level, report.significance_level);
        assert_eq!(parsed.decision, report.decision);
        assert_eq!(parsed.control.group, report.control.group);
    }

    #[test]
    fn test_rejects_invalid_alpha() {
        let json = to_json(&fixtures::report(0.3493))
            .unwrap()
            .replace("\"significance_level\":0.05", "\"significance_level\":1.5");
        assert!(from_json(&json).is_err());
    }
}
