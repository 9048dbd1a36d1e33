// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG 2.1 contrast thresholds (1.4.3 Contrast Minimum, 1.4.6 Contrast Enhanced).
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text, 4.5:1 for large text

use serde::{Deserialize, Serialize};

pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;
pub const AAA_LARGE: f64 = 4.5;

/// Pass/fail matrix for one contrast ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    #[serde(rename = "aa_normal")]
    pub passes_aa_normal: bool,
    #[serde(rename = "aa_large")]
    pub passes_aa_large: bool,
    #[serde(rename = "aaa_normal")]
    pub passes_aaa_normal: bool,
    #[serde(rename = "aaa_large")]
    pub passes_aaa_large: bool,
    /// AA at the threshold matching the element's size class
    #[serde(rename = "passes_aa")]
    pub passes_required: bool,
    /// AAA at the threshold matching the element's size class
    pub passes_aaa: bool,
}

/// AA ratio an element of this size class must reach
pub fn required_ratio(is_large: bool) -> f64 {
    if is_large {
        AA_LARGE
    } else {
        AA_NORMAL
    }
}

pub fn evaluate(ratio: f64, is_large: bool) -> ComplianceResult {
    let aaa_threshold = if is_large { AAA_LARGE } else { AAA_NORMAL };
    ComplianceResult {
        passes_aa_normal: ratio >= AA_NORMAL,
        passes_aa_large: ratio >= AA_LARGE,
        passes_aaa_normal: ratio >= AAA_NORMAL,
        passes_aaa_large: ratio >= AAA_LARGE,
        passes_required: ratio >= required_ratio(is_large),
        passes_aaa: ratio >= aaa_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_just_below_aa_normal() {
        let result = evaluate(4.48, false);
        assert!(!result.passes_required);
        assert!(!result.passes_aa_normal);
        assert!(result.passes_aa_large);
        assert!(!result.passes_aaa);
    }

    #[test]
    fn test_large_text_uses_lower_thresholds() {
        let result = evaluate(4.48, true);
        assert!(result.passes_required);
        assert!(!result.passes_aaa);

        let result = evaluate(4.5, true);
        assert!(result.passes_aaa);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert!(evaluate(4.5, false).passes_required);
        assert!(evaluate(3.0, true).passes_required);
        assert!(evaluate(7.0, false).passes_aaa);
    }

    #[test]
    fn test_max_ratio_passes_everything() {
        let result = evaluate(21.0, false);
        assert!(result.passes_aa_normal && result.passes_aa_large);
        assert!(result.passes_aaa_normal && result.passes_aaa_large);
        assert!(result.passes_required && result.passes_aaa);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(evaluate(5.0, false)).unwrap();
        assert_eq!(json["passes_aa"], true);
        assert_eq!(json["aaa_normal"], false);
        assert_eq!(json["aa_large"], true);
    }

    proptest! {
        #[test]
        fn passes_required_is_monotonic(a in 1.0f64..21.0, b in 1.0f64..21.0, is_large in any::<bool>()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            if evaluate(low, is_large).passes_required {
                prop_assert!(evaluate(high, is_large).passes_required);
            }
        }
    }
}
