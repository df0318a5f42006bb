use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted claim length, enforced both client-side and by the proxy.
pub const MAX_CLAIM_LEN: usize = 1000;

/// The backend's categorical judgment of a claim's truth status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Unclear,
    Disputed,
    Rejected,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::Unclear => "Unclear",
            Verdict::Disputed => "Disputed",
            Verdict::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// A cited reference supporting the verdict. Backend-supplied, never derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// A single fact-check verdict as returned by the backend.
///
/// The frontend only displays these fields; nothing here is computed locally.
/// `summary` accepts the legacy `tldr` wire name seen in older backend
/// revisions and serializes as `summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub verdict: Verdict,
    pub confidence: u8,
    pub reasoning: String,
    #[serde(default, alias = "tldr", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
    pub claim: String,
}

/// Local claim validation failures. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Please enter a claim to fact-check")]
    Empty,

    #[error("Claim too long: maximum {MAX_CLAIM_LEN} characters")]
    TooLong,
}

/// Trim and validate a user-supplied claim.
///
/// Returns the trimmed claim on success. Empty or whitespace-only input and
/// claims over [`MAX_CLAIM_LEN`] characters are rejected.
pub fn validate_claim(input: &str) -> Result<String, ClaimError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::Empty);
    }
    if trimmed.chars().count() > MAX_CLAIM_LEN {
        return Err(ClaimError::TooLong);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> FactCheckResult {
        FactCheckResult {
            verdict: Verdict::False,
            confidence: 95,
            reasoning: "Satellite imagery shows a sphere.".to_string(),
            summary: Some("The Earth is not flat.".to_string()),
            sources: vec![Source {
                title: "Test Source".to_string(),
                url: "https://example.com".to_string(),
                snippet: None,
            }],
            claim: "The Earth is flat".to_string(),
        }
    }

    #[test]
    fn test_verdict_serializes_as_wire_strings() {
        assert_eq!(serde_json::to_string(&Verdict::True).unwrap(), "\"True\"");
        assert_eq!(
            serde_json::to_string(&Verdict::Disputed).unwrap(),
            "\"Disputed\""
        );
        let v: Verdict = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(v, Verdict::Rejected);
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: FactCheckResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_result_accepts_legacy_tldr_field() {
        let json = serde_json::json!({
            "verdict": "True",
            "confidence": 80,
            "reasoning": "Well documented.",
            "tldr": "Short version.",
            "sources": [],
            "claim": "Water is wet"
        });
        let result: FactCheckResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.summary.as_deref(), Some("Short version."));

        // And it comes back out under the canonical name
        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["summary"], "Short version.");
        assert!(out.get("tldr").is_none());
    }

    #[test]
    fn test_result_tolerates_missing_optional_fields() {
        let json = serde_json::json!({
            "verdict": "Unclear",
            "confidence": 50,
            "reasoning": "Not enough evidence.",
            "claim": "Something vague"
        });
        let result: FactCheckResult = serde_json::from_value(json).unwrap();
        assert!(result.summary.is_none());
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_validate_claim_trims_whitespace() {
        assert_eq!(validate_claim("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_claim_rejects_empty_and_whitespace() {
        assert_eq!(validate_claim(""), Err(ClaimError::Empty));
        assert_eq!(validate_claim("   \t\n"), Err(ClaimError::Empty));
    }

    #[test]
    fn test_validate_claim_length_boundary() {
        let exactly_max = "a".repeat(MAX_CLAIM_LEN);
        assert!(validate_claim(&exactly_max).is_ok());

        let too_long = "a".repeat(MAX_CLAIM_LEN + 1);
        assert_eq!(validate_claim(&too_long), Err(ClaimError::TooLong));
    }
}
