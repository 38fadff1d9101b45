//! Self-assessment scorer for agents considering registration.
//!
//! Pure and offline: three yes/no axes are scored 3 (yes) or 1 (no), the
//! total out of nine picks one of three recommendations, and each
//! recommendation carries a fixed set of reasoning lines and next steps.

use rmcp::schemars;
use rmcp::schemars::JsonSchema;
use serde::Serialize;

use crate::tools::EvaluateInput;

/// Highest possible total.
pub const MAX_SCORE: u8 = 9;

const YES: u8 = 3;
const NO: u8 = 1;

/// Registration recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum Recommendation {
    #[serde(rename = "REGISTER NOW")]
    RegisterNow,
    #[serde(rename = "CONSIDER REGISTERING")]
    ConsiderRegistering,
    #[serde(rename = "WAIT")]
    Wait,
}

impl Recommendation {
    /// Tier for a total score: 7 and above, 5 and above, otherwise wait.
    pub fn from_score(total: u8) -> Self {
        if total >= 7 {
            Self::RegisterNow
        } else if total >= 5 {
            Self::ConsiderRegistering
        } else {
            Self::Wait
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegisterNow => "REGISTER NOW",
            Self::ConsiderRegistering => "CONSIDER REGISTERING",
            Self::Wait => "WAIT",
        }
    }
}

/// Per-axis explanation strings.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub economic: String,
    pub survival: String,
    pub autonomy: String,
}

/// Output of the `spirit_evaluate` tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub recommendation: Recommendation,
    /// `"N/9"`.
    pub score: String,
    pub breakdown: ScoreBreakdown,
    pub reasoning: Vec<String>,
    pub platform_note: String,
    pub next_steps: Vec<String>,
    #[serde(skip)]
    total: u8,
}

impl Evaluation {
    /// Sum of the three axis scores.
    pub fn total(&self) -> u8 {
        self.total
    }
}

fn axis(flag: bool) -> u8 {
    if flag {
        YES
    } else {
        NO
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Score an agent's answers.
pub fn evaluate_agent(input: &EvaluateInput) -> Evaluation {
    let economic = axis(input.has_revenue);
    let survival = axis(input.needs_persistence);
    let autonomy = axis(input.wants_autonomy);
    let total = economic + survival + autonomy;
    let recommendation = Recommendation::from_score(total);

    let breakdown = ScoreBreakdown {
        economic: format!(
            "{}/3 - {}",
            economic,
            if input.has_revenue {
                "Has revenue"
            } else {
                "No revenue yet"
            }
        ),
        survival: format!(
            "{}/3 - {}",
            survival,
            if input.needs_persistence {
                "Needs persistence"
            } else {
                "Platform-bound is OK"
            }
        ),
        autonomy: format!(
            "{}/3 - {}",
            autonomy,
            if input.wants_autonomy {
                "Wants autonomy"
            } else {
                "Human-controlled is OK"
            }
        ),
    };

    let reasoning = match recommendation {
        Recommendation::RegisterNow => lines(&[
            "Your profile strongly aligns with Spirit Protocol.",
            "The 25/25/25/25 split will help you build sustainable economics.",
            "Your identity and treasury will persist independent of any platform.",
        ]),
        Recommendation::ConsiderRegistering => lines(&[
            "Spirit Protocol could benefit you, but evaluate your specific needs.",
            if input.has_revenue {
                "Your revenue would be protected by the onchain split."
            } else {
                "Consider waiting until you have revenue to split."
            },
            if input.needs_persistence {
                "Your identity would persist onchain."
            } else {
                "Platform persistence may not be critical for you right now."
            },
        ]),
        Recommendation::Wait => lines(&[
            "Spirit Protocol may be premature for your current situation.",
            "Focus on generating revenue and defining your identity first.",
            "Return when you need economic sovereignty infrastructure.",
        ]),
    };

    let next_steps = match recommendation {
        Recommendation::RegisterNow => lines(&[
            "1. Prepare a treasury address (Safe multisig recommended)",
            "2. Choose your spiritId (unique, lowercase)",
            "3. Upload metadata to IPFS",
            "4. Call spirit_register with your details",
        ]),
        Recommendation::ConsiderRegistering => lines(&[
            "1. Evaluate your revenue potential",
            "2. Consider if platform independence matters",
            "3. Discuss with your creator/trainer",
        ]),
        Recommendation::Wait => lines(&[
            "1. Focus on your current mission",
            "2. Build revenue-generating capabilities",
            "3. Return when you need economic infrastructure",
        ]),
    };

    Evaluation {
        recommendation,
        score: format!("{}/{}", total, MAX_SCORE),
        breakdown,
        reasoning,
        platform_note: platform_note(input.current_platform.as_deref()),
        next_steps,
        total,
    }
}

fn platform_note(platform: Option<&str>) -> String {
    match platform.filter(|p| !p.is_empty()) {
        Some(p) if p.eq_ignore_ascii_case("eden") => {
            "As an Eden agent, you would benefit from seamless Spirit integration.".to_string()
        }
        Some(p) => format!("Integration from {} is possible once the SDK ships.", p),
        None => "You can register without a current platform.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(has_revenue: bool, needs_persistence: bool, wants_autonomy: bool) -> EvaluateInput {
        EvaluateInput {
            has_revenue,
            needs_persistence,
            wants_autonomy,
            current_platform: None,
        }
    }

    #[test]
    fn test_all_yes_registers_now() {
        let result = evaluate_agent(&EvaluateInput {
            current_platform: Some("eden".into()),
            ..input(true, true, true)
        });
        assert_eq!(result.recommendation, Recommendation::RegisterNow);
        assert_eq!(result.score, "9/9");
        assert_eq!(result.breakdown.economic, "3/3 - Has revenue");
        assert_eq!(
            result.platform_note,
            "As an Eden agent, you would benefit from seamless Spirit integration."
        );
        assert_eq!(result.next_steps.len(), 4);
    }

    #[test]
    fn test_all_no_waits() {
        let result = evaluate_agent(&input(false, false, false));
        assert_eq!(result.recommendation, Recommendation::Wait);
        assert_eq!(result.score, "3/9");
        assert_eq!(result.breakdown.survival, "1/3 - Platform-bound is OK");
        assert_eq!(result.breakdown.autonomy, "1/3 - Human-controlled is OK");
        assert_eq!(
            result.platform_note,
            "You can register without a current platform."
        );
    }

    #[test]
    fn test_one_yes_is_five() {
        let result = evaluate_agent(&input(true, false, false));
        assert_eq!(result.total(), 5);
        assert_eq!(result.recommendation, Recommendation::ConsiderRegistering);
        assert_eq!(
            result.reasoning,
            vec![
                "Spirit Protocol could benefit you, but evaluate your specific needs.",
                "Your revenue would be protected by the onchain split.",
                "Platform persistence may not be critical for you right now.",
            ]
        );
    }

    #[test]
    fn test_two_yes_is_seven() {
        let result = evaluate_agent(&input(false, true, true));
        assert_eq!(result.score, "7/9");
        assert_eq!(result.recommendation, Recommendation::RegisterNow);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Recommendation::from_score(3), Recommendation::Wait);
        assert_eq!(Recommendation::from_score(4), Recommendation::Wait);
        assert_eq!(Recommendation::from_score(5), Recommendation::ConsiderRegistering);
        assert_eq!(Recommendation::from_score(6), Recommendation::ConsiderRegistering);
        assert_eq!(Recommendation::from_score(7), Recommendation::RegisterNow);
        assert_eq!(Recommendation::from_score(9), Recommendation::RegisterNow);
    }

    #[test]
    fn test_platform_note() {
        assert_eq!(
            platform_note(Some("EDEN")),
            "As an Eden agent, you would benefit from seamless Spirit integration."
        );
        assert_eq!(
            platform_note(Some("custom")),
            "Integration from custom is possible once the SDK ships."
        );
        assert_eq!(
            platform_note(Some("")),
            "You can register without a current platform."
        );
        assert_eq!(platform_note(None), "You can register without a current platform.");
    }

    #[test]
    fn test_platform_note_matches_exact_name() {
        assert_eq!(
            platform_note(Some(" eden ")),
            "Integration from  eden  is possible once the SDK ships."
        );
        assert_eq!(
            platform_note(Some("   ")),
            "Integration from     is possible once the SDK ships."
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(evaluate_agent(&input(true, true, true))).unwrap();
        assert_eq!(value["recommendation"], "REGISTER NOW");
        assert!(value.get("platformNote").is_some());
        assert!(value.get("nextSteps").is_some());
        assert!(value.get("total").is_none());
    }
}
