use serde::{Deserialize, Serialize};

/// The payload sent to the analysis service.
///
/// Only built from trimmed, non-empty input; see [`AnalysisRequest::from_input`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    /// The trimmed text to analyze.
    pub text: String,
}

impl AnalysisRequest {
    /// Builds a request from raw input, or `None` when the input is blank.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }
}

/// The structured result returned by the analysis service.
///
/// Neutral results never carry findings: whatever the service sent under `biases`
/// is dropped unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub struct AnalysisResult {
    /// True when no bias category crossed the service's threshold.
    pub is_neutral: bool,
    /// Number of whitespace-separated words in the analyzed text.
    pub word_count: u64,
    /// Overall bias percentage. Meaningless for neutral results.
    pub overall_score: f64,
    /// Detected bias categories, in service order.
    pub biases: Vec<BiasFinding>,
}

/// Wire shape of [`AnalysisResult`]; `biases` is only read once neutrality is known.
#[derive(Deserialize)]
struct RawAnalysisResult {
    #[serde(alias = "isNeutral")]
    is_neutral: bool,
    #[serde(alias = "wordCount")]
    word_count: u64,
    #[serde(alias = "overallScore", default)]
    overall_score: f64,
    #[serde(default)]
    biases: serde_json::Value,
}

impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = serde_json::Error;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        let biases = if raw.is_neutral || raw.biases.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(raw.biases)?
        };
        Ok(Self {
            is_neutral: raw.is_neutral,
            word_count: raw.word_count,
            overall_score: raw.overall_score,
            biases,
        })
    }
}

/// One detected bias category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasFinding {
    /// Category name, e.g. "Political".
    #[serde(rename = "type")]
    pub bias_type: String,
    /// Intensity percentage for this category.
    pub score: f64,
    /// Human-readable description of the category.
    pub explanation: String,
    /// Every matched keyword occurrence, duplicates included.
    #[serde(default)]
    pub matches: Vec<String>,
    /// Total number of matches reported by the service.
    pub count: u64,
}

/// The JSON envelope wrapping every service response.
///
/// `result` stays untyped here so that a malformed result can be told apart from a
/// malformed envelope.
#[derive(Debug, Deserialize)]
pub struct ServiceEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}
