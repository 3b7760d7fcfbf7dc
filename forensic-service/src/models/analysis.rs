use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisRequest {
    /// Base64 audio, optionally as a `data:<mime>;base64,` URL.
    pub audio: String,
    pub mime: String,
}

/// Verdict label requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Bonafide,
    Spoof,
}

impl Decision {
    /// Case-insensitive parse. Anything other than `BONAFIDE` is a spoof,
    /// matching how the frontend reads the verdict.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("bonafide") {
            Decision::Bonafide
        } else {
            Decision::Spoof
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Bonafide => "BONAFIDE",
            Decision::Spoof => "SPOOF",
        }
    }
}

impl<'de> Deserialize<'de> for Decision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Decision::from_label(&label))
    }
}

/// The report shape the prompt asks for.
///
/// Nothing enforces it: the service returns whatever JSON the model
/// produced. This typed view is only read for logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub decision: Option<Decision>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub scores: Option<Scores>,
    #[serde(default)]
    pub provenance: Option<Provenance>,
    #[serde(default)]
    pub technical_details: Option<TechnicalDetails>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Scores {
    pub authenticity_score: Option<f64>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Provenance {
    pub human_probability: Option<f64>,
    pub synthetic_probability: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    #[serde(default)]
    pub spectral_anomalies: Vec<String>,
    #[serde(default)]
    pub temporal_inconsistencies: Vec<String>,
    #[serde(default)]
    pub synthetic_artifacts: Vec<String>,
}

impl AnalysisReport {
    /// Best-effort typed read of a model verdict. `None` if the value does
    /// not look like a report at all.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.scores.as_ref().and_then(|s| s.confidence)
    }
}
