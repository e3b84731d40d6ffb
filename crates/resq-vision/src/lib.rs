use async_trait::async_trait;
use resq_core::{ErrorCode, ResqError, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Structured assessment the external vision/decision model is asked to
/// return for a set of incident images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageAssessment {
    pub description: String,
    pub damage_level: u8,
    pub affected_parts: Vec<String>,
    pub severity: Severity,
    pub estimated_cost: f64,
    pub recommendations: Vec<String>,
}

/// Result of an analysis call. Transport and parse failures degrade into
/// `success: false` rather than propagating, so batch processing is never
/// aborted by an analysis glitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub success: bool,
    pub extracted_data: Option<DamageAssessment>,
}

impl AnalysisOutcome {
    pub fn failure() -> Self {
        Self {
            success: false,
            extracted_data: None,
        }
    }

    pub fn from_assessment(assessment: DamageAssessment) -> Self {
        Self {
            success: true,
            extracted_data: Some(assessment),
        }
    }
}

#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn analyze(&self, image_urls: &[String], instruction: &str) -> AnalysisOutcome;
}

#[derive(Debug, Clone)]
pub struct VisionClientConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

pub struct HttpVisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    images: &'a [String],
    instruction: &'a str,
    response_schema: &'static str,
}

const RESPONSE_SCHEMA: &str = "description:string, damage_level:int[0,100], \
     affected_parts:string[], severity:low|medium|high|critical, \
     estimated_cost:number, recommendations:string[]";

impl HttpVisionClient {
    pub fn new(config: &VisionClientConfig) -> Result<Self, ResqError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                ResqError::new(ErrorCode::Upstream, format!("vision client init: {err}"))
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl VisionClient for HttpVisionClient {
    async fn analyze(&self, image_urls: &[String], instruction: &str) -> AnalysisOutcome {
        let request = AnalysisRequest {
            images: image_urls,
            instruction,
            response_schema: RESPONSE_SCHEMA,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "vision analysis transport failure");
                return AnalysisOutcome::failure();
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "vision analysis rejected");
            return AnalysisOutcome::failure();
        }

        let value: Value = match response.json().await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "vision analysis returned non-JSON body");
                return AnalysisOutcome::failure();
            }
        };

        match parse_assessment(&value) {
            Some(assessment) => AnalysisOutcome::from_assessment(assessment),
            None => {
                warn!("vision analysis response did not match the declared schema");
                AnalysisOutcome::failure()
            }
        }
    }
}

/// Parse a model response into the declared schema; None on any mismatch.
pub fn parse_assessment(value: &Value) -> Option<DamageAssessment> {
    let assessment: DamageAssessment = serde_json::from_value(value.clone()).ok()?;
    if assessment.damage_level > 100 {
        return None;
    }
    Some(assessment)
}
