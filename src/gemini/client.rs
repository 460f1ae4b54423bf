use anyhow::Result;
use log::{debug, error};
use reqwest::StatusCode;

use crate::config::GeminiConfig;
use crate::error::ApiError;
use crate::gemini::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    ProviderErrorBody,
};

pub const TRANSCRIBE_INSTRUCTION: &str = "위 음성 파일의 내용을 텍스트로 그대로 받아적어주세요. 들리는 대로 정확하게 텍스트만 출력하세요. 추가적인 설명은 생략하세요.";
pub const SPEECH_PREFIX: &str = "Speak naturally and clearly: ";
pub const SPEECH_VOICE: &str = "Kore";

const TRANSCRIBE_FALLBACK_ERROR: &str = "Gemini API error";
const SPEECH_FALLBACK_ERROR: &str = "Gemini TTS error";

/// Thin wrapper around the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub async fn transcribe(&self, audio_base64: &str, mime_type: &str) -> Result<String, ApiError> {
        let request = GenerateContentRequest {
            model: None,
            contents: vec![Content {
                parts: vec![
                    Part::inline(audio_base64, mime_type),
                    Part::text(TRANSCRIBE_INSTRUCTION),
                ],
            }],
            generation_config: None,
        };

        let response = self
            .generate_content(&self.config.transcribe_model, &request, TRANSCRIBE_FALLBACK_ERROR)
            .await?;
        Ok(response.first_text())
    }

    pub async fn synthesize(&self, text: &str) -> Result<String, ApiError> {
        let request = GenerateContentRequest {
            model: Some(self.config.tts_model.clone()),
            contents: vec![Content {
                parts: vec![Part::text(format!("{SPEECH_PREFIX}{text}"))],
            }],
            generation_config: Some(GenerationConfig::audio(SPEECH_VOICE)),
        };

        let response = self
            .generate_content(&self.config.tts_model, &request, SPEECH_FALLBACK_ERROR)
            .await?;
        Ok(response.first_inline_data())
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        fallback_error: &str,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );
        debug!("Calling provider model {model}");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Provider request to {model} failed: {e}");
                ApiError::Transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read provider response from {model}: {e}");
            ApiError::Transport(e)
        })?;

        if status != StatusCode::OK {
            let message = serde_json::from_slice::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| fallback_error.to_string());
            error!(
                "Provider {model} returned {status}: {}",
                String::from_utf8_lossy(&body)
            );
            return Err(ApiError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!("Provider {model} returned an undecodable body: {e}");
            ApiError::InvalidProviderResponse(e)
        })
    }
}
