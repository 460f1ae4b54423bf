use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.into()),
                data: Some(data.into()),
            }),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

impl GenerationConfig {
    pub fn audio(voice_name: &str) -> Self {
        Self {
            response_modalities: vec!["AUDIO".to_string()],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice_name.to_string(),
                    },
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, in provider order. Later candidates are ignored.
    fn first_candidate_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Text of the first part carrying a `text` field, or empty.
    pub fn first_text(&self) -> String {
        self.first_candidate_parts()
            .iter()
            .find_map(|p| p.text.clone())
            .unwrap_or_default()
    }

    /// `inlineData.data` of the first part carrying `inlineData`, or empty.
    ///
    /// The first part with `inlineData` is chosen even if its `data` is missing.
    pub fn first_inline_data(&self) -> String {
        self.first_candidate_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .and_then(|d| d.data.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn first_text_skips_parts_without_text() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "data": "AAAA" } },
                    { "text": "second" },
                    { "text": "third" }
                ]}
            }]
        }));
        assert_eq!(response.first_text(), "second");
    }

    #[test]
    fn only_first_candidate_is_consulted() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "inlineData": { "data": "AAAA" } }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(response.first_text(), "");
        assert_eq!(response.first_inline_data(), "AAAA");
    }

    #[test]
    fn missing_structure_yields_empty_strings() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
        ] {
            let response = parse(value);
            assert_eq!(response.first_text(), "");
            assert_eq!(response.first_inline_data(), "");
        }
    }

    #[test]
    fn first_inline_part_wins_even_without_data() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "mimeType": "audio/L16" } },
                    { "inlineData": { "data": "BBBB" } }
                ]}
            }]
        }));
        assert_eq!(response.first_inline_data(), "");
    }

    #[test]
    fn speech_request_serializes_provider_shape() {
        let request = GenerateContentRequest {
            model: Some("tts-model".to_string()),
            contents: vec![Content {
                parts: vec![Part::text("hello")],
            }],
            generation_config: Some(GenerationConfig::audio("Kore")),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "tts-model",
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                    }
                }
            })
        );
    }
}
