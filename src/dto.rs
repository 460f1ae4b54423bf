//! JSON bodies exchanged with browser clients and the CLI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionRequest {
    #[serde(default)]
    pub audio_base64: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResult {
    pub audio_base64: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PdfListing {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Returns the value only when it is present and non-empty.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
