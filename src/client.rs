use anyhow::{Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::config::ClientConfig;
use crate::dto::{
    ErrorBody, PdfListing, SpeechRequest, SpeechResult, TranscriptionRequest,
    TranscriptionResult, UploadResult,
};

/// Best-effort MIME type for an audio file, keyed on its extension.
pub fn guess_audio_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}

pub async fn check_server_health(client: &reqwest::Client, config: &ClientConfig) -> Result<()> {
    println!("🔍 Checking server at: {}/", config.server_url);

    let response = client
        .get(config.endpoint("/"))
        .send()
        .await
        .map_err(|e| anyhow!("Failed to connect to server: {}", e))?;

    if response.status().is_success() {
        println!("✅ Server is running");
        Ok(())
    } else {
        Err(anyhow!("Server health check failed: {}", response.status()))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response: {}", e))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&response_text)
            .map(|b| b.error)
            .unwrap_or(response_text);
        return Err(anyhow!("Server returned error {}: {}", status, message));
    }

    serde_json::from_str(&response_text)
        .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &ClientConfig,
    path: &str,
    body: &B,
) -> Result<T> {
    let response = client
        .post(config.endpoint(path))
        .json(body)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn transcribe_file(
    config: &ClientConfig,
    audio_file: &Path,
    mime_type: Option<String>,
) -> Result<String> {
    let client = reqwest::Client::new();
    check_server_health(&client, config).await?;

    if !audio_file.exists() {
        return Err(anyhow!("Audio file not found: {}", audio_file.display()));
    }
    let audio_data =
        fs::read(audio_file).map_err(|e| anyhow!("Failed to read audio file: {}", e))?;
    let mime_type =
        mime_type.unwrap_or_else(|| guess_audio_mime_type(audio_file).to_string());

    println!(
        "📁 Audio source: {} ({} bytes, {})",
        audio_file.display(),
        audio_data.len(),
        mime_type
    );
    println!(
        "🚀 Sending transcription request to: {}/api/transcribe",
        config.server_url
    );

    let request = TranscriptionRequest {
        audio_base64: Some(STANDARD.encode(&audio_data)),
        mime_type: Some(mime_type),
    };
    let result: TranscriptionResult =
        post_json(&client, config, "/api/transcribe", &request).await?;
    Ok(result.text)
}

/// Requests speech for `text` and writes the decoded audio to `output`.
///
/// Returns the number of bytes written; zero means the provider returned no audio
/// and nothing was written.
pub async fn synthesize_to_file(config: &ClientConfig, text: &str, output: &Path) -> Result<usize> {
    let client = reqwest::Client::new();
    check_server_health(&client, config).await?;

    println!(
        "🚀 Sending speech request to: {}/api/generateSpeech",
        config.server_url
    );

    let request = SpeechRequest {
        text: Some(text.to_string()),
    };
    let result: SpeechResult =
        post_json(&client, config, "/api/generateSpeech", &request).await?;

    if result.audio_base64.is_empty() {
        return Ok(0);
    }

    let audio = STANDARD
        .decode(result.audio_base64.as_bytes())
        .map_err(|e| anyhow!("Server returned invalid base64 audio: {}", e))?;
    fs::write(output, &audio)
        .map_err(|e| anyhow!("Failed to write {}: {}", output.display(), e))?;
    Ok(audio.len())
}

pub async fn upload_pdf(config: &ClientConfig, pdf_file: &Path) -> Result<UploadResult> {
    let client = reqwest::Client::new();
    check_server_health(&client, config).await?;

    if !pdf_file.exists() {
        return Err(anyhow!("PDF file not found: {}", pdf_file.display()));
    }
    let filename = pdf_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", pdf_file.display()))?
        .to_string();
    let bytes = fs::read(pdf_file).map_err(|e| anyhow!("Failed to read PDF file: {}", e))?;

    println!("📁 Uploading {} ({} bytes)", filename, bytes.len());

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(filename)
        .mime_str("application/pdf")?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(config.endpoint("/api/upload-pdf"))
        .multipart(form)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn list_pdfs(config: &ClientConfig) -> Result<Vec<String>> {
    let client = reqwest::Client::new();
    check_server_health(&client, config).await?;

    let response = client
        .get(config.endpoint("/api/pdfs"))
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;
    let listing: PdfListing = read_json(response).await?;
    Ok(listing.files)
}
