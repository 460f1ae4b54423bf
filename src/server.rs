use actix_cors::Cors;
use actix_files::Files;
use actix_multipart::{Field, Multipart};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, web};
use futures_util::TryStreamExt;
use log::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::dto::{
    PdfListing, SpeechRequest, SpeechResult, TranscriptionRequest, TranscriptionResult,
    UploadResult, required,
};
use crate::error::ApiError;
use crate::gemini::GeminiClient;
use crate::storage::{PDF_ROUTE, PdfStore, is_valid_filename, public_url};

const JSON_LIMIT: usize = 50 * 1024 * 1024; // 50MB
const UPLOAD_FIELD: &str = "file";

pub struct AppState {
    pub gemini: GeminiClient,
    pub store: PdfStore,
}

#[get("/")]
pub async fn index() -> impl Responder {
    debug!("Liveness endpoint called");
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("StorySpeak backend is running")
}

#[post("/api/transcribe")]
pub async fn transcribe(
    data: web::Data<AppState>,
    body: web::Json<TranscriptionRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Transcription request received");

    let (Some(audio_base64), Some(mime_type)) = (
        required(body.audio_base64.as_deref()),
        required(body.mime_type.as_deref()),
    ) else {
        warn!("Transcription request missing audioBase64 or mimeType");
        return Err(ApiError::bad_request("audioBase64 and mimeType are required"));
    };

    info!(
        "Transcribing {} base64 chars of {mime_type}",
        audio_base64.len()
    );

    let text = data.gemini.transcribe(audio_base64, mime_type).await?;

    info!("Transcription completed: {} characters", text.len());
    Ok(HttpResponse::Ok().json(TranscriptionResult { text }))
}

#[post("/api/generateSpeech")]
pub async fn generate_speech(
    data: web::Data<AppState>,
    body: web::Json<SpeechRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Speech request received");

    let Some(text) = required(body.text.as_deref()) else {
        warn!("Speech request missing text");
        return Err(ApiError::bad_request("text is required"));
    };

    info!("Synthesizing speech for {} characters", text.len());

    let audio_base64 = data.gemini.synthesize(text).await?;

    info!(
        "Speech synthesis completed: {} base64 chars",
        audio_base64.len()
    );
    Ok(HttpResponse::Ok().json(SpeechResult { audio_base64 }))
}

#[post("/api/upload-pdf")]
pub async fn upload_pdf(
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    debug!("Upload request received");

    while let Some(field) = payload.try_next().await.map_err(|e| {
        warn!("Failed to read multipart payload: {e}");
        ApiError::bad_request("Failed to read upload")
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned)
        else {
            warn!("Upload field has no filename");
            return Err(ApiError::bad_request("file is required"));
        };

        if !is_valid_filename(&filename) {
            warn!("Rejected upload with filename {filename:?}");
            return Err(ApiError::bad_request("Invalid filename"));
        }

        let bytes = read_field_data(field).await.map_err(|e| {
            warn!("Failed to read upload data: {e}");
            ApiError::bad_request("Failed to read upload")
        })?;

        data.store.save(&filename, &bytes).await.map_err(|e| {
            error!("Upload error: {e}");
            ApiError::Storage(e)
        })?;

        info!("Stored upload {filename} ({} bytes)", bytes.len());
        let url = public_url(&filename);
        return Ok(HttpResponse::Ok().json(UploadResult { filename, url }));
    }

    warn!("Upload request without a file field");
    Err(ApiError::bad_request("file is required"))
}

#[get("/api/pdfs")]
pub async fn list_pdfs(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let files = data.store.list_pdfs().await.map_err(|e| {
        error!("Listing error: {e}");
        ApiError::Storage(e)
    })?;
    debug!("Listing {} stored PDFs", files.len());
    Ok(HttpResponse::Ok().json(PdfListing { files }))
}

async fn read_field_data(mut field: Field) -> Result<Vec<u8>, actix_web::Error> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        data.extend_from_slice(&chunk);
    }
    debug!("Read field data: {} bytes", data.len());
    Ok(data)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .content_type_required(false)
        .error_handler(|err, _req| {
            warn!("Rejected JSON body: {err}");
            ApiError::bad_request("Invalid JSON").into()
        })
}

/// Registers state, extractor config, API routes and static file serving.
pub fn configure(cfg: &mut web::ServiceConfig, state: &web::Data<AppState>) {
    cfg.app_data(state.clone())
        .app_data(json_config())
        .service(index)
        .service(transcribe)
        .service(generate_speech)
        .service(upload_pdf)
        .service(list_pdfs)
        .service(Files::new(PDF_ROUTE, state.store.dir()));
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting StorySpeak backend");
    info!(
        "Using configuration: pdf_dir={:?}, provider={}, transcribe_model={}, tts_model={}",
        config.pdf_dir,
        config.gemini.base_url,
        config.gemini.transcribe_model,
        config.gemini.tts_model
    );

    let store = PdfStore::open(&config.pdf_dir)?;
    let gemini = GeminiClient::new(config.gemini.clone())?;
    let app_state = web::Data::new(AppState { gemini, store });

    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| configure(cfg, &app_state))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
