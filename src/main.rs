mod cli;
mod client;
mod config;
mod dto;
mod error;
mod gemini;
mod server;
mod storage;

use anyhow::Result;
use clap::Parser;
use log::error;

use cli::{Cli, Commands};
use config::{ClientConfig, ServerConfig};

#[actix_web::main]
async fn main() -> Result<()> {
    // Before logging and argument parsing, so RUST_LOG, PORT and PDF_DIR can come from .env.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            pdf_dir,
        } => {
            let config = ServerConfig::new(host, port, pdf_dir);
            if let Err(e) = server::run_server(config).await {
                error!("Server failed: {e}");
                return Err(e);
            }
        }
        Commands::Transcribe {
            audio_file,
            mime_type,
            server_url,
        } => {
            let config = ClientConfig::new(server_url);
            match client::transcribe_file(&config, &audio_file, mime_type).await {
                Ok(text) => {
                    println!("\n✅ Transcription completed!");
                    println!("📝 Result:");
                    println!("{text}");
                }
                Err(e) => {
                    eprintln!("❌ Transcription failed: {e}");
                    eprintln!("💡 Make sure the server is running: storyspeak-backend serve");
                    return Err(e);
                }
            }
        }
        Commands::Speak {
            text,
            output,
            server_url,
        } => {
            let config = ClientConfig::new(server_url);
            match client::synthesize_to_file(&config, &text, &output).await {
                Ok(0) => println!("⚠️  Server returned no audio; nothing written"),
                Ok(bytes) => println!("✅ Wrote {bytes} bytes of audio to {}", output.display()),
                Err(e) => {
                    eprintln!("❌ Speech synthesis failed: {e}");
                    return Err(e);
                }
            }
        }
        Commands::Upload {
            pdf_file,
            server_url,
        } => {
            let config = ClientConfig::new(server_url);
            match client::upload_pdf(&config, &pdf_file).await {
                Ok(result) => {
                    println!("✅ Uploaded {}", result.filename);
                    println!("🔗 {}{}", config.server_url, result.url);
                }
                Err(e) => {
                    eprintln!("❌ Upload failed: {e}");
                    return Err(e);
                }
            }
        }
        Commands::List { server_url } => {
            let config = ClientConfig::new(server_url);
            let files = client::list_pdfs(&config).await?;
            if files.is_empty() {
                println!("📭 No PDFs stored");
            }
            for name in files {
                println!("📄 {name}");
            }
        }
    }

    Ok(())
}
