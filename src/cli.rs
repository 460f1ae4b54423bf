use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "storyspeak-backend",
    about = "StorySpeak backend - speech proxy and PDF store",
    long_about = "An HTTP backend that forwards transcription and speech-synthesis requests to the Gemini API and stores uploaded PDF documents, plus client commands for exercising a running server.",
    after_help = "EXAMPLES:\n    # Start the server (reads API_KEY from the environment or .env)\n    storyspeak-backend serve\n\n    # Transcribe a recording through a running server\n    storyspeak-backend transcribe recording.webm\n\n    # Synthesize speech into a file\n    storyspeak-backend speak \"Hello there\" --output hello.pcm\n\n    # Upload and list documents\n    storyspeak-backend upload story.pdf\n    storyspeak-backend list --server-url http://my-server:4000"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(name = "serve")]
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value = "4000")]
        port: u16,

        #[arg(long, env = "PDF_DIR", default_value = "pdfs")]
        pdf_dir: PathBuf,
    },
    #[command(name = "transcribe")]
    Transcribe {
        audio_file: PathBuf,

        /// Overrides the MIME type guessed from the file extension
        #[arg(long)]
        mime_type: Option<String>,

        #[arg(long, default_value = "http://localhost:4000")]
        server_url: String,
    },
    #[command(name = "speak")]
    Speak {
        text: String,

        #[arg(long, short = 'o')]
        output: PathBuf,

        #[arg(long, default_value = "http://localhost:4000")]
        server_url: String,
    },
    #[command(name = "upload")]
    Upload {
        pdf_file: PathBuf,

        #[arg(long, default_value = "http://localhost:4000")]
        server_url: String,
    },
    #[command(name = "list")]
    List {
        #[arg(long, default_value = "http://localhost:4000")]
        server_url: String,
    },
}
