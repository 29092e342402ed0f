use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use detective_core::FormatKind;
use tracing::{info, Level};

mod cli;
mod output;

#[derive(Parser)]
#[command(name = "encoding-detective")]
#[command(about = "Detect and decode multi-layer encodings in CTF challenges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-detect and peel nested encoding layers
    Detect {
        /// Text to analyze (reads stdin when omitted)
        text: Option<String>,

        /// Maximum layers to peel
        #[arg(short, long, default_value_t = detective_core::MAX_DETECT_LAYERS)]
        max_layers: usize,
    },
    /// Decode as a named format (Base64/Base32 peel repeatedly)
    Decode {
        /// Format to decode as
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Text to decode (reads stdin when omitted)
        text: Option<String>,

        /// Shift for the Caesar cipher
        #[arg(short, long, default_value_t = 3)]
        shift: u8,
    },
    /// Encode into a named format
    Encode {
        /// Format to encode as
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Text to encode (reads stdin when omitted)
        text: Option<String>,

        /// Shift for the Caesar cipher
        #[arg(short, long, default_value_t = 3)]
        shift: u8,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Compact,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Base64,
    Base32,
    Hex,
    Binary,
    Url,
    Html,
    Ascii,
    Rot13,
    Morse,
    Caesar,
}

impl FormatArg {
    /// Resolve to the engine's format kind; only Caesar uses `shift`
    pub fn to_kind(self, shift: u8) -> FormatKind {
        match self {
            FormatArg::Base64 => FormatKind::Base64,
            FormatArg::Base32 => FormatKind::Base32,
            FormatArg::Hex => FormatKind::Hex,
            FormatArg::Binary => FormatKind::Binary,
            FormatArg::Url => FormatKind::Url,
            FormatArg::Html => FormatKind::Html,
            FormatArg::Ascii => FormatKind::Ascii,
            FormatArg::Rot13 => FormatKind::Rot13,
            FormatArg::Morse => FormatKind::Morse,
            FormatArg::Caesar => FormatKind::Caesar { shift },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting encoding detective");

    match cli.command {
        Commands::Detect { text, max_layers } => {
            cli::detect_command(text, max_layers, cli.output)
        }
        Commands::Decode { format, text, shift } => {
            cli::decode_command(format, text, shift, cli.output)
        }
        Commands::Encode { format, text, shift } => {
            cli::encode_command(format, text, shift, cli.output)
        }
    }
}
