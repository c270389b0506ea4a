use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfctl")]
#[command(about = "PDF page toolbox: merge, split, extract, rotate, metadata, encrypt/decrypt")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display page count and metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a PDF into one file per comma-separated range group
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Range expression (e.g. "1-3,10-12,20-"); each group becomes a file
        ranges: String,

        /// Output directory
        #[arg(short = 'd', long, default_value = "out")]
        output_dir: PathBuf,

        /// Output file name prefix
        #[arg(short, long, default_value = "part")]
        prefix: String,
    },

    /// Extract pages into a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages to extract (e.g. "2,5-7")
        pages: String,

        /// Output file
        #[arg(short, long, default_value = "extracted.pdf")]
        output: PathBuf,
    },

    /// Rotate pages clockwise
    Rotate {
        /// PDF file to rotate pages of
        path: PathBuf,

        /// Pages to rotate (e.g. "1-3,7")
        pages: String,

        /// Rotation angle in degrees (90, 180 or 270)
        #[arg(short, long, default_value_t = 90)]
        angle: u32,

        /// Output file
        #[arg(short, long, default_value = "rotated.pdf")]
        output: PathBuf,
    },

    /// Show every metadata entry
    MetaShow {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Set basic metadata fields
    MetaSet {
        /// PDF file to update
        path: PathBuf,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long)]
        author: Option<String>,

        /// Document subject
        #[arg(long)]
        subject: Option<String>,

        /// Document keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "meta.pdf")]
        output: PathBuf,
    },

    /// Encrypt with user and owner passwords
    Encrypt {
        /// PDF file to encrypt
        path: PathBuf,

        /// Password required to open the document
        #[arg(long)]
        user_password: String,

        /// Password that lifts the permission restrictions
        #[arg(long)]
        owner_password: String,

        /// Allow printing
        #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
        allow_print: bool,

        /// Allow copying text and graphics
        #[arg(long, default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
        allow_copy: bool,

        /// Allow adding annotations
        #[arg(long, default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
        allow_annotate: bool,

        /// Output file
        #[arg(short, long, default_value = "encrypted.pdf")]
        output: PathBuf,
    },

    /// Decrypt with the document password
    Decrypt {
        /// PDF file to decrypt
        path: PathBuf,

        /// Document password
        #[arg(long)]
        password: String,

        /// Output file
        #[arg(short, long, default_value = "decrypted.pdf")]
        output: PathBuf,
    },
}
