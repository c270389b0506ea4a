mod cli;
mod commands;
mod mcp;
mod pdf;
mod ranges;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Merge { inputs, output } => {
            let input_refs: Vec<_> = inputs.iter().collect();
            commands::merge::run(&input_refs, &output)?;
        }
        Commands::Split {
            path,
            ranges,
            output_dir,
            prefix,
        } => {
            commands::split::run(&path, &ranges, &output_dir, &prefix)?;
        }
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, &output)?;
        }
        Commands::Rotate {
            path,
            pages,
            angle,
            output,
        } => {
            commands::rotate::run(&path, &pages, angle, &output)?;
        }
        Commands::MetaShow { path } => {
            commands::meta_show::run(&path)?;
        }
        Commands::MetaSet {
            path,
            title,
            author,
            subject,
            keywords,
            output,
        } => {
            let update = pdf::document::MetadataUpdate {
                title,
                author,
                subject,
                keywords,
            };
            commands::meta_set::run(&path, &update, &output)?;
        }
        Commands::Encrypt {
            path,
            user_password,
            owner_password,
            allow_print,
            allow_copy,
            allow_annotate,
            output,
        } => {
            let opts = pdf::crypt::EncryptOptions {
                user_password,
                owner_password,
                allow_print,
                allow_copy,
                allow_annotate,
            };
            commands::encrypt::run(&path, &opts, &output)?;
        }
        Commands::Decrypt {
            path,
            password,
            output,
        } => {
            commands::decrypt::run(&path, &password, &output)?;
        }
    }

    Ok(())
}
