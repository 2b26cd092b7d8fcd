pub mod handlers;

use std::path::Path;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use snd_core::diag::render_text;
use snd_core::error::{Result, SndError};
use snd_core::{Config, Context, ErrorPolicy};
use tracing::debug;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = build_config(&cli)?;
    let mut ctx = Context::new(cfg);

    let res = match cli.command {
        Commands::Info { name, dir, json } => handlers::handle_info(&mut ctx, &name, dir, json),
        Commands::List { name, dir, json } => handlers::handle_list(&mut ctx, &name, dir, json),
        Commands::Show {
            name,
            group,
            item,
            dir,
        } => handlers::handle_show(&mut ctx, &name, group, item, dir),
        Commands::Errors { name, dir, json } => handlers::handle_errors(&mut ctx, &name, dir, json),
        Commands::Export {
            name,
            dest,
            dir,
            group,
            item,
        } => handlers::handle_export(&mut ctx, &name, dest, dir, group, item),
    };

    if !ctx.collector().is_empty() {
        eprint!("{}", render_text(ctx.collector().entries()));
    }
    res
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(p) => load_config(p)?,
        None => Config::default(),
    };
    if cli.strict {
        cfg.policy = ErrorPolicy::Throw;
    }
    if let Some(root) = &cli.search_root {
        cfg.search_root = root.clone();
    }
    if cli.log {
        cfg.create_log_file = true;
    }
    if let Some(out) = &cli.out_dir {
        cfg.output_dir = out.clone();
    }
    debug!(?cfg, "effective config");
    Ok(cfg)
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| SndError::Format(format!("config {}: {e}", path.display())))
}
