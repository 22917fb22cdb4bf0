//! `storinfo info` - capacity of the volume backing a path

use anyhow::{Context as _, Result};
use std::path::Path;

use statkit::{Provider, StorageStats};

use crate::Context;
use crate::cli::InfoArgs;
use crate::config::{StorinfoConfig, resolve_root};
use crate::paths;
use crate::ui;

pub fn run(ctx: &Context, args: InfoArgs) -> Result<()> {
    let config = StorinfoConfig::load()?;
    let root = resolve_root(args.path.as_deref(), paths::root_from_env(), &config);

    let provider = Provider::new();
    log::debug!(
        "Querying {} with {} backend",
        root.display(),
        provider.backend_name()
    );

    let stats = provider
        .stats(&root)
        .with_context(|| format!("Could not read storage statistics for {}", root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        show(ctx, &root, &stats);
    }

    Ok(())
}

fn show(ctx: &Context, root: &Path, stats: &StorageStats) {
    if ctx.quiet {
        println!(
            "{} {} {}",
            stats.total(),
            stats.used(),
            stats.free()
        );
        return;
    }

    ui::header("Storage");
    ui::kv("Path", &root.display().to_string());
    ui::kv("Total", &ui::format_size(stats.total()));
    ui::kv(
        "Used",
        &ui::format_usage(stats.used(), stats.total(), stats.used_percent()),
    );
    ui::kv("Free", &ui::format_size(stats.free()));

    if ctx.verbose > 0 {
        ui::dim(&format!(
            "{} bytes total, {} used, {} free",
            stats.total(),
            stats.used(),
            stats.free()
        ));
    }
}
