use anyhow::Result;

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::{StorinfoConfig, resolve_root};
use crate::paths;
use crate::ui;

pub fn run(_ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(),
        ConfigCommand::Path => path(),
        ConfigCommand::Init { force } => init(force),
    }
}

fn show() -> Result<()> {
    let file = paths::config_file()?;
    let config = StorinfoConfig::load_from(&file)?;
    let root = resolve_root(None, paths::root_from_env(), &config);

    ui::header("Configuration");
    ui::kv("Config file", &file.display().to_string());
    if !file.exists() {
        ui::dim("Not found, using defaults");
    }
    ui::kv("default_root", &config.default_root);
    ui::kv("Effective root", &root.display().to_string());

    if paths::root_from_env().is_some() {
        ui::dim(&format!("{} overrides default_root", paths::ENV_ROOT));
    }

    Ok(())
}

fn path() -> Result<()> {
    println!("{}", paths::config_file()?.display());
    Ok(())
}

fn init(force: bool) -> Result<()> {
    let file = paths::config_file()?;

    if file.exists() && !force {
        ui::warn(&format!(
            "Config file already exists: {} (use --force to overwrite)",
            file.display()
        ));
        return Ok(());
    }

    StorinfoConfig::default().save_to(&file)?;
    ui::success(&format!("Wrote {}", file.display()));
    Ok(())
}
