//! Preset management commands.

use super::common::{PhaserArgs, load_preset, print_settings};
use clap::{Args, Subcommand};
use phaser_config::{
    Preset, ensure_user_presets_dir, factory_presets, get_factory_preset, list_user_presets,
    preset_name_from_path, system_presets_dir, user_presets_dir,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show the settings of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the preset as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Save settings as a user preset
    Save {
        /// Name for the new preset
        name: String,

        #[command(flatten)]
        phaser: PhaserArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Write to this file instead of the user presets directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => {
            list_presets(factory, user);
            Ok(())
        }
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            name,
            phaser,
            description,
            output,
            force,
        } => save_preset(&name, &phaser, description, output, force),
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Paths => {
            println!("Preset Directories:");
            println!("===================\n");
            println!("User presets:   {}", user_presets_dir().display());
            println!("System presets: {}", system_presets_dir().display());
            Ok(())
        }
    }
}

fn list_presets(factory_only: bool, user_only: bool) {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)\n");
            println!("  Create a preset with: phaser presets save <name> --param depth=0.7\n");
            return;
        }
        for path in user_presets {
            let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match Preset::load(&path) {
                Ok(preset) => {
                    let desc = preset.description.as_deref().unwrap_or("");
                    println!("  {:20} - {}", name, desc);
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    println!("  {:20} - (error loading)", name);
                }
            }
        }
        println!();
    }
}

fn show_preset(name: &str, as_toml: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    if as_toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("{desc}");
    }
    println!();
    print_settings(&preset);
    Ok(())
}

fn save_preset(
    name: &str,
    phaser: &PhaserArgs,
    description: Option<String>,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let path = match output {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(format!("{name}.toml")),
    };

    if path.exists() && !force {
        anyhow::bail!("Preset '{}' already exists. Use --force to overwrite.", path.display());
    }

    let mut preset = phaser.resolve_preset()?;
    preset.name = name.to_string();
    preset.description = description;
    preset.save(&path)?;

    println!("Saved preset '{}' to {}", name, path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!("Cannot delete factory preset '{}'.", name);
    }

    let path = user_presets_dir().join(format!("{name}.toml"));
    if !path.exists() {
        anyhow::bail!("User preset '{}' not found.", name);
    }
    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{}'.", name);
    }

    std::fs::remove_file(&path)?;
    println!("Deleted preset '{}'.", name);
    Ok(())
}
