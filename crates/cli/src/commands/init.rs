use colored::Colorize;
use color_eyre::Result;
use ng_core::init::{generate_netgenius_structure, InitOptions};
use std::path::Path;

pub async fn run(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_netgenius_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    for path in &written {
        println!("  {} {}", "created".green(), path.display());
    }
    println!(
        "{} Set the API key variable named in config.toml, or use --model mock to run offline.",
        "Initialized .netgenius.".bold()
    );
    Ok(())
}
