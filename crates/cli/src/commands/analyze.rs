//! `logs`, `audit`, `pcap` and `diff`: single provider calls over file contents.

use crate::render::print_analysis;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ng_core::config::AppConfig;
use ng_core::stages::{Analyst, StageContext};
use std::path::Path;

fn analyst(config: &AppConfig) -> Result<Analyst> {
    Ok(Analyst::new(StageContext::from_config(config)?))
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
}

pub async fn logs(config: AppConfig, file: &Path) -> Result<()> {
    let logs = read(file).await?;
    let report = analyst(&config)?.analyze_logs(&logs).await?;
    print_analysis("Log analysis", &report);
    Ok(())
}

pub async fn audit(config: AppConfig, file: &Path) -> Result<()> {
    let device_config = read(file).await?;
    let report = analyst(&config)?.audit_config(&device_config).await?;
    print_analysis("Security audit", &report);
    Ok(())
}

pub async fn capture(config: AppConfig, file: &Path) -> Result<()> {
    let summary = read(file).await?;
    let report = analyst(&config)?.analyze_capture(&summary).await?;
    print_analysis("Capture analysis", &report);
    Ok(())
}

pub async fn diff(config: AppConfig, old: &Path, new: &Path) -> Result<()> {
    let old_config = read(old).await?;
    let new_config = read(new).await?;
    let report = analyst(&config)?
        .compare_configs(&old_config, &new_config)
        .await?;
    print_analysis("Configuration diff", &report);
    Ok(())
}
