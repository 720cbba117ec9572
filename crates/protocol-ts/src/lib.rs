//! TypeScript bindings for the `ng-protocol` wire types.
//!
//! Exporting a root type also exports every type it references, so the
//! roots below cover the whole UI boundary.

use ng_protocol::{Event, GlobalConfig, Intent, Op, PromptTemplate, SessionSnapshot};
use std::path::{Path, PathBuf};
use ts_rs::TS;

/// Write one `.ts` file per protocol type into `out_dir`.
///
/// Returns the generated files, sorted by name.
pub fn export_bindings(out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    Op::export_all_to(out_dir)?;
    Event::export_all_to(out_dir)?;
    SessionSnapshot::export_all_to(out_dir)?;
    GlobalConfig::export_all_to(out_dir)?;
    Intent::export_all_to(out_dir)?;
    PromptTemplate::export_all_to(out_dir)?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "ts") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
