use clap::Parser;
use std::path::PathBuf;

/// Generate TypeScript definitions for the netgenius protocol.
#[derive(Parser, Debug)]
#[command(name = "ng-protocol-ts", version)]
struct Args {
    /// Directory to write the `.ts` files into.
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let files = ng_protocol_ts::export_bindings(&args.out_dir)?;
    println!(
        "Wrote {} TypeScript files to {}",
        files.len(),
        args.out_dir.display()
    );
    Ok(())
}
