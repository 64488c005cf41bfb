//! Environment readiness check.

use anyhow::Result;
use waypoint::transport::find_chromium;

/// Report whether interactive sources can run here.
pub fn run() -> Result<()> {
    println!("Waypoint Doctor");
    println!("===============");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    match find_chromium() {
        Some(path) => {
            println!("[OK] Chromium found: {}", path.display());
            println!();
            println!("Status: READY");
        }
        None => {
            println!("[!!] Chromium NOT found. Interactive sources will fail.");
            println!("     Set WAYPOINT_CHROMIUM_PATH or install Chrome/Chromium.");
            println!();
            println!("Status: STATIC SOURCES ONLY");
        }
    }

    Ok(())
}
