//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `chromatap_core` linkage with deterministic output.
//! - Print the hex/RGB/CMYK views of colors given as `#rrggbb` arguments.

use chromatap_core::SwatchInfo;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("chromatap_core ping={}", chromatap_core::ping());
    println!("chromatap_core version={}", chromatap_core::core_version());

    let mut status = ExitCode::SUCCESS;
    for arg in std::env::args().skip(1) {
        match SwatchInfo::from_hex(&arg) {
            Ok(swatch) => println!(
                "{} {} {}",
                swatch.hex,
                swatch.rgb.css(),
                swatch.cmyk.css()
            ),
            Err(err) => {
                eprintln!("{err}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
