//! # cpuinfo
//!
//! Prints what the processor reports about itself through CPUID.
//!
//! Exit codes: `0` on success, `1` if CPUID is not supported, `2` on bad arguments
//! (reported by `clap`).

mod args;
mod logger;
mod report;

use crate::args::Args;
use crate::logger::StderrLogger;
use clap::Parser;
use kernel_cpuid::{CpuidSource, IdentifyError, identify};
use std::process::ExitCode;

#[cfg(target_arch = "x86_64")]
fn hardware() -> impl CpuidSource {
    kernel_cpuid::HardwareCpuid::new()
}

#[cfg(not(target_arch = "x86_64"))]
fn hardware() -> impl CpuidSource {
    struct NoCpuid;

    impl CpuidSource for NoCpuid {
        fn supports_query(&self) -> bool {
            false
        }

        fn query_leaf(&self, _leaf: u32, _subleaf: u32) -> kernel_cpuid::CpuidResult {
            kernel_cpuid::CpuidResult::default()
        }
    }

    NoCpuid
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = StderrLogger::new(args.log_level()).init() {
        eprintln!("failed to install logger: {e}");
    }

    let id = match identify(&hardware(), args.options()) {
        Ok(id) => id,
        Err(IdentifyError::Unsupported) => {
            println!("This CPU does not support CPUID");
            return ExitCode::from(1);
        }
    };

    let mut out = String::new();
    if report::render(&mut out, &id).is_err() {
        return ExitCode::FAILURE;
    }
    print!("{out}");
    ExitCode::SUCCESS
}
