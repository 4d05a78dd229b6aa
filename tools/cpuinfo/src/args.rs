use clap::{ArgAction, Parser};
use kernel_cpuid::IdentifyOptions;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "cpuinfo", about, long_about = None)]
pub struct Args {
    /// Do not query the leaf 2 cache/TLB descriptors
    #[arg(long)]
    pub no_descriptors: bool,

    /// Do not query the extended brand string leaves
    #[arg(long)]
    pub no_brand: bool,

    /// Log CPUID queries to stderr (-v debug, -vv trace)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    #[must_use]
    pub fn options(&self) -> IdentifyOptions {
        IdentifyOptions::default()
            .with_cache_descriptors(!self.no_descriptors)
            .with_brand_string(!self.no_brand)
    }

    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
