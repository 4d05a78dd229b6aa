//! # Processor Identification via CPUID
//!
//! Decodes the raw register words returned by the x86 `CPUID` instruction into a
//! typed [`ProcessorIdentity`]: vendor, signature, display model/family, the
//! leaf-1 feature flags, cache line geometry, the brand string and the leaf-2
//! cache/TLB descriptors.
//!
//! ## Layers
//!
//! - [`cpuid`]: one decoder per leaf. Each decoder is a pure `From<CpuidResult>`
//!   conversion; bit-fields are modelled with `bitfield-struct`.
//! - [`translate`]: the brand-index and leaf-2 descriptor tables.
//! - [`features`]: mnemonic tables for the two leaf-1 feature words.
//! - [`identify`]: sequences the queries against a [`CpuidSource`].
//!
//! ## Leaf sequencing
//!
//! ```text
//! supports_query() ── false ──► Err(Unsupported)
//!        │
//!      true
//!        ▼
//! leaf 00H ──► max basic leaf, vendor string (EBX, EDX, ECX)
//! leaf 80000000H ──► max extended leaf (valid only with bit 31 set)
//! leaf 01H        if max basic >= 1
//! leaf 02H        if max basic >= 2, repeated per EAX[7:0]
//! leaf 80000002H..80000004H   if max extended >= 80000004H
//! ```
//!
//! The hardware itself is reached through [`CpuidSource`]; with the default
//! `hardware` feature on `x86_64` the crate provides [`HardwareCpuid`]. Everything
//! else is target independent and can be driven from recorded register values.
//!
//! ```rust
//! use kernel_cpuid::{CpuidResult, CpuidSource, IdentifyOptions, identify};
//!
//! struct Recorded;
//!
//! impl CpuidSource for Recorded {
//!     fn supports_query(&self) -> bool {
//!         true
//!     }
//!
//!     fn query_leaf(&self, leaf: u32, _subleaf: u32) -> CpuidResult {
//!         match leaf {
//!             0 => CpuidResult::new(1, 0x756E_6547, 0x6C65_746E, 0x4965_6E69),
//!             1 => CpuidResult::new(0x0005_06E3, 0x0010_0800, 0, 0),
//!             _ => CpuidResult::default(),
//!         }
//!     }
//! }
//!
//! let id = identify(&Recorded, IdentifyOptions::default()).unwrap();
//! assert_eq!(id.vendor_string().as_str(), "GenuineIntel");
//! assert_eq!((id.display_family(), id.display_model()), (0x6, 0x5E));
//! assert_eq!(id.cache_line_size(), 64);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

pub mod cpuid;
pub mod features;
mod identity;
pub mod translate;

#[cfg(all(feature = "hardware", target_arch = "x86_64"))]
pub use crate::cpuid::HardwareCpuid;
pub use crate::cpuid::{CpuidResult, CpuidSource};
pub use crate::features::{FeatureFlag, FeatureWord};
pub use crate::identity::{IdentifyError, IdentifyOptions, ProcessorIdentity, identify};
pub use crate::translate::{translate_brand_index, translate_cache_descriptor};
