//! Fixed lookup tables turning small integer codes into text.
//!
//! Both tables are partial: a code without an entry yields `None`, which is an
//! expected outcome for reserved or newer codes and never an error.

mod brand_index;
mod descriptors;

pub use brand_index::{translate_brand_index, translate_brand_index_for_signature};
pub use descriptors::{CacheDescriptor, DescriptorKind, cache_descriptor, translate_cache_descriptor};
