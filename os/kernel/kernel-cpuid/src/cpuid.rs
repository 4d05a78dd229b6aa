mod brand;
#[cfg(all(feature = "hardware", target_arch = "x86_64"))]
mod hardware;
mod leaf00h;
mod leaf01h;
mod leaf02h;
mod ranges;

pub use brand::{BrandString, LEAF_BRAND_FIRST, LEAF_BRAND_LAST};
#[cfg(all(feature = "hardware", target_arch = "x86_64"))]
pub use hardware::{HardwareCpuid, cpuid};
pub use leaf00h::{CpuVendor, LEAF_00H, Leaf00h, VendorString};
pub use leaf01h::{LEAF_01H, Leaf01h, Leaf1Eax, Leaf1Ebx, Leaf1Ecx, Leaf1Edx, ProcessorType};
pub use leaf02h::{LEAF_02H, Leaf02h};
pub use ranges::{CpuidRanges, ExtendedRange, LEAF_MAX_EXTENDED};

/// The four raw register words returned by a single CPUID query.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[repr(C)]
pub struct CpuidResult {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl CpuidResult {
    #[inline]
    #[must_use]
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }

    /// The words in register order `EAX, EBX, ECX, EDX`.
    #[inline]
    #[must_use]
    pub const fn words(&self) -> [u32; 4] {
        [self.eax, self.ebx, self.ecx, self.edx]
    }
}

/// Anything able to answer CPUID queries.
///
/// The decoders never execute the instruction themselves; they are handed the
/// words produced by a source. [`HardwareCpuid`] talks to the processor, tests
/// use recorded register fixtures.
pub trait CpuidSource {
    /// Whether CPUID may be issued at all.
    ///
    /// If this returns `false`, [`query_leaf`](Self::query_leaf) must not be called.
    fn supports_query(&self) -> bool;

    /// Issues one query for `leaf` / `subleaf`.
    fn query_leaf(&self, leaf: u32, subleaf: u32) -> CpuidResult;

    /// Issues one query for `leaf` with subleaf `0`.
    #[inline]
    fn query(&self, leaf: u32) -> CpuidResult {
        self.query_leaf(leaf, 0)
    }
}

impl<T> CpuidSource for &T
where
    T: CpuidSource + ?Sized,
{
    #[inline]
    fn supports_query(&self) -> bool {
        (**self).supports_query()
    }

    #[inline]
    fn query_leaf(&self, leaf: u32, subleaf: u32) -> CpuidResult {
        (**self).query_leaf(leaf, subleaf)
    }
}
