use crate::cpuid::{CpuVendor, CpuidResult, CpuidSource, LEAF_00H, LEAF_BRAND_LAST, Leaf00h};

pub const LEAF_MAX_EXTENDED: u32 = 0x8000_0000;

/// CPUID.80000000H — highest supported extended leaf (EAX).
///
/// Processors without an extended range return garbage here (often the basic
/// leaf data), so the value only counts if it is itself an extended leaf number.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtendedRange {
    pub max_extended: u32,
}

impl From<CpuidResult> for ExtendedRange {
    fn from(r: CpuidResult) -> Self {
        Self {
            max_extended: r.eax,
        }
    }
}

impl ExtendedRange {
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.max_extended & LEAF_MAX_EXTENDED != 0
    }

    #[inline]
    #[must_use]
    pub const fn has(&self, leaf: u32) -> bool {
        self.is_valid() && leaf >= LEAF_MAX_EXTENDED && leaf <= self.max_extended
    }

    /// Whether leaves `0x8000_0002..=0x8000_0004` can be queried.
    #[inline]
    #[must_use]
    pub const fn has_brand_string(&self) -> bool {
        self.has(LEAF_BRAND_LAST)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct CpuidRanges {
    pub max_basic: u32,
    pub max_extended: u32,
    pub vendor: CpuVendor,
}

impl CpuidRanges {
    /// Queries leaf `0x00` and leaf `0x8000_0000`.
    ///
    /// The source must support queries.
    #[must_use]
    pub fn read<S: CpuidSource + ?Sized>(source: &S) -> Self {
        let basic = Leaf00h::from(source.query(LEAF_00H));
        let extended = ExtendedRange::from(source.query(LEAF_MAX_EXTENDED));
        Self::new(&basic, extended)
    }

    #[must_use]
    pub fn new(basic: &Leaf00h, extended: ExtendedRange) -> Self {
        Self {
            max_basic: basic.max_basic,
            max_extended: if extended.is_valid() { extended.max_extended } else { 0 },
            vendor: basic.vendor.vendor(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn has_basic(&self, leaf: u32) -> bool {
        leaf <= self.max_basic
    }

    #[inline]
    #[must_use]
    pub const fn has_ext(&self, leaf: u32) -> bool {
        leaf >= LEAF_MAX_EXTENDED && leaf <= self.max_extended
    }

    #[inline]
    #[must_use]
    pub const fn extended(&self) -> ExtendedRange {
        ExtendedRange {
            max_extended: self.max_extended,
        }
    }
}
