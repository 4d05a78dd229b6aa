use crate::cpuid::{
    BrandString, CpuVendor, CpuidRanges, CpuidSource, LEAF_01H, LEAF_02H, Leaf00h, Leaf01h, Leaf02h,
    ProcessorType, VendorString,
};
use crate::features::{FeatureFlag, FeatureWord, feature_flag, set_flags};
use crate::translate::{translate_brand_index_for_signature, translate_cache_descriptor};
use alloc::vec::Vec;
use log::{debug, info, trace, warn};

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum IdentifyError {
    #[error("the processor does not support the CPUID instruction")]
    Unsupported,
}

/// Which optional leaves [`identify`] queries.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IdentifyOptions {
    /// Query leaf 2 and translate its descriptor bytes.
    pub cache_descriptors: bool,
    /// Query the extended brand string leaves when present.
    pub brand_string: bool,
}

impl Default for IdentifyOptions {
    fn default() -> Self {
        Self {
            cache_descriptors: true,
            brand_string: true,
        }
    }
}

impl IdentifyOptions {
    #[must_use]
    pub const fn with_cache_descriptors(mut self, enabled: bool) -> Self {
        self.cache_descriptors = enabled;
        self
    }

    #[must_use]
    pub const fn with_brand_string(mut self, enabled: bool) -> Self {
        self.brand_string = enabled;
        self
    }
}

/// Normalized description of the processor, built once by [`identify`].
///
/// Display model and family are always derived from the stored raw fields.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProcessorIdentity {
    max_basic_leaf: u32,
    max_extended_leaf: u32,
    vendor: VendorString,
    leaf1: Leaf01h,
    brand: Option<BrandString>,
    cache_descriptors: Vec<&'static str>,
}

impl ProcessorIdentity {
    #[must_use]
    pub const fn max_basic_leaf(&self) -> u32 {
        self.max_basic_leaf
    }

    /// Highest extended leaf, or `0` if the extended range is absent.
    #[must_use]
    pub const fn max_extended_leaf(&self) -> u32 {
        self.max_extended_leaf
    }

    #[must_use]
    pub const fn vendor_string(&self) -> &VendorString {
        &self.vendor
    }

    #[must_use]
    pub fn vendor(&self) -> CpuVendor {
        self.vendor.vendor()
    }

    /// Decoded leaf 1; all zero if the processor does not report it.
    #[must_use]
    pub const fn leaf1(&self) -> &Leaf01h {
        &self.leaf1
    }

    #[must_use]
    pub const fn signature(&self) -> u32 {
        self.leaf1.signature()
    }

    #[must_use]
    pub const fn stepping_id(&self) -> u8 {
        self.leaf1.eax.stepping()
    }

    #[must_use]
    pub const fn model_id(&self) -> u8 {
        self.leaf1.eax.model()
    }

    #[must_use]
    pub const fn family_id(&self) -> u8 {
        self.leaf1.eax.family()
    }

    #[must_use]
    pub const fn processor_type(&self) -> ProcessorType {
        self.leaf1.processor_type()
    }

    #[must_use]
    pub const fn extended_model_id(&self) -> u8 {
        self.leaf1.eax.ext_model()
    }

    #[must_use]
    pub const fn extended_family_id(&self) -> u16 {
        self.leaf1.eax.ext_family()
    }

    #[must_use]
    pub const fn display_model(&self) -> u8 {
        self.leaf1.eax.effective_model()
    }

    #[must_use]
    pub fn display_family(&self) -> u16 {
        self.leaf1.eax.effective_family()
    }

    #[must_use]
    pub const fn brand_index(&self) -> u8 {
        self.leaf1.brand_index()
    }

    /// Brand-index text, if the index is mapped.
    #[must_use]
    pub fn brand_name(&self) -> Option<&'static str> {
        translate_brand_index_for_signature(self.brand_index(), self.signature())
    }

    /// CLFLUSH line size in bytes.
    #[must_use]
    pub fn cache_line_size(&self) -> u32 {
        self.leaf1.cache_line_bytes()
    }

    #[must_use]
    pub fn max_logical_processor_ids(&self) -> u32 {
        u32::from(self.leaf1.logical_cpus_legacy())
    }

    #[must_use]
    pub fn initial_apic_id(&self) -> u32 {
        u32::from(self.leaf1.initial_apic_id())
    }

    /// Raw CPUID.01H:ECX.
    #[must_use]
    pub const fn feature_flags_low(&self) -> u32 {
        self.leaf1.ecx.into_bits()
    }

    /// Raw CPUID.01H:EDX.
    #[must_use]
    pub const fn feature_flags_high(&self) -> u32 {
        self.leaf1.edx.into_bits()
    }

    #[must_use]
    pub const fn feature_bits(&self, word: FeatureWord) -> u32 {
        match word {
            FeatureWord::Low => self.feature_flags_low(),
            FeatureWord::High => self.feature_flags_high(),
        }
    }

    /// Tests a named feature bit; unknown names are reported as absent.
    #[must_use]
    pub fn has_feature(&self, word: FeatureWord, name: &str) -> bool {
        feature_flag(word, name).is_some_and(|f| f.is_set(self.feature_bits(word)))
    }

    /// Every named flag that is set, low word first.
    pub fn features(&self) -> impl Iterator<Item = (FeatureWord, &'static FeatureFlag)> {
        let low = set_flags(FeatureWord::Low, self.feature_flags_low()).map(|f| (FeatureWord::Low, f));
        let high = set_flags(FeatureWord::High, self.feature_flags_high()).map(|f| (FeatureWord::High, f));
        low.chain(high)
    }

    #[must_use]
    pub const fn brand_string(&self) -> Option<&BrandString> {
        self.brand.as_ref()
    }

    /// Translated leaf-2 descriptors in scan order.
    #[must_use]
    pub fn cache_descriptors(&self) -> &[&'static str] {
        &self.cache_descriptors
    }
}

/// Runs one identification pass against `source`.
///
/// Leaf 0 and `0x8000_0000` are always queried, leaf 1 if the basic range
/// reaches it; leaf 2 and the brand leaves according to `options`.
///
/// # Errors
/// [`IdentifyError::Unsupported`] if the source cannot issue CPUID at all.
pub fn identify<S>(source: &S, options: IdentifyOptions) -> Result<ProcessorIdentity, IdentifyError>
where
    S: CpuidSource + ?Sized,
{
    if !source.supports_query() {
        warn!("CPUID is not supported; cannot identify the processor");
        return Err(IdentifyError::Unsupported);
    }

    let leaf0 = Leaf00h::from(source.query(crate::cpuid::LEAF_00H));
    debug!("leaf 00H: max basic = {:#x}, vendor = {}", leaf0.max_basic, leaf0.vendor);

    let ranges = CpuidRanges::new(&leaf0, source.query(crate::cpuid::LEAF_MAX_EXTENDED).into());
    debug!("leaf 80000000H: max extended = {:#x}", ranges.max_extended);

    let leaf1 = if ranges.has_basic(LEAF_01H) {
        let r = source.query(LEAF_01H);
        debug!(
            "leaf 01H: eax={:#010x} ebx={:#010x} ecx={:#010x} edx={:#010x}",
            r.eax, r.ebx, r.ecx, r.edx
        );
        Leaf01h::from(r)
    } else {
        warn!("leaf 01H not reported (max basic leaf {:#x})", ranges.max_basic);
        Leaf01h::default()
    };

    let cache_descriptors = if options.cache_descriptors && ranges.has_basic(LEAF_02H) {
        read_cache_descriptors(source)
    } else {
        Vec::new()
    };

    let brand = if options.brand_string {
        BrandString::read(source, ranges.extended())
    } else {
        None
    };

    let identity = ProcessorIdentity {
        max_basic_leaf: leaf0.max_basic,
        max_extended_leaf: ranges.max_extended,
        vendor: leaf0.vendor,
        leaf1,
        brand,
        cache_descriptors,
    };

    info!(
        "identified {} family {:#x} model {:#x} stepping {}",
        identity.vendor,
        identity.display_family(),
        identity.display_model(),
        identity.stepping_id()
    );
    Ok(identity)
}

/// Queries leaf 2 as often as its repeat count asks and translates the codes.
///
/// Passes are concatenated in query order. Unknown codes are dropped; every
/// known code contributes its text, even if another code shares it.
fn read_cache_descriptors<S>(source: &S) -> Vec<&'static str>
where
    S: CpuidSource + ?Sized,
{
    let first = Leaf02h::from(source.query(LEAF_02H));
    let passes = first.iterations.max(1);
    debug!("leaf 02H: {} pass(es), first codes {:02x?}", passes, first.descriptors);

    let mut codes = first.descriptors;
    for _ in 1..passes {
        codes.extend(Leaf02h::from(source.query(LEAF_02H)).descriptors);
    }

    codes
        .into_iter()
        .filter_map(|code| {
            let text = translate_cache_descriptor(code);
            if text.is_none() {
                trace!("leaf 02H: no description for descriptor {code:#04x}");
            }
            text
        })
        .collect()
}
