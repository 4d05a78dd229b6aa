//! Names of the CPUID.01H feature bits.
//!
//! The low set is ECX and the high set is EDX. The two registers were assigned
//! independently, so the same bit position means different things in each set;
//! they are kept as separate tables and never merged.
//!
//! Reference: Intel SDM Vol. 2A, Tables 3-10 and 3-11.

/// One named bit of a feature word.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FeatureFlag {
    /// Mnemonic as printed by the SDM.
    pub name: &'static str,
    pub bit: u8,
    pub description: &'static str,
}

impl FeatureFlag {
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }

    #[inline]
    #[must_use]
    pub const fn is_set(&self, word: u32) -> bool {
        word & self.mask() != 0
    }
}

/// Selects one of the two leaf-1 feature words.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FeatureWord {
    /// CPUID.01H:ECX
    Low,
    /// CPUID.01H:EDX
    High,
}

impl FeatureWord {
    #[must_use]
    pub fn flags(self) -> &'static [FeatureFlag] {
        match self {
            Self::Low => &LEAF1_ECX_FEATURES,
            Self::High => &LEAF1_EDX_FEATURES,
        }
    }
}

const fn flag(bit: u8, name: &'static str, description: &'static str) -> FeatureFlag {
    FeatureFlag { name, bit, description }
}

/// CPUID.01H:ECX. Bit 16 is reserved.
#[rustfmt::skip]
pub static LEAF1_ECX_FEATURES: [FeatureFlag; 31] = [
    flag(0, "SSE3", "Streaming SIMD Extensions 3"),
    flag(1, "PCLMULQDQ", "Carry-less multiplication"),
    flag(2, "DTES64", "64-bit DS area"),
    flag(3, "MONITOR", "MONITOR/MWAIT"),
    flag(4, "DS-CPL", "CPL qualified debug store"),
    flag(5, "VMX", "Virtual Machine Extensions"),
    flag(6, "SMX", "Safer Mode Extensions"),
    flag(7, "EIST", "Enhanced Intel SpeedStep technology"),
    flag(8, "TM2", "Thermal Monitor 2"),
    flag(9, "SSSE3", "Supplemental Streaming SIMD Extensions 3"),
    flag(10, "CNXT-ID", "L1 context ID"),
    flag(11, "SDBG", "Silicon debug interface"),
    flag(12, "FMA", "Fused multiply-add using YMM state"),
    flag(13, "CMPXCHG16B", "CMPXCHG16B available"),
    flag(14, "xTPR", "xTPR update control"),
    flag(15, "PDCM", "Perfmon and debug capability"),
    flag(17, "PCID", "Process-context identifiers"),
    flag(18, "DCA", "Prefetch data from a memory mapped device"),
    flag(19, "SSE4_1", "SSE4.1"),
    flag(20, "SSE4_2", "SSE4.2"),
    flag(21, "x2APIC", "x2APIC"),
    flag(22, "MOVBE", "MOVBE instruction"),
    flag(23, "POPCNT", "POPCNT instruction"),
    flag(24, "TSC-Deadline", "Local APIC one-shot operation using a TSC deadline"),
    flag(25, "AESNI", "AES instruction extensions"),
    flag(26, "XSAVE", "XSAVE/XRSTOR, XSETBV/XGETBV and XCR0"),
    flag(27, "OSXSAVE", "OS has set CR4.OSXSAVE"),
    flag(28, "AVX", "Advanced Vector Extensions"),
    flag(29, "F16C", "16-bit floating-point conversion instructions"),
    flag(30, "RDRAND", "RDRAND instruction"),
    flag(31, "HYPERVISOR", "Running under a hypervisor"),
];

/// CPUID.01H:EDX. Bits 10, 20 and 30 are reserved.
#[rustfmt::skip]
pub static LEAF1_EDX_FEATURES: [FeatureFlag; 29] = [
    flag(0, "FPU", "Floating point unit on-chip"),
    flag(1, "VME", "Virtual 8086 mode enhancements"),
    flag(2, "DE", "Debugging extensions"),
    flag(3, "PSE", "Page size extension"),
    flag(4, "TSC", "Time stamp counter"),
    flag(5, "MSR", "Model specific registers, RDMSR and WRMSR"),
    flag(6, "PAE", "Physical address extension"),
    flag(7, "MCE", "Machine check exception"),
    flag(8, "CX8", "CMPXCHG8B instruction"),
    flag(9, "APIC", "APIC on-chip"),
    flag(11, "SEP", "SYSENTER and SYSEXIT instructions"),
    flag(12, "MTRR", "Memory type range registers"),
    flag(13, "PGE", "Page global bit"),
    flag(14, "MCA", "Machine check architecture"),
    flag(15, "CMOV", "Conditional move instructions"),
    flag(16, "PAT", "Page attribute table"),
    flag(17, "PSE-36", "36-bit page size extension"),
    flag(18, "PSN", "Processor serial number"),
    flag(19, "CLFSH", "CLFLUSH instruction"),
    flag(21, "DS", "Debug store"),
    flag(22, "ACPI", "Thermal monitor and software controlled clock facilities"),
    flag(23, "MMX", "Intel MMX technology"),
    flag(24, "FXSR", "FXSAVE and FXRSTOR instructions"),
    flag(25, "SSE", "Streaming SIMD Extensions"),
    flag(26, "SSE2", "Streaming SIMD Extensions 2"),
    flag(27, "SS", "Self snoop"),
    flag(28, "HTT", "Max APIC IDs reserved field is valid"),
    flag(29, "TM", "Thermal monitor"),
    flag(31, "PBE", "Pending break enable"),
];

/// Finds a flag by mnemonic, ignoring ASCII case.
#[must_use]
pub fn feature_flag(word: FeatureWord, name: &str) -> Option<&'static FeatureFlag> {
    word.flags().iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// All named flags set in `word`, in ascending bit order.
pub fn set_flags(word: FeatureWord, value: u32) -> impl Iterator<Item = &'static FeatureFlag> {
    word.flags().iter().filter(move |f| f.is_set(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpuid::{Leaf1Ecx, Leaf1Edx};

    fn assert_ordered(flags: &[FeatureFlag]) {
        assert!(flags.windows(2).all(|w| w[0].bit < w[1].bit));
        assert!(flags.iter().all(|f| f.bit < 32));
    }

    #[test]
    fn tables_are_ordered_and_skip_reserved_bits() {
        assert_ordered(&LEAF1_ECX_FEATURES);
        assert_ordered(&LEAF1_EDX_FEATURES);
        assert!(LEAF1_ECX_FEATURES.iter().all(|f| f.bit != 16));
        assert!(LEAF1_EDX_FEATURES.iter().all(|f| ![10, 20, 30].contains(&f.bit)));
    }

    #[test]
    fn anchor_bits() {
        assert_eq!(LEAF1_ECX_FEATURES[0].name, "SSE3");
        assert_eq!(LEAF1_EDX_FEATURES.last().map(|f| (f.name, f.bit)), Some(("PBE", 31)));
        assert_eq!(feature_flag(FeatureWord::High, "sse2").map(|f| f.bit), Some(26));
        assert_eq!(feature_flag(FeatureWord::Low, "sse4_2").map(|f| f.bit), Some(20));
        assert_eq!(feature_flag(FeatureWord::Low, "SSE2"), None);
    }

    #[test]
    fn same_position_means_different_things() {
        let low = LEAF1_ECX_FEATURES.iter().find(|f| f.bit == 26).map(|f| f.name);
        let high = LEAF1_EDX_FEATURES.iter().find(|f| f.bit == 26).map(|f| f.name);
        assert_eq!(low, Some("XSAVE"));
        assert_eq!(high, Some("SSE2"));
    }

    #[rustfmt::skip]
    const ECX_VIEW: [(&str, fn(&Leaf1Ecx) -> bool); 31] = [
        ("SSE3", Leaf1Ecx::sse3), ("PCLMULQDQ", Leaf1Ecx::pclmulqdq),
        ("DTES64", Leaf1Ecx::dtes64), ("MONITOR", Leaf1Ecx::monitor),
        ("DS-CPL", Leaf1Ecx::ds_cpl), ("VMX", Leaf1Ecx::vmx),
        ("SMX", Leaf1Ecx::smx), ("EIST", Leaf1Ecx::est),
        ("TM2", Leaf1Ecx::tm2), ("SSSE3", Leaf1Ecx::ssse3),
        ("CNXT-ID", Leaf1Ecx::cnxt_id), ("SDBG", Leaf1Ecx::sdbg),
        ("FMA", Leaf1Ecx::fma), ("CMPXCHG16B", Leaf1Ecx::cx16),
        ("xTPR", Leaf1Ecx::xtpr), ("PDCM", Leaf1Ecx::pdcm),
        ("PCID", Leaf1Ecx::pcid), ("DCA", Leaf1Ecx::dca),
        ("SSE4_1", Leaf1Ecx::sse4_1), ("SSE4_2", Leaf1Ecx::sse4_2),
        ("x2APIC", Leaf1Ecx::x2apic), ("MOVBE", Leaf1Ecx::movbe),
        ("POPCNT", Leaf1Ecx::popcnt), ("TSC-Deadline", Leaf1Ecx::tsc_deadline),
        ("AESNI", Leaf1Ecx::aesni), ("XSAVE", Leaf1Ecx::xsave),
        ("OSXSAVE", Leaf1Ecx::osxsave), ("AVX", Leaf1Ecx::avx),
        ("F16C", Leaf1Ecx::f16c), ("RDRAND", Leaf1Ecx::rdrand),
        ("HYPERVISOR", Leaf1Ecx::hypervisor),
    ];

    #[rustfmt::skip]
    const EDX_VIEW: [(&str, fn(&Leaf1Edx) -> bool); 29] = [
        ("FPU", Leaf1Edx::fpu), ("VME", Leaf1Edx::vme),
        ("DE", Leaf1Edx::de), ("PSE", Leaf1Edx::pse),
        ("TSC", Leaf1Edx::tsc), ("MSR", Leaf1Edx::msr),
        ("PAE", Leaf1Edx::pae), ("MCE", Leaf1Edx::mce),
        ("CX8", Leaf1Edx::cx8), ("APIC", Leaf1Edx::apic),
        ("SEP", Leaf1Edx::sep), ("MTRR", Leaf1Edx::mtrr),
        ("PGE", Leaf1Edx::pge), ("MCA", Leaf1Edx::mca),
        ("CMOV", Leaf1Edx::cmov), ("PAT", Leaf1Edx::pat),
        ("PSE-36", Leaf1Edx::pse36), ("PSN", Leaf1Edx::psn),
        ("CLFSH", Leaf1Edx::clfsh), ("DS", Leaf1Edx::ds),
        ("ACPI", Leaf1Edx::acpi), ("MMX", Leaf1Edx::mmx),
        ("FXSR", Leaf1Edx::fxsr), ("SSE", Leaf1Edx::sse),
        ("SSE2", Leaf1Edx::sse2), ("SS", Leaf1Edx::ss),
        ("HTT", Leaf1Edx::htt), ("TM", Leaf1Edx::tm),
        ("PBE", Leaf1Edx::pbe),
    ];

    /// Each named bit must light up exactly its own accessor.
    fn assert_view_matches<V>(word: FeatureWord, view: &[(&str, fn(&V) -> bool)], from_bits: fn(u32) -> V) {
        let table = word.flags();
        assert_eq!(table.len(), view.len());
        for (flag, &(name, get)) in table.iter().zip(view) {
            assert_eq!(flag.name, name);
            assert!(get(&from_bits(flag.mask())), "{name} not set by bit {}", flag.bit);
            assert!(!get(&from_bits(!flag.mask())), "{name} set by other bits");
        }
    }

    #[test]
    fn tables_agree_with_bitfield_views() {
        assert_view_matches(FeatureWord::Low, &ECX_VIEW, Leaf1Ecx::from_bits);
        assert_view_matches(FeatureWord::High, &EDX_VIEW, Leaf1Edx::from_bits);

        let ecx = Leaf1Ecx::new().with_avx(true).with_aesni(true);
        let names: Vec<_> = set_flags(FeatureWord::Low, ecx.into_bits()).map(|f| f.name).collect();
        assert_eq!(names, ["AESNI", "AVX"]);

        let edx = Leaf1Edx::new().with_fpu(true).with_htt(true).with_pbe(true);
        let names: Vec<_> = set_flags(FeatureWord::High, edx.into_bits()).map(|f| f.name).collect();
        assert_eq!(names, ["FPU", "HTT", "PBE"]);
    }

    #[test]
    fn reserved_bits_have_no_name() {
        let names: Vec<_> = set_flags(FeatureWord::High, 1 << 10 | 1 << 20 | 1 << 30).collect();
        assert!(names.is_empty());
    }
}
