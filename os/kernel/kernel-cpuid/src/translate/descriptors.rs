//! Cache and TLB descriptors reported by CPUID.02H.
//!
//! Reference: Intel SDM Vol. 2A, Table 3-12 “Encoding of CPUID Leaf 2 Descriptors”.

/// What a descriptor byte describes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DescriptorKind {
    Cache,
    Tlb,
    Prefetch,
    /// Not a descriptor of its own; points at another leaf.
    General,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CacheDescriptor {
    pub code: u8,
    pub kind: DescriptorKind,
    pub text: &'static str,
}

const fn cache(code: u8, text: &'static str) -> CacheDescriptor {
    CacheDescriptor { code, kind: DescriptorKind::Cache, text }
}

const fn tlb(code: u8, text: &'static str) -> CacheDescriptor {
    CacheDescriptor { code, kind: DescriptorKind::Tlb, text }
}

const fn prefetch(code: u8, text: &'static str) -> CacheDescriptor {
    CacheDescriptor { code, kind: DescriptorKind::Prefetch, text }
}

const fn general(code: u8, text: &'static str) -> CacheDescriptor {
    CacheDescriptor { code, kind: DescriptorKind::General, text }
}

/// Sorted by code. `00h` (null descriptor) is deliberately absent.
#[rustfmt::skip]
static DESCRIPTORS: [CacheDescriptor; 112] = [
    tlb(0x01, "Instruction TLB: 4 KByte pages, 4-way set associative, 32 entries"),
    tlb(0x02, "Instruction TLB: 4 MByte pages, fully associative, 2 entries"),
    tlb(0x03, "Data TLB: 4 KByte pages, 4-way set associative, 64 entries"),
    tlb(0x04, "Data TLB: 4 MByte pages, 4-way set associative, 8 entries"),
    tlb(0x05, "Data TLB1: 4 MByte pages, 4-way set associative, 32 entries"),
    cache(0x06, "1st-level instruction cache: 8 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x08, "1st-level instruction cache: 16 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x09, "1st-level instruction cache: 32 KBytes, 4-way set associative, 64 byte line size"),
    cache(0x0A, "1st-level data cache: 8 KBytes, 2-way set associative, 32 byte line size"),
    tlb(0x0B, "Instruction TLB: 4 MByte pages, 4-way set associative, 4 entries"),
    cache(0x0C, "1st-level data cache: 16 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x0D, "1st-level data cache: 16 KBytes, 4-way set associative, 64 byte line size"),
    cache(0x0E, "1st-level data cache: 24 KBytes, 6-way set associative, 64 byte line size"),
    cache(0x1D, "2nd-level cache: 128 KBytes, 2-way set associative, 64 byte line size"),
    cache(0x21, "2nd-level cache: 256 KBytes, 8-way set associative, 64 byte line size"),
    cache(0x22, "3rd-level cache: 512 KBytes, 4-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x23, "3rd-level cache: 1 MBytes, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x24, "2nd-level cache: 1 MBytes, 16-way set associative, 64 byte line size"),
    cache(0x25, "3rd-level cache: 2 MBytes, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x29, "3rd-level cache: 4 MBytes, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x2C, "1st-level data cache: 32 KBytes, 8-way set associative, 64 byte line size"),
    cache(0x30, "1st-level instruction cache: 32 KBytes, 8-way set associative, 64 byte line size"),
    cache(0x40, "No 2nd-level cache or, if processor contains a valid 2nd-level cache, no 3rd-level cache"),
    cache(0x41, "2nd-level cache: 128 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x42, "2nd-level cache: 256 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x43, "2nd-level cache: 512 KBytes, 4-way set associative, 32 byte line size"),
    cache(0x44, "2nd-level cache: 1 MByte, 4-way set associative, 32 byte line size"),
    cache(0x45, "2nd-level cache: 2 MByte, 4-way set associative, 32 byte line size"),
    cache(0x46, "3rd-level cache: 4 MByte, 4-way set associative, 64 byte line size"),
    cache(0x47, "3rd-level cache: 8 MByte, 8-way set associative, 64 byte line size"),
    cache(0x48, "2nd-level cache: 3 MByte, 12-way set associative, 64 byte line size"),
    cache(0x49, "3rd-level cache: 4 MB, 16-way set associative, 64-byte line size (Intel Xeon processor MP, Family 0FH, Model 06H); 2nd-level cache: 4 MByte, 16-way set associative, 64 byte line size"),
    cache(0x4A, "3rd-level cache: 6 MByte, 12-way set associative, 64 byte line size"),
    cache(0x4B, "3rd-level cache: 8 MByte, 16-way set associative, 64 byte line size"),
    cache(0x4C, "3rd-level cache: 12 MByte, 12-way set associative, 64 byte line size"),
    cache(0x4D, "3rd-level cache: 16 MByte, 16-way set associative, 64 byte line size"),
    cache(0x4E, "2nd-level cache: 6 MByte, 24-way set associative, 64 byte line size"),
    tlb(0x4F, "Instruction TLB: 4 KByte pages, 32 entries"),
    tlb(0x50, "Instruction TLB: 4 KByte and 2-MByte or 4-MByte pages, 64 entries"),
    tlb(0x51, "Instruction TLB: 4 KByte and 2-MByte or 4-MByte pages, 128 entries"),
    tlb(0x52, "Instruction TLB: 4 KByte and 2-MByte or 4-MByte pages, 256 entries"),
    tlb(0x55, "Instruction TLB: 2-MByte or 4-MByte pages, fully associative, 7 entries"),
    tlb(0x56, "Data TLB0: 4 MByte pages, 4-way set associative, 16 entries"),
    tlb(0x57, "Data TLB0: 4 KByte pages, 4-way associative, 16 entries"),
    tlb(0x59, "Data TLB0: 4 KByte pages, fully associative, 16 entries"),
    tlb(0x5A, "Data TLB0: 2 MByte or 4 MByte pages, 4-way set associative, 32 entries"),
    tlb(0x5B, "Data TLB: 4 KByte and 4 MByte pages, 64 entries"),
    tlb(0x5C, "Data TLB: 4 KByte and 4 MByte pages, 128 entries"),
    tlb(0x5D, "Data TLB: 4 KByte and 4 MByte pages, 256 entries"),
    cache(0x60, "1st-level data cache: 16 KByte, 8-way set associative, 64 byte line size"),
    tlb(0x61, "Instruction TLB: 4 KByte pages, fully associative, 48 entries"),
    tlb(0x63, "Data TLB: 2 MByte or 4 MByte pages, 4-way set associative, 32 entries and a separate array with 1 GByte pages, 4-way set associative, 4 entries"),
    tlb(0x64, "Data TLB: 4 KByte pages, 4-way set associative, 512 entries"),
    cache(0x66, "1st-level data cache: 8 KByte, 4-way set associative, 64 byte line size"),
    cache(0x67, "1st-level data cache: 16 KByte, 4-way set associative, 64 byte line size"),
    cache(0x68, "1st-level data cache: 32 KByte, 4-way set associative, 64 byte line size"),
    tlb(0x6A, "uTLB: 4 KByte pages, 8-way set associative, 64 entries"),
    tlb(0x6B, "DTLB: 4 KByte pages, 8-way set associative, 256 entries"),
    tlb(0x6C, "DTLB: 2M/4M pages, 8-way set associative, 128 entries"),
    tlb(0x6D, "DTLB: 1 GByte pages, fully associative, 16 entries"),
    cache(0x70, "Trace cache: 12 K-uop, 8-way set associative"),
    cache(0x71, "Trace cache: 16 K-uop, 8-way set associative"),
    cache(0x72, "Trace cache: 32 K-uop, 8-way set associative"),
    tlb(0x76, "Instruction TLB: 2M/4M pages, fully associative, 8 entries"),
    cache(0x78, "2nd-level cache: 1 MByte, 4-way set associative, 64 byte line size"),
    cache(0x79, "2nd-level cache: 128 KByte, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x7A, "2nd-level cache: 256 KByte, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x7B, "2nd-level cache: 512 KByte, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x7C, "2nd-level cache: 1 MByte, 8-way set associative, 64 byte line size, 2 lines per sector"),
    cache(0x7D, "2nd-level cache: 2 MByte, 8-way set associative, 64 byte line size"),
    cache(0x7F, "2nd-level cache: 512 KByte, 2-way set associative, 64 byte line size"),
    cache(0x80, "2nd-level cache: 512 KByte, 8-way set associative, 64 byte line size"),
    cache(0x82, "2nd-level cache: 256 KByte, 8-way set associative, 32 byte line size"),
    cache(0x83, "2nd-level cache: 512 KByte, 8-way set associative, 32 byte line size"),
    cache(0x84, "2nd-level cache: 1 MByte, 8-way set associative, 32 byte line size"),
    cache(0x85, "2nd-level cache: 2 MByte, 8-way set associative, 32 byte line size"),
    cache(0x86, "2nd-level cache: 512 KByte, 4-way set associative, 64 byte line size"),
    cache(0x87, "2nd-level cache: 1 MByte, 8-way set associative, 64 byte line size"),
    tlb(0xA0, "DTLB: 4k pages, fully associative, 32 entries"),
    tlb(0xB0, "Instruction TLB: 4 KByte pages, 4-way set associative, 128 entries"),
    tlb(0xB1, "Instruction TLB: 2M pages, 4-way, 8 entries or 4M pages, 4-way, 4 entries"),
    tlb(0xB2, "Instruction TLB: 4 KByte pages, 4-way set associative, 64 entries"),
    tlb(0xB3, "Data TLB: 4 KByte pages, 4-way set associative, 128 entries"),
    tlb(0xB4, "Data TLB1: 4 KByte pages, 4-way associative, 256 entries"),
    tlb(0xB5, "Instruction TLB: 4 KByte pages, 8-way set associative, 64 entries"),
    tlb(0xB6, "Instruction TLB: 4 KByte pages, 8-way set associative, 128 entries"),
    tlb(0xBA, "Data TLB1: 4 KByte pages, 4-way associative, 64 entries"),
    tlb(0xC0, "Data TLB: 4 KByte and 4 MByte pages, 4-way associative, 8 entries"),
    tlb(0xC1, "Shared 2nd-Level TLB: 4 KByte/2 MByte pages, 8-way associative, 1024 entries"),
    tlb(0xC2, "DTLB: 4 KByte/2 MByte pages, 4-way associative, 16 entries"),
    tlb(0xC3, "Shared 2nd-Level TLB: 4 KByte/2 MByte pages, 6-way associative, 1536 entries. Also 1 GByte pages, 4-way, 16 entries"),
    tlb(0xC4, "DTLB: 2M/4M Byte pages, 4-way associative, 32 entries"),
    tlb(0xCA, "Shared 2nd-Level TLB: 4 KByte pages, 4-way associative, 512 entries"),
    cache(0xD0, "3rd-level cache: 512 KByte, 4-way set associative, 64 byte line size"),
    cache(0xD1, "3rd-level cache: 1 MByte, 4-way set associative, 64 byte line size"),
    cache(0xD2, "3rd-level cache: 2 MByte, 4-way set associative, 64 byte line size"),
    cache(0xD6, "3rd-level cache: 1 MByte, 8-way set associative, 64 byte line size"),
    cache(0xD7, "3rd-level cache: 2 MByte, 8-way set associative, 64 byte line size"),
    cache(0xD8, "3rd-level cache: 4 MByte, 8-way set associative, 64 byte line size"),
    cache(0xDC, "3rd-level cache: 1.5 MByte, 12-way set associative, 64 byte line size"),
    cache(0xDD, "3rd-level cache: 3 MByte, 12-way set associative, 64 byte line size"),
    cache(0xDE, "3rd-level cache: 6 MByte, 12-way set associative, 64 byte line size"),
    cache(0xE2, "3rd-level cache: 2 MByte, 16-way set associative, 64 byte line size"),
    cache(0xE3, "3rd-level cache: 4 MByte, 16-way set associative, 64 byte line size"),
    cache(0xE4, "3rd-level cache: 8 MByte, 16-way set associative, 64 byte line size"),
    cache(0xEA, "3rd-level cache: 12 MByte, 24-way set associative, 64 byte line size"),
    cache(0xEB, "3rd-level cache: 18 MByte, 24-way set associative, 64 byte line size"),
    cache(0xEC, "3rd-level cache: 24 MByte, 24-way set associative, 64 byte line size"),
    prefetch(0xF0, "64-Byte prefetching"),
    prefetch(0xF1, "128-Byte prefetching"),
    general(0xFE, "CPUID leaf 2 does not report TLB descriptor information; use CPUID leaf 18H to query TLB and other address translation parameters"),
    general(0xFF, "CPUID leaf 2 does not report cache descriptor information, use CPUID leaf 4 to query cache parameters"),
];

/// Full table entry for a descriptor byte, if the byte is a known code.
#[must_use]
pub fn cache_descriptor(code: u8) -> Option<&'static CacheDescriptor> {
    DESCRIPTORS
        .binary_search_by_key(&code, |d| d.code)
        .ok()
        .map(|i| &DESCRIPTORS[i])
}

/// Looks up the description of a leaf-2 descriptor byte.
///
/// Unknown codes, including the null descriptor `00h`, yield `None`.
#[must_use]
pub fn translate_cache_descriptor(code: u8) -> Option<&'static str> {
    cache_descriptor(code).map(|d| d.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        assert!(DESCRIPTORS.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn every_entry_is_found_by_its_code() {
        for d in &DESCRIPTORS {
            assert_eq!(cache_descriptor(d.code), Some(d));
        }
    }

    #[test]
    fn use_leaf_4_marker() {
        let text = translate_cache_descriptor(0xFF).unwrap();
        assert!(text.contains("use CPUID leaf 4"));
        assert_eq!(cache_descriptor(0xFF).unwrap().kind, DescriptorKind::General);
    }

    #[test]
    fn unmapped_codes() {
        for code in [0x00, 0x07, 0x10, 0x62, 0x81, 0xFD] {
            assert_eq!(translate_cache_descriptor(code), None, "code {code:#04x}");
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(
            translate_cache_descriptor(0x0A),
            Some("1st-level data cache: 8 KBytes, 2-way set associative, 32 byte line size")
        );
        assert_eq!(cache_descriptor(0x5A).unwrap().kind, DescriptorKind::Tlb);
        assert_eq!(cache_descriptor(0xF0).unwrap().kind, DescriptorKind::Prefetch);
        assert_eq!(cache_descriptor(0x2C).unwrap().kind, DescriptorKind::Cache);
    }
}
