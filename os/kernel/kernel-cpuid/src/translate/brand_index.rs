//! Brand index from CPUID.01H:EBX\[7:0\].
//!
//! Reference: Intel SDM Vol. 2A, Table 3-13 “Mapping of Brand Indices; and
//! Intel 64 and IA-32 Processor Brand Strings”.

/// Indexed by brand index; `None` marks unused and reserved values.
///
/// Several names repeat under different indices, as published.
static BRAND_INDEX: [Option<&str>; 0x18] = [
    None,                                               // 00h: not supported
    Some("Intel(R) Celeron(R) processor"),              // 01h
    Some("Intel(R) Pentium(R) III processor"),          // 02h
    Some("Intel(R) Pentium(R) III Xeon(R) processor"),  // 03h
    Some("Intel(R) Pentium(R) III processor"),          // 04h
    None,                                               // 05h
    Some("Mobile Intel(R) Pentium(R) III processor-M"), // 06h
    Some("Mobile Intel(R) Celeron(R) processor"),       // 07h
    Some("Intel(R) Pentium(R) 4 processor"),            // 08h
    Some("Intel(R) Pentium(R) 4 processor"),            // 09h
    Some("Intel(R) Celeron(R) processor"),              // 0Ah
    Some("Intel(R) Xeon(R) processor"),                 // 0Bh
    Some("Intel(R) Xeon(R) processor MP"),              // 0Ch
    None,                                               // 0Dh
    Some("Mobile Intel(R) Pentium(R) 4 processor-M"),   // 0Eh
    Some("Mobile Intel(R) Celeron(R) processor"),       // 0Fh
    None,                                               // 10h
    Some("Mobile Genuine Intel(R) processor"),          // 11h
    Some("Intel(R) Celeron(R) M processor"),            // 12h
    Some("Mobile Intel(R) Celeron(R) processor"),       // 13h
    Some("Intel(R) Celeron(R) processor"),              // 14h
    Some("Mobile Genuine Intel(R) processor"),          // 15h
    Some("Intel(R) Pentium(R) M processor"),            // 16h
    Some("Mobile Intel(R) Celeron(R) processor"),       // 17h
];

/// Signature of the Pentium III parts sold as Celeron under index 03h.
const SIGNATURE_06B1: u32 = 0x0000_06B1;
/// Signature of the early Xeon parts that reuse indices 0Bh and 0Eh.
const SIGNATURE_0F13: u32 = 0x0000_0F13;

/// Looks up the processor name for a brand index.
///
/// Returns `None` for index 0 (brand index unsupported), for reserved
/// indices and for anything above `0x17`.
#[must_use]
pub fn translate_brand_index(index: u8) -> Option<&'static str> {
    BRAND_INDEX.get(usize::from(index)).copied().flatten()
}

/// Like [`translate_brand_index`], honouring the per-signature exceptions of the
/// brand table. `signature` is the raw CPUID.01H:EAX value.
#[must_use]
pub fn translate_brand_index_for_signature(index: u8, signature: u32) -> Option<&'static str> {
    match (index, signature) {
        (0x03, SIGNATURE_06B1) => Some("Intel(R) Celeron(R) processor"),
        (0x0B, SIGNATURE_0F13) => Some("Intel(R) Xeon(R) processor MP"),
        (0x0E, SIGNATURE_0F13) => Some("Intel(R) Xeon(R) processor"),
        _ => translate_brand_index(index),
    }
}
