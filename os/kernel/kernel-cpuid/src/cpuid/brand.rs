use crate::cpuid::{CpuidResult, CpuidSource, ExtendedRange};
use core::fmt;

pub const LEAF_BRAND_FIRST: u32 = 0x8000_0002;
pub const LEAF_BRAND_LAST: u32 = 0x8000_0004;

/// Processor brand string from CPUID.80000002H–80000004H.
///
/// 3 leaves * 4 registers * 4 bytes. The bytes are kept verbatim, including the
/// NUL padding and, on some parts, leading spaces.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BrandString([u8; 48]);

impl BrandString {
    /// Concatenates EAX, EBX, ECX, EDX of each leaf, low byte first.
    #[must_use]
    pub fn from_leaves(leaves: [CpuidResult; 3]) -> Self {
        let mut buffer = [0u8; 48];
        let words = leaves.iter().flat_map(CpuidResult::words);
        for (chunk, word) in buffer.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(buffer)
    }

    /// Queries the three brand leaves if `range` reports them.
    #[must_use]
    pub fn read<S: CpuidSource + ?Sized>(source: &S, range: ExtendedRange) -> Option<Self> {
        if !range.has_brand_string() {
            return None;
        }

        let leaves = [
            source.query(LEAF_BRAND_FIRST),
            source.query(LEAF_BRAND_FIRST + 1),
            source.query(LEAF_BRAND_LAST),
        ];
        Some(Self::from_leaves(leaves))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }

    /// Display text: trailing NULs and surrounding whitespace removed.
    ///
    /// Anything after an invalid UTF-8 sequence is dropped.
    #[must_use]
    pub fn as_str(&self) -> &str {
        let text = match core::str::from_utf8(&self.0) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&self.0[..e.valid_up_to()]).unwrap_or_default(),
        };
        text.trim_end_matches('\0').trim()
    }
}

impl fmt::Debug for BrandString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BrandString").field(&self.as_str()).finish()
    }
}

impl fmt::Display for BrandString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Packs 48 bytes into three leaves the way the processor returns them.
    fn leaves_for(text: &[u8; 48]) -> [CpuidResult; 3] {
        let word = |i: usize| u32::from_le_bytes([text[i], text[i + 1], text[i + 2], text[i + 3]]);
        core::array::from_fn(|leaf| {
            let base = leaf * 16;
            CpuidResult::new(word(base), word(base + 4), word(base + 8), word(base + 12))
        })
    }

    #[test]
    fn reproduces_payload_byte_for_byte() {
        let payload = *b"Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz\0\0\0\0\0\0\0\0";
        let brand = BrandString::from_leaves(leaves_for(&payload));
        assert_eq!(brand.as_bytes(), &payload);
        assert_eq!(brand.as_str(), "Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz");
    }

    #[test]
    fn word_order_within_a_leaf_is_eax_ebx_ecx_edx() {
        let leaves = [
            CpuidResult::new(0x3332_3130, 0x3736_3534, 0x6261_3938, 0x6665_6463),
            CpuidResult::default(),
            CpuidResult::default(),
        ];
        let brand = BrandString::from_leaves(leaves);
        assert_eq!(brand.as_str(), "0123456789abcdef");
    }

    #[test]
    fn full_width_string_has_no_terminator() {
        let payload = *b"AMD Ryzen 9 3950X 16-Core Processor             ";
        let brand = BrandString::from_leaves(leaves_for(&payload));
        assert_eq!(brand.as_bytes(), &payload);
        assert_eq!(brand.as_str(), "AMD Ryzen 9 3950X 16-Core Processor");
    }

    #[test]
    fn leading_spaces_are_trimmed_for_display() {
        let payload = *b"              Intel(R) Pentium(R) 4 CPU 3.00GHz\0";
        let brand = BrandString::from_leaves(leaves_for(&payload));
        assert_eq!(brand.as_str(), "Intel(R) Pentium(R) 4 CPU 3.00GHz");
    }

    #[test]
    fn invalid_utf8_keeps_valid_prefix() {
        let mut payload = [0u8; 48];
        payload[..4].copy_from_slice(b"Zen ");
        payload[4] = 0xFF;
        let brand = BrandString::from_leaves(leaves_for(&payload));
        assert_eq!(brand.as_str(), "Zen");
    }
}
