use crate::cpuid::CpuidResult;
use alloc::vec::Vec;

pub const LEAF_02H: u32 = 0x02;

/// A register whose bit 31 is set carries no valid descriptors.
const REGISTER_INVALID: u32 = 1 << 31;

/// CPUID.02H — TLB/Cache/Prefetch descriptor bytes.
///
/// The low byte of EAX is not a descriptor: it is the number of times the
/// leaf has to be queried to obtain the full set (always `0x01` on any
/// processor still in use). The remaining 15 bytes are one-byte codes that are
/// resolved with [`translate_cache_descriptor`](crate::translate_cache_descriptor).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Leaf02h {
    /// Repeat count from EAX\[7:0\]; `1` if EAX itself is marked invalid.
    pub iterations: u8,
    /// Non-null descriptor codes in scan order: EAX, EBX, ECX, EDX, low byte first.
    pub descriptors: Vec<u8>,
}

impl From<CpuidResult> for Leaf02h {
    fn from(r: CpuidResult) -> Self {
        let mut descriptors = Vec::with_capacity(15);
        for (index, reg) in r.words().into_iter().enumerate() {
            if reg & REGISTER_INVALID != 0 {
                log::trace!("leaf 02H register {index} marked invalid: {reg:#010x}");
                continue;
            }

            // EAX[7:0] holds the repeat count.
            let skip = usize::from(index == 0);
            descriptors.extend(reg.to_le_bytes().into_iter().skip(skip).filter(|&b| b != 0));
        }

        let iterations = if r.eax & REGISTER_INVALID == 0 {
            r.eax.to_le_bytes()[0]
        } else {
            1
        };

        Self {
            iterations,
            descriptors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_repeat_count_and_keeps_following_bytes() {
        let leaf = Leaf02h::from(CpuidResult::new(0x0000_0A01, 0, 0, 0));
        assert_eq!(leaf.iterations, 0x01);
        assert_eq!(leaf.descriptors, [0x0A]);
    }

    #[test]
    fn repeat_count_position_is_skipped_whatever_its_value() {
        let leaf = Leaf02h::from(CpuidResult::new(0x0000_002C, 0, 0, 0));
        assert_eq!(leaf.iterations, 0x2C);
        assert!(leaf.descriptors.is_empty());
    }

    #[test]
    fn bytes_are_scanned_low_to_high_across_registers() {
        // Nehalem-era sample.
        let leaf = Leaf02h::from(CpuidResult::new(0x5503_5A01, 0x00F0_B2E4, 0x0000_0000, 0x09CA_212C));
        assert_eq!(
            leaf.descriptors,
            [0x5A, 0x03, 0x55, 0xE4, 0xB2, 0xF0, 0x2C, 0x21, 0xCA, 0x09]
        );
    }

    #[test]
    fn invalid_registers_contribute_nothing() {
        let leaf = Leaf02h::from(CpuidResult::new(0x8000_FF01, 0x8012_3456, 0x0000_0040, 0xFFFF_FFFF));
        assert_eq!(leaf.iterations, 0x01);
        assert_eq!(leaf.descriptors, [0x40]);
    }

    #[test]
    fn invalid_eax_does_not_supply_a_repeat_count() {
        let leaf = Leaf02h::from(CpuidResult::new(0x8000_00FF, 0, 0, 0));
        assert_eq!(leaf.iterations, 1);
        assert!(leaf.descriptors.is_empty());
    }

    #[test]
    fn all_zero_yields_nothing() {
        assert_eq!(Leaf02h::from(CpuidResult::default()), Leaf02h::default());
    }
}
