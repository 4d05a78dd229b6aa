use core::fmt::{self, Write};
use kernel_cpuid::{FeatureWord, ProcessorIdentity};

const BANNER: &str = "\
==============================================
               CPUID Information
==============================================";

/// Writes the human readable report for `id`.
pub fn render<W: Write>(out: &mut W, id: &ProcessorIdentity) -> fmt::Result {
    writeln!(out, "{BANNER}")?;

    if let Some(brand) = id.brand_string() {
        writeln!(out, "{brand}")?;
    }
    writeln!(out)?;

    writeln!(out, "Leaf 0H:")?;
    writeln!(
        out,
        "\tMaximum Input Value for Basic CPUID Information: {:#x}",
        id.max_basic_leaf()
    )?;
    writeln!(out, "\tVendor: {}", id.vendor_string())?;

    writeln!(out, "Leaf 1H:")?;
    writeln!(out, "\tStepping ID: {}", id.stepping_id())?;
    writeln!(out, "\tModel: {:x}", id.display_model())?;
    writeln!(out, "\tFamily: {:x}", id.display_family())?;
    writeln!(out, "\tProcessor Type: {}", id.processor_type().as_str())?;
    if let Some(name) = id.brand_name() {
        writeln!(out, "\t{name}")?;
    }
    writeln!(out, "\tCache line size: {}", id.cache_line_size())?;
    writeln!(
        out,
        "\tMaximum number of addressable IDs for logical processors in this physical package: {}",
        id.max_logical_processor_ids()
    )?;
    writeln!(out, "\tInitial APIC ID: {}", id.initial_apic_id())?;

    writeln!(out)?;
    writeln!(out, "Feature Set:")?;
    for (word, flag) in id.features() {
        let reg = match word {
            FeatureWord::Low => "ECX",
            FeatureWord::High => "EDX",
        };
        writeln!(out, "\t{reg}[{:2}] {:<12} {}", flag.bit, flag.name, flag.description)?;
    }

    writeln!(out, "Leaf 2H:")?;
    for text in id.cache_descriptors() {
        writeln!(out, "\t{text}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_cpuid::{CpuidResult, CpuidSource, IdentifyOptions, identify};

    struct Recorded;

    impl CpuidSource for Recorded {
        fn supports_query(&self) -> bool {
            true
        }

        fn query_leaf(&self, leaf: u32, _subleaf: u32) -> CpuidResult {
            match leaf {
                0x0 => CpuidResult::new(0x2, 0x756E_6547, 0x6C65_746E, 0x4965_6E69),
                0x1 => CpuidResult::new(0x0000_0F29, 0x0102_0809, 0x0000_0001, 0x0400_0000),
                0x2 => CpuidResult::new(0x0000_2C01, 0, 0, 0),
                _ => CpuidResult::default(),
            }
        }
    }

    fn rendered() -> String {
        let id = identify(&Recorded, IdentifyOptions::default()).unwrap();
        let mut out = String::new();
        render(&mut out, &id).unwrap();
        out
    }

    #[test]
    fn leaf_sections() {
        let out = rendered();
        assert!(out.starts_with(BANNER));
        assert!(out.contains("\tMaximum Input Value for Basic CPUID Information: 0x2\n"));
        assert!(out.contains("\tVendor: GenuineIntel\n"));
        assert!(out.contains("\tStepping ID: 9\n"));
        assert!(out.contains("\tModel: 2\n"));
        assert!(out.contains("\tFamily: f\n"));
        assert!(out.contains("\tProcessor Type: Original OEM Processor\n"));
        assert!(out.contains("\tIntel(R) Pentium(R) 4 processor\n"));
        assert!(out.contains("\tCache line size: 64\n"));
        assert!(out.contains("physical package: 2\n"));
        assert!(out.contains("\tInitial APIC ID: 1\n"));
    }

    #[test]
    fn features_and_descriptors() {
        let out = rendered();
        assert!(out.contains("\tECX[ 0] SSE3"));
        assert!(out.contains("\tEDX[26] SSE2"));
        let leaf2 = out.split("Leaf 2H:\n").nth(1).unwrap();
        assert_eq!(
            leaf2,
            "\t1st-level data cache: 32 KBytes, 8-way set associative, 64 byte line size\n"
        );
    }
}
