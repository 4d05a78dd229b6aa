use crate::cpuid::CpuidResult;
use core::fmt;

pub const LEAF_00H: u32 = 0x00;

/// CPUID.00H — highest basic leaf and vendor identification string.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Leaf00h {
    /// Maximum input value for basic CPUID information (EAX).
    pub max_basic: u32,
    /// Vendor string assembled from EBX, EDX, ECX (in that order).
    pub vendor: VendorString,
}

impl From<CpuidResult> for Leaf00h {
    fn from(r: CpuidResult) -> Self {
        Self {
            max_basic: r.eax,
            vendor: VendorString::from_registers(r.ebx, r.edx, r.ecx),
        }
    }
}

/// The 12 ASCII bytes of the vendor identification, e.g. `GenuineIntel`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct VendorString([u8; 12]);

impl VendorString {
    /// Assembles the string in hardware order: EBX, then EDX, then ECX.
    #[must_use]
    pub fn from_registers(ebx: u32, edx: u32, ecx: u32) -> Self {
        let mut bytes = [0u8; 12];
        for (chunk, reg) in bytes.chunks_exact_mut(4).zip([ebx, edx, ecx]) {
            chunk.copy_from_slice(&reg.to_le_bytes());
        }
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// The vendor string without trailing NULs, or `""` if it is not UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0)
            .unwrap_or_default()
            .trim_end_matches('\0')
    }

    #[must_use]
    pub fn vendor(&self) -> CpuVendor {
        CpuVendor::from(self)
    }
}

impl fmt::Debug for VendorString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VendorString").field(&self.as_str()).finish()
    }
}

impl fmt::Display for VendorString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CpuVendor {
    Intel,
    Amd,
    Other,
}

impl From<&VendorString> for CpuVendor {
    fn from(vendor: &VendorString) -> Self {
        match vendor.as_str() {
            "GenuineIntel" => Self::Intel,
            "AuthenticAMD" => Self::Amd,
            _ => Self::Other,
        }
    }
}

impl CpuVendor {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CpuVendor::Intel => "Intel",
            CpuVendor::Amd => "AMD",
            CpuVendor::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genuine_intel_uses_ebx_edx_ecx_order() {
        let leaf = Leaf00h::from(CpuidResult::new(0x16, 0x756E_6547, 0x6C65_746E, 0x4965_6E69));
        assert_eq!(leaf.max_basic, 0x16);
        assert_eq!(leaf.vendor.as_str(), "GenuineIntel");
        assert_eq!(leaf.vendor.vendor(), CpuVendor::Intel);
    }

    #[test]
    fn authentic_amd() {
        // "Auth" "enti" "cAMD"
        let v = VendorString::from_registers(0x6874_7541, 0x6974_6E65, 0x444D_4163);
        assert_eq!(v.as_str(), "AuthenticAMD");
        assert_eq!(v.vendor(), CpuVendor::Amd);
    }

    #[test]
    fn assembly_is_repeatable() {
        let a = VendorString::from_registers(0x756E_6547, 0x4965_6E69, 0x6C65_746E);
        let b = VendorString::from_registers(0x756E_6547, 0x4965_6E69, 0x6C65_746E);
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b"GenuineIntel");
    }

    #[test]
    fn unknown_vendor_and_padding() {
        let v = VendorString::from_registers(0x4B4F_4F42, 0, 0); // "BOOK"
        assert_eq!(v.as_str(), "BOOK");
        assert_eq!(v.vendor(), CpuVendor::Other);
    }

    #[test]
    fn non_utf8_vendor_is_empty() {
        let v = VendorString::from_registers(0xFFFF_FFFF, 0, 0);
        assert_eq!(v.as_str(), "");
        assert_eq!(v.vendor(), CpuVendor::Other);
    }
}
