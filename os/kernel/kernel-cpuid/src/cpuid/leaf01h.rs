use crate::cpuid::CpuidResult;
use bitfield_struct::bitfield;

pub const LEAF_01H: u32 = 0x01;

/// CPUID.01H — Feature Information (a.k.a. “leaf 1”).
///
/// Returns processor version info (EAX), brand/CLFLUSH/logical count/APIC ID (EBX),
/// and the classic feature flags (ECX/EDX). Every extraction is total: reserved
/// bits are carried along untouched and no input is rejected.
///
/// Reference: Intel SDM Vol. 2A, “CPUID—CPU Identification”, leaf 01H.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Leaf01h {
    pub eax: Leaf1Eax,
    pub ebx: Leaf1Ebx,
    pub ecx: Leaf1Ecx,
    pub edx: Leaf1Edx,
}

impl From<CpuidResult> for Leaf01h {
    fn from(r: CpuidResult) -> Self {
        Self {
            eax: Leaf1Eax::from_bits(r.eax),
            ebx: Leaf1Ebx::from_bits(r.ebx),
            ecx: Leaf1Ecx::from_bits(r.ecx),
            edx: Leaf1Edx::from_bits(r.edx),
        }
    }
}

impl Leaf01h {
    /// The processor signature, i.e. the raw EAX word.
    #[inline]
    #[must_use]
    pub const fn signature(&self) -> u32 {
        self.eax.into_bits()
    }

    #[inline]
    #[must_use]
    pub fn family(&self) -> u16 {
        self.eax.effective_family()
    }

    #[inline]
    #[must_use]
    pub const fn model(&self) -> u8 {
        self.eax.effective_model()
    }

    #[inline]
    #[must_use]
    pub const fn stepping(&self) -> u8 {
        self.eax.stepping()
    }

    #[inline]
    #[must_use]
    pub const fn processor_type(&self) -> ProcessorType {
        ProcessorType::from_bits(self.eax.cpu_type())
    }

    #[inline]
    #[must_use]
    pub const fn brand_index(&self) -> u8 {
        self.ebx.brand_index()
    }

    #[inline]
    #[must_use]
    pub fn cache_line_bytes(&self) -> u32 {
        self.ebx.clflush_line_bytes()
    }

    #[inline]
    #[must_use]
    pub const fn initial_apic_id(&self) -> u8 {
        self.ebx.initial_apic_id()
    }

    #[inline]
    #[must_use]
    pub const fn logical_cpus_legacy(&self) -> u8 {
        self.ebx.logical_processor_count()
    }
}

/// CPUID.01H:EAX — Version Information.
///
/// Raw fields as defined by the SDM; helpers compute the *display* model/family.
#[bitfield(u32)]
#[derive(Eq, PartialEq)]
pub struct Leaf1Eax {
    /// Stepping ID (bits 3:0).
    #[bits(4)]
    pub stepping: u8,
    /// Base model (bits 7:4).
    #[bits(4)]
    pub model: u8,
    /// Base family (bits 11:8).
    #[bits(4)]
    pub family: u8,
    /// Processor type (bits 13:12).
    #[bits(2)]
    pub cpu_type: u8,
    /// Reserved (bits 15:14).
    #[bits(2)]
    _rsv14_15: u8,
    /// Extended model (bits 19:16).
    #[bits(4)]
    pub ext_model: u8,
    /// Extended family (bits 27:20).
    #[bits(8)]
    pub ext_family: u16,
    /// Reserved (bits 31:28).
    #[bits(4)]
    _rsv28_31: u8,
}

impl Leaf1Eax {
    /// Bits covered by the named fields; the rest is reserved.
    pub const DOCUMENTED_MASK: u32 = 0x0FFF_3FFF;

    /// Display family per SDM:
    /// if base family == 0x0F → base + `ext_family`, else base.
    #[inline]
    #[must_use]
    pub fn effective_family(self) -> u16 {
        let fam = u16::from(self.family());
        if fam == 0x0F {
            fam + self.ext_family()
        } else {
            fam
        }
    }

    /// Display model per SDM:
    /// if base family in {0x06, 0x0F} → (`ext_model` << 4) + `base_model`, else `base_model`.
    #[inline]
    #[must_use]
    pub const fn effective_model(self) -> u8 {
        let fam = self.family();
        let base = self.model();
        if fam == 0x06 || fam == 0x0F {
            (self.ext_model() << 4) + base
        } else {
            base
        }
    }
}

/// CPUID.01H:EBX — Brand/CLFLUSH/Logical Count/APIC ID.
#[bitfield(u32)]
#[derive(Eq, PartialEq)]
pub struct Leaf1Ebx {
    /// Brand index (bits 7:0).
    #[bits(8)]
    pub brand_index: u8,
    /// CLFLUSH line size in **8-byte** units (bits 15:8).
    #[bits(8)]
    pub clflush_line_size_8b: u8,
    /// Maximum number of addressable logical processor IDs in the package (bits 23:16).
    #[bits(8)]
    pub logical_processor_count: u8,
    /// Initial APIC ID (bits 31:24).
    #[bits(8)]
    pub initial_apic_id: u8,
}

impl Leaf1Ebx {
    /// CLFLUSH line size in **bytes** (value * 8).
    #[inline]
    #[must_use]
    pub fn clflush_line_bytes(self) -> u32 {
        u32::from(self.clflush_line_size_8b()) * 8
    }
}

/// Processor type reported in CPUID.01H:EAX\[13:12\].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProcessorType {
    OriginalOem = 0,
    OverDrive = 1,
    Dual = 2,
    Reserved = 3,
}

impl ProcessorType {
    /// Maps the two type bits; higher bits are ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::OriginalOem,
            1 => Self::OverDrive,
            2 => Self::Dual,
            _ => Self::Reserved,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OriginalOem => "Original OEM Processor",
            Self::OverDrive => "Intel OverDrive Processor",
            Self::Dual => "Dual processor",
            Self::Reserved => "Intel reserved",
        }
    }
}

/// Feature flags returned by `CPUID.(EAX=1):ECX`.
///
/// Reference: Intel SDM Vol. 2A, Table 3-10 “Feature Information Returned in ECX”
#[bitfield(u32)]
#[derive(Eq, PartialEq)]
pub struct Leaf1Ecx {
    /// Streaming SIMD Extensions 3 (SSE3) instructions are supported.
    pub sse3: bool, // 0
    /// PCLMULQDQ (Carry-less multiply) instruction is supported.
    pub pclmulqdq: bool, // 1
    /// 64-bit DS area for debug store is supported.
    pub dtes64: bool, // 2
    /// MONITOR/MWAIT instructions are supported.
    pub monitor: bool, // 3
    /// CPL-qualified debug store area is supported.
    pub ds_cpl: bool, // 4
    /// Virtual Machine Extensions (VMX) are supported.
    pub vmx: bool, // 5
    /// Safer Mode Extensions (SMX) are supported.
    pub smx: bool, // 6
    /// Enhanced `SpeedStep` Technology (EST) is supported.
    pub est: bool, // 7
    /// Thermal Monitor 2 (TM2) is supported.
    pub tm2: bool, // 8
    /// Supplemental SSE3 (SSSE3) instructions are supported.
    pub ssse3: bool, // 9
    /// L1 Context ID (CNXT-ID).
    pub cnxt_id: bool, // 10
    /// Silicon debug interface (SDBG) available.
    pub sdbg: bool, // 11
    /// Fused Multiply-Add (FMA) instructions are supported.
    pub fma: bool, // 12
    /// CMPXCHG16B instruction is supported.
    pub cx16: bool, // 13
    /// xTPR update control (xTPR) is supported.
    pub xtpr: bool, // 14
    /// Perfmon and Debug Capability MSR (PDCM) available.
    pub pdcm: bool, // 15
    _rsv16: bool, // 16
    /// Process-context identifiers (PCID) are supported.
    pub pcid: bool, // 17
    /// Direct Cache Access (DCA) is supported.
    pub dca: bool, // 18
    /// SSE4.1 instructions are supported.
    pub sse4_1: bool, // 19
    /// SSE4.2 instructions are supported.
    pub sse4_2: bool, // 20
    /// x2APIC is supported.
    pub x2apic: bool, // 21
    /// MOVBE instruction is supported.
    pub movbe: bool, // 22
    /// POPCNT instruction is supported.
    pub popcnt: bool, // 23
    /// Local APIC supports TSC-deadline timer.
    pub tsc_deadline: bool, // 24
    /// AES-NI instructions are supported.
    pub aesni: bool, // 25
    /// XSAVE/XRSTOR and XCR0 are supported.
    pub xsave: bool, // 26
    /// OS has enabled XSAVE via CR4.OSXSAVE.
    pub osxsave: bool, // 27
    /// Advanced Vector Extensions (AVX).
    pub avx: bool, // 28
    /// 16-bit floating-point conversion instructions (F16C).
    pub f16c: bool, // 29
    /// RDRAND instruction.
    pub rdrand: bool, // 30
    /// Hypervisor present; always 0 on bare metal.
    pub hypervisor: bool, // 31
}

/// Feature flags returned by `CPUID.(EAX=1):EDX`.
///
/// Reference: Intel SDM Vol. 2A, Table 3-11 “Feature Information Returned in EDX”
#[bitfield(u32)]
#[derive(Eq, PartialEq)]
pub struct Leaf1Edx {
    /// On-chip x87 FPU.
    pub fpu: bool, // 0
    /// Virtual 8086 mode enhancements.
    pub vme: bool, // 1
    /// Debugging extensions.
    pub de: bool, // 2
    /// Page size extension.
    pub pse: bool, // 3
    /// Time stamp counter.
    pub tsc: bool, // 4
    /// RDMSR/WRMSR.
    pub msr: bool, // 5
    /// Physical address extension.
    pub pae: bool, // 6
    /// Machine check exception.
    pub mce: bool, // 7
    /// CMPXCHG8B.
    pub cx8: bool, // 8
    /// On-chip APIC.
    pub apic: bool, // 9
    _rsv10: bool, // 10
    /// SYSENTER/SYSEXIT.
    pub sep: bool, // 11
    /// Memory type range registers.
    pub mtrr: bool, // 12
    /// Page global bit.
    pub pge: bool, // 13
    /// Machine check architecture.
    pub mca: bool, // 14
    /// CMOVcc.
    pub cmov: bool, // 15
    /// Page attribute table.
    pub pat: bool, // 16
    /// 36-bit page size extension.
    pub pse36: bool, // 17
    /// Processor serial number.
    pub psn: bool, // 18
    /// CLFLUSH.
    pub clfsh: bool, // 19
    _rsv20: bool, // 20
    /// Debug store.
    pub ds: bool, // 21
    /// Thermal monitor and software controlled clock facilities.
    pub acpi: bool, // 22
    /// MMX technology.
    pub mmx: bool, // 23
    /// FXSAVE/FXRSTOR.
    pub fxsr: bool, // 24
    /// SSE.
    pub sse: bool, // 25
    /// SSE2.
    pub sse2: bool, // 26
    /// Self snoop.
    pub ss: bool, // 27
    /// Max APIC IDs field is valid.
    pub htt: bool, // 28
    /// Thermal monitor.
    pub tm: bool, // 29
    _rsv30: bool, // 30
    /// Pending break enable.
    pub pbe: bool, // 31
}
