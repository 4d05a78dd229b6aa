use crate::cpuid::{CpuidResult, CpuidSource};
use bitfield_struct::bitfield;

/// Execute CPUID with the given leaf and subleaf.
///
/// # Safety
/// The CPUID instruction must be available; see [`HardwareCpuid::supports_query`].
#[inline(always)]
#[allow(unused_assignments, clippy::inline_always)]
pub unsafe fn cpuid(leaf: u32, subleaf: u32) -> CpuidResult {
    let (mut eax, mut ebx, mut ecx, mut edx) = (leaf, 0u32, subleaf, 0u32);
    unsafe {
        core::arch::asm!(
            "push rbx",
            "cpuid",
            "mov {ebx_out:e}, ebx", // rbx is reserved by LLVM, copy it out
            "pop rbx",
            ebx_out = lateout(reg) ebx,
            inlateout("eax") eax,
            inlateout("ecx") ecx,
            lateout("edx") edx,
            options(nomem, preserves_flags),
        );
    }
    CpuidResult { eax, ebx, ecx, edx }
}

/// The parts of RFLAGS the support probe looks at.
#[bitfield(u64, order = Lsb)]
struct Rflags {
    /// Arithmetic, control and system flags (bits 20:0).
    #[bits(21)]
    _low: u32,

    /// ID Flag: software can toggle it iff CPUID is supported.
    id_cpuid: bool, // 21

    /// Reserved (bits 63:22).
    #[bits(42)]
    _reserved_rest: u64,
}

/// Reads RFLAGS, writes it back with the ID bit flipped and reads it again.
///
/// Returns `(before, after)`; the original flags are restored before returning.
fn toggle_id_flag() -> (Rflags, Rflags) {
    let mask = Rflags::new().with_id_cpuid(true).into_bits();
    let (before, after): (u64, u64);
    unsafe {
        core::arch::asm!(
            "pushfq",
            "pop {before}",
            "mov {after}, {before}",
            "xor {after}, {mask}",
            "push {after}",
            "popfq",
            "pushfq",
            "pop {after}",
            "push {before}",
            "popfq",
            before = out(reg) before,
            after = out(reg) after,
            mask = in(reg) mask,
        );
    }
    (Rflags::from_bits(before), Rflags::from_bits(after))
}

/// [`CpuidSource`] backed by the executing processor.
#[derive(Debug, Default, Copy, Clone)]
pub struct HardwareCpuid;

impl HardwareCpuid {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CpuidSource for HardwareCpuid {
    fn supports_query(&self) -> bool {
        let (before, after) = toggle_id_flag();
        let supported = before.id_cpuid() != after.id_cpuid();
        log::debug!(
            "RFLAGS.ID probe: before={:#x} after={:#x} supported={supported}",
            before.into_bits(),
            after.into_bits()
        );
        supported
    }

    fn query_leaf(&self, leaf: u32, subleaf: u32) -> CpuidResult {
        // SAFETY: callers go through `identify`, which checks `supports_query` first.
        unsafe { cpuid(leaf, subleaf) }
    }
}
