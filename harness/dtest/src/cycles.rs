//! Hardware cycle counter.
//!
//! Readings are only meaningful as deltas on the same thread. They are
//! never wall-clock time.
//!
//! # Platform Support
//!
//! - **x86_64**: `rdtsc` (time-stamp counter, ticks at a fixed reference rate)
//! - **aarch64**: `cntvct_el0` (virtual counter, rate varies by SoC)
//! - **Others**: [`now`] always returns 0 and benchmark numbers are
//!   meaningless. Tests still run.

/// Read the time-stamp counter.
#[inline]
#[cfg(target_arch = "x86_64")]
#[expect(unsafe_code, reason = "reading the counter needs inline assembly")]
pub fn now() -> u64 {
    let lo: u32;
    let hi: u32;
    // SAFETY: rdtsc only writes eax/edx and is available on every x86_64 cpu.
    unsafe {
        core::arch::asm!(
            "rdtsc",
            out("eax") lo,
            out("edx") hi,
            options(nostack, preserves_flags),
        );
    }
    (u64::from(hi) << 32) | u64::from(lo)
}

/// Read the virtual counter.
#[inline]
#[cfg(target_arch = "aarch64")]
#[expect(unsafe_code, reason = "reading the counter needs inline assembly")]
pub fn now() -> u64 {
    let ticks: u64;
    // SAFETY: cntvct_el0 is readable from EL0 and the read has no side effects.
    unsafe {
        core::arch::asm!(
            "mrs {}, cntvct_el0",
            out(reg) ticks,
            options(nostack, preserves_flags),
        );
    }
    ticks
}

/// No known counter on this architecture.
#[inline]
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn now() -> u64 {
    0
}

/// Whether [`now`] reads a real counter on this target.
pub const fn is_supported() -> bool {
    cfg!(any(target_arch = "x86_64", target_arch = "aarch64"))
}
