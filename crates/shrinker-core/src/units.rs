pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

/// Whole gibibytes, rounded down.
pub fn to_gib(bytes: u64) -> u64 {
    bytes / GIB
}

/// Whole mebibytes, rounded down.
pub fn to_mib(bytes: u64) -> u64 {
    bytes / MIB
}

/// Whole gigabytes to bytes, `None` on overflow.
pub fn gib_to_bytes(gib: u64) -> Option<u64> {
    gib.checked_mul(GIB)
}
