//! ICMPv6 protocol-level filter bitmap.
//!
//! Mirrors the kernel `struct icmp6_filter` consumed by
//! `setsockopt(IPPROTO_ICMPV6, ICMPV6_FILTER)`: a 256-bit bitmap indexed
//! by ICMPv6 type. A set bit blocks the type; all-ones blocks everything.
//! This is a distinct mechanism from the classic BPF classifier in
//! [`crate::filter`] — it operates on the ICMPv6 type the kernel has
//! already parsed, not on raw packet bytes.

/// Per-type ICMPv6 delivery filter, one bit per possible type value.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icmp6Filter {
    data: [u32; 8],
}

// Compile-time size assertion: must match the kernel struct (32 bytes).
const _: () = assert!(std::mem::size_of::<Icmp6Filter>() == 32);

impl Icmp6Filter {
    /// A filter that blocks every ICMPv6 type.
    pub fn block_all() -> Self {
        Self {
            data: [u32::MAX; 8],
        }
    }

    /// A filter that passes every ICMPv6 type.
    pub fn pass_all() -> Self {
        Self { data: [0; 8] }
    }

    /// Allow delivery of `icmpv6_type`.
    pub fn set_pass(&mut self, icmpv6_type: u8) {
        self.data[(icmpv6_type >> 5) as usize] &= !(1u32 << (icmpv6_type & 31));
    }

    /// Block delivery of `icmpv6_type`.
    pub fn set_block(&mut self, icmpv6_type: u8) {
        self.data[(icmpv6_type >> 5) as usize] |= 1u32 << (icmpv6_type & 31);
    }

    /// Whether the kernel would deliver messages of `icmpv6_type`.
    pub fn will_pass(&self, icmpv6_type: u8) -> bool {
        self.data[(icmpv6_type >> 5) as usize] & (1u32 << (icmpv6_type & 31)) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ND_NEIGHBOR_ADVERT, ND_NEIGHBOR_SOLICIT, ND_ROUTER_ADVERT, ND_ROUTER_SOLICIT};

    #[test]
    fn block_all_blocks_every_type() {
        let f = Icmp6Filter::block_all();
        for ty in 0..=255u8 {
            assert!(!f.will_pass(ty), "type {ty} unexpectedly passes");
        }
    }

    #[test]
    fn pass_all_passes_every_type() {
        let f = Icmp6Filter::pass_all();
        for ty in 0..=255u8 {
            assert!(f.will_pass(ty), "type {ty} unexpectedly blocked");
        }
    }

    #[test]
    fn single_pass_is_exact() {
        let mut f = Icmp6Filter::block_all();
        f.set_pass(ND_ROUTER_SOLICIT);
        for ty in 0..=255u8 {
            assert_eq!(
                f.will_pass(ty),
                ty == ND_ROUTER_SOLICIT,
                "type {ty} misfiltered"
            );
        }
    }

    #[test]
    fn set_block_undoes_set_pass() {
        let mut f = Icmp6Filter::block_all();
        f.set_pass(ND_NEIGHBOR_ADVERT);
        f.set_pass(ND_NEIGHBOR_SOLICIT);
        f.set_block(ND_NEIGHBOR_ADVERT);
        assert!(!f.will_pass(ND_NEIGHBOR_ADVERT));
        assert!(f.will_pass(ND_NEIGHBOR_SOLICIT));
        assert!(!f.will_pass(ND_ROUTER_ADVERT));
    }

    #[test]
    fn bitmap_size_matches_kernel_struct() {
        assert_eq!(std::mem::size_of::<Icmp6Filter>(), 32);
    }
}
