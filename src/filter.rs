//! Classic BPF classifier construction for ICMPv6 type filtering.
//!
//! Builds classic BPF instruction programs (as `Vec<sock_filter>`) for use
//! with `setsockopt(SO_ATTACH_FILTER)` on a raw ICMPv6 socket. The socket
//! delivers packets starting at the IPv6 header, so all offsets below are
//! relative to the start of the IPv6 fixed header (no link-layer framing).

// ---------------------------------------------------------------------------
// FFI type: BPF instruction
// ---------------------------------------------------------------------------

/// A single classic BPF instruction, matching the kernel `struct sock_filter`.
///
/// The layout is:
/// - `code` (u16): opcode composed of class | size | mode
/// - `jt`   (u8):  jump-true offset (relative, for conditional jumps)
/// - `jf`   (u8):  jump-false offset (relative, for conditional jumps)
/// - `k`    (u32): generic constant (immediate value, packet offset, etc.)
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct sock_filter {
    pub code: u16,
    pub jt: u8,
    pub jf: u8,
    pub k: u32,
}

// Compile-time size assertion: sock_filter must be exactly 8 bytes.
const _: () = assert!(std::mem::size_of::<sock_filter>() == 8);

// ---------------------------------------------------------------------------
// BPF instruction constants (classic BPF)
// ---------------------------------------------------------------------------

// Instruction classes
const BPF_LD: u16 = 0x00;
const BPF_JMP: u16 = 0x05;
const BPF_RET: u16 = 0x06;

// LD sizes
const BPF_B: u16 = 0x10; // byte

// LD modes
const BPF_ABS: u16 = 0x20; // absolute offset into packet

// JMP operations
const BPF_JEQ: u16 = 0x10; // jump if A == k

// Operand source
const BPF_K: u16 = 0x00; // constant operand

// ---------------------------------------------------------------------------
// Packet layout constants
// ---------------------------------------------------------------------------

/// Offset of the next-header byte within the IPv6 fixed header:
/// 4 bytes version/traffic-class/flow-label + 2 bytes payload length.
pub const IPV6_NEXT_HEADER_OFFSET: u32 = 6;

/// Length of the IPv6 fixed header. The classifier assumes the ICMPv6
/// header follows immediately; a packet carrying extension headers is
/// misclassified at this offset. That is an accepted limitation of the
/// fixed-offset classifier, not something to compensate for here.
pub const IPV6_HEADER_LEN: u32 = 40;

/// Offset of the ICMPv6 type byte: the type is the first byte of the
/// ICMPv6 header, directly after the IPv6 fixed header.
pub const ICMPV6_TYPE_OFFSET: u32 = IPV6_HEADER_LEN;

/// IPv6 next-header value for ICMPv6.
pub const IPPROTO_ICMPV6: u8 = 58;

// ICMPv6 Neighbor Discovery message types (RFC 4861 §4).
pub const ND_ROUTER_SOLICIT: u8 = 133;
pub const ND_ROUTER_ADVERT: u8 = 134;
pub const ND_NEIGHBOR_SOLICIT: u8 = 135;
pub const ND_NEIGHBOR_ADVERT: u8 = 136;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

/// Construct a single `sock_filter` with the given fields.
fn insn(code: u16, jt: u8, jf: u8, k: u32) -> sock_filter {
    sock_filter { code, jt, jf, k }
}

// ---------------------------------------------------------------------------
// Public filter constructor
// ---------------------------------------------------------------------------

/// Build a BPF program that accepts IPv6 packets whose next header is
/// ICMPv6 and whose ICMPv6 type equals `icmpv6_type`, rejecting all other
/// packets at the kernel boundary.
///
/// The program is fully determined by `icmpv6_type`: two calls with the
/// same type produce byte-identical instruction sequences.
///
/// Equivalent pseudo-assembly:
/// ```text
///   [0]  ldb  [6]                  ; IPv6 next header
///   [1]  jeq  #58   jt=0 jf=3      ; ICMPv6 → [2], else → [5] reject
///   [2]  ldb  [40]                 ; ICMPv6 type
///   [3]  jeq  #type jt=0 jf=1      ; match → [4], else → [5] reject
///   [4]  ret  #0xffff              ; accept
///   [5]  ret  #0                   ; reject
/// ```
pub fn icmpv6_type_filter(icmpv6_type: u8) -> Vec<sock_filter> {
    vec![
        // [0] Load the next-header byte of the IPv6 fixed header
        insn(BPF_LD | BPF_B | BPF_ABS, 0, 0, IPV6_NEXT_HEADER_OFFSET),
        // [1] ICMPv6? fall through to [2]; else jump +3 to [5] reject
        insn(BPF_JMP | BPF_JEQ | BPF_K, 0, 3, IPPROTO_ICMPV6 as u32),
        // [2] Load the ICMPv6 type byte
        insn(BPF_LD | BPF_B | BPF_ABS, 0, 0, ICMPV6_TYPE_OFFSET),
        // [3] Target type? fall through to [4]; else jump +1 to [5] reject
        insn(BPF_JMP | BPF_JEQ | BPF_K, 0, 1, icmpv6_type as u32),
        // [4] Accept — return full capture length
        insn(BPF_RET | BPF_K, 0, 0, 0xffff),
        // [5] Reject — return 0
        insn(BPF_RET | BPF_K, 0, 0, 0),
    ]
}

// ===========================================================================
// Tests
// ===========================================================================
