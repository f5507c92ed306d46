//! Ordered socket configuration sequences for Neighbor Discovery sockets.
//!
//! Each setup function is a blocking sequence of kernel configuration calls
//! on a caller-owned socket. No state is retained between calls; distinct
//! sockets are fully independent. A step failure aborts the remaining
//! steps and surfaces immediately — nothing already applied is rolled
//! back, so a failed call can leave the socket partially configured.

use crate::error::NdSockError;
use crate::filter::{
    icmpv6_type_filter, sock_filter, ND_NEIGHBOR_ADVERT, ND_NEIGHBOR_SOLICIT, ND_ROUTER_SOLICIT,
};
use crate::icmp6::Icmp6Filter;

/// Hop limit restricting ND traffic to link-local scope (RFC 4861 §4).
pub const LINK_LOCAL_HOP_LIMIT: i32 = 255;

/// The all-routers link-local multicast group, ff02::2.
pub const ALL_ROUTERS_MULTICAST: [u8; 16] = [0xff, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];

/// Kernel-facing mutations used by the setup sequences.
///
/// One method per distinct kernel operation, so the ordering and
/// abort-on-failure behavior of the sequences can be exercised against a
/// recording stub. The production implementation is
/// [`SysSocket`](crate::sys::SysSocket).
pub trait SocketOps {
    /// Attach a classic BPF classifier (`SO_ATTACH_FILTER`).
    fn attach_classifier(&mut self, prog: &[sock_filter]) -> Result<(), NdSockError>;
    /// Install a protocol-level ICMPv6 type filter (`ICMPV6_FILTER`).
    fn set_icmp6_filter(&mut self, filter: &Icmp6Filter) -> Result<(), NdSockError>;
    /// Set the multicast hop limit (`IPV6_MULTICAST_HOPS`).
    fn set_multicast_hops(&mut self, hops: i32) -> Result<(), NdSockError>;
    /// Set the unicast hop limit (`IPV6_UNICAST_HOPS`).
    fn set_unicast_hops(&mut self, hops: i32) -> Result<(), NdSockError>;
    /// Enable or disable multicast loopback (`IPV6_MULTICAST_LOOP`).
    fn set_multicast_loop(&mut self, enabled: bool) -> Result<(), NdSockError>;
    /// Select the outbound multicast interface (`IPV6_MULTICAST_IF`).
    fn set_multicast_interface(&mut self, ifindex: u32) -> Result<(), NdSockError>;
    /// Bind to the unspecified address `[::]:0`.
    fn bind_wildcard(&mut self) -> Result<(), NdSockError>;
    /// Join ff02::2 scoped to `ifindex` (`IPV6_JOIN_GROUP`).
    fn join_all_routers(&mut self, ifindex: u32) -> Result<(), NdSockError>;
}

/// Configure a socket to receive only Neighbor Advertisement messages.
pub fn setup_na_socket(sock: &mut impl SocketOps) -> Result<(), NdSockError> {
    sock.attach_classifier(&icmpv6_type_filter(ND_NEIGHBOR_ADVERT))
}

/// Configure a socket to receive only Neighbor Solicitation messages.
pub fn setup_ns_socket(sock: &mut impl SocketOps) -> Result<(), NdSockError> {
    sock.attach_classifier(&icmpv6_type_filter(ND_NEIGHBOR_SOLICIT))
}

/// Fully configure a socket to receive only Router Solicitation messages
/// on the link identified by `ifindex`.
///
/// The ICMPv6 filter is installed first: once group membership and the
/// wildcard bind are in place the socket can start receiving, and at that
/// point only the expected message type may pass. Hop limits and loopback
/// are likewise set before the group join so that protocol-correct limits
/// are active from the first received packet.
///
/// `ifindex` is passed through opaquely; 0 selects no specific interface
/// and the kernel decides whether that is acceptable per option.
pub fn setup_rs_socket(sock: &mut impl SocketOps, ifindex: u32) -> Result<(), NdSockError> {
    let mut rs_only = Icmp6Filter::block_all();
    rs_only.set_pass(ND_ROUTER_SOLICIT);
    sock.set_icmp6_filter(&rs_only)?;

    sock.set_multicast_hops(LINK_LOCAL_HOP_LIMIT)?;
    sock.set_unicast_hops(LINK_LOCAL_HOP_LIMIT)?;
    sock.set_multicast_loop(false)?;
    sock.set_multicast_interface(ifindex)?;
    sock.bind_wildcard()?;
    sock.join_all_routers(ifindex)?;
    Ok(())
}
