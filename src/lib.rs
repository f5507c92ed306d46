//! Kernel-level socket configuration for IPv6 Neighbor Discovery sockets.
//!
//! A host service creates raw/ICMPv6 sockets, resolves interface indices,
//! and hands the descriptors to this crate, which installs packet filters
//! and IPv6 socket options so that only a narrow class of ND messages
//! reaches user space:
//!
//! - [`setup::setup_na_socket`] / [`setup::setup_ns_socket`] attach a
//!   classic BPF classifier passing a single ICMPv6 type (Neighbor
//!   Advertisement or Neighbor Solicitation).
//! - [`setup::setup_rs_socket`] fully configures a Router Solicitation
//!   receiver: ICMPv6 type filter, hop limits of 255, loopback off,
//!   multicast interface selection, wildcard bind, and membership in the
//!   all-routers group ff02::2.
//!
//! The crate retains no state between calls and never closes a caller's
//! socket. On Linux the [`sys`] module provides the kernel-backed
//! implementation; the sequences themselves are written against the
//! [`setup::SocketOps`] trait so they can be tested without a kernel.

pub mod error;
pub mod filter;
pub mod icmp6;
pub mod setup;

#[cfg(target_os = "linux")]
pub mod ops;
#[cfg(target_os = "linux")]
pub mod sys;

pub use error::NdSockError;
pub use setup::{setup_na_socket, setup_ns_socket, setup_rs_socket, SocketOps};
