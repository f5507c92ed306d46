//! Linux implementation of [`SocketOps`] over a borrowed socket descriptor.
//!
//! Every method is a thin wrapper around one `setsockopt`/`bind` call.
//! The descriptor stays owned by the caller for its entire lifetime; this
//! module borrows it for the duration of one configuration call and never
//! closes it, including on failure.

use std::io;
use std::mem;
use std::os::fd::{AsRawFd, BorrowedFd};

use crate::error::NdSockError;
use crate::filter::sock_filter;
use crate::icmp6::Icmp6Filter;
use crate::setup::{self, SocketOps, ALL_ROUTERS_MULTICAST};

// ---------------------------------------------------------------------------
// Socket option constants libc does not export for Linux
// ---------------------------------------------------------------------------

// ICMPV6_FILTER from <linux/icmpv6.h>, at level IPPROTO_ICMPV6.
const ICMPV6_FILTER: libc::c_int = 1;
// Linux spells the RFC 3493 name IPV6_ADD_MEMBERSHIP.
const IPV6_JOIN_GROUP: libc::c_int = libc::IPV6_ADD_MEMBERSHIP;

// sock_fprog for SO_ATTACH_FILTER.
#[repr(C)]
#[allow(non_camel_case_types)]
struct sock_fprog {
    len: u16,
    filter: *mut sock_filter,
}

/// Kernel-backed [`SocketOps`] over a caller-owned descriptor.
pub struct SysSocket<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> SysSocket<'fd> {
    pub fn new(fd: BorrowedFd<'fd>) -> Self {
        Self { fd }
    }

    fn setsockopt<T>(&self, level: libc::c_int, option: libc::c_int, val: &T) -> io::Result<()> {
        let ret = unsafe {
            libc::setsockopt(
                self.fd.as_raw_fd(),
                level,
                option,
                val as *const T as *const libc::c_void,
                mem::size_of::<T>() as libc::socklen_t,
            )
        };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn ipv6_opt<T>(&self, option: libc::c_int, name: &'static str, val: &T) -> Result<(), NdSockError> {
        self.setsockopt(libc::IPPROTO_IPV6, option, val)
            .map_err(|source| NdSockError::SocketOption {
                option: name,
                source,
            })
    }
}

impl SocketOps for SysSocket<'_> {
    fn attach_classifier(&mut self, prog: &[sock_filter]) -> Result<(), NdSockError> {
        let mut insns = prog.to_vec();
        let fprog = sock_fprog {
            len: insns.len() as u16,
            filter: insns.as_mut_ptr(),
        };
        self.setsockopt(libc::SOL_SOCKET, libc::SO_ATTACH_FILTER, &fprog)
            .map_err(|source| NdSockError::FilterAttach {
                op: "setsockopt(SO_ATTACH_FILTER)",
                source,
            })
    }

    fn set_icmp6_filter(&mut self, filter: &Icmp6Filter) -> Result<(), NdSockError> {
        self.setsockopt(libc::IPPROTO_ICMPV6, ICMPV6_FILTER, filter)
            .map_err(|source| NdSockError::FilterAttach {
                op: "setsockopt(ICMP6_FILTER)",
                source,
            })
    }

    fn set_multicast_hops(&mut self, hops: i32) -> Result<(), NdSockError> {
        let hops: libc::c_int = hops;
        self.ipv6_opt(libc::IPV6_MULTICAST_HOPS, "IPV6_MULTICAST_HOPS", &hops)
    }

    fn set_unicast_hops(&mut self, hops: i32) -> Result<(), NdSockError> {
        let hops: libc::c_int = hops;
        self.ipv6_opt(libc::IPV6_UNICAST_HOPS, "IPV6_UNICAST_HOPS", &hops)
    }

    fn set_multicast_loop(&mut self, enabled: bool) -> Result<(), NdSockError> {
        let on: libc::c_int = enabled as libc::c_int;
        self.ipv6_opt(libc::IPV6_MULTICAST_LOOP, "IPV6_MULTICAST_LOOP", &on)
    }

    fn set_multicast_interface(&mut self, ifindex: u32) -> Result<(), NdSockError> {
        let idx: libc::c_int = ifindex as libc::c_int;
        self.ipv6_opt(libc::IPV6_MULTICAST_IF, "IPV6_MULTICAST_IF", &idx)
    }

    fn bind_wildcard(&mut self) -> Result<(), NdSockError> {
        // [::]:0 — wildcard address, wildcard port, no scope.
        let mut sin6: libc::sockaddr_in6 = unsafe { mem::zeroed() };
        sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;

        let ret = unsafe {
            libc::bind(
                self.fd.as_raw_fd(),
                &sin6 as *const libc::sockaddr_in6 as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t,
            )
        };
        if ret != 0 {
            return Err(NdSockError::Bind {
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    fn join_all_routers(&mut self, ifindex: u32) -> Result<(), NdSockError> {
        let mreq = libc::ipv6_mreq {
            ipv6mr_multiaddr: libc::in6_addr {
                s6_addr: ALL_ROUTERS_MULTICAST,
            },
            ipv6mr_interface: ifindex as libc::c_uint,
        };
        self.ipv6_opt(IPV6_JOIN_GROUP, "IPV6_JOIN_GROUP", &mreq)
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Configure `fd` to receive only Neighbor Advertisement messages.
pub fn configure_na_socket(fd: BorrowedFd<'_>) -> Result<(), NdSockError> {
    setup::setup_na_socket(&mut SysSocket::new(fd))
}

/// Configure `fd` to receive only Neighbor Solicitation messages.
pub fn configure_ns_socket(fd: BorrowedFd<'_>) -> Result<(), NdSockError> {
    setup::setup_ns_socket(&mut SysSocket::new(fd))
}

/// Configure `fd` to receive only Router Solicitation messages on the link
/// identified by `ifindex`, with link-local multicast semantics.
pub fn configure_rs_socket(fd: BorrowedFd<'_>, ifindex: u32) -> Result<(), NdSockError> {
    log::debug!(
        "configuring RS socket (fd={}, ifindex={})",
        fd.as_raw_fd(),
        ifindex
    );
    setup::setup_rs_socket(&mut SysSocket::new(fd), ifindex).inspect_err(|e| {
        log::warn!("RS socket configuration aborted at {}: {e}", e.operation());
    })
}
