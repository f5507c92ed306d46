use std::io;

/// Failure from a single socket configuration step.
///
/// Every variant names the kernel operation that failed and carries the
/// OS error verbatim. Configuration sequences abort on the first failure;
/// nothing already applied to the socket is rolled back, and it is the
/// caller's decision whether to discard the partially configured socket.
#[derive(Debug, thiserror::Error)]
pub enum NdSockError {
    /// A packet-filter attach failed (classic BPF classifier or the
    /// protocol-level ICMPv6 filter).
    #[error("{op} failed: {source}")]
    FilterAttach {
        op: &'static str,
        #[source]
        source: io::Error,
    },
    /// A non-filter setsockopt failed, tagged with the option name.
    #[error("setsockopt({option}) failed: {source}")]
    SocketOption {
        option: &'static str,
        #[source]
        source: io::Error,
    },
    /// The wildcard bind to `[::]:0` failed.
    #[error("bind(in6addr_any) failed: {source}")]
    Bind {
        #[source]
        source: io::Error,
    },
}

impl NdSockError {
    /// Identifier of the configuration step that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            NdSockError::FilterAttach { op, .. } => op,
            NdSockError::SocketOption { option, .. } => option,
            NdSockError::Bind { .. } => "bind(in6addr_any)",
        }
    }

    /// Raw OS error code from the failing call, if one was captured.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            NdSockError::FilterAttach { source, .. }
            | NdSockError::SocketOption { source, .. }
            | NdSockError::Bind { source } => source.raw_os_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_are_distinguishable() {
        let a = NdSockError::FilterAttach {
            op: "setsockopt(SO_ATTACH_FILTER)",
            source: io::Error::from_raw_os_error(libc::EPERM),
        };
        let b = NdSockError::SocketOption {
            option: "IPV6_MULTICAST_HOPS",
            source: io::Error::from_raw_os_error(libc::EINVAL),
        };
        let c = NdSockError::Bind {
            source: io::Error::from_raw_os_error(libc::EADDRINUSE),
        };
        assert_eq!(a.operation(), "setsockopt(SO_ATTACH_FILTER)");
        assert_eq!(b.operation(), "IPV6_MULTICAST_HOPS");
        assert_eq!(c.operation(), "bind(in6addr_any)");
        assert_ne!(a.operation(), b.operation());
    }

    #[test]
    fn os_error_is_propagated_verbatim() {
        let e = NdSockError::SocketOption {
            option: "IPV6_MULTICAST_IF",
            source: io::Error::from_raw_os_error(libc::ENODEV),
        };
        assert_eq!(e.os_error(), Some(libc::ENODEV));
        let msg = e.to_string();
        assert!(msg.contains("IPV6_MULTICAST_IF"), "got: {msg}");
    }
}
