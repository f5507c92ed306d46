//! Exported operation table for embedding layers.
//!
//! A host runtime that exposes these configuration routines through its own
//! call boundary builds this table once at startup and registers the entries
//! however its runtime requires. The table is constructed fresh on each
//! call; the crate holds no global state.

use std::os::fd::BorrowedFd;

use crate::error::NdSockError;
use crate::sys;

/// How an exported operation is invoked.
#[derive(Clone, Copy)]
pub enum OpInvoke {
    /// Takes only the socket descriptor.
    Fd(fn(BorrowedFd<'_>) -> Result<(), NdSockError>),
    /// Takes the socket descriptor and an interface index.
    FdIfIndex(fn(BorrowedFd<'_>, u32) -> Result<(), NdSockError>),
}

/// One operation exported to the embedding layer.
pub struct ExportedOp {
    pub name: &'static str,
    pub invoke: OpInvoke,
}

/// The configuration operations this crate exports.
pub fn exported_ops() -> Vec<ExportedOp> {
    vec![
        ExportedOp {
            name: "setup_na_socket",
            invoke: OpInvoke::Fd(sys::configure_na_socket),
        },
        ExportedOp {
            name: "setup_ns_socket",
            invoke: OpInvoke::Fd(sys::configure_ns_socket),
        },
        ExportedOp {
            name: "setup_rs_socket",
            invoke: OpInvoke::FdIfIndex(sys::configure_rs_socket),
        },
    ]
}
