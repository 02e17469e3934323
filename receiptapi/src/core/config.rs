use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Port the service listens on.
pub const PORT: u16 = 8090;

/// Runtime configuration of the receipts service.
///
/// The listen address is fixed at `0.0.0.0:8090`; nothing is read from the
/// environment or from disk.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, PORT)),
        }
    }
}
