//! Machine id resolution for the flake generator.
//!
//! An explicit id wins. Otherwise the lower 16 bits of the host's private
//! IPv4 address become the id, which keeps ids distinct across hosts in one
//! private network without coordination.

use std::io;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Failures while deriving a machine id from the host address.
#[derive(Debug, thiserror::Error)]
pub enum MachineIdError {
    #[error("failed to discover the local address: {0}")]
    Discover(#[source] io::Error),
    #[error("local address {address} is not a private IPv4 address")]
    NotPrivate { address: IpAddr },
}

/// Return `explicit` or derive an id from the outbound IPv4 address.
///
/// # Errors
/// [`MachineIdError`] when no explicit id is given and no private IPv4
/// address is available.
pub fn resolve_machine_id(explicit: Option<u16>) -> Result<u16, MachineIdError> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    machine_id_from_ip(outbound_ip().map_err(MachineIdError::Discover)?)
}

/// Lower 16 bits of a private IPv4 address.
///
/// # Examples
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
///
/// use product_backend::outbound::id::machine_id_from_ip;
///
/// let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 1, 2));
/// assert_eq!(machine_id_from_ip(ip).expect("private"), 0x0102);
/// ```
///
/// # Errors
/// [`MachineIdError::NotPrivate`] for public or IPv6 addresses.
pub fn machine_id_from_ip(address: IpAddr) -> Result<u16, MachineIdError> {
    match address {
        IpAddr::V4(v4) if is_private_ipv4(v4) => {
            let [_, _, high, low] = v4.octets();
            Ok(u16::from_be_bytes([high, low]))
        }
        _ => Err(MachineIdError::NotPrivate { address }),
    }
}

/// RFC 1918 ranges plus the 100.64/10 shared address space.
fn is_private_ipv4(address: Ipv4Addr) -> bool {
    let [first, second, _, _] = address.octets();
    address.is_private() || (first == 100 && (second & 0xC0) == 64)
}

/// Address the kernel would use for outbound traffic.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
fn outbound_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9))?;
    Ok(socket.local_addr()?.ip())
}
