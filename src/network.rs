// Local IP discovery for the dashboard header

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Local address the kernel would route `probe` from.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
pub fn local_ip_address(probe: SocketAddr) -> Option<IpAddr> {
    let bind: SocketAddr = match probe {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (std::net::Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = match UdpSocket::bind(bind) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(error = %e, operation = "local_ip_address", "bind failed");
            return None;
        }
    };
    if let Err(e) = socket.connect(probe) {
        tracing::debug!(error = %e, operation = "local_ip_address", "no route");
        return None;
    }
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified()).then_some(ip)
}
