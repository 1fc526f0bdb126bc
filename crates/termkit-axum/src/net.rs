//! Local network address discovery for share URLs.

use std::net::{IpAddr, UdpSocket};

/// Best-guess LAN address of this host.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}

/// URL other devices on the network can use, falling back to `localhost`.
pub fn network_url(port: u16) -> String {
    local_ip().map_or_else(
        || local_url(port),
        |ip| format!("http://{ip}:{port}"),
    )
}

pub fn local_url(port: u16) -> String {
    format!("http://localhost:{port}")
}
