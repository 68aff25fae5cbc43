//! Hostnames and display URLs.
//!
//! # Responsibilities
//! - Substitute loopback for wildcard bind hosts
//! - Detect the machine's LAN-reachable address
//! - Prepare the URLs shown in the startup banner
//!
//! # Design Decisions
//! - PreparedUrls are display-only; no routing decision reads them
//! - LAN detection connects a UDP socket (no packets are sent) and reads
//!   the chosen source address

use std::net::{IpAddr, UdpSocket};

/// URLs the running server is reachable at, for the startup banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUrls {
    pub local_url: String,
    pub lan_url: Option<String>,
}

/// Hostname to key certificates and the local URL by.
///
/// Wildcard bind addresses are reachable via loopback, so that is what the
/// operator gets pointed at.
pub fn effective_hostname(host: &str) -> &str {
    if is_wildcard(host) {
        "localhost"
    } else {
        host
    }
}

pub fn is_wildcard(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

fn is_loopback(host: &str) -> bool {
    if matches!(host, "localhost") {
        return true;
    }
    host.parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}

/// Compute the banner URLs from the final bound protocol/host/port.
///
/// The LAN URL is only offered when the bind host is actually routable from
/// the local network: a wildcard bind, or an explicit non-loopback host.
pub fn prepare_urls(scheme: &str, host: &str, port: u16) -> PreparedUrls {
    let local_url = format!("{scheme}://{}:{port}/", effective_hostname(host));

    let lan_url = if is_wildcard(host) {
        lan_ip().map(|ip| format!("{scheme}://{ip}:{port}/"))
    } else if !is_loopback(host) {
        Some(format!("{scheme}://{host}:{port}/"))
    } else {
        None
    };

    PreparedUrls { local_url, lan_url }
}

/// Source address the OS would use to reach the local network.
fn lan_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    // connect() only selects a route; nothing is transmitted.
    socket.connect(("192.0.2.1", 80)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    if ip.is_loopback() || ip.is_unspecified() {
        None
    } else {
        Some(ip)
    }
}
