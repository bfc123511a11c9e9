//! Working out the address a phone on the same network can reach us at.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use sb_core::config::ServerConfig;

/// Primary LAN address of this machine, or loopback if it cannot be found.
///
/// Connecting a UDP socket sends nothing; it only makes the OS pick the
/// outbound interface, whose address is then read back.
pub fn local_ip() -> IpAddr {
    match probe_local_ip() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!("Could not determine LAN address: {e}");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn probe_local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(("8.8.8.8", 80))?;
    Ok(socket.local_addr()?.ip())
}

/// Host to advertise: the configured public host, else the LAN address.
pub fn advertised_host(server: &ServerConfig) -> String {
    server
        .public_host
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| local_ip().to_string())
}

/// Upload page URL for `host:port`.
pub fn upload_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}/upload-page")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_host_wins() {
        let server = ServerConfig {
            public_host: Some(" phone.lan ".into()),
            ..ServerConfig::default()
        };
        assert_eq!(advertised_host(&server), "phone.lan");
    }

    #[test]
    fn blank_public_host_is_ignored() {
        let server = ServerConfig {
            public_host: Some("  ".into()),
            ..ServerConfig::default()
        };
        assert!(advertised_host(&server).parse::<IpAddr>().is_ok());
    }

    #[test]
    fn upload_url_format() {
        assert_eq!(
            upload_url("192.168.1.20", 5000),
            "http://192.168.1.20:5000/upload-page"
        );
    }
}
