//! Startup announcement: LAN address discovery and the terminal QR code

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use qrcode::render::unicode;
use qrcode::types::QrError;
use qrcode::QrCode;

/// Public address used to pick the outbound interface; nothing is sent to it
const ROUTE_LOOKUP_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 80);

/// Best-effort LAN IPv4 address of this host.
///
/// Falls back to `127.0.0.1` when there is no route or the address is not
/// usable. Hosts with several interfaces get whichever one routes to the
/// internet.
pub fn local_ip() -> IpAddr {
    match route_local_ip() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!(error = %e, "Local address lookup failed, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

/// Connect a UDP socket (no packet is sent) and read back the local address
/// the OS picked for the route.
fn route_local_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(ROUTE_LOOKUP_TARGET)?;
    let ip = socket.local_addr()?.ip();

    match ip {
        IpAddr::V4(v4) if !v4.is_unspecified() => Ok(ip),
        _ => Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("unusable local address {}", ip),
        )),
    }
}

/// URL shown to the user, e.g. `http://192.168.1.20:8000`
pub fn display_url(ip: IpAddr, port: u16) -> String {
    format!("http://{}", SocketAddr::new(ip, port))
}

/// Render `data` as a QR code made of unicode half blocks.
///
/// Colors are inverted (light modules on a dark background) so the code
/// scans on the usual dark terminal.
pub fn render_qr(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes())?;

    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

/// Print the URL and, if enabled, its QR code to stdout
pub fn announce(url: &str, show_qr: bool) {
    tracing::info!(url = %url, "QuickShare server starting");

    println!();
    println!("QuickShare Server");
    println!("URL: {}", url);

    if !show_qr {
        println!();
        return;
    }

    match render_qr(url) {
        Ok(qr) => {
            println!();
            println!("Scan this QR code with your phone:");
            println!("{}", qr);
        }
        Err(e) => tracing::warn!(error = %e, "Could not generate QR code"),
    }
}
