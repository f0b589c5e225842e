use std::net::{IpAddr, UdpSocket};

use qrcode::render::unicode;
use qrcode::types::QrError;
use qrcode::QrCode;
use tracing::info;

/// Routable LAN address of this host. Connecting a UDP socket to a public
/// resolver picks the outbound interface without sending any packets.
pub fn lan_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

pub fn terminal_qr(url: &str) -> Result<String, QrError> {
    let code = QrCode::new(url.as_bytes())?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// Prints the survey URL and a scannable QR code once the server is up.
/// Participants usually join from their phones, hence the QR.
pub fn print_access_banner(port: u16) {
    let Some(ip) = lan_address() else {
        info!("could not determine LAN address; listening on all interfaces, port {port}");
        return;
    };

    let url = format!("http://{ip}:{port}");
    println!("\nAccess the survey at: {url}");
    match terminal_qr(&url) {
        Ok(qr) => println!("Or scan the QR code below with your phone:\n\n{qr}"),
        Err(e) => info!("could not render QR code: {e}"),
    }
}
