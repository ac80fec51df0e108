//! Serial port discovery
//!
//! The sensor sits behind a USB-serial adapter whose port name changes
//! between machines and replugs; the adapter's description does not.

use tokio_serial::{SerialPortInfo, SerialPortType};

use super::traits::PortCandidate;

/// Describe an enumerated port the way the OS device manager does:
/// `"{product} ({port})"` for USB adapters
pub fn candidate_from_info(info: &SerialPortInfo) -> PortCandidate {
    let description = match &info.port_type {
        SerialPortType::UsbPort(usb) => {
            let label = match (usb.product.as_deref(), usb.manufacturer.as_deref()) {
                (Some(product), Some(manufacturer)) if !product.contains(manufacturer) => {
                    format!("{} - {}", product, manufacturer)
                },
                (Some(product), _) => product.to_string(),
                (None, Some(manufacturer)) => manufacturer.to_string(),
                (None, None) => format!("USB {:04x}:{:04x}", usb.vid, usb.pid),
            };
            format!("{} ({})", label, info.port_name)
        },
        SerialPortType::PciPort => format!("PCI serial port ({})", info.port_name),
        SerialPortType::BluetoothPort => format!("Bluetooth serial port ({})", info.port_name),
        SerialPortType::Unknown => "n/a".to_string(),
    };

    PortCandidate::new(info.port_name.clone(), description)
}

/// First candidate whose description or name contains `attribute`
///
/// Case-sensitive substring match. An empty attribute matches nothing, so an
/// unset search falls through to the last-known port.
pub fn select_port<'a>(
    candidates: &'a [PortCandidate],
    attribute: &str,
) -> Option<&'a PortCandidate> {
    if attribute.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|candidate| {
            candidate.description.contains(attribute) || candidate.name.contains(attribute)
        })
}
