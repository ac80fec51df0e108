//! Transport Layer
//!
//! Physical link to the sensor: the [`Link`] trait, the serial port
//! implementation, port discovery and a scripted mock.

pub mod discovery;
pub mod mock;
pub mod serial;
pub mod traits;

pub use discovery::{candidate_from_info, select_port};
pub use mock::{MockLink, MockRead};
pub use serial::{SerialLink, SerialLinkConfig};
pub use traits::{Link, LinkError, PortCandidate};
