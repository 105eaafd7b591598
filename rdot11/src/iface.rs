//! Collaborator seams for putting frames on the air.
//!
//! Frame values are transport-agnostic; the crate never opens sockets
//! itself. Callers plug in an interface resolver and a frame sender, which
//! in production wrap the platform's raw-socket machinery and in tests are
//! in-memory fakes.

use crate::error::{Dot11Error, Result};
use crate::pdu::Pdu;

/// Maps interface names to the index the transport layer wants.
pub trait IfaceResolver {
    /// Resolve `name` to an interface index, or
    /// [`Dot11Error::InterfaceNotFound`] when no such interface exists.
    fn resolve(&self, name: &str) -> Result<u32>;
}

/// Hands a serialized frame to the transport.
pub trait FrameSender {
    /// Send `buf` out of the interface with the given index. Returns
    /// whether the transport accepted the frame.
    fn send(&mut self, buf: &[u8], iface_index: u32) -> bool;
}

/// Serialize `pdu` and send it out of the named interface.
///
/// Resolution failure is an error; a transport that declines the frame is
/// reported through the returned flag, matching [`FrameSender::send`].
pub fn send_pdu<R, S>(pdu: &dyn Pdu, resolver: &R, sender: &mut S, iface: &str) -> Result<bool>
where
    R: IfaceResolver + ?Sized,
    S: FrameSender + ?Sized,
{
    let index = resolver.resolve(iface)?;
    Ok(sender.send(&pdu.to_vec(), index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::MacAddr;
    use crate::control::Ack;
    use std::collections::HashMap;

    struct MapResolver(HashMap<String, u32>);

    impl IfaceResolver for MapResolver {
        fn resolve(&self, name: &str) -> Result<u32> {
            self.0
                .get(name)
                .copied()
                .ok_or_else(|| Dot11Error::InterfaceNotFound {
                    name: name.to_owned(),
                })
        }
    }

    #[derive(Default)]
    struct RecordingSender {
        sent: Vec<(Vec<u8>, u32)>,
    }

    impl FrameSender for RecordingSender {
        fn send(&mut self, buf: &[u8], iface_index: u32) -> bool {
            self.sent.push((buf.to_vec(), iface_index));
            true
        }
    }

    #[test]
    fn send_resolves_then_serializes() {
        let resolver = MapResolver(HashMap::from([("wlan0".to_owned(), 3)]));
        let mut sender = RecordingSender::default();
        let ack = Ack::new(MacAddr::BROADCAST);

        assert_eq!(send_pdu(&ack, &resolver, &mut sender, "wlan0"), Ok(true));
        assert_eq!(sender.sent.len(), 1);
        assert_eq!(sender.sent[0].0, ack.to_vec());
        assert_eq!(sender.sent[0].1, 3);
    }

    #[test]
    fn unknown_interface_is_an_error_before_sending() {
        let resolver = MapResolver(HashMap::new());
        let mut sender = RecordingSender::default();
        let ack = Ack::new(MacAddr::BROADCAST);

        assert_eq!(
            send_pdu(&ack, &resolver, &mut sender, "wlan9"),
            Err(Dot11Error::InterfaceNotFound {
                name: "wlan9".to_owned()
            })
        );
        assert!(sender.sent.is_empty());
    }
}
