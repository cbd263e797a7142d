//! Adapter resolution by netmask range.
//!
//! The match rule is deliberately coarse: a candidate belongs to an interface
//! when it lies in the 255 values ending at the entry's netmask integer,
//! `netmask - 255 < candidate <= netmask`. This is not a bitwise subnet test.
//! Stored adapter names depend on this rule.

use std::net::IpAddr;

use super::interface::NetworkInterface;
use crate::device::AdapterName;

/// IPv4 integer form of a candidate address, if it has one.
///
/// IPv4-mapped IPv6 addresses are unwrapped. Zero counts as "no address".
pub fn candidate_ipv4(candidate: IpAddr) -> Option<u32> {
    let value = match candidate {
        IpAddr::V4(v4) => u32::from(v4),
        IpAddr::V6(v6) => u32::from(v6.to_ipv4_mapped()?),
    };

    (value > 0).then_some(value)
}

/// Find the first interface entry whose netmask range covers `candidate`.
///
/// Returns `None` without scanning when the candidate has no IPv4 form.
pub fn resolve_adapter(candidate: IpAddr, interfaces: &[NetworkInterface]) -> Option<AdapterName> {
    let address = candidate_ipv4(candidate)?;

    for interface in interfaces {
        for entry in &interface.entries {
            let netmask = entry.netmask_bits();
            if netmask == 0 {
                continue;
            }

            if netmask.wrapping_sub(255) < address && address <= netmask {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    interface = %interface.name,
                    netmask,
                    address,
                    "candidate address within interface range"
                );
                return Some(AdapterName::new(interface.name.clone()));
            }
        }
    }

    None
}

/// Format an IPv4 integer as a dotted string.
///
/// With `parent_only` the last octet is left out, e.g. `192.168.1`.
pub fn inet4_address(address: u32, parent_only: bool) -> String {
    let prefix = format!(
        "{}.{}.{}",
        address >> 24 & 0xff,
        address >> 16 & 0xff,
        address >> 8 & 0xff
    );

    if parent_only {
        prefix
    } else {
        format!("{}.{}", prefix, address & 0xff)
    }
}

/// The first three octets of an address, used to group peers by network.
pub fn inet4_network_prefix(candidate: IpAddr) -> Option<String> {
    candidate_ipv4(candidate).map(|address| inet4_address(address, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::AddressEntry;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn interface_with_mask(name: &str, netmask: u32) -> NetworkInterface {
        NetworkInterface::new(
            name,
            vec![AddressEntry::ipv4(
                Ipv4Addr::new(192, 168, 1, 10),
                Ipv4Addr::from(netmask),
            )],
        )
    }

    fn v4(value: u32) -> IpAddr {
        IpAddr::V4(Ipv4Addr::from(value))
    }

    #[test]
    fn candidate_within_range_resolves_to_interface() {
        let interfaces = vec![interface_with_mask("eth0", 3_232_235_776)];

        let name = resolve_adapter(v4(3_232_235_600), &interfaces);

        assert_eq!(name, Some(AdapterName::new("eth0")));
    }

    #[test]
    fn range_bounds_are_exclusive_below_and_inclusive_above() {
        let netmask = 3_232_235_776;
        let interfaces = vec![interface_with_mask("eth0", netmask)];

        assert!(resolve_adapter(v4(netmask), &interfaces).is_some());
        assert!(resolve_adapter(v4(netmask - 254), &interfaces).is_some());
        assert!(resolve_adapter(v4(netmask - 255), &interfaces).is_none());
        assert!(resolve_adapter(v4(netmask + 1), &interfaces).is_none());
    }

    #[test]
    fn every_address_in_range_matches() {
        let netmask = u32::from(Ipv4Addr::new(255, 255, 255, 0));
        let interfaces = vec![interface_with_mask("wlan0", netmask)];

        for address in (netmask - 254)..=netmask {
            assert_eq!(
                resolve_adapter(v4(address), &interfaces),
                Some(AdapterName::new("wlan0")),
                "address {address} should resolve"
            );
        }
    }

    #[test]
    fn first_matching_interface_wins() {
        let interfaces = vec![
            interface_with_mask("eth0", 3_232_235_776),
            interface_with_mask("eth1", 3_232_235_776),
        ];

        let name = resolve_adapter(v4(3_232_235_700), &interfaces);

        assert_eq!(name, Some(AdapterName::new("eth0")));
    }

    #[test]
    fn entries_without_netmask_are_skipped() {
        let interfaces = vec![
            NetworkInterface::new(
                "lo6",
                vec![AddressEntry {
                    address: IpAddr::V6(Ipv6Addr::LOCALHOST),
                    netmask: None,
                }],
            ),
            interface_with_mask("eth0", 3_232_235_776),
        ];

        assert_eq!(
            resolve_adapter(v4(3_232_235_700), &interfaces),
            Some(AdapterName::new("eth0"))
        );
    }

    #[test]
    fn small_netmask_never_matches() {
        // 100 - 255 wraps around to a value above any candidate.
        let interfaces = vec![interface_with_mask("odd0", 100)];
        assert!(resolve_adapter(v4(50), &interfaces).is_none());
    }

    #[test]
    fn unmatched_address_is_not_found() {
        let interfaces = vec![interface_with_mask("eth0", 3_232_235_776)];
        assert!(resolve_adapter(v4(167_772_161), &interfaces).is_none());
        assert!(resolve_adapter(v4(1), &[]).is_none());
    }

    #[test]
    fn address_without_ipv4_form_is_not_found() {
        let interfaces = vec![interface_with_mask("eth0", u32::MAX)];
        assert!(resolve_adapter(IpAddr::V4(Ipv4Addr::UNSPECIFIED), &interfaces).is_none());
        assert!(resolve_adapter(IpAddr::V6(Ipv6Addr::LOCALHOST), &interfaces).is_none());
    }

    #[test]
    fn mapped_ipv6_candidate_is_resolved() {
        let netmask = 3_232_235_776;
        let interfaces = vec![interface_with_mask("eth0", netmask)];
        let mapped = Ipv4Addr::from(netmask - 10).to_ipv6_mapped();

        assert_eq!(
            resolve_adapter(IpAddr::V6(mapped), &interfaces),
            Some(AdapterName::new("eth0"))
        );
    }

    #[test]
    fn inet4_formatting() {
        let address = u32::from(Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(inet4_address(address, false), "192.168.1.42");
        assert_eq!(inet4_address(address, true), "192.168.1");
        assert_eq!(
            inet4_network_prefix(IpAddr::V4(Ipv4Addr::new(10, 0, 3, 9))),
            Some("10.0.3".to_string())
        );
        assert_eq!(inet4_network_prefix(IpAddr::V6(Ipv6Addr::LOCALHOST)), None);
    }
}
