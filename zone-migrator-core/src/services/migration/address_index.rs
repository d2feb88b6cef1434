//! Address lookup over instance network interfaces

use zone_migrator_provider::{AddressFamily, Instance};

use crate::types::AddressMatch;

/// Find the instance whose public interfaces contain `address`.
///
/// Instances are searched in the given order. Within an instance the public v4 list is
/// searched before the public v6 list; `position` is the index within that filtered list.
/// Matching is exact string equality.
pub fn locate(address: &str, instances: &[Instance]) -> Option<AddressMatch> {
    instances
        .iter()
        .enumerate()
        .find_map(|(instance_index, instance)| {
            AddressFamily::SEARCH_ORDER.iter().find_map(|&family| {
                instance
                    .public_addresses(family)
                    .iter()
                    .position(|candidate| *candidate == address)
                    .map(|position| AddressMatch {
                        instance_index,
                        family,
                        position,
                    })
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::instance;
    use zone_migrator_provider::{NetworkInterface, NetworkSet};

    #[test]
    fn every_public_v4_address_is_located_at_its_position() {
        let instances = vec![
            instance(1, "web-1", &["203.0.113.1", "203.0.113.2"], &["2001:db8::1"]),
            instance(2, "web-2", &["198.51.100.1", "198.51.100.2", "198.51.100.3"], &[]),
        ];

        for (i, inst) in instances.iter().enumerate() {
            for (p, address) in inst.public_addresses(AddressFamily::V4).iter().enumerate() {
                assert_eq!(
                    locate(address, &instances),
                    Some(AddressMatch {
                        instance_index: i,
                        family: AddressFamily::V4,
                        position: p,
                    })
                );
            }
        }
    }

    #[test]
    fn v6_is_searched_after_v4() {
        let instances = vec![instance(1, "web-1", &["203.0.113.1"], &["2001:db8::1", "2001:db8::2"])];
        assert_eq!(
            locate("2001:db8::2", &instances),
            Some(AddressMatch {
                instance_index: 0,
                family: AddressFamily::V6,
                position: 1,
            })
        );
    }

    #[test]
    fn position_counts_public_interfaces_only() {
        let instances = vec![Instance {
            id: 7,
            name: "mixed".to_string(),
            networks: NetworkSet {
                v4: vec![
                    NetworkInterface::private("10.0.0.1"),
                    NetworkInterface::public("203.0.113.1"),
                    NetworkInterface::private("10.0.0.2"),
                    NetworkInterface::public("203.0.113.2"),
                ],
                v6: vec![],
            },
        }];
        assert_eq!(locate("203.0.113.2", &instances).map(|m| m.position), Some(1));
    }

    #[test]
    fn private_addresses_are_not_found() {
        let instances = vec![Instance {
            id: 7,
            name: "private-only".to_string(),
            networks: NetworkSet {
                v4: vec![NetworkInterface::private("10.0.0.1")],
                v6: vec![],
            },
        }];
        assert_eq!(locate("10.0.0.1", &instances), None);
    }

    #[test]
    fn first_instance_in_list_order_wins() {
        let instances = vec![
            instance(1, "a", &["198.51.100.9"], &[]),
            instance(2, "b", &["203.0.113.5", "198.51.100.9"], &[]),
        ];
        assert_eq!(
            locate("198.51.100.9", &instances).map(|m| (m.instance_index, m.position)),
            Some((0, 0))
        );
    }

    #[test]
    fn unknown_address_and_empty_list() {
        let instances = vec![instance(1, "a", &["203.0.113.1"], &[])];
        assert_eq!(locate("192.0.2.1", &instances), None);
        assert_eq!(locate("203.0.113.1", &[]), None);
    }
}
