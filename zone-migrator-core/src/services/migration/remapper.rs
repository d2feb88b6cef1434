//! Address-bearing record remapping

use zone_migrator_provider::{Instance, ZoneRecord};

use super::address_index::locate;

/// Rewrite an address record so it points at the corresponding address of `destination`.
///
/// The source address is located among `source_instances`; the result takes the address at
/// the same position of the same family on `destination`, clamped to its last address.
/// Non-address records, unknown addresses and destinations without a public address of that
/// family are returned unchanged.
pub fn remap(record: &ZoneRecord, source_instances: &[Instance], destination: &Instance) -> ZoneRecord {
    if !record.is_address() {
        return record.clone();
    }
    let Some(found) = locate(&record.data, source_instances) else {
        return record.clone();
    };

    let candidates = destination.public_addresses(found.family);
    let Some(last) = candidates.len().checked_sub(1) else {
        return record.clone();
    };

    let mut remapped = record.clone();
    remapped.data = candidates[found.position.min(last)].to_string();
    remapped
}

/// The working record set for a destination: every non-`NS` record, remapped.
///
/// Without a destination the records pass through unchanged.
pub fn derive_working_records(
    original_records: &[ZoneRecord],
    source_instances: &[Instance],
    destination: Option<&Instance>,
) -> Vec<ZoneRecord> {
    original_records
        .iter()
        .filter(|r| !r.is_delegation())
        .map(|r| match destination {
            Some(dest) => remap(r, source_instances, dest),
            None => r.clone(),
        })
        .collect()
}

/// Instance selected when the user has not picked one.
///
/// The first destination instance that already serves one of the zone's address records wins;
/// otherwise the first instance. `None` only for an empty list.
pub fn default_destination_instance<'a>(
    destination_instances: &'a [Instance],
    original_records: &[ZoneRecord],
) -> Option<&'a Instance> {
    destination_instances
        .iter()
        .find(|instance| {
            original_records
                .iter()
                .filter(|r| r.is_address())
                .any(|r| instance.has_public_address(&r.data))
        })
        .or_else(|| destination_instances.first())
}
