//! Migration kind classification

use crate::types::{Account, MigrationKind, MigrationPlan};

/// Shown when a move needs to be confirmed.
pub const MOVE_CONFIRMATION_MESSAGE: &str = "moving the zone to the destination account";

/// Classify the current selections.
///
/// | destination name | account | result |
/// |---|---|---|
/// | empty | any | copy, not committable |
/// | differs from source zone | any | copy |
/// | equals source zone | same as source | change |
/// | equals source zone | different | move, committable once confirmed |
///
/// Accounts are compared with [`Account::same_identity`].
pub fn classify(
    source_account: &Account,
    source_zone: &str,
    destination_account: &Account,
    destination_zone_name: &str,
    confirmed: bool,
) -> MigrationPlan {
    if destination_zone_name.is_empty() {
        return MigrationPlan {
            kind: MigrationKind::Copy,
            committable: false,
            confirmation_required: false,
            confirmation_message: None,
        };
    }

    if destination_zone_name != source_zone {
        return MigrationPlan {
            kind: MigrationKind::Copy,
            committable: true,
            confirmation_required: false,
            confirmation_message: None,
        };
    }

    if destination_account.same_identity(source_account) {
        MigrationPlan {
            kind: MigrationKind::Change,
            committable: true,
            confirmation_required: false,
            confirmation_message: None,
        }
    } else {
        MigrationPlan {
            kind: MigrationKind::Move,
            committable: confirmed,
            confirmation_required: true,
            confirmation_message: Some(MOVE_CONFIRMATION_MESSAGE),
        }
    }
}
