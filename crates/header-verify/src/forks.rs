// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use tracing::warn;

/// The ordered set of header fields in force during a hardfork era.
///
/// Later sets strictly extend earlier ones, so ordering the variants by era
/// lets the encoder append fork fields with simple comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldSet {
    /// The 15 original fields, through the proof-of-work era.
    Legacy,
    /// Adds `baseFeePerGas` (EIP-1559).
    London,
    /// Adds `withdrawalsRoot` (EIP-4895).
    Shanghai,
    /// Adds `blobGasUsed`, `excessBlobGas`, `parentBeaconBlockRoot`
    /// (EIP-4844, EIP-4788).
    Cancun,
    /// Adds `requestsHash` (EIP-7685).
    Prague,
}

impl FieldSet {
    /// Number of RLP items a header of this era encodes to.
    pub fn field_count(&self) -> usize {
        match self {
            FieldSet::Legacy => 15,
            FieldSet::London => 16,
            FieldSet::Shanghai => 17,
            FieldSet::Cancun => 20,
            FieldSet::Prague => 21,
        }
    }
}

/// One chain's hardfork activations, as an explicit ordered table.
#[derive(Debug, Clone, Copy)]
pub struct ForkSchedule {
    /// Chain id the schedule belongs to.
    pub chain_id: u64,
    /// `(first block of the era, field set)`, ascending by block number.
    pub activations: &'static [(u64, FieldSet)],
}

/// Mainnet activations by first block of each era.
const MAINNET: ForkSchedule = ForkSchedule {
    chain_id: 1,
    activations: &[
        (0, FieldSet::Legacy),
        (12_965_000, FieldSet::London),
        (17_034_870, FieldSet::Shanghai),
        (19_426_587, FieldSet::Cancun),
        (22_431_084, FieldSet::Prague),
    ],
};

/// Sepolia launched with London active at genesis.
const SEPOLIA: ForkSchedule = ForkSchedule {
    chain_id: 11_155_111,
    activations: &[
        (0, FieldSet::London),
        (2_990_908, FieldSet::Shanghai),
        (5_187_023, FieldSet::Cancun),
    ],
};

/// Holesky launched with Shanghai active at genesis.
const HOLESKY: ForkSchedule = ForkSchedule {
    chain_id: 17_000,
    activations: &[(0, FieldSet::Shanghai), (894_735, FieldSet::Cancun)],
};

// TODO: add the testnet Prague activation blocks once pinned.

/// Every chain this crate ships a schedule for.
pub const SCHEDULES: &[ForkSchedule] = &[MAINNET, SEPOLIA, HOLESKY];

impl ForkSchedule {
    /// Look up the schedule for a chain id.
    ///
    /// Unknown chains fall back to the mainnet schedule. A wrong schedule
    /// cannot validate a wrong header, because verification still ends in a
    /// hash comparison; the fallback only risks rejecting a good header on a
    /// chain we do not know, and the log line says so.
    pub fn for_chain(chain_id: u64) -> ForkSchedule {
        match SCHEDULES.iter().find(|s| s.chain_id == chain_id) {
            Some(schedule) => *schedule,
            None => {
                warn!(chain_id, "unknown chain id, assuming the mainnet fork schedule");
                MAINNET
            }
        }
    }

    /// The field set in force at `block_number` on this chain.
    pub fn field_set_at(&self, block_number: u64) -> FieldSet {
        self.activations
            .iter()
            .rev()
            .find(|(activation, _)| *activation <= block_number)
            .map(|(_, field_set)| *field_set)
            .unwrap_or(FieldSet::Legacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_era_boundaries() {
        let schedule = ForkSchedule::for_chain(1);
        assert_eq!(schedule.field_set_at(0), FieldSet::Legacy);
        assert_eq!(schedule.field_set_at(12_964_999), FieldSet::Legacy);
        assert_eq!(schedule.field_set_at(12_965_000), FieldSet::London);
        assert_eq!(schedule.field_set_at(17_034_869), FieldSet::London);
        assert_eq!(schedule.field_set_at(17_034_870), FieldSet::Shanghai);
        assert_eq!(schedule.field_set_at(19_426_586), FieldSet::Shanghai);
        assert_eq!(schedule.field_set_at(19_426_587), FieldSet::Cancun);
        assert_eq!(schedule.field_set_at(22_431_083), FieldSet::Cancun);
        assert_eq!(schedule.field_set_at(22_431_084), FieldSet::Prague);
    }

    #[test]
    fn test_testnets_skip_early_eras() {
        let sepolia = ForkSchedule::for_chain(11_155_111);
        assert_eq!(sepolia.field_set_at(0), FieldSet::London);
        assert_eq!(sepolia.field_set_at(2_990_908), FieldSet::Shanghai);
        assert_eq!(sepolia.field_set_at(5_187_023), FieldSet::Cancun);

        let holesky = ForkSchedule::for_chain(17_000);
        assert_eq!(holesky.field_set_at(0), FieldSet::Shanghai);
        assert_eq!(holesky.field_set_at(894_735), FieldSet::Cancun);
    }

    #[test]
    fn test_unknown_chain_uses_mainnet_rules() {
        let schedule = ForkSchedule::for_chain(424_242);
        assert_eq!(schedule.chain_id, 1);
        assert_eq!(schedule.field_set_at(19_426_587), FieldSet::Cancun);
    }

    #[test]
    fn test_field_counts_grow_with_eras() {
        assert_eq!(FieldSet::Legacy.field_count(), 15);
        assert_eq!(FieldSet::London.field_count(), 16);
        assert_eq!(FieldSet::Shanghai.field_count(), 17);
        assert_eq!(FieldSet::Cancun.field_count(), 20);
        assert_eq!(FieldSet::Prague.field_count(), 21);
        assert!(FieldSet::Legacy < FieldSet::Prague);
    }
}
