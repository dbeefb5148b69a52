//! Registration fee tiers.
//!
//! The contract charges by name length: the scarcer the name, the higher the
//! fee. The tier constants mirror the contract's pricing and are denominated
//! in wei of the network's native currency (MATIC on Mumbai).

use alloy_primitives::U256;

/// Shortest name the contract accepts, in characters.
pub const MIN_NAME_LEN: usize = 3;

const PREMIUM_FEE_WEI: u64 = 500_000_000_000_000_000; // 0.5 MATIC
const MID_FEE_WEI: u64 = 300_000_000_000_000_000; // 0.3 MATIC
const BASE_FEE_WEI: u64 = 100_000_000_000_000_000; // 0.1 MATIC

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeTier {
    /// Exactly 3 characters.
    Premium,
    /// Exactly 4 characters.
    Mid,
    /// 5 characters or more.
    Base,
}

impl FeeTier {
    /// Tier for a candidate name, or `None` when the name is under the
    /// minimum length. Length counts Unicode scalar values, not bytes.
    pub fn for_name(name: &str) -> Option<FeeTier> {
        match name.chars().count() {
            n if n < MIN_NAME_LEN => None,
            3 => Some(FeeTier::Premium),
            4 => Some(FeeTier::Mid),
            _ => Some(FeeTier::Base),
        }
    }

    /// Transaction value to attach to `register`.
    pub fn wei(self) -> U256 {
        let wei = match self {
            FeeTier::Premium => PREMIUM_FEE_WEI,
            FeeTier::Mid => MID_FEE_WEI,
            FeeTier::Base => BASE_FEE_WEI,
        };
        U256::from(wei)
    }

    /// Human-readable fee in whole-coin units, for logs and UI copy.
    pub fn display(self) -> &'static str {
        match self {
            FeeTier::Premium => "0.5",
            FeeTier::Mid => "0.3",
            FeeTier::Base => "0.1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_under_three_characters_have_no_tier() {
        assert_eq!(FeeTier::for_name(""), None);
        assert_eq!(FeeTier::for_name("a"), None);
        assert_eq!(FeeTier::for_name("ab"), None);
    }

    #[test]
    fn tier_follows_name_length() {
        assert_eq!(FeeTier::for_name("abc"), Some(FeeTier::Premium));
        assert_eq!(FeeTier::for_name("abcd"), Some(FeeTier::Mid));
        assert_eq!(FeeTier::for_name("abcde"), Some(FeeTier::Base));
        assert_eq!(FeeTier::for_name("a-much-longer-name"), Some(FeeTier::Base));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Three scalar values, nine bytes.
        assert_eq!(FeeTier::for_name("äöü"), Some(FeeTier::Premium));
    }

    #[test]
    fn fees_match_the_contract_pricing() {
        assert_eq!(
            FeeTier::Premium.wei(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(FeeTier::Mid.wei(), U256::from(300_000_000_000_000_000u64));
        assert_eq!(FeeTier::Base.wei(), U256::from(100_000_000_000_000_000u64));
        assert_eq!(FeeTier::Premium.display(), "0.5");
        assert_eq!(FeeTier::Mid.display(), "0.3");
        assert_eq!(FeeTier::Base.display(), "0.1");
    }
}
