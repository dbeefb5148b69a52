//! Static chain-id lookup and the one network the registrar supports.
//!
//! The contract is deployed on Polygon Mumbai only; everything else is shown
//! by name (when known) purely so the wrong-network prompt can say where the
//! wallet currently points.

use nc_api_types::{ChainHex, ChainParams, NativeCurrency};

/// Chain id the registrar contract lives on, in provider hex form.
pub const REQUIRED_CHAIN_HEX: &str = "0x13881";

/// Display name of the required network.
pub const REQUIRED_NETWORK_NAME: &str = "Polygon Mumbai Testnet";

/// Chain-id → display-name table for the networks users commonly land on.
const NETWORKS: &[(&str, &str)] = &[
    ("0x1", "Mainnet"),
    ("0x3", "Ropsten"),
    ("0x4", "Rinkeby"),
    ("0x5", "Goerli"),
    ("0x2a", "Kovan"),
    ("0x38", "BSC Mainnet"),
    ("0x61", "BSC Testnet"),
    ("0x89", "Polygon Mainnet"),
    ("0x13881", REQUIRED_NETWORK_NAME),
    ("0xa86a", "AVAX Mainnet"),
];

pub fn required_chain() -> ChainHex {
    ChainHex(REQUIRED_CHAIN_HEX.to_owned())
}

/// Display name for a chain id, `None` for networks not in the table.
pub fn network_name(chain: &ChainHex) -> Option<&'static str> {
    NETWORKS
        .iter()
        .find(|(id, _)| *id == chain.0)
        .map(|(_, name)| *name)
}

/// Connection parameters handed to `wallet_addEthereumChain` when the wallet
/// does not know the required chain yet.
pub fn required_chain_params() -> ChainParams {
    ChainParams {
        chain_id: required_chain(),
        chain_name: REQUIRED_NETWORK_NAME.to_owned(),
        rpc_urls: vec!["https://rpc-mumbai.maticvigil.com".to_owned()],
        native_currency: NativeCurrency {
            name: "Mumbai Matic".to_owned(),
            symbol: "MATIC".to_owned(),
            decimals: 18,
        },
        block_explorer_urls: vec!["https://mumbai.polygonscan.com/".to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_chain_maps_to_its_display_name() {
        assert_eq!(
            network_name(&required_chain()),
            Some(REQUIRED_NETWORK_NAME)
        );
    }

    #[test]
    fn unknown_chains_have_no_name() {
        assert_eq!(network_name(&ChainHex("0xdead".into())), None);
    }

    #[test]
    fn add_chain_parameters_are_complete() {
        let params = required_chain_params();
        assert_eq!(params.chain_id.0, REQUIRED_CHAIN_HEX);
        assert_eq!(params.chain_name, REQUIRED_NETWORK_NAME);
        assert_eq!(params.native_currency.decimals, 18);
        assert!(!params.rpc_urls.is_empty());
        assert!(!params.block_explorer_urls.is_empty());
    }
}
