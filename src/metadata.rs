//! Static contract and coin properties, indexed by id.
//!
//! The exchange publishes metadata as two lists. They are turned into maps once, when the
//! [`Metadata`] is constructed, so order construction never scans.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::{Entity, Error};
use crate::order::AssetResolution;

/// Perpetual contract as listed in the exchange metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_id: String,
    #[serde(default)]
    pub contract_name: String,
    #[serde(default)]
    pub base_coin_id: String,
    pub quote_coin_id: String,
    #[serde(default)]
    pub tick_size: String,
    #[serde(default)]
    pub step_size: String,
    /// Empty when the contract does not override the account-level default.
    #[serde(default)]
    pub default_taker_fee_rate: String,
    #[serde(default)]
    pub default_maker_fee_rate: String,
    pub stark_ex_synthetic_asset_id: String,
    pub stark_ex_resolution: String,
}

impl Contract {
    pub fn synthetic_resolution(&self) -> Result<AssetResolution> {
        AssetResolution::parse(&self.stark_ex_synthetic_asset_id, &self.stark_ex_resolution)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_id: String,
    #[serde(default)]
    pub coin_name: String,
    #[serde(default)]
    pub step_size: String,
    pub stark_ex_asset_id: String,
    pub stark_ex_resolution: String,
}

impl Coin {
    pub fn resolution(&self) -> Result<AssetResolution> {
        AssetResolution::parse(&self.stark_ex_asset_id, &self.stark_ex_resolution)
    }
}

/// Wire shape of the metadata endpoint's `data` field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataLists {
    #[serde(default)]
    contract_list: Vec<Contract>,
    #[serde(default)]
    coin_list: Vec<Coin>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "MetadataLists")]
pub struct Metadata {
    contracts: HashMap<String, Contract>,
    coins: HashMap<String, Coin>,
}

impl From<MetadataLists> for Metadata {
    fn from(lists: MetadataLists) -> Self {
        Self::new(lists.contract_list, lists.coin_list)
    }
}

impl Metadata {
    /// Indexes contracts and coins by id. A later duplicate id replaces an earlier one.
    pub fn new<C, K>(contracts: C, coins: K) -> Self
    where
        C: IntoIterator<Item = Contract>,
        K: IntoIterator<Item = Coin>,
    {
        Self {
            contracts: contracts
                .into_iter()
                .map(|c| (c.contract_id.clone(), c))
                .collect(),
            coins: coins.into_iter().map(|c| (c.coin_id.clone(), c)).collect(),
        }
    }

    pub fn contract(&self, contract_id: &str) -> Result<&Contract> {
        self.contracts
            .get(contract_id)
            .ok_or_else(|| Error::not_found(Entity::Contract, contract_id))
    }

    pub fn coin(&self, coin_id: &str) -> Result<&Coin> {
        self.coins
            .get(coin_id)
            .ok_or_else(|| Error::not_found(Entity::Coin, coin_id))
    }

    /// Resolves a contract together with the coin it is quoted in.
    pub fn contract_with_quote_coin(&self, contract_id: &str) -> Result<(&Contract, &Coin)> {
        let contract = self.contract(contract_id)?;
        let quote_coin = self.coin(&contract.quote_coin_id)?;
        Ok((contract, quote_coin))
    }

    #[must_use]
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values()
    }

    #[must_use]
    pub fn coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.values()
    }
}
