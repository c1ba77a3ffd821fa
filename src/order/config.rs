use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::order::policy::OrderPolicies;
use crate::types::AccountId;

/// Raw signing values typically passed from app-level bot config.
#[derive(Clone, Debug)]
pub struct RawSigningConfig {
    pub account_id: String,
    pub stark_private_key: SecretString,
}

/// Order client bootstrap configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub host: Url,
    pub account_id: AccountId,
    pub stark_private_key: SecretString,
    pub policies: OrderPolicies,
}

impl ClientConfig {
    pub fn from_raw(host: &str, raw: RawSigningConfig, policies: OrderPolicies) -> Result<Self> {
        let host = Url::parse(host)?;
        let account_id = raw.account_id.trim().parse::<AccountId>().map_err(|e| {
            Error::validation(format!("invalid account id `{}`: {e}", raw.account_id))
        })?;

        Self::new(host, account_id, raw.stark_private_key, policies)
    }

    pub fn new(
        host: Url,
        account_id: AccountId,
        stark_private_key: SecretString,
        policies: OrderPolicies,
    ) -> Result<Self> {
        if host.cannot_be_a_base() {
            return Err(Error::validation(format!(
                "host `{host}` cannot be used as a base url"
            )));
        }
        if account_id == 0 {
            return Err(Error::validation("account id must not be zero"));
        }

        policies.validate()?;

        Ok(Self {
            host,
            account_id,
            stark_private_key,
            policies,
        })
    }
}
