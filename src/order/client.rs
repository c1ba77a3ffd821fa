use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::Result;
use crate::error::Error;
use crate::metadata::Metadata;
use crate::order::commitment::{OrderCommitment, build_order_commitment};
use crate::order::request::{CreateOrderRequest, OrderIntent, assemble_order_request};
use crate::order::types::{
    CancelOrderData, CancelOrderParams, CreateOrderData, MaxOrderSize, Order,
};
use crate::order::{ClientConfig, OrderPolicies};
use crate::response;
use crate::signer::{Signer, StarkSigner};
use crate::transport::{HttpTransport, Transport};
use crate::types::{AccountId, Decimal};

const CREATE_ORDER: &str = "/api/v1/private/order/createOrder";
const CANCEL_ORDER_BY_ID: &str = "/api/v1/private/order/cancelOrderById";
const CANCEL_ORDER_BY_CLIENT_ORDER_ID: &str = "/api/v1/private/order/cancelOrderByClientOrderId";
const CANCEL_ALL_ORDER: &str = "/api/v1/private/order/cancelAllOrder";
const GET_ORDER_BY_ID: &str = "/api/v1/private/order/getOrderById";
const GET_ORDER_BY_CLIENT_ORDER_ID: &str = "/api/v1/private/order/getOrderByClientOrderId";
const GET_MAX_CREATE_ORDER_SIZE: &str = "/api/v1/private/order/getMaxCreateOrderSize";

/// Creates, cancels and queries orders of one account.
///
/// The signer and transport are injected so that keys can live outside the process and requests
/// can carry whatever authentication the deployment needs.
#[derive(Clone, Debug)]
pub struct OrderClient {
    account_id: AccountId,
    signer: Arc<dyn Signer>,
    transport: Arc<dyn Transport>,
    policies: OrderPolicies,
}

impl OrderClient {
    #[must_use]
    pub fn new(
        account_id: AccountId,
        signer: Arc<dyn Signer>,
        transport: Arc<dyn Transport>,
        policies: OrderPolicies,
    ) -> Self {
        Self {
            account_id,
            signer,
            transport,
            policies,
        }
    }

    /// Creates a client signing with the configured Stark key over plain HTTP transport.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let signer = StarkSigner::from_secret(&config.stark_private_key)?;
        let transport = HttpTransport::new(config.host);

        Ok(Self::new(
            config.account_id,
            Arc::new(signer),
            Arc::new(transport),
            config.policies,
        ))
    }

    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    #[must_use]
    pub fn policies(&self) -> OrderPolicies {
        self.policies
    }

    /// Builds the commitment for `intent` without signing it.
    pub fn commit(
        &self,
        intent: &OrderIntent,
        metadata: &Metadata,
        l2_price: Decimal,
    ) -> Result<OrderCommitment> {
        let (contract, quote_coin) = metadata.contract_with_quote_coin(&intent.contract_id)?;
        build_order_commitment(
            intent,
            contract,
            quote_coin,
            l2_price,
            self.account_id,
            self.policies,
        )
    }

    /// Builds and signs an order, returning the payload `create_order` would send.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, intent, metadata),
            fields(contract_id = %intent.contract_id, client_order_id = %intent.client_order_id),
            err(level = "warn")
        )
    )]
    pub async fn sign_order(
        &self,
        intent: &OrderIntent,
        metadata: &Metadata,
        l2_price: Decimal,
    ) -> Result<CreateOrderRequest> {
        let commitment = self.commit(intent, metadata, l2_price)?;
        let signature = self.signer.sign_hash(&commitment.hash).await?;

        Ok(assemble_order_request(
            intent,
            &commitment.quantized,
            self.account_id,
            &signature,
        ))
    }

    /// Signs and submits an order.
    ///
    /// `l2_price` is the price the settlement amounts are computed at; see
    /// [`build_order_commitment`].
    pub async fn create_order(
        &self,
        intent: &OrderIntent,
        metadata: &Metadata,
        l2_price: Decimal,
    ) -> Result<CreateOrderData> {
        let request = self.sign_order(intent, metadata, l2_price).await?;
        self.post_signed_order(&request).await
    }

    /// Posts an already signed order.
    pub async fn post_signed_order(&self, request: &CreateOrderRequest) -> Result<CreateOrderData> {
        let body = serde_json::to_value(request)?;
        self.send(Method::POST, CREATE_ORDER, Some(&body), &[]).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err(level = "warn")))]
    pub async fn cancel_order(&self, params: &CancelOrderParams) -> Result<CancelOrderData> {
        let account_id = self.account_id.to_string();

        let (path, body) = if let Some(order_id) = &params.order_id {
            (
                CANCEL_ORDER_BY_ID,
                json!({ "accountId": account_id, "orderIdList": [order_id] }),
            )
        } else if let Some(client_order_id) = &params.client_order_id {
            (
                CANCEL_ORDER_BY_CLIENT_ORDER_ID,
                json!({ "accountId": account_id, "clientOrderIdList": [client_order_id] }),
            )
        } else if let Some(contract_id) = &params.contract_id {
            (
                CANCEL_ALL_ORDER,
                json!({ "accountId": account_id, "filterContractIdList": [contract_id] }),
            )
        } else {
            return Err(Error::validation(
                "must provide either order id, client order id, or contract id",
            ));
        };

        self.send(Method::POST, path, Some(&body), &[]).await
    }

    pub async fn get_orders_by_id(&self, order_ids: &[String]) -> Result<Vec<Order>> {
        if order_ids.is_empty() {
            return Err(Error::validation("order ids must not be empty"));
        }

        let query = [
            ("accountId", self.account_id.to_string()),
            ("orderIdList", order_ids.join(",")),
        ];
        self.send(Method::GET, GET_ORDER_BY_ID, None, &query).await
    }

    pub async fn get_orders_by_client_order_id(
        &self,
        client_order_ids: &[String],
    ) -> Result<Vec<Order>> {
        if client_order_ids.is_empty() {
            return Err(Error::validation("client order ids must not be empty"));
        }

        let query = [
            ("accountId", self.account_id.to_string()),
            ("clientOrderIdList", client_order_ids.join(",")),
        ];
        self.send(Method::GET, GET_ORDER_BY_CLIENT_ORDER_ID, None, &query)
            .await
    }

    pub async fn get_max_order_size(
        &self,
        contract_id: &str,
        price: Decimal,
    ) -> Result<MaxOrderSize> {
        let body = json!({
            "accountId": self.account_id.to_string(),
            "contractId": contract_id,
            "price": price.to_string(),
        });
        self.send(Method::POST, GET_MAX_CREATE_ORDER_SIZE, Some(&body), &[])
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<T> {
        let raw = self.transport.send(method, path, body, query).await?;
        response::interpret(&raw)
    }
}
