#![allow(clippy::unwrap_used, reason = "Do not need additional syntax for setting up tests")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone as _, Utc};
use edgex_order_client::error::{Kind, NotFound, Rejected};
use edgex_order_client::metadata::Metadata;
use edgex_order_client::order::MessageHash;
use edgex_order_client::types::{OrderType, Side, TimeInForce};
use edgex_order_client::{
    CancelOrderParams, ClientConfig, HttpTransport, L2Signature, OrderClient, OrderIntent,
    OrderPolicies, RawSigningConfig, Signer, StarkSigner,
};
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use serde_json::json;
use url::Url;

const ACCOUNT_ID: u64 = 542_301;
const STARK_KEY: &str = "0x58a8b2ac6f2c3a1bb0c2f3c0b5e94f27b1d5d8f1a2b3c4d5e6f708192a3b4c5";

fn metadata() -> Metadata {
    serde_json::from_value(json!({
        "contractList": [{
            "contractId": "10000001",
            "contractName": "BTCUSDT",
            "baseCoinId": "1001",
            "quoteCoinId": "1000",
            "defaultTakerFeeRate": "0.00038",
            "starkExSyntheticAssetId": "0x4254432d3130000000000000000000",
            "starkExResolution": "0x2540be400"
        }],
        "coinList": [{
            "coinId": "1000",
            "coinName": "USDT",
            "starkExAssetId": "0x33bda5c923bae4e84825b74762d5482889b9512465fbffc50d1ae4b82c345c3",
            "starkExResolution": "0xf4240"
        }]
    }))
    .unwrap()
}

fn intent(contract_id: &str) -> OrderIntent {
    OrderIntent::builder()
        .contract_id(contract_id)
        .side(Side::Buy)
        .order_type(OrderType::Market)
        .price("0")
        .size("0.01")
        .client_order_id("order-1")
        .expire_time(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap())
        .build()
}

/// Counts invocations and delegates to a real key.
#[derive(Debug)]
struct CountingSigner {
    inner: StarkSigner,
    calls: AtomicUsize,
}

#[async_trait]
impl Signer for CountingSigner {
    async fn sign_hash(&self, hash: &MessageHash) -> edgex_order_client::Result<L2Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_hash(hash).await
    }
}

fn counting_signer() -> Arc<CountingSigner> {
    Arc::new(CountingSigner {
        inner: StarkSigner::from_secret(&SecretString::from(STARK_KEY.to_owned())).unwrap(),
        calls: AtomicUsize::new(0),
    })
}

fn client(server: &MockServer, signer: Arc<CountingSigner>) -> OrderClient {
    let transport = HttpTransport::new(Url::parse(&server.base_url()).unwrap());
    OrderClient::new(
        ACCOUNT_ID,
        signer,
        Arc::new(transport),
        OrderPolicies::default(),
    )
}

#[tokio::test]
async fn create_order_posts_signed_payload() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let client = client(&server, counting_signer());
    let metadata = metadata();

    let signed = client
        .sign_order(&intent("10000001"), &metadata, dec!(30000.5))
        .await?;
    let expected_body = serde_json::to_value(&signed)?;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/private/order/createOrder")
                .json_body(expected_body.clone());
            then.status(200)
                .json_body(json!({ "code": "SUCCESS", "data": { "orderId": "5566" } }));
        })
        .await;

    let created = client
        .create_order(&intent("10000001"), &metadata, dec!(30000.5))
        .await?;

    mock.assert_async().await;
    assert_eq!(created.order_id, "5566");
    assert_eq!(expected_body["accountId"], "542301");
    assert_eq!(expected_body["timeInForce"], "IMMEDIATE_OR_CANCEL");
    assert_eq!(expected_body["price"], "0");
    assert_eq!(expected_body["l2Value"], "300.005");
    assert_eq!(expected_body["l2LimitFee"], "1");
    assert_eq!(expected_body["l2Nonce"], "196076065");
    assert_eq!(expected_body["expireTime"], "1704067200000");
    assert_eq!(expected_body["l2ExpireTime"], "1704844800000");
    assert_eq!(
        expected_body["l2Signature"].as_str().map(str::len),
        Some(192),
        "r, s and v are 64 hex digits each"
    );

    Ok(())
}

#[tokio::test]
async fn resubmitting_same_client_order_id_is_idempotent() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let client = client(&server, counting_signer());
    let metadata = metadata();

    let first = client
        .sign_order(&intent("10000001"), &metadata, dec!(30000.5))
        .await?;
    let second = client
        .sign_order(&intent("10000001"), &metadata, dec!(30000.5))
        .await?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn unknown_contract_fails_before_signing_or_sending() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({ "code": "SUCCESS" }));
        })
        .await;
    let signer = counting_signer();
    let client = client(&server, Arc::clone(&signer));

    let err = client
        .create_order(&intent("99999999"), &metadata(), dec!(30000.5))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::NotFound);
    assert_eq!(err.downcast_ref::<NotFound>().unwrap().id, "99999999");
    assert_eq!(signer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn rejected_order_surfaces_code_and_params() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/private/order/createOrder");
            then.status(200).json_body(json!({
                "code": "ORDER_SIZE_TOO_SMALL",
                "msg": "size below minimum",
                "errorParam": { "minOrderSize": "0.001" }
            }));
        })
        .await;
    let client = client(&server, counting_signer());

    let err = client
        .create_order(&intent("10000001"), &metadata(), dec!(30000.5))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::RequestRejected);
    let rejected = err.downcast_ref::<Rejected>().unwrap();
    assert_eq!(rejected.code, "ORDER_SIZE_TOO_SMALL");
    assert_eq!(rejected.message.as_deref(), Some("size below minimum"));
    assert_eq!(
        rejected.error_param,
        Some(json!({ "minOrderSize": "0.001" }))
    );
}

#[tokio::test]
async fn limit_order_without_time_in_force_is_gtc() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let client = client(&server, counting_signer());
    let mut intent = intent("10000001");
    intent.order_type = OrderType::Limit;
    intent.price = "30000.5".to_owned();

    let signed = client.sign_order(&intent, &metadata(), dec!(30000.5)).await?;

    assert_eq!(signed.time_in_force, TimeInForce::GoodTilCancel);
    Ok(())
}

#[tokio::test]
async fn cancel_routes_by_selector() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let by_id = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/private/order/cancelOrderById")
                .json_body(json!({ "accountId": "542301", "orderIdList": ["5566"] }));
            then.status(200).json_body(json!({
                "code": "SUCCESS",
                "data": { "cancelResultMap": { "5566": "SUCCESS" } }
            }));
        })
        .await;
    let by_client_id = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/private/order/cancelOrderByClientOrderId")
                .json_body(json!({ "accountId": "542301", "clientOrderIdList": ["order-1"] }));
            then.status(200)
                .json_body(json!({ "code": "SUCCESS", "data": {} }));
        })
        .await;
    let all = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/private/order/cancelAllOrder")
                .json_body(json!({ "accountId": "542301", "filterContractIdList": ["10000001"] }));
            then.status(200)
                .json_body(json!({ "code": "SUCCESS", "data": {} }));
        })
        .await;
    let client = client(&server, counting_signer());

    let cancelled = client
        .cancel_order(&CancelOrderParams::by_order_id("5566"))
        .await?;
    client
        .cancel_order(&CancelOrderParams::by_client_order_id("order-1"))
        .await?;
    client
        .cancel_order(&CancelOrderParams::all_for_contract("10000001"))
        .await?;

    by_id.assert_async().await;
    by_client_id.assert_async().await;
    all.assert_async().await;
    assert_eq!(
        cancelled.cancel_result_map.get("5566").map(String::as_str),
        Some("SUCCESS")
    );
    Ok(())
}

#[tokio::test]
async fn cancel_without_selector_is_validation_error() {
    let server = MockServer::start_async().await;
    let client = client(&server, counting_signer());

    let err = client
        .cancel_order(&CancelOrderParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Validation);
}

#[tokio::test]
async fn get_orders_by_id_joins_ids() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/private/order/getOrderById")
                .query_param("accountId", "542301")
                .query_param("orderIdList", "1,2");
            then.status(200).json_body(json!({
                "code": "SUCCESS",
                "data": [{
                    "id": "1",
                    "accountId": "542301",
                    "contractId": "10000001",
                    "side": "SELL",
                    "price": "31000",
                    "size": "0.5",
                    "clientOrderId": "c-1",
                    "type": "LIMIT",
                    "timeInForce": "POST_ONLY",
                    "status": "OPEN"
                }]
            }));
        })
        .await;
    let client = client(&server, counting_signer());

    let orders = client
        .get_orders_by_id(&["1".to_owned(), "2".to_owned()])
        .await?;

    mock.assert_async().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].time_in_force, TimeInForce::PostOnly);
    assert_eq!(orders[0].side, Side::Sell);
    Ok(())
}

#[tokio::test]
async fn empty_id_lists_are_rejected_locally() {
    let server = MockServer::start_async().await;
    let client = client(&server, counting_signer());

    let by_id = client.get_orders_by_id(&[]).await.unwrap_err();
    let by_client_id = client.get_orders_by_client_order_id(&[]).await.unwrap_err();

    assert_eq!(by_id.kind(), Kind::Validation);
    assert_eq!(by_client_id.kind(), Kind::Validation);
}

#[tokio::test]
async fn get_orders_by_client_order_id_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/private/order/getOrderByClientOrderId")
                .query_param("clientOrderIdList", "order-1");
            then.status(200).json_body(json!({ "code": "ACCOUNT_NOT_FOUND" }));
        })
        .await;
    let client = client(&server, counting_signer());

    let err = client
        .get_orders_by_client_order_id(&["order-1".to_owned()])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::RequestRejected);
    assert_eq!(
        err.downcast_ref::<Rejected>().unwrap().code,
        "ACCOUNT_NOT_FOUND"
    );
}

#[tokio::test]
async fn get_max_order_size_posts_price_as_string() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/private/order/getMaxCreateOrderSize")
                .json_body(json!({
                    "accountId": "542301",
                    "contractId": "10000001",
                    "price": "30000.5"
                }));
            then.status(200).json_body(json!({
                "code": "SUCCESS",
                "data": {
                    "maxBuySize": "1.25",
                    "maxSellSize": "1.3",
                    "ask1Price": "30001",
                    "bid1Price": "30000"
                }
            }));
        })
        .await;
    let client = client(&server, counting_signer());

    let max = client.get_max_order_size("10000001", dec!(30000.5)).await?;

    mock.assert_async().await;
    assert_eq!(max.max_buy_size, "1.25");
    assert_eq!(max.bid1_price, "30000");
    Ok(())
}

#[tokio::test]
async fn http_failure_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.any_request();
            then.status(503);
        })
        .await;
    let client = client(&server, counting_signer());

    let err = client
        .create_order(&intent("10000001"), &metadata(), dec!(30000.5))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Transport);
}

#[test]
fn from_config_wires_account() {
    let config = ClientConfig::from_raw(
        "https://pro.edgex.exchange",
        RawSigningConfig {
            account_id: "542301".to_owned(),
            stark_private_key: SecretString::from(STARK_KEY.to_owned()),
        },
        OrderPolicies::default(),
    )
    .unwrap();

    let client = OrderClient::from_config(config).unwrap();

    assert_eq!(client.account_id(), ACCOUNT_ID);
    assert!(!format!("{client:?}").contains(&STARK_KEY[2..]));
}
