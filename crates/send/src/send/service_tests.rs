//! Tests for the SendDetails controller.
//!
//! The controller is driven against a real `FeeDispatcher` whose registry
//! holds a mock EVM adapter, and an in-memory portfolio.
//!
//! # Contract Points
//!
//! 1. Validation order: balance, estimation outcome, native amount plus fee, gas
//! 2. Debounce: rapid keystrokes in one window make a single adapter call
//! 3. Cancellation: a cancelled or superseded estimation never touches the form
//! 4. Send max: native assets subtract the fee, tokens use the whole balance

#[cfg(test)]
mod tests {
    use crate::amount::AmountField;
    use crate::config::SendConfig;
    use crate::errors::SendError;
    use crate::portfolio::{PortfolioSnapshot, PriceQuote};
    use crate::send::{SendDetails, SendForm};
    use crate::validation::{AmountFieldError, ValidationOutcome, ValidationState};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use satchel_chains::{
        AccountId, AdapterError, Asset, ChainAdapter, ChainAdapterRegistry, ChainId,
        FeeDataRequest, FeeDispatcher, FeeEstimate, Wallet,
    };
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    const ACCOUNT: &str = "eip155:1:0xbeef";
    const ONE_ETH: Decimal = dec!(1000000000000000000);
    const CENT_ETH: Decimal = dec!(10000000000000000);
    const ONE_USDC: Decimal = dec!(1000000);

    // =========================================================================
    // Mocks
    // =========================================================================

    struct MockAdapter {
        chain_id: ChainId,
        response: Mutex<Result<FeeEstimate, AdapterError>>,
        requests: Mutex<Vec<FeeDataRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl MockAdapter {
        fn new(response: Result<FeeEstimate, AdapterError>) -> Arc<Self> {
            Arc::new(Self {
                chain_id: "eip155:1".parse().unwrap(),
                response: Mutex::new(response),
                requests: Mutex::new(Vec::new()),
                gate: None,
            })
        }

        fn gated(response: Result<FeeEstimate, AdapterError>, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                chain_id: "eip155:1".parse().unwrap(),
                response: Mutex::new(response),
                requests: Mutex::new(Vec::new()),
                gate: Some(gate),
            })
        }

        fn requests(&self) -> Vec<FeeDataRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChainAdapter for MockAdapter {
        fn chain_id(&self) -> &ChainId {
            &self.chain_id
        }

        async fn get_fee_data(&self, request: FeeDataRequest) -> Result<FeeEstimate, AdapterError> {
            self.requests.lock().unwrap().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.response.lock().unwrap().clone()
        }

        async fn get_address(&self, wallet: &dyn Wallet) -> Result<String, AdapterError> {
            Ok(format!("0x{}", wallet.id()))
        }
    }

    struct TestWallet;

    #[async_trait]
    impl Wallet for TestWallet {
        fn id(&self) -> &str {
            "beef"
        }

        async fn evm_chain_reference(&self) -> Option<String> {
            Some("1".to_string())
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn eth() -> Asset {
        Asset::new("eip155:1/slip44:60".parse().unwrap(), 18, "ETH").unwrap()
    }

    fn usdc() -> Asset {
        Asset::new(
            "eip155:1/erc20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
                .parse()
                .unwrap(),
            6,
            "USDC",
        )
        .unwrap()
    }

    fn account() -> AccountId {
        ACCOUNT.parse().unwrap()
    }

    fn portfolio(eth_base: Decimal, usdc_base: Decimal) -> PortfolioSnapshot {
        PortfolioSnapshot::new()
            .with_fee_asset(eth())
            .with_asset(usdc())
            .with_balance(eth().asset_id, account(), eth_base)
            .with_balance(usdc().asset_id, account(), usdc_base)
            .with_price(eth().asset_id, PriceQuote::new(dec!(2000), "USD", Utc::now()))
            .with_price(usdc().asset_id, PriceQuote::new(dec!(1), "USD", Utc::now()))
    }

    fn details(
        asset: Asset,
        portfolio: PortfolioSnapshot,
        adapter: Arc<MockAdapter>,
        with_wallet: bool,
    ) -> SendDetails {
        let registry = Arc::new(ChainAdapterRegistry::with_adapters(vec![
            adapter as Arc<dyn ChainAdapter>
        ]));
        let dispatcher = if with_wallet {
            FeeDispatcher::with_wallet(registry, Arc::new(TestWallet))
        } else {
            FeeDispatcher::new(registry)
        };

        SendDetails::new(
            SendConfig::default(),
            Arc::new(dispatcher),
            Arc::new(portfolio),
            SendForm::new(asset, account(), "0xdead"),
        )
        .unwrap()
    }

    // =========================================================================
    // Input validation
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_amount_above_token_balance() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(10)), adapter, true);

        let state = details.handle_input_change("15").await;

        assert_eq!(
            state,
            ValidationState::Settled(ValidationOutcome::InsufficientFunds)
        );
        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "15");
        assert_eq!(form.fiat_amount, "15.00");
        assert_eq!(
            form.amount_field_error,
            AmountFieldError::Message("common.insufficientFunds".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_without_native_gas() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(Decimal::ZERO, ONE_USDC * dec!(10)), adapter, true);

        let state = details.handle_input_change("1").await;

        assert_eq!(
            state,
            ValidationState::Settled(ValidationOutcome::InsufficientNativeGas {
                asset_symbol: "ETH".to_string()
            })
        );
        match details.snapshot().amount_field_error {
            AmountFieldError::MessageWithParams { message, params } => {
                assert_eq!(message, "modals.send.errors.notEnoughNativeToken");
                assert_eq!(params.get("asset").map(String::as_str), Some("ETH"));
            }
            other => panic!("unexpected field error {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_amount_stores_estimate() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(10)), adapter.clone(), true);

        let state = details.handle_input_change("2.5").await;

        assert_eq!(state, ValidationState::Settled(ValidationOutcome::Valid));
        let form = details.snapshot();
        assert_eq!(form.estimated_fees, Some(FeeEstimate::flat(CENT_ETH)));
        assert!(form.amount_field_error.is_none());
        assert!(!form.is_loading());

        match adapter.requests().as_slice() {
            [FeeDataRequest::Evm(params)] => {
                assert_eq!(params.value, "2500000");
                assert!(params.contract_address.is_some());
                assert!(!params.send_max);
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_native_amount_plus_fee_exceeds_balance() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(eth(), portfolio(ONE_ETH, Decimal::ZERO), adapter, true);

        assert_eq!(
            details.handle_input_change("0.995").await,
            ValidationState::Settled(ValidationOutcome::InsufficientFunds)
        );
        assert_eq!(
            details.handle_input_change("0.5").await,
            ValidationState::Settled(ValidationOutcome::Valid)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_estimation_failures() {
        let adapter = MockAdapter::new(Err(AdapterError::Rpc("timeout".to_string())));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(10)), adapter.clone(), true);

        assert_eq!(
            details.handle_input_change("1").await,
            ValidationState::Settled(ValidationOutcome::GeneralError)
        );
        assert_eq!(
            details.snapshot().amount_field_error,
            AmountFieldError::Message("common.generalError".to_string())
        );

        *adapter.response.lock().unwrap() = Err(AdapterError::InsufficientFunds);
        tokio::time::advance(std::time::Duration::from_millis(1000)).await;
        assert_eq!(
            details.handle_input_change("2").await,
            ValidationState::Settled(ValidationOutcome::InsufficientFunds)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wallet_is_general_error() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter.clone(), false);

        assert_eq!(
            details.handle_input_change("1").await,
            ValidationState::Settled(ValidationOutcome::GeneralError)
        );
        assert!(adapter.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_skips_estimation() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter.clone(), true);

        assert_eq!(
            details.handle_input_change("1.2.3").await,
            ValidationState::Settled(ValidationOutcome::GeneralError)
        );
        assert_eq!(
            details.handle_input_change("-4").await,
            ValidationState::Settled(ValidationOutcome::GeneralError)
        );
        assert!(adapter.requests().is_empty());
        assert_eq!(details.snapshot().fiat_amount, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_clears_form() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter, true);

        details.handle_input_change("15").await;
        assert!(!details.snapshot().amount_field_error.is_none());

        let state = details.handle_input_change("").await;

        assert_eq!(state, ValidationState::Idle);
        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "");
        assert_eq!(form.fiat_amount, "");
        assert!(form.amount_field_error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fiat_input_converts_to_crypto() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(eth(), portfolio(ONE_ETH, Decimal::ZERO), adapter, true);

        assert_eq!(details.toggle_currency(), AmountField::Fiat);
        let state = details.handle_input_change("100").await;

        assert_eq!(state, ValidationState::Settled(ValidationOutcome::Valid));
        let form = details.snapshot();
        assert_eq!(form.fiat_amount, "100");
        assert_eq!(form.crypto_amount, "0.05");
        assert_eq!(details.toggle_currency(), AmountField::Crypto);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fiat_input_without_price() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let portfolio = PortfolioSnapshot::new()
            .with_fee_asset(eth())
            .with_balance(eth().asset_id, account(), ONE_ETH);
        let details = details(eth(), portfolio, adapter.clone(), true);

        details.toggle_currency();
        assert_eq!(
            details.handle_input_change("100").await,
            ValidationState::Settled(ValidationOutcome::GeneralError)
        );
        assert_eq!(details.snapshot().crypto_amount, "");
        assert!(adapter.requests().is_empty());
    }

    // =========================================================================
    // Debounce and cancellation
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_makes_one_call() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(200)), adapter.clone(), true);

        let (first, second, third) = tokio::join!(
            details.handle_input_change("1"),
            details.handle_input_change("12"),
            details.handle_input_change("123"),
        );

        assert_ne!(first, ValidationState::Idle);
        assert_ne!(second, ValidationState::Idle);
        assert_eq!(third, ValidationState::Settled(ValidationOutcome::Valid));
        assert_eq!(adapter.requests().len(), 1);

        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "123");
        assert_eq!(form.validation, ValidationState::Settled(ValidationOutcome::Valid));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_estimation_leaves_form_untouched() {
        let gate = Arc::new(Notify::new());
        let adapter = MockAdapter::gated(Ok(FeeEstimate::flat(CENT_ETH)), gate.clone());
        let details = Arc::new(details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter, true));

        let pending = {
            let details = Arc::clone(&details);
            tokio::spawn(async move { details.handle_input_change("15").await })
        };
        tokio::task::yield_now().await;
        assert!(details.is_loading());

        details.handle_input_change("").await;
        let cleared = details.snapshot();

        gate.notify_waiters();
        pending.await.unwrap();

        assert_eq!(details.snapshot(), cleared);
        assert_eq!(cleared.validation, ValidationState::Idle);
        assert!(cleared.amount_field_error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_loading() {
        let gate = Arc::new(Notify::new());
        let adapter = MockAdapter::gated(Ok(FeeEstimate::flat(CENT_ETH)), gate.clone());
        let details = Arc::new(details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter, true));

        let pending = {
            let details = Arc::clone(&details);
            tokio::spawn(async move { details.handle_input_change("1").await })
        };
        tokio::task::yield_now().await;

        details.teardown();
        gate.notify_waiters();
        pending.await.unwrap();

        assert!(!details.is_loading());
        assert_eq!(details.snapshot().estimated_fees, None);
    }

    // =========================================================================
    // Send max
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_native_send_max() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(eth(), portfolio(ONE_ETH * dec!(5), Decimal::ZERO), adapter.clone(), true);

        let state = details.handle_send_max().await;

        assert_eq!(state, ValidationState::Settled(ValidationOutcome::Valid));
        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "4.99");
        assert_eq!(form.fiat_amount, "9980.00");
        assert!(form.send_max);
        assert_eq!(form.estimated_fees, Some(FeeEstimate::flat(CENT_ETH)));

        match adapter.requests().as_slice() {
            [FeeDataRequest::Evm(params)] => {
                assert!(params.send_max);
                assert_eq!(params.value, "5000000000000000000");
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_send_max() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(10)), adapter.clone(), true);

        let state = details.handle_send_max().await;

        assert_eq!(state, ValidationState::Settled(ValidationOutcome::Valid));
        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "10");
        assert_eq!(form.fiat_amount, "10.00");
        assert!(!form.send_max);

        // A token send-max is estimated as an ordinary transfer of the balance.
        match adapter.requests().as_slice() {
            [FeeDataRequest::Evm(params)] => {
                assert!(!params.send_max);
                assert_eq!(params.value, "10000000");
                assert!(params.contract_address.is_some());
            }
            other => panic!("unexpected requests {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_send_max_without_gas_keeps_amount() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(Decimal::ZERO, ONE_USDC * dec!(10)), adapter, true);

        let state = details.handle_send_max().await;

        assert_eq!(
            state,
            ValidationState::Settled(ValidationOutcome::InsufficientNativeGas {
                asset_symbol: "ETH".to_string()
            })
        );
        let form = details.snapshot();
        assert_eq!(form.crypto_amount, "10");
        assert_eq!(form.estimated_fees, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_right_after_send_max_estimates_typed_amount() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(eth(), portfolio(ONE_ETH * dec!(5), Decimal::ZERO), adapter.clone(), true);

        details.handle_send_max().await;
        *adapter.response.lock().unwrap() = Ok(FeeEstimate::flat(CENT_ETH * dec!(2)));

        let state = details.handle_input_change("1").await;

        assert_eq!(state, ValidationState::Settled(ValidationOutcome::Valid));
        let requests = adapter.requests();
        assert_eq!(requests.len(), 2);
        match &requests[1] {
            FeeDataRequest::Evm(params) => {
                assert_eq!(params.value, "1000000000000000000");
                assert!(!params.send_max);
            }
            other => panic!("unexpected request {:?}", other),
        }

        let form = details.snapshot();
        assert_eq!(form.estimated_fees, Some(FeeEstimate::flat(CENT_ETH * dec!(2))));
        let confirmation = details.handle_next().await.unwrap();
        assert_eq!(confirmation.fee.tx_fee, CENT_ETH * dec!(2));
        assert!(!confirmation.send_max);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_clears_send_max() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(eth(), portfolio(ONE_ETH * dec!(5), Decimal::ZERO), adapter, true);

        details.handle_send_max().await;
        assert!(details.snapshot().send_max);

        details.handle_input_change("1").await;
        assert!(!details.snapshot().send_max);
    }

    // =========================================================================
    // Next step and chain discovery
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_handle_next() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC * dec!(10)), adapter, true);

        assert!(matches!(
            details.handle_next().await,
            Err(SendError::GeneralError(_))
        ));

        details.handle_input_change("15").await;
        assert_eq!(details.handle_next().await, Err(SendError::InsufficientFunds));

        tokio::time::advance(std::time::Duration::from_millis(1000)).await;
        details.handle_input_change("4").await;
        let confirmation = details.handle_next().await.unwrap();

        assert_eq!(confirmation.from, "0xbeef");
        assert_eq!(confirmation.to, "0xdead");
        assert_eq!(confirmation.crypto_amount, "4");
        assert_eq!(confirmation.fiat_amount, "4.00");
        assert_eq!(confirmation.fee.tx_fee, CENT_ETH);
        assert!(!confirmation.send_max);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connected_evm_chain() {
        let adapter = MockAdapter::new(Ok(FeeEstimate::flat(CENT_ETH)));
        let details = details(usdc(), portfolio(ONE_ETH, ONE_USDC), adapter, true);

        assert_eq!(details.supported_evm_chain_ids().len(), 1);
        assert_eq!(
            details.connected_evm_chain_id().await.map(|id| id.to_string()),
            Some("eip155:1".to_string())
        );
    }
}
