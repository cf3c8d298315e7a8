use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{address, keccak256, Address, B256, U256};
use alloy::sol_types::SolCall;
use serde_json::{json, Value};
use tracing::debug;

use rusty_pay_core::contracts::IERC20;
use rusty_pay_core::ports::UNRECOGNIZED_CHAIN_CODE;
use rusty_pay_core::rpc;
use rusty_pay_core::{
    AssetRegistry, EventHub, PortError, ProviderEventKind, ProviderPort, Subscription,
    TransactionRequest,
};

use crate::PaymentAdapterConfig;

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const UNAUTHORIZED: i64 = 4100;
const EXECUTION_ERROR: i64 = -32000;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
    hub: EventHub,
    #[cfg(target_arch = "wasm32")]
    hooks: Arc<Mutex<BrowserHooks>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    #[cfg(not(target_arch = "wasm32"))]
    Proxy(ProxyRuntime),
    #[cfg(target_arch = "wasm32")]
    Browser,
}

#[derive(Debug, Clone)]
#[cfg(not(target_arch = "wasm32"))]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
struct SentTransaction {
    request: TransactionRequest,
    revert: bool,
}

/// Wallet simulated by the deterministic mode, plus the debug knobs shared by all modes.
#[derive(Debug)]
struct ProviderState {
    accounts: Vec<Address>,
    authorized: bool,
    chain_id: u64,
    known_chains: BTreeSet<u64>,
    native_balances: HashMap<Address, U256>,
    token_balances: HashMap<(Address, Address), U256>,
    token_decimals: HashMap<Address, u8>,
    pending: Vec<(B256, SentTransaction)>,
    receipts: HashMap<B256, Value>,
    hold_receipts: bool,
    next_tx_hash: Option<B256>,
    revert_next: bool,
    fail_next: HashMap<String, PortError>,
    calls: Vec<String>,
    tx_nonce: u64,
    block_number: u64,
    // Last values seen from a real provider; proxy mode publishes events on change.
    observed_accounts: Option<Vec<Address>>,
    observed_chain: Option<u64>,
}

impl Default for ProviderState {
    fn default() -> Self {
        let account = deterministic_account();
        let token_decimals = AssetRegistry::default()
            .iter()
            .filter_map(|asset| asset.contract().map(|address| (address, asset.decimals)))
            .collect();
        Self {
            accounts: vec![account],
            authorized: false,
            chain_id: 1,
            known_chains: BTreeSet::from([1, 11_155_111]),
            native_balances: HashMap::from([(account, U256::from(10u64).pow(U256::from(19u64)))]),
            token_balances: HashMap::new(),
            token_decimals,
            pending: Vec::new(),
            receipts: HashMap::new(),
            hold_receipts: false,
            next_tx_hash: None,
            revert_next: false,
            fail_next: HashMap::new(),
            calls: Vec::new(),
            tx_nonce: 0,
            block_number: 19_000_000,
            observed_accounts: None,
            observed_chain: None,
        }
    }
}

fn deterministic_account() -> Address {
    address!("0x1000000000000000000000000000000000000001")
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
struct BrowserHooks {
    accounts_changed: Option<wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>>,
    chain_changed: Option<wasm_bindgen::closure::Closure<dyn FnMut(wasm_bindgen::JsValue)>>,
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(PaymentAdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: PaymentAdapterConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        let mode = if browser_provider_available() {
            ProviderMode::Browser
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 browser provider not found in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        #[cfg(not(target_arch = "wasm32"))]
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = std::time::Duration::from_millis(config.request_timeout_ms);
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        ))
                    } else {
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        Self::with_mode(mode)
    }

    /// Deterministic in-process wallet regardless of the environment.
    pub fn deterministic() -> Self {
        Self::with_mode(ProviderMode::Deterministic)
    }

    /// Behaves like a page without a wallet extension.
    pub fn unavailable() -> Self {
        Self::with_mode(ProviderMode::Disabled(
            "no EIP-1193 provider injected".to_owned(),
        ))
    }

    fn with_mode(mode: ProviderMode) -> Self {
        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::default())),
            hub: EventHub::default(),
            #[cfg(target_arch = "wasm32")]
            hooks: Arc::new(Mutex::new(BrowserHooks::default())),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, ProviderMode::Deterministic)
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let ProviderMode::Disabled(reason) = &self.mode {
            return Err(PortError::Policy(reason.clone()));
        }
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_inject_accounts_changed(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        self.lock_state()?.accounts = accounts.clone();
        self.hub.publish(ProviderEventKind::AccountsChanged(accounts));
        Ok(())
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        self.lock_state()?.chain_id = chain_id;
        self.hub.publish(ProviderEventKind::ChainChanged(chain_id));
        Ok(())
    }

    pub fn debug_set_native_balance(&self, account: Address, wei: U256) -> Result<(), PortError> {
        self.lock_state()?.native_balances.insert(account, wei);
        Ok(())
    }

    pub fn debug_set_token_balance(
        &self,
        token: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), PortError> {
        self.lock_state()?
            .token_balances
            .insert((token, account), amount);
        Ok(())
    }

    pub fn debug_set_token_decimals(&self, token: Address, decimals: u8) -> Result<(), PortError> {
        self.lock_state()?.token_decimals.insert(token, decimals);
        Ok(())
    }

    /// The next request for `method` fails with `err` instead of being served.
    pub fn debug_fail_next(&self, method: &str, err: PortError) -> Result<(), PortError> {
        self.lock_state()?.fail_next.insert(method.to_owned(), err);
        Ok(())
    }

    /// While held, receipt lookups report the transaction as pending.
    pub fn debug_hold_receipts(&self, hold: bool) -> Result<(), PortError> {
        self.lock_state()?.hold_receipts = hold;
        Ok(())
    }

    pub fn debug_set_next_tx_hash(&self, hash: B256) -> Result<(), PortError> {
        self.lock_state()?.next_tx_hash = Some(hash);
        Ok(())
    }

    /// The next submitted transaction is mined with a failed status.
    pub fn debug_revert_next_transaction(&self) -> Result<(), PortError> {
        self.lock_state()?.revert_next = true;
        Ok(())
    }

    pub fn debug_set_known_chains(&self, chains: &[u64]) -> Result<(), PortError> {
        self.lock_state()?.known_chains = chains.iter().copied().collect();
        Ok(())
    }

    /// Whether the site already holds account permission, as `eth_accounts` sees it.
    pub fn debug_set_authorized(&self, authorized: bool) -> Result<(), PortError> {
        self.lock_state()?.authorized = authorized;
        Ok(())
    }

    pub fn debug_calls(&self) -> Result<Vec<String>, PortError> {
        Ok(self.lock_state()?.calls.clone())
    }

    pub fn debug_pending_transactions(&self) -> Result<usize, PortError> {
        Ok(self.lock_state()?.pending.len())
    }

    pub fn debug_subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    fn serve_deterministic(&self, method: &str, params: &Value) -> Result<Value, PortError> {
        let mut g = self.lock_state()?;
        match method {
            "eth_requestAccounts" => {
                g.authorized = true;
                Ok(json!(g.accounts))
            }
            "eth_accounts" => {
                if g.authorized {
                    Ok(json!(g.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            "eth_chainId" => Ok(json!(rpc::hex_quantity(g.chain_id))),
            "wallet_switchEthereumChain" => {
                let chain_id = chain_param(params)?;
                if !g.known_chains.contains(&chain_id) {
                    return Err(PortError::rpc(
                        UNRECOGNIZED_CHAIN_CODE,
                        format!("Unrecognized chain ID {}", rpc::hex_quantity(chain_id)),
                    ));
                }
                let changed = g.chain_id != chain_id;
                g.chain_id = chain_id;
                drop(g);
                if changed {
                    self.hub.publish(ProviderEventKind::ChainChanged(chain_id));
                }
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                let chain_id = chain_param(params)?;
                g.known_chains.insert(chain_id);
                let changed = g.chain_id != chain_id;
                g.chain_id = chain_id;
                drop(g);
                if changed {
                    self.hub.publish(ProviderEventKind::ChainChanged(chain_id));
                }
                Ok(Value::Null)
            }
            "eth_getBalance" => {
                let account = rpc::address(&params[0])?;
                let balance = g.native_balances.get(&account).copied().unwrap_or_default();
                Ok(json!(balance))
            }
            "eth_call" => {
                let to = rpc::address(&params[0]["to"])?;
                let data = rpc::bytes(&params[0]["data"])?;
                g.serve_call(to, &data)
            }
            "eth_sendTransaction" => {
                let request: TransactionRequest = serde_json::from_value(params[0].clone())
                    .map_err(|e| PortError::rpc(INVALID_PARAMS, format!("invalid transaction: {e}")))?;
                g.accept_transaction(request)
            }
            "eth_getTransactionReceipt" => {
                let hash = rpc::hash(&params[0])?;
                if !g.hold_receipts {
                    g.mine_pending();
                }
                Ok(g.receipts.get(&hash).cloned().unwrap_or(Value::Null))
            }
            other => Err(PortError::rpc(
                METHOD_NOT_FOUND,
                format!("method {other} is not supported"),
            )),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn proxy_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let proxy = match &self.mode {
            ProviderMode::Proxy(proxy) => proxy,
            ProviderMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            _ => {
                return Err(PortError::NotImplemented(
                    "eip1193 proxy runtime not enabled",
                ))
            }
        };

        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = proxy
            .client
            .post(&proxy.base_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(rpc_error_from_json(err));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {status}: {body}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }

    /// Publishes an event when a real provider reports a different account set or chain
    /// than last observed.
    fn observe(&self, method: &str, result: &Value) -> Result<(), PortError> {
        let event = {
            let mut g = self.lock_state()?;
            match method {
                "eth_requestAccounts" | "eth_accounts" => {
                    let accounts = rpc::accounts(result)?;
                    let previous = g.observed_accounts.replace(accounts.clone());
                    previous
                        .filter(|p| *p != accounts)
                        .map(|_| ProviderEventKind::AccountsChanged(accounts))
                }
                "eth_chainId" => {
                    let chain_id = rpc::quantity_u64(result)?;
                    let previous = g.observed_chain.replace(chain_id);
                    previous
                        .filter(|p| *p != chain_id)
                        .map(|_| ProviderEventKind::ChainChanged(chain_id))
                }
                _ => None,
            }
        };
        if let Some(kind) = event {
            debug!(?kind, "provider state changed between requests");
            self.hub.publish(kind);
        }
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    async fn wasm_request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        use wasm_bindgen::JsCast;

        let provider = browser_provider()?;
        let request_fn = get_prop(&provider, "request")
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .ok_or(PortError::NotImplemented(
                "window.ethereum.request is unavailable",
            ))?;

        let request = json!({
            "method": method,
            "params": params,
        });
        let request_js = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| PortError::Transport(format!("failed to encode wasm request: {e}")))?;
        let promise_js = request_fn.call1(&provider, &request_js).map_err(|e| {
            PortError::Transport(format!("provider request dispatch failed: {e:?}"))
        })?;
        let promise = promise_js.dyn_into::<js_sys::Promise>().map_err(|_| {
            PortError::Transport("provider request did not return Promise".to_owned())
        })?;
        let result_js = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(js_rejection_to_port_error)?;
        if result_js.is_null() || result_js.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result_js)
            .map_err(|e| PortError::Transport(format!("failed to decode wasm response: {e}")))
    }

    #[cfg(target_arch = "wasm32")]
    fn register_browser_hooks(&self) -> Result<(), PortError> {
        use wasm_bindgen::{closure::Closure, JsCast, JsValue};

        let provider = browser_provider()?;
        let on_fn = get_prop(&provider, "on")
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .or_else(|| {
                get_prop(&provider, "addListener")
                    .ok()
                    .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            })
            .ok_or(PortError::NotImplemented(
                "provider does not expose on/addListener",
            ))?;

        let mut hooks = self
            .hooks
            .lock()
            .map_err(|e| PortError::Transport(format!("provider hooks lock poisoned: {e}")))?;
        if hooks.accounts_changed.is_some() && hooks.chain_changed.is_some() {
            return Ok(());
        }

        let hub = self.hub.clone();
        let accounts_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let mut accounts = Vec::new();
            if js_sys::Array::is_array(&value) {
                for item in js_sys::Array::from(&value).iter() {
                    if let Some(addr) = item.as_string().and_then(|raw| raw.parse().ok()) {
                        accounts.push(addr);
                    }
                }
            }
            hub.publish(ProviderEventKind::AccountsChanged(accounts));
        });

        let hub = self.hub.clone();
        let chain_cb = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            if let Ok(chain_id) = js_chain_id_to_u64(value) {
                hub.publish(ProviderEventKind::ChainChanged(chain_id));
            }
        });

        on_fn
            .call2(
                &provider,
                &JsValue::from_str("accountsChanged"),
                accounts_cb.as_ref().unchecked_ref(),
            )
            .map_err(|e| PortError::Transport(format!("register accountsChanged failed: {e:?}")))?;
        on_fn
            .call2(
                &provider,
                &JsValue::from_str("chainChanged"),
                chain_cb.as_ref().unchecked_ref(),
            )
            .map_err(|e| PortError::Transport(format!("register chainChanged failed: {e:?}")))?;

        hooks.accounts_changed = Some(accounts_cb);
        hooks.chain_changed = Some(chain_cb);
        Ok(())
    }
}

impl ProviderState {
    fn serve_call(&self, to: Address, data: &[u8]) -> Result<Value, PortError> {
        let selector = data.get(..4).ok_or_else(|| {
            PortError::rpc(INVALID_PARAMS, "call data shorter than a selector")
        })?;
        if selector == IERC20::balanceOfCall::SELECTOR {
            let call = IERC20::balanceOfCall::abi_decode(data, true)
                .map_err(|e| PortError::rpc(INVALID_PARAMS, format!("bad balanceOf call: {e}")))?;
            let balance = self
                .token_balances
                .get(&(to, call.account))
                .copied()
                .unwrap_or_default();
            let ret = IERC20::balanceOfCall::abi_encode_returns(&(balance,));
            return Ok(json!(alloy::hex::encode_prefixed(ret)));
        }
        if selector == IERC20::decimalsCall::SELECTOR {
            let decimals = self
                .token_decimals
                .get(&to)
                .ok_or_else(|| PortError::rpc(EXECUTION_ERROR, "execution reverted"))?;
            let ret = IERC20::decimalsCall::abi_encode_returns(&(*decimals,));
            return Ok(json!(alloy::hex::encode_prefixed(ret)));
        }
        Err(PortError::rpc(EXECUTION_ERROR, "execution reverted"))
    }

    fn accept_transaction(&mut self, request: TransactionRequest) -> Result<Value, PortError> {
        if !self.authorized || !self.accounts.contains(&request.from) {
            return Err(PortError::rpc(
                UNAUTHORIZED,
                "The requested account has not been authorized by the user",
            ));
        }
        let value = request.value.unwrap_or_default();
        let available = self
            .native_balances
            .get(&request.from)
            .copied()
            .unwrap_or_default();
        if value > available {
            return Err(PortError::rpc(
                EXECUTION_ERROR,
                "insufficient funds for transfer",
            ));
        }

        self.tx_nonce = self.tx_nonce.saturating_add(1);
        let hash = match self.next_tx_hash.take() {
            Some(hash) => hash,
            None => {
                let seed = serde_json::to_vec(&json!([request, self.chain_id, self.tx_nonce]))
                    .map_err(|e| PortError::Validation(format!("tx serialization failed: {e}")))?;
                keccak256(seed)
            }
        };
        let revert = std::mem::take(&mut self.revert_next);
        self.pending.push((hash, SentTransaction { request, revert }));
        Ok(json!(hash))
    }

    fn mine_pending(&mut self) {
        for (hash, tx) in std::mem::take(&mut self.pending) {
            self.block_number = self.block_number.saturating_add(1);
            if !tx.revert {
                self.apply_effects(&tx.request);
            }
            let receipt = json!({
                "transactionHash": hash,
                "blockNumber": rpc::hex_quantity(self.block_number),
                "status": if tx.revert { "0x0" } else { "0x1" },
            });
            self.receipts.insert(hash, receipt);
        }
    }

    fn apply_effects(&mut self, request: &TransactionRequest) {
        if let Some(value) = request.value.filter(|v| !v.is_zero()) {
            let from = self.native_balances.entry(request.from).or_default();
            *from = from.saturating_sub(value);
            let to = self.native_balances.entry(request.to).or_default();
            *to = to.saturating_add(value);
        }
        let Some(data) = request.data.as_ref() else {
            return;
        };
        let Ok(transfer) = IERC20::transferCall::abi_decode(data, true) else {
            return;
        };
        let token = request.to;
        let from = self.token_balances.entry((token, request.from)).or_default();
        *from = from.saturating_sub(transfer.amount);
        let to = self.token_balances.entry((token, transfer.to)).or_default();
        *to = to.saturating_add(transfer.amount);
    }
}

impl ProviderPort for Eip1193Adapter {
    fn is_available(&self) -> bool {
        match &self.mode {
            ProviderMode::Disabled(_) => false,
            #[cfg(target_arch = "wasm32")]
            ProviderMode::Browser => browser_provider_available(),
            _ => true,
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        self.check_mode()?;
        {
            let mut g = self.lock_state()?;
            g.calls.push(method.to_owned());
            if let Some(err) = g.fail_next.remove(method) {
                return Err(err);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        if matches!(self.mode, ProviderMode::Proxy(_)) {
            let result = self.proxy_call(method, params).await?;
            self.observe(method, &result)?;
            return Ok(result);
        }

        #[cfg(target_arch = "wasm32")]
        if matches!(self.mode, ProviderMode::Browser) {
            let result = self.wasm_request(method, params).await?;
            self.observe(method, &result)?;
            return Ok(result);
        }

        self.serve_deterministic(method, &params)
    }

    fn subscribe(&self) -> Result<Subscription, PortError> {
        self.check_mode()?;

        #[cfg(target_arch = "wasm32")]
        if matches!(self.mode, ProviderMode::Browser) {
            // Listeners are attached on first subscription, not at construction; some
            // wallets stall the permission prompt if `on()` runs before it.
            self.register_browser_hooks()?;
        }

        Ok(self.hub.subscribe())
    }
}

fn chain_param(params: &Value) -> Result<u64, PortError> {
    let raw = params
        .get(0)
        .and_then(|p| p.get("chainId"))
        .ok_or_else(|| PortError::rpc(INVALID_PARAMS, "missing chainId parameter"))?;
    rpc::quantity_u64(raw)
}

/// JSON-RPC error object, keeping `code`/`data` so callers can classify 4001 and 4902.
fn rpc_error_from_json(err: &Value) -> PortError {
    let code = err.get("code").and_then(Value::as_i64);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("provider error")
        .to_owned();
    match code {
        Some(code) => PortError::Rpc {
            code,
            message,
            data: err.get("data").cloned().filter(|d| !d.is_null()),
        },
        None => PortError::Transport(format!("eip1193 provider returned error: {err}")),
    }
}

#[cfg(target_arch = "wasm32")]
fn js_rejection_to_port_error(err: wasm_bindgen::JsValue) -> PortError {
    let value: Value = serde_wasm_bindgen::from_value(err.clone()).unwrap_or(Value::Null);
    if value.get("code").and_then(Value::as_i64).is_some() {
        return rpc_error_from_json(&value);
    }
    PortError::Transport(format!("provider request rejected: {err:?}"))
}

#[cfg(target_arch = "wasm32")]
fn browser_provider_available() -> bool {
    browser_provider().is_ok()
}

#[cfg(target_arch = "wasm32")]
fn browser_provider() -> Result<wasm_bindgen::JsValue, PortError> {
    let window =
        web_sys::window().ok_or_else(|| PortError::Transport("missing window".to_owned()))?;
    let provider = get_prop(&window.into(), "ethereum")?;
    if provider.is_null() || provider.is_undefined() {
        return Err(PortError::NotFound("window.ethereum missing".to_owned()));
    }
    Ok(provider)
}

#[cfg(target_arch = "wasm32")]
fn get_prop(target: &wasm_bindgen::JsValue, key: &str) -> Result<wasm_bindgen::JsValue, PortError> {
    js_sys::Reflect::get(target, &wasm_bindgen::JsValue::from_str(key))
        .map_err(|e| PortError::Transport(format!("read provider property {key} failed: {e:?}")))
}

#[cfg(target_arch = "wasm32")]
fn js_chain_id_to_u64(value: wasm_bindgen::JsValue) -> Result<u64, PortError> {
    if let Some(s) = value.as_string() {
        return rpc::parse_u64_str(&s);
    }
    if let Some(num) = value.as_f64() {
        return Ok(num as u64);
    }
    Err(PortError::Validation("invalid JS chain id".to_owned()))
}
