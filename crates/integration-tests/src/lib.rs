//! Integration tests for storecheck.
//!
//! # Running Tests
//!
//! ```bash
//! # Reconciler behaviour against the in-memory platform
//! cargo test -p storecheck-integration-tests
//!
//! # Live admin API (needs BASE_URL, ADMIN_USER, ADMIN_PASS)
//! cargo test -p storecheck-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `seed` - create-if-absent, idempotency, coupon rule linkage
//! - `cleanup` - manifest teardown, pattern sweep, dry runs
//! - `tiers` - tier selection over the embedded manifests
//! - `live_admin` - round trips against a real platform
//!
//! [`MemoryCommerce`] stands in for the admin REST API. It keeps products,
//! customers, sales rules and coupons in memory, records every call, and
//! can be told to fail a given operation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use storecheck_admin::AdminApiError;
use storecheck_admin::magento::{
    CommerceApi, CouponPayload, CustomerPayload, ProductPayload, RemoteCoupon, RemoteCustomer,
    RemoteProduct, RemoteRule, RulePayload,
};
use storecheck_core::{CouponId, CustomerId, ProductId, RuleId};

/// Operation kinds, for failure injection and call filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    FindProduct,
    CreateProduct,
    SearchProducts,
    DeleteProduct,
    FindCustomer,
    CreateCustomer,
    SearchCustomers,
    DeleteCustomer,
    FindCoupon,
    CreateRule,
    CreateCoupon,
    SearchRules,
    DeleteRule,
}

/// One recorded call with the argument that identifies its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindProduct(String),
    CreateProduct(String),
    SearchProducts(String),
    DeleteProduct(String),
    FindCustomer(String),
    CreateCustomer(String),
    SearchCustomers(String),
    DeleteCustomer(CustomerId),
    FindCoupon(String),
    CreateRule(String),
    CreateCoupon { rule_id: RuleId, code: String },
    SearchRules(String),
    DeleteRule(RuleId),
}

impl Call {
    #[must_use]
    pub const fn op(&self) -> Op {
        match self {
            Self::FindProduct(_) => Op::FindProduct,
            Self::CreateProduct(_) => Op::CreateProduct,
            Self::SearchProducts(_) => Op::SearchProducts,
            Self::DeleteProduct(_) => Op::DeleteProduct,
            Self::FindCustomer(_) => Op::FindCustomer,
            Self::CreateCustomer(_) => Op::CreateCustomer,
            Self::SearchCustomers(_) => Op::SearchCustomers,
            Self::DeleteCustomer(_) => Op::DeleteCustomer,
            Self::FindCoupon(_) => Op::FindCoupon,
            Self::CreateRule(_) => Op::CreateRule,
            Self::CreateCoupon { .. } => Op::CreateCoupon,
            Self::SearchRules(_) => Op::SearchRules,
            Self::DeleteRule(_) => Op::DeleteRule,
        }
    }

    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(
            self.op(),
            Op::CreateProduct | Op::CreateCustomer | Op::CreateRule | Op::CreateCoupon
        )
    }

    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(
            self.op(),
            Op::DeleteProduct | Op::DeleteCustomer | Op::DeleteRule
        )
    }
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    products: BTreeMap<String, RemoteProduct>,
    customers: BTreeMap<CustomerId, RemoteCustomer>,
    rules: BTreeMap<RuleId, RemoteRule>,
    coupons: BTreeMap<String, RemoteCoupon>,
    product_payloads: Vec<ProductPayload>,
    rule_payloads: Vec<RulePayload>,
    calls: Vec<Call>,
    failing: HashSet<Op>,
    loose_search: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&mut self, call: Call) -> Result<(), AdminApiError> {
        let op = call.op();
        self.calls.push(call);
        if self.failing.contains(&op) {
            return Err(AdminApiError::Api {
                status: 400,
                message: format!("injected failure for {op:?}"),
            });
        }
        Ok(())
    }
}

/// In-memory commerce platform.
#[derive(Debug, Default)]
pub struct MemoryCommerce {
    state: Mutex<State>,
}

impl MemoryCommerce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every subsequent call of `op` fails with a 400.
    pub fn fail(&self, op: Op) {
        self.state().failing.insert(op);
    }

    /// Make searches return every record regardless of the pattern, like a
    /// platform that ignores an unsupported filter.
    pub fn ignore_search_filters(&self) {
        self.state().loose_search = true;
    }

    /// Put a product on the platform without recording a call.
    pub fn insert_product(&self, sku: &str, name: &str, price: Decimal) -> ProductId {
        let mut state = self.state();
        let id = ProductId::new(state.next_id());
        state.products.insert(
            sku.to_string(),
            RemoteProduct {
                id,
                sku: sku.to_string(),
                name: Some(name.to_string()),
                price: Some(price),
                status: Some(1),
                type_id: Some("simple".to_string()),
            },
        );
        id
    }

    /// Put a customer on the platform without recording a call.
    pub fn insert_customer(&self, email: &str) -> CustomerId {
        let mut state = self.state();
        let id = CustomerId::new(state.next_id());
        state.customers.insert(
            id,
            RemoteCustomer {
                id,
                email: email.to_string(),
                firstname: None,
                lastname: None,
            },
        );
        id
    }

    /// Put a sales rule with one coupon code on the platform without
    /// recording a call.
    pub fn insert_rule(&self, name: &str, code: Option<&str>) -> RuleId {
        let mut state = self.state();
        let rule_id = RuleId::new(state.next_id());
        state.rules.insert(
            rule_id,
            RemoteRule {
                rule_id,
                name: name.to_string(),
                is_active: Some(true),
            },
        );
        if let Some(code) = code {
            let coupon_id = CouponId::new(state.next_id());
            state.coupons.insert(
                code.to_string(),
                RemoteCoupon {
                    coupon_id,
                    rule_id,
                    code: code.to_string(),
                },
            );
        }
        rule_id
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    #[must_use]
    pub fn calls_of(&self, op: Op) -> Vec<Call> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.state().calls.iter().filter(|c| c.is_delete()).count()
    }

    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.state().calls.iter().filter(|c| c.is_create()).count()
    }

    #[must_use]
    pub fn skus(&self) -> Vec<String> {
        self.state().products.keys().cloned().collect()
    }

    #[must_use]
    pub fn emails(&self) -> Vec<String> {
        self.state()
            .customers
            .values()
            .map(|c| c.email.clone())
            .collect()
    }

    #[must_use]
    pub fn rules(&self) -> Vec<RemoteRule> {
        self.state().rules.values().cloned().collect()
    }

    #[must_use]
    pub fn coupons(&self) -> Vec<RemoteCoupon> {
        self.state().coupons.values().cloned().collect()
    }

    /// Product payloads received, in order.
    #[must_use]
    pub fn product_payloads(&self) -> Vec<ProductPayload> {
        self.state().product_payloads.clone()
    }

    /// Sales rule payloads received, in order.
    #[must_use]
    pub fn rule_payloads(&self) -> Vec<RulePayload> {
        self.state().rule_payloads.clone()
    }
}

fn not_found(what: &str) -> AdminApiError {
    AdminApiError::NotFound(what.to_string())
}

impl CommerceApi for MemoryCommerce {
    async fn find_product(&self, sku: &str) -> Result<Option<RemoteProduct>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::FindProduct(sku.to_string()))?;
        Ok(state.products.get(sku).cloned())
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<RemoteProduct, AdminApiError> {
        let mut state = self.state();
        let body = &payload.product;
        state.check(Call::CreateProduct(body.sku.clone()))?;
        if state.products.contains_key(&body.sku) {
            return Err(AdminApiError::Api {
                status: 400,
                message: format!("The Product with the \"{}\" SKU already exists.", body.sku),
            });
        }
        let product = RemoteProduct {
            id: ProductId::new(state.next_id()),
            sku: body.sku.clone(),
            name: Some(body.name.clone()),
            price: Some(body.price),
            status: Some(body.status),
            type_id: Some(body.type_id.clone()),
        };
        state.products.insert(body.sku.clone(), product.clone());
        state.product_payloads.push(payload.clone());
        Ok(product)
    }

    async fn search_products(&self, sku_like: &str) -> Result<Vec<RemoteProduct>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::SearchProducts(sku_like.to_string()))?;
        let loose = state.loose_search;
        Ok(state
            .products
            .values()
            .filter(|p| loose || like_matches(sku_like, &p.sku))
            .cloned()
            .collect())
    }

    async fn delete_product(&self, sku: &str) -> Result<(), AdminApiError> {
        let mut state = self.state();
        state.check(Call::DeleteProduct(sku.to_string()))?;
        state
            .products
            .remove(sku)
            .map(|_| ())
            .ok_or_else(|| not_found(&format!("product {sku}")))
    }

    async fn find_customer(&self, email: &str) -> Result<Option<RemoteCustomer>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::FindCustomer(email.to_string()))?;
        Ok(state
            .customers
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_customer(
        &self,
        payload: &CustomerPayload,
    ) -> Result<RemoteCustomer, AdminApiError> {
        let mut state = self.state();
        let body = &payload.customer;
        state.check(Call::CreateCustomer(body.email.clone()))?;
        if state
            .customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&body.email))
        {
            return Err(AdminApiError::Api {
                status: 400,
                message: "A customer with the same email address already exists in an associated website.".to_string(),
            });
        }
        let id = CustomerId::new(state.next_id());
        let customer = RemoteCustomer {
            id,
            email: body.email.clone(),
            firstname: Some(body.firstname.clone()),
            lastname: Some(body.lastname.clone()),
        };
        state.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn search_customers(
        &self,
        email_like: &str,
    ) -> Result<Vec<RemoteCustomer>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::SearchCustomers(email_like.to_string()))?;
        let loose = state.loose_search;
        Ok(state
            .customers
            .values()
            .filter(|c| loose || like_matches(email_like, &c.email))
            .cloned()
            .collect())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), AdminApiError> {
        let mut state = self.state();
        state.check(Call::DeleteCustomer(id))?;
        state
            .customers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(&format!("customer {id}")))
    }

    async fn find_coupon(&self, code: &str) -> Result<Option<RemoteCoupon>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::FindCoupon(code.to_string()))?;
        Ok(state.coupons.get(code).cloned())
    }

    async fn create_rule(&self, payload: &RulePayload) -> Result<RemoteRule, AdminApiError> {
        let mut state = self.state();
        state.check(Call::CreateRule(payload.rule.name.clone()))?;
        let rule_id = RuleId::new(state.next_id());
        let rule = RemoteRule {
            rule_id,
            name: payload.rule.name.clone(),
            is_active: Some(payload.rule.is_active),
        };
        state.rules.insert(rule_id, rule.clone());
        state.rule_payloads.push(payload.clone());
        Ok(rule)
    }

    async fn create_coupon(&self, payload: &CouponPayload) -> Result<RemoteCoupon, AdminApiError> {
        let mut state = self.state();
        let body = &payload.coupon;
        state.check(Call::CreateCoupon {
            rule_id: body.rule_id,
            code: body.code.clone(),
        })?;
        if !state.rules.contains_key(&body.rule_id) {
            return Err(not_found(&format!("sales rule {}", body.rule_id)));
        }
        if state.coupons.contains_key(&body.code) {
            return Err(AdminApiError::Api {
                status: 400,
                message: "Coupon with the same code already exists.".to_string(),
            });
        }
        let coupon = RemoteCoupon {
            coupon_id: CouponId::new(state.next_id()),
            rule_id: body.rule_id,
            code: body.code.clone(),
        };
        state.coupons.insert(body.code.clone(), coupon.clone());
        Ok(coupon)
    }

    async fn search_rules(&self, name_like: &str) -> Result<Vec<RemoteRule>, AdminApiError> {
        let mut state = self.state();
        state.check(Call::SearchRules(name_like.to_string()))?;
        let loose = state.loose_search;
        Ok(state
            .rules
            .values()
            .filter(|r| loose || like_matches(name_like, &r.name))
            .cloned()
            .collect())
    }

    async fn delete_rule(&self, id: RuleId) -> Result<(), AdminApiError> {
        let mut state = self.state();
        state.check(Call::DeleteRule(id))?;
        if state.rules.remove(&id).is_none() {
            return Err(not_found(&format!("sales rule {id}")));
        }
        // Codes belong to their rule
        state.coupons.retain(|_, c| c.rule_id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Any,
    One,
    Lit(char),
}

/// SQL `LIKE` with `\` escapes, case-insensitive like the platform's
/// default collation.
#[must_use]
pub fn like_matches(pattern: &str, value: &str) -> bool {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => Token::Lit(chars.next().unwrap_or('\\')),
            '%' => Token::Any,
            '_' => Token::One,
            c => Token::Lit(c),
        });
    }
    let value: Vec<char> = value.chars().collect();
    like_tokens(&tokens, &value)
}

fn like_tokens(tokens: &[Token], value: &[char]) -> bool {
    match tokens.split_first() {
        None => value.is_empty(),
        Some((Token::Any, rest)) => {
            (0..=value.len()).any(|skip| value.get(skip..).is_some_and(|tail| like_tokens(rest, tail)))
        }
        Some((Token::One, rest)) => value
            .split_first()
            .is_some_and(|(_, tail)| like_tokens(rest, tail)),
        Some((Token::Lit(c), rest)) => value.split_first().is_some_and(|(v, tail)| {
            v.to_lowercase().eq(c.to_lowercase()) && like_tokens(rest, tail)
        }),
    }
}
