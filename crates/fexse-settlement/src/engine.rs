//! Settlement engine

use crate::error::{Result, SettlementError};
use crate::events::SettlementEvent;
use fexse_assets::AssetRegistry;
use fexse_core::{
    AccessControl, AccountId, AssetId, Balance, ComplianceCheck, Currency, GasMeter, OrderId, Role,
    BPS_DENOMINATOR, DEFAULT_FEE_BPS, GAS_SURCHARGE_THRESHOLD_PCT,
};
use fexse_ledger::{LedgerError, PaymentLedger};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Static settlement parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Service fee in basis points of the gross value
    pub fee_bps: Balance,
    /// Payment-token units per gas unit, for the surcharge conversion
    pub gas_price: Balance,
    /// Account collecting service fees and surcharges
    pub fee_sink: AccountId,
    /// The engine's own ledger identity: sellers approve it as share
    /// operator, buyers grant it payment allowances
    pub operator: AccountId,
}

impl SettlementConfig {
    /// Default 0.5% fee, surcharge disabled (zero gas price)
    pub fn new(fee_sink: AccountId, operator: AccountId) -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
            gas_price: 0,
            fee_sink,
            operator,
        }
    }
}

/// Outcome of one settled trade
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub order_id: OrderId,
    pub asset_id: AssetId,
    pub seller: AccountId,
    pub buyer: AccountId,
    pub share_amount: Balance,
    pub unit_price: Balance,
    pub currency: Currency,
    pub gross_value: Balance,
    pub service_fee: Balance,
    pub gas_surcharge: Balance,
    pub at: i64,
}

/// Atomic share-for-payment exchange
pub struct SettlementEngine {
    registry: Arc<AssetRegistry>,
    payments: Arc<PaymentLedger>,
    compliance: Arc<dyn ComplianceCheck>,
    access: Arc<dyn AccessControl>,
    gas_meter: Arc<dyn GasMeter>,
    config: SettlementConfig,
    /// Non-reentrant guard over the whole settlement path
    guard: Mutex<()>,
    events: RwLock<Vec<SettlementEvent>>,
}

impl SettlementEngine {
    pub fn new(
        registry: Arc<AssetRegistry>,
        payments: Arc<PaymentLedger>,
        compliance: Arc<dyn ComplianceCheck>,
        access: Arc<dyn AccessControl>,
        gas_meter: Arc<dyn GasMeter>,
        config: SettlementConfig,
    ) -> Self {
        Self {
            registry,
            payments,
            compliance,
            access,
            gas_meter,
            config,
            guard: Mutex::new(()),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Settle one trade: buyer pays `unit_price * share_amount` in
    /// `currency`, seller receives the gross net of the service fee, shares
    /// move seller to buyer, fee and any gas surcharge go to the fee sink
    ///
    /// Single-shot and all-or-nothing; on any precondition failure nothing
    /// has moved and the caller must resubmit a fresh call.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_asset(
        &self,
        caller: &AccountId,
        order_id: OrderId,
        seller: AccountId,
        buyer: AccountId,
        asset_id: AssetId,
        share_amount: Balance,
        unit_price: Balance,
        currency: Currency,
    ) -> Result<SettlementReceipt> {
        let _held = self.guard.try_lock().ok_or(SettlementError::ReentrantCall)?;
        self.ensure_operator_role(caller)?;
        self.settle(
            order_id,
            seller,
            buyer,
            asset_id,
            share_amount,
            unit_price,
            currency,
            false,
        )
    }

    /// Settle against the seller's active sale listing at the listed price
    ///
    /// The listed shares are released from their listing lock as part of the
    /// trade; validations run before the listing is consumed.
    pub fn settle_listing(
        &self,
        caller: &AccountId,
        order_id: OrderId,
        seller: AccountId,
        buyer: AccountId,
        asset_id: AssetId,
        share_amount: Balance,
        currency: Currency,
    ) -> Result<SettlementReceipt> {
        let _held = self.guard.try_lock().ok_or(SettlementError::ReentrantCall)?;
        self.ensure_operator_role(caller)?;

        let listed = self
            .registry
            .position(asset_id, &seller)
            .map(|p| (p.shares_for_sale, p.sale_price));
        let unit_price = match listed {
            Some((amount, price)) if amount >= share_amount && share_amount > 0 => price,
            _ => {
                return Err(SettlementError::Asset(fexse_assets::AssetError::ListingTooSmall {
                    requested: share_amount,
                    listed: listed.map(|(amount, _)| amount).unwrap_or(0),
                }))
            }
        };
        self.settle(
            order_id,
            seller,
            buyer,
            asset_id,
            share_amount,
            unit_price,
            currency,
            true,
        )
    }

    /// Event history since construction
    pub fn events(&self) -> Vec<SettlementEvent> {
        self.events.read().clone()
    }

    /// Current configuration
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    #[allow(clippy::too_many_arguments)]
    fn settle(
        &self,
        order_id: OrderId,
        seller: AccountId,
        buyer: AccountId,
        asset_id: AssetId,
        share_amount: Balance,
        unit_price: Balance,
        currency: Currency,
        from_listing: bool,
    ) -> Result<SettlementReceipt> {
        // 1. Structural validation
        if seller.is_zero() || buyer.is_zero() {
            return Err(SettlementError::InvalidParty);
        }
        if share_amount == 0 {
            return Err(SettlementError::ZeroShareAmount);
        }
        if unit_price == 0 {
            return Err(SettlementError::ZeroUnitPrice);
        }
        // Existence check before anything else touches the asset
        self.registry.asset_info(asset_id)?;

        // 2. Compliance gate
        self.compliance.pre_transfer_check(&seller, &buyer)?;

        // 3. Fee math, checked: a wrapped gross would price a huge trade
        // at a tiny value
        let gross_value = unit_price
            .checked_mul(share_amount)
            .ok_or(LedgerError::Overflow)?;
        let service_fee = gross_value
            .checked_mul(self.config.fee_bps)
            .ok_or(LedgerError::Overflow)?
            / BPS_DENOMINATOR;

        // The meter is read before any movement so the surcharge can be part
        // of the upfront checks and the trade stays all-or-nothing
        let gas_cost = (self.gas_meter.units() as Balance)
            .checked_mul(self.config.gas_price)
            .ok_or(LedgerError::Overflow)?;
        let threshold = service_fee
            .checked_mul(GAS_SURCHARGE_THRESHOLD_PCT)
            .ok_or(LedgerError::Overflow)?
            / 100;
        let gas_surcharge = if gas_cost > threshold { gas_cost } else { 0 };
        let buyer_total = gross_value
            .checked_add(gas_surcharge)
            .ok_or(LedgerError::Overflow)?;

        // 4. Both parties' approvals and balances
        if !self
            .registry
            .is_operator(asset_id, &seller, &self.config.operator)
        {
            return Err(SettlementError::SellerNotApproved(seller));
        }
        // Listed shares sit behind the listing lock; the listing itself is
        // the seller-side cover in that path
        let seller_cover = if from_listing {
            self.registry.locked_shares(asset_id, &seller)
        } else {
            self.registry.free_shares(asset_id, &seller)
        };
        if seller_cover < share_amount {
            return Err(SettlementError::InsufficientSellerShares {
                requested: share_amount,
                available: seller_cover,
            });
        }

        let granted = self
            .payments
            .allowance(currency, &buyer, &self.config.operator);
        if granted < buyer_total {
            return Err(SettlementError::Ledger(LedgerError::InsufficientAllowance {
                requested: buyer_total,
                granted,
            }));
        }
        let buyer_free = self.payments.free_of(currency, &buyer);
        if buyer_free < buyer_total {
            return Err(SettlementError::Ledger(LedgerError::InsufficientBalance {
                requested: buyer_total,
                free: buyer_free,
            }));
        }

        // 5. Commit. Checks above guarantee each step succeeds.
        if from_listing {
            self.registry
                .consume_listing(asset_id, &seller, share_amount)?;
        }
        self.payments.transfer_from(
            currency,
            self.config.operator,
            buyer,
            seller,
            gross_value - service_fee,
        )?;
        if service_fee > 0 {
            self.payments.transfer_from(
                currency,
                self.config.operator,
                buyer,
                self.config.fee_sink,
                service_fee,
            )?;
        }
        if gas_surcharge > 0 {
            self.payments.transfer_from(
                currency,
                self.config.operator,
                buyer,
                self.config.fee_sink,
                gas_surcharge,
            )?;
        }

        // 6. Shares move last; fires the holdings callback for both parties
        self.registry.transfer_shares(
            &self.config.operator,
            asset_id,
            seller,
            buyer,
            share_amount,
        )?;

        let at = chrono::Utc::now().timestamp();
        let receipt = SettlementReceipt {
            order_id,
            asset_id,
            seller,
            buyer,
            share_amount,
            unit_price,
            currency,
            gross_value,
            service_fee,
            gas_surcharge,
            at,
        };
        self.events.write().push(SettlementEvent::Executed {
            order_id,
            asset_id,
            seller,
            buyer,
            share_amount,
            unit_price,
            currency,
            gross_value,
            service_fee,
            gas_surcharge,
            at,
        });
        info!(
            %order_id, %asset_id, %seller, %buyer,
            share_amount, unit_price, %currency, gross_value, service_fee, gas_surcharge,
            "settlement executed"
        );
        Ok(receipt)
    }

    fn ensure_operator_role(&self, caller: &AccountId) -> Result<()> {
        if self.access.has_role(Role::SettlementOperator, caller) {
            Ok(())
        } else {
            Err(SettlementError::Unauthorized(*caller))
        }
    }
}
