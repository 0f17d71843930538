//! End-to-end lifecycle: asset creation, peer-to-peer resale, profit
//! distribution and claim, with the ledger invariants checked along the way.

use std::sync::Arc;

use fexse_assets::AssetRegistry;
use fexse_core::{
    AccessControl, AccountId, AssetId, Currency, DenyList, FixedRate, FlatGasMeter, OrderId, Role,
    RoleBook,
};
use fexse_distribution::DistributionEngine;
use fexse_ledger::PaymentLedger;
use fexse_settlement::{SettlementConfig, SettlementEngine, SettlementError};

fn account(byte: u8) -> AccountId {
    AccountId::new([byte; 32])
}

struct Platform {
    registry: Arc<AssetRegistry>,
    payments: Arc<PaymentLedger>,
    distribution: DistributionEngine,
    settlement: SettlementEngine,
    compliance: Arc<DenyList>,
    admin: AccountId,
    treasury: AccountId,
    funding: AccountId,
    operator: AccountId,
    fee_sink: AccountId,
}

fn platform() -> Platform {
    let admin = account(1);
    let treasury = account(2);
    let funding = account(3);
    let fee_sink = account(4);
    let operator = account(5);

    let roles = RoleBook::new();
    roles.grant(Role::Admin, admin);
    let access: Arc<dyn AccessControl> = Arc::new(roles);

    let registry = Arc::new(AssetRegistry::new(access.clone(), treasury));
    let payments = Arc::new(PaymentLedger::new());
    payments
        .mint(Currency::Fexse, funding, 10_000_000)
        .unwrap();

    let distribution = DistributionEngine::new(
        registry.clone(),
        payments.clone(),
        Arc::new(FixedRate::identity()),
        access.clone(),
        funding,
    );

    let compliance = Arc::new(DenyList::new());
    let settlement = SettlementEngine::new(
        registry.clone(),
        payments.clone(),
        compliance.clone(),
        access,
        Arc::new(FlatGasMeter(0)),
        SettlementConfig::new(fee_sink, operator),
    );

    Platform {
        registry,
        payments,
        distribution,
        settlement,
        compliance,
        admin,
        treasury,
        funding,
        operator,
        fee_sink,
    }
}

/// Holder-set/holdings consistency plus share conservation for one asset
fn assert_invariants(p: &Platform, asset_id: AssetId, expected_supply: u128) {
    let holders = p.registry.holders(asset_id).unwrap();
    let mut sum = 0u128;
    for holder in &holders {
        let position = p.registry.position(asset_id, holder).unwrap();
        assert!(position.holdings > 0, "holder set entry with zero holdings");
        assert_eq!(
            position.holdings,
            p.registry.share_balance(asset_id, holder),
            "position cache diverged from the share ledger"
        );
        assert!(
            p.registry.locked_shares(asset_id, holder) <= position.holdings,
            "locked exceeds holdings"
        );
        sum += position.holdings;
    }
    assert_eq!(sum, expected_supply, "shares created or destroyed");
    assert_eq!(
        p.registry.total_in_circulation(asset_id).unwrap(),
        expected_supply
    );
}

#[test]
fn full_asset_lifecycle() {
    let p = platform();
    let asset = AssetId(1);
    let alice = account(10);
    let bob = account(11);

    // Create: full supply to the treasury
    p.registry
        .create_asset(&p.admin, asset, 1000, 100, "ipfs://deed-1".into())
        .unwrap();
    assert_invariants(&p, asset, 1000);

    // Primary sale: treasury sells 600 to alice via settlement
    p.registry
        .set_operator(&p.treasury, asset, p.operator, true)
        .unwrap();
    p.payments.mint(Currency::Fexse, alice, 500_000).unwrap();
    p.payments
        .approve(Currency::Fexse, alice, p.operator, 500_000);

    let receipt = p
        .settlement
        .transfer_asset(
            &p.admin,
            OrderId(1),
            p.treasury,
            alice,
            asset,
            600,
            100,
            Currency::Fexse,
        )
        .unwrap();
    // gross 60_000, fee 0.5% = 300
    assert_eq!(receipt.gross_value, 60_000);
    assert_eq!(receipt.service_fee, 300);
    assert_eq!(p.payments.balance_of(Currency::Fexse, &p.treasury), 59_700);
    assert_eq!(p.payments.balance_of(Currency::Fexse, &p.fee_sink), 300);
    assert_invariants(&p, asset, 1000);

    // Distribute 1000 profit over the 400/600 split
    p.distribution
        .distribute_profit(&p.admin, asset, 1000)
        .unwrap();
    assert_eq!(p.registry.pending_profit(asset, &p.treasury).unwrap(), 400);
    assert_eq!(p.registry.pending_profit(asset, &alice).unwrap(), 600);

    // Alice claims; paid from the funding account
    let payout = p.distribution.claim_profit(&alice, asset).unwrap();
    assert_eq!(payout, 600);
    assert_eq!(
        p.payments.balance_of(Currency::Fexse, &p.funding),
        10_000_000 - 600
    );
    assert_eq!(p.registry.pending_profit(asset, &alice).unwrap(), 0);

    // Alice lists 200 shares at 120 and bob fills half the listing
    p.registry
        .set_operator(&alice, asset, p.operator, true)
        .unwrap();
    p.registry
        .list_shares_for_sale(&alice, asset, 200, 120)
        .unwrap();
    p.payments.mint(Currency::Fexse, bob, 100_000).unwrap();
    p.payments.approve(Currency::Fexse, bob, p.operator, 100_000);

    let receipt = p
        .settlement
        .settle_listing(&p.admin, OrderId(2), alice, bob, asset, 100, Currency::Fexse)
        .unwrap();
    assert_eq!(receipt.unit_price, 120);
    assert_eq!(p.registry.share_balance(asset, &bob), 100);
    assert_eq!(
        p.registry.position(asset, &alice).unwrap().shares_for_sale,
        100
    );
    assert_invariants(&p, asset, 1000);

    // Three holders now
    assert_eq!(p.registry.holder_count(asset).unwrap(), 3);
}

#[test]
fn blacklisted_buyer_cannot_settle_and_nothing_moves() {
    let p = platform();
    let asset = AssetId(1);
    let mallory = account(66);

    p.registry
        .create_asset(&p.admin, asset, 100, 10, String::new())
        .unwrap();
    p.registry
        .set_operator(&p.treasury, asset, p.operator, true)
        .unwrap();
    p.payments.mint(Currency::Fexse, mallory, 10_000).unwrap();
    p.payments
        .approve(Currency::Fexse, mallory, p.operator, 10_000);
    p.compliance.deny(mallory);

    let err = p
        .settlement
        .transfer_asset(
            &p.admin,
            OrderId(1),
            p.treasury,
            mallory,
            asset,
            10,
            10,
            Currency::Fexse,
        )
        .unwrap_err();
    assert!(matches!(err, SettlementError::Compliance(_)));

    assert_eq!(p.registry.share_balance(asset, &mallory), 0);
    assert_eq!(p.payments.balance_of(Currency::Fexse, &mallory), 10_000);
    assert_invariants(&p, asset, 100);
}

#[test]
fn ranged_distribution_campaign_over_many_holders() {
    let p = platform();
    let asset = AssetId(1);

    p.registry
        .create_asset(&p.admin, asset, 10_000, 1, String::new())
        .unwrap();

    // Spread shares over 20 holders, 500 each
    for i in 0..20u8 {
        p.registry
            .transfer_shares(&p.treasury, asset, p.treasury, account(100 + i), 500)
            .unwrap();
    }
    assert_eq!(p.registry.holder_count(asset).unwrap(), 20);

    let len = p
        .distribution
        .begin_distribution(&p.admin, asset, 10_000)
        .unwrap();
    assert_eq!(len, 20);

    // Sweep in three batches
    p.distribution
        .distribute_range(&p.admin, asset, 0, 7)
        .unwrap();
    p.distribution
        .distribute_range(&p.admin, asset, 8, 15)
        .unwrap();
    assert_eq!(
        p.registry.asset_info(asset).unwrap().total_profit_accrued,
        0,
        "finalization must wait for the last range"
    );
    p.distribution
        .distribute_range(&p.admin, asset, 16, 19)
        .unwrap();

    assert_eq!(
        p.registry.asset_info(asset).unwrap().total_profit_accrued,
        10_000
    );
    for i in 0..20u8 {
        assert_eq!(
            p.registry.pending_profit(asset, &account(100 + i)).unwrap(),
            500
        );
    }

    // Everyone claims; funding drains by exactly the credited total
    for i in 0..20u8 {
        p.distribution
            .claim_profit(&account(100 + i), asset)
            .unwrap();
    }
    assert_eq!(
        p.payments.balance_of(Currency::Fexse, &p.funding),
        10_000_000 - 10_000
    );
}
