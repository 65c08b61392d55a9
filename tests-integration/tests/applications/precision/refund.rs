use ibc_app_precision::handler::{exchange_refunded_voucher, Compensation, RefundOutcome, RefundStep};
use ibc_app_precision::module::on_acknowledgement_packet_execute;
use ibc_app_precision::types::error::PrecisionError;
use ibc_app_precision::types::{Amount, PacketPayload};
use ibc_core::channel::types::Version;
use ibc_core::router::types::module::ModuleExtras;
use ibc_precision_testkit::fixtures::applications::precision::{
    dummy_packet, dummy_precision_context, dummy_relayer, dummy_sender, dummy_settings,
    PayloadConfig, NATIVE_DENOM, TRACKED_PACKET_DENOM,
};
use ibc_precision_testkit::fixtures::core::channel::{dummy_error_ack, DUMMY_CHANNEL_VERSION};
use ibc_precision_testkit::testapp::ibc::applications::precision::types::{
    MockPrecisionContext, MockTransferCallback,
};
use rstest::*;

const VOUCHER_AMOUNT: u64 = 1_000_000_000_000_000_000;
const NATIVE_AMOUNT: u64 = 1_000_000;
const MODULE_NATIVE: u64 = 1_000_000_000;

fn error_kinds(extras: &ModuleExtras) -> usize {
    extras
        .events
        .iter()
        .filter(|e| e.kind == "precision_error")
        .count()
}

fn refund_on_error_ack(ctx: &mut MockPrecisionContext) -> ModuleExtras {
    let payload: PacketPayload = PayloadConfig::builder().build();
    let mut callback = MockTransferCallback::default();

    let (extras, res) = on_acknowledgement_packet_execute(
        ctx,
        &mut callback,
        &Version::new(DUMMY_CHANNEL_VERSION.to_string()),
        &dummy_packet(&payload),
        &dummy_error_ack("receiver rejected"),
        &dummy_relayer(),
    );

    assert!(res.is_ok(), "refund failures never fail the acknowledgement: {res:?}");
    assert_eq!(callback.invocations, 1);
    extras
}

#[fixture]
fn ctx() -> MockPrecisionContext {
    dummy_precision_context(Amount::from(MODULE_NATIVE))
}

#[rstest]
fn error_ack_exchanges_voucher_for_native(mut ctx: MockPrecisionContext) {
    let extras = refund_on_error_ack(&mut ctx);
    let sender = dummy_sender();

    assert!(extras.events.iter().any(|e| e.kind == "refund_completed"));
    assert_eq!(error_kinds(&extras), 0);
    assert_eq!(ctx.balance_of(&sender, TRACKED_PACKET_DENOM), Amount::from(0u64));
    assert_eq!(
        ctx.balance_of(&sender, NATIVE_DENOM),
        Amount::from(NATIVE_AMOUNT)
    );
    assert_eq!(
        ctx.module_balance_of(TRACKED_PACKET_DENOM),
        Amount::from(VOUCHER_AMOUNT)
    );
    assert_eq!(
        ctx.module_balance_of(NATIVE_DENOM),
        Amount::from(MODULE_NATIVE - NATIVE_AMOUNT)
    );
    assert_eq!(ctx.total_transferred_out, Amount::from(0u64));
}

#[rstest]
fn failed_unlock_puts_voucher_back(ctx: MockPrecisionContext) {
    let mut ctx = ctx.with_failing_unlock(NATIVE_DENOM);
    let sender = dummy_sender();

    let extras = refund_on_error_ack(&mut ctx);

    assert_eq!(error_kinds(&extras), 1);
    assert_eq!(
        ctx.balance_of(&sender, TRACKED_PACKET_DENOM),
        Amount::from(VOUCHER_AMOUNT)
    );
    assert_eq!(ctx.balance_of(&sender, NATIVE_DENOM), Amount::from(0u64));
    assert_eq!(ctx.module_balance_of(TRACKED_PACKET_DENOM), Amount::from(0u64));
    assert_eq!(ctx.module_balance_of(NATIVE_DENOM), Amount::from(MODULE_NATIVE));
}

#[rstest]
fn failed_compensation_leaves_voucher_locked(ctx: MockPrecisionContext) {
    let mut ctx = ctx
        .with_failing_unlock(NATIVE_DENOM)
        .with_failing_unlock(TRACKED_PACKET_DENOM);
    let sender = dummy_sender();

    let extras = refund_on_error_ack(&mut ctx);

    assert_eq!(error_kinds(&extras), 2);
    assert_eq!(ctx.balance_of(&sender, TRACKED_PACKET_DENOM), Amount::from(0u64));
    assert_eq!(
        ctx.module_balance_of(TRACKED_PACKET_DENOM),
        Amount::from(VOUCHER_AMOUNT)
    );
}

#[rstest]
#[case::empty_module(0)]
#[case::short_module(NATIVE_AMOUNT - 1)]
fn module_without_native_funds_writes_nothing(#[case] module_native: u64) {
    let mut ctx = dummy_precision_context(Amount::from(module_native));
    let sender = dummy_sender();

    let extras = refund_on_error_ack(&mut ctx);

    assert_eq!(error_kinds(&extras), 1);
    assert_eq!(
        ctx.balance_of(&sender, TRACKED_PACKET_DENOM),
        Amount::from(VOUCHER_AMOUNT)
    );
    assert_eq!(ctx.module_balance_of(NATIVE_DENOM), Amount::from(module_native));
}

#[rstest]
fn failed_lock_aborts_exchange(ctx: MockPrecisionContext) {
    let mut ctx = ctx
        .with_balance(&dummy_sender(), TRACKED_PACKET_DENOM, Amount::from(VOUCHER_AMOUNT))
        .with_failing_lock(TRACKED_PACKET_DENOM);
    let token = PayloadConfig::builder()
        .build()
        .prefixed_coin()
        .expect("valid token");

    let outcome = exchange_refunded_voucher(&mut ctx, &dummy_settings(), &dummy_sender(), &token);

    assert!(matches!(
        outcome,
        RefundOutcome::Aborted {
            step: RefundStep::LockVoucher,
            error: PrecisionError::Custody { .. },
        }
    ));
    assert_eq!(
        ctx.balance_of(&dummy_sender(), TRACKED_PACKET_DENOM),
        Amount::from(VOUCHER_AMOUNT)
    );
}

#[rstest]
fn exchange_reports_each_outcome(ctx: MockPrecisionContext) {
    let sender = dummy_sender();
    let token = PayloadConfig::builder()
        .build()
        .prefixed_coin()
        .expect("valid token");
    let funded = ctx.with_balance(&sender, TRACKED_PACKET_DENOM, Amount::from(VOUCHER_AMOUNT));

    let mut ctx = funded.clone();
    let outcome = exchange_refunded_voucher(&mut ctx, &dummy_settings(), &sender, &token);
    let RefundOutcome::Completed(completed) = outcome else {
        panic!("expected a completed exchange, got {outcome:?}");
    };
    assert_eq!(completed.native.amount, Amount::from(NATIVE_AMOUNT));
    assert_eq!(completed.voucher.denom, TRACKED_PACKET_DENOM);

    let mut ctx = funded.clone().with_failing_unlock(NATIVE_DENOM);
    let outcome = exchange_refunded_voucher(&mut ctx, &dummy_settings(), &sender, &token);
    assert!(matches!(
        outcome,
        RefundOutcome::UnlockFailed {
            compensation: Compensation::Restored,
            ..
        }
    ));

    let mut ctx = funded
        .with_failing_unlock(NATIVE_DENOM)
        .with_failing_unlock(TRACKED_PACKET_DENOM);
    let outcome = exchange_refunded_voucher(&mut ctx, &dummy_settings(), &sender, &token);
    assert!(matches!(
        outcome,
        RefundOutcome::UnlockFailed {
            compensation: Compensation::Failed(_),
            ..
        }
    ));
}

#[test_log::test]
fn exchange_without_native_denom_aborts() {
    let mut ctx = dummy_precision_context(Amount::from(MODULE_NATIVE));
    let mut settings = dummy_settings();
    settings.native_denom = None;
    let token = PayloadConfig::builder()
        .build()
        .prefixed_coin()
        .expect("valid token");

    let outcome = exchange_refunded_voucher(&mut ctx, &settings, &dummy_sender(), &token);

    assert!(matches!(
        outcome,
        RefundOutcome::Aborted {
            step: RefundStep::ResolveDenoms,
            ..
        }
    ));
}
