use ibc_app_precision::module::{
    on_acknowledgement_packet_execute, on_acknowledgement_packet_validate,
};
use ibc_app_precision::types::error::PrecisionError;
use ibc_app_precision::types::{Amount, PacketPayload};
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::State;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::router::types::module::ModuleExtras;
use ibc_precision_testkit::fixtures::applications::precision::{
    dummy_packet, dummy_precision_context, dummy_relayer, dummy_settings, PayloadConfig,
};
use ibc_precision_testkit::fixtures::core::channel::{
    dummy_error_ack, dummy_malformed_ack, dummy_success_ack, PacketConfig, DUMMY_CHANNEL_VERSION,
};
use ibc_precision_testkit::fixtures::{Expect, Fixture};
use ibc_precision_testkit::testapp::ibc::applications::precision::types::{
    MockPrecisionContext, MockTransferCallback,
};
use rstest::*;

fn event_kinds(extras: &ModuleExtras) -> Vec<&str> {
    extras.events.iter().map(|e| e.kind.as_str()).collect()
}

fn execute(
    ctx: &mut MockPrecisionContext,
    callback: &mut MockTransferCallback,
    packet: &Packet,
    ack: &Acknowledgement,
) -> (ModuleExtras, Result<(), PrecisionError>) {
    on_acknowledgement_packet_execute(
        ctx,
        callback,
        &Version::new(DUMMY_CHANNEL_VERSION.to_string()),
        packet,
        ack,
        &dummy_relayer(),
    )
}

#[fixture]
fn fixture() -> Fixture<Packet> {
    let payload: PacketPayload = PayloadConfig::builder().build();
    Fixture {
        ctx: dummy_precision_context(Amount::from(1_000_000_000u64)),
        msg: dummy_packet(&payload),
    }
}

fn ack_execute_validate(fxt: &mut Fixture<Packet>, ack: &Acknowledgement, expect: Expect) {
    let mut callback = MockTransferCallback::default();
    let total_before = fxt.ctx.total_transferred_out;

    let (_, res) = execute(&mut fxt.ctx, &mut callback, &fxt.msg, ack);
    let err_msg = fxt.generate_error_msg(&expect, "execution", &res);

    match expect {
        Expect::Success => {
            assert!(res.is_ok(), "{err_msg}");
        }
        Expect::Failure(err) => {
            assert!(res.is_err(), "{err_msg}");
            if let Some(err) = err {
                assert_eq!(res.unwrap_err(), err, "{err_msg}");
            }
            assert_eq!(fxt.ctx.total_transferred_out, total_before, "{err_msg}");
        }
    }
}

#[rstest]
fn success_ack_records_scaled_amount(mut fixture: Fixture<Packet>) {
    let mut callback = MockTransferCallback::default();

    let (extras, res) = execute(
        &mut fixture.ctx,
        &mut callback,
        &fixture.msg,
        &dummy_success_ack(),
    );

    assert!(res.is_ok(), "{res:?}");
    assert_eq!(callback.invocations, 1);
    assert_eq!(
        fixture.ctx.total_transferred_out,
        Amount::from(1_000_000u64)
    );
    assert!(event_kinds(&extras).contains(&"transfer_out_recorded"));
}

#[rstest]
#[case::single(1)]
#[case::several(7)]
fn success_acks_accumulate(mut fixture: Fixture<Packet>, #[case] count: u64) {
    let mut callback = MockTransferCallback::default();

    for _ in 0..count {
        let (_, res) = execute(
            &mut fixture.ctx,
            &mut callback,
            &fixture.msg,
            &dummy_success_ack(),
        );
        assert!(res.is_ok(), "{res:?}");
    }

    assert_eq!(callback.invocations as u64, count);
    assert_eq!(
        fixture.ctx.total_transferred_out,
        Amount::from(count * 1_000_000)
    );
}

#[rstest]
fn amount_below_one_native_unit_is_rejected(mut fixture: Fixture<Packet>) {
    let mut settings = dummy_settings();
    settings.decimal_difference = 18;
    fixture.ctx.settings = settings;
    fixture.msg = dummy_packet(&PayloadConfig::builder().amount("999").build());

    ack_execute_validate(
        &mut fixture,
        &dummy_success_ack(),
        Expect::Failure(Some(PrecisionError::NonPositiveConversion)),
    );
}

#[rstest]
fn tracked_packet_on_other_route_is_rejected(mut fixture: Fixture<Packet>) {
    let payload: PacketPayload = PayloadConfig::builder().build();
    let packet: Packet = PacketConfig::builder()
        .chan_id_on_b(ChannelId::new(9))
        .data(serde_json::to_vec(&payload).expect("payload encodes"))
        .build();
    let mut callback = MockTransferCallback::default();

    let (extras, res) = execute(&mut fixture.ctx, &mut callback, &packet, &dummy_success_ack());

    assert_eq!(res, Err(PrecisionError::SettingsMismatch));
    assert_eq!(callback.invocations, 0, "transfer callback must not run");
    assert_eq!(fixture.ctx.total_transferred_out, Amount::from(0u64));
    assert_eq!(event_kinds(&extras), vec!["precision_error"]);
}

#[rstest]
fn disabled_middleware_rejects_tracked_packets(mut fixture: Fixture<Packet>) {
    fixture.ctx.settings.enabled = false;

    ack_execute_validate(
        &mut fixture,
        &dummy_success_ack(),
        Expect::Failure(Some(PrecisionError::Disabled)),
    );
}

#[rstest]
#[case::untracked_denom(PayloadConfig::builder().denom("transfer/channel-7/uatom").build())]
#[case::native_denom(PayloadConfig::builder().denom("utoken").build())]
fn untracked_packets_pass_through(mut fixture: Fixture<Packet>, #[case] payload: PacketPayload) {
    let packet = dummy_packet(&payload);
    let mut callback = MockTransferCallback::default();

    let (extras, res) = execute(&mut fixture.ctx, &mut callback, &packet, &dummy_success_ack());

    assert!(res.is_ok(), "{res:?}");
    assert_eq!(callback.invocations, 1);
    assert_eq!(fixture.ctx.total_transferred_out, Amount::from(0u64));
    assert_eq!(event_kinds(&extras), vec!["precision_info"]);
}

#[rstest]
fn unconfigured_middleware_passes_through(mut fixture: Fixture<Packet>) {
    fixture.ctx.settings = Default::default();
    let mut callback = MockTransferCallback::default();

    let (_, res) = execute(
        &mut fixture.ctx,
        &mut callback,
        &fixture.msg,
        &dummy_success_ack(),
    );

    assert!(res.is_ok(), "{res:?}");
    assert_eq!(callback.invocations, 1);
    assert_eq!(fixture.ctx.total_transferred_out, Amount::from(0u64));
}

#[rstest]
fn pass_through_returns_callback_error(mut fixture: Fixture<Packet>) {
    let packet = dummy_packet(&PayloadConfig::builder().denom("uatom").build());
    let mut callback = MockTransferCallback::failing("escrow account missing");

    let (_, res) = execute(&mut fixture.ctx, &mut callback, &packet, &dummy_success_ack());

    assert_eq!(
        res,
        Err(PrecisionError::Underlying {
            description: "escrow account missing".to_string()
        })
    );
}

#[rstest]
fn tracked_callback_error_stops_processing(mut fixture: Fixture<Packet>) {
    let mut callback = MockTransferCallback::failing("ack rejected");

    let (_, res) = execute(
        &mut fixture.ctx,
        &mut callback,
        &fixture.msg,
        &dummy_success_ack(),
    );

    assert!(matches!(res, Err(PrecisionError::Underlying { .. })));
    assert_eq!(fixture.ctx.total_transferred_out, Amount::from(0u64));
}

#[rstest]
fn unknown_channel_is_rejected(mut fixture: Fixture<Packet>) {
    fixture.ctx.channels.clear();

    ack_execute_validate(
        &mut fixture,
        &dummy_success_ack(),
        Expect::Failure(Some(PrecisionError::ChannelNotFound {
            port_id: PortId::transfer(),
            channel_id: ChannelId::zero(),
        })),
    );
}

#[rstest]
#[case::init(State::Init)]
#[case::closed(State::Closed)]
fn channel_not_open_is_rejected(mut fixture: Fixture<Packet>, #[case] state: State) {
    fixture.ctx = fixture
        .ctx
        .with_channel(PortId::transfer(), ChannelId::zero(), state);

    let mut callback = MockTransferCallback::default();
    let (_, res) = execute(
        &mut fixture.ctx,
        &mut callback,
        &fixture.msg,
        &dummy_success_ack(),
    );

    assert!(
        matches!(res, Err(PrecisionError::ChannelNotOpen { .. })),
        "{res:?}"
    );
    assert_eq!(callback.invocations, 0);
}

#[rstest]
fn malformed_packet_data_is_rejected(mut fixture: Fixture<Packet>) {
    fixture.msg = PacketConfig::builder().data(b"{not json".to_vec()).build();

    ack_execute_validate(
        &mut fixture,
        &dummy_success_ack(),
        Expect::Failure(Some(PrecisionError::PacketDataDeserialization)),
    );
}

#[rstest]
fn malformed_amount_is_rejected(mut fixture: Fixture<Packet>) {
    fixture.msg = dummy_packet(&PayloadConfig::builder().amount("1e18").build());

    ack_execute_validate(
        &mut fixture,
        &dummy_success_ack(),
        Expect::Failure(Some(PrecisionError::InvalidAmount {
            amount: "1e18".to_string(),
        })),
    );
}

#[rstest]
fn malformed_ack_is_rejected(mut fixture: Fixture<Packet>) {
    ack_execute_validate(
        &mut fixture,
        &dummy_malformed_ack(),
        Expect::Failure(Some(PrecisionError::AckDeserialization)),
    );
}

#[rstest]
fn error_ack_with_missing_voucher_still_succeeds(mut fixture: Fixture<Packet>) {
    // the voucher is refunded under its hashed denom, which the sender never received
    fixture.ctx = fixture
        .ctx
        .with_voucher_alias("transfer/channel-7/atoken", "ibc/27394FB092D2ECCD56123C74F36E4C1F");
    let mut callback = MockTransferCallback::default();

    let (extras, res) = execute(
        &mut fixture.ctx,
        &mut callback,
        &fixture.msg,
        &dummy_error_ack("receiver rejected"),
    );

    assert!(res.is_ok(), "{res:?}");
    assert_eq!(callback.invocations, 1);
    assert_eq!(fixture.ctx.total_transferred_out, Amount::from(0u64));
    assert!(event_kinds(&extras).contains(&"precision_error"));
    assert!(extras.log.iter().any(|line| line.starts_with("refund failed")));
}

#[rstest]
fn validate_accepts_what_execute_accepts(fixture: Fixture<Packet>) {
    let res = on_acknowledgement_packet_validate(
        &fixture.ctx,
        &fixture.msg,
        &dummy_success_ack(),
        &dummy_relayer(),
    );

    assert!(res.is_ok(), "{res:?}");
}

#[rstest]
fn validate_rejects_disabled_middleware(mut fixture: Fixture<Packet>) {
    fixture.ctx.settings.enabled = false;

    let res = on_acknowledgement_packet_validate(
        &fixture.ctx,
        &fixture.msg,
        &dummy_success_ack(),
        &dummy_relayer(),
    );

    assert_eq!(res, Err(PrecisionError::Disabled));
}

#[rstest]
fn validate_rejects_malformed_ack(fixture: Fixture<Packet>) {
    let res = on_acknowledgement_packet_validate(
        &fixture.ctx,
        &fixture.msg,
        &dummy_malformed_ack(),
        &dummy_relayer(),
    );

    assert_eq!(res, Err(PrecisionError::AckDeserialization));
}
