use ibc_core::channel::types::acknowledgement::{
    Acknowledgement, AcknowledgementStatus, StatusValue,
};

/// The ICS-20 success result, `base64(0x01)`.
pub const ACK_SUCCESS_B64: &str = "AQ==";

/// Returns an ICS-20 success acknowledgement, `{"result":"AQ=="}`.
pub fn dummy_success_ack() -> Acknowledgement {
    AcknowledgementStatus::success(
        StatusValue::new(ACK_SUCCESS_B64).expect("ack status value is never empty"),
    )
    .into()
}

/// Returns an ICS-20 error acknowledgement, `{"error":"<reason>"}`.
pub fn dummy_error_ack(reason: &str) -> Acknowledgement {
    AcknowledgementStatus::error(StatusValue::new(reason).expect("error reason must not be empty"))
        .into()
}

/// Returns acknowledgement bytes that are not valid JSON.
pub fn dummy_malformed_ack() -> Acknowledgement {
    Acknowledgement::try_from(b"not-json".to_vec()).expect("ack bytes are not empty")
}
