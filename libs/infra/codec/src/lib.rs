//! The broker/daemon wire codec: a `{"type": ..., "data": ...}` envelope
//! carrying one of a small fixed set of frame payloads.

mod error;
mod frame;

pub use error::CodecError;
pub use frame::{ActionFrame, Frame, FrameType, ResolvedFrame};

use notifier_model::Notification;
use serde_json::Value;

/// Serializes a frame into its wire envelope.
pub fn encode(frame: &Frame) -> Result<String, CodecError> {
    serde_json::to_string(frame).map_err(CodecError::Encode)
}

/// Parses a raw text frame into a typed `Frame`.
///
/// An envelope whose `type` field is not one of the known frame types is
/// not an error: it is logged and `Ok(None)` is returned, so a daemon or
/// broker running an older binary keeps working against a newer peer that
/// has learned a frame type it doesn't understand yet.
pub fn decode(raw: &str) -> Result<Option<Frame>, CodecError> {
    let envelope: Value = serde_json::from_str(raw).map_err(CodecError::Decode)?;
    let frame_type = envelope
        .get("type")
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingType)?;

    match frame_type {
        "notification" => {
            let data = take_data(&envelope)?;
            let notification: Notification = serde_json::from_value(data).map_err(CodecError::Decode)?;
            Ok(Some(Frame::Notification(notification)))
        }
        "action" => {
            let data = take_data(&envelope)?;
            let action: ActionFrame = serde_json::from_value(data).map_err(CodecError::Decode)?;
            Ok(Some(Frame::Action(action)))
        }
        "resolved" => {
            let data = take_data(&envelope)?;
            let resolved: ResolvedFrame = serde_json::from_value(data).map_err(CodecError::Decode)?;
            Ok(Some(Frame::Resolved(resolved)))
        }
        unknown => {
            tracing::warn!(frame_type = unknown, "ignoring frame of unknown type");
            Ok(None)
        }
    }
}

fn take_data(envelope: &Value) -> Result<Value, CodecError> {
    envelope.get("data").cloned().ok_or(CodecError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier_model::Notification;

    fn sample_notification() -> Notification {
        Notification {
            id: Some("1".into()),
            source: "src".into(),
            title: "t".into(),
            message: "m".into(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 5000,
            actions: vec![],
            exclusive: false,
        }
    }

    #[test]
    fn round_trips_a_notification_frame() {
        let frame = Frame::Notification(sample_notification());
        let encoded = encode(&frame).unwrap();
        let decoded = decode(&encoded).unwrap().unwrap();
        match decoded {
            Frame::Notification(n) => assert_eq!(n.id.as_deref(), Some("1")),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_ignored_not_errored() {
        let raw = r#"{"type":"future_frame","data":{}}"#;
        assert!(decode(raw).unwrap().is_none());
    }

    #[test]
    fn missing_type_is_an_error() {
        let raw = r#"{"data":{}}"#;
        assert!(matches!(decode(raw), Err(CodecError::MissingType)));
    }
}
