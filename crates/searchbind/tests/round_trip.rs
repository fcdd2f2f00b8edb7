//! Serialized records bind back into equal records.
//!
//! A value is serialized with serde, parsed into a `SourceValue` tree and bound
//! onto a fresh default instance; every bound field must come back unchanged.

use proptest::prelude::*;
use searchbind::{bind, bind_value, Bindable, SourceValue};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Bindable)]
struct Attachment {
    #[bind]
    name: String,
    #[bind]
    size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Bindable)]
struct Sender {
    #[bind]
    address: String,
    #[bind]
    verified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Bindable)]
struct Message {
    #[bind]
    subject: String,
    #[serde(rename = "attachmentCount")]
    #[bind("attachmentCount")]
    attachment_count: u16,
    #[bind]
    offset: i64,
    #[bind]
    score: f64,
    #[bind]
    priority: i8,
    #[bind]
    sender: Sender,
    #[bind]
    attachments: Vec<Attachment>,
}

fn attachment_strategy() -> impl Strategy<Value = Attachment> {
    ("[a-z]{1,8}\\.[a-z]{3}", any::<u64>()).prop_map(|(name, size)| Attachment { name, size })
}

fn sender_strategy() -> impl Strategy<Value = Sender> {
    ("[a-z]{1,8}@[a-z]{1,8}\\.org", any::<bool>())
        .prop_map(|(address, verified)| Sender { address, verified })
}

fn message_strategy() -> impl Strategy<Value = Message> {
    (
        ".{0,24}",
        any::<u16>(),
        any::<i64>(),
        -1.0e12f64..1.0e12f64,
        any::<i8>(),
        sender_strategy(),
        prop::collection::vec(attachment_strategy(), 0..4),
    )
        .prop_map(
            |(subject, attachment_count, offset, score, priority, sender, attachments)| Message {
                subject,
                attachment_count,
                offset,
                score,
                priority,
                sender,
                attachments,
            },
        )
}

proptest! {
    #[test]
    fn serialized_message_binds_back(message in message_strategy()) {
        let json = serde_json::to_value(&message).unwrap();
        let mut fresh = Message::default();
        bind_value(&mut fresh, &SourceValue::from(json)).unwrap();
        prop_assert_eq!(fresh, message);
    }

    #[test]
    fn rebinding_same_fields_is_idempotent(message in message_strategy()) {
        let fields = SourceValue::from(serde_json::to_value(&message).unwrap())
            .into_mapping()
            .unwrap();
        let mut target = Message::default();
        bind(&mut target, &fields).unwrap();
        let once = target.clone();
        bind(&mut target, &fields).unwrap();
        prop_assert_eq!(target, once);
    }
}
