// Shared helpers for integration tests: a zero-latency store seeded with a
// known spread of documents.

#![allow(dead_code)]

use docuflow::{Area, DeliveryState, DocumentStore, FileRef, StageArea, UserRef};

pub const SALES_SUPERVISOR: UserRef = UserRef {
    id: 5,
    area: Area::Sales,
};
pub const SALES_ASSISTANT: UserRef = UserRef {
    id: 3,
    area: Area::Sales,
};
pub const PURCHASING_USER: UserRef = UserRef {
    id: 2,
    area: Area::Purchasing,
};
pub const BILLING_USER: UserRef = UserRef {
    id: 4,
    area: Area::Billing,
};
pub const OPERATIONS_USER: UserRef = UserRef {
    id: 6,
    area: Area::Operations,
};

/// Three documents: one fully completed and in transit, one waiting on
/// billing, one freshly registered by the sales assistant.
pub async fn seeded_store() -> DocumentStore {
    let store = DocumentStore::in_memory();

    store
        .create("OC-1001", FileRef::new("po-1001.pdf"), &SALES_SUPERVISOR)
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Purchasing,
            FileRef::new("quote-1001.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Billing,
            FileRef::new("invoice-1001.pdf"),
            &BILLING_USER,
            false,
        )
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Operations,
            FileRef::new("dispatch-1001.pdf"),
            &OPERATIONS_USER,
            false,
        )
        .await;
    store
        .set_delivery_state("OC-1001", DeliveryState::InTransit, &OPERATIONS_USER)
        .await;

    store
        .create("OC-1002", FileRef::new("po-1002.pdf"), &SALES_ASSISTANT)
        .await;
    store
        .attach(
            "OC-1002",
            StageArea::Purchasing,
            FileRef::new("quote-1002.pdf"),
            &PURCHASING_USER,
            false,
        )
        .await;

    store
        .create("OC-1003", FileRef::new("po-1003.pdf"), &SALES_ASSISTANT)
        .await;

    store
}
