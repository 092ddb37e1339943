//! # Notification Delivery
//!
//! Observers subscribe to the shared bus and see exactly the notifications
//! returned to the committing caller, in the same order.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use custody_registry::RegistryRequest;
    use shared_bus::{CustodyEvent, EventFilter, EventTopic};
    use shared_types::{to_bytes32_hex, ProductCode, ProductStatus};
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn enroll(net: &TestRegistry, codes: &[&str]) {
        net.call(
            ADMIN,
            RegistryRequest::EnrollManufacturer {
                representative_id: MAKER,
                company_prefix: "1234".into(),
                company_name: to_bytes32_hex("Acme").unwrap(),
                validity_duration_ms: 0,
            },
        );
        for code in codes {
            net.call(
                MAKER,
                RegistryRequest::EnrollProduct {
                    product_code: code.to_string(),
                },
            );
        }
    }

    #[tokio::test]
    async fn test_observer_sees_what_caller_sees() {
        let net = TestRegistry::new();
        let mut all = net.bus.subscribe(EventFilter::all());
        enroll(&net, &["1"]);

        let response = net.call(
            MAKER,
            RegistryRequest::ShipProduct {
                product_code: "1".into(),
                recipient: RETAILER,
            },
        );
        assert_eq!(response.events.len(), 2);

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(
                timeout(Duration::from_millis(100), all.recv())
                    .await
                    .expect("Should receive within timeout")
                    .expect("Should have event"),
            );
        }
        assert!(matches!(seen[0], CustodyEvent::ManufacturerCreated { .. }));
        assert!(matches!(seen[1], CustodyEvent::ProductCreated { .. }));
        assert_eq!(seen[2..], response.events[..]);
    }

    #[tokio::test]
    async fn test_product_filtered_stream() {
        let net = TestRegistry::new();
        let watched = ProductCode::new("2").unwrap();
        let mut stream = net.bus.event_stream(EventFilter::product(watched.clone()));
        enroll(&net, &["1", "2"]);

        for code in ["1", "2"] {
            net.call(
                MAKER,
                RegistryRequest::ShipProduct {
                    product_code: code.into(),
                    recipient: RETAILER,
                },
            );
        }
        net.call(
            RETAILER,
            RegistryRequest::ReceiveProduct {
                product_code: "2".into(),
            },
        );

        let mut statuses = Vec::new();
        while let Ok(Some(event)) = timeout(Duration::from_millis(50), stream.next()).await {
            assert_eq!(event.product_code(), Some(&watched));
            if let CustodyEvent::ProductStatusChanged(status) = event {
                statuses.push(status.status);
            }
        }
        assert_eq!(statuses, vec![ProductStatus::Shipped, ProductStatus::Owned]);
    }

    #[tokio::test]
    async fn test_rejections_publish_nothing() {
        let net = TestRegistry::new();
        enroll(&net, &["1"]);
        let mut custody = net.bus.subscribe(EventFilter::topics(vec![EventTopic::Custody]));

        net.call(
            OUTSIDER,
            RegistryRequest::ShipProduct {
                product_code: "1".into(),
                recipient: OUTSIDER,
            },
        );
        net.call(
            OUTSIDER,
            RegistryRequest::ReceiveProduct {
                product_code: "1".into(),
            },
        );

        assert!(custody.drain().is_empty());
        assert_eq!(net.registry.stats().operations_rejected, 2);
    }
}
