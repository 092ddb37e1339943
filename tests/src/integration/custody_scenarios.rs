//! # Custody Scenarios
//!
//! 1. Admin enrolls a manufacturer; it reads back by representative
//! 2. The manufacturer registers a product; outsiders cannot
//! 3. Shipment to a retailer; only the retailer may receive
//! 4. A multi-hop chain ending with the last customer

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use custody_registry::ipc::{ManufacturerView, ProductView};
    use custody_registry::{ErrorKind, RegistryReply, RegistryRequest};
    use shared_types::{from_bytes32_hex, to_bytes32_hex, AccountId, ProductStatus};

    const ITEM: &str = "1234567899";

    fn enroll_acme(net: &TestRegistry) {
        let response = net.call(
            ADMIN,
            RegistryRequest::EnrollManufacturer {
                representative_id: MAKER,
                company_prefix: "1234".into(),
                company_name: to_bytes32_hex("Acme").unwrap(),
                validity_duration_ms: 3_600_000,
            },
        );
        assert!(response.success, "{:?}", response.error);
    }

    fn enroll_item(net: &TestRegistry) {
        let response = net.call(
            MAKER,
            RegistryRequest::EnrollProduct {
                product_code: ITEM.into(),
            },
        );
        assert!(response.success, "{:?}", response.error);
    }

    fn product(net: &TestRegistry) -> ProductView {
        match net
            .call(
                OUTSIDER,
                RegistryRequest::GetProduct {
                    product_code: ITEM.into(),
                },
            )
            .reply
        {
            Some(RegistryReply::Product(view)) => view,
            other => panic!("expected product, got {:?}", other),
        }
    }

    fn ship(net: &TestRegistry, from: AccountId, to: AccountId) -> bool {
        net.call(
            from,
            RegistryRequest::ShipProduct {
                product_code: ITEM.into(),
                recipient: to,
            },
        )
        .success
    }

    fn receive(net: &TestRegistry, by: AccountId) -> bool {
        net.call(
            by,
            RegistryRequest::ReceiveProduct {
                product_code: ITEM.into(),
            },
        )
        .success
    }

    #[test]
    fn test_scenario_manufacturer_reads_back() {
        let net = TestRegistry::new();
        enroll_acme(&net);

        let response = net.call(
            OUTSIDER,
            RegistryRequest::Manufacturer {
                representative_id: MAKER,
            },
        );
        let Some(RegistryReply::Manufacturer(ManufacturerView {
            company_prefix,
            company_name,
            ..
        })) = response.reply
        else {
            panic!("expected manufacturer reply");
        };
        assert_eq!(company_prefix, "1234");
        assert_eq!(from_bytes32_hex(&company_name).unwrap(), "Acme");
    }

    #[test]
    fn test_scenario_non_admin_cannot_enroll() {
        let net = TestRegistry::new();
        let response = net.call(
            OUTSIDER,
            RegistryRequest::EnrollManufacturer {
                representative_id: OUTSIDER,
                company_prefix: "9".into(),
                company_name: to_bytes32_hex("Evil").unwrap(),
                validity_duration_ms: 0,
            },
        );
        let failure = response.error.unwrap();
        assert_eq!(failure.kind, ErrorKind::Unauthorized);
        assert_eq!(failure.representative_id, Some(OUTSIDER));

        let lookup = net.call(
            OUTSIDER,
            RegistryRequest::Manufacturers { index: 0 },
        );
        assert_eq!(lookup.error.unwrap().kind, ErrorKind::RecordNotFound);
    }

    #[test]
    fn test_scenario_product_registration() {
        let net = TestRegistry::new();
        enroll_acme(&net);
        enroll_item(&net);

        let view = product(&net);
        assert_eq!(view.current_owner, MAKER);
        assert_eq!(view.status, ProductStatus::Created);

        let response = net.call(
            OUTSIDER,
            RegistryRequest::EnrollProduct {
                product_code: "999".into(),
            },
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::ManufacturerNotFound);
    }

    #[test]
    fn test_scenario_shipment_and_receipt() {
        let net = TestRegistry::new();
        enroll_acme(&net);
        enroll_item(&net);

        assert!(ship(&net, MAKER, RETAILER));
        let view = product(&net);
        assert_eq!(view.status, ProductStatus::Shipped);
        assert_eq!(view.recipient, RETAILER);

        let response = net.call(
            OUTSIDER,
            RegistryRequest::ReceiveProduct {
                product_code: ITEM.into(),
            },
        );
        let failure = response.error.unwrap();
        assert_eq!(failure.kind, ErrorKind::NotIntendedRecipient);
        assert_eq!(failure.product_code.as_deref(), Some(ITEM));
        assert!(failure
            .message
            .contains("The product wasn't meant for the sender"));

        assert!(receive(&net, RETAILER));
        let view = product(&net);
        assert_eq!(view.current_owner, RETAILER);
        assert_eq!(view.status, ProductStatus::Owned);
    }

    #[test]
    fn test_scenario_multi_hop_chain() {
        let net = TestRegistry::new();
        enroll_acme(&net);
        enroll_item(&net);

        for (from, to) in [(MAKER, RETAILER), (RETAILER, CUSTOMER_1), (CUSTOMER_1, CUSTOMER_2)] {
            assert!(ship(&net, from, to));
            assert!(receive(&net, to));
        }

        let view = product(&net);
        assert_eq!(view.current_owner, CUSTOMER_2);
        assert_eq!(view.recipient, AccountId::ZERO);
        assert_eq!(view.status, ProductStatus::Owned);
        assert_eq!(view.manufacturer, MAKER);
    }

    #[test]
    fn test_previous_holder_cannot_ship_again() {
        let net = TestRegistry::new();
        enroll_acme(&net);
        enroll_item(&net);
        assert!(ship(&net, MAKER, RETAILER));
        assert!(receive(&net, RETAILER));

        let before = product(&net);
        assert!(!ship(&net, MAKER, OUTSIDER));
        assert_eq!(product(&net), before);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let net = TestRegistry::new();
        enroll_acme(&net);
        enroll_item(&net);

        let response = net.call(
            MAKER,
            RegistryRequest::EnrollProduct {
                product_code: ITEM.into(),
            },
        );
        assert_eq!(response.error.unwrap().kind, ErrorKind::AlreadyExists);
    }
}
