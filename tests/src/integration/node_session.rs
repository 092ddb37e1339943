//! A running node answering newline-delimited JSON, with its audit log
//! attached to the bus.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ADMIN, MAKER, OUTSIDER, RETAILER};
    use custody_registry::{
        CustodyRegistryApi, ErrorKind, RegistryConfig, RegistryReply, RegistryRequest,
        RegistryResponse,
    };
    use registry_node::demo::DEMO_PRODUCT;
    use registry_node::{run_demo, DemoAccounts, NodeConfig, NodeRuntime};
    use shared_types::{to_bytes32_hex, AccountId, AuthenticatedRequest, ProductCode, ProductStatus};

    fn node() -> NodeRuntime {
        let mut runtime = NodeRuntime::new(NodeConfig {
            admin: ADMIN,
            registry: RegistryConfig::default(),
            demo: false,
            event_capacity: 64,
        });
        runtime.start();
        runtime
    }

    fn line(caller: AccountId, request: RegistryRequest) -> String {
        serde_json::to_string(&AuthenticatedRequest::new(caller, request)).unwrap()
    }

    async fn session(runtime: &NodeRuntime, requests: &[String]) -> Vec<RegistryResponse> {
        let input = requests.join("\n") + "\n";
        let mut output = Vec::new();
        let served = runtime
            .serve_lines(input.as_bytes(), &mut output)
            .await
            .unwrap();
        assert_eq!(served as usize, requests.len());

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_custody_session_over_lines() {
        let runtime = node();
        let requests = [
            line(
                ADMIN,
                RegistryRequest::EnrollManufacturer {
                    representative_id: MAKER,
                    company_prefix: "1234".into(),
                    company_name: to_bytes32_hex("Acme").unwrap(),
                    validity_duration_ms: 3_600_000,
                },
            ),
            line(
                MAKER,
                RegistryRequest::EnrollProduct {
                    product_code: "1234567899".into(),
                },
            ),
            line(
                MAKER,
                RegistryRequest::ShipProduct {
                    product_code: "1234567899".into(),
                    recipient: RETAILER,
                },
            ),
            // In transit: the maker no longer holds it.
            line(
                MAKER,
                RegistryRequest::ShipProduct {
                    product_code: "1234567899".into(),
                    recipient: OUTSIDER,
                },
            ),
            line(
                RETAILER,
                RegistryRequest::ReceiveProduct {
                    product_code: "1234567899".into(),
                },
            ),
            line(
                OUTSIDER,
                RegistryRequest::GetCurrentOwner {
                    product_code: "1234567899".into(),
                },
            ),
        ];

        let responses = session(&runtime, &requests).await;

        let outcomes: Vec<bool> = responses.iter().map(|r| r.success).collect();
        assert_eq!(outcomes, vec![true, true, true, false, true, true]);
        assert_eq!(
            responses[3].error.as_ref().map(|f| f.kind),
            Some(ErrorKind::NotOwner)
        );
        assert_eq!(responses[5].reply, Some(RegistryReply::Account(RETAILER)));

        // manufacturer (1) + product (1) + ship (2) + receive (1)
        assert_eq!(runtime.shutdown().await, 5);
    }

    #[tokio::test]
    async fn test_demo_then_retailer_accepts() {
        let runtime = node();
        let accounts = DemoAccounts::with_admin(ADMIN);
        let report = run_demo(runtime.handler(), accounts).unwrap();
        assert_eq!(report.recipient, accounts.retailer);

        let responses = session(
            &runtime,
            &[line(
                accounts.retailer,
                RegistryRequest::ReceiveProduct {
                    product_code: DEMO_PRODUCT.into(),
                },
            )],
        )
        .await;
        assert!(responses[0].success);

        let product = runtime
            .registry()
            .get_product(&ProductCode::new(DEMO_PRODUCT).unwrap())
            .unwrap();
        assert_eq!(product.current_owner, accounts.retailer);
        assert_eq!(product.status, ProductStatus::Owned);

        assert_eq!(runtime.shutdown().await, 5);
    }
}
