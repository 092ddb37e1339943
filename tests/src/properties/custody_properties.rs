//! Properties of the custody state machine.

use custody_registry::{CustodyRegistryApi, ProductRecord};
use shared_types::{AccountId, ProductCode, ProductStatus};

use crate::fixtures::Registry;

/// Accounts used by generated operations. Index 0 is the manufacturer.
pub const ACTORS: [AccountId; 4] = [
    AccountId::repeat_byte(0x01),
    AccountId::repeat_byte(0x02),
    AccountId::repeat_byte(0x03),
    AccountId::repeat_byte(0x04),
];

/// Product codes used by generated operations.
pub const CODES: [&str; 3] = ["100", "200", "300"];

/// One generated step.
#[derive(Debug, Clone)]
pub enum Step {
    Ship {
        caller: usize,
        code: usize,
        recipient: usize,
    },
    Receive {
        caller: usize,
        code: usize,
    },
}

/// `status == Shipped` exactly when a recipient is pending.
pub fn status_matches_recipient(product: &ProductRecord) -> bool {
    (product.status == ProductStatus::Shipped) == product.pending_recipient.is_some()
}

/// Every known product, as currently stored.
pub fn snapshot(registry: &Registry) -> Vec<ProductRecord> {
    CODES
        .iter()
        .filter_map(|code| {
            let code = ProductCode::new(*code).ok()?;
            registry.get_product(&code).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{TestRegistry, ADMIN};
    use custody_registry::{ManufacturerEnrollment, RegistryError};
    use proptest::prelude::*;
    use std::time::Duration;

    fn step_strategy() -> impl Strategy<Value = Step> {
        let actor = 0..ACTORS.len();
        let code = 0..CODES.len();
        prop_oneof![
            (actor.clone(), code.clone(), actor.clone()).prop_map(|(caller, code, recipient)| {
                Step::Ship {
                    caller,
                    code,
                    recipient,
                }
            }),
            (actor, code).prop_map(|(caller, code)| Step::Receive { caller, code }),
        ]
    }

    fn seeded() -> TestRegistry {
        let net = TestRegistry::new();
        net.registry
            .enroll_manufacturer(
                ADMIN,
                ManufacturerEnrollment::new(ACTORS[0], "1234", "Acme", Duration::ZERO),
            )
            .unwrap();
        for code in CODES {
            net.registry
                .enroll_product(ACTORS[0], ProductCode::new(code).unwrap())
                .unwrap();
        }
        net
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Nobody but the administrator can enroll a manufacturer.
        #[test]
        fn prop_only_admin_enrolls(byte in any::<u8>().prop_filter("not admin", |b| *b != 0xA0 && *b != 0)) {
            let net = TestRegistry::new();
            let caller = AccountId::repeat_byte(byte);
            let result = net.registry.enroll_manufacturer(
                caller,
                ManufacturerEnrollment::new(caller, "1", "X", Duration::ZERO),
            );
            prop_assert_eq!(result.unwrap_err(), RegistryError::Unauthorized { caller });
            prop_assert!(net.registry.manufacturer(&caller).is_err());
        }

        /// Only enrolled representatives can register products.
        #[test]
        fn prop_unenrolled_cannot_register(byte in 2u8..=255, code in "[0-9]{1,12}") {
            let net = seeded();
            let caller = AccountId::repeat_byte(byte);
            let code = ProductCode::new(code).unwrap();
            let existed = net.registry.get_product(&code).is_ok();

            let result = net.registry.enroll_product(caller, code.clone());
            prop_assert_eq!(result.unwrap_err(), RegistryError::ManufacturerNotFound { caller });
            prop_assert_eq!(net.registry.get_product(&code).is_ok(), existed);
        }

        /// Ship and receive are gated on the pre-state and rejections change
        /// nothing. The status/recipient coupling holds after every step.
        #[test]
        fn prop_gating_and_coupling(steps in prop::collection::vec(step_strategy(), 1..40)) {
            let net = seeded();

            for step in steps {
                let before = snapshot(&net.registry);
                match step {
                    Step::Ship { caller, code, recipient } => {
                        let code = ProductCode::new(CODES[code]).unwrap();
                        let prior = net.registry.get_product(&code).unwrap();
                        let result = net.registry.ship_product(ACTORS[caller], &code, ACTORS[recipient]);
                        let at_rest = prior.status != ProductStatus::Shipped;
                        if at_rest && ACTORS[caller] == prior.current_owner {
                            prop_assert!(result.is_ok());
                            let after = net.registry.get_product(&code).unwrap();
                            prop_assert_eq!(after.pending_recipient, Some(ACTORS[recipient]));
                            prop_assert_eq!(after.current_owner, prior.current_owner);
                        } else {
                            let is_not_owner = matches!(result, Err(RegistryError::NotOwner { .. }));
                            prop_assert!(is_not_owner);
                            prop_assert_eq!(&snapshot(&net.registry), &before);
                        }
                    }
                    Step::Receive { caller, code } => {
                        let code = ProductCode::new(CODES[code]).unwrap();
                        let prior = net.registry.get_product(&code).unwrap();
                        let result = net.registry.receive_product(ACTORS[caller], &code);
                        if prior.pending_recipient == Some(ACTORS[caller]) {
                            prop_assert!(result.is_ok());
                            let after = net.registry.get_product(&code).unwrap();
                            prop_assert_eq!(after.current_owner, ACTORS[caller]);
                            prop_assert_eq!(after.status, ProductStatus::Owned);
                        } else {
                            let is_not_recipient =
                                matches!(result, Err(RegistryError::NotIntendedRecipient { .. }));
                            prop_assert!(is_not_recipient);
                            prop_assert_eq!(&snapshot(&net.registry), &before);
                        }
                    }
                }

                for product in snapshot(&net.registry) {
                    prop_assert!(status_matches_recipient(&product));
                    prop_assert_eq!(product.manufacturer_ref, ACTORS[0]);
                }
            }
        }

        /// After N ship/receive hops the last recipient owns the product.
        #[test]
        fn prop_chain_of_cycles(hops in prop::collection::vec(1usize..ACTORS.len(), 1..30)) {
            let net = seeded();
            let code = ProductCode::new(CODES[0]).unwrap();
            let mut owner = ACTORS[0];

            for hop in hops {
                // Never ship to the current owner so every hop changes hands.
                let next = ACTORS[(ACTORS.iter().position(|a| *a == owner).unwrap() + hop) % ACTORS.len()];
                net.registry.ship_product(owner, &code, next).unwrap();
                net.registry.receive_product(next, &code).unwrap();
                owner = next;
            }

            let product = net.registry.get_product(&code).unwrap();
            prop_assert_eq!(product.current_owner, owner);
            prop_assert_eq!(product.status, ProductStatus::Owned);
            prop_assert!(product.pending_recipient.is_none());
        }
    }
}
