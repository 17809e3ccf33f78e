//! Property-based tests for classification, estimates, and validation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use podlaunch_cli::application::services::exit::ExitTrigger;
use podlaunch_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
use podlaunch_cli::domain::pod::pod_name;
use podlaunch_cli::domain::readiness::{PortBinding, Protocol, RuntimeInfo};
use podlaunch_cli::domain::{AccountStatus, ExitReason, Phase, RawStatus, RuntimeEstimate, classify};

fn protocol() -> impl Strategy<Value = Protocol> {
    prop_oneof![Just(Protocol::Tcp), Just(Protocol::Http), Just(Protocol::Other)]
}

fn port() -> impl Strategy<Value = PortBinding> {
    (
        proptest::option::of("[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"),
        any::<bool>(),
        any::<u16>(),
        any::<u16>(),
        protocol(),
    )
        .prop_map(|(ip, public, private_port, public_port, protocol)| PortBinding {
            ip,
            public,
            private_port,
            public_port,
            protocol,
        })
}

fn exit_reason() -> impl Strategy<Value = ExitReason> {
    prop_oneof![
        Just(ExitReason::Interrupted),
        Just(ExitReason::Confirmed),
        Just(ExitReason::InputClosed)
    ]
}

// ============================================================================
// classify() property tests
// ============================================================================

proptest! {
    /// Ready exactly when some port is public TCP with an address.
    #[test]
    fn prop_ready_iff_public_tcp_with_address(
        ports in proptest::collection::vec(port(), 0..6),
        gpus in 0usize..4,
    ) {
        let expected = ports.iter().any(|p| {
            p.public
                && p.protocol == Protocol::Tcp
                && p.ip.as_deref().is_some_and(|ip| !ip.is_empty())
        });
        let status = RawStatus {
            desired_status: Some("RUNNING".to_string()),
            runtime: Some(RuntimeInfo { uptime_seconds: 0, gpu_count: gpus, ports }),
        };
        prop_assert_eq!(classify(&status) == Phase::Ready, expected);
    }

    /// A pod without runtime is queued whatever its desired status says.
    #[test]
    fn prop_no_runtime_is_queued(desired in "[A-Z]{0,12}") {
        let status = RawStatus { desired_status: Some(desired), runtime: None };
        prop_assert_eq!(classify(&status), Phase::Queued);
    }
}

// ============================================================================
// estimated_runtime() property tests
// ============================================================================

proptest! {
    /// The estimate is never NaN or infinite, whatever the inputs.
    #[test]
    fn prop_estimate_always_finite(balance in any::<f64>(), burn_rate_per_hour in any::<f64>()) {
        let status = AccountStatus { balance, burn_rate_per_hour };
        match status.estimated_runtime() {
            RuntimeEstimate::Hours(h) => {
                prop_assert!(h.is_finite() && h >= 0.0, "bad estimate {h}");
                prop_assert!(burn_rate_per_hour > 0.0);
            }
            RuntimeEstimate::Unbounded => {}
        }
        let rendered = status.estimated_runtime().to_string();
        prop_assert!(!rendered.contains("NaN") && !rendered.contains("inf"));
    }
}

// ============================================================================
// ExitTrigger property tests
// ============================================================================

proptest! {
    /// Only the first of any sequence of fires is observed.
    #[test]
    fn prop_first_fire_wins(reasons in proptest::collection::vec(exit_reason(), 1..8)) {
        let trigger = ExitTrigger::new();
        let token = trigger.token();
        let wins: Vec<bool> = reasons.iter().map(|r| trigger.fire(*r)).collect();
        prop_assert!(wins[0]);
        prop_assert!(wins[1..].iter().all(|w| !w));
        prop_assert_eq!(token.reason(), Some(reasons[0]));
    }
}

// ============================================================================
// Config and naming property tests
// ============================================================================

proptest! {
    /// Keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z_.]{1,24}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }

    /// gpu_count accepts exactly 1..=8.
    #[test]
    fn prop_gpu_count_range(n in 0u32..64) {
        let ok = validate_config_value("gpu_count", &n.to_string()).is_ok();
        prop_assert_eq!(ok, (1..=8).contains(&n));
    }

    /// Port entries round through the validator when well-formed.
    #[test]
    fn prop_well_formed_ports_accepted(port in 1u16..=u16::MAX, http in any::<bool>()) {
        let entry = format!("{port}/{}", if http { "http" } else { "tcp" });
        prop_assert!(validate_config_value("ports", &entry).is_ok(), "rejected {entry}");
    }

    /// Pod names are `<prefix>-<timestamp>`.
    #[test]
    fn prop_pod_name_format(prefix in "[a-z]{1,12}", ts in 0i64..4_000_000_000) {
        let name = pod_name(&prefix, ts);
        prop_assert_eq!(name, format!("{prefix}-{ts}"));
    }
}
