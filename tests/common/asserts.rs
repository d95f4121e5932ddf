use bunner_cors_gate::{AccessDecision, AllowOrigin, AuthorizationGate, GateResult};

pub fn assert_allowed(decision: &AccessDecision, origin: &str) {
    match &decision.allow_origin {
        AllowOrigin::Origin(value) => assert_eq!(value, origin),
        other => panic!("expected origin {origin} to be allowed, got {other:?}"),
    }
}

pub fn assert_denied(decision: &AccessDecision) {
    assert!(
        decision.is_denied(),
        "expected denied decision, got {decision:?}"
    );
    assert_eq!(decision.allow_origin_value(), None);
}

pub fn gate(origin: Option<&str>, decision: &AccessDecision) -> GateResult {
    AuthorizationGate::check_decision(origin, decision)
}
