use access_gate::{
    evaluate, BlockReason, GateDecision, GateRequirement, RequireRole, RequireVerified, Role,
    Session, User, VerificationStatus,
};

fn signed_in(user_type: Role, status: VerificationStatus) -> Session {
    Session::authenticated(User::new("u-100", "Test Account", user_type, status))
}

#[test]
fn scenario_a_anonymous_is_sent_to_login() {
    let session = Session {
        is_loading: false,
        is_authenticated: false,
        user: None,
    };

    let decision = evaluate(&session, &GateRequirement::default(), "/current-path");

    assert_eq!(
        decision,
        GateDecision::RedirectToLogin {
            return_path: "/current-path".to_string()
        }
    );
}

#[test]
fn scenario_b_pending_buyer_is_blocked() {
    let session = signed_in(Role::Buyer, VerificationStatus::Pending);
    let requirement = GateRequirement::new().require(RequireVerified(true));

    let decision = evaluate(&session, &requirement, "/orders");

    assert_eq!(decision, GateDecision::Blocked(BlockReason::Pending));
    assert_eq!(decision.block_reason().map(BlockReason::code), Some("pending"));
}

#[test]
fn scenario_c_supplier_in_buyer_region_is_blocked() {
    let session = signed_in(Role::Supplier, VerificationStatus::Verified);
    let requirement = GateRequirement::new().require(RequireRole(Role::Buyer));

    let decision = evaluate(&session, &requirement, "/cart");

    let reason = decision.block_reason().copied().expect("blocked");
    assert_eq!(reason.code(), "role-mismatch");
    assert_eq!(reason.actual_role(), Some(Role::Supplier));
}

#[test]
fn scenario_d_both_satisfies_buyer() {
    let session = signed_in(Role::Both, VerificationStatus::Verified);
    let requirement = GateRequirement::role(Role::Buyer);

    assert_eq!(evaluate(&session, &requirement, "/cart"), GateDecision::Allow);
}

#[test]
fn scenario_e_loading_overrides_everything() {
    let session = Session {
        is_loading: true,
        is_authenticated: true,
        user: Some(User::new(
            "u-100",
            "Test Account",
            Role::Both,
            VerificationStatus::Verified,
        )),
    };

    for requirement in [
        GateRequirement::default(),
        GateRequirement::role(Role::Supplier),
        GateRequirement::new().require(RequireVerified(false)),
    ] {
        assert_eq!(
            evaluate(&session, &requirement, "/anywhere"),
            GateDecision::Loading
        );
    }
}

#[test]
fn rejected_account_is_blocked_with_its_own_reason() {
    let session = signed_in(Role::Supplier, VerificationStatus::Rejected);

    let decision = evaluate(&session, &GateRequirement::role(Role::Supplier), "/catalog");

    assert_eq!(decision, GateDecision::Blocked(BlockReason::Rejected));
}

#[test]
fn both_region_admits_only_both_accounts() {
    let requirement = GateRequirement::role(Role::Both);

    assert!(evaluate(
        &signed_in(Role::Both, VerificationStatus::Verified),
        &requirement,
        "/hub"
    )
    .is_allowed());
    assert!(!evaluate(
        &signed_in(Role::Buyer, VerificationStatus::Verified),
        &requirement,
        "/hub"
    )
    .is_allowed());
    assert!(!evaluate(
        &signed_in(Role::Supplier, VerificationStatus::Verified),
        &requirement,
        "/hub"
    )
    .is_allowed());
}

#[test]
fn return_path_is_preserved_verbatim() {
    let decision = evaluate(
        &Session::anonymous(),
        &GateRequirement::default(),
        "/search?q=bolts&page=2#results",
    );

    assert_eq!(
        decision,
        GateDecision::RedirectToLogin {
            return_path: "/search?q=bolts&page=2#results".to_string()
        }
    );
}
