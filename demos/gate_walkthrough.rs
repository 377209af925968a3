//! Access gate walkthrough.
//!
//! This example shows:
//! 1. Per-region requirements through `ProtectedRegions`
//! 2. A session moving from loading to signed out to signed in
//! 3. Redirects performed by a router adapter
//! 4. Blocked-access notices and the audit trail
//!
//! Run with: `cargo run --example gate_walkthrough`

use std::rc::Rc;

use access_gate::audit::AuditTrail;
use access_gate::{
    DecisionKind, GateRequirement, Navigator, ProtectedRegions, Redirect, RequireVerified, Role, SessionScope,
    SessionStore, User, VerificationStatus, View,
};

/// Router that prints instead of changing the address bar.
struct ConsoleRouter;

impl Navigator for ConsoleRouter {
    fn navigate(&mut self, redirect: &Redirect) {
        println!("  router: navigate to {}", redirect.location());
    }
}

fn visit(regions: &ProtectedRegions, trail: &Rc<AuditTrail>, scope: &SessionScope, path: &str) {
    println!("visit {}", path);

    let guard = match regions.guard_for(path) {
        Some(guard) => guard.with_audit_trail(Rc::clone(trail)),
        None => {
            println!("  public page");
            return;
        }
    };

    match guard.check(scope, path, &mut ConsoleRouter) {
        Ok(View::Loading) => println!("  loading..."),
        Ok(View::Redirected(redirect)) => println!("  redirected (return to {})", redirect.from),
        Ok(View::Blocked(notice)) => println!("  {}: {}", notice.title, notice.message),
        Ok(View::Content) => println!("  content rendered"),
        Err(e) => println!("  configuration error: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Access Gate Walkthrough ===\n");

    let regions = ProtectedRegions::new()
        .protect("/account", GateRequirement::new().require(RequireVerified(false)))
        .protect("/orders", GateRequirement::role(Role::Buyer))
        .protect("/catalog/manage", GateRequirement::role(Role::Supplier))
        .protect("/dashboard", GateRequirement::default());
    let trail = Rc::new(AuditTrail::new());

    let store = Rc::new(SessionStore::new());
    let scope = SessionScope::new(Rc::clone(&store));

    println!("--- Session check in flight ---");
    visit(&regions, &trail, &scope, "/dashboard");

    println!("\n--- Signed out ---");
    store.sign_out();
    visit(&regions, &trail, &scope, "/orders/17");
    visit(&regions, &trail, &scope, "/about");

    println!("\n--- Supplier awaiting verification ---");
    store.sign_in(User::new(
        "s-1",
        "Forge Works",
        Role::Supplier,
        VerificationStatus::Pending,
    ));
    visit(&regions, &trail, &scope, "/catalog/manage");
    visit(&regions, &trail, &scope, "/account/verification");

    println!("\n--- Supplier verified ---");
    store.update_user(User::new(
        "s-1",
        "Forge Works",
        Role::Supplier,
        VerificationStatus::Verified,
    ));
    visit(&regions, &trail, &scope, "/catalog/manage");
    visit(&regions, &trail, &scope, "/orders");

    println!("\n--- Region outside any session scope ---");
    visit(&regions, &trail, &SessionScope::detached(), "/dashboard");

    println!("\n--- Audit trail ---");
    for event in trail.events() {
        println!("  {}", event);
    }
    println!(
        "  {} allowed, {} blocked, {} redirected",
        trail.count(DecisionKind::Allow),
        trail.count(DecisionKind::Blocked),
        trail.count(DecisionKind::Redirect)
    );
}
