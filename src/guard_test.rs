use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use tokio::sync::oneshot;

use super::*;
use crate::routes::{ProtectionProfile, RouteName};
use crate::state::session::{NOT_LOGGED_IN, SessionState};

// =============================================================
// Fakes
// =============================================================

enum Step {
    Ready(Result<CurrentSession, ApiError>),
    Wait(oneshot::Receiver<Result<CurrentSession, ApiError>>),
}

#[derive(Default)]
struct ScriptedCheck {
    steps: RefCell<VecDeque<Step>>,
    calls: Cell<usize>,
}

impl ScriptedCheck {
    fn new(steps: Vec<Step>) -> Self {
        Self { steps: RefCell::new(steps.into()), calls: Cell::new(0) }
    }

    fn always(result: fn() -> Result<CurrentSession, ApiError>, times: usize) -> Self {
        Self::new((0..times).map(|_| Step::Ready(result())).collect())
    }
}

#[async_trait(?Send)]
impl SessionCheck for ScriptedCheck {
    async fn check_session(&self) -> Result<CurrentSession, ApiError> {
        self.calls.set(self.calls.get() + 1);
        let step = self.steps.borrow_mut().pop_front().expect("unscripted session check");
        match step {
            Step::Ready(result) => result,
            Step::Wait(rx) => rx.await.expect("test dropped the sender"),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<Feedback>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, feedback: Feedback) {
        self.seen.borrow_mut().push(feedback);
    }
}

fn alice() -> Result<CurrentSession, ApiError> {
    Ok(CurrentSession { username: "alice".into(), is_admin: false })
}

fn root() -> Result<CurrentSession, ApiError> {
    Ok(CurrentSession { username: "root".into(), is_admin: true })
}

fn unauthorized() -> Result<CurrentSession, ApiError> {
    Err(ApiError::Status { status: 401, body: "Unauthorized".into() })
}

fn unreachable_backend() -> Result<CurrentSession, ApiError> {
    Err(ApiError::Request("connection refused".into()))
}

fn guard(
    check: ScriptedCheck,
    table: RouteTable,
    policy: GuardPolicy,
) -> NavigationGuard<ScriptedCheck, RecordingNotifier> {
    NavigationGuard::new(check, RecordingNotifier::default(), SessionContext::new(), table, policy)
}

fn logged_in_as(session: &SessionContext, name: &str, admin: bool) {
    let ticket = session.begin_check();
    session.apply(ticket, SessionUpdate::Confirmed { user_name: name.into(), is_admin: Some(admin) });
}

const PROTECTED: [&str; 5] = ["/start", "/start/param", "/train", "/train/finish", "/test"];
const UNPROTECTED: [&str; 3] = ["/", "/login", "/register"];

// =============================================================
// Failed checks
// =============================================================

#[tokio::test]
async fn failed_check_redirects_every_protected_route() {
    for path in PROTECTED {
        let g = guard(ScriptedCheck::always(unauthorized, 1), RouteTable::default(), GuardPolicy::AdminAware);
        logged_in_as(g.session(), "stale", true);

        let decision = g.guard_path(path, None).await;

        assert_eq!(decision, Decision::Redirect(LOGIN_PATH.into()), "{path}");
        assert_eq!(g.session().snapshot(), SessionState::logged_out(), "{path}");
    }
}

#[tokio::test]
async fn failed_check_allows_every_unprotected_route_but_resets() {
    for path in UNPROTECTED {
        let g = guard(ScriptedCheck::always(unreachable_backend, 1), RouteTable::default(), GuardPolicy::AdminAware);
        logged_in_as(g.session(), "stale", true);

        let decision = g.guard_path(path, None).await;

        assert_eq!(decision, Decision::Allow, "{path}");
        assert_eq!(g.session().snapshot(), SessionState::logged_out(), "{path}");
        assert!(g.notifier().seen.borrow().is_empty(), "{path}");
    }
}

#[tokio::test]
async fn train_with_failing_endpoint_goes_to_login() {
    let g = guard(ScriptedCheck::always(unauthorized, 1), RouteTable::default(), GuardPolicy::AdminAware);

    let decision = g.guard_path("/train", Some("/")).await;

    assert_eq!(decision.redirect_target(), Some("/login"));
    let state = g.session().snapshot();
    assert!(!state.is_logged_in);
    assert!(!state.is_admin);
    assert_eq!(state.user_name, NOT_LOGGED_IN);
    assert_eq!(*g.notifier().seen.borrow(), vec![Feedback::Alert(LOGIN_REQUIRED_MESSAGE.into())]);
}

#[tokio::test]
async fn open_profile_never_redirects_on_failure() {
    let g = guard(
        ScriptedCheck::always(unauthorized, 1),
        RouteTable::standard(ProtectionProfile::Open),
        GuardPolicy::AdminAware,
    );
    assert_eq!(g.guard_path("/train", None).await, Decision::Allow);
    assert!(!g.session().snapshot().is_logged_in);
}

#[tokio::test]
async fn unknown_path_is_allowed_on_failure() {
    let g = guard(ScriptedCheck::always(unauthorized, 1), RouteTable::default(), GuardPolicy::AdminAware);
    assert_eq!(g.guard_path("/no/such/page", None).await, Decision::Allow);
}

// =============================================================
// Successful checks
// =============================================================

#[tokio::test]
async fn home_with_alice_stays_and_records_name() {
    let g = guard(ScriptedCheck::always(alice, 1), RouteTable::default(), GuardPolicy::AdminAware);

    let decision = g.guard_path("/", None).await;

    assert!(decision.is_allowed());
    let state = g.session().snapshot();
    assert!(state.is_logged_in);
    assert!(!state.is_admin);
    assert_eq!(state.user_name, "alice");
}

#[tokio::test]
async fn success_allows_protected_route() {
    let g = guard(ScriptedCheck::always(alice, 1), RouteTable::default(), GuardPolicy::AdminAware);
    assert_eq!(g.guard_path("/train", None).await, Decision::Allow);
    assert!(g.notifier().seen.borrow().is_empty());
}

#[tokio::test]
async fn admin_flag_recorded_under_admin_aware() {
    let g = guard(ScriptedCheck::always(root, 1), RouteTable::default(), GuardPolicy::AdminAware);
    g.guard_path("/", None).await;
    assert!(g.session().snapshot().is_admin);
}

#[tokio::test]
async fn non_admin_refused_admin_route() {
    let table = RouteTable::default().with_admin_routes(&[RouteName::Test]);
    let g = guard(ScriptedCheck::always(alice, 1), table, GuardPolicy::AdminAware);

    let decision = g.guard_path("/test", None).await;

    assert_eq!(decision, Decision::Redirect(LOGIN_PATH.into()));
    // The session itself is still valid.
    assert!(g.session().snapshot().is_logged_in);
    assert_eq!(*g.notifier().seen.borrow(), vec![Feedback::Alert(ADMIN_REQUIRED_MESSAGE.into())]);
}

#[tokio::test]
async fn admin_allowed_admin_route() {
    let table = RouteTable::default().with_admin_routes(&[RouteName::Test]);
    let g = guard(ScriptedCheck::always(root, 1), table, GuardPolicy::AdminAware);
    assert_eq!(g.guard_path("/test", None).await, Decision::Allow);
}

// =============================================================
// Lenient policy
// =============================================================

#[tokio::test]
async fn lenient_success_leaves_admin_flag_untouched() {
    let g = guard(ScriptedCheck::always(alice, 1), RouteTable::default(), GuardPolicy::Lenient);
    logged_in_as(g.session(), "earlier", true);

    g.guard_path("/", None).await;

    let state = g.session().snapshot();
    assert!(state.is_logged_in);
    assert!(state.is_admin);
    assert_eq!(state.user_name, "alice");
}

#[tokio::test]
async fn lenient_ignores_admin_routes() {
    let table = RouteTable::default().with_admin_routes(&[RouteName::Test]);
    let g = guard(ScriptedCheck::always(alice, 1), table, GuardPolicy::Lenient);
    assert_eq!(g.guard_path("/test", None).await, Decision::Allow);
    assert!(g.notifier().seen.borrow().is_empty());
}

#[tokio::test]
async fn lenient_failure_notifies_without_blocking() {
    let g = guard(ScriptedCheck::always(unauthorized, 1), RouteTable::default(), GuardPolicy::Lenient);
    logged_in_as(g.session(), "stale", true);

    let decision = g.guard_path("/train", None).await;

    assert_eq!(decision, Decision::Redirect(LOGIN_PATH.into()));
    assert_eq!(g.session().snapshot(), SessionState::logged_out());
    let seen = g.notifier().seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].is_blocking());
}

// =============================================================
// Sequencing and retry behavior
// =============================================================

#[tokio::test]
async fn each_navigation_checks_once_without_retry() {
    let g = guard(
        ScriptedCheck::new(vec![Step::Ready(unreachable_backend()), Step::Ready(alice())]),
        RouteTable::default(),
        GuardPolicy::AdminAware,
    );

    assert!(g.guard_path("/train", None).await.redirect_target().is_some());
    assert_eq!(g.checker().calls.get(), 1);

    // Next navigation re-checks independently.
    assert_eq!(g.guard_path("/train", Some("/login")).await, Decision::Allow);
    assert_eq!(g.checker().calls.get(), 2);
    assert_eq!(g.session().snapshot().user_name, "alice");
}

#[tokio::test]
async fn slow_stale_check_is_superseded() {
    let (tx, rx) = oneshot::channel();
    let g = guard(
        ScriptedCheck::new(vec![Step::Wait(rx), Step::Ready(alice())]),
        RouteTable::default(),
        GuardPolicy::AdminAware,
    );

    let first = g.guard_path("/train", None);
    let second = async {
        let decision = g.guard_path("/", Some("/train")).await;
        let _ = tx.send(unauthorized());
        decision
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, Decision::Superseded);
    assert_eq!(second, Decision::Allow);
    let state = g.session().snapshot();
    assert!(state.is_logged_in);
    assert_eq!(state.user_name, "alice");
    assert!(g.notifier().seen.borrow().is_empty());
}

#[tokio::test]
async fn login_page_is_never_redirected_to_itself() {
    let table = RouteTable::default().with_admin_routes(&[RouteName::Login]);
    let g = guard(ScriptedCheck::always(unauthorized, 1), table, GuardPolicy::AdminAware);
    assert_eq!(g.guard_path("/login", None).await, Decision::Allow);
    assert!(g.notifier().seen.borrow().is_empty());
}

// =============================================================
// GuardPolicy parsing
// =============================================================

#[test]
fn policy_parse_accepts_both_spellings() {
    assert_eq!("admin_aware".parse::<GuardPolicy>(), Ok(GuardPolicy::AdminAware));
    assert_eq!("Admin-Aware".parse::<GuardPolicy>(), Ok(GuardPolicy::AdminAware));
    assert_eq!("lenient".parse::<GuardPolicy>(), Ok(GuardPolicy::Lenient));
    assert!("strict".parse::<GuardPolicy>().is_err());
}
