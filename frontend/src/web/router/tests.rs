use super::*;
use any_spawner::Executor;
use leptos::reactive::owner::Owner;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::task::LocalSet;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct HistoryLog {
    /// 浏览器地址栏中的 URL
    location: String,
    /// push/replace 调用记录
    entries: Vec<String>,
}

/// 记录所有 History 调用的后端
#[derive(Clone, Default)]
struct RecordingHistory {
    log: Rc<RefCell<HistoryLog>>,
}

impl RecordingHistory {
    fn at(url: &str) -> Self {
        let history = Self::default();
        history.log.borrow_mut().location = url.to_string();
        history
    }

    fn entries(&self) -> Vec<String> {
        self.log.borrow().entries.clone()
    }

    fn location(&self) -> String {
        self.log.borrow().location.clone()
    }

    /// 模拟浏览器后退/前进：地址变化但不产生 push/replace
    fn travel(&self, url: &str) {
        self.log.borrow_mut().location = url.to_string();
    }
}

impl HistoryBackend for RecordingHistory {
    fn current_path(&self) -> String {
        pathname(&self.log.borrow().location).to_string()
    }

    fn push(&self, url: &str) {
        let mut log = self.log.borrow_mut();
        log.location = url.to_string();
        log.entries.push(format!("push {}", url));
    }

    fn replace(&self, url: &str) {
        let mut log = self.log.borrow_mut();
        log.location = url.to_string();
        log.entries.push(format!("replace {}", url));
    }
}

struct TestRouter {
    router: RouterService,
    set_auth: WriteSignal<AuthState>,
    history: RecordingHistory,
}

impl TestRouter {
    fn mount(url: &str, state: AuthState) -> Self {
        let history = RecordingHistory::at(url);
        let (auth, set_auth) = signal(state);
        let router = RouterService::new(Signal::from(auth), history.clone());
        router.setup_gate_redirect();
        Self {
            router,
            set_auth,
            history,
        }
    }

    fn path(&self) -> String {
        self.router.current_path().get_untracked()
    }

    fn decision(&self) -> Decision {
        self.router.decision().get_untracked()
    }
}

/// 让已排队的 Effect 执行完毕
async fn settle() {
    for _ in 0..4 {
        Executor::tick().await;
    }
}

/// 在带 Owner 的本地任务集中运行（Effect 通过 spawn_local 调度）
async fn run<F, Fut>(test: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let _ = Executor::init_tokio();
    let owner = Owner::new();
    owner.set();
    LocalSet::new().run_until(test()).await;
}

// =========================================================
// Auth transitions
// =========================================================

#[tokio::test]
async fn logout_on_protected_view_redirects_to_login() {
    run(|| async {
        let t = TestRouter::mount("/settings", AuthState::authenticated());
        settle().await;
        assert!(t.history.entries().is_empty());
        assert_eq!(t.path(), "/settings");

        t.set_auth.set(AuthState::anonymous());
        settle().await;

        assert_eq!(t.history.entries(), vec!["replace /login"]);
        assert_eq!(t.history.location(), "/login");
        assert_eq!(t.path(), "/login");
        assert_eq!(t.decision().phase(), expense_manager_shared::NavigationPhase::Rendering);
    })
    .await;
}

#[tokio::test]
async fn transient_loading_does_not_redirect_before_expiry() {
    run(|| async {
        let t = TestRouter::mount("/transactions", AuthState::authenticated());
        settle().await;

        t.set_auth.set(AuthState::resolving());
        settle().await;
        assert!(t.history.entries().is_empty());
        assert_eq!(t.decision(), Decision::Loading);

        t.set_auth.set(AuthState::anonymous());
        settle().await;
        assert_eq!(t.history.entries(), vec!["replace /login"]);
    })
    .await;
}

#[tokio::test]
async fn login_on_login_page_lands_on_dashboard() {
    run(|| async {
        let t = TestRouter::mount("/login", AuthState::anonymous());
        settle().await;
        assert!(t.history.entries().is_empty());

        t.set_auth.set(AuthState::authenticated());
        settle().await;

        assert_eq!(t.history.entries(), vec!["replace /dashboard"]);
        assert_eq!(t.path(), "/dashboard");
    })
    .await;
}

#[tokio::test]
async fn startup_on_index_waits_for_auth_then_redirects() {
    run(|| async {
        let t = TestRouter::mount("/", AuthState::resolving());
        settle().await;
        assert!(t.history.entries().is_empty());
        assert_eq!(t.router.frame().get_untracked(), OutletFrame::Loading);

        t.set_auth.set(AuthState::anonymous());
        settle().await;
        assert_eq!(t.history.entries(), vec!["replace /login"]);
    })
    .await;
}

// =========================================================
// Navigation
// =========================================================

#[tokio::test]
async fn guarded_navigation_pushes_once_then_replaces() {
    run(|| async {
        let t = TestRouter::mount("/login", AuthState::anonymous());
        settle().await;

        t.router.navigate("/dashboard");
        settle().await;

        assert_eq!(t.history.entries(), vec!["push /dashboard", "replace /login"]);
        assert_eq!(t.path(), "/login");
    })
    .await;
}

#[tokio::test]
async fn same_path_navigation_is_a_noop() {
    run(|| async {
        let t = TestRouter::mount("/settings", AuthState::authenticated());
        settle().await;

        for url in ["/settings", "/Settings", "/settings/", "/settings?tab=profile"] {
            t.router.navigate(url);
        }
        settle().await;

        assert!(t.history.entries().is_empty());
        assert_eq!(t.path(), "/settings");
    })
    .await;
}

#[tokio::test]
async fn navigation_keeps_query_in_history_but_not_in_path() {
    run(|| async {
        let t = TestRouter::mount("/dashboard", AuthState::authenticated());
        settle().await;

        t.router.navigate("/transactions?page=2");
        settle().await;

        assert_eq!(t.history.entries(), vec!["push /transactions?page=2"]);
        assert_eq!(t.path(), "/transactions");
        assert_eq!(t.path(), t.history.current_path());
    })
    .await;
}

#[tokio::test]
async fn unknown_path_is_left_in_the_address_bar() {
    run(|| async {
        let t = TestRouter::mount("/unknown-xyz", AuthState::authenticated());
        settle().await;

        assert!(t.history.entries().is_empty());
        assert_eq!(t.path(), "/unknown-xyz");
        assert_eq!(t.router.page().get_untracked(), Some(ViewId::NotFound));
        assert_eq!(
            t.router.frame().get_untracked(),
            OutletFrame::Shell(Layout::Bare)
        );
    })
    .await;
}

#[tokio::test]
async fn back_button_to_guest_page_is_guarded() {
    run(|| async {
        let t = TestRouter::mount("/dashboard", AuthState::authenticated());
        settle().await;

        t.history.travel("/login");
        t.router.sync_from_history();
        settle().await;

        assert_eq!(t.history.entries(), vec!["replace /dashboard"]);
        assert_eq!(t.path(), "/dashboard");
    })
    .await;
}

#[tokio::test]
async fn back_button_to_open_page_renders_it() {
    run(|| async {
        let t = TestRouter::mount("/categories", AuthState::anonymous());
        settle().await;
        assert_eq!(t.history.entries(), vec!["replace /login"]);

        t.history.travel("/gone");
        t.router.sync_from_history();
        settle().await;

        assert_eq!(t.history.entries(), vec!["replace /login"]);
        assert_eq!(t.path(), "/gone");
        assert_eq!(t.router.page().get_untracked(), Some(ViewId::NotFound));
    })
    .await;
}

// =========================================================
// Outlet frame
// =========================================================

#[tokio::test]
async fn shell_stays_mounted_across_pages_of_the_same_layout() {
    run(|| async {
        let t = TestRouter::mount("/dashboard", AuthState::authenticated());
        let frame_runs = Rc::new(Cell::new(0));
        let page_runs = Rc::new(Cell::new(0));
        let (frame, page) = (t.router.frame(), t.router.page());
        {
            let frame_runs = frame_runs.clone();
            Effect::new(move |_| {
                frame.track();
                frame_runs.set(frame_runs.get() + 1);
            });
        }
        {
            let page_runs = page_runs.clone();
            Effect::new(move |_| {
                page.track();
                page_runs.set(page_runs.get() + 1);
            });
        }
        settle().await;

        t.router.navigate("/transactions");
        settle().await;
        t.router.navigate("/categories");
        settle().await;

        assert_eq!(frame.get_untracked(), OutletFrame::Shell(Layout::App));
        assert_eq!(frame_runs.get(), 1);
        assert_eq!(page_runs.get(), 3);
        assert_eq!(page.get_untracked(), Some(ViewId::Categories));
    })
    .await;
}

#[tokio::test]
async fn login_swaps_the_auth_shell_for_the_app_shell() {
    run(|| async {
        let t = TestRouter::mount("/login", AuthState::anonymous());
        settle().await;
        assert_eq!(t.router.frame().get_untracked(), OutletFrame::Shell(Layout::Auth));

        t.set_auth.set(AuthState::authenticated());
        settle().await;
        assert_eq!(t.router.frame().get_untracked(), OutletFrame::Shell(Layout::App));
        assert_eq!(t.router.page().get_untracked(), Some(ViewId::Dashboard));
    })
    .await;
}

#[test]
fn frame_follows_decision() {
    assert_eq!(OutletFrame::from_decision(Decision::Loading), OutletFrame::Loading);
    assert_eq!(
        OutletFrame::from_decision(Decision::Redirect(AppRoute::Login)),
        OutletFrame::Redirecting
    );
    assert_eq!(
        OutletFrame::from_decision(Decision::Render {
            route: AppRoute::Register,
            view: ViewId::Register
        }),
        OutletFrame::Shell(Layout::Auth)
    );
}

// =========================================================
// Links
// =========================================================

#[test]
fn plain_left_click_is_handled_in_app() {
    assert!(LinkClick::default().handled_in_app());
}

#[test]
fn modified_or_secondary_clicks_fall_through() {
    let modified = LinkClick {
        modified: true,
        ..LinkClick::default()
    };
    let middle = LinkClick {
        button: 1,
        ..LinkClick::default()
    };
    let prevented = LinkClick {
        default_prevented: true,
        ..LinkClick::default()
    };
    for click in [modified, middle, prevented] {
        assert!(!click.handled_in_app(), "{click:?}");
    }
}

#[test]
fn active_link_is_marked_current() {
    assert_eq!(aria_current(AppRoute::Settings, AppRoute::Settings), Some("page"));
    assert_eq!(aria_current(AppRoute::Dashboard, AppRoute::Settings), None);
    assert_eq!(aria_current(AppRoute::NotFound, AppRoute::NotFound), None);
}
