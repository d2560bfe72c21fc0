//! Delivery dispatch tests against constructed environment snapshots

use code_hook_notify::{
    candidate_chain, deliver, Category, DeliveryMethod, EnvironmentSnapshot, Level,
    NotifierTools, ParentApp, Platform, SoundTools, StyledPayload,
};

fn snapshot(platform: Platform) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        platform,
        terminal_program: None,
        term: None,
        color_term: None,
        no_color: false,
        is_ssh: false,
        is_ci: false,
        stdout_is_tty: Some(true),
        notifiers: NotifierTools::default(),
        sound_players: SoundTools::default(),
        parent_app: ParentApp::unknown(),
        force_console: false,
        debug: false,
    }
}

fn styled() -> StyledPayload {
    StyledPayload {
        title: "✅ Build Complete".to_string(),
        message: "all good".to_string(),
        level: Level::Info,
        category: Category::Success,
    }
}

#[tokio::test]
async fn test_all_external_tools_failing_still_succeeds() {
    // availability flags claim the notifier binaries exist, but they are
    // not installed here, so every external attempt errors and the chain
    // must bottom out at the console anchor
    let mut snap = snapshot(Platform::MacOs);
    snap.notifiers.terminal_notifier = true;
    snap.notifiers.alerter = true;

    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    if !cfg!(target_os = "macos") {
        assert_eq!(report.method_used, DeliveryMethod::ConsoleText);
    }
}

#[tokio::test]
async fn test_console_only_chain_delivers_via_console() {
    let snap = snapshot(Platform::Linux);
    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    assert_eq!(report.method_used, DeliveryMethod::ConsoleText);
}

#[tokio::test]
async fn test_terminal_escape_is_used_when_supported() {
    // the escape method is a pure stdout write, so it succeeds everywhere
    let mut snap = snapshot(Platform::MacOs);
    snap.terminal_program = Some("iTerm.app".to_string());

    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    assert_eq!(report.method_used, DeliveryMethod::TerminalEscape);
}

#[tokio::test]
async fn test_ssh_session_delivers_via_console_despite_tools() {
    let mut snap = snapshot(Platform::MacOs);
    snap.is_ssh = true;
    snap.notifiers = NotifierTools {
        terminal_notifier: true,
        alerter: true,
        notify_send: true,
        osascript: true,
    };
    snap.terminal_program = Some("iTerm.app".to_string());

    assert_eq!(candidate_chain(&snap), vec![DeliveryMethod::ConsoleText]);
    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    assert_eq!(report.method_used, DeliveryMethod::ConsoleText);
}

#[tokio::test]
async fn test_ci_delivers_via_console_even_with_tty() {
    let mut snap = snapshot(Platform::Linux);
    snap.is_ci = true;
    snap.stdout_is_tty = Some(true);
    snap.notifiers.notify_send = true;

    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    assert_eq!(report.method_used, DeliveryMethod::ConsoleText);
}

#[tokio::test]
async fn test_force_console_wins_over_every_heuristic() {
    let mut snap = snapshot(Platform::MacOs);
    snap.force_console = true;
    snap.stdout_is_tty = Some(true);
    snap.notifiers = NotifierTools {
        terminal_notifier: true,
        alerter: true,
        notify_send: true,
        osascript: true,
    };
    snap.terminal_program = Some("iTerm.app".to_string());

    assert_eq!(candidate_chain(&snap), vec![DeliveryMethod::ConsoleText]);
    let report = deliver(&styled(), &snap).await;
    assert!(report.success);
    assert_eq!(report.method_used, DeliveryMethod::ConsoleText);
}
