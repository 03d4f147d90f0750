use super::*;
use crate::logic::error::Result;
use crate::logic::fake_api::{Call, FakeApi, context, host, rejected, status, transport};
use crate::model::{Notification, Severity};

const NAS: &str = "AA:BB:CC:DD:EE:FF";
const DESKTOP: &str = "11:22:33:44:55:66";
const LATENCY: Duration = Duration::from_millis(100);

fn actions(api: Arc<FakeApi>) -> Arc<HostActions> {
    let ctx = context(api);
    lock_state(&ctx.state).set_hosts(vec![host("nas", NAS), host("desktop", DESKTOP)]);
    Arc::new(HostActions::new(ctx, HostActions::DEFAULT_WAKE_HOLD))
}

fn button(actions: &HostActions, mac: &str) -> WakeButton {
    lock_state(&actions.context().state).wake_buttons[mac]
}

fn notifications(actions: &HostActions) -> Vec<Notification> {
    lock_state(&actions.context().state).notifications.clone()
}

// --- Wake with a dedicated button ---

/// Wakes NAS on a paused clock and returns the button as seen while the
/// request is in flight, during the hold, and after the hold.
async fn observe_button_wake(response: Result<()>) -> (Arc<HostActions>, [WakeButton; 3]) {
    let api = FakeApi::with_latency(LATENCY);
    api.respond(|r| r.wake = response);
    let actions = actions(api.clone());

    let task = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.wake(NAS, Some("nas")).await })
    };
    tokio::task::yield_now().await;
    let in_flight = button(&actions, NAS);

    tokio::time::sleep(LATENCY + Duration::from_millis(50)).await;
    let holding = button(&actions, NAS);

    tokio::time::sleep(HostActions::DEFAULT_WAKE_HOLD).await;
    task.await.unwrap();
    let settled = button(&actions, NAS);

    assert_eq!(api.calls(), vec![Call::Wake(NAS.to_string())]);
    (actions, [in_flight, holding, settled])
}

#[tokio::test(start_paused = true)]
async fn test_wake_button_success_cycle() {
    let (actions, [in_flight, holding, settled]) = observe_button_wake(Ok(())).await;

    assert_eq!(in_flight.label, WakeLabel::Waking);
    assert!(!in_flight.enabled);
    assert_eq!(holding.label, WakeLabel::Woken);
    assert!(!holding.enabled);
    assert_eq!(settled, WakeButton::default());
    assert!(notifications(&actions).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_wake_button_resets_after_rejection() {
    let (actions, [_, holding, settled]) =
        observe_button_wake(Err(rejected("Invalid MAC address"))).await;

    assert_eq!(holding.label, WakeLabel::Failed);
    assert!(!holding.enabled);
    assert_eq!(settled, WakeButton::default());
    assert!(notifications(&actions).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_wake_button_resets_after_transport_failure() {
    let (actions, [_, holding, settled]) = observe_button_wake(Err(transport())).await;

    assert_eq!(holding.label, WakeLabel::Failed);
    assert_eq!(settled, WakeButton::default());
    assert!(notifications(&actions).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_wake_button_resets_when_task_is_cancelled() {
    let api = FakeApi::with_latency(Duration::from_secs(10));
    let actions = actions(api);

    let task = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.wake(NAS, None).await })
    };
    tokio::task::yield_now().await;
    assert!(!button(&actions, NAS).enabled);

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert_eq!(button(&actions, NAS), WakeButton::default());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_wakes_settle_independently() {
    let api = FakeApi::with_latency(LATENCY);
    let actions = actions(api.clone());

    let first = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.wake(NAS, None).await })
    };
    let second = {
        let actions = actions.clone();
        tokio::spawn(async move { actions.wake(DESKTOP, None).await })
    };
    tokio::task::yield_now().await;
    assert!(!button(&actions, NAS).enabled);
    assert!(!button(&actions, DESKTOP).enabled);

    first.await.unwrap();
    second.await.unwrap();
    assert_eq!(button(&actions, NAS), WakeButton::default());
    assert_eq!(button(&actions, DESKTOP), WakeButton::default());
    assert_eq!(api.calls().len(), 2);
}

// --- Wake without a button ---

async fn wake_unlisted(response: Result<()>, name: Option<&str>) -> (Arc<HostActions>, Vec<Notification>) {
    let api = FakeApi::new();
    api.respond(|r| r.wake = response);
    let actions = actions(api);
    let buttons_before = lock_state(&actions.context().state).wake_buttons.clone();

    actions.wake("00:11:22:33:44:55", name).await;

    assert_eq!(
        lock_state(&actions.context().state).wake_buttons,
        buttons_before,
        "no button may change"
    );
    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    (actions, notes)
}

#[tokio::test]
async fn test_wake_unlisted_success_notifies() {
    let (_, notes) = wake_unlisted(Ok(()), Some("laptop")).await;
    assert_eq!(notes[0].severity, Severity::Success);
    assert!(notes[0].message.contains("laptop (00:11:22:33:44:55)"));
}

#[tokio::test]
async fn test_wake_unlisted_rejection_carries_reason() {
    let (_, notes) = wake_unlisted(Err(rejected("Failed to send magic packet")), None).await;
    assert_eq!(notes[0].severity, Severity::Warning);
    assert!(notes[0].message.contains("00:11:22:33:44:55"));
    assert!(notes[0].message.ends_with(": Failed to send magic packet"));
}

#[tokio::test]
async fn test_wake_unlisted_transport_failure_is_generic() {
    let (_, notes) = wake_unlisted(Err(transport()), Some("")).await;
    assert_eq!(notes[0].severity, Severity::Danger);
    assert!(notes[0].message.ends_with("00:11:22:33:44:55"));
    assert!(!notes[0].message.contains("refused"));
}

// --- Add host ---

#[tokio::test]
async fn test_add_host_omits_blank_address() {
    let api = FakeApi::new();
    let actions = actions(api.clone());

    actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), "  ".into())
        .await;

    assert_eq!(
        api.calls()[0],
        Call::AddHost(Host {
            mac: "22:22:22:22:22:22".to_string(),
            name: "nas2".to_string(),
            address: None,
        })
    );
}

#[tokio::test]
async fn test_add_host_keeps_address_unchanged() {
    let api = FakeApi::new();
    let actions = actions(api.clone());

    actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), "nas2.example.org".into())
        .await;

    match &api.calls()[0] {
        Call::AddHost(host) => assert_eq!(host.address.as_deref(), Some("nas2.example.org")),
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_add_host_closes_dialog_before_request() {
    let api = FakeApi::new();
    let actions = actions(api.clone());
    lock_state(&actions.context().state).add_host_dialog_open = true;

    let pending = actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), String::new());
    assert!(!lock_state(&actions.context().state).add_host_dialog_open);
    assert!(api.calls().is_empty());

    pending.await;
    assert!(!api.calls().is_empty());
}

#[tokio::test]
async fn test_add_host_success_reloads_view() {
    let api = FakeApi::new();
    api.respond(|r| {
        r.hosts = Ok(vec![host("nas", NAS), host("nas2", "22:22:22:22:22:22")]);
        r.statuses = Ok(vec![status("22:22:22:22:22:22", true, "10.0.0.22")]);
    });
    let actions = actions(api.clone());

    actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), String::new())
        .await;

    let calls = api.calls();
    assert!(matches!(calls[0], Call::AddHost(_)));
    assert_eq!(calls[1..], [Call::Hosts, Call::Statuses]);

    let state = lock_state(&actions.context().state);
    assert_eq!(state.hosts.len(), 2);
    assert!(!state.wake_buttons.contains_key(DESKTOP));
    assert_eq!(state.statuses["22:22:22:22:22:22"].online, Some(true));
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].severity, Severity::Success);
    assert!(state.notifications[0].message.ends_with("nas2"));
}

#[tokio::test]
async fn test_add_host_rejection_warns_and_keeps_dialog_closed() {
    let api = FakeApi::new();
    api.respond(|r| r.add_host = Err(rejected("Storage is readonly")));
    let actions = actions(api.clone());
    lock_state(&actions.context().state).add_host_dialog_open = true;

    actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), String::new())
        .await;

    assert_eq!(api.calls().len(), 1, "no reload after failure");
    let state = lock_state(&actions.context().state);
    assert!(!state.add_host_dialog_open);
    assert_eq!(state.notifications[0].severity, Severity::Warning);
    assert!(state.notifications[0].message.ends_with(": Storage is readonly"));
}

#[tokio::test]
async fn test_add_host_transport_failure_is_danger() {
    let api = FakeApi::new();
    api.respond(|r| r.add_host = Err(transport()));
    let actions = actions(api.clone());

    actions
        .clone()
        .add_host("nas2".into(), "22:22:22:22:22:22".into(), String::new())
        .await;

    let notes = notifications(&actions);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Danger);
    assert!(notes[0].message.ends_with("nas2"));
}

// --- Delete host ---

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let api = FakeApi::new();
    let actions = actions(api.clone());
    let mut asked = String::new();

    actions
        .delete_host(NAS, "nas", |prompt| {
            asked = prompt.to_string();
            false
        })
        .await;

    assert!(asked.contains("nas"));
    assert!(api.calls().is_empty());
    assert!(notifications(&actions).is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_reloads_view() {
    let api = FakeApi::new();
    api.respond(|r| r.hosts = Ok(vec![host("desktop", DESKTOP)]));
    let actions = actions(api.clone());

    actions.delete_host(NAS, "nas", |_| true).await;

    assert_eq!(
        api.calls(),
        vec![Call::DeleteHost(NAS.to_string()), Call::Hosts, Call::Statuses]
    );
    let state = lock_state(&actions.context().state);
    assert!(state.hosts.iter().all(|h| h.mac != NAS));
    assert!(!state.wake_buttons.contains_key(NAS));
    assert_eq!(state.notifications[0].severity, Severity::Success);
    assert!(state.notifications[0].message.ends_with("nas"));
}

#[tokio::test]
async fn test_failed_delete_keeps_host() {
    let api = FakeApi::new();
    api.respond(|r| r.delete_host = Err(rejected("Failed to remove host")));
    let actions = actions(api.clone());

    actions.delete_host(NAS, "nas", |_| true).await;

    assert_eq!(api.calls(), vec![Call::DeleteHost(NAS.to_string())]);
    let state = lock_state(&actions.context().state);
    assert!(state.hosts.iter().any(|h| h.mac == NAS));
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].severity, Severity::Warning);
    assert!(state.notifications[0].message.ends_with(": Failed to remove host"));
}

// --- Host list ---

#[tokio::test]
async fn test_failed_host_load_keeps_list() {
    let api = FakeApi::new();
    api.respond(|r| r.hosts = Err(transport()));
    let actions = actions(api.clone());

    actions.reload_view().await;

    assert_eq!(api.calls(), vec![Call::Hosts], "statuses are not fetched");
    let state = lock_state(&actions.context().state);
    assert_eq!(state.hosts.len(), 2);
    assert_eq!(state.notifications[0].severity, Severity::Danger);
}

#[test]
fn test_delete_prompt_names_host() {
    assert_eq!(delete_prompt("nas"), "Are you sure you want to delete nas?");
}
