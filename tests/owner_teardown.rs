use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scenekeeper::{
    Config, Destructible, Event, EventKind, LifecycleError, Owner, Subscribe, TeardownSignal,
};

/// Host-like handle: shared validity flag plus a destroy journal.
#[derive(Clone, Debug)]
struct Node {
    name: &'static str,
    alive: Arc<AtomicBool>,
    journal: Arc<Mutex<Vec<&'static str>>>,
}

impl Node {
    fn new(name: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            name,
            alive: Arc::new(AtomicBool::new(true)),
            journal: Arc::clone(journal),
        }
    }
}

impl Destructible for Node {
    fn destroy(&self) {
        self.alive.store(false, Ordering::SeqCst);
        self.journal.lock().unwrap().push(self.name);
    }

    fn is_valid(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn label(&self) -> &str {
        self.name
    }
}

#[derive(Default)]
struct Audit {
    events: Mutex<Vec<(EventKind, Option<String>)>>,
}

#[async_trait]
impl Subscribe for Audit {
    async fn on_event(&self, ev: &Event) {
        self.events
            .lock()
            .unwrap()
            .push((ev.kind, ev.object.as_deref().map(str::to_string)));
    }

    fn name(&self) -> &'static str {
        "audit"
    }
}

#[tokio::test]
async fn every_handle_is_destroyed_once_in_registration_order() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let owner = Owner::builder(Config::named("ghost")).build();
    let registry = owner.registry();

    let names = ["A", "B", "C", "D", "E"];
    let handles: Vec<Node> = names
        .iter()
        .map(|&n| registry.create_tracked(|| Node::new(n, &journal)).unwrap())
        .collect();
    assert_eq!(registry.len(), names.len());

    owner.shutdown().await;

    assert_eq!(*journal.lock().unwrap(), names);
    assert!(handles.iter().all(|h| !h.is_valid()));
    assert!(!registry.is_alive());
    assert_eq!(registry.teardown(), None);
    assert_eq!(journal.lock().unwrap().len(), names.len());
}

#[tokio::test]
async fn externally_destroyed_entry_is_skipped() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let audit = Arc::new(Audit::default());
    let owner = Owner::builder(Config::named("ghost"))
        .with_subscribers(vec![audit.clone() as Arc<dyn Subscribe>])
        .build();
    let registry = owner.registry();

    registry.create_tracked(|| Node::new("A", &journal)).unwrap();
    let b = registry.create_tracked(|| Node::new("B", &journal)).unwrap();
    registry.create_tracked(|| Node::new("C", &journal)).unwrap();

    b.alive.store(false, Ordering::SeqCst);
    owner.shutdown().await;

    assert_eq!(*journal.lock().unwrap(), vec!["A", "C"]);
    let teardown: Vec<(EventKind, Option<String>)> = audit
        .events
        .lock()
        .unwrap()
        .iter()
        .filter(|(k, _)| *k != EventKind::TrackedRegistered)
        .cloned()
        .collect();
    assert_eq!(
        teardown,
        vec![
            (EventKind::TeardownRequested, None),
            (EventKind::TrackedDestroyed, Some("A".to_string())),
            (EventKind::TrackedSkipped, Some("B".to_string())),
            (EventKind::TrackedDestroyed, Some("C".to_string())),
            (EventKind::TeardownCompleted, None),
        ]
    );
}

#[tokio::test]
async fn callbacks_are_inert_once_the_host_fires_teardown() {
    let signal = TeardownSignal::new();
    let owner = Owner::builder(Config::named("ghost"))
        .with_signal(signal.clone())
        .build();
    let registry = owner.registry();

    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let on_event = registry.wrap_callback(move |(a, b): (u32, u32)| {
        c.fetch_add(1, Ordering::SeqCst);
        a + b
    });
    assert_eq!(on_event.call((1, 2)), Some(3));

    signal.fire();
    owner.torn_down().await;

    for i in 0..10 {
        assert_eq!(on_event.call((i, i)), None);
    }
    let c = calls.clone();
    let late = registry.wrap_callback(move |()| c.fetch_add(1, Ordering::SeqCst));
    assert_eq!(late.call(()), None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn creation_after_teardown_is_refused() {
    let owner = Owner::builder(Config::named("ghost")).build();
    owner.shutdown().await;

    let err = owner
        .registry()
        .create_tracked(|| Node::new("late", &Arc::new(Mutex::new(Vec::new()))))
        .unwrap_err();
    assert_eq!(err, LifecycleError::TornDown { owner: "ghost".into() });
}
