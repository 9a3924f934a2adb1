//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [registered] owner="pumpkin" object="mesh_visual" index=0
//! [teardown-requested] owner="pumpkin" tracked=2
//! [destroyed] owner="pumpkin" object="mesh_visual" index=0
//! [skipped] owner="pumpkin" object="scene_object" index=1
//! [teardown-completed] owner="pumpkin"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let owner = e.owner.as_deref().unwrap_or("unknown");
        let object = e.object.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::TrackedRegistered => {
                println!("[registered] owner={owner:?} object={object:?} index={:?}", e.index);
            }
            EventKind::RegisterRejected => {
                println!("[rejected] owner={owner:?} reason={:?}", e.reason);
            }
            EventKind::TeardownRequested => {
                println!("[teardown-requested] owner={owner:?} tracked={:?}", e.index);
            }
            EventKind::TrackedDestroyed => {
                println!("[destroyed] owner={owner:?} object={object:?} index={:?}", e.index);
            }
            EventKind::TrackedSkipped => {
                println!("[skipped] owner={owner:?} object={object:?} index={:?}", e.index);
            }
            EventKind::DestroyPanicked => {
                println!(
                    "[destroy-panicked] owner={owner:?} object={object:?} index={:?} info={:?}",
                    e.index, e.reason
                );
            }
            EventKind::TeardownCompleted => {
                println!("[teardown-completed] owner={owner:?}");
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] subscriber={object} reason={:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={object} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
