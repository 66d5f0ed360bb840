//! Completion notice sent to whatever hosts the explorer.
//!
//! The controller only knows the payload and the [`NotificationSink`] it was
//! given; how the notice leaves the process is up to the sink.

use bevy::log::warn;
use serde::Serialize;

pub const NOTICE_TYPE: &str = "BLOCK_COMPLETION";
pub const BLOCK_ID: &str = "fluid-density-simulation";
pub const SIMULATION_STARTED: &str = "simulation_started";

/// Fixed-shape completion event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotice {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub block_id: &'static str,
    pub completed: bool,
    pub data: InteractionData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionData {
    pub interaction_type: &'static str,
}

impl CompletionNotice {
    pub fn simulation_started() -> Self {
        Self {
            kind: NOTICE_TYPE,
            block_id: BLOCK_ID,
            completed: true,
            data: InteractionData {
                interaction_type: SIMULATION_STARTED,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fire-and-forget receiver of completion notices.
pub trait NotificationSink: Send + Sync + 'static {
    fn notify(&self, notice: &CompletionNotice);
}

impl<F> NotificationSink for F
where
    F: Fn(&CompletionNotice) + Send + Sync + 'static,
{
    fn notify(&self, notice: &CompletionNotice) {
        self(notice)
    }
}

/// Writes each notice as one JSON line on stdout for the parent process.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&self, notice: &CompletionNotice) {
        match notice.to_json() {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("Dropped completion notice: {err}"),
        }
    }
}
