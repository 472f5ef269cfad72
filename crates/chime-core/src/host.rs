//! Process-wide host event hub.
//!
//! The terminal has one event source, but several parties want to hear every
//! event: the application, and any widget that temporarily needs a
//! screen-wide listener (an open overlay watching for outside presses, for
//! example). The runtime reads crossterm events once and broadcasts them
//! here; [`listen`] turns the hub into a [`Subscription`] so each listener is
//! started and stopped by ordinary subscription diffing.

use crate::event::HostEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::OnceLock;
use tokio::sync::{broadcast, mpsc};
use tokio::task::AbortHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

const HUB_CAPACITY: usize = 256;

static HUB: OnceLock<broadcast::Sender<HostEvent>> = OnceLock::new();

fn hub() -> &'static broadcast::Sender<HostEvent> {
    HUB.get_or_init(|| broadcast::channel(HUB_CAPACITY).0)
}

/// Publish an event to every live listener.
///
/// Returns how many listeners received it; zero when nobody is listening.
/// The runtime calls this for each terminal event, and tests call it to
/// simulate input.
pub fn dispatch(event: HostEvent) -> usize {
    hub().send(event).unwrap_or(0)
}

/// Subscribe to every host event, mapping each through `map`.
///
/// The hub receiver is attached when the runtime starts the subscription
/// and detached when it is aborted, so a listener returned only while some
/// state holds is attached only while that state holds. Return `None` from
/// `map` to ignore an event.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![listen(SubscriptionId::of::<App>(), |event| match event {
///         HostEvent::Key(key) => Some(Msg::Key(key)),
///         HostEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
///         _ => None,
///     })]
/// }
/// ```
pub fn listen<Msg: Send + 'static>(
    id: SubscriptionId,
    map: impl Fn(HostEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let listener_id = id.clone();

    Subscription {
        id,
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            // Attach before spawning so events dispatched right after
            // reconciliation are not missed.
            let rx = hub().subscribe();
            tracing::trace!(id = ?listener_id, "host listener attached");
            let handle = tokio::spawn(async move {
                let stream = BroadcastStream::new(rx).filter_map(move |result| {
                    let out = match result {
                        Ok(event) => map(event),
                        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "host listener lagged");
                            None
                        }
                    };
                    futures::future::ready(out)
                });
                futures::pin_mut!(stream);
                while let Some(msg) = stream.next().await {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}

/// Read crossterm events and publish them on the hub until aborted.
pub(crate) fn spawn_terminal_pump() -> AbortHandle {
    let handle = tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(result) = events.next().await {
            match result {
                Ok(event) => {
                    dispatch(HostEvent::from(event));
                }
                Err(err) => {
                    tracing::warn!(%err, "terminal event read failed");
                }
            }
        }
        tracing::debug!("terminal event stream ended");
    });
    handle.abort_handle()
}
