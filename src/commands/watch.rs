use super::{open_service, ConsoleService};
use crate::libs::countdown::TickEngine;
use crate::libs::messages::Message;
use crate::libs::notification::NotificationKind;
use crate::libs::service::TimerEvent;
use crate::libs::timer::TimerId;
use crate::{msg_error, msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::oneshot;
use tokio::time::{self, Duration};

const DELIVERY_POLL: Duration = Duration::from_secs(1);

/// Delivers due reminders and drives countdowns until Ctrl-C.
///
/// With `start`, that timer's countdown is started first and the watcher
/// exits once it completes.
pub async fn cmd(start: Option<TimerId>) -> Result<()> {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => msg_info!(Message::WatcherReceivedCtrlC),
            Err(e) => msg_error!(Message::WatcherCtrlCListenFailed(e.to_string())),
        }
        let _ = shutdown_tx.send(());
    });

    let service = Arc::new(open_service().await);
    if service.check_permissions().await {
        service.reschedule_all().await;
    }

    let mut events = service.subscribe();
    let engine = TickEngine::spawn(service.clone(), service.config().tick_interval());

    if let Some(id) = &start {
        if service.start_timer(id).await.is_none() {
            msg_error!(Message::TimerNotFound(id.clone()));
            engine.stop().await;
            return Ok(());
        }
    }
    msg_info!(Message::WatcherStarted(service.timers().len()));

    let mut poll = time::interval(DELIVERY_POLL);
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            event = events.recv() => match event {
                Ok(TimerEvent::Completed(timer)) => {
                    msg_success!(Message::TimerCompleted(timer.name.clone()));
                    if start.as_ref() == Some(&timer.id) {
                        break;
                    }
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            _ = poll.tick() => deliver_due(&service).await,
        }
    }

    msg_info!(Message::WatcherShuttingDown);
    engine.stop().await;
    Ok(())
}

/// Presents every reminder whose fire time has passed and re-expands the
/// owning timers so the next occurrence is queued.
async fn deliver_due(service: &ConsoleService) {
    let due = service.scheduler().center().take_due(Local::now().naive_local());

    let timer_ids: BTreeSet<TimerId> = due
        .into_iter()
        .filter(|notification| notification.content.data.action == Some(NotificationKind::Reminder))
        .map(|notification| notification.content.data.timer_id)
        .collect();

    for id in timer_ids {
        service.refresh_schedule(&id).await;
    }
}
