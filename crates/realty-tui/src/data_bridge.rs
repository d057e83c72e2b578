//! Data bridge — connects [`Directory`] subscriptions to TUI actions.
//!
//! Runs as a background task: loads the datasets through the mock API, then
//! loops forwarding every snapshot change as an [`Action`] through the TUI's
//! action channel. Mutations flow the other way (app → `Directory`), so the
//! bridge is also how a read-state change echoes back to every screen.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use realty_core::{Directory, MockApi};

use crate::action::Action;

/// Forward dataset changes to the TUI until cancelled.
///
/// Subscriptions are taken before the initial load so the fill itself is
/// observed as the first change on every channel; screens render their
/// loading state until then.
pub async fn run_data_bridge(
    directory: Arc<Directory>,
    api: MockApi,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut clients = directory.subscribe_clients();
    let mut sites = directory.subscribe_sites();
    let mut deals = directory.subscribe_deals();
    let mut employees = directory.subscribe_employees();
    let mut notifications = directory.subscribe_notifications();
    let mut dashboard = directory.subscribe_dashboard();

    directory.load(&api).await;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = clients.changed() => {
                let snap = clients.borrow_and_update().clone();
                let _ = action_tx.send(Action::ClientsUpdated(snap));
            }
            Ok(()) = sites.changed() => {
                let snap = sites.borrow_and_update().clone();
                let _ = action_tx.send(Action::SitesUpdated(snap));
            }
            Ok(()) = deals.changed() => {
                let snap = deals.borrow_and_update().clone();
                let _ = action_tx.send(Action::DealsUpdated(snap));
            }
            Ok(()) = employees.changed() => {
                let snap = employees.borrow_and_update().clone();
                let _ = action_tx.send(Action::EmployeesUpdated(snap));
            }
            Ok(()) = notifications.changed() => {
                let snap = notifications.borrow_and_update().clone();
                let _ = action_tx.send(Action::NotificationsUpdated(snap));
            }
            Ok(()) = dashboard.changed() => {
                let snap = dashboard.borrow_and_update().clone();
                let _ = action_tx.send(Action::DashboardUpdated(snap));
            }
        }
    }

    debug!("data bridge shut down");
}
