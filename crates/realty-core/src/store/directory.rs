use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::mock::MockApi;
use crate::model::{AppNotification, Client, DashboardFeed, Deal, Employee, Site};
use crate::store::collection::Collection;

/// Aggregated reactive storage for every dataset the dashboard shows.
///
/// One [`Collection`] per entity type plus a `watch` channel for the
/// dashboard feed, which is a single aggregate rather than a keyed set.
/// Screens subscribe to the slices they render and re-read snapshots on
/// change notification.
pub struct Directory {
    clients: Collection<Client>,
    sites: Collection<Site>,
    deals: Collection<Deal>,
    employees: Collection<Employee>,
    notifications: Collection<AppNotification>,
    dashboard: watch::Sender<Arc<DashboardFeed>>,
}

impl Directory {
    pub fn new() -> Self {
        let (dashboard, _) = watch::channel(Arc::new(DashboardFeed::default()));
        Self {
            clients: Collection::new(),
            sites: Collection::new(),
            deals: Collection::new(),
            employees: Collection::new(),
            notifications: Collection::new(),
            dashboard,
        }
    }

    /// Fetch every dataset concurrently and replace current contents.
    pub async fn load(&self, api: &MockApi) {
        let (clients, sites, deals, employees, notifications, dashboard) = tokio::join!(
            api.fetch_clients(),
            api.fetch_sites(),
            api.fetch_deals(),
            api.fetch_employees(),
            api.fetch_notifications(),
            api.fetch_dashboard(),
        );

        info!(
            clients = clients.len(),
            sites = sites.len(),
            deals = deals.len(),
            employees = employees.len(),
            notifications = notifications.len(),
            "datasets loaded"
        );

        self.clients
            .replace_all(clients.into_iter().map(|c| (c.id.clone(), c)).collect());
        self.sites
            .replace_all(sites.into_iter().map(|s| (s.id.clone(), s)).collect());
        self.deals
            .replace_all(deals.into_iter().map(|d| (d.id.clone(), d)).collect());
        self.employees
            .replace_all(employees.into_iter().map(|e| (e.id.clone(), e)).collect());
        self.notifications
            .replace_all(notifications.into_iter().map(|n| (n.id.clone(), n)).collect());
        self.dashboard.send_modify(|feed| *feed = Arc::new(dashboard));
    }

    // ── Snapshots ──

    pub fn clients(&self) -> Arc<Vec<Arc<Client>>> {
        self.clients.snapshot()
    }

    pub fn sites(&self) -> Arc<Vec<Arc<Site>>> {
        self.sites.snapshot()
    }

    pub fn deals(&self) -> Arc<Vec<Arc<Deal>>> {
        self.deals.snapshot()
    }

    pub fn employees(&self) -> Arc<Vec<Arc<Employee>>> {
        self.employees.snapshot()
    }

    pub fn notifications(&self) -> Arc<Vec<Arc<AppNotification>>> {
        self.notifications.snapshot()
    }

    pub fn dashboard(&self) -> Arc<DashboardFeed> {
        self.dashboard.borrow().clone()
    }

    // ── Subscriptions ──

    pub fn subscribe_clients(&self) -> watch::Receiver<Arc<Vec<Arc<Client>>>> {
        self.clients.subscribe()
    }

    pub fn subscribe_sites(&self) -> watch::Receiver<Arc<Vec<Arc<Site>>>> {
        self.sites.subscribe()
    }

    pub fn subscribe_deals(&self) -> watch::Receiver<Arc<Vec<Arc<Deal>>>> {
        self.deals.subscribe()
    }

    pub fn subscribe_employees(&self) -> watch::Receiver<Arc<Vec<Arc<Employee>>>> {
        self.employees.subscribe()
    }

    pub fn subscribe_notifications(&self) -> watch::Receiver<Arc<Vec<Arc<AppNotification>>>> {
        self.notifications.subscribe()
    }

    pub fn subscribe_dashboard(&self) -> watch::Receiver<Arc<DashboardFeed>> {
        self.dashboard.subscribe()
    }

    // ── Notification operations ──

    /// Mark one notification read. Returns `false` for an unknown id.
    pub fn mark_notification_read(&self, id: &str) -> bool {
        self.notifications.update(id, |n| n.read = true)
    }

    pub fn mark_all_notifications_read(&self) {
        self.notifications.update_all(|n| n.read = true);
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .snapshot()
            .iter()
            .filter(|n| !n.read)
            .count()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn loaded() -> Directory {
        let dir = Directory::new();
        let api = MockApi::new(Duration::ZERO);
        tokio_test::block_on(dir.load(&api));
        dir
    }

    #[test]
    fn load_populates_every_dataset() {
        let dir = loaded();

        assert_eq!(dir.clients().len(), 5);
        assert_eq!(dir.sites().len(), 3);
        assert_eq!(dir.deals().len(), 3);
        assert_eq!(dir.employees().len(), 5);
        assert_eq!(dir.notifications().len(), 6);
        assert_eq!(dir.dashboard().kpis.len(), 4);
    }

    #[test]
    fn snapshots_are_id_ordered() {
        let dir = loaded();

        let clients = dir.clients();
        let ids: Vec<&str> = clients.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn mark_notification_read_flips_one_entry() {
        let dir = loaded();
        assert_eq!(dir.unread_count(), 3);

        assert!(dir.mark_notification_read("N001"));
        assert_eq!(dir.unread_count(), 2);

        assert!(!dir.mark_notification_read("N999"));
        assert_eq!(dir.unread_count(), 2);
    }

    #[test]
    fn mark_all_notifications_read_clears_unread() {
        let dir = loaded();
        dir.mark_all_notifications_read();
        assert_eq!(dir.unread_count(), 0);
    }

    #[test]
    fn subscribers_see_notification_updates() {
        let dir = loaded();
        let mut rx = dir.subscribe_notifications();
        rx.borrow_and_update();

        dir.mark_notification_read("N002");
        assert!(rx.has_changed().unwrap());
        let unread = rx.borrow().iter().filter(|n| !n.read).count();
        assert_eq!(unread, 2);
    }
}
