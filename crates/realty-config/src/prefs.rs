//! Appearance preference persistence.
//!
//! [`PrefStore`] mirrors the product's browser-storage model: every
//! preference lives under its own `re-crm-*` key as a plain string, reads
//! validate against the field's enumerated domain and fall back to the
//! default on anything unrecognized, and writes go through per-key setters
//! that persist immediately. A `watch` channel broadcasts the full record
//! after every change so views re-render without polling.
//!
//! Persistence failures never take the session down: the in-memory state
//! keeps the new value and the failure is logged.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use realty_core::appearance::{
    AccentColor, AppearancePreferences, BaseTheme, FontFamily, FontSize, MobileNavLayout,
    NavLayout,
};
use realty_core::nav::{self, NavLinkId};

use crate::ConfigError;

// ── Storage keys ────────────────────────────────────────────────────

const KEY_BASE_THEME: &str = "re-crm-base-theme";
const KEY_ACCENT: &str = "re-crm-accent";
const KEY_LAYOUT: &str = "re-crm-layout";
const KEY_MOBILE_LAYOUT: &str = "re-crm-mobile-layout";
const KEY_FONT_FAMILY: &str = "re-crm-font-family";
const KEY_FONT_SIZE: &str = "re-crm-font-size";
const KEY_SIDEBAR_COLLAPSED: &str = "re-crm-sidebar-collapsed";
const KEY_NAV_ORDER: &str = "re-crm-nav-order";

/// Combined theme key from before base theme and accent were split.
const LEGACY_KEY_THEME: &str = "re-crm-theme";
/// Obsolete nav encoding; `re-crm-nav-order` is authoritative.
const LEGACY_KEY_NAV_LINKS: &str = "re-crm-navlinks";

// ── Backends ────────────────────────────────────────────────────────

/// Flat string key-value storage behind the preference store.
pub trait PrefBackend: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
    fn remove(&mut self, key: &str) -> Result<(), ConfigError>;
}

/// File-backed storage: one TOML table of string pairs, rewritten on every
/// mutation. An unreadable file starts fresh rather than failing open.
pub struct TomlBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl TomlBackend {
    pub fn open(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(%err, path = %path.display(), "unreadable preference file, starting fresh");
                    BTreeMap::new()
                }
            },
            // Missing file is the normal first run.
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl PrefBackend for TomlBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.into(), value.into());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Volatile storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// The appearance preference store.
///
/// Loads once at construction (after legacy-key migration), then serves
/// reads from memory. Every setter updates memory, persists its one key,
/// and broadcasts the full record.
pub struct PrefStore {
    backend: Box<dyn PrefBackend>,
    prefs: AppearancePreferences,
    tx: watch::Sender<AppearancePreferences>,
}

impl PrefStore {
    pub fn new(mut backend: Box<dyn PrefBackend>) -> Self {
        migrate_legacy_keys(backend.as_mut());
        let prefs = load_preferences(backend.as_ref());
        let (tx, _) = watch::channel(prefs.clone());
        Self { backend, prefs, tx }
    }

    /// Open a file-backed store at the given preference file path.
    pub fn open(path: PathBuf) -> Self {
        Self::new(Box::new(TomlBackend::open(path)))
    }

    /// A store with no persistence at all.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn prefs(&self) -> &AppearancePreferences {
        &self.prefs
    }

    /// Subscribe to the full record; receives a clone after every change.
    pub fn subscribe(&self) -> watch::Receiver<AppearancePreferences> {
        self.tx.subscribe()
    }

    // ── Setters ──

    pub fn set_base_theme(&mut self, theme: BaseTheme) {
        self.prefs.base_theme = theme;
        self.persist(KEY_BASE_THEME, theme.to_string());
        self.broadcast();
    }

    pub fn set_accent_color(&mut self, accent: AccentColor) {
        self.prefs.accent_color = accent;
        self.persist(KEY_ACCENT, accent.to_string());
        self.broadcast();
    }

    pub fn set_layout(&mut self, layout: NavLayout) {
        self.prefs.layout = layout;
        self.persist(KEY_LAYOUT, layout.to_string());
        self.broadcast();
    }

    pub fn set_mobile_layout(&mut self, layout: MobileNavLayout) {
        self.prefs.mobile_layout = layout;
        self.persist(KEY_MOBILE_LAYOUT, layout.to_string());
        self.broadcast();
    }

    pub fn set_font_family(&mut self, font: FontFamily) {
        self.prefs.font_family = font;
        self.persist(KEY_FONT_FAMILY, font.to_string());
        self.broadcast();
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        self.prefs.font_size = size;
        self.persist(KEY_FONT_SIZE, size.points().to_string());
        self.broadcast();
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.prefs.sidebar_collapsed = collapsed;
        self.persist(KEY_SIDEBAR_COLLAPSED, collapsed.to_string());
        self.broadcast();
    }

    pub fn toggle_sidebar(&mut self) {
        self.set_sidebar_collapsed(!self.prefs.sidebar_collapsed);
    }

    /// Store a new nav order. The input is reconciled against the catalog
    /// first, so a partial or duplicated list still persists a full
    /// permutation.
    pub fn set_nav_order(&mut self, order: Vec<NavLinkId>) {
        let order = nav::reconcile(&order);
        let encoded = encode_nav_order(&order);
        self.prefs.nav_order = order;
        self.persist(KEY_NAV_ORDER, encoded);
        self.broadcast();
    }

    /// Reset every preference to its default, persisting each key.
    pub fn reset(&mut self) {
        self.prefs = AppearancePreferences::default();
        self.persist(KEY_BASE_THEME, self.prefs.base_theme.to_string());
        self.persist(KEY_ACCENT, self.prefs.accent_color.to_string());
        self.persist(KEY_LAYOUT, self.prefs.layout.to_string());
        self.persist(KEY_MOBILE_LAYOUT, self.prefs.mobile_layout.to_string());
        self.persist(KEY_FONT_FAMILY, self.prefs.font_family.to_string());
        self.persist(KEY_FONT_SIZE, self.prefs.font_size.points().to_string());
        self.persist(
            KEY_SIDEBAR_COLLAPSED,
            self.prefs.sidebar_collapsed.to_string(),
        );
        self.persist(KEY_NAV_ORDER, encode_nav_order(&self.prefs.nav_order));
        self.broadcast();
    }

    fn persist(&mut self, key: &str, value: String) {
        if let Err(err) = self.backend.set(key, &value) {
            warn!(%err, key, "failed to persist preference, keeping in-memory value");
        }
    }

    fn broadcast(&self) {
        self.tx.send_modify(|prefs| *prefs = self.prefs.clone());
    }
}

// ── Loading ─────────────────────────────────────────────────────────

fn load_preferences(backend: &dyn PrefBackend) -> AppearancePreferences {
    let defaults = AppearancePreferences::default();
    AppearancePreferences {
        base_theme: read_enum(backend, KEY_BASE_THEME, defaults.base_theme),
        accent_color: read_enum(backend, KEY_ACCENT, defaults.accent_color),
        layout: read_enum(backend, KEY_LAYOUT, defaults.layout),
        mobile_layout: read_enum(backend, KEY_MOBILE_LAYOUT, defaults.mobile_layout),
        font_family: read_enum(backend, KEY_FONT_FAMILY, defaults.font_family),
        font_size: read_font_size(backend, defaults.font_size),
        sidebar_collapsed: read_sidebar_collapsed(backend),
        nav_order: read_nav_order(backend),
    }
}

fn read_enum<T: FromStr + Copy>(backend: &dyn PrefBackend, key: &str, fallback: T) -> T {
    let Some(raw) = backend.get(key) else {
        return fallback;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            debug!(key, value = %raw, "ignoring unrecognized preference value");
            fallback
        }
    }
}

fn read_font_size(backend: &dyn PrefBackend, fallback: FontSize) -> FontSize {
    let Some(raw) = backend.get(KEY_FONT_SIZE) else {
        return fallback;
    };
    match raw.parse::<u8>().ok().and_then(FontSize::from_points) {
        Some(size) => size,
        None => {
            debug!(value = %raw, "ignoring out-of-range font size");
            fallback
        }
    }
}

fn read_sidebar_collapsed(backend: &dyn PrefBackend) -> bool {
    // Anything but the literal "true" reads as expanded.
    backend.get(KEY_SIDEBAR_COLLAPSED).as_deref() == Some("true")
}

/// Read the persisted nav order: a JSON array of link id strings. Unknown
/// ids are dropped, then the remainder is reconciled against the catalog.
/// Unparseable storage falls back to the canonical order.
fn read_nav_order(backend: &dyn PrefBackend) -> Vec<NavLinkId> {
    let Some(raw) = backend.get(KEY_NAV_ORDER) else {
        return nav::canonical_order();
    };
    let ids: Vec<String> = match serde_json::from_str(&raw) {
        Ok(ids) => ids,
        Err(err) => {
            debug!(%err, "ignoring unreadable nav order");
            return nav::canonical_order();
        }
    };
    let saved: Vec<NavLinkId> = ids.iter().filter_map(|id| id.parse().ok()).collect();
    nav::reconcile(&saved)
}

fn encode_nav_order(order: &[NavLinkId]) -> String {
    serde_json::to_string(order).unwrap_or_else(|_| "[]".into())
}

// ── Legacy migration ────────────────────────────────────────────────

/// Migrate keys from the single-theme era, before field loading.
///
/// A legacy combined theme naming "ocean" maps to midnight + ocean, one
/// naming "sunset" maps to dark-pro + sunrise; the mapped values are
/// written through to the new keys. The legacy key is removed whenever
/// present, matched or not. The obsolete navlinks key is dropped on sight.
fn migrate_legacy_keys(backend: &mut dyn PrefBackend) {
    if let Some(theme) = backend.get(LEGACY_KEY_THEME) {
        let mapped = if theme.contains("ocean") {
            Some((BaseTheme::Midnight, AccentColor::Ocean))
        } else if theme.contains("sunset") {
            Some((BaseTheme::DarkPro, AccentColor::Sunrise))
        } else {
            None
        };
        if let Some((base, accent)) = mapped {
            if let Err(err) = backend.set(KEY_BASE_THEME, &base.to_string()) {
                warn!(%err, "failed to write migrated base theme");
            }
            if let Err(err) = backend.set(KEY_ACCENT, &accent.to_string()) {
                warn!(%err, "failed to write migrated accent");
            }
            info!(legacy = %theme, base = %base, accent = %accent, "migrated legacy theme");
        }
        if let Err(err) = backend.remove(LEGACY_KEY_THEME) {
            warn!(%err, "failed to remove legacy theme key");
        }
    }

    if backend.get(LEGACY_KEY_NAV_LINKS).is_some() {
        debug!("removing obsolete navlinks key");
        if let Err(err) = backend.remove(LEGACY_KEY_NAV_LINKS) {
            warn!(%err, "failed to remove legacy navlinks key");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn seeded(entries: &[(&str, &str)]) -> PrefStore {
        let mut backend = MemoryBackend::new();
        for (key, value) in entries {
            backend.set(key, value).unwrap();
        }
        PrefStore::new(Box::new(backend))
    }

    fn read_raw(path: &Path) -> BTreeMap<String, String> {
        toml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn first_run_yields_defaults() {
        let store = PrefStore::in_memory();
        assert_eq!(*store.prefs(), AppearancePreferences::default());
    }

    #[test]
    fn preferences_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = PrefStore::open(path.clone());
        store.set_accent_color(AccentColor::Rose);
        store.set_layout(NavLayout::Horizontal);
        store.set_font_size(FontSize::Large);
        store.set_sidebar_collapsed(true);
        drop(store);

        let store = PrefStore::open(path);
        assert_eq!(store.prefs().accent_color, AccentColor::Rose);
        assert_eq!(store.prefs().layout, NavLayout::Horizontal);
        assert_eq!(store.prefs().font_size, FontSize::Large);
        assert!(store.prefs().sidebar_collapsed);
        // Untouched fields keep their defaults.
        assert_eq!(store.prefs().base_theme, BaseTheme::System);
    }

    #[test]
    fn values_are_stored_in_string_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = PrefStore::open(path.clone());
        store.set_base_theme(BaseTheme::DarkPro);
        store.set_font_size(FontSize::Spacious);
        store.set_sidebar_collapsed(true);

        let raw = read_raw(&path);
        assert_eq!(raw["re-crm-base-theme"], "dark-pro");
        assert_eq!(raw["re-crm-font-size"], "18");
        assert_eq!(raw["re-crm-sidebar-collapsed"], "true");
    }

    #[test]
    fn corrupted_value_falls_back_to_default() {
        let store = seeded(&[
            (KEY_ACCENT, "magenta"),
            (KEY_LAYOUT, "horizontal"),
        ]);
        assert_eq!(store.prefs().accent_color, AccentColor::Indigo);
        assert_eq!(store.prefs().layout, NavLayout::Horizontal);
    }

    #[test]
    fn font_size_outside_steps_is_ignored() {
        assert_eq!(
            seeded(&[(KEY_FONT_SIZE, "13")]).prefs().font_size,
            FontSize::Medium
        );
        assert_eq!(
            seeded(&[(KEY_FONT_SIZE, "huge")]).prefs().font_size,
            FontSize::Medium
        );
        assert_eq!(
            seeded(&[(KEY_FONT_SIZE, "17")]).prefs().font_size,
            FontSize::Large
        );
    }

    #[test]
    fn sidebar_collapsed_requires_literal_true() {
        assert!(seeded(&[(KEY_SIDEBAR_COLLAPSED, "true")]).prefs().sidebar_collapsed);
        assert!(!seeded(&[(KEY_SIDEBAR_COLLAPSED, "yes")]).prefs().sidebar_collapsed);
        assert!(!seeded(&[(KEY_SIDEBAR_COLLAPSED, "false")]).prefs().sidebar_collapsed);
    }

    #[test]
    fn nav_order_round_trips_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = PrefStore::open(path.clone());
        store.set_nav_order(vec![NavLinkId::Reports, NavLinkId::Deals]);

        let raw = read_raw(&path);
        let stored: Vec<String> = serde_json::from_str(&raw["re-crm-nav-order"]).unwrap();
        assert_eq!(stored.len(), nav::CATALOG.len());
        assert_eq!(stored[0], "reports");
        assert_eq!(stored[1], "deals");
        drop(store);

        let store = PrefStore::open(path);
        assert_eq!(store.prefs().nav_order[0], NavLinkId::Reports);
        assert_eq!(store.prefs().nav_order[1], NavLinkId::Deals);
        assert_eq!(store.prefs().nav_order.len(), nav::CATALOG.len());
    }

    #[test]
    fn unknown_nav_ids_are_dropped() {
        let store = seeded(&[(KEY_NAV_ORDER, r#"["analytics","deals","clients"]"#)]);
        let order = &store.prefs().nav_order;
        assert_eq!(order[0], NavLinkId::Deals);
        assert_eq!(order[1], NavLinkId::Clients);
        assert_eq!(order.len(), nav::CATALOG.len());
    }

    #[test]
    fn unreadable_nav_order_falls_back_to_canonical() {
        let store = seeded(&[(KEY_NAV_ORDER, "deals,clients")]);
        assert_eq!(store.prefs().nav_order, nav::canonical_order());
    }

    #[test]
    fn legacy_ocean_theme_migrates_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(
            &path,
            "\"re-crm-theme\" = \"ocean\"\n\"re-crm-base-theme\" = \"light\"\n",
        )
        .unwrap();

        let store = PrefStore::open(path.clone());
        assert_eq!(store.prefs().base_theme, BaseTheme::Midnight);
        assert_eq!(store.prefs().accent_color, AccentColor::Ocean);

        let raw = read_raw(&path);
        assert!(!raw.contains_key("re-crm-theme"));
        assert_eq!(raw["re-crm-base-theme"], "midnight");
        assert_eq!(raw["re-crm-accent"], "ocean");
    }

    #[test]
    fn legacy_sunset_theme_migrates_by_substring() {
        let store = seeded(&[(LEGACY_KEY_THEME, "sunset-glow")]);
        assert_eq!(store.prefs().base_theme, BaseTheme::DarkPro);
        assert_eq!(store.prefs().accent_color, AccentColor::Sunrise);
    }

    #[test]
    fn unrecognized_legacy_theme_only_removes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(
            &path,
            "\"re-crm-theme\" = \"light\"\n\"re-crm-base-theme\" = \"midnight\"\n",
        )
        .unwrap();

        let store = PrefStore::open(path.clone());
        assert_eq!(store.prefs().base_theme, BaseTheme::Midnight);
        assert!(!read_raw(&path).contains_key("re-crm-theme"));
    }

    #[test]
    fn stale_navlinks_key_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(
            &path,
            "\"re-crm-navlinks\" = \"[obsolete]\"\n\"re-crm-nav-order\" = '[\"calendar\"]'\n",
        )
        .unwrap();

        let store = PrefStore::open(path.clone());
        assert_eq!(store.prefs().nav_order[0], NavLinkId::Calendar);
        assert!(!read_raw(&path).contains_key("re-crm-navlinks"));
    }

    #[test]
    fn reset_restores_and_persists_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = PrefStore::open(path.clone());
        store.set_base_theme(BaseTheme::Midnight);
        store.set_accent_color(AccentColor::Forest);
        store.set_nav_order(vec![NavLinkId::Reports]);
        store.reset();
        assert_eq!(*store.prefs(), AppearancePreferences::default());
        drop(store);

        let store = PrefStore::open(path);
        assert_eq!(*store.prefs(), AppearancePreferences::default());
    }

    #[test]
    fn subscribers_observe_changes() {
        let mut store = PrefStore::in_memory();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set_base_theme(BaseTheme::Light);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().base_theme, BaseTheme::Light);

        store.toggle_sidebar();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow().sidebar_collapsed);
    }

    #[test]
    fn persist_failure_keeps_in_memory_state() {
        struct FailingBackend;

        impl PrefBackend for FailingBackend {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&mut self, _key: &str, _value: &str) -> Result<(), ConfigError> {
                Err(ConfigError::Io(std::io::Error::other("disk full")))
            }
            fn remove(&mut self, _key: &str) -> Result<(), ConfigError> {
                Ok(())
            }
        }

        let mut store = PrefStore::new(Box::new(FailingBackend));
        store.set_accent_color(AccentColor::Violet);
        assert_eq!(store.prefs().accent_color, AccentColor::Violet);
    }
}
