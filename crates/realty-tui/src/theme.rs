//! Theme resolution — turns the stored appearance preferences into concrete
//! colors and the semantic styles screens render with.
//!
//! A [`Theme`] is rebuilt whenever preferences change and handed to every
//! screen at render time, so a base-theme or accent switch repaints on the
//! next frame without any screen holding color state of its own.

use ratatui::style::{Color, Modifier, Style};
use realty_core::{AccentColor, AppearancePreferences, BaseTheme};

// ── Status colors (base-independent) ─────────────────────────────────

pub const SUCCESS_GREEN: Color = Color::Rgb(34, 197, 94); // #22c55e
pub const WARNING_YELLOW: Color = Color::Rgb(234, 179, 8); // #eab308
pub const ERROR_RED: Color = Color::Rgb(239, 68, 68); // #ef4444

/// Base scheme after `system` has been resolved against the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBase {
    Light,
    DarkPro,
    Midnight,
}

impl ResolvedBase {
    /// Resolve a stored base theme. `system` follows the terminal background:
    /// light terminals get the light scheme, everything else dark-pro.
    pub fn of(theme: BaseTheme, terminal_is_light: bool) -> Self {
        match theme {
            BaseTheme::Light => Self::Light,
            BaseTheme::DarkPro => Self::DarkPro,
            BaseTheme::Midnight => Self::Midnight,
            BaseTheme::System => {
                if terminal_is_light {
                    Self::Light
                } else {
                    Self::DarkPro
                }
            }
        }
    }
}

/// Best-effort background sniff. COLORFGBG is `fg;bg` (some terminals insert
/// a middle field); the last field is the background color number, where 7
/// and 15 are the light backgrounds.
fn terminal_background_is_light() -> bool {
    std::env::var("COLORFGBG").is_ok_and(|v| {
        v.rsplit(';')
            .next()
            .and_then(|bg| bg.trim().parse::<u8>().ok())
            .is_some_and(|bg| bg == 7 || bg == 15)
    })
}

// ── Theme ────────────────────────────────────────────────────────────

/// Resolved palette plus the semantic styles derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub base: ResolvedBase,
    pub accent: AccentColor,
    pub bg: Color,
    pub bg_highlight: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    /// Accent primary — titles, focus, selection.
    pub primary: Color,
    /// Accent chart series, in palette order.
    pub chart_series: [Color; 5],
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Resolve from the stored choices, sniffing the terminal for `system`.
    pub fn new(base_theme: BaseTheme, accent: AccentColor) -> Self {
        Self::resolved(
            ResolvedBase::of(base_theme, terminal_background_is_light()),
            accent,
        )
    }

    pub fn from_prefs(prefs: &AppearancePreferences) -> Self {
        Self::new(prefs.base_theme, prefs.accent_color)
    }

    /// Pure construction from an already-resolved base.
    pub fn resolved(base: ResolvedBase, accent: AccentColor) -> Self {
        let (bg, bg_highlight, text, text_dim, border) = base_palette(base);
        let (primary, chart_series) = accent_palette(accent);
        Self {
            base,
            accent,
            bg,
            bg_highlight,
            text,
            text_dim,
            border,
            primary,
            chart_series,
            success: SUCCESS_GREEN,
            warning: WARNING_YELLOW,
            error: ERROR_RED,
        }
    }

    // ── Semantic styles ──────────────────────────────────────────────

    /// Title text for blocks/panels.
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Border for a focused panel.
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Border for an unfocused panel.
    pub fn border_default(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Table header row.
    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Normal table row text.
    pub fn table_row(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Selected / highlighted table row.
    pub fn table_selected(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .bg(self.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Active tab in a tab bar.
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive tab in a tab bar.
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// The navigation item for the screen currently shown.
    pub fn nav_active(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_inactive(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// The item being dragged, rendered at its original position.
    pub fn nav_dragging(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::DIM | Modifier::ITALIC)
    }

    /// The `▎`/`▕` insertion marker shown while hovering a drop target.
    pub fn drop_indicator(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar text.
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint text (e.g., "q quit  ? help").
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Key hint key character.
    pub fn key_hint_key(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolved(ResolvedBase::DarkPro, AccentColor::Indigo)
    }
}

/// `(bg, bg_highlight, text, text_dim, border)` per base scheme.
fn base_palette(base: ResolvedBase) -> (Color, Color, Color, Color, Color) {
    match base {
        ResolvedBase::Light => (
            Color::Rgb(248, 250, 252), // #f8fafc
            Color::Rgb(226, 232, 240), // #e2e8f0
            Color::Rgb(15, 23, 42),    // #0f172a
            Color::Rgb(71, 85, 105),   // #475569
            Color::Rgb(148, 163, 184), // #94a3b8
        ),
        ResolvedBase::DarkPro => (
            Color::Rgb(15, 23, 42),    // #0f172a
            Color::Rgb(30, 41, 59),    // #1e293b
            Color::Rgb(226, 232, 240), // #e2e8f0
            Color::Rgb(148, 163, 184), // #94a3b8
            Color::Rgb(51, 65, 85),    // #334155
        ),
        ResolvedBase::Midnight => (
            Color::Rgb(2, 6, 23),      // #020617
            Color::Rgb(15, 23, 42),    // #0f172a
            Color::Rgb(226, 232, 240), // #e2e8f0
            Color::Rgb(100, 116, 139), // #64748b
            Color::Rgb(30, 41, 59),    // #1e293b
        ),
    }
}

/// `(primary, chart series)` per accent family.
fn accent_palette(accent: AccentColor) -> (Color, [Color; 5]) {
    match accent {
        AccentColor::Indigo => (
            Color::Rgb(99, 102, 241), // #6366f1
            [
                Color::Rgb(59, 130, 246), // #3b82f6
                Color::Rgb(20, 184, 166), // #14b8a6
                Color::Rgb(239, 68, 68),  // #ef4444
                Color::Rgb(249, 115, 22), // #f97316
                Color::Rgb(139, 92, 246), // #8b5cf6
            ],
        ),
        AccentColor::Forest => (
            Color::Rgb(22, 163, 74), // #16a34a
            [
                Color::Rgb(34, 197, 94),  // #22c55e
                Color::Rgb(132, 204, 22), // #84cc16
                Color::Rgb(250, 204, 21), // #facc15
                Color::Rgb(6, 182, 212),  // #06b6d4
                Color::Rgb(168, 85, 247), // #a855f7
            ],
        ),
        AccentColor::Rose => (
            Color::Rgb(225, 29, 72), // #e11d48
            [
                Color::Rgb(244, 63, 94),  // #f43f5e
                Color::Rgb(217, 70, 239), // #d946ef
                Color::Rgb(99, 102, 241), // #6366f1
                Color::Rgb(34, 211, 238), // #22d3ee
                Color::Rgb(245, 158, 11), // #f59e0b
            ],
        ),
        AccentColor::Sunrise => (
            Color::Rgb(249, 115, 22), // #f97316
            [
                Color::Rgb(234, 88, 12),  // #ea580c
                Color::Rgb(234, 179, 8),  // #eab308
                Color::Rgb(239, 68, 68),  // #ef4444
                Color::Rgb(132, 204, 22), // #84cc16
                Color::Rgb(59, 130, 246), // #3b82f6
            ],
        ),
        AccentColor::Violet => (
            Color::Rgb(139, 92, 246), // #8b5cf6
            [
                Color::Rgb(168, 85, 247), // #a855f7
                Color::Rgb(236, 72, 153), // #ec4899
                Color::Rgb(34, 211, 238), // #22d3ee
                Color::Rgb(74, 222, 128), // #4ade80
                Color::Rgb(253, 224, 71), // #fde047
            ],
        ),
        AccentColor::Ocean => (
            Color::Rgb(6, 182, 212), // #06b6d4
            [
                Color::Rgb(8, 145, 178),   // #0891b2
                Color::Rgb(52, 211, 153),  // #34d399
                Color::Rgb(167, 139, 250), // #a78bfa
                Color::Rgb(251, 146, 60),  // #fb923c
                Color::Rgb(244, 114, 182), // #f472b6
            ],
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_bases_resolve_to_themselves() {
        assert_eq!(
            ResolvedBase::of(BaseTheme::Light, false),
            ResolvedBase::Light
        );
        assert_eq!(
            ResolvedBase::of(BaseTheme::DarkPro, true),
            ResolvedBase::DarkPro
        );
        assert_eq!(
            ResolvedBase::of(BaseTheme::Midnight, true),
            ResolvedBase::Midnight
        );
    }

    #[test]
    fn system_follows_terminal_background() {
        assert_eq!(ResolvedBase::of(BaseTheme::System, true), ResolvedBase::Light);
        assert_eq!(
            ResolvedBase::of(BaseTheme::System, false),
            ResolvedBase::DarkPro
        );
    }

    #[test]
    fn accent_drives_primary_color() {
        let ocean = Theme::resolved(ResolvedBase::DarkPro, AccentColor::Ocean);
        assert_eq!(ocean.primary, Color::Rgb(6, 182, 212));

        let indigo = Theme::resolved(ResolvedBase::DarkPro, AccentColor::Indigo);
        assert_eq!(indigo.primary, Color::Rgb(99, 102, 241));
        assert_eq!(indigo.chart_series[0], Color::Rgb(59, 130, 246));
    }

    #[test]
    fn bases_differ_only_in_surface_colors() {
        let dark = Theme::resolved(ResolvedBase::DarkPro, AccentColor::Rose);
        let midnight = Theme::resolved(ResolvedBase::Midnight, AccentColor::Rose);
        assert_eq!(dark.primary, midnight.primary);
        assert_ne!(dark.bg, midnight.bg);

        let light = Theme::resolved(ResolvedBase::Light, AccentColor::Rose);
        assert_ne!(light.text, dark.text);
    }

    #[test]
    fn semantic_styles_use_the_accent() {
        let theme = Theme::resolved(ResolvedBase::Midnight, AccentColor::Forest);
        assert_eq!(theme.title_style().fg, Some(theme.primary));
        assert_eq!(theme.tab_active().fg, Some(theme.primary));
        assert_eq!(theme.border_default().fg, Some(theme.border));
    }
}
