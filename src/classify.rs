/*
 * Pure classification core: maps a descendant window's class name to the
 * styling strategy applied to it. Keeping the table as plain data (closed
 * enums, one lookup) means the whole dispatch is testable without a single
 * HWND; the Win32 driver in `apply` only executes what this module decides.
 *
 * Also houses the display-style math used by the manual static-control
 * painter (DT flag derivation, icon centering), for the same reason.
 */

// Static-control style bits (WinUser SS_*). Only the ones the manual painter
// inspects are mirrored here so the math stays portable.
pub const SS_CENTER: u32 = 0x0000_0001;
pub const SS_RIGHT: u32 = 0x0000_0002;
pub const SS_ICON: u32 = 0x0000_0003;
pub const SS_LEFTNOWORDWRAP: u32 = 0x0000_000C;
pub const SS_OWNERDRAW: u32 = 0x0000_000D;
pub const SS_BITMAP: u32 = 0x0000_000E;
pub const SS_ENHMETAFILE: u32 = 0x0000_000F;
pub const SS_ETCHEDHORZ: u32 = 0x0000_0010;
pub const SS_ETCHEDVERT: u32 = 0x0000_0011;
pub const SS_ETCHEDFRAME: u32 = 0x0000_0012;
pub const SS_TYPEMASK: u32 = 0x0000_001F;
pub const SS_NOPREFIX: u32 = 0x0000_0080;
pub const SS_CENTERIMAGE: u32 = 0x0000_0200;

// DrawText layout flags (WinUser DT_*).
pub const DT_LEFT: u32 = 0x0000_0000;
pub const DT_CENTER: u32 = 0x0000_0001;
pub const DT_RIGHT: u32 = 0x0000_0002;
pub const DT_WORDBREAK: u32 = 0x0000_0010;
pub const DT_NOPREFIX: u32 = 0x0000_0800;

/// Recognized control families, parsed from the exact, case-sensitive Win32
/// class name. Everything else is `Unrecognized` and only recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlClass {
    TabStrip,
    ListView,
    TreeView,
    StaticLabel,
    CompositedContainer,
    BasicInput,
    DialogPage,
    Unrecognized,
}

impl ControlClass {
    pub fn from_class_name(name: &str) -> Self {
        match name {
            "SysTabControl32" => ControlClass::TabStrip,
            "SysListView32" => ControlClass::ListView,
            "SysTreeView32" => ControlClass::TreeView,
            "Static" => ControlClass::StaticLabel,
            "DirectUIHWND" => ControlClass::CompositedContainer,
            "ComboBoxEx32" | "ComboBox" | "Edit" | "ListBox" | "Button" => {
                ControlClass::BasicInput
            }
            "#32770" => ControlClass::DialogPage,
            _ => ControlClass::Unrecognized,
        }
    }
}

/// Theme string handed to `SetWindowTheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    /// "Explorer"
    Explorer,
    /// "DarkMode_Explorer"
    DarkExplorer,
    /// "", removing the native theme entirely so classic GDI color
    /// notifications take effect.
    Strip,
}

/// Which subclass procedure a strategy attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptorKind {
    /// Background fill + WM_CTLCOLOR* palette, for dialog roots and pages.
    DialogColors,
    /// Background fill only, for tab strips.
    TabFill,
    /// Color push before paint + theme re-strip, for list views.
    ListView,
    /// Full manual painting, for static labels.
    ManualPaint,
}

/// One marker per independent strategy. Markers live in the process-scoped
/// registry (`tables::WindowRegistry`) keyed by window identity, so repeat
/// classification passes never re-attach a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    TopLevel,
    TabStrip,
    ListView,
    StaticPaint,
    DialogPage,
}

/// The complete styling decision for one window. Produced by a single table
/// lookup; holds no handles and no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub theme: Option<ThemeChoice>,
    /// Enable the undocumented per-window dark-mode allowance when present.
    pub allow_dark: bool,
    pub interceptor: Option<InterceptorKind>,
    pub marker: Option<MarkerKind>,
    /// Push background/text colors through the control's own message API
    /// (tree views honor these directly, no interceptor needed).
    pub push_native_colors: bool,
    pub request_repaint: bool,
}

impl Strategy {
    const NONE: Strategy = Strategy {
        theme: None,
        allow_dark: false,
        interceptor: None,
        marker: None,
        push_native_colors: false,
        request_repaint: false,
    };

    /// True for classes outside the fixed table: no styling, recursion only.
    pub fn is_noop(&self) -> bool {
        *self == Strategy::NONE
    }
}

/*
 * The strategy table. `quick_command_parent` is only meaningful for static
 * labels: inside the shell's quick-command dialog the standard
 * WM_CTLCOLORSTATIC path already renders correctly once the theme is
 * stripped, and manual painting there produces double-paint artifacts.
 */
pub fn strategy_for(class: ControlClass, quick_command_parent: bool) -> Strategy {
    match class {
        ControlClass::TabStrip => Strategy {
            theme: Some(ThemeChoice::Explorer),
            interceptor: Some(InterceptorKind::TabFill),
            marker: Some(MarkerKind::TabStrip),
            ..Strategy::NONE
        },
        ControlClass::ListView => Strategy {
            theme: Some(ThemeChoice::Strip),
            interceptor: Some(InterceptorKind::ListView),
            marker: Some(MarkerKind::ListView),
            ..Strategy::NONE
        },
        ControlClass::TreeView => Strategy {
            theme: Some(ThemeChoice::DarkExplorer),
            push_native_colors: true,
            request_repaint: true,
            ..Strategy::NONE
        },
        ControlClass::StaticLabel if quick_command_parent => Strategy {
            theme: Some(ThemeChoice::Strip),
            request_repaint: true,
            ..Strategy::NONE
        },
        ControlClass::StaticLabel => Strategy {
            theme: Some(ThemeChoice::Strip),
            interceptor: Some(InterceptorKind::ManualPaint),
            marker: Some(MarkerKind::StaticPaint),
            request_repaint: true,
            ..Strategy::NONE
        },
        // Composited controls own their entire paint pipeline; subclassing
        // them corrupts internal drawing (progress graphs and the like).
        ControlClass::CompositedContainer => Strategy {
            theme: Some(ThemeChoice::DarkExplorer),
            allow_dark: true,
            ..Strategy::NONE
        },
        ControlClass::BasicInput => Strategy {
            theme: Some(ThemeChoice::DarkExplorer),
            request_repaint: true,
            ..Strategy::NONE
        },
        ControlClass::DialogPage => Strategy {
            interceptor: Some(InterceptorKind::DialogColors),
            marker: Some(MarkerKind::DialogPage),
            ..Strategy::NONE
        },
        ControlClass::Unrecognized => Strategy::NONE,
    }
}

/// Best-effort detection of the shell's quick-command ("Run") dialog by its
/// caption. Locale- and version-fragile by nature; a miss only means a label
/// gets the manual painter it would get in any other dialog.
pub fn is_quick_command_caption(caption: &str) -> bool {
    caption.contains("Run")
}

/// How the manual painter should treat a static control, from its style word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPaintPlan {
    Icon { centered: bool },
    /// Owner-drawn, bitmap, metafile and etched-frame statics are left to the
    /// original handler; repainting them blind is not safe.
    PassThrough,
    Text,
}

pub fn static_paint_plan(style: u32) -> StaticPaintPlan {
    match style & SS_TYPEMASK {
        SS_ICON => StaticPaintPlan::Icon {
            centered: style & SS_CENTERIMAGE != 0,
        },
        SS_OWNERDRAW | SS_BITMAP | SS_ENHMETAFILE | SS_ETCHEDHORZ | SS_ETCHEDVERT
        | SS_ETCHEDFRAME => StaticPaintPlan::PassThrough,
        _ => StaticPaintPlan::Text,
    }
}

/*
 * DT flag set for text statics. Alignment bits win over the default left
 * layout (center checked before right, as the classic dialog code does);
 * anything without SS_LEFTNOWORDWRAP wraps, and SS_NOPREFIX passes through.
 */
pub fn text_format_flags(style: u32) -> u32 {
    let mut format = if style & SS_CENTER != 0 {
        DT_CENTER | DT_WORDBREAK
    } else if style & SS_RIGHT != 0 {
        DT_RIGHT | DT_WORDBREAK
    } else {
        DT_LEFT
    };
    if style & SS_LEFTNOWORDWRAP == 0 {
        format |= DT_WORDBREAK;
    }
    if style & SS_NOPREFIX != 0 {
        format |= DT_NOPREFIX;
    }
    format
}

/// Top-left corner for an icon inside a static control's client area.
pub fn icon_origin(client: (i32, i32), icon: (i32, i32), centered: bool) -> (i32, i32) {
    if centered {
        ((client.0 - icon.0) / 2, (client.1 - icon.1) / 2)
    } else {
        (0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_parse_exactly() {
        assert_eq!(
            ControlClass::from_class_name("SysTabControl32"),
            ControlClass::TabStrip
        );
        assert_eq!(
            ControlClass::from_class_name("SysListView32"),
            ControlClass::ListView
        );
        assert_eq!(
            ControlClass::from_class_name("SysTreeView32"),
            ControlClass::TreeView
        );
        assert_eq!(
            ControlClass::from_class_name("Static"),
            ControlClass::StaticLabel
        );
        assert_eq!(
            ControlClass::from_class_name("DirectUIHWND"),
            ControlClass::CompositedContainer
        );
        for name in ["ComboBoxEx32", "ComboBox", "Edit", "ListBox", "Button"] {
            assert_eq!(ControlClass::from_class_name(name), ControlClass::BasicInput);
        }
        assert_eq!(
            ControlClass::from_class_name("#32770"),
            ControlClass::DialogPage
        );
        // Case-sensitive, exact matches only.
        assert_eq!(
            ControlClass::from_class_name("static"),
            ControlClass::Unrecognized
        );
        assert_eq!(
            ControlClass::from_class_name("SysListView32 "),
            ControlClass::Unrecognized
        );
    }

    #[test]
    fn strategy_table_matches_the_fixed_classification() {
        let tab = strategy_for(ControlClass::TabStrip, false);
        assert_eq!(tab.theme, Some(ThemeChoice::Explorer));
        assert_eq!(tab.interceptor, Some(InterceptorKind::TabFill));
        assert_eq!(tab.marker, Some(MarkerKind::TabStrip));

        let list = strategy_for(ControlClass::ListView, false);
        assert_eq!(list.theme, Some(ThemeChoice::Strip));
        assert_eq!(list.interceptor, Some(InterceptorKind::ListView));
        assert_eq!(list.marker, Some(MarkerKind::ListView));

        let tree = strategy_for(ControlClass::TreeView, false);
        assert_eq!(tree.theme, Some(ThemeChoice::DarkExplorer));
        assert!(tree.push_native_colors);
        assert!(tree.interceptor.is_none());
        assert!(tree.marker.is_none());

        let composited = strategy_for(ControlClass::CompositedContainer, false);
        assert_eq!(composited.theme, Some(ThemeChoice::DarkExplorer));
        assert!(composited.allow_dark);
        assert!(composited.interceptor.is_none());

        let input = strategy_for(ControlClass::BasicInput, false);
        assert_eq!(input.theme, Some(ThemeChoice::DarkExplorer));
        assert!(input.request_repaint);
        assert!(input.interceptor.is_none());

        let page = strategy_for(ControlClass::DialogPage, false);
        assert_eq!(page.theme, None);
        assert_eq!(page.interceptor, Some(InterceptorKind::DialogColors));
        assert_eq!(page.marker, Some(MarkerKind::DialogPage));
    }

    #[test]
    fn static_labels_skip_manual_painting_in_quick_command_dialogs() {
        let plain = strategy_for(ControlClass::StaticLabel, false);
        assert_eq!(plain.theme, Some(ThemeChoice::Strip));
        assert_eq!(plain.interceptor, Some(InterceptorKind::ManualPaint));
        assert_eq!(plain.marker, Some(MarkerKind::StaticPaint));

        let quick = strategy_for(ControlClass::StaticLabel, true);
        assert_eq!(quick.theme, Some(ThemeChoice::Strip));
        assert!(quick.interceptor.is_none());
        assert!(quick.marker.is_none());
        assert!(quick.request_repaint);
    }

    #[test]
    fn unrecognized_classes_get_no_styling_at_all() {
        let strategy = strategy_for(ControlClass::from_class_name("RichEdit50W"), false);
        assert_eq!(strategy, Strategy::NONE);
    }

    #[test]
    fn quick_command_caption_is_a_substring_match() {
        assert!(is_quick_command_caption("Run"));
        assert!(is_quick_command_caption("Run as administrator"));
        assert!(!is_quick_command_caption("Properties"));
        // Locale-sensitive on purpose: a translated caption is a miss.
        assert!(!is_quick_command_caption("Ausführen"));
    }

    #[test]
    fn static_paint_plan_branches_on_the_style_type_field() {
        assert_eq!(
            static_paint_plan(SS_ICON),
            StaticPaintPlan::Icon { centered: false }
        );
        assert_eq!(
            static_paint_plan(SS_ICON | SS_CENTERIMAGE),
            StaticPaintPlan::Icon { centered: true }
        );
        for excluded in [
            SS_OWNERDRAW,
            SS_BITMAP,
            SS_ENHMETAFILE,
            SS_ETCHEDHORZ,
            SS_ETCHEDVERT,
            SS_ETCHEDFRAME,
        ] {
            assert_eq!(static_paint_plan(excluded), StaticPaintPlan::PassThrough);
        }
        assert_eq!(static_paint_plan(0), StaticPaintPlan::Text);
        assert_eq!(static_paint_plan(SS_CENTER), StaticPaintPlan::Text);
    }

    /*
     * All 16 combinations of center/right/no-wrap/no-prefix. The expected
     * values spell out the documented mapping: alignment first (center wins
     * over right), word-break unless no-wrap, no-prefix passed through.
     */
    #[test]
    fn text_format_flags_cover_all_sixteen_style_combinations() {
        let cases: [(u32, u32); 16] = [
            (0, DT_LEFT | DT_WORDBREAK),
            (SS_CENTER, DT_CENTER | DT_WORDBREAK),
            (SS_RIGHT, DT_RIGHT | DT_WORDBREAK),
            (SS_CENTER | SS_RIGHT, DT_CENTER | DT_WORDBREAK),
            (SS_LEFTNOWORDWRAP, DT_LEFT),
            (SS_CENTER | SS_LEFTNOWORDWRAP, DT_CENTER | DT_WORDBREAK),
            (SS_RIGHT | SS_LEFTNOWORDWRAP, DT_RIGHT | DT_WORDBREAK),
            (
                SS_CENTER | SS_RIGHT | SS_LEFTNOWORDWRAP,
                DT_CENTER | DT_WORDBREAK,
            ),
            (SS_NOPREFIX, DT_LEFT | DT_WORDBREAK | DT_NOPREFIX),
            (SS_CENTER | SS_NOPREFIX, DT_CENTER | DT_WORDBREAK | DT_NOPREFIX),
            (SS_RIGHT | SS_NOPREFIX, DT_RIGHT | DT_WORDBREAK | DT_NOPREFIX),
            (
                SS_CENTER | SS_RIGHT | SS_NOPREFIX,
                DT_CENTER | DT_WORDBREAK | DT_NOPREFIX,
            ),
            (SS_LEFTNOWORDWRAP | SS_NOPREFIX, DT_LEFT | DT_NOPREFIX),
            (
                SS_CENTER | SS_LEFTNOWORDWRAP | SS_NOPREFIX,
                DT_CENTER | DT_WORDBREAK | DT_NOPREFIX,
            ),
            (
                SS_RIGHT | SS_LEFTNOWORDWRAP | SS_NOPREFIX,
                DT_RIGHT | DT_WORDBREAK | DT_NOPREFIX,
            ),
            (
                SS_CENTER | SS_RIGHT | SS_LEFTNOWORDWRAP | SS_NOPREFIX,
                DT_CENTER | DT_WORDBREAK | DT_NOPREFIX,
            ),
        ];
        for (style, expected) in cases {
            assert_eq!(
                text_format_flags(style),
                expected,
                "style bits {style:#06x}"
            );
        }
    }

    #[test]
    fn icon_origin_centers_within_the_client_rect() {
        assert_eq!(icon_origin((100, 80), (32, 32), true), (34, 24));
        assert_eq!(icon_origin((100, 80), (32, 32), false), (0, 0));
        // Icons larger than the client rect center to negative origins,
        // clipping evenly on both sides.
        assert_eq!(icon_origin((20, 20), (32, 32), true), (-6, -6));
    }
}
