pub mod browse_view;
pub mod lookup_view;
pub mod search_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use browse_view::{BrowseView, BrowseViewProps};
pub use lookup_view::{LookupView, LookupViewProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};

/// Spinner suffix for loading lines, driven by the tick counter
pub(crate) fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}
