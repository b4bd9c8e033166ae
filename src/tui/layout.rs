//! Layout definitions for the TUI
//!
//! The dashboard stacks a KPI header, the record table and a status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the dashboard
pub struct DashboardLayout {
    /// Production KPIs
    pub header: Rect,
    /// Record table
    pub table: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // KPI header
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            table: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Split the KPI header into `n` equal cards
pub fn kpi_cards(area: Rect, n: u32) -> Vec<Rect> {
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Area for a toast in the top-right corner
pub fn toast_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_layout_fills_area() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header.height, 5);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.table.height, 34);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(80, 30, area);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_toast_in_top_right() {
        let rect = toast_rect(30, 4, Rect::new(0, 0, 100, 40));
        assert_eq!(rect, Rect::new(70, 0, 30, 4));
    }

    #[test]
    fn test_kpi_cards() {
        let cards = kpi_cards(Rect::new(0, 0, 100, 5), 4);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].width, 25);
    }
}
