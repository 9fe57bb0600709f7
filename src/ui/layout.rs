use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub nav_bar: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: nav | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Screen tabs
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        nav_bar: main_chunks[0],
        content: main_chunks[1],
        status_bar: main_chunks[2],
    }
}

pub struct CameraLayout {
    pub main: Rect,
    pub camera: Rect,
    pub gesture: Rect,
}

/// Camera screens: feature on the left, camera and gesture panels on the right.
pub fn camera_layout(area: Rect) -> CameraLayout {
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Min(30),    // Feature
            Constraint::Length(34), // Side panel
        ])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Camera
            Constraint::Length(5), // Gesture
        ])
        .split(h_chunks[1]);

    CameraLayout {
        main: h_chunks[0],
        camera: side[0],
        gesture: side[1],
    }
}

/// A `width` x `height` box centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered(area, 60, 20);
        assert!(popup.width <= 38 && popup.height <= 8);
        assert_eq!(centered(Rect::new(0, 0, 100, 40), 50, 10), Rect::new(25, 15, 50, 10));
    }
}
