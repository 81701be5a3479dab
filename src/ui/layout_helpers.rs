use ratatui::layout::Rect;

/// Center a rect of `width x height` within `area`, shrinking it to fit
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect() {
        assert_eq!(center_rect(Rect::new(0, 0, 80, 24), 60, 20), Rect::new(10, 2, 60, 20));
        assert_eq!(center_rect(Rect::new(5, 5, 10, 4), 60, 20), Rect::new(5, 5, 10, 4));
    }
}
