//! Pre-tiled dash pattern for the dashed underline.

/// Dimensions of one dash period, in measurer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashStyle {
    /// Thickness of the rule.
    pub height: u32,
    /// Length of one dash.
    pub width: u32,
    /// Gap after each dash.
    pub interval: u32,
}

impl Default for DashStyle {
    fn default() -> Self {
        Self {
            height: 1,
            width: 5,
            interval: 2,
        }
    }
}

/// Ink mask of a dashed rule spanning a whole row.
///
/// Built once per layout pass when the underline mode is dashed and reused for
/// every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashPattern {
    style: DashStyle,
    width: u32,
    mask: Vec<bool>,
}

impl DashPattern {
    /// Tile `style` across `width` units.
    pub fn tile(style: DashStyle, width: u32) -> Self {
        let height = style.height as usize;
        let mut mask = vec![false; width as usize * height];
        let mut x = 0u32;
        while x < width {
            let end = x.saturating_add(style.width).min(width);
            for dx in x..end {
                for y in 0..height {
                    mask[y * width as usize + dx as usize] = true;
                }
            }
            let period = style.width.saturating_add(style.interval);
            if period == 0 {
                break;
            }
            x = x.saturating_add(period);
        }
        Self { style, width, mask }
    }

    /// Overall width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Thickness.
    pub fn height(&self) -> u32 {
        self.style.height
    }

    /// Style the pattern was tiled from.
    pub fn style(&self) -> DashStyle {
        self.style
    }

    /// Whether column `x` carries ink.
    pub fn is_ink(&self, x: u32) -> bool {
        x < self.width && self.mask.get(x as usize).copied().unwrap_or(false)
    }

    /// Row-major ink mask, `width * height` entries.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_one_by_five_with_gap_two() {
        let s = DashStyle::default();
        assert_eq!((s.height, s.width, s.interval), (1, 5, 2));
    }

    #[test]
    fn tiles_dashes_and_gaps() {
        let p = DashPattern::tile(DashStyle::default(), 16);
        let ink: String = (0..16).map(|x| if p.is_ink(x) { '-' } else { ' ' }).collect();
        assert_eq!(ink, "-----  -----  --");
    }

    #[test]
    fn mask_covers_every_pixel_row() {
        let style = DashStyle {
            height: 2,
            width: 1,
            interval: 1,
        };
        let p = DashPattern::tile(style, 4);
        assert_eq!(p.mask(), &[true, false, true, false, true, false, true, false]);
        assert_eq!(p.height(), 2);
    }

    #[test]
    fn out_of_range_column_is_blank() {
        let p = DashPattern::tile(DashStyle::default(), 3);
        assert!(p.is_ink(2));
        assert!(!p.is_ink(3));
    }

    #[test]
    fn zero_period_does_not_loop_forever() {
        let style = DashStyle {
            height: 1,
            width: 0,
            interval: 0,
        };
        let p = DashPattern::tile(style, 10);
        assert!(p.mask().iter().all(|ink| !ink));
    }
}
