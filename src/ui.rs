//! Screen text and interactive buttons
//!
//! Text is rendered as DOM overlays; this module owns what they say and how
//! buttons react to the pointer.

use glam::Vec2;

use crate::scene::RunSummary;
use crate::sim::collision::Aabb;

/// Title shown on the start screen
pub const TITLE: &str = "SANA";
pub const GAME_OVER: &str = "Game Over";
pub const PLAY_AGAIN: &str = "Play Again";
pub const EXIT: &str = "Exit";

/// Scale applied to a hovered button
pub const HOVER_SCALE: f32 = 1.1;

pub fn hud_time(score: u64) -> String {
    format!("Time: {}", score)
}

pub fn hud_high_score(best: u64) -> String {
    format!("High Score: {}", best)
}

pub fn time_survived(summary: &RunSummary) -> String {
    format!("Time Survived: {} seconds", summary.final_time)
}

pub fn summary_high_score(summary: &RunSummary) -> String {
    format!("High Score: {} seconds", summary.high_score)
}

/// Extra line for a leaderboard placement
pub fn rank_line(summary: &RunSummary) -> Option<String> {
    match (summary.new_best, summary.rank) {
        (true, _) => Some("New high score!".to_string()),
        (false, Some(rank)) => Some(format!("#{} on the leaderboard", rank)),
        (false, None) => None,
    }
}

/// A clickable button with hover feedback
#[derive(Debug, Clone)]
pub struct Button {
    pub center: Vec2,
    pub size: Vec2,
    pub hovered: bool,
}

impl Button {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            hovered: false,
        }
    }

    pub fn scale(&self) -> f32 {
        if self.hovered { HOVER_SCALE } else { 1.0 }
    }

    /// Current on-screen rectangle (grows while hovered)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center, self.size * 0.5 * self.scale())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().contains_point(point)
    }

    /// Pointer left the button
    pub fn pointer_out(&mut self) {
        self.hovered = false;
    }

    /// Update hover from a pointer position; true if hover changed
    pub fn track_pointer(&mut self, point: Vec2) -> bool {
        let inside = self.contains(point);
        let changed = inside != self.hovered;
        self.hovered = inside;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(new_best: bool, rank: Option<usize>) -> RunSummary {
        RunSummary {
            final_time: 42,
            high_score: 57,
            new_best,
            rank,
        }
    }

    #[test]
    fn test_text() {
        assert_eq!(hud_time(12), "Time: 12");
        assert_eq!(hud_high_score(0), "High Score: 0");
        let s = summary(false, None);
        assert_eq!(time_survived(&s), "Time Survived: 42 seconds");
        assert_eq!(summary_high_score(&s), "High Score: 57 seconds");
    }

    #[test]
    fn test_rank_line() {
        assert_eq!(rank_line(&summary(true, Some(1))).as_deref(), Some("New high score!"));
        assert_eq!(
            rank_line(&summary(false, Some(4))).as_deref(),
            Some("#4 on the leaderboard")
        );
        assert!(rank_line(&summary(false, None)).is_none());
    }

    #[test]
    fn test_button_hover_scale() {
        let mut button = Button::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 40.0));
        assert_eq!(button.scale(), 1.0);
        assert!(button.track_pointer(Vec2::new(100.0, 100.0)));
        assert_eq!(button.scale(), HOVER_SCALE);
        button.pointer_out();
        assert_eq!(button.scale(), 1.0);
    }

    #[test]
    fn test_hovered_button_grows() {
        let mut button = Button::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 40.0));
        // Just outside the resting rectangle
        let edge = Vec2::new(152.0, 100.0);
        assert!(!button.contains(edge));
        button.track_pointer(Vec2::new(100.0, 100.0));
        assert!(button.contains(edge));
        // Hover holds while the pointer stays inside the grown rectangle
        assert!(!button.track_pointer(edge));
        assert!(button.hovered);
    }

    #[test]
    fn test_track_pointer() {
        let mut button = Button::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(button.track_pointer(Vec2::new(1.0, 1.0)));
        assert!(!button.track_pointer(Vec2::new(2.0, 2.0)));
        assert!(button.track_pointer(Vec2::new(50.0, 0.0)));
        assert!(!button.hovered);
    }
}
