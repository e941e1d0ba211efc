//! The fixed-size row of obstacles scrolling across the playfield

use serde::{Deserialize, Serialize};

use super::obstacle::{GapSource, Obstacle};
use super::rect::Rect;
use crate::config::Tuning;

/// Obstacles in spawn order. The length never changes; offscreen obstacles
/// are regenerated in their own slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Where recycled obstacles reappear
    respawn_x: i32,
    scroll_speed: i32,
}

impl ObstacleField {
    /// Lay out a fresh row starting at the right edge, one pitch apart
    pub fn new<G: GapSource + ?Sized>(tuning: &Tuning, source: &mut G) -> Self {
        let pitch = tuning.obstacle_pitch();
        let mut x = tuning.playfield_width();
        let mut obstacles = Vec::with_capacity(tuning.obstacle_count());
        for _ in 0..tuning.obstacle_count() {
            obstacles.push(Obstacle::new(x, tuning, source));
            x = x.saturating_add(pitch);
        }
        Self::from_obstacles(obstacles, tuning)
    }

    /// Build a field from a known layout
    pub fn from_obstacles(obstacles: Vec<Obstacle>, tuning: &Tuning) -> Self {
        Self {
            obstacles,
            respawn_x: tuning.playfield_width(),
            scroll_speed: tuning.scroll_speed(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Scroll every obstacle one tick and recycle the ones that left the
    /// screen. Returns how many were recycled.
    pub fn advance<G: GapSource + ?Sized>(&mut self, source: &mut G) -> u32 {
        let mut recycled = 0;
        for (slot, obstacle) in self.obstacles.iter_mut().enumerate() {
            obstacle.advance(self.scroll_speed);
            if obstacle.is_offscreen() {
                obstacle.regenerate(self.respawn_x, source);
                log::debug!(
                    "Recycled obstacle {} (gap top {})",
                    slot,
                    obstacle.gap_top()
                );
                recycled += 1;
            }
        }
        recycled
    }

    /// True if `rect` overlaps any solid pipe
    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.collides_with(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::obstacle::ScriptedGaps;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_layout() {
        let tuning = Tuning::default();
        let mut source = ScriptedGaps::new([10, 20, 30, 40, 50]);
        let field = ObstacleField::new(&tuning, &mut source);

        assert_eq!(field.len(), 5);
        let xs: Vec<i32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![800, 1100, 1400, 1700, 2000]);
        let gaps: Vec<i32> = field.obstacles().iter().map(|o| o.gap_top()).collect();
        assert_eq!(gaps, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_initial_obstacles_do_not_overlap() {
        let tuning = Tuning::default();
        let field = ObstacleField::new(&tuning, &mut Pcg32::seed_from_u64(1));
        for pair in field.obstacles().windows(2) {
            assert!(pair[0].x + pair[0].width() <= pair[1].x);
        }
    }

    #[test]
    fn test_advance_scrolls_everything() {
        let tuning = Tuning::default();
        let mut source = ScriptedGaps::new([100]);
        let mut field = ObstacleField::new(&tuning, &mut source);
        assert_eq!(field.advance(&mut source), 0);
        let xs: Vec<i32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![795, 1095, 1395, 1695, 1995]);
    }

    #[test]
    fn test_first_recycle_after_exact_tick_count() {
        // Leaves when x + 100 < 0, i.e. x = -105: (800 + 105) / 5 = 181 ticks
        let tuning = Tuning::default();
        let mut source = ScriptedGaps::new([100, 100, 100, 100, 100, 42]);
        let mut field = ObstacleField::new(&tuning, &mut source);

        for tick in 1..181 {
            assert_eq!(field.advance(&mut source), 0, "early recycle at tick {tick}");
        }
        assert_eq!(field.obstacles()[0].x, -100);

        assert_eq!(field.advance(&mut source), 1);
        let first = &field.obstacles()[0];
        assert_eq!(first.x, 800);
        assert_eq!(first.gap_top(), 42);
        assert_eq!(field.len(), 5);
    }

    #[test]
    fn test_recycle_keeps_slot_order() {
        let tuning = Tuning::default();
        let obstacles = vec![
            Obstacle::with_gap_top(-104, 10, &tuning),
            Obstacle::with_gap_top(400, 20, &tuning),
        ];
        let mut field = ObstacleField::from_obstacles(obstacles, &tuning);
        let mut source = ScriptedGaps::new([77]);

        assert_eq!(field.advance(&mut source), 1);
        assert_eq!(field.obstacles()[0].x, 800);
        assert_eq!(field.obstacles()[0].gap_top(), 77);
        assert_eq!(field.obstacles()[1].x, 395);
        assert_eq!(field.obstacles()[1].gap_top(), 20);
    }

    #[test]
    fn test_simultaneous_recycles_are_all_counted() {
        let tuning = Tuning::default();
        let obstacles = vec![
            Obstacle::with_gap_top(-101, 10, &tuning),
            Obstacle::with_gap_top(-103, 20, &tuning),
            Obstacle::with_gap_top(300, 30, &tuning),
        ];
        let mut field = ObstacleField::from_obstacles(obstacles, &tuning);
        assert_eq!(field.advance(&mut ScriptedGaps::new([5])), 2);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_collides_with_any_obstacle() {
        let tuning = Tuning::default();
        let obstacles = vec![
            Obstacle::with_gap_top(200, 100, &tuning),
            Obstacle::with_gap_top(500, 300, &tuning),
        ];
        let field = ObstacleField::from_obstacles(obstacles, &tuning);

        // In the first gap
        assert!(!field.collides_with(&Rect::new(210, 150, 30, 30)));
        // In the second obstacle's top pipe
        assert!(field.collides_with(&Rect::new(510, 150, 30, 30)));
        // Between the two columns
        assert!(!field.collides_with(&Rect::new(350, 10, 30, 30)));
    }

    #[test]
    fn test_custom_count() {
        let config = Config {
            obstacle_count: 2,
            obstacle_spacing: 0,
            ..Default::default()
        };
        let tuning = config.validate().unwrap();
        let field = ObstacleField::new(&tuning, &mut ScriptedGaps::new([0]));
        let xs: Vec<i32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![800, 900]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn length_is_invariant_and_recycles_land_at_right_edge(
                seed in any::<u64>(),
                ticks in 1..2000usize,
            ) {
                let tuning = Tuning::default();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut field = ObstacleField::new(&tuning, &mut rng);
                let range = tuning.gap_top_range();

                for _ in 0..ticks {
                    let before: Vec<i32> = field.obstacles().iter().map(|o| o.x).collect();
                    let recycled = field.advance(&mut rng);
                    prop_assert_eq!(field.len(), 5);

                    let mut moved_to_edge = 0;
                    for (old_x, obstacle) in before.iter().zip(field.obstacles()) {
                        if obstacle.x == old_x - 5 {
                            continue;
                        }
                        prop_assert_eq!(obstacle.x, tuning.playfield_width());
                        prop_assert!(old_x - 5 + obstacle.width() < 0);
                        moved_to_edge += 1;
                    }
                    prop_assert_eq!(recycled, moved_to_edge);
                    prop_assert!(recycled <= 1);
                    for obstacle in field.obstacles() {
                        prop_assert!(range.contains(&obstacle.gap_top()));
                    }
                }
            }
        }
    }
}
