use std::collections::{HashMap, VecDeque};

use crate::engine::{manhattan, GameEngine, PlayerAgent, PursuerAgent};
use crate::pickups::Pickups;
use crate::rng::Rng;
use crate::types::{Direction, Mover, PickupKind, Position, PursuerState};
use crate::world::Grid;

const SAFE_DISTANCE_CAP: i32 = 8;
const HUNT_RADIUS: i32 = 6;

#[derive(Clone, Debug)]
pub struct Autopilot {
    rng: Rng,
}

impl Autopilot {
    pub fn new(seed: u32) -> Self {
        Self { rng: Rng::new(seed) }
    }

    pub fn choose(&mut self, engine: &GameEngine) -> Direction {
        self.pick(
            engine.grid(),
            engine.pickups(),
            engine.player(),
            engine.pursuers(),
        )
    }

    fn pick(
        &mut self,
        grid: &Grid,
        pickups: &Pickups,
        player: &PlayerAgent,
        pursuers: &[PursuerAgent],
    ) -> Direction {
        let pos = player.position;
        let pickup_steps = pickup_distances(grid, pickups);
        let mut best: Option<(f32, Direction)> = None;

        for dir in Direction::ALL {
            let next = pos.moved(dir);
            if !grid.is_valid_move(next, Mover::Player) {
                continue;
            }
            let danger = nearest_pursuer(next, pursuers, is_dangerous).unwrap_or(99);
            if danger <= 1 {
                continue;
            }

            let mut score = 0.0;
            if pickups.kind_at(next) != PickupKind::None {
                score += 14.0;
            }
            if let Some(steps) = pickup_steps.get(&next) {
                score -= *steps as f32;
            }
            score += danger.min(SAFE_DISTANCE_CAP) as f32 * 0.65;
            if danger <= 2 {
                score -= 7.0;
            }
            if let Some(prey) = nearest_pursuer(next, pursuers, is_prey) {
                if prey < HUNT_RADIUS {
                    score += (HUNT_RADIUS - prey) as f32 * 2.0;
                }
            }
            if dir == player.facing.opposite() {
                score -= 0.5;
            }
            score += self.rng.next_f32() * 0.25;

            if best.map(|(best_score, _)| score > best_score).unwrap_or(true) {
                best = Some((score, dir));
            }
        }

        match best {
            Some((_, dir)) => dir,
            None => self.escape(grid, pos, pursuers),
        }
    }

    fn escape(&mut self, grid: &Grid, pos: Position, pursuers: &[PursuerAgent]) -> Direction {
        let mut best: Option<(i32, Direction)> = None;
        for dir in Direction::ALL {
            let next = pos.moved(dir);
            if !grid.is_valid_move(next, Mover::Player) {
                continue;
            }
            let dist = nearest_pursuer(next, pursuers, is_dangerous).unwrap_or(99);
            if best.map(|(best_dist, _)| dist > best_dist).unwrap_or(true) {
                best = Some((dist, dir));
            }
        }
        match best {
            Some((_, dir)) => dir,
            None => Direction::ALL[self.rng.below(4) as usize],
        }
    }
}

fn is_dangerous(pursuer: &PursuerAgent) -> bool {
    matches!(pursuer.state, PursuerState::Chase | PursuerState::Scatter)
}

fn is_prey(pursuer: &PursuerAgent) -> bool {
    pursuer.state == PursuerState::Vulnerable
}

fn nearest_pursuer(
    pos: Position,
    pursuers: &[PursuerAgent],
    filter: fn(&PursuerAgent) -> bool,
) -> Option<i32> {
    pursuers
        .iter()
        .filter(|pursuer| filter(pursuer))
        .map(|pursuer| manhattan(pos, pursuer.position))
        .min()
}

fn pickup_distances(grid: &Grid, pickups: &Pickups) -> HashMap<Position, i32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    for pos in pickups.regular().iter().chain(pickups.power().iter()) {
        dist.insert(*pos, 0);
        queue.push_back((*pos, 0));
    }
    while let Some((pos, steps)) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = pos.moved(dir);
            if dist.contains_key(&next) || !grid.is_valid_move(next, Mover::Player) {
                continue;
            }
            dist.insert(next, steps + 1);
            queue.push_back((next, steps + 1));
        }
    }
    dist
}
