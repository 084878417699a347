use super::*;

pub fn chase_target(
    kind: PursuerKind,
    own: Position,
    home: Position,
    player: &PlayerAgent,
    config: &EngineConfig,
) -> Position {
    match kind {
        PursuerKind::Direct => player.position,
        // Look-ahead ignores walls and bounds; only the direction bias matters.
        PursuerKind::Ambusher => player
            .position
            .moved_by(player.facing, config.ambush_lookahead),
        PursuerKind::Flanker => player.position.moved_by(player.facing, config.flank_lookahead),
        PursuerKind::Conditional => {
            if manhattan(own, player.position) > config.conditional_threshold {
                player.position
            } else {
                home
            }
        }
    }
}

pub fn choose_direction(
    grid: &Grid,
    position: Position,
    facing: Direction,
    target: Position,
) -> Option<Direction> {
    let valid: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|dir| grid.is_valid_move(position.moved(*dir), Mover::Pursuer))
        .collect();
    let allow_reverse = valid.len() <= 1;

    let mut best: Option<(i64, Direction)> = None;
    for dir in valid {
        if !allow_reverse && dir == facing.opposite() {
            continue;
        }
        let dist = distance_sq(position.moved(dir), target);
        if best.map(|(best_dist, _)| dist < best_dist).unwrap_or(true) {
            best = Some((dist, dir));
        }
    }
    best.map(|(_, dir)| dir)
}

impl GameEngine {
    pub(super) fn move_pursuers(&mut self) {
        for idx in 0..self.pursuers.len() {
            if self.pursuers[idx].state == PursuerState::Captured
                && self.pursuers[idx].position == self.config.rally
            {
                self.pursuers[idx].state = PursuerState::Chase;
            }

            let target = self.pursuer_target(idx);
            let pursuer = &mut self.pursuers[idx];
            pursuer.target = target;
            if let Some(dir) = choose_direction(&self.grid, pursuer.position, pursuer.facing, target)
            {
                pursuer.position = pursuer.position.moved(dir);
                pursuer.facing = dir;
            }
        }
    }

    pub(super) fn pursuer_target(&mut self, idx: usize) -> Position {
        let pursuer = &self.pursuers[idx];
        match pursuer.state {
            PursuerState::Chase | PursuerState::Scatter => chase_target(
                pursuer.kind,
                pursuer.position,
                pursuer.home,
                &self.player,
                &self.config,
            ),
            PursuerState::Vulnerable => self.rng.cell_in(self.grid.width(), self.grid.height()),
            PursuerState::Captured => self.config.rally,
        }
    }
}
