use super::*;

pub fn try_move(
    grid: &Grid,
    current: Position,
    requested: Direction,
    fallback: Direction,
    mover: Mover,
) -> (Position, Direction) {
    let candidate = current.moved(requested);
    if grid.is_valid_move(candidate, mover) {
        return (candidate, requested);
    }
    let candidate = current.moved(fallback);
    if grid.is_valid_move(candidate, mover) {
        return (candidate, fallback);
    }
    (current, fallback)
}

impl GameEngine {
    pub(super) fn move_player(&mut self, now_ms: u64) {
        let before = self.player.position;
        let (position, facing) = try_move(
            &self.grid,
            before,
            self.player.requested,
            self.player.facing,
            Mover::Player,
        );
        self.player.position = position;
        self.player.facing = facing;
        if position != before {
            self.consume_pickup(position, now_ms);
        }
    }
}
