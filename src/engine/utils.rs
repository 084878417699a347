use crate::types::Position;

pub(crate) fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub(super) fn distance_sq(a: Position, b: Position) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(3, 9);
        let b = Position::new(-2, 4);
        assert_eq!(manhattan(a, b), 10);
        assert_eq!(manhattan(b, a), 10);
    }

    #[test]
    fn squared_distance_ranks_like_euclidean() {
        let target = Position::new(0, 0);
        assert!(distance_sq(Position::new(3, 4), target) < distance_sq(Position::new(5, 1), target));
        assert_eq!(distance_sq(Position::new(1, 2), target), distance_sq(Position::new(2, 1), target));
    }
}
