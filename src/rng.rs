use crate::types::Position;

#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f64 / 4_294_967_296.0) as f32
    }

    pub fn below(&mut self, bound: i32) -> i32 {
        if bound <= 1 {
            return 0;
        }
        ((self.next_u32() as u64 * bound as u64) >> 32) as i32
    }

    pub fn cell_in(&mut self, width: i32, height: i32) -> Position {
        let x = self.below(width);
        let y = self.below(height);
        Position { x, y }
    }
}
