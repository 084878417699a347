use super::*;

impl GameEngine {
    pub(super) fn consume_pickup(&mut self, pos: Position, now_ms: u64) {
        match self.pickups.consume_at(pos) {
            PickupKind::None => {}
            PickupKind::Regular => {
                self.session.add_score(self.config.dot_points);
                self.events.push(GameEvent::PickupEaten { x: pos.x, y: pos.y });
            }
            PickupKind::Power => {
                self.session.add_score(self.config.power_points);
                self.events
                    .push(GameEvent::PowerPickupEaten { x: pos.x, y: pos.y });
                self.make_pursuers_vulnerable(now_ms);
            }
        }
    }

    // Restarts the countdown even when pursuers are already vulnerable.
    pub(super) fn make_pursuers_vulnerable(&mut self, now_ms: u64) {
        for pursuer in &mut self.pursuers {
            if pursuer.state != PursuerState::Captured {
                pursuer.state = PursuerState::Vulnerable;
            }
        }
        self.vulnerable_until = Some(now_ms.saturating_add(self.config.vulnerability_ms));
    }

    pub(super) fn end_vulnerability(&mut self) {
        self.vulnerable_until = None;
        for pursuer in &mut self.pursuers {
            if pursuer.state == PursuerState::Vulnerable {
                pursuer.state = PursuerState::Chase;
            }
        }
        self.events.push(GameEvent::VulnerabilityEnded);
    }

    pub(super) fn resolve_collisions(&mut self, now_ms: u64) {
        for idx in 0..self.pursuers.len() {
            if manhattan(self.pursuers[idx].position, self.player.position) > 1 {
                continue;
            }
            match self.pursuers[idx].state {
                PursuerState::Captured => {}
                PursuerState::Vulnerable => self.capture_pursuer(idx),
                PursuerState::Chase | PursuerState::Scatter => {
                    self.catch_player(now_ms);
                    return;
                }
            }
        }
    }

    fn capture_pursuer(&mut self, idx: usize) {
        let rally = self.config.rally;
        let pursuer = &mut self.pursuers[idx];
        pursuer.state = PursuerState::Captured;
        pursuer.position = rally;
        pursuer.target = rally;
        let kind = pursuer.kind;
        self.session.add_score(self.config.pursuer_points);
        self.events.push(GameEvent::PursuerCaptured { kind });
    }

    fn catch_player(&mut self, now_ms: u64) {
        let over = self.session.lose_life();
        self.events.push(GameEvent::PlayerCaught {
            lives_left: self.session.lives(),
        });
        self.vulnerable_until = None;

        if over {
            self.running = false;
            self.paused_until = None;
            self.events.push(GameEvent::GameOver {
                score: self.session.score(),
                level: self.session.level(),
            });
            return;
        }

        self.reset_agents();
        self.paused_until = Some(now_ms.saturating_add(self.config.capture_pause_ms));
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::engine::GameEngine;
    use crate::session::Session;
    use crate::types::{Direction, GameEvent, PickupKind, Position, PursuerState};

    fn started_engine(seed: u32) -> GameEngine {
        let mut engine =
            GameEngine::new(EngineConfig::default(), Session::default(), seed).expect("valid setup");
        engine.start_game();
        engine.build_snapshot(true);
        engine
    }

    #[test]
    fn adjacent_chasing_pursuer_costs_a_life_and_resets_agents() {
        let mut engine = started_engine(5);
        engine.player.position = Position::new(5, 20);
        engine.pursuers[0].state = PursuerState::Chase;
        engine.pursuers[0].position = Position::new(5, 21);

        engine.resolve_collisions(engine.elapsed_ms);

        assert_eq!(engine.session.lives(), 2);
        assert_eq!(engine.player.position, engine.config.player_spawn);
        assert_eq!(engine.player.facing, Direction::Right);
        for (pursuer, spec) in engine.pursuers.iter().zip(engine.config.pursuers.iter()) {
            assert_eq!(pursuer.position, spec.spawn);
            assert_eq!(pursuer.state, PursuerState::Scatter);
        }
        assert!(engine.is_paused());
        assert!(engine.is_running());
    }

    #[test]
    fn same_cell_scatter_pursuer_also_catches() {
        let mut engine = started_engine(6);
        engine.player.position = Position::new(8, 8);
        engine.pursuers[3].position = Position::new(8, 8);
        engine.resolve_collisions(0);
        assert_eq!(engine.session.lives(), 2);
    }

    #[test]
    fn only_one_life_is_lost_per_collision_pass() {
        let mut engine = started_engine(7);
        engine.player.position = Position::new(8, 8);
        engine.pursuers[0].position = Position::new(8, 9);
        engine.pursuers[1].position = Position::new(9, 8);
        engine.resolve_collisions(0);
        assert_eq!(engine.session.lives(), 2);
    }

    #[test]
    fn vulnerable_pursuer_is_captured_and_sent_to_rally() {
        let mut engine = started_engine(8);
        engine.player.position = Position::new(5, 20);
        engine.pursuers[1].state = PursuerState::Vulnerable;
        engine.pursuers[1].position = Position::new(6, 20);
        let score_before = engine.session.score();

        engine.resolve_collisions(0);

        assert_eq!(engine.pursuers[1].state, PursuerState::Captured);
        assert_eq!(engine.pursuers[1].position, engine.config.rally);
        assert_eq!(engine.session.score(), score_before + 200);
        assert_eq!(engine.session.lives(), 3);
        assert_eq!(engine.player.position, Position::new(5, 20));
        assert!(!engine.is_paused());
        let snapshot = engine.build_snapshot(true);
        assert!(snapshot
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::PursuerCaptured { .. })));
    }

    #[test]
    fn captured_pursuer_is_harmless() {
        let mut engine = started_engine(9);
        engine.player.position = Position::new(5, 20);
        engine.pursuers[0].state = PursuerState::Captured;
        engine.pursuers[0].position = Position::new(5, 21);
        engine.resolve_collisions(0);
        assert_eq!(engine.session.lives(), 3);
        assert_eq!(engine.pursuers[0].state, PursuerState::Captured);
    }

    #[test]
    fn distance_two_is_not_a_collision() {
        let mut engine = started_engine(10);
        engine.player.position = Position::new(5, 20);
        engine.pursuers[0].state = PursuerState::Chase;
        engine.pursuers[0].position = Position::new(6, 21);
        engine.resolve_collisions(0);
        assert_eq!(engine.session.lives(), 3);
    }

    #[test]
    fn last_life_ends_the_game_and_halts_the_loop() {
        let mut engine =
            GameEngine::new(EngineConfig::default(), Session::new(1), 11).expect("valid setup");
        engine.start_game();
        engine.player.position = Position::new(5, 20);
        engine.pursuers[0].position = Position::new(5, 21);

        engine.resolve_collisions(0);

        assert!(engine.session.is_over());
        assert!(!engine.session.is_active());
        assert!(!engine.is_running());
        assert!(!engine.is_paused());
        let events = engine.build_snapshot(true).events;
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver { .. })));

        let tick_before = engine.tick_count();
        engine.tick();
        assert_eq!(engine.tick_count(), tick_before);
    }

    #[test]
    fn power_pickup_scores_and_frightens_non_captured_pursuers() {
        let mut engine = started_engine(12);
        engine.pursuers[2].state = PursuerState::Captured;
        let score_before = engine.session.score();

        engine.consume_pickup(Position::new(1, 1), 400);

        assert_eq!(engine.session.score(), score_before + 50);
        assert_eq!(engine.pickups.kind_at(Position::new(1, 1)), PickupKind::None);
        assert_eq!(engine.vulnerable_until, Some(400 + engine.config.vulnerability_ms));
        for (idx, pursuer) in engine.pursuers.iter().enumerate() {
            let expected = if idx == 2 {
                PursuerState::Captured
            } else {
                PursuerState::Vulnerable
            };
            assert_eq!(pursuer.state, expected);
        }
    }

    #[test]
    fn second_power_pickup_restarts_the_countdown() {
        let mut engine = started_engine(13);
        engine.consume_pickup(Position::new(1, 1), 0);
        engine.consume_pickup(Position::new(26, 1), 8_000);
        assert_eq!(engine.vulnerable_until, Some(8_000 + engine.config.vulnerability_ms));
    }

    #[test]
    fn expiry_reverts_only_vulnerable_pursuers() {
        let mut engine = started_engine(14);
        engine.consume_pickup(Position::new(1, 1), 0);
        engine.pursuers[0].state = PursuerState::Captured;

        engine.end_vulnerability();

        assert_eq!(engine.pursuers[0].state, PursuerState::Captured);
        for pursuer in &engine.pursuers[1..] {
            assert_eq!(pursuer.state, PursuerState::Chase);
        }
        assert!(!engine.is_vulnerable());
    }
}
