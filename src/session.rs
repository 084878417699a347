use crate::constants::STARTING_LIVES;
use crate::types::SessionView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    starting_lives: u32,
    score: u32,
    lives: u32,
    level: u32,
    active: bool,
    over: bool,
    sound_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(STARTING_LIVES)
    }
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            starting_lives: starting_lives.max(1),
            score: 0,
            lives: starting_lives.max(1),
            level: 1,
            active: false,
            over: false,
            sound_enabled: true,
        }
    }

    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.level = 1;
        self.active = true;
        self.over = false;
    }

    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.over = true;
            self.active = false;
        }
        self.over
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            score: self.score,
            lives: self.lives,
            level: self.level,
            active: self.active,
            over: self.over,
            sound_enabled: self.sound_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn fresh_session_is_not_started() {
        let session = Session::default();
        assert!(!session.is_active());
        assert!(!session.is_over());
        assert_eq!(session.lives(), 3);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn losing_every_life_ends_the_game() {
        let mut session = Session::default();
        session.start();
        assert!(!session.lose_life());
        assert!(!session.lose_life());
        assert!(session.is_active());
        assert!(session.lose_life());
        assert!(session.is_over());
        assert!(!session.is_active());
        assert_eq!(session.lives(), 0);
    }

    #[test]
    fn advance_level_keeps_score_and_lives() {
        let mut session = Session::default();
        session.start();
        session.add_score(120);
        session.lose_life();
        session.advance_level();
        assert_eq!(session.level(), 2);
        assert_eq!(session.score(), 120);
        assert_eq!(session.lives(), 2);
        assert!(session.is_active());
    }

    #[test]
    fn restart_after_game_over_resets_progress() {
        let mut session = Session::new(1);
        session.start();
        session.add_score(500);
        session.advance_level();
        assert!(session.lose_life());

        session.start();
        assert!(session.is_active());
        assert!(!session.is_over());
        assert_eq!((session.score(), session.lives(), session.level()), (0, 1, 1));
    }

    #[test]
    fn sound_toggle_flips_flag() {
        let mut session = Session::default();
        assert!(session.sound_enabled());
        assert!(!session.toggle_sound());
        assert!(session.toggle_sound());
    }
}
