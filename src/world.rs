use crate::config::EngineConfig;
use crate::constants::{wall_band_columns, wall_band_rows};
use crate::error::SetupError;
use crate::types::{Cell, MazeInit, Mover, Position, PursuerKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn generate(width: i32, height: i32) -> Result<Self, SetupError> {
        let size = match width.checked_mul(height) {
            Some(size) if width > 0 && height > 0 => size as usize,
            _ => return Err(SetupError::InvalidDimensions { width, height }),
        };
        let mut cells = vec![Cell::Open; size];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    cells[(y * width + x) as usize] = Cell::Wall;
                }
            }
        }
        for row in wall_band_rows(height) {
            for (start, end) in wall_band_columns(width) {
                for x in start.max(0)..end.min(width) {
                    cells[(row * width + x) as usize] = Cell::Wall;
                }
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_rows(rows: &[String]) -> Result<Self, SetupError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(SetupError::RaggedLayout {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, tile) in row.chars().enumerate() {
                let cell = Cell::from_tile(tile).ok_or(SetupError::UnknownTile {
                    x: x as i32,
                    y: y as i32,
                    tile,
                })?;
                cells.push(cell);
            }
        }
        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    // Anything outside the maze reads as wall.
    pub fn cell_at(&self, pos: Position) -> Cell {
        if !self.in_bounds(pos) {
            return Cell::Wall;
        }
        self.cells[(pos.y * self.width + pos.x) as usize]
    }

    pub fn is_valid_move(&self, pos: Position, mover: Mover) -> bool {
        match self.cell_at(pos) {
            Cell::Wall => false,
            Cell::Restricted => mover == Mover::Pursuer,
            Cell::Open | Cell::Tunnel => true,
        }
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Position { x, y }))
            .filter(|pos| self.cell_at(*pos) == Cell::Open)
    }

    pub fn tiles(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|cell| cell.tile()).collect())
            .collect()
    }

    pub fn to_maze_init(&self) -> MazeInit {
        MazeInit {
            width: self.width,
            height: self.height,
            tiles: self.tiles(),
        }
    }
}

pub fn generate_world(config: &EngineConfig) -> Result<Grid, SetupError> {
    let grid = match &config.layout {
        Some(rows) => Grid::from_rows(rows)?,
        None => Grid::generate(config.width, config.height)?,
    };
    validate_placements(&grid, config)?;
    Ok(grid)
}

fn validate_placements(grid: &Grid, config: &EngineConfig) -> Result<(), SetupError> {
    if config.tick_ms == 0 {
        return Err(SetupError::InvalidTickPeriod);
    }
    check_standable(grid, "player spawn", config.player_spawn)?;
    if grid.cell_at(config.player_spawn) == Cell::Restricted {
        return Err(SetupError::PlayerSpawnRestricted {
            at: config.player_spawn,
        });
    }
    check_standable(grid, "rally position", config.rally)?;

    if config.pursuers.len() != 4 {
        return Err(SetupError::PursuerRoster {
            missing: None,
            count: config.pursuers.len(),
        });
    }
    for kind in [
        PursuerKind::Direct,
        PursuerKind::Ambusher,
        PursuerKind::Flanker,
        PursuerKind::Conditional,
    ] {
        let Some(spec) = config.pursuer_spec(kind) else {
            return Err(SetupError::PursuerRoster {
                missing: Some(kind),
                count: config.pursuers.len(),
            });
        };
        check_standable(grid, "pursuer spawn", spec.spawn)?;
    }
    Ok(())
}

fn check_standable(grid: &Grid, what: &'static str, at: Position) -> Result<(), SetupError> {
    if !grid.in_bounds(at) {
        return Err(SetupError::SpawnOutOfBounds { what, at });
    }
    if grid.cell_at(at) == Cell::Wall {
        return Err(SetupError::SpawnOnWall { what, at });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{generate_world, Grid};
    use crate::config::EngineConfig;
    use crate::error::SetupError;
    use crate::types::{Cell, Mover, Position};

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn generated_maze_has_border_and_band_walls() {
        let grid = Grid::generate(28, 31).expect("valid dimensions");
        for x in 0..28 {
            assert_eq!(grid.cell_at(Position::new(x, 0)), Cell::Wall);
            assert_eq!(grid.cell_at(Position::new(x, 30)), Cell::Wall);
        }
        for y in 0..31 {
            assert_eq!(grid.cell_at(Position::new(0, y)), Cell::Wall);
            assert_eq!(grid.cell_at(Position::new(27, y)), Cell::Wall);
        }
        for row in [5, 15] {
            for x in (5..10).chain(18..23) {
                assert_eq!(grid.cell_at(Position::new(x, row)), Cell::Wall);
            }
            assert_eq!(grid.cell_at(Position::new(4, row)), Cell::Open);
            assert_eq!(grid.cell_at(Position::new(10, row)), Cell::Open);
            assert_eq!(grid.cell_at(Position::new(14, row)), Cell::Open);
            assert_eq!(grid.cell_at(Position::new(23, row)), Cell::Open);
        }
        assert_eq!(grid.open_cells().count(), 26 * 29 - 20);
    }

    #[test]
    fn positions_outside_grid_are_out_of_bounds_and_rejected() {
        let grid = Grid::generate(28, 31).expect("valid dimensions");
        for pos in [
            Position::new(-1, 5),
            Position::new(5, -1),
            Position::new(28, 5),
            Position::new(5, 31),
            Position::new(-40, 90),
        ] {
            assert!(!grid.in_bounds(pos));
            assert_eq!(grid.cell_at(pos), Cell::Wall);
            assert!(!grid.is_valid_move(pos, Mover::Player));
            assert!(!grid.is_valid_move(pos, Mover::Pursuer));
        }
    }

    #[test]
    fn restricted_cells_admit_only_pursuers() {
        let grid = Grid::from_rows(&rows(&["#####", "#.-=#", "#####"])).expect("valid layout");
        let restricted = Position::new(2, 1);
        let tunnel = Position::new(3, 1);
        assert!(!grid.is_valid_move(restricted, Mover::Player));
        assert!(grid.is_valid_move(restricted, Mover::Pursuer));
        assert!(grid.is_valid_move(tunnel, Mover::Player));
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![Position::new(1, 1)]);
        assert_eq!(grid.tiles(), rows(&["#####", "#.-=#", "#####"]));
    }

    #[test]
    fn non_positive_dimensions_fail_setup() {
        assert_eq!(
            Grid::generate(0, 31),
            Err(SetupError::InvalidDimensions {
                width: 0,
                height: 31
            })
        );
        assert!(Grid::generate(28, -3).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn oversized_dimensions_fail_setup_instead_of_overflowing() {
        assert_eq!(
            Grid::generate(50_000, 50_000),
            Err(SetupError::InvalidDimensions {
                width: 50_000,
                height: 50_000
            })
        );
        assert!(Grid::generate(i32::MAX, 2).is_err());
    }

    #[test]
    fn zero_tick_period_fails_setup() {
        let config = EngineConfig {
            tick_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(generate_world(&config), Err(SetupError::InvalidTickPeriod));
    }

    #[test]
    fn layout_errors_are_reported() {
        assert!(matches!(
            Grid::from_rows(&rows(&["###", "##"])),
            Err(SetupError::RaggedLayout { row: 1, .. })
        ));
        assert!(matches!(
            Grid::from_rows(&rows(&["#?#"])),
            Err(SetupError::UnknownTile { x: 1, y: 0, tile: '?' })
        ));
    }

    #[test]
    fn default_config_generates_a_valid_world() {
        let grid = generate_world(&EngineConfig::default()).expect("default world");
        assert_eq!((grid.width(), grid.height()), (28, 31));
    }

    #[test]
    fn player_spawn_on_wall_or_restricted_cell_fails_setup() {
        let config = EngineConfig {
            player_spawn: Position::new(5, 5),
            ..EngineConfig::default()
        };
        assert!(matches!(
            generate_world(&config),
            Err(SetupError::SpawnOnWall { .. })
        ));

        let mut layout = Grid::generate(28, 31).expect("valid dimensions").tiles();
        layout[23].replace_range(14..15, "-");
        let config = EngineConfig {
            layout: Some(layout),
            ..EngineConfig::default()
        };
        assert!(matches!(
            generate_world(&config),
            Err(SetupError::PlayerSpawnRestricted { .. })
        ));
    }

    #[test]
    fn roster_without_every_kind_fails_setup() {
        let mut config = EngineConfig::default();
        config.pursuers.pop();
        assert!(matches!(
            generate_world(&config),
            Err(SetupError::PursuerRoster { missing: None, count: 3 })
        ));

        let mut config = EngineConfig::default();
        config.pursuers[3] = config.pursuers[0].clone();
        assert!(matches!(
            generate_world(&config),
            Err(SetupError::PursuerRoster { missing: Some(_), .. })
        ));
    }
}
