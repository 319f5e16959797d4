use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active
/// - Ready -> Won
/// - Ready -> Lost
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperState {
    /// No cell revealed yet, mines may not be placed
    Ready,
    Active,
    Won,
    Lost,
}

impl MinesweeperState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for MinesweeperState {
    fn default() -> Self {
        Self::Ready
    }
}

impl From<MinesweeperState> for GameOutcome {
    fn from(state: MinesweeperState) -> Self {
        match state {
            MinesweeperState::Ready | MinesweeperState::Active => GameOutcome::InProgress,
            MinesweeperState::Won => GameOutcome::Won,
            MinesweeperState::Lost => GameOutcome::Lost,
        }
    }
}

/// What the caller renders after each move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesweeperSnapshot {
    pub size: Coord2,
    pub total_mines: CellCount,
    pub mines_left: i32,
    pub state: MinesweeperState,
    pub cells: Array2<CellView>,
}

/// A single game from first click to the end.
///
/// Mines are placed lazily on the first reveal so the opening is never a mine and, board
/// density permitting, always a zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinesweeperEngine {
    config: MinesweeperConfig,
    seed: u64,
    mine_layout: Option<MineLayout>,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: MinesweeperState,
    triggered_mine: Option<Coord2>,
}

impl MinesweeperEngine {
    pub fn new(config: MinesweeperConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            mine_layout: None,
            board: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts on a fixed layout, the first reveal gets no protection.
    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let config = mine_layout.config();
        Self {
            mine_layout: Some(mine_layout),
            ..Self::new(config, 0)
        }
    }

    pub fn config(&self) -> MinesweeperConfig {
        self.config
    }

    pub fn state(&self) -> MinesweeperState {
        self.state
    }

    pub fn outcome(&self) -> GameOutcome {
        self.state.into()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mine_layout.is_some()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn cell(&self, coords: Coord2) -> Result<MinesweeperCell> {
        let coords = self.validate_coords(coords)?;
        let state = self.board[coords.to_nd_index()];
        let (is_mine, adjacent_mine_count) = match &self.mine_layout {
            Some(layout) => (
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            ),
            None => (false, 0),
        };
        Ok(MinesweeperCell {
            is_mine,
            is_revealed: matches!(state, CellState::Revealed(_)),
            is_flagged: matches!(state, CellState::Flagged),
            adjacent_mine_count,
        })
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// The full mine layout, only exposed once the game is over.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        if self.state.is_finished() {
            self.mine_layout.as_ref()
        } else {
            None
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.board[coords.to_nd_index()];
        match cell {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
            }
            Revealed(_) => return Err(GameError::IllegalMove),
        }
        log::debug!("Toggled flag at {:?}, mines left: {}", coords, self.mines_left());
        Ok(MarkOutcome::Changed)
    }

    /// Flags every unrevealed neighbor when their count equals the revealed number.
    pub fn chord_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let Revealed(count) = self.board[coords.to_nd_index()] else {
            return Ok(NoChange);
        };

        if count != self.count_unrevealed_neighbors(coords) {
            return Ok(NoChange);
        }

        let mut updated = false;
        for pos in iter_neighbors(coords, self.size()) {
            if matches!(self.board[pos.to_nd_index()], Hidden) {
                self.board[pos.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                updated = true;
            }
        }

        Ok(if updated { Changed } else { NoChange })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        if !matches!(self.board[coords.to_nd_index()], CellState::Hidden) {
            return Err(GameError::IllegalMove);
        }

        self.ensure_mines_placed(coords);
        Ok(self.reveal_single_cell(coords))
    }

    /// On a satisfied number, reveals all hidden neighbors; on a hidden cell, acts like
    /// [`Self::reveal`].
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.board[coords.to_nd_index()];
        match cell {
            Hidden => self.reveal(coords),
            Flagged => Err(GameError::IllegalMove),
            Revealed(count) if count > 0 && count == self.count_flagged_neighbors(coords) => {
                let mut outcome = RevealOutcome::NoChange;
                for neighbor in iter_neighbors(coords, self.size()) {
                    outcome = outcome | self.reveal_single_cell(neighbor);
                    if self.state.is_finished() {
                        break;
                    }
                }
                Ok(outcome)
            }
            Revealed(_) => Ok(RevealOutcome::NoChange),
        }
    }

    pub fn snapshot(&self) -> MinesweeperSnapshot {
        let size = self.size();
        let mut cells: Array2<CellView> = self.board.map(|&state| state.into());

        if let (true, Some(layout)) = (self.state.is_finished(), &self.mine_layout) {
            let lost = self.state == MinesweeperState::Lost;
            for ((row, col), view) in cells.indexed_iter_mut() {
                let coords = (row as Coord, col as Coord);
                let has_mine = layout.contains_mine(coords);
                *view = match (*view, has_mine) {
                    (CellView::Hidden, true) if self.triggered_mine == Some(coords) => {
                        CellView::Exploded
                    }
                    (CellView::Hidden, true) => CellView::Mine,
                    (CellView::Flagged, false) if lost => CellView::MisplacedFlag,
                    (other, _) => other,
                };
            }
        }

        MinesweeperSnapshot {
            size,
            total_mines: self.total_mines(),
            mines_left: self.mines_left(),
            state: self.state,
            cells,
        }
    }

    fn ensure_mines_placed(&mut self, start: Coord2) {
        if self.mine_layout.is_some() {
            return;
        }
        let generator = RandomMinefieldGenerator::new(self.seed, start, StartTile::AlwaysZero);
        self.mine_layout = Some(generator.generate(self.config));
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(layout) = self.mine_layout.as_ref() else {
            return RevealOutcome::NoChange;
        };
        if !matches!(self.board[coords.to_nd_index()], CellState::Hidden) {
            return RevealOutcome::NoChange;
        }

        if layout.contains_mine(coords) {
            log::debug!("Revealed mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let safe_cells = layout.safe_cell_count();
        let opened = flood_reveal(&mut self.board, layout, coords);
        self.revealed_count += opened;
        log::debug!(
            "Revealed {} cell(s) from {:?}, {}/{} safe cells open",
            opened,
            coords,
            self.revealed_count,
            safe_cells
        );

        if self.revealed_count == safe_cells {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = MinesweeperState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            MinesweeperState::Won
        } else {
            MinesweeperState::Lost
        };
        if won {
            self.triggered_mine = None;
        }
        log::debug!("Game over: {:?}", self.state);
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        iter_neighbors(coords, self.size())
            .filter(|&pos| self.board[pos.to_nd_index()] == CellState::Flagged)
            .count() as u8
    }

    fn count_unrevealed_neighbors(&self, coords: Coord2) -> u8 {
        iter_neighbors(coords, self.size())
            .filter(|&pos| self.board[pos.to_nd_index()].is_unrevealed())
            .count() as u8
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Opens `start` (a hidden safe cell) and, if it is a zero, every cell connected to it
/// through zeros. Flagged cells are left alone. Returns how many cells were opened.
fn flood_reveal(board: &mut Array2<CellState>, layout: &MineLayout, start: Coord2) -> CellCount {
    let start_count = layout.adjacent_mine_count(start);
    board[start.to_nd_index()] = CellState::Revealed(start_count);
    let mut opened = 1;

    if start_count != 0 {
        return opened;
    }

    let mut visited = BTreeSet::from([start]);
    let mut to_visit: VecDeque<_> = layout
        .iter_neighbors(start)
        .filter(|&pos| matches!(board[pos.to_nd_index()], CellState::Hidden))
        .collect();
    log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", start, to_visit);

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        // skip flagged or already opened cells
        if !matches!(board[visit_coords.to_nd_index()], CellState::Hidden) {
            continue;
        }

        let visit_count = layout.adjacent_mine_count(visit_coords);
        board[visit_coords.to_nd_index()] = CellState::Revealed(visit_count);
        opened += 1;
        log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, visit_count);

        // if this is also zero we visit the neighbors
        if visit_count == 0 {
            to_visit.extend(
                layout
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| matches!(board[pos.to_nd_index()], CellState::Hidden))
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    opened
}
