//! Pointer and timer handling against the remote engine.
//!
//! The controller is shared between the click listener and the poll timer
//! (behind an `Rc`), so every handler takes `&self`. The surface is only
//! borrowed for the synchronous draw at the end of a handler, never across an
//! engine call; two handlers in flight can both redraw and the later one wins.

use std::cell::{Cell, Ref, RefCell};

use crate::engine::{BoardState, GameEngine, Player};
use crate::error::EngineError;
use crate::notify::{Notice, Notifier};

use super::geometry::{CellRef, Point};
use super::render::BoardRenderer;
use super::surface::DrawSurface;
use super::timer::PollTimer;

/// Game phase as seen by the board. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Finished,
}

/// Where a click happened, in page coordinates, plus the offsets needed to
/// bring it into canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickPosition {
    pub page: Point,
    pub canvas_offset: Point,
    pub panel_offset: Point,
}

impl ClickPosition {
    pub fn to_canvas_local(self) -> Point {
        Point::new(
            self.page.x - self.canvas_offset.x - self.panel_offset.x,
            self.page.y - self.canvas_offset.y - self.panel_offset.y,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The game is over.
    Ignored,
    /// The click did not land on a cell.
    Missed,
    Moved { player: Player, cell: CellRef },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over.
    Ignored,
    /// A human is to move; nothing to do.
    Waiting,
    /// The engine made a move and the board was redrawn.
    Advanced,
    /// The game just ended.
    Finished { winner: Option<String> },
}

pub struct InteractionController<E, S, N> {
    engine: E,
    renderer: BoardRenderer,
    surface: RefCell<S>,
    notifier: N,
    phase: Cell<Phase>,
    timer: PollTimer,
}

impl<E, S, N> InteractionController<E, S, N>
where
    E: GameEngine,
    S: DrawSurface,
    N: Notifier,
{
    pub fn new(engine: E, renderer: BoardRenderer, surface: S, notifier: N) -> Self {
        Self {
            engine,
            renderer,
            surface: RefCell::new(surface),
            notifier,
            phase: Cell::new(Phase::Active),
            timer: PollTimer::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn renderer(&self) -> &BoardRenderer {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn timer(&self) -> &PollTimer {
        &self.timer
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.get() == Phase::Finished
    }

    /// Draw a snapshot.
    pub fn render(&self, board: &BoardState) {
        self.renderer.render(&mut *self.surface.borrow_mut(), board);
    }

    /// Fetch a fresh snapshot and draw it.
    pub async fn refresh(&self) -> Result<(), EngineError> {
        let board = self.engine.board().await?;
        self.render(&board);
        Ok(())
    }

    /// Handle a click given in page coordinates.
    pub async fn on_click(&self, position: ClickPosition) -> Result<ClickOutcome, EngineError> {
        self.click_at(position.to_canvas_local()).await
    }

    /// Handle a click at a canvas-local point.
    pub async fn click_at(&self, point: Point) -> Result<ClickOutcome, EngineError> {
        if self.is_finished() {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(cell) = self.renderer.layout().cell_at(point) else {
            return Ok(ClickOutcome::Missed);
        };
        let player = self.engine.current_player().await?;
        log::debug!("{player} plays ({}, {})", cell.row, cell.col);
        self.engine.set_player_move(player, cell).await?;
        self.engine.update_game().await?;
        self.refresh().await?;
        Ok(ClickOutcome::Moved { player, cell })
    }

    /// One poll of the engine.
    pub async fn on_tick(&self) -> Result<TickOutcome, EngineError> {
        if self.is_finished() {
            return Ok(TickOutcome::Ignored);
        }
        if self.engine.is_game_over().await? {
            // Another tick may have finished the game while we were waiting.
            if self.phase.replace(Phase::Finished) == Phase::Finished {
                return Ok(TickOutcome::Ignored);
            }
            self.timer.stop();
            let winner = self.engine.winner().await?;
            self.announce(winner.as_deref());
            return Ok(TickOutcome::Finished { winner });
        }
        if self.engine.is_current_player_human().await? {
            return Ok(TickOutcome::Waiting);
        }
        self.engine.update_game().await?;
        self.refresh().await?;
        Ok(TickOutcome::Advanced)
    }

    fn announce(&self, winner: Option<&str>) {
        let text = match winner {
            Some(name) => format!("{name} wins!"),
            None => "The game ended without a winner.".to_string(),
        };
        log::info!("game over: {text}");
        self.notifier.notify(Notice::info("Game over", text));
    }

    /// Log a failed handler and tell the player. The interaction is abandoned.
    pub fn report_failure(&self, action: &str, err: &EngineError) {
        log::error!("{action} failed: {err}");
        self.notifier
            .notify(Notice::error("Error!", format!("{action} failed: {err}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_position_subtracts_offsets() {
        let pos = ClickPosition {
            page: Point::new(250.0, 140.0),
            canvas_offset: Point::new(40.0, 20.0),
            panel_offset: Point::new(10.0, 20.0),
        };
        assert_eq!(pos.to_canvas_local(), Point::new(200.0, 100.0));
    }
}
