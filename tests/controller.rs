// Native tests for the interaction controller and the settings flow, driven
// against a scripted in-memory engine.

use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use hex_board::board::surface::RecordingSurface;
use hex_board::config::Palette;
use hex_board::notify::{Notice, NoticeKind, Notifier};
use hex_board::settings::{self, GameSettings};
use hex_board::{
    BoardRenderer, BoardState, CellRef, ClickOutcome, ClickPosition, EngineError, GameEngine,
    GridSpec, HexLayout, InteractionController, Phase, Player, Point, TickOutcome,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Board,
    IsGameOver,
    Winner,
    CurrentPlayer,
    IsHuman,
    SetPlayerMove(Player, CellRef),
    UpdateGame,
    LoadConfig(String),
    SaveConfig(String),
}

struct FakeEngine {
    calls: RefCell<Vec<Call>>,
    board: RefCell<BoardState>,
    game_over: Cell<bool>,
    human_to_move: Cell<bool>,
    current: Cell<Player>,
    winner: RefCell<Option<String>>,
    fail_on: Cell<Option<&'static str>>,
}

impl FakeEngine {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            board: RefCell::new(BoardState::empty(rows, cols)),
            game_over: Cell::new(false),
            human_to_move: Cell::new(true),
            current: Cell::new(Player::One),
            winner: RefCell::new(None),
            fail_on: Cell::new(None),
        }
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), EngineError> {
        self.calls.borrow_mut().push(call);
        if self.fail_on.get() == Some(operation) {
            return Err(EngineError::UnexpectedValue {
                operation,
                expected: "success",
            });
        }
        Ok(())
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(*c)).count()
    }
}

impl GameEngine for FakeEngine {
    async fn board(&self) -> Result<BoardState, EngineError> {
        self.record("board", Call::Board)?;
        Ok(self.board.borrow().clone())
    }

    async fn is_game_over(&self) -> Result<bool, EngineError> {
        self.record("is_game_over", Call::IsGameOver)?;
        Ok(self.game_over.get())
    }

    async fn winner(&self) -> Result<Option<String>, EngineError> {
        self.record("winner", Call::Winner)?;
        Ok(self.winner.borrow().clone())
    }

    async fn current_player(&self) -> Result<Player, EngineError> {
        self.record("current_player", Call::CurrentPlayer)?;
        Ok(self.current.get())
    }

    async fn is_current_player_human(&self) -> Result<bool, EngineError> {
        self.record("is_current_player_human", Call::IsHuman)?;
        Ok(self.human_to_move.get())
    }

    async fn set_player_move(&self, player: Player, cell: CellRef) -> Result<(), EngineError> {
        self.record("set_player_move", Call::SetPlayerMove(player, cell))?;
        let mut rows: Vec<Vec<i64>> = (0..self.board.borrow().rows())
            .map(|r| {
                (0..self.board.borrow().cols())
                    .map(|c| {
                        let value = self.board.borrow().get(CellRef::new(r, c));
                        match value.and_then(|v| v.player()) {
                            Some(p) => p.id() as i64,
                            None => 0,
                        }
                    })
                    .collect()
            })
            .collect();
        rows[cell.row][cell.col] = player.id() as i64;
        let next = BoardState::from_rows(rows)?;
        self.board.replace(next);
        Ok(())
    }

    async fn update_game(&self) -> Result<(), EngineError> {
        self.record("update_game", Call::UpdateGame)
    }

    async fn load_config_from_file(&self, file_name: &str) -> Result<(), EngineError> {
        self.record("load_config_from_file", Call::LoadConfig(file_name.to_string()))
    }

    async fn save_config(&self, _settings: &GameSettings, file_name: &str) -> Result<(), EngineError> {
        self.record("save_config", Call::SaveConfig(file_name.to_string()))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

type TestController = InteractionController<FakeEngine, RecordingSurface, RecordingNotifier>;

fn controller(rows: usize, cols: usize) -> TestController {
    let spec = GridSpec::new(rows, cols, 30.0).unwrap();
    let renderer = BoardRenderer::new(HexLayout::new(spec), Palette::default());
    InteractionController::new(
        FakeEngine::new(rows, cols),
        renderer,
        RecordingSurface::new(),
        RecordingNotifier::default(),
    )
}

fn center_of(ctl: &TestController, row: usize, col: usize) -> Point {
    ctl.renderer().layout().center(CellRef::new(row, col)).unwrap()
}

#[test]
fn click_on_cell_moves_for_current_player() {
    let ctl = controller(4, 4);
    ctl.engine().current.set(Player::Two);
    let target = CellRef::new(2, 1);

    let outcome = block_on(ctl.click_at(center_of(&ctl, 2, 1))).unwrap();

    assert_eq!(
        outcome,
        ClickOutcome::Moved {
            player: Player::Two,
            cell: target
        }
    );
    assert_eq!(
        ctl.engine().calls(),
        vec![
            Call::CurrentPlayer,
            Call::SetPlayerMove(Player::Two, target),
            Call::UpdateGame,
            Call::Board,
        ]
    );
    // Redrawn with the new piece in player two's color.
    let surface = ctl.surface();
    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].0, center_of(&ctl, 2, 1));
    assert_eq!(circles[0].2, "blue");
}

#[test]
fn click_in_page_coordinates_uses_offsets() {
    let ctl = controller(3, 3);
    let center = center_of(&ctl, 1, 1);
    let position = ClickPosition {
        page: Point::new(center.x + 15.0, center.y + 110.0),
        canvas_offset: Point::new(5.0, 100.0),
        panel_offset: Point::new(10.0, 10.0),
    };

    let outcome = block_on(ctl.on_click(position)).unwrap();

    assert!(matches!(outcome, ClickOutcome::Moved { cell, .. } if cell == CellRef::new(1, 1)));
}

#[test]
fn click_off_the_board_makes_no_engine_calls() {
    let ctl = controller(3, 3);

    let outcome = block_on(ctl.click_at(Point::new(0.0, 0.0))).unwrap();

    assert_eq!(outcome, ClickOutcome::Missed);
    assert!(ctl.engine().calls().is_empty());
    assert!(ctl.surface().commands().is_empty());
}

#[test]
fn tick_waits_while_human_is_to_move() {
    let ctl = controller(3, 3);

    let outcome = block_on(ctl.on_tick()).unwrap();

    assert_eq!(outcome, TickOutcome::Waiting);
    assert_eq!(ctl.engine().calls(), vec![Call::IsGameOver, Call::IsHuman]);
}

#[test]
fn tick_advances_ai_turn_and_redraws() {
    let ctl = controller(3, 3);
    ctl.engine().human_to_move.set(false);

    let outcome = block_on(ctl.on_tick()).unwrap();

    assert_eq!(outcome, TickOutcome::Advanced);
    assert_eq!(
        ctl.engine().calls(),
        vec![Call::IsGameOver, Call::IsHuman, Call::UpdateGame, Call::Board]
    );
    assert_eq!(ctl.surface().closed_paths(), 9);
}

#[test]
fn game_over_latches_and_announces_once() {
    let ctl = controller(3, 3);
    ctl.engine().game_over.set(true);
    ctl.engine().winner.replace(Some("Player 1".to_string()));

    let first = block_on(ctl.on_tick()).unwrap();
    let second = block_on(ctl.on_tick()).unwrap();

    assert_eq!(
        first,
        TickOutcome::Finished {
            winner: Some("Player 1".to_string())
        }
    );
    assert_eq!(second, TickOutcome::Ignored);
    assert_eq!(ctl.phase(), Phase::Finished);
    assert!(ctl.timer().is_stopped());
    assert_eq!(ctl.engine().count(|c| *c == Call::Winner), 1);

    let notices = ctl.notifier().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Info);
    assert!(notices[0].text.contains("Player 1"));
}

#[test]
fn game_over_without_winner_is_announced() {
    let ctl = controller(2, 2);
    ctl.engine().game_over.set(true);

    let outcome = block_on(ctl.on_tick()).unwrap();

    assert_eq!(outcome, TickOutcome::Finished { winner: None });
    assert_eq!(ctl.notifier().notices().len(), 1);
}

#[test]
fn clicks_after_game_over_are_ignored() {
    let ctl = controller(3, 3);
    ctl.engine().game_over.set(true);
    block_on(ctl.on_tick()).unwrap();
    ctl.engine().clear_calls();

    let outcome = block_on(ctl.click_at(center_of(&ctl, 0, 0))).unwrap();

    assert_eq!(outcome, ClickOutcome::Ignored);
    assert_eq!(
        ctl.engine()
            .count(|c| matches!(c, Call::SetPlayerMove(..) | Call::UpdateGame)),
        0
    );
    assert!(ctl.engine().calls().is_empty());
}

#[test]
fn engine_failure_aborts_the_click() {
    let ctl = controller(3, 3);
    ctl.engine().fail_on.set(Some("set_player_move"));

    let err = block_on(ctl.click_at(center_of(&ctl, 1, 2))).unwrap_err();

    assert!(matches!(
        err,
        EngineError::UnexpectedValue {
            operation: "set_player_move",
            ..
        }
    ));
    assert_eq!(ctl.engine().count(|c| *c == Call::UpdateGame), 0);
    assert!(ctl.surface().commands().is_empty());

    ctl.report_failure("Move", &err);
    let notices = ctl.notifier().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
}

#[test]
fn failed_tick_leaves_game_active() {
    let ctl = controller(3, 3);
    ctl.engine().fail_on.set(Some("is_game_over"));

    assert!(block_on(ctl.on_tick()).is_err());
    assert_eq!(ctl.phase(), Phase::Active);
    assert!(!ctl.timer().is_stopped());
}

#[test]
fn load_config_reports_success_and_failure() {
    let engine = FakeEngine::new(1, 1);
    let notifier = RecordingNotifier::default();

    let done = block_on(settings::load_config_from_file(&engine, &notifier, "cfg.json"));
    engine.fail_on.set(Some("load_config_from_file"));
    let failed = block_on(settings::load_config_from_file(&engine, &notifier, "cfg.json"));
    let cancelled = block_on(settings::load_config_from_file(&engine, &notifier, ""));

    assert_eq!(done, settings::ConfigOutcome::Done);
    assert_eq!(failed, settings::ConfigOutcome::Failed);
    assert_eq!(cancelled, settings::ConfigOutcome::Cancelled);
    let texts: Vec<String> = notifier.notices().into_iter().map(|n| n.text).collect();
    assert_eq!(texts, vec![settings::LOAD_SUCCESS, settings::LOAD_FAILURE]);
    assert_eq!(engine.count(|c| matches!(c, Call::LoadConfig(_))), 2);
}

#[test]
fn save_config_checks_file_name() {
    let engine = FakeEngine::new(1, 1);
    let notifier = RecordingNotifier::default();
    let game_settings = GameSettings::default();

    let cancelled = block_on(settings::save_config(&engine, &notifier, &game_settings, None));
    let blank = block_on(settings::save_config(&engine, &notifier, &game_settings, Some("  ")));
    let done = block_on(settings::save_config(
        &engine,
        &notifier,
        &game_settings,
        Some(" mine.json "),
    ));

    assert_eq!(cancelled, settings::ConfigOutcome::Cancelled);
    assert_eq!(blank, settings::ConfigOutcome::Failed);
    assert_eq!(done, settings::ConfigOutcome::Done);
    assert_eq!(engine.calls(), vec![Call::SaveConfig("mine.json".to_string())]);
    let notices = notifier.notices();
    assert_eq!(notices[0].text, settings::MISSING_FILE_NAME);
    assert_eq!(notices[1].kind, NoticeKind::Success);
    assert_eq!(notices[1].text, settings::SAVE_SUCCESS);
}

#[test]
fn save_config_refuses_invalid_settings() {
    let engine = FakeEngine::new(1, 1);
    let notifier = RecordingNotifier::default();
    let mut game_settings = GameSettings::default();
    game_settings.game.board_height = 0;

    let outcome = block_on(settings::save_config(
        &engine,
        &notifier,
        &game_settings,
        Some("bad.json"),
    ));

    assert_eq!(outcome, settings::ConfigOutcome::Failed);
    assert!(engine.calls().is_empty());
    assert_eq!(notifier.notices()[0].text, settings::SAVE_FAILURE);
}

#[test]
fn host_helpers_without_a_board() {
    assert_eq!(hex_board::cell_at(40.0, 30.0), vec![-1, -1]);
    assert!(hex_board::cell_neighbors(0, 0).is_empty());
}
