//! Hex board: geometry, rendering and the browser session that ties the canvas,
//! the pointer and the poll timer to the remote engine.
//!
//! A session is started once the engine is reachable. The first board
//! snapshot fixes the grid size; geometry is computed once from it and reused
//! for every redraw and every click until the session is stopped.

pub mod controller;
pub mod geometry;
pub mod render;
pub mod surface;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent, window};

use crate::bridge::JsEngine;
use crate::config::BoardConfig;
use crate::engine::GameEngine;
use crate::error::HexError;
use crate::notify::AlertNotifier;

use self::controller::{ClickOutcome, ClickPosition, InteractionController, TickOutcome};
use self::geometry::{GridSpec, HexLayout, Point};
use self::render::BoardRenderer;
use self::surface::CanvasSurface;

pub type BrowserController = InteractionController<JsEngine, CanvasSurface, AlertNotifier>;

/// A running board. Dropping it removes the click listener and stops polling.
struct BoardSession {
    controller: Rc<BrowserController>,
    canvas: HtmlCanvasElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for BoardSession {
    fn drop(&mut self) {
        self.canvas
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
            .ok();
        self.controller.timer().stop();
    }
}

thread_local! {
    static SESSION: RefCell<Option<BoardSession>> = const { RefCell::new(None) };
}

/// Start (or restart) the board on the page.
pub async fn start_board_session(config: BoardConfig) -> Result<(), HexError> {
    stop_board_session();

    let win = window().ok_or_else(|| HexError::dom("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| HexError::dom("no document"))?;
    let canvas = find_or_create_canvas(&doc, &config.canvas_id)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| HexError::dom("canvas has no 2d context"))?
        .dyn_into()
        .map_err(|_| HexError::dom("2d context is not a CanvasRenderingContext2d"))?;

    let engine = JsEngine;
    let board = engine.board().await?;
    let spec = GridSpec::from_board(&board, config.radius)?;
    log::info!(
        "starting {}x{} board (radius {})",
        spec.rows(),
        spec.cols(),
        spec.radius()
    );
    let renderer = BoardRenderer::new(HexLayout::new(spec), config.palette.clone());
    let controller = Rc::new(InteractionController::new(
        engine,
        renderer,
        CanvasSurface::new(canvas.clone(), ctx),
        AlertNotifier,
    ));
    controller.render(&board);

    let on_click = {
        let controller = Rc::clone(&controller);
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |evt: MouseEvent| {
            let position = click_position(&canvas, &evt);
            let controller = Rc::clone(&controller);
            wasm_bindgen_futures::spawn_local(async move {
                match controller.on_click(position).await {
                    Ok(ClickOutcome::Moved { player, cell }) => {
                        log::debug!("{player} moved to ({}, {})", cell.row, cell.col);
                    }
                    Ok(_) => {}
                    Err(err) => controller.report_failure("Move", &err),
                }
            });
        }) as Box<dyn FnMut(_)>)
    };
    canvas.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

    {
        let ticking = Rc::clone(&controller);
        controller.timer().start(config.poll_interval_ms, move || {
            let controller = Rc::clone(&ticking);
            wasm_bindgen_futures::spawn_local(async move {
                match controller.on_tick().await {
                    Ok(TickOutcome::Finished { winner }) => {
                        log::info!("poll stopped, winner: {}", winner.as_deref().unwrap_or("none"));
                    }
                    Ok(_) => {}
                    Err(err) => controller.report_failure("Engine update", &err),
                }
            });
        });
    }

    SESSION.with(|s| {
        s.replace(Some(BoardSession {
            controller,
            canvas,
            on_click,
        }))
    });
    Ok(())
}

/// Tear down the running session, if any.
pub fn stop_board_session() {
    let previous = SESSION.with(|s| s.borrow_mut().take());
    if previous.is_some() {
        log::info!("board session stopped");
    }
}

/// Controller of the running session, if any.
pub fn current_session() -> Option<Rc<BrowserController>> {
    SESSION.with(|s| s.borrow().as_ref().map(|s| Rc::clone(&s.controller)))
}

fn find_or_create_canvas(doc: &Document, id: &str) -> Result<HtmlCanvasElement, HexError> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into()
            .map_err(|_| HexError::dom(format!("#{id} is not a canvas")));
    }
    log::warn!("no canvas with id {id}, creating one");
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(JsValue::from)?;
    canvas.set_id(id);
    doc.body()
        .ok_or_else(|| HexError::dom("no document body"))?
        .append_child(&canvas)?;
    Ok(canvas)
}

/// Click position with the offsets of the canvas and its containing panel.
fn click_position(canvas: &HtmlCanvasElement, evt: &MouseEvent) -> ClickPosition {
    let panel_offset = canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        .map(|p| Point::new(p.offset_left() as f64, p.offset_top() as f64))
        .unwrap_or_default();
    ClickPosition {
        page: Point::new(evt.page_x() as f64, evt.page_y() as f64),
        canvas_offset: Point::new(canvas.offset_left() as f64, canvas.offset_top() as f64),
        panel_offset,
    }
}
