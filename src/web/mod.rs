//! Browser glue: canvas lookup, event listeners and the `requestAnimationFrame` loop.
//!
//! All handlers reach the single [`App`] through a thread-local. Everything runs on
//! the page's one thread and each handler finishes before the next is dispatched,
//! so a `RefCell` is all the coordination needed.

mod audio;
mod dom;
mod render;

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, window};

use crate::config::{GameConfig, GroupSize};
use crate::game::GameState;
use crate::hud::HudSnapshot;
use crate::input::CanvasMapping;

use self::audio::WebAudio;
use self::dom::{Controls, Hud};

const CANVAS_ID: &str = "gameCanvas";

struct App {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: GameState,
    audio: WebAudio,
    hud: Hud,
    controls: Controls,
}

impl App {
    fn frame(&mut self, now_ms: f64) {
        self.audio.pump(now_ms);
        if self.game.is_paused() {
            return;
        }
        let outcome = self.game.tick(&mut self.audio);
        if outcome.complete && outcome.removed > 0 {
            log::info!("all {} targets cleared", self.game.total_targets());
        }
        if let Err(e) = render::draw_frame(&self.ctx, &self.game) {
            log::warn!("render failed: {e:?}");
        }
        self.hud.apply(&HudSnapshot::from_game(&self.game));
    }

    fn mapping(&self) -> CanvasMapping {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasMapping {
            rect_left: rect.left(),
            rect_top: rect.top(),
            rect_width: rect.width(),
            rect_height: rect.height(),
            canvas_width: self.canvas.width() as f64,
            canvas_height: self.canvas.height() as f64,
        }
    }

    fn restart(&mut self) {
        self.game.reset(&mut self.audio);
        self.controls.show_paused(false);
        self.hud.apply(&HudSnapshot::from_game(&self.game));
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn start(mut config: GameConfig) -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        log::warn!("game already running; ignoring start");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        let c: HtmlCanvasElement = el.dyn_into()?;
        config.canvas_width = c.width().max(1);
        config.canvas_height = c.height().max(1);
        c
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(config.canvas_width);
        c.set_height(config.canvas_height);
        c.set_attribute("style", "display:block; margin:0 auto; max-width:100%; border-radius:18px; border:2px solid #222; background:#0b1020; cursor:crosshair;")?;
        doc.body().ok_or_else(|| JsValue::from_str("no body"))?.append_child(&c)?;
        c
    };
    // The page canvas may be smaller than the tuning assumed.
    config.validate().map_err(|e| JsValue::from_str(&format!("{e:#}")))?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let hud = Hud::ensure(&doc)?;
    let controls = Controls::ensure(&doc, config.group_size)?;
    let game = GameState::new(config, StdRng::from_entropy());
    hud.apply(&HudSnapshot::from_game(&game));
    log::info!(
        "starting: {} targets, {} levels, canvas {}x{}",
        game.total_targets(),
        game.total_levels(),
        canvas.width(),
        canvas.height()
    );

    let app = App { canvas: canvas.clone(), ctx, game, audio: WebAudio::default(), hud, controls };
    let pause_btn = app.controls.pause.clone();
    let restart_btn = app.controls.restart.clone();
    let music_btn = app.controls.music.clone();
    let select = app.controls.group_select.clone();
    APP.with(|cell| cell.replace(Some(app)));

    on_mouse(&canvas, "mousemove", |app, evt| {
        let p = app.mapping().to_canvas(evt.client_x() as f64, evt.client_y() as f64);
        app.game.set_pointer(Some(p));
    })?;
    on_mouse(&canvas, "mouseleave", |app, _| app.game.set_pointer(None))?;
    on_mouse(&canvas, "click", |app, evt| {
        app.audio.arm();
        let p = app.mapping().to_canvas(evt.client_x() as f64, evt.client_y() as f64);
        if app.game.click(p, &mut app.audio) {
            app.hud.apply(&HudSnapshot::from_game(&app.game));
        }
    })?;
    // Browsers only allow audio after a user gesture.
    on_event(&doc, "pointerdown", |app, _| app.audio.arm())?;

    on_event(&pause_btn, "click", |app, _| {
        let paused = app.game.toggle_pause(&mut app.audio);
        app.controls.show_paused(paused);
    })?;
    on_event(&restart_btn, "click", |app, _| app.restart())?;
    on_event(&music_btn, "click", |app, _| {
        app.audio.arm();
        let on = app.game.toggle_music(&mut app.audio);
        app.controls.show_music(on);
    })?;
    on_event(&select, "change", |app, _| {
        let value = app.controls.group_select.value();
        match GroupSize::from_selector(&value) {
            Some(size) => {
                app.game.set_group_size(size, &mut app.audio);
                app.controls.show_paused(false);
                app.hud.apply(&HudSnapshot::from_game(&app.game));
            }
            None => log::warn!("ignoring group size {value:?}"),
        }
    })?;

    start_loop();
    Ok(())
}

fn on_mouse(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(&mut App, MouseEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                handler(app, evt);
            }
        });
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_event(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(&mut App, Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: Event| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                handler(app, evt);
            }
        });
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.frame(ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(closure) = cb.borrow().as_ref() {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}
