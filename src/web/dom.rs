//! Page chrome: HUD fields and control buttons. Elements are looked up by id and
//! created on the fly when the host page does not provide them.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlSelectElement};

use crate::config::GroupSize;
use crate::hud::HudSnapshot;

const PANEL_ID: &str = "pr-panel";

pub struct Hud {
    removed_text: HtmlElement,
    removed_pct: HtmlElement,
    removed_bar: HtmlElement,
    levels_text: HtmlElement,
    levels_bar: HtmlElement,
    level_badge: HtmlElement,
    level_hint: HtmlElement,
    count_badge: HtmlElement,
    spawn_badge: HtmlElement,
}

impl Hud {
    pub fn ensure(doc: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            removed_text: ensure_element(doc, "removedText", "span")?,
            removed_pct: ensure_element(doc, "removedPct", "span")?,
            removed_bar: ensure_bar(doc, "removedBar")?,
            levels_text: ensure_element(doc, "levelsText", "span")?,
            levels_bar: ensure_bar(doc, "levelsBar")?,
            level_badge: ensure_element(doc, "levelBadge", "span")?,
            level_hint: ensure_element(doc, "levelHint", "span")?,
            count_badge: ensure_element(doc, "countBadge", "span")?,
            spawn_badge: ensure_element(doc, "spawnBadge", "span")?,
        })
    }

    pub fn apply(&self, hud: &HudSnapshot) {
        self.removed_text.set_text_content(Some(&hud.removed_text));
        self.removed_pct.set_text_content(Some(&format!("{}%", hud.removed_pct)));
        set_width(&self.removed_bar, hud.removed_pct);
        self.levels_text.set_text_content(Some(&hud.levels_text));
        self.level_badge.set_text_content(Some(&hud.level_badge));
        set_width(&self.levels_bar, hud.levels_pct);
        self.level_hint.set_text_content(Some(&hud.level_hint));
        self.count_badge.set_text_content(Some(&hud.on_screen));
        self.spawn_badge.set_text_content(Some(&hud.spawned));
    }
}

pub struct Controls {
    pub pause: HtmlElement,
    pub restart: HtmlElement,
    pub music: HtmlElement,
    pub group_select: HtmlSelectElement,
}

impl Controls {
    pub fn ensure(doc: &Document, group_size: GroupSize) -> Result<Self, JsValue> {
        let controls = Self {
            pause: ensure_element(doc, "btnPause", "button")?,
            restart: ensure_element(doc, "btnRestart", "button")?,
            music: ensure_element(doc, "btnMusic", "button")?,
            group_select: ensure_group_select(doc)?,
        };
        controls.restart.set_text_content(Some("Restart"));
        controls.show_paused(false);
        controls.show_music(false);
        controls.group_select.set_value(&group_size.get().to_string());
        Ok(controls)
    }

    pub fn show_paused(&self, paused: bool) {
        self.pause.set_text_content(Some(if paused { "Resume" } else { "Pause" }));
    }

    pub fn show_music(&self, enabled: bool) {
        let label = if enabled { "Music: ON" } else { "Music: OFF" };
        self.music.set_text_content(Some(label));
    }
}

fn panel(doc: &Document) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(PANEL_ID) {
        return Ok(el.dyn_into()?);
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let div: HtmlElement = doc.create_element("div")?.dyn_into()?;
    div.set_id(PANEL_ID);
    div.set_attribute("style", "display:flex; flex-wrap:wrap; gap:8px 14px; align-items:center; margin:10px auto; max-width:960px; font-family:system-ui, sans-serif; font-size:14px; color:#e5e7eb;")?;
    body.append_child(&div)?;
    Ok(div)
}

fn ensure_element(doc: &Document, id: &str, tag: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el.dyn_into()?);
    }
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_id(id);
    panel(doc)?.append_child(&el)?;
    Ok(el)
}

// Bars are a fixed track with a fill whose width is the percentage.
fn ensure_bar(doc: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el.dyn_into()?);
    }
    let track: HtmlElement = doc.create_element("div")?.dyn_into()?;
    track.set_attribute("style", "width:120px; height:6px; background:rgba(255,255,255,0.12); border-radius:3px; overflow:hidden;")?;
    let fill: HtmlElement = doc.create_element("div")?.dyn_into()?;
    fill.set_id(id);
    fill.set_attribute("style", "width:0%; height:100%; background:linear-gradient(90deg,#7c3aed,#22d3ee);")?;
    track.append_child(&fill)?;
    panel(doc)?.append_child(&track)?;
    Ok(fill)
}

fn ensure_group_select(doc: &Document) -> Result<HtmlSelectElement, JsValue> {
    if let Some(el) = doc.get_element_by_id("groupSelect") {
        return Ok(el.dyn_into()?);
    }
    let select: HtmlSelectElement = doc.create_element("select")?.dyn_into()?;
    select.set_id("groupSelect");
    for size in GroupSize::ALL {
        let option = doc.create_element("option")?;
        let value = size.get().to_string();
        option.set_attribute("value", &value)?;
        option.set_text_content(Some(&value));
        select.append_child(&option)?;
    }
    panel(doc)?.append_child(&select)?;
    Ok(select)
}

fn set_width(el: &HtmlElement, pct: u32) {
    if let Err(e) = el.style().set_property("width", &format!("{pct}%")) {
        log::warn!("bar width not applied: {e:?}");
    }
}
