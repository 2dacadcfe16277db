//! The waiting-room page itself: DOM construction, the two interval timers,
//! and the render paths that keep the card and the danmaku rows current.
//!
//! All mutable view state lives in a thread-local slot for the lifetime of
//! the mount. The two `Interval` handles are owned by that state, so tearing
//! the view down (or replacing it with a fresh mount) cancels both timers on
//! every exit path.

use std::cell::RefCell;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement, window};

use crate::banner::BannerStore;
use crate::layout::{LAYOUT_ROWS, LayoutCache};
use crate::params::RoomParams;
use crate::progress::{MINUTE_TICK_MS, PROGRESS_TICK_MS, ProgressEngine};
use crate::rng::Rng;

/// Everything one mounted view owns.
struct RoomState {
    engine: ProgressEngine,
    banners: BannerStore,
    layout: LayoutCache,
    rng: Rng,
    // Held only so that dropping the state cancels them.
    _minute_timer: Interval,
    _progress_timer: Interval,
}

thread_local! {
    static ROOM_STATE: RefCell<Option<RoomState>> = RefCell::new(None);
}

pub(crate) fn mount() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let params = RoomParams::from_query(&win.location().search()?);

    doc.set_title("在线等待室");
    body.set_class_name("wr-body");
    ensure_styles(&doc, &body)?;
    build_page(&doc, &body, &params)?;
    install_submit_listener(&doc)?;

    let minute_timer = Interval::new(MINUTE_TICK_MS, || {
        ROOM_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.engine.minute_tick(&mut state.rng);
                if let Some(doc) = window().and_then(|w| w.document()) {
                    render_status(&doc, &state.engine);
                }
            }
        });
    });
    let progress_timer = Interval::new(PROGRESS_TICK_MS, || {
        ROOM_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.engine.progress_tick(&mut state.rng);
                if let Some(doc) = window().and_then(|w| w.document()) {
                    render_status(&doc, &state.engine);
                }
            }
        });
    });

    let state = RoomState {
        engine: ProgressEngine::new(&params),
        banners: BannerStore::new(),
        layout: LayoutCache::new(),
        rng: Rng::from_entropy(),
        _minute_timer: minute_timer,
        _progress_timer: progress_timer,
    };
    // Replacing a previous mount drops its state, cancelling its timers.
    ROOM_STATE.with(|cell| cell.replace(Some(state)));

    // First paint.
    ROOM_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            render_status(&doc, &state.engine);
            render_danmaku(&doc, state);
        }
    });

    web_sys::console::log_1(
        &format!(
            "waiting room: mounted ({} min, {} ahead)",
            params.wait_minutes, params.queue_count
        )
        .into(),
    );
    Ok(())
}

pub(crate) fn unmount() {
    let state = ROOM_STATE.with(|cell| cell.borrow_mut().take());
    if state.is_none() {
        return;
    }
    drop(state); // cancels both intervals
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(root) = doc.get_element_by_id("wr-root") {
            root.remove();
        }
    }
    web_sys::console::log_1(&"waiting room: unmounted, timers cancelled".into());
}

fn ensure_styles(doc: &Document, body: &HtmlElement) -> Result<(), JsValue> {
    if doc.get_element_by_id("wr-style").is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id("wr-style");
    style.set_text_content(Some(PAGE_CSS));
    body.append_child(&style)?;
    Ok(())
}

fn build_page(doc: &Document, body: &HtmlElement, params: &RoomParams) -> Result<(), JsValue> {
    if let Some(old) = doc.get_element_by_id("wr-root") {
        old.remove();
    }

    let root = doc.create_element("div")?;
    root.set_id("wr-root");

    // Decorative blurred blobs behind everything.
    let bg = doc.create_element("div")?;
    bg.set_id("wr-bg");
    bg.set_inner_html(concat!(
        "<div class='wr-blob' style='top:-160px;right:-160px;background:#bfdbfe;'></div>",
        "<div class='wr-blob' style='bottom:-160px;left:-160px;background:#e9d5ff;animation-delay:2s;'></div>",
        "<div class='wr-blob' style='top:160px;left:50%;background:#c7d2fe;animation-delay:4s;'></div>",
    ));
    root.append_child(&bg)?;

    // Danmaku rows scroll behind the card; contents are filled per layout pass.
    let layer = doc.create_element("div")?;
    layer.set_id("wr-danmaku-layer");
    for row in 0..LAYOUT_ROWS {
        let row_el = doc.create_element("div")?;
        row_el.set_id(&format!("wr-row-{row}"));
        row_el.set_class_name("wr-row");
        layer.append_child(&row_el)?;
    }
    root.append_child(&layer)?;

    // Configuration echo, shown only when the URL carried explicit values.
    let debug_panel = if params.supplied {
        format!(
            "<div id='wr-debug'>📋 当前配置：等待时间 {} 分钟，前方 {} 位访客</div>",
            params.wait_minutes,
            group_digits(params.queue_count)
        )
    } else {
        String::new()
    };

    let card = doc.create_element("div")?;
    card.set_id("wr-card");
    card.set_inner_html(&format!(
        concat!(
            "<div id='wr-spinner'>",
            "<div class='wr-ring wr-ring-track'></div>",
            "<div class='wr-ring wr-ring-outer'></div>",
            "<div class='wr-ring wr-ring-track-inner'></div>",
            "<div class='wr-ring wr-ring-inner'></div>",
            "<div id='wr-core'>📶</div>",
            "</div>",
            "<h1 id='wr-title'>访客过多，请稍候</h1>",
            "<p id='wr-subtitle'>您正在访问的网站当前访客过多，您已被转接进入等待室，请耐心等待</p>",
            "<div id='wr-wait-box'>",
            "<div class='wr-label'>⏱ 预计等待时间</div>",
            "<div id='wr-wait'>{} 分钟</div>",
            "</div>",
            "<div id='wr-progress-box'>",
            "<div class='wr-progress-head'><span>处理进度</span><span id='wr-progress-pct'>0%</span></div>",
            "<div class='wr-bar-outer'><div id='wr-bar' class='wr-bar-inner' style='width:0%'></div></div>",
            "</div>",
            "<div id='wr-queue'>您前面还有 {} 位访客</div>",
            "<div id='wr-status'><span class='wr-dot'></span>系统正在为您分配资源...</div>",
            "<div id='wr-send-box'>",
            "<div class='wr-label'>💬 发送弹幕与其他用户互动</div>",
            "<form id='wr-form'>",
            "<input id='wr-input' type='text' maxlength='50' placeholder='输入弹幕内容...' autocomplete='off'>",
            "<button id='wr-send' type='submit'>发送</button>",
            "</form>",
            "</div>",
            "<div id='wr-tip'>💡 小贴士：请保持此页面打开，系统会自动为您跳转</div>",
            "{}",
        ),
        params.wait_minutes,
        group_digits(params.queue_count),
        debug_panel,
    ));
    root.append_child(&card)?;

    body.append_child(&root)?;
    Ok(())
}

fn install_submit_listener(doc: &Document) -> Result<(), JsValue> {
    let form = doc
        .get_element_by_id("wr-form")
        .ok_or_else(|| JsValue::from_str("no danmaku form"))?;
    let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        // The page never navigates; the form is only an Enter-key surface.
        evt.prevent_default();
        let Some(doc) = window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = doc
            .get_element_by_id("wr-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let raw = input.value();
        ROOM_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if state.banners.submit(&raw, &mut state.rng).is_some() {
                    input.set_value("");
                    render_danmaku(&doc, state);
                }
                // Rejected input is left in place, untouched.
            }
        });
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- Render paths ------------------------------------------------------------

fn render_status(doc: &Document, engine: &ProgressEngine) {
    if let Some(el) = doc.get_element_by_id("wr-wait") {
        el.set_text_content(Some(&format!("{} 分钟", engine.remaining_minutes())));
    }
    if let Some(el) = doc.get_element_by_id("wr-progress-pct") {
        el.set_text_content(Some(&format!(
            "{}%",
            engine.progress_percent().round() as u32
        )));
    }
    if let Some(el) = doc.get_element_by_id("wr-bar") {
        el.set_attribute("style", &format!("width:{:.1}%", engine.progress_percent()))
            .ok();
    }
    if let Some(el) = doc.get_element_by_id("wr-queue") {
        el.set_text_content(Some(&format!(
            "您前面还有 {} 位访客",
            group_digits(engine.queue_position())
        )));
    }
}

/// Rebuild the row contents from the (memoized) layout. Cheap when nothing
/// changed: the cache only reshuffles after a banner was appended.
fn render_danmaku(doc: &Document, state: &mut RoomState) {
    let rows = state.layout.rows(&state.banners, &mut state.rng);
    for (row, row_banners) in rows.iter().enumerate() {
        let Some(row_el) = doc.get_element_by_id(&format!("wr-row-{row}")) else {
            continue;
        };
        row_el.set_inner_html("");
        for item in row_banners {
            if let Ok(el) = doc.create_element("div") {
                el.set_class_name("wr-danmaku");
                el.set_attribute(
                    "style",
                    &format!(
                        "top:{:.2}%;color:{};animation-delay:{:.2}s;animation-duration:{:.2}s",
                        item.vertical_offset_pct, item.color, item.delay_s, item.duration_s
                    ),
                )
                .ok();
                el.set_attribute("data-key", &item.key).ok();
                el.set_text_content(Some(&item.text));
                row_el.append_child(&el).ok();
            }
        }
    }
}

/// 1234567 -> "1,234,567", the way the queue counter is displayed.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const PAGE_CSS: &str = "\
.wr-body{margin:0;height:100vh;overflow:hidden;font-family:system-ui,-apple-system,'PingFang SC','Microsoft YaHei',sans-serif;background:linear-gradient(135deg,#eff6ff,#eef2ff,#faf5ff);}\
#wr-root{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;padding:16px;}\
#wr-bg{position:absolute;inset:0;overflow:hidden;}\
.wr-blob{position:absolute;width:320px;height:320px;border-radius:50%;mix-blend-mode:multiply;filter:blur(24px);opacity:.7;animation:wr-pulse 4s ease-in-out infinite;}\
#wr-danmaku-layer{position:absolute;inset:0;overflow:hidden;pointer-events:none;display:flex;flex-direction:column;justify-content:center;padding:80px 0;}\
.wr-row{position:relative;height:64px;margin-bottom:8px;overflow:hidden;}\
.wr-danmaku{position:absolute;left:0;white-space:nowrap;font-size:14px;font-weight:500;opacity:.6;animation-name:wr-marquee;animation-timing-function:linear;animation-iteration-count:infinite;}\
#wr-card{position:relative;z-index:10;width:100%;max-width:28rem;background:rgba(255,255,255,.85);backdrop-filter:blur(12px);border-radius:14px;box-shadow:0 25px 50px -12px rgba(0,0,0,.25);padding:24px;text-align:center;}\
#wr-spinner{position:relative;width:112px;height:112px;margin:0 auto 24px;}\
.wr-ring{position:absolute;border-radius:50%;}\
.wr-ring-track{inset:0;border:4px solid #e5e7eb;}\
.wr-ring-outer{inset:0;border:4px solid transparent;border-top-color:#3b82f6;border-right-color:#a855f7;animation:wr-spin 1s linear infinite;}\
.wr-ring-track-inner{inset:12px;border:3px solid #f3f4f6;}\
.wr-ring-inner{inset:12px;border:3px solid transparent;border-top-color:#c084fc;border-left-color:#60a5fa;animation:wr-spin 1.5s linear infinite reverse;}\
#wr-core{position:absolute;inset:28px;border-radius:50%;background:linear-gradient(135deg,#3b82f6,#9333ea);display:flex;align-items:center;justify-content:center;color:#fff;font-size:22px;animation:wr-pulse 2s ease-in-out infinite;}\
#wr-title{font-size:20px;font-weight:700;color:#1f2937;margin:0 0 8px;}\
#wr-subtitle{font-size:13px;color:#4b5563;line-height:1.6;margin:0 0 16px;}\
#wr-wait-box{background:linear-gradient(90deg,#eff6ff,#faf5ff);border-radius:10px;padding:12px;margin-bottom:14px;}\
.wr-label{font-size:12px;font-weight:500;color:#374151;margin-bottom:6px;}\
#wr-wait{font-size:26px;font-weight:700;background:linear-gradient(90deg,#2563eb,#9333ea);-webkit-background-clip:text;background-clip:text;color:transparent;animation:wr-pulse 2s ease-in-out infinite;}\
#wr-progress-box{margin-bottom:14px;}\
.wr-progress-head{display:flex;justify-content:space-between;font-size:12px;color:#4b5563;margin-bottom:6px;}\
.wr-bar-outer{height:8px;background:#e5e7eb;border-radius:9999px;overflow:hidden;}\
.wr-bar-inner{height:100%;background:linear-gradient(90deg,#3b82f6,#9333ea);border-radius:9999px;transition:width .5s ease;}\
#wr-queue{font-size:12px;color:#4b5563;margin-bottom:10px;}\
#wr-status{font-size:12px;color:#4b5563;margin-bottom:14px;}\
.wr-dot{display:inline-block;width:6px;height:6px;border-radius:50%;background:#22c55e;margin-right:6px;animation:wr-pulse 2s ease-in-out infinite;}\
#wr-form{display:flex;gap:8px;margin-top:6px;}\
#wr-input{flex:1;padding:6px 8px;font-size:12px;border:1px solid #e5e7eb;border-radius:6px;background:rgba(255,255,255,.9);}\
#wr-send{padding:6px 12px;font-size:12px;font-weight:500;color:#fff;background:linear-gradient(90deg,#3b82f6,#9333ea);border:0;border-radius:6px;cursor:pointer;}\
#wr-send:hover{filter:brightness(1.08);}\
#wr-tip{font-size:12px;color:#6b7280;background:rgba(249,250,251,.8);border-radius:10px;padding:8px;margin-top:14px;}\
#wr-debug{font-size:12px;color:#2563eb;background:rgba(239,246,255,.8);border:1px solid #bfdbfe;border-radius:10px;padding:8px;margin-top:10px;}\
@keyframes wr-spin{to{transform:rotate(360deg)}}\
@keyframes wr-pulse{0%,100%{opacity:1}50%{opacity:.55}}\
@keyframes wr-marquee{from{transform:translate(100vw,-50%)}to{transform:translate(-100%,-50%)}}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_digits_inserts_thousands_separators() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(100), "100");
        assert_eq!(group_digits(1247), "1,247");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }
}
