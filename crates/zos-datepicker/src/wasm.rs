//! Browser bindings
//!
//! - [`DatePickerHandle`]: the engine behind a JSON event/view interface
//! - [`DomWheelHost`]: finds the rendered wheels under the picker root
//! - [`ScrollGuardHandle`]: scroll containment for one scrollable element
//!
//! The JS side owns the render loop: it dispatches events, calls `tick`
//! from `requestAnimationFrame` with `performance.now()`, and re-renders
//! from `viewJson` when `takeChangesJson` reports changes. After a render
//! that may have replaced the wheel elements it calls `guardWheels`, which
//! guards each wheel and turns gestures that scroll it into drags. Gesture
//! times are `Event.timeStamp`, on the same clock as `performance.now()`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlElement, TouchEvent, TouchList, UiEvent,
    WheelEvent,
};

use crate::config::PickerConfig;
use crate::engine::{DatePicker, PickerEvent};
use crate::error::PickerError;
use crate::scroll::{
    Containment, GestureDecision, GestureHost, GestureKind, ListenerTarget, ScrollGesture,
    ScrollGuard, ScrollMetrics, TouchTracker,
};
use crate::types::Millis;
use crate::wheel::{RowMetrics, WheelHost, WheelKey, WheelSurface};

/// Receives the decision on every scrolling gesture a guard's listeners see
type GestureSink = Rc<dyn Fn(GestureDecision, Millis)>;

fn to_js(err: PickerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Local wall-clock reading of a JS timestamp, truncated to the minute
fn naive_from_millis(ms: f64) -> Option<NaiveDateTime> {
    let d = js_sys::Date::new(&JsValue::from_f64(ms));
    NaiveDate::from_ymd_opt(d.get_full_year() as i32, d.get_month() + 1, d.get_date())
        .and_then(|date| date.and_hms_opt(d.get_hours(), d.get_minutes(), 0))
}

fn parse_px(value: &str) -> f32 {
    value.trim().trim_end_matches("px").parse().unwrap_or(0.0)
}

// =============================================================================
// Wheels
// =============================================================================

/// A rendered wheel element whose children are the rows
pub struct DomWheel {
    element: HtmlElement,
}

impl DomWheel {
    fn row(&self, index: usize) -> Option<HtmlElement> {
        self.element
            .children()
            .item(index as u32)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl WheelSurface for DomWheel {
    fn scroll_top(&self) -> f32 {
        self.element.scroll_top() as f32
    }

    fn set_scroll_top(&mut self, value: f32) {
        self.element.set_scroll_top(value.round() as i32);
    }

    fn row_count(&self) -> usize {
        self.element.children().length() as usize
    }

    fn row_metrics(&self) -> Option<RowMetrics> {
        let first = self
            .element
            .query_selector("div")
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let style = web_sys::window()?.get_computed_style(&first).ok().flatten()?;
        let margin = |name: &str| {
            style
                .get_property_value(name)
                .map(|v| parse_px(&v))
                .unwrap_or(0.0)
        };
        Some(RowMetrics::new(
            first.offset_height() as f32,
            margin("margin-top"),
            margin("margin-bottom"),
        ))
    }

    fn row_offset_top(&self, index: usize) -> Option<f32> {
        self.row(index).map(|row| row.offset_top() as f32)
    }

    fn row_label(&self, index: usize) -> Option<String> {
        self.row(index).and_then(|row| row.text_content())
    }
}

/// Looks wheels up under the picker root on every request
pub struct DomWheelHost {
    root: HtmlElement,
    current: Option<DomWheel>,
}

impl DomWheelHost {
    pub fn new(root: HtmlElement) -> Self {
        Self {
            root,
            current: None,
        }
    }

    /// The rendered element of a wheel, if it is on screen
    fn element(&self, key: WheelKey) -> Option<HtmlElement> {
        self.root
            .query_selector(key.selector())
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl WheelHost for DomWheelHost {
    fn wheel(&mut self, key: WheelKey) -> Option<&mut dyn WheelSurface> {
        let element = self.element(key)?;
        self.current = Some(DomWheel { element });
        self.current
            .as_mut()
            .map(|wheel| wheel as &mut dyn WheelSurface)
    }
}

// =============================================================================
// Picker
// =============================================================================

/// Date picker bound to a rendered root element
#[wasm_bindgen]
pub struct DatePickerHandle {
    picker: Rc<RefCell<DatePicker>>,
    wheels: DomWheelHost,
    guards: HashMap<WheelKey, ScrollGuardHandle>,
}

#[wasm_bindgen]
impl DatePickerHandle {
    /// Create a picker. `config_json` uses the camelCase config keys;
    /// `date_ms` is a JS timestamp, defaulting to now.
    #[wasm_bindgen(constructor)]
    pub fn new(
        root: HtmlElement,
        config_json: &str,
        date_ms: Option<f64>,
    ) -> Result<DatePickerHandle, JsValue> {
        let config = PickerConfig::from_json(config_json).map_err(to_js)?;
        let date = date_ms.and_then(naive_from_millis);
        let picker = DatePicker::new(config, date).map_err(to_js)?;
        Ok(Self {
            picker: Rc::new(RefCell::new(picker)),
            wheels: DomWheelHost::new(root),
            guards: HashMap::new(),
        })
    }

    /// Dispatch an event such as `{"event":"setYear","year":1999}`
    pub fn dispatch(&mut self, event_json: &str, now: f64) -> Result<(), JsValue> {
        let event = PickerEvent::from_json(event_json).map_err(to_js)?;
        self.picker.borrow_mut().dispatch(event, now);
        Ok(())
    }

    /// Replace the bound date; `undefined` clears it
    #[wasm_bindgen(js_name = setDate)]
    pub fn set_date(&mut self, date_ms: Option<f64>, now: f64) {
        self.picker
            .borrow_mut()
            .set_date(date_ms.and_then(naive_from_millis), now);
    }

    /// Advance timers and wheel animations
    pub fn tick(&mut self, now: f64) {
        self.picker.borrow_mut().tick(now, &mut self.wheels);
    }

    /// Guard every rendered wheel, routing the gestures that scroll it into
    /// the picker as drags. Wheels that are gone lose their guard.
    #[wasm_bindgen(js_name = guardWheels)]
    pub fn guard_wheels(&mut self) {
        for key in WheelKey::ALL {
            match self.wheels.element(key) {
                Some(element) if self.guards.get(&key).is_some_and(|g| g.element == element) => {}
                Some(element) => {
                    let guard = ScrollGuardHandle::attach(element, Some(self.gesture_sink(key)));
                    self.guards.insert(key, guard);
                }
                None => {
                    self.guards.remove(&key);
                }
            }
        }
    }

    #[wasm_bindgen(js_name = isIdle)]
    pub fn is_idle(&self) -> bool {
        self.picker.borrow().is_idle()
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        self.picker.borrow().view().to_json().map_err(to_js)
    }

    /// Changed state paths since the last call, as a JSON array
    #[wasm_bindgen(js_name = takeChangesJson)]
    pub fn take_changes_json(&mut self) -> Result<String, JsValue> {
        let changes = self.picker.borrow_mut().take_changes();
        serde_json::to_string(&changes)
            .map_err(PickerError::from)
            .map_err(to_js)
    }
}

impl DatePickerHandle {
    fn gesture_sink(&self, wheel: WheelKey) -> GestureSink {
        let picker = Rc::downgrade(&self.picker);
        Rc::new(move |decision: GestureDecision, now: Millis| {
            let Some(picker) = picker.upgrade() else {
                return;
            };
            match picker.try_borrow_mut() {
                Ok(mut picker) => picker.route_gesture(wheel, decision, now),
                Err(_) => debug!(%wheel, "picker busy; gesture dropped"),
            };
        })
    }
}

// =============================================================================
// Scroll containment
// =============================================================================

struct ElementMetrics<'a>(&'a HtmlElement);

impl ScrollMetrics for ElementMetrics<'_> {
    fn scroll_top(&self) -> f32 {
        self.0.scroll_top() as f32
    }

    fn scroll_height(&self) -> f32 {
        self.0.scroll_height() as f32
    }

    fn offset_height(&self) -> f32 {
        self.0.offset_height() as f32
    }
}

fn listener_target(target: ListenerTarget) -> Option<EventTarget> {
    let window = web_sys::window()?;
    match target {
        ListenerTarget::Window => Some(window.into()),
        ListenerTarget::Document => window.document().map(Into::into),
    }
}

fn first_touch_y(touches: &TouchList) -> Option<f32> {
    touches.get(0).map(|touch| touch.client_y() as f32)
}

/// Decode a gesture event; tracking-only events update `touch` and yield nothing
fn read_gesture(
    kind: GestureKind,
    event: &Event,
    touch: &RefCell<TouchTracker>,
) -> Option<ScrollGesture> {
    match kind {
        GestureKind::Wheel => event.dyn_ref::<WheelEvent>().map(|e| ScrollGesture::Wheel {
            delta_y: e.delta_y() as f32,
        }),
        GestureKind::MouseWheel => {
            js_sys::Reflect::get(event.as_ref(), &JsValue::from_str("wheelDelta"))
                .ok()
                .and_then(|v| v.as_f64())
                .map(|wheel_delta| ScrollGesture::MouseWheel {
                    wheel_delta: wheel_delta as f32,
                })
        }
        GestureKind::DomMouseScroll => {
            event
                .dyn_ref::<UiEvent>()
                .map(|e| ScrollGesture::DomMouseScroll {
                    detail: e.detail() as f32,
                })
        }
        GestureKind::TouchStart => {
            let y = event.dyn_ref::<TouchEvent>().and_then(|e| first_touch_y(&e.touches()));
            if let Some(y) = y {
                touch.borrow_mut().start(y);
            }
            None
        }
        GestureKind::TouchMove => {
            let y = first_touch_y(&event.dyn_ref::<TouchEvent>()?.touches())?;
            touch.borrow_mut().move_to(y)
        }
        GestureKind::TouchEnd => {
            let remaining = event.dyn_ref::<TouchEvent>().and_then(|e| first_touch_y(&e.touches()));
            touch.borrow_mut().end(remaining);
            None
        }
    }
}

/// Global gesture listeners for one guarded element
pub struct DomGestureHost {
    element: HtmlElement,
    touch: Rc<RefCell<TouchTracker>>,
    sink: Option<GestureSink>,
    listeners: HashMap<(ListenerTarget, GestureKind), Closure<dyn FnMut(Event)>>,
}

impl DomGestureHost {
    pub fn new(element: HtmlElement) -> Self {
        Self::with_sink(element, None)
    }

    fn with_sink(element: HtmlElement, sink: Option<GestureSink>) -> Self {
        Self {
            element,
            touch: Rc::new(RefCell::new(TouchTracker::new())),
            sink,
            listeners: HashMap::new(),
        }
    }
}

impl GestureHost for DomGestureHost {
    fn add_listener(
        &mut self,
        target: ListenerTarget,
        kind: GestureKind,
        containment: Containment,
    ) {
        self.remove_listener(target, kind);
        let Some(event_target) = listener_target(target) else {
            return;
        };

        let element = self.element.clone();
        let touch = self.touch.clone();
        let sink = self.sink.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(gesture) = read_gesture(kind, &event, &touch) else {
                return;
            };
            let decision = containment.decide(element.scroll_top() as f32, &gesture);
            if decision.is_contained() {
                event.prevent_default();
            }
            if let Some(sink) = &sink {
                sink(decision, event.time_stamp());
            }
        }) as Box<dyn FnMut(Event)>);

        // Must not be passive: containment calls preventDefault
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        event_target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.event_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok();
        self.listeners.insert((target, kind), closure);
    }

    fn remove_listener(&mut self, target: ListenerTarget, kind: GestureKind) {
        let Some(closure) = self.listeners.remove(&(target, kind)) else {
            return;
        };
        if let Some(event_target) = listener_target(target) {
            event_target
                .remove_event_listener_with_callback(
                    kind.event_name(),
                    closure.as_ref().unchecked_ref(),
                )
                .ok();
        }
        self.touch.borrow_mut().reset();
    }
}

/// Keeps an element's scroll gestures from chaining to the page
#[wasm_bindgen]
pub struct ScrollGuardHandle {
    element: HtmlElement,
    guard: Rc<RefCell<ScrollGuard<DomGestureHost>>>,
    enter: Closure<dyn FnMut(Event)>,
    leave: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl ScrollGuardHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement) -> ScrollGuardHandle {
        Self::attach(element, None)
    }

    /// Remove every listener this guard installed
    pub fn teardown(self) {}

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.guard.borrow().is_active()
    }
}

impl ScrollGuardHandle {
    fn attach(element: HtmlElement, sink: Option<GestureSink>) -> Self {
        let host = DomGestureHost::with_sink(element.clone(), sink);
        let guard = Rc::new(RefCell::new(ScrollGuard::new(host)));

        let enter = {
            let guard = guard.clone();
            let element = element.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                guard.borrow_mut().pointer_enter(&ElementMetrics(&element));
            }) as Box<dyn FnMut(Event)>)
        };
        let leave = {
            let guard = guard.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                guard.borrow_mut().pointer_leave();
            }) as Box<dyn FnMut(Event)>)
        };

        element
            .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())
            .ok();
        element
            .add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())
            .ok();

        Self {
            element,
            guard,
            enter,
            leave,
        }
    }
}

impl Drop for ScrollGuardHandle {
    fn drop(&mut self) {
        self.element
            .remove_event_listener_with_callback("mouseenter", self.enter.as_ref().unchecked_ref())
            .ok();
        self.element
            .remove_event_listener_with_callback("mouseleave", self.leave.as_ref().unchecked_ref())
            .ok();
        self.guard.borrow_mut().pointer_leave();
    }
}
