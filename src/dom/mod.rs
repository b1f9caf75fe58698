//! Browser layer: DOM elements and event wiring for header rows.
//!
//! Everything platform-specific lives here: converting mouse, drag, and
//! touch events into pointer samples, building the cell elements, pinning
//! frozen cells with CSS transforms, and measuring scrollbars and rendered
//! widths from the live document. The core row logic stays platform-free.
//!
//! This module only compiles for `wasm32`; the library surface is the
//! [`GridHead`] export plus the conversion helpers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Function;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, Event, HtmlDivElement, HtmlElement, MouseEvent, TouchEvent};

use crate::header::{CellProbe, CellRender, HeaderRow, HeaderRowProps, ProbeId, ResizeCommit};
use crate::pointer::PointerInput;
use crate::scrollbar::ScrollbarSize;
use crate::types::{validate_columns, Column, HeaderRowKind, HeaderTheme};

/// Pointer sample from a mouse or drag event.
///
/// A zero `pageX` counts as missing: Firefox reports 0 on `dragend` when it
/// drops the coordinate, and the resize protocol's End fallback depends on
/// seeing that as "no coordinate".
pub fn pointer_from_mouse(event: &MouseEvent) -> PointerInput {
    let x = event.page_x();
    if x == 0 {
        PointerInput::missing()
    } else {
        PointerInput::from_page_x(x as f32)
    }
}

/// Pointer sample from a touch event.
///
/// `touchend` lists the lifted finger only under `changedTouches`, which is
/// why the sample carries both coordinates.
pub fn pointer_from_touch(event: &TouchEvent) -> PointerInput {
    let touches = event.touches();
    let first = touches.item(0).map(|touch| touch.page_x() as f32);
    let changed = event.changed_touches();
    let last = match changed.length() {
        0 => None,
        n => changed.item(n - 1).map(|touch| touch.page_x() as f32),
    };
    PointerInput::from_touches(first, last)
}

/// Scrollbar thickness measured from the live document.
///
/// Measures an off-screen `overflow: scroll` probe once and caches the
/// result; overlay scrollbars legitimately measure 0.
pub struct DomScrollbar {
    cached: Cell<Option<f32>>,
}

impl DomScrollbar {
    /// Unmeasured probe; the first `thickness` call measures.
    pub fn new() -> Self {
        Self {
            cached: Cell::new(None),
        }
    }

    fn measure() -> Option<f32> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let probe = create_div(&document)?;
        let style = probe.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("top", "-200px");
        let _ = style.set_property("left", "-200px");
        let _ = style.set_property("width", "50px");
        let _ = style.set_property("height", "50px");
        let _ = style.set_property("overflow", "scroll");
        body.append_child(&probe).ok()?;
        let thickness = (probe.offset_width() - probe.client_width()) as f32;
        let _ = body.remove_child(&probe);
        Some(thickness)
    }
}

impl Default for DomScrollbar {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollbarSize for DomScrollbar {
    fn thickness(&self) -> f32 {
        if let Some(cached) = self.cached.get() {
            return cached;
        }
        let measured = Self::measure().unwrap_or(0.0);
        self.cached.set(Some(measured));
        measured
    }
}

/// Measurement probe reading a mounted element's `offsetWidth`.
pub struct ElementProbe {
    element: HtmlElement,
}

impl ElementProbe {
    /// Probe over the given element.
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl CellProbe for ElementProbe {
    fn rendered_width(&self) -> Option<f32> {
        Some(self.element.offset_width() as f32)
    }
}

/// DOM handle for one mounted cell.
struct CellBinding {
    column_key: String,
    element: HtmlDivElement,
    value: HtmlDivElement,
    probe_id: Option<ProbeId>,
}

impl CellBinding {
    /// Push a render payload into the live element: classes, inline style,
    /// pinning transform, and content text.
    fn apply(&self, render: &CellRender) {
        let mut class = String::from("gridhead-cell");
        if render.frozen {
            class.push_str(" gridhead-cell--frozen");
        }
        if render.resizing {
            class.push_str(" gridhead-cell--resizing");
        }
        if render.drag_wrap {
            // Hook for the host's draggable-header wrapper; no behavior here.
            class.push_str(" gridhead-cell--draggable");
        }
        self.element.set_class_name(&class);

        let style = self.element.style();
        let _ = style.set_property("width", &px(render.style.width));
        let _ = style.set_property("left", &px(render.style.left));
        let _ = style.set_property("height", &px(render.style.height));
        let _ = style.set_property("background-color", &render.style.background_color);
        let _ = style.set_property("color", &render.style.text_color);

        let transform = match render.pinned_offset {
            Some(offset) => format!("translate3d({offset}px, 0px, 0px)"),
            None => "none".to_string(),
        };
        let _ = style.set_property("-webkit-transform", &transform);
        let _ = style.set_property("transform", &transform);

        self.value.set_text_content(Some(&render.content.text));
    }
}

/// Listener closures kept alive for the lifetime of the current cells.
///
/// Owned by [`GridHead`] rather than the shared state so the state holds no
/// reference cycle back to itself through the captured `Rc`s.
#[derive(Default)]
struct ClosureBag {
    drag: Vec<Closure<dyn FnMut(DragEvent)>>,
    mouse: Vec<Closure<dyn FnMut(MouseEvent)>>,
    touch: Vec<Closure<dyn FnMut(TouchEvent)>>,
    // Listens on the strip itself, which survives cell rebuilds.
    scroll: Option<Closure<dyn FnMut(Event)>>,
}

/// Shared state reachable from event handlers.
struct HeadState {
    row: HeaderRow,
    strip: HtmlDivElement,
    bindings: Vec<CellBinding>,
    on_resize: Option<Function>,
    on_scroll: Option<Function>,
    scrollbar: DomScrollbar,
    document: Document,
}

impl HeadState {
    /// Live rendered left edge of a cell element, in the same coordinate
    /// space as the drag pointer.
    fn cell_left_edge(&self, key: &str) -> Option<f32> {
        let binding = self
            .bindings
            .iter()
            .find(|binding| binding.column_key == key)?;
        Some(binding.element.get_bounding_client_rect().left() as f32)
    }
}

/// A header or footer row mounted into a host container element.
///
/// The host feeds columns and sizing in, receives `(position, width)`
/// commits out, and forwards body scroll via `set_scroll_left`.
#[wasm_bindgen]
pub struct GridHead {
    state: Rc<RefCell<HeadState>>,
    #[allow(dead_code)] // Kept to maintain DOM listener references
    closures: Rc<RefCell<ClosureBag>>,
}

#[wasm_bindgen]
impl GridHead {
    /// Mount a row for `columns` into `container`.
    ///
    /// `columns` is an array of column descriptors (camelCase keys);
    /// `row_kind` is `"header"`, `"filter"`, or `"summary"`, defaulting to
    /// `"header"`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        columns: JsValue,
        width: Option<f64>,
        height: f64,
        row_kind: Option<String>,
    ) -> Result<GridHead, JsValue> {
        console_error_panic_hook::set_once();

        let parsed: Vec<Column> = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        validate_columns(&parsed)?;

        let kind = match row_kind.as_deref() {
            None | Some("header") => HeaderRowKind::Header,
            Some("filter") => HeaderRowKind::Filter,
            Some("summary") => HeaderRowKind::Summary,
            Some(other) => {
                return Err(JsValue::from_str(&format!("unknown row kind: {other}")));
            }
        };

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let strip =
            create_div(&document).ok_or_else(|| JsValue::from_str("failed to create row strip"))?;
        strip.set_class_name("gridhead-row");
        let style = strip.style();
        let _ = style.set_property("position", "relative");
        let _ = style.set_property("overflow", "hidden");
        container
            .append_child(&strip)
            .map_err(|_| JsValue::from_str("failed to mount row strip"))?;

        let mut props = HeaderRowProps::new(parsed.into(), height as f32);
        props.width = width.map(|w| w as f32);
        props.row_kind = kind;

        let strip_handle = strip.clone();
        let state = Rc::new(RefCell::new(HeadState {
            row: HeaderRow::new(props),
            strip,
            bindings: Vec::new(),
            on_resize: None,
            on_scroll: None,
            scrollbar: DomScrollbar::new(),
            document,
        }));
        let closures = Rc::new(RefCell::new(ClosureBag::default()));

        // The strip's own scroll passthrough, for hosts whose CSS makes the
        // row independently scrollable.
        {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                let (callback, offset) = {
                    let s = state.borrow();
                    (s.on_scroll.clone(), s.strip.scroll_left())
                };
                if let Some(callback) = callback {
                    let _ = callback.call1(&JsValue::NULL, &JsValue::from(offset));
                }
            }) as Box<dyn FnMut(Event)>);
            strip_handle
                .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
                .ok();
            closures.borrow_mut().scroll = Some(closure);
        }

        Self::rebuild(&state, &closures);
        Ok(GridHead { state, closures })
    }

    /// Apply the next props; returns whether the row re-rendered.
    #[wasm_bindgen]
    pub fn update(
        &mut self,
        columns: JsValue,
        width: Option<f64>,
        height: f64,
        rows_count: u32,
        data_changed: bool,
    ) -> Result<bool, JsValue> {
        let parsed: Vec<Column> = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        validate_columns(&parsed)?;

        let changed = {
            let mut s = self.state.borrow_mut();
            let mut props = HeaderRowProps::new(parsed.into(), height as f32);
            props.width = width.map(|w| w as f32);
            props.rows_count = rows_count as usize;
            props.data_changed = data_changed;
            props.row_kind = s.row.props().row_kind;
            s.row.update(props)
        };
        if changed {
            Self::rebuild(&self.state, &self.closures);
        }
        Ok(changed)
    }

    /// Body scroll synchronization: pin frozen cells at `offset`, release
    /// the rest.
    #[wasm_bindgen]
    pub fn set_scroll_left(&mut self, offset: f64) {
        let mut s = self.state.borrow_mut();
        s.row.set_scroll_left(offset as f32);
        Self::refresh(&mut s);
    }

    /// Register the commit callback, invoked as `(position, width)` after
    /// every completed drag or auto-fit.
    #[wasm_bindgen]
    pub fn set_on_column_resize(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().on_resize = callback;
    }

    /// Register a passthrough for the strip's own scroll events, invoked
    /// with the strip's current `scrollLeft`.
    #[wasm_bindgen]
    pub fn set_on_scroll(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().on_scroll = callback;
    }

    /// Replace the theme (camelCase keys) and re-render.
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme: JsValue) -> Result<(), JsValue> {
        let theme: HeaderTheme = serde_wasm_bindgen::from_value(theme)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut s = self.state.borrow_mut();
        s.row.set_theme(theme);
        Self::refresh(&mut s);
        Ok(())
    }

    /// Auto-fit a column to its widest registered cell.
    #[wasm_bindgen]
    pub fn auto_fit(&mut self, column_key: &str) {
        Self::on_auto_fit(&self.state, column_key);
    }

    /// Register an external element (typically a body cell) for auto-fit
    /// measurement; returns an id for `unregister_measurement`.
    #[wasm_bindgen]
    pub fn register_measurement(&mut self, column_key: &str, element: HtmlElement) -> f64 {
        let mut s = self.state.borrow_mut();
        let id = s
            .row
            .registry_mut()
            .register(column_key, Box::new(ElementProbe::new(element)));
        id.to_raw() as f64
    }

    /// Drop a previously registered external measurement.
    #[wasm_bindgen]
    pub fn unregister_measurement(&mut self, column_key: &str, id: f64) {
        let mut s = self.state.borrow_mut();
        s.row
            .registry_mut()
            .unregister(column_key, ProbeId::from_raw(id as u64));
    }

    /// Inner cell-strip width including the scrollbar overhang, if the row
    /// has a fixed width.
    #[wasm_bindgen]
    pub fn strip_width(&self) -> Option<f64> {
        let s = self.state.borrow();
        s.row.strip_width(&s.scrollbar).map(f64::from)
    }

    /// Row width net of the vertical scrollbar.
    #[wasm_bindgen]
    pub fn effective_width(&self) -> f64 {
        let s = self.state.borrow();
        f64::from(s.row.effective_width(&s.scrollbar))
    }

    /// Total scrollable width the row currently renders.
    #[wasm_bindgen]
    pub fn total_width(&self) -> f64 {
        f64::from(self.state.borrow().row.effective_metrics().total_width)
    }
}

// Internal helpers shared between the export surface and event closures.
impl GridHead {
    fn on_drag_start(state: &Rc<RefCell<HeadState>>, key: &str) {
        let mut s = state.borrow_mut();
        s.row.cell_drag_start(key);
        Self::refresh(&mut s);
    }

    fn on_pointer_move(state: &Rc<RefCell<HeadState>>, key: &str, pointer: PointerInput) {
        let mut s = state.borrow_mut();
        let Some(edge) = s.cell_left_edge(key) else {
            return;
        };
        s.row.cell_drag_move(key, pointer, edge);
        Self::refresh(&mut s);
    }

    fn on_pointer_end(state: &Rc<RefCell<HeadState>>, key: &str, pointer: PointerInput) {
        let emitted = {
            let mut s = state.borrow_mut();
            let edge = s.cell_left_edge(key).unwrap_or(0.0);
            let commit = s.row.cell_drag_end(key, pointer, edge);
            Self::refresh(&mut s);
            commit.map(|commit| (s.on_resize.clone(), commit))
        };
        if let Some((Some(callback), commit)) = emitted {
            Self::emit_commit(&callback, commit);
        }
    }

    fn on_auto_fit(state: &Rc<RefCell<HeadState>>, key: &str) {
        let emitted = {
            let mut s = state.borrow_mut();
            let commit = s.row.auto_fit(key);
            Self::refresh(&mut s);
            commit.map(|commit| (s.on_resize.clone(), commit))
        };
        if let Some((Some(callback), commit)) = emitted {
            Self::emit_commit(&callback, commit);
        }
    }

    /// Callbacks run outside any state borrow; a handler that re-enters the
    /// bridge must not trip over our own RefCell.
    fn emit_commit(callback: &Function, commit: ResizeCommit) {
        let position = u32::try_from(commit.position).unwrap_or(u32::MAX);
        let _ = callback.call2(
            &JsValue::NULL,
            &JsValue::from(position),
            &JsValue::from_f64(f64::from(commit.width)),
        );
    }

    /// Push current render state into the existing elements.
    fn refresh(s: &mut HeadState) {
        let rendered = s.row.render();
        if rendered.cells.len() != s.bindings.len() {
            return;
        }
        for (binding, cell) in s.bindings.iter().zip(&rendered.cells) {
            binding.apply(cell);
        }
    }

    /// Tear down and rebuild the cell elements from the current row state.
    fn rebuild(state: &Rc<RefCell<HeadState>>, closures: &Rc<RefCell<ClosureBag>>) {
        let mut s = state.borrow_mut();
        let mut bag = closures.borrow_mut();
        bag.drag.clear();
        bag.mouse.clear();
        bag.touch.clear();

        let HeadState {
            row,
            strip,
            bindings,
            scrollbar,
            document,
            ..
        } = &mut *s;

        for binding in bindings.drain(..) {
            if let Some(id) = binding.probe_id {
                row.registry_mut().unregister(&binding.column_key, id);
            }
        }
        strip.set_inner_html("");

        let strip_style = strip.style();
        let _ = strip_style.set_property("height", &px(row.props().height));
        match row.strip_width(scrollbar) {
            Some(width) => {
                let _ = strip_style.set_property("width", &px(width));
            }
            None => {
                let _ = strip_style.set_property("width", "100%");
            }
        }

        let rendered = row.render();
        for cell in &rendered.cells {
            let Some(element) = create_div(document) else {
                continue;
            };
            let Some(value) = create_div(document) else {
                continue;
            };

            let style = element.style();
            let _ = style.set_property("display", "inline-block");
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("margin", "0");
            let _ = style.set_property("text-overflow", "ellipsis");
            let _ = style.set_property("white-space", "nowrap");
            let _ = style.set_property("overflow", "hidden");

            value.set_class_name("gridhead-cell__value");
            let _ = element.append_child(&value);

            if cell.resizable {
                if let Some(handle) = create_div(document) {
                    Self::wire_handle(state, &mut bag, &handle, cell);
                    let _ = element.append_child(&handle);
                }
            }

            let probe_id = row
                .registry_mut()
                .register(&cell.column_key, Box::new(ElementProbe::new(element.clone().into())));

            let binding = CellBinding {
                column_key: cell.column_key.clone(),
                element,
                value,
                probe_id: Some(probe_id),
            };
            binding.apply(cell);
            let _ = strip.append_child(&binding.element);
            bindings.push(binding);
        }
        debug!("mounted {} cells", bindings.len());
    }

    /// Attach the resize affordance and its listeners to one cell.
    fn wire_handle(
        state: &Rc<RefCell<HeadState>>,
        bag: &mut ClosureBag,
        handle: &HtmlDivElement,
        cell: &CellRender,
    ) {
        handle.set_class_name("gridhead-resize-handle");
        handle.set_draggable(true);
        let style = handle.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("right", "0");
        let _ = style.set_property("width", "6px");
        let _ = style.set_property("height", "100%");
        let _ = style.set_property("cursor", "col-resize");

        // Drag lifecycle (mouse).
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |event: DragEvent| {
                // Firefox refuses to start a drag without payload data.
                if let Some(transfer) = event.data_transfer() {
                    let _ = transfer.set_data("text/plain", "dummy");
                }
                Self::on_drag_start(&state, &key);
            }) as Box<dyn FnMut(DragEvent)>);
            handle
                .add_event_listener_with_callback("dragstart", closure.as_ref().unchecked_ref())
                .ok();
            bag.drag.push(closure);
        }
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |event: DragEvent| {
                Self::on_pointer_move(&state, &key, pointer_from_mouse(&event));
            }) as Box<dyn FnMut(DragEvent)>);
            handle
                .add_event_listener_with_callback("drag", closure.as_ref().unchecked_ref())
                .ok();
            bag.drag.push(closure);
        }
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |event: DragEvent| {
                Self::on_pointer_end(&state, &key, pointer_from_mouse(&event));
            }) as Box<dyn FnMut(DragEvent)>);
            handle
                .add_event_listener_with_callback("dragend", closure.as_ref().unchecked_ref())
                .ok();
            bag.drag.push(closure);
        }

        // Auto-fit on double-click.
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::on_auto_fit(&state, &key);
            }) as Box<dyn FnMut(MouseEvent)>);
            handle
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
                .ok();
            bag.mouse.push(closure);
        }

        // Touch lifecycle.
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |_event: TouchEvent| {
                Self::on_drag_start(&state, &key);
            }) as Box<dyn FnMut(TouchEvent)>);
            handle
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .ok();
            bag.touch.push(closure);
        }
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
                event.prevent_default();
                Self::on_pointer_move(&state, &key, pointer_from_touch(&event));
            }) as Box<dyn FnMut(TouchEvent)>);
            handle
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())
                .ok();
            bag.touch.push(closure);
        }
        {
            let state = Rc::clone(state);
            let key = cell.column_key.clone();
            let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
                Self::on_pointer_end(&state, &key, pointer_from_touch(&event));
            }) as Box<dyn FnMut(TouchEvent)>);
            handle
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())
                .ok();
            bag.touch.push(closure);
        }
    }
}

fn create_div(document: &Document) -> Option<HtmlDivElement> {
    document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlDivElement>().ok())
}

fn px(value: f32) -> String {
    format!("{value}px")
}
