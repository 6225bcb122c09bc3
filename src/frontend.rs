use gloo_console::{error, log, warn};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::{callback::Timeout, future::TimeoutFuture};
use js_sys::{Array, Date, Reflect};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Storage, Window,
};
use yew::prelude::*;

use crate::site::{
    contact::{
        ContactEffect, ContactFields, ContactFlow, DeliveryCredentials, DeliveryError, DeliveryPlan,
        FormSubmission, SubmitPhase, EMAILJS_SEND_URL,
    },
    counter::{CounterFrame, CounterSpec, COUNTER_INTERVAL_MS, COUNTER_SELECTOR, COUNTER_STEPS, COUNTER_THRESHOLD},
    effects::{
        magnetic_offset, parallax_offset, scroll_progress, CursorFollower, KeyboardMode, Point, Rect,
        HOVER_TARGET_SELECTOR, KEYBOARD_NAVIGATION_CLASS, MAGNETIC_SELECTOR, ORB_SELECTOR,
    },
    loading::{LoadingState, LOADING_DELAY_MS},
    nav::{active_section, anchor_action, link_is_active, navbar_scrolled, scroll_target, AnchorAction, SectionBounds},
    reveal::{RevealCoordinator, Visibility, REVEALED_CLASS, REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD},
    theme::{Theme, ThemeDisplay, ThemeState, ThemeStorage},
    toast::{Severity, Toast, ToastId, ToastStack},
};

const CREDENTIALS_ENDPOINT: &str = "/.netlify/functions/env";

fn now_ms() -> u64 {
    Date::now() as u64
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

struct LocalThemeStorage;

impl ThemeStorage for LocalThemeStorage {
    fn read(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

struct DocumentThemeDisplay;

impl ThemeDisplay for DocumentThemeDisplay {
    fn reflect(&self, theme: Theme) {
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
        if let Ok(Some(icon)) = document.query_selector("#themeToggle i") {
            icon.set_class_name(theme.icon_class());
        }
    }
}

type PageTheme = ThemeState<LocalThemeStorage, DocumentThemeDisplay>;

fn media_matches(win: &Window, query: &str) -> bool {
    win.match_media(query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn scroll_y(win: &Window) -> f64 {
    win.scroll_y().unwrap_or(0.0)
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_body_overflow(value: &str) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        set_style(&body, "overflow", value);
    }
}

fn install_error_reporting() -> Vec<EventListener> {
    let Some(win) = window() else {
        return Vec::new();
    };

    vec![
        EventListener::new(&win, "error", |event| {
            let detail = Reflect::get(event, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
            error!("Global error:", detail);
        }),
        EventListener::new(&win, "unhandledrejection", |event| {
            let reason = Reflect::get(event, &JsValue::from_str("reason")).unwrap_or(JsValue::UNDEFINED);
            error!("Unhandled promise rejection:", reason);
        }),
    ]
}

async fn fetch_credentials() -> Option<DeliveryCredentials> {
    let response = Request::get(CREDENTIALS_ENDPOINT).send().await.ok()?;
    if !response.ok() {
        return None;
    }
    response.json::<DeliveryCredentials>().await.ok()
}

async fn deliver(credentials: &DeliveryCredentials, submission: &FormSubmission) -> Result<(), DeliveryError> {
    match credentials.plan(submission) {
        DeliveryPlan::Send(request) => {
            let response = Request::post(EMAILJS_SEND_URL)
                .json(&request)
                .map_err(|error| DeliveryError::Transport(error.to_string()))?
                .send()
                .await
                .map_err(|error| DeliveryError::Transport(error.to_string()))?;

            if response.ok() {
                Ok(())
            } else {
                Err(DeliveryError::Status(response.status()))
            }
        }
        DeliveryPlan::Simulate { delay_ms } => {
            log!(format!(
                "Form data (delivery not configured): {:?}",
                submission.template_params()
            ));
            warn!("Delivery credentials missing; simulating a successful send.");
            TimeoutFuture::new(delay_ms).await;
            Ok(())
        }
    }
}

struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn watch_once(
    document: &Document,
    selector: &str,
    threshold: f64,
    root_margin: Option<&str>,
    on_visible: impl Fn(&Element) + 'static,
) -> Option<VisibilityWatch> {
    let elements = query_all(document, selector);
    if elements.is_empty() {
        return None;
    }

    let mut coordinator = RevealCoordinator::new(elements.len(), threshold);
    let targets = elements.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<Visibility> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let index = targets.iter().position(|element| *element == target)?;
                    Some(Visibility {
                        target: index,
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                })
                .collect();

            for index in coordinator.on_batch(&batch) {
                let element = &targets[index];
                on_visible(element);
                observer.unobserve(element);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    for element in &elements {
        observer.observe(element);
    }

    Some(VisibilityWatch {
        observer,
        _callback: callback,
    })
}

fn start_counter(element: Element) {
    let Some(spec) = element.text_content().as_deref().and_then(CounterSpec::parse) else {
        return;
    };
    let mut animation = spec.animate(COUNTER_STEPS);

    spawn_local(async move {
        loop {
            TimeoutFuture::new(COUNTER_INTERVAL_MS).await;
            let frame = animation.step();
            element.set_text_content(Some(frame.text()));
            if matches!(frame, CounterFrame::Done(_)) {
                break;
            }
        }
    });
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

#[derive(Default)]
struct PageBehaviors {
    listeners: Vec<EventListener>,
    watches: Vec<VisibilityWatch>,
    follower_frame: Option<FrameSlot>,
}

impl Drop for PageBehaviors {
    fn drop(&mut self) {
        if let Some(slot) = self.follower_frame.take() {
            slot.borrow_mut().take();
        }
    }
}

fn init_behaviors() -> PageBehaviors {
    let mut behaviors = PageBehaviors::default();
    let Some(win) = window() else {
        return behaviors;
    };
    let Some(document) = win.document() else {
        return behaviors;
    };

    init_navigation(&win, &document, &mut behaviors);
    behaviors.watches.extend(watch_once(
        &document,
        REVEAL_SELECTOR,
        REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
        |element| toggle_class(element, REVEALED_CLASS, true),
    ));
    init_custom_cursor(&win, &document, &mut behaviors);
    init_parallax(&win, &document, &mut behaviors);
    init_smooth_scroll(&win, &document, &mut behaviors);
    init_scroll_progress(&win, &document, &mut behaviors);
    behaviors.watches.extend(watch_once(
        &document,
        COUNTER_SELECTOR,
        COUNTER_THRESHOLD,
        None,
        |element| start_counter(element.clone()),
    ));
    init_magnetic(&document, &mut behaviors);
    init_keyboard_navigation(&document, &mut behaviors);

    behaviors
}

fn init_navigation(win: &Window, document: &Document, behaviors: &mut PageBehaviors) {
    let navbar = document.get_element_by_id("navbar");
    let sections = query_all_html(document, "section[id]");
    let links = query_all(document, ".nav-link");

    let update = move |scroll_y: f64| {
        if let Some(navbar) = navbar.as_ref() {
            toggle_class(navbar, "scrolled", navbar_scrolled(scroll_y));
        }

        let bounds: Vec<SectionBounds> = sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                offset_top: f64::from(section.offset_top()),
                height: f64::from(section.client_height()),
            })
            .collect();
        let active = active_section(scroll_y, &bounds);

        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            toggle_class(link, "active", link_is_active(&href, active));
        }
    };

    update(scroll_y(win));
    let scroll_win = win.clone();
    behaviors
        .listeners
        .push(EventListener::new(win, "scroll", move |_| update(scroll_y(&scroll_win))));
}

fn animate_follower(element: HtmlElement, pointer: Rc<Cell<Point>>, mut follower: CursorFollower, slot: FrameSlot) {
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |_| {
        follower.step(pointer.get());
        let origin = follower.origin();
        set_style(&element, "left", &format!("{}px", origin.x));
        set_style(&element, "top", &format!("{}px", origin.y));
        animate_follower(element, pointer, follower, next_slot);
    });
    *slot.borrow_mut() = Some(frame);
}

fn init_custom_cursor(win: &Window, document: &Document, behaviors: &mut PageBehaviors) {
    let (Some(cursor), Some(follower)) = (
        html_element_by_id(document, "cursor"),
        html_element_by_id(document, "cursorFollower"),
    ) else {
        return;
    };

    if !media_matches(win, "(pointer: fine)") {
        return;
    }

    let pointer = Rc::new(Cell::new(Point::default()));

    {
        let pointer = pointer.clone();
        let cursor = cursor.clone();
        let follower = follower.clone();
        behaviors.listeners.push(EventListener::new(document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let position = Point {
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            };
            pointer.set(position);

            toggle_class(&cursor, "active", true);
            toggle_class(&follower, "active", true);
            set_style(&cursor, "left", &format!("{}px", position.x));
            set_style(&cursor, "top", &format!("{}px", position.y));
        }));
    }

    {
        let cursor = cursor.clone();
        let follower = follower.clone();
        behaviors.listeners.push(EventListener::new(document, "mouseleave", move |_| {
            toggle_class(&cursor, "active", false);
            toggle_class(&follower, "active", false);
        }));
    }

    for target in query_all(document, HOVER_TARGET_SELECTOR) {
        let entering = follower.clone();
        behaviors.listeners.push(EventListener::new(&target, "mouseenter", move |_| {
            toggle_class(&entering, "hover", true);
        }));
        let leaving = follower.clone();
        behaviors.listeners.push(EventListener::new(&target, "mouseleave", move |_| {
            toggle_class(&leaving, "hover", false);
        }));
    }

    let slot: FrameSlot = Rc::new(RefCell::new(None));
    animate_follower(follower, pointer, CursorFollower::default(), slot.clone());
    behaviors.follower_frame = Some(slot);
}

fn init_parallax(win: &Window, document: &Document, behaviors: &mut PageBehaviors) {
    let orbs = query_all_html(document, ORB_SELECTOR);
    if orbs.is_empty() {
        return;
    }

    let scroll_win = win.clone();
    behaviors.listeners.push(EventListener::new(win, "scroll", move |_| {
        let scrolled = scroll_y(&scroll_win);
        for (index, orb) in orbs.iter().enumerate() {
            set_style(orb, "transform", &format!("translateY({}px)", parallax_offset(scrolled, index)));
        }
    }));
}

fn init_smooth_scroll(win: &Window, document: &Document, behaviors: &mut PageBehaviors) {
    for link in query_all(document, "a[href^=\"#\"]") {
        let clicked = link.clone();
        let scroll_document = document.clone();
        let scroll_win = win.clone();

        behaviors.listeners.push(EventListener::new_with_options(
            &link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let href = clicked.get_attribute("href").unwrap_or_default();
                match anchor_action(&href) {
                    AnchorAction::Suppress => event.prevent_default(),
                    AnchorAction::ScrollTo { id } => {
                        let Some(section) = html_element_by_id(&scroll_document, id) else {
                            return;
                        };
                        event.prevent_default();

                        let options = ScrollToOptions::new();
                        options.set_top(scroll_target(f64::from(section.offset_top())));
                        options.set_behavior(ScrollBehavior::Smooth);
                        scroll_win.scroll_to_with_scroll_to_options(&options);
                    }
                    AnchorAction::Follow => {}
                }
            },
        ));
    }
}

fn init_scroll_progress(win: &Window, document: &Document, behaviors: &mut PageBehaviors) {
    let Some(bar) = html_element_by_id(document, "scrollProgress") else {
        return;
    };

    let scroll_win = win.clone();
    let scroll_document = document.clone();
    behaviors.listeners.push(EventListener::new(win, "scroll", move |_| {
        let document_height = scroll_document
            .body()
            .map(|body| f64::from(body.scroll_height()))
            .unwrap_or(0.0);
        let viewport_height = scroll_win
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);

        let percent = scroll_progress(scroll_y(&scroll_win), document_height, viewport_height);
        set_style(&bar, "width", &format!("{percent}%"));
    }));
}

fn init_magnetic(document: &Document, behaviors: &mut PageBehaviors) {
    for element in query_all_html(document, MAGNETIC_SELECTOR) {
        let moving = element.clone();
        behaviors.listeners.push(EventListener::new(&element, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = moving.get_bounding_client_rect();
            let offset = magnetic_offset(
                Point {
                    x: f64::from(event.client_x()),
                    y: f64::from(event.client_y()),
                },
                Rect {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                },
            );
            set_style(&moving, "transform", &format!("translate({}px, {}px)", offset.x, offset.y));
        }));

        let leaving = element.clone();
        behaviors.listeners.push(EventListener::new(&element, "mouseleave", move |_| {
            set_style(&leaving, "transform", "translate(0, 0)");
        }));
    }
}

fn init_keyboard_navigation(document: &Document, behaviors: &mut PageBehaviors) {
    let Some(body) = document.body() else {
        return;
    };
    let mode = Rc::new(Cell::new(KeyboardMode::default()));

    {
        let mode = mode.clone();
        let body = body.clone();
        behaviors.listeners.push(EventListener::new(document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut current = mode.get();
            if current.on_key(&event.key()) {
                toggle_class(&body, KEYBOARD_NAVIGATION_CLASS, true);
            }
            mode.set(current);
        }));
    }

    behaviors.listeners.push(EventListener::new(document, "mousedown", move |_| {
        let mut current = mode.get();
        if current.on_pointer_down() {
            toggle_class(&body, KEYBOARD_NAVIGATION_CLASS, false);
        }
        mode.set(current);
    }));
}

enum ToastAction {
    Show { message: String, severity: Severity, now: u64 },
    Settle(ToastId),
    Dismiss { id: ToastId, now: u64 },
    Advance(u64),
}

impl Reducible for ToastStack {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Show { message, severity, now } => {
                next.show(message, severity, now);
            }
            ToastAction::Settle(id) => next.settle(id),
            ToastAction::Dismiss { id, now } => {
                next.dismiss(id, now);
            }
            ToastAction::Advance(now) => {
                next.advance(now);
            }
        }
        next.into()
    }
}

#[derive(Properties, PartialEq)]
struct ToastViewProps {
    toast: Toast,
    on_dismiss: Callback<ToastId>,
    on_settle: Callback<ToastId>,
}

#[function_component(ToastView)]
fn toast_view(props: &ToastViewProps) -> Html {
    {
        let on_settle = props.on_settle.clone();
        use_effect_with(props.toast.id, move |id| {
            let id = *id;
            let frame = request_animation_frame(move |_| on_settle.emit(id));
            move || drop(frame)
        });
    }

    let onclick = {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    let toast = &props.toast;
    let style = toast.style();

    html! {
        <div class={toast.class()} role="alert" aria-live="polite" style={style} onclick={onclick}>
            <div class="notification-content">
                <i class={toast.severity.icon_class()} aria-hidden="true"></i>
                <span>{toast.message.clone()}</span>
            </div>
        </div>
    }
}

#[derive(Clone)]
struct ContactHandles {
    fields: UseStateHandle<ContactFields>,
    flow: Rc<RefCell<ContactFlow>>,
    phase: UseStateHandle<SubmitPhase>,
    reset_timer: Rc<RefCell<Option<Timeout>>>,
    credentials: DeliveryCredentials,
    on_notify: Callback<(String, Severity)>,
}

impl ContactHandles {
    fn sync_phase(&self) {
        self.phase.set(self.flow.borrow().phase());
    }

    fn apply(&self, effects: Vec<ContactEffect>) {
        for effect in effects {
            match effect {
                ContactEffect::Notify { message, severity } => {
                    self.on_notify.emit((message.to_string(), severity));
                }
                ContactEffect::Deliver(submission) => {
                    let handles = self.clone();
                    spawn_local(async move {
                        let outcome = deliver(&handles.credentials, &submission).await;
                        let effects = handles.flow.borrow_mut().delivered(outcome);
                        handles.sync_phase();
                        handles.apply(effects);
                    });
                }
                ContactEffect::ClearFields => self.fields.set(ContactFields::default()),
                ContactEffect::LogFailure(message) => {
                    error!(format!("Form submission error: {message}"));
                }
                ContactEffect::ScheduleReset { after_ms, token } => {
                    let flow = self.flow.clone();
                    let phase = self.phase.clone();
                    let timer = Timeout::new(after_ms, move || {
                        flow.borrow_mut().reset(token);
                        phase.set(flow.borrow().phase());
                    });
                    *self.reset_timer.borrow_mut() = Some(timer);
                }
            }
        }
    }
}

fn field_value(event: &InputEvent) -> String {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .or_else(|| event.target_dyn_into::<HtmlTextAreaElement>().map(|area| area.value()))
        .unwrap_or_default()
}

fn edit_field(fields: &UseStateHandle<ContactFields>, apply: fn(&mut ContactFields, String)) -> Callback<InputEvent> {
    let fields = fields.clone();
    Callback::from(move |event: InputEvent| {
        let mut next = (*fields).clone();
        apply(&mut next, field_value(&event));
        fields.set(next);
    })
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    credentials: DeliveryCredentials,
    on_notify: Callback<(String, Severity)>,
}

#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let fields = use_state(ContactFields::default);
    let flow = use_mut_ref(ContactFlow::default);
    let phase = use_state(SubmitPhase::default);
    let reset_timer = use_mut_ref(|| None::<Timeout>);

    let handles = ContactHandles {
        fields: fields.clone(),
        flow,
        phase: phase.clone(),
        reset_timer,
        credentials: props.credentials.clone(),
        on_notify: props.on_notify.clone(),
    };

    let onsubmit = Callback::from(move |event: SubmitEvent| {
        event.prevent_default();
        let effects = handles.flow.borrow_mut().submit(&handles.fields);
        handles.sync_phase();
        handles.apply(effects);
    });

    html! {
        <form id="contactForm" class="contact-form" novalidate=true onsubmit={onsubmit}>
            <div class="form-group">
                <label for="name">{"Name"}</label>
                <input id="name" name="name" type="text" required=true
                    value={fields.name.clone()}
                    oninput={edit_field(&fields, |fields, value| fields.name = value)} />
            </div>
            <div class="form-group">
                <label for="email">{"Email"}</label>
                <input id="email" name="email" type="email" required=true
                    value={fields.email.clone()}
                    oninput={edit_field(&fields, |fields, value| fields.email = value)} />
            </div>
            <div class="form-group">
                <label for="subject">{"Subject"}</label>
                <input id="subject" name="subject" type="text" required=true
                    value={fields.subject.clone()}
                    oninput={edit_field(&fields, |fields, value| fields.subject = value)} />
            </div>
            <div class="form-group">
                <label for="message">{"Message"}</label>
                <textarea id="message" name="message" rows="5" required=true
                    value={fields.message.clone()}
                    oninput={edit_field(&fields, |fields, value| fields.message = value)} />
            </div>
            <button type="submit" class="btn btn-primary form-submit" disabled={phase.disabled()}>
                <i class={phase.icon_class()} aria-hidden="true"></i>
                {" "}{phase.label()}
            </button>
        </form>
    }
}

fn stat(value: &'static str, label: &'static str) -> Html {
    html! {
        <div class="stat fade-in">
            <span class="stat-number">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

fn project(title: &'static str, description: &'static str, metric: &'static str, metric_label: &'static str) -> Html {
    html! {
        <article class="project-card fade-in">
            <h3>{title}</h3>
            <p>{description}</p>
            <div class="project-metric">
                <span class="metric-value">{metric}</span>
                <span class="metric-label">{metric_label}</span>
            </div>
        </article>
    }
}

#[function_component(App)]
fn app() -> Html {
    let theme_state = use_mut_ref(|| PageTheme::load(LocalThemeStorage, DocumentThemeDisplay));
    let theme = use_state(|| theme_state.borrow().get());
    let loading = use_state(LoadingState::default);
    let toasts = use_reducer(ToastStack::default);
    let credentials = use_state(DeliveryCredentials::default);

    {
        let theme_state = theme_state.clone();
        let loading = loading.clone();
        let credentials = credentials.clone();
        use_effect_with((), move |_| {
            theme_state.borrow().apply();
            let error_listeners = install_error_reporting();

            spawn_local(async move {
                match fetch_credentials().await {
                    Some(found) => {
                        log!(format!(
                            "Environment loaded: service {}, template {}, public key {}",
                            DeliveryCredentials::presence(&found.service_id),
                            DeliveryCredentials::presence(&found.template_id),
                            DeliveryCredentials::presence(&found.public_key),
                        ));
                        credentials.set(found);
                    }
                    None => warn!("Environment endpoint unavailable; contact form runs unconfigured."),
                }
            });

            let loading_timer = Timeout::new(LOADING_DELAY_MS, move || {
                let mut next = *loading;
                if next.finish() {
                    loading.set(next);
                }
            });

            move || {
                drop(loading_timer);
                drop(error_listeners);
            }
        });
    }

    use_effect_with(*loading, move |loading| {
        set_body_overflow(loading.body_overflow());
        let behaviors = (!loading.is_loading()).then(init_behaviors);
        move || drop(behaviors)
    });

    {
        let dispatcher = toasts.dispatcher();
        use_effect_with(toasts.next_deadline(), move |deadline| {
            let timer = deadline.map(|at| {
                let delay = at.saturating_sub(now_ms());
                Timeout::new(u32::try_from(delay).unwrap_or(u32::MAX), move || {
                    dispatcher.dispatch(ToastAction::Advance(now_ms().max(at)));
                })
            });
            move || drop(timer)
        });
    }

    let notify = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |(message, severity): (String, Severity)| {
            dispatcher.dispatch(ToastAction::Show {
                message,
                severity,
                now: now_ms(),
            });
        })
    };

    let on_dismiss = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: ToastId| dispatcher.dispatch(ToastAction::Dismiss { id, now: now_ms() }))
    };

    let on_settle = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id: ToastId| dispatcher.dispatch(ToastAction::Settle(id)))
    };

    let on_toggle = {
        let theme_state = theme_state.clone();
        let theme = theme.clone();
        let loading = *loading;
        Callback::from(move |_| {
            if !loading.accepts_input() {
                return;
            }
            let next = theme_state.borrow_mut().toggle();
            theme.set(next);
        })
    };

    html! {
        <>
            <div id="loading" class={loading.overlay_class()} aria-hidden={(!loading.is_loading()).to_string()}>
                <div class="loader"></div>
            </div>
            <div id="scrollProgress" class="scroll-progress"></div>
            <div id="cursor" class="cursor"></div>
            <div id="cursorFollower" class="cursor-follower"></div>
            <div class="background-orbs" aria-hidden="true">
                <span class="orb orb-1"></span>
                <span class="orb orb-2"></span>
                <span class="orb orb-3"></span>
            </div>

            <nav id="navbar" class="navbar">
                <a class="logo" href="#home">{"SK"}</a>
                <ul class="nav-links">
                    <li><a class="nav-link" href="#home">{"Home"}</a></li>
                    <li><a class="nav-link" href="#about">{"About"}</a></li>
                    <li><a class="nav-link" href="#skills">{"Skills"}</a></li>
                    <li><a class="nav-link" href="#projects">{"Projects"}</a></li>
                    <li><a class="nav-link" href="#contact">{"Contact"}</a></li>
                </ul>
                <button
                    id="themeToggle"
                    class="theme-toggle"
                    type="button"
                    aria-label={(*theme).toggle_label()}
                    onclick={on_toggle}
                >
                    <i class={(*theme).icon_class()} aria-hidden="true"></i>
                </button>
            </nav>

            <main id="content">
                <section id="home" class="hero">
                    <h1 class="fade-in">{"Building reliable software, end to end."}</h1>
                    <p class="fade-in">{"Full-stack engineer focused on fast, accessible web experiences."}</p>
                    <div class="hero-actions fade-in">
                        <a class="btn btn-primary" href="#projects">{"View Work"}</a>
                        <a class="btn btn-secondary" href="#contact">{"Get in Touch"}</a>
                    </div>
                    <div class="hero-stats">
                        {stat("50+", "Projects shipped")}
                        {stat("5+", "Years of experience")}
                        {stat("98%", "Client satisfaction")}
                    </div>
                </section>

                <section id="about" class="section">
                    <h2 class="section-title fade-in">{"About"}</h2>
                    <p class="slide-in-left">
                        {"I design and build web products from database schema to pixel, with a bias for simple systems that stay fast under load."}
                    </p>
                </section>

                <section id="skills" class="section">
                    <h2 class="section-title fade-in">{"Skills"}</h2>
                    <div class="skills-grid">
                        <div class="skill-card slide-in-left"><h3>{"Frontend"}</h3><p>{"TypeScript, Rust/WebAssembly, accessible UI"}</p></div>
                        <div class="skill-card fade-in"><h3>{"Backend"}</h3><p>{"Rust, Node.js, PostgreSQL, REST APIs"}</p></div>
                        <div class="skill-card slide-in-right"><h3>{"Delivery"}</h3><p>{"CI/CD, serverless deploys, observability"}</p></div>
                    </div>
                </section>

                <section id="projects" class="section">
                    <h2 class="section-title fade-in">{"Projects"}</h2>
                    <div class="projects-grid">
                        {project("Storefront Platform", "Headless commerce stack with edge rendering.", "10K+", "monthly orders")}
                        {project("Analytics Pipeline", "Event ingestion and dashboards for product teams.", "2M", "events per day")}
                        {project("Booking Engine", "Scheduling service with calendar sync.", "99%", "uptime")}
                    </div>
                </section>

                <section id="contact" class="section">
                    <h2 class="section-title fade-in">{"Contact"}</h2>
                    <div class="contact-grid">
                        <div class="contact-info slide-in-left">
                            <div class="contact-item"><i class="fas fa-envelope" aria-hidden="true"></i><span>{crate::site::contact::RECIPIENT_EMAIL}</span></div>
                            <div class="contact-item"><i class="fas fa-location-dot" aria-hidden="true"></i><span>{"Remote"}</span></div>
                        </div>
                        <div class="slide-in-right">
                            <ContactForm credentials={(*credentials).clone()} on_notify={notify} />
                        </div>
                    </div>
                </section>
            </main>

            <footer class="footer">
                <div class="social-links">
                    <a class="social-link" href="https://github.com" target="_blank" rel="noopener noreferrer" aria-label="GitHub"><i class="fab fa-github"></i></a>
                    <a class="social-link" href="https://www.linkedin.com" target="_blank" rel="noopener noreferrer" aria-label="LinkedIn"><i class="fab fa-linkedin"></i></a>
                </div>
            </footer>

            <div class="notification-stack">
                { for toasts.toasts().iter().map(|toast| html! {
                    <ToastView
                        key={toast.id.get()}
                        toast={toast.clone()}
                        on_dismiss={on_dismiss.clone()}
                        on_settle={on_settle.clone()}
                    />
                }) }
            </div>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
