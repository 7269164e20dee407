//! Browser front end for lexsearch, compiled to WASM. Binds the page once on
//! load and routes DOM events through the shared controllers.

/// Forward `tracing` output to the browser console
mod console;

/// The DOM implementation of the page bindings
mod dom;

use dom::{ids, DomPage};
use futures::future::{self, Either};
use lexsearch_core::{
    api::client::DEFAULT_TIMEOUT,
    page::ClickTarget,
    results::{self, SearchResult},
    Action, Client, Controller, Effect, ModalMode,
};
use std::{cell::RefCell, pin::pin, rc::Rc, time::Duration};
use tracing_subscriber::filter::LevelFilter;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

/// Everything event handlers share. Only ever touched from the main thread.
struct Shell {
    /// Modal and session controllers
    controller: RefCell<Controller>,

    /// What the controllers draw into
    page: RefCell<DomPage>,

    /// Talks to the backend this page came from
    client: Client,

    /// For request timeouts
    window: Window,
}

/// Entry point, run once the module loads.
///
/// ## Errors
///
/// Fails if there's no window or document to bind to.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Logging is best-effort; a second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_writer(console::Console)
        .without_time()
        .with_ansi(false)
        .with_max_level(LevelFilter::INFO)
        .try_init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if results::is_search_results_path(&window.location().pathname()?) {
        show_search_results(&window, &document)?;
    }

    let origin = window.location().origin()?;
    let client = Client::new(&origin, reqwest::Client::new())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let page = DomPage::bind(&window, &document);
    let shell = Rc::new(Shell {
        controller: RefCell::new(Controller::new()),
        page: RefCell::new(page),
        client,
        window,
    });

    wire_session(&shell, &document)?;
    wire_modal(&shell, &document)?;

    Ok(())
}

/// Run an action through the controllers and start whatever requests come
/// out of it.
fn dispatch(shell: &Rc<Shell>, action: Action) {
    let effects = shell
        .controller
        .borrow_mut()
        .handle(action, &mut *shell.page.borrow_mut());

    for effect in effects {
        let shell = Rc::clone(shell);

        spawn_local(async move {
            let action = run_with_timeout(&shell, effect, DEFAULT_TIMEOUT).await;
            dispatch(&shell, action);
        });
    }
}

/// Run an effect, giving up after `timeout`.
async fn run_with_timeout(shell: &Shell, effect: Effect, timeout: Duration) -> Action {
    let fallback = effect.clone();

    let request = pin!(effect.run(&shell.client));
    let timer = pin!(sleep(&shell.window, timeout));

    match future::select(request, timer).await {
        Either::Left((action, _)) => action,
        Either::Right(((), _)) => fallback.timed_out(),
    }
}

/// Resolve after `duration`, using the window's timer.
async fn sleep(window: &Window, duration: Duration) {
    let millis = timer_millis(duration);

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(err) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        {
            tracing::error!(?err, "couldn't set a timer");
        }
    });

    // The promise never rejects.
    let _ = JsFuture::from(promise).await;
}

/// `setTimeout` takes an `i32` of milliseconds. Longer waits are clamped.
fn timer_millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// Attach a handler for the lifetime of the page.
fn on(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

/// Attach a click handler that suppresses the default navigation and
/// dispatches an action, if the element exists.
fn on_click(
    shell: &Rc<Shell>,
    document: &Document,
    id: &str,
    action: fn() -> Action,
) -> Result<(), JsValue> {
    let Some(element) = document.get_element_by_id(id) else {
        tracing::debug!(id, "control not on this page; skipping");
        return Ok(());
    };

    let shell = Rc::clone(shell);
    on(&element, "click", move |event| {
        event.prevent_default();
        dispatch(&shell, action());
    })
}

/// Logout and history links. These work whether or not the page has a modal.
fn wire_session(shell: &Rc<Shell>, document: &Document) -> Result<(), JsValue> {
    on_click(shell, document, ids::LOGOUT, || Action::LogOut)?;
    on_click(shell, document, ids::HISTORY, || Action::ViewHistory)
}

/// Modal triggers, the close control, backdrop clicks, the switch link, and
/// form submission. Anything missing is skipped.
fn wire_modal(shell: &Rc<Shell>, document: &Document) -> Result<(), JsValue> {
    let (backdrop, switch_text): (HtmlElement, Element) = {
        let page = shell.page.borrow();
        match (page.backdrop(), page.switch_text()) {
            (Some(backdrop), Some(switch_text)) => (backdrop.clone(), switch_text.clone()),
            _ => return Ok(()),
        }
    };

    // Start hidden, as the page may not.
    dom::log_failure(
        backdrop.style().set_property("display", "none"),
        "hide the modal",
    );

    on_click(shell, document, ids::LOGIN_BUTTON, || {
        Action::Open(ModalMode::Login)
    })?;
    on_click(shell, document, ids::REGISTER_BUTTON, || {
        Action::Open(ModalMode::Register)
    })?;
    on_click(shell, document, ids::CLOSE_BUTTON, || Action::Close)?;

    {
        let shell = Rc::clone(shell);
        let backdrop_target: JsValue = backdrop.clone().into();

        on(&backdrop, "click", move |event| {
            let on_backdrop = event.target().is_some_and(|target| {
                let target: JsValue = target.into();
                js_sys::Object::is(&target, &backdrop_target)
            });

            let target = if on_backdrop {
                ClickTarget::Backdrop
            } else {
                ClickTarget::Content
            };

            dispatch(&shell, Action::Clicked(target));
        })?;
    }

    // The switch link is re-created on every render, so we listen on its
    // container instead of the link itself.
    {
        let shell = Rc::clone(shell);
        let selector = dom::toggle_selector();

        on(&switch_text, "click", move |event| {
            let on_link = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(&selector).ok().flatten())
                .is_some();

            if on_link {
                event.prevent_default();
                dispatch(&shell, Action::Toggle);
            }
        })?;
    }

    if let Some(form) = document.get_element_by_id(ids::FORM) {
        let shell = Rc::clone(shell);

        on(&form, "submit", move |event| {
            event.prevent_default();
            dispatch(&shell, Action::Submit);
        })?;
    }

    Ok(())
}

/// Fill the result list from the results the server injected into the page.
fn show_search_results(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(list) = document.get_element_by_id(ids::RESULTS_LIST) else {
        return Ok(());
    };

    if let Some(loader) = document
        .get_element_by_id(ids::RESULTS_LOADER)
        .and_then(|loader| loader.dyn_into::<HtmlElement>().ok())
    {
        loader.style().set_property("display", "none")?;
    }

    let results = injected_results(window);
    tracing::debug!(count = results.len(), "rendering search results");

    list.set_inner_html(&results::render_results(&results));

    Ok(())
}

/// Read `window.results`. Anything missing or malformed counts as no results.
fn injected_results(window: &Window) -> Vec<SearchResult> {
    let raw = match js_sys::Reflect::get(window, &JsValue::from_str("results")) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return Vec::new(),
    };

    let Some(json) = js_sys::JSON::stringify(&raw)
        .ok()
        .and_then(|json| json.as_string())
    else {
        return Vec::new();
    };

    serde_json::from_str(&json).unwrap_or_else(|err| {
        tracing::error!(?err, "couldn't read injected search results");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds_of_timer() {
        assert_eq!(timer_millis(DEFAULT_TIMEOUT), 10_000);
    }

    #[test]
    fn huge_timeouts_are_clamped() {
        assert_eq!(timer_millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
