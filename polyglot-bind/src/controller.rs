//! Bind orchestration and the per-binding render state machine.

use crate::request::{BindRequest, BindTarget, ElementId};
use crate::sink::RenderSink;
use dashmap::DashMap;
use parking_lot::Mutex;
use polyglot_core::{Locale, LocalizeError, RenderSpec, Result, StringTable, resolve};
use polyglot_loader::{
    EngineConfig, LoadState, LocaleCache, StringFetcher, StringTableLoader, TableFuture,
};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

/// Lifecycle of one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    /// Waiting on the active locale's table future.
    Pending,
    /// Text produced and delivered to the sink.
    Rendered,
    /// String id missing from the table, or the table load failed.
    Unresolved,
}

/// Registry entry for one bound element.
struct Binding {
    spec: RenderSpec,
    alive: Arc<AtomicBool>,
    state: Arc<Mutex<BindState>>,
}

/// A binding waiting on (or resolving against) a table future.
struct PendingRender {
    element: ElementId,
    spec: RenderSpec,
    alive: Arc<AtomicBool>,
    state: Arc<Mutex<BindState>>,
}

/// One locale load plus the bindings attached before it fulfilled.
///
/// The queue is drained in attach order by the driver task once the shared
/// future resolves; bindings arriving after the drain resolve immediately
/// against the settled future.
struct LoadCycle {
    future: TableFuture,
    queue: Arc<Mutex<Option<Vec<PendingRender>>>>,
    driver: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

/// Orchestrates bind requests against the active locale's string table.
///
/// Construction validates the configured startup locale (falling back to the
/// default locale when it is not allow-listed) and starts the initial table
/// load. Must be created and used within a tokio runtime.
pub struct LocalizationController {
    config: Arc<EngineConfig>,
    loader: StringTableLoader,
    sink: Arc<dyn RenderSink>,
    bindings: DashMap<ElementId, Binding>,
    cycle: Mutex<LoadCycle>,
}

impl LocalizationController {
    /// Create a controller and start loading the startup locale.
    pub fn new(
        config: EngineConfig,
        fetcher: Arc<dyn StringFetcher>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        let config = Arc::new(config);
        let initial = if config.locale.is_valid(&config.valid_locales) {
            config.locale.clone()
        } else {
            if config.debug {
                let err = LocalizeError::InvalidLocale(config.locale.as_str().to_string());
                error!(%err, fallback = %config.default_locale(), "defaulting startup locale");
            }
            config.default_locale()
        };

        let cache = LocaleCache::new(initial.clone());
        let loader = StringTableLoader::new(Arc::clone(&config), fetcher, cache);
        let cycle = spawn_cycle(&loader, &sink, &config, &initial);

        Self {
            config,
            loader,
            sink,
            bindings: DashMap::new(),
            cycle: Mutex::new(cycle),
        }
    }

    /// Dispatch one bind request.
    ///
    /// Element targets are render requests; the root target is a
    /// locale-switch command. Malformed requests are logged and dropped;
    /// nothing here is fatal.
    pub fn bind(&self, request: BindRequest) {
        match request.target {
            BindTarget::Root => self.handle_locale_switch(&request.params),
            BindTarget::Element(element) => match RenderSpec::from_value(&request.params) {
                Ok(spec) => self.bind_element(element, spec),
                Err(err) => {
                    if self.config.debug {
                        error!(element = %element, %err, "render request dropped");
                    }
                }
            },
        }
    }

    /// Bind an already-parsed render spec to an element.
    ///
    /// Re-binding an element replaces its registry entry and suppresses the
    /// superseded pending delivery.
    pub fn bind_element(&self, element: impl Into<ElementId>, spec: RenderSpec) {
        let element = element.into();
        let alive = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(BindState::Pending));

        if let Some(previous) = self.bindings.insert(
            element.clone(),
            Binding {
                spec: spec.clone(),
                alive: Arc::clone(&alive),
                state: Arc::clone(&state),
            },
        ) {
            previous.alive.store(false, Ordering::SeqCst);
        }

        self.attach(PendingRender {
            element,
            spec,
            alive,
            state,
        });
    }

    /// Switch the active locale programmatically.
    ///
    /// A locale outside the allow-list falls back to the default locale with
    /// a diagnostic. Already-attached bindings keep the future they attached
    /// to; use [`rebind_all`](Self::rebind_all) to re-render them from the
    /// new table.
    pub fn set_locale(&self, locale: impl Into<Locale>) {
        let locale = locale.into();
        let target = if locale.is_valid(&self.config.valid_locales) {
            locale
        } else {
            if self.config.debug {
                let err = LocalizeError::InvalidLocale(locale.as_str().to_string());
                error!(%err, fallback = %self.config.default_locale(), "defaulting locale");
            }
            self.config.default_locale()
        };

        let cycle = spawn_cycle(&self.loader, &self.sink, &self.config, &target);
        *self.cycle.lock() = cycle;
    }

    /// Re-attach every live binding to the current table future.
    pub fn rebind_all(&self) {
        for entry in self.bindings.iter() {
            let binding = entry.value();
            if !binding.alive.load(Ordering::SeqCst) {
                continue;
            }
            *binding.state.lock() = BindState::Pending;
            self.attach(PendingRender {
                element: entry.key().clone(),
                spec: binding.spec.clone(),
                alive: Arc::clone(&binding.alive),
                state: Arc::clone(&binding.state),
            });
        }
    }

    /// Detach an element from future updates.
    ///
    /// Any pending render delivery is suppressed; the in-flight load itself
    /// keeps running. Idempotent: unknown elements are a no-op.
    pub fn unsubscribe(&self, element: &ElementId) {
        if let Some((_, binding)) = self.bindings.remove(element) {
            binding.alive.store(false, Ordering::SeqCst);
            if self.config.debug {
                debug!(element = %element, "unsubscribed");
            }
        }
    }

    /// Locale of the most recent load attempt.
    pub fn active_locale(&self) -> Locale {
        self.loader.cache().active_locale()
    }

    /// Load lifecycle of the active table.
    pub fn load_state(&self) -> LoadState {
        self.loader.cache().state()
    }

    /// The shared cache, for subsystems that want locale-related state.
    pub fn cache(&self) -> &LocaleCache {
        self.loader.cache()
    }

    /// Current state of an element's binding.
    pub fn bind_state(&self, element: &ElementId) -> Option<BindState> {
        self.bindings.get(element).map(|b| *b.state.lock())
    }

    /// Number of registered bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Wait until the active load cycle has delivered every queued binding.
    pub async fn settled(&self) {
        let driver = self.cycle.lock().driver.lock().take();
        if let Some(handle) = driver {
            let _ = handle.await;
        }
    }

    fn handle_locale_switch(&self, params: &Value) {
        let Value::String(code) = params else {
            if self.config.debug {
                error!("locale switch expects a single locale string");
            }
            return;
        };
        self.set_locale(code.as_str());
    }

    /// Attach one pending render to the current cycle.
    fn attach(&self, render: PendingRender) {
        let cycle = self.cycle.lock();
        {
            let mut slot = cycle.queue.lock();
            if let Some(queue) = slot.as_mut() {
                queue.push(render);
                return;
            }
        }

        match cycle.future.peek() {
            Some(result) => deliver(self.sink.as_ref(), &self.config, result, render),
            None => {
                let future = cycle.future.clone();
                let sink = Arc::clone(&self.sink);
                let config = Arc::clone(&self.config);
                tokio::spawn(async move {
                    let result = future.await;
                    deliver(sink.as_ref(), &config, &result, render);
                });
            }
        }
    }
}

/// Start a load for `locale` and the driver that drains its queue in attach
/// order once the shared future resolves.
fn spawn_cycle(
    loader: &StringTableLoader,
    sink: &Arc<dyn RenderSink>,
    config: &Arc<EngineConfig>,
    locale: &Locale,
) -> LoadCycle {
    let future = loader.load(locale);
    let queue: Arc<Mutex<Option<Vec<PendingRender>>>> = Arc::new(Mutex::new(Some(Vec::new())));

    let driver = {
        let future = future.clone();
        let queue = Arc::clone(&queue);
        let sink = Arc::clone(sink);
        let config = Arc::clone(config);
        tokio::spawn(async move {
            let result = future.await;
            let pending = queue.lock().take().unwrap_or_default();
            for render in pending {
                deliver(sink.as_ref(), &config, &result, render);
            }
        })
    };

    LoadCycle {
        future,
        queue,
        driver: Mutex::new(Some(driver)),
    }
}

/// Resolve one binding against a load outcome and deliver the result.
fn deliver(
    sink: &dyn RenderSink,
    config: &EngineConfig,
    result: &Result<Arc<StringTable>>,
    render: PendingRender,
) {
    if !render.alive.load(Ordering::SeqCst) {
        return;
    }

    match result {
        Ok(table) => match table.get(&render.spec.string_id) {
            Some(template) => {
                let text = resolve(template, &render.spec.args);
                *render.state.lock() = BindState::Rendered;
                sink.render(&render.element, &text);
            }
            None => {
                let err = LocalizeError::MissingStringId(render.spec.string_id.clone());
                unresolved(sink, config, render, &err);
            }
        },
        Err(err) => unresolved(sink, config, render, err),
    }
}

/// Apply the debug-marker-or-silent policy to a binding that cannot render.
fn unresolved(sink: &dyn RenderSink, config: &EngineConfig, render: PendingRender, err: &LocalizeError) {
    *render.state.lock() = BindState::Unresolved;
    if config.debug {
        sink.render(
            &render.element,
            &format!("[NO TRANSLATION] for {}", render.spec.string_id),
        );
        error!(element = %render.element, %err, "binding unresolved");
    } else {
        debug!(element = %render.element, %err, "binding unresolved");
    }
}
