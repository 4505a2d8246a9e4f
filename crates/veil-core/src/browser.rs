//! Main browser state container
//!
//! The `Browser` owns the tab registry, the session flags, the privacy
//! counters, the address bar and the pending timers. Hosts call into it from
//! their event handlers and drive its clock with `advance`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use veil_navigation::{Destination, InputResolver, Suggester};
use veil_privacy::{IncrementSource, ModeFlag, PrivacyCounters, PrivacySimulator, SessionFlags};
use veil_tabs::{CloseOutcome, NewTabTemplate, Tab, TabId, TabRegistry};

use crate::config::Config;
use crate::error::CoreError;
use crate::scheduler::Scheduler;
use crate::voice::{NoVoiceCapture, VoiceCapture};
use crate::Result;

/// Identifies a deferred task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Simulated page load of a tab
    PageLoad(TabId),
    /// Navigation to a voice transcript
    VoiceSubmit,
}

/// What a deferred task does when it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PageLoaded(TabId),
    SubmitTranscript(String),
}

/// Proof that the user was asked before clearing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClearDataToken(u64);

/// What the content pane shows for the active tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ContentView {
    /// New-tab dashboard with the privacy counters
    Home {
        counters: PrivacyCounters,
        total_blocked: u64,
        quick_links: Vec<String>,
        listening: bool,
    },
    /// Placeholder for a page; nothing is actually fetched
    Page {
        url: String,
        title: String,
        loading: bool,
    },
}

/// Everything a renderer needs, in one serializable value
#[derive(Debug, Clone, Serialize)]
pub struct BrowserSnapshot {
    pub tabs: Vec<Tab>,
    pub active_tab: TabId,
    pub address_text: String,
    pub suggestions: Vec<String>,
    pub flags: SessionFlags,
    pub counters: PrivacyCounters,
    pub total_blocked: u64,
    pub listening: bool,
    pub clear_pending: bool,
    pub content: ContentView,
}

/// Main browser instance
pub struct Browser<S = StdRng> {
    config: Config,
    registry: TabRegistry,
    resolver: InputResolver,
    suggester: Suggester,
    flags: SessionFlags,
    counters: PrivacyCounters,
    simulator: PrivacySimulator<S>,
    scheduler: Scheduler<TaskKey, Effect>,
    voice: Box<dyn VoiceCapture>,
    listening: bool,
    address_text: String,
    suggestions: Vec<String>,
    pending_clear: Option<ClearDataToken>,
    next_clear_token: u64,
}

impl Browser<StdRng> {
    /// Initialize a browser whose counters are driven by OS entropy
    pub fn new(config: Config) -> Result<Self> {
        Self::with_source(config, StdRng::from_entropy())
    }
}

impl<S: IncrementSource> Browser<S> {
    /// Initialize a browser drawing counter increments from `source`
    pub fn with_source(config: Config, source: S) -> Result<Self> {
        config.validate()?;

        let resolver = InputResolver::with_search_engine(config.search_engine.clone())?
            .with_fallback_title(config.fallback_title.clone());
        let suggester = Suggester::new(config.suggestions.clone())
            .with_limits(config.max_suggestions, config.min_query_chars);
        let registry = TabRegistry::with_template(
            NewTabTemplate {
                url: config.new_tab_url.clone(),
                title: config.new_tab_title.clone(),
            },
            config.flags.incognito(),
        );

        tracing::info!(
            search_engine = %config.search_engine,
            incognito = config.flags.incognito(),
            "Browser initialized"
        );

        Ok(Self {
            flags: config.flags,
            config,
            registry,
            resolver,
            suggester,
            counters: PrivacyCounters::new(),
            simulator: PrivacySimulator::new(source),
            scheduler: Scheduler::new(),
            voice: Box::new(NoVoiceCapture),
            listening: false,
            address_text: String::new(),
            suggestions: Vec::new(),
            pending_clear: None,
            next_clear_token: 1,
        })
    }

    /// Replace the voice capture implementation
    pub fn with_voice(mut self, voice: impl VoiceCapture + 'static) -> Self {
        self.voice = Box::new(voice);
        self
    }

    // === Tab operations ===

    /// Open a new tab; it inherits the current incognito mode
    pub fn new_tab(&mut self) -> TabId {
        let id = self.registry.create_tab(self.flags.incognito());
        self.address_text.clear();
        self.suggestions.clear();
        id
    }

    /// Close a tab. The last tab stays open. A pending page load of the
    /// closed tab is cancelled.
    pub fn close_tab(&mut self, tab_id: TabId) -> CloseOutcome {
        let outcome = self.registry.close_tab(tab_id);
        if matches!(outcome, CloseOutcome::Closed { .. }) {
            self.scheduler.cancel(TaskKey::PageLoad(tab_id));
        }
        outcome
    }

    /// Activate a tab. Unknown ids are ignored and return false.
    pub fn switch_tab(&mut self, tab_id: TabId) -> bool {
        self.registry.switch_tab(tab_id)
    }

    pub fn tab(&self, tab_id: TabId) -> Result<&Tab> {
        Ok(self.registry.get_or_err(tab_id)?)
    }

    pub fn tabs(&self) -> &[Tab] {
        self.registry.tabs()
    }

    pub fn active_tab(&self) -> &Tab {
        self.registry.active()
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// True while the simulated page load of a tab is pending
    pub fn is_loading(&self, tab_id: TabId) -> bool {
        self.scheduler.is_pending(TaskKey::PageLoad(tab_id))
    }

    // === Address bar ===

    /// Replace the address bar text and recompute suggestions
    pub fn set_address_text(&mut self, text: &str) {
        self.address_text = text.to_string();
        self.suggestions = self.suggester.suggest(text);
    }

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Navigate the active tab to whatever is in the address bar
    pub fn submit_address(&mut self) -> Option<Destination> {
        let text = self.address_text.clone();
        self.navigate(&text)
    }

    /// Navigate the active tab to a suggestion
    pub fn choose_suggestion(&mut self, index: usize) -> Option<Destination> {
        let suggestion = self.suggestions.get(index)?.clone();
        self.address_text = suggestion.clone();
        self.navigate(&suggestion)
    }

    /// Navigate the active tab to one of the dashboard shortcuts
    pub fn open_quick_link(&mut self, index: usize) -> Option<Destination> {
        let link = self.config.quick_links.get(index)?.clone();
        self.navigate(&link)
    }

    /// Resolve `input` and point the active tab at it.
    ///
    /// Blank input does nothing. Otherwise the tab is updated at once and a
    /// simulated page load is scheduled for it, replacing any load still
    /// pending on the same tab.
    pub fn navigate(&mut self, input: &str) -> Option<Destination> {
        if input.trim().is_empty() {
            tracing::debug!("Ignoring empty navigation");
            return None;
        }

        let destination = self.resolver.resolve(input);
        let tab_id = self
            .registry
            .update_active_tab(destination.url.clone(), destination.title.clone());

        let delay = self.config.page_load_delay();
        let replaced = self.scheduler.schedule(
            TaskKey::PageLoad(tab_id),
            delay,
            Effect::PageLoaded(tab_id),
        );
        self.suggestions.clear();

        tracing::info!(
            tab_id = %tab_id,
            url = %destination.url,
            replaced_pending_load = replaced,
            "Navigated tab"
        );

        Some(destination)
    }

    pub fn resolver(&self) -> &InputResolver {
        &self.resolver
    }

    // === Session flags ===

    pub fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    pub fn set_flag(&mut self, flag: ModeFlag, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    pub fn toggle_flag(&mut self, flag: ModeFlag) -> bool {
        self.flags.toggle(flag)
    }

    // === Privacy counters ===

    pub fn counters(&self) -> &PrivacyCounters {
        &self.counters
    }

    /// First step of clearing browsing data. The returned token must be
    /// handed back to `confirm_clear_data`.
    pub fn request_clear_data(&mut self) -> ClearDataToken {
        let token = ClearDataToken(self.next_clear_token);
        self.next_clear_token += 1;
        self.pending_clear = Some(token);
        tracing::debug!(token = token.0, "Clear data requested");
        token
    }

    /// Second step of clearing browsing data: zero the counters
    pub fn confirm_clear_data(&mut self, token: ClearDataToken) -> Result<()> {
        if self.pending_clear != Some(token) {
            return Err(CoreError::ClearNotRequested);
        }

        self.pending_clear = None;
        self.counters.reset();
        tracing::info!("Browsing data cleared");
        Ok(())
    }

    pub fn cancel_clear_data(&mut self) {
        if self.pending_clear.take().is_some() {
            tracing::debug!("Clear data cancelled");
        }
    }

    pub fn is_clear_pending(&self) -> bool {
        self.pending_clear.is_some()
    }

    // === Voice search ===

    pub fn is_voice_supported(&self) -> bool {
        self.voice.is_supported()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start listening for a spoken address. Fails without touching any
    /// state when the host has no speech recognition.
    pub fn start_voice_search(&mut self) -> Result<()> {
        if !self.voice.is_supported() {
            tracing::warn!("Voice search requested but not supported");
            return Err(CoreError::VoiceUnsupported);
        }

        self.voice.start(&self.config.voice_locale)?;
        self.listening = true;
        tracing::info!(locale = %self.config.voice_locale, "Listening for voice input");
        Ok(())
    }

    /// A transcript arrived. It goes into the address bar and is navigated
    /// to after the voice submit delay, as if it had been typed.
    pub fn on_voice_result(&mut self, transcript: &str) {
        self.listening = false;
        self.address_text = transcript.to_string();
        self.scheduler.schedule(
            TaskKey::VoiceSubmit,
            self.config.voice_submit_delay(),
            Effect::SubmitTranscript(transcript.to_string()),
        );
        tracing::debug!(transcript = %transcript, "Voice transcript received");
    }

    pub fn on_voice_error(&mut self) {
        self.listening = false;
        tracing::debug!("Voice capture failed");
    }

    pub fn on_voice_end(&mut self) {
        self.listening = false;
    }

    // === Clock ===

    /// Move the clock forward, applying every effect that falls due.
    /// Returns how many effects fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.scheduler.now() + elapsed;
        let mut fired = 0;

        while let Some(effect) = self.scheduler.pop_until(target) {
            self.apply(effect);
            fired += 1;
        }

        self.scheduler.settle(target);
        fired
    }

    /// Time until the next deferred effect, if any
    pub fn next_due_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::PageLoaded(tab_id) => {
                let report = self
                    .simulator
                    .on_page_loaded(&self.flags, &mut self.counters);
                tracing::debug!(
                    tab_id = %tab_id,
                    trackers = report.trackers,
                    ads = report.ads,
                    "Page load finished"
                );
            }
            Effect::SubmitTranscript(transcript) => {
                self.navigate(&transcript);
            }
        }
    }

    // === Rendering ===

    pub fn content_view(&self) -> ContentView {
        let tab = self.registry.active();

        if tab.url == self.registry.template().url {
            ContentView::Home {
                counters: self.counters,
                total_blocked: self.counters.total_blocked(),
                quick_links: self.config.quick_links.clone(),
                listening: self.listening,
            }
        } else {
            ContentView::Page {
                url: tab.url.clone(),
                title: tab.title.clone(),
                loading: self.is_loading(tab.id),
            }
        }
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        BrowserSnapshot {
            tabs: self.registry.tabs().to_vec(),
            active_tab: self.registry.active_id(),
            address_text: self.address_text.clone(),
            suggestions: self.suggestions.clone(),
            flags: self.flags,
            counters: self.counters,
            total_blocked: self.counters.total_blocked(),
            listening: self.listening,
            clear_pending: self.is_clear_pending(),
            content: self.content_view(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
