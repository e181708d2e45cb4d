use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dich_config::Config;
use dich_config::ui::UiConfig;
use dich_translator::{TranslationRequest, Translator};
use dich_types::{
    DisplayState, LanguageCode, PanelOutput, PreferenceRecord, PreferenceUpdate, is_auto,
};
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use crate::catalog::LanguageCatalog;
use crate::error::SelectionError;
use crate::preferences::PreferenceStore;

/// Turns text and language edits into translate calls.
///
/// Every edit restarts a quiescence timer; only the edit that survives the
/// full window issues a call. Each issued call takes the next request id, and
/// a response is applied only if its id is still the latest one, so
/// out-of-order completions never overwrite newer results.
#[derive(Clone)]
pub struct TranslationCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    translator: Arc<dyn Translator>,
    preferences: Arc<PreferenceStore>,
    catalog: Arc<LanguageCatalog>,
    debounce: Duration,
    ui: UiConfig,

    state: Mutex<DisplayState>,
    latest_request: AtomicU64,
    /// Timer of the attempt waiting for quiescence
    pending: Mutex<Option<CancellationToken>>,
    /// Latest snapshot; slow readers skip frames but always see the last one
    updates: watch::Sender<DisplayState>,
}

impl TranslationCoordinator {
    pub fn new(
        translator: Arc<dyn Translator>,
        preferences: Arc<PreferenceStore>,
        catalog: Arc<LanguageCatalog>,
        config: &Config,
    ) -> Self {
        let defaults = PreferenceRecord::default();
        let state = DisplayState {
            source_language: defaults.source_language,
            target_language: defaults.target_language,
            ..DisplayState::default()
        };
        let (updates, _) = watch::channel(state.clone());

        Self {
            inner: Arc::new(Inner {
                translator,
                preferences,
                catalog,
                debounce: config.debounce(),
                ui: config.ui.clone(),
                state: Mutex::new(state),
                latest_request: AtomicU64::new(0),
                pending: Mutex::new(None),
                updates,
            }),
        }
    }

    /// Apply the language pair loaded at startup. Nothing is persisted or translated.
    pub async fn restore(&self, record: PreferenceRecord) {
        let mut state = self.inner.state.lock().await;
        state.source_language = record.source_language;
        state.target_language = record.target_language;
        self.inner.publish(&state);
    }

    pub async fn set_source_text(&self, text: impl Into<String>) {
        {
            let mut state = self.inner.state.lock().await;
            state.error_message.clear();
            state.source_text = text.into();
            self.inner.publish(&state);
        }

        self.schedule().await;
    }

    /// No local validation; unsupported codes are reported by the remote service.
    pub async fn set_source_language(&self, code: impl Into<LanguageCode>) {
        let code = code.into();
        {
            let mut state = self.inner.state.lock().await;
            if state.source_language == code {
                return;
            }
            state.source_language = code.clone();
            self.inner.publish(&state);
        }

        self.schedule().await;
        self.inner.preferences.save(PreferenceUpdate::source(code)).await;
    }

    pub async fn set_target_language(
        &self,
        code: impl Into<LanguageCode>,
    ) -> Result<(), SelectionError> {
        let code = code.into();
        if is_auto(&code) {
            return Err(SelectionError::AutoTarget);
        }

        {
            let mut state = self.inner.state.lock().await;
            if state.target_language == code {
                return Ok(());
            }
            state.target_language = code.clone();
            self.inner.publish(&state);
        }

        self.schedule().await;
        self.inner.preferences.save(PreferenceUpdate::target(code)).await;

        Ok(())
    }

    /// Exchange source and target, along with the texts.
    ///
    /// With an auto-detected source the detected language becomes the new
    /// target. Returns `false` without changing anything while a call is in
    /// flight or when auto-detect has nothing detected yet.
    pub async fn swap_languages(&self) -> bool {
        let update = {
            let mut state = self.inner.state.lock().await;
            if !swappable(&state) {
                tracing::debug!("swap ignored");
                return false;
            }

            let new_target = if is_auto(&state.source_language) {
                std::mem::take(&mut state.detected_language)
            } else {
                state.source_language.clone()
            };
            let new_source = std::mem::replace(&mut state.target_language, new_target);
            state.source_language = new_source;

            let translated = state.translated_text.clone();
            let previous_text = std::mem::replace(&mut state.source_text, translated.clone());
            if !translated.trim().is_empty() && translated != previous_text {
                state.translated_text = self.inner.ui.translating_text.clone();
                state.loading = true;
            }

            self.inner.publish(&state);
            PreferenceUpdate::pair(state.source_language.clone(), state.target_language.clone())
        };

        self.schedule().await;
        self.inner.preferences.save(update).await;

        true
    }

    /// Empty the input. A call already sent is not cancelled, but the
    /// attempt scheduled here supersedes it.
    pub async fn clear(&self) {
        {
            let mut state = self.inner.state.lock().await;
            state.source_text.clear();
            state.detected_language.clear();
            self.inner.publish(&state);
        }

        self.schedule().await;
    }

    /// Follow display changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.updates.subscribe()
    }

    pub async fn snapshot(&self) -> DisplayState {
        self.inner.state.lock().await.clone()
    }

    pub async fn output(&self) -> PanelOutput {
        self.inner.state.lock().await.output()
    }

    pub async fn can_swap(&self) -> bool {
        swappable(&*self.inner.state.lock().await)
    }

    /// Label for the source picker, naming the detected language when there is one
    pub async fn source_header(&self) -> String {
        let state = self.inner.state.lock().await;
        self.inner
            .catalog
            .source_header(&state, &self.inner.ui.detected_suffix)
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.inner.catalog
    }

    pub fn latest_request_id(&self) -> u64 {
        self.inner.latest_request.load(Ordering::SeqCst)
    }

    /// Restart the quiescence timer
    async fn schedule(&self) {
        let token = CancellationToken::new();
        if let Some(previous) = self.inner.pending.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("translation attempt superseded before firing");
                }
                _ = tokio::time::sleep(inner.debounce) => {
                    inner.fire().await;
                }
            }
        });
    }
}

fn swappable(state: &DisplayState) -> bool {
    !state.loading && !(is_auto(&state.source_language) && !state.has_detected_language())
}

impl Inner {
    async fn fire(&self) {
        let request = {
            let mut state = self.state.lock().await;
            let has_text = !state.source_text.trim().is_empty();
            let has_translation = !state.translated_text.trim().is_empty();

            if has_text && !has_translation {
                state.translated_text = self.ui.translating_text.clone();
                state.loading = true;
            } else if has_text {
                state.loading = true;
            } else {
                state.translated_text.clear();
            }

            let id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            state.error_message.clear();

            if !has_text {
                // Whatever was loading has just been superseded
                state.loading = false;
                state.detected_language.clear();
                self.publish(&state);
                return;
            }

            self.publish(&state);
            TranslationRequest {
                id,
                text: state.source_text.clone(),
                source_language: state.source_language.clone(),
                target_language: state.target_language.clone(),
            }
        };

        let result = self.translator.translate(&request).await;

        let mut state = self.state.lock().await;
        let latest = self.latest_request.load(Ordering::SeqCst);
        if request.id != latest {
            tracing::debug!(id = request.id, latest, "dropping stale translation");
            return;
        }

        match result {
            Ok(translation) => {
                state.translated_text = translation.text;
                state.detected_language = if is_auto(&request.source_language) {
                    translation.detected.unwrap_or_default()
                } else {
                    String::new()
                };
            }
            Err(e) if e.is_network() => {
                tracing::warn!(id = request.id, "Network error: {e}");
                state.error_message = self.ui.network_error_text.clone();
            }
            Err(e) => {
                tracing::error!(id = request.id, "Translation failed: {e}");
                state.error_message = e.to_string();
            }
        }
        state.loading = false;
        self.publish(&state);
    }

    fn publish(&self, state: &DisplayState) {
        // Kept even with no receivers, so later subscribers start current
        self.updates.send_replace(state.clone());
    }
}
