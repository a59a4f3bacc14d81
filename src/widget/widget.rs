use crate::input::text_input::{EditOutcome, TextInput};
use crate::terminal::{KeyCode, KeyModifiers, MouseEvent, MouseKind};
use crate::ui::highlight::{highlight_match, segments_to_spans};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widget::candidate::Candidate;
use crate::widget::config::AutocompleteConfig;
use crate::widget::controller::{
    LOOKUP_ERROR_MESSAGE, LookupState, LookupUpdate, SuggestionController,
};
use crate::widget::debounce::Debouncer;
use crate::widget::lookup::LookupSource;
use crate::widget::navigator::ListNavigator;
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

/// Actions surfaced to the host from `InteractionResult`.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    /// The user confirmed a candidate (Enter or click).
    Committed { candidate: Candidate },
    /// The dropdown was dismissed without a selection.
    Dismissed,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn not_handled() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }
}

/// Screen region the host drew the widget into; used to resolve mouse
/// positions. Row `row` is the input line, the dropdown starts directly
/// below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetBounds {
    pub row: u16,
    pub col: u16,
    pub width: u16,
}

impl WidgetBounds {
    pub fn new(row: u16, col: u16, width: u16) -> Self {
        Self { row, col, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Input,
    Candidate(usize),
    Outside,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cell offset of the cursor within the input line, when focused.
    pub cursor_offset: Option<usize>,
}

/// The autocomplete widget: a text input that debounces keystrokes, runs the
/// host-supplied lookup, and offers the results in a navigable dropdown.
///
/// The host forwards key and mouse events, calls `tick` from its event loop,
/// and renders `draw`'s lines at `bounds`.
pub struct AutocompleteInput {
    config: AutocompleteConfig,
    input: TextInput,
    debouncer: Debouncer,
    controller: SuggestionController,
    navigator: ListNavigator,
    dropdown_visible: bool,
    /// Esc or an outside click hides the error / no-results notice until the
    /// next lookup outcome or edit.
    notice_dismissed: bool,
    selected: Option<Candidate>,
    bounds: WidgetBounds,
    on_select: Option<Box<dyn FnMut(&Candidate) + Send>>,
}

impl AutocompleteInput {
    pub fn new(source: Arc<dyn LookupSource>) -> Self {
        let config = AutocompleteConfig::default();
        Self {
            input: TextInput::new().with_placeholder(config.placeholder.clone()),
            debouncer: Debouncer::new(config.debounce),
            controller: SuggestionController::new(source, config.min_chars),
            navigator: ListNavigator::new(),
            dropdown_visible: false,
            notice_dismissed: false,
            selected: None,
            bounds: WidgetBounds::default(),
            on_select: None,
            config,
        }
    }

    pub fn with_config(self, config: AutocompleteConfig) -> Self {
        self.apply_config(config)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let config = self.config.clone().with_placeholder(placeholder);
        self = self.apply_config(config);
        self
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        let config = self.config.clone().with_min_chars(min_chars);
        self = self.apply_config(config);
        self
    }

    pub fn with_debounce(mut self, debounce: std::time::Duration) -> Self {
        let config = self.config.clone().with_debounce(debounce);
        self = self.apply_config(config);
        self
    }

    /// Host callback, invoked synchronously at the moment of commit.
    pub fn with_on_select(mut self, on_select: impl FnMut(&Candidate) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    fn apply_config(mut self, config: AutocompleteConfig) -> Self {
        self.input = {
            let mut input = TextInput::new().with_placeholder(config.placeholder.clone());
            input.set_value(self.input.value());
            input
        };
        self.debouncer = Debouncer::new(config.debounce);
        self.controller.set_min_chars(config.min_chars);
        self.config = config;
        self
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.controller.candidates()
    }

    pub fn lookup_state(&self) -> LookupState {
        self.controller.state()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.navigator.active()
    }

    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_visible
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn bounds(&self) -> WidgetBounds {
        self.bounds
    }

    /// The host reports where it drew the widget, so mouse events can be
    /// resolved against the same layout.
    pub fn set_bounds(&mut self, bounds: WidgetBounds) {
        self.bounds = bounds;
    }

    /// Next instant at which `tick` has work to do, for sizing the event
    /// loop's poll timeout.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Event-loop hook: settles the debouncer, dispatches lookups, and
    /// applies finished ones. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(query) = self.debouncer.poll(now) {
            trace!(query, "debounce settled");
            let dispatched = self.controller.on_debounced_query(&query);
            if !dispatched {
                self.dropdown_visible = false;
                self.navigator.reset();
            }
            changed = true;
        }

        if let Some(update) = self.controller.poll() {
            match update {
                LookupUpdate::Results { nonempty } => {
                    self.dropdown_visible = nonempty;
                }
                LookupUpdate::Failed => {
                    self.dropdown_visible = false;
                }
            }
            // The candidate list was replaced either way.
            self.navigator.reset();
            self.notice_dismissed = false;
            changed = true;
        }

        changed
    }

    fn notice_showing(&self) -> bool {
        if self.notice_dismissed {
            return false;
        }
        match self.controller.state() {
            LookupState::Failed => true,
            LookupState::Empty => self.input.char_len() >= self.config.min_chars,
            _ => false,
        }
    }

    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        now: Instant,
    ) -> InteractionResult {
        if modifiers == KeyModifiers::NONE
            && code == KeyCode::Esc
            && (self.dropdown_visible || self.notice_showing())
        {
            self.dropdown_visible = false;
            self.notice_dismissed = true;
            return InteractionResult::with_action(WidgetAction::Dismissed);
        }

        if self.dropdown_visible && modifiers == KeyModifiers::NONE {
            let len = self.controller.candidates().len();
            match code {
                KeyCode::Down => {
                    self.navigator.move_down(len);
                    return InteractionResult::handled();
                }
                KeyCode::Up => {
                    self.navigator.move_up(len);
                    return InteractionResult::handled();
                }
                KeyCode::Enter => {
                    if let Some(index) = self.navigator.active() {
                        return self.commit(index);
                    }
                    // No active row: Enter falls through to the host.
                }
                _ => {}
            }
        }

        match self.input.handle_key(code, modifiers) {
            EditOutcome::Edited => {
                self.on_query_edited(now);
                InteractionResult::handled()
            }
            EditOutcome::Moved => InteractionResult::handled(),
            EditOutcome::NotHandled => InteractionResult::not_handled(),
        }
    }

    /// Direct edits clear the previous selection and re-evaluate visibility
    /// against `min_chars` immediately, without waiting for the debounce.
    fn on_query_edited(&mut self, now: Instant) {
        self.selected = None;
        self.dropdown_visible = self.input.char_len() >= self.config.min_chars;
        self.notice_dismissed = false;
        self.debouncer.update(self.input.value(), now);
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> InteractionResult {
        match self.hit_test(event.col, event.row) {
            Hit::Candidate(index) => match event.kind {
                MouseKind::Moved => {
                    let len = self.controller.candidates().len();
                    if self.navigator.hover(index, len) {
                        InteractionResult::handled()
                    } else {
                        InteractionResult::not_handled()
                    }
                }
                MouseKind::Press => self.commit(index),
            },
            Hit::Input => InteractionResult::not_handled(),
            Hit::Outside => {
                // A press anywhere else closes the dropdown; query and
                // selection stay untouched.
                if event.kind == MouseKind::Press
                    && (self.dropdown_visible || self.notice_showing())
                {
                    self.dropdown_visible = false;
                    self.notice_dismissed = true;
                    InteractionResult {
                        handled: false,
                        request_render: true,
                        actions: vec![WidgetAction::Dismissed],
                    }
                } else {
                    InteractionResult::not_handled()
                }
            }
        }
    }

    fn hit_test(&self, col: u16, row: u16) -> Hit {
        let in_cols =
            col >= self.bounds.col && col < self.bounds.col.saturating_add(self.bounds.width);
        if !in_cols {
            return Hit::Outside;
        }
        if row == self.bounds.row {
            return Hit::Input;
        }

        if self.dropdown_visible && self.controller.state() == LookupState::Ready {
            let first = self.bounds.row.saturating_add(1);
            let len = self.controller.candidates().len() as u16;
            if row >= first && row < first.saturating_add(len) {
                return Hit::Candidate((row - first) as usize);
            }
        }

        Hit::Outside
    }

    fn commit(&mut self, index: usize) -> InteractionResult {
        let Some(candidate) = self.controller.candidates().get(index).cloned() else {
            return InteractionResult::not_handled();
        };

        self.input.set_value(candidate.name.clone());
        // The programmatic edit must not schedule another lookup, and a
        // fetch already in flight must not reopen the dropdown later.
        self.debouncer.cancel();
        self.controller.invalidate();
        self.selected = Some(candidate.clone());
        self.dropdown_visible = false;

        if let Some(on_select) = &mut self.on_select {
            on_select(&candidate);
        }

        InteractionResult::with_action(WidgetAction::Committed { candidate })
    }

    pub fn draw(&self) -> DrawOutput {
        let mut lines = Vec::<SpanLine>::new();

        if self.input.is_empty() {
            lines.push(vec![Span::styled(
                self.input.placeholder().to_string(),
                Style::new().color(Color::DarkGrey),
            )]);
        } else {
            lines.push(vec![Span::new(self.input.value().to_string())]);
        }
        let cursor_offset = Some(self.input.cursor_cell_offset());

        match self.controller.state() {
            LookupState::Loading if self.dropdown_visible => {
                lines.push(vec![Span::styled(
                    "Loading...".to_string(),
                    Style::new().color(Color::Cyan),
                )]);
            }
            LookupState::Failed if !self.notice_dismissed => {
                lines.push(vec![Span::styled(
                    LOOKUP_ERROR_MESSAGE.to_string(),
                    Style::new().color(Color::Red),
                )]);
            }
            LookupState::Empty
                if !self.notice_dismissed
                    && self.input.char_len() >= self.config.min_chars =>
            {
                lines.push(vec![Span::styled(
                    "No results found".to_string(),
                    Style::new().color(Color::DarkGrey),
                )]);
            }
            LookupState::Ready if self.dropdown_visible => {
                for (index, candidate) in self.controller.candidates().iter().enumerate() {
                    lines.push(self.candidate_line(index, candidate));
                }
            }
            _ => {}
        }

        DrawOutput {
            lines,
            cursor_offset,
        }
    }

    fn candidate_line(&self, index: usize, candidate: &Candidate) -> SpanLine {
        let active = self.navigator.active() == Some(index);
        let base = if active {
            Style::new().background(Color::Blue).color(Color::White)
        } else {
            Style::new()
        };
        let highlight = Style::new().color(Color::Yellow).bold();

        let marker = if active { "› " } else { "  " };
        let mut line = vec![Span::styled(marker.to_string(), base)];
        let segments = highlight_match(&candidate.name, self.input.value());
        line.extend(segments_to_spans(&segments, base, highlight));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::lookup::LookupError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    struct Recorder {
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    fn fixture_source() -> (Arc<Recorder>, Arc<dyn LookupSource>) {
        let recorder = Arc::new(Recorder {
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        });
        let seen = Arc::clone(&recorder);
        let source: Arc<dyn LookupSource> = Arc::new(move |query: &str| {
            seen.calls.fetch_add(1, Ordering::SeqCst);
            seen.queries.lock().unwrap().push(query.to_string());
            Ok(vec![
                Candidate::new(1, "Apple"),
                Candidate::new(2, "Orange"),
            ])
        });
        (recorder, source)
    }

    fn widget_with(source: Arc<dyn LookupSource>) -> AutocompleteInput {
        AutocompleteInput::new(source).with_debounce(DEBOUNCE)
    }

    fn type_str(widget: &mut AutocompleteInput, text: &str, now: Instant) {
        for ch in text.chars() {
            widget.handle_key(KeyCode::Char(ch), KeyModifiers::NONE, now);
        }
    }

    /// Ticks until the in-flight lookup settles. The debounce clock is
    /// virtual; only the worker thread needs real time.
    fn settle(widget: &mut AutocompleteInput, after_debounce: Instant) {
        widget.tick(after_debounce);
        let deadline = Instant::now() + Duration::from_secs(2);
        while widget.lookup_state() == LookupState::Loading && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            widget.tick(after_debounce);
        }
    }

    fn rendered_text(widget: &AutocompleteInput) -> Vec<String> {
        widget
            .draw()
            .lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn lookup_fires_once_after_the_quiet_period() {
        let start = Instant::now();
        let (recorder, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        widget.tick(start + Duration::from_millis(200));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);

        settle(&mut widget, start + DEBOUNCE);
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(widget.candidates().len(), 2);
        assert!(widget.dropdown_visible());
        assert_eq!(widget.active_index(), None);
    }

    #[test]
    fn successive_keystrokes_inside_the_window_coalesce() {
        let start = Instant::now();
        let (recorder, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "ap", start);
        type_str(&mut widget, "p", start + Duration::from_millis(100));

        settle(&mut widget, start + Duration::from_millis(100) + DEBOUNCE);
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*recorder.queries.lock().unwrap(), vec!["app".to_string()]);
    }

    #[test]
    fn short_queries_keep_the_dropdown_hidden_and_skip_the_lookup() {
        let start = Instant::now();
        let (recorder, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "a", start);
        assert!(!widget.dropdown_visible());

        settle(&mut widget, start + DEBOUNCE);
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
        assert!(!widget.dropdown_visible());
    }

    #[test]
    fn editing_clears_selection_and_reevaluates_visibility_immediately() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);
        widget.handle_key(KeyCode::Enter, KeyModifiers::NONE, start);
        assert!(widget.selected().is_some());

        let later = start + Duration::from_secs(1);
        widget.handle_key(KeyCode::Backspace, KeyModifiers::NONE, later);
        assert!(widget.selected().is_none());
        // "Appl" is still at least min_chars long.
        assert!(widget.dropdown_visible());

        widget.handle_key(KeyCode::Home, KeyModifiers::NONE, later);
        for _ in 0..3 {
            widget.handle_key(KeyCode::Delete, KeyModifiers::NONE, later);
        }
        assert_eq!(widget.query(), "l");
        assert!(!widget.dropdown_visible());
    }

    #[test]
    fn two_downs_then_enter_commit_the_second_candidate() {
        let start = Instant::now();
        let (recorder, source) = fixture_source();
        let committed = Arc::new(Mutex::new(Vec::<Candidate>::new()));
        let sink = Arc::clone(&committed);
        let mut widget = widget_with(source).with_on_select(move |candidate| {
            sink.lock().unwrap().push(candidate.clone());
        });

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);

        widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);
        widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);
        assert_eq!(widget.active_index(), Some(1));

        let result = widget.handle_key(KeyCode::Enter, KeyModifiers::NONE, start);
        assert!(result.handled);
        assert!(matches!(
            result.actions.as_slice(),
            [WidgetAction::Committed { candidate }] if candidate.name == "Orange"
        ));
        assert_eq!(widget.query(), "Orange");
        assert!(!widget.dropdown_visible());
        assert_eq!(committed.lock().unwrap().len(), 1);

        // The programmatic query change must not fire another lookup.
        settle(&mut widget, start + Duration::from_secs(10));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn commit_invalidates_lookups_still_in_flight() {
        let start = Instant::now();
        let source: Arc<dyn LookupSource> = Arc::new(|query: &str| {
            // The longer query is the slow one.
            if query == "ann" {
                std::thread::sleep(Duration::from_millis(150));
            }
            Ok(vec![
                Candidate::new(1, "Apple"),
                Candidate::new(2, "Orange"),
            ])
        });
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        assert!(widget.dropdown_visible());

        // A slower fetch goes out for the longer query...
        type_str(&mut widget, "n", start + DEBOUNCE);
        widget.tick(start + DEBOUNCE + DEBOUNCE);
        assert_eq!(widget.lookup_state(), LookupState::Loading);

        // ...and the user commits before it lands.
        widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);
        widget.handle_key(KeyCode::Enter, KeyModifiers::NONE, start);
        assert_eq!(widget.query(), "Apple");
        assert!(!widget.dropdown_visible());
        assert_eq!(widget.lookup_state(), LookupState::Idle);

        // Once the stale fetch completes it must not reopen the dropdown.
        let wait_until = Instant::now() + Duration::from_millis(400);
        while Instant::now() < wait_until {
            widget.tick(start + Duration::from_secs(60));
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!widget.dropdown_visible());
        assert_eq!(widget.query(), "Apple");
        assert_eq!(widget.lookup_state(), LookupState::Idle);
    }

    #[test]
    fn enter_with_no_active_row_changes_nothing() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let committed = Arc::new(Mutex::new(Vec::<Candidate>::new()));
        let sink = Arc::clone(&committed);
        let mut widget = widget_with(source).with_on_select(move |candidate| {
            sink.lock().unwrap().push(candidate.clone());
        });

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        assert_eq!(widget.active_index(), None);

        let result = widget.handle_key(KeyCode::Enter, KeyModifiers::NONE, start);
        assert!(!result.handled);
        assert_eq!(widget.query(), "an");
        assert!(committed.lock().unwrap().is_empty());
    }

    #[test]
    fn escape_dismisses_without_touching_query_or_active_row() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);

        let result = widget.handle_key(KeyCode::Esc, KeyModifiers::NONE, start);
        assert!(matches!(result.actions.as_slice(), [WidgetAction::Dismissed]));
        assert!(!widget.dropdown_visible());
        assert_eq!(widget.query(), "an");
        assert_eq!(widget.active_index(), Some(0));
    }

    #[test]
    fn navigation_keys_are_noops_while_the_dropdown_is_hidden() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);

        let result = widget.handle_key(KeyCode::Down, KeyModifiers::NONE, start);
        assert!(!result.handled);
        assert_eq!(widget.active_index(), None);
    }

    #[test]
    fn failing_lookup_shows_the_generic_message_and_hides_the_list() {
        let start = Instant::now();
        let source: Arc<dyn LookupSource> =
            Arc::new(|_: &str| Err(LookupError::new("503 service unavailable")));
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);

        assert_eq!(widget.lookup_state(), LookupState::Failed);
        assert!(widget.candidates().is_empty());
        assert!(!widget.dropdown_visible());
        let lines = rendered_text(&widget);
        assert!(lines.contains(&LOOKUP_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn empty_results_render_the_no_results_notice() {
        let start = Instant::now();
        let source: Arc<dyn LookupSource> = Arc::new(|_: &str| Ok(Vec::new()));
        let mut widget = widget_with(source);

        type_str(&mut widget, "zz", start);
        settle(&mut widget, start + DEBOUNCE);

        assert_eq!(widget.lookup_state(), LookupState::Empty);
        let lines = rendered_text(&widget);
        assert!(lines.contains(&"No results found".to_string()));
    }

    #[test]
    fn escape_dismisses_the_error_notice() {
        let start = Instant::now();
        let source: Arc<dyn LookupSource> =
            Arc::new(|_: &str| Err(LookupError::new("timeout")));
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        assert!(rendered_text(&widget).contains(&LOOKUP_ERROR_MESSAGE.to_string()));

        let result = widget.handle_key(KeyCode::Esc, KeyModifiers::NONE, start);
        assert!(matches!(result.actions.as_slice(), [WidgetAction::Dismissed]));
        assert!(!rendered_text(&widget).contains(&LOOKUP_ERROR_MESSAGE.to_string()));

        // Editing starts a new cycle, so notices may show again.
        widget.handle_key(KeyCode::Backspace, KeyModifiers::NONE, start);
        assert!(rendered_text(&widget).contains(&LOOKUP_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn outside_click_dismisses_the_no_results_notice() {
        let start = Instant::now();
        let source: Arc<dyn LookupSource> = Arc::new(|_: &str| Ok(Vec::new()));
        let mut widget = widget_with(source);
        widget.set_bounds(WidgetBounds::new(0, 0, 40));

        type_str(&mut widget, "zz", start);
        settle(&mut widget, start + DEBOUNCE);
        assert!(rendered_text(&widget).contains(&"No results found".to_string()));

        let outside = MouseEvent {
            kind: MouseKind::Press,
            col: 60,
            row: 10,
        };
        let result = widget.handle_mouse(outside);
        assert!(result.request_render);
        assert!(!rendered_text(&widget).contains(&"No results found".to_string()));
        assert_eq!(widget.query(), "zz");
    }

    #[test]
    fn hover_activates_and_click_commits() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);
        widget.set_bounds(WidgetBounds::new(0, 0, 40));

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);

        let hover = MouseEvent {
            kind: MouseKind::Moved,
            col: 5,
            row: 2,
        };
        widget.handle_mouse(hover);
        assert_eq!(widget.active_index(), Some(1));

        let click = MouseEvent {
            kind: MouseKind::Press,
            col: 5,
            row: 2,
        };
        let result = widget.handle_mouse(click);
        assert!(matches!(
            result.actions.as_slice(),
            [WidgetAction::Committed { candidate }] if candidate.name == "Orange"
        ));
        assert_eq!(widget.query(), "Orange");
    }

    #[test]
    fn clicking_outside_hides_the_dropdown_but_keeps_the_state() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);
        widget.set_bounds(WidgetBounds::new(0, 0, 40));

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);
        assert!(widget.dropdown_visible());

        let outside = MouseEvent {
            kind: MouseKind::Press,
            col: 60,
            row: 10,
        };
        let result = widget.handle_mouse(outside);
        assert!(!widget.dropdown_visible());
        assert!(result.request_render);
        assert_eq!(widget.query(), "an");
        assert!(widget.selected().is_none());
    }

    #[test]
    fn placeholder_shows_while_the_query_is_empty() {
        let (_, source) = fixture_source();
        let widget = widget_with(source).with_placeholder("Search fruits...");
        let lines = rendered_text(&widget);
        assert_eq!(lines[0], "Search fruits...");
    }

    #[test]
    fn candidate_rows_highlight_the_query() {
        let start = Instant::now();
        let (_, source) = fixture_source();
        let mut widget = widget_with(source);

        type_str(&mut widget, "an", start);
        settle(&mut widget, start + DEBOUNCE);

        let draw = widget.draw();
        // Row for "Orange": marker, "Or", highlighted "an", "ge".
        let orange = &draw.lines[2];
        let texts: Vec<_> = orange.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["  ", "Or", "an", "ge"]);
        assert!(orange[2].style.bold);
    }
}
