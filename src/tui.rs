use crate::{
    chat::{ChatSession, Mode, Visibility},
    config::Config,
    error::AResult,
    runner::{ExchangeRunner, Reply},
    transport::ChatTransport,
    widgets::{self, PanelWidget},
};
use crossbeam::channel::{self, Receiver, Sender};
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Direction, Layout, Margin},
    prelude::Backend,
    style::Style,
    widgets::{StatefulWidget, Widget},
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};
use throbber_widgets_tui::ThrobberState;
use tokio::task::JoinHandle;
use tui_textarea::TextArea;
use tui_widgets::scrollview::ScrollViewState;

pub struct AppState<'a> {
    pub session: ChatSession,
    pub textarea: TextArea<'a>,
    pub runner: ExchangeRunner,
    pub scroll_state: ScrollViewState,
    pub spinner_state: ThrobberState,
    pub popup_state: PopupState,
    pub config: Config,
}

#[derive(Default, PartialEq, Eq, Debug)]
pub enum PopupState {
    #[default]
    None,
    Help,
}

impl<'a> AppState<'a> {
    pub fn new(config: Config, transport: Arc<dyn ChatTransport>) -> Self {
        let mut session = ChatSession::new().with_mode(config.default_mode);
        if config.start_open {
            session.toggle_open();
        }

        Self {
            session,
            textarea: TextArea::default(),
            runner: ExchangeRunner::new(transport),
            scroll_state: ScrollViewState::default(),
            spinner_state: ThrobberState::default(),
            popup_state: PopupState::None,
            config,
        }
    }

    /// Typing reaches the draft only when the input box is on screen.
    pub fn input_reachable(&self) -> bool {
        self.session.visibility() == Visibility::Expanded && self.popup_state == PopupState::None
    }

    fn sync_draft(&mut self) {
        self.session.set_draft(self.textarea.lines().join("\n"));
    }

    pub fn send(&mut self) {
        if !self.input_reachable() {
            return;
        }

        self.sync_draft();
        if let Some(outbound) = self.session.send_message() {
            self.textarea = TextArea::default();
            self.runner.dispatch(outbound);
            self.scroll_state.scroll_to_bottom();
        }
    }

    pub fn apply_reply(&mut self, reply: Reply) {
        if self.session.receive_reply(reply.seq, reply.result) {
            self.scroll_state.scroll_to_bottom();
        }
    }

    /// Returns false once the app should exit.
    pub fn handle(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Tick => self.spinner_state.calc_next(),
            TuiEvent::Exit => return false,
            TuiEvent::ToggleOpen => _ = self.session.toggle_open(),
            TuiEvent::ToggleMinimize => _ = self.session.toggle_minimize(),
            TuiEvent::NextMode => self.session.set_mode(self.session.mode().next()),
            TuiEvent::PrevMode => self.session.set_mode(self.session.mode().prev()),
            TuiEvent::SelectMode(mode) => self.session.set_mode(mode),
            TuiEvent::ToggleHelp => {
                self.popup_state = match self.popup_state {
                    PopupState::Help => PopupState::None,
                    PopupState::None => PopupState::Help,
                }
            }
            TuiEvent::Dismiss => self.popup_state = PopupState::None,
            TuiEvent::Send => self.send(),
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::Paste(text) => {
                if self.input_reachable() {
                    self.textarea.insert_str(text);
                    self.sync_draft();
                }
            }
            TuiEvent::Key(key) => {
                if self.input_reachable() {
                    self.textarea.input(key);
                    self.sync_draft();
                }
            }
            TuiEvent::Resize => (),
        }

        true
    }
}

pub async fn run<T>(mut terminal: Terminal<T>, config: Config) -> AResult<()>
where
    T: Backend,
{
    let transport = crate::transport::from_config(&config)?;
    let mut state = AppState::new(config, transport);
    let input = InputRunner::new();
    let replies = state.runner.reply_rx.clone();

    tracing::info!("chat widget mounted");

    loop {
        let keep_running = crossbeam::channel::select! {
            recv(replies) -> reply => {
                if let Ok(reply) = reply {
                    state.apply_reply(reply);
                }
                true
            }
            recv(input.rx) -> event => match event {
                Ok(event) => state.handle(event),
                Err(_) => false,
            },
        };

        if !keep_running {
            break;
        }

        terminal.draw(render(&mut state))?;
    }

    if state.session.is_pending() {
        tracing::warn!(
            pending = state.session.pending_count(),
            "exiting with unanswered messages"
        );
    }

    state.runner.shutdown();
    tracing::info!("chat widget unmounted");
    Ok(())
}

pub fn render(state: &mut AppState) -> impl FnOnce(&mut Frame) {
    move |frame| {
        let theme = state.config.theme;
        let window = frame.area();

        let [page_window, status_window] = Layout::new(
            Direction::Vertical,
            [Constraint::Fill(1), Constraint::Length(1)],
        )
        .areas(window);

        frame
            .buffer_mut()
            .set_style(window, Style::new().bg(theme.background));

        let endpoint = state.runner.endpoint();
        widgets::PageWidget::new(theme, &endpoint).render(page_window, frame.buffer_mut());

        // --------------
        // floating widget

        match state.session.visibility() {
            Visibility::Closed => {
                widgets::LauncherWidget::new(theme).render(page_window, frame.buffer_mut())
            }
            Visibility::Minimized => {
                PanelWidget::new(true, theme).render(page_window, frame.buffer_mut())
            }
            Visibility::Expanded => {
                let panel = PanelWidget::new(false, theme);
                let areas = panel.areas(page_window);
                panel.render(page_window, frame.buffer_mut());

                widgets::ChatWidget {
                    messages: state.session.transcript(),
                    theme,
                }
                .render(
                    areas.transcript,
                    frame.buffer_mut(),
                    &mut state.scroll_state,
                );

                widgets::ModeBarWidget::new(state.session.mode(), theme)
                    .render(areas.modes, frame.buffer_mut());

                widgets::PromptWidget::new(&state.textarea, theme)
                    .render(areas.input, frame.buffer_mut());
            }
        }

        // --------------
        // status line

        widgets::StatusLineWidget::new(
            state.session.pending_count(),
            state.session.mode(),
            endpoint,
            theme,
        )
        .render(
            status_window,
            frame.buffer_mut(),
            &mut state.spinner_state,
        );

        if state.popup_state == PopupState::Help {
            let modal = window.inner(Margin::new(4, 2));
            widgets::HelpWidget::new(theme).render(modal, frame.buffer_mut());
        }
    }
}

struct InputRunner {
    handle: JoinHandle<()>,
    stop: Arc<AtomicBool>,
    rx: Receiver<TuiEvent>,
}

impl InputRunner {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        let _stop = stop.clone();

        let handle = tokio::task::spawn_blocking(move || {
            if let Err(err) = handle_input(tx, _stop) {
                tracing::debug!(error = %err, "input loop ended");
            }
        });

        Self { handle, stop, rx }
    }
}

impl Drop for InputRunner {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.abort();
    }
}

fn handle_input(tx: Sender<TuiEvent>, stop: Arc<AtomicBool>) -> AResult<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                event::Event::Key(key) => {
                    if key.kind == event::KeyEventKind::Press {
                        tx.send(map_key(key))?;
                    }
                }
                event::Event::Paste(content) => tx.send(TuiEvent::Paste(content))?,
                event::Event::Resize(_, _) => tx.send(TuiEvent::Resize)?,
                event::Event::Mouse(mouse_event) => match mouse_event.kind {
                    event::MouseEventKind::ScrollDown => tx.send(TuiEvent::ScrollDown)?,
                    event::MouseEventKind::ScrollUp => tx.send(TuiEvent::ScrollUp)?,
                    _ => (),
                },
                event::Event::FocusGained | event::Event::FocusLost => (),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            tx.send(TuiEvent::Tick)?;
        }
    }

    Ok(())
}

pub fn map_key(key: KeyEvent) -> TuiEvent {
    let is_alt = key.modifiers.contains(KeyModifiers::ALT);
    let is_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let is_shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter if !is_alt && !is_ctrl && !is_shift => TuiEvent::Send,
        KeyCode::Char('c') if is_ctrl => TuiEvent::Exit,
        KeyCode::Char('o') if is_ctrl => TuiEvent::ToggleOpen,
        KeyCode::Char('t') if is_ctrl => TuiEvent::ToggleMinimize,
        KeyCode::Char('1') if is_alt => TuiEvent::SelectMode(Mode::ResumeJob),
        KeyCode::Char('2') if is_alt => TuiEvent::SelectMode(Mode::JobMatch),
        KeyCode::Char('3') if is_alt => TuiEvent::SelectMode(Mode::Info),
        KeyCode::Tab => TuiEvent::NextMode,
        KeyCode::BackTab => TuiEvent::PrevMode,
        KeyCode::F(1) => TuiEvent::ToggleHelp,
        KeyCode::Esc => TuiEvent::Dismiss,
        KeyCode::Up => TuiEvent::ScrollUp,
        KeyCode::Down => TuiEvent::ScrollDown,
        KeyCode::Enter => TuiEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        _ => TuiEvent::Key(key),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TuiEvent {
    Tick,
    Resize,
    ScrollUp,
    ScrollDown,
    Send,
    Exit,
    ToggleOpen,
    ToggleMinimize,
    NextMode,
    PrevMode,
    SelectMode(Mode),
    ToggleHelp,
    Dismiss,
    Paste(String),
    Key(KeyEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chat::Message, error::ChatError};
    use ratatui::backend::TestBackend;

    struct EchoTransport;

    #[async_trait::async_trait]
    impl ChatTransport for EchoTransport {
        async fn send_chat(&self, text: &str, _mode: Mode) -> AResult<String> {
            Ok(format!("echo: {text}"))
        }

        fn endpoint(&self) -> String {
            "POST http://test/chat".into()
        }
    }

    fn app() -> AppState<'static> {
        AppState::new(Config::default(), Arc::new(EchoTransport))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle(TuiEvent::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )));
        }
    }

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(render(state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn key_mapping() {
        let key = |code, mods| map_key(KeyEvent::new(code, mods));

        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), TuiEvent::Send);
        assert_eq!(
            key(KeyCode::Enter, KeyModifiers::ALT),
            TuiEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
        assert_eq!(
            key(KeyCode::Char('o'), KeyModifiers::CONTROL),
            TuiEvent::ToggleOpen
        );
        assert_eq!(
            key(KeyCode::Char('t'), KeyModifiers::CONTROL),
            TuiEvent::ToggleMinimize
        );
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), TuiEvent::Exit);
        assert_eq!(
            key(KeyCode::Char('2'), KeyModifiers::ALT),
            TuiEvent::SelectMode(Mode::JobMatch)
        );
        assert_eq!(
            key(KeyCode::Char('o'), KeyModifiers::NONE),
            TuiEvent::Key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn typing_is_ignored_while_closed_or_minimized() {
        let mut state = app();
        type_text(&mut state, "hi");
        assert_eq!(state.session.draft(), "");

        state.handle(TuiEvent::ToggleOpen);
        state.handle(TuiEvent::ToggleMinimize);
        type_text(&mut state, "hi");
        assert_eq!(state.session.draft(), "");

        state.handle(TuiEvent::ToggleMinimize);
        type_text(&mut state, "hi");
        assert_eq!(state.session.draft(), "hi");
    }

    #[test]
    fn help_popup_blocks_typing() {
        let mut state = app();
        state.handle(TuiEvent::ToggleOpen);
        state.handle(TuiEvent::ToggleHelp);
        type_text(&mut state, "x");
        assert_eq!(state.session.draft(), "");

        state.handle(TuiEvent::Dismiss);
        type_text(&mut state, "x");
        assert_eq!(state.session.draft(), "x");
    }

    #[test]
    fn mode_events_cycle() {
        let mut state = app();
        state.handle(TuiEvent::NextMode);
        assert_eq!(state.session.mode(), Mode::JobMatch);
        state.handle(TuiEvent::PrevMode);
        state.handle(TuiEvent::PrevMode);
        assert_eq!(state.session.mode(), Mode::Info);
        state.handle(TuiEvent::SelectMode(Mode::ResumeJob));
        assert_eq!(state.session.mode(), Mode::ResumeJob);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn send_clears_input_and_reply_lands() {
        let mut state = app();
        state.handle(TuiEvent::ToggleOpen);
        type_text(&mut state, "Hello");
        state.handle(TuiEvent::Send);

        assert_eq!(state.session.transcript(), &[Message::user("Hello")]);
        assert_eq!(state.textarea.lines(), [""]);
        assert_eq!(state.session.draft(), "");

        let reply = state
            .runner
            .reply_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("reply in time");
        state.apply_reply(reply);
        assert_eq!(state.session.transcript()[1], Message::bot("echo: Hello"));
    }

    #[test]
    fn whitespace_send_does_nothing() {
        let mut state = app();
        state.handle(TuiEvent::ToggleOpen);
        type_text(&mut state, "   ");
        state.handle(TuiEvent::Send);
        assert!(state.session.transcript().is_empty());
        assert_eq!(state.session.draft(), "   ");
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut state = app();
        assert!(state.handle(TuiEvent::Tick));
        assert!(!state.handle(TuiEvent::Exit));
    }

    #[test]
    fn closed_screen_shows_launcher() {
        let mut state = app();
        let text = screen(&mut state);
        assert!(text.contains("Chat"));
        assert!(text.contains("ctrl+o"));
        assert!(!text.contains("Chatbot"));
        assert!(!text.contains("Job Match"));
    }

    #[test]
    fn open_screen_shows_panel_and_modes() {
        let mut state = app();
        state.handle(TuiEvent::ToggleOpen);
        state.session.set_draft("Hello");
        let out = state.session.send_message().unwrap();
        state.session.receive_reply(
            out.seq,
            Err(ChatError::BadStatus(reqwest::StatusCode::BAD_GATEWAY)),
        );

        let text = screen(&mut state);
        assert!(text.contains("Chatbot"));
        assert!(text.contains("Resume-Job"));
        assert!(text.contains("Job Match"));
        assert!(text.contains("Info"));
        assert!(text.contains("Hello"));
    }

    #[test]
    fn minimized_screen_hides_modes() {
        let mut state = app();
        state.handle(TuiEvent::ToggleOpen);
        state.handle(TuiEvent::ToggleMinimize);
        let text = screen(&mut state);
        assert!(text.contains("Chatbot"));
        assert!(!text.contains("Job Match"));
    }
}
