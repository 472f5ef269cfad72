use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// Synchronous commands ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Quit and terminal
/// commands are ignored.
///
/// Subscriptions are not started unless [`connect`](TestProgram::connect)
/// is called from inside a tokio runtime. Once connected, the harness
/// reconciles subscriptions after every update exactly like
/// [`Program`](crate::Program), so tests can observe listeners being
/// attached and released and can feed events through
/// [`host::dispatch`](crate::host::dispatch).
///
/// # Example
///
/// ```rust,ignore
/// use chime_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Form>::new(());
/// prog.send(Msg::Start(time_picker::Message::Toggle));
/// assert!(prog.model().start.is_open());
///
/// let output = prog.render_string(40, 20);
/// assert!(output.contains("00:00"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    live: Option<Live<M::Message>>,
}

struct Live<Msg: Send + 'static> {
    manager: SubscriptionManager<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            live: None,
        };
        program.collect_sync_messages(init_cmd);
        program
    }

    /// Start running subscriptions. Must be called inside a tokio runtime.
    pub fn connect(&mut self) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.live = Some(Live {
            manager: SubscriptionManager::new(tx),
            rx,
        });
        self.reconcile();
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
        self.reconcile();
    }

    /// Process pending synchronous messages until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Wait for the next message produced by a running subscription and
    /// apply it. Returns `false` when no subscription can produce one.
    ///
    /// Wrap in `tokio::time::timeout` when the message may never come.
    pub async fn recv(&mut self) -> bool {
        let Some(live) = self.live.as_mut() else {
            return false;
        };
        match live.rx.recv().await {
            Some(msg) => {
                self.send(msg);
                true
            }
            None => false,
        }
    }

    /// Ids of the subscriptions that are running (when connected) or that the
    /// model currently declares (when not).
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        match &self.live {
            Some(live) => live.manager.active_ids(),
            None => self
                .model
                .subscriptions()
                .iter()
                .map(|sub| sub.id().clone())
                .collect(),
        }
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn reconcile(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.manager.reconcile(self.model.subscriptions());
        }
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            // Quitting and terminal modes have no meaning headless.
            CommandInner::None | CommandInner::Action(Action::Quit) | CommandInner::Terminal(_) => {}
        }
    }
}

impl<M: Model> Drop for TestProgram<M> {
    fn drop(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.manager.shutdown();
        }
    }
}

/// Flatten a buffer into text, one line per row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
