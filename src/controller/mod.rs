//! The interactive selection and action loop

pub mod interrupt;
pub mod menu;
pub mod prompts;

use std::future::Future;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{ActionResult, ContainerDetails, ContainerId, DockPickError, LogMode, Result};
use crate::docker::ContainerEngine;
use crate::selector::{Finder, Selection, Selector};
use crate::ui::{Console, Key, Theme};

pub use interrupt::{CtrlC, InterruptAfter, InterruptSource, NoInterrupt};
pub use menu::MenuAction;
use prompts::CommitInput;

/// Where the session is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    SelectingContainer,
    /// Carries the only session state: the selected container id
    ShowingActionMenu(ContainerId),
    /// An action finished; wait for a key before redrawing the menu
    AwaitingActionInput(ContainerId),
    Terminated(ExitReason),
}

/// Why the session ended; every reason maps to exit code 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    NothingToSelect,
    Cancelled,
    Interrupted,
    /// Listing or selection failed and the user chose not to retry
    Aborted,
}

impl ExitReason {
    pub fn farewell(&self) -> &'static str {
        match self {
            ExitReason::Quit => "Goodbye!",
            ExitReason::NothingToSelect => "No containers found.",
            ExitReason::Cancelled => "No container selected. Goodbye!",
            ExitReason::Interrupted => "Interrupted. Goodbye!",
            ExitReason::Aborted => "Stopped after an error. Goodbye!",
        }
    }
}

/// Session knobs taken from configuration
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub include_stopped: bool,
    pub log_tail: usize,
    pub split_custom_command: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            include_stopped: config.general.include_stopped,
            log_tail: config.general.log_tail,
            split_custom_command: config.exec.split_custom_command,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct Controller<E, F, C>
where
    E: ContainerEngine,
    F: Finder,
    C: Console,
{
    engine: E,
    selector: Selector<F>,
    console: C,
    theme: Theme,
    settings: SessionSettings,
    interrupt: Box<dyn InterruptSource>,
    /// Message shown above the next menu render
    notice: Option<String>,
}

impl<E, F, C> Controller<E, F, C>
where
    E: ContainerEngine,
    F: Finder,
    C: Console,
{
    pub fn new(
        engine: E,
        selector: Selector<F>,
        console: C,
        theme: Theme,
        settings: SessionSettings,
        interrupt: Box<dyn InterruptSource>,
    ) -> Self {
        Self {
            engine,
            selector,
            console,
            theme,
            settings,
            interrupt,
            notice: None,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Drive the state machine until it terminates
    pub async fn run(&mut self) -> Result<ExitReason> {
        let mut state = State::SelectingContainer;
        loop {
            state = match state {
                State::Terminated(reason) => {
                    info!("Session terminated: {:?}", reason);
                    self.console.print(reason.farewell())?;
                    return Ok(reason);
                }
                other => self.step(other).await?,
            };
        }
    }

    /// Perform one transition
    pub async fn step(&mut self, state: State) -> Result<State> {
        debug!("Entering state {:?}", state);
        match state {
            State::SelectingContainer => self.select_container().await,
            State::ShowingActionMenu(id) => self.show_menu(id).await,
            State::AwaitingActionInput(id) => {
                self.console.pause(&self.theme.notice("Press any key to continue..."))?;
                Ok(State::ShowingActionMenu(id))
            }
            State::Terminated(reason) => Ok(State::Terminated(reason)),
        }
    }

    async fn select_container(&mut self) -> Result<State> {
        self.notice = None;

        let Some(listed) = self
            .interruptible(self.engine.list_containers(self.settings.include_stopped))
            .await
        else {
            return Ok(State::Terminated(ExitReason::Interrupted));
        };
        let containers = match listed {
            Ok(containers) => containers,
            Err(e) => return self.selection_failed("Could not list containers", e),
        };

        let selection = match self.selector.select_one(&containers).await {
            Ok(selection) => selection,
            Err(e) => return self.selection_failed("Container selection failed", e),
        };

        let next = match selection {
            Selection::Chosen(container) => State::ShowingActionMenu(container.id),
            Selection::Empty => State::Terminated(ExitReason::NothingToSelect),
            Selection::Cancelled => State::Terminated(ExitReason::Cancelled),
        };
        Ok(next)
    }

    /// Report a failure at the top of the loop and let the user retry or leave
    fn selection_failed(&mut self, what: &str, error: DockPickError) -> Result<State> {
        warn!("{}: {}", what, error);
        self.console
            .print(&self.theme.failure(&format!("{}: {}", what, error.user_message())))?;
        self.console
            .print(&self.theme.notice("Press r to retry, any other key to quit"))?;

        let next = match self.console.read_key()? {
            Key::Char('r') | Key::Char('R') => State::SelectingContainer,
            Key::Interrupt => State::Terminated(ExitReason::Interrupted),
            _ => State::Terminated(ExitReason::Aborted),
        };
        Ok(next)
    }

    async fn show_menu(&mut self, id: ContainerId) -> Result<State> {
        // A previous action may have changed name or status
        let Some(inspected) = self.interruptible(self.engine.inspect(&id)).await else {
            return Ok(State::Terminated(ExitReason::Interrupted));
        };
        let details = match inspected {
            Ok(details) => details,
            Err(e) => {
                warn!("Container {} is no longer available: {}", id, e);
                self.console.print(&self.theme.failure(&format!(
                    "Container {} is no longer available: {}",
                    id,
                    e.user_message()
                )))?;
                self.console.pause(&self.theme.notice("Press any key to return to the list..."))?;
                return Ok(State::SelectingContainer);
            }
        };

        self.console.clear()?;
        for line in menu::render_menu(&details, &self.theme) {
            self.console.print(&line)?;
        }
        if let Some(notice) = self.notice.take() {
            self.console.print("")?;
            self.console.print(&notice)?;
        }

        let key = self.console.read_key()?;
        if key == Key::Interrupt {
            return Ok(State::Terminated(ExitReason::Interrupted));
        }

        match MenuAction::from_key(key) {
            Some(action) => {
                info!("Action {:?} on {}", action, id);
                self.dispatch(action, id, &details).await
            }
            None => {
                debug!("Unrecognized menu key {:?}", key);
                let shown = match key {
                    Key::Char(c) => format!("'{}'", c),
                    other => format!("{:?}", other),
                };
                self.notice = Some(self.theme.notice(&format!("Invalid choice {}", shown)));
                Ok(State::ShowingActionMenu(id))
            }
        }
    }

    async fn dispatch(
        &mut self,
        action: MenuAction,
        id: ContainerId,
        details: &ContainerDetails,
    ) -> Result<State> {
        match action {
            MenuAction::Start => {
                let result = self.act("Start", self.engine.start(&id)).await;
                self.report(&result)?;
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Restart => {
                self.console.busy(&format!("Restarting {}...", details.name));
                let result = self.act("Restart", self.engine.restart(&id)).await;
                self.console.idle();
                self.report(&result)?;
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Stop | MenuAction::Remove => {
                let result = if action == MenuAction::Stop {
                    self.console.busy(&format!("Stopping {}...", details.name));
                    self.act("Stop", self.engine.stop(&id)).await
                } else {
                    self.act("Remove", self.engine.remove(&id)).await
                };
                self.console.idle();
                self.report(&result)?;
                self.console.pause(&self.theme.notice("Press any key to return to the list..."))?;
                Ok(State::SelectingContainer)
            }
            MenuAction::Logs => {
                let tail = self.settings.log_tail;
                let Some(mode) = prompts::log_mode(&mut self.console, &self.theme, tail)? else {
                    return Ok(State::ShowingActionMenu(id));
                };
                self.show_logs(&id, &details.name, mode).await?;
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Export => {
                let Some(path) = prompts::export_path(&mut self.console, &details.name)? else {
                    self.notice = Some(self.theme.notice("Export cancelled"));
                    return Ok(State::ShowingActionMenu(id));
                };
                self.console.busy(&format!("Exporting {} to {}...", details.name, path.display()));
                let result = self.act("Export", self.engine.export_to_file(&id, &path)).await;
                self.console.idle();
                self.report(&result)?;
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Commit => {
                match prompts::commit_target(&mut self.console, &self.theme)? {
                    CommitInput::Target { name, tag } => {
                        self.console
                            .busy(&format!("Committing {} as {}:{}...", details.name, name, tag));
                        let result = self
                            .act("Commit", self.engine.commit_to_image(&id, &name, &tag))
                            .await;
                        self.console.idle();
                        self.report(&result)?;
                    }
                    CommitInput::MissingName => {
                        self.report(&ActionResult::failure(
                            "Image name is required; nothing was committed",
                        ))?;
                    }
                    CommitInput::Cancelled => {
                        self.notice = Some(self.theme.notice("Commit cancelled"));
                        return Ok(State::ShowingActionMenu(id));
                    }
                }
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Shell => {
                self.console.print(&format!("Opening a shell in {}...", details.name))?;
                let result = self.act("Shell", self.engine.exec_interactive(&id, &[])).await;
                self.notice = Some(self.styled(&result));
                Ok(State::ShowingActionMenu(id))
            }
            MenuAction::Command => {
                let Some(argv) =
                    prompts::custom_command(&mut self.console, self.settings.split_custom_command)?
                else {
                    self.notice = Some(self.theme.notice("Command cancelled"));
                    return Ok(State::ShowingActionMenu(id));
                };
                if argv.is_empty() {
                    self.notice = Some(self.theme.notice("No command entered"));
                    return Ok(State::ShowingActionMenu(id));
                }
                let result = self.act("Command", self.engine.exec_interactive(&id, &argv)).await;
                self.report(&result)?;
                Ok(State::AwaitingActionInput(id))
            }
            MenuAction::Back => Ok(State::SelectingContainer),
            MenuAction::Quit => Ok(State::Terminated(ExitReason::Quit)),
        }
    }

    async fn show_logs(&mut self, id: &str, name: &str, mode: LogMode) -> Result<()> {
        self.console.clear()?;
        self.console
            .print(&self.theme.title(&format!("Logs for {} ({})", name, mode)))?;
        if mode.follows() {
            self.console
                .print(&self.theme.notice("Following; press Ctrl-C to stop"))?;
        }

        let mut stream = self.engine.stream_logs(id, mode);
        let mut interrupt = self.interrupt.next();
        let mut lines = 0usize;

        loop {
            tokio::select! {
                _ = &mut interrupt => {
                    info!("Log stream for {} interrupted after {} lines", id, lines);
                    self.console.print(&self.theme.notice("Stopped following logs"))?;
                    break;
                }
                next = stream.next() => match next {
                    Some(Ok(line)) => {
                        lines += 1;
                        self.console.print(&line)?;
                    }
                    Some(Err(e)) => {
                        self.report(&ActionResult::failure(format!(
                            "Logs failed: {}",
                            e.user_message()
                        )))?;
                        break;
                    }
                    None => {
                        debug!("Log stream for {} ended after {} lines", id, lines);
                        if lines == 0 {
                            self.console.print(&self.theme.notice("(no log output)"))?;
                        }
                        break;
                    }
                },
            }
        }
        Ok(())
    }

    /// Await an engine call unless an interrupt arrives first
    async fn interruptible<T>(&self, operation: impl Future<Output = T>) -> Option<T> {
        let interrupt = self.interrupt.next();
        tokio::select! {
            value = operation => Some(value),
            _ = interrupt => None,
        }
    }

    async fn act(
        &self,
        action: &str,
        operation: impl Future<Output = ActionResult>,
    ) -> ActionResult {
        match self.interruptible(operation).await {
            Some(result) => result,
            None => {
                info!("{} interrupted", action);
                ActionResult::failure(format!("{} interrupted", action))
            }
        }
    }

    fn styled(&self, result: &ActionResult) -> String {
        if result.succeeded {
            self.theme.success(&format!("✓ {}", result.message))
        } else {
            self.theme.failure(&format!("✗ {}", result.message))
        }
    }

    fn report(&mut self, result: &ActionResult) -> Result<()> {
        let line = self.styled(result);
        self.console.print(&line)
    }
}
