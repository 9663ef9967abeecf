//! Whole-session scenarios over in-memory collaborators

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use pretty_assertions::assert_eq;

use dockpick::controller::{Controller, ExitReason, InterruptAfter, NoInterrupt, SessionSettings};
use dockpick::core::{
    ActionResult, ContainerDetails, ContainerRef, ContainerStatus, DockerError, LogMode, Result,
};
use dockpick::docker::{ContainerEngine, LogStream};
use dockpick::selector::{Finder, FinderRequest, PreviewCommand, Selector};
use dockpick::ui::{Console, Key, Theme};

type Calls = Arc<Mutex<Vec<String>>>;

struct FakeEngine {
    containers: Vec<ContainerRef>,
    calls: Calls,
}

impl FakeEngine {
    fn new(containers: Vec<ContainerRef>) -> (Self, Calls) {
        let calls = Calls::default();
        (
            Self {
                containers,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn find(&self, id: &str) -> Option<&ContainerRef> {
        self.containers.iter().find(|c| c.id == id)
    }
}

#[async_trait]
impl ContainerEngine for FakeEngine {
    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerRef>> {
        self.record(format!("list all={}", include_stopped));
        Ok(self
            .containers
            .iter()
            .filter(|c| include_stopped || c.status == ContainerStatus::Running)
            .cloned()
            .collect())
    }

    async fn start(&self, id: &str) -> ActionResult {
        self.record(format!("start {}", id));
        ActionResult::success(format!("Start succeeded for {}", id))
    }

    async fn stop(&self, id: &str) -> ActionResult {
        self.record(format!("stop {}", id));
        ActionResult::success(format!("Stop succeeded for {}", id))
    }

    async fn restart(&self, id: &str) -> ActionResult {
        self.record(format!("restart {}", id));
        ActionResult::success(format!("Restart succeeded for {}", id))
    }

    async fn remove(&self, id: &str) -> ActionResult {
        self.record(format!("remove {}", id));
        ActionResult::failure("Remove failed: container is running")
    }

    async fn export_to_file(&self, id: &str, path: &Path) -> ActionResult {
        self.record(format!("export {} {}", id, path.display()));
        ActionResult::success(format!("Exported {} to {}", id, path.display()))
    }

    async fn commit_to_image(&self, id: &str, name: &str, tag: &str) -> ActionResult {
        self.record(format!("commit {} {}:{}", id, name, tag));
        ActionResult::success(format!("Committed {} as {}:{}", id, name, tag))
    }

    fn stream_logs(&self, id: &str, mode: LogMode) -> LogStream {
        self.record(format!("logs {} {:?}", id, mode));
        let lines = stream::iter(vec![Ok("booting".to_string()), Ok("ready".to_string())]);
        if mode.follows() {
            lines.chain(stream::pending()).boxed()
        } else {
            lines.boxed()
        }
    }

    async fn exec_interactive(&self, id: &str, command: &[String]) -> ActionResult {
        self.record(format!("exec {} {:?}", id, command));
        ActionResult::success("exec finished")
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        self.record(format!("inspect {}", id));
        let container = self
            .find(id)
            .ok_or_else(|| DockerError::Container(format!("No such container: {}", id)))?;
        Ok(ContainerDetails {
            id: container.short_id().to_string(),
            name: container.name.clone(),
            image: container.image.clone(),
            status: container.status,
            status_text: container.status.to_string(),
            created: None,
            health: None,
            restart_policy: None,
            bind_mounts: vec![],
            ports: vec![],
            networks: vec![],
        })
    }
}

/// Picks the row naming the next scripted container, or cancels
struct ScriptedFinder {
    picks: Mutex<VecDeque<Option<&'static str>>>,
    opened: Arc<Mutex<usize>>,
}

impl ScriptedFinder {
    fn new(picks: &[Option<&'static str>]) -> (Self, Arc<Mutex<usize>>) {
        let opened = Arc::new(Mutex::new(0));
        (
            Self {
                picks: Mutex::new(picks.iter().copied().collect()),
                opened: opened.clone(),
            },
            opened,
        )
    }
}

#[async_trait]
impl Finder for ScriptedFinder {
    async fn pick(&self, request: &FinderRequest) -> Result<Option<String>> {
        *self.opened.lock().unwrap() += 1;
        let next = self.picks.lock().unwrap().pop_front().flatten();
        Ok(next.and_then(|name| {
            request
                .rows
                .iter()
                .find(|row| row.split('\t').nth(1).map_or(false, |f| f.contains(name)))
                .cloned()
        }))
    }
}

struct ScriptedConsole {
    keys: VecDeque<Key>,
    lines: VecDeque<Option<String>>,
    output: Vec<String>,
}

impl ScriptedConsole {
    fn new(keys: &[Key], lines: &[Option<&str>]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            lines: lines.iter().map(|l| l.map(str::to_string)).collect(),
            output: Vec::new(),
        }
    }

    fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn print(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        Ok(self.keys.pop_front().unwrap_or(Key::Interrupt))
    }

    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front().flatten())
    }
}

fn container(id: &str, name: &str, status: ContainerStatus) -> ContainerRef {
    ContainerRef {
        id: id.to_string(),
        name: name.to_string(),
        image: format!("{}:latest", name),
        status,
    }
}

fn fleet() -> Vec<ContainerRef> {
    vec![
        container("aaaaaaaaaaaa0001", "web", ContainerStatus::Running),
        container("bbbbbbbbbbbb0002", "db", ContainerStatus::Exited),
    ]
}

fn session(
    engine: FakeEngine,
    finder: ScriptedFinder,
    console: ScriptedConsole,
    settings: SessionSettings,
    interrupt: Box<dyn dockpick::controller::InterruptSource>,
) -> Controller<FakeEngine, ScriptedFinder, ScriptedConsole> {
    let preview = PreviewCommand {
        program: PathBuf::from("dockpick"),
        host: None,
        config: None,
    };
    Controller::new(
        engine,
        Selector::new(finder, preview, Theme::plain()),
        console,
        Theme::plain(),
        settings,
        interrupt,
    )
}

fn plain_session(
    engine: FakeEngine,
    finder: ScriptedFinder,
    console: ScriptedConsole,
) -> Controller<FakeEngine, ScriptedFinder, ScriptedConsole> {
    session(engine, finder, console, SessionSettings::default(), Box::new(NoInterrupt))
}

fn calls(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().clone()
}

#[tokio::test]
async fn stop_returns_to_selection_then_cancel_exits() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, opened) = ScriptedFinder::new(&[Some("web"), None]);
    let console = ScriptedConsole::new(&[Key::Char('2'), Key::Enter], &[]);

    let mut controller = plain_session(engine, finder, console);
    let reason = controller.run().await.unwrap();

    assert_eq!(reason, ExitReason::Cancelled);
    assert_eq!(*opened.lock().unwrap(), 2);
    assert_eq!(
        calls(&log),
        vec![
            "list all=true",
            "inspect aaaaaaaaaaaa0001",
            "stop aaaaaaaaaaaa0001",
            "list all=true",
        ]
    );
    assert!(controller.console().printed("Stop succeeded"));
    assert!(controller.console().printed("No container selected"));
}

#[tokio::test]
async fn quit_from_menu_performs_no_action() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, _) = ScriptedFinder::new(&[Some("db")]);
    let console = ScriptedConsole::new(&[Key::Char('q')], &[]);

    let mut controller = plain_session(engine, finder, console);

    assert_eq!(controller.run().await.unwrap(), ExitReason::Quit);
    assert_eq!(calls(&log), vec!["list all=true", "inspect bbbbbbbbbbbb0002"]);
    assert!(controller.console().printed("Container: db (bbbbbbbbbbbb)"));
    assert!(controller.console().printed("Goodbye!"));
}

#[tokio::test]
async fn no_containers_never_opens_finder() {
    let (engine, log) = FakeEngine::new(vec![]);
    let (finder, opened) = ScriptedFinder::new(&[]);
    let console = ScriptedConsole::new(&[], &[]);

    let mut controller = plain_session(engine, finder, console);

    assert_eq!(controller.run().await.unwrap(), ExitReason::NothingToSelect);
    assert_eq!(*opened.lock().unwrap(), 0);
    assert_eq!(calls(&log), vec!["list all=true"]);
}

#[tokio::test]
async fn running_only_listing_excludes_stopped() {
    let (engine, log) = FakeEngine::new(vec![container(
        "bbbbbbbbbbbb0002",
        "db",
        ContainerStatus::Exited,
    )]);
    let (finder, opened) = ScriptedFinder::new(&[Some("db")]);
    let settings = SessionSettings {
        include_stopped: false,
        ..SessionSettings::default()
    };

    let mut controller = session(
        engine,
        finder,
        ScriptedConsole::new(&[], &[]),
        settings,
        Box::new(NoInterrupt),
    );

    assert_eq!(controller.run().await.unwrap(), ExitReason::NothingToSelect);
    assert_eq!(*opened.lock().unwrap(), 0);
    assert_eq!(calls(&log), vec!["list all=false"]);
}

#[tokio::test]
async fn start_acknowledge_back_and_leave() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, _) = ScriptedFinder::new(&[Some("db"), None]);
    let console = ScriptedConsole::new(&[Key::Char('1'), Key::Enter, Key::Char('b')], &[]);

    let mut controller = plain_session(engine, finder, console);

    assert_eq!(controller.run().await.unwrap(), ExitReason::Cancelled);
    assert_eq!(
        calls(&log),
        vec![
            "list all=true",
            "inspect bbbbbbbbbbbb0002",
            "start bbbbbbbbbbbb0002",
            "inspect bbbbbbbbbbbb0002",
            "list all=true",
        ]
    );
}

#[tokio::test]
async fn export_and_commit_take_prompted_parameters() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, _) = ScriptedFinder::new(&[Some("web")]);
    let console = ScriptedConsole::new(
        &[Key::Char('8'), Key::Enter, Key::Char('9'), Key::Enter, Key::Char('q')],
        &[Some("/tmp/web-backup.tar"), Some("team/web"), Some("v2")],
    );

    let mut controller = plain_session(engine, finder, console);

    assert_eq!(controller.run().await.unwrap(), ExitReason::Quit);
    let log = calls(&log);
    assert!(log.contains(&"export aaaaaaaaaaaa0001 /tmp/web-backup.tar".to_string()));
    assert!(log.contains(&"commit aaaaaaaaaaaa0001 team/web:v2".to_string()));
}

#[tokio::test]
async fn custom_command_runs_as_argv() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, _) = ScriptedFinder::new(&[Some("web")]);
    let console = ScriptedConsole::new(
        &[Key::Char('7'), Key::Enter, Key::Char('q')],
        &[Some("cat /etc/hostname")],
    );

    let mut controller = plain_session(engine, finder, console);

    assert_eq!(controller.run().await.unwrap(), ExitReason::Quit);
    assert!(calls(&log)
        .contains(&r#"exec aaaaaaaaaaaa0001 ["cat", "/etc/hostname"]"#.to_string()));
}

#[tokio::test(start_paused = true)]
async fn interrupt_stops_following_logs_and_session_continues() {
    let (engine, log) = FakeEngine::new(fleet());
    let (finder, _) = ScriptedFinder::new(&[Some("web")]);
    let console = ScriptedConsole::new(
        &[Key::Char('5'), Key::Char('2'), Key::Enter, Key::Char('q')],
        &[],
    );

    let mut controller = session(
        engine,
        finder,
        console,
        SessionSettings::default(),
        Box::new(InterruptAfter(Duration::from_secs(2))),
    );

    assert_eq!(controller.run().await.unwrap(), ExitReason::Quit);
    assert!(calls(&log).contains(&"logs aaaaaaaaaaaa0001 Follow".to_string()));
    assert!(controller.console().printed("ready"));
    assert!(controller.console().printed("Stopped following logs"));
}
