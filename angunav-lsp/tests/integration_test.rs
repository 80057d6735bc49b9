//! Integration tests for angunav-lsp

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use tempfile::TempDir;

use angunav_lsp::config::{Config, SuffixConfig};
use angunav_lsp::error::{NavigationError, Severity};
use angunav_lsp::host::EditorHost;
use angunav_lsp::navigator::{Navigator, Outcome};
use angunav_lsp::role::{Direction, ROLE_ORDER, Role};

/// Editor double: the active file can be moved, opened files and messages
/// are recorded. Opening a file makes it the active one, like a real editor.
#[derive(Default)]
struct FakeEditor {
    active: Mutex<Option<PathBuf>>,
    opened: Mutex<Vec<PathBuf>>,
    messages: Mutex<Vec<(Severity, String)>>,
}

impl FakeEditor {
    fn with_active(path: &Path) -> Self {
        let editor = Self::default();
        *editor.active.lock().unwrap() = Some(path.to_path_buf());
        editor
    }

    fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    fn current(&self) -> Option<PathBuf> {
        self.active.lock().unwrap().clone()
    }
}

#[async_trait]
impl EditorHost for FakeEditor {
    fn active_file(&self) -> Option<PathBuf> {
        self.current()
    }

    async fn open_document(&self, path: &Path) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        *self.active.lock().unwrap() = Some(path.to_path_buf());
        Ok(())
    }

    async fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

/// Create a component directory containing the named files
fn component_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in files {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    dir
}

fn file_for(dir: &Path, role: Role) -> PathBuf {
    let suffixes = SuffixConfig::default();
    dir.join(format!("foo.{}", suffixes.suffix(role)))
}

const TRIO: [&str; 3] = [
    "foo.component.ts",
    "foo.component.html",
    "foo.component.scss",
];

/// Navigating to the role the active file already has is a no-op
#[tokio::test]
async fn test_navigate_to_same_role_is_noop() {
    let dir = component_dir(&TRIO);
    let suffixes = SuffixConfig::default();

    for role in ROLE_ORDER {
        let editor = FakeEditor::with_active(&file_for(dir.path(), role));
        let navigator = Navigator::new(&editor, &suffixes);

        let outcome = navigator.navigate_to(role).await.unwrap();
        assert_eq!(outcome, Outcome::AlreadyThere(role));
        assert!(editor.opened().is_empty());
        assert_eq!(editor.messages()[0].0, Severity::Info);
    }
}

/// Navigating to an existing sibling opens exactly that file once
#[tokio::test]
async fn test_navigate_to_existing_sibling() {
    let dir = component_dir(&TRIO);
    let suffixes = SuffixConfig::default();

    for from in ROLE_ORDER {
        for to in ROLE_ORDER.into_iter().filter(|r| *r != from) {
            let editor = FakeEditor::with_active(&file_for(dir.path(), from));
            let navigator = Navigator::new(&editor, &suffixes);

            let expected = file_for(dir.path(), to);
            let outcome = navigator.navigate_to(to).await.unwrap();
            assert_eq!(outcome, Outcome::Opened(expected.clone()));
            assert_eq!(editor.opened(), vec![expected]);
            assert!(editor.messages().is_empty());
        }
    }
}

/// A missing sibling is a warning naming the attempted path
#[tokio::test]
async fn test_navigate_to_missing_sibling_warns() {
    let dir = component_dir(&["foo.component.ts", "foo.component.scss"]);
    let suffixes = SuffixConfig::default();
    let editor = FakeEditor::with_active(&file_for(dir.path(), Role::Component));
    let navigator = Navigator::new(&editor, &suffixes);

    let err = navigator.navigate_to(Role::Template).await.unwrap_err();
    let expected = file_for(dir.path(), Role::Template);
    assert!(matches!(&err, NavigationError::TargetMissing { path } if *path == expected));

    let messages = editor.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, Severity::Warning);
    assert!(messages[0].1.contains(&expected.display().to_string()));
    assert!(editor.opened().is_empty());
}

/// Without an active editor every command reports exactly one error
#[tokio::test]
async fn test_no_active_editor() {
    let editor = FakeEditor::default();
    let configs = [
        SuffixConfig::default(),
        SuffixConfig {
            component_suffix: "ts".to_string(),
            template_suffix: "html".to_string(),
            style_suffix: "css".to_string(),
        },
    ];

    for suffixes in &configs {
        let navigator = Navigator::new(&editor, suffixes);
        for role in ROLE_ORDER {
            let err = navigator.navigate_to(role).await.unwrap_err();
            assert!(matches!(err, NavigationError::NoActiveEditor));
        }
        for direction in [Direction::Next, Direction::Prev] {
            let err = navigator.navigate_cyclic(direction).await.unwrap_err();
            assert!(matches!(err, NavigationError::NoActiveEditor));
        }
    }

    let messages = editor.messages();
    assert_eq!(messages.len(), 10);
    assert!(
        messages
            .iter()
            .all(|(sev, msg)| *sev == Severity::Error && msg == "No active editor!")
    );
    assert!(editor.opened().is_empty());
}

/// Next then previous returns to the starting file
#[tokio::test]
async fn test_cyclic_round_trip() {
    let dir = component_dir(&TRIO);
    let suffixes = SuffixConfig::default();

    for start in ROLE_ORDER {
        let origin = file_for(dir.path(), start);
        let editor = FakeEditor::with_active(&origin);
        let navigator = Navigator::new(&editor, &suffixes);

        navigator.navigate_cyclic(Direction::Next).await.unwrap();
        assert_ne!(editor.current(), Some(origin.clone()));
        navigator.navigate_cyclic(Direction::Prev).await.unwrap();
        assert_eq!(editor.current(), Some(origin));
    }
}

/// Component with both siblings: template, next and prev
#[tokio::test]
async fn test_scenario_full_trio() {
    let dir = component_dir(&TRIO);
    let suffixes = SuffixConfig::default();
    let component = file_for(dir.path(), Role::Component);
    let template = file_for(dir.path(), Role::Template);
    let style = file_for(dir.path(), Role::Style);

    let editor = FakeEditor::with_active(&component);
    let navigator = Navigator::new(&editor, &suffixes);
    assert_eq!(
        navigator.navigate_to(Role::Template).await.unwrap(),
        Outcome::Opened(template.clone())
    );

    let editor = FakeEditor::with_active(&component);
    let navigator = Navigator::new(&editor, &suffixes);
    assert_eq!(
        navigator.navigate_cyclic(Direction::Next).await.unwrap(),
        Outcome::Opened(template)
    );

    let editor = FakeEditor::with_active(&component);
    let navigator = Navigator::new(&editor, &suffixes);
    assert_eq!(
        navigator.navigate_cyclic(Direction::Prev).await.unwrap(),
        Outcome::Opened(style)
    );
}

/// Component with only a style sibling: template fails, next falls back
#[tokio::test]
async fn test_scenario_only_style_sibling() {
    let dir = component_dir(&["foo.component.ts", "foo.component.scss"]);
    let suffixes = SuffixConfig::default();
    let component = file_for(dir.path(), Role::Component);

    let editor = FakeEditor::with_active(&component);
    let navigator = Navigator::new(&editor, &suffixes);
    let err = navigator.navigate_to(Role::Template).await.unwrap_err();
    assert_eq!(err.severity(), Severity::Warning);
    assert!(
        editor.messages()[0]
            .1
            .contains(&file_for(dir.path(), Role::Template).display().to_string())
    );

    // The missing template is reported, then the style file opens
    let editor = FakeEditor::with_active(&component);
    let navigator = Navigator::new(&editor, &suffixes);
    assert_eq!(
        navigator.navigate_cyclic(Direction::Next).await.unwrap(),
        Outcome::Opened(file_for(dir.path(), Role::Style))
    );
    let messages = editor.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, Severity::Warning);
    assert!(
        messages[0]
            .1
            .contains(&file_for(dir.path(), Role::Template).display().to_string())
    );
    assert_eq!(editor.opened(), vec![file_for(dir.path(), Role::Style)]);
}

/// An unrelated file cannot be cycled from
#[tokio::test]
async fn test_scenario_unrecognized_file() {
    let dir = component_dir(&["readme.md", "readme.md.component.html"]);
    let suffixes = SuffixConfig::default();
    let editor = FakeEditor::with_active(&dir.path().join("readme.md"));
    let navigator = Navigator::new(&editor, &suffixes);

    let err = navigator.navigate_cyclic(Direction::Next).await.unwrap_err();
    assert!(matches!(err, NavigationError::UnrecognizedRole { .. }));
    assert!(editor.opened().is_empty());

    let messages = editor.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, Severity::Warning);
}

/// A lone component file has nothing to cycle to
#[tokio::test]
async fn test_cyclic_without_siblings() {
    let dir = component_dir(&["foo.component.ts"]);
    let suffixes = SuffixConfig::default();
    let editor = FakeEditor::with_active(&file_for(dir.path(), Role::Component));
    let navigator = Navigator::new(&editor, &suffixes);

    let err = navigator.navigate_cyclic(Direction::Prev).await.unwrap_err();
    assert!(matches!(err, NavigationError::NoCyclicTarget));

    // Prev visits style, then template; each miss is a warning
    let messages = editor.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].0, Severity::Warning);
    assert!(
        messages[0]
            .1
            .contains(&file_for(dir.path(), Role::Style).display().to_string())
    );
    assert_eq!(messages[1].0, Severity::Warning);
    assert!(
        messages[1]
            .1
            .contains(&file_for(dir.path(), Role::Template).display().to_string())
    );
    assert_eq!(
        messages[2],
        (
            Severity::Info,
            "No other related files to navigate to.".to_string()
        )
    );
    assert!(editor.opened().is_empty());
}

/// Configuration is read on every call, so changes apply immediately
#[tokio::test]
async fn test_config_changes_apply_to_next_command() {
    let dir = component_dir(&[
        "foo.component.ts",
        "foo.component.scss",
        "foo.component.css",
    ]);
    let config = RwLock::new(Config::default());
    let editor = FakeEditor::with_active(&dir.path().join("foo.component.ts"));
    let navigator = Navigator::new(&editor, &config);

    assert_eq!(
        navigator.navigate_to(Role::Style).await.unwrap(),
        Outcome::Opened(dir.path().join("foo.component.scss"))
    );

    config
        .write()
        .unwrap()
        .suffixes
        .set_suffix(Role::Style, ".component.css");
    *editor.active.lock().unwrap() = Some(dir.path().join("foo.component.ts"));

    assert_eq!(
        navigator.navigate_to(Role::Style).await.unwrap(),
        Outcome::Opened(dir.path().join("foo.component.css"))
    );
}

/// Suffixes without the component infix work the same way
#[tokio::test]
async fn test_plain_extension_suffixes() {
    let dir = component_dir(&["button.tsx", "button.module.css"]);
    let suffixes = SuffixConfig {
        component_suffix: "tsx".to_string(),
        template_suffix: "html".to_string(),
        style_suffix: "module.css".to_string(),
    };
    let editor = FakeEditor::with_active(&dir.path().join("button.tsx"));
    let navigator = Navigator::new(&editor, &suffixes);

    assert_eq!(
        navigator.navigate_cyclic(Direction::Next).await.unwrap(),
        Outcome::Opened(dir.path().join("button.module.css"))
    );
}
