use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use list_core::{
    config::{load_settings, Settings},
    AppState, Dialogs, ListController, ListEvent, Outcome, RetainedView, RowTarget,
};
use storage::{FileStore, KeyValueStore};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    storage_key: Option<String>,
    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Add { text: String },
    Edit { old: String, new: String },
    Remove { text: String },
    Clear,
    Filter { query: String },
}

struct ConsoleDialogs {
    assume_yes: bool,
}

impl Dialogs for ConsoleDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        // An unusable terminal declines rather than removing silently.
        prompt_yes_no(message, &mut io::stdin().lock(), &mut io::stderr()).unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn prompt_yes_no(
    message: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    write!(output, "{message} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Flag values win over loaded settings; a blank storage key is ignored.
fn apply_overrides(
    mut settings: Settings,
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
) -> Settings {
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }
    if let Some(key) = storage_key.filter(|key| !key.trim().is_empty()) {
        settings.storage_key = key;
    }
    settings
}

fn run<S, D>(
    controller: &mut ListController<S, RetainedView, D>,
    state: &mut AppState,
    command: Command,
) -> Result<Outcome>
where
    S: KeyValueStore,
    D: Dialogs,
{
    let loaded = controller.handle(state, ListEvent::Load)?;

    match command {
        Command::List => Ok(loaded),
        Command::Add { text } => controller.handle(state, ListEvent::Submit { text }),
        Command::Edit { old, new } => {
            let row = state
                .row_for_text(&old)
                .with_context(|| format!("no item named '{old}'"))?;
            controller.handle(
                state,
                ListEvent::RowActivated {
                    row,
                    target: RowTarget::Body,
                },
            )?;
            controller.handle(state, ListEvent::Submit { text: new })
        }
        Command::Remove { text } => {
            let row = state
                .row_for_text(&text)
                .with_context(|| format!("no item named '{text}'"))?;
            controller.handle(
                state,
                ListEvent::RowActivated {
                    row,
                    target: RowTarget::RemoveControl,
                },
            )
        }
        Command::Clear => controller.handle(state, ListEvent::ClearAll),
        Command::Filter { query } => controller.handle(state, ListEvent::Filter { query }),
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = apply_overrides(load_settings(), cli.data_dir, cli.storage_key);

    let store = FileStore::open(settings.store_path())?;
    let mut controller = ListController::new(
        store,
        RetainedView::new(),
        ConsoleDialogs {
            assume_yes: cli.yes,
        },
        settings.storage_key,
    );
    let mut state = AppState::new();

    let outcome = run(&mut controller, &mut state, cli.command)?;
    for row in controller.view().visible_rows() {
        println!("{}", row.text);
    }

    match outcome {
        Outcome::Rejected(_) => Ok(ExitCode::FAILURE),
        Outcome::RemoveDeclined => {
            eprintln!("nothing removed");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ListError;
    use storage::MemoryStore;

    fn controller_with(items: &str) -> ListController<MemoryStore, RetainedView, ConsoleDialogs> {
        let mut store = MemoryStore::new();
        store.set_item("items", items).expect("seed");
        ListController::new(
            store,
            RetainedView::new(),
            ConsoleDialogs { assume_yes: true },
            "items",
        )
    }

    fn visible(controller: &ListController<MemoryStore, RetainedView, ConsoleDialogs>) -> Vec<String> {
        controller
            .view()
            .visible_rows()
            .map(|row| row.text.clone())
            .collect()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn prompt_accepts_yes_and_defaults_to_no() {
        let mut output = Vec::new();
        let answer = prompt_yes_no("Are you sure?", &mut "Y\n".as_bytes(), &mut output)
            .expect("prompt");
        assert!(answer);
        assert_eq!(String::from_utf8(output).expect("utf8"), "Are you sure? [y/N] ");

        let answer =
            prompt_yes_no("Are you sure?", &mut "\n".as_bytes(), &mut Vec::new()).expect("prompt");
        assert!(!answer);
    }

    #[test]
    fn prompt_reports_write_failures() {
        let err = prompt_yes_no("Are you sure?", &mut "y\n".as_bytes(), &mut BrokenPipe)
            .expect_err("should fail");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn blank_storage_key_flag_keeps_configured_key() {
        let settings = Settings {
            storage_key: "groceries".into(),
            data_dir: PathBuf::from("/default"),
        };

        let applied = apply_overrides(settings.clone(), None, Some("  ".into()));
        assert_eq!(applied.storage_key, "groceries");

        let applied = apply_overrides(
            settings,
            Some(PathBuf::from("/custom")),
            Some("chores".into()),
        );
        assert_eq!(applied.storage_key, "chores");
        assert_eq!(applied.data_dir, PathBuf::from("/custom"));
    }

    #[test]
    fn list_reports_loaded_count() {
        let mut controller = controller_with(r#"["Milk","Eggs"]"#);
        let mut state = AppState::new();

        let outcome = run(&mut controller, &mut state, Command::List).expect("list");
        assert_eq!(outcome, Outcome::Loaded { count: 2 });
        assert_eq!(visible(&controller), ["Milk", "Eggs"]);
    }

    #[test]
    fn edit_moves_replacement_to_the_end() {
        let mut controller = controller_with(r#"["Milk","Eggs"]"#);
        let mut state = AppState::new();

        run(
            &mut controller,
            &mut state,
            Command::Edit {
                old: "Milk".into(),
                new: "Bread".into(),
            },
        )
        .expect("edit");
        assert_eq!(visible(&controller), ["Eggs", "Bread"]);
    }

    #[test]
    fn editing_unknown_item_is_an_error() {
        let mut controller = controller_with(r#"["Milk"]"#);
        let mut state = AppState::new();

        let err = run(
            &mut controller,
            &mut state,
            Command::Edit {
                old: "Cheese".into(),
                new: "Bread".into(),
            },
        )
        .expect_err("should fail");
        assert!(err.to_string().contains("no item named 'Cheese'"));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut controller = controller_with(r#"["Milk"]"#);
        let mut state = AppState::new();

        let outcome = run(
            &mut controller,
            &mut state,
            Command::Add {
                text: "Milk".into(),
            },
        )
        .expect("add");
        assert_eq!(
            outcome,
            Outcome::Rejected(ListError::DuplicateItem("Milk".into()))
        );
    }

    #[test]
    fn remove_and_filter_operate_on_loaded_list() {
        let mut controller = controller_with(r#"["Milk","Eggs","Eggplant"]"#);
        let mut state = AppState::new();
        run(
            &mut controller,
            &mut state,
            Command::Remove {
                text: "Eggs".into(),
            },
        )
        .expect("remove");

        let mut state = AppState::new();
        let outcome = run(
            &mut controller,
            &mut state,
            Command::Filter {
                query: "EGG".into(),
            },
        )
        .expect("filter");
        assert_eq!(outcome, Outcome::Filtered { visible: 1 });
        assert_eq!(visible(&controller), ["Eggplant"]);
    }

    #[test]
    fn clear_deletes_the_record() {
        let mut controller = controller_with(r#"["Milk"]"#);
        let mut state = AppState::new();

        run(&mut controller, &mut state, Command::Clear).expect("clear");
        assert!(controller.store().inner().is_empty());
    }
}
