//! Interactive read loop driving a [`ControlState`].

use crate::complete::helper::MyshHelper;
use crate::complete::history::load_history_entries;
use crate::conf::ConfigurationModel;
use crate::control_state::{ControlFlow, ControlState};
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Line source for the control loop.
pub trait LineEditor {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError>;
    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool>;
}

impl LineEditor for Editor<MyshHelper, DefaultHistory> {
    fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        Editor::readline(self, prompt)
    }

    fn add_history_entry(&mut self, entry: &str) -> rustyline::Result<bool> {
        Editor::add_history_entry(self, entry)
    }
}

/// Run the interactive shell until `exit`, end of input, or an interrupt.
pub fn control_loop(config: &ConfigurationModel) -> Result<(), Box<dyn Error>> {
    let mut control_state = ControlState::new(config)?;
    let mut editor = build_editor(config, &control_state)?;
    let mut stdout = io::stdout();

    run_loop_with_editor(&mut control_state, &mut editor, &mut stdout)?;
    Ok(())
}

/// Main command control loop, generic over the line source and message sink.
pub fn run_loop_with_editor<E, W>(
    control_state: &mut ControlState,
    editor: &mut E,
    sink: &mut W,
) -> rustyline::Result<()>
where
    E: LineEditor,
    W: Write,
{
    loop {
        let prompt = control_state.prompt();
        let _ = sink.flush();

        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    editor.add_history_entry(trimmed)?;
                }

                if control_state.handle_line(&line, sink) == ControlFlow::EXIT {
                    debug!("exit requested");
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                return Err(err);
            }
        }
    }

    Ok(())
}

fn build_editor(
    config: &ConfigurationModel,
    control_state: &ControlState,
) -> rustyline::Result<Editor<MyshHelper, DefaultHistory>> {
    let mut editor = Editor::<MyshHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(MyshHelper::new(HistoryHinter {}, config.ui.color())));

    if let Some(path) = control_state.history_file() {
        match load_history_entries(path, config.history.limit()) {
            Ok(entries) => {
                for entry in entries {
                    editor.add_history_entry(entry)?;
                }
            }
            Err(err) => warn!(path = %path.display(), %err, "unable to load history file"),
        }
    }

    Ok(editor)
}
