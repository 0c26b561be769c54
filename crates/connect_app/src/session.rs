use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use connect_core::{update, DialogState, Msg, SessionPhase};
use connect_logging::connect_debug;

use crate::effects::EffectRunner;
use crate::render;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// One line of user input, interpreted for the quick-open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Query(String),
    Open(usize),
    Clear,
    Close,
    Invalid(String),
}

pub fn parse_input(line: &str) -> InputCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return InputCommand::Query(trimmed.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open" | "o"), Some(index)) => match index.parse::<usize>() {
            Ok(number) if number >= 1 => InputCommand::Open(number - 1),
            _ => InputCommand::Invalid(format!("not a list position: {index}")),
        },
        (Some("clear"), None) => InputCommand::Clear,
        (Some("close" | "quit" | "q"), None) => InputCommand::Close,
        _ => InputCommand::Invalid(format!("unknown command :{command}")),
    }
}

fn to_msg(command: InputCommand) -> Option<Msg> {
    match command {
        InputCommand::Query(query) => Some(Msg::QueryChanged(query)),
        InputCommand::Open(index) => Some(Msg::ItemSelected(index)),
        InputCommand::Clear => Some(Msg::ClearHistoryRequested),
        InputCommand::Close => Some(Msg::DialogClosed),
        InputCommand::Invalid(_) => None,
    }
}

/// Interactive quick-open session on stdin/stdout. Returns when the dialog
/// closes, either by selection, `:close`, or end of input.
pub fn run_session(runner: EffectRunner) -> io::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    spawn_stdin_reader(msg_tx);

    let mut state = DialogState::new();
    let mut out = io::stdout();
    writeln!(
        out,
        "Type a host or URL. `:open N` connects, `:clear` forgets history, `:close` exits."
    )?;
    dispatch(&mut state, &runner, Msg::DialogOpened, &mut out)?;

    while state.phase() != SessionPhase::Idle {
        match msg_rx.recv_timeout(POLL_INTERVAL) {
            Ok(msg) => dispatch(&mut state, &runner, msg, &mut out)?,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                dispatch(&mut state, &runner, Msg::DialogClosed, &mut out)?;
            }
        }
        for msg in runner.poll() {
            dispatch(&mut state, &runner, msg, &mut out)?;
        }
    }

    runner.shutdown();
    Ok(())
}

fn dispatch(
    state: &mut DialogState,
    runner: &EffectRunner,
    msg: Msg,
    out: &mut impl Write,
) -> io::Result<()> {
    let delivered = matches!(msg, Msg::CandidatesDelivered { .. });
    let current = std::mem::take(state);
    let (mut next, effects) = update(current, msg);
    let was_dirty = next.consume_dirty();
    *state = next;
    runner.enqueue(effects);

    if was_dirty && delivered {
        write!(out, "{}", render::render_dialog(&state.view()))?;
        out.flush()?;
    }
    Ok(())
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let command = parse_input(&line);
            if let InputCommand::Invalid(reason) = &command {
                eprintln!("{reason}");
                continue;
            }
            connect_debug!("input {:?}", command);
            if let Some(msg) = to_msg(command) {
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        }
    });
}
