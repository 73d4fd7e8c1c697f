use crate::command::Command;
use crate::execute::{execute_command, Session};
use crate::report::Output;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::select;
use tokio::sync::oneshot::{channel, Receiver};
use tracing::warn;

const HELP: &str = "Commands: LOAD [path], BUILD [page size], FIND key, SCAN key, STATS, EXIT";

pub async fn run_repl(mut session: Session) {
    let mut receiver = spawn_ctrl_c();
    let mut lines = BufReader::new(stdin()).lines();

    println!("Static hash index over paged records");
    println!("{}", HELP);
    loop {
        if inner_loop(&mut session, &mut lines, &mut receiver).await {
            break;
        };
    }
}

/// Resolves once ctrl-c is pressed. Never resolves if the signal handler
/// cannot be installed.
pub(crate) fn spawn_ctrl_c() -> Receiver<()> {
    let (sender, receiver) = channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = sender.send(());
            }
            Err(err) => {
                warn!(%err, "ctrl-c handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    });
    receiver
}

/// Runs one line against the session and prints what it produced.
/// Returns true when the session should end.
pub async fn execute_user_input(session: &mut Session, input: Option<String>) -> bool {
    let Some(line) = input else {
        return true;
    };
    if line.trim().is_empty() {
        return false;
    }

    let cmd = match line.parse::<Command>() {
        Ok(cmd) => cmd,
        Err(err) => {
            println!("Error: {}", err);
            return false;
        }
    };
    match execute_command(session, cmd).await {
        Ok(output @ Output::Exit) => {
            println!("{}", output);
            true
        }
        Ok(output) => {
            println!("{}", output);
            false
        }
        Err(err) => {
            println!("Error: {}", err);
            false
        }
    }
}

async fn inner_loop(
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
    receiver: &mut Receiver<()>,
) -> bool {
    select! {
        _ = receiver => {
            println!("Received ctrl-c");
            execute_user_input(session, Some("EXIT".to_string())).await
        }
        input = lines.next_line() => {
            let input = input.unwrap_or_else(|err| {
                warn!(%err, "failed to read stdin");
                None
            });
            execute_user_input(session, input).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;

    fn session() -> Session {
        Session::new(IndexConfig::new())
            .unwrap()
            .with_words(vec!["alpha".into(), "beta".into()])
    }

    #[tokio::test]
    async fn input_decides_when_to_stop() {
        let mut session = session();
        assert!(execute_user_input(&mut session, None).await);
        assert!(!execute_user_input(&mut session, Some("   ".into())).await);
        assert!(!execute_user_input(&mut session, Some("nonsense".into())).await);
        assert!(!execute_user_input(&mut session, Some("BUILD 1".into())).await);
        assert_eq!(session.store().page_count(), 2);
        assert!(!execute_user_input(&mut session, Some("FIND beta".into())).await);
        assert!(execute_user_input(&mut session, Some("exit".into())).await);
    }
}
