use crate::execute::Session;
use crate::repl::{execute_user_input, spawn_ctrl_c};

use tokio::select;
use tokio::task::JoinError;
use tokio::{
    io::{stdin, AsyncBufReadExt, AsyncRead, BufReader},
    sync::{mpsc, oneshot},
};
use tracing::warn;

/// Runs commands read line by line from stdin until EXIT, end of input or
/// ctrl-c.
pub async fn process_from_stdin(session: Session) -> Result<Session, JoinError> {
    process_script(session, stdin()).await
}

pub async fn process_script<R>(session: Session, reader: R) -> Result<Session, JoinError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (send, mut recv) = mpsc::channel::<String>(100);
    let mut ctlrc = spawn_ctrl_c();

    let read_task = tokio::spawn(async move {
        read_lines(BufReader::new(reader), &send).await;
    });

    let process_task = tokio::spawn(async move {
        let mut session = session;
        process_lines(&mut session, &mut recv, &mut ctlrc).await;
        session
    });

    let session = process_task.await;
    // EXIT may arrive before the reader hits end of input.
    read_task.abort();
    session
}

async fn process_lines(
    session: &mut Session,
    receiver: &mut mpsc::Receiver<String>,
    ctlrc_signal: &mut oneshot::Receiver<()>,
) {
    loop {
        select! {
            _ = &mut *ctlrc_signal => {
                break;
            }
            line = receiver.recv() => {
                if execute_user_input(session, line).await {
                    break;
                }
            }
        }
    }
}

async fn read_lines<R: AsyncRead + Unpin>(reader: BufReader<R>, send: &mpsc::Sender<String>) {
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if send.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "failed to read script line");
                break;
            }
        }
    }
}
