use crate::{
    chat::{ChatSession, Message, Outbound},
    error::AResult,
    transport::ChatTransport,
};
use crossbeam::channel::{self, Receiver, Sender};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Outcome of one outbound request, addressed by the seq of its [`Outbound`].
#[derive(Debug)]
pub struct Reply {
    pub seq: u64,
    pub result: AResult<String>,
}

/// Runs chat requests off the event loop. Each dispatch gets its own task, so
/// overlapping sends resolve independently and replies arrive in completion order.
pub struct ExchangeRunner {
    transport: Arc<dyn ChatTransport>,
    reply_tx: Sender<Reply>,
    pub reply_rx: Receiver<Reply>,
    handles: Vec<JoinHandle<()>>,
}

impl ExchangeRunner {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let (reply_tx, reply_rx) = channel::unbounded();
        Self {
            transport,
            reply_tx,
            reply_rx,
            handles: Vec::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        self.transport.endpoint()
    }

    pub fn dispatch(&mut self, outbound: Outbound) {
        self.handles.retain(|h| !h.is_finished());

        let transport = self.transport.clone();
        let tx = self.reply_tx.clone();

        let handle = tokio::spawn(async move {
            let result = transport.send_chat(&outbound.text, outbound.mode).await;
            if tx
                .send(Reply {
                    seq: outbound.seq,
                    result,
                })
                .is_err()
            {
                tracing::debug!(seq = outbound.seq, "reply receiver gone");
            }
        });

        self.handles.push(handle);
    }

    pub fn shutdown(&self) {
        self.handles.iter().for_each(|h| h.abort());
    }
}

impl Drop for ExchangeRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Commits the session draft and waits for the reply inline.
/// Returns the appended bot message, or `None` when nothing was sent.
pub async fn send_and_wait<'a>(
    session: &'a mut ChatSession,
    transport: &dyn ChatTransport,
) -> Option<&'a Message> {
    let outbound = session.send_message()?;
    let result = transport.send_chat(&outbound.text, outbound.mode).await;
    session.receive_reply(outbound.seq, result);
    session.last_message()
}
