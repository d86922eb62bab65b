#![allow(dead_code)]

use quay::core::{
    Context, Forum, Message, QuayError, QueueClient, ReceiveRequest, Result, SendEntry, Shutdown,
    generate_id,
};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Everything that happened across the queue and the workload, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Received(ReceiveRequest, usize),
    Processed(String),
    ProcessFailed(String),
    Deleted(String),
    DeleteFailed(String),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn receives(&self) -> Vec<ReceiveRequest> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Received(request, _) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Deleted(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    pub fn attempted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Processed(body) | Event::ProcessFailed(body) => Some(body),
                _ => None,
            })
            .collect()
    }
}

pub enum Step {
    Batch(Vec<&'static str>),
    Fail,
}

/// Queue that replays prepared receive results and records every call.
///
/// Once the script runs out it stops the consumer (when given a flag) and
/// answers with empty batches.
pub struct ScriptedQueue {
    steps: Mutex<VecDeque<Step>>,
    journal: Journal,
    undeletable: HashSet<String>,
    stop_when_drained: Option<Shutdown>,
}

impl ScriptedQueue {
    pub fn new(journal: Journal, steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            journal,
            undeletable: HashSet::new(),
            stop_when_drained: None,
        }
    }

    pub fn stop_when_drained(mut self, shutdown: Shutdown) -> Self {
        self.stop_when_drained = Some(shutdown);
        self
    }

    pub fn fail_delete_of(mut self, body: &str) -> Self {
        self.undeletable.insert(body.to_string());
        self
    }
}

pub fn message(body: &str) -> Message {
    Message {
        id: format!("id-{}", body),
        body: body.to_string(),
        receipt: format!("receipt-{}", body),
        receive_count: 1,
    }
}

impl QueueClient for ScriptedQueue {
    async fn receive(&self, request: ReceiveRequest) -> Result<Vec<Message>> {
        request.validate()?;
        let step = self.steps.lock().unwrap().pop_front();
        let batch = match step {
            Some(Step::Batch(bodies)) => bodies.into_iter().map(message).collect(),
            Some(Step::Fail) => {
                self.journal.push(Event::Received(request, 0));
                return Err(QuayError::Redis(redis::RedisError::from((
                    redis::ErrorKind::IoError,
                    "connection refused",
                ))));
            }
            None => {
                if let Some(shutdown) = &self.stop_when_drained {
                    shutdown.trigger();
                }
                Vec::new()
            }
        };
        self.journal.push(Event::Received(request, batch.len()));
        Ok(batch)
    }

    async fn delete(&self, message: &Message) -> Result<()> {
        if self.undeletable.contains(&message.body) {
            self.journal.push(Event::DeleteFailed(message.body.clone()));
            return Err(QuayError::ReceiptExpired(message.id.clone()));
        }
        self.journal.push(Event::Deleted(message.body.clone()));
        Ok(())
    }

    async fn send(&self, _: &[SendEntry]) -> Result<()> {
        Ok(())
    }
}

/// Redis used by the `#[ignore]`d backend tests, one fresh queue per call
pub fn create_test_context() -> Context {
    let redis_url = std::env::var("QUAY_TEST_REDIS_URL")
        .unwrap_or_else(|_| "redis://localhost:6379".to_string());
    Forum::new(&redis_url)
        .expect("Failed to create Redis pool")
        .queue(&format!("test-{}", generate_id()))
}
