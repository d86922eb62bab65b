#![allow(dead_code)]

use crate::common::{Event, Journal};
use quay::consume::Workload;
use quay::core::{QuayError, Result, Shutdown};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Journals every call, fails on chosen bodies and can request a stop at chosen call indexes
pub struct ScriptedWorkload {
    journal: Journal,
    failing: HashSet<String>,
    stops: Vec<(usize, Shutdown)>,
    calls: AtomicUsize,
}

impl ScriptedWorkload {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            failing: HashSet::new(),
            stops: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_on(mut self, body: &str) -> Self {
        self.failing.insert(body.to_string());
        self
    }

    pub fn stop_at(mut self, call_index: usize, shutdown: Shutdown) -> Self {
        self.stops.push((call_index, shutdown));
        self
    }
}

impl Workload for ScriptedWorkload {
    async fn process(&self, body: &str) -> Result<()> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        for (at, shutdown) in &self.stops {
            if *at == index {
                shutdown.trigger();
            }
        }

        if self.failing.contains(body) {
            self.journal.push(Event::ProcessFailed(body.to_string()));
            return Err(QuayError::Workload(format!("refusing {}", body)));
        }
        self.journal.push(Event::Processed(body.to_string()));
        Ok(())
    }
}

/// Fails the first `failures` attempts of every body, then succeeds
#[derive(Default)]
pub struct FailingFirstWorkload {
    failures: usize,
    attempts: Mutex<HashMap<String, usize>>,
}

impl FailingFirstWorkload {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn attempts(&self) -> HashMap<String, usize> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Workload for FailingFirstWorkload {
    async fn process(&self, body: &str) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(body.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if attempt <= self.failures {
            return Err(QuayError::Workload(format!("attempt {} of {}", attempt, body)));
        }
        Ok(())
    }
}
