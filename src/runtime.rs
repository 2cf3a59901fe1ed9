//! Runtime - drives a [`Page`] over a [`Transport`]
//!
//! Messages go through [`update`]; `Send` commands queue requests, which
//! [`Runtime::step`] executes one at a time, feeding each response back in as
//! `Msg::Response`. Requests are queued rather than sent immediately so that
//! several can be in flight at once, as they would be in a browser.

use std::collections::VecDeque;

use crate::ajax::HttpRequest;
use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{Page, Ticket};
use crate::transport::Transport;
use crate::update::update;

pub struct Runtime<T: Transport> {
    pub page: Page,
    transport: T,
    outbox: VecDeque<(Ticket, HttpRequest)>,
}

impl<T: Transport> Runtime<T> {
    pub fn new(page: Page, transport: T) -> Self {
        Self {
            page,
            transport,
            outbox: VecDeque::new(),
        }
    }

    /// Apply one message. Returns whether the DOM event's default action is prevented.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let handled = update(&mut self.page, msg);
        if let Some(cmd) = handled.cmd {
            self.process_cmd(cmd);
        }
        handled.prevent_default
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Send { ticket, request } => self.outbox.push_back((ticket, request)),
            Cmd::Navigate(url) => {
                tracing::info!("Navigating to {}", url);
                self.page.location = Some(url);
            }
        }
    }

    /// Requests queued but not yet executed
    pub fn queued(&self) -> usize {
        self.outbox.len()
    }

    /// Execute the oldest queued request and apply its response.
    ///
    /// Returns false when nothing was queued.
    pub fn step(&mut self) -> bool {
        let Some((ticket, request)) = self.outbox.pop_front() else {
            return false;
        };
        let response = self.transport.execute(&request);
        if let Err(e) = &response {
            tracing::warn!("{} {} failed: {}", request.method, request.url, e);
        }
        self.dispatch(Msg::Response { ticket, response });
        true
    }

    /// Run until no requests are queued; returns how many were executed
    pub fn run_until_idle(&mut self) -> usize {
        let mut executed = 0;
        while self.step() {
            executed += 1;
        }
        executed
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_page(self) -> Page {
        self.page
    }
}
