//! Chat session plumbing.
//!
//! The widget only knows [`SessionSink`]. The terminal host pairs it with a
//! [`LoopbackSession`], which echoes sent messages back as inbound chat and
//! can drip-feed lines from a text file to simulate other participants.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Outbound side of a chat session.
pub trait SessionSink {
    /// Send a submitted, non-empty chat line.
    fn send_chat(&mut self, text: &str);
}

impl SessionSink for Vec<String> {
    fn send_chat(&mut self, text: &str) {
        self.push(text.to_owned());
    }
}

/// Errors opening a feed file.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed file does not exist.
    #[error("Feed file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The feed file could not be read.
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
}

/// Lines released one at a time on a fixed interval.
#[derive(Debug, Clone)]
pub struct FeedSource {
    lines: VecDeque<String>,
    interval_ms: u64,
    elapsed_ms: u64,
}

impl FeedSource {
    /// Load every non-blank line of a text file.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::FileNotFound` if the file does not exist.
    /// Returns `FeedError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>, interval_ms: u64) -> Result<Self, FeedError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FeedError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        let feed = Self::from_lines(lines, interval_ms);
        info!(path = %path.display(), lines = feed.remaining(), "Loaded chat feed");
        Ok(feed)
    }

    /// Build a feed from in-memory lines. Blank lines are dropped.
    pub fn from_lines(lines: impl IntoIterator<Item = String>, interval_ms: u64) -> Self {
        Self {
            lines: lines
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
            interval_ms,
            elapsed_ms: 0,
        }
    }

    /// Advance the feed clock and return the lines that came due.
    ///
    /// One line is released per elapsed interval. A zero interval releases
    /// everything at once.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<String> {
        if self.interval_ms == 0 {
            return self.lines.drain(..).collect();
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        let mut due = Vec::new();
        while self.elapsed_ms >= self.interval_ms {
            let Some(line) = self.lines.pop_front() else {
                self.elapsed_ms = 0;
                break;
            };
            self.elapsed_ms -= self.interval_ms;
            due.push(line);
        }
        due
    }

    /// Lines not yet released.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

/// Most recent outgoing messages kept by [`LoopbackSession::sent`].
pub const SENT_LOG_LIMIT: usize = 256;

/// Local session that echoes sent messages back to the log.
#[derive(Debug, Clone)]
pub struct LoopbackSession {
    nick: String,
    sent: Vec<String>,
    inbound: VecDeque<String>,
    feed: Option<FeedSource>,
}

impl LoopbackSession {
    /// Create a session for the given nickname.
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            sent: Vec::new(),
            inbound: VecDeque::new(),
            feed: None,
        }
    }

    /// Attach a feed of simulated inbound lines.
    pub fn with_feed(mut self, feed: FeedSource) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Nickname prefixed to echoed messages.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// The last [`SENT_LOG_LIMIT`] messages sent, oldest first.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Collect inbound chat lines that are ready after `delta_ms`.
    ///
    /// Echoes of sent messages come first, then any feed lines that came
    /// due.
    pub fn poll(&mut self, delta_ms: u64) -> Vec<String> {
        let mut ready: Vec<String> = self.inbound.drain(..).collect();
        if let Some(feed) = self.feed.as_mut() {
            ready.extend(feed.advance(delta_ms));
        }
        ready
    }
}

impl SessionSink for LoopbackSession {
    fn send_chat(&mut self, text: &str) {
        debug!(len = text.len(), "Sending chat message");
        if self.sent.len() >= SENT_LOG_LIMIT {
            let excess = self.sent.len() + 1 - SENT_LOG_LIMIT;
            self.sent.drain(..excess);
        }
        self.sent.push(text.to_owned());
        self.inbound.push_back(format!("{}: {}", self.nick, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn feed(lines: &[&str], interval_ms: u64) -> FeedSource {
        FeedSource::from_lines(lines.iter().map(|s| (*s).to_string()), interval_ms)
    }

    #[test]
    fn send_chat_echoes_with_nick() {
        let mut session = LoopbackSession::new("alice");
        session.send_chat("hello");
        assert_eq!(session.sent(), &["hello".to_string()]);
        assert_eq!(session.poll(0), vec!["alice: hello".to_string()]);
        assert!(session.poll(0).is_empty());
    }

    #[test]
    fn sent_log_keeps_only_recent_messages() {
        let mut session = LoopbackSession::new("bob");
        for i in 0..SENT_LOG_LIMIT + 10 {
            session.send_chat(&format!("msg {i}"));
        }

        let sent = session.sent();
        assert_eq!(sent.len(), SENT_LOG_LIMIT);
        assert_eq!(sent[0], "msg 10");
        assert_eq!(sent[SENT_LOG_LIMIT - 1], format!("msg {}", SENT_LOG_LIMIT + 9));
        assert_eq!(session.poll(0).len(), SENT_LOG_LIMIT + 10);
    }

    #[test]
    fn feed_releases_one_line_per_interval() {
        let mut f = feed(&["a", "b", "c"], 100);
        assert!(f.advance(50).is_empty());
        assert_eq!(f.advance(50), vec!["a".to_string()]);
        assert_eq!(f.advance(250), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(f.remaining(), 0);
        assert!(f.advance(1000).is_empty());
    }

    #[test]
    fn feed_with_zero_interval_releases_everything() {
        let mut f = feed(&["a", "b"], 0);
        assert_eq!(f.advance(0).len(), 2);
    }

    #[test]
    fn blank_feed_lines_are_skipped() {
        let f = feed(&["a", "", "   ", "b"], 10);
        assert_eq!(f.remaining(), 2);
    }

    #[test]
    fn poll_puts_echoes_before_feed_lines() {
        let mut session = LoopbackSession::new("me").with_feed(feed(&["bob: hi"], 10));
        session.send_chat("yo");
        assert_eq!(
            session.poll(10),
            vec!["me: yo".to_string(), "bob: hi".to_string()]
        );
    }

    #[test]
    fn open_reads_feed_file() {
        let path = std::env::temp_dir().join("boardchat_feed_open_test.txt");
        fs::write(&path, "one\n\ntwo\n").unwrap();

        let result = FeedSource::open(&path, 100);
        let _ = fs::remove_file(&path);

        assert_eq!(result.unwrap().remaining(), 2);
    }

    #[test]
    fn open_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("boardchat_feed_missing_12345.txt");
        let result = FeedSource::open(&path, 100);
        assert!(matches!(result, Err(FeedError::FileNotFound { .. })));
    }
}
