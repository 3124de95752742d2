use crate::api::MessageHandler;
use crate::codeforces::{CodeforcesClient, ContestSource, FetchError};
use crate::config::BotConfig;
use crate::contests::ContestLister;
use async_trait::async_trait;
use std::fmt;

pub const HELP_MESSAGE: &str = "Hi! I'm your Codeforces contest reminder bot.\n\nCommands:\n- 'next': Shows contests in next 24 hours\n- 'list': Shows all contests in next 7 days";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    List,
    Other,
}

impl Command {
    /// Case-insensitive exact match. Surrounding whitespace is significant.
    pub fn parse(body: &str) -> Self {
        match body.to_lowercase().as_str() {
            "next" => Command::Next,
            "list" => Command::List,
            _ => Command::Other,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Next => write!(f, "next"),
            Command::List => write!(f, "list"),
            Command::Other => write!(f, "other"),
        }
    }
}

pub struct Dispatcher<S> {
    lister: ContestLister<S>,
}

impl Dispatcher<CodeforcesClient> {
    pub fn from_config(config: BotConfig) -> Result<Self, FetchError> {
        let client = CodeforcesClient::new(&config)?;
        Ok(Self::new(ContestLister::new(client, config)))
    }
}

impl<S: ContestSource + Send + Sync> Dispatcher<S> {
    pub fn new(lister: ContestLister<S>) -> Self {
        Self { lister }
    }

    pub async fn dispatch(&self, body: &str) -> String {
        let command = Command::parse(body);
        tracing::debug!("dispatch command `{}`", command);

        match command {
            Command::Next => self.lister.list_contests(false).await,
            Command::List => self.lister.list_contests(true).await,
            Command::Other => String::from(HELP_MESSAGE),
        }
    }
}

#[async_trait]
impl<S: ContestSource + Send + Sync> MessageHandler for Dispatcher<S> {
    async fn handle(&self, body: &str) -> String {
        self.dispatch(body).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codeforces::Phase;
    use crate::contests::test::{record, StubSource};
    use chrono::Utc;

    fn dispatcher() -> Dispatcher<StubSource> {
        let now = Utc::now().timestamp();
        let records = vec![
            record(1, "Div 2", Phase::Before, now + 3600, 7200),
            record(2, "Global Round", Phase::Before, now + 10 * 86400, 10800),
            record(3, "Div 3", Phase::Finished, now - 86400, 7200),
        ];
        Dispatcher::new(ContestLister::new(
            StubSource::Records(records),
            BotConfig::default(),
        ))
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("next"), Command::Next);
        assert_eq!(Command::parse("NEXT"), Command::Next);
        assert_eq!(Command::parse("List"), Command::List);
        assert_eq!(Command::parse(" next"), Command::Other);
        assert_eq!(Command::parse("next\n"), Command::Other);
        assert_eq!(Command::parse("nxt"), Command::Other);
        assert_eq!(Command::parse(""), Command::Other);
    }

    #[tokio::test]
    async fn test_dispatch_is_case_insensitive() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.dispatch("NEXT").await,
            dispatcher.dispatch("next").await
        );
    }

    #[tokio::test]
    async fn test_dispatch_next_and_list() {
        let dispatcher = dispatcher();

        let next = dispatcher.dispatch("next").await;
        assert!(next.contains("Div 2"));
        assert!(!next.contains("Global Round"));
        assert!(!next.contains("Div 3"));

        let list = dispatcher.dispatch("list").await;
        assert!(list.contains("Div 2"));
        assert!(list.contains("Global Round"));
        assert!(!list.contains("Div 3"));
    }

    #[tokio::test]
    async fn test_dispatch_help() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.dispatch("").await, HELP_MESSAGE);
        assert_eq!(dispatcher.dispatch("foo").await, HELP_MESSAGE);
    }

    #[tokio::test]
    async fn test_handle_timeout() {
        let dispatcher = Dispatcher::new(ContestLister::new(
            StubSource::Timeout,
            BotConfig::default(),
        ));
        assert!(dispatcher.handle("next").await.contains("Timeout"));
    }
}
