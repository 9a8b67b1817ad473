//! # Article List Demo
//!
//! Browses the article API from the command line. Each line read from stdin
//! is one input event:
//!
//! - any text: search (debounced like a search box)
//! - `:cat N` / `:cat` select category N / all categories
//! - `:next`, `:prev`, `:page N` move through the loaded results
//! - `:clear` clear all filters, `:refresh` fetch again, `:quit` exit
//!
//! Set `FOLIO_API_URL` to point at the server and `RUST_LOG=debug` to watch
//! requests, debounce commits and stale-response discards on stderr.
//!
//! Run with: `cargo run --example article_list`

use std::sync::Arc;

use folio::api::{ApiClient, Article, Category};
use folio::list::browser;
use folio::list::filter;
use folio::list::orchestrator;
use folio::list::pagination;
use folio::list::{Browser, BrowserMessage, CategoryId, ListOptions, Locale, Session};
use folio::{input_lines, Command, Component, Model, Subscription};
use tracing_subscriber::EnvFilter;

struct ArticleList {
    browser: Browser<ApiClient>,
}

#[derive(Debug)]
enum Msg {
    Browser(BrowserMessage<ApiClient>),
    Quit,
}

fn list(msg: orchestrator::Message<Article, folio::api::ApiError>) -> Msg {
    Msg::Browser(browser::Message::List(msg))
}

fn parse_line(line: String) -> Option<Msg> {
    let line = line.trim_end();
    let (command, arg) = match line.split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    let msg = match command {
        ":quit" | ":q" => return Some(Msg::Quit),
        ":cat" => orchestrator::Message::Filter(filter::Message::CategorySelected(
            CategoryId::parse(arg),
        )),
        ":next" => orchestrator::Message::Page(pagination::Message::NextPage),
        ":prev" => orchestrator::Message::Page(pagination::Message::PrevPage),
        ":page" => orchestrator::Message::Page(pagination::Message::GotoPage(arg.parse().ok()?)),
        ":clear" => orchestrator::Message::Filter(filter::Message::ClearAll),
        ":refresh" => orchestrator::Message::Refresh,
        _ => orchestrator::Message::Filter(filter::Message::SearchInput(line.to_string())),
    };
    Some(list(msg))
}

impl ArticleList {
    fn print_status(&self) {
        let list = self.browser.list();
        if list.is_loading() {
            println!("loading...");
            return;
        }
        if let Some(error) = list.error() {
            println!("error: {error}");
            return;
        }

        let summary = list.filter_summary();
        if !summary.is_empty() {
            println!("[{}]", summary.join(", "));
        }
        for article in list.visible_items() {
            let category = article
                .category
                .as_ref()
                .map(|c: &Category| c.name.as_str())
                .unwrap_or("-");
            println!("  {:>4}  {}  ({category})", article.id, article.title);
        }
        let info = list.page_info();
        let pages: Vec<String> = list
            .visible_page_numbers()
            .into_iter()
            .map(|n| if n == info.current { format!("[{n}]") } else { n.to_string() })
            .collect();
        println!(
            "showing {}-{} of {}  pages: {}",
            info.showing_from,
            info.showing_to,
            info.total_items,
            pages.join(" ")
        );
    }
}

impl Model for ArticleList {
    type Message = Msg;
    type Flags = ApiClient;

    fn init(client: ApiClient) -> (Self, Command<Msg>) {
        let mut browser = Browser::new(
            Arc::new(client),
            Session::anonymous(),
            Arc::new(Locale::default()),
            ListOptions::default(),
        );
        let cmd = browser.start().map(Msg::Browser);
        (ArticleList { browser }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Browser(msg) => {
                let cmd = self.browser.update(msg).map(Msg::Browser);
                self.print_status();
                cmd
            }
            Msg::Quit => {
                self.browser.teardown();
                Command::quit()
            }
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![input_lines(parse_line)];
        subs.extend(
            self.browser
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Browser)),
        );
        subs
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let client = ApiClient::from_env()?;
    tracing::info!(base_url = %client.base_url(), "browsing articles");
    let model = folio::run::<ArticleList>(client).await?;

    let categories = model.browser.catalog().categories();
    tracing::info!(categories = categories.len(), "done");
    Ok(())
}
