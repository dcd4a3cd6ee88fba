//! Line-driven front end for the explorer.
//!
//! Reads one command per line from stdin, forwards it to the [`Runtime`] as
//! an intent, and prints the rendered view model whenever state changes.
//! Background completions are applied as they arrive, interleaved with input.
//!
//! # Commands
//!
//! - `show`: Show or hide the character list
//! - `more`: Load the next page (bottom of the list reached)
//! - `search <text>`: Set the search text; the search fires after the
//!   configured debounce unless more input arrives first
//! - `clear`: Clear the search text
//! - `open <id>`: Open a listed character
//! - `fav`: Toggle favorite on the open character
//! - `episode <n>`: Open episode number `n` of the open character
//! - `close`: Close the innermost open screen
//! - `ok`: Dismiss the visible alert
//! - `help`, `quit`

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use rickmorty_explorer::app::{DetailEvent, EpisodeEvent};
use rickmorty_explorer::domain::CharacterId;
use rickmorty_explorer::ui::{render, ListViewModel};
use rickmorty_explorer::{initialize, observability, Config, Event, Result, Runtime};

const HELP: &str = "commands: show, more, search <text>, clear, open <id>, fav, episode <n>, close, ok, help, quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    More,
    Search(String),
    Clear,
    Open(CharacterId),
    Favorite,
    Episode(String),
    Close,
    Dismiss,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').map_or((line, ""), |(w, r)| (w, r.trim()));

    match word {
        "show" => Ok(Command::Show),
        "more" => Ok(Command::More),
        "search" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "open" => rest
            .parse()
            .map(Command::Open)
            .map_err(|_| format!("invalid character id: {rest:?}")),
        "fav" => Ok(Command::Favorite),
        "episode" if !rest.is_empty() => Ok(Command::Episode(rest.to_string())),
        "episode" => Err("usage: episode <n>".to_string()),
        "close" => Ok(Command::Close),
        "ok" => Ok(Command::Dismiss),
        "help" | "" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other}")),
    }
}

/// Maps a command to the intent it raises on the currently shown screen.
fn command_event(command: Command, vm: &ListViewModel) -> std::result::Result<Event, String> {
    match command {
        Command::Show => Ok(Event::VisibilityToggled),
        Command::More => Ok(Event::ReachedBottom),
        Command::Search(text) => Ok(Event::SearchTextChanged(text)),
        Command::Clear => Ok(Event::SearchCleared),
        Command::Open(id) => Ok(Event::CharacterSelected(id)),
        Command::Favorite => vm
            .detail
            .as_ref()
            .map(|_| Event::Detail(DetailEvent::FavoriteToggled))
            .ok_or_else(|| "no character open".to_string()),
        Command::Episode(number) => {
            let detail = vm.detail.as_ref().ok_or_else(|| "no character open".to_string())?;
            detail
                .episodes
                .iter()
                .find(|link| link.number == number)
                .map(|link| Event::Detail(DetailEvent::EpisodeSelected(link.url.clone())))
                .ok_or_else(|| format!("no episode {number} for this character"))
        }
        Command::Close => match &vm.detail {
            Some(detail) if detail.episode.is_some() => {
                Ok(Event::Detail(DetailEvent::Episode(EpisodeEvent::CloseTapped)))
            }
            Some(_) => Ok(Event::DetailDismissed),
            None => Err("nothing to close".to_string()),
        },
        Command::Dismiss => match &vm.detail {
            Some(detail) if detail.alert.is_some() => Ok(Event::Detail(DetailEvent::AlertDismissed)),
            _ => Ok(Event::AlertDismissed),
        },
        Command::Help | Command::Quit => Err(HELP.to_string()),
    }
}

fn print_view(runtime: &Runtime) {
    print!("{}", render(&runtime.viewmodel()));
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    observability::init_tracing(&config);

    tracing::info!(base_url = %config.base_url, "explorer starting");

    let mut runtime = initialize(&config)?;
    runtime.dispatch(Event::Appeared);

    println!("{HELP}");
    print_view(&runtime);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let debounce = tokio::time::sleep(config.search_debounce());
    tokio::pin!(debounce);
    let mut search_pending = false;

    loop {
        let rerender = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        let is_search = matches!(command, Command::Search(_));
                        let is_clear = command == Command::Clear;

                        match command_event(command, &runtime.viewmodel()) {
                            Ok(event) => {
                                let rerender = runtime.dispatch(event);
                                if is_search {
                                    debounce.as_mut().reset(Instant::now() + config.search_debounce());
                                    search_pending = true;
                                } else if is_clear {
                                    search_pending = false;
                                }
                                rerender
                            }
                            Err(message) => {
                                println!("{message}");
                                false
                            }
                        }
                    }
                    Err(message) => {
                        println!("{message}");
                        false
                    }
                }
            }
            () = &mut debounce, if search_pending => {
                search_pending = false;
                runtime.dispatch(Event::SearchTriggered)
            }
            Some(rerender) = runtime.step() => rerender,
        };

        if rerender {
            print_view(&runtime);
        }
    }

    tracing::info!("explorer stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
