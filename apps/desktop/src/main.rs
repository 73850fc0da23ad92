use std::{
    io::{self, BufRead, Write},
    thread,
};

use anyhow::Result;
use browser_core::{HttpPostSource, Overlay, PostBrowser, ViewModel, DELETE_PROMPT};
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use shared::domain::{Intent, PostId};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the post source; posts are fetched from `<url>/posts`.
    #[arg(long, default_value = "https://jsonplaceholder.typicode.com")]
    server_url: String,
}

#[derive(Debug, PartialEq)]
enum BrowserCommand {
    Show,
    Open { id: PostId, intent: Intent },
    Close,
    ConfirmDelete { id: PostId },
    SaveEdit { id: PostId, title: String, body: String },
    Shutdown,
}

enum UiEvent {
    Info(String),
    Error(String),
    LoadFailed(String),
    Render(ViewModel),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BrowserCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let worker = spawn_backend_thread(args.server_url.clone(), cmd_rx, ui_tx);

    println!("posts browser - fetching from {}", args.server_url);
    // The worker always answers the bootstrap with one render, loaded or not.
    if !pump_until_render(&ui_rx) {
        return Ok(());
    }
    println!("type help for commands");

    let mut stdin = io::stdin().lock();
    let mut input = String::new();
    loop {
        print!("posts> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            queue_command(&cmd_tx, BrowserCommand::Shutdown);
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if line == "help" {
            print_help();
            continue;
        }

        match parse_command(line) {
            Ok(BrowserCommand::Shutdown) => {
                queue_command(&cmd_tx, BrowserCommand::Shutdown);
                break;
            }
            Ok(cmd) => {
                queue_command(&cmd_tx, cmd);
                if !pump_until_render(&ui_rx) {
                    break;
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    let _ = worker.join();
    Ok(())
}

/// Runs the browser on its own thread behind a command/event channel pair.
/// The browser state never leaves that thread; the REPL only ever sees the
/// view models the worker sends back.
fn spawn_backend_thread(
    server_url: String,
    cmd_rx: Receiver<BrowserCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::LoadFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                let _ = ui_tx.try_send(UiEvent::Render(ViewModel {
                    rows: Vec::new(),
                    overlay: None,
                }));
                return;
            }
        };

        runtime.block_on(async move {
            let mut browser = PostBrowser::new();
            bootstrap_collection(&server_url, &mut browser, &ui_tx).await;
            let _ = ui_tx.try_send(UiEvent::Render(browser.view_model()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BrowserCommand::Shutdown => break,
                    BrowserCommand::Show => {}
                    BrowserCommand::Open { id, intent } => {
                        if let Err(err) = browser.open(id, intent) {
                            let _ = ui_tx.try_send(UiEvent::Error(err.to_string()));
                        }
                    }
                    BrowserCommand::Close => browser.close(),
                    BrowserCommand::ConfirmDelete { id } => match browser.confirm_delete(id) {
                        Ok(true) => {
                            let _ =
                                ui_tx.try_send(UiEvent::Info(format!("post {} deleted", id.0)));
                        }
                        Ok(false) => {
                            let _ = ui_tx.try_send(UiEvent::Info(format!(
                                "post {} was already gone",
                                id.0
                            )));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(err.to_string()));
                        }
                    },
                    BrowserCommand::SaveEdit { id, title, body } => {
                        match browser.save_edit(id, &title, &body) {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::Info(
                                    "edit accepted; the list keeps the fetched values".to_string(),
                                ));
                            }
                            Err(err) => {
                                let _ = ui_tx.try_send(UiEvent::Error(err.to_string()));
                            }
                        }
                    }
                }
                let _ = ui_tx.try_send(UiEvent::Render(browser.view_model()));
            }
        });
    })
}

/// One-shot fetch at startup. A failed fetch is reported once and the
/// browser keeps an empty collection; the REPL stays usable either way.
async fn bootstrap_collection(
    server_url: &str,
    browser: &mut PostBrowser,
    ui_tx: &Sender<UiEvent>,
) {
    let source = match HttpPostSource::new(server_url) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!(server_url, "invalid server url: {err}");
            let _ = ui_tx.try_send(UiEvent::LoadFailed(format!(
                "invalid server url '{server_url}': {err}"
            )));
            return;
        }
    };

    match browser.load_from(&source).await {
        Ok(count) => {
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "loaded {count} posts from {server_url}"
            )));
        }
        Err(err) => {
            tracing::error!("failed to load posts: {err}");
            let _ = ui_tx.try_send(UiEvent::LoadFailed(format!(
                "could not load posts from {server_url}: {err} (starting with an empty list)"
            )));
        }
    }
}

fn queue_command(cmd_tx: &Sender<BrowserCommand>, cmd: BrowserCommand) {
    let cmd_name = match &cmd {
        BrowserCommand::Show => "show",
        BrowserCommand::Open { .. } => "open",
        BrowserCommand::Close => "close",
        BrowserCommand::ConfirmDelete { .. } => "confirm_delete",
        BrowserCommand::SaveEdit { .. } => "save_edit",
        BrowserCommand::Shutdown => "shutdown",
    };
    tracing::debug!(command = cmd_name, "queueing ui->backend command");
    match cmd_tx.try_send(cmd) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => eprintln!("backend is busy; command dropped"),
        Err(TrySendError::Disconnected(_)) => eprintln!("backend worker stopped"),
    }
}

/// Drains worker events until the render that ends the current exchange.
/// Returns false once the worker side of the channel is gone.
fn pump_until_render(ui_rx: &Receiver<UiEvent>) -> bool {
    loop {
        match ui_rx.recv() {
            Ok(UiEvent::Render(model)) => {
                print_view(&model);
                return true;
            }
            Ok(UiEvent::Info(message)) => println!("{message}"),
            Ok(UiEvent::Error(message)) => eprintln!("error: {message}"),
            Ok(UiEvent::LoadFailed(message)) => eprintln!("load failed: {message}"),
            Err(_) => {
                eprintln!("backend worker stopped");
                return false;
            }
        }
    }
}

fn parse_command(line: &str) -> Result<BrowserCommand, String> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    match verb {
        "list" | "ls" => Ok(BrowserCommand::Show),
        "view" => Ok(BrowserCommand::Open {
            id: parse_post_id(rest)?,
            intent: Intent::View,
        }),
        "edit" => Ok(BrowserCommand::Open {
            id: parse_post_id(rest)?,
            intent: Intent::Edit,
        }),
        "delete" => Ok(BrowserCommand::Open {
            id: parse_post_id(rest)?,
            intent: Intent::Delete,
        }),
        "close" => Ok(BrowserCommand::Close),
        "confirm" => Ok(BrowserCommand::ConfirmDelete {
            id: parse_post_id(rest)?,
        }),
        "save" => parse_save(rest),
        "quit" | "exit" => Ok(BrowserCommand::Shutdown),
        other => Err(format!("unknown command '{other}'; type help for the list")),
    }
}

fn parse_post_id(token: &str) -> Result<PostId, String> {
    token
        .parse::<i64>()
        .map(PostId)
        .map_err(|_| format!("expected a numeric post id, got '{token}'"))
}

fn parse_save(rest: &str) -> Result<BrowserCommand, String> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let id = parse_post_id(parts.next().unwrap_or_default())?;
    let fields = parts.next().unwrap_or("");
    let Some((title, body)) = fields.split_once('|') else {
        return Err("save needs `save <id> <title> | <body>`".to_string());
    };
    Ok(BrowserCommand::SaveEdit {
        id,
        title: title.trim().to_string(),
        body: body.trim().to_string(),
    })
}

fn intent_label(intent: Intent) -> &'static str {
    match intent {
        Intent::View => "view",
        Intent::Edit => "edit",
        Intent::Delete => "delete",
    }
}

fn print_view(model: &ViewModel) {
    if model.rows.is_empty() {
        println!("(no posts)");
    } else {
        println!("{:>5}  {:<52}  actions", "id", "title");
        for row in &model.rows {
            let actions = row.actions.map(intent_label).join(" ");
            println!("{:>5}  {:<52}  {}", row.id.0, row.title, actions);
        }
    }
    if let Some(overlay) = &model.overlay {
        print_overlay(overlay);
    }
}

fn print_overlay(overlay: &Overlay) {
    println!("--- {} ---", overlay.heading());
    match overlay {
        Overlay::View { post } => {
            println!("id: {}", post.id.0);
            println!("title: {}", post.title);
            println!("body: {}", post.body);
        }
        Overlay::Edit { id, title, body } => {
            println!("id: {}", id.0);
            println!("title: {title}");
            println!("body: {body}");
            println!("(save {} <title> | <body> to accept, close to cancel)", id.0);
        }
        Overlay::ConfirmDelete { id, title } => {
            println!("{DELETE_PROMPT}");
            println!("target: {} ({title})", id.0);
            println!("(confirm {} to proceed, close to cancel)", id.0);
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  list                        show the post table");
    println!("  view <id>                   open a post read-only");
    println!("  edit <id>                   open a post for editing");
    println!("  delete <id>                 ask before deleting a post");
    println!("  confirm <id>                commit the pending delete");
    println!("  save <id> <title> | <body>  accept the edit form");
    println!("  close                       close the open overlay");
    println!("  quit                        exit");
}
