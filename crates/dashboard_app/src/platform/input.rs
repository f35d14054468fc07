use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use dashboard_core::{ArticleId, Msg};
use dashboard_logging::dash_warn;

pub const HELP: &str = "Commands: rewrite <id> | close | reload | quit";

/// Parses one line typed by the user.
pub fn parse_command(line: &str) -> Option<Msg> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let arg = words.next();
    match (verb.as_str(), arg) {
        ("rewrite" | "r", Some(id)) => Some(Msg::RewriteClicked(ArticleId::from(id))),
        ("close" | "c", None) => Some(Msg::RewritePanelClosed),
        ("reload" | "l", None) => Some(Msg::ReloadRequested),
        ("quit" | "q" | "exit", None) => Some(Msg::CloseRequested),
        _ => None,
    }
}

/// Reads stdin on a background thread; EOF counts as a quit request.
pub fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(msg) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                None => {
                    dash_warn!("Unrecognised command {:?}", line.trim());
                    eprintln!("{HELP}");
                }
            }
        }
        let _ = msg_tx.send(Msg::CloseRequested);
    });
}
