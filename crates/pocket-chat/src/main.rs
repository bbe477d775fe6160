//! An interactive terminal chat client.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use pocket_chat_core::ChatBuilder;
use pocket_chat_core::store::FileStore;
use pocket_chat_model::ChatMessage;
use pocket_chat_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        eprintln!("OPENAI_API_KEY environment variable is not set");
        return;
    };

    let mut config = OpenAIConfigBuilder::with_api_key(api_key);
    if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Ok(model) = env::var("OPENAI_MODEL") {
        config = config.with_model(model);
    }
    let model_provider = OpenAIProvider::new(config.build());

    let store_root = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pocket-chat");
    let mut chat = ChatBuilder::with_completion_provider(model_provider)
        .with_system_prompt(include_str!("./persona.md").trim_end())
        .with_store(FileStore::new(store_root))
        .build();

    // Replay whatever survived from the last run.
    for msg in chat.history() {
        print_message(msg);
    }
    if !chat.history().is_empty() {
        println!();
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/clear" => {
                chat.clear();
                println!("{}(history cleared)", BAR_CHAR.bright_yellow());
                continue;
            }
            _ => {}
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        chat.submit(line).await;

        progress_bar.finish_and_clear();

        if let Some(msg) = chat.history().last() {
            print_message(msg);
        }
    }
}

fn print_message(msg: &ChatMessage) {
    match msg {
        ChatMessage::User { content } => {
            println!("{}{}", BAR_CHAR.bright_green(), content);
        }
        ChatMessage::Assistant { content } => {
            println!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                content.bright_white()
            );
        }
        ChatMessage::System { content } => {
            println!("{}{}", BAR_CHAR.bright_yellow(), content);
        }
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
