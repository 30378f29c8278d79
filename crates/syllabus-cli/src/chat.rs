//! Terminal chat front end for the HTTP service.

use std::io::{BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{self, ColorMode};

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000/ask";

const NO_VALID_ANSWER: &str = "Sorry, I couldn't get a valid answer.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// One conversation with the service. History lives only for the session.
pub struct ChatSession {
    url: String,
    client: reqwest::Client,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Post `question`, record both turns, and return the reply text.
    /// Transport and server failures become the reply rather than an error.
    pub async fn send(&mut self, question: &str) -> String {
        self.messages.push(ChatMessage {
            role: "user",
            content: question.to_string(),
        });

        let answer = match self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await
        {
            Ok(resp) => {
                let status = resp.status().as_u16();
                tracing::debug!(status, "chat response received");
                let body = resp.text().await.unwrap_or_default();
                reply_from_response(status, &body)
            }
            Err(e) => {
                tracing::debug!(url = %self.url, error = %e, "chat request failed");
                format!(
                    "Error: Could not connect to the backend server at {}. \
                     Please make sure it's running. Details: {}",
                    self.url, e
                )
            }
        };

        self.messages.push(ChatMessage {
            role: "assistant",
            content: answer.clone(),
        });
        answer
    }
}

/// Turn a service response into the text shown to the user.
pub fn reply_from_response(status: u16, body: &str) -> String {
    let json: Option<serde_json::Value> = serde_json::from_str(body).ok();
    if status == 200 {
        return json
            .as_ref()
            .and_then(|v| v["answer"].as_str())
            .unwrap_or(NO_VALID_ANSWER)
            .to_string();
    }
    let details = json
        .as_ref()
        .and_then(|v| v["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());
    format!(
        "Error: Failed to get a response from the server. Status Code: {}. Details: {}",
        status, details
    )
}

enum Input {
    Question(String),
    History,
    Clear,
    Quit,
    Empty,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Empty,
        "/quit" | "/exit" => Input::Quit,
        "/history" => Input::History,
        "/clear" => Input::Clear,
        q => Input::Question(q.to_string()),
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Read questions from stdin until EOF or `/quit`.
pub async fn run(url: &str, color: ColorMode) -> anyhow::Result<()> {
    let mut session = ChatSession::new(url);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "College Syllabus Chatbot")?;
    writeln!(
        stdout,
        "Ask any question about the syllabus. Commands: /history, /clear, /quit"
    )?;
    writeln!(stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Clear => {
                session.clear();
                writeln!(stdout, "History cleared.")?;
            }
            Input::History => {
                if session.messages().is_empty() {
                    writeln!(stdout, "No messages yet.")?;
                }
                for message in session.messages() {
                    output::print_message(&mut stdout, message.role, &message.content, color)?;
                }
            }
            Input::Question(question) => {
                let spinner = thinking_spinner();
                let answer = session.send(&question).await;
                spinner.finish_and_clear();
                output::print_message(&mut stdout, "assistant", &answer, color)?;
            }
        }
    }
    Ok(())
}
