/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`     - Interactive conversation
- `classify` - Run the crisis filter over a piece of text
- `auth`     - Store the API key in the OS keyring
*/

use crate::config::Config;
use crate::error::Result;
use crate::providers::{Message, Role};
use crate::session::SessionSnapshot;
use colored::Colorize;

// Parser for /reset, /history and friends
pub mod special_commands;

/// Render one history entry with a colored role label
pub fn format_message(message: &Message) -> String {
    let label = match message.role() {
        Role::User => "you".cyan().bold(),
        Role::Assistant => "solace".green().bold(),
        Role::System => "system".dimmed(),
    };
    format!("{}: {}", label, message.content())
}

/// Banner for the transient error of the last exchange
pub fn error_banner(message: &str) -> String {
    format!(" ! last reply failed: {} ", message)
        .white()
        .on_red()
        .bold()
        .to_string()
}

/// Banner shown while the gateway cannot be used
pub fn configuration_banner(reason: &str) -> String {
    format!(" ! chat is unavailable: {} ", reason)
        .black()
        .on_yellow()
        .bold()
        .to_string()
}

/// Banners that apply to `snapshot`, configuration first
pub fn banners(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(reason) = &snapshot.configuration_error {
        out.push(configuration_banner(reason));
    }
    if let Some(message) = snapshot.last_error_message() {
        out.push(error_banner(&message));
    }
    out
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Builds a `ChatSession` from configuration and runs a readline loop.
    //! Each line is delivered to the session as an Enter key press; only
    //! the messages appended by that submission are printed. Ctrl-C while
    //! a reply is pending resets the conversation; the late reply is
    //! dropped by the session when it arrives.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::session::{ChatSession, KeyPress, Rejection, SubmitOutcome};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::future::Future;

    /// How a single turn of the loop ended
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TurnEnd {
        /// The submission resolved
        Resolved(SubmitOutcome),
        /// The key press did not submit
        NotSubmitted,
        /// `cancel` fired first and the session was reset
        Cancelled,
    }

    /// Submit `line` unless `cancel` completes first
    ///
    /// The submission runs on its own task, so cancelling does not abort
    /// the remote call; the session discards its result instead.
    pub async fn submit_or_reset<F>(
        session: &ChatSession,
        key: KeyPress,
        line: &str,
        cancel: F,
    ) -> TurnEnd
    where
        F: Future<Output = ()>,
    {
        let background = session.clone();
        let draft = line.to_string();
        let mut turn = tokio::spawn(async move { background.handle_key(key, &draft).await });

        tokio::select! {
            joined = &mut turn => match joined {
                Ok(Some(outcome)) => TurnEnd::Resolved(outcome),
                Ok(None) => TurnEnd::NotSubmitted,
                Err(e) => {
                    tracing::error!("Submission task failed: {}", e);
                    TurnEnd::NotSubmitted
                }
            },
            _ = cancel => {
                session.reset();
                tracing::info!(session_id = %session.id(), "Reset while a reply was pending");
                TurnEnd::Cancelled
            }
        }
    }

    async fn interrupted() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }

    /// Start interactive chat
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use solace::commands::chat;
    /// use solace::config::Config;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> anyhow::Result<()> {
    /// chat::run_chat(Config::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        let session = ChatSession::from_config(&config);
        tracing::info!(session_id = %session.id(), "Starting interactive chat");

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config);
        print_history(&session.snapshot());

        loop {
            let prompt = format!("{} ", "you>".cyan().bold());
            match rl.readline(&prompt) {
                Ok(line) => {
                    match parse_special_command(&line) {
                        Ok(SpecialCommand::Reset) => {
                            session.reset();
                            println!("{}\n", "Started a new conversation.".dimmed());
                            print_history(&session.snapshot());
                            continue;
                        }
                        Ok(SpecialCommand::History) => {
                            print_history(&session.snapshot());
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            println!("{}\n", e.to_string().yellow());
                            continue;
                        }
                    }

                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.trim())?;
                    }

                    let before = session.messages().len();
                    match submit_or_reset(&session, KeyPress::enter(), &line, interrupted()).await
                    {
                        TurnEnd::Resolved(outcome) => report_outcome(&session, before, outcome),
                        TurnEnd::NotSubmitted => {}
                        TurnEnd::Cancelled => {
                            println!(
                                "\n{}\n",
                                "Stopped waiting and started a new conversation.".dimmed()
                            );
                            print_history(&session.snapshot());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Take care of yourself. Goodbye!");
        Ok(())
    }

    fn report_outcome(session: &ChatSession, before: usize, outcome: SubmitOutcome) {
        tracing::debug!(?outcome, "Submission resolved");
        match outcome {
            SubmitOutcome::Rejected(Rejection::Blank) => {}
            SubmitOutcome::Rejected(Rejection::NotConfigured) => {
                if let Some(reason) = session.configuration_error() {
                    println!("{}\n", configuration_banner(&reason));
                }
            }
            SubmitOutcome::Rejected(reason) => {
                println!("{}\n", reason.to_string().yellow());
            }
            SubmitOutcome::Discarded => {
                println!("{}\n", "The conversation was reset.".dimmed());
            }
            SubmitOutcome::Referred | SubmitOutcome::Answered | SubmitOutcome::Failed(_) => {
                // The user line is already on screen; print only the reply
                let messages = session.messages();
                for message in messages.iter().skip(before + 1) {
                    println!("\n{}\n", format_message(message));
                }
                if let Some(message) = session.snapshot().last_error_message() {
                    println!("{}\n", error_banner(&message));
                }
            }
        }
    }

    fn print_history(snapshot: &SessionSnapshot) {
        for message in &snapshot.messages {
            println!("{}\n", format_message(message));
        }
        for banner in banners(snapshot) {
            println!("{}\n", banner);
        }
    }

    fn print_welcome_banner(config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Solace - Let's talk                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model: {}", config.provider.model.bold());
        println!("Type '/help' for available commands, '/exit' to quit");
        println!("Press Ctrl-C while waiting for a reply to start over\n");
    }

}

// Crisis classification handler
pub mod classify {
    //! One-shot crisis classification. Never contacts the remote service.

    use crate::error::Result;
    use crate::safety;

    /// Describe the verdict for `text`
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::commands::classify::classify_report;
    ///
    /// assert_eq!(classify_report("nice weather"), "normal");
    /// assert!(classify_report("I feel hopeless").starts_with("crisis"));
    /// ```
    pub fn classify_report(text: &str) -> String {
        match safety::matched_phrase(text) {
            Some(phrase) => format!("crisis (matched \"{}\")", phrase),
            None => safety::classify(text).to_string(),
        }
    }

    /// Print the verdict for the given words joined by spaces
    pub fn run_classify(words: &[String]) -> Result<()> {
        let text = words.join(" ");
        println!("{}", classify_report(&text));
        Ok(())
    }

}

// Credential handler
pub mod auth {
    use crate::credentials;
    use crate::error::{Result, SolaceError};
    use rustyline::DefaultEditor;

    /// Store an API key in the OS keyring, prompting when none is given
    pub async fn authenticate(api_key: Option<String>) -> Result<()> {
        let api_key = match api_key {
            Some(key) => key,
            None => {
                let mut rl = DefaultEditor::new()?;
                rl.readline("API key: ")?
            }
        };

        if api_key.trim().is_empty() {
            return Err(SolaceError::Config("API key cannot be empty".to_string()).into());
        }

        credentials::store_api_key(&api_key)?;
        println!(
            "API key stored in the system keyring. Set provider.use_keyring: true to use it."
        );
        Ok(())
    }

}
