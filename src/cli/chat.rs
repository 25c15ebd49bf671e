use anyhow::{Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::api::AppState;
use crate::chat::{ChatRequest, RelayError};
use crate::core::AppConfig;

/// Chat with the provider from the terminal. Works the same way as a
/// web client would: the history returned by each turn is sent back
/// with the next message.
pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let state = AppState::new(AppConfig::default());
    let relay = state.relay;
    if !relay.is_available() {
        bail!("Cohere client not initialized. Set COHERE_API_KEY and try again.");
    }

    let mut history = Vec::new();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                match relay.handle(ChatRequest::new(&line, history.clone())).await {
                    Ok(result) => {
                        println!("{}", result.response);
                        history = result.history;
                    }
                    Err(RelayError::InvalidInput) => continue,
                    Err(e) => bail!(e),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
