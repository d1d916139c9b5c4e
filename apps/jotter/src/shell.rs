use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use jotter_agent::AgentRuntime;

const WELCOME: &str = "Welcome to Jotter, your second brain for development projects.\n\
Type 'exit' or 'quit' to end the session.\n";
const PROMPT: &str = "\njotter> ";

/// The interactive loop: one prompt, one fully-awaited turn, one reply.
/// `exit`/`quit` (any case) or end-of-input terminate with exit code 0.
pub async fn run(runtime: &AgentRuntime, session: &str) -> color_eyre::Result<()> {
	let mut stdout = tokio::io::stdout();
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	stdout.write_all(WELCOME.as_bytes()).await?;

	loop {
		stdout.write_all(PROMPT.as_bytes()).await?;
		stdout.flush().await?;

		let Some(line) = lines.next_line().await? else {
			break;
		};
		let input = line.trim();

		if input.is_empty() {
			continue;
		}
		if is_exit_command(input) {
			break;
		}

		// A failed turn is reported and the loop keeps accepting input;
		// nothing short of missing configuration ends the session.
		match runtime.run_turn(session, input).await {
			Ok(reply) => {
				stdout.write_all(reply.as_bytes()).await?;
				stdout.write_all(b"\n").await?;
			},
			Err(err) => {
				tracing::error!(error = %err, "Turn failed.");

				stdout.write_all(format!("An error occurred: {err}\n").as_bytes()).await?;
			},
		}
	}

	stdout.write_all(b"Goodbye!\n").await?;

	Ok(())
}

fn is_exit_command(input: &str) -> bool {
	matches!(input.to_lowercase().as_str(), "exit" | "quit")
}
