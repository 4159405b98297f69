use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use triage_core::chat::{ChatClient, HttpTransport, SubmitOutcome};
use triage_core::storage::LocalStore;

use crate::cli::{Cli, Commands};
use crate::render;
use crate::{Error, Result};

type Client = ChatClient<HttpTransport>;

pub async fn dispatch(args: Cli) -> Result<()> {
    let mut client = open_client(&args)?;

    match args.command {
        Commands::Chat => chat_loop(&mut client).await?,
        Commands::Send { message } => {
            let message = message.join(" ");
            if message.trim().is_empty() {
                return Err(Error::Custom("Message must not be blank".into()));
            }
            submit(&mut client, message).await?;
        }
        Commands::History => print!("{}", render::render_history(client.history())),
        Commands::Clear => {
            client.clear_conversation()?;
            println!("Conversation cleared.");
        }
        Commands::Session => println!("{}", client.session_id()),
        Commands::Version => {}
    }

    Ok(())
}

fn open_client(args: &Cli) -> Result<Client> {
    let dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => LocalStore::default_dir()?,
    };
    let store = LocalStore::open(dir)?;
    log::debug!("using data dir {}", store.dir().display());

    let transport = HttpTransport::new(reqwest::Client::new(), args.endpoint.clone());
    Ok(ChatClient::open(store, transport)?)
}

/// Send one message and print the reply plus the details panel.
async fn submit(client: &mut Client, message: String) -> Result<()> {
    match client.send(message).await? {
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Answered(_) | SubmitOutcome::Failed(_) => {
            if let Some(last) = client.history().last() {
                println!("{}", render::render_message(last));
            }
            if !client.details().is_empty() {
                println!();
                print!("{}", render::render_details(&client.details())?);
            }
        }
    }
    Ok(())
}

async fn chat_loop(client: &mut Client) -> Result<()> {
    println!("Support Triage System");
    println!("Session ID: {}", client.session_id());
    println!();
    print!("{}", render::render_history(client.history()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = line.trim().to_string();
        match command.as_str() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                client.clear_conversation()?;
                println!("Conversation cleared.");
            }
            "/details" => print!("{}", render::render_details(&client.details())?),
            "/history" => print!("{}", render::render_history(client.history())),
            _ => submit(client, line).await?,
        }
    }

    Ok(())
}
